//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口。
//! `localStorage` 的读写是同步的，写入返回后立即对后续读取（包括刷新后）可见。

use friendboard_shared::session::TokenStorage;
use friendboard_shared::{BoardError, BoardResult};

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// 键不存在或发生错误时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值
    pub fn set(key: &str, value: &str) -> BoardResult<()> {
        let storage = Self::storage()
            .ok_or_else(|| BoardError::backend("localStorage 不可用"))?;
        storage
            .set_item(key, value)
            .map_err(|e| BoardError::backend(format!("写入 localStorage 失败: {:?}", e)))
    }

    /// 删除存储的键值对
    pub fn delete(key: &str) -> BoardResult<()> {
        let storage = Self::storage()
            .ok_or_else(|| BoardError::backend("localStorage 不可用"))?;
        storage
            .remove_item(key)
            .map_err(|e| BoardError::backend(format!("删除 localStorage 失败: {:?}", e)))
    }
}

/// 以 localStorage 为后端的 token 存储
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStorage;

impl TokenStorage for BrowserTokenStorage {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::get(key)
    }

    fn store(&self, key: &str, token: &str) -> BoardResult<()> {
        LocalStorage::set(key, token)
    }

    fn remove(&self, key: &str) -> BoardResult<()> {
        LocalStorage::delete(key)
    }
}
