//! 明暗主题
//!
//! 偏好保存在 localStorage；应用时同时设置 daisyUI 的 `data-theme`
//! 与 tailwind `dark:` 变体依赖的 `dark` class。

use super::LocalStorage;
use friendboard_shared::STORAGE_THEME_KEY;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// 读取保存的偏好，没有则为亮色
    pub fn load() -> Self {
        match LocalStorage::get(STORAGE_THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// 应用到 `<html>` 并保存
    pub fn apply(&self) {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("data-theme", self.as_str());
            let class_list = root.class_list();
            let _ = match self {
                Theme::Dark => class_list.add_1("dark"),
                Theme::Light => class_list.remove_1("dark"),
            };
        }
        if let Err(e) = LocalStorage::set(STORAGE_THEME_KEY, self.as_str()) {
            warn!(error = %e, "failed to persist theme");
        }
    }
}
