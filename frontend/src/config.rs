//! 应用配置
//!
//! 所有配置在编译期从环境变量读取（CSR 构建产物是静态文件，没有运行时环境），
//! 未设置时使用下面的默认值。

use friendboard_shared::{API_PREFIX, STORAGE_TOKEN_KEY};
use tracing::Level;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TELEGRAM_BOT_URL: &str = "https://t.me/FriendBoardBot";

const fn env_or(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(v) => v,
        None => default,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端根地址，不含 `/api`
    pub backend_url: &'static str,
    pub api_prefix: &'static str,
    pub token_storage_key: &'static str,
    pub log_level: &'static str,
    pub telegram_bot_url: &'static str,
}

impl AppConfig {
    pub const fn from_env() -> Self {
        Self {
            backend_url: env_or(option_env!("FRIENDBOARD_BACKEND_URL"), DEFAULT_BACKEND_URL),
            api_prefix: API_PREFIX,
            token_storage_key: STORAGE_TOKEN_KEY,
            log_level: env_or(option_env!("FRIENDBOARD_LOG"), DEFAULT_LOG_LEVEL),
            telegram_bot_url: env_or(
                option_env!("FRIENDBOARD_TELEGRAM_BOT_URL"),
                DEFAULT_TELEGRAM_BOT_URL,
            ),
        }
    }

    /// `{backend}/api{path}`，容忍 backend_url 末尾的 `/`
    pub fn api_url(&self, path: &str) -> String {
        let base = self.backend_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}{}", base, self.api_prefix, path)
        } else {
            format!("{}{}/{}", base, self.api_prefix, path)
        }
    }

    /// 无法识别的级别回退到 INFO
    pub fn max_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 启动时读取一次的全局配置
pub const CONFIG: AppConfig = AppConfig::from_env();

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend_url: &'static str) -> AppConfig {
        AppConfig {
            backend_url,
            ..AppConfig::from_env()
        }
    }

    #[test]
    fn test_api_url_joins_prefix() {
        let cfg = config("https://board.example.com/");
        assert_eq!(cfg.api_url("/jobs"), "https://board.example.com/api/jobs");
        assert_eq!(cfg.api_url("jobs/7"), "https://board.example.com/api/jobs/7");
    }

    #[test]
    fn test_log_level_fallback() {
        let cfg = AppConfig {
            log_level: "loud",
            ..AppConfig::from_env()
        };
        assert_eq!(cfg.max_level(), Level::INFO);
        let cfg = AppConfig {
            log_level: "debug",
            ..AppConfig::from_env()
        };
        assert_eq!(cfg.max_level(), Level::DEBUG);
    }
}
