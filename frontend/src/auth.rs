//! 认证模块
//!
//! 会话是跨页面共享的唯一可变状态，只能通过这里的 init / login / logout
//! 修改。路由服务只读取会话信号，不感知 token 的来源。

use crate::api::FetchTransport;
use crate::config::AppConfig;
use crate::web::BrowserTokenStorage;
use friendboard_shared::form::validate_telegram_link;
use friendboard_shared::protocol::{ApiRequest, Transport};
use friendboard_shared::session::{Session, SessionManager};
use friendboard_shared::{BoardError, BoardResult, TelegramLinkStatus, User};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

type BrowserSessionManager = SessionManager<BrowserTokenStorage, FetchTransport>;

/// 认证上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    config: AppConfig,
}

impl AuthContext {
    /// 创建新的认证上下文（此时尚未读取持久化的 token）
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: RwSignal::new(Session::Anonymous),
            config,
        }
    }

    fn manager(&self) -> BrowserSessionManager {
        SessionManager::new(BrowserTokenStorage, FetchTransport::new(self.config))
            .with_token_key(self.config.token_storage_key)
    }

    pub fn config(&self) -> AppConfig {
        self.config
    }

    /// 会话信号（用于路由服务注入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    /// 当前用户
    pub fn user(&self) -> Signal<Option<User>> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.user().cloned()))
    }

    pub fn user_untracked(&self) -> Option<User> {
        self.session.with_untracked(|s| s.user().cloned())
    }

    pub fn is_admin(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Session::is_admin))
    }

    /// 启动时调用一次：有持久化 token 则进入解析状态并请求 `/auth/me`
    pub fn init(&self) {
        let manager = self.manager();
        let initial = manager.initial();
        let pending = initial.pending_token().map(str::to_string);
        self.session.set(initial);

        let Some(token) = pending else {
            info!("no persisted token, starting anonymous");
            return;
        };

        let session = self.session;
        spawn_local(async move {
            let resolved = manager.resolve(&token).await;
            session.update(|current| {
                // 解析期间会话已被替换时丢弃结果
                if current.is_loading() && current.holds_token(&token) {
                    *current = resolved;
                }
            });
        });
    }

    /// 登录
    ///
    /// 成功时更新会话并返回用户；失败时会话保持不变。
    pub async fn login(&self, email: &str, password: &str) -> BoardResult<User> {
        let next = self.manager().login(email, password).await?;
        let user = next
            .user()
            .cloned()
            .ok_or_else(|| BoardError::backend("login returned no user"))?;
        self.session.set(next);
        Ok(user)
    }

    /// 注销：清除 token，导航由路由守卫自动处理
    pub fn logout(&self) {
        let next = self.manager().logout();
        self.session.set(next);
    }

    /// 以当前会话的 token 发送请求
    ///
    /// 401 响应使会话失效（fail-closed）；但若请求期间会话已经切换，则不影响新会话。
    pub async fn call<R: ApiRequest>(&self, request: R) -> BoardResult<R::Response> {
        let token = self
            .session
            .try_with_untracked(|s| s.token().map(str::to_string))
            .flatten()
            .ok_or_else(|| BoardError::unauthorized("Not authenticated"))?;

        let result = FetchTransport::new(self.config)
            .send(Some(&token), &request)
            .await;

        if let Err(e) = &result {
            let still_current = self
                .session
                .try_with_untracked(|s| s.holds_token(&token))
                .unwrap_or(false);
            if e.is_auth_failure() && still_current {
                warn!(error = %e, "token rejected by backend, signing out");
                self.logout();
            }
        }
        result
    }

    /// 绑定 Telegram，成功后就地更新会话中的用户
    pub async fn link_telegram(&self, chat_id: &str) -> BoardResult<TelegramLinkStatus> {
        let request = validate_telegram_link(chat_id)?;
        let status = self.call(request).await?;
        self.session
            .update(|s| s.set_telegram_chat_id(&status.telegram_chat_id));
        info!("telegram linked");
        Ok(status)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
