//! 会话状态机
//!
//! ```text
//!            initial()
//!   token? ──yes──> Resolving ──resolve ok──> Authenticated
//!     │                  │                        │
//!     no           resolve err                 logout()
//!     │            (清除 token)                   │
//!     └────────────> Anonymous <──────────────────┘
//!                        │
//!                   login ok ──> Authenticated
//! ```
//!
//! `user()` 与 `token()` 只在 `Authenticated` 下同时有值，其余状态下同时为 None。
//! 解析中的 token 通过 `pending_token()` 读取，不会被当作可用凭据附加到请求上。

use crate::error::BoardResult;
use crate::form::validate_login;
use crate::protocol::{MeRequest, Transport};
use crate::{STORAGE_TOKEN_KEY, User};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// 正在用持久化的 token 换取当前用户
    Resolving { token: String },
    Anonymous,
    Authenticated { user: User, token: String },
}

impl Default for Session {
    fn default() -> Self {
        Session::Anonymous
    }
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// 可附加到请求上的 bearer token
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn pending_token(&self) -> Option<&str> {
        match self {
            Session::Resolving { token } => Some(token),
            _ => None,
        }
    }

    /// 只在启动时的解析阶段为 true
    pub fn is_loading(&self) -> bool {
        matches!(self, Session::Resolving { .. })
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }

    /// 异步结果返回时，会话是否仍然基于同一个 token
    ///
    /// 期间发生过登出或重新登录时返回 false，结果应被丢弃。
    pub fn holds_token(&self, token: &str) -> bool {
        match self {
            Session::Resolving { token: t } | Session::Authenticated { token: t, .. } => t == token,
            Session::Anonymous => false,
        }
    }

    /// 绑定 Telegram 成功后就地更新用户
    pub fn set_telegram_chat_id(&mut self, chat_id: &str) {
        if let Session::Authenticated { user, .. } = self {
            user.telegram_chat_id = Some(chat_id.to_string());
        }
    }
}

// =========================================================
// 持久化抽象
// =========================================================

/// token 的同步持久化存储
///
/// 写入与删除是同步完成的，返回后立即对后续读取可见。
pub trait TokenStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, token: &str) -> BoardResult<()>;
    fn remove(&self, key: &str) -> BoardResult<()>;
}

// =========================================================
// SessionManager
// =========================================================

/// 会话的唯一变更入口：login / logout / resolve
pub struct SessionManager<S: TokenStorage, T: Transport> {
    storage: S,
    transport: T,
    token_key: &'static str,
}

impl<S: TokenStorage, T: Transport> SessionManager<S, T> {
    pub fn new(storage: S, transport: T) -> Self {
        Self {
            storage,
            transport,
            token_key: STORAGE_TOKEN_KEY,
        }
    }

    /// 使用自定义的 token 存储键（默认 `STORAGE_TOKEN_KEY`）
    pub fn with_token_key(mut self, key: &'static str) -> Self {
        self.token_key = key;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 启动时的初始会话：有持久化 token 则进入解析状态
    pub fn initial(&self) -> Session {
        match self.storage.load(self.token_key) {
            Some(token) if !token.trim().is_empty() => Session::Resolving { token },
            _ => Session::Anonymous,
        }
    }

    /// 用 token 换取当前用户
    ///
    /// 任何失败（过期、无效、网络错误、响应无法解析）都视为未登录，并清除持久化的 token。
    pub async fn resolve(&self, token: &str) -> Session {
        match self.transport.send(Some(token), &MeRequest).await {
            Ok(user) => {
                info!(user_id = %user.id, role = %user.role, "session resolved");
                Session::Authenticated {
                    user,
                    token: token.to_string(),
                }
            }
            Err(e) => {
                let e = e.in_op("session.resolve");
                warn!(error = %e, "session resolution failed, signing out");
                self.clear_token();
                Session::Anonymous
            }
        }
    }

    /// 登录
    ///
    /// 失败时返回错误，调用方保持原会话不变；不会自动重试。
    pub async fn login(&self, email: &str, password: &str) -> BoardResult<Session> {
        let request = validate_login(email, password)?;
        let response = self
            .transport
            .send(None, &request)
            .await
            .map_err(|e| e.in_op("session.login"))?;

        self.storage
            .store(self.token_key, &response.token)
            .map_err(|e| e.in_op("session.persist_token"))?;

        info!(user_id = %response.user.id, "login succeeded");
        Ok(Session::Authenticated {
            user: response.user,
            token: response.token,
        })
    }

    /// 登出：只清除本地状态，不调用后端
    pub fn logout(&self) -> Session {
        self.clear_token();
        info!("logged out");
        Session::Anonymous
    }

    fn clear_token(&self) {
        if let Err(e) = self.storage.remove(self.token_key) {
            warn!(error = %e, "failed to remove persisted token");
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::TokenStorage;
    use crate::error::{BoardError, BoardResult};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct MockTokenStorage {
        pub data: RefCell<HashMap<String, String>>,
        pub fail_writes: Cell<bool>,
    }

    impl MockTokenStorage {
        pub fn with_token(token: &str) -> Self {
            let storage = Self::default();
            storage
                .data
                .borrow_mut()
                .insert(crate::STORAGE_TOKEN_KEY.to_string(), token.to_string());
            storage
        }

        pub fn token(&self) -> Option<String> {
            self.data.borrow().get(crate::STORAGE_TOKEN_KEY).cloned()
        }
    }

    impl TokenStorage for MockTokenStorage {
        fn load(&self, key: &str) -> Option<String> {
            self.data.borrow().get(key).cloned()
        }

        fn store(&self, key: &str, token: &str) -> BoardResult<()> {
            if self.fail_writes.get() {
                return Err(BoardError::backend("QuotaExceededError"));
            }
            self.data
                .borrow_mut()
                .insert(key.to_string(), token.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> BoardResult<()> {
            self.data.borrow_mut().remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTokenStorage;
    use super::*;
    use crate::protocol::mock::MockTransport;
    use crate::route::{AppRoute, GuardDecision, guard};

    const ME: &str = r#"{"id":"u1","email":"a@b.com","name":"Asha","role":"friend","telegram_chat_id":null}"#;
    const LOGIN_OK: &str = r#"{"token":"fresh","user":{"id":"u1","email":"a@b.com","name":"Asha","role":"friend","telegram_chat_id":null}}"#;

    fn manager(
        storage: MockTokenStorage,
        transport: MockTransport,
    ) -> SessionManager<MockTokenStorage, MockTransport> {
        SessionManager::new(storage, transport)
    }

    fn assert_consistent(session: &Session) {
        assert_eq!(session.user().is_some(), session.token().is_some());
    }

    #[test]
    fn test_initial_without_token_is_anonymous() {
        let m = manager(MockTokenStorage::default(), MockTransport::new());
        assert_eq!(m.initial(), Session::Anonymous);
        assert!(!m.initial().is_loading());
    }

    #[test]
    fn test_initial_with_token_is_resolving() {
        let m = manager(MockTokenStorage::with_token("saved"), MockTransport::new());
        let session = m.initial();
        assert!(session.is_loading());
        assert_eq!(session.pending_token(), Some("saved"));
        assert_consistent(&session);
    }

    #[tokio::test]
    async fn test_resolve_success_populates_user() {
        let transport = MockTransport::new().respond("GET /auth/me", 200, ME);
        let m = manager(MockTokenStorage::with_token("saved"), transport);

        let session = m.resolve("saved").await;
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Asha"));
        assert_eq!(session.token(), Some("saved"));
        assert_consistent(&session);

        let sent = m.transport().requests();
        assert_eq!(sent[0].token.as_deref(), Some("saved"));
    }

    #[tokio::test]
    async fn test_resolve_fails_closed_on_401() {
        let transport =
            MockTransport::new().respond("GET /auth/me", 401, r#"{"detail":"Token expired"}"#);
        let storage = MockTokenStorage::with_token("stale");
        let m = manager(storage, transport);

        let session = m.resolve("stale").await;
        assert_eq!(session, Session::Anonymous);
        assert!(m.storage.token().is_none());
    }

    #[tokio::test]
    async fn test_resolve_fails_closed_on_network_error() {
        // 未配置响应即模拟网络失败
        let m = manager(MockTokenStorage::with_token("saved"), MockTransport::new());
        assert_eq!(m.resolve("saved").await, Session::Anonymous);
        assert!(m.storage.token().is_none());
    }

    #[tokio::test]
    async fn test_resolve_fails_closed_on_garbage_body() {
        let transport = MockTransport::new().respond("GET /auth/me", 200, r#"{"unexpected":true}"#);
        let m = manager(MockTokenStorage::with_token("saved"), transport);
        assert_eq!(m.resolve("saved").await, Session::Anonymous);
    }

    #[tokio::test]
    async fn test_login_success_persists_token() {
        let transport = MockTransport::new().respond("POST /auth/login", 200, LOGIN_OK);
        let m = manager(MockTokenStorage::default(), transport);

        let session = m.login("a@b.com", "secret").await.unwrap();
        assert_eq!(session.token(), Some("fresh"));
        assert_eq!(m.storage.token().as_deref(), Some("fresh"));
        assert_consistent(&session);

        // 登录请求不携带 token
        let sent = m.transport().requests();
        assert_eq!(sent[0].key, "POST /auth/login");
        assert!(sent[0].token.is_none());
        assert_eq!(sent[0].body["email"], "a@b.com");

        // 离开登录页
        assert_eq!(
            guard(AppRoute::Login, &session),
            GuardDecision::Redirect(AppRoute::Home)
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password_leaves_session_unchanged() {
        let transport = MockTransport::new().respond(
            "POST /auth/login",
            401,
            r#"{"detail":"Invalid credentials"}"#,
        );
        let m = manager(MockTokenStorage::default(), transport);
        let current = Session::Anonymous;

        let err = m.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert!(m.storage.token().is_none());
        assert_eq!(
            guard(AppRoute::Login, &current),
            GuardDecision::Render(AppRoute::Login)
        );
    }

    #[tokio::test]
    async fn test_login_with_blank_fields_makes_no_request() {
        let m = manager(MockTokenStorage::default(), MockTransport::new());
        assert!(m.login("", "").await.is_err());
        assert!(m.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_login_fails_when_token_cannot_be_persisted() {
        let transport = MockTransport::new().respond("POST /auth/login", 200, LOGIN_OK);
        let storage = MockTokenStorage::default();
        storage.fail_writes.set(true);
        let m = manager(storage, transport);
        assert!(m.login("a@b.com", "secret").await.is_err());
    }

    #[tokio::test]
    async fn test_logout_clears_storage_and_guards_redirect() {
        let transport = MockTransport::new().respond("POST /auth/login", 200, LOGIN_OK);
        let m = manager(MockTokenStorage::default(), transport);
        m.login("a@b.com", "secret").await.unwrap();

        let session = m.logout();
        assert!(m.storage.token().is_none());
        assert_consistent(&session);
        assert_eq!(
            guard(AppRoute::Jobs, &session),
            GuardDecision::Redirect(AppRoute::Login)
        );
        // 登出不调用后端
        assert_eq!(m.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_token_key_used_for_every_storage_call() {
        let transport = MockTransport::new().respond("POST /auth/login", 200, LOGIN_OK);
        let m = manager(MockTokenStorage::with_token("old"), transport).with_token_key("board_token");

        // 默认键下的旧 token 不可见
        assert_eq!(m.initial(), Session::Anonymous);

        m.login("a@b.com", "secret").await.unwrap();
        assert_eq!(m.storage.load("board_token").as_deref(), Some("fresh"));
        assert_eq!(m.storage.token().as_deref(), Some("old"));

        m.logout();
        assert!(m.storage.load("board_token").is_none());
        assert_eq!(m.storage.token().as_deref(), Some("old"));
    }

    #[test]
    fn test_holds_token_detects_stale_results() {
        let resolving = Session::Resolving {
            token: "a".to_string(),
        };
        assert!(resolving.holds_token("a"));
        assert!(!resolving.holds_token("b"));
        assert!(!Session::Anonymous.holds_token("a"));
    }

    #[test]
    fn test_set_telegram_chat_id_only_when_signed_in() {
        let mut session: Session = Session::Authenticated {
            user: serde_json::from_str(ME).unwrap(),
            token: "t".to_string(),
        };
        session.set_telegram_chat_id("555");
        assert!(session.user().is_some_and(User::has_telegram));

        let mut anon = Session::Anonymous;
        anon.set_telegram_chat_id("555");
        assert_eq!(anon, Session::Anonymous);
    }
}
