//! 路由定义与守卫
//!
//! 纯逻辑，不依赖 DOM。路由器在每次导航和会话变化时调用 [`guard`]，
//! 根据返回的 [`GuardDecision`] 渲染页面或以 replace 方式重定向。

use crate::session::Session;
use std::fmt::Display;
use tracing::debug;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    Login,
    /// `/`：管理员进入控制台，普通用户进入职位列表
    #[default]
    Home,
    Jobs,
    AddJob,
    Rankings,
    Profile,
    /// 仅管理员
    Admin,
    /// 未知路径
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，容忍末尾的 `/`
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/jobs" => Self::Jobs,
            "/add-job" => Self::AddJob,
            "/rankings" => Self::Rankings,
            "/profile" => Self::Profile,
            "/admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Home => "/",
            Self::Jobs => "/jobs",
            Self::AddJob => "/add-job",
            Self::Rankings => "/rankings",
            Self::Profile => "/profile",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// 除登录页外全部需要认证
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// 已认证用户应离开此路由（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 默认落地路由
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话仍在解析中：只渲染中性的加载指示
    Loading,
    Render(AppRoute),
    /// 以 replace 方式跳转，后退不会回到被拒绝的路由
    Redirect(AppRoute),
}

/// 路由守卫
///
/// `Home` 对管理员渲染为 `Admin`，对普通用户渲染为 `Jobs`，地址栏保持 `/`。
pub fn guard(route: AppRoute, session: &Session) -> GuardDecision {
    if session.is_loading() {
        return GuardDecision::Loading;
    }

    let decision = match (route, session.user()) {
        (AppRoute::NotFound, _) => GuardDecision::Redirect(AppRoute::Home),
        (r, Some(_)) if r.should_redirect_when_authenticated() => {
            GuardDecision::Redirect(AppRoute::auth_success_redirect())
        }
        (r, None) if r.requires_auth() => GuardDecision::Redirect(AppRoute::auth_failure_redirect()),
        (AppRoute::Home, Some(user)) if user.is_admin() => GuardDecision::Render(AppRoute::Admin),
        (AppRoute::Home, Some(_)) => GuardDecision::Render(AppRoute::Jobs),
        (r, Some(user)) if r.requires_admin() && !user.is_admin() => {
            GuardDecision::Redirect(AppRoute::auth_success_redirect())
        }
        (r, _) => GuardDecision::Render(r),
    };

    if let GuardDecision::Redirect(target) = decision {
        debug!(from = %route, to = %target, "route guard redirect");
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use crate::fixtures::user;

    fn signed_in(role: Role) -> Session {
        Session::Authenticated {
            user: user("u1", "Asha", role),
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_path_parsing() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/jobs/"), AppRoute::Jobs);
        assert_eq!(AppRoute::from_path("/add-job"), AppRoute::AddJob);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::Rankings.to_string(), "/rankings");
    }

    #[test]
    fn test_loading_renders_nothing_protected() {
        let session = Session::Resolving {
            token: "tok".to_string(),
        };
        assert_eq!(guard(AppRoute::Jobs, &session), GuardDecision::Loading);
        assert_eq!(guard(AppRoute::Login, &session), GuardDecision::Loading);
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        for route in [AppRoute::Home, AppRoute::Jobs, AppRoute::Admin, AppRoute::Profile] {
            assert_eq!(
                guard(route, &Session::Anonymous),
                GuardDecision::Redirect(AppRoute::Login)
            );
        }
        assert_eq!(
            guard(AppRoute::Login, &Session::Anonymous),
            GuardDecision::Render(AppRoute::Login)
        );
    }

    #[test]
    fn test_friend_cannot_open_admin() {
        assert_eq!(
            guard(AppRoute::Admin, &signed_in(Role::Friend)),
            GuardDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(
            guard(AppRoute::Admin, &signed_in(Role::Admin)),
            GuardDecision::Render(AppRoute::Admin)
        );
    }

    #[test]
    fn test_index_depends_on_role() {
        assert_eq!(
            guard(AppRoute::Home, &signed_in(Role::Friend)),
            GuardDecision::Render(AppRoute::Jobs)
        );
        assert_eq!(
            guard(AppRoute::Home, &signed_in(Role::Admin)),
            GuardDecision::Render(AppRoute::Admin)
        );
    }

    #[test]
    fn test_signed_in_user_leaves_login_and_unknown_paths() {
        let session = signed_in(Role::Friend);
        assert_eq!(
            guard(AppRoute::Login, &session),
            GuardDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(
            guard(AppRoute::NotFound, &session),
            GuardDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(
            guard(AppRoute::Rankings, &session),
            GuardDecision::Render(AppRoute::Rankings)
        );
    }
}
