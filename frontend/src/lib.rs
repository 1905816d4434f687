//! FriendBoard 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `auth`: 会话状态与带 token 的请求
//! - `web::router`: 路由服务与守卫
//! - `loader`: 页面数据的加载与变更
//! - `components`: 页面与 UI 组件

mod api;
mod auth;
mod components {
    pub mod add_job;
    pub mod admin_dashboard;
    mod animated_counter;
    pub mod app_layout;
    mod avatar;
    mod confirm_dialog;
    mod edit_job_dialog;
    mod icons;
    mod job_form;
    pub mod jobs;
    pub mod login;
    pub mod profile;
    pub mod rankings;
    mod telegram_dialog;
    pub mod toast;
}
pub mod config;
mod loader;

use crate::auth::AuthContext;
use crate::components::add_job::AddJobPage;
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::app_layout::AppLayout;
use crate::components::jobs::JobsPage;
use crate::components::login::LoginPage;
use crate::components::profile::ProfilePage;
use crate::components::rankings::RankingsPage;
use crate::components::toast::{ToastContext, Toaster};
use crate::config::CONFIG;

use friendboard_shared::route::AppRoute;
use leptos::prelude::*;
use tracing::info;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod console;
    mod http;
    pub mod router;
    mod storage;
    mod theme;
    mod timer;

    pub use console::init_logging;
    pub use http::HttpClient;
    pub use storage::{BrowserTokenStorage, LocalStorage};
    pub use theme::Theme;
    pub use timer::{Interval, now_ms, use_clock};
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 只会收到守卫放行的路由；`Home` 已被解析为具体页面，`NotFound` 总是被重定向。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::Jobs => view! { <JobsPage /> }.into_any(),
        AppRoute::AddJob => view! { <AddJobPage /> }.into_any(),
        AppRoute::Rankings => view! { <RankingsPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Admin => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::Home | AppRoute::NotFound => return ().into_any(),
    };
    view! { <AppLayout>{page}</AppLayout> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    web::init_logging(CONFIG.max_level());
    info!(backend = CONFIG.backend_url, "FriendBoard starting");

    // 1. 创建认证上下文并从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new(CONFIG);
    provide_context(auth_ctx);
    auth_ctx.init();

    // 2. 全局通知
    provide_context(ToastContext::new());

    // 3. 会话信号注入路由服务，守卫据此决定渲染什么
    let session = auth_ctx.session_signal();

    view! {
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <Toaster />
    }
}
