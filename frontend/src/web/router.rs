//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 导航只负责更新"请求的路由"，渲染什么由守卫根据会话决定，
//! 守卫产生的重定向一律使用 replaceState。

use friendboard_shared::route::{AppRoute, GuardDecision, guard};
use friendboard_shared::session::Session;
use leptos::prelude::*;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入会话信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 地址栏对应的路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 守卫的判定结果，只在判定变化时通知下游
    decision: Memo<GuardDecision>,
}

impl RouterService {
    /// 创建新的路由服务
    fn new(session: Signal<Session>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);
        let decision =
            Memo::new(move |_| session.with(|s| guard(current_route.get(), s)));

        Self {
            current_route,
            set_route,
            decision,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn decision(&self) -> Memo<GuardDecision> {
        self.decision
    }

    /// 导航到路径（pushState），守卫随后决定是否重定向
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        debug!(target: "router", to = %target_route, "navigate");
        push_history_state(target_route.to_path());
        self.set_route.set(target_route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // 守卫会在路由变化后重新判定
            set_route.set(target_route);
        });

        match web_sys::window() {
            Some(window) => {
                if let Err(e) = window
                    .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
                {
                    warn!(target: "router", error = ?e, "failed to attach popstate listener");
                }
            }
            None => warn!(target: "router", "no window, popstate listener not attached"),
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 守卫判定为重定向时替换当前历史记录
    ///
    /// 会话变化（登录、登出、解析完成）与路由变化都会重新触发判定。
    fn setup_guard_redirect(&self) {
        let decision = self.decision;
        let set_route = self.set_route;

        Effect::new(move |_| {
            if let GuardDecision::Redirect(target) = decision.get() {
                debug!(target: "router", to = %target, "guard redirect (replace)");
                replace_history_state(target.to_path());
                set_route.set(target);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_guard_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Copy + Send + Sync + 'static {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<Session>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据守卫判定渲染对应的组件；解析会话期间只渲染加载指示。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || match router.decision().get() {
        GuardDecision::Loading => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        GuardDecision::Render(route) => matcher(route),
        GuardDecision::Redirect(_) => ().into_any(),
    }
}

/// 站内链接：拦截点击，改为 pushState 导航
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    /// 支持根据当前路由变化的 class
    #[prop(into)]
    class: Signal<String>,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let to_clone = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to_clone);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
