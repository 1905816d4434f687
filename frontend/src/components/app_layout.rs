//! 已登录页面的公共外壳：顶部导航、主题切换、Telegram 绑定、登出

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::telegram_dialog::TelegramDialog;
use crate::web::Theme;
use crate::web::router::{Link, use_router};
use friendboard_shared::route::AppRoute;
use leptos::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum NavIcon {
    Dashboard,
    Jobs,
    PostJob,
    Rankings,
    Profile,
}

impl NavIcon {
    fn view(self) -> AnyView {
        match self {
            NavIcon::Dashboard => view! { <ShieldCheck attr:class="h-4 w-4" /> }.into_any(),
            NavIcon::Jobs => view! { <Briefcase attr:class="h-4 w-4" /> }.into_any(),
            NavIcon::PostJob => view! { <Plus attr:class="h-4 w-4" /> }.into_any(),
            NavIcon::Rankings => view! { <Trophy attr:class="h-4 w-4" /> }.into_any(),
            NavIcon::Profile => view! { <UserIcon attr:class="h-4 w-4" /> }.into_any(),
        }
    }
}

const NAV_ITEMS: [(AppRoute, &str, NavIcon); 4] = [
    (AppRoute::Jobs, "Jobs", NavIcon::Jobs),
    (AppRoute::AddJob, "Post Job", NavIcon::PostJob),
    (AppRoute::Rankings, "Rankings", NavIcon::Rankings),
    (AppRoute::Profile, "Profile", NavIcon::Profile),
];

const ADMIN_ITEM: (AppRoute, &str, NavIcon) = (AppRoute::Admin, "Dashboard", NavIcon::Dashboard);

/// 管理员额外看到 Dashboard
fn nav_items(is_admin: bool) -> Vec<(AppRoute, &'static str, NavIcon)> {
    let mut items = Vec::with_capacity(NAV_ITEMS.len() + 1);
    if is_admin {
        items.push(ADMIN_ITEM);
    }
    items.extend(NAV_ITEMS);
    items
}

#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let user = auth.user();
    let is_admin = auth.is_admin();

    let (mobile_open, set_mobile_open) = signal(false);
    let telegram_open = RwSignal::new(false);
    let (theme, set_theme) = signal(Theme::load());

    Effect::new(move |_| theme.get().apply());

    let nav_link = move |(route, label, icon): (AppRoute, &'static str, NavIcon), mobile: bool| {
        let class = Signal::derive(move || {
            let base = if mobile {
                "flex items-center gap-3 px-4 py-3 rounded-lg text-sm font-medium transition-colors"
            } else {
                "flex items-center gap-2 px-4 py-2 rounded-md text-sm font-medium transition-colors"
            };
            let active = router.current_route().get() == route;
            let state = if active {
                "bg-primary/10 text-primary"
            } else {
                "text-base-content/60 hover:text-base-content hover:bg-base-200"
            };
            format!("{base} {state}")
        });
        view! {
            <span on:click=move |_| set_mobile_open.set(false)>
                <Link to=route.to_path() class=class>
                    {icon.view()}
                    {label}
                </Link>
            </span>
        }
    };

    let on_logout = move |_| auth.logout();

    view! {
        <div class="min-h-screen bg-base-200">
            <nav class="sticky top-0 z-40 border-b border-base-300 bg-base-100/80 backdrop-blur-xl">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex h-16 items-center justify-between">
                        <Link to="/" class=Signal::stored("flex items-center gap-2.5 group".to_string())>
                            <div class="h-9 w-9 rounded-lg bg-primary flex items-center justify-center transition-transform group-hover:scale-105">
                                <Briefcase attr:class="h-5 w-5 text-primary-content" />
                            </div>
                            <span class="text-xl font-bold tracking-tight hidden sm:block">"FriendBoard"</span>
                        </Link>

                        <div class="hidden md:flex items-center gap-1">
                            {move || {
                                nav_items(is_admin.get())
                                    .into_iter()
                                    .map(|item| nav_link(item, false))
                                    .collect_view()
                            }}
                        </div>

                        <div class="flex items-center gap-2">
                            <button
                                class="btn btn-ghost btn-square btn-sm"
                                title="Link Telegram"
                                on:click=move |_| telegram_open.set(true)
                            >
                                <Send attr:class="h-4 w-4" />
                            </button>
                            <button
                                class="btn btn-ghost btn-square btn-sm"
                                title="Toggle theme"
                                on:click=move |_| set_theme.update(|t| *t = t.toggled())
                            >
                                {move || match theme.get() {
                                    Theme::Dark => view! { <Sun attr:class="h-4 w-4" /> }.into_any(),
                                    Theme::Light => view! { <Moon attr:class="h-4 w-4" /> }.into_any(),
                                }}
                            </button>
                            <div class="hidden sm:flex items-center gap-3 pl-3 border-l border-base-300 ml-1">
                                <div class="text-right">
                                    <p class="text-sm font-medium leading-none">
                                        {move || user.get().map(|u| u.name).unwrap_or_default()}
                                    </p>
                                    <p class="text-xs text-base-content/60 mt-0.5 capitalize">
                                        {move || user.get().map(|u| u.role.as_str()).unwrap_or_default()}
                                    </p>
                                </div>
                                <button
                                    class="btn btn-ghost btn-square btn-sm hover:text-error"
                                    title="Logout"
                                    on:click=on_logout
                                >
                                    <LogOut attr:class="h-4 w-4" />
                                </button>
                            </div>
                            <button
                                class="btn btn-ghost btn-square btn-sm md:hidden"
                                on:click=move |_| set_mobile_open.update(|open| *open = !*open)
                            >
                                {move || if mobile_open.get() {
                                    view! { <X attr:class="h-5 w-5" /> }.into_any()
                                } else {
                                    view! { <Menu attr:class="h-5 w-5" /> }.into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </div>

                <Show when=move || mobile_open.get()>
                    <div class="md:hidden border-t border-base-300">
                        <div class="p-4 space-y-1">
                            {move || {
                                nav_items(is_admin.get())
                                    .into_iter()
                                    .map(|item| nav_link(item, true))
                                    .collect_view()
                            }}
                            <div class="pt-3 border-t border-base-300 mt-3">
                                <div class="flex items-center justify-between px-4 py-2">
                                    <span class="text-sm text-base-content/60">
                                        {move || {
                                            user.get()
                                                .map(|u| format!("{} ({})", u.name, u.role))
                                                .unwrap_or_default()
                                        }}
                                    </span>
                                    <button class="btn btn-ghost btn-sm gap-2" on:click=on_logout>
                                        <LogOut attr:class="h-4 w-4" />
                                        "Logout"
                                    </button>
                                </div>
                            </div>
                        </div>
                    </div>
                </Show>
            </nav>

            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">{children()}</main>

            <TelegramDialog open=telegram_open />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_link_only_for_admins() {
        let friend: Vec<_> = nav_items(false).into_iter().map(|(r, _, _)| r).collect();
        assert!(!friend.contains(&AppRoute::Admin));
        assert_eq!(friend.len(), 4);

        let admin = nav_items(true);
        assert_eq!(admin[0].0, AppRoute::Admin);
        assert_eq!(admin.len(), 5);
    }
}
