//! 管理面板
//!
//! 统计、用户、职位三份数据并发拉取，各自独立进入就绪状态；
//! 机器人分析在第一次切到对应标签页时才拉取。

mod analytics_tab;
mod broadcast_tab;
mod create_user_dialog;
mod jobs_tab;
mod users_tab;

use crate::auth::use_auth;
use crate::components::animated_counter::AnimatedCounter;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::loader::load_page_with;
use friendboard_shared::analytics::BotAnalytics;
use friendboard_shared::page::PageState;
use friendboard_shared::protocol::{AdminStatsRequest, BotAnalyticsRequest, ListJobsRequest, ListUsersRequest};
use friendboard_shared::{AdminStats, Job, User};
use leptos::prelude::*;

use analytics_tab::AnalyticsTab;
use broadcast_tab::BroadcastTab;
use create_user_dialog::CreateUserDialog;
use jobs_tab::JobsTab;
use users_tab::UsersTab;

const LOAD_FAILURE: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Users,
    Jobs,
    Broadcast,
    Analytics,
}

/// 变更成功后本地修正统计卡片；统计尚未就绪时忽略
fn patch_stats(stats: RwSignal<PageState<AdminStats>>, patch: impl FnOnce(&mut AdminStats)) {
    stats.try_update(|s| {
        if let Some(stats) = s.data_mut() {
            patch(stats);
        }
    });
}

/// 列表长度；未就绪时为 0
fn list_len<T>(state: &PageState<Vec<T>>) -> usize {
    state.data().map(Vec::len).unwrap_or(0)
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let stats = RwSignal::new(PageState::<AdminStats>::default());
    let users = RwSignal::new(PageState::<Vec<User>>::default());
    let jobs = RwSignal::new(PageState::<Vec<Job>>::default());
    let analytics = RwSignal::new(PageState::<BotAnalytics>::default());

    let tab = RwSignal::new(AdminTab::Users);
    let create_open = RwSignal::new(false);

    // 三个请求共用一条失败提示
    let failure_reported = StoredValue::new(false);
    let report = move |message: String| {
        if !failure_reported.get_value() {
            failure_reported.set_value(true);
            toast.error(message);
        }
    };
    load_page_with(auth, stats, AdminStatsRequest, LOAD_FAILURE, report);
    load_page_with(auth, users, ListUsersRequest, LOAD_FAILURE, report);
    load_page_with(auth, jobs, ListJobsRequest, LOAD_FAILURE, report);

    // 分析数据失败时静默，标签页显示空状态
    let fetch_analytics = move || {
        load_page_with(auth, analytics, BotAnalyticsRequest, LOAD_FAILURE, |_| {});
    };

    let open_tab = move |next: AdminTab| {
        if next == AdminTab::Analytics && analytics.with_untracked(|s| matches!(s, PageState::Initial)) {
            fetch_analytics();
        }
        tab.set(next);
    };

    let stat = move |pick: fn(&AdminStats) -> u64| {
        Signal::derive(move || stats.with(|s| s.data().map(pick).unwrap_or(0)))
    };

    let loading = move || {
        stats.with(PageState::is_loading) || users.with(PageState::is_loading) || jobs.with(PageState::is_loading)
    };

    let tab_class = move |t: AdminTab| {
        move || {
            if tab.get() == t {
                "tab tab-active gap-2"
            } else {
                "tab gap-2"
            }
        }
    };

    view! {
        <Show
            when=move || !loading()
            fallback=|| {
                view! {
                    <div class="flex items-center justify-center py-20">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            }
        >
            <div class="space-y-8">
                <div class="flex items-center justify-between">
                    <div>
                        <h1 class="text-3xl font-bold tracking-tight">"Admin Dashboard"</h1>
                        <p class="text-base-content/60 mt-1">"Manage users and monitor activity"</p>
                    </div>
                    <button class="btn btn-primary gap-2" on:click=move |_| create_open.set(true)>
                        <Plus attr:class="h-4 w-4" />
                        "Add Friend"
                    </button>
                </div>

                <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                    <StatCard label="Total Users" value=stat(|s| s.total_users) color="text-blue-500">
                        <Users attr:class="h-5 w-5" />
                    </StatCard>
                    <StatCard label="Friends" value=stat(|s| s.total_friends) color="text-emerald-500">
                        <UserPlus attr:class="h-5 w-5" />
                    </StatCard>
                    <StatCard label="Total Jobs" value=stat(|s| s.total_jobs) color="text-purple-500">
                        <Briefcase attr:class="h-5 w-5" />
                    </StatCard>
                    <StatCard label="Posted Today" value=stat(|s| s.today_jobs) color="text-amber-500">
                        <Activity attr:class="h-5 w-5" />
                    </StatCard>
                </div>

                <div>
                    <div role="tablist" class="tabs tabs-boxed w-full max-w-2xl grid grid-cols-4">
                        <a role="tab" class=tab_class(AdminTab::Users) on:click=move |_| open_tab(AdminTab::Users)>
                            <Users attr:class="h-4 w-4" />
                            {move || format!("Users ({})", users.with(list_len))}
                        </a>
                        <a role="tab" class=tab_class(AdminTab::Jobs) on:click=move |_| open_tab(AdminTab::Jobs)>
                            <Briefcase attr:class="h-4 w-4" />
                            {move || format!("Jobs ({})", jobs.with(list_len))}
                        </a>
                        <a role="tab" class=tab_class(AdminTab::Broadcast) on:click=move |_| open_tab(AdminTab::Broadcast)>
                            <MessageCircle attr:class="h-4 w-4" />
                            "Broadcast"
                        </a>
                        <a role="tab" class=tab_class(AdminTab::Analytics) on:click=move |_| open_tab(AdminTab::Analytics)>
                            <BarChart3 attr:class="h-4 w-4" />
                            "Bot Analytics"
                        </a>
                    </div>

                    <div class="mt-4">
                        {move || match tab.get() {
                            AdminTab::Users => view! { <UsersTab users=users stats=stats /> }.into_any(),
                            AdminTab::Jobs => view! { <JobsTab jobs=jobs stats=stats /> }.into_any(),
                            AdminTab::Broadcast => view! { <BroadcastTab users=users /> }.into_any(),
                            AdminTab::Analytics => {
                                view! { <AnalyticsTab analytics=analytics on_refresh=move |()| fetch_analytics() /> }
                                    .into_any()
                            }
                        }}
                    </div>
                </div>

                <CreateUserDialog open=create_open users=users stats=stats />
            </div>
        </Show>
    }
}

/// 带动画计数的统计卡片
#[component]
fn StatCard(
    label: &'static str,
    #[prop(into)] value: Signal<u64>,
    color: &'static str,
    children: Children,
) -> impl IntoView {
    let icon_class = format!("h-10 w-10 rounded-xl bg-base-200 flex items-center justify-center {color}");
    view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="card-body p-5">
                <div class="flex items-center justify-between">
                    <div>
                        <p class="text-sm text-base-content/60">{label}</p>
                        <p class="text-2xl font-bold mt-1">
                            <AnimatedCounter value=value />
                        </p>
                    </div>
                    <div class=icon_class>{children()}</div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_len_before_and_after_load() {
        let mut state = PageState::<Vec<u8>>::default();
        assert_eq!(list_len(&state), 0);
        state.finish_loading(Ok(vec![1, 2, 3]));
        assert_eq!(list_len(&state), 3);
    }
}
