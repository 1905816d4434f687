//! 机器人分析标签页
//!
//! 拉取失败与尚未拉取时都显示空状态。

use crate::components::animated_counter::AnimatedCounter;
use crate::components::icons::{Activity, BarChart3, Bell, Inbox, Megaphone, MousePointerClick, RefreshCw, Users};
use friendboard_shared::Timestamp;
use friendboard_shared::analytics::{
    BotAnalytics, BotEvent, DailyActivity, JobResponses, ResponseBreakdown, UserActivity, bar_heights,
};
use friendboard_shared::date::time_ago;
use friendboard_shared::page::PageState;
use leptos::prelude::*;

#[component]
pub fn AnalyticsTab(
    analytics: RwSignal<PageState<BotAnalytics>>,
    #[prop(into)] on_refresh: Callback<()>,
) -> impl IntoView {
    let body = move || {
        if analytics.with(PageState::is_loading) {
            return view! {
                <div class="flex items-center justify-center py-20">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any();
        }
        match analytics.with(|s| s.data().cloned()) {
            Some(data) => analytics_view(data).into_any(),
            None => view! {
                <div class="card bg-base-100 border border-base-300">
                    <div class="card-body py-12">
                        <EmptyNote
                            title="No analytics data yet"
                            description="Analytics will appear once users start interacting with the Telegram bot."
                        />
                    </div>
                </div>
            }
            .into_any(),
        }
    };

    view! {
        <div class="space-y-6">
            {body}
            <div class="flex justify-center">
                <button
                    class="btn btn-outline gap-2"
                    disabled=move || analytics.with(PageState::is_loading)
                    on:click=move |_| on_refresh.run(())
                >
                    <RefreshCw attr:class="h-4 w-4" />
                    "Refresh Analytics"
                </button>
            </div>
        </div>
    }
}

#[component]
fn EmptyNote(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center text-center py-4">
            <Inbox attr:class="h-8 w-8 opacity-50 mb-2" />
            <h3 class="font-semibold">{title}</h3>
            <p class="text-base-content/60 text-sm mt-1">{description}</p>
        </div>
    }
}

fn counter(value: u64) -> AnyView {
    view! { <AnimatedCounter value=Signal::stored(value) /> }.into_any()
}

fn analytics_view(data: BotAnalytics) -> impl IntoView {
    let overview = data.overview;
    let now = Timestamp::now();

    view! {
        <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
            <OverviewCard
                label="Linked Users"
                color="text-blue-500"
                value=view! { <span>{overview.linked_ratio()}</span> }.into_any()
            >
                <Users attr:class="h-5 w-5" />
            </OverviewCard>
            <OverviewCard
                label="Button Clicks"
                color="text-violet-500"
                value=counter(overview.total_button_clicks)
            >
                <MousePointerClick attr:class="h-5 w-5" />
            </OverviewCard>
            <OverviewCard
                label="Broadcasts Sent"
                color="text-emerald-500"
                value=counter(overview.total_broadcasts_sent)
            >
                <Megaphone attr:class="h-5 w-5" />
            </OverviewCard>
            <OverviewCard
                label="Reminders Sent"
                color="text-amber-500"
                value=counter(overview.total_reminders_sent)
            >
                <Bell attr:class="h-5 w-5" />
            </OverviewCard>
        </div>

        {breakdown_view(data.response_breakdown)}
        {per_job_view(data.per_job_responses)}
        {per_user_view(data.per_user_activity)}
        {daily_view(data.daily_activity)}
        {recent_view(data.recent_events, now)}
    }
}

/// 总览卡片；children 为右侧图标
#[component]
fn OverviewCard(
    label: &'static str,
    color: &'static str,
    value: AnyView,
    children: Children,
) -> impl IntoView {
    let icon_class = format!("h-10 w-10 rounded-xl bg-base-200 flex items-center justify-center {color}");
    view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="card-body p-5">
                <div class="flex items-center justify-between">
                    <div>
                        <p class="text-sm text-base-content/60">{label}</p>
                        <p class="text-2xl font-bold mt-1">{value}</p>
                    </div>
                    <div class=icon_class>{children()}</div>
                </div>
            </div>
        </div>
    }
}

fn section(title: &'static str, body: AnyView) -> impl IntoView {
    view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="card-body">
                <h2 class="card-title text-lg">{title}</h2>
                {body}
            </div>
        </div>
    }
}

// =========================================================
// 回复分布
// =========================================================

fn breakdown_view(breakdown: ResponseBreakdown) -> Option<impl IntoView> {
    let slices = breakdown.slices()?;
    let bar = slices
        .iter()
        .filter(|s| s.count > 0)
        .map(|s| {
            let class = format!("{} transition-all duration-700", s.action.color_class());
            let style = format!("width: {}%", s.width_percent);
            let title = format!("{}: {}%", s.action.label(), s.width_percent);
            view! { <div class=class style=style title=title></div> }
        })
        .collect_view();
    let legend = slices
        .iter()
        .map(|s| {
            let swatch = format!("w-3 h-3 rounded-sm {}", s.action.color_class());
            view! {
                <div class="flex items-center gap-1.5 text-sm">
                    <div class=swatch></div>
                    <span>{s.action.label().to_string()}</span>
                    <span class="font-semibold">{s.count}</span>
                    <span class="text-base-content/60">{format!("({}%)", s.legend_percent)}</span>
                </div>
            }
        })
        .collect_view();

    Some(view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="card-body space-y-4">
                <h2 class="card-title text-lg">
                    <BarChart3 attr:class="h-5 w-5 text-primary" />
                    "Response Breakdown"
                </h2>
                <div class="w-full h-5 rounded-full overflow-hidden flex bg-base-300">{bar}</div>
                <div class="flex flex-wrap gap-4">{legend}</div>
            </div>
        </div>
    })
}

// =========================================================
// 明细表
// =========================================================

fn per_job_view(rows: Vec<JobResponses>) -> impl IntoView {
    let body = if rows.is_empty() {
        view! {
            <tr>
                <td colspan="8">
                    <EmptyNote title="No job data" description="Job responses will appear here." />
                </td>
            </tr>
        }
        .into_any()
    } else {
        rows.into_iter()
            .map(|j| {
                let rate_class = format!(
                    "inline-flex px-2 py-0.5 rounded-md text-xs font-semibold {}",
                    j.rate_tier().badge_class()
                );
                let rate = j.rate_label();
                view! {
                    <tr class="hover">
                        <td class="font-medium max-w-[200px] truncate">{j.job_title}</td>
                        <td class="hidden sm:table-cell text-base-content/60">{j.company}</td>
                        <td class="text-center">{j.total_notified}</td>
                        <td class="text-center font-medium text-emerald-600 dark:text-emerald-400">{j.applied}</td>
                        <td class="text-center font-medium text-red-500">{j.not_interested}</td>
                        <td class="text-center font-medium text-amber-500">{j.remind}</td>
                        <td class="text-center hidden sm:table-cell text-base-content/60">{j.no_response}</td>
                        <td class="text-center">
                            <span class=rate_class>{rate}</span>
                        </td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    section(
        "Per-Job Responses",
        view! {
            <div class="overflow-x-auto -mx-4">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Job"</th>
                            <th class="hidden sm:table-cell">"Company"</th>
                            <th class="text-center">"Notified"</th>
                            <th class="text-center">"✅"</th>
                            <th class="text-center">"❌"</th>
                            <th class="text-center">"🔔"</th>
                            <th class="text-center hidden sm:table-cell">"No Reply"</th>
                            <th class="text-center">"Rate"</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
        }
        .into_any(),
    )
}

fn per_user_view(rows: Vec<UserActivity>) -> impl IntoView {
    let body = if rows.is_empty() {
        view! {
            <tr>
                <td colspan="7">
                    <EmptyNote title="No user activity" description="User bot activity will appear here." />
                </td>
            </tr>
        }
        .into_any()
    } else {
        rows.into_iter()
            .map(|u| {
                let last_active = u
                    .last_active
                    .map(|t| t.format_short())
                    .unwrap_or_else(|| "--".to_string());
                view! {
                    <tr class="hover">
                        <td class="font-medium">{u.user_name}</td>
                        <td class="hidden sm:table-cell text-base-content/60 text-sm">{u.user_email}</td>
                        <td class="text-center font-bold">{u.total_clicks}</td>
                        <td class="text-center font-medium text-emerald-600 dark:text-emerald-400">{u.applied}</td>
                        <td class="text-center font-medium text-red-500">{u.not_interested}</td>
                        <td class="text-center font-medium text-amber-500">{u.remind}</td>
                        <td class="hidden sm:table-cell text-base-content/60 text-sm">{last_active}</td>
                    </tr>
                }
            })
            .collect_view()
            .into_any()
    };

    section(
        "Per-User Activity",
        view! {
            <div class="overflow-x-auto -mx-4">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"User"</th>
                            <th class="hidden sm:table-cell">"Email"</th>
                            <th class="text-center">"Total"</th>
                            <th class="text-center">"✅"</th>
                            <th class="text-center">"❌"</th>
                            <th class="text-center">"🔔"</th>
                            <th class="hidden sm:table-cell">"Last Active"</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
        }
        .into_any(),
    )
}

// =========================================================
// 每日柱状图与事件流
// =========================================================

fn daily_view(days: Vec<DailyActivity>) -> Option<impl IntoView> {
    if days.is_empty() {
        return None;
    }
    let heights = bar_heights(&days);
    let bars = days
        .iter()
        .zip(heights)
        .map(|(day, height)| {
            let style = format!("height: {height}%");
            view! {
                <div class="flex flex-col items-center justify-end flex-1 min-w-[18px] h-full group relative">
                    <div class="absolute -top-8 left-1/2 -translate-x-1/2 opacity-0 group-hover:opacity-100 transition-opacity bg-base-100 border border-base-300 shadow-lg rounded-md px-2 py-1 text-xs whitespace-nowrap z-10 pointer-events-none">
                        <div class="font-semibold">{day.date.clone()}</div>
                        <div>{day.tooltip()}</div>
                    </div>
                    <div
                        class="w-full rounded-t-sm bg-gradient-to-t from-primary/80 to-primary transition-all duration-500 cursor-pointer"
                        style=style
                    ></div>
                    <span class="text-[10px] text-base-content/60 mt-1 -rotate-45 origin-top-left absolute -bottom-5 left-1/2">
                        {day.short_label().to_string()}
                    </span>
                </div>
            }
        })
        .collect_view();

    Some(view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="card-body">
                <h2 class="card-title text-lg">
                    <Activity attr:class="h-5 w-5 text-primary" />
                    "Daily Bot Activity (Last 30 Days)"
                </h2>
                <div class="flex items-end gap-1 h-40 overflow-x-auto pb-6 relative">{bars}</div>
                <div class="flex gap-4 mt-4 text-xs text-base-content/60">
                    <span>"📊 Hover bars for details"</span>
                </div>
            </div>
        </div>
    })
}

fn recent_view(events: Vec<BotEvent>, now: Timestamp) -> impl IntoView {
    let body = if events.is_empty() {
        view! { <EmptyNote title="No recent events" description="Bot events will appear here in real time." /> }
            .into_any()
    } else {
        let rows = events
            .iter()
            .map(|ev| {
                let ago = ev
                    .created_at
                    .map(|then| time_ago(&then, &now))
                    .unwrap_or_default();
                let dot = format!("w-2 h-2 rounded-full mt-2 shrink-0 {}", ev.dot_class());
                view! {
                    <div class="flex items-start gap-3 py-2 px-3 rounded-lg hover:bg-base-200 transition-colors">
                        <div class="flex-1 min-w-0">
                            <p class="text-sm leading-relaxed">{ev.describe()}</p>
                            <p class="text-xs text-base-content/60 mt-0.5">{ago}</p>
                        </div>
                        <div class=dot></div>
                    </div>
                }
            })
            .collect_view();
        view! { <div class="space-y-2 max-h-[400px] overflow-y-auto pr-2">{rows}</div> }.into_any()
    };

    view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="card-body">
                <h2 class="card-title text-lg">
                    <Activity attr:class="h-5 w-5 text-primary" />
                    "Recent Bot Activity"
                </h2>
                {body}
            </div>
        </div>
    }
}
