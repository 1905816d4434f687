//! 职位列表页
//!
//! 全量拉取一次，筛选在本地按渲染重新计算，不修改底层列表。

use crate::auth::use_auth;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::edit_job_dialog::EditJobDialog;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::loader::{load_page, mutate_page};
use crate::web::use_clock;
use friendboard_shared::filter::{ALL, JobFilter};
use friendboard_shared::page::PageState;
use friendboard_shared::protocol::{DeleteJobRequest, ListJobsRequest};
use friendboard_shared::reconcile::{apply_deleted, apply_updated};
use friendboard_shared::{Job, JobType, Location, Timestamp, User};
use leptos::prelude::*;

const EXPIRY_TICK_MS: u32 = 60_000;

#[component]
pub fn JobsPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let state = RwSignal::new(PageState::<Vec<Job>>::default());

    let (search, set_search) = signal(String::new());
    let (type_filter, set_type_filter) = signal(ALL.to_string());
    let (location_filter, set_location_filter) = signal(ALL.to_string());

    let delete_target = RwSignal::new(Option::<Job>::None);
    let edit_target = RwSignal::new(Option::<Job>::None);

    load_page(auth, toast, state, ListJobsRequest, "Failed to load jobs");

    // 过期状态随时间重新判定
    let now = use_clock(EXPIRY_TICK_MS);

    let filter = Memo::new(move |_| {
        JobFilter::from_inputs(&search.get(), &type_filter.get(), &location_filter.get())
    });

    let visible = move || {
        state.with(|s| {
            s.data()
                .map(|jobs| filter.with(|f| f.apply(jobs).into_iter().cloned().collect::<Vec<_>>()))
                .unwrap_or_default()
        })
    };

    let handle_delete = move |()| {
        let Some(job) = delete_target.get_untracked() else {
            return;
        };
        let id = job.id.clone();
        mutate_page(
            auth,
            toast,
            state,
            DeleteJobRequest { id: id.clone() },
            "Job deleted",
            "Failed to delete job",
            move |jobs, _| {
                apply_deleted(jobs, &id);
            },
            move |ok| {
                if ok {
                    delete_target.set(None);
                }
            },
        );
    };

    let handle_saved = move |updated: Job| {
        state.update(|s| {
            if let Some(jobs) = s.data_mut() {
                apply_updated(jobs, updated);
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold tracking-tight">"Job Listings"</h1>
                <p class="text-base-content/60 mt-1">"Browse opportunities shared by your friends"</p>
            </div>

            <div class="flex flex-col sm:flex-row gap-3">
                <label class="input input-bordered flex items-center gap-2 flex-1">
                    <Search attr:class="h-4 w-4 opacity-50" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search jobs..."
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </label>
                <select
                    class="select select-bordered w-full sm:w-40"
                    prop:value=type_filter
                    on:change=move |ev| set_type_filter.set(event_target_value(&ev))
                >
                    <option value=ALL>"All Types"</option>
                    {JobType::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
                        .collect_view()}
                </select>
                <select
                    class="select select-bordered w-full sm:w-40"
                    prop:value=location_filter
                    on:change=move |ev| set_location_filter.set(event_target_value(&ev))
                >
                    <option value=ALL>"All Locations"</option>
                    {Location::ALL
                        .into_iter()
                        .map(|l| view! { <option value=l.as_str()>{l.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show
                when=move || !state.with(PageState::is_loading)
                fallback=|| {
                    view! {
                        <div class="flex items-center justify-center py-20">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                }
            >
                <Show
                    when=move || !visible().is_empty()
                    fallback=move || {
                        let hint = if filter.with(JobFilter::is_active) {
                            "Try adjusting your filters"
                        } else {
                            "Be the first to post a job!"
                        };
                        view! {
                            <div class="flex flex-col items-center justify-center py-20 text-center">
                                <div class="h-16 w-16 rounded-2xl bg-base-300 flex items-center justify-center mb-4">
                                    <Inbox attr:class="h-8 w-8 opacity-50" />
                                </div>
                                <h3 class="text-lg font-semibold">"No jobs found"</h3>
                                <p class="text-base-content/60 text-sm mt-1">{hint}</p>
                            </div>
                        }
                    }
                >
                    <div class="space-y-3">
                        <For
                            each=visible
                            key=|job| (job.id.clone(), job.deadline, job.role.clone(), job.company_name.clone())
                            children=move |job| {
                                view! {
                                    <JobCard
                                        job=job
                                        now=now
                                        user=auth.user_untracked()
                                        on_delete=move |job: Job| delete_target.set(Some(job))
                                        on_edit=move |job: Job| edit_target.set(Some(job))
                                    />
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <ConfirmDialog
                open=Signal::derive(move || delete_target.with(Option::is_some))
                title="Delete Job"
                message=Signal::derive(move || {
                    delete_target
                        .with(|job| {
                            job.as_ref()
                                .map(|j| {
                                    format!(
                                        "Are you sure you want to delete \"{}\" at {}? This action cannot be undone.",
                                        j.role,
                                        j.company_name,
                                    )
                                })
                        })
                        .unwrap_or_default()
                })
                confirm_label="Delete"
                busy=Signal::derive(move || state.with(PageState::is_mutating))
                on_confirm=handle_delete
                on_cancel=move |()| delete_target.set(None)
            />

            <EditJobDialog
                job=edit_target
                on_saved=handle_saved
                on_close=move |()| edit_target.set(None)
            />
        </div>
    }
}

/// 列表中的一张职位卡片
#[component]
fn JobCard(
    job: Job,
    now: Signal<Timestamp>,
    user: Option<User>,
    #[prop(into)] on_delete: Callback<Job>,
    #[prop(into)] on_edit: Callback<Job>,
) -> impl IntoView {
    let can_manage = user.as_ref().is_some_and(|u| u.can_manage(&job));
    let deadline_job = job.clone();
    let expired = Memo::new(move |_| now.with(|t| deadline_job.is_expired_at(t)));
    let card_class = move || {
        if expired.get() {
            "card bg-base-100 border border-base-300 hover:border-primary/30 hover:shadow-md transition-all opacity-60"
        } else {
            "card bg-base-100 border border-base-300 hover:border-primary/30 hover:shadow-md transition-all"
        }
    };
    let type_class = format!(
        "inline-flex items-center px-2.5 py-0.5 rounded-md text-xs font-medium border {}",
        job.job_type.badge_class()
    );
    let location_class = format!(
        "inline-flex items-center px-2.5 py-0.5 rounded-md text-xs font-medium border {}",
        job.location.badge_class()
    );
    let source_class = format!(
        "inline-flex items-center px-2.5 py-0.5 rounded-md text-xs font-medium {}",
        job.source.badge_class()
    );
    let label_job = job.clone();
    let deadline_label = move || now.with(|t| label_job.deadline_label_at(t));
    let source_label = job.source.label().to_string();
    let apply_link = job.apply_link.clone();
    let delete_job = job.clone();
    let edit_job = job.clone();

    view! {
        <div class=card_class>
            <div class="card-body p-5">
                <div class="flex flex-col sm:flex-row sm:items-center gap-4">
                    <div class="hidden sm:flex h-12 w-12 rounded-xl bg-primary/5 border border-primary/10 items-center justify-center shrink-0">
                        <Building2 attr:class="h-6 w-6 text-primary" />
                    </div>
                    <div class="flex-1 min-w-0">
                        <div class="flex items-start justify-between gap-2">
                            <div>
                                <h3 class="font-semibold text-base leading-tight">{job.role.clone()}</h3>
                                <p class="text-sm text-base-content/60 mt-0.5">{job.company_name.clone()}</p>
                            </div>
                            <div class="flex items-center gap-2 shrink-0">
                                <a href=apply_link.clone() target="_blank" rel="noopener noreferrer" class="btn btn-primary btn-sm hidden sm:flex gap-1.5">
                                    "Apply" <ExternalLink attr:class="h-3 w-3" />
                                </a>
                                <Show when=move || can_manage>
                                    {
                                        let delete_job = delete_job.clone();
                                        let edit_job = edit_job.clone();
                                        view! {
                                            <div class="dropdown dropdown-end">
                                                <div tabindex="0" role="button" class="btn btn-ghost btn-sm btn-square">
                                                    <Pencil attr:class="h-4 w-4" />
                                                </div>
                                                <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-40">
                                                    <li>
                                                        <a on:click=move |_| on_edit.run(edit_job.clone())>
                                                            <Pencil attr:class="h-4 w-4" /> "Edit"
                                                        </a>
                                                    </li>
                                                    <li>
                                                        <a class="text-error hover:bg-error/10" on:click=move |_| on_delete.run(delete_job.clone())>
                                                            <Trash2 attr:class="h-4 w-4" /> "Delete"
                                                        </a>
                                                    </li>
                                                </ul>
                                            </div>
                                        }
                                    }
                                </Show>
                            </div>
                        </div>

                        <div class="flex flex-wrap items-center gap-2 mt-3">
                            <span class=type_class>
                                <Briefcase attr:class="h-3 w-3 mr-1" />
                                {job.job_type.as_str()}
                            </span>
                            <span class=location_class>
                                <MapPin attr:class="h-3 w-3 mr-1" />
                                {job.location.as_str()}
                            </span>
                            <span class=source_class>{source_label}</span>
                            <span class="inline-flex items-center px-2.5 py-0.5 rounded-md text-xs font-medium text-base-content/60">
                                <Calendar attr:class="h-3 w-3 mr-1" />
                                {deadline_label}
                            </span>
                            <span class="inline-flex items-center px-2.5 py-0.5 rounded-md text-xs text-base-content/60">
                                <Clock attr:class="h-3 w-3 mr-1" />
                                "by " {job.posted_by_name.clone()}
                            </span>
                        </div>

                        <a href=apply_link target="_blank" rel="noopener noreferrer" class="btn btn-primary btn-sm w-full gap-1.5 sm:hidden mt-3">
                            "Apply" <ExternalLink attr:class="h-3 w-3" />
                        </a>
                    </div>
                </div>
            </div>
        </div>
    }
}
