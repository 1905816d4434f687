//! 个人主页：账户信息、Telegram 绑定提示、自己发布的职位

use crate::auth::use_auth;
use crate::components::avatar::Avatar;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::edit_job_dialog::EditJobDialog;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::loader::{load_page, mutate_page};
use crate::web::router::use_navigate;
use friendboard_shared::page::PageState;
use friendboard_shared::protocol::{DeleteJobRequest, MyJobsRequest};
use friendboard_shared::reconcile::{apply_deleted, apply_updated};
use friendboard_shared::route::AppRoute;
use friendboard_shared::{Job, User};
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let navigate = use_navigate();
    let user = auth.user();
    let telegram_bot_url = auth.config().telegram_bot_url;
    let state = RwSignal::new(PageState::<Vec<Job>>::default());

    let delete_target = RwSignal::new(Option::<Job>::None);
    let edit_target = RwSignal::new(Option::<Job>::None);

    load_page(auth, toast, state, MyJobsRequest, "Failed to load your jobs");

    let jobs = move || state.with(|s| s.data().cloned().unwrap_or_default());
    let job_count = move || state.with(|s| s.data().map(Vec::len).unwrap_or(0));

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
            "Job deleted successfully",
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

    let header = move |user: User| {
        let has_telegram = user.has_telegram();
        let start_command = format!("/start {}", user.email);
        view! {
            <div class="card bg-base-100 border border-base-300">
                <div class="card-body p-6 md:p-8 flex-col md:flex-row gap-8 items-center md:items-start">
                    <Avatar name=user.name.clone() size="h-32 w-32 text-5xl shadow-xl" />
                    <div class="flex-1 space-y-4 text-center md:text-left">
                        <div>
                            <h1 class="text-3xl font-bold">{user.name.clone()}</h1>
                            <div class="flex items-center justify-center md:justify-start gap-2 text-base-content/60 mt-1">
                                <Mail attr:class="h-4 w-4" />
                                <span>{user.email.clone()}</span>
                                <span class="mx-1">"•"</span>
                                <ShieldCheck attr:class="h-4 w-4" />
                                <span class="capitalize">{user.role.as_str()}</span>
                            </div>
                        </div>
                        <div class="flex flex-wrap gap-3 justify-center md:justify-start">
                            <div class="flex items-center gap-2 px-3 py-1.5 rounded-full bg-primary/10 text-primary text-sm font-medium">
                                <Briefcase attr:class="h-4 w-4" />
                                {move || format!("{} Jobs Posted", job_count())}
                            </div>
                            {if has_telegram {
                                view! {
                                    <div class="flex items-center gap-2 px-3 py-1.5 rounded-full bg-blue-500/10 text-blue-600 dark:text-blue-400 text-sm font-medium">
                                        <Send attr:class="h-4 w-4" />
                                        "Telegram Linked"
                                    </div>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <div class="flex items-center gap-2 px-3 py-1.5 rounded-full bg-base-300 text-base-content/60 text-sm font-medium">
                                        <Send attr:class="h-4 w-4" />
                                        "No Telegram Link"
                                    </div>
                                }
                                .into_any()
                            }}
                        </div>
                        {(!has_telegram).then(|| {
                            view! {
                                <div class="bg-base-200 p-4 rounded-lg text-sm max-w-lg">
                                    <p class="font-semibold mb-1">"Get Job Alerts on Telegram 📱"</p>
                                    <p class="text-base-content/60">
                                        "Start the bot to link your account: "
                                        <code class="bg-base-100 px-1.5 py-0.5 rounded border border-base-300 text-base-content">
                                            {start_command}
                                        </code>
                                    </p>
                                    <a
                                        href=telegram_bot_url
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="inline-flex items-center gap-1.5 text-primary hover:underline mt-2 font-medium"
                                    >
                                        "Open Telegram Bot"
                                        <ExternalLink attr:class="h-3 w-3" />
                                    </a>
                                </div>
                            }
                        })}
                    </div>
                </div>
            </div>
        }
    };

    let post_job = move |_| navigate(AppRoute::AddJob.to_path());

    view! {
        <div class="max-w-4xl mx-auto space-y-8">
            {move || user.get().map(header)}

            <div class="space-y-4">
                <h2 class="text-xl font-bold flex items-center gap-2">
                    <Briefcase attr:class="h-5 w-5" />
                    "Your Posted Jobs"
                </h2>
                <Show
                    when=move || !state.with(PageState::is_loading)
                    fallback=|| {
                        view! {
                            <div class="flex items-center justify-center py-12">
                                <span class="loading loading-spinner loading-md text-primary"></span>
                            </div>
                        }
                    }
                >
                    <Show
                        when=move || (job_count() > 0)
                        fallback=move || {
                            view! {
                                <div class="flex flex-col items-center justify-center py-16 text-center">
                                    <div class="h-16 w-16 rounded-2xl bg-base-300 flex items-center justify-center mb-4">
                                        <Inbox attr:class="h-8 w-8 opacity-50" />
                                    </div>
                                    <h3 class="text-lg font-semibold">"No jobs posted yet"</h3>
                                    <p class="text-base-content/60 text-sm mt-1 max-w-sm">
                                        "You haven't posted any jobs. Share an opportunity with the community!"
                                    </p>
                                    <button class="btn btn-primary gap-2 mt-4" on:click=post_job>
                                        <Plus attr:class="h-4 w-4" />
                                        "Post a Job"
                                    </button>
                                </div>
                            }
                        }
                    >
                        <div class="grid gap-4">
                            <For
                                each=jobs
                                key=|job| (job.id.clone(), job.deadline, job.role.clone(), job.company_name.clone())
                                children=move |job| {
                                    view! {
                                        <PostedJobCard
                                            job=job
                                            on_delete=move |job: Job| delete_target.set(Some(job))
                                            on_edit=move |job: Job| edit_target.set(Some(job))
                                        />
                                    }
                                }
                            />
                        </div>
                    </Show>
                </Show>
            </div>

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

/// 个人主页上的职位卡片，总是带编辑和删除按钮
#[component]
fn PostedJobCard(
    job: Job,
    #[prop(into)] on_delete: Callback<Job>,
    #[prop(into)] on_edit: Callback<Job>,
) -> impl IntoView {
    let posted = format!("Posted {}", job.created_at.format_long());
    let due = format!("Due {}", job.deadline.format_long());
    let edit_job = job.clone();
    let delete_job = job.clone();

    view! {
        <div class="card bg-base-100 border border-base-300 hover:border-primary/50 transition-all">
            <div class="card-body p-5 flex-col md:flex-row gap-4 justify-between items-start md:items-center">
                <div class="space-y-1">
                    <div class="flex items-center gap-2">
                        <h3 class="font-bold text-lg">{job.role.clone()}</h3>
                        <span class="badge badge-outline">{job.job_type.as_str()}</span>
                    </div>
                    <div class="flex items-center gap-2 text-base-content/60 text-sm">
                        <Building2 attr:class="h-3.5 w-3.5" />
                        {job.company_name.clone()}
                        <span>"•"</span>
                        <MapPin attr:class="h-3.5 w-3.5" />
                        {job.location.as_str()}
                    </div>
                    <div class="flex items-center gap-4 text-xs text-base-content/60 mt-2">
                        <span class="flex items-center gap-1">
                            <Clock attr:class="h-3 w-3" />
                            {posted}
                        </span>
                        <span class="flex items-center gap-1">
                            <Calendar attr:class="h-3 w-3" />
                            {due}
                        </span>
                    </div>
                </div>
                <div class="flex items-center gap-2 w-full md:w-auto mt-4 md:mt-0">
                    <a
                        href=job.apply_link.clone()
                        target="_blank"
                        rel="noopener noreferrer"
                        class="btn btn-outline btn-sm flex-1 md:flex-none"
                    >
                        "View"
                    </a>
                    <button
                        class="btn btn-ghost btn-sm btn-square hover:text-primary"
                        title="Edit"
                        on:click=move |_| on_edit.run(edit_job.clone())
                    >
                        <Pencil attr:class="h-4 w-4" />
                    </button>
                    <button
                        class="btn btn-ghost btn-sm btn-square hover:text-error"
                        title="Delete"
                        on:click=move |_| on_delete.run(delete_job.clone())
                    >
                        <Trash2 attr:class="h-4 w-4" />
                    </button>
                </div>
            </div>
        </div>
    }
}
