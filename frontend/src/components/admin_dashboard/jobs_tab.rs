use super::patch_stats;
use crate::auth::use_auth;
use crate::components::icons::{Inbox, Trash2};
use crate::components::toast::use_toast;
use crate::loader::mutate_page;
use friendboard_shared::page::PageState;
use friendboard_shared::protocol::DeleteJobRequest;
use friendboard_shared::reconcile::apply_deleted;
use friendboard_shared::{AdminStats, Job, JobType};
use leptos::prelude::*;

/// 全部职位；管理员可直接删除任意一条
///
/// 删除可以同时进行多条，每行在自己的请求返回前禁用删除按钮。
#[component]
pub fn JobsTab(
    jobs: RwSignal<PageState<Vec<Job>>>,
    stats: RwSignal<PageState<AdminStats>>,
) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let rows = move || jobs.with(|s| s.data().cloned().unwrap_or_default());
    let is_empty = move || jobs.with(|s| s.data().is_none_or(Vec::is_empty));
    // 删除请求尚未返回的职位 id
    let pending = RwSignal::new(Vec::<String>::new());

    let handle_delete = move |job: Job| {
        let id = job.id.clone();
        if pending.with_untracked(|ids| ids.contains(&id)) {
            return;
        }
        pending.update(|ids| ids.push(id.clone()));
        let done_id = id.clone();
        mutate_page(
            auth,
            toast,
            jobs,
            DeleteJobRequest { id: id.clone() },
            "Job deleted",
            "Failed to delete job",
            move |list, _| {
                apply_deleted(list, &id);
            },
            move |ok| {
                pending.try_update(|ids| ids.retain(|p| *p != done_id));
                if ok {
                    patch_stats(stats, AdminStats::on_job_deleted);
                }
            },
        );
    };

    view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Role"</th>
                            <th>"Company"</th>
                            <th class="hidden sm:table-cell">"Type"</th>
                            <th class="hidden sm:table-cell">"Posted By"</th>
                            <th class="hidden md:table-cell">"Deadline"</th>
                            <th class="w-12"></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|job| (job.id.clone(), job.deadline, job.role.clone(), job.company_name.clone())
                            children=move |job| {
                                let id = job.id.clone();
                                let busy = Signal::derive(move || pending.with(|ids| ids.contains(&id)));
                                view! { <JobRow job=job busy=busy on_delete=handle_delete /> }
                            }
                        />
                        <Show when=is_empty>
                            <tr>
                                <td colspan="6" class="h-48 text-center">
                                    <div class="flex flex-col items-center justify-center py-4">
                                        <Inbox attr:class="h-8 w-8 opacity-50 mb-2" />
                                        <h3 class="font-semibold">"No jobs posted yet"</h3>
                                        <p class="text-base-content/60 text-sm mt-1">
                                            "Jobs posted by users will appear here."
                                        </p>
                                    </div>
                                </td>
                            </tr>
                        </Show>
                    </tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
fn JobRow(
    job: Job,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_delete: Callback<Job>,
) -> impl IntoView {
    let type_class = match job.job_type {
        JobType::Internship => {
            "inline-flex px-2 py-0.5 rounded-md text-xs font-medium bg-amber-500/10 text-amber-600 dark:text-amber-400"
        }
        JobType::Job => {
            "inline-flex px-2 py-0.5 rounded-md text-xs font-medium bg-emerald-500/10 text-emerald-600 dark:text-emerald-400"
        }
    };
    let deadline = job.deadline.format_short();
    let target = job.clone();

    view! {
        <tr class="hover">
            <td class="font-medium">{job.role.clone()}</td>
            <td class="text-base-content/60">{job.company_name.clone()}</td>
            <td class="hidden sm:table-cell">
                <span class=type_class>{job.job_type.as_str()}</span>
            </td>
            <td class="hidden sm:table-cell text-sm">{job.posted_by_name.clone()}</td>
            <td class="hidden md:table-cell text-base-content/60 text-sm">{deadline}</td>
            <td>
                <button
                    class="btn btn-ghost btn-sm btn-square hover:text-error"
                    title="Delete"
                    disabled=move || busy.get()
                    on:click=move |_| on_delete.run(target.clone())
                >
                    {move || {
                        if busy.get() {
                            view! { <span class="loading loading-spinner loading-xs"></span> }.into_any()
                        } else {
                            view! { <Trash2 attr:class="h-4 w-4" /> }.into_any()
                        }
                    }}
                </button>
            </td>
        </tr>
    }
}
