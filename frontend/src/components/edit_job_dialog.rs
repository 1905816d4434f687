use crate::auth::use_auth;
use crate::components::confirm_dialog::sync_dialog;
use crate::components::job_form::JobForm;
use crate::components::toast::use_toast;
use friendboard_shared::form::JobFormInput;
use friendboard_shared::protocol::UpdateJobRequest;
use friendboard_shared::{Job, JobDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

/// 把保存结果交给所在页面并关闭对话框
///
/// 请求期间页面可能已卸载，回调随之释放；此时返回 false，结果被丢弃。
fn deliver_saved(on_saved: Callback<Job>, on_close: Callback<()>, updated: Job) -> bool {
    let delivered = on_saved.try_run(updated).is_some();
    on_close.try_run(());
    delivered
}

/// 编辑职位对话框
///
/// `job` 为 Some 时打开。保存成功后把服务端返回的记录交给 `on_saved`。
#[component]
pub fn EditJobDialog(
    #[prop(into)] job: Signal<Option<Job>>,
    #[prop(into)] on_saved: Callback<Job>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let form = RwSignal::new(JobFormInput::default());
    let (saving, set_saving) = signal(false);

    let open = Signal::derive(move || job.with(Option::is_some));
    sync_dialog(dialog_ref, open);

    // 每次打开时用职位当前值填充表单
    Effect::new(move |_| {
        if let Some(job) = job.get() {
            form.set(JobFormInput::from_draft(&job.to_draft()));
        }
    });

    let handle_submit = move |draft: JobDraft| {
        let Some(id) = job.with_untracked(|j| j.as_ref().map(|j| j.id.clone())) else {
            return;
        };
        set_saving.set(true);
        spawn_local(async move {
            match auth.call(UpdateJobRequest { id, draft }).await {
                Ok(updated) => {
                    toast.success("Job updated successfully!");
                    deliver_saved(on_saved, on_close, updated);
                }
                Err(e) => {
                    warn!(error = %e, "job update failed");
                    toast.error(e.user_message("Failed to update job"));
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">"Edit Job"</h3>
                <p class="py-2 text-base-content/70">"Update the details of this opportunity."</p>
                <JobForm
                    form=form
                    submitting=saving
                    submit_label="Save Changes"
                    submitting_label="Saving..."
                    on_submit=handle_submit
                    on_cancel=on_close
                />
            </div>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friendboard_shared::{JobSource, JobType, Location, Timestamp};
    use leptos::reactive::owner::Owner;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn job() -> Job {
        let at = Timestamp::parse("2030-01-01").unwrap_or_else(Timestamp::now);
        Job {
            id: "j1".to_string(),
            company_name: "Acme".to_string(),
            role: "Engineer".to_string(),
            job_type: JobType::Job,
            location: Location::Remote,
            apply_link: "https://acme.example/apply".to_string(),
            deadline: at,
            posted_by: "u1".to_string(),
            posted_by_name: "Asha".to_string(),
            created_at: at,
            source: JobSource::default(),
        }
    }

    fn callbacks(calls: &Arc<AtomicUsize>) -> (Callback<Job>, Callback<()>) {
        let saved = Arc::clone(calls);
        let closed = Arc::clone(calls);
        (
            Callback::new(move |_: Job| {
                saved.fetch_add(1, Ordering::SeqCst);
            }),
            Callback::new(move |()| {
                closed.fetch_add(1, Ordering::SeqCst);
            }),
        )
    }

    #[test]
    fn test_saved_job_reaches_live_page() {
        let owner = Owner::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (on_saved, on_close) = owner.with(|| callbacks(&calls));
        assert!(deliver_saved(on_saved, on_close, job()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_saved_job_after_page_unmount_is_dropped() {
        let owner = Owner::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (on_saved, on_close) = owner.with(|| callbacks(&calls));
        owner.cleanup();
        assert!(!deliver_saved(on_saved, on_close, job()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
