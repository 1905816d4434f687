use crate::auth::use_auth;
use crate::components::icons::Send;
use crate::components::job_form::JobForm;
use crate::components::toast::use_toast;
use crate::web::router::use_navigate;
use friendboard_shared::form::JobFormInput;
use friendboard_shared::route::AppRoute;
use friendboard_shared::{JobDraft, Timestamp};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

/// 发布职位页
///
/// 成功后跳转到职位列表，由列表页重新拉取。
#[component]
pub fn AddJobPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let navigate = use_navigate();
    let form = RwSignal::new(JobFormInput::default());
    let (submitting, set_submitting) = signal(false);

    let today = Timestamp::now().to_date_input();

    let back = move |_| navigate(AppRoute::Jobs.to_path());

    let handle_submit = move |draft: JobDraft| {
        set_submitting.set(true);
        spawn_local(async move {
            match auth.call(draft).await {
                Ok(job) => {
                    info!(job_id = %job.id, "job posted");
                    toast.success("Job posted successfully! Notifications sent.");
                    navigate(AppRoute::Jobs.to_path());
                }
                Err(e) => {
                    warn!(error = %e, "job post failed");
                    toast.error(e.user_message("Failed to post job"));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="max-w-2xl mx-auto">
            <button class="btn btn-ghost mb-6 -ml-2 text-base-content/60" on:click=back>
                "← Back to Jobs"
            </button>
            <div class="card bg-base-100 border border-base-300">
                <div class="card-body">
                    <h1 class="card-title text-2xl font-bold tracking-tight">
                        <Send attr:class="h-5 w-5 text-primary" />
                        "Post a Job"
                    </h1>
                    <p class="text-base-content/60 mb-2">"Share an opportunity with your friends"</p>
                    <JobForm
                        form=form
                        submitting=submitting
                        submit_label="Post Job"
                        submitting_label="Posting..."
                        min_deadline=today
                        on_submit=handle_submit
                    />
                </div>
            </div>
        </div>
    }
}
