//! 职位表单
//!
//! 发布页与编辑对话框共用。校验在本地完成，失败时只显示内联消息、不发请求。

use friendboard_shared::form::JobFormInput;
use friendboard_shared::{JobDraft, JobSource, JobType, Location};
use leptos::prelude::*;

#[component]
pub fn JobForm(
    form: RwSignal<JobFormInput>,
    #[prop(into)] submitting: Signal<bool>,
    #[prop(into)] submit_label: String,
    #[prop(into)] submitting_label: String,
    /// `<input type="date">` 的最小值（发布时为今天）
    #[prop(optional, into)]
    min_deadline: Option<String>,
    #[prop(into)] on_submit: Callback<JobDraft>,
    /// 提供时显示"取消"按钮（编辑对话框）
    #[prop(optional, into)]
    on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let handle_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.with_untracked(JobFormInput::validate) {
            Ok(draft) => {
                set_error_msg.set(None);
                on_submit.run(draft);
            }
            Err(e) => set_error_msg.set(Some(e.message().to_string())),
        }
    };

    view! {
        <form on:submit=handle_submit class="space-y-4">
            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="form-control">
                    <label for="company_name" class="label">
                        <span class="label-text">"Company Name"</span>
                    </label>
                    <input
                        id="company_name"
                        type="text"
                        placeholder="e.g. Google"
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.company_name.clone())
                        on:input=move |ev| form.update(|f| f.company_name = event_target_value(&ev))
                    />
                </div>
                <div class="form-control">
                    <label for="role" class="label">
                        <span class="label-text">"Role"</span>
                    </label>
                    <input
                        id="role"
                        type="text"
                        placeholder="e.g. Software Engineer"
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.role.clone())
                        on:input=move |ev| form.update(|f| f.role = event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="form-control">
                    <label for="job_type" class="label">
                        <span class="label-text">"Job Type"</span>
                    </label>
                    <select
                        id="job_type"
                        class="select select-bordered w-full"
                        prop:value=move || form.with(|f| f.job_type.clone())
                        on:change=move |ev| form.update(|f| f.job_type = event_target_value(&ev))
                    >
                        <option value="" disabled>"Select type"</option>
                        {JobType::ALL
                            .into_iter()
                            .map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-control">
                    <label for="location" class="label">
                        <span class="label-text">"Location"</span>
                    </label>
                    <select
                        id="location"
                        class="select select-bordered w-full"
                        prop:value=move || form.with(|f| f.location.clone())
                        on:change=move |ev| form.update(|f| f.location = event_target_value(&ev))
                    >
                        <option value="" disabled>"Select location"</option>
                        {Location::ALL
                            .into_iter()
                            .map(|l| view! { <option value=l.as_str()>{l.as_str()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <div class="form-control">
                <label for="apply_link" class="label">
                    <span class="label-text">"Application Link"</span>
                </label>
                <input
                    id="apply_link"
                    type="url"
                    placeholder="https://careers.example.com/apply"
                    class="input input-bordered w-full"
                    prop:value=move || form.with(|f| f.apply_link.clone())
                    on:input=move |ev| form.update(|f| f.apply_link = event_target_value(&ev))
                />
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <div class="form-control">
                    <label for="deadline" class="label">
                        <span class="label-text">"Application Deadline"</span>
                    </label>
                    <input
                        id="deadline"
                        type="date"
                        min=min_deadline
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.deadline.clone())
                        on:input=move |ev| form.update(|f| f.deadline = event_target_value(&ev))
                    />
                </div>
                <div class="form-control">
                    <label for="source" class="label">
                        <span class="label-text">"Job Source"</span>
                    </label>
                    <select
                        id="source"
                        class="select select-bordered w-full"
                        prop:value=move || form.with(|f| f.source.clone())
                        on:change=move |ev| form.update(|f| f.source = event_target_value(&ev))
                    >
                        {JobSource::KNOWN
                            .iter()
                            .map(|s| {
                                let value = s.value().to_string();
                                let label = s.label().to_string();
                                view! { <option value=value>{label}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <div class="flex justify-end gap-2 pt-2">
                {on_cancel
                    .map(|cancel| {
                        view! {
                            <button type="button" class="btn btn-ghost" on:click=move |_| cancel.run(())>
                                "Cancel"
                            </button>
                        }
                    })}
                <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                    {
                        let submit_label = submit_label.clone();
                        let submitting_label = submitting_label.clone();
                        move || {
                            if submitting.get() {
                                view! {
                                    <span class="loading loading-spinner loading-sm"></span>
                                    {submitting_label.clone()}
                                }
                                    .into_any()
                            } else {
                                submit_label.clone().into_any()
                            }
                        }
                    }
                </button>
            </div>
        </form>
    }
}
