use super::patch_stats;
use crate::auth::use_auth;
use crate::components::confirm_dialog::sync_dialog;
use crate::components::toast::use_toast;
use crate::loader::mutate_page;
use friendboard_shared::form::validate_new_user;
use friendboard_shared::page::PageState;
use friendboard_shared::reconcile::apply_created;
use friendboard_shared::{AdminStats, User};
use leptos::prelude::*;

/// 为朋友创建账户
///
/// 成功后把返回的用户追加到列表并修正计数，然后清空表单并关闭。
#[component]
pub fn CreateUserDialog(
    open: RwSignal<bool>,
    users: RwSignal<PageState<Vec<User>>>,
    stats: RwSignal<PageState<AdminStats>>,
) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    sync_dialog(dialog_ref, open.into());

    let reset_form = move || {
        set_name.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match validate_new_user(
            &email.get_untracked(),
            &password.get_untracked(),
            &name.get_untracked(),
        ) {
            Ok(request) => request,
            Err(e) => {
                toast.error(e.user_message("Failed to create user"));
                return;
            }
        };
        let success = format!("Account created for {}", request.name);
        mutate_page(
            auth,
            toast,
            users,
            request,
            success,
            "Failed to create user",
            apply_created,
            move |ok| {
                if ok {
                    patch_stats(stats, AdminStats::on_user_created);
                    reset_form();
                    open.set(false);
                }
            },
        );
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Add Friend"</h3>
                <p class="py-2 text-base-content/70 text-sm">
                    "Create a new account for a friend to join FriendBoard."
                </p>
                <form class="space-y-4 pt-2" on:submit=on_submit>
                    <div class="form-control">
                        <label for="new-name" class="label">
                            <span class="label-text">"Name"</span>
                        </label>
                        <input
                            id="new-name"
                            type="text"
                            placeholder="Friend's name"
                            class="input input-bordered w-full"
                            prop:value=name
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label for="new-email" class="label">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input
                            id="new-email"
                            type="email"
                            placeholder="friend@email.com"
                            class="input input-bordered w-full"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label for="new-password" class="label">
                            <span class="label-text">"Password"</span>
                        </label>
                        <input
                            id="new-password"
                            type="password"
                            placeholder="Set a password"
                            class="input input-bordered w-full"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="modal-action">
                        <button type="button" class="btn btn-outline" on:click=move |_| open.set(false)>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || users.with(PageState::is_mutating)
                        >
                            {move || {
                                if users.with(PageState::is_mutating) { "Creating..." } else { "Create Account" }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
