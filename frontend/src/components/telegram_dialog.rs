use crate::auth::use_auth;
use crate::components::confirm_dialog::sync_dialog;
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 绑定 Telegram chat id 的对话框
#[component]
pub fn TelegramDialog(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let (chat_id, set_chat_id) = signal(String::new());
    let (saving, set_saving) = signal(false);

    sync_dialog(dialog_ref, open.into());

    // 打开时预填已绑定的 chat id
    Effect::new(move |_| {
        if open.get() {
            let current = auth
                .user_untracked()
                .and_then(|u| u.telegram_chat_id)
                .unwrap_or_default();
            set_chat_id.set(current);
        }
    });

    let handle_link = move |_| {
        let value = chat_id.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            match auth.link_telegram(&value).await {
                Ok(_) => {
                    toast.success("Telegram linked successfully!");
                    open.try_set(false);
                }
                Err(e) => toast.error(e.user_message("Failed to link Telegram")),
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Link Telegram"</h3>
                <p class="py-2 text-base-content/70 text-sm">
                    "Enter your Telegram Chat ID to receive job notifications. Start our bot and use /start your@email.com to auto-link."
                </p>
                <div class="form-control py-2">
                    <label for="chat-id" class="label">
                        <span class="label-text">"Chat ID"</span>
                    </label>
                    <input
                        id="chat-id"
                        type="text"
                        placeholder="e.g. 123456789"
                        class="input input-bordered w-full"
                        prop:value=chat_id
                        on:input=move |ev| set_chat_id.set(event_target_value(&ev))
                    />
                </div>
                <div class="modal-action">
                    <button type="button" class="btn btn-outline" on:click=move |_| open.set(false)>
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="btn btn-primary"
                        on:click=handle_link
                        disabled=move || saving.get()
                    >
                        {move || if saving.get() { "Saving..." } else { "Link Telegram" }}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
