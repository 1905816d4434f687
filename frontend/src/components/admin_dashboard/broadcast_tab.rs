use crate::auth::use_auth;
use crate::components::icons::Send;
use crate::components::toast::use_toast;
use friendboard_shared::form::validate_broadcast;
use friendboard_shared::page::PageState;
use friendboard_shared::{User, linked_user_count};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

/// "Send to 1 user" / "Send to 3 users"
fn send_label(linked: usize) -> String {
    let plural = if linked == 1 { "" } else { "s" };
    format!("Send to {linked} user{plural}")
}

/// 向所有已绑定 Telegram 的用户群发消息
#[component]
pub fn BroadcastTab(users: RwSignal<PageState<Vec<User>>>) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let (message, set_message) = signal(String::new());
    let (sending, set_sending) = signal(false);

    let linked = move || users.with(|s| s.data().map(|u| linked_user_count(u)).unwrap_or(0));
    let total = move || users.with(|s| s.data().map(Vec::len).unwrap_or(0));

    let handle_send = move |_| {
        let broadcast = match validate_broadcast(&message.get_untracked()) {
            Ok(broadcast) => broadcast,
            Err(e) => {
                toast.error(e.user_message("Please enter a message"));
                return;
            }
        };
        set_sending.set(true);
        spawn_local(async move {
            match auth.call(broadcast).await {
                Ok(receipt) => {
                    info!(sent = receipt.sent_count, "broadcast sent");
                    toast.success(receipt.summary());
                    set_message.try_set(String::new());
                }
                Err(e) => {
                    warn!(error = %e, "broadcast failed");
                    toast.error(e.user_message("Failed to send broadcast"));
                }
            }
            set_sending.try_set(false);
        });
    };

    view! {
        <div class="card bg-base-100 border border-base-300">
            <div class="card-body space-y-4">
                <div>
                    <h2 class="card-title text-lg">
                        <Send attr:class="h-5 w-5 text-primary" />
                        "Send Telegram Broadcast"
                    </h2>
                    <p class="text-sm text-base-content/60">
                        {move || {
                            format!(
                                "Send a message to all users with linked Telegram accounts ({} of {} linked)",
                                linked(),
                                total(),
                            )
                        }}
                    </p>
                </div>
                <div class="form-control">
                    <label for="broadcast-msg" class="label">
                        <span class="label-text">"Message"</span>
                    </label>
                    <textarea
                        id="broadcast-msg"
                        rows="5"
                        class="textarea textarea-bordered resize-none w-full"
                        placeholder="Type your broadcast message here... Supports HTML: <b>bold</b>, <i>italic</i>, <code>code</code>"
                        prop:value=message
                        on:input=move |ev| set_message.set(event_target_value(&ev))
                    ></textarea>
                </div>
                <Show
                    when=move || (linked() > 0)
                    fallback=|| {
                        view! {
                            <div class="text-sm text-amber-600 dark:text-amber-400 bg-amber-500/10 border border-amber-500/20 rounded-lg p-3">
                                "⚠️ No users have linked their Telegram yet. Ask users to message your bot with "
                                <code>"/start their@email.com"</code>
                            </div>
                        }
                    }
                >
                    <div>
                        <button
                            class="btn btn-primary gap-2"
                            on:click=handle_send
                            disabled=move || sending.get() || message.with(|m| m.trim().is_empty())
                        >
                            {move || if sending.get() {
                                view! { <span class="loading loading-spinner loading-sm"></span> "Sending..." }.into_any()
                            } else {
                                view! { <Send attr:class="h-4 w-4" /> {send_label(linked())} }.into_any()
                            }}
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_label_pluralizes() {
        assert_eq!(send_label(1), "Send to 1 user");
        assert_eq!(send_label(3), "Send to 3 users");
    }
}
