use super::patch_stats;
use crate::auth::use_auth;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{Send, Trash2};
use crate::components::toast::use_toast;
use crate::loader::mutate_page;
use friendboard_shared::page::PageState;
use friendboard_shared::protocol::DeleteUserRequest;
use friendboard_shared::reconcile::apply_deleted;
use friendboard_shared::{AdminStats, Role, User};
use leptos::prelude::*;

/// 用户列表；管理员账户不可删除
#[component]
pub fn UsersTab(
    users: RwSignal<PageState<Vec<User>>>,
    stats: RwSignal<PageState<AdminStats>>,
) -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let delete_target = RwSignal::new(Option::<User>::None);

    let rows = move || users.with(|s| s.data().cloned().unwrap_or_default());

    let handle_delete = move |()| {
        let Some(user) = delete_target.get_untracked() else {
            return;
        };
        let id = user.id.clone();
        mutate_page(
            auth,
            toast,
            users,
            DeleteUserRequest { id: id.clone() },
            "User deleted",
            "Failed to delete user",
            move |list, _| {
                apply_deleted(list, &id);
            },
            move |ok| {
                if ok {
                    delete_target.set(None);
                    patch_stats(stats, AdminStats::on_user_deleted);
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
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th class="hidden sm:table-cell">"Telegram"</th>
                            <th class="hidden sm:table-cell">"Joined"</th>
                            <th class="w-12"></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|user| (user.id.clone(), user.telegram_chat_id.clone())
                            children=move |user| {
                                view! {
                                    <UserRow user=user on_delete=move |user: User| delete_target.set(Some(user)) />
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </div>

        <ConfirmDialog
            open=Signal::derive(move || delete_target.with(Option::is_some))
            title="Delete User"
            message=Signal::derive(move || {
                delete_target
                    .with(|user| {
                        user.as_ref().map(|u| {
                            format!(
                                "Are you sure you want to delete {}'s account? This action cannot be undone.",
                                u.name,
                            )
                        })
                    })
                    .unwrap_or_default()
            })
            confirm_label="Delete"
            busy=Signal::derive(move || users.with(PageState::is_mutating))
            on_confirm=handle_delete
            on_cancel=move |()| delete_target.set(None)
        />
    }
}

#[component]
fn UserRow(user: User, #[prop(into)] on_delete: Callback<User>) -> impl IntoView {
    let role_class = match user.role {
        Role::Admin => "inline-flex px-2 py-0.5 rounded-md text-xs font-medium bg-primary/10 text-primary",
        Role::Friend => {
            "inline-flex px-2 py-0.5 rounded-md text-xs font-medium bg-emerald-500/10 text-emerald-600 dark:text-emerald-400"
        }
    };
    let joined = user
        .created_at
        .map(|t| t.format_short())
        .unwrap_or_else(|| "--".to_string());
    let deletable = !user.is_admin();
    let target = user.clone();

    view! {
        <tr class="hover">
            <td class="font-medium">{user.name.clone()}</td>
            <td class="text-base-content/60">{user.email.clone()}</td>
            <td>
                <span class=role_class>{user.role.as_str()}</span>
            </td>
            <td class="hidden sm:table-cell">
                {if user.has_telegram() {
                    view! { <Send attr:class="h-4 w-4 text-emerald-500" /> }.into_any()
                } else {
                    view! { <span class="text-xs text-base-content/60">"--"</span> }.into_any()
                }}
            </td>
            <td class="hidden sm:table-cell text-base-content/60 text-sm">{joined}</td>
            <td>
                {deletable.then(|| {
                    view! {
                        <button
                            class="btn btn-ghost btn-sm btn-square hover:text-error"
                            title="Delete"
                            on:click=move |_| on_delete.run(target.clone())
                        >
                            <Trash2 attr:class="h-4 w-4" />
                        </button>
                    }
                })}
            </td>
        </tr>
    }
}
