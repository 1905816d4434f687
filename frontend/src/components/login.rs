use crate::auth::use_auth;
use crate::components::icons::{Briefcase, Eye, EyeOff};
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{info, warn};

/// 登录页
///
/// 登录成功只更新会话，跳转交给路由守卫。
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = email.get_untracked();
        let password = password.get_untracked();
        // 空字段由登录流程里的校验拦下，不会发请求
        set_is_submitting.set(true);
        spawn_local(async move {
            match auth.login(&email, &password).await {
                Ok(user) => {
                    info!(user_id = %user.id, "signed in");
                    toast.success("Welcome back!");
                }
                Err(e) => {
                    warn!(error = %e, "sign in failed");
                    toast.error(e.user_message("Invalid credentials"));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen grid lg:grid-cols-2 bg-base-100">
            <div class="flex items-center justify-center p-8 md:p-12">
                <div class="w-full max-w-md">
                    <div class="flex items-center gap-3 mb-12">
                        <div class="h-11 w-11 rounded-xl bg-primary flex items-center justify-center">
                            <Briefcase attr:class="h-6 w-6 text-primary-content" />
                        </div>
                        <span class="text-2xl font-bold tracking-tight">"FriendBoard"</span>
                    </div>

                    <div class="mb-8">
                        <h1 class="text-4xl md:text-5xl font-bold tracking-tight">"Welcome back"</h1>
                        <p class="text-base-content/60 mt-3">
                            "Sign in to access job listings shared by your circle."
                        </p>
                    </div>

                    <form class="space-y-5" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text font-medium">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                class="input input-bordered w-full"
                                autofocus
                                prop:value=email
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text font-medium">"Password"</span>
                            </label>
                            <label class="input input-bordered flex items-center gap-2">
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    placeholder="Enter your password"
                                    class="grow"
                                    prop:value=password
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                />
                                <button
                                    type="button"
                                    class="opacity-60 hover:opacity-100 transition-opacity"
                                    on:click=move |_| set_show_password.update(|s| *s = !*s)
                                >
                                    {move || if show_password.get() {
                                        view! { <EyeOff attr:class="h-4 w-4" /> }.into_any()
                                    } else {
                                        view! { <Eye attr:class="h-4 w-4" /> }.into_any()
                                    }}
                                </button>
                            </label>
                        </div>
                        <button
                            type="submit"
                            class="btn btn-primary w-full"
                            disabled=move || is_submitting.get()
                        >
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner loading-sm"></span> "Signing in..." }.into_any()
                            } else {
                                "Sign in".into_any()
                            }}
                        </button>
                    </form>

                    <p class="text-xs text-base-content/60 mt-8 text-center">
                        "This is a private platform. Contact your admin for access."
                    </p>
                </div>
            </div>

            <div class="hidden lg:flex relative overflow-hidden bg-gradient-to-br from-primary/20 to-primary/5 items-end">
                <div class="m-12 card bg-base-100/80 backdrop-blur-xl border border-base-300">
                    <div class="card-body p-6">
                        <p class="text-sm font-medium">
                            "\"Best way to help your friends is to share opportunities.\""
                        </p>
                        <p class="text-xs text-base-content/60 mt-2">"-- FriendBoard Community"</p>
                    </div>
                </div>
            </div>
        </div>
    }
}
