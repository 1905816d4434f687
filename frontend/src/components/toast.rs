//! 全局通知（toast）
//!
//! 每条通知 3 秒后自动消失。

use leptos::prelude::*;
use std::time::Duration;

const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    message: String,
    is_error: bool,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    fn push(&self, message: String, is_error: bool) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                message,
                is_error,
            })
        });

        let toasts = self.toasts;
        set_timeout(
            move || {
                toasts.try_update(|list| list.retain(|t| t.id != id));
            },
            TOAST_DURATION,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), true);
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 通知提示框容器，放在 App 根部
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toast();

    view! {
        <div class="toast toast-top toast-end z-[100]">
            <For
                each=move || ctx.toasts.get()
                key=|t| t.id
                children=move |toast| {
                    let class = if toast.is_error {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    };
                    view! {
                        <div class=class>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
