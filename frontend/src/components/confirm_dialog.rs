use leptos::prelude::*;

/// 模态框的打开/关闭与 `open` 信号保持同步
pub fn sync_dialog(dialog_ref: NodeRef<leptos::html::Dialog>, open: Signal<bool>) {
    Effect::new(move |_| {
        let want_open = open.get();
        if let Some(dialog) = dialog_ref.get() {
            if want_open {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });
}

/// 危险操作的二次确认对话框
///
/// 确认按钮在 `busy` 期间禁用；关闭（包括按 Esc）时调用 `on_cancel`。
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] confirm_label: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    sync_dialog(dialog_ref, open);

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_cancel.run(())>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-4 text-base-content/70">{move || message.get()}</p>
                <div class="modal-action">
                    <button
                        type="button"
                        class="btn btn-ghost"
                        on:click=move |_| on_cancel.run(())
                        disabled=move || busy.get()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="btn btn-error"
                        on:click=move |_| on_confirm.run(())
                        disabled=move || busy.get()
                    >
                        {move || {
                            if busy.get() {
                                view! { <span class="loading loading-spinner loading-sm"></span> }
                                    .into_any()
                            } else {
                                ().into_any()
                            }
                        }}
                        {confirm_label}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
