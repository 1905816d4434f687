//! 页面数据的加载与变更
//!
//! 每个页面自己持有一个 `RwSignal<PageState<T>>`。这里的两个函数负责
//! 发请求、推进状态机和弹出通知；页面卸载后信号被释放，迟到的响应通过
//! `try_update` 被丢弃，也不会再弹通知。

use crate::auth::AuthContext;
use crate::components::toast::ToastContext;
use friendboard_shared::page::PageState;
use friendboard_shared::protocol::ApiRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

/// 首次加载：`Loading -> Ready | Failed`，每次进入页面只请求一次
pub fn load_page<R>(
    auth: AuthContext,
    toast: ToastContext,
    state: RwSignal<PageState<R::Response>>,
    request: R,
    failure: &'static str,
) where
    R: ApiRequest + 'static,
    R::Response: Send + Sync + 'static,
{
    load_page_with(auth, state, request, failure, move |message| toast.error(message));
}

/// 同 [`load_page`]，失败时把提示文案交给 `on_error` 处理（页面已卸载则不调用）
pub fn load_page_with<R>(
    auth: AuthContext,
    state: RwSignal<PageState<R::Response>>,
    request: R,
    failure: &'static str,
    on_error: impl FnOnce(String) + 'static,
) where
    R: ApiRequest + 'static,
    R::Response: Send + Sync + 'static,
{
    state.update(PageState::start_loading);
    spawn_local(async move {
        let result = auth.call(request).await.map_err(|e| {
            warn!(error = %e, "page load failed");
            e.user_message(failure)
        });
        let error_message = result.as_ref().err().cloned();
        let alive = state.try_update(|s| s.finish_loading(result)).is_some();
        if let (true, Some(message)) = (alive, error_message) {
            on_error(message);
        }
    });
}

/// 在已加载的数据上执行一次变更
///
/// 请求成功后才用 `apply` 修改本地数据；失败时数据保持原样并提示错误。
/// 多个变更可以同时进行。数据尚未就绪时不发请求，直接提示失败。
/// `on_done` 收到是否成功。
#[allow(clippy::too_many_arguments)]
pub fn mutate_page<T, R>(
    auth: AuthContext,
    toast: ToastContext,
    state: RwSignal<PageState<T>>,
    request: R,
    success: impl Into<String>,
    failure: &'static str,
    apply: impl FnOnce(&mut T, R::Response) + 'static,
    on_done: impl FnOnce(bool) + 'static,
) where
    T: Send + Sync + 'static,
    R: ApiRequest + 'static,
{
    let started = state
        .try_update(PageState::begin_mutation)
        .unwrap_or(false);
    if !started {
        warn!(failure, "mutation rejected, page data not loaded");
        toast.error(failure);
        on_done(false);
        return;
    }

    let success = success.into();
    spawn_local(async move {
        let result = auth.call(request).await.map_err(|e| {
            warn!(error = %e, "mutation failed");
            e.user_message(failure)
        });
        let toast_message = result.as_ref().err().cloned();
        let ok = toast_message.is_none();
        let alive = state
            .try_update(|s| s.finish_mutation(result, apply))
            .is_some();
        if !alive {
            return;
        }
        match toast_message {
            Some(message) => toast.error(message),
            None => toast.success(success),
        }
        on_done(ok);
    });
}
