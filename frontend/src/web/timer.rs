//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API。

use friendboard_shared::{BoardError, BoardResult, Timestamp};
use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval` API。当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// # 参数
    /// - `millis`: 间隔时间（毫秒）
    /// - `callback`: 每次间隔触发的回调函数
    pub fn new<F>(millis: u32, callback: F) -> BoardResult<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let window =
            web_sys::window().ok_or_else(|| BoardError::backend("无法获取 window 对象"))?;

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .map_err(|e| BoardError::backend(format!("设置定时器失败: {:?}", e)))?;

        Ok(Self { handle, closure })
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，因为 drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 单调时钟（毫秒），用于动画计时
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// 每 `millis` 毫秒刷新一次的当前时间
///
/// 定时器存放在当前 owner 下，组件卸载时随之清除。
pub fn use_clock(millis: u32) -> Signal<Timestamp> {
    let now = RwSignal::new(Timestamp::now());
    match Interval::new(millis, move || {
        now.try_set(Timestamp::now());
    }) {
        Ok(interval) => {
            StoredValue::new_local(interval);
        }
        Err(e) => warn!(error = %e, "clock unavailable, time frozen at mount"),
    }
    now.into()
}
