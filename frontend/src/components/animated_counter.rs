//! 数字滚动动画
//!
//! 目标值变化时从 0 开始按 ease-out-expo 曲线重新计数，约 1 秒完成。

use crate::web::{Interval, now_ms};
use friendboard_shared::counter::{DEFAULT_DURATION_MS, TICK_MS, counter_value};
use leptos::prelude::*;
use tracing::warn;

#[component]
pub fn AnimatedCounter(#[prop(into)] value: Signal<u64>) -> impl IntoView {
    let (display, set_display) = signal(0u64);
    // 组件卸载时 StoredValue 随 owner 释放，Interval 的 drop 会清除定时器
    let timer = StoredValue::new_local(None::<Interval>);

    Effect::new(move |_| {
        let target = value.get();
        let started = now_ms();

        // 旧动画随 Interval 的 drop 一起停止
        timer.update_value(|slot| {
            slot.take();
        });

        let tick = move || {
            let (current, done) = counter_value(target, now_ms() - started, DEFAULT_DURATION_MS);
            set_display.try_set(current);
            if done {
                // 回调执行期间不能 drop 自身，只停止计时
                timer.try_with_value(|slot| {
                    if let Some(interval) = slot {
                        interval.cancel();
                    }
                });
            }
        };

        match Interval::new(TICK_MS, tick) {
            Ok(interval) => timer.set_value(Some(interval)),
            Err(e) => {
                warn!(error = %e, "counter animation unavailable");
                set_display.set(target);
            }
        }
    });

    move || display.get()
}
