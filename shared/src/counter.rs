//! 统计卡片上的数字动画

/// 默认动画时长 (ms)
pub const DEFAULT_DURATION_MS: f64 = 1000.0;
/// 约 60fps
pub const TICK_MS: u32 = 16;

pub fn ease_out_expo(x: f64) -> f64 {
    if x >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * x)
    }
}

/// 经过 `elapsed_ms` 后应显示的值，以及动画是否已结束
pub fn counter_value(target: u64, elapsed_ms: f64, duration_ms: f64) -> (u64, bool) {
    let progress = if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    };
    let value = (ease_out_expo(progress) * target as f64).floor() as u64;
    (value.min(target), progress >= 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_out_expo(0.0), 0.0);
        assert_eq!(ease_out_expo(1.0), 1.0);
        assert!(ease_out_expo(0.5) > 0.96);
    }

    #[test]
    fn test_counter_finishes_on_target() {
        assert_eq!(counter_value(42, 0.0, DEFAULT_DURATION_MS), (0, false));
        assert_eq!(counter_value(42, 1000.0, DEFAULT_DURATION_MS), (42, true));
        assert_eq!(counter_value(42, 5000.0, DEFAULT_DURATION_MS), (42, true));
    }

    #[test]
    fn test_counter_is_monotonic() {
        let mut last = 0;
        for step in 0..=62 {
            let (v, _) = counter_value(1234, step as f64 * TICK_MS as f64, DEFAULT_DURATION_MS);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_zero_duration_jumps() {
        assert_eq!(counter_value(7, 0.0, 0.0), (7, true));
    }
}
