//! 头像配色
//!
//! 同一个名字在任何页面上都得到同一组颜色。哈希与浏览器端
//! `hash = c + ((hash << 5) - hash)` 的结果逐位一致，以便与旧数据的配色保持相同。

/// 一组头像样式 class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub ring: &'static str,
    /// 排行榜领奖台使用的渐变
    pub gradient: &'static str,
}

impl AvatarColors {
    const fn new(
        bg: &'static str,
        text: &'static str,
        ring: &'static str,
        gradient: &'static str,
    ) -> Self {
        Self {
            bg,
            text,
            ring,
            gradient,
        }
    }

    /// 圆形头像的 class 字符串
    pub fn class(&self) -> String {
        format!("{} {} {}", self.bg, self.text, self.ring)
    }
}

pub const PALETTE: [AvatarColors; 17] = [
    AvatarColors::new(
        "bg-red-500/10",
        "text-red-600 dark:text-red-400",
        "ring-red-500/20",
        "from-red-500/20 to-red-500/5",
    ),
    AvatarColors::new(
        "bg-orange-500/10",
        "text-orange-600 dark:text-orange-400",
        "ring-orange-500/20",
        "from-orange-500/20 to-orange-500/5",
    ),
    AvatarColors::new(
        "bg-amber-500/10",
        "text-amber-600 dark:text-amber-400",
        "ring-amber-500/20",
        "from-amber-500/20 to-amber-500/5",
    ),
    AvatarColors::new(
        "bg-yellow-500/10",
        "text-yellow-600 dark:text-yellow-400",
        "ring-yellow-500/20",
        "from-yellow-500/20 to-yellow-500/5",
    ),
    AvatarColors::new(
        "bg-lime-500/10",
        "text-lime-600 dark:text-lime-400",
        "ring-lime-500/20",
        "from-lime-500/20 to-lime-500/5",
    ),
    AvatarColors::new(
        "bg-green-500/10",
        "text-green-600 dark:text-green-400",
        "ring-green-500/20",
        "from-green-500/20 to-green-500/5",
    ),
    AvatarColors::new(
        "bg-emerald-500/10",
        "text-emerald-600 dark:text-emerald-400",
        "ring-emerald-500/20",
        "from-emerald-500/20 to-emerald-500/5",
    ),
    AvatarColors::new(
        "bg-teal-500/10",
        "text-teal-600 dark:text-teal-400",
        "ring-teal-500/20",
        "from-teal-500/20 to-teal-500/5",
    ),
    AvatarColors::new(
        "bg-cyan-500/10",
        "text-cyan-600 dark:text-cyan-400",
        "ring-cyan-500/20",
        "from-cyan-500/20 to-cyan-500/5",
    ),
    AvatarColors::new(
        "bg-sky-500/10",
        "text-sky-600 dark:text-sky-400",
        "ring-sky-500/20",
        "from-sky-500/20 to-sky-500/5",
    ),
    AvatarColors::new(
        "bg-blue-500/10",
        "text-blue-600 dark:text-blue-400",
        "ring-blue-500/20",
        "from-blue-500/20 to-blue-500/5",
    ),
    AvatarColors::new(
        "bg-indigo-500/10",
        "text-indigo-600 dark:text-indigo-400",
        "ring-indigo-500/20",
        "from-indigo-500/20 to-indigo-500/5",
    ),
    AvatarColors::new(
        "bg-violet-500/10",
        "text-violet-600 dark:text-violet-400",
        "ring-violet-500/20",
        "from-violet-500/20 to-violet-500/5",
    ),
    AvatarColors::new(
        "bg-purple-500/10",
        "text-purple-600 dark:text-purple-400",
        "ring-purple-500/20",
        "from-purple-500/20 to-purple-500/5",
    ),
    AvatarColors::new(
        "bg-fuchsia-500/10",
        "text-fuchsia-600 dark:text-fuchsia-400",
        "ring-fuchsia-500/20",
        "from-fuchsia-500/20 to-fuchsia-500/5",
    ),
    AvatarColors::new(
        "bg-pink-500/10",
        "text-pink-600 dark:text-pink-400",
        "ring-pink-500/20",
        "from-pink-500/20 to-pink-500/5",
    ),
    AvatarColors::new(
        "bg-rose-500/10",
        "text-rose-600 dark:text-rose-400",
        "ring-rose-500/20",
        "from-rose-500/20 to-rose-500/5",
    ),
];

/// 空名字
pub const NEUTRAL: AvatarColors = AvatarColors::new(
    "bg-slate-100 dark:bg-slate-800",
    "text-slate-600 dark:text-slate-400",
    "ring-slate-100 dark:ring-slate-800",
    "from-slate-100 to-slate-200 dark:from-slate-800 dark:to-slate-700",
);

/// 浏览器端字符串哈希的等价实现
///
/// 累加值是 f64；左移前先截断为 i32，减法与加法在 f64 上进行，
/// 只有下一轮左移时才会再次截断。
fn js_hash(name: &str) -> f64 {
    name.encode_utf16().fold(0.0_f64, |hash, unit| {
        let shifted = to_int32(hash).wrapping_shl(5) as f64;
        unit as f64 + (shifted - hash)
    })
}

/// ECMAScript ToInt32
fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let modulo = value.trunc().rem_euclid(4_294_967_296.0);
    modulo as u32 as i32
}

pub fn palette_index(name: &str) -> usize {
    (js_hash(name).abs() % PALETTE.len() as f64) as usize
}

pub fn colors_for(name: &str) -> AvatarColors {
    if name.is_empty() {
        return NEUTRAL;
    }
    PALETTE[palette_index(name)]
}

/// 头像中显示的首字母；空名字显示 "?"
pub fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        assert_eq!(initial("asha"), "A");
        assert_eq!(initial("ß"), "SS");
        assert_eq!(initial(""), "?");
    }

    #[test]
    fn test_known_indices() {
        // "A" = 65 -> 65 % 17 = 14
        assert_eq!(palette_index("A"), 14);
        // "AB": 66 + (65 * 32 - 65) = 2081 -> 2081 % 17 = 7
        assert_eq!(palette_index("AB"), 7);
        assert_eq!(colors_for("A").bg, "bg-fuchsia-500/10");
    }

    #[test]
    fn test_empty_name_is_neutral() {
        assert_eq!(colors_for(""), NEUTRAL);
    }

    #[test]
    fn test_stable_for_same_name() {
        let name = "Priyanka Venkataraman-Subramanian";
        assert_eq!(colors_for(name), colors_for(name));
        assert!(palette_index(name) < PALETTE.len());
    }

    #[test]
    fn test_to_int32_wraps() {
        assert_eq!(to_int32(4_294_967_296.0), 0);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(-1.0), -1);
    }
}
