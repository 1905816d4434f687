//! 时间类型模块
//!
//! - `Timestamp`: 可序列化的 UTC 时间点，用于截止日期、创建时间等字段
//! - 格式化辅助：列表中的短日期、相对时间等
//!
//! 后端返回的时间格式并不统一（Python `isoformat()`、浏览器 `toISOString()`、
//! 以及手工录入的纯日期），因此解析是宽松的。

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =========================================================
// Timestamp - 可传输的时间点
// =========================================================

/// UTC 时间点
///
/// 序列化为 RFC 3339 字符串，反序列化时接受：
/// - RFC 3339（带时区偏移或 `Z`）
/// - 不带时区的 `YYYY-MM-DDTHH:MM:SS[.f]`（按 UTC 处理）
/// - 纯日期 `YYYY-MM-DD`（按 UTC 零点处理）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    #[inline]
    pub fn new(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// 当前时间（wasm32 下由 `js_sys::Date` 提供）
    #[inline]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// 从毫秒时间戳创建，超出范围返回 None
    pub fn from_millis(ms: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(ms).map(Self)
    }

    /// 宽松解析
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|naive| Self(naive.and_utc()));
        }
        None
    }

    #[inline]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    #[inline]
    pub fn as_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// 严格早于 `other`
    #[inline]
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// RFC 3339，毫秒精度，`Z` 结尾（与浏览器 `toISOString()` 一致）
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// "Jan 5, 2025"
    pub fn format_long(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }

    /// "Jan 5"
    pub fn format_short(&self) -> String {
        self.0.format("%b %-d").to_string()
    }

    /// `<input type="date">` 使用的 "2025-01-05"
    pub fn to_date_input(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

// =========================================================
// 相对时间
// =========================================================

/// 相对时间描述，用于机器人事件流
///
/// `<60s` "just now"，`<1h` "5m ago"，`<1d` "3h ago"，其余 "2d ago"。
/// 未来时间按 "just now" 处理。
pub fn time_ago(then: &Timestamp, now: &Timestamp) -> String {
    let secs = (now.as_millis() - then.as_millis()) / 1000;
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_variants() {
        let z = Timestamp::parse("2025-03-01T10:00:00.000Z").unwrap();
        let offset = Timestamp::parse("2025-03-01T10:00:00.123456+00:00").unwrap();
        assert_eq!(z.to_iso_string(), "2025-03-01T10:00:00.000Z");
        assert_eq!(offset.as_millis() - z.as_millis(), 123);
    }

    #[test]
    fn test_parse_bare_date_is_midnight_utc() {
        let ts = Timestamp::parse("2020-01-01").unwrap();
        assert_eq!(ts.to_iso_string(), "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_parse_naive_datetime() {
        let ts = Timestamp::parse("2024-06-30T23:59:59").unwrap();
        assert_eq!(ts.to_date_input(), "2024-06-30");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Timestamp::parse("next tuesday").is_none());
        assert!(Timestamp::parse("").is_none());
    }

    #[test]
    fn test_serde_round_trip_through_json_string() {
        let ts: Timestamp = serde_json::from_str("\"2025-12-24\"").unwrap();
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2025-12-24T00:00:00.000Z\""
        );
        assert!(serde_json::from_str::<Timestamp>("\"soon\"").is_err());
    }

    #[test]
    fn test_formatting() {
        let ts = Timestamp::parse("2025-01-05T08:00:00Z").unwrap();
        assert_eq!(ts.format_long(), "Jan 5, 2025");
        assert_eq!(ts.format_short(), "Jan 5");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Timestamp::parse("2025-01-10T12:00:00Z").unwrap();
        let at = |s: &str| Timestamp::parse(s).unwrap();
        assert_eq!(time_ago(&at("2025-01-10T11:59:30Z"), &now), "just now");
        assert_eq!(time_ago(&at("2025-01-10T11:55:00Z"), &now), "5m ago");
        assert_eq!(time_ago(&at("2025-01-10T09:00:00Z"), &now), "3h ago");
        assert_eq!(time_ago(&at("2025-01-08T12:00:00Z"), &now), "2d ago");
        assert_eq!(time_ago(&at("2025-01-11T12:00:00Z"), &now), "just now");
    }
}
