//! Telegram 机器人互动分析
//!
//! 只读快照：总览计数、回复分布、按职位/按用户的明细、每日序列与最近事件流。
//! 这里同时放置管理面板渲染这些数据时用到的纯计算。

use crate::Timestamp;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotAnalytics {
    pub overview: Overview,
    pub response_breakdown: ResponseBreakdown,
    #[serde(default)]
    pub per_job_responses: Vec<JobResponses>,
    #[serde(default)]
    pub per_user_activity: Vec<UserActivity>,
    #[serde(default)]
    pub daily_activity: Vec<DailyActivity>,
    #[serde(default)]
    pub recent_events: Vec<BotEvent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub total_users: u64,
    pub total_linked_users: u64,
    pub total_button_clicks: u64,
    pub total_broadcasts_sent: u64,
    pub total_reminders_sent: u64,
}

impl Overview {
    /// "3/10"
    pub fn linked_ratio(&self) -> String {
        format!("{}/{}", self.total_linked_users, self.total_users)
    }
}

// =========================================================
// 回复分布
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBreakdown {
    pub applied: u64,
    pub not_interested: u64,
    pub remind: u64,
}

/// 分布条中的一段
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSlice {
    pub action: ClickAction,
    pub count: u64,
    /// 条宽，保留一位小数
    pub width_percent: String,
    /// 图例，取整
    pub legend_percent: String,
}

impl ResponseBreakdown {
    pub fn total(&self) -> u64 {
        self.applied + self.not_interested + self.remind
    }

    /// 总数为 0 时返回 None（整个卡片不渲染）
    pub fn slices(&self) -> Option<Vec<BreakdownSlice>> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let slice = |action: ClickAction, count: u64| {
            let pct = count as f64 / total as f64 * 100.0;
            BreakdownSlice {
                action,
                count,
                width_percent: format!("{pct:.1}"),
                legend_percent: format!("{pct:.0}"),
            }
        };
        Some(vec![
            slice(ClickAction::Applied, self.applied),
            slice(ClickAction::NotInterested, self.not_interested),
            slice(ClickAction::Remind, self.remind),
        ])
    }
}

// =========================================================
// 明细
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponses {
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub total_notified: u64,
    pub applied: u64,
    pub not_interested: u64,
    pub remind: u64,
    pub no_response: u64,
    pub response_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    High,
    Medium,
    Low,
}

impl RateTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 70.0 {
            RateTier::High
        } else if rate >= 40.0 {
            RateTier::Medium
        } else {
            RateTier::Low
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            RateTier::High => "bg-emerald-500/10 text-emerald-600 dark:text-emerald-400",
            RateTier::Medium => "bg-amber-500/10 text-amber-600 dark:text-amber-400",
            RateTier::Low => "bg-red-500/10 text-red-500",
        }
    }
}

impl JobResponses {
    pub fn rate_tier(&self) -> RateTier {
        RateTier::from_rate(self.response_rate)
    }

    /// "85%"，整数不带小数
    pub fn rate_label(&self) -> String {
        if self.response_rate.fract() == 0.0 {
            format!("{:.0}%", self.response_rate)
        } else {
            format!("{}%", self.response_rate)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub chat_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    pub total_clicks: u64,
    pub applied: u64,
    pub not_interested: u64,
    pub remind: u64,
    #[serde(default)]
    pub last_active: Option<Timestamp>,
}

// =========================================================
// 每日序列
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// "2025-01-31"
    pub date: String,
    pub clicks: u64,
    pub notifications: u64,
    pub reminders: u64,
    pub total: u64,
}

impl DailyActivity {
    /// 去掉年份的 "01-31"
    pub fn short_label(&self) -> &str {
        self.date.get(5..).unwrap_or(&self.date)
    }

    pub fn tooltip(&self) -> String {
        format!(
            "Clicks: {} · Notifs: {} · Rem: {}",
            self.clicks, self.notifications, self.reminders
        )
    }
}

/// 柱高百分比，最低 4% 以保证可见
pub fn bar_heights(days: &[DailyActivity]) -> Vec<f64> {
    let max = days.iter().map(|d| d.total).max().unwrap_or(0).max(1) as f64;
    days.iter()
        .map(|d| (d.total as f64 / max * 100.0).max(4.0))
        .collect()
}

// =========================================================
// 事件流
// =========================================================

/// 按钮点击的动作；未知值保留原始字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    Applied,
    NotInterested,
    Remind,
    Other(String),
}

impl ClickAction {
    pub fn from_value(value: &str) -> Self {
        match value {
            "applied" => Self::Applied,
            "not_interested" => Self::NotInterested,
            "remind" => Self::Remind,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Applied => "applied",
            Self::NotInterested => "not_interested",
            Self::Remind => "remind",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Applied => "Applied",
            Self::NotInterested => "Not Interested",
            Self::Remind => "Remind Later",
            Self::Other(raw) => raw,
        }
    }

    /// 事件流里带 emoji 的短文案；未知动作与 "remind" 同样处理
    pub fn feed_label(&self) -> &'static str {
        match self {
            Self::Applied => "✅ Applied",
            Self::NotInterested => "❌ Not Interested",
            Self::Remind | Self::Other(_) => "🔔 Remind",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Applied => "bg-emerald-500",
            Self::NotInterested => "bg-red-400",
            Self::Remind | Self::Other(_) => "bg-amber-400",
        }
    }
}

impl Serialize for ClickAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for ClickAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_value(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ButtonClick,
    LinkSuccess,
    LinkFailed,
    BroadcastSent,
    ReminderSent,
    JobNotificationSent,
    CommandStart,
    Other(String),
}

impl EventKind {
    pub fn from_value(value: &str) -> Self {
        match value {
            "button_click" => Self::ButtonClick,
            "link_success" => Self::LinkSuccess,
            "link_failed" => Self::LinkFailed,
            "broadcast_sent" => Self::BroadcastSent,
            "reminder_sent" => Self::ReminderSent,
            "job_notification_sent" => Self::JobNotificationSent,
            "command_start" => Self::CommandStart,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::ButtonClick => "button_click",
            Self::LinkSuccess => "link_success",
            Self::LinkFailed => "link_failed",
            Self::BroadcastSent => "broadcast_sent",
            Self::ReminderSent => "reminder_sent",
            Self::JobNotificationSent => "job_notification_sent",
            Self::CommandStart => "command_start",
            Self::Other(raw) => raw,
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_value(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotEvent {
    pub event_type: EventKind,
    #[serde(default)]
    pub action: Option<ClickAction>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.is_empty())
}

impl BotEvent {
    /// 姓名 > 邮箱 > "Chat 1234"
    pub fn actor(&self) -> String {
        if let Some(name) = non_empty(&self.user_name).or(non_empty(&self.user_email)) {
            return name.to_string();
        }
        let chat = self.chat_id.as_deref().unwrap_or_default();
        let tail: String = chat
            .chars()
            .skip(chat.chars().count().saturating_sub(4))
            .collect();
        format!("Chat {tail}")
    }

    fn job(&self) -> &str {
        non_empty(&self.job_title).unwrap_or("a job")
    }

    /// 事件流中的一行描述
    pub fn describe(&self) -> String {
        match &self.event_type {
            EventKind::ButtonClick => {
                let action = self
                    .action
                    .as_ref()
                    .map(ClickAction::feed_label)
                    .unwrap_or("🔔 Remind");
                format!("{} clicked {} on {}", self.actor(), action, self.job())
            }
            EventKind::LinkSuccess => format!("{} linked their Telegram", self.actor()),
            EventKind::LinkFailed => format!(
                "{} failed to link Telegram",
                non_empty(&self.user_email).unwrap_or("Someone")
            ),
            EventKind::BroadcastSent => format!("Broadcast sent to {}", self.actor()),
            EventKind::ReminderSent => format!("Reminder sent for {}", self.job()),
            EventKind::JobNotificationSent => format!(
                "Job notification sent to {} for {}",
                self.actor(),
                self.job()
            ),
            EventKind::CommandStart => format!("{} used /start command", self.actor()),
            EventKind::Other(raw) => raw.clone(),
        }
    }

    /// 右侧圆点颜色
    pub fn dot_class(&self) -> &'static str {
        match &self.event_type {
            EventKind::ButtonClick => self
                .action
                .as_ref()
                .map(ClickAction::color_class)
                .unwrap_or("bg-amber-400"),
            EventKind::LinkSuccess | EventKind::JobNotificationSent => "bg-blue-500",
            EventKind::LinkFailed => "bg-red-400",
            EventKind::BroadcastSent => "bg-violet-500",
            EventKind::ReminderSent => "bg-amber-500",
            EventKind::CommandStart => "bg-primary",
            EventKind::Other(_) => "bg-base-content/40",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: &str) -> BotEvent {
        BotEvent {
            event_type: EventKind::from_value(kind),
            action: None,
            user_name: None,
            user_email: None,
            chat_id: Some("987654321".to_string()),
            job_title: None,
            created_at: None,
        }
    }

    #[test]
    fn test_breakdown_hidden_when_empty() {
        assert!(ResponseBreakdown::default().slices().is_none());
    }

    #[test]
    fn test_breakdown_percentages() {
        let bd = ResponseBreakdown {
            applied: 1,
            not_interested: 1,
            remind: 1,
        };
        let slices = bd.slices().unwrap();
        assert_eq!(slices[0].width_percent, "33.3");
        assert_eq!(slices[0].legend_percent, "33");
        assert_eq!(slices[2].action, ClickAction::Remind);
    }

    #[test]
    fn test_rate_tiers() {
        assert_eq!(RateTier::from_rate(70.0), RateTier::High);
        assert_eq!(RateTier::from_rate(69.9), RateTier::Medium);
        assert_eq!(RateTier::from_rate(40.0), RateTier::Medium);
        assert_eq!(RateTier::from_rate(12.5), RateTier::Low);
    }

    #[test]
    fn test_bar_heights_have_floor() {
        let day = |total| DailyActivity {
            date: "2025-01-31".to_string(),
            clicks: total,
            notifications: 0,
            reminders: 0,
            total,
        };
        let heights = bar_heights(&[day(100), day(50), day(1), day(0)]);
        assert_eq!(heights, vec![100.0, 50.0, 4.0, 4.0]);
        assert_eq!(day(0).short_label(), "01-31");
        assert_eq!(bar_heights(&[day(0)]), vec![4.0]);
    }

    #[test]
    fn test_actor_fallbacks() {
        let mut ev = event("command_start");
        assert_eq!(ev.actor(), "Chat 4321");
        ev.user_email = Some("ravi@x.com".to_string());
        assert_eq!(ev.actor(), "ravi@x.com");
        ev.user_name = Some("Ravi".to_string());
        assert_eq!(ev.describe(), "Ravi used /start command");
    }

    #[test]
    fn test_describe_button_click() {
        let mut ev = event("button_click");
        ev.user_name = Some("Mei".to_string());
        ev.action = Some(ClickAction::NotInterested);
        ev.job_title = Some("Data Analyst".to_string());
        assert_eq!(
            ev.describe(),
            "Mei clicked ❌ Not Interested on Data Analyst"
        );
        assert_eq!(ev.dot_class(), "bg-red-400");
    }

    #[test]
    fn test_unknown_event_type_is_tolerated() {
        let body = r#"{"event_type":"sticker_sent","created_at":"2025-01-01T00:00:00Z"}"#;
        let ev: BotEvent = serde_json::from_str(body).unwrap();
        assert_eq!(ev.event_type, EventKind::Other("sticker_sent".to_string()));
        assert_eq!(ev.describe(), "sticker_sent");
        assert_eq!(ev.dot_class(), "bg-base-content/40");
    }

    #[test]
    fn test_link_failed_uses_email_or_someone() {
        let ev = event("link_failed");
        assert_eq!(ev.describe(), "Someone failed to link Telegram");
    }

    #[test]
    fn test_full_payload_deserializes() {
        let body = r#"{
            "overview": {"total_users": 10, "total_linked_users": 4, "total_button_clicks": 31,
                         "total_broadcasts_sent": 2, "total_reminders_sent": 5},
            "response_breakdown": {"applied": 12, "not_interested": 9, "remind": 10},
            "per_job_responses": [{"job_id": "j1", "job_title": "SDE", "company": "Acme",
                "total_notified": 4, "applied": 2, "not_interested": 1, "remind": 0,
                "no_response": 1, "response_rate": 75.0}],
            "per_user_activity": [{"chat_id": "111", "user_name": "Asha", "user_email": "a@x.com",
                "total_clicks": 3, "applied": 2, "not_interested": 1, "remind": 0, "last_active": null}],
            "daily_activity": [],
            "recent_events": []
        }"#;
        let analytics: BotAnalytics = serde_json::from_str(body).unwrap();
        assert_eq!(analytics.overview.linked_ratio(), "4/10");
        assert_eq!(analytics.per_job_responses[0].rate_label(), "75%");
        assert_eq!(analytics.per_job_responses[0].rate_tier(), RateTier::High);
    }
}
