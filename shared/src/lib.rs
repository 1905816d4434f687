//! FriendBoard 共享领域层
//!
//! 前端与测试共用的纯逻辑，不依赖 DOM：
//! - 数据模型与线上协议 (`protocol`)
//! - 会话状态机 (`session`) 与路由守卫 (`route`)
//! - 列表协调 (`reconcile`)、职位筛选 (`filter`)、页面状态 (`page`)
//! - 展示辅助 (`avatar`, `counter`, `analytics`, `source`)

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod analytics;
pub mod avatar;
pub mod counter;
pub mod date;
pub mod error;
pub mod filter;
pub mod form;
pub mod page;
pub mod protocol;
pub mod reconcile;
pub mod route;
pub mod session;
pub mod source;

pub use date::Timestamp;
pub use error::{BoardError, BoardErrorStatus, BoardResult};
pub use source::JobSource;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 所有接口的路径前缀
pub const API_PREFIX: &str = "/api";
/// 持久化 bearer token 的存储键
pub const STORAGE_TOKEN_KEY: &str = "fb_token";
/// 主题偏好的存储键
pub const STORAGE_THEME_KEY: &str = "fb-theme";

// =========================================================
// 用户 (Users)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Friend,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Friend => "friend",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
    /// `/auth/login` 与 `/auth/me` 不返回该字段
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 空字符串视为未绑定
    pub fn has_telegram(&self) -> bool {
        self.telegram_chat_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// 能否编辑/删除某个职位（仅用于 UI 呈现，后端会独立校验）
    pub fn can_manage(&self, job: &Job) -> bool {
        self.is_admin() || job.posted_by == self.id
    }
}

/// 管理员创建账户的请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

// =========================================================
// 职位 (Jobs)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Job,
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 2] = [JobType::Job, JobType::Internship];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Job => "Job",
            JobType::Internship => "Internship",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            JobType::Internship => {
                "bg-amber-500/10 text-amber-600 dark:text-amber-400 border-amber-500/20"
            }
            JobType::Job => {
                "bg-emerald-500/10 text-emerald-600 dark:text-emerald-400 border-emerald-500/20"
            }
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Remote,
    Onsite,
    Hybrid,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Remote, Location::Onsite, Location::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Remote => "Remote",
            Location::Onsite => "Onsite",
            Location::Hybrid => "Hybrid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == s)
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Location::Remote => "bg-blue-500/10 text-blue-600 dark:text-blue-400 border-blue-500/20",
            Location::Hybrid => {
                "bg-purple-500/10 text-purple-600 dark:text-purple-400 border-purple-500/20"
            }
            Location::Onsite => {
                "bg-slate-500/10 text-slate-600 dark:text-slate-400 border-slate-500/20"
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 职位的可编辑部分，同时是 POST/PUT `/jobs` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub company_name: String,
    pub role: String,
    pub job_type: JobType,
    pub location: Location,
    pub apply_link: String,
    pub deadline: Timestamp,
    #[serde(default)]
    pub source: JobSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub company_name: String,
    pub role: String,
    pub job_type: JobType,
    pub location: Location,
    pub apply_link: String,
    pub deadline: Timestamp,
    pub posted_by: String,
    pub posted_by_name: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub source: JobSource,
}

impl Job {
    /// 截止时间严格早于 `now` 即视为过期；每次渲染重新计算，不落库
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.deadline.is_before(now)
    }

    /// "Expired" 或 "Due Jan 5, 2025"
    pub fn deadline_label_at(&self, now: &Timestamp) -> String {
        if self.is_expired_at(now) {
            "Expired".to_string()
        } else {
            format!("Due {}", self.deadline.format_long())
        }
    }

    /// 编辑对话框的初始值
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            company_name: self.company_name.clone(),
            role: self.role.clone(),
            job_type: self.job_type,
            location: self.location,
            apply_link: self.apply_link.clone(),
            deadline: self.deadline,
            source: self.source.clone(),
        }
    }
}

// =========================================================
// 排行榜与统计 (Rankings & Stats)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub job_count: u64,
}

/// 领奖台的展示顺序：第 2、第 1、第 3 名
pub const PODIUM_DISPLAY_ORDER: [usize; 3] = [1, 0, 2];

/// 拆分为前三名与其余名次（后者从第 4 名开始）
pub fn split_podium(entries: &[RankingEntry]) -> (&[RankingEntry], &[RankingEntry]) {
    entries.split_at(entries.len().min(3))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_friends: u64,
    pub total_jobs: u64,
    pub today_jobs: u64,
}

impl AdminStats {
    /// 新建账户后本地修正计数（新账户总是 friend）
    pub fn on_user_created(&mut self) {
        self.total_users += 1;
        self.total_friends += 1;
    }

    pub fn on_user_deleted(&mut self) {
        self.total_users = self.total_users.saturating_sub(1);
        self.total_friends = self.total_friends.saturating_sub(1);
    }

    pub fn on_job_deleted(&mut self) {
        self.total_jobs = self.total_jobs.saturating_sub(1);
    }
}

// =========================================================
// Telegram
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramLink {
    pub telegram_chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramLinkStatus {
    #[serde(default)]
    pub message: String,
    pub telegram_chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Broadcast {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastReceipt {
    pub sent_count: u64,
}

impl BroadcastReceipt {
    pub fn summary(&self) -> String {
        format!("Broadcast sent to {} user(s)!", self.sent_count)
    }
}

/// 已绑定 Telegram 的用户数
pub fn linked_user_count(users: &[User]) -> usize {
    users.iter().filter(|u| u.has_telegram()).count()
}

/// 后端删除类接口的返回体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn user(id: &str, name: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            email: format!("{id}@friendboard.test"),
            name: name.to_string(),
            role,
            telegram_chat_id: None,
            created_at: None,
        }
    }

    pub fn job(id: &str, company: &str, role: &str, job_type: JobType, location: Location) -> Job {
        Job {
            id: id.to_string(),
            company_name: company.to_string(),
            role: role.to_string(),
            job_type,
            location,
            apply_link: format!("https://{}.example/apply", company.to_lowercase()),
            deadline: Timestamp::parse("2099-01-01").unwrap(),
            posted_by: "u1".to_string(),
            posted_by_name: "Asha".to_string(),
            created_at: Timestamp::parse("2025-01-01T09:00:00Z").unwrap(),
            source: JobSource::LinkedIn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_deserializes_backend_payload() {
        let body = r#"{
            "id": "9b1c",
            "company_name": "Google",
            "role": "SWE Intern",
            "job_type": "Internship",
            "location": "Hybrid",
            "apply_link": "https://careers.google.com/x",
            "deadline": "2026-03-01T00:00:00.000Z",
            "posted_by": "u1",
            "posted_by_name": "Asha",
            "created_at": "2025-11-02T10:15:30.123456+00:00"
        }"#;
        let job: Job = serde_json::from_str(body).unwrap();
        assert_eq!(job.job_type, JobType::Internship);
        assert_eq!(job.location, Location::Hybrid);
        assert_eq!(job.source, JobSource::CompanyWebsite);
    }

    #[test]
    fn test_user_from_login_payload_has_no_created_at() {
        let body = r#"{"id":"a1","email":"a@b.com","name":"Admin","role":"admin","telegram_chat_id":null}"#;
        let user: User = serde_json::from_str(body).unwrap();
        assert!(user.is_admin());
        assert!(user.created_at.is_none());
        assert!(!user.has_telegram());
    }

    #[test]
    fn test_can_manage_mirrors_ownership() {
        let owner = fixtures::user("u1", "Asha", Role::Friend);
        let other = fixtures::user("u2", "Ben", Role::Friend);
        let admin = fixtures::user("a1", "Admin", Role::Admin);
        let job = fixtures::job("j1", "Acme", "Engineer", JobType::Job, Location::Remote);
        assert!(owner.can_manage(&job));
        assert!(!other.can_manage(&job));
        assert!(admin.can_manage(&job));
    }

    #[test]
    fn test_deadline_label() {
        let mut job = fixtures::job("j1", "Acme", "Engineer", JobType::Job, Location::Remote);
        let now = Timestamp::parse("2025-06-01T00:00:00Z").unwrap();
        job.deadline = Timestamp::parse("2020-01-01").unwrap();
        assert_eq!(job.deadline_label_at(&now), "Expired");
        job.deadline = Timestamp::parse("2025-07-04T00:00:00Z").unwrap();
        assert_eq!(job.deadline_label_at(&now), "Due Jul 4, 2025");
    }

    #[test]
    fn test_same_job_expires_as_clock_advances() {
        let mut job = fixtures::job("j1", "Acme", "Engineer", JobType::Job, Location::Remote);
        job.deadline = Timestamp::parse("2025-06-01T12:00:00Z").unwrap();
        let before = Timestamp::parse("2025-06-01T11:59:00Z").unwrap();
        let after = Timestamp::parse("2025-06-01T12:01:00Z").unwrap();

        assert!(!job.is_expired_at(&before));
        assert_eq!(job.deadline_label_at(&before), "Due Jun 1, 2025");
        assert!(job.is_expired_at(&after));
        assert_eq!(job.deadline_label_at(&after), "Expired");
        // 截止时刻本身不算过期
        assert!(!job.is_expired_at(&job.deadline));
    }

    #[test]
    fn test_podium_split() {
        let entry = |id: &str, count| RankingEntry {
            user_id: id.to_string(),
            name: id.to_uppercase(),
            email: String::new(),
            job_count: count,
        };
        let all = vec![entry("a", 9), entry("b", 7), entry("c", 4), entry("d", 1)];
        let (podium, rest) = split_podium(&all);
        assert_eq!(podium.len(), 3);
        assert_eq!(rest[0].user_id, "d");
        let order: Vec<_> = PODIUM_DISPLAY_ORDER
            .iter()
            .filter_map(|&i| podium.get(i))
            .map(|e| e.user_id.as_str())
            .collect();
        assert_eq!(order, vec!["b", "a", "c"]);

        let (podium, rest) = split_podium(&all[..2]);
        assert_eq!((podium.len(), rest.len()), (2, 0));
    }

    #[test]
    fn test_stats_adjustments_never_underflow() {
        let mut stats = AdminStats::default();
        stats.on_user_deleted();
        stats.on_job_deleted();
        assert_eq!(stats, AdminStats::default());
        stats.on_user_created();
        assert_eq!((stats.total_users, stats.total_friends), (1, 1));
    }

    #[test]
    fn test_linked_user_count_ignores_blank_ids() {
        let mut a = fixtures::user("u1", "Asha", Role::Friend);
        let mut b = fixtures::user("u2", "Ben", Role::Friend);
        let c = fixtures::user("u3", "Cyd", Role::Friend);
        a.telegram_chat_id = Some("12345".to_string());
        b.telegram_chat_id = Some("  ".to_string());
        assert_eq!(linked_user_count(&[a, b, c]), 1);
    }
}
