//! REST 接口协议定义
//!
//! 每个请求类型通过 `ApiRequest` 声明自己的路径、方法与响应类型，
//! 前端的传输层只需要实现一个泛型的 `Transport::send`。

use crate::analytics::BotAnalytics;
use crate::error::BoardResult;
use crate::{
    Ack, AdminStats, Broadcast, BroadcastReceipt, Job, JobDraft, NewUser, RankingEntry,
    TelegramLink, TelegramLinkStatus, User,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET 和 DELETE 不发送请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (relative to the `/api` prefix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token must be attached.
    const AUTHENTICATED: bool = true;

    /// 带路径参数的请求覆盖此方法
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

/// 传输层抽象
///
/// (?Send) 是因为浏览器环境下的 future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send<R: ApiRequest>(&self, token: Option<&str>, request: &R) -> BoardResult<R::Response>;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

/// "Who am I"
#[derive(Debug, Clone, Serialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = User;
    const PATH: &'static str = "/auth/me";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for TelegramLink {
    type Response = TelegramLinkStatus;
    const PATH: &'static str = "/users/telegram";
    const METHOD: HttpMethod = HttpMethod::Put;
}

// =========================================================
// Jobs
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct ListJobsRequest;

impl ApiRequest for ListJobsRequest {
    type Response = Vec<Job>;
    const PATH: &'static str = "/jobs";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for JobDraft {
    type Response = Job;
    const PATH: &'static str = "/jobs";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateJobRequest {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub draft: JobDraft,
}

impl ApiRequest for UpdateJobRequest {
    type Response = Job;
    const PATH: &'static str = "/jobs";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteJobRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteJobRequest {
    type Response = Ack;
    const PATH: &'static str = "/jobs";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

/// 当前用户发布的职位
#[derive(Debug, Clone, Serialize)]
pub struct MyJobsRequest;

impl ApiRequest for MyJobsRequest {
    type Response = Vec<Job>;
    const PATH: &'static str = "/users/me/jobs";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingsRequest;

impl ApiRequest for RankingsRequest {
    type Response = Vec<RankingEntry>;
    const PATH: &'static str = "/rankings";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminStatsRequest;

impl ApiRequest for AdminStatsRequest {
    type Response = AdminStats;
    const PATH: &'static str = "/admin/stats";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Clone, Serialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Vec<User>;
    const PATH: &'static str = "/admin/users";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for NewUser {
    type Response = User;
    const PATH: &'static str = "/admin/users";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteUserRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteUserRequest {
    type Response = Ack;
    const PATH: &'static str = "/admin/users";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

impl ApiRequest for Broadcast {
    type Response = BroadcastReceipt;
    const PATH: &'static str = "/admin/broadcast";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Clone, Serialize)]
pub struct BotAnalyticsRequest;

impl ApiRequest for BotAnalyticsRequest {
    type Response = BotAnalytics;
    const PATH: &'static str = "/admin/bot-analytics";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub(crate) mod mock {
    use super::{ApiRequest, Transport};
    use crate::error::{BoardError, BoardResult};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// 一次被记录的请求
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        /// "METHOD /path"
        pub key: String,
        pub token: Option<String>,
        pub body: serde_json::Value,
    }

    /// 按 "METHOD /path" 返回预设响应；未预设的路由模拟网络失败
    #[derive(Default)]
    pub struct MockTransport {
        responses: HashMap<String, (u16, String)>,
        log: RefCell<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, key: &str, status: u16, body: &str) -> Self {
            self.responses
                .insert(key.to_string(), (status, body.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.log.borrow().clone()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send<R: ApiRequest>(
            &self,
            token: Option<&str>,
            request: &R,
        ) -> BoardResult<R::Response> {
            let key = format!("{} {}", R::METHOD.as_str(), request.path());
            self.log.borrow_mut().push(RecordedRequest {
                key: key.clone(),
                token: token.map(str::to_string),
                body: serde_json::to_value(request)?,
            });

            let (status, body) = self
                .responses
                .get(&key)
                .cloned()
                .ok_or_else(|| BoardError::network("Failed to fetch"))?;
            if (200..300).contains(&status) {
                Ok(serde_json::from_str(&body)?)
            } else {
                Err(BoardError::from_response(status, &body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use crate::{JobSource, JobType, Location, Timestamp};

    fn draft() -> JobDraft {
        JobDraft {
            company_name: "Acme".to_string(),
            role: "Backend Engineer".to_string(),
            job_type: JobType::Job,
            location: Location::Onsite,
            apply_link: "https://acme.example/jobs/1".to_string(),
            deadline: Timestamp::parse("2026-02-01").unwrap(),
            source: JobSource::Naukri,
        }
    }

    #[test]
    fn test_path_parameters() {
        let update = UpdateJobRequest {
            id: "j-42".to_string(),
            draft: draft(),
        };
        assert_eq!(update.path(), "/jobs/j-42");
        assert_eq!(DeleteUserRequest { id: "u7".into() }.path(), "/admin/users/u7");
        assert_eq!(ListJobsRequest.path(), "/jobs");
    }

    #[test]
    fn test_update_body_omits_id() {
        let update = UpdateJobRequest {
            id: "j-42".to_string(),
            draft: draft(),
        };
        let body = serde_json::to_value(&update).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["company_name"], "Acme");
        assert_eq!(body["deadline"], "2026-02-01T00:00:00.000Z");
        assert_eq!(body["source"], "naukri");
    }

    #[test]
    fn test_login_is_the_only_anonymous_request() {
        assert!(!LoginRequest::AUTHENTICATED);
        assert!(MeRequest::AUTHENTICATED);
        assert!(BotAnalyticsRequest::AUTHENTICATED);
    }

    #[test]
    fn test_body_methods() {
        assert!(HttpMethod::Put.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }

    #[tokio::test]
    async fn test_create_job_flow_appends_single_server_record() {
        let created = r#"{"id":"srv-9","company_name":"Acme","role":"Backend Engineer","job_type":"Job",
            "location":"Onsite","apply_link":"https://acme.example/jobs/1","deadline":"2026-02-01T00:00:00Z",
            "posted_by":"u1","posted_by_name":"Asha","created_at":"2025-10-01T12:00:00Z","source":"naukri"}"#;
        let transport = MockTransport::new().respond("POST /jobs", 200, created);
        let mut jobs: Vec<Job> = Vec::new();

        let job = transport.send(Some("tok"), &draft()).await.unwrap();
        crate::reconcile::apply_created(&mut jobs, job);

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "srv-9");
        assert_eq!(transport.requests()[0].token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_rejected_delete_surfaces_backend_message() {
        let transport = MockTransport::new().respond(
            "DELETE /jobs/j1",
            403,
            r#"{"detail":"Not authorized to delete this job"}"#,
        );
        let err = transport
            .send(Some("tok"), &DeleteJobRequest { id: "j1".into() })
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message("Failed to delete job"),
            "Not authorized to delete this job"
        );
    }
}
