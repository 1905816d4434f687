//! REST 传输层
//!
//! `FetchTransport` 是 `Transport` 在浏览器中的实现：拼接 `{backend}/api{path}`，
//! 按需附加 bearer token，POST/PUT 时发送 JSON 请求体，
//! 非 2xx 响应交给 `BoardError::from_response` 归类。

use crate::config::AppConfig;
use crate::web::HttpClient;
use friendboard_shared::protocol::{ApiRequest, Transport};
use friendboard_shared::{BoardError, BoardResult};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct FetchTransport {
    config: AppConfig,
}

impl FetchTransport {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send<R: ApiRequest>(&self, token: Option<&str>, request: &R) -> BoardResult<R::Response> {
        let path = request.path();
        let url = self.config.api_url(&path);
        let op = format!("{} {}", R::METHOD.as_str(), path);

        let mut builder = HttpClient::request(R::METHOD, &url);
        if R::AUTHENTICATED {
            if let Some(token) = token {
                builder = builder.bearer(token);
            }
        }
        if R::METHOD.has_body() {
            let body = serde_json::to_string(request)
                .map_err(|e| BoardError::from(e).in_op(op.clone()))?;
            builder = builder.json_body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BoardError::from(e).in_op(op.clone()))?;
        let status = response.status();
        let ok = response.ok();
        let text = response
            .text()
            .await
            .map_err(|e| BoardError::from(e).in_op(op.clone()))?;
        debug!(target: "api", request = %op, status, "response received");

        if !ok {
            return Err(BoardError::from_response(status, &text).in_op(op));
        }
        serde_json::from_str(&text).map_err(|e| BoardError::from(e).in_op_with(op, "decode"))
    }
}
