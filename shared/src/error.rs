use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
/// 包含错误对应的语义（状态码）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardErrorStatus {
    /// 401: 凭据错误、令牌过期或无效
    Unauthorized,
    /// 403: 权限不足（如非管理员访问管理接口）
    Forbidden,
    /// 404: 资源未找到
    NotFound,
    /// 400 / 422: 表单校验失败（包括客户端本地校验）
    Validation,
    /// 409: 资源冲突
    Conflict,
    /// 网络层失败（请求未到达后端或连接中断）
    Network,
    /// JSON 解析或序列化错误
    Serialization,
    /// 5xx 或其他未归类的后端错误
    Backend,
}

impl BoardErrorStatus {
    /// 从 HTTP 状态码推导错误语义
    pub fn from_status_code(code: u16) -> Self {
        match code {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 422 => Self::Validation,
            409 => Self::Conflict,
            _ => Self::Backend,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "RESOURCE_NOT_FOUND",
            Self::Validation => "INVALID_INPUT",
            Self::Conflict => "RESOURCE_CONFLICT",
            Self::Network => "NETWORK_ERROR",
            Self::Serialization => "JSON_PARSE_ERROR",
            Self::Backend => "BACKEND_ERROR",
        }
    }

    /// 鉴权类错误：会话应当失效（fail-closed）
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "session.login", "jobs.delete"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 后端错误响应体
// =========================================================

/// 后端返回的错误体：`{"detail": "Invalid credentials"}`
#[derive(Debug, Clone, Deserialize)]
struct DetailBody {
    detail: serde_json::Value,
}

impl DetailBody {
    /// `detail` 可能是字符串，也可能是校验错误列表（取第一条的 `msg`）
    fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(|msg| msg.as_str())
                .map(str::to_string),
            _ => None,
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端领域错误
///
/// - status: 错误类型/语义
/// - message: 错误消息
/// - from_backend: message 是否来自后端的 `detail`（决定 toast 文案）
/// - spans: 结构化的调用追踪栈
#[derive(Debug, Clone, PartialEq)]
pub struct BoardError {
    pub status: BoardErrorStatus,
    pub message: String,
    from_backend: bool,
    spans: Vec<ErrorSpan>,
}

impl BoardError {
    pub fn new(status: BoardErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            from_backend: false,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(BoardErrorStatus::Unauthorized, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(BoardErrorStatus::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BoardErrorStatus::Network, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(BoardErrorStatus::Serialization, message)
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(BoardErrorStatus::Backend, message)
    }

    /// 将非 2xx 响应映射为错误
    ///
    /// 响应体中的 `detail` 作为用户可见消息；否则使用按状态码的通用消息。
    pub fn from_response(status_code: u16, body: &str) -> Self {
        let status = BoardErrorStatus::from_status_code(status_code);
        let detail = serde_json::from_str::<DetailBody>(body)
            .ok()
            .and_then(|b| b.message());

        match detail {
            Some(message) => Self {
                status,
                message,
                from_backend: true,
                spans: Vec::new(),
            },
            None => Self::new(status, format!("Request failed with status {status_code}")),
        }
    }

    // --- Context builders ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_auth_failure(&self) -> bool {
        self.status.is_auth_failure()
    }

    /// toast 文案：后端消息优先；客户端校验消息原样返回；其余使用调用方的兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        if self.from_backend || self.status == BoardErrorStatus::Validation {
            self.message.clone()
        } else {
            fallback.to_string()
        }
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for BoardError {}

impl From<serde_json::Error> for BoardError {
    fn from(e: serde_json::Error) -> Self {
        BoardError::serialization(e.to_string())
    }
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_backend_detail() {
        let err = BoardError::from_response(401, r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(err.status, BoardErrorStatus::Unauthorized);
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_from_response_without_detail_falls_back() {
        let err = BoardError::from_response(500, "Internal Server Error");
        assert_eq!(err.status, BoardErrorStatus::Backend);
        assert_eq!(err.user_message("Failed to delete job"), "Failed to delete job");
    }

    #[test]
    fn test_from_response_validation_list() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#;
        let err = BoardError::from_response(422, body);
        assert_eq!(err.status, BoardErrorStatus::Validation);
        assert_eq!(err.message(), "field required");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(BoardErrorStatus::from_status_code(403), BoardErrorStatus::Forbidden);
        assert_eq!(BoardErrorStatus::from_status_code(404), BoardErrorStatus::NotFound);
        assert_eq!(BoardErrorStatus::from_status_code(409), BoardErrorStatus::Conflict);
        assert_eq!(BoardErrorStatus::from_status_code(502), BoardErrorStatus::Backend);
    }

    #[test]
    fn test_display_includes_trace() {
        let err = BoardError::network("connection reset")
            .in_op("jobs.delete")
            .in_op_with("http.send", "DELETE /jobs/42");
        assert_eq!(
            err.to_string(),
            "[NETWORK_ERROR] connection reset | trace: jobs.delete -> http.send(DELETE /jobs/42)"
        );
        assert_eq!(err.spans().len(), 2);
    }

    #[test]
    fn test_network_error_hides_raw_message_from_user() {
        let err = BoardError::network("TypeError: Failed to fetch");
        assert_eq!(err.user_message("Failed to load jobs"), "Failed to load jobs");
    }
}
