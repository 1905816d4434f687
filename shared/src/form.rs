//! 表单校验
//!
//! 校验失败时不发起任何请求，错误以 `Validation` 状态返回，
//! 消息直接展示给用户。

use crate::error::{BoardError, BoardResult};
use crate::protocol::LoginRequest;
use crate::{Broadcast, JobDraft, JobSource, JobType, Location, NewUser, TelegramLink, Timestamp};

pub const MSG_FILL_ALL: &str = "Please fill in all fields";
pub const MSG_EMPTY_BROADCAST: &str = "Please enter a message";
pub const MSG_EMPTY_CHAT_ID: &str = "Please enter your Telegram chat ID";
pub const MSG_BAD_DEADLINE: &str = "Please pick a valid deadline";

fn required(values: &[&str], message: &str) -> BoardResult<()> {
    if values.iter().any(|v| v.trim().is_empty()) {
        Err(BoardError::validation(message))
    } else {
        Ok(())
    }
}

pub fn validate_login(email: &str, password: &str) -> BoardResult<LoginRequest> {
    required(&[email, password], MSG_FILL_ALL)?;
    Ok(LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

/// 添加/编辑职位表单的原始输入
///
/// 下拉框与日期输入框都以字符串形式提供，空串表示未选择。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFormInput {
    pub company_name: String,
    pub role: String,
    pub job_type: String,
    pub location: String,
    pub apply_link: String,
    /// `<input type="date">` 的值 "YYYY-MM-DD"
    pub deadline: String,
    pub source: String,
}

impl Default for JobFormInput {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            role: String::new(),
            job_type: String::new(),
            location: String::new(),
            apply_link: String::new(),
            deadline: String::new(),
            source: JobSource::CompanyWebsite.value().to_string(),
        }
    }
}

impl JobFormInput {
    /// 编辑对话框的初始值
    pub fn from_draft(draft: &JobDraft) -> Self {
        Self {
            company_name: draft.company_name.clone(),
            role: draft.role.clone(),
            job_type: draft.job_type.as_str().to_string(),
            location: draft.location.as_str().to_string(),
            apply_link: draft.apply_link.clone(),
            deadline: draft.deadline.to_date_input(),
            source: draft.source.value().to_string(),
        }
    }

    pub fn validate(&self) -> BoardResult<JobDraft> {
        required(
            &[
                self.company_name.as_str(),
                self.role.as_str(),
                self.job_type.as_str(),
                self.location.as_str(),
                self.apply_link.as_str(),
                self.deadline.as_str(),
            ],
            MSG_FILL_ALL,
        )?;

        let job_type =
            JobType::parse(&self.job_type).ok_or_else(|| BoardError::validation(MSG_FILL_ALL))?;
        let location =
            Location::parse(&self.location).ok_or_else(|| BoardError::validation(MSG_FILL_ALL))?;
        let deadline =
            Timestamp::parse(&self.deadline).ok_or_else(|| BoardError::validation(MSG_BAD_DEADLINE))?;
        let source = match self.source.trim() {
            "" => JobSource::default(),
            raw => JobSource::from_value(raw),
        };

        Ok(JobDraft {
            company_name: self.company_name.trim().to_string(),
            role: self.role.trim().to_string(),
            job_type,
            location,
            apply_link: self.apply_link.trim().to_string(),
            deadline,
            source,
        })
    }
}

pub fn validate_new_user(email: &str, password: &str, name: &str) -> BoardResult<NewUser> {
    required(&[email, password, name], MSG_FILL_ALL)?;
    Ok(NewUser {
        email: email.trim().to_string(),
        password: password.to_string(),
        name: name.trim().to_string(),
    })
}

pub fn validate_broadcast(message: &str) -> BoardResult<Broadcast> {
    let message = message.trim();
    if message.is_empty() {
        return Err(BoardError::validation(MSG_EMPTY_BROADCAST));
    }
    Ok(Broadcast {
        message: message.to_string(),
    })
}

pub fn validate_telegram_link(chat_id: &str) -> BoardResult<TelegramLink> {
    let chat_id = chat_id.trim();
    if chat_id.is_empty() {
        return Err(BoardError::validation(MSG_EMPTY_CHAT_ID));
    }
    Ok(TelegramLink {
        telegram_chat_id: chat_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardErrorStatus;

    fn filled() -> JobFormInput {
        JobFormInput {
            company_name: " Stripe ".to_string(),
            role: "Platform Engineer".to_string(),
            job_type: "Job".to_string(),
            location: "Remote".to_string(),
            apply_link: "https://stripe.com/jobs/1".to_string(),
            deadline: "2026-05-01".to_string(),
            ..JobFormInput::default()
        }
    }

    #[test]
    fn test_job_form_builds_draft() {
        let draft = filled().validate().unwrap();
        assert_eq!(draft.company_name, "Stripe");
        assert_eq!(draft.source, JobSource::CompanyWebsite);
        assert_eq!(draft.deadline.to_iso_string(), "2026-05-01T00:00:00.000Z");
    }

    #[test]
    fn test_job_form_missing_field() {
        let mut input = filled();
        input.location.clear();
        let err = input.validate().unwrap_err();
        assert_eq!(err.status, BoardErrorStatus::Validation);
        assert_eq!(err.user_message("ignored"), MSG_FILL_ALL);
    }

    #[test]
    fn test_job_form_round_trips_through_draft() {
        let draft = filled().validate().unwrap();
        let input = JobFormInput::from_draft(&draft);
        assert_eq!(input.deadline, "2026-05-01");
        assert_eq!(input.validate().unwrap(), draft);
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("a@b.com", "").is_err());
        assert_eq!(validate_login(" a@b.com ", "pw").unwrap().email, "a@b.com");
    }

    #[test]
    fn test_broadcast_is_trimmed() {
        assert_eq!(
            validate_broadcast("   ").unwrap_err().message(),
            MSG_EMPTY_BROADCAST
        );
        assert_eq!(validate_broadcast(" hi all ").unwrap().message, "hi all");
    }

    #[test]
    fn test_new_user_and_telegram() {
        assert!(validate_new_user("x@y.z", "secret", " ").is_err());
        assert!(validate_telegram_link("  ").is_err());
        assert_eq!(
            validate_telegram_link(" 123456 ").unwrap().telegram_chat_id,
            "123456"
        );
    }
}
