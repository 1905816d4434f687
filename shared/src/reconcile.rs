//! 列表协调
//!
//! 变更请求成功后，用后端返回的记录修补本地列表，不整页重新拉取。
//! 失败的结果永远不会触碰列表。

use crate::{Job, RankingEntry, User};
use tracing::debug;

/// 带有后端 id 的实体
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Job {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for RankingEntry {
    fn id(&self) -> &str {
        &self.user_id
    }
}

/// 追加服务端返回的记录；若 id 已存在（例如重复响应）则替换，保证不会出现重复
pub fn apply_created<T: Identified>(list: &mut Vec<T>, created: T) {
    match list.iter_mut().find(|item| item.id() == created.id()) {
        Some(existing) => *existing = created,
        None => list.push(created),
    }
}

/// 按 id 替换；返回是否命中
///
/// 整条替换即等价于浅合并：`Job`/`User` 解码时除带默认值的字段外都必须存在，
/// 不完整的响应在到达这里之前就已解码失败。
pub fn apply_updated<T: Identified>(list: &mut [T], updated: T) -> bool {
    match list.iter_mut().find(|item| item.id() == updated.id()) {
        Some(existing) => {
            *existing = updated;
            true
        }
        None => {
            debug!(id = updated.id(), "update target not in local list");
            false
        }
    }
}

/// 按 id 删除；返回是否命中
pub fn apply_deleted<T: Identified>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|item| item.id() != id);
    let removed = list.len() != before;
    if !removed {
        debug!(id, "delete target not in local list");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::job;
    use crate::{JobType, Location};

    fn list() -> Vec<Job> {
        vec![
            job("j1", "Google", "SWE", JobType::Job, Location::Remote),
            job("j2", "Meta", "PM", JobType::Job, Location::Onsite),
        ]
    }

    #[test]
    fn test_create_appends_server_record() {
        let mut jobs = list();
        let mut created = job("j3", "Stripe", "SRE", JobType::Job, Location::Hybrid);
        created.posted_by_name = "Ravi".to_string();
        apply_created(&mut jobs, created);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs.iter().filter(|j| j.id == "j3").count(), 1);
        assert_eq!(jobs[2].posted_by_name, "Ravi");
    }

    #[test]
    fn test_create_twice_does_not_duplicate() {
        let mut jobs = list();
        let created = job("j3", "Stripe", "SRE", JobType::Job, Location::Hybrid);
        apply_created(&mut jobs, created.clone());
        apply_created(&mut jobs, created);
        assert_eq!(jobs.iter().filter(|j| j.id == "j3").count(), 1);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut jobs = list();
        let mut updated = jobs[0].clone();
        updated.role = "Staff SWE".to_string();
        assert!(apply_updated(&mut jobs, updated));
        assert_eq!(jobs[0].role, "Staff SWE");
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_update_of_missing_record_is_a_no_op() {
        let mut jobs = list();
        let ghost = job("zz", "Ghost", "None", JobType::Job, Location::Remote);
        assert!(!apply_updated(&mut jobs, ghost));
        assert_eq!(jobs, list());
    }

    #[test]
    fn test_partial_update_payload_never_reaches_list() {
        let partial = r#"{"id":"j1","role":"Staff SWE"}"#;
        assert!(serde_json::from_str::<Job>(partial).is_err());

        // 完整记录替换后，未变的字段与原记录一致
        let mut jobs = list();
        let mut full = jobs[0].clone();
        full.role = "Staff SWE".to_string();
        let body = serde_json::to_string(&full).unwrap();
        let decoded: Job = serde_json::from_str(&body).unwrap();
        apply_updated(&mut jobs, decoded);
        assert_eq!(jobs[0].company_name, "Google");
        assert_eq!(jobs[0].posted_by_name, list()[0].posted_by_name);
    }

    #[test]
    fn test_delete_removes_by_id() {
        let mut jobs = list();
        assert!(apply_deleted(&mut jobs, "j1"));
        assert_eq!(jobs.len(), 1);
        assert!(!apply_deleted(&mut jobs, "j1"));
    }
}
