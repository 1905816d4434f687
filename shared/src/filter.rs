//! 职位列表筛选
//!
//! 每次渲染都从完整列表重新计算，不修改原列表。

use crate::{Job, JobType, Location};

/// 下拉框中 "全部" 选项的值
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub search: String,
    pub job_type: Option<JobType>,
    pub location: Option<Location>,
}

impl JobFilter {
    /// 从下拉框的字符串值构造；"all" 或未知值表示不筛选
    pub fn from_inputs(search: &str, job_type: &str, location: &str) -> Self {
        Self {
            search: search.to_string(),
            job_type: JobType::parse(job_type),
            location: Location::parse(location),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.job_type.is_some() || self.location.is_some()
    }

    pub fn matches(&self, job: &Job) -> bool {
        let needle = self.search.to_lowercase();
        let text_ok = needle.is_empty()
            || job.company_name.to_lowercase().contains(&needle)
            || job.role.to_lowercase().contains(&needle);
        let type_ok = self.job_type.is_none_or(|t| t == job.job_type);
        let location_ok = self.location.is_none_or(|l| l == job.location);
        text_ok && type_ok && location_ok
    }

    pub fn apply<'a>(&self, jobs: &'a [Job]) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.matches(job)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::job;

    fn sample() -> Vec<Job> {
        vec![
            job("1", "Google", "SWE", JobType::Job, Location::Remote),
            job("2", "Goodyear", "Analyst", JobType::Internship, Location::Onsite),
            job("3", "Acme", "Google Ads Specialist", JobType::Job, Location::Hybrid),
            job("4", "Meta", "Engineer", JobType::Job, Location::Remote),
        ]
    }

    #[test]
    fn test_search_type_and_all_location() {
        let jobs = sample();
        let filter = JobFilter::from_inputs("goo", "Job", ALL);
        let ids: Vec<_> = filter.apply(&jobs).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let jobs = sample();
        let filter = JobFilter::from_inputs("GOOD", ALL, ALL);
        assert_eq!(filter.apply(&jobs).len(), 1);
    }

    #[test]
    fn test_location_filter() {
        let jobs = sample();
        let filter = JobFilter::from_inputs("", ALL, "Remote");
        assert_eq!(filter.apply(&jobs).len(), 2);
        assert!(filter.is_active());
    }

    #[test]
    fn test_empty_filter_keeps_everything_and_source_untouched() {
        let jobs = sample();
        let filter = JobFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&jobs).len(), 4);
        assert_eq!(jobs.len(), 4);
    }
}
