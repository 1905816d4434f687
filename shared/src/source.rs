//! 职位来源（招聘平台）
//!
//! 已知平台是一个封闭集合，后端可能返回未知值，由 `JobSource::Other` 承载原始字符串。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 未知来源与公司官网共用的样式
const NEUTRAL_BADGE: &str = "bg-slate-500/10 text-slate-600 dark:text-slate-400 border-slate-500/20";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum JobSource {
    #[default]
    CompanyWebsite,
    LinkedIn,
    Naukri,
    Indeed,
    Foundit,
    TimesJobs,
    Unstop,
    Internshala,
    Freshersworld,
    ELitmus,
    Instahyre,
    Cutshort,
    HackerEarth,
    HackerRank,
    Wellfound,
    Turing,
    RemoteOk,
    Glassdoor,
    AmbitionBox,
    /// 未知来源，保留原始值
    Other(String),
}

impl JobSource {
    /// 表单下拉框中的顺序
    pub const KNOWN: [JobSource; 19] = [
        JobSource::CompanyWebsite,
        JobSource::LinkedIn,
        JobSource::Naukri,
        JobSource::Indeed,
        JobSource::Foundit,
        JobSource::TimesJobs,
        JobSource::Unstop,
        JobSource::Internshala,
        JobSource::Freshersworld,
        JobSource::ELitmus,
        JobSource::Instahyre,
        JobSource::Cutshort,
        JobSource::HackerEarth,
        JobSource::HackerRank,
        JobSource::Wellfound,
        JobSource::Turing,
        JobSource::RemoteOk,
        JobSource::Glassdoor,
        JobSource::AmbitionBox,
    ];

    pub fn from_value(value: &str) -> Self {
        match value {
            "company_website" => Self::CompanyWebsite,
            "linkedin" => Self::LinkedIn,
            "naukri" => Self::Naukri,
            "indeed" => Self::Indeed,
            "foundit" => Self::Foundit,
            "timesjobs" => Self::TimesJobs,
            "unstop" => Self::Unstop,
            "internshala" => Self::Internshala,
            "freshersworld" => Self::Freshersworld,
            "elitmus" => Self::ELitmus,
            "instahyre" => Self::Instahyre,
            "cutshort" => Self::Cutshort,
            "hackerearth" => Self::HackerEarth,
            "hackerrank" => Self::HackerRank,
            "wellfound" => Self::Wellfound,
            "turing" => Self::Turing,
            "remoteok" => Self::RemoteOk,
            "glassdoor" => Self::Glassdoor,
            "ambitionbox" => Self::AmbitionBox,
            other => Self::Other(other.to_string()),
        }
    }

    /// 线上传输值
    pub fn value(&self) -> &str {
        match self {
            Self::CompanyWebsite => "company_website",
            Self::LinkedIn => "linkedin",
            Self::Naukri => "naukri",
            Self::Indeed => "indeed",
            Self::Foundit => "foundit",
            Self::TimesJobs => "timesjobs",
            Self::Unstop => "unstop",
            Self::Internshala => "internshala",
            Self::Freshersworld => "freshersworld",
            Self::ELitmus => "elitmus",
            Self::Instahyre => "instahyre",
            Self::Cutshort => "cutshort",
            Self::HackerEarth => "hackerearth",
            Self::HackerRank => "hackerrank",
            Self::Wellfound => "wellfound",
            Self::Turing => "turing",
            Self::RemoteOk => "remoteok",
            Self::Glassdoor => "glassdoor",
            Self::AmbitionBox => "ambitionbox",
            Self::Other(raw) => raw,
        }
    }

    /// 展示名称；未知来源直接显示原始值
    pub fn label(&self) -> &str {
        match self {
            Self::CompanyWebsite => "On Company Site",
            Self::LinkedIn => "LinkedIn",
            Self::Naukri => "Naukri.com",
            Self::Indeed => "Indeed",
            Self::Foundit => "Foundit",
            Self::TimesJobs => "TimesJobs",
            Self::Unstop => "Unstop",
            Self::Internshala => "Internshala",
            Self::Freshersworld => "Freshersworld",
            Self::ELitmus => "eLitmus",
            Self::Instahyre => "Instahyre",
            Self::Cutshort => "Cutshort",
            Self::HackerEarth => "HackerEarth",
            Self::HackerRank => "HackerRank",
            Self::Wellfound => "Wellfound (AngelList)",
            Self::Turing => "Turing",
            Self::RemoteOk => "RemoteOK",
            Self::Glassdoor => "Glassdoor",
            Self::AmbitionBox => "AmbitionBox",
            Self::Other(raw) => raw,
        }
    }

    /// 徽章样式
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::CompanyWebsite | Self::Other(_) => NEUTRAL_BADGE,
            Self::LinkedIn => "bg-blue-600/10 text-blue-700 dark:text-blue-400 border-blue-600/20",
            Self::Naukri | Self::Turing => {
                "bg-blue-500/10 text-blue-600 dark:text-blue-400 border-blue-500/20"
            }
            Self::Indeed => {
                "bg-indigo-500/10 text-indigo-700 dark:text-indigo-400 border-indigo-500/20"
            }
            Self::Foundit => "bg-red-500/10 text-red-600 dark:text-red-400 border-red-500/20",
            Self::TimesJobs => "bg-rose-500/10 text-rose-600 dark:text-rose-400 border-rose-500/20",
            Self::Unstop => {
                "bg-orange-500/10 text-orange-600 dark:text-orange-400 border-orange-500/20"
            }
            Self::Internshala => "bg-sky-500/10 text-sky-600 dark:text-sky-400 border-sky-500/20",
            Self::Freshersworld => {
                "bg-teal-500/10 text-teal-600 dark:text-teal-400 border-teal-500/20"
            }
            Self::ELitmus => {
                "bg-violet-500/10 text-violet-600 dark:text-violet-400 border-violet-500/20"
            }
            Self::Instahyre => "bg-cyan-500/10 text-cyan-600 dark:text-cyan-400 border-cyan-500/20",
            Self::Cutshort => {
                "bg-fuchsia-500/10 text-fuchsia-600 dark:text-fuchsia-400 border-fuchsia-500/20"
            }
            Self::HackerEarth => {
                "bg-green-600/10 text-green-700 dark:text-green-400 border-green-600/20"
            }
            Self::HackerRank | Self::Glassdoor => {
                "bg-emerald-500/10 text-emerald-600 dark:text-emerald-400 border-emerald-500/20"
            }
            Self::Wellfound => {
                "bg-neutral-500/10 text-neutral-700 dark:text-neutral-300 border-neutral-500/20"
            }
            Self::RemoteOk => {
                "bg-green-500/10 text-green-600 dark:text-green-400 border-green-500/20"
            }
            Self::AmbitionBox => {
                "bg-amber-500/10 text-amber-600 dark:text-amber-400 border-amber-500/20"
            }
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for JobSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for JobSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // 旧数据中 source 可能为 null
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .filter(|s| !s.is_empty())
            .map(|s| JobSource::from_value(&s))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_are_stable() {
        for source in JobSource::KNOWN.iter() {
            assert!(source.is_known());
            assert_eq!(&JobSource::from_value(source.value()), source);
        }
        assert_eq!(JobSource::KNOWN.len(), 19);
    }

    #[test]
    fn test_unknown_source_keeps_raw_value() {
        let source: JobSource = serde_json::from_str("\"startup\"").unwrap();
        assert_eq!(source, JobSource::Other("startup".to_string()));
        assert_eq!(source.label(), "startup");
        assert_eq!(source.badge_class(), JobSource::CompanyWebsite.badge_class());
        assert_eq!(serde_json::to_string(&source).unwrap(), "\"startup\"");
    }

    #[test]
    fn test_null_or_empty_defaults_to_company_website() {
        let null: JobSource = serde_json::from_str("null").unwrap();
        let empty: JobSource = serde_json::from_str("\"\"").unwrap();
        assert_eq!(null, JobSource::CompanyWebsite);
        assert_eq!(empty, JobSource::CompanyWebsite);
    }

    #[test]
    fn test_labels() {
        assert_eq!(JobSource::Wellfound.label(), "Wellfound (AngelList)");
        assert_eq!(JobSource::ELitmus.to_string(), "eLitmus");
    }
}
