//! 레코드 필터 — 정책 기반 보존/거부 판정
//!
//! 판정은 세 단계를 고정된 순서로 거칩니다.
//!
//! 1. 레벨 게이트: 레코드 레벨이 정책의 레벨 목록에 없으면, 메시지에 내장
//!    에러 키워드가 있을 때만 구제됩니다.
//! 2. 제외 키워드: 하나라도 일치하면 무조건 거부합니다. 제외는 항상 포함보다
//!    우선합니다.
//! 3. 포함 키워드: 병합된 포함 목록과 하나도 일치하지 않으면 거부하되,
//!    ERROR/CRITICAL 레벨은 이 단계를 면제받습니다.

use logwarden_core::types::{CanonicalRecord, LogLevel};

use crate::config::FilterPolicy;
use crate::keywords::{self, ERROR_KEYWORDS, WARNING_KEYWORDS};

/// 정책에서 파생된 불변 필터
///
/// 키워드 비교는 모두 소문자 부분 문자열 일치이므로, 생성 시점에 키워드를
/// 미리 소문자로 변환해 둡니다.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    filter_levels: Vec<LogLevel>,
    /// 사용자 포함 키워드 + 내장 에러/경고 키워드 (모두 소문자)
    include_keywords: Vec<String>,
    exclude_keywords: Vec<String>,
}

impl RecordFilter {
    /// 정책으로부터 필터를 구성합니다.
    pub fn new(policy: &FilterPolicy) -> Self {
        let include_keywords = policy
            .include_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .chain(ERROR_KEYWORDS.iter().map(|k| (*k).to_owned()))
            .chain(WARNING_KEYWORDS.iter().map(|k| (*k).to_owned()))
            .collect();

        Self {
            filter_levels: policy.filter_levels.clone(),
            include_keywords,
            exclude_keywords: policy
                .exclude_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// 레코드 보존 여부를 판정합니다.
    pub fn should_include(&self, record: &CanonicalRecord) -> bool {
        let message = record.message.to_lowercase();

        // 1단계: 레벨 게이트. 목록 밖 레벨은 에러 키워드로만 구제됩니다.
        if !self.filter_levels.contains(&record.level)
            && !keywords::contains_any(&message, ERROR_KEYWORDS)
        {
            return false;
        }

        // 2단계: 제외 키워드는 무조건 우선합니다.
        if self.exclude_keywords.iter().any(|k| message.contains(k)) {
            return false;
        }

        // 3단계: 포함 키워드. ERROR/CRITICAL은 면제됩니다.
        if !self.include_keywords.is_empty()
            && !self.include_keywords.iter().any(|k| message.contains(k))
            && !record.level.is_error()
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use logwarden_core::types::CanonicalRecord;

    fn record(level: LogLevel, message: &str) -> CanonicalRecord {
        CanonicalRecord {
            timestamp: Utc::now(),
            level,
            source: "test".to_owned(),
            message: message.to_owned(),
            original_message: message.to_owned(),
            pid: None,
            hostname: None,
            user: None,
            event_id: None,
            category: None,
            log_source: "journald".to_owned(),
            unit: None,
            computer: None,
            raw_data: None,
        }
    }

    #[test]
    fn keeps_error_level() {
        let filter = RecordFilter::new(&FilterPolicy::default());
        assert!(filter.should_include(&record(LogLevel::Error, "disk write failed")));
    }

    #[test]
    fn drops_info_without_error_keywords() {
        let filter = RecordFilter::new(&FilterPolicy::default());
        assert!(!filter.should_include(&record(LogLevel::Info, "session opened for user")));
    }

    #[test]
    fn rescues_info_with_error_keyword() {
        let filter = RecordFilter::new(&FilterPolicy::default());
        assert!(filter.should_include(&record(LogLevel::Info, "request timeout from upstream")));
    }

    #[test]
    fn rescue_ignores_warning_keywords() {
        // only error keywords rescue a record past the level gate
        let filter = RecordFilter::new(&FilterPolicy::default());
        assert!(!filter.should_include(&record(LogLevel::Info, "deprecated option in use")));
    }

    #[test]
    fn exclude_beats_include() {
        let policy = FilterPolicy {
            include_keywords: vec!["timeout".to_owned()],
            exclude_keywords: vec!["timeout".to_owned()],
            ..Default::default()
        };
        let filter = RecordFilter::new(&policy);
        assert!(!filter.should_include(&record(LogLevel::Error, "connection timeout to db")));
    }

    #[test]
    fn exclude_drops_matching_error() {
        let policy = FilterPolicy {
            exclude_keywords: vec!["healthcheck".to_owned()],
            ..Default::default()
        };
        let filter = RecordFilter::new(&policy);
        assert!(!filter.should_include(&record(LogLevel::Error, "healthcheck probe failed")));
    }

    #[test]
    fn error_level_exempt_from_include_check() {
        // message matches no keyword at all, but level is ERROR
        let policy = FilterPolicy {
            include_keywords: vec!["oom".to_owned()],
            ..Default::default()
        };
        let filter = RecordFilter::new(&policy);
        assert!(filter.should_include(&record(LogLevel::Error, "segmentation violation")));
    }

    #[test]
    fn warning_must_match_include_list() {
        let filter = RecordFilter::new(&FilterPolicy::default());
        // "warn" is in the built-in warning keywords, so this passes step 3
        assert!(filter.should_include(&record(LogLevel::Warning, "warn: link flapping")));
        // a warning-level record whose text matches nothing is rejected
        assert!(!filter.should_include(&record(LogLevel::Warning, "link state changed")));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let policy = FilterPolicy {
            exclude_keywords: vec!["HealthCheck".to_owned()],
            ..Default::default()
        };
        let filter = RecordFilter::new(&policy);
        assert!(!filter.should_include(&record(LogLevel::Error, "HEALTHCHECK failed again")));
    }

    #[test]
    fn unknown_level_rescued_by_error_keyword() {
        let filter = RecordFilter::new(&FilterPolicy::default());
        let rec = record(
            LogLevel::Unknown("AUDIT_FAILURE".to_owned()),
            "logon denied for account",
        );
        assert!(filter.should_include(&rec));
    }
}
