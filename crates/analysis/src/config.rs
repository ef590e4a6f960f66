//! 필터 정책 — 실행 단위 불변 설정
//!
//! [`FilterPolicy`]는 core의 [`FilterConfig`](logwarden_core::config::FilterConfig)를
//! 기반으로 파서가 사용하는 런타임 정책을 제공합니다. 정책은 실행당 한 번
//! 공급되며 이후 변경되지 않습니다.
//!
//! # 사용 예시
//! ```
//! use logwarden_analysis::config::FilterPolicyBuilder;
//! use logwarden_core::types::LogLevel;
//!
//! let policy = FilterPolicyBuilder::new()
//!     .filter_levels(vec![LogLevel::Error, LogLevel::Critical])
//!     .exclude_keyword("healthcheck")
//!     .build()
//!     .unwrap();
//! assert_eq!(policy.filter_levels.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use logwarden_core::config::FilterConfig;
use logwarden_core::types::LogLevel;

use crate::error::AnalysisError;

/// 필터 정책
///
/// `include_keywords`는 사용자 추가분만 담습니다. 파서는 필터 구성 시
/// 내장 에러/경고 키워드를 여기에 병합합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterPolicy {
    /// 포함할 로그 레벨
    pub filter_levels: Vec<LogLevel>,
    /// 사용자 추가 포함 키워드
    pub include_keywords: Vec<String>,
    /// 제외 키워드 (항상 우선)
    pub exclude_keywords: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            filter_levels: vec![LogLevel::Error, LogLevel::Critical, LogLevel::Warning],
            include_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
        }
    }
}

impl FilterPolicy {
    /// core의 `FilterConfig`에서 필터 정책을 생성합니다.
    ///
    /// 레벨 문자열은 관대하게 파싱되며, 인식되지 않는 레벨은
    /// `Unknown`으로 그대로 유지됩니다.
    pub fn from_core(core: &FilterConfig) -> Self {
        Self {
            filter_levels: core.levels.iter().map(|s| LogLevel::parse(s)).collect(),
            include_keywords: core.include_keywords.clone(),
            exclude_keywords: core.exclude_keywords.clone(),
        }
    }

    /// 정책값의 유효성을 검증합니다.
    ///
    /// 빈 키워드 문자열은 모든 메시지에 부분 일치하므로 거부합니다.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for keyword in &self.include_keywords {
            if keyword.trim().is_empty() {
                return Err(AnalysisError::Policy {
                    field: "include_keywords".to_owned(),
                    reason: "keywords must not be empty".to_owned(),
                });
            }
        }

        for keyword in &self.exclude_keywords {
            if keyword.trim().is_empty() {
                return Err(AnalysisError::Policy {
                    field: "exclude_keywords".to_owned(),
                    reason: "keywords must not be empty".to_owned(),
                });
            }
        }

        Ok(())
    }
}

/// 필터 정책 빌더
#[derive(Default)]
pub struct FilterPolicyBuilder {
    policy: FilterPolicy,
}

impl FilterPolicyBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 포함할 레벨 목록을 설정합니다.
    pub fn filter_levels(mut self, levels: Vec<LogLevel>) -> Self {
        self.policy.filter_levels = levels;
        self
    }

    /// 사용자 포함 키워드를 추가합니다.
    pub fn include_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.policy.include_keywords.push(keyword.into());
        self
    }

    /// 제외 키워드를 추가합니다.
    pub fn exclude_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.policy.exclude_keywords.push(keyword.into());
        self
    }

    /// 정책을 검증하고 `FilterPolicy`를 생성합니다.
    pub fn build(self) -> Result<FilterPolicy, AnalysisError> {
        self.policy.validate()?;
        Ok(self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = FilterPolicy::default();
        policy.validate().unwrap();
        assert_eq!(
            policy.filter_levels,
            vec![LogLevel::Error, LogLevel::Critical, LogLevel::Warning]
        );
        assert!(policy.include_keywords.is_empty());
        assert!(policy.exclude_keywords.is_empty());
    }

    #[test]
    fn from_core_parses_levels() {
        let core = FilterConfig {
            levels: vec!["error".to_owned(), "AUDIT_FAILURE".to_owned()],
            include_keywords: vec!["oom".to_owned()],
            exclude_keywords: vec![],
        };
        let policy = FilterPolicy::from_core(&core);
        assert_eq!(policy.filter_levels[0], LogLevel::Error);
        assert_eq!(
            policy.filter_levels[1],
            LogLevel::Unknown("AUDIT_FAILURE".to_owned())
        );
        assert_eq!(policy.include_keywords, vec!["oom"]);
    }

    #[test]
    fn validate_rejects_empty_include_keyword() {
        let policy = FilterPolicy {
            include_keywords: vec![String::new()],
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn builder_creates_valid_policy() {
        let policy = FilterPolicyBuilder::new()
            .filter_levels(vec![LogLevel::Error])
            .include_keyword("oom")
            .exclude_keyword("healthcheck")
            .build()
            .unwrap();
        assert_eq!(policy.filter_levels, vec![LogLevel::Error]);
        assert_eq!(policy.exclude_keywords, vec!["healthcheck"]);
    }

    #[test]
    fn builder_rejects_blank_keyword() {
        let result = FilterPolicyBuilder::new().exclude_keyword("   ").build();
        assert!(result.is_err());
    }
}
