//! 키워드 테이블 — 필터링/분류/레벨 감지에 쓰이는 고정 사전
//!
//! 모든 테이블은 `(조건, 결과)` 쌍의 고정 우선순위 목록으로 평가됩니다.
//! 비교는 항상 소문자 변환된 메시지에 대한 부분 문자열 일치입니다.
//! 내장 키워드는 영어와 원 배포 환경의 현지화(우크라이나어) 용어를 함께 다룹니다.

use logwarden_core::types::{ErrorCategory, LogLevel};

/// 에러성 텍스트를 나타내는 내장 키워드
///
/// 레벨 필터에서 걸러진 레코드라도 이 키워드를 포함하면 구제됩니다.
pub const ERROR_KEYWORDS: &[&str] = &[
    "error",
    "err",
    "failed",
    "failure",
    "exception",
    "critical",
    "fatal",
    "panic",
    "denied",
    "refused",
    "timeout",
    "corrupt",
    "invalid",
    "не вдалося",
    "помилка",
    "збій",
    "відмова",
    "заборонено",
];

/// 경고성 텍스트를 나타내는 내장 키워드
pub const WARNING_KEYWORDS: &[&str] = &[
    "warning",
    "warn",
    "deprecated",
    "obsolete",
    "retry",
    "slow",
    "попередження",
    "застаріло",
    "повільно",
];

/// 심각도 가산점 대상 크리티컬 키워드 (각 키워드당 +10점)
pub const CRITICAL_KEYWORDS: &[&str] = &["critical", "fatal", "panic", "crash", "corruption"];

/// 에러 카테고리 분류 테이블
///
/// 메시지가 여러 카테고리에 해당할 수 있으므로 평가 순서가 의미를 가집니다.
/// 첫 번째로 일치한 카테고리가 선택됩니다.
pub const CATEGORY_TABLE: &[(ErrorCategory, &[&str])] = &[
    (
        ErrorCategory::Network,
        &["network", "connection", "timeout", "socket", "dns"],
    ),
    (
        ErrorCategory::Filesystem,
        &["file", "directory", "disk", "space", "permission"],
    ),
    (
        ErrorCategory::Authentication,
        &["auth", "login", "password", "denied", "forbidden"],
    ),
    (
        ErrorCategory::Application,
        &["application", "service", "process", "crash"],
    ),
    (
        ErrorCategory::System,
        &["system", "kernel", "driver", "hardware"],
    ),
];

/// 기술 문구 -> 평이한 표현 치환 사전 (단순화 메시지용)
pub const SIMPLIFICATIONS: &[(&str, &str)] = &[
    ("authentication failed", "sign-in failed"),
    ("connection timeout", "the connection took too long"),
    ("permission denied", "not enough access rights"),
    ("file not found", "a file is missing"),
    ("disk full", "the disk is out of space"),
    ("service failed", "a service stopped working"),
    ("network unreachable", "the network cannot be reached"),
    ("out of memory", "the system ran out of memory"),
    ("invalid request", "a request was not valid"),
    ("access denied", "access was refused"),
];

/// 소문자 변환된 텍스트가 키워드 중 하나라도 포함하는지 확인합니다.
///
/// 호출자가 이미 소문자로 변환한 텍스트를 전달해야 합니다.
pub fn contains_any(lower_text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower_text.contains(k))
}

/// 메시지 본문에서 로그 레벨을 감지합니다.
///
/// 선언된 레벨이 없는 줄 단위 텍스트 레코드를 위한 리더용 헬퍼입니다.
/// 크리티컬 -> 에러 -> 경고 순의 고정 우선순위로 평가하며,
/// 어느 것에도 해당하지 않으면 INFO입니다.
pub fn detect_level(message: &str) -> LogLevel {
    let lower = message.to_lowercase();

    if contains_any(&lower, &["critical", "fatal", "panic", "emergency"]) {
        return LogLevel::Critical;
    }

    if contains_any(&lower, &["error", "err", "failed", "failure", "exception"]) {
        return LogLevel::Error;
    }

    if contains_any(&lower, &["warning", "warn", "deprecated"]) {
        return LogLevel::Warning;
    }

    LogLevel::Info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_any_matches_substring() {
        assert!(contains_any("connection timeout to db", &["timeout"]));
        assert!(!contains_any("all systems nominal", ERROR_KEYWORDS));
    }

    #[test]
    fn contains_any_matches_localized_terms() {
        assert!(contains_any("помилка читання диска", ERROR_KEYWORDS));
        assert!(contains_any("застаріло: цей параметр", WARNING_KEYWORDS));
    }

    #[test]
    fn detect_level_critical_beats_error() {
        // "fatal error" matches both tables; critical wins by priority
        assert_eq!(detect_level("FATAL error in module"), LogLevel::Critical);
    }

    #[test]
    fn detect_level_error() {
        assert_eq!(detect_level("write failed: quota"), LogLevel::Error);
    }

    #[test]
    fn detect_level_warning() {
        assert_eq!(detect_level("warning: link flapping"), LogLevel::Warning);
    }

    #[test]
    fn detect_level_defaults_to_info() {
        assert_eq!(detect_level("session opened for user"), LogLevel::Info);
    }

    #[test]
    fn category_table_priority_order() {
        // Network is evaluated first
        assert_eq!(CATEGORY_TABLE[0].0, ErrorCategory::Network);
        assert_eq!(
            CATEGORY_TABLE.last().map(|(c, _)| *c),
            Some(ErrorCategory::System)
        );
    }

    #[test]
    fn keyword_tables_are_lowercase() {
        for k in ERROR_KEYWORDS.iter().chain(WARNING_KEYWORDS) {
            assert_eq!(*k, k.to_lowercase());
        }
        for (_, keywords) in CATEGORY_TABLE {
            for k in *keywords {
                assert_eq!(*k, k.to_lowercase());
            }
        }
    }
}
