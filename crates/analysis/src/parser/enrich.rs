//! 보강 — 해시 서명, 분류, 심각도, 단순화 메시지 계산
//!
//! 파이프라인의 마지막 단계로, 보존이 확정된 레코드에 파생 필드를 붙입니다.
//! 모든 계산은 순수 함수이며 같은 입력에 대해 항상 같은 값을 냅니다.
//! 그룹핑 해시는 실행 간에도 안정적이어야 하므로 시드 없는 FxHasher를
//! 사용합니다.

use std::hash::Hasher;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHasher;

use logwarden_core::types::{CanonicalRecord, EnrichedRecord, ErrorCategory, LogLevel};

use crate::keywords::{self, CATEGORY_TABLE, CRITICAL_KEYWORDS, SIMPLIFICATIONS};
use crate::util::{capitalize_first, truncate_chars};

/// 단순화 메시지의 최대 길이 (문자 수)
const SIMPLIFIED_MAX_LEN: usize = 150;

/// 가변 토큰: 16진수 리터럴, 긴 16진수 식별자, 숫자, 경로
///
/// 대안 순서가 의미를 가집니다. `0x` 접두 리터럴을 먼저 먹지 않으면
/// 접두부와 본문이 따로 치환되어 서로 다른 서명이 나옵니다.
static VARIABLE_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)0x[0-9a-f]+|[0-9a-f]{8,}|\d+|/\S*").expect("static pattern must compile")
});

/// 메시지의 그룹핑 서명을 계산합니다.
///
/// 숫자, 경로, 16진수 식별자를 `{}` 자리표시자로 치환한 뒤 소문자로 변환하고
/// 공백을 정규화하여 해시합니다. 가변 토큰만 다른 메시지들은 같은 서명을
/// 얻습니다.
pub fn message_hash(message: &str) -> u64 {
    let replaced = VARIABLE_TOKENS.replace_all(message, "{}");
    let lowered = replaced.to_lowercase();
    let normalized = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut hasher = FxHasher::default();
    hasher.write(normalized.as_bytes());
    hasher.finish()
}

/// 메시지를 에러 카테고리로 분류합니다.
///
/// 카테고리 테이블을 우선순위 순으로 평가하며, 첫 번째 일치가 선택됩니다.
/// 어느 테이블에도 일치하지 않으면 `General`입니다.
pub fn classify(message: &str) -> ErrorCategory {
    let lower = message.to_lowercase();
    for (category, table) in CATEGORY_TABLE {
        if keywords::contains_any(&lower, table) {
            return *category;
        }
    }
    ErrorCategory::General
}

/// 심각도 점수를 계산합니다 (0..=100).
///
/// 레벨 기본 점수에 크리티컬 키워드당 10점을 가산하고 100점에서 포화합니다.
pub fn severity_score(level: &LogLevel, message: &str) -> u8 {
    let lower = message.to_lowercase();
    let mut score = level.base_score();
    for keyword in CRITICAL_KEYWORDS {
        if lower.contains(keyword) {
            score += 10;
        }
    }
    score.min(100) as u8
}

/// 사람이 읽기 쉬운 단순화 메시지를 생성합니다.
///
/// 소문자 변환 후 기술 문구를 평이한 표현으로 치환하고, 150자에서 잘라
/// 첫 글자를 대문자로 만듭니다.
pub fn simplify_message(message: &str) -> String {
    let mut simplified = message.to_lowercase();
    for (technical, plain) in SIMPLIFICATIONS {
        simplified = simplified.replace(technical, plain);
    }
    capitalize_first(&truncate_chars(&simplified, SIMPLIFIED_MAX_LEN))
}

/// 표준 레코드를 보강 레코드로 변환합니다.
pub fn enrich(record: CanonicalRecord) -> EnrichedRecord {
    let message_hash = message_hash(&record.message);
    let error_type = classify(&record.message);
    let severity_score = severity_score(&record.level, &record.message);
    let simplified_message = simplify_message(&record.message);

    EnrichedRecord {
        record,
        message_hash,
        error_type,
        severity_score,
        simplified_message,
    }
}
