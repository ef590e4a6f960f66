//! 로그 파서 — 정규화, 필터링, 보강 파이프라인
//!
//! [`LogParser`]는 리더가 수집한 원시 레코드 배치를 받아 세 단계를 순서대로
//! 적용합니다.
//!
//! 1. 정규화: 필수 필드 검증, 메시지 정제, 기본값 채우기
//! 2. 필터링: 정책 기반 보존/거부 판정
//! 3. 보강: 해시 서명, 카테고리, 심각도, 단순화 메시지 계산
//!
//! 파서는 레코드 단위로 실패하지 않습니다. 사용 불가 레코드는 폐기 수로만
//! 집계되며, 배치 전체는 항상 성공적으로 처리됩니다.

mod enrich;
mod filter;
mod normalize;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use logwarden_core::metrics::{
    LABEL_LEVEL, PARSER_RECORDS_DISCARDED_TOTAL, PARSER_RECORDS_IN_TOTAL,
    PARSER_RECORDS_KEPT_TOTAL, PARSER_RECORDS_REJECTED_TOTAL,
};
use logwarden_core::types::{EnrichedRecord, LogLevel, RawRecord};

use crate::config::FilterPolicy;
use crate::error::AnalysisError;
use crate::util::round2;

pub use enrich::{classify, enrich, message_hash, severity_score, simplify_message};
pub use filter::RecordFilter;
pub use normalize::{clean_message, normalize};

/// 필터링 결과 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterStats {
    /// 입력 레코드 수
    pub total_records: usize,
    /// 보존된 레코드 수
    pub kept_records: usize,
    /// 보존 비율 (%)
    pub kept_percentage: f64,
    /// 적용된 레벨 목록
    pub filter_levels: Vec<LogLevel>,
    /// 사용자 포함 키워드 수
    pub include_keyword_count: usize,
    /// 제외 키워드 수
    pub exclude_keyword_count: usize,
}

/// 로그 파서
///
/// 정책은 생성 시점에 검증되고 고정됩니다. `parse`는 불변 참조만 받으므로
/// 여러 소스의 배치를 같은 파서로 처리할 수 있습니다.
#[derive(Debug, Clone)]
pub struct LogParser {
    policy: FilterPolicy,
    filter: RecordFilter,
}

impl LogParser {
    /// 주어진 정책으로 파서를 생성합니다.
    ///
    /// # Errors
    /// 정책 검증에 실패하면 `AnalysisError::Policy`를 반환합니다.
    pub fn new(policy: FilterPolicy) -> Result<Self, AnalysisError> {
        policy.validate()?;
        let filter = RecordFilter::new(&policy);
        Ok(Self { policy, filter })
    }

    /// 적용 중인 필터 정책을 반환합니다.
    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    /// 원시 레코드 배치를 파싱합니다.
    ///
    /// 입력 순서는 출력에서 그대로 유지됩니다. 정규화 불가 레코드는 폐기,
    /// 필터에 걸린 레코드는 거부로 따로 집계됩니다.
    pub fn parse(&self, records: &[RawRecord]) -> Vec<EnrichedRecord> {
        counter!(PARSER_RECORDS_IN_TOTAL).increment(records.len() as u64);

        let mut discarded = 0usize;
        let mut rejected = 0usize;
        let mut kept = Vec::new();

        for raw in records {
            let Some(canonical) = normalize::normalize(raw) else {
                discarded += 1;
                continue;
            };

            if !self.filter.should_include(&canonical) {
                rejected += 1;
                debug!(
                    level = %canonical.level,
                    source = %canonical.source,
                    "record rejected by filter"
                );
                continue;
            }

            let enriched = enrich::enrich(canonical);
            counter!(
                PARSER_RECORDS_KEPT_TOTAL,
                LABEL_LEVEL => enriched.record.level.as_str().to_owned()
            )
            .increment(1);
            kept.push(enriched);
        }

        counter!(PARSER_RECORDS_DISCARDED_TOTAL).increment(discarded as u64);
        counter!(PARSER_RECORDS_REJECTED_TOTAL).increment(rejected as u64);

        info!(
            total = records.len(),
            kept = kept.len(),
            discarded,
            rejected,
            "parsed record batch"
        );

        kept
    }

    /// 필터링 결과 요약을 생성합니다.
    pub fn filter_stats(&self, total_records: usize, kept_records: usize) -> FilterStats {
        let kept_percentage = if total_records > 0 {
            round2(kept_records as f64 / total_records as f64 * 100.0)
        } else {
            0.0
        };

        FilterStats {
            total_records,
            kept_records,
            kept_percentage,
            filter_levels: self.policy.filter_levels.clone(),
            include_keyword_count: self.policy.include_keywords.len(),
            exclude_keyword_count: self.policy.exclude_keywords.len(),
        }
    }
}

impl Default for LogParser {
    fn default() -> Self {
        let policy = FilterPolicy::default();
        let filter = RecordFilter::new(&policy);
        Self { policy, filter }
    }
}
