//! 크리티컬 이벤트 감지
//!
//! 두 종류의 이벤트를 감지합니다.
//!
//! - CRITICAL 레벨 레코드 각각 (심각도 high)
//! - 같은 1분 버킷에 에러가 10건 이상 몰린 버스트 (심각도 medium)
//!
//! 결과는 최신순으로 정렬되며 최대 20건으로 제한됩니다.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use logwarden_core::types::{EnrichedRecord, LogLevel};

use crate::util::truncate_chars;

/// 1분 버킷에서 버스트로 판정하는 최소 에러 수
const BURST_THRESHOLD: usize = 10;

/// 반환되는 이벤트의 최대 수
const MAX_EVENTS: usize = 20;

/// 이벤트 설명에 넣는 단순화 메시지의 최대 길이
const DESCRIPTION_MESSAGE_LEN: usize = 100;

/// 크리티컬 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalEventKind {
    /// CRITICAL 레벨 단일 레코드
    CriticalError,
    /// 1분 내 고빈도 에러 버스트
    HighFrequencyErrors,
}

/// 이벤트 심각도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    /// 즉시 확인 필요
    High,
    /// 주의 필요
    Medium,
}

/// 감지된 크리티컬 이벤트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalEvent {
    /// 이벤트 종류
    pub kind: CriticalEventKind,
    /// 발생 시각 (버스트는 버킷 시작 시각)
    pub timestamp: DateTime<Utc>,
    /// 사람이 읽는 설명
    pub description: String,
    /// 심각도
    pub severity: EventSeverity,
    /// 발생 소스 (버스트는 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// 버스트 내 에러 수 (단일 레코드는 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// 크리티컬 이벤트를 감지합니다.
pub fn find_critical_events(records: &[EnrichedRecord]) -> Vec<CriticalEvent> {
    let mut events = Vec::new();

    for record in records {
        if record.record.level == LogLevel::Critical {
            events.push(CriticalEvent {
                kind: CriticalEventKind::CriticalError,
                timestamp: record.record.timestamp,
                description: format!(
                    "Critical error in {}: {}",
                    record.record.source,
                    truncate_chars(&record.simplified_message, DESCRIPTION_MESSAGE_LEN)
                ),
                severity: EventSeverity::High,
                source: Some(record.record.source.clone()),
                count: None,
            });
        }
    }

    // 1분 버킷별 에러 수
    let mut minute_buckets: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();
    for record in records {
        if record.record.level.is_error() {
            let bucket = super::bucket_start(record.record.timestamp, 60);
            *minute_buckets.entry(bucket).or_insert(0) += 1;
        }
    }

    for (bucket, count) in minute_buckets {
        if count >= BURST_THRESHOLD {
            events.push(CriticalEvent {
                kind: CriticalEventKind::HighFrequencyErrors,
                timestamp: bucket,
                description: format!("High-frequency errors: {count} errors within one minute"),
                severity: EventSeverity::Medium,
                source: None,
                count: Some(count),
            });
        }
    }

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events.truncate(MAX_EVENTS);
    events
}
