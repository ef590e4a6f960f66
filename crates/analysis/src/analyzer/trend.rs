//! 에러율 추세 분석
//!
//! 분석 구간을 동일한 길이의 기간으로 나누고, 기간별 에러율의 전/후반
//! 평균을 비교해 추세를 판정합니다. 기간 길이는 최소 1시간이며, 구간이
//! 길어지면 최대 100개 기간이 되도록 늘어납니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use logwarden_core::types::EnrichedRecord;

use crate::util::round2;

/// 최소 기간 길이 (초)
const MIN_PERIOD_SECS: f64 = 3600.0;

/// 구간을 나누는 최대 기간 수
const MAX_PERIODS: f64 = 100.0;

/// 후반 평균이 전반 평균의 1.2배를 넘으면 증가 추세
const GROWTH_THRESHOLD: f64 = 1.2;

/// 후반 평균이 전반 평균의 0.8배에 못 미치면 감소 추세
const DECLINE_THRESHOLD: f64 = 0.8;

/// 추세 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// 에러율 증가
    Growing,
    /// 에러율 감소
    Declining,
    /// 큰 변화 없음
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Growing => write!(f, "growing"),
            Self::Declining => write!(f, "declining"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// 판정된 추세 상세
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// 추세 방향
    pub direction: TrendDirection,
    /// 비교에 사용된 기간 수
    pub periods_analyzed: usize,
    /// 전반부 평균 에러율 (%)
    pub first_half_error_rate: f64,
    /// 후반부 평균 에러율 (%)
    pub second_half_error_rate: f64,
}

/// 추세 분석 결과
///
/// 데이터가 부족하면 추세 대신 부족 사유가 결과가 됩니다. 이는 에러가
/// 아니라 정상적인 분석 결과의 한 형태입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendAnalysis {
    /// 레코드가 2건 미만이거나 구간이 1시간 미만
    InsufficientData,
    /// 유효 기간이 3개 미만
    InsufficientPeriods,
    /// 판정 완료
    Computed(TrendReport),
}

/// 에러율 추세를 분석합니다.
///
/// 레코드가 2건 미만이거나 구간이 1시간 미만이면 `InsufficientData`,
/// 레코드가 있는 기간이 3개 미만이면 `InsufficientPeriods`를 반환합니다.
pub fn analyze_trend(records: &[EnrichedRecord]) -> TrendAnalysis {
    if records.len() < 2 {
        return TrendAnalysis::InsufficientData;
    }

    let timestamps: Vec<i64> = records.iter().map(|r| r.record.timestamp.timestamp()).collect();
    let earliest = timestamps.iter().min().copied().unwrap_or(0);
    let latest = timestamps.iter().max().copied().unwrap_or(0);
    let span_secs = (latest - earliest) as f64;

    if span_secs < MIN_PERIOD_SECS {
        return TrendAnalysis::InsufficientData;
    }

    let period_secs = (span_secs / MAX_PERIODS).max(MIN_PERIOD_SECS);

    // 기간 인덱스 -> (전체 수, 에러 수). 레코드가 없는 기간은 생기지 않습니다.
    let mut periods: BTreeMap<i64, (usize, usize)> = BTreeMap::new();
    for record in records {
        let index = ((record.record.timestamp.timestamp() - earliest) as f64 / period_secs) as i64;
        let entry = periods.entry(index).or_insert((0, 0));
        entry.0 += 1;
        if record.record.level.is_error() {
            entry.1 += 1;
        }
    }

    if periods.len() < 3 {
        return TrendAnalysis::InsufficientPeriods;
    }

    let rates: Vec<f64> = periods
        .values()
        .map(|(total, errors)| *errors as f64 / (*total).max(1) as f64 * 100.0)
        .collect();

    let half = rates.len() / 2;
    let first_avg = rates[..half].iter().sum::<f64>() / half as f64;
    let second_avg = rates[half..].iter().sum::<f64>() / (rates.len() - half) as f64;

    let direction = if second_avg > first_avg * GROWTH_THRESHOLD {
        TrendDirection::Growing
    } else if second_avg < first_avg * DECLINE_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    TrendAnalysis::Computed(TrendReport {
        direction,
        periods_analyzed: rates.len(),
        first_half_error_rate: round2(first_avg),
        second_half_error_rate: round2(second_avg),
    })
}
