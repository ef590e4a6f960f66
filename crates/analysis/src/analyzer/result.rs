//! 분석 결과 타입
//!
//! [`AnalysisResult`]는 한 번의 분석 실행이 내놓는 전체 통계 묶음입니다.
//! 모든 타입이 `Serialize`를 구현하므로 리포트 렌더러가 그대로 직렬화할 수
//! 있습니다. 분포 맵은 결정적 순회를 위해 `BTreeMap`을 사용합니다.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use logwarden_core::types::{ErrorCategory, LogLevel};

use super::critical::CriticalEvent;
use super::trend::TrendAnalysis;

/// 분석 구간
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    /// 가장 이른 레코드 시각
    pub start: DateTime<Utc>,
    /// 가장 늦은 레코드 시각
    pub end: DateTime<Utc>,
    /// 구간 길이 (시간)
    pub duration_hours: f64,
}

/// 일반 통계
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralStats {
    /// 분석된 레코드 수
    pub total_records: usize,
    /// 분석 구간 (레코드가 없으면 None)
    pub date_range: Option<DateRange>,
    /// 고유 소스 수
    pub unique_sources: usize,
    /// 고유 호스트 수 (호스트명이 없는 레코드는 "unknown"으로 집계)
    pub unique_hosts: usize,
    /// 평균 심각도 점수
    pub average_severity: f64,
}

/// 레벨별 집계 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelBucket {
    /// 레코드 수
    pub count: usize,
    /// 전체 대비 비율 (%)
    pub percentage: f64,
}

/// 레벨 분포 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    /// 레벨명 -> 집계
    pub by_level: BTreeMap<String, LevelBucket>,
    /// 최다 레벨과 그 수
    pub most_common_level: Option<(String, usize)>,
    /// ERROR/CRITICAL 레코드 비율 (%)
    pub error_ratio: f64,
}

/// 시간대 분포 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    /// 달력 시(hour) 버킷별 레코드 수
    pub hourly_distribution: BTreeMap<DateTime<Utc>, usize>,
    /// 달력 일(day) 버킷별 레코드 수
    pub daily_distribution: BTreeMap<NaiveDate, usize>,
    /// 상위 5개 피크 시간
    pub peak_hours: Vec<(DateTime<Utc>, usize)>,
    /// 상위 3개 피크 일
    pub peak_days: Vec<(NaiveDate, usize)>,
    /// 하루 중 시각(0~23)별 레코드 수
    pub hour_of_day_distribution: BTreeMap<u32, usize>,
    /// 가장 붐비는 하루 중 시각
    pub busiest_hour_of_day: Option<(u32, usize)>,
}

/// 소스 분포 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceStats {
    /// 상위 10개 소스
    pub top_sources: Vec<(String, usize)>,
    /// 에러 레코드 기준 상위 5개 소스
    pub top_error_sources: Vec<(String, usize)>,
    /// 고유 소스 수
    pub total_unique_sources: usize,
    /// 에러를 낸 소스 수
    pub sources_with_errors: usize,
}

/// 에러 그룹 (같은 해시 서명을 공유하는 레코드들)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorGroup {
    /// 대표 메시지 (그룹에서 처음 관측된 레코드)
    pub message: String,
    /// 대표 단순화 메시지
    pub simplified_message: String,
    /// 그룹 내 레코드 수
    pub count: usize,
    /// 대표 레벨
    pub level: LogLevel,
    /// 대표 소스
    pub source: String,
    /// 에러 카테고리
    pub error_type: ErrorCategory,
    /// 대표 심각도 점수
    pub severity_score: u8,
    /// 최초 발생 시각
    pub first_occurrence: DateTime<Utc>,
    /// 최종 발생 시각
    pub last_occurrence: DateTime<Utc>,
    /// 영향을 받은 호스트 수
    pub affected_hosts: usize,
    /// 시간당 발생 빈도
    pub frequency_per_hour: f64,
}

/// 에러 그룹 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    /// 랭킹 상위 에러 그룹 (count 내림차순, 동률은 심각도 내림차순)
    pub top_errors: Vec<ErrorGroup>,
    /// 전체 에러 레코드 수
    pub total_errors: usize,
    /// 고유 에러 패턴 수
    pub unique_error_patterns: usize,
    /// 최다 발생 에러 그룹
    pub most_frequent_error: Option<ErrorGroup>,
}

/// 카테고리별 집계 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeBucket {
    /// 레코드 수
    pub count: usize,
    /// 에러 전체 대비 비율 (%)
    pub percentage: f64,
}

/// 에러 카테고리 분포 통계
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorTypeStats {
    /// 카테고리 -> 집계
    pub by_type: BTreeMap<ErrorCategory, TypeBucket>,
    /// 최다 카테고리와 그 수
    pub most_common_type: Option<(ErrorCategory, usize)>,
    /// 관측된 카테고리 수
    pub total_types: usize,
}

/// 한 번의 분석 실행 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 일반 통계
    pub general: GeneralStats,
    /// 레벨 분포
    pub levels: LevelStats,
    /// 시간대 분포
    pub time: TimeStats,
    /// 소스 분포
    pub sources: SourceStats,
    /// 에러 그룹 랭킹
    pub errors: ErrorStats,
    /// 에러 카테고리 분포
    pub error_types: ErrorTypeStats,
    /// 에러율 추세
    pub trend: TrendAnalysis,
    /// 크리티컬 이벤트 목록 (최신순, 최대 20건)
    pub critical_events: Vec<CriticalEvent>,
    /// 분석 수행 시각
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// 빈 입력에 대한 결과를 생성합니다.
    ///
    /// 에러가 아닌 정상 결과이며, 모든 통계가 0이고 추세는 데이터 부족으로
    /// 표시됩니다.
    pub fn empty() -> Self {
        Self {
            general: GeneralStats {
                total_records: 0,
                date_range: None,
                unique_sources: 0,
                unique_hosts: 0,
                average_severity: 0.0,
            },
            levels: LevelStats::default(),
            time: TimeStats::default(),
            sources: SourceStats::default(),
            errors: ErrorStats::default(),
            error_types: ErrorTypeStats::default(),
            trend: TrendAnalysis::InsufficientData,
            critical_events: Vec::new(),
            analyzed_at: Utc::now(),
        }
    }

    /// 레코드가 하나도 분석되지 않았는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.general.total_records == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_empty() {
        let result = AnalysisResult::empty();
        assert!(result.is_empty());
        assert!(result.general.date_range.is_none());
        assert_eq!(result.trend, TrendAnalysis::InsufficientData);
        assert!(result.critical_events.is_empty());
    }

    #[test]
    fn result_serializes_to_json() {
        let result = AnalysisResult::empty();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"total_records\":0"));
        assert!(json.contains("insufficient_data"));
    }
}
