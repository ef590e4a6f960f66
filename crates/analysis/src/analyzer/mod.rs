//! 로그 분석기 — 보강 레코드 집계
//!
//! [`LogAnalyzer`]는 파서가 내놓은 보강 레코드 묶음에서 통계를 계산합니다.
//! 일반/레벨/시간대/소스/에러/카테고리 통계, 에러율 추세, 크리티컬 이벤트
//! 감지를 한 번의 `analyze` 호출로 수행합니다.
//!
//! 빈 입력은 에러가 아니라 빈 결과입니다. 분석 자체는 레코드 내용 때문에
//! 실패하지 않으며, 잘못된 호출 파라미터만 에러가 됩니다.

mod critical;
mod result;
mod trend;

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Timelike, Utc};
use metrics::counter;
use tracing::{info, warn};

use logwarden_core::metrics::{ANALYZER_CRITICAL_EVENTS_TOTAL, ANALYZER_RUNS_TOTAL};
use logwarden_core::types::{EnrichedRecord, ErrorCategory};

use crate::error::AnalysisError;
use crate::util::round2;

pub use critical::{find_critical_events, CriticalEvent, CriticalEventKind, EventSeverity};
pub use result::{
    AnalysisResult, DateRange, ErrorGroup, ErrorStats, ErrorTypeStats, GeneralStats, LevelBucket,
    LevelStats, SourceStats, TimeStats, TypeBucket,
};
pub use trend::{analyze_trend, TrendAnalysis, TrendDirection, TrendReport};

/// 상위 소스 목록의 크기
const TOP_SOURCES: usize = 10;

/// 상위 에러 소스 목록의 크기
const TOP_ERROR_SOURCES: usize = 5;

/// 피크 시간 목록의 크기
const PEAK_HOURS: usize = 5;

/// 피크 일 목록의 크기
const PEAK_DAYS: usize = 3;

/// 타임스탬프를 버킷 시작 시각으로 내림합니다.
pub(crate) fn bucket_start(ts: DateTime<Utc>, bucket_secs: i64) -> DateTime<Utc> {
    let secs = ts.timestamp();
    let start = secs - secs.rem_euclid(bucket_secs);
    DateTime::from_timestamp(start, 0).unwrap_or(ts)
}

/// 로그 분석기
///
/// 마지막 분석 결과를 보관하므로 리포트 단계에서 재계산 없이 재사용할 수
/// 있습니다.
#[derive(Debug, Default)]
pub struct LogAnalyzer {
    last_result: Option<AnalysisResult>,
}

impl LogAnalyzer {
    /// 새 분석기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막 분석 결과를 반환합니다.
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    /// 보강 레코드 묶음을 분석합니다.
    ///
    /// `top_n`은 에러 그룹 랭킹의 크기이며 0이면 에러입니다.
    ///
    /// # Errors
    /// `top_n == 0`이면 `AnalysisError::InvalidParameter`를 반환합니다.
    pub fn analyze(
        &mut self,
        records: &[EnrichedRecord],
        top_n: usize,
    ) -> Result<AnalysisResult, AnalysisError> {
        if top_n == 0 {
            return Err(AnalysisError::InvalidParameter {
                name: "top_n".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        counter!(ANALYZER_RUNS_TOTAL).increment(1);

        if records.is_empty() {
            warn!("no records to analyze, producing empty result");
            let result = AnalysisResult::empty();
            self.last_result = Some(result.clone());
            return Ok(result);
        }

        let critical_events = find_critical_events(records);
        counter!(ANALYZER_CRITICAL_EVENTS_TOTAL).increment(critical_events.len() as u64);

        let result = AnalysisResult {
            general: general_stats(records),
            levels: level_stats(records),
            time: time_stats(records),
            sources: source_stats(records),
            errors: error_stats(records, top_n),
            error_types: error_type_stats(records),
            trend: analyze_trend(records),
            critical_events,
            analyzed_at: Utc::now(),
        };

        info!(
            total = records.len(),
            unique_errors = result.errors.unique_error_patterns,
            critical_events = result.critical_events.len(),
            "analysis completed"
        );

        self.last_result = Some(result.clone());
        Ok(result)
    }
}

fn general_stats(records: &[EnrichedRecord]) -> GeneralStats {
    let start = records.iter().map(|r| r.record.timestamp).min();
    let end = records.iter().map(|r| r.record.timestamp).max();

    let date_range = match (start, end) {
        (Some(start), Some(end)) => Some(DateRange {
            start,
            end,
            duration_hours: round2((end - start).num_seconds() as f64 / 3600.0),
        }),
        _ => None,
    };

    let unique_sources: HashSet<&str> =
        records.iter().map(|r| r.record.source.as_str()).collect();
    let unique_hosts: HashSet<&str> = records
        .iter()
        .map(|r| r.record.hostname.as_deref().unwrap_or("unknown"))
        .collect();

    let severity_sum: u64 = records.iter().map(|r| u64::from(r.severity_score)).sum();

    GeneralStats {
        total_records: records.len(),
        date_range,
        unique_sources: unique_sources.len(),
        unique_hosts: unique_hosts.len(),
        average_severity: round2(severity_sum as f64 / records.len() as f64),
    }
}

fn level_stats(records: &[EnrichedRecord]) -> LevelStats {
    let total = records.len();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut error_count = 0usize;

    for record in records {
        *counts
            .entry(record.record.level.as_str().to_owned())
            .or_insert(0) += 1;
        if record.record.level.is_error() {
            error_count += 1;
        }
    }

    let most_common_level = counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(level, count)| (level.clone(), *count));

    let by_level = counts
        .into_iter()
        .map(|(level, count)| {
            let percentage = round2(count as f64 / total as f64 * 100.0);
            (level, LevelBucket { count, percentage })
        })
        .collect();

    LevelStats {
        by_level,
        most_common_level,
        error_ratio: round2(error_count as f64 / total as f64 * 100.0),
    }
}

fn time_stats(records: &[EnrichedRecord]) -> TimeStats {
    let mut hourly: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();
    let mut daily: BTreeMap<chrono::NaiveDate, usize> = BTreeMap::new();
    let mut hours_of_day: BTreeMap<u32, usize> = BTreeMap::new();

    for record in records {
        let ts = record.record.timestamp;
        *hourly.entry(bucket_start(ts, 3600)).or_insert(0) += 1;
        *daily.entry(ts.date_naive()).or_insert(0) += 1;
        *hours_of_day.entry(ts.hour()).or_insert(0) += 1;
    }

    let mut peak_hours: Vec<_> = hourly.iter().map(|(h, c)| (*h, *c)).collect();
    peak_hours.sort_by(|a, b| b.1.cmp(&a.1));
    peak_hours.truncate(PEAK_HOURS);

    let mut peak_days: Vec<_> = daily.iter().map(|(d, c)| (*d, *c)).collect();
    peak_days.sort_by(|a, b| b.1.cmp(&a.1));
    peak_days.truncate(PEAK_DAYS);

    // 동률이면 더 이른 시각이 선택됩니다.
    let busiest_hour_of_day = hours_of_day
        .iter()
        .fold(None::<(u32, usize)>, |best, (hour, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((*hour, *count)),
        });

    TimeStats {
        hourly_distribution: hourly,
        daily_distribution: daily,
        peak_hours,
        peak_days,
        hour_of_day_distribution: hours_of_day,
        busiest_hour_of_day,
    }
}

fn source_stats(records: &[EnrichedRecord]) -> SourceStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut error_counts: HashMap<&str, usize> = HashMap::new();

    for record in records {
        *counts.entry(record.record.source.as_str()).or_insert(0) += 1;
        if record.record.level.is_error() {
            *error_counts.entry(record.record.source.as_str()).or_insert(0) += 1;
        }
    }

    let total_unique_sources = counts.len();
    let sources_with_errors = error_counts.len();

    let rank = |map: HashMap<&str, usize>, limit: usize| {
        let mut ranked: Vec<(String, usize)> =
            map.into_iter().map(|(s, c)| (s.to_owned(), c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    };

    SourceStats {
        top_sources: rank(counts, TOP_SOURCES),
        top_error_sources: rank(error_counts, TOP_ERROR_SOURCES),
        total_unique_sources,
        sources_with_errors,
    }
}

fn error_stats(records: &[EnrichedRecord], top_n: usize) -> ErrorStats {
    let error_records: Vec<&EnrichedRecord> = records
        .iter()
        .filter(|r| r.record.level.is_error())
        .collect();

    // 그룹은 최초 관측 순서를 유지합니다. 랭킹의 동률 안정성이 여기에
    // 의존합니다.
    let mut order: Vec<u64> = Vec::new();
    let mut groups: HashMap<u64, Vec<&EnrichedRecord>> = HashMap::new();
    for &record in &error_records {
        groups
            .entry(record.message_hash)
            .or_insert_with(|| {
                order.push(record.message_hash);
                Vec::new()
            })
            .push(record);
    }

    let mut top_errors: Vec<ErrorGroup> = Vec::with_capacity(order.len());
    for hash in &order {
        let Some(members) = groups.get(hash) else {
            continue;
        };
        let Some(representative) = members.first() else {
            continue;
        };

        let first = members
            .iter()
            .map(|r| r.record.timestamp)
            .min()
            .unwrap_or(representative.record.timestamp);
        let last = members
            .iter()
            .map(|r| r.record.timestamp)
            .max()
            .unwrap_or(representative.record.timestamp);

        let hosts: HashSet<&str> = members
            .iter()
            .map(|r| r.record.hostname.as_deref().unwrap_or("unknown"))
            .collect();

        let span_hours = (last - first).num_seconds() as f64 / 3600.0;
        let frequency_per_hour = round2(members.len() as f64 / span_hours.max(1.0));

        top_errors.push(ErrorGroup {
            message: representative.record.message.clone(),
            simplified_message: representative.simplified_message.clone(),
            count: members.len(),
            level: representative.record.level.clone(),
            source: representative.record.source.clone(),
            error_type: representative.error_type,
            severity_score: representative.severity_score,
            first_occurrence: first,
            last_occurrence: last,
            affected_hosts: hosts.len(),
            frequency_per_hour,
        });
    }

    // count 내림차순, 동률은 심각도 내림차순. 안정 정렬이므로 남는 동률은
    // 최초 관측 순서입니다.
    top_errors.sort_by(|a, b| {
        (b.count, b.severity_score).cmp(&(a.count, a.severity_score))
    });

    let unique_error_patterns = top_errors.len();
    let most_frequent_error = top_errors.first().cloned();
    top_errors.truncate(top_n);

    ErrorStats {
        top_errors,
        total_errors: error_records.len(),
        unique_error_patterns,
        most_frequent_error,
    }
}

fn error_type_stats(records: &[EnrichedRecord]) -> ErrorTypeStats {
    let error_records: Vec<&EnrichedRecord> = records
        .iter()
        .filter(|r| r.record.level.is_error())
        .collect();

    let total = error_records.len();
    let mut counts: BTreeMap<ErrorCategory, usize> = BTreeMap::new();
    for record in &error_records {
        *counts.entry(record.error_type).or_insert(0) += 1;
    }

    let most_common_type = counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(category, count)| (*category, *count));

    let total_types = counts.len();
    let by_type = counts
        .into_iter()
        .map(|(category, count)| {
            let percentage = if total > 0 {
                round2(count as f64 / total as f64 * 100.0)
            } else {
                0.0
            };
            (category, TypeBucket { count, percentage })
        })
        .collect();

    ErrorTypeStats {
        by_type,
        most_common_type,
        total_types,
    }
}
