//! 파이프라인 trait — 외부 리더 확장 포인트 정의

use chrono::{DateTime, Utc};

use crate::error::LogwardenError;
use crate::types::RawRecord;

/// 로그 리더 trait
///
/// 플랫폼별 로그 소스(Windows Event Log, syslog 파일, journald 등)를
/// 지원하려면 이 trait을 구현합니다. 리더는 시간 범위 내의 원시 레코드를
/// 유한 배치로 반환하며, 디코딩 불가 바이트나 파싱 불가 타임스탬프 같은
/// 소스 결함은 리더 내부에서 처리하고 코어로 전파하지 않습니다.
pub trait LogReader: Send + Sync {
    /// 리더가 다루는 소스 이름 (예: "windows-event-log", "syslog-file")
    fn source_name(&self) -> &str;

    /// 시간 범위 내의 원시 레코드를 수집합니다.
    fn read(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawRecord>, LogwardenError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedReader {
        records: Vec<RawRecord>,
    }

    impl LogReader for FixedReader {
        fn source_name(&self) -> &str {
            "fixed"
        }

        fn read(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<RawRecord>, LogwardenError> {
            Ok(self
                .records
                .iter()
                .filter(|r| {
                    r.timestamp
                        .map(|ts| start <= ts && ts <= end)
                        .unwrap_or(false)
                })
                .cloned()
                .collect())
        }
    }

    #[test]
    fn reader_filters_by_time_range() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let reader = FixedReader {
            records: vec![
                RawRecord::new(t0, "inside range"),
                RawRecord::new(t0 + chrono::Duration::days(3), "outside range"),
            ],
        };
        let records = reader
            .read(t0 - chrono::Duration::hours(1), t0 + chrono::Duration::hours(1))
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message.as_deref(), Some("inside range"));
    }
}
