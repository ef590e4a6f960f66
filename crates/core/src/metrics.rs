//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름을 중앙에서 정의합니다. 각 모듈은 이 상수를 사용하여
//! `metrics::counter!()` 매크로를 호출합니다. 익스포터는 이 크레이트의
//! 범위 밖이며, 소비자가 원하는 recorder를 설치합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `logwarden_`
//! - 모듈명: `parser_`, `analyzer_`
//! - 접미어: `_total` (counter)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 로그 레벨 레이블 키 (critical, error, warning, ...)
pub const LABEL_LEVEL: &str = "level";

/// 에러 카테고리 레이블 키
pub const LABEL_ERROR_TYPE: &str = "error_type";

// ─── Parser 메트릭 ─────────────────────────────────────────────────

/// Parser: 입력된 원시 레코드 수 (counter)
pub const PARSER_RECORDS_IN_TOTAL: &str = "logwarden_parser_records_in_total";

/// Parser: 타임스탬프/메시지 결손으로 폐기된 레코드 수 (counter)
pub const PARSER_RECORDS_DISCARDED_TOTAL: &str = "logwarden_parser_records_discarded_total";

/// Parser: 필터 정책에 의해 제외된 레코드 수 (counter)
pub const PARSER_RECORDS_REJECTED_TOTAL: &str = "logwarden_parser_records_rejected_total";

/// Parser: 보강되어 유지된 레코드 수 (counter)
pub const PARSER_RECORDS_KEPT_TOTAL: &str = "logwarden_parser_records_kept_total";

// ─── Analyzer 메트릭 ───────────────────────────────────────────────

/// Analyzer: 실행된 분석 횟수 (counter)
pub const ANALYZER_RUNS_TOTAL: &str = "logwarden_analyzer_runs_total";

/// Analyzer: 탐지된 크리티컬 이벤트 수 (counter)
pub const ANALYZER_CRITICAL_EVENTS_TOTAL: &str = "logwarden_analyzer_critical_events_total";
