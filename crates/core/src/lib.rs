//! Logwarden 공통 크레이트 — 도메인 타입, 에러, 설정, 확장 포인트
//!
//! 시스템 로그 분석 파이프라인의 모든 크레이트가 공유하는 기반을 제공합니다.
//!
//! # 모듈 구성
//!
//! - [`types`]: 원시/정규화/보강 로그 레코드와 레벨, 에러 카테고리
//! - [`error`]: 최상위 에러 타입 및 도메인별 서브 에러
//! - [`config`]: `logwarden.toml` 파싱 및 환경변수 오버라이드
//! - [`pipeline`]: 외부 리더 확장 포인트 ([`LogReader`](pipeline::LogReader))
//! - [`metrics`]: 메트릭 이름 상수
//!
//! # 아키텍처
//!
//! ```text
//! LogReader (외부) -> RawRecord -> [logwarden-analysis] -> AnalysisResult -> 리포트 (외부)
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, LogwardenError, PipelineError};

// 설정
pub use config::{FilterConfig, GeneralConfig, LogwardenConfig};

// 파이프라인 trait
pub use pipeline::LogReader;

// 도메인 타입
pub use types::{
    CanonicalRecord, EnrichedRecord, ErrorCategory, LogLevel, RawRecord, RecordKind,
};
