//! # logwarden-analysis
//!
//! OS 로그 분석 파이프라인입니다. 리더가 수집한 원시 레코드를 정규화,
//! 필터링, 보강한 뒤 통계를 집계하고 JSON 리포트로 내보냅니다.
//!
//! ## 아키텍처
//!
//! ```text
//! RawRecord 배치
//!      │
//!      ▼
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │  normalize   │──▶│   filter    │──▶│   enrich    │   LogParser
//! └─────────────┘   └─────────────┘   └─────────────┘
//!                                            │
//!                                            ▼ Vec<EnrichedRecord>
//! ┌──────────────────────────────────────────────────┐
//! │  LogAnalyzer: 일반/레벨/시간대/소스/에러 통계,    │
//! │  추세 분석, 크리티컬 이벤트 감지                  │
//! └──────────────────────────────────────────────────┘
//!                                            │
//!                                            ▼ AnalysisResult
//!                                   ┌─────────────────┐
//!                                   │ JsonReportRenderer │
//!                                   └─────────────────┘
//! ```
//!
//! ## 사용 예시
//!
//! ```
//! use chrono::Utc;
//! use logwarden_analysis::analyzer::LogAnalyzer;
//! use logwarden_analysis::parser::LogParser;
//! use logwarden_core::types::RawRecord;
//!
//! let parser = LogParser::default();
//! let raw = vec![RawRecord {
//!     level: Some("ERROR".to_owned()),
//!     source: Some("nginx".to_owned()),
//!     ..RawRecord::new(Utc::now(), "connection timeout to upstream")
//! }];
//!
//! let enriched = parser.parse(&raw);
//! let mut analyzer = LogAnalyzer::new();
//! let result = analyzer.analyze(&enriched, 10).unwrap();
//! assert_eq!(result.general.total_records, 1);
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod keywords;
pub mod parser;
pub mod report;
pub mod util;

pub use analyzer::{
    AnalysisResult, CriticalEvent, CriticalEventKind, EventSeverity, LogAnalyzer, TrendAnalysis,
    TrendDirection,
};
pub use config::{FilterPolicy, FilterPolicyBuilder};
pub use error::AnalysisError;
pub use parser::{FilterStats, LogParser};
pub use report::{JsonReportRenderer, ReportRenderer, RunSummary};
