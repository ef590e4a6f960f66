//! 도메인 타입 — 파이프라인 전역에서 사용되는 로그 레코드 타입
//!
//! 레코드는 세 단계를 거칩니다:
//! [`RawRecord`] (리더가 생산) -> [`CanonicalRecord`] (정규화) -> [`EnrichedRecord`] (분류/보강).
//! 각 단계의 레코드는 생성 이후 변경되지 않습니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 로그 레벨
///
/// 정규화 단계에서 원본 레벨 문자열을 대문자로 변환하여 파싱합니다.
/// 인식되지 않는 레벨은 [`LogLevel::Unknown`]으로 원문 그대로 보존되며
/// 이후 단계에서 알 수 없는 심각도로 취급됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    /// 치명적 — 즉시 대응 필요
    Critical,
    /// 에러
    Error,
    /// 경고
    Warning,
    /// 정보성 이벤트
    Info,
    /// 디버그
    Debug,
    /// 인식되지 않은 레벨 (대문자 변환된 원문 보존)
    Unknown(String),
}

impl LogLevel {
    /// 레벨 문자열을 파싱합니다.
    ///
    /// 대소문자를 구분하지 않으며, 인식되지 않는 문자열은
    /// 대문자 변환 후 `Unknown`으로 통과시킵니다. 실패 경로가 없습니다.
    pub fn parse(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "CRITICAL" => Self::Critical,
            "ERROR" => Self::Error,
            "WARNING" => Self::Warning,
            "INFO" => Self::Info,
            "DEBUG" => Self::Debug,
            _ => Self::Unknown(upper),
        }
    }

    /// 레벨의 문자열 표현을 반환합니다.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Unknown(s) => s,
        }
    }

    /// 레벨별 기본 심각도 점수를 반환합니다.
    ///
    /// 인식되지 않는 레벨은 INFO와 동일한 20점으로 취급합니다.
    pub fn base_score(&self) -> u32 {
        match self {
            Self::Critical => 90,
            Self::Error => 70,
            Self::Warning => 40,
            Self::Info => 20,
            Self::Debug => 10,
            Self::Unknown(_) => 20,
        }
    }

    /// ERROR 또는 CRITICAL 레벨인지 확인합니다.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Critical | Self::Error)
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_owned()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 레코드 소스 종류
///
/// 리더 구현의 능력 차이를 나타내는 variant 태그입니다.
/// 구조화 이벤트 로그(Windows Event Log, journald)와
/// 줄 단위 텍스트 로그 파일을 구분합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// 구조화 이벤트 레코드 (이벤트 ID, 카테고리 등 메타데이터 포함)
    StructuredEvent,
    /// 줄 단위 텍스트 레코드
    #[default]
    TextLine,
}

/// 원시 로그 레코드
///
/// 외부 리더가 생산하는 소스 의존적, 느슨한 형태의 레코드입니다.
/// 타임스탬프와 메시지를 제외한 모든 필드는 소스에 따라 없을 수 있으며,
/// 파이프라인에 전달된 이후에는 읽기 전용입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// 레코드 발생 시각 (없으면 정규화 단계에서 폐기)
    pub timestamp: Option<DateTime<Utc>>,
    /// 선언된 레벨 문자열 (없으면 INFO로 기본 처리)
    pub level: Option<String>,
    /// 레코드를 생산한 프로그램/프로바이더명
    pub source: Option<String>,
    /// 로그 메시지 (비어 있으면 정규화 단계에서 폐기)
    pub message: Option<String>,
    /// 프로세스 ID
    pub pid: Option<u32>,
    /// 호스트명
    pub hostname: Option<String>,
    /// 사용자명
    pub user: Option<String>,
    /// 이벤트 식별자 (구조화 이벤트 로그)
    pub event_id: Option<u32>,
    /// 소스측 카테고리
    pub category: Option<String>,
    /// 읽어온 로그 저장소 이름 (파일명, "journald" 등)
    pub log_source: Option<String>,
    /// systemd 유닛명
    pub unit: Option<String>,
    /// 컴퓨터/호스트 이름 (Windows Event Log)
    pub computer: Option<String>,
    /// 소스 종류
    pub kind: RecordKind,
    /// 소스 고유 페이로드 (불투명 슬롯)
    pub raw_data: Option<serde_json::Value>,
}

impl RawRecord {
    /// 필수 필드만 채운 레코드를 생성합니다. 나머지 필드는 기본값입니다.
    pub fn new(timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp),
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// 정규화된 로그 레코드
///
/// 소스 독립적인 표준 형태입니다. 타임스탬프와 비어 있지 않은
/// 정제된 메시지가 항상 보장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// 레코드 발생 시각
    pub timestamp: DateTime<Utc>,
    /// 로그 레벨
    pub level: LogLevel,
    /// 레코드를 생산한 프로그램/프로바이더명 (기본값 "Unknown")
    pub source: String,
    /// 정제된 메시지 (비어 있지 않음)
    pub message: String,
    /// 정제 전 원본 메시지
    pub original_message: String,
    /// 프로세스 ID
    pub pid: Option<u32>,
    /// 호스트명
    pub hostname: Option<String>,
    /// 사용자명
    pub user: Option<String>,
    /// 이벤트 식별자
    pub event_id: Option<u32>,
    /// 소스측 카테고리
    pub category: Option<String>,
    /// 읽어온 로그 저장소 이름 (기본값 "Unknown")
    pub log_source: String,
    /// systemd 유닛명
    pub unit: Option<String>,
    /// 컴퓨터/호스트 이름
    pub computer: Option<String>,
    /// 소스 고유 페이로드
    pub raw_data: Option<serde_json::Value>,
}

impl fmt::Display for CanonicalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.source, self.message)
    }
}

/// 에러 카테고리
///
/// 메시지 키워드 기반 분류 결과입니다. 우선순위가 높은 카테고리부터
/// 고정 순서로 평가되며, 어느 것에도 해당하지 않으면 `General`입니다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ErrorCategory {
    /// 네트워크 관련 (connection, timeout, dns 등)
    Network,
    /// 파일시스템 관련 (file, disk, permission 등)
    Filesystem,
    /// 인증 관련 (auth, login, denied 등)
    Authentication,
    /// 애플리케이션 관련 (service, process, crash 등)
    Application,
    /// 시스템 관련 (kernel, driver, hardware 등)
    System,
    /// 분류되지 않은 일반 에러
    #[default]
    General,
}

impl ErrorCategory {
    /// 리포트에 표시되는 사람용 레이블을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "Network error",
            Self::Filesystem => "Filesystem error",
            Self::Authentication => "Authentication error",
            Self::Application => "Application error",
            Self::System => "System error",
            Self::General => "General error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 보강된 로그 레코드
///
/// 정규화 레코드에 그룹핑 해시, 에러 카테고리, 심각도 점수,
/// 단순화 메시지를 더한 최종 형태입니다. 생성 이후 변경되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// 정규화된 레코드
    pub record: CanonicalRecord,
    /// 재발 에러 그룹핑용 안정 해시 (변수 토큰 제거 후 FxHash64)
    pub message_hash: u64,
    /// 에러 카테고리
    pub error_type: ErrorCategory,
    /// 심각도 점수 (0-100)
    pub severity_score: u8,
    /// 비기술 사용자를 위한 단순화 메시지
    pub simplified_message: String,
}

impl fmt::Display for EnrichedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (type={}, severity={})",
            self.record, self.error_type, self.severity_score,
        )
    }
}
