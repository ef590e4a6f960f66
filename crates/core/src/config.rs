//! 설정 관리 — logwarden.toml 파싱 및 런타임 설정
//!
//! [`LogwardenConfig`]는 분석 실행의 모든 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`LOGWARDEN_GENERAL_DAYS=14` 형식)
//! 2. 설정 파일 (`logwarden.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), logwarden_core::error::LogwardenError> {
//! use logwarden_core::config::LogwardenConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LogwardenConfig::load("logwarden.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LogwardenConfig::parse("[general]\ndays = 14")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LogwardenError};

/// Logwarden 통합 설정
///
/// `logwarden.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogwardenConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 필터 설정
    #[serde(default)]
    pub filter: FilterConfig,
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 분석 대상 기간 (일)
    pub days: u32,
    /// 리포트에 표시할 최다 발생 에러 그룹 수
    pub top_n: usize,
    /// 리포트 출력 경로
    pub output: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            days: 7,
            top_n: 10,
            output: "system_log_report.json".to_owned(),
        }
    }
}

/// 필터 설정
///
/// 분석 크레이트의 `FilterPolicy`는 이 섹션에서 파생됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// 포함할 로그 레벨 목록
    pub levels: Vec<String>,
    /// 사용자 추가 포함 키워드 (내장 에러/경고 키워드에 병합됨)
    pub include_keywords: Vec<String>,
    /// 제외 키워드 (항상 우선)
    pub exclude_keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            levels: vec![
                "ERROR".to_owned(),
                "CRITICAL".to_owned(),
                "WARNING".to_owned(),
            ],
            include_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
        }
    }
}

impl LogwardenConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LogwardenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogwardenError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LogwardenError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LogwardenError> {
        toml::from_str(toml_str).map_err(|e| {
            LogwardenError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGWARDEN_{SECTION}_{FIELD}`
    /// 예: `LOGWARDEN_GENERAL_DAYS=14`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "LOGWARDEN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.output, "LOGWARDEN_GENERAL_OUTPUT");
        override_parse(&mut self.general.days, "LOGWARDEN_GENERAL_DAYS");
        override_parse(&mut self.general.top_n, "LOGWARDEN_GENERAL_TOP_N");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogwardenError> {
        const MAX_DAYS: u32 = 365;
        const MAX_TOP_N: usize = 1000;

        if self.general.days == 0 || self.general.days > MAX_DAYS {
            return Err(invalid("general.days", format!("must be 1-{MAX_DAYS}")));
        }

        if self.general.top_n == 0 || self.general.top_n > MAX_TOP_N {
            return Err(invalid("general.top_n", format!("must be 1-{MAX_TOP_N}")));
        }

        if self.general.output.trim().is_empty() {
            return Err(invalid("general.output", "must not be empty".to_owned()));
        }

        for level in &self.filter.levels {
            if level.trim().is_empty() {
                return Err(invalid(
                    "filter.levels",
                    "level entries must not be empty".to_owned(),
                ));
            }
        }

        // 빈 키워드는 모든 메시지에 부분 일치하므로 거부
        for keyword in self
            .filter
            .include_keywords
            .iter()
            .chain(&self.filter.exclude_keywords)
        {
            if keyword.trim().is_empty() {
                return Err(invalid(
                    "filter.include_keywords",
                    "keywords must not be empty".to_owned(),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> LogwardenError {
    LogwardenError::Config(ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    })
}

/// 환경변수 값으로 문자열 필드를 오버라이드합니다.
fn override_string(target: &mut String, env_key: &str) {
    if let Ok(value) = std::env::var(env_key)
        && !value.is_empty()
    {
        *target = value;
    }
}

/// 환경변수 값을 파싱하여 숫자 필드를 오버라이드합니다.
///
/// 파싱에 실패하면 경고를 남기고 기존 값을 유지합니다.
fn override_parse<T: std::str::FromStr>(target: &mut T, env_key: &str) {
    if let Ok(value) = std::env::var(env_key)
        && !value.is_empty()
    {
        match value.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(env_key, value, "ignoring unparsable env override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = LogwardenConfig::default();
        config.validate().unwrap();
        assert_eq!(config.general.days, 7);
        assert_eq!(config.general.top_n, 10);
        assert_eq!(config.filter.levels.len(), 3);
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let config = LogwardenConfig::parse("[general]\ndays = 14").unwrap();
        assert_eq!(config.general.days, 14);
        assert_eq!(config.general.top_n, 10);
        assert!(config.filter.exclude_keywords.is_empty());
    }

    #[test]
    fn parse_filter_section() {
        let toml_str = r#"
            [filter]
            levels = ["ERROR", "CRITICAL"]
            include_keywords = ["oom"]
            exclude_keywords = ["healthcheck"]
        "#;
        let config = LogwardenConfig::parse(toml_str).unwrap();
        assert_eq!(config.filter.levels, vec!["ERROR", "CRITICAL"]);
        assert_eq!(config.filter.include_keywords, vec!["oom"]);
        assert_eq!(config.filter.exclude_keywords, vec!["healthcheck"]);
    }

    #[test]
    fn parse_invalid_toml_fails() {
        assert!(LogwardenConfig::parse("not valid [ toml").is_err());
    }

    #[test]
    fn validate_rejects_zero_days() {
        let mut config = LogwardenConfig::default();
        config.general.days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_top_n() {
        let mut config = LogwardenConfig::default();
        config.general.top_n = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_keyword() {
        let mut config = LogwardenConfig::default();
        config.filter.exclude_keywords.push("  ".to_owned());
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_file_missing_path_is_not_found() {
        let result = LogwardenConfig::from_file("/nonexistent/logwarden.toml");
        assert!(matches!(
            result,
            Err(LogwardenError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\ndays = 3\ntop_n = 5").unwrap();
        let config = LogwardenConfig::from_file(file.path()).unwrap();
        assert_eq!(config.general.days, 3);
        assert_eq!(config.general.top_n, 5);
    }
}
