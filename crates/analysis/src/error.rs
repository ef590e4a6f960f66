//! 분석 파이프라인 에러 타입
//!
//! [`AnalysisError`]는 파서/분석기 구성과 호출에서 발생하는 에러를 표현합니다.
//! `From<AnalysisError> for LogwardenError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.
//!
//! 파이프라인은 개별 레코드 때문에 실패하지 않습니다. 사용 불가 레코드는
//! 조용히 건너뛰며, 구조적으로 잘못된 설정만이 에러가 됩니다.

use logwarden_core::error::{LogwardenError, PipelineError};

/// 분석 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// 필터 정책 구성 에러
    #[error("policy error: {field}: {reason}")]
    Policy {
        /// 문제가 된 정책 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 유효하지 않은 호출 파라미터 (예: top_n == 0)
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// 파라미터명
        name: String,
        /// 에러 사유
        reason: String,
    },

    /// 리포트 직렬화/기록 실패
    #[error("report error: {0}")]
    Report(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AnalysisError> for LogwardenError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidParameter { name, reason } => {
                LogwardenError::Pipeline(PipelineError::InvalidParameter { name, reason })
            }
            other => LogwardenError::Pipeline(PipelineError::Failed(other.to_string())),
        }
    }
}
