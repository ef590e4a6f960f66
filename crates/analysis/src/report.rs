//! 리포트 렌더링
//!
//! [`ReportRenderer`] 트레이트는 분석 결과를 파일로 내보내는 출력 형식의
//! 경계입니다. 기본 구현은 JSON이며, 다른 형식은 트레이트 구현 추가만으로
//! 붙일 수 있습니다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyzer::AnalysisResult;
use crate::error::AnalysisError;

/// 실행 요약 (리포트 머리말에 들어가는 수치)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// 리더가 수집한 원시 레코드 수
    pub total_records: usize,
    /// 파서를 통과한 레코드 수
    pub parsed_records: usize,
    /// 분석 대상 기간 (일)
    pub days_analyzed: u32,
}

/// 리포트 출력 형식 트레이트
pub trait ReportRenderer {
    /// 형식 이름 (로그 표기용)
    fn format_name(&self) -> &str;

    /// 분석 결과와 실행 요약을 지정 경로에 기록합니다.
    fn render(
        &self,
        result: &AnalysisResult,
        summary: &RunSummary,
        destination: &Path,
    ) -> Result<(), AnalysisError>;
}

/// JSON 리포트 렌더러
#[derive(Debug, Clone)]
pub struct JsonReportRenderer {
    pretty: bool,
}

impl JsonReportRenderer {
    /// 들여쓰기된 JSON을 기록하는 렌더러를 생성합니다.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// 들여쓰기 여부를 설정합니다.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    summary: &'a RunSummary,
    analysis: &'a AnalysisResult,
}

impl ReportRenderer for JsonReportRenderer {
    fn format_name(&self) -> &str {
        "json"
    }

    fn render(
        &self,
        result: &AnalysisResult,
        summary: &RunSummary,
        destination: &Path,
    ) -> Result<(), AnalysisError> {
        let document = ReportDocument {
            summary,
            analysis: result,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(|e| AnalysisError::Report(e.to_string()))?;

        fs::write(destination, json)?;

        info!(
            path = %destination.display(),
            format = self.format_name(),
            "report written"
        );
        Ok(())
    }
}
