//! Serializable response shapes

use super::pipeline::PipelineError;
use crate::analysis::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Successful analysis as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// "X.XX Hz"
    pub dominant_frequency: String,

    #[serde(rename = "is_close_to_432Hz")]
    pub is_close_to_432hz: bool,

    pub message: String,
}

impl From<&AnalysisResult> for AnalysisReport {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            dominant_frequency: result.formatted_frequency(),
            is_close_to_432hz: result.is_close_to_432hz,
            message: result.message.clone(),
        }
    }
}

/// Failed analysis as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub status: u16,
    pub detail: String,
}

impl From<&PipelineError> for ErrorReport {
    fn from(error: &PipelineError) -> Self {
        Self {
            status: error.status_code(),
            detail: error.public_detail(),
        }
    }
}

/// Either report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Ok(AnalysisReport),
    Err(ErrorReport),
}

impl From<&Result<AnalysisResult, PipelineError>> for Outcome {
    fn from(result: &Result<AnalysisResult, PipelineError>) -> Self {
        match result {
            Ok(r) => Outcome::Ok(r.into()),
            Err(e) => Outcome::Err(e.into()),
        }
    }
}

/// Per-file entry for batch output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            dominant_frequency: 431.996,
            is_close_to_432hz: true,
            message: "The dominant frequency is 432.00 Hz, close to 432Hz.".into(),
        }
    }

    #[test]
    fn test_report_wire_shape() {
        let report = AnalysisReport::from(&sample_result());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dominant_frequency"], "432.00 Hz");
        assert_eq!(json["is_close_to_432Hz"], true);
        assert_eq!(
            json["message"],
            "The dominant frequency is 432.00 Hz, close to 432Hz."
        );
    }

    #[test]
    fn test_error_report_hides_internals() {
        let err = PipelineError::Analysis(AnalysisError::Internal("secret path /srv/x".into()));
        let report = ErrorReport::from(&err);
        assert_eq!(report.status, 500);
        assert!(!report.detail.contains("/srv/x"));
    }

    #[test]
    fn test_file_report_flattens_outcome() {
        let ok: Result<AnalysisResult, PipelineError> = Ok(sample_result());
        let entry = FileReport {
            file: "tone.wav".into(),
            outcome: Outcome::from(&ok),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["file"], "tone.wav");
        assert_eq!(json["dominant_frequency"], "432.00 Hz");

        let err: Result<AnalysisResult, PipelineError> = Err(PipelineError::Analysis(
            AnalysisError::UnsupportedFormat("probe".into()),
        ));
        let failed = FileReport {
            file: "notes.txt".into(),
            outcome: Outcome::from(&err),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["detail"], "Invalid audio file or unsupported format");
    }
}
