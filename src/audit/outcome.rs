//! Audit results as seen by callers.

use serde::{Deserialize, Serialize};

use crate::model::WordBreakdownEntry;

use super::error::AuditError;

/// Structured answer from the model service.
///
/// Both fields are required when deserializing; a response missing either
/// one is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub feedback: String,
    pub word_breakdown: Vec<WordBreakdownEntry>,
}

/// What one audit call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    /// Critique plus alignment table.
    Structured(AnalysisResult),
    /// Human-readable explanation of why no structured result exists.
    Message(String),
}

impl AuditOutcome {
    pub fn is_structured(&self) -> bool {
        matches!(self, AuditOutcome::Structured(_))
    }

    /// Feedback text regardless of variant.
    pub fn feedback(&self) -> &str {
        match self {
            AuditOutcome::Structured(result) => &result.feedback,
            AuditOutcome::Message(message) => message,
        }
    }
}

impl From<AuditError> for AuditOutcome {
    fn from(err: AuditError) -> Self {
        AuditOutcome::Message(err.to_string())
    }
}

impl From<Result<AnalysisResult, AuditError>> for AuditOutcome {
    fn from(result: Result<AnalysisResult, AuditError>) -> Self {
        match result {
            Ok(analysis) => AuditOutcome::Structured(analysis),
            Err(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_becomes_message_with_fixed_text() {
        let outcome = AuditOutcome::from(AuditError::IncompleteInput);
        assert_eq!(
            outcome,
            AuditOutcome::Message("Please provide both source and target text for analysis.".into())
        );
        assert!(!outcome.is_structured());
    }

    #[test]
    fn feedback_reads_either_variant() {
        let structured = AuditOutcome::Structured(AnalysisResult {
            feedback: "- Accurate.".into(),
            word_breakdown: Vec::new(),
        });
        assert_eq!(structured.feedback(), "- Accurate.");
        assert_eq!(AuditOutcome::Message("nope".into()).feedback(), "nope");
    }

    #[test]
    fn analysis_result_rejects_missing_breakdown() {
        let parsed: Result<AnalysisResult, _> = serde_json::from_str(r#"{"feedback":"ok"}"#);
        assert!(parsed.is_err());
    }
}
