//! The audit client: preconditions, one service call, response parsing and
//! failure classification.
//!
//! [`AuditClient::perform_audit`] never fails: every error is converted into
//! an [`AuditOutcome::Message`] before it returns.  The client holds no
//! mutable state, so identical calls against a deterministic service yield
//! identical outcomes.

use std::sync::Arc;

use super::credentials::Credentials;
use super::error::{classify_failure, AuditError};
use super::outcome::{AnalysisResult, AuditOutcome};
use super::service::{AuditRequest, ModelService};

/// Runs translation audits against a [`ModelService`].
#[derive(Clone)]
pub struct AuditClient {
    service: Arc<dyn ModelService>,
    credentials: Credentials,
}

impl AuditClient {
    pub fn new(service: Arc<dyn ModelService>, credentials: Credentials) -> Self {
        Self {
            service,
            credentials,
        }
    }

    /// Audit `target_text` as a `target_language` rendering of
    /// `source_text`.
    ///
    /// Makes at most one call to the service, and none at all when no
    /// credential resolves or either text is blank.
    pub async fn perform_audit(
        &self,
        source_text: &str,
        target_text: &str,
        target_language: &str,
        user_key: Option<&str>,
    ) -> AuditOutcome {
        let result = self
            .try_audit(source_text, target_text, target_language, user_key)
            .await;

        match &result {
            Ok(analysis) => log::debug!(
                "audit: structured result with {} breakdown rows",
                analysis.word_breakdown.len()
            ),
            Err(AuditError::MissingCredential | AuditError::IncompleteInput) => {}
            Err(e) => log::warn!("audit failed: {e:?}"),
        }

        result.into()
    }

    async fn try_audit(
        &self,
        source_text: &str,
        target_text: &str,
        target_language: &str,
        user_key: Option<&str>,
    ) -> Result<AnalysisResult, AuditError> {
        let credential = self
            .credentials
            .resolve(user_key)
            .ok_or(AuditError::MissingCredential)?;

        if source_text.trim().is_empty() || target_text.trim().is_empty() {
            return Err(AuditError::IncompleteInput);
        }

        let request = AuditRequest::new(source_text, target_text, target_language);
        let text = self
            .service
            .generate(credential, &request)
            .await
            .map_err(|failure| classify_failure(&failure.0))?;

        parse_analysis(&text)
    }
}

/// Parse a service text payload into an [`AnalysisResult`].
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AuditError> {
    if text.trim().is_empty() {
        return Err(AuditError::EmptyResponse);
    }
    serde_json::from_str(text).map_err(|e| AuditError::MalformedResponse(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
