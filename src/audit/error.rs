//! Audit failure taxonomy and the service-failure classification table.
//!
//! Every [`AuditError`] renders to a fixed, user-facing sentence via
//! `Display`; that sentence is what lands in a segment's feedback panel.
//!
//! Service failures are classified by case-sensitive substring match on the
//! failure text.  The vocabulary lives in [`CLASSIFICATION_TABLE`] and
//! nowhere else; the first matching row wins.

use thiserror::Error;

/// Text used when a generic failure carries no detail of its own.
const UNEXPECTED_FAILURE_DETAIL: &str =
    "An unexpected error occurred. Please check your internet connection.";

// ---------------------------------------------------------------------------
// AuditError
// ---------------------------------------------------------------------------

/// Everything that can stop an audit from producing a structured result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// Neither a user key nor an environment key is available.
    #[error(
        "API Key Missing: Please click the 'API Key' button in the header to configure your Google Gemini API key."
    )]
    MissingCredential,

    /// Source or target text is empty or whitespace-only.
    #[error("Please provide both source and target text for analysis.")]
    IncompleteInput,

    /// The service rejected the key.
    #[error(
        "Invalid API Key: The key you provided was rejected by Google. Please check your API key in the settings."
    )]
    InvalidCredential,

    /// Rate or billing limit reached.
    #[error(
        "Quota Exceeded: You have reached the rate limit for your Gemini API key. Please wait a moment or check your billing status."
    )]
    QuotaExceeded,

    /// Safety filter triggered on the prompt or the response.
    #[error("Safety Warning: The translation or source text was blocked by Google's safety filters.")]
    ContentBlocked,

    /// The service answered without any text.
    #[error("Analysis Failed: The AI model returned an empty response.")]
    EmptyResponse,

    /// The service answered with text that is not the expected JSON object.
    #[error("Analysis Failed: {0}")]
    MalformedResponse(String),

    /// Anything else; carries the underlying failure text verbatim.
    #[error("Analysis Failed: {0}")]
    GenericFailure(String),
}

impl AuditError {
    /// Build a [`GenericFailure`](AuditError::GenericFailure), substituting a
    /// stock explanation when `detail` is blank.
    pub fn generic(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.trim().is_empty() {
            AuditError::GenericFailure(UNEXPECTED_FAILURE_DETAIL.to_string())
        } else {
            AuditError::GenericFailure(detail)
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Service-failure kinds recognised from the failure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidCredential,
    QuotaExceeded,
    ContentBlocked,
}

impl From<FailureKind> for AuditError {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::InvalidCredential => AuditError::InvalidCredential,
            FailureKind::QuotaExceeded => AuditError::QuotaExceeded,
            FailureKind::ContentBlocked => AuditError::ContentBlocked,
        }
    }
}

/// Substring → kind, checked top to bottom.
pub const CLASSIFICATION_TABLE: &[(&str, FailureKind)] = &[
    ("API_KEY_INVALID", FailureKind::InvalidCredential),
    ("401", FailureKind::InvalidCredential),
    ("429", FailureKind::QuotaExceeded),
    ("quota", FailureKind::QuotaExceeded),
    ("blocked", FailureKind::ContentBlocked),
];

/// Map raw service-failure text onto the taxonomy.
///
/// Unrecognised text becomes a [`GenericFailure`](AuditError::GenericFailure)
/// that echoes it.
pub fn classify_failure(message: &str) -> AuditError {
    CLASSIFICATION_TABLE
        .iter()
        .find(|(needle, _)| message.contains(needle))
        .map(|(_, kind)| AuditError::from(*kind))
        .unwrap_or_else(|| AuditError::generic(message))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
