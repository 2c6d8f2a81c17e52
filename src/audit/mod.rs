//! Translation audit against a large-language-model service.
//!
//! This module provides:
//! * [`AuditClient`]: preconditions, one service call, parsing and failure
//!   classification; always returns an [`AuditOutcome`].
//! * [`ModelService`]: async trait for the remote model ([`GeminiService`]
//!   is the production backend).
//! * [`PromptBuilder`] / [`response_schema`]: the request contract.
//! * [`AuditError`] / [`classify_failure`]: failure taxonomy and its
//!   substring classification table.
//! * [`Credentials`]: user key vs. environment fallback resolution.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bilingual_proofreader::audit::{AuditClient, AuditOutcome, Credentials, GeminiService};
//! use bilingual_proofreader::config::AuditConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AuditConfig::default();
//!     let client = AuditClient::new(
//!         Arc::new(GeminiService::from_config(&config)),
//!         Credentials::from_env(&config.api_key_env),
//!     );
//!
//!     match client
//!         .perform_audit("Good morning", "Günaydın", "Turkish", None)
//!         .await
//!     {
//!         AuditOutcome::Structured(result) => println!("{}", result.feedback),
//!         AuditOutcome::Message(message) => eprintln!("{message}"),
//!     }
//! }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod outcome;
pub mod prompt;
pub mod service;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{parse_analysis, AuditClient};
pub use credentials::Credentials;
pub use error::{classify_failure, AuditError, FailureKind, CLASSIFICATION_TABLE};
pub use outcome::{AnalysisResult, AuditOutcome};
pub use prompt::{response_schema, PromptBuilder};
pub use service::{AuditRequest, GeminiService, ModelService, ServiceFailure};
