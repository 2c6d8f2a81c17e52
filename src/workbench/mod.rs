//! Orchestration between the segment store, the audit client and the UI.
//!
//! # Architecture
//!
//! ```text
//! UI thread (egui update)                     tokio runtime
//! ───────────────────────                     ─────────────
//! Workbench::prepare_audit(id) ── AuditJob ──▶ AuditDispatcher::run
//!                                               └─ spawn per job:
//!                                                  AuditClient::perform_audit
//! Workbench::apply_completion ◀── AuditCompletion ─┘
//! ```
//!
//! The UI thread is the only owner of [`Workbench`]; audit tasks only see
//! job snapshots.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bilingual_proofreader::audit::{AuditClient, Credentials, GeminiService};
//! use bilingual_proofreader::config::AuditConfig;
//! use bilingual_proofreader::store::{MemoryStore, ProofreaderStorage};
//! use bilingual_proofreader::workbench::Workbench;
//!
//! #[tokio::main]
//! async fn main() {
//!     let storage = ProofreaderStorage::new(Arc::new(MemoryStore::new()));
//!     let credentials = Credentials::from_env("API_KEY");
//!     let client = AuditClient::new(
//!         Arc::new(GeminiService::from_config(&AuditConfig::default())),
//!         credentials.clone(),
//!     );
//!
//!     let mut workbench = Workbench::open(storage, credentials);
//!     let id = workbench.segments()[0].id.clone();
//!     workbench.set_source_text(&id, "Good morning");
//!     workbench.set_target_text(&id, "Günaydın");
//!
//!     if workbench.audit(&client, &id).await.is_ok() {
//!         println!("{:?}", workbench.segment(&id).and_then(|s| s.ai_feedback.as_deref()));
//!     }
//! }
//! ```

pub mod dispatcher;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use dispatcher::{AuditDispatcher, CHANNEL_CAPACITY};
pub use state::{AuditCompletion, AuditJob, Workbench, WorkbenchError};
