//! Audit dispatcher: runs [`AuditJob`]s off the UI thread.
//!
//! The UI sends jobs on an mpsc channel; [`AuditDispatcher::run`] spawns one
//! tokio task per job so audits of different segments proceed concurrently.
//! Each task sends exactly one [`AuditCompletion`] back, in whatever order
//! the service answers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::audit::AuditClient;

use super::state::{AuditCompletion, AuditJob};

/// Capacity of the job and completion channels.
pub const CHANNEL_CAPACITY: usize = 64;

/// Executes audit jobs against a shared [`AuditClient`].
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tokio::sync::mpsc;
/// use bilingual_proofreader::audit::{AuditClient, Credentials, GeminiService};
/// use bilingual_proofreader::config::AuditConfig;
/// use bilingual_proofreader::workbench::{AuditDispatcher, CHANNEL_CAPACITY};
///
/// # async fn example() {
/// let service = Arc::new(GeminiService::from_config(&AuditConfig::default()));
/// let client = AuditClient::new(service, Credentials::from_env("API_KEY"));
///
/// let (job_tx, job_rx) = mpsc::channel(CHANNEL_CAPACITY);
/// let (done_tx, mut done_rx) = mpsc::channel(CHANNEL_CAPACITY);
/// tokio::spawn(AuditDispatcher::new(client).run(job_rx, done_tx));
///
/// // job_tx.try_send(workbench.prepare_audit(&id)?) from the UI,
/// // then workbench.apply_completion(done_rx.try_recv()?) each frame.
/// # drop(job_tx);
/// # let _ = done_rx.recv().await;
/// # }
/// ```
pub struct AuditDispatcher {
    client: Arc<AuditClient>,
}

impl AuditDispatcher {
    pub fn new(client: AuditClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run until `jobs` is closed.
    ///
    /// In-flight tasks keep running after the loop ends; their completions
    /// are discarded if the receiver is gone.
    pub async fn run(
        self,
        mut jobs: mpsc::Receiver<AuditJob>,
        completions: mpsc::Sender<AuditCompletion>,
    ) {
        while let Some(job) = jobs.recv().await {
            log::debug!("dispatcher: auditing segment {}", job.segment_id);

            let client = Arc::clone(&self.client);
            let completions = completions.clone();
            tokio::spawn(async move {
                let completion = job.run(&client).await;
                if completions.send(completion).await.is_err() {
                    log::debug!("dispatcher: completion receiver dropped");
                }
            });
        }

        log::info!("dispatcher: job channel closed, shutting down");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
