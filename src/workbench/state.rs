//! The proofreading workbench: the single owner of segment, language and
//! API-key state.
//!
//! [`Workbench`] turns user actions into [`SegmentStore`] mutations and
//! audit requests.  An audit is split in two so the UI thread never waits
//! on the network:
//!
//! ```text
//! prepare_audit(id)  ── marks analyzing, clears feedback ──▶ AuditJob
//!        (job runs elsewhere: AuditClient::perform_audit)
//! complete_audit(id, outcome) ── clears analyzing, sets Reviewed
//! ```
//!
//! [`Workbench::audit`] runs both halves inline for callers that can await.

use thiserror::Error;

use crate::audit::{AuditClient, AuditOutcome, Credentials};
use crate::model::{ManualStatus, Segment, SegmentCategory, SegmentStatus, DEFAULT_TARGET_LANGUAGE};
use crate::store::{ProofreaderStorage, SegmentStore};

// ---------------------------------------------------------------------------
// WorkbenchError
// ---------------------------------------------------------------------------

/// Reasons an audit cannot be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkbenchError {
    /// No user key and no environment key; the UI asks for one.
    #[error("no API key configured")]
    MissingCredential,

    #[error("no segment with id {0}")]
    UnknownSegment(String),

    /// The segment already has an audit in flight.
    #[error("segment {0} is already being analyzed")]
    AuditInFlight(String),
}

// ---------------------------------------------------------------------------
// AuditJob / AuditCompletion
// ---------------------------------------------------------------------------

/// Snapshot of everything one audit needs, detached from workbench state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditJob {
    pub segment_id: String,
    pub source_text: String,
    pub target_text: String,
    pub target_language: String,
    /// The user's saved key, if any; the client applies the env fallback.
    pub user_key: Option<String>,
}

impl AuditJob {
    /// Run this job to completion.
    pub async fn run(self, client: &AuditClient) -> AuditCompletion {
        let outcome = client
            .perform_audit(
                &self.source_text,
                &self.target_text,
                &self.target_language,
                self.user_key.as_deref(),
            )
            .await;
        AuditCompletion {
            segment_id: self.segment_id,
            outcome,
        }
    }
}

/// Result of one [`AuditJob`], addressed by segment id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditCompletion {
    pub segment_id: String,
    pub outcome: AuditOutcome,
}

// ---------------------------------------------------------------------------
// Workbench
// ---------------------------------------------------------------------------

pub struct Workbench {
    segments: SegmentStore,
    storage: ProofreaderStorage,
    credentials: Credentials,
    target_language: String,
    api_key: String,
}

impl Workbench {
    /// Restore the workbench from `storage`.
    ///
    /// `credentials` carries the environment fallback key.
    pub fn open(storage: ProofreaderStorage, credentials: Credentials) -> Self {
        let target_language = storage
            .load_language()
            .unwrap_or_else(|e| {
                log::warn!("failed to read target language ({e}); using default");
                None
            })
            .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());

        let api_key = storage
            .load_api_key()
            .unwrap_or_else(|e| {
                log::warn!("failed to read saved API key ({e})");
                None
            })
            .unwrap_or_default();

        let segments = SegmentStore::load(storage.clone());
        log::info!(
            "workbench opened: {} segments, target language {}",
            segments.len(),
            target_language
        );

        Self {
            segments,
            storage,
            credentials,
            target_language,
            api_key,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn segments(&self) -> &[Segment] {
        self.segments.segments()
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.get(id)
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// The user's saved key; empty when none is saved.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// `true` when an audit could be attempted (user key or env fallback).
    pub fn has_credential(&self) -> bool {
        self.credentials.is_available(Some(self.api_key.as_str()))
    }

    /// Number of segments with an audit in flight.
    pub fn analyzing_count(&self) -> usize {
        self.segments().iter().filter(|s| s.is_analyzing).count()
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub fn set_target_language(&mut self, language: &str) {
        if self.target_language == language {
            return;
        }
        self.target_language = language.to_string();
        if let Err(e) = self.storage.save_language(language) {
            log::warn!("failed to persist target language: {e}");
        }
    }

    /// Save the user's key (trimmed).  An empty key removes it.
    pub fn save_api_key(&mut self, key: &str) {
        self.api_key = key.trim().to_string();
        if let Err(e) = self.storage.save_api_key(&self.api_key) {
            log::warn!("failed to persist API key: {e}");
        }
        log::info!(
            "API key {}",
            if self.api_key.is_empty() { "removed" } else { "saved" }
        );
    }

    // -----------------------------------------------------------------------
    // Segment editing
    // -----------------------------------------------------------------------

    pub fn add_segment(&mut self) -> String {
        self.segments.add()
    }

    pub fn set_source_text(&mut self, id: &str, text: &str) -> bool {
        self.segments.update(id, |s| s.source_text = text.to_string())
    }

    pub fn set_target_text(&mut self, id: &str, text: &str) -> bool {
        self.segments.update(id, |s| s.target_text = text.to_string())
    }

    pub fn set_category(&mut self, id: &str, category: SegmentCategory) -> bool {
        self.segments.update(id, |s| s.category = category)
    }

    /// Assign `Approved` or `NeedsWork`.
    pub fn set_manual_status(&mut self, id: &str, status: ManualStatus) -> bool {
        self.segments.update(id, |s| s.status = status.into())
    }

    pub fn delete_segment(&mut self, id: &str) -> bool {
        self.segments.delete(id)
    }

    pub fn clear_segments(&mut self) {
        self.segments.clear();
    }

    // -----------------------------------------------------------------------
    // Audits
    // -----------------------------------------------------------------------

    /// Start an audit of segment `id`.
    ///
    /// On success the segment is marked analyzing with its feedback and
    /// breakdown cleared, and the returned job carries a snapshot of its
    /// texts.
    pub fn prepare_audit(&mut self, id: &str) -> Result<AuditJob, WorkbenchError> {
        if !self.has_credential() {
            return Err(WorkbenchError::MissingCredential);
        }

        let seg = self
            .segments
            .get(id)
            .ok_or_else(|| WorkbenchError::UnknownSegment(id.to_string()))?;
        if seg.is_analyzing {
            return Err(WorkbenchError::AuditInFlight(id.to_string()));
        }

        let job = AuditJob {
            segment_id: seg.id.clone(),
            source_text: seg.source_text.clone(),
            target_text: seg.target_text.clone(),
            target_language: self.target_language.clone(),
            user_key: Some(self.api_key.clone()).filter(|k| !k.is_empty()),
        };

        self.segments.update(id, |s| {
            s.is_analyzing = true;
            s.ai_feedback = None;
            s.word_breakdown.clear();
        });
        log::debug!("workbench: audit started for {id}");

        Ok(job)
    }

    /// Apply the outcome of an audit to segment `id`.
    ///
    /// Every outcome clears the analyzing flag and sets `Reviewed`.  Returns
    /// `false` when the segment no longer exists.
    pub fn complete_audit(&mut self, id: &str, outcome: AuditOutcome) -> bool {
        let applied = self.segments.update(id, |s| {
            s.is_analyzing = false;
            s.status = SegmentStatus::Reviewed;
            match outcome {
                AuditOutcome::Structured(result) => {
                    s.ai_feedback = Some(result.feedback);
                    s.word_breakdown = result.word_breakdown;
                }
                AuditOutcome::Message(message) => {
                    s.ai_feedback = Some(message);
                    s.word_breakdown.clear();
                }
            }
        });
        if !applied {
            log::debug!("workbench: dropping audit result for deleted segment {id}");
        }
        applied
    }

    /// Apply a completion delivered by the dispatcher.
    pub fn apply_completion(&mut self, completion: AuditCompletion) -> bool {
        self.complete_audit(&completion.segment_id, completion.outcome)
    }

    /// Audit segment `id` inline: prepare, await the client, complete.
    pub async fn audit(&mut self, client: &AuditClient, id: &str) -> Result<(), WorkbenchError> {
        let job = self.prepare_audit(id)?;
        let completion = job.run(client).await;
        self.apply_completion(completion);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::audit::{AnalysisResult, AuditError, AuditRequest, ModelService, ServiceFailure};
    use crate::model::WordBreakdownEntry;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Replies with a fixed payload and counts calls.
    struct FixedService {
        reply: Result<String, ServiceFailure>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ModelService for FixedService {
        async fn generate(
            &self,
            _credential: &str,
            _request: &AuditRequest,
        ) -> Result<String, ServiceFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn service(reply: Result<&str, &str>) -> Arc<FixedService> {
        Arc::new(FixedService {
            reply: reply
                .map(str::to_string)
                .map_err(|e| ServiceFailure(e.to_string())),
            calls: AtomicUsize::new(0),
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    const BREAKDOWN_REPLY: &str = r#"{
        "feedback": "- Accurate translation.",
        "wordBreakdown": [
            {"targetWord": "Günaydın", "sourceEquivalent": "Good morning", "context": "Interjection, greeting"}
        ]
    }"#;

    fn storage() -> ProofreaderStorage {
        ProofreaderStorage::new(Arc::new(MemoryStore::new()))
    }

    fn workbench_with_key(storage: ProofreaderStorage) -> Workbench {
        let mut wb = Workbench::open(storage, Credentials::none());
        wb.save_api_key("user-key");
        wb
    }

    /// First segment id after filling in both texts.
    fn filled_segment(wb: &mut Workbench) -> String {
        let id = wb.segments()[0].id.clone();
        wb.set_source_text(&id, "Good morning");
        wb.set_target_text(&id, "Günaydın");
        id
    }

    // -----------------------------------------------------------------------
    // Opening / settings
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_workbench_has_defaults() {
        let wb = Workbench::open(storage(), Credentials::none());
        assert_eq!(wb.target_language(), "Turkish");
        assert_eq!(wb.api_key(), "");
        assert!(!wb.has_credential());
        assert_eq!(wb.segments().len(), 2);
    }

    #[test]
    fn env_key_alone_enables_audits() {
        let wb = Workbench::open(storage(), Credentials::new(Some("env".into())));
        assert!(wb.has_credential());
    }

    #[test]
    fn language_and_key_persist_across_reopen() {
        let storage = storage();
        {
            let mut wb = Workbench::open(storage.clone(), Credentials::none());
            wb.set_target_language("Thai");
            wb.save_api_key("  AIza-saved  ");
        }
        let wb = Workbench::open(storage, Credentials::none());
        assert_eq!(wb.target_language(), "Thai");
        assert_eq!(wb.api_key(), "AIza-saved");
        assert!(wb.has_credential());
    }

    #[test]
    fn saving_empty_key_removes_it() {
        let storage = storage();
        let mut wb = workbench_with_key(storage.clone());
        wb.save_api_key("");
        assert!(!wb.has_credential());

        let reopened = Workbench::open(storage, Credentials::none());
        assert_eq!(reopened.api_key(), "");
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    #[test]
    fn manual_tags_are_applied() {
        let mut wb = workbench_with_key(storage());
        let id = wb.segments()[0].id.clone();

        assert!(wb.set_category(&id, SegmentCategory::Omission));
        assert!(wb.set_manual_status(&id, ManualStatus::NeedsWork));

        let seg = wb.segment(&id).unwrap();
        assert_eq!(seg.category, SegmentCategory::Omission);
        assert_eq!(seg.status, SegmentStatus::NeedsWork);
    }

    #[test]
    fn edits_are_persisted() {
        let storage = storage();
        let mut wb = workbench_with_key(storage.clone());
        let id = filled_segment(&mut wb);

        let reopened = Workbench::open(storage, Credentials::none());
        let seg = reopened.segment(&id).unwrap();
        assert_eq!(seg.source_text, "Good morning");
        assert_eq!(seg.target_text, "Günaydın");
    }

    #[test]
    fn add_delete_and_clear() {
        let mut wb = workbench_with_key(storage());
        let added = wb.add_segment();
        assert_eq!(wb.segments().len(), 3);

        assert!(wb.delete_segment(&added));
        assert!(wb.segment(&added).is_none());

        wb.clear_segments();
        assert!(wb.segments().is_empty());
    }

    // -----------------------------------------------------------------------
    // prepare_audit
    // -----------------------------------------------------------------------

    #[test]
    fn prepare_without_credential_is_refused() {
        let mut wb = Workbench::open(storage(), Credentials::none());
        let id = filled_segment(&mut wb);

        assert_eq!(wb.prepare_audit(&id), Err(WorkbenchError::MissingCredential));
        assert!(!wb.segment(&id).unwrap().is_analyzing);
    }

    #[test]
    fn prepare_unknown_segment_is_refused() {
        let mut wb = workbench_with_key(storage());
        assert_eq!(
            wb.prepare_audit("nope"),
            Err(WorkbenchError::UnknownSegment("nope".into()))
        );
    }

    #[test]
    fn prepare_marks_analyzing_and_clears_previous_results() {
        let mut wb = workbench_with_key(storage());
        let id = filled_segment(&mut wb);
        wb.complete_audit(
            &id,
            AuditOutcome::Structured(AnalysisResult {
                feedback: "old".into(),
                word_breakdown: vec![WordBreakdownEntry {
                    target_word: "a".into(),
                    source_equivalent: "b".into(),
                    context: "c".into(),
                }],
            }),
        );

        let job = wb.prepare_audit(&id).expect("job");

        assert_eq!(job.segment_id, id);
        assert_eq!(job.source_text, "Good morning");
        assert_eq!(job.target_text, "Günaydın");
        assert_eq!(job.target_language, "Turkish");
        assert_eq!(job.user_key.as_deref(), Some("user-key"));

        let seg = wb.segment(&id).unwrap();
        assert!(seg.is_analyzing);
        assert!(seg.ai_feedback.is_none());
        assert!(seg.word_breakdown.is_empty());
    }

    #[test]
    fn second_prepare_while_in_flight_is_refused() {
        let mut wb = workbench_with_key(storage());
        let id = filled_segment(&mut wb);
        wb.prepare_audit(&id).expect("first job");

        assert_eq!(
            wb.prepare_audit(&id),
            Err(WorkbenchError::AuditInFlight(id.clone()))
        );
    }

    #[test]
    fn env_only_job_carries_no_user_key() {
        let mut wb = Workbench::open(storage(), Credentials::new(Some("env".into())));
        let id = filled_segment(&mut wb);
        let job = wb.prepare_audit(&id).expect("job");
        assert!(job.user_key.is_none());
    }

    // -----------------------------------------------------------------------
    // complete_audit
    // -----------------------------------------------------------------------

    #[test]
    fn message_outcome_sets_reviewed_with_empty_breakdown() {
        let mut wb = workbench_with_key(storage());
        let id = filled_segment(&mut wb);
        wb.prepare_audit(&id).expect("job");

        let message = AuditError::QuotaExceeded.to_string();
        assert!(wb.complete_audit(&id, AuditOutcome::Message(message.clone())));

        let seg = wb.segment(&id).unwrap();
        assert!(!seg.is_analyzing);
        assert_eq!(seg.status, SegmentStatus::Reviewed);
        assert_eq!(seg.ai_feedback.as_deref(), Some(message.as_str()));
        assert!(seg.word_breakdown.is_empty());
    }

    #[test]
    fn completion_for_deleted_segment_is_dropped() {
        let mut wb = workbench_with_key(storage());
        let id = filled_segment(&mut wb);
        wb.prepare_audit(&id).expect("job");
        wb.delete_segment(&id);

        assert!(!wb.complete_audit(&id, AuditOutcome::Message("late".into())));
        assert_eq!(wb.segments().len(), 1);
    }

    #[test]
    fn completions_for_different_segments_are_independent() {
        let mut wb = workbench_with_key(storage());
        let first = filled_segment(&mut wb);
        let second = wb.segments()[1].id.clone();
        wb.set_source_text(&second, "Thank you");
        wb.set_target_text(&second, "Teşekkürler");

        wb.prepare_audit(&first).expect("first");
        wb.prepare_audit(&second).expect("second");
        assert_eq!(wb.analyzing_count(), 2);

        // Completion order differs from dispatch order.
        wb.complete_audit(&second, AuditOutcome::Message("second done".into()));
        assert!(wb.segment(&first).unwrap().is_analyzing);

        wb.complete_audit(&first, AuditOutcome::Message("first done".into()));
        assert_eq!(wb.analyzing_count(), 0);
        assert_eq!(
            wb.segment(&first).unwrap().ai_feedback.as_deref(),
            Some("first done")
        );
        assert_eq!(
            wb.segment(&second).unwrap().ai_feedback.as_deref(),
            Some("second done")
        );
    }

    #[test]
    fn approved_status_is_overwritten_by_a_new_audit() {
        let mut wb = workbench_with_key(storage());
        let id = filled_segment(&mut wb);
        wb.set_manual_status(&id, ManualStatus::Approved);

        wb.prepare_audit(&id).expect("job");
        wb.complete_audit(&id, AuditOutcome::Message("done".into()));

        assert_eq!(wb.segment(&id).unwrap().status, SegmentStatus::Reviewed);
    }

    // -----------------------------------------------------------------------
    // audit (inline)
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn inline_audit_stores_structured_result() {
        let svc = service(Ok(BREAKDOWN_REPLY));
        let client = AuditClient::new(svc.clone(), Credentials::none());
        let mut wb = workbench_with_key(storage());
        let id = filled_segment(&mut wb);

        wb.audit(&client, &id).await.expect("audit");

        let seg = wb.segment(&id).unwrap();
        assert!(!seg.is_analyzing);
        assert_eq!(seg.status, SegmentStatus::Reviewed);
        assert_eq!(seg.ai_feedback.as_deref(), Some("- Accurate translation."));
        assert_eq!(seg.word_breakdown.len(), 1);
        assert_eq!(seg.word_breakdown[0].source_equivalent, "Good morning");
        assert_eq!(svc.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn inline_audit_of_blank_segment_reports_incomplete_input() {
        let svc = service(Ok(BREAKDOWN_REPLY));
        let client = AuditClient::new(svc.clone(), Credentials::none());
        let mut wb = workbench_with_key(storage());
        let id = wb.segments()[0].id.clone();

        wb.audit(&client, &id).await.expect("audit");

        let seg = wb.segment(&id).unwrap();
        assert_eq!(
            seg.ai_feedback.as_deref(),
            Some(AuditError::IncompleteInput.to_string().as_str())
        );
        assert_eq!(seg.status, SegmentStatus::Reviewed);
        assert!(!seg.is_analyzing);
        assert_eq!(svc.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn inline_audit_failure_never_leaves_segment_analyzing() {
        let client = AuditClient::new(
            service(Err("[401 Unauthorized]")),
            Credentials::none(),
        );
        let mut wb = workbench_with_key(storage());
        let id = filled_segment(&mut wb);

        wb.audit(&client, &id).await.expect("audit");

        let seg = wb.segment(&id).unwrap();
        assert!(!seg.is_analyzing);
        assert_eq!(
            seg.ai_feedback.as_deref(),
            Some(AuditError::InvalidCredential.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn inline_audit_persists_result() {
        let storage = storage();
        let client = AuditClient::new(service(Ok(BREAKDOWN_REPLY)), Credentials::none());
        let mut wb = workbench_with_key(storage.clone());
        let id = filled_segment(&mut wb);

        wb.audit(&client, &id).await.expect("audit");

        let reopened = Workbench::open(storage, Credentials::none());
        let seg = reopened.segment(&id).unwrap();
        assert_eq!(seg.status, SegmentStatus::Reviewed);
        assert_eq!(seg.word_breakdown.len(), 1);
    }
}
