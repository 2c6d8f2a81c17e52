//! Segment records: one source/target text pair under review.
//!
//! The serialized form uses camelCase field names and keeps
//! `wordBreakdown` as an array (never absent) so a stored working set reads
//! back field-for-field.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SegmentStatus
// ---------------------------------------------------------------------------

/// Review state of a segment.
///
/// | Variant     | Set by                                   |
/// |-------------|------------------------------------------|
/// | `Pending`   | creation                                 |
/// | `Reviewed`  | the workbench, when an audit completes   |
/// | `Approved`  | the user only                            |
/// | `NeedsWork` | the user only                            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentStatus {
    #[default]
    Pending,
    Reviewed,
    Approved,
    #[serde(rename = "Needs Work")]
    NeedsWork,
}

impl SegmentStatus {
    /// Display label, identical to the serialized value.
    pub fn label(&self) -> &'static str {
        match self {
            SegmentStatus::Pending => "Pending",
            SegmentStatus::Reviewed => "Reviewed",
            SegmentStatus::Approved => "Approved",
            SegmentStatus::NeedsWork => "Needs Work",
        }
    }
}

// ---------------------------------------------------------------------------
// ManualStatus
// ---------------------------------------------------------------------------

/// The subset of [`SegmentStatus`] a user may assign by hand.
///
/// Keeping this a separate type means no call site can "manually" mark a
/// segment `Reviewed` or reset it to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualStatus {
    Approved,
    NeedsWork,
}

impl From<ManualStatus> for SegmentStatus {
    fn from(status: ManualStatus) -> Self {
        match status {
            ManualStatus::Approved => SegmentStatus::Approved,
            ManualStatus::NeedsWork => SegmentStatus::NeedsWork,
        }
    }
}

// ---------------------------------------------------------------------------
// SegmentCategory
// ---------------------------------------------------------------------------

/// Manual issue tag attached to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SegmentCategory {
    Accuracy,
    Omission,
    Formatting,
    Terminology,
    Style,
    #[default]
    None,
}

impl SegmentCategory {
    /// Every category in display order.
    pub const ALL: [SegmentCategory; 6] = [
        SegmentCategory::Accuracy,
        SegmentCategory::Omission,
        SegmentCategory::Formatting,
        SegmentCategory::Terminology,
        SegmentCategory::Style,
        SegmentCategory::None,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SegmentCategory::Accuracy => "Accuracy",
            SegmentCategory::Omission => "Omission",
            SegmentCategory::Formatting => "Formatting",
            SegmentCategory::Terminology => "Terminology",
            SegmentCategory::Style => "Style",
            SegmentCategory::None => "None",
        }
    }
}

// ---------------------------------------------------------------------------
// WordBreakdownEntry
// ---------------------------------------------------------------------------

/// One row of the word-by-word alignment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordBreakdownEntry {
    /// Word as it appears in the translation.
    pub target_word: String,
    /// English equivalent.
    pub source_equivalent: String,
    /// Grammatical / semantic note (e.g. "Noun, plural").
    pub context: String,
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One unit of bilingual text under review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub source_text: String,
    pub target_text: String,
    pub status: SegmentStatus,
    pub category: SegmentCategory,
    /// Audit critique, or the failure message of the last audit.
    pub ai_feedback: Option<String>,
    #[serde(default)]
    pub word_breakdown: Vec<WordBreakdownEntry>,
    /// `true` only while an audit for this segment is in flight.
    #[serde(default)]
    pub is_analyzing: bool,
}

impl Segment {
    /// A fresh, empty, `Pending` segment with a newly generated id.
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::now_v7().to_string())
    }

    /// A fresh, empty, `Pending` segment with the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_text: String::new(),
            target_text: String::new(),
            status: SegmentStatus::Pending,
            category: SegmentCategory::None,
            ai_feedback: None,
            word_breakdown: Vec::new(),
            is_analyzing: false,
        }
    }

    /// Both texts are non-empty.
    ///
    /// Whitespace-only text still counts; the audit client rejects it with
    /// its own message.
    pub fn is_auditable(&self) -> bool {
        !self.source_text.is_empty() && !self.target_text.is_empty()
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_segment_is_empty_and_pending() {
        let seg = Segment::new();
        assert!(!seg.id.is_empty());
        assert!(seg.source_text.is_empty());
        assert!(seg.target_text.is_empty());
        assert_eq!(seg.status, SegmentStatus::Pending);
        assert_eq!(seg.category, SegmentCategory::None);
        assert!(seg.ai_feedback.is_none());
        assert!(seg.word_breakdown.is_empty());
        assert!(!seg.is_analyzing);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(Segment::new().id, Segment::new().id);
    }

    #[test]
    fn serializes_with_camel_case_and_empty_breakdown() {
        let seg = Segment::with_id("1");
        let json = serde_json::to_value(&seg).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["sourceText"], "");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["category"], "None");
        assert!(json["aiFeedback"].is_null());
        assert_eq!(json["wordBreakdown"], serde_json::json!([]));
        assert_eq!(json["isAnalyzing"], false);
    }

    #[test]
    fn needs_work_uses_spaced_label() {
        let json = serde_json::to_string(&SegmentStatus::NeedsWork).unwrap();
        assert_eq!(json, "\"Needs Work\"");
        let back: SegmentStatus = serde_json::from_str("\"Needs Work\"").unwrap();
        assert_eq!(back, SegmentStatus::NeedsWork);
        assert_eq!(SegmentStatus::NeedsWork.label(), "Needs Work");
    }

    #[test]
    fn missing_breakdown_defaults_to_empty() {
        let json = r#"{
            "id": "abc",
            "sourceText": "Hello",
            "targetText": "Merhaba",
            "status": "Approved",
            "category": "Style",
            "aiFeedback": null,
            "isAnalyzing": false
        }"#;
        let seg: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(seg.status, SegmentStatus::Approved);
        assert_eq!(seg.category, SegmentCategory::Style);
        assert!(seg.word_breakdown.is_empty());
    }

    #[test]
    fn manual_status_maps_only_to_user_states() {
        assert_eq!(
            SegmentStatus::from(ManualStatus::Approved),
            SegmentStatus::Approved
        );
        assert_eq!(
            SegmentStatus::from(ManualStatus::NeedsWork),
            SegmentStatus::NeedsWork
        );
    }

    #[test]
    fn auditable_requires_both_texts() {
        let mut seg = Segment::with_id("x");
        assert!(!seg.is_auditable());
        seg.source_text = "Hello".into();
        assert!(!seg.is_auditable());
        seg.target_text = "Merhaba".into();
        assert!(seg.is_auditable());
    }

    #[test]
    fn whitespace_only_text_is_auditable() {
        let mut seg = Segment::with_id("x");
        seg.source_text = "Hello".into();
        seg.target_text = "   ".into();
        assert!(seg.is_auditable());
    }

    #[test]
    fn category_list_covers_every_variant() {
        assert_eq!(SegmentCategory::ALL.len(), 6);
        assert_eq!(SegmentCategory::ALL[5], SegmentCategory::None);
    }
}
