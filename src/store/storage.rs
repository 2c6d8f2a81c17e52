//! Typed accessors for the three persisted values.
//!
//! | Value           | Key                              | Encoding        |
//! |-----------------|----------------------------------|-----------------|
//! | Segment list    | `bilingual_proofreader_data_v1`  | JSON array      |
//! | Target language | `bilingual_proofreader_lang_v1`  | plain string    |
//! | API key         | `bilingual_proofreader_api_key`  | plain string    |

use std::sync::Arc;

use crate::model::Segment;

use super::kv::{KeyValueStore, StoreError};

pub const SEGMENTS_KEY: &str = "bilingual_proofreader_data_v1";
pub const LANGUAGE_KEY: &str = "bilingual_proofreader_lang_v1";
pub const API_KEY_KEY: &str = "bilingual_proofreader_api_key";

/// Cheap-to-clone handle over a shared [`KeyValueStore`].
#[derive(Clone)]
pub struct ProofreaderStorage {
    kv: Arc<dyn KeyValueStore>,
}

impl ProofreaderStorage {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    // -----------------------------------------------------------------------
    // Segments
    // -----------------------------------------------------------------------

    /// Read the stored working set.  `Ok(None)` when nothing was stored yet.
    pub fn load_segments(&self) -> Result<Option<Vec<Segment>>, StoreError> {
        match self.kv.get(SEGMENTS_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_segments(&self, segments: &[Segment]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(segments)?;
        self.kv.set(SEGMENTS_KEY, &raw)
    }

    // -----------------------------------------------------------------------
    // Target language
    // -----------------------------------------------------------------------

    pub fn load_language(&self) -> Result<Option<String>, StoreError> {
        Ok(self.kv.get(LANGUAGE_KEY)?.filter(|lang| !lang.is_empty()))
    }

    pub fn save_language(&self, language: &str) -> Result<(), StoreError> {
        self.kv.set(LANGUAGE_KEY, language)
    }

    // -----------------------------------------------------------------------
    // API key
    // -----------------------------------------------------------------------

    /// Stored user key; an empty stored value reads as `None`.
    pub fn load_api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self.kv.get(API_KEY_KEY)?.filter(|key| !key.is_empty()))
    }

    pub fn save_api_key(&self, key: &str) -> Result<(), StoreError> {
        self.kv.set(API_KEY_KEY, key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SegmentCategory, SegmentStatus, WordBreakdownEntry};
    use crate::store::kv::MemoryStore;

    fn storage() -> ProofreaderStorage {
        ProofreaderStorage::new(Arc::new(MemoryStore::new()))
    }

    fn sample_segments() -> Vec<Segment> {
        let mut audited = Segment::with_id("a1");
        audited.source_text = "The cat sleeps.".into();
        audited.target_text = "Kedi uyuyor.".into();
        audited.status = SegmentStatus::Reviewed;
        audited.category = SegmentCategory::Terminology;
        audited.ai_feedback = Some("- Accurate.".into());
        audited.word_breakdown = vec![
            WordBreakdownEntry {
                target_word: "Kedi".into(),
                source_equivalent: "cat".into(),
                context: "Noun, singular".into(),
            },
            WordBreakdownEntry {
                target_word: "uyuyor".into(),
                source_equivalent: "sleeps".into(),
                context: "Verb, present continuous, 3rd person singular".into(),
            },
        ];

        let mut pending = Segment::with_id("b2");
        pending.source_text = "Good morning".into();

        vec![audited, pending, Segment::with_id("c3")]
    }

    #[test]
    fn nothing_stored_reads_as_none() {
        let storage = storage();
        assert!(storage.load_segments().unwrap().is_none());
        assert!(storage.load_language().unwrap().is_none());
        assert!(storage.load_api_key().unwrap().is_none());
    }

    #[test]
    fn segment_list_round_trips_field_for_field() {
        let storage = storage();
        let original = sample_segments();

        storage.save_segments(&original).unwrap();
        let loaded = storage.load_segments().unwrap().expect("stored");

        assert_eq!(loaded, original);
        assert!(loaded[1].word_breakdown.is_empty());
    }

    #[test]
    fn empty_breakdown_is_written_as_array() {
        let kv = Arc::new(MemoryStore::new());
        let storage = ProofreaderStorage::new(kv.clone());
        storage.save_segments(&[Segment::with_id("1")]).unwrap();

        let raw = kv.get(SEGMENTS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"wordBreakdown\":[]"));
    }

    #[test]
    fn corrupt_segment_list_is_an_error() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(SEGMENTS_KEY, "{not json").unwrap();
        let storage = ProofreaderStorage::new(kv);

        assert!(matches!(storage.load_segments(), Err(StoreError::Json(_))));
    }

    #[test]
    fn language_and_key_round_trip() {
        let storage = storage();
        storage.save_language("Thai").unwrap();
        storage.save_api_key("AIza-test").unwrap();

        assert_eq!(storage.load_language().unwrap().as_deref(), Some("Thai"));
        assert_eq!(storage.load_api_key().unwrap().as_deref(), Some("AIza-test"));
    }

    #[test]
    fn empty_api_key_reads_as_none() {
        let storage = storage();
        storage.save_api_key("AIza-test").unwrap();
        storage.save_api_key("").unwrap();
        assert!(storage.load_api_key().unwrap().is_none());
    }
}
