//! In-memory ordered segment collection, mirrored to storage on every change.
//!
//! [`SegmentStore`] never reorders: segments keep append order and only leave
//! the collection through [`delete`](SegmentStore::delete) or
//! [`clear`](SegmentStore::clear).  Every mutation writes the whole list back
//! through [`ProofreaderStorage`].  A failed write is logged and the
//! in-memory state is kept.

use crate::model::Segment;

use super::storage::ProofreaderStorage;

/// Number of empty segments a brand-new working set starts with.
const DEFAULT_SEGMENT_COUNT: usize = 2;

pub struct SegmentStore {
    segments: Vec<Segment>,
    storage: ProofreaderStorage,
}

impl SegmentStore {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Load the stored working set.
    ///
    /// Falls back to the default set (two empty segments) when nothing is
    /// stored or the stored list cannot be read.  In-flight flags persisted
    /// by a previous run are cleared since no audit survives a restart.
    pub fn load(storage: ProofreaderStorage) -> Self {
        let mut segments = match storage.load_segments() {
            Ok(Some(segments)) => segments,
            Ok(None) => default_segments(),
            Err(e) => {
                log::error!("failed to read saved segments ({e}); starting with defaults");
                default_segments()
            }
        };

        for seg in segments.iter_mut().filter(|s| s.is_analyzing) {
            log::debug!("store: clearing stale analyzing flag on {}", seg.id);
            seg.is_analyzing = false;
        }

        Self { segments, storage }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Append a new empty `Pending` segment and return its id.
    pub fn add(&mut self) -> String {
        let seg = Segment::new();
        let id = seg.id.clone();
        self.segments.push(seg);
        self.persist();
        id
    }

    /// Apply `change` to the segment with `id` in place.
    ///
    /// Returns `false` (and writes nothing) when no such segment exists.
    pub fn update<F>(&mut self, id: &str, change: F) -> bool
    where
        F: FnOnce(&mut Segment),
    {
        let Some(seg) = self.segments.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        change(seg);
        self.persist();
        true
    }

    /// Remove exactly the segment with `id`; others keep their order.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.segments.len();
        self.segments.retain(|s| s.id != id);
        let removed = self.segments.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Remove every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save_segments(&self.segments) {
            log::warn!("failed to persist {} segments: {e}", self.segments.len());
        }
    }
}

fn default_segments() -> Vec<Segment> {
    (0..DEFAULT_SEGMENT_COUNT).map(|_| Segment::new()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
