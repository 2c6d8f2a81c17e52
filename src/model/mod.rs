//! Domain types shared by the store, the audit client and the UI.

pub mod language;
pub mod segment;

pub use language::{DEFAULT_TARGET_LANGUAGE, TARGET_LANGUAGES};
pub use segment::{ManualStatus, Segment, SegmentCategory, SegmentStatus, WordBreakdownEntry};
