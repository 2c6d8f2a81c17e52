//! Persistence for the proofreading working set.
//!
//! * [`KeyValueStore`]: opaque get/set string store ([`FileStore`],
//!   [`MemoryStore`]).
//! * [`ProofreaderStorage`]: typed accessors for segments, target language
//!   and API key.
//! * [`SegmentStore`]: ordered in-memory segment list written back on every
//!   change.

pub mod kv;
pub mod segments;
pub mod storage;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use segments::SegmentStore;
pub use storage::ProofreaderStorage;
