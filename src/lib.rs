//! Bilingual proofreading workbench.
//!
//! Segments pair an English source with a translation; each pair can be
//! audited by a Gemini model, which returns a critique and a word-level
//! alignment table.  The working set persists locally between sessions.

pub mod app;
pub mod audit;
pub mod config;
pub mod model;
pub mod store;
pub mod workbench;
