//! Configuration module for the bilingual proofreader.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the audit
//! service, storage and window, `AppPaths` for cross-platform directories,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, AuditConfig, StorageConfig, UiConfig};
