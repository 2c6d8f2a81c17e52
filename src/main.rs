//! Application entry point: Bilingual Proofreader.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the audit client ([`GeminiService`] + environment fallback key).
//! 5. Open the file-backed store and restore the [`Workbench`].
//! 6. Create the job and completion channels.
//! 7. Spawn the [`AuditDispatcher`] on the tokio runtime.
//! 8. Run [`eframe::run_native`]: blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use bilingual_proofreader::{
    app::ProofreaderApp,
    audit::{AuditClient, Credentials, GeminiService},
    config::{AppConfig, AppPaths},
    store::{FileStore, ProofreaderStorage},
    workbench::{AuditDispatcher, Workbench, CHANNEL_CAPACITY},
};
use tokio::sync::mpsc;

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let mut vp = egui::ViewportBuilder::default()
        .with_title("Bilingual Proofreader")
        .with_inner_size([width, height])
        .with_min_inner_size([720.0, 480.0]);

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bilingual Proofreader starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (2 worker threads host the dispatcher and its audits)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Audit client
    let credentials = Credentials::from_env(&config.audit.api_key_env);
    let client = AuditClient::new(
        Arc::new(GeminiService::from_config(&config.audit)),
        credentials.clone(),
    );
    log::info!(
        "Audits use model {} at {}",
        config.audit.model,
        config.audit.base_url
    );

    // 5. Persistent working set
    let storage_dir = config.storage.resolve_dir(&AppPaths::new());
    log::info!("Storage directory: {}", storage_dir.display());
    let storage = ProofreaderStorage::new(Arc::new(FileStore::new(storage_dir)));
    let workbench = Workbench::open(storage, credentials);

    // 6. Channel setup
    let (job_tx, job_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (completion_tx, completion_rx) = mpsc::channel(CHANNEL_CAPACITY);

    // 7. Dispatcher
    rt.spawn(AuditDispatcher::new(client).run(job_rx, completion_tx));

    // 8. Build the egui app and run it (blocks until the window is closed)
    let app = ProofreaderApp::new(workbench, job_tx, completion_rx);
    let options = native_options(&config);

    eframe::run_native(
        "Bilingual Proofreader",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
