//! Bilingual proofreader: egui/eframe application.
//!
//! # Architecture
//!
//! [`ProofreaderApp`] is the top-level [`eframe::App`].  It owns the
//! [`Workbench`] and two channel endpoints:
//!
//! * `job_tx`       : sends [`AuditJob`]s to the [`AuditDispatcher`].
//! * `completion_rx`: receives [`AuditCompletion`]s, polled every frame.
//!
//! Widgets never mutate the workbench while it is borrowed for rendering;
//! each frame collects [`RowAction`]s and applies them after the panel is
//! drawn.
//!
//! [`AuditDispatcher`]: crate::workbench::AuditDispatcher

use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::audit::AuditError;
use crate::model::{ManualStatus, Segment, SegmentCategory, SegmentStatus, TARGET_LANGUAGES};
use crate::workbench::{AuditCompletion, AuditJob, Workbench, WorkbenchError};

/// How long the "Copied" confirmation stays visible.
const COPY_FEEDBACK: Duration = Duration::from_secs(2);

const ACCENT: egui::Color32 = egui::Color32::from_rgb(68, 136, 255);
const MUTED: egui::Color32 = egui::Color32::from_rgb(140, 140, 140);
const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 136, 68);
const SUCCESS: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);

// ---------------------------------------------------------------------------
// RowAction
// ---------------------------------------------------------------------------

/// A user action collected while rendering, applied after the frame's
/// panels are drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum RowAction {
    SetSource { id: String, text: String },
    SetTarget { id: String, text: String },
    SetStatus { id: String, status: ManualStatus },
    SetCategory { id: String, category: SegmentCategory },
    Audit { id: String },
    Delete { id: String },
    /// Feedback text was placed on the clipboard.
    FeedbackCopied { id: String },
}

// ---------------------------------------------------------------------------
// ProofreaderApp
// ---------------------------------------------------------------------------

pub struct ProofreaderApp {
    workbench: Workbench,

    // ── Channels ─────────────────────────────────────────────────────────
    job_tx: mpsc::Sender<AuditJob>,
    completion_rx: mpsc::Receiver<AuditCompletion>,

    // ── Dialog state ─────────────────────────────────────────────────────
    show_key_dialog: bool,
    /// Editable copy of the key while the dialog is open.
    key_draft: String,
    reveal_key: bool,
    confirm_clear: bool,

    /// Segment whose feedback was copied last, and when.
    copied: Option<(String, Instant)>,
}

impl ProofreaderApp {
    /// Create a new [`ProofreaderApp`].
    ///
    /// * `workbench`    : restored working set and settings.
    /// * `job_tx`       : sender end of the dispatcher's job channel.
    /// * `completion_rx`: receiver end of the completion channel.
    pub fn new(
        workbench: Workbench,
        job_tx: mpsc::Sender<AuditJob>,
        completion_rx: mpsc::Receiver<AuditCompletion>,
    ) -> Self {
        Self {
            workbench,
            job_tx,
            completion_rx,
            show_key_dialog: false,
            key_draft: String::new(),
            reveal_key: false,
            confirm_clear: false,
            copied: None,
        }
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending audit completions (non-blocking).
    fn poll_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.workbench.apply_completion(completion);
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Apply one collected action to the workbench.
    pub fn apply(&mut self, action: RowAction) {
        match action {
            RowAction::SetSource { id, text } => {
                self.workbench.set_source_text(&id, &text);
            }
            RowAction::SetTarget { id, text } => {
                self.workbench.set_target_text(&id, &text);
            }
            RowAction::SetStatus { id, status } => {
                self.workbench.set_manual_status(&id, status);
            }
            RowAction::SetCategory { id, category } => {
                self.workbench.set_category(&id, category);
            }
            RowAction::Audit { id } => self.start_audit(&id),
            RowAction::Delete { id } => {
                self.workbench.delete_segment(&id);
            }
            RowAction::FeedbackCopied { id } => {
                self.copied = Some((id, Instant::now()));
            }
        }
    }

    /// Prepare an audit and hand it to the dispatcher.
    fn start_audit(&mut self, id: &str) {
        match self.workbench.prepare_audit(id) {
            Ok(job) => {
                if let Err(e) = self.job_tx.try_send(job) {
                    log::warn!("could not queue audit for {id}: {e}");
                    self.workbench.complete_audit(
                        id,
                        AuditError::generic(format!("Could not start the audit ({e}).")).into(),
                    );
                }
            }
            Err(WorkbenchError::MissingCredential) => self.open_key_dialog(),
            Err(e) => log::debug!("audit not started: {e}"),
        }
    }

    fn open_key_dialog(&mut self) {
        self.key_draft = self.workbench.api_key().to_string();
        self.reveal_key = false;
        self.show_key_dialog = true;
    }

    fn copied_id(&self) -> Option<&str> {
        self.copied
            .as_ref()
            .filter(|(_, at)| at.elapsed() < COPY_FEEDBACK)
            .map(|(id, _)| id.as_str())
    }

    // ── Header ───────────────────────────────────────────────────────────

    fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Bilingual Proofreader");
            ui.label(egui::RichText::new("Gemini translation audit").color(MUTED));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut language = self.workbench.target_language().to_string();
                egui::ComboBox::from_id_salt("target_language")
                    .selected_text(language.as_str())
                    .width(160.0)
                    .show_ui(ui, |ui| {
                        for lang in TARGET_LANGUAGES {
                            ui.selectable_value(&mut language, lang.to_string(), *lang);
                        }
                    });
                if language != self.workbench.target_language() {
                    self.workbench.set_target_language(&language);
                }
                ui.label("Target:");

                let (key_label, key_color) = if self.workbench.has_credential() {
                    ("API Key ✔", SUCCESS)
                } else {
                    ("API Key", WARNING)
                };
                if ui
                    .add(egui::Button::new(
                        egui::RichText::new(key_label).color(key_color),
                    ))
                    .clicked()
                {
                    self.open_key_dialog();
                }
            });
        });
    }

    // ── Working set ──────────────────────────────────────────────────────

    fn draw_segments(&mut self, ui: &mut egui::Ui) -> Vec<RowAction> {
        let mut actions = Vec::new();

        ui.horizontal(|ui| {
            ui.strong("Working Set");
            ui.label(
                egui::RichText::new(format!("{} segments", self.workbench.segments().len()))
                    .color(MUTED),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let has_segments = !self.workbench.segments().is_empty();
                if ui
                    .add_enabled(has_segments, egui::Button::new("Clear All"))
                    .clicked()
                {
                    self.confirm_clear = true;
                }
            });
        });
        ui.separator();

        let copied = self.copied_id().map(str::to_string);
        let language = self.workbench.target_language().to_string();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.workbench.segments().is_empty() {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("No segments yet. Add one to start proofreading.")
                                .color(MUTED),
                        );
                    });
                }

                for (index, segment) in self.workbench.segments().iter().enumerate() {
                    draw_segment(
                        ui,
                        index,
                        segment,
                        &language,
                        copied.as_deref() == Some(segment.id.as_str()),
                        &mut actions,
                    );
                    ui.add_space(8.0);
                }

                ui.vertical_centered(|ui| {
                    if ui.button("+ Add New Segment").clicked() {
                        self.workbench.add_segment();
                    }
                });
            });

        actions
    }

    // ── Dialogs ──────────────────────────────────────────────────────────

    fn draw_clear_confirm(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear {
            return;
        }
        let mut clear = false;
        let mut cancel = false;
        egui::Window::new("Clear all segments?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("This removes every segment and its audit results.");
                ui.horizontal(|ui| {
                    if ui.button("Clear All").clicked() {
                        clear = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if clear {
            self.workbench.clear_segments();
        }
        if clear || cancel {
            self.confirm_clear = false;
        }
    }

    fn draw_key_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_key_dialog {
            return;
        }
        let has_saved_key = !self.workbench.api_key().is_empty();
        let mut save = false;
        let mut remove = false;
        let mut close = false;

        egui::Window::new("Gemini API Key")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Paste your Google Gemini API key.");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.key_draft)
                            .password(!self.reveal_key)
                            .hint_text("AIza...")
                            .desired_width(280.0),
                    );
                    let toggle = if self.reveal_key { "Hide" } else { "Show" };
                    if ui.button(toggle).clicked() {
                        self.reveal_key = !self.reveal_key;
                    }
                });
                ui.label(
                    egui::RichText::new("The key is stored locally on this machine.")
                        .color(MUTED)
                        .size(11.0),
                );
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                    if has_saved_key && ui.button("Remove").clicked() {
                        remove = true;
                    }
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                });
            });

        if save {
            let draft = std::mem::take(&mut self.key_draft);
            self.workbench.save_api_key(&draft);
            close = true;
        }
        if remove {
            self.workbench.save_api_key("");
            self.key_draft.clear();
            close = true;
        }
        if close {
            self.show_key_dialog = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Segment row
// ---------------------------------------------------------------------------

fn status_color(status: SegmentStatus) -> egui::Color32 {
    match status {
        SegmentStatus::Pending => MUTED,
        SegmentStatus::Reviewed => ACCENT,
        SegmentStatus::Approved => SUCCESS,
        SegmentStatus::NeedsWork => WARNING,
    }
}

/// Render one segment card, pushing any user actions onto `actions`.
fn draw_segment(
    ui: &mut egui::Ui,
    index: usize,
    segment: &Segment,
    language: &str,
    just_copied: bool,
    actions: &mut Vec<RowAction>,
) {
    let id = &segment.id;

    egui::Frame::group(ui.style())
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            // Title row: index, status badge, delete.
            ui.horizontal(|ui| {
                ui.strong(format!("#{}", index + 1));
                ui.label(
                    egui::RichText::new(segment.status.label())
                        .color(status_color(segment.status))
                        .strong(),
                );
                if segment.category != SegmentCategory::None {
                    ui.label(egui::RichText::new(segment.category.label()).color(MUTED));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("🗑").on_hover_text("Delete segment").clicked() {
                        actions.push(RowAction::Delete { id: id.clone() });
                    }
                });
            });

            // Source / target editors.
            ui.columns(2, |cols| {
                cols[0].label(egui::RichText::new("SOURCE (ENGLISH)").color(MUTED).size(11.0));
                let mut source = segment.source_text.clone();
                if cols[0]
                    .add(
                        egui::TextEdit::multiline(&mut source)
                            .id_salt(("source", id))
                            .desired_rows(3)
                            .desired_width(f32::INFINITY)
                            .hint_text("Enter English source text..."),
                    )
                    .changed()
                {
                    actions.push(RowAction::SetSource {
                        id: id.clone(),
                        text: source,
                    });
                }

                cols[1].label(
                    egui::RichText::new(format!("TARGET ({})", language.to_uppercase()))
                        .color(MUTED)
                        .size(11.0),
                );
                let mut target = segment.target_text.clone();
                if cols[1]
                    .add(
                        egui::TextEdit::multiline(&mut target)
                            .id_salt(("target", id))
                            .desired_rows(3)
                            .desired_width(f32::INFINITY)
                            .hint_text(format!("Enter {language} translation...")),
                    )
                    .changed()
                {
                    actions.push(RowAction::SetTarget {
                        id: id.clone(),
                        text: target,
                    });
                }
            });

            ui.add_space(4.0);
            draw_breakdown(ui, segment);
            ui.add_space(4.0);

            // Review controls.
            ui.horizontal(|ui| {
                if ui.button("Approve").clicked() {
                    actions.push(RowAction::SetStatus {
                        id: id.clone(),
                        status: ManualStatus::Approved,
                    });
                }
                if ui.button("Needs Work").clicked() {
                    actions.push(RowAction::SetStatus {
                        id: id.clone(),
                        status: ManualStatus::NeedsWork,
                    });
                }

                let mut category = segment.category;
                egui::ComboBox::from_id_salt(("category", id))
                    .selected_text(category.label())
                    .show_ui(ui, |ui| {
                        for option in SegmentCategory::ALL {
                            ui.selectable_value(&mut category, option, option.label());
                        }
                    });
                if category != segment.category {
                    actions.push(RowAction::SetCategory {
                        id: id.clone(),
                        category,
                    });
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let enabled = !segment.is_analyzing && segment.is_auditable();
                    let label = if segment.is_analyzing {
                        "Analyzing..."
                    } else {
                        "Check Translation"
                    };
                    if ui
                        .add_enabled(enabled, egui::Button::new(label))
                        .clicked()
                    {
                        actions.push(RowAction::Audit { id: id.clone() });
                    }
                    if segment.is_analyzing {
                        ui.spinner();
                    }
                });
            });

            if let Some(feedback) = &segment.ai_feedback {
                ui.add_space(4.0);
                draw_feedback(ui, id, feedback, just_copied, actions);
            }
        });
}

/// WORD / ENGLISH / CONTEXT alignment grid, or a placeholder.
fn draw_breakdown(ui: &mut egui::Ui, segment: &Segment) {
    if segment.word_breakdown.is_empty() {
        ui.label(
            egui::RichText::new("Run audit to populate mapping")
                .color(MUTED)
                .italics(),
        );
        return;
    }

    egui::Grid::new(("breakdown", &segment.id))
        .num_columns(3)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for heading in ["WORD", "ENGLISH", "CONTEXT"] {
                ui.label(egui::RichText::new(heading).color(MUTED).size(11.0).strong());
            }
            ui.end_row();

            for entry in &segment.word_breakdown {
                ui.label(egui::RichText::new(&entry.target_word).strong());
                ui.label(&entry.source_equivalent);
                ui.label(egui::RichText::new(&entry.context).color(MUTED).italics());
                ui.end_row();
            }
        });
}

fn draw_feedback(
    ui: &mut egui::Ui,
    id: &str,
    feedback: &str,
    just_copied: bool,
    actions: &mut Vec<RowAction>,
) {
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::same(6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("AI AUDIT").color(ACCENT).size(11.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if just_copied { "Copied" } else { "Copy" };
                    if ui.small_button(label).clicked() {
                        ui.ctx().copy_text(feedback.to_string());
                        actions.push(RowAction::FeedbackCopied { id: id.to_string() });
                    }
                });
            });
            ui.label(feedback);
        });
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for ProofreaderApp {
    /// Called every frame by eframe.  Polls completions, renders, then
    /// applies the actions collected while rendering.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Poll non-blocking channel -------------------------------------
        self.poll_completions();

        // --- Schedule repaints while audits are in flight -------------------
        if self.workbench.analyzing_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if self.copied_id().is_some() {
            ctx.request_repaint_after(COPY_FEEDBACK);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            self.draw_header(ui);
            ui.add_space(4.0);
        });

        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| self.draw_segments(ui))
            .inner;

        self.draw_clear_confirm(ctx);
        self.draw_key_dialog(ctx);

        for action in actions {
            self.apply(action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("bilingual proofreader closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
