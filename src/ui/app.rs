use crate::config::AnalysisConfig;
use crate::domain::analysis::{EdaReport, ExtractionReport};
use crate::repository::Repository;
use crate::services::{write_export, AnalysisClient, AnalysisError, SessionService};
use eframe::egui::{self, Context};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Instant;

use super::views::charts_view::{ChartsAction, ChartsView};
use super::views::requirements_view::{RequirementsAction, RequirementsView};
use super::views::upload_view::{SessionSnapshot, UploadAction, UploadView};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewType {
    Upload,
    Charts,
    Requirements,
}

enum AnalysisOutcome {
    Eda(Result<EdaReport, AnalysisError>),
    Extraction(Result<ExtractionReport, AnalysisError>),
}

/// One analysis request in flight. A second dispatch is blocked until
/// the receiver settles; the request itself is not cancellable.
struct PendingAnalysis {
    rx: Receiver<AnalysisOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NoticeLevel {
    Info,
    Success,
    Error,
}

struct Notice {
    level: NoticeLevel,
    text: String,
    created: Instant,
}

const NOTICE_TTL_SECS: u64 = 8;

pub struct ReqMinerApp {
    session: SessionService,

    // UI state
    current_view: ViewType,
    has_file: bool,
    notices: Vec<Notice>,
    pending: Option<PendingAnalysis>,

    // View components
    upload_view: UploadView,
    charts_view: ChartsView,
    requirements_view: RequirementsView,

    // Runtime
    runtime: tokio::runtime::Runtime,
}

impl ReqMinerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, repository: Repository) -> Self {
        setup_custom_fonts(&cc.egui_ctx);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");

        let client = AnalysisClient::new(AnalysisConfig::from_env());
        let session = SessionService::new(repository, client);

        let mut app = Self {
            session,
            current_view: ViewType::Upload,
            has_file: false,
            notices: Vec::new(),
            pending: None,
            upload_view: UploadView::new(),
            charts_view: ChartsView::new(),
            requirements_view: RequirementsView::new(),
            runtime,
        };

        app.load_session();
        app
    }

    /// Pulls the persisted session into the view caches: the uploaded
    /// file flag and both analysis reports. Corrupted cached reports
    /// have already been discarded by the service when this errors.
    fn load_session(&mut self) {
        let session = self.session.clone();

        self.has_file = self
            .runtime
            .block_on(session.has_file())
            .unwrap_or(false);

        match self.runtime.block_on(session.cached_eda()) {
            Ok(Some(report)) => self.charts_view.set_report(&report),
            Ok(None) => {}
            Err(e) => self.push_notice(NoticeLevel::Error, e.to_string()),
        }

        match self.runtime.block_on(session.cached_extraction()) {
            Ok(Some(report)) => self.requirements_view.set_report(&report),
            Ok(None) => {}
            Err(e) => self.push_notice(NoticeLevel::Error, e.to_string()),
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            has_file: self.has_file,
            has_eda: self.charts_view.has_data(),
            has_extraction: self.requirements_view.has_data(),
        }
    }

    /// The single navigation dispatch point: views that present
    /// analysis results require an uploaded file, otherwise the user
    /// is sent back to the upload screen with a notice.
    fn navigate(&mut self, target: ViewType) {
        match target {
            ViewType::Upload => self.current_view = ViewType::Upload,
            ViewType::Charts | ViewType::Requirements => {
                if !self.has_file {
                    self.push_notice(
                        NoticeLevel::Error,
                        "Please upload a file first".to_string(),
                    );
                    self.current_view = ViewType::Upload;
                    return;
                }
                self.current_view = target;
            }
        }
    }

    /// The stored file disappeared between upload and dispatch. Drop back to
    /// the upload view instead of rendering a stale analysis error.
    fn missing_file_redirect(&mut self) {
        self.has_file = false;
        self.push_notice(
            NoticeLevel::Error,
            AnalysisError::MissingFile.to_string(),
        );
        self.current_view = ViewType::Upload;
    }

    fn push_notice(&mut self, level: NoticeLevel, text: String) {
        match level {
            NoticeLevel::Error => tracing::error!("{}", text),
            _ => tracing::info!("{}", text),
        }
        self.notices.push(Notice {
            level,
            text,
            created: Instant::now(),
        });
    }

    // --- analysis dispatch -------------------------------------------------

    fn start_eda(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let session = self.session.clone();
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let _ = tx.send(AnalysisOutcome::Eda(session.run_eda().await));
        });
        self.pending = Some(PendingAnalysis { rx });
    }

    fn start_extraction(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let session = self.session.clone();
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let _ = tx.send(AnalysisOutcome::Extraction(session.run_extraction().await));
        });
        self.pending = Some(PendingAnalysis { rx });
    }

    fn poll_pending(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        match pending.rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                self.handle_outcome(outcome);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.push_notice(
                    NoticeLevel::Error,
                    "Analysis task stopped unexpectedly".to_string(),
                );
            }
        }
    }

    fn handle_outcome(&mut self, outcome: AnalysisOutcome) {
        match outcome {
            AnalysisOutcome::Eda(Ok(report)) => {
                self.charts_view.set_report(&report);
                self.push_notice(
                    NoticeLevel::Success,
                    "EDA analysis completed successfully".to_string(),
                );
                self.navigate(ViewType::Charts);
            }
            AnalysisOutcome::Eda(Err(AnalysisError::MissingFile)) => {
                self.missing_file_redirect();
            }
            AnalysisOutcome::Eda(Err(e)) => {
                self.charts_view.error = Some(e.to_string());
                self.push_notice(NoticeLevel::Error, format!("Failed to get EDA: {}", e));
            }
            AnalysisOutcome::Extraction(Ok(report)) => {
                self.requirements_view.set_report(&report);
                self.push_notice(
                    NoticeLevel::Success,
                    "Requirements extracted successfully".to_string(),
                );
                self.navigate(ViewType::Requirements);
            }
            AnalysisOutcome::Extraction(Err(AnalysisError::MissingFile)) => {
                self.missing_file_redirect();
            }
            AnalysisOutcome::Extraction(Err(e)) => {
                self.requirements_view.error = Some(e.to_string());
                self.push_notice(
                    NoticeLevel::Error,
                    format!("Failed to extract requirements: {}", e),
                );
            }
        }
    }

    // --- view actions ------------------------------------------------------

    fn handle_file_chosen(&mut self, path: PathBuf) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.push_notice(
                    NoticeLevel::Error,
                    format!("Error reading file {}: {}", path.display(), e),
                );
                return;
            }
        };

        let session = self.session.clone();
        match self.runtime.block_on(session.store_csv(&file_name, &bytes)) {
            Ok(()) => {
                self.has_file = true;
                self.charts_view.clear();
                self.charts_view.error = None;
                self.requirements_view.clear();
                self.requirements_view.error = None;
                self.push_notice(
                    NoticeLevel::Success,
                    "File uploaded successfully!".to_string(),
                );
            }
            Err(e) => self.push_notice(NoticeLevel::Error, e.to_string()),
        }
    }

    fn handle_upload_action(&mut self, action: UploadAction) {
        match action {
            UploadAction::FileChosen(path) => self.handle_file_chosen(path),
            UploadAction::RunEda => self.start_eda(),
            UploadAction::RunExtraction => self.start_extraction(),
            UploadAction::Reset => {
                let session = self.session.clone();
                if let Err(e) = self.runtime.block_on(session.clear_all()) {
                    self.push_notice(NoticeLevel::Error, e.to_string());
                    return;
                }
                self.has_file = false;
                self.charts_view.clear();
                self.requirements_view.clear();
                self.push_notice(NoticeLevel::Info, "Session cleared".to_string());
            }
        }
    }

    fn handle_charts_action(&mut self, action: ChartsAction) {
        match action {
            ChartsAction::Refresh => {
                self.charts_view.error = None;
                self.start_eda();
            }
            ChartsAction::Clear => {
                let session = self.session.clone();
                if let Err(e) = self.runtime.block_on(session.clear_eda()) {
                    self.push_notice(NoticeLevel::Error, e.to_string());
                    return;
                }
                self.charts_view.clear();
                self.push_notice(NoticeLevel::Info, "EDA data has been cleared".to_string());
            }
            ChartsAction::GoUpload => self.navigate(ViewType::Upload),
        }
    }

    fn handle_requirements_action(&mut self, action: RequirementsAction) {
        match action {
            RequirementsAction::Refresh => {
                self.requirements_view.error = None;
                self.start_extraction();
            }
            RequirementsAction::Clear => {
                let session = self.session.clone();
                if let Err(e) = self.runtime.block_on(session.clear_extraction()) {
                    self.push_notice(NoticeLevel::Error, e.to_string());
                    return;
                }
                self.requirements_view.clear();
                self.push_notice(
                    NoticeLevel::Info,
                    "Requirements data has been cleared".to_string(),
                );
            }
            RequirementsAction::GoUpload => self.navigate(ViewType::Upload),
            RequirementsAction::Export => self.export_table(),
        }
    }

    fn export_table(&mut self) {
        let Some((rows, filtered)) = self.requirements_view.export_rows() else {
            return;
        };
        match write_export(&rows, filtered) {
            Ok(path) => self.push_notice(
                NoticeLevel::Success,
                format!("Exported {} rows to {}", rows.len(), path.display()),
            ),
            Err(e) => {
                self.push_notice(NoticeLevel::Error, format!("CSV export failed: {}", e))
            }
        }
    }

    // --- panels ------------------------------------------------------------

    fn show_top_panel(&mut self, ctx: &Context) {
        let snapshot = self.snapshot();
        let mut target = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📊 ReqMiner");
                ui.separator();

                if ui
                    .selectable_label(self.current_view == ViewType::Upload, "📤 Upload CSV")
                    .clicked()
                {
                    target = Some(ViewType::Upload);
                }

                let charts_label = if snapshot.has_eda {
                    "📈 Exploratory Data Analysis ●"
                } else {
                    "📈 Exploratory Data Analysis"
                };
                if ui
                    .add_enabled(
                        snapshot.has_file,
                        egui::SelectableLabel::new(
                            self.current_view == ViewType::Charts,
                            charts_label,
                        ),
                    )
                    .clicked()
                {
                    target = Some(ViewType::Charts);
                }

                let req_label = if snapshot.has_extraction {
                    "📋 Extracted Requirements ●"
                } else {
                    "📋 Extracted Requirements"
                };
                if ui
                    .add_enabled(
                        snapshot.has_file,
                        egui::SelectableLabel::new(
                            self.current_view == ViewType::Requirements,
                            req_label,
                        ),
                    )
                    .clicked()
                {
                    target = Some(ViewType::Requirements);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.pending.is_some() {
                        ui.spinner();
                    }
                    if snapshot.has_file {
                        ui.weak("File uploaded");
                    }
                });
            });
        });

        if let Some(target) = target {
            self.navigate(target);
        }
    }

    fn show_main_content(&mut self, ctx: &Context) {
        let pending = self.pending.is_some();
        let snapshot = self.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| match self.current_view {
            ViewType::Upload => {
                if let Some(action) = self.upload_view.show(ui, snapshot, pending) {
                    self.handle_upload_action(action);
                }
            }
            ViewType::Charts => {
                if let Some(action) = self.charts_view.show(ui, pending) {
                    self.handle_charts_action(action);
                }
            }
            ViewType::Requirements => {
                if let Some(action) = self.requirements_view.show(ui, pending) {
                    self.handle_requirements_action(action);
                }
            }
        });
    }

    fn show_notices(&mut self, ctx: &Context) {
        self.notices
            .retain(|n| n.created.elapsed().as_secs() < NOTICE_TTL_SECS);
        if self.notices.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::TopBottomPanel::bottom("notices").show(ctx, |ui| {
            for (i, notice) in self.notices.iter().enumerate() {
                ui.horizontal(|ui| {
                    let color = match notice.level {
                        NoticeLevel::Info => egui::Color32::GRAY,
                        NoticeLevel::Success => egui::Color32::from_rgb(76, 175, 80),
                        NoticeLevel::Error => egui::Color32::from_rgb(244, 67, 54),
                    };
                    ui.colored_label(color, &notice.text);
                    if ui.small_button("✕").clicked() {
                        dismissed = Some(i);
                    }
                });
            }
        });

        if let Some(i) = dismissed {
            self.notices.remove(i);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped: Vec<egui::DroppedFile> = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = file.path {
                self.handle_file_chosen(path);
            }
        }
    }
}

impl eframe::App for ReqMinerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_pending();
        self.handle_dropped_files(ctx);

        self.show_top_panel(ctx);
        self.show_main_content(ctx);
        self.show_notices(ctx);

        // Keep polling the in-flight analysis even without input events
        if self.pending.is_some() || !self.notices.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn setup_custom_fonts(ctx: &Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = [
        (
            egui::TextStyle::Small,
            egui::FontId::new(12.0, egui::FontFamily::Proportional),
        ),
        (
            egui::TextStyle::Body,
            egui::FontId::new(14.0, egui::FontFamily::Proportional),
        ),
        (
            egui::TextStyle::Button,
            egui::FontId::new(14.0, egui::FontFamily::Proportional),
        ),
        (
            egui::TextStyle::Heading,
            egui::FontId::new(20.0, egui::FontFamily::Proportional),
        ),
        (
            egui::TextStyle::Monospace,
            egui::FontId::new(13.0, egui::FontFamily::Monospace),
        ),
    ]
    .into();

    ctx.set_style(style);
}
