use eframe::egui::{self, RichText, Ui};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum UploadAction {
    FileChosen(PathBuf),
    RunEda,
    RunExtraction,
    Reset,
}

/// Session state the upload screen needs to render itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionSnapshot {
    pub has_file: bool,
    pub has_eda: bool,
    pub has_extraction: bool,
}

/// CSV intake and analysis dispatch. Files arrive either by
/// drag-and-drop onto the window (handled by the app) or by typing a
/// path here.
pub struct UploadView {
    path_input: String,
}

impl Default for UploadView {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadView {
    pub fn new() -> Self {
        Self {
            path_input: String::new(),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        snapshot: SessionSnapshot,
        pending: bool,
    ) -> Option<UploadAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.set_max_width(560.0);

            if !snapshot.has_file {
                action = self.show_upload_card(ui);
            } else {
                action = self.show_analysis_card(ui, snapshot, pending);
            }
        });

        action
    }

    fn show_upload_card(&mut self, ui: &mut Ui) -> Option<UploadAction> {
        let mut action = None;

        ui.group(|ui| {
            ui.heading("Upload Your CSV file");
            ui.separator();
            ui.add_space(8.0);
            ui.label(RichText::new("📤").size(40.0));
            ui.label("Drag and drop your CSV file here, or enter its path below");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.path_input)
                        .hint_text("/path/to/reviews.csv")
                        .desired_width(380.0),
                );
                let can_load = !self.path_input.trim().is_empty();
                if ui.add_enabled(can_load, egui::Button::new("Load")).clicked() {
                    action = Some(UploadAction::FileChosen(PathBuf::from(
                        self.path_input.trim(),
                    )));
                    self.path_input.clear();
                }
            });
            ui.add_space(8.0);
        });

        action
    }

    fn show_analysis_card(
        &mut self,
        ui: &mut Ui,
        snapshot: SessionSnapshot,
        pending: bool,
    ) -> Option<UploadAction> {
        let mut action = None;

        ui.group(|ui| {
            ui.heading("Choose Analysis Type");
            if snapshot.has_eda || snapshot.has_extraction {
                ui.label(
                    RichText::new("Previous analysis data is available")
                        .small()
                        .weak(),
                );
            }
            ui.separator();
            ui.add_space(8.0);

            if pending {
                ui.spinner();
                ui.label("Analyzing...");
            } else {
                let eda_label = if snapshot.has_eda {
                    "Get Exploratory Data Analysis  ●"
                } else {
                    "Get Exploratory Data Analysis"
                };
                if ui.button(eda_label).clicked() {
                    action = Some(UploadAction::RunEda);
                }

                ui.add_space(4.0);

                let extract_label = if snapshot.has_extraction {
                    "Extract Requirements  ●"
                } else {
                    "Extract Requirements"
                };
                if ui.button(extract_label).clicked() {
                    action = Some(UploadAction::RunExtraction);
                }

                ui.add_space(12.0);
                if ui.button("Upload Different File").clicked() {
                    action = Some(UploadAction::Reset);
                }
            }
            ui.add_space(8.0);
        });

        action
    }
}
