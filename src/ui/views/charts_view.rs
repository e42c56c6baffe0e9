use crate::domain::analysis::EdaReport;
use crate::services::{distribution_points, ChartPoint};
use crate::ui::widgets::{bar_chart::bar_chart, line_chart::line_chart, pie_chart::pie_chart, stat_card::stat_card};
use eframe::egui::{self, Ui};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartsAction {
    Refresh,
    Clear,
    GoUpload,
}

/// EDA report reshaped once into chart-ready series.
struct EdaData {
    sentiment: Vec<ChartPoint>,
    avg_word_count: u64,
    time: Vec<ChartPoint>,
    apps: Vec<ChartPoint>,
}

/// Exploratory data analysis charts over the uploaded reviews.
#[derive(Default)]
pub struct ChartsView {
    pub error: Option<String>,
    data: Option<EdaData>,
}

impl ChartsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_report(&mut self, report: &EdaReport) {
        self.data = Some(EdaData {
            sentiment: distribution_points(&report.sentiment_distribution),
            avg_word_count: report.avg_word_count.round().max(0.0) as u64,
            time: distribution_points(&report.time_distribution),
            apps: distribution_points(&report.app_distribution),
        });
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn show(&mut self, ui: &mut Ui, pending: bool) -> Option<ChartsAction> {
        if pending {
            ui.centered_and_justified(|ui| ui.spinner());
            return None;
        }

        if let Some(message) = self.error.clone() {
            return self.show_error_card(ui, &message);
        }

        let Some(data) = self.data.as_ref() else {
            return self.show_empty_card(ui);
        };

        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Exploratory Data Analysis");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear Data").clicked() {
                    action = Some(ChartsAction::Clear);
                }
                if ui.button("Refresh Data").clicked() {
                    action = Some(ChartsAction::Refresh);
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            let column = (ui.available_width() / 2.0 - 16.0).max(320.0);
            egui::Grid::new("eda_charts")
                .num_columns(2)
                .spacing([16.0, 16.0])
                .min_col_width(column)
                .max_col_width(column)
                .show(ui, |ui| {
                    pie_chart(ui, "Sentiment Distribution", &data.sentiment);
                    stat_card(
                        ui,
                        "Average Number of Words",
                        &data.avg_word_count.to_string(),
                    );
                    ui.end_row();

                    line_chart(
                        ui,
                        "Distribution Over Time",
                        &data.time,
                        "Time (MM/YYYY)",
                        "Number of Reviews",
                    );
                    bar_chart(
                        ui,
                        "App Distribution",
                        &data.apps,
                        "Apps",
                        "Number of Reviews",
                    );
                    ui.end_row();
                });
        });

        action
    }

    fn show_error_card(&mut self, ui: &mut Ui, message: &str) -> Option<ChartsAction> {
        let mut action = None;
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.set_max_width(420.0);
            ui.group(|ui| {
                ui.heading("Error Loading Data");
                ui.colored_label(egui::Color32::RED, message);
                ui.add_space(8.0);
                if ui.button("Retry Analysis").clicked() {
                    action = Some(ChartsAction::Refresh);
                }
                if ui.button("Return to Upload").clicked() {
                    action = Some(ChartsAction::GoUpload);
                }
            });
        });
        action
    }

    fn show_empty_card(&mut self, ui: &mut Ui) -> Option<ChartsAction> {
        let mut action = None;
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.set_max_width(420.0);
            ui.group(|ui| {
                ui.heading("No Data Available");
                ui.label("Would you like to perform exploratory data analysis?");
                ui.add_space(8.0);
                if ui.button("Get EDA Data").clicked() {
                    action = Some(ChartsAction::Refresh);
                }
                if ui.button("Upload New File").clicked() {
                    action = Some(ChartsAction::GoUpload);
                }
            });
        });
        action
    }
}
