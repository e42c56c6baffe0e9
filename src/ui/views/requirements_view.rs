use crate::domain::analysis::ExtractionReport;
use crate::domain::record::Record;
use crate::domain::table::RecordTable;
use crate::services::{distribution_points, top_requirements, ChartPoint};
use crate::ui::widgets::req_table::{ReqTable, TableAction};
use crate::ui::widgets::{bar_chart::bar_chart, line_chart::line_chart, pie_chart::pie_chart};
use eframe::egui::{self, Ui};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequirementsAction {
    Refresh,
    Clear,
    GoUpload,
    Export,
}

const TOP_REQUIREMENTS: usize = 5;

/// Extraction report reshaped once: chart series plus the table model.
struct ExtractionData {
    apps: Vec<ChartPoint>,
    word_counts: Vec<ChartPoint>,
    sentiment: Vec<ChartPoint>,
    reviews: Vec<ChartPoint>,
    time: Vec<ChartPoint>,
    top: Vec<ChartPoint>,
    table: RecordTable,
}

/// Extracted-requirements analysis: six charts plus the searchable,
/// paginated, exportable record table.
#[derive(Default)]
pub struct RequirementsView {
    pub error: Option<String>,
    data: Option<ExtractionData>,
    table_widget: ReqTable,
}

impl RequirementsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_report(&mut self, report: &ExtractionReport) {
        self.data = Some(ExtractionData {
            apps: distribution_points(&report.distribution_over_apps),
            word_counts: distribution_points(&report.word_count_distribution),
            sentiment: distribution_points(&report.sentiment_distribution),
            reviews: distribution_points(&report.distribution_over_reviews),
            time: distribution_points(&report.distribution_over_time),
            top: top_requirements(&report.records, TOP_REQUIREMENTS),
            table: RecordTable::new(report.records.clone()),
        });
        self.table_widget.reset_search();
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Rows the CSV export covers (full set, or filtered when a search
    /// term is active), plus the filtered flag for the file name.
    pub fn export_rows(&self) -> Option<(Vec<&Record>, bool)> {
        let data = self.data.as_ref()?;
        Some((data.table.export_rows(), data.table.is_filtered()))
    }

    pub fn show(&mut self, ui: &mut Ui, pending: bool) -> Option<RequirementsAction> {
        if pending {
            ui.centered_and_justified(|ui| ui.spinner());
            return None;
        }

        if let Some(message) = self.error.clone() {
            return self.show_error_card(ui, &message);
        }

        if self.data.is_none() {
            return self.show_empty_card(ui);
        }

        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Extracted Requirements Analysis");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear Data").clicked() {
                    action = Some(RequirementsAction::Clear);
                }
                if ui.button("Refresh Data").clicked() {
                    action = Some(RequirementsAction::Refresh);
                }
            });
        });
        ui.separator();

        let table_widget = &mut self.table_widget;
        if let Some(data) = self.data.as_mut() {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let column = (ui.available_width() / 2.0 - 16.0).max(320.0);
                egui::Grid::new("extraction_charts")
                    .num_columns(2)
                    .spacing([16.0, 16.0])
                    .min_col_width(column)
                    .max_col_width(column)
                    .show(ui, |ui| {
                        pie_chart(ui, "Sentiment Distribution", &data.sentiment);
                        pie_chart(ui, "Top 5 Extracted Requirements", &data.top);
                        ui.end_row();

                        line_chart(
                            ui,
                            "Distribution over Time",
                            &data.time,
                            "Time (MM/YYYY)",
                            "Number of Requirements",
                        );
                        bar_chart(
                            ui,
                            "Distribution Over Reviews",
                            &data.reviews,
                            "Requirements per Review",
                            "Number of Reviews",
                        );
                        ui.end_row();

                        bar_chart(
                            ui,
                            "Distribution Over Apps",
                            &data.apps,
                            "Apps",
                            "Number of Requirements",
                        );
                        bar_chart(
                            ui,
                            "Word Count Distribution",
                            &data.word_counts,
                            "Words per Requirement",
                            "Number of Requirements",
                        );
                        ui.end_row();
                    });

                ui.add_space(16.0);
                if table_widget.show(ui, &mut data.table) == Some(TableAction::Export) {
                    action = Some(RequirementsAction::Export);
                }
            });
        }

        action
    }

    fn show_error_card(&mut self, ui: &mut Ui, message: &str) -> Option<RequirementsAction> {
        let mut action = None;
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.set_max_width(420.0);
            ui.group(|ui| {
                ui.heading("Error Loading Data");
                ui.colored_label(egui::Color32::RED, message);
                ui.add_space(8.0);
                if ui.button("Retry Extraction").clicked() {
                    action = Some(RequirementsAction::Refresh);
                }
                if ui.button("Return to Upload").clicked() {
                    action = Some(RequirementsAction::GoUpload);
                }
            });
        });
        action
    }

    fn show_empty_card(&mut self, ui: &mut Ui) -> Option<RequirementsAction> {
        let mut action = None;
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.set_max_width(420.0);
            ui.group(|ui| {
                ui.heading("No Requirements Data Available");
                ui.label("Would you like to extract requirements from your file?");
                ui.add_space(8.0);
                if ui.button("Extract Requirements").clicked() {
                    action = Some(RequirementsAction::Refresh);
                }
                if ui.button("Upload New File").clicked() {
                    action = Some(RequirementsAction::GoUpload);
                }
            });
        });
        action
    }
}
