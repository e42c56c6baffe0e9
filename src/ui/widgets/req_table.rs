use crate::domain::record::Sentiment;
use crate::domain::table::RecordTable;
use eframe::egui::{self, Color32, TextEdit, Ui};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableAction {
    Export,
}

/// Renders a `RecordTable`: search box, download button, the record
/// grid, and the pagination strip. All table state lives in the model;
/// this widget only holds the text-edit buffer.
pub struct ReqTable {
    search_input: String,
}

impl Default for ReqTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqTable {
    pub fn new() -> Self {
        Self {
            search_input: String::new(),
        }
    }

    pub fn reset_search(&mut self) {
        self.search_input.clear();
    }

    pub fn show(&mut self, ui: &mut Ui, table: &mut RecordTable) -> Option<TableAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Extracted Requirements");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⬇ Download CSV").clicked() {
                    action = Some(TableAction::Export);
                }
                let search = ui.add(
                    TextEdit::singleline(&mut self.search_input)
                        .hint_text("Search requirements...")
                        .desired_width(220.0),
                );
                if search.changed() {
                    table.set_search_term(self.search_input.clone());
                }
            });
        });

        ui.separator();

        egui::ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("req_table")
                .striped(true)
                .min_col_width(80.0)
                .show(ui, |ui| {
                    ui.strong("App");
                    ui.strong("Review");
                    ui.strong("Date");
                    ui.strong("Total Requirements");
                    ui.strong("Requirement");
                    ui.strong("Sentiment");
                    ui.end_row();

                    for record in table.current_records() {
                        ui.label(&record.app);
                        ui.add(
                            egui::Label::new(&record.review).wrap(true),
                        );
                        ui.label(&record.date);
                        ui.label(record.total_requirements().to_string());
                        ui.vertical(|ui| {
                            for req in &record.requirements {
                                ui.label(format!("• {}", req.requirement));
                            }
                        });
                        ui.vertical(|ui| {
                            for req in &record.requirements {
                                ui.colored_label(
                                    sentiment_color(req.sentiment),
                                    req.sentiment.as_str(),
                                );
                            }
                        });
                        ui.end_row();
                    }
                });
        });

        ui.separator();
        self.pagination(ui, table);

        action
    }

    fn pagination(&self, ui: &mut Ui, table: &mut RecordTable) {
        ui.horizontal(|ui| {
            let (first, last) = table.page_range();
            ui.label(format!(
                "Showing {} to {} of {} results",
                first,
                last,
                table.filtered_count()
            ));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let current = table.current_page();
                let total = table.total_pages();

                if ui
                    .add_enabled(current < total, egui::Button::new("▶"))
                    .clicked()
                {
                    table.next_page();
                }
                // Right-to-left layout, so emit page buttons in reverse
                for page in table.page_numbers().into_iter().rev() {
                    if ui
                        .selectable_label(page == current, page.to_string())
                        .clicked()
                    {
                        table.go_to_page(page);
                    }
                }
                if ui
                    .add_enabled(current > 1, egui::Button::new("◀"))
                    .clicked()
                {
                    table.prev_page();
                }
            });
        });
    }
}

fn sentiment_color(sentiment: Sentiment) -> Color32 {
    match sentiment {
        Sentiment::Positive => Color32::from_rgb(76, 175, 80),
        Sentiment::Negative => Color32::from_rgb(244, 67, 54),
        Sentiment::Neutral => Color32::from_rgb(255, 193, 7),
    }
}
