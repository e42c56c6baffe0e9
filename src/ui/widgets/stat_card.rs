use eframe::egui::{RichText, Ui};

/// Single-number summary card, e.g. the average review word count.
pub fn stat_card(ui: &mut Ui, name: &str, value: &str) {
    ui.group(|ui| {
        ui.label(name);
        ui.label(RichText::new(value).size(32.0).strong());
    });
}
