use crate::services::ChartPoint;
use crate::ui::widgets::{series_color, truncate_label};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

const CHART_HEIGHT: f32 = 240.0;
const LEFT_MARGIN: f32 = 44.0;
const BOTTOM_MARGIN: f32 = 34.0;
const TOP_MARGIN: f32 = 10.0;

/// Vertical bar chart over category counts, painted directly like the
/// rest of the chart widgets.
pub fn bar_chart(ui: &mut Ui, title: &str, points: &[ChartPoint], x_label: &str, y_label: &str) {
    ui.group(|ui| {
        ui.strong(title);

        if points.is_empty() {
            ui.label("No data");
            return;
        }

        let width = ui.available_width().max(240.0);
        let (response, painter) =
            ui.allocate_painter(Vec2::new(width, CHART_HEIGHT), Sense::hover());
        let rect = response.rect;

        let plot = Rect::from_min_max(
            Pos2::new(rect.left() + LEFT_MARGIN, rect.top() + TOP_MARGIN),
            Pos2::new(rect.right() - 8.0, rect.bottom() - BOTTOM_MARGIN),
        );

        let max_value = points.iter().map(|p| p.value).max().unwrap_or(0).max(1);

        // Axes and midline
        let axis_stroke = Stroke::new(1.0, Color32::GRAY);
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
        painter.line_segment([plot.left_top(), plot.left_bottom()], axis_stroke);
        for (frac, value) in [(0.0, 0), (0.5, max_value / 2), (1.0, max_value)] {
            let y = plot.bottom() - plot.height() * frac as f32;
            painter.text(
                Pos2::new(plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                value.to_string(),
                FontId::proportional(10.0),
                Color32::GRAY,
            );
        }

        let slot = plot.width() / points.len() as f32;
        let bar_width = (slot * 0.7).min(60.0);

        for (i, point) in points.iter().enumerate() {
            let height = plot.height() * point.value as f32 / max_value as f32;
            let center_x = plot.left() + slot * (i as f32 + 0.5);
            let bar = Rect::from_min_max(
                Pos2::new(center_x - bar_width / 2.0, plot.bottom() - height),
                Pos2::new(center_x + bar_width / 2.0, plot.bottom()),
            );
            painter.rect_filled(bar, 2.0, series_color(&point.name, i));

            painter.text(
                Pos2::new(center_x, bar.top() - 2.0),
                Align2::CENTER_BOTTOM,
                point.value.to_string(),
                FontId::proportional(10.0),
                Color32::DARK_GRAY,
            );
            painter.text(
                Pos2::new(center_x, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                truncate_label(&point.name, 10),
                FontId::proportional(10.0),
                Color32::GRAY,
            );
        }

        painter.text(
            Pos2::new(plot.center().x, rect.bottom() - 4.0),
            Align2::CENTER_BOTTOM,
            x_label,
            FontId::proportional(11.0),
            Color32::DARK_GRAY,
        );
        painter.text(
            Pos2::new(rect.left() + 2.0, rect.top()),
            Align2::LEFT_TOP,
            y_label,
            FontId::proportional(11.0),
            Color32::DARK_GRAY,
        );

        // Hover readout for crowded charts
        if let Some(pointer) = response.hover_pos() {
            if plot.contains(pointer) {
                let index = ((pointer.x - plot.left()) / slot) as usize;
                if let Some(point) = points.get(index.min(points.len() - 1)) {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        egui::Id::new("bar_chart_tooltip"),
                        |ui| {
                            ui.label(format!("{}: {}", point.name, point.value));
                        },
                    );
                }
            }
        }
    });
}
