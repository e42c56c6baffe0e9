use crate::services::ChartPoint;
use crate::ui::widgets::{series_color, truncate_label};
use eframe::egui::{self, Pos2, Sense, Stroke, Ui, Vec2};
use std::f32::consts::TAU;

const CHART_HEIGHT: f32 = 240.0;
const ARC_STEP: f32 = TAU / 64.0;

/// Pie chart with a legend. Slice colors follow `series_color`, so
/// sentiment pies keep their conventional green/red/yellow.
pub fn pie_chart(ui: &mut Ui, title: &str, points: &[ChartPoint]) {
    ui.group(|ui| {
        ui.strong(title);

        let total: u64 = points.iter().map(|p| p.value).sum();
        if total == 0 {
            ui.label("No data");
            return;
        }

        ui.horizontal(|ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(CHART_HEIGHT, CHART_HEIGHT), Sense::hover());
            let rect = response.rect;
            let center = rect.center();
            let radius = rect.height() / 2.0 - 10.0;

            let mut start_angle = -TAU / 4.0; // 12 o'clock
            for (i, point) in points.iter().enumerate() {
                if point.value == 0 {
                    continue;
                }
                let sweep = TAU * point.value as f32 / total as f32;

                // Wedge as a fan of arc samples; a sector is convex.
                let mut vertices = vec![center];
                let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
                for s in 0..=steps {
                    let angle = start_angle + sweep * s as f32 / steps as f32;
                    vertices.push(Pos2::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }
                painter.add(egui::Shape::convex_polygon(
                    vertices,
                    series_color(&point.name, i),
                    Stroke::NONE,
                ));

                start_angle += sweep;
            }

            // Legend with counts and shares
            ui.vertical(|ui| {
                for (i, point) in points.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.colored_label(series_color(&point.name, i), "■");
                        let share = 100.0 * point.value as f64 / total as f64;
                        ui.label(format!(
                            "{} — {} ({:.1}%)",
                            truncate_label(&point.name, 24),
                            point.value,
                            share
                        ));
                    });
                }
            });
        });
    });
}
