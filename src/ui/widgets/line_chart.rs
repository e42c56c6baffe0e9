use crate::services::ChartPoint;
use crate::ui::widgets::truncate_label;
use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

const CHART_HEIGHT: f32 = 240.0;
const LEFT_MARGIN: f32 = 44.0;
const BOTTOM_MARGIN: f32 = 34.0;
const TOP_MARGIN: f32 = 10.0;
const LINE_COLOR: Color32 = Color32::from_rgb(99, 102, 241);

/// Line chart over an ordered series, one marker per category.
pub fn line_chart(ui: &mut Ui, title: &str, points: &[ChartPoint], x_label: &str, y_label: &str) {
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

        let step = if points.len() > 1 {
            plot.width() / (points.len() - 1) as f32
        } else {
            0.0
        };
        let position = |i: usize, value: u64| {
            let x = if points.len() > 1 {
                plot.left() + step * i as f32
            } else {
                plot.center().x
            };
            let y = plot.bottom() - plot.height() * value as f32 / max_value as f32;
            Pos2::new(x, y)
        };

        for window in points.windows(2).enumerate() {
            let (i, pair) = window;
            painter.line_segment(
                [position(i, pair[0].value), position(i + 1, pair[1].value)],
                Stroke::new(2.0, LINE_COLOR),
            );
        }
        for (i, point) in points.iter().enumerate() {
            painter.circle_filled(position(i, point.value), 3.0, LINE_COLOR);
        }

        // Thin out x labels when the series is dense
        let label_every = points.len().div_ceil(8).max(1);
        for (i, point) in points.iter().enumerate() {
            if i % label_every != 0 && i != points.len() - 1 {
                continue;
            }
            painter.text(
                Pos2::new(position(i, 0).x, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                truncate_label(&point.name, 9),
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
    });
}
