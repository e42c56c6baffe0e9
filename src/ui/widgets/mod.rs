pub mod bar_chart;
pub mod line_chart;
pub mod pie_chart;
pub mod req_table;
pub mod stat_card;

use eframe::egui::Color32;

/// Shared series palette, cycled when a chart has more categories
/// than colors.
pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(99, 102, 241),
    Color32::from_rgb(16, 185, 129),
    Color32::from_rgb(244, 114, 182),
    Color32::from_rgb(251, 191, 36),
    Color32::from_rgb(56, 189, 248),
    Color32::from_rgb(248, 113, 113),
];

/// Sentiment labels get stable colors so the pies read consistently;
/// anything else falls back to the palette.
pub fn series_color(name: &str, index: usize) -> Color32 {
    match name {
        "positive" => Color32::from_rgb(76, 175, 80),
        "negative" => Color32::from_rgb(244, 67, 54),
        "neutral" => Color32::from_rgb(255, 193, 7),
        _ => PALETTE[index % PALETTE.len()],
    }
}

pub(crate) fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let head: String = name.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_colors_are_fixed() {
        assert_eq!(series_color("positive", 3), Color32::from_rgb(76, 175, 80));
        assert_eq!(series_color("negative", 0), Color32::from_rgb(244, 67, 54));
        assert_eq!(series_color("neutral", 5), Color32::from_rgb(255, 193, 7));
        // Non-sentiment names cycle the palette.
        assert_eq!(series_color("Maps", 7), PALETTE[1]);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("a very long category", 8), "a very …");
    }
}
