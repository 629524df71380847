//! Dark theme for the heatmap viewer
//!
//! Greyscale chrome so the only colour on screen comes from the heatmaps.
//! Plot areas are filled with the low end of the active colour ramp, so
//! the space around an empty frame reads as "no density".

use egui::Color32;

use crate::core::Colormap;

pub mod colors {
    use super::Color32;

    // === Backgrounds ===
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(12, 12, 12);
    pub const BG_HOVER: Color32 = Color32::from_rgb(24, 24, 24);

    // === Text ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(80, 80, 80);

    pub const BORDER: Color32 = Color32::from_rgb(40, 40, 40);

    // === Playback state ===
    pub const PLAYING: Color32 = Color32::from_rgb(100, 200, 100);
    pub const PAUSED: Color32 = Color32::from_rgb(200, 200, 100);
}

/// Background behind a heatmap: the colour `vmin` maps to
pub fn plot_fill(colormap: Colormap) -> Color32 {
    let [r, g, b] = colormap.sample(0.0);
    Color32::from_rgb(r, g, b)
}

/// egui Visuals matching the palette above
pub fn viewer_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_PRIMARY;
    visuals.faint_bg_color = BG_ELEVATED;
    visuals.override_text_color = Some(TEXT_PRIMARY);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_fill = BG_PRIMARY;
    widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    widgets.inactive.bg_fill = BG_PRIMARY;
    widgets.inactive.weak_bg_fill = BG_PRIMARY;
    widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);

    widgets.hovered.bg_fill = BG_ELEVATED;
    widgets.hovered.weak_bg_fill = BG_ELEVATED;
    widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    widgets.hovered.bg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);

    widgets.active.bg_fill = BG_HOVER;
    widgets.active.weak_bg_fill = BG_HOVER;
    widgets.active.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    widgets.active.bg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);

    visuals.selection.bg_fill = Color32::from_rgb(60, 60, 60);
    visuals.selection.stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_fill_follows_ramp_floor() {
        assert_eq!(plot_fill(Colormap::Greys), Color32::BLACK);
        let [r, g, b] = Colormap::Viridis.sample(0.0);
        assert_eq!(plot_fill(Colormap::Viridis), Color32::from_rgb(r, g, b));
        assert_ne!(plot_fill(Colormap::Viridis), colors::BG_PRIMARY);
    }
}
