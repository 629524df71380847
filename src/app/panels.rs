//! Heatmap plots, one per dataset

use eframe::egui;
use egui_plot::{Plot, PlotImage, PlotPoint};

use super::HeatmapApp;
use crate::theme::{colors, plot_fill};

impl HeatmapApp {
    pub(crate) fn render_panels(&self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let count = self.panels.len().max(1) as f32;
        let panel_height = (available.y - 4.0 * (count - 1.0)) / count;

        for idx in 0..self.panels.len() {
            if idx > 0 {
                ui.add_space(4.0);
            }
            ui.allocate_ui(egui::vec2(available.x, panel_height), |ui| {
                self.render_heatmap(ui, idx);
            });
        }
    }

    fn render_heatmap(&self, ui: &mut egui::Ui, idx: usize) {
        let panel = &self.panels[idx];
        let [[x0, x1], [y0, y1]] = self.renderer.range();

        ui.label(
            egui::RichText::new(&panel.label)
                .color(colors::TEXT_MUTED)
                .size(12.0),
        );

        ui.visuals_mut().extreme_bg_color = plot_fill(self.renderer.colormap());

        Plot::new(("heatmap", idx))
            .show_axes([true, true])
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_background(true)
            .include_x(x0)
            .include_x(x1)
            .include_y(y0)
            .include_y(y1)
            .label_formatter(|_name, value| format!("x={:.3} y={:.3}", value.x, value.y))
            .show(ui, |plot_ui| {
                let Some(texture) = &panel.texture else {
                    return;
                };
                let center = PlotPoint::new((x0 + x1) / 2.0, (y0 + y1) / 2.0);
                let size = egui::vec2((x1 - x0) as f32, (y1 - y0) as f32);
                plot_ui.image(PlotImage::new(texture.id(), center, size));
            });
    }
}
