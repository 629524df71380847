//! Header bar with playback controls and status

use eframe::egui;

use super::HeatmapApp;
use crate::core::Colormap;
use crate::theme::colors;

impl HeatmapApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui, now: f64) {
        self.fps_counter.tick(now);

        ui.horizontal(|ui| {
            // LEFT: playback controls
            let play_text = if self.playback.is_playing() { "Pause" } else { "Play" };
            if ui.button(egui::RichText::new(play_text)).clicked() {
                self.playback.toggle();
            }
            if ui.button("<").clicked() {
                self.playback.pause();
                self.playback.step_back();
            }
            if ui.button(">").clicked() {
                self.playback.pause();
                self.playback.step_forward();
            }

            let last = self.playback.frame_count().saturating_sub(1);
            let mut frame = self.playback.frame();
            let seek = ui.add(
                egui::Slider::new(&mut frame, 0..=last)
                    .show_value(false)
                    .clamping(egui::SliderClamping::Always),
            );
            if seek.changed() {
                self.playback.pause();
                self.playback.seek(frame);
            }

            ui.add_space(10.0);

            egui::ComboBox::from_id_salt("colormap")
                .selected_text(self.colormap.label())
                .show_ui(ui, |ui| {
                    for &colormap in Colormap::ALL {
                        ui.selectable_value(&mut self.colormap, colormap, colormap.label());
                    }
                });

            // RIGHT: status (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(colors::TEXT_SECONDARY),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{} ms", self.playback.interval().as_millis()))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!(
                        "frame {}/{}",
                        self.playback.frame(),
                        self.playback.frame_count()
                    ))
                    .monospace()
                    .color(colors::TEXT_MUTED),
                );

                ui.add_space(10.0);

                let (status_color, status_text) = if self.playback.is_playing() {
                    (colors::PLAYING, "Playing")
                } else {
                    (colors::PAUSED, "Paused")
                };
                ui.colored_label(status_color, egui::RichText::new(status_text));
            });
        });
    }
}

/// Frames drawn per second over the last 60 repaints
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(60),
        }
    }

    /// Record a repaint at `now` seconds
    pub fn tick(&mut self, now: f64) {
        self.frames.push(now);
        if self.frames.len() > 60 {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
