//! Heatmap viewer
//!
//! Shows one density heatmap per dataset, stacked vertically and animated in
//! lockstep over the time steps both datasets share.
//!
//! x runs along the horizontal axis and y along the vertical one, with both
//! axes labelled in concentration units. Plots made with
//! `imshow(H, origin='lower')` on a raw `histogram2d` grid show the same
//! picture transposed, with x going up the page.

mod header;
mod panels;

use eframe::egui;
use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::core::{shared_frame_count, Colormap, Ensemble, FrameRenderer, Playback, RgbaImage};
use crate::error::{Error, Result};
use crate::theme::{colors, viewer_visuals};

/// One dataset and the texture its current frame is drawn into
pub(crate) struct Panel {
    pub label: String,
    pub ensemble: Ensemble,
    pub texture: Option<egui::TextureHandle>,
    /// Frame the texture currently shows
    pub rendered_frame: Option<usize>,
}

pub struct HeatmapApp {
    pub(crate) panels: Vec<Panel>,
    pub(crate) renderer: FrameRenderer,
    pub(crate) playback: Playback,
    pub(crate) fps_counter: header::FpsCounter,
    /// Selected in the header; applied to the renderer on change
    pub(crate) colormap: Colormap,
}

fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.pixels)
}

impl HeatmapApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        datasets: Vec<(String, Ensemble)>,
        config: &ViewerConfig,
        colormap: Colormap,
    ) -> Self {
        cc.egui_ctx.set_visuals(viewer_visuals());

        let frame_count = {
            let ensembles: Vec<&Ensemble> = datasets.iter().map(|(_, e)| e).collect();
            shared_frame_count(&ensembles, config.max_frames)
        };
        info!(
            panels = datasets.len(),
            frames = frame_count,
            interval_ms = config.interval_ms,
            "Viewer ready"
        );

        let panels = datasets
            .into_iter()
            .map(|(label, ensemble)| Panel {
                label,
                ensemble,
                texture: None,
                rendered_frame: None,
            })
            .collect();

        Self {
            panels,
            renderer: FrameRenderer::new(config, colormap),
            playback: Playback::new(
                frame_count,
                std::time::Duration::from_millis(config.interval_ms),
            ),
            fps_counter: header::FpsCounter::new(),
            colormap,
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Space) {
                self.playback.toggle();
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                self.playback.pause();
                self.playback.step_forward();
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.playback.pause();
                self.playback.step_back();
            }
        });
    }

    /// Re-bin and upload any panel whose texture is stale
    fn refresh_textures(&mut self, ctx: &egui::Context) {
        if self.colormap != self.renderer.colormap() {
            debug!(colormap = %self.colormap, "Colormap changed");
            self.renderer.set_colormap(self.colormap);
            for panel in &mut self.panels {
                panel.rendered_frame = None;
            }
        }

        let frame = self.playback.frame();
        for (idx, panel) in self.panels.iter_mut().enumerate() {
            if panel.rendered_frame == Some(frame) {
                continue;
            }
            let image = to_color_image(&self.renderer.render(&panel.ensemble, frame));
            match &mut panel.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                None => {
                    panel.texture = Some(ctx.load_texture(
                        format!("heatmap_{idx}"),
                        image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
            }
            panel.rendered_frame = Some(frame);
        }
    }
}

impl eframe::App for HeatmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.handle_keys(ctx);
        self.playback.tick(now);
        self.refresh_textures(ctx);

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(6.0))
            .show(ctx, |ui| {
                self.render_header(ui, now);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY).inner_margin(6.0))
            .show(ctx, |ui| {
                self.render_panels(ui);
            });

        // Idle while paused; otherwise wake up when the next frame is due
        if let Some(wait) = self.playback.until_next(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// Open the viewer window and block until it is closed
pub fn run(
    datasets: Vec<(String, Ensemble)>,
    config: ViewerConfig,
    colormap: Colormap,
) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Brusselator")
            .with_inner_size([720.0, 960.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Brusselator",
        options,
        Box::new(move |cc| Ok(Box::new(HeatmapApp::new(cc, datasets, &config, colormap)))),
    )
    .map_err(|e| Error::Viewer(e.to_string()))
}
