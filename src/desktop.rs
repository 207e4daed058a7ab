use crate::config::{self, SimConfig};
use crate::forcing::{BrushAction, PointerTracker};
use crate::render::density_to_rgba8;
use crate::SmokeFluid;
use eframe::egui;
use glam::{IVec2, Vec2};
use rand::Rng;
use std::path::Path;

pub struct SmokeApp {
    simulation: SmokeFluid,
    config: SimConfig,
    tracker: PointerTracker,
    texture: Option<egui::TextureHandle>,
    paused: bool,
    cell_size: f32, // screen pixels per grid cell
    status: String,
}

impl SmokeApp {
    pub fn new(config: SimConfig) -> Self {
        Self {
            simulation: SmokeFluid::new(&config),
            config,
            tracker: PointerTracker::new(),
            texture: None,
            paused: false,
            cell_size: 3.0,
            status: String::new(),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                self.paused = !self.paused;
            }
            if ui.button("Step").clicked() {
                self.simulation.advance();
            }
            if ui.button("Splash").clicked() {
                self.splash();
            }
            if ui.button("Reset").clicked() {
                self.simulation.reset();
            }
            if ui.button("Save Config").clicked() {
                self.save_config();
            }
            ui.add(egui::Slider::new(&mut self.cell_size, 1.0..=8.0).text("Zoom"));
        });

        let params = &mut self.simulation.params;
        ui.horizontal(|ui| {
            ui.add(egui::Slider::new(&mut params.decay, 0.9..=1.0).text("Decay"));
            ui.add(egui::Slider::new(&mut params.timestep, 0.001..=0.1).text("Timestep"));
            ui.add(egui::Slider::new(&mut params.iterations, 0..=100).text("Iterations"));
        });

        let brush = &mut self.simulation.brush;
        ui.horizontal(|ui| {
            let radius_range = config::MIN_BRUSH_RADIUS..=config::MAX_BRUSH_RADIUS;
            ui.add(egui::Slider::new(&mut brush.radius, radius_range).text("Radius"));
            ui.add(egui::Slider::new(&mut brush.strength, 0.0..=1000.0).text("Strength"));
            ui.label("Color:");
            ui.color_edit_button_rgba_unmultiplied(&mut brush.color);
        });
    }

    /// Drop a randomly colored, randomly pushed blob somewhere on the grid.
    fn splash(&mut self) {
        let mut rng = rand::thread_rng();
        let cell = IVec2::new(
            rng.gen_range(0..self.simulation.width()) as i32,
            rng.gen_range(0..self.simulation.height()) as i32,
        );
        let color = [
            rng.gen_range(0.2..1.0),
            rng.gen_range(0.2..1.0),
            rng.gen_range(0.2..1.0),
            1.0,
        ];
        let push = Vec2::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
        let radius = self.simulation.brush.radius;
        self.simulation.apply_force(cell, radius, Some(push), color, BrushAction::Primary);
    }

    fn save_config(&mut self) {
        self.config.solver = self.simulation.params;
        self.config.brush = self.simulation.brush;
        self.status = match self.config.save(Path::new(config::DEFAULT_CONFIG_PATH)) {
            Ok(()) => format!("Saved {}", config::DEFAULT_CONFIG_PATH),
            Err(e) => {
                log::warn!("Could not save config: {}", e);
                format!("Save failed: {}", e)
            }
        };
    }

    fn import_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let result = if let Some(bytes) = &file.bytes {
                self.simulation.load_density_bytes(bytes)
            } else if let Some(path) = &file.path {
                self.simulation.load_density_file(path)
            } else {
                continue;
            };

            let name = file
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or(file.name.clone());
            self.status = match result {
                Ok(()) => format!("Imported {}", name),
                Err(e) => {
                    log::warn!("Rejected dropped image {}: {}", name, e);
                    format!("Import failed: {}", e)
                }
            };
        }
    }

    fn upload_density(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let size = [self.simulation.width(), self.simulation.height()];
        let pixels = density_to_rgba8(self.simulation.read_density());
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
        let options = egui::TextureOptions::NEAREST;

        let texture = self.texture.get_or_insert_with(|| {
            ctx.load_texture("density", egui::ColorImage::new(size, egui::Color32::BLACK), options)
        });
        texture.set(image, options);
        texture.id()
    }
}

impl eframe::App for SmokeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.import_dropped_files(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("smokepaint");
            self.controls(ui);
            ui.separator();

            let canvas = egui::Vec2::new(
                self.simulation.width() as f32 * self.cell_size,
                self.simulation.height() as f32 * self.cell_size,
            );
            let (rect, response) = ui.allocate_exact_size(canvas, egui::Sense::click_and_drag());

            if response.hovered() {
                // Browser-style wheel delta: positive shrinks the brush
                let scroll = ctx.input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    self.simulation.brush.scroll_radius(-scroll);
                }
            }

            let action = if response.is_pointer_button_down_on() {
                let secondary = ctx.input(|i| i.pointer.secondary_down());
                Some(if secondary { BrushAction::Secondary } else { BrushAction::Primary })
            } else {
                None
            };
            let cell = response
                .interact_pointer_pos()
                .or(response.hover_pos())
                .map(|pos| {
                    IVec2::new(
                        ((pos.x - rect.left()) / self.cell_size).floor() as i32,
                        ((pos.y - rect.top()) / self.cell_size).floor() as i32,
                    )
                });
            self.tracker.update(cell, action);

            let settings = self.simulation.brush;
            let stamp = self
                .tracker
                .brush(settings.radius, settings.color, settings.strength);
            if let Some(brush) = stamp {
                self.simulation.apply_brush(brush);
            }

            if !self.paused {
                self.simulation.advance();
            }

            let texture = self.upload_density(ctx);
            let painter = ui.painter_at(rect);
            painter.image(
                texture,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            if let Some(pos) = response.hover_pos() {
                painter.circle_stroke(
                    pos,
                    settings.radius * self.cell_size,
                    egui::Stroke::new(1.0, egui::Color32::from_gray(180)),
                );
            }

            ui.label(format!(
                "Frame: {} | {}x{} | Left drag: paint | Right drag: push | Wheel: radius {:.0} | Drop an image to load it {}",
                self.simulation.frame(),
                self.simulation.width(),
                self.simulation.height(),
                self.simulation.brush.radius,
                self.status
            ));
        });

        ctx.request_repaint();
    }
}
