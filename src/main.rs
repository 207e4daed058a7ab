use anyhow::Context;
use glam::IVec2;
use smokepaint::config::{self, SimConfig};
use smokepaint::forcing::{BrushAction, PointerTracker};
use smokepaint::{AnalysisRecorder, ImageExporter, SmokeApp, SmokeFluid};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match config::load(Path::new(config::DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring {}: {}", config::DEFAULT_CONFIG_PATH, e);
            SimConfig::default()
        }
    };

    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("headless") {
        let frames = args
            .get(2)
            .map(|s| s.parse::<usize>())
            .transpose()
            .context("frame count must be a non-negative integer")?
            .unwrap_or(60);
        run_headless(&config, frames)
    } else {
        run_gui(config)
    }
}

/// Drag a painting brush once around a circle and export every frame.
fn run_headless(config: &SimConfig, frames: usize) -> anyhow::Result<()> {
    log::info!(
        "Running {} headless frames on a {}x{} grid",
        frames,
        config.grid.width,
        config.grid.height
    );

    let mut simulation = SmokeFluid::new(config);
    let exporter = ImageExporter::new(config.grid.width as u32 * 2, config.grid.height as u32 * 2);
    let mut recorder = AnalysisRecorder::new();
    let mut tracker = PointerTracker::new();

    let out_dir = Path::new("headless_output");
    std::fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let center = glam::Vec2::new(config.grid.width as f32, config.grid.height as f32) * 0.5;
    let orbit = center.min_element() * 0.5;

    recorder.record_frame(&simulation, 0).log_summary();
    for frame in 1..=frames {
        let angle = frame as f32 / frames.max(1) as f32 * std::f32::consts::TAU;
        let pos = center + orbit * glam::Vec2::new(angle.cos(), angle.sin());
        tracker.update(Some(IVec2::new(pos.x as i32, pos.y as i32)), Some(BrushAction::Primary));

        let brush = simulation.brush;
        if let Some(stamp) = tracker.brush(brush.radius, brush.color, brush.strength) {
            simulation.apply_brush(stamp);
        }
        simulation.advance();

        let path = out_dir.join(format!("frame_{:04}.png", frame));
        exporter
            .export_density_png(&simulation, &path)
            .map_err(|e| anyhow::anyhow!("exporting {}: {}", path.display(), e))?;

        let metrics = recorder.record_frame(&simulation, frame);
        if frame % 10 == 0 {
            metrics.log_summary();
        }
    }

    exporter
        .export_velocity_png(&simulation, &out_dir.join("velocity_final.png"))
        .map_err(|e| anyhow::anyhow!("exporting velocity: {}", e))?;
    recorder.log_trends();
    log::info!("Wrote {} frames to {}", frames, out_dir.display());
    Ok(())
}

fn run_gui(config: SimConfig) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 900.0])
            .with_title("smokepaint")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native("smokepaint", options, Box::new(move |_cc| Box::new(SmokeApp::new(config))))
        .map_err(|e| anyhow::anyhow!("eframe failed: {}", e))
}
