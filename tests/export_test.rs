use glam::{IVec2, Vec2};
use smokepaint::forcing::BrushAction;
use smokepaint::render::density_to_rgba8;
use smokepaint::{FluidSimulation, ImageExporter, Renderer, SmokeFluid};
use std::fs;

fn painted(size: usize) -> SmokeFluid {
    let mut sim = SmokeFluid::with_size(size, size);
    sim.apply_force(
        IVec2::new(size as i32 / 2, size as i32 / 2),
        3.0,
        Some(Vec2::new(1.0, 0.0)),
        [0.0, 1.0, 0.0, 1.0],
        BrushAction::Primary,
    );
    sim.advance();
    sim
}

#[test]
fn test_renderer_scales_density_to_output_size() {
    let sim = painted(16);
    let img = Renderer::new(64, 32).render_to_image(&sim);
    assert_eq!(img.dimensions(), (64, 32));

    // Center of the output maps to the painted center cell
    let pixel = img.get_pixel(32, 16);
    assert!(pixel.0[1] > 200, "center should be green, got {:?}", pixel.0);
    assert_eq!(pixel.0[3], 255);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn test_rgba8_matches_density_layout() {
    let sim = painted(8);
    let bytes = density_to_rgba8(sim.read_density());
    assert_eq!(bytes.len(), 8 * 8 * 4);
    assert!(bytes.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn test_frame_sequence_and_raw_dump() {
    let dir = std::env::temp_dir().join(format!("smokepaint_export_{}", std::process::id()));
    let exporter = ImageExporter::new(32, 32);
    let mut sim = painted(16);

    exporter.export_frame_sequence(&mut sim, 3, 0.016, &dir, "smoke").unwrap();
    for i in 0..3 {
        assert!(dir.join(format!("smoke_frame_{:04}.png", i)).exists(), "frame {} missing", i);
    }
    assert_eq!(sim.frame(), 4);
    assert_eq!(FluidSimulation::width(&sim), 16);

    let raw = dir.join("density.f32");
    exporter.export_density_raw(&sim, &raw).unwrap();
    assert_eq!(fs::metadata(&raw).unwrap().len(), (16 * 16 * 4 * 4) as u64);

    let velocity = dir.join("velocity.png");
    exporter.export_velocity_png(&sim, &velocity).unwrap();
    assert!(velocity.exists());

    fs::remove_dir_all(&dir).unwrap();
}
