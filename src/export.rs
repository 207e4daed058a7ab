use crate::render::Renderer;
use crate::{FluidSimulation, Grid, SmokeFluid};
use std::path::Path;

/// Read-only view of the fields the exporters and metrics consume.
pub trait FluidData {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// RGBA, four values per cell.
    fn density(&self) -> &[f32];
    /// `(width + 1) * height` horizontal face velocities.
    fn velocity_x(&self) -> &[f32];
    /// `width * (height + 1)` vertical face velocities.
    fn velocity_y(&self) -> &[f32];
}

impl FluidData for Grid {
    fn width(&self) -> usize {
        Grid::width(self)
    }

    fn height(&self) -> usize {
        Grid::height(self)
    }

    fn density(&self) -> &[f32] {
        Grid::density(self)
    }

    fn velocity_x(&self) -> &[f32] {
        self.vel_x()
    }

    fn velocity_y(&self) -> &[f32] {
        self.vel_y()
    }
}

impl FluidData for SmokeFluid {
    fn width(&self) -> usize {
        self.grid().width()
    }

    fn height(&self) -> usize {
        self.grid().height()
    }

    fn density(&self) -> &[f32] {
        self.grid().density()
    }

    fn velocity_x(&self) -> &[f32] {
        self.grid().vel_x()
    }

    fn velocity_y(&self) -> &[f32] {
        self.grid().vel_y()
    }
}

pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_density_png(
        &self,
        simulation: &impl FluidData,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let img = self.renderer.render_to_image(simulation);
        img.save(path)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }

    pub fn export_velocity_png(
        &self,
        simulation: &impl FluidData,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let img = self.renderer.render_velocity_field(simulation);
        img.save(path)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Dump the raw little-endian `f32` density buffer.
    pub fn export_density_raw(
        &self,
        simulation: &impl FluidData,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let bytes: &[u8] = bytemuck::cast_slice(simulation.density());
        std::fs::write(path, bytes)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    pub fn export_frame_sequence(
        &self,
        simulation: &mut (impl FluidData + FluidSimulation),
        steps: usize,
        dt: f32,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::create_dir_all(output_dir)?;
        for i in 0..steps {
            simulation.step(dt);

            let filename = format!("{}_frame_{:04}.png", prefix, i);
            let path = output_dir.join(filename);

            self.export_density_png(&*simulation, &path)?;
        }
        log::info!("Exported {} frames to {}", steps, output_dir.display());
        Ok(())
    }
}
