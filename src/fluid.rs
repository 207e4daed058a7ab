//! Frame driver: owns the grid and runs one full solver cycle per step.

use crate::FluidSimulation;
use crate::advect::{advect_density, advect_velocity};
use crate::config::{BrushSettings, SimConfig, SolverParams};
use crate::decay::decay_density;
use crate::forcing::{Brush, BrushAction, apply_force};
use crate::grid::Grid;
use crate::import::{self, ImportError};
use crate::project::{compute_divergence, relax_pressure, subtract_gradient};
use glam::{IVec2, Vec2};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SmokeFluid {
    grid: Grid,
    pub params: SolverParams,
    pub brush: BrushSettings,
    pending: Option<Brush>,
    frame: usize,
}

impl FluidSimulation for SmokeFluid {
    fn step(&mut self, dt: f32) {
        self.step(dt)
    }

    fn apply_force(
        &mut self,
        cell: IVec2,
        radius: f32,
        pointer_velocity: Option<Vec2>,
        color: [f32; 4],
        action: BrushAction,
    ) {
        self.apply_force(cell, radius, pointer_velocity, color, action)
    }

    fn read_density(&self) -> &[f32] {
        self.read_density()
    }

    fn width(&self) -> usize {
        self.width()
    }

    fn height(&self) -> usize {
        self.height()
    }
}

impl SmokeFluid {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            grid: Grid::new(config.grid.width, config.grid.height),
            params: config.solver,
            brush: config.brush,
            pending: None,
            frame: 0,
        }
    }

    /// Default parameters on a `width x height` grid.
    pub fn with_size(width: usize, height: usize) -> Self {
        let mut config = SimConfig::default();
        config.grid.width = width;
        config.grid.height = height;
        Self::new(&config)
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct access for seeding fields. Do not call mid-step.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Steps completed since creation or the last reset.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Queue a brush stamp for the next step, using the current brush
    /// strength. A later call before the step replaces it.
    pub fn apply_force(
        &mut self,
        cell: IVec2,
        radius: f32,
        pointer_velocity: Option<Vec2>,
        color: [f32; 4],
        action: BrushAction,
    ) {
        self.pending = Some(Brush {
            cell,
            velocity: pointer_velocity,
            radius,
            color,
            strength: self.brush.strength,
            action,
        });
    }

    /// Queue a fully specified brush for the next step.
    pub fn apply_brush(&mut self, brush: Brush) {
        self.pending = Some(brush);
    }

    pub fn pending_brush(&self) -> Option<&Brush> {
        self.pending.as_ref()
    }

    /// Advance exactly one frame.
    pub fn step(&mut self, dt: f32) {
        if let Some(brush) = self.pending.take() {
            apply_force(&mut self.grid, &brush);
        }

        advect_velocity(&mut self.grid, dt);
        advect_density(&mut self.grid, dt);

        // Divergence must see the fully advected velocity of this frame
        compute_divergence(&mut self.grid, self.params.cell_size);
        relax_pressure(&mut self.grid, self.params.iterations);
        subtract_gradient(&mut self.grid, self.params.cell_size);

        decay_density(&mut self.grid, self.params.decay);

        self.frame += 1;
        log::trace!("step {} done (dt = {})", self.frame, dt);
    }

    /// Advance one frame with the configured timestep.
    pub fn advance(&mut self) {
        self.step(self.params.timestep)
    }

    /// RGBA density, `width * height * 4` values in row-major cell order.
    pub fn read_density(&self) -> &[f32] {
        self.grid.density()
    }

    pub fn load_density_image(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), ImportError> {
        import::load_density_image(&mut self.grid, pixels, width, height)
    }

    pub fn load_density_bytes(&mut self, bytes: &[u8]) -> Result<(), ImportError> {
        import::load_density_bytes(&mut self.grid, bytes)
    }

    pub fn load_density_file(&mut self, path: &Path) -> Result<(), ImportError> {
        import::load_density_file(&mut self.grid, path)
    }

    /// Zero every field and forget any queued brush.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.pending = None;
        self.frame = 0;
        log::info!("Simulation reset ({}x{})", self.width(), self.height());
    }
}
