//! Smoke painting on a staggered-grid stable fluids solver.
//!
//! Each step runs forcing, semi-Lagrangian advection of velocity and
//! density, a fixed-iteration pressure projection and density decay.

pub mod advect;
pub mod analysis;
pub mod config;
pub mod decay;
pub mod desktop;
pub mod export;
pub mod fluid;
pub mod forcing;
pub mod grid;
pub mod import;
pub mod project;
pub mod render;

use crate::forcing::BrushAction;
use glam::{IVec2, Vec2};

// Surface the frame driver exposes to input and presentation code
pub trait FluidSimulation {
    fn step(&mut self, dt: f32);
    fn apply_force(
        &mut self,
        cell: IVec2,
        radius: f32,
        pointer_velocity: Option<Vec2>,
        color: [f32; 4],
        action: BrushAction,
    );
    fn read_density(&self) -> &[f32];
    fn width(&self) -> usize;
    fn height(&self) -> usize;
}

pub use analysis::{AnalysisRecorder, FluidMetrics};
pub use config::{BrushSettings, GridConfig, SimConfig, SolverParams};
pub use desktop::SmokeApp;
pub use export::{FluidData, ImageExporter};
pub use fluid::SmokeFluid;
pub use forcing::{Brush, PointerTracker};
pub use grid::Grid;
pub use import::ImportError;
pub use render::Renderer;
