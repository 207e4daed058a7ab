//! Simulation configuration, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "smokepaint.json";

pub const MIN_BRUSH_RADIUS: f32 = 1.0;
pub const MAX_BRUSH_RADIUS: f32 = 64.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid: GridConfig,
    pub solver: SolverParams,
    pub brush: BrushSettings,
}

/// Grid size. Fixed once the simulation is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

/// Solver parameters. None of them are range checked: zero iterations or a
/// negative decay are valid and simply change how the flow behaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub cell_size: f32,
    pub timestep: f32,
    pub decay: f32,
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    pub radius: f32,
    pub strength: f32,
    pub color: [f32; 4],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            timestep: 0.016,
            decay: 0.995,
            iterations: 40,
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: 8.0,
            strength: 200.0,
            color: [1.0, 0.6, 0.2, 1.0],
        }
    }
}

impl BrushSettings {
    /// Grow or shrink the brush from a wheel delta (100 units per cell).
    pub fn scroll_radius(&mut self, delta: f32) {
        self.radius = (self.radius - delta / 100.0).clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// The grid needs at least one cell in each direction.
    EmptyGrid { width: usize, height: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O failed: {}", e),
            ConfigError::Parse(e) => write!(f, "config parse failed: {}", e),
            ConfigError::EmptyGrid { width, height } => {
                write!(f, "grid must be at least 1x1, got {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::EmptyGrid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl SimConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the grid cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridConfig { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }
}

/// Read a config file, falling back to defaults when it does not exist.
pub fn load(path: &Path) -> Result<SimConfig, ConfigError> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(SimConfig::default());
    }
    let text = std::fs::read_to_string(path)?;
    let config = SimConfig::from_json(&text)?;
    log::info!(
        "Loaded config from {} ({}x{} grid)",
        path.display(),
        config.grid.width,
        config.grid.height
    );
    Ok(config)
}
