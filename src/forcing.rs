//! User forcing: stamping smoke and dragging velocity into the grid.

use crate::grid::{CHANNELS, Grid};
use glam::{IVec2, Vec2};

/// Velocity increment per unit of pointer motion and brush strength.
pub const DRAG_SCALE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushAction {
    /// Paints color and pushes velocity.
    Primary,
    /// Pushes velocity only.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub cell: IVec2,
    /// Grid-space pointer motion since the previous sample, if there was one.
    pub velocity: Option<Vec2>,
    pub radius: f32,
    pub color: [f32; 4],
    pub strength: f32,
    pub action: BrushAction,
}

/// Apply one brush stamp.
///
/// Every cell with squared distance to the brush center within `radius²`
/// is touched; cells falling outside the grid are skipped. Primary stamps
/// overwrite the cell color. Both actions add the scaled pointer velocity
/// to the cell's left and bottom faces.
pub fn apply_force(grid: &mut Grid, brush: &Brush) {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let reach = brush.radius.floor() as i32;
    let r_sq = brush.radius * brush.radius;
    let push = brush.velocity.unwrap_or(Vec2::ZERO) * brush.strength * DRAG_SCALE;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx * dx + dy * dy) as f32 > r_sq {
                continue;
            }
            let px = brush.cell.x + dx;
            let py = brush.cell.y + dy;
            if px < 0 || py < 0 || px >= w || py >= h {
                continue;
            }
            let (px, py) = (px as usize, py as usize);

            if brush.action == BrushAction::Primary {
                let idx = grid.density_index(px, py);
                grid.density_mut()[idx..idx + CHANNELS].copy_from_slice(&brush.color);
            }

            let u_idx = grid.u_index(px, py);
            let v_idx = grid.v_index(px, py);
            grid.vel_x_mut()[u_idx] += push.x;
            grid.vel_y_mut()[v_idx] += push.y;
        }
    }
}

/// Turns per-frame pointer samples into brush cells and grid-space motion.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    previous: Option<IVec2>,
    cell: Option<IVec2>,
    velocity: Option<Vec2>,
    action: Option<BrushAction>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the hovered cell (if any) and the held button (if any).
    pub fn update(&mut self, cell: Option<IVec2>, action: Option<BrushAction>) {
        self.action = action;
        self.cell = cell;

        if action.is_none() || cell.is_none() {
            self.previous = None;
            self.velocity = None;
            return;
        }

        self.velocity = match (self.previous, cell) {
            (Some(prev), Some(curr)) => Some((curr - prev).as_vec2()),
            _ => None,
        };
        self.previous = cell;
    }

    pub fn cell(&self) -> Option<IVec2> {
        self.cell
    }

    pub fn velocity(&self) -> Option<Vec2> {
        self.velocity
    }

    pub fn is_pressed(&self) -> bool {
        self.action.is_some()
    }

    /// The brush to apply this frame, when a button is held over the grid.
    pub fn brush(&self, radius: f32, color: [f32; 4], strength: f32) -> Option<Brush> {
        let cell = self.cell?;
        let action = self.action?;
        Some(Brush {
            cell,
            velocity: self.velocity,
            radius,
            color,
            strength,
            action,
        })
    }
}
