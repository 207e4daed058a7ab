//! Pressure projection: divergence, Gauss-Seidel relaxation, gradient
//! subtraction.

use crate::config::SolverParams;
use crate::grid::Grid;

/// Recompute the divergence of every cell from its four faces.
pub fn compute_divergence(grid: &mut Grid, cell_size: f32) {
    let w = grid.width();
    let h = grid.height();
    let cells = grid.cells();

    let u = grid.vel_x.front();
    let v = grid.vel_y.front();

    for y in 0..h {
        for x in 0..w {
            grid.divergence[cells.index(x, y)] = net_outflow(u, v, w, x, y) / cell_size;
        }
    }
}

/// Relax the pressure estimate in place for a fixed number of sweeps.
///
/// Only interior cells are updated; the one-cell border keeps whatever it
/// held. There is no convergence check and pressure is never cleared, so
/// consecutive frames keep refining the same estimate.
pub fn relax_pressure(grid: &mut Grid, iterations: usize) {
    let w = grid.width();
    let h = grid.height();
    if w < 3 || h < 3 {
        return;
    }

    let p = &mut grid.pressure;
    let div = &grid.divergence;

    for _ in 0..iterations {
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let idx = y * w + x;
                p[idx] = (p[idx - 1] + p[idx + 1] + p[idx - w] + p[idx + w] - div[idx]) / 4.0;
            }
        }
    }
}

/// Subtract the pressure gradient from every face.
///
/// Faces on the domain wall see a one-sided difference through clamped
/// cell indices.
pub fn subtract_gradient(grid: &mut Grid, cell_size: f32) {
    let w = grid.width();
    let h = grid.height();
    let u_faces = grid.u_faces();
    let v_faces = grid.v_faces();

    let p = &grid.pressure;
    let u = grid.vel_x.front_mut();
    for y in 0..h {
        for x in 0..=w {
            let i0 = x.saturating_sub(1);
            let i1 = x.min(w - 1);
            u[u_faces.index(x, y)] -= (p[y * w + i1] - p[y * w + i0]) / cell_size;
        }
    }

    let v = grid.vel_y.front_mut();
    for y in 0..=h {
        for x in 0..w {
            let j0 = y.saturating_sub(1);
            let j1 = y.min(h - 1);
            v[v_faces.index(x, y)] -= (p[j1 * w + x] - p[j0 * w + x]) / cell_size;
        }
    }
}

/// Full projection: divergence, relaxation, gradient subtraction.
pub fn project(grid: &mut Grid, params: &SolverParams) {
    compute_divergence(grid, params.cell_size);
    relax_pressure(grid, params.iterations);
    subtract_gradient(grid, params.cell_size);
}

/// Net outflow of cell `(x, y)` from raw face buffers of a `width`-wide
/// grid, before dividing by the cell size.
pub fn net_outflow(u: &[f32], v: &[f32], width: usize, x: usize, y: usize) -> f32 {
    let row = y * (width + 1);
    u[row + x + 1] - u[row + x] + v[(y + 1) * width + x] - v[y * width + x]
}

/// Mean absolute divergence over interior cells, measured from the current
/// velocity field. Does not touch the stored divergence buffer.
pub fn mean_abs_divergence(grid: &Grid, cell_size: f32) -> f32 {
    interior_mean_abs_divergence(grid.vel_x(), grid.vel_y(), grid.width(), grid.height(), cell_size)
}

/// Same measure on raw face buffers. Zero below 3x3.
pub fn interior_mean_abs_divergence(
    u: &[f32],
    v: &[f32],
    width: usize,
    height: usize,
    cell_size: f32,
) -> f32 {
    if width < 3 || height < 3 {
        return 0.0;
    }

    let mut total = 0.0;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            total += (net_outflow(u, v, width, x, y) / cell_size).abs();
        }
    }
    total / ((width - 2) * (height - 2)) as f32
}
