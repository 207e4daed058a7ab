//! Semi-Lagrangian transport of velocity and density.

use crate::grid::{CHANNELS, Grid, Lattice};

/// Bilinear sample of `channel` at `(x, y)` on `lattice`.
///
/// Coordinates are in lattice units and are expected to be clamped by the
/// caller; neighbor indices are clamped to the last row/column rather than
/// wrapped. Integer coordinates reproduce the stored sample exactly.
pub fn bilerp(
    data: &[f32],
    lattice: Lattice,
    channels: usize,
    channel: usize,
    x: f32,
    y: f32,
) -> f32 {
    let max_x = lattice.cols - 1;
    let max_y = lattice.rows - 1;

    let i0 = (x.floor().max(0.0) as usize).min(max_x);
    let j0 = (y.floor().max(0.0) as usize).min(max_y);
    let i1 = (i0 + 1).min(max_x);
    let j1 = (j0 + 1).min(max_y);

    let sx = x - i0 as f32;
    let sy = y - j0 as f32;

    let idx00 = lattice.index(i0, j0) * channels + channel;
    let idx10 = lattice.index(i1, j0) * channels + channel;
    let idx01 = lattice.index(i0, j1) * channels + channel;
    let idx11 = lattice.index(i1, j1) * channels + channel;

    (1.0 - sx) * ((1.0 - sy) * data[idx00] + sy * data[idx01])
        + sx * ((1.0 - sy) * data[idx10] + sy * data[idx11])
}

/// Advect both velocity components along themselves.
///
/// Every face reads the pre-sweep field; results land in the back buffers
/// which become the new fronts once both sweeps are done.
pub fn advect_velocity(grid: &mut Grid, dt: f32) {
    let w = grid.width();
    let h = grid.height();
    let u_faces = grid.u_faces();
    let v_faces = grid.v_faces();

    let (u, u_next) = grid.vel_x.split();
    let (v, v_next) = grid.vel_y.split();

    // Horizontal component on the (W+1) x H lattice
    for y in 0..h {
        for x in 0..=w {
            let idx = u_faces.index(x, y);
            let vy = v[v_faces.index(x.min(w - 1), y)];

            let px = (x as f32 - u[idx] * dt).clamp(0.0, w as f32);
            let py = (y as f32 - vy * dt).clamp(0.0, (h - 1) as f32);

            u_next[idx] = bilerp(u, u_faces, 1, 0, px, py);
        }
    }

    // Vertical component on the W x (H+1) lattice
    for y in 0..=h {
        for x in 0..w {
            let idx = v_faces.index(x, y);
            let ux = u[u_faces.index(x, y.min(h - 1))];

            let px = (x as f32 - ux * dt).clamp(0.0, (w - 1) as f32);
            let py = (y as f32 - v[idx] * dt).clamp(0.0, h as f32);

            v_next[idx] = bilerp(v, v_faces, 1, 0, px, py);
        }
    }

    grid.vel_x.swap();
    grid.vel_y.swap();
}

/// Advect all four density channels through the current velocity field.
pub fn advect_density(grid: &mut Grid, dt: f32) {
    let w = grid.width();
    let h = grid.height();
    let cells = grid.cells();
    let u_faces = grid.u_faces();
    let v_faces = grid.v_faces();

    let u = grid.vel_x.front();
    let v = grid.vel_y.front();
    let (density, next) = grid.density.split();

    for y in 0..h {
        for x in 0..w {
            // Left and bottom faces of the cell
            let vx = u[u_faces.index(x, y)];
            let vy = v[v_faces.index(x, y)];

            let px = (x as f32 - vx * dt).clamp(0.0, (w - 1) as f32);
            let py = (y as f32 - vy * dt).clamp(0.0, (h - 1) as f32);

            let idx = cells.index(x, y) * CHANNELS;
            for k in 0..CHANNELS {
                next[idx + k] = bilerp(density, cells, CHANNELS, k, px, py);
            }
        }
    }

    grid.density.swap();
}
