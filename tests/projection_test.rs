use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smokepaint::project::{
    compute_divergence, mean_abs_divergence, project, relax_pressure, subtract_gradient,
};
use smokepaint::{Grid, SolverParams};

const N: usize = 32;

/// Radial outflow from the center with a Gaussian falloff.
fn source_field() -> Grid {
    let mut grid = Grid::new(N, N);
    let c = N as f32 / 2.0;
    let sigma = (N * N) as f32 / 32.0;

    for y in 0..N {
        for x in 0..=N {
            let dx = x as f32 - c;
            let dy = y as f32 + 0.5 - c;
            let idx = grid.u_index(x, y);
            grid.vel_x_mut()[idx] = dx * 0.05 * (-(dx * dx + dy * dy) / sigma).exp();
        }
    }
    for y in 0..=N {
        for x in 0..N {
            let dx = x as f32 + 0.5 - c;
            let dy = y as f32 - c;
            let idx = grid.v_index(x, y);
            grid.vel_y_mut()[idx] = dy * 0.05 * (-(dx * dx + dy * dy) / sigma).exp();
        }
    }
    grid
}

fn random_field(seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(N, N);
    for v in grid.vel_x_mut().iter_mut() {
        *v = rng.gen_range(-1.0..1.0);
    }
    for v in grid.vel_y_mut().iter_mut() {
        *v = rng.gen_range(-1.0..1.0);
    }
    grid
}

fn projected_divergence(mut grid: Grid, iterations: usize) -> f32 {
    let params = SolverParams {
        iterations,
        ..SolverParams::default()
    };
    project(&mut grid, &params);
    mean_abs_divergence(&grid, params.cell_size)
}

#[test]
fn test_more_iterations_remove_more_divergence() {
    let before = mean_abs_divergence(&source_field(), 1.0);
    assert!(before > 0.0, "the source field should start divergent");

    let after_0 = projected_divergence(source_field(), 0);
    let after_10 = projected_divergence(source_field(), 10);
    let after_40 = projected_divergence(source_field(), 40);

    assert_eq!(after_0, before, "zero iterations must leave the flow untouched");
    assert!(after_10 < before, "10 iterations: before={}, after={}", before, after_10);
    assert!(after_40 < after_10, "40 iterations should beat 10: {} vs {}", after_40, after_10);
}

#[test]
fn test_projection_reduces_divergence_of_random_flow() {
    for seed in [1, 7, 42] {
        let before = mean_abs_divergence(&random_field(seed), 1.0);
        let after_1 = projected_divergence(random_field(seed), 1);
        let after_40 = projected_divergence(random_field(seed), 40);

        assert!(after_1 < before, "seed {}: before={}, after 1 sweep={}", seed, before, after_1);
        assert!(after_40 < after_1, "seed {}: 1 sweep={}, 40 sweeps={}", seed, after_1, after_40);
    }
}

#[test]
fn test_divergence_of_single_face() {
    let mut grid = Grid::new(3, 3);
    let idx = grid.u_index(2, 1);
    grid.vel_x_mut()[idx] = 1.0;

    compute_divergence(&mut grid, 0.5);
    let div = grid.divergence();
    assert_eq!(div[grid.cell_index(1, 1)], 2.0, "outflow through the right face");
    assert_eq!(div[grid.cell_index(2, 1)], -2.0, "inflow through the left face");
    assert_eq!(div[grid.cell_index(0, 0)], 0.0);
}

#[test]
fn test_relaxation_leaves_border_and_persists() {
    let mut grid = Grid::new(5, 5);
    grid.pressure_mut().fill(3.0);
    let idx = grid.u_index(3, 2);
    grid.vel_x_mut()[idx] = 1.0;
    compute_divergence(&mut grid, 1.0);

    relax_pressure(&mut grid, 5);
    let p = grid.pressure().to_vec();
    for y in 0..5 {
        for x in 0..5 {
            if x == 0 || y == 0 || x == 4 || y == 4 {
                assert_eq!(p[y * 5 + x], 3.0, "border cell ({}, {}) was written", x, y);
            }
        }
    }
    assert_ne!(p[2 * 5 + 2], 3.0, "interior should have relaxed");

    // Another round starts from the previous estimate, not from zero
    relax_pressure(&mut grid, 0);
    assert_eq!(grid.pressure(), p.as_slice());
}

#[test]
fn test_gradient_subtraction_uses_one_sided_walls() {
    let mut grid = Grid::new(3, 2);
    // p increases to the right: 0, 1, 2 on both rows
    for y in 0..2 {
        for x in 0..3 {
            grid.pressure_mut()[y * 3 + x] = x as f32;
        }
    }
    subtract_gradient(&mut grid, 1.0);

    for y in 0..2 {
        assert_eq!(grid.vel_x()[grid.u_index(0, y)], 0.0, "left wall sees p0 - p0");
        assert_eq!(grid.vel_x()[grid.u_index(1, y)], -1.0);
        assert_eq!(grid.vel_x()[grid.u_index(2, y)], -1.0);
        assert_eq!(grid.vel_x()[grid.u_index(3, y)], 0.0, "right wall sees p2 - p2");
    }
    assert!(grid.vel_y().iter().all(|&v| v == 0.0), "no vertical gradient");
}

#[test]
fn test_zero_iterations_keep_divergent_flow() {
    let mut grid = random_field(3);
    let u_before = grid.vel_x().to_vec();
    let v_before = grid.vel_y().to_vec();

    compute_divergence(&mut grid, 1.0);
    relax_pressure(&mut grid, 0);
    subtract_gradient(&mut grid, 1.0);

    assert_eq!(grid.vel_x(), u_before.as_slice());
    assert_eq!(grid.vel_y(), v_before.as_slice());
}
