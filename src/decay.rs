use crate::grid::Grid;

/// Scale every density channel by `factor`.
pub fn decay_density(grid: &mut Grid, factor: f32) {
    for value in grid.density_mut().iter_mut() {
        *value *= factor;
    }
}
