use crate::export::FluidData;
use crate::grid::CHANNELS;
use crate::project::interior_mean_abs_divergence;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct FluidMetrics {
    /// Summed R, G, B, A over all cells.
    pub channel_totals: [f32; 4],
    pub max_density: f32,
    pub total_kinetic_energy: f32,
    pub max_velocity: f32,
    pub avg_velocity: f32,
    /// Mean absolute divergence over interior cells, unit cell size.
    pub velocity_divergence: f32,
    pub vorticity: f32,
    pub frame: usize,
}

impl FluidMetrics {
    pub fn analyze(simulation: &impl FluidData, frame: usize) -> Self {
        let w = simulation.width();
        let h = simulation.height();
        let u = simulation.velocity_x();
        let v = simulation.velocity_y();

        let (channel_totals, max_density) = simulation
            .density()
            .par_chunks_exact(CHANNELS)
            .map(|cell| {
                let max = cell[0].max(cell[1]).max(cell[2]);
                ([cell[0], cell[1], cell[2], cell[3]], max)
            })
            .reduce(
                || ([0.0; 4], 0.0f32),
                |(a, ma), (b, mb)| {
                    (
                        [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]],
                        ma.max(mb),
                    )
                },
            );

        let (total_kinetic_energy, max_velocity, velocity_sum) = (0..h)
            .into_par_iter()
            .map(|y| {
                let mut energy = 0.0f32;
                let mut max = 0.0f32;
                let mut sum = 0.0f32;
                for x in 0..w {
                    let vel_x = 0.5 * (u[y * (w + 1) + x] + u[y * (w + 1) + x + 1]);
                    let vel_y = 0.5 * (v[y * w + x] + v[(y + 1) * w + x]);
                    let speed_sq = vel_x * vel_x + vel_y * vel_y;
                    energy += 0.5 * speed_sq;
                    max = max.max(speed_sq.sqrt());
                    sum += speed_sq.sqrt();
                }
                (energy, max, sum)
            })
            .reduce(|| (0.0, 0.0, 0.0), |a, b| (a.0 + b.0, a.1.max(b.1), a.2 + b.2));

        let mut total_vorticity = 0.0;
        let mut interior = 0usize;
        for y in 1..h.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                // Circulation around the lower-left grid node of the cell
                let vorticity = (v[y * w + x] - v[y * w + x - 1])
                    - (u[y * (w + 1) + x] - u[(y - 1) * (w + 1) + x]);
                total_vorticity += vorticity.abs();
                interior += 1;
            }
        }
        let interior = interior.max(1) as f32;

        Self {
            channel_totals,
            max_density,
            total_kinetic_energy,
            max_velocity,
            avg_velocity: velocity_sum / (w * h) as f32,
            velocity_divergence: interior_mean_abs_divergence(u, v, w, h, 1.0),
            vorticity: total_vorticity / interior,
            frame,
        }
    }

    pub fn total_mass(&self) -> f32 {
        self.channel_totals[0] + self.channel_totals[1] + self.channel_totals[2]
    }

    pub fn log_summary(&self) {
        log::info!(
            "frame {}: rgb mass {:.4} (max {:.4}), kinetic {:.4}, max speed {:.4}, avg speed {:.4}, |div| {:.6}, |curl| {:.6}",
            self.frame,
            self.total_mass(),
            self.max_density,
            self.total_kinetic_energy,
            self.max_velocity,
            self.avg_velocity,
            self.velocity_divergence,
            self.vorticity
        );
    }
}

#[derive(Default)]
pub struct AnalysisRecorder {
    pub metrics_history: Vec<FluidMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, simulation: &impl FluidData, frame: usize) -> &FluidMetrics {
        self.metrics_history.push(FluidMetrics::analyze(simulation, frame));
        &self.metrics_history[self.metrics_history.len() - 1]
    }

    pub fn log_trends(&self) {
        let (Some(first), Some(last)) =
            (self.metrics_history.first(), self.metrics_history.last())
        else {
            return;
        };
        if self.metrics_history.len() < 2 {
            return;
        }

        log::info!(
            "mass {:.4} -> {:.4} ({:+.2}%)",
            first.total_mass(),
            last.total_mass(),
            percent_change(first.total_mass(), last.total_mass())
        );
        log::info!(
            "kinetic energy {:.4} -> {:.4} ({:+.2}%)",
            first.total_kinetic_energy,
            last.total_kinetic_energy,
            percent_change(first.total_kinetic_energy, last.total_kinetic_energy)
        );
        log::info!(
            "divergence {:.6} -> {:.6}",
            first.velocity_divergence,
            last.velocity_divergence
        );
    }
}

fn percent_change(from: f32, to: f32) -> f32 {
    (to - from) / from.abs().max(0.001) * 100.0
}
