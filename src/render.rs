use crate::export::FluidData;
use crate::grid::CHANNELS;
use image::{ImageBuffer, Rgba, RgbaImage};

/// Convert an RGBA density buffer into opaque 8-bit pixels.
///
/// Channels are scaled by 255 and clamped; alpha is always 255.
pub fn density_to_rgba8(density: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(density.len());
    for cell in density.chunks_exact(CHANNELS) {
        out.push(to_byte(cell[0]));
        out.push(to_byte(cell[1]));
        out.push(to_byte(cell[2]));
        out.push(255);
    }
    out
}

fn to_byte(value: f32) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn render_to_image(&self, simulation: &impl FluidData) -> RgbaImage {
        let mut img = ImageBuffer::new(self.width, self.height);

        let scale_x = self.width as f32 / simulation.width() as f32;
        let scale_y = self.height as f32 / simulation.height() as f32;
        let density = simulation.density();

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / scale_x) as usize;
            let sim_y = (y as f32 / scale_y) as usize;

            if sim_x < simulation.width() && sim_y < simulation.height() {
                let idx = (sim_y * simulation.width() + sim_x) * CHANNELS;
                *pixel = Rgba([
                    to_byte(density[idx]),
                    to_byte(density[idx + 1]),
                    to_byte(density[idx + 2]),
                    255,
                ]);
            } else {
                *pixel = Rgba([0, 0, 0, 255]);
            }
        }

        img
    }

    pub fn render_velocity_field(&self, simulation: &impl FluidData) -> RgbaImage {
        let mut img = ImageBuffer::new(self.width, self.height);
        let w = simulation.width();
        let h = simulation.height();
        let u = simulation.velocity_x();
        let v = simulation.velocity_y();

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / self.width as f32 * w as f32) as usize;
            let sim_y = (y as f32 / self.height as f32 * h as f32) as usize;

            if sim_x < w && sim_y < h {
                // Average the faces around the cell center
                let vel_x = 0.5 * (u[sim_y * (w + 1) + sim_x] + u[sim_y * (w + 1) + sim_x + 1]);
                let vel_y = 0.5 * (v[sim_y * w + sim_x] + v[(sim_y + 1) * w + sim_x]);

                // Red for x, green for y
                let r = (vel_x.abs() * 255.0).min(255.0) as u8;
                let g = (vel_y.abs() * 255.0).min(255.0) as u8;
                *pixel = Rgba([r, g, 128, 255]);
            } else {
                *pixel = Rgba([0, 0, 0, 255]);
            }
        }

        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_clamps_and_forces_alpha() {
        let density = [2.0, -1.0, 0.5, 0.0, 1.0, 1.0, 1.0, 0.25];
        let bytes = density_to_rgba8(&density);
        assert_eq!(bytes, vec![255, 0, 127, 255, 255, 255, 255, 255]);
    }
}
