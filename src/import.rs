//! Bulk density import from images.

use crate::grid::{CHANNELS, Grid};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum ImportError {
    EmptyImage { width: u32, height: u32 },
    BufferSize { expected: usize, actual: usize },
    Decode(image::ImageError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::EmptyImage { width, height } => {
                write!(f, "image has no pixels ({}x{})", width, height)
            }
            ImportError::BufferSize { expected, actual } => {
                write!(f, "pixel buffer holds {} bytes, expected {}", actual, expected)
            }
            ImportError::Decode(e) => write!(f, "image decode failed: {}", e),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for ImportError {
    fn from(e: image::ImageError) -> Self {
        ImportError::Decode(e)
    }
}

/// Replace the density field with an RGBA8 image.
///
/// The image is scaled to fit the grid while keeping its aspect ratio and
/// centered; cells outside it are zeroed in every channel. The grid is left
/// untouched when the input is rejected.
pub fn load_density_image(
    grid: &mut Grid,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), ImportError> {
    if width == 0 || height == 0 {
        return Err(ImportError::EmptyImage { width, height });
    }
    let expected = width as usize * height as usize * CHANNELS;
    if pixels.len() != expected {
        return Err(ImportError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }
    let image = RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or(ImportError::BufferSize {
        expected,
        actual: pixels.len(),
    })?;

    let staged = letterbox(&image, grid.width() as u32, grid.height() as u32);
    grid.density_mut().copy_from_slice(&staged);
    log::info!(
        "Imported {}x{} image into {}x{} density grid",
        width,
        height,
        grid.width(),
        grid.height()
    );
    Ok(())
}

/// Decode an encoded image (PNG, JPEG, ...) and import it.
pub fn load_density_bytes(grid: &mut Grid, bytes: &[u8]) -> Result<(), ImportError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    load_density_image(grid, image.as_raw(), width, height)
}

/// Decode an image file and import it.
pub fn load_density_file(grid: &mut Grid, path: &Path) -> Result<(), ImportError> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    load_density_image(grid, image.as_raw(), width, height)
}

/// Fit `image` into a `cols x rows` grid and convert to density values.
fn letterbox(image: &RgbaImage, cols: u32, rows: u32) -> Vec<f32> {
    let (iw, ih) = image.dimensions();
    let scale = (cols as f32 / iw as f32).min(rows as f32 / ih as f32);
    let sw = ((iw as f32 * scale).round() as u32).clamp(1, cols);
    let sh = ((ih as f32 * scale).round() as u32).clamp(1, rows);
    let off_x = (cols - sw) / 2;
    let off_y = (rows - sh) / 2;

    let scaled = if (sw, sh) == (iw, ih) {
        image.clone()
    } else {
        imageops::resize(image, sw, sh, FilterType::Triangle)
    };

    let mut density = vec![0.0; cols as usize * rows as usize * CHANNELS];
    for (x, y, pixel) in scaled.enumerate_pixels() {
        let idx = ((y + off_y) as usize * cols as usize + (x + off_x) as usize) * CHANNELS;
        for k in 0..CHANNELS {
            density[idx + k] = pixel.0[k] as f32 / 255.0;
        }
    }
    density
}
