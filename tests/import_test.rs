use image::{ImageFormat, Rgba, RgbaImage};
use smokepaint::{ImportError, SmokeFluid};
use std::io::Cursor;

fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

fn cell(fluid: &SmokeFluid, x: usize, y: usize) -> [f32; 4] {
    let idx = fluid.grid().density_index(x, y);
    let d = fluid.read_density();
    [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
}

#[test]
fn test_small_square_image_fills_square_grid() {
    let mut fluid = SmokeFluid::with_size(8, 8);
    let image = solid(2, 2, [255, 0, 0, 255]);
    fluid.load_density_image(image.as_raw(), 2, 2).unwrap();

    for y in 0..8 {
        for x in 0..8 {
            let [r, g, b, a] = cell(&fluid, x, y);
            assert!(r > 0.99 && a > 0.99, "({}, {}) should be red, got {:?}", x, y, [r, g, b, a]);
            assert!(g < 0.01 && b < 0.01);
        }
    }
}

#[test]
fn test_wide_image_is_letterboxed_vertically() {
    let mut fluid = SmokeFluid::with_size(4, 4);
    let image = solid(4, 2, [255, 0, 0, 255]);
    fluid.load_density_image(image.as_raw(), 4, 2).unwrap();

    for y in 0..4 {
        for x in 0..4 {
            let expected = if y == 1 || y == 2 { [1.0, 0.0, 0.0, 1.0] } else { [0.0; 4] };
            assert_eq!(cell(&fluid, x, y), expected, "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_tall_image_is_scaled_and_centered() {
    let mut fluid = SmokeFluid::with_size(8, 8);
    let image = solid(2, 4, [0, 255, 0, 255]);
    fluid.load_density_image(image.as_raw(), 2, 4).unwrap();

    // Scaled 2x to 4x8 and centered horizontally
    for y in 0..8 {
        for x in 0..8 {
            let [r, g, b, a] = cell(&fluid, x, y);
            if (2..6).contains(&x) {
                assert!(g > 0.99 && a > 0.99, "({}, {}) should be green", x, y);
                assert!(r < 0.01 && b < 0.01);
            } else {
                assert_eq!([r, g, b, a], [0.0; 4], "({}, {}) is outside the image", x, y);
            }
        }
    }
}

#[test]
fn test_import_replaces_previous_density() {
    let mut fluid = SmokeFluid::with_size(4, 4);
    fluid.grid_mut().density_mut().fill(0.7);
    let image = solid(4, 2, [0, 0, 255, 128]);
    fluid.load_density_image(image.as_raw(), 4, 2).unwrap();

    assert_eq!(cell(&fluid, 0, 0), [0.0; 4]);
    let [r, g, b, a] = cell(&fluid, 3, 2);
    assert_eq!([r, g, b], [0.0, 0.0, 1.0]);
    assert!((a - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_rejected_images_leave_density_alone() {
    let mut fluid = SmokeFluid::with_size(4, 4);
    fluid.grid_mut().density_mut().fill(0.25);

    let err = fluid.load_density_image(&[], 0, 3).unwrap_err();
    assert!(matches!(err, ImportError::EmptyImage { width: 0, height: 3 }));

    let err = fluid.load_density_image(&[255; 12], 2, 2).unwrap_err();
    assert!(matches!(err, ImportError::BufferSize { expected: 16, actual: 12 }));

    let err = fluid.load_density_bytes(b"definitely not an image").unwrap_err();
    assert!(matches!(err, ImportError::Decode(_)));

    assert!(fluid.read_density().iter().all(|&d| d == 0.25));
}

#[test]
fn test_encoded_png_is_decoded() {
    let mut bytes = Vec::new();
    solid(4, 4, [0, 0, 255, 255])
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let mut fluid = SmokeFluid::with_size(4, 4);
    fluid.load_density_bytes(&bytes).unwrap();
    assert!(fluid.read_density().chunks_exact(4).all(|c| c == [0.0, 0.0, 1.0, 1.0]));
}
