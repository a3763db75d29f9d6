//! Elevation raster decoding.
//!
//! Elevation tiles arrive as RGB images where each pixel packs a height into
//! its three channels. [`decode_heightmap`] turns such an image into a
//! [`HeightGrid`] of normalized samples that the terrain surface consumes and
//! the border stitcher edits.
//!
//! # Grid layout
//!
//! An image of side `n` produces a grid of resolution `n + 1`. Row 0 is the
//! southern edge, column 0 the western edge. The extra last row and column
//! replicate their predecessors; the stitcher later overwrites exactly those
//! with the northern/eastern neighbour's first row/column.

mod grid;

pub use grid::{ElevationRange, HeightGrid, DEFAULT_TERRAIN_DEPTH, DEFAULT_TERRAIN_HEIGHT};

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;

/// Errors that can occur while decoding an elevation raster.
#[derive(Debug, Error)]
pub enum HeightmapError {
    /// The image codec failed.
    #[error("Elevation image codec error: {0}")]
    Decode(#[from] image::ImageError),

    /// The raster is not square.
    #[error("Elevation image must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    /// The raster has no pixels.
    #[error("Elevation image is empty")]
    Empty,
}

/// Combines normalized RGB channels into a normalized height.
///
/// `height = (R * 256 + G + B / 256) / 256` with each channel in `[0, 1]`.
#[inline]
pub fn pack_height(rgb: [u8; 3]) -> f32 {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;
    (r * 256.0 + g + b / 256.0) / 256.0
}

/// Decodes an encoded image (PNG in production) into a height grid.
pub fn decode_heightmap(bytes: &[u8]) -> Result<HeightGrid, HeightmapError> {
    let image = image::load_from_memory(bytes)?.to_rgb8();
    height_grid_from_image(&image)
}

/// Builds a height grid from an already decoded RGB raster.
pub fn height_grid_from_image(image: &RgbImage) -> Result<HeightGrid, HeightmapError> {
    let (width, height) = image.dimensions();
    if width != height {
        return Err(HeightmapError::NotSquare { width, height });
    }
    if width == 0 {
        return Err(HeightmapError::Empty);
    }

    let side = width as usize;
    let resolution = side + 1;
    let mut samples = vec![0.0_f32; resolution * resolution];

    for row in 0..side {
        // Image rows run north to south, grid rows south to north
        let pixel_y = (side - 1 - row) as u32;
        for col in 0..side {
            samples[row * resolution + col] = pack_height(image.get_pixel(col as u32, pixel_y).0);
        }
        samples[row * resolution + side] = samples[row * resolution + side - 1];
    }

    let (body, last_row) = samples.split_at_mut(side * resolution);
    last_row.copy_from_slice(&body[(side - 1) * resolution..]);

    Ok(HeightGrid::from_samples(resolution, samples))
}

/// Splits a normalized height into the RGB channels [`pack_height`] reads.
///
/// Values are clamped to `[0, 1]`. The round trip is exact to within one
/// blue step (`1 / 255 / 65536`).
pub fn unpack_height(sample: f32) -> [u8; 3] {
    let scaled = (sample.clamp(0.0, 1.0) as f64) * 256.0 * 255.0;
    let r = (scaled / 256.0).floor().min(255.0);
    let rest = scaled - r * 256.0;
    let g = rest.floor().min(255.0);
    let b = ((rest - g) * 256.0).round().min(255.0);
    [r as u8, g as u8, b as u8]
}

/// Encodes a raster of side `side` as PNG, sampling `height(col, row)` with
/// row 0 at the southern edge.
///
/// Used for synthetic terrain in offline runs.
pub fn encode_heightmap_png<F>(side: u32, height: F) -> Result<Vec<u8>, HeightmapError>
where
    F: Fn(u32, u32) -> f32,
{
    if side == 0 {
        return Err(HeightmapError::Empty);
    }
    let image = RgbImage::from_fn(side, side, |x, y| Rgb(unpack_height(height(x, side - 1 - y))));

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(r: u8, g: u8, b: u8) -> f32 {
        let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        (r * 256.0 + g + b / 256.0) / 256.0
    }

    fn two_by_two() -> RgbImage {
        // Top row of the image is the northern edge
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([10, 20, 30])); // north-west
        image.put_pixel(1, 0, Rgb([40, 50, 60])); // north-east
        image.put_pixel(0, 1, Rgb([70, 80, 90])); // south-west
        image.put_pixel(1, 1, Rgb([100, 110, 120])); // south-east
        image
    }

    #[test]
    fn test_pack_height_extremes() {
        assert_eq!(pack_height([0, 0, 0]), 0.0);
        let max = pack_height([255, 255, 255]);
        assert!((max - (256.0 + 1.0 + 1.0 / 256.0) / 256.0).abs() < 1e-6);
    }

    #[test]
    fn test_two_by_two_decodes_exact_values() {
        let grid = height_grid_from_image(&two_by_two()).unwrap();
        assert_eq!(grid.resolution(), 3);

        // Row 0 is the southern edge
        assert_eq!(grid.get(0, 0), Some(expected(70, 80, 90)));
        assert_eq!(grid.get(0, 1), Some(expected(100, 110, 120)));
        assert_eq!(grid.get(1, 0), Some(expected(10, 20, 30)));
        assert_eq!(grid.get(1, 1), Some(expected(40, 50, 60)));
    }

    #[test]
    fn test_last_row_and_column_replicate_previous() {
        let grid = height_grid_from_image(&two_by_two()).unwrap();

        for row in 0..3 {
            assert_eq!(grid.get(row, 2), grid.get(row, 1), "row {}", row);
        }
        assert_eq!(grid.row(2), grid.row(1));
        assert_eq!(grid.get(2, 2), Some(expected(40, 50, 60)));
    }

    #[test]
    fn test_decode_png_bytes() {
        let mut bytes = Vec::new();
        two_by_two()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let grid = decode_heightmap(&bytes).unwrap();
        assert_eq!(grid.resolution(), 3);
        assert_eq!(grid.get(1, 0), Some(expected(10, 20, 30)));
    }

    #[test]
    fn test_rejects_non_square() {
        let image = RgbImage::new(4, 2);
        assert!(matches!(
            height_grid_from_image(&image),
            Err(HeightmapError::NotSquare {
                width: 4,
                height: 2
            })
        ));
    }

    #[test]
    fn test_unpack_height_round_trips_within_a_step() {
        for sample in [0.0_f32, 0.25, 0.3337, 0.5, 0.999] {
            let packed = pack_height(unpack_height(sample));
            assert!((packed - sample).abs() < 1e-4, "{} -> {}", sample, packed);
        }
        assert_eq!(unpack_height(-1.0), [0, 0, 0]);
    }

    #[test]
    fn test_encode_heightmap_png_keeps_orientation() {
        // West-to-east ramp on the southern row only
        let bytes =
            encode_heightmap_png(4, |col, row| if row == 0 { col as f32 * 0.1 } else { 0.5 })
                .unwrap();
        let grid = decode_heightmap(&bytes).unwrap();

        assert_eq!(grid.resolution(), 5);
        for col in 0..4 {
            let value = grid.get(0, col).unwrap();
            assert!((value - col as f32 * 0.1).abs() < 1e-4);
        }
        assert!((grid.get(3, 0).unwrap() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_encode_heightmap_png_rejects_zero_side() {
        assert!(matches!(
            encode_heightmap_png(0, |_, _| 0.0),
            Err(HeightmapError::Empty)
        ));
    }

    #[test]
    fn test_rejects_garbage_bytes() {
        assert!(matches!(
            decode_heightmap(b"not an image"),
            Err(HeightmapError::Decode(_))
        ));
    }
}
