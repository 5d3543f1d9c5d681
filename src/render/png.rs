//! Raster rendering of the grid via the `image` crate.
//!
//! Grid row 0 is drawn at the top of the image. Covered cells are blue at
//! half opacity over white; tower centres get a darker inner square.

use std::path::Path;

use image::error::{ImageError, LimitError, LimitErrorKind};
use image::{ImageResult, Rgb, RgbImage};

use crate::grid::{CellState, CityGrid};

/// Pixels per grid cell when none is configured.
pub const DEFAULT_CELL_SIZE: u32 = 32;

/// Largest accepted cell size.
pub const MAX_CELL_SIZE: u32 = 1024;

/// Largest image drawn, in pixels.
const MAX_IMAGE_PIXELS: u64 = 1 << 28;

const FREE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const BLOCKED_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const COVERED_COLOR: Rgb<u8> = Rgb([128, 128, 255]);
const TOWER_COLOR: Rgb<u8> = Rgb([0, 0, 160]);

/// Image size for the grid, or `None` when it does not fit the pixel limit.
fn image_dimensions(grid: &CityGrid, cell_size: u32) -> Option<(u32, u32)> {
    let width = u32::try_from(grid.cols()).ok()?.checked_mul(cell_size)?;
    let height = u32::try_from(grid.rows()).ok()?.checked_mul(cell_size)?;
    (u64::from(width) * u64::from(height) <= MAX_IMAGE_PIXELS).then_some((width, height))
}

/// Draw the grid into an in-memory image. A zero cell size is treated as 1.
///
/// # Errors
///
/// A dimension limit error when the image would exceed the pixel limit.
pub fn render_image(grid: &CityGrid, cell_size: u32) -> ImageResult<RgbImage> {
    let cell_size = cell_size.max(1);
    let (width, height) = image_dimensions(grid, cell_size)
        .ok_or_else(|| ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError)))?;
    let mut img = RgbImage::from_pixel(width, height, FREE_COLOR);

    for (r, row) in grid.cells().enumerate() {
        for (c, state) in row.iter().enumerate() {
            let color = match state {
                CellState::Free => continue,
                CellState::Blocked => BLOCKED_COLOR,
                CellState::Covered => COVERED_COLOR,
            };
            fill_square(&mut img, c as u32 * cell_size, r as u32 * cell_size, cell_size, color);
        }
    }

    let inset = cell_size / 3;
    for tower in grid.towers() {
        if !grid.contains(tower.position) {
            continue;
        }
        let x = tower.position.col as u32 * cell_size + inset;
        let y = tower.position.row as u32 * cell_size + inset;
        fill_square(&mut img, x, y, (cell_size - 2 * inset).max(1), TOWER_COLOR);
    }
    Ok(img)
}

/// Render and write the grid. The format follows the file extension.
pub fn render_png(grid: &CityGrid, cell_size: u32, path: &Path) -> ImageResult<()> {
    let img = render_image(grid, cell_size)?;
    log::debug!("Writing {}x{} image to {}", img.width(), img.height(), path.display());
    img.save(path)
}

fn fill_square(img: &mut RgbImage, x0: u32, y0: u32, size: u32, color: Rgb<u8>) {
    let x_end = x0.saturating_add(size).min(img.width());
    let y_end = y0.saturating_add(size).min(img.height());
    for y in y0..y_end {
        for x in x0..x_end {
            img.put_pixel(x, y, color);
        }
    }
}
