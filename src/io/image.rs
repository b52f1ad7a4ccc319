//! Grid rendering with colour averaging and PNG export

use crate::io::configuration::{CONTRADICTION_COLOR, FALLBACK_TILE_COLOR};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::{Cell, Grid, TileId};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Display colour of every tile, indexed by tile id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Create a palette from RGB colours in tile id order
    pub const fn new(colors: Vec<[u8; 3]>) -> Self {
        Self { colors }
    }

    /// Colour of a tile; tiles without an entry use the fallback grey
    pub fn color(&self, tile: TileId) -> [u8; 3] {
        self.colors.get(tile).copied().unwrap_or(FALLBACK_TILE_COLOR)
    }

    /// Number of colours defined
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no colours are defined
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour a cell is painted with
    ///
    /// Resolved cells use their tile colour, unresolved cells the integer
    /// average of every colour still in their domain, and contradicted cells
    /// black.
    pub fn cell_color(&self, cell: &Cell) -> [u8; 3] {
        if let Some(tile) = cell.resolved() {
            return self.color(tile);
        }

        let count = cell.domain().count() as u32;
        if count == 0 {
            return CONTRADICTION_COLOR;
        }

        let mut sums = [0u32; 3];
        for tile in cell.domain().iter() {
            let color = self.color(tile);
            for (sum, channel) in sums.iter_mut().zip(color) {
                *sum += u32::from(channel);
            }
        }
        sums.map(|sum| (sum / count) as u8)
    }
}

/// Pixel size (width, height) of a `rows`x`cols` grid drawn with `tile_pixels` squares
///
/// # Errors
///
/// Returns an error if `tile_pixels` is zero or the image would exceed `u32` pixels per side
pub fn rendered_size(rows: usize, cols: usize, tile_pixels: u32) -> Result<(u32, u32)> {
    if tile_pixels == 0 {
        return Err(invalid_parameter(
            "tile_pixels",
            &tile_pixels,
            &"must be positive",
        ));
    }

    let side = |cells: usize, name: &'static str| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(tile_pixels))
            .ok_or_else(|| invalid_parameter(name, &cells, &"rendered image too large"))
    };
    Ok((side(cols, "cols")?, side(rows, "rows")?))
}

/// Paint every cell as a `tile_pixels` square
///
/// # Errors
///
/// Returns an error if the size is rejected by [`rendered_size`]
pub fn render_grid(grid: &Grid, palette: &Palette, tile_pixels: u32) -> Result<RgbaImage> {
    let (width, height) = rendered_size(grid.rows(), grid.cols(), tile_pixels)?;

    let mut img = RgbaImage::new(width, height);
    for ([row, col], cell) in grid.cells() {
        let [r, g, b] = palette.cell_color(cell);
        let pixel = Rgba([r, g, b, 255]);
        let x0 = col as u32 * tile_pixels;
        let y0 = row as u32 * tile_pixels;
        for y in y0..y0 + tile_pixels {
            for x in x0..x0 + tile_pixels {
                img.put_pixel(x, y, pixel);
            }
        }
    }

    Ok(img)
}

/// Render the grid and save it as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see [`render_grid`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    palette: &Palette,
    tile_pixels: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(grid, palette, tile_pixels)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
