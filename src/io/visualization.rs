//! Frame capture and GIF generation for progressive display of a run

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::{Palette, render_grid};
use crate::spatial::Grid;
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Records rendered snapshots of the grid between collapse steps
///
/// Snapshots are taken every `interval` steps, so the captured animation
/// shows domains narrowing (as averaged colours) and cells resolving.
pub struct VisualizationCapture {
    palette: Palette,
    tile_pixels: u32,
    interval: usize,
    frames: Vec<RgbaImage>,
}

impl VisualizationCapture {
    /// Create a capture rendering cells as `tile_pixels` squares every `interval` steps
    ///
    /// # Errors
    ///
    /// Returns an error if `interval` or `tile_pixels` is zero
    pub fn new(palette: Palette, tile_pixels: u32, interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(invalid_parameter("interval", &interval, &"must be positive"));
        }
        if tile_pixels == 0 {
            return Err(invalid_parameter(
                "tile_pixels",
                &tile_pixels,
                &"must be positive",
            ));
        }

        Ok(Self {
            palette,
            tile_pixels,
            interval,
            frames: Vec::new(),
        })
    }

    /// Capture a frame if `iteration` falls on the capture interval
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails
    pub fn observe(&mut self, grid: &Grid, iteration: usize) -> Result<()> {
        if iteration % self.interval == 0 {
            self.capture(grid)?;
        }
        Ok(())
    }

    /// Capture a frame unconditionally
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails
    pub fn capture(&mut self, grid: &Grid) -> Result<()> {
        self.frames
            .push(render_grid(grid, &self.palette, self.tile_pixels)?);
        Ok(())
    }

    /// Number of frames captured so far
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// If the requested delay is shorter than viewers reliably support,
    /// frames are dropped so the animation keeps its apparent speed. The
    /// last frame is always kept and held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let Some(last) = self.frames.last() else {
            return Err(invalid_parameter(
                "visualization",
                &"0 frames",
                &"no frames captured",
            ));
        };

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let delay = Delay::from_numer_denom_ms(effective_delay_ms, 1);
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .step_by(skip_factor)
            .map(|img| Frame::from_parts(img.clone(), 0, 0, delay))
            .collect();

        // Final frame displays longer for better visibility
        frames.push(Frame::from_parts(
            last.clone(),
            0,
            0,
            Delay::from_numer_denom_ms(effective_delay_ms * 25, 1),
        ));

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                    path: parent.to_path_buf(),
                    operation: "create directory",
                    source: e,
                })?;
            }
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}
