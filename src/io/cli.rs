//! Command-line interface for generating a tile map from a sample definition

use crate::algorithm::executor::{GenerationReport, GenerationSession, SessionConfig};
use crate::algorithm::propagation::ContradictionPolicy;
use crate::analysis::patterns::SampleDefinition;
use crate::io::configuration::{
    DEFAULT_COLS, DEFAULT_OUTPUT, DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_TILE_PIXELS,
    GIF_FRAME_DELAY_MS, REDRAW_INTERVAL, VISUALIZATION_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_grid_as_png, rendered_size};
use crate::io::progress::ProgressManager;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate a tile map by wave function collapse from an example pattern"
)]
/// Command-line arguments for the map generator
pub struct Cli {
    /// Sample definition file (built-in coastline sample when omitted)
    #[arg(value_name = "SAMPLE")]
    pub sample: Option<PathBuf>,

    /// Number of grid rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of grid columns
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Path of the exported PNG map
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Edge length in pixels of one rendered cell
    #[arg(short, long, default_value_t = DEFAULT_TILE_PIXELS)]
    pub tile_size: u32,

    /// Also export the generation process as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// What to do when a cell runs out of candidate tiles
    #[arg(long, value_enum, default_value_t = ContradictionPolicy::Abort)]
    pub on_contradiction: ContradictionPolicy,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter when `RUST_LOG` is not set
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }

    /// Session parameters described by the arguments
    pub const fn session_config(&self) -> SessionConfig {
        SessionConfig {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            policy: self.on_contradiction,
        }
    }

    /// Path of the animation written next to the output image
    pub fn visualization_path(&self) -> PathBuf {
        Self::sibling_path(&self.output, VISUALIZATION_SUFFIX, "gif")
    }

    fn sibling_path(output: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = output.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        if let Some(parent) = output.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}

/// Loads the sample, drives a session step by step and writes the outputs
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Generate the map and export it
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size is zero or the rendered map would be too large
    /// - The sample cannot be loaded or is invalid
    /// - Generation aborts on a contradiction
    /// - An output file cannot be written
    pub fn run(&self) -> Result<GenerationReport> {
        let start_time = Instant::now();

        rendered_size(self.cli.rows, self.cli.cols, self.cli.tile_size)?;

        let sample = match &self.cli.sample {
            Some(path) => SampleDefinition::from_path(path)?,
            None => SampleDefinition::reference()?,
        };

        let mut session = GenerationSession::from_sample(self.cli.session_config(), &sample)?;

        let progress = self.cli.should_show_progress().then(|| {
            let total = session.grid().rows() * session.grid().cols();
            let label = self
                .cli
                .sample
                .as_deref()
                .and_then(Path::file_name)
                .map_or_else(|| "reference".to_string(), |n| n.to_string_lossy().to_string());
            ProgressManager::new(total, &label)
        });

        let mut visualization = if self.cli.visualize {
            let mut capture = VisualizationCapture::new(
                sample.palette().clone(),
                self.cli.tile_size,
                REDRAW_INTERVAL,
            )?;
            capture.capture(session.grid())?;
            Some(capture)
        } else {
            None
        };

        while let Some(event) = session.step()? {
            if let Some(ref pm) = progress {
                pm.update(session.resolved_cells(), event.iteration);
            }
            if let Some(ref mut viz) = visualization {
                viz.observe(session.grid(), event.iteration)?;
            }
        }

        let report = session.report();

        export_grid_as_png(
            session.grid(),
            sample.palette(),
            self.cli.tile_size,
            &self.cli.output,
        )?;

        if let Some(ref mut viz) = visualization {
            viz.capture(session.grid())?;
            viz.export_gif(&self.cli.visualization_path(), GIF_FRAME_DELAY_MS)?;
        }

        let violations = session.constraints().violations(session.grid());
        if !violations.is_empty() {
            tracing::warn!(
                violations = violations.len(),
                "generated map breaks adjacency rules"
            );
        }

        if let Some(ref pm) = progress {
            pm.finish(&format!("done in {:.2?}", start_time.elapsed()));
        }

        tracing::info!(
            output = %self.cli.output.display(),
            steps = report.steps,
            resolved = report.resolved,
            total = report.total_cells,
            reseeded = report.reseeded.len(),
            "map exported"
        );

        Ok(report)
    }
}
