//! Generation constants and runtime configuration defaults

/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 40;

/// Default number of grid columns
pub const DEFAULT_COLS: usize = 40;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Edge length in pixels of one rendered cell
pub const DEFAULT_TILE_PIXELS: u32 = 20;

/// Number of collapse steps between captured animation frames
pub const REDRAW_INTERVAL: usize = 10;

/// Colour used for cells without any candidate tile
pub const CONTRADICTION_COLOR: [u8; 3] = [0, 0, 0];

/// Colour used for tiles declared without an explicit colour
pub const FALLBACK_TILE_COLOR: [u8; 3] = [128, 128, 128];

// Output settings
/// Default path of the exported map image
pub const DEFAULT_OUTPUT: &str = "wavetile_result.png";
/// Suffix added to the output stem for the animation
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 40;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Built-in sample: a coastline running from forest down to open ocean
pub const REFERENCE_SAMPLE: &str = "\
# coastline reference sample
tile trees 3 #1d6c1d
tile grass 3 #228b22
tile shore 2 #eed6af
tile water 2 #4169e1
tile ocean 4 #264584

pattern
trees trees grass
grass grass shore
grass shore water
shore shore water
water water ocean
ocean ocean ocean
";
