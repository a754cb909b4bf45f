//! Generation constants and runtime configuration defaults

// Defaults mirror the parameters callers pass most often
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Attempts per sample before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Side length of sampled patterns in overlapping mode
pub const DEFAULT_PATTERN_SIZE: usize = 3;

/// Number of dihedral transforms sampled in overlapping mode
pub const DEFAULT_SYMMETRY: usize = 8;

/// Independent solves produced by one call
pub const DEFAULT_SAMPLES: usize = 1;

/// Output width and height when none is requested
pub const DEFAULT_OUTPUT_SIZE: usize = 48;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 4_096;

/// Largest meaningful symmetry level (the dihedral group of the square)
pub const MAX_SYMMETRY_LEVEL: usize = 8;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension recognised as a tileset declaration
pub const TILESET_EXTENSION: &str = "json";
/// Extension recognised as a sample image
pub const SAMPLE_EXTENSION: &str = "png";
