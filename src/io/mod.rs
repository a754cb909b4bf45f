//! Input/output operations, configuration and error handling

/// Command-line parsing and batch processing
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
/// JSON tileset declarations
pub mod tileset;
