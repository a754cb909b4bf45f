//! Error types for rule construction, solving and file operations

use std::fmt;
use std::path::PathBuf;

/// A cell left with zero possible variants during one attempt
///
/// Never surfaced on its own: the executor turns it into a retry and keeps
/// the most recent one for [`WfcError::GenerationFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// Zero-based attempt in which the contradiction occurred
    pub attempt: usize,
    /// Number of collapses performed before the contradiction
    pub step: usize,
    /// Grid position (row, col) of the emptied cell
    pub cell: [usize; 2],
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {}) emptied at step {} of attempt {}",
            self.cell[0], self.cell[1], self.step, self.attempt
        )
    }
}

/// Main error type for all generation operations
#[derive(Debug)]
pub enum WfcError {
    /// Symmetry letter is not one of `X`, `I`, `\`, `T`, `L`, `F`/`P`
    InvalidSymmetryTag {
        /// Tag as provided
        tag: String,
    },

    /// Neighbor rule names a tile that was never declared
    UnknownTileReference {
        /// Name used by the rule
        name: String,
    },

    /// Nothing could be extracted or declared
    EmptyInput {
        /// Why the input is empty
        reason: String,
    },

    /// Source tiles or sample don't meet structural requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Every attempt ended in a contradiction
    GenerationFailed {
        /// Number of attempts made
        attempts: usize,
        /// The contradiction that ended the final attempt
        last_contradiction: Option<Contradiction>,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Tileset declaration could not be parsed
    TilesetParse {
        /// Path to the tileset file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for WfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSymmetryTag { tag } => {
                write!(f, "Invalid symmetry tag '{tag}' (expected X, I, \\, T, L or F)")
            }
            Self::UnknownTileReference { name } => {
                write!(f, "Neighbor rule references undeclared tile '{name}'")
            }
            Self::EmptyInput { reason } => write!(f, "Empty input: {reason}"),
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::GenerationFailed {
                attempts,
                last_contradiction,
            } => {
                write!(f, "Generation failed after {attempts} attempts")?;
                if let Some(contradiction) = last_contradiction {
                    write!(f, " (last contradiction: {contradiction})")?;
                }
                Ok(())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::TilesetParse { path, source } => {
                write!(f, "Failed to parse tileset '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for WfcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::TilesetParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, WfcError>;

impl From<std::io::Error> for WfcError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WfcError {
    WfcError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> WfcError {
    WfcError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
