//! Command-line interface for batch generation from PNG samples and JSON tilesets

use crate::algorithm::executor::GenerationParams;
use crate::algorithm::selection::{Heuristic, TieBreak};
use crate::analysis::overlapping::{OverlappingModel, OverlappingOptions};
use crate::analysis::patterns::ImageProcessor;
use crate::analysis::simple_tiled::SimpleTiledModel;
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_SIZE, DEFAULT_PATTERN_SIZE, DEFAULT_SAMPLES,
    DEFAULT_SEED, DEFAULT_SYMMETRY, OUTPUT_SUFFIX, SAMPLE_EXTENSION, TILESET_EXTENSION,
};
use crate::io::error::{Result, WfcError};
use crate::io::image::export_labels_as_png;
use crate::io::progress::ProgressManager;
use crate::io::tileset::Tileset;
use clap::Parser;
use ndarray::Array2;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tile maps and textures with wave function collapse"
)]
/// Command-line arguments for the generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// PNG sample, JSON tileset, or a directory containing either
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output width in cells (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in cells
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Side length of sampled patterns
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Wrap sample windows around the input edges
    #[arg(short = 'p', long)]
    pub periodic_input: bool,

    /// Do not wrap the output around its edges
    #[arg(short = 'c', long)]
    pub clamped: bool,

    /// Pin the sample's bottom-center pattern to the output's bottom row
    #[arg(short, long)]
    pub ground: bool,

    /// Number of dihedral transforms of the sample to include (1-8)
    #[arg(short = 'y', long, default_value_t = DEFAULT_SYMMETRY)]
    pub symmetry: usize,

    /// Independent outputs per input
    #[arg(short = 'k', long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Attempts per output before giving up
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub tries: usize,

    /// Rank cells by remaining variant count instead of entropy
    #[arg(short, long)]
    pub remaining: bool,

    /// Break selection ties with seeded noise instead of scan order
    #[arg(long)]
    pub noise: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generation parameters described by the flags
    pub fn generation_params(&self) -> GenerationParams {
        let (height, width) = match (self.height, self.width) {
            (Some(h), Some(w)) => (h, w),
            (Some(h), None) => (h, h),
            (None, Some(w)) => (w, w),
            (None, None) => (DEFAULT_OUTPUT_SIZE, DEFAULT_OUTPUT_SIZE),
        };

        GenerationParams {
            width,
            height,
            periodic_output: !self.clamped,
            seed: self.seed,
            max_attempts: self.tries,
            nb_samples: self.samples,
            heuristic: if self.remaining {
                Heuristic::Remaining
            } else {
                Heuristic::Entropy
            },
            tie_break: if self.noise {
                TieBreak::Noise
            } else {
                TieBreak::ScanOrder
            },
        }
    }

    /// Sampling options described by the flags
    pub const fn overlapping_options(&self) -> OverlappingOptions {
        OverlappingOptions {
            pattern_size: self.pattern_size,
            periodic_input: self.periodic_input,
            ground: self.ground,
            symmetry: self.symmetry,
        }
    }
}

/// Orchestrates batch processing of input files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, parameter validation or
    /// generation of any file fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.generation_params().validate()?;
        self.cli.overlapping_options().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_supported(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(unsupported_target(target, "must be a PNG sample or JSON tileset"))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| WfcError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if is_supported(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(unsupported_target(target, "must be a file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::output_path(input_path, 0, self.cli.samples);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let params = self.cli.generation_params();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, params.nb_samples);
        }
        let bar = self
            .progress_manager
            .as_ref()
            .and_then(|pm| pm.file_bar(index));
        let on_sample = move |_sample: usize| {
            if let Some(ref bar) = bar {
                bar.inc(1);
            }
        };

        let (outputs, palette) = if has_extension(input_path, TILESET_EXTENSION) {
            let tileset = Tileset::load(input_path)?;
            let model = SimpleTiledModel::new(tileset.tiles, &tileset.neighbors)?;
            let outputs: Vec<Array2<usize>> = model
                .generate_with_progress(&params, &on_sample)?
                .into_iter()
                .map(|output| output.content)
                .collect();
            (outputs, tileset.palette)
        } else {
            let (labels, palette) = ImageProcessor::from_png_file(input_path)?.into_parts();
            let model = OverlappingModel::new(&labels, self.cli.overlapping_options())?;
            let outputs: Vec<Array2<usize>> = model
                .generate_with_progress(&params, &on_sample)?
                .into_iter()
                .map(|output| output.content)
                .collect();
            (outputs, palette)
        };

        for (sample, content) in outputs.iter().enumerate() {
            let output_path = Self::output_path(input_path, sample, outputs.len());
            export_labels_as_png(content, &palette, &output_path)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    /// Where sample `sample` of `total` generated from `input_path` is written
    pub fn output_path(input_path: &Path, sample: usize, total: usize) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = if total > 1 {
            format!(
                "{}{OUTPUT_SUFFIX}_{sample}.{SAMPLE_EXTENSION}",
                stem.to_string_lossy()
            )
        } else {
            format!("{}{OUTPUT_SUFFIX}.{SAMPLE_EXTENSION}", stem.to_string_lossy())
        };

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(extension)
}

// Files carrying the output suffix are never inputs
fn is_supported(path: &Path) -> bool {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    has_extension(path, TILESET_EXTENSION)
        || (has_extension(path, SAMPLE_EXTENSION) && !stem.contains(OUTPUT_SUFFIX))
}

fn unsupported_target(path: &Path, reason: &str) -> WfcError {
    WfcError::FileSystem {
        path: path.to_path_buf(),
        operation: "select target",
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, reason.to_string()),
    }
}
