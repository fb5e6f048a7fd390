//! Error types shared by the glue engine, loaders and writers.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for signal-glue operations.
pub type Result<T> = std::result::Result<T, GlueError>;

/// Which of the two source signals a region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "signal 1"),
            Side::Second => write!(f, "signal 2"),
        }
    }
}

/// Why a region could not be used as a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionProblem {
    /// `start == end`: no boundary sample to splice from.
    Empty,
    /// `start > end`.
    Reversed,
    /// `end` runs past the end of the signal.
    OutOfBounds,
}

impl fmt::Display for RegionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionProblem::Empty => write!(f, "selection is empty"),
            RegionProblem::Reversed => write!(f, "start is after end"),
            RegionProblem::OutOfBounds => write!(f, "selection exceeds signal length"),
        }
    }
}

/// Errors that can occur while loading, splicing, or writing signals and reports.
#[derive(Error, Debug)]
pub enum GlueError {
    /// A selected segment cannot be spliced
    #[error("invalid region for {which}: [{start}, {end}) of {len} samples, {problem}")]
    InvalidRegion {
        which: Side,
        start: usize,
        end: usize,
        len: usize,
        problem: RegionProblem,
    },

    /// Interpolation order outside 1..=3
    #[error("unsupported interpolation order {0} (expected 1, 2 or 3)")]
    InvalidOrder(u8),

    /// File extension the loaders do not understand
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Malformed signal file content
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Snapshot rendering failed
    #[error("snapshot rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
