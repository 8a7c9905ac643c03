//! Error type shared by input discovery, calibration parsing and mapper construction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a [`CoordinateMapper`](crate::CoordinateMapper).
///
/// Every variant aborts construction; no partially initialized mapper exists.
#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Expected exactly one .{extension} file in {}, found {found}", .dir.display())]
    MissingInputFile {
        extension: String,
        found: usize,
        dir: PathBuf,
    },
    #[error("Failed to decode image {}: {source}", .path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
