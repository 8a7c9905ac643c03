//! Locating the image and calibration sidecar inside an input directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::CalibrationFormat;
use crate::error::MapperError;

/// The paired files found in an input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub image: PathBuf,
    pub calibration: PathBuf,
}

/// Lexically clean a directory path: drop `.` components and fold `..` where
/// a preceding normal component exists.
pub fn normalize_dir(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Scan `dir` (non-recursively) for exactly one image and one calibration file.
pub fn discover_inputs(dir: &Path, format: &CalibrationFormat) -> Result<InputFiles, MapperError> {
    let dir = normalize_dir(dir);

    let mut images = Vec::new();
    let mut calibrations = Vec::new();

    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        // Follows symlinks; dangling links are not candidates.
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if ext == format.image_extension {
            images.push(path);
        } else if ext == format.calibration_extension {
            calibrations.push(path);
        }
    }

    tracing::debug!(
        "Scanned {}: {} image candidate(s), {} calibration candidate(s)",
        dir.display(),
        images.len(),
        calibrations.len()
    );

    let image = single(images, &format.image_extension, &dir)?;
    let calibration = single(calibrations, &format.calibration_extension, &dir)?;

    Ok(InputFiles { image, calibration })
}

fn single(mut candidates: Vec<PathBuf>, extension: &str, dir: &Path) -> Result<PathBuf, MapperError> {
    if candidates.len() == 1 {
        if let Some(path) = candidates.pop() {
            return Ok(path);
        }
    }
    Err(MapperError::MissingInputFile {
        extension: extension.to_string(),
        found: candidates.len(),
        dir: dir.to_path_buf(),
    })
}
