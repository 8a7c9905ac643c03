//! Handing preview images to the platform image viewer.

use image::RgbImage;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Preview errors.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to encode preview: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to launch viewer: {0}")]
    Launch(#[from] std::io::Error),
}

/// Something that can present an image to the user.
pub trait ImageViewer: Send + Sync {
    fn show(&self, image: &RgbImage) -> Result<(), ViewerError>;
}

/// Writes the preview to a temporary PNG and opens it with the system viewer.
///
/// The viewer process is not waited on.
#[derive(Debug, Clone)]
pub struct SystemViewer {
    temp_dir: PathBuf,
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl SystemViewer {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    fn preview_path(&self) -> PathBuf {
        self.temp_dir
            .join(format!("geomark-preview-{}.png", uuid::Uuid::new_v4()))
    }
}

impl ImageViewer for SystemViewer {
    fn show(&self, image: &RgbImage) -> Result<(), ViewerError> {
        let path = self.preview_path();
        image.save(&path)?;
        tracing::info!("Opening preview {}", path.display());
        open_command(&path).spawn()?;
        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn open_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

/// Discards previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullViewer;

impl ImageViewer for NullViewer {
    fn show(&self, _image: &RgbImage) -> Result<(), ViewerError> {
        Ok(())
    }
}
