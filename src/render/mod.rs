//! Raster drawing, display scaling and preview.

mod letterbox;
mod surface;
mod viewer;

pub use letterbox::{fit_size, letterbox, DEFAULT_BACKGROUND_GRAY, DEFAULT_DISPLAY_SIZE};
pub use surface::{RasterSurface, ResampleQuality};
pub use viewer::{ImageViewer, NullViewer, SystemViewer, ViewerError};
