//! Calibration inputs: locating the image/sidecar pair and parsing corner coordinates.

mod corners;
mod discovery;

pub use corners::{
    parse_corners, CalibrationCorners, CalibrationFormat, CoordinateRange, GeoPoint,
    DEFAULT_MARKER_PHRASE, DEFAULT_SEPARATORS,
};
pub use discovery::{discover_inputs, normalize_dir, InputFiles};
