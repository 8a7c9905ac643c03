//! Geographic-to-pixel mapping and marker rendering.

mod coordinate_mapper;
mod transform;

pub use coordinate_mapper::{
    CoordinateMapper, DrawOptions, MapperConfig, DEFAULT_MARKER_COLOR, DEFAULT_MARKER_RADIUS,
};
pub use transform::{GeoTransform, PixelPosition};
