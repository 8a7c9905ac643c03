// Copyright 2025 The geomark Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # geomark
//!
//! Plot longitude/latitude coordinates onto a calibrated reference image.
//!
//! An input directory holds one `.png` image and one `.txt` sidecar listing
//! the geographic coordinates of the image corners (left-bottom, left-top,
//! right-top, right-bottom). The mapper derives a linear coordinate-to-pixel
//! transform from those corners and draws markers on copies of the image.
//!
//! ## Example
//!
//! ```rust,no_run
//! use geomark::{CoordinateMapper, DrawOptions, MapperConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mapper = CoordinateMapper::with_config(
//!         "map",
//!         MapperConfig::default().with_display_size(1280, 720),
//!     )?;
//!
//!     let range = mapper.coordinate_range();
//!     println!("Longitude: {:?}, latitude: {:?}", range.longitude, range.latitude);
//!
//!     let annotated = mapper.draw(
//!         [(117.625616938, 36.000582576), (117.636689097, 35.995920897)],
//!         &DrawOptions::default().with_color([255, 0, 0]).with_radius(8),
//!     );
//!     println!("Annotated {}x{}", annotated.width(), annotated.height());
//!     Ok(())
//! }
//! ```

pub mod calibration;
pub mod error;
pub mod mapper;
pub mod render;
pub mod settings;

pub use calibration::{
    discover_inputs, parse_corners, CalibrationCorners, CalibrationFormat, CoordinateRange,
    GeoPoint, InputFiles,
};
pub use error::MapperError;
pub use mapper::{CoordinateMapper, DrawOptions, GeoTransform, MapperConfig, PixelPosition};
pub use render::{
    letterbox, ImageViewer, NullViewer, RasterSurface, ResampleQuality, SystemViewer,
    ViewerError,
};
pub use settings::AppSettings;
