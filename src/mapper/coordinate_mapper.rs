//! The coordinate mapper: calibrated image plus marker drawing.

use image::{Rgb, RgbImage};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::transform::{GeoTransform, PixelPosition};
use crate::calibration::{
    discover_inputs, parse_corners, CalibrationCorners, CalibrationFormat, CoordinateRange,
    GeoPoint,
};
use crate::error::MapperError;
use crate::render::{
    letterbox, ImageViewer, RasterSurface, ResampleQuality, SystemViewer,
    DEFAULT_BACKGROUND_GRAY, DEFAULT_DISPLAY_SIZE,
};

/// Default marker color (green).
pub const DEFAULT_MARKER_COLOR: [u8; 3] = [0, 255, 0];

/// Default marker radius in pixels.
pub const DEFAULT_MARKER_RADIUS: u32 = 5;

/// Configuration for a [`CoordinateMapper`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapperConfig {
    /// Preview canvas size (width, height).
    pub display_size: (u32, u32),
    /// Gray level of the preview padding.
    pub background_gray: u8,
    /// Resampling used for the preview.
    pub resample: ResampleQuality,
    /// How the input directory and calibration text are recognized.
    pub format: CalibrationFormat,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            display_size: DEFAULT_DISPLAY_SIZE,
            background_gray: DEFAULT_BACKGROUND_GRAY,
            resample: ResampleQuality::default(),
            format: CalibrationFormat::default(),
        }
    }
}

impl MapperConfig {
    pub fn with_display_size(mut self, width: u32, height: u32) -> Self {
        self.display_size = (width, height);
        self
    }

    pub fn with_background_gray(mut self, gray: u8) -> Self {
        self.background_gray = gray;
        self
    }

    pub fn with_resample(mut self, resample: ResampleQuality) -> Self {
        self.resample = resample;
        self
    }

    pub fn with_format(mut self, format: CalibrationFormat) -> Self {
        self.format = format;
        self
    }
}

/// Per-call marker settings for [`CoordinateMapper::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    /// RGB marker color.
    pub color: [u8; 3],
    /// Marker radius in pixels.
    pub radius: u32,
    /// Whether to open a letterboxed preview.
    pub show: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_MARKER_COLOR,
            radius: DEFAULT_MARKER_RADIUS,
            show: true,
        }
    }
}

impl DrawOptions {
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Disable the preview.
    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

/// Maps longitude/latitude onto a calibrated reference image and draws markers.
///
/// The source image and corners are loaded once and never modified; each
/// [`draw`](Self::draw) works on its own copy.
///
/// # Example
/// ```rust,no_run
/// use geomark::{CoordinateMapper, DrawOptions};
///
/// let mapper = CoordinateMapper::new("map")?;
/// let annotated = mapper.draw(
///     [(117.625616938, 36.000582576), (117.615423202, 36.005922854)],
///     &DrawOptions::default().with_color([255, 0, 0]),
/// );
/// println!("{}x{}", annotated.width(), annotated.height());
/// # Ok::<(), geomark::MapperError>(())
/// ```
pub struct CoordinateMapper {
    image: RgbImage,
    corners: CalibrationCorners,
    range: CoordinateRange,
    transform: GeoTransform,
    config: MapperConfig,
    viewer: Box<dyn ImageViewer>,
}

impl fmt::Debug for CoordinateMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateMapper")
            .field("image_size", &(self.image.width(), self.image.height()))
            .field("corners", &self.corners)
            .field("range", &self.range)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CoordinateMapper {
    /// Load the image and calibration from `dir` with the default configuration.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, MapperError> {
        Self::with_config(dir, MapperConfig::default())
    }

    /// Load the image and calibration from `dir`.
    ///
    /// `dir` must contain exactly one image and one calibration file.
    pub fn with_config(dir: impl AsRef<Path>, config: MapperConfig) -> Result<Self, MapperError> {
        let inputs = discover_inputs(dir.as_ref(), &config.format)?;

        let image = image::open(&inputs.image)
            .map_err(|source| MapperError::UnreadableImage {
                path: inputs.image.clone(),
                source,
            })?
            .to_rgb8();

        let text = fs::read_to_string(&inputs.calibration).map_err(|e| {
            if e.kind() == io::ErrorKind::InvalidData {
                MapperError::InvalidCalibration(format!(
                    "{} is not valid UTF-8",
                    inputs.calibration.display()
                ))
            } else {
                MapperError::Io(e)
            }
        })?;
        let corners = parse_corners(&text, &config.format)?;

        tracing::info!(
            "Loaded {} ({}x{}) with calibration {}",
            inputs.image.display(),
            image.width(),
            image.height(),
            inputs.calibration.display()
        );

        Ok(Self::from_parts(image, corners, config))
    }

    /// Build a mapper from an already loaded image and corners.
    pub fn from_parts(image: RgbImage, corners: CalibrationCorners, config: MapperConfig) -> Self {
        let transform = GeoTransform::new(&corners, image.width(), image.height());
        Self {
            range: corners.coordinate_range(),
            image,
            corners,
            transform,
            config,
            viewer: Box::new(SystemViewer::default()),
        }
    }

    /// Replace the preview viewer.
    pub fn with_viewer(mut self, viewer: impl ImageViewer + 'static) -> Self {
        self.viewer = Box::new(viewer);
        self
    }

    /// Pixel position of a geographic point, possibly outside the image.
    pub fn to_pixel(&self, point: impl Into<GeoPoint>) -> Option<PixelPosition> {
        self.transform.to_pixel(point.into())
    }

    /// Draw a filled circle for every coordinate that falls inside the image.
    ///
    /// Points outside the image are skipped. Returns the full-resolution
    /// annotated copy whether or not a preview was shown.
    pub fn draw<I, P>(&self, coordinates: I, options: &DrawOptions) -> RgbImage
    where
        I: IntoIterator<Item = P>,
        P: Into<GeoPoint>,
    {
        let mut result = self.image.copy();
        let (width, height) = (result.width(), result.height());
        let color = Rgb(options.color);

        let mut drawn = 0usize;
        let mut skipped = 0usize;
        for point in coordinates {
            let Some(pixel) = self
                .transform
                .to_pixel(point.into())
                .filter(|p| p.is_within(width, height))
            else {
                skipped += 1;
                continue;
            };
            let (Ok(x), Ok(y)) = (i32::try_from(pixel.x), i32::try_from(pixel.y)) else {
                skipped += 1;
                continue;
            };
            result.draw_filled_circle((x, y), options.radius, color);
            drawn += 1;
        }

        tracing::debug!("Drew {} marker(s), skipped {} outside the image", drawn, skipped);

        if options.show {
            let preview = self.preview(&result);
            if let Err(e) = self.viewer.show(&preview) {
                tracing::warn!("Failed to show preview: {}", e);
            }
        }

        result
    }

    /// Letterbox `image` into the configured display canvas.
    pub fn preview(&self, image: &RgbImage) -> RgbImage {
        let gray = self.config.background_gray;
        letterbox(
            image,
            self.config.display_size,
            Rgb([gray, gray, gray]),
            self.config.resample,
        )
    }

    pub fn coordinate_range(&self) -> CoordinateRange {
        self.range
    }

    pub fn corners(&self) -> &CalibrationCorners {
        &self.corners
    }

    /// The pristine source image.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }
}
