//! Corner calibration parsing.
//!
//! A calibration sidecar is plain UTF-8 text. Every line carrying the marker
//! phrase holds one geographic point after its last separator, written as
//! `longitude,latitude`. Exactly four such lines must exist and are read in
//! file order as left-bottom, left-top, right-top, right-bottom.

use serde::{Deserialize, Serialize};

use crate::error::MapperError;

/// Phrase ("geographic coordinate") that marks a calibration line.
pub const DEFAULT_MARKER_PHRASE: &str = "经纬度坐标";

/// Characters separating the label from the value on a calibration line.
pub const DEFAULT_SEPARATORS: [char; 2] = ['：', ':'];

/// A (longitude, latitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

/// The four calibration corners, in their fixed semantic order.
///
/// No check is made that the points form a consistent rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCorners {
    pub left_bottom: GeoPoint,
    pub left_top: GeoPoint,
    pub right_top: GeoPoint,
    pub right_bottom: GeoPoint,
}

impl CalibrationCorners {
    pub fn new(
        left_bottom: GeoPoint,
        left_top: GeoPoint,
        right_top: GeoPoint,
        right_bottom: GeoPoint,
    ) -> Self {
        Self {
            left_bottom,
            left_top,
            right_top,
            right_bottom,
        }
    }

    /// Longitude bounds read from the left-top and right-bottom corners, latitude
    /// bounds from the left-bottom and left-top corners.
    pub fn coordinate_range(&self) -> CoordinateRange {
        CoordinateRange {
            longitude: (self.left_top.lon, self.right_bottom.lon),
            latitude: (self.left_bottom.lat, self.left_top.lat),
        }
    }
}

impl TryFrom<Vec<GeoPoint>> for CalibrationCorners {
    type Error = MapperError;

    fn try_from(points: Vec<GeoPoint>) -> Result<Self, Self::Error> {
        match points.as_slice() {
            &[left_bottom, left_top, right_top, right_bottom] => Ok(Self::new(
                left_bottom,
                left_top,
                right_top,
                right_bottom,
            )),
            other => Err(MapperError::InvalidCalibration(format!(
                "expected exactly 4 corner coordinates, found {}",
                other.len()
            ))),
        }
    }
}

/// Longitude and latitude extents as `(min, max)` pairs.
///
/// The values are the designated corners, not a computed min/max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRange {
    pub longitude: (f64, f64),
    pub latitude: (f64, f64),
}

/// How calibration inputs are recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationFormat {
    /// Extension of the base image, without the dot.
    pub image_extension: String,
    /// Extension of the calibration sidecar, without the dot.
    pub calibration_extension: String,
    /// Substring identifying a calibration line.
    pub marker_phrase: String,
    /// The value starts after the last occurrence of any of these.
    pub separators: Vec<char>,
}

impl Default for CalibrationFormat {
    fn default() -> Self {
        Self {
            image_extension: "png".to_string(),
            calibration_extension: "txt".to_string(),
            marker_phrase: DEFAULT_MARKER_PHRASE.to_string(),
            separators: DEFAULT_SEPARATORS.to_vec(),
        }
    }
}

impl CalibrationFormat {
    pub fn with_image_extension(mut self, extension: impl Into<String>) -> Self {
        self.image_extension = extension.into();
        self
    }

    pub fn with_calibration_extension(mut self, extension: impl Into<String>) -> Self {
        self.calibration_extension = extension.into();
        self
    }

    pub fn with_marker_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.marker_phrase = phrase.into();
        self
    }

    pub fn with_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.separators = separators.into_iter().collect();
        self
    }

    fn value_of<'a>(&self, line: &'a str) -> &'a str {
        match line.rfind(self.separators.as_slice()) {
            Some(idx) => {
                let sep_len = line[idx..].chars().next().map_or(0, char::len_utf8);
                &line[idx + sep_len..]
            }
            None => line,
        }
    }
}

/// Parse the four calibration corners from the sidecar text.
///
/// Lines are taken in file order; they are never sorted or deduplicated.
pub fn parse_corners(
    text: &str,
    format: &CalibrationFormat,
) -> Result<CalibrationCorners, MapperError> {
    let mut points = Vec::with_capacity(4);

    for (line_no, line) in text.lines().enumerate() {
        if !line.contains(format.marker_phrase.as_str()) {
            continue;
        }

        let value = format.value_of(line).trim();
        let fields = value
            .split(',')
            .map(|field| {
                field.trim().parse::<f64>().map_err(|e| {
                    MapperError::InvalidCalibration(format!(
                        "line {}: cannot parse {:?} as a number ({})",
                        line_no + 1,
                        field.trim(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [lon, lat] = fields[..] else {
            return Err(MapperError::InvalidCalibration(format!(
                "line {}: expected `longitude,latitude`, got {} field(s)",
                line_no + 1,
                fields.len()
            )));
        };

        tracing::debug!("Calibration line {}: ({}, {})", line_no + 1, lon, lat);
        points.push(GeoPoint::new(lon, lat));
    }

    CalibrationCorners::try_from(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
图片名称：map.png
左下角经纬度坐标：117.60,35.99
左上角经纬度坐标：117.60,36.01
右上角经纬度坐标：117.65,36.01
右下角经纬度坐标：117.65,35.99
";

    #[test]
    fn test_parse_corners_in_file_order() {
        let corners = parse_corners(SAMPLE, &CalibrationFormat::default()).unwrap();
        assert_eq!(corners.left_bottom, GeoPoint::new(117.60, 35.99));
        assert_eq!(corners.left_top, GeoPoint::new(117.60, 36.01));
        assert_eq!(corners.right_top, GeoPoint::new(117.65, 36.01));
        assert_eq!(corners.right_bottom, GeoPoint::new(117.65, 35.99));
    }

    #[test]
    fn test_coordinate_range_uses_designated_corners() {
        let corners = parse_corners(SAMPLE, &CalibrationFormat::default()).unwrap();
        let range = corners.coordinate_range();
        assert_eq!(range.longitude, (117.60, 117.65));
        assert_eq!(range.latitude, (35.99, 36.01));
    }

    #[test]
    fn test_three_corners_rejected() {
        let text: String = SAMPLE.lines().take(4).collect::<Vec<_>>().join("\n");
        let err = parse_corners(&text, &CalibrationFormat::default()).unwrap_err();
        assert!(matches!(err, MapperError::InvalidCalibration(_)));
    }

    #[test]
    fn test_five_corners_rejected() {
        let text = format!("{}额外经纬度坐标：117.61,36.00\n", SAMPLE);
        let err = parse_corners(&text, &CalibrationFormat::default()).unwrap_err();
        assert!(matches!(err, MapperError::InvalidCalibration(_)));
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let text = SAMPLE.replace("117.65,35.99", "117.65,abc");
        let err = parse_corners(&text, &CalibrationFormat::default()).unwrap_err();
        match err {
            MapperError::InvalidCalibration(msg) => assert!(msg.contains("line 5")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let text = SAMPLE.replace("117.60,35.99", "117.60,35.99,12.0");
        let err = parse_corners(&text, &CalibrationFormat::default()).unwrap_err();
        assert!(matches!(err, MapperError::InvalidCalibration(_)));
    }

    #[test]
    fn test_value_after_last_separator_with_spaces() {
        let text = "\
a 经纬度坐标 (WGS84): 1.5, 2.5
b 经纬度坐标：x：3.0 ,4.0
c 经纬度坐标: 5,6
d 经纬度坐标:7,8
";
        let corners = parse_corners(text, &CalibrationFormat::default()).unwrap();
        assert_eq!(corners.left_bottom, GeoPoint::new(1.5, 2.5));
        assert_eq!(corners.left_top, GeoPoint::new(3.0, 4.0));
        assert_eq!(corners.right_top, GeoPoint::new(5.0, 6.0));
        assert_eq!(corners.right_bottom, GeoPoint::new(7.0, 8.0));
    }

    #[test]
    fn test_ascii_colon_in_label_and_trailing_text() {
        let labelled = "\
经纬度坐标(来源: GPS)：1,2
经纬度坐标 (src: survey): 3,4
经纬度坐标：5,6
经纬度坐标:7,8
";
        let corners = parse_corners(labelled, &CalibrationFormat::default()).unwrap();
        assert_eq!(corners.left_bottom, GeoPoint::new(1.0, 2.0));
        assert_eq!(corners.left_top, GeoPoint::new(3.0, 4.0));
        assert_eq!(corners.right_bottom, GeoPoint::new(7.0, 8.0));

        // A colon after the value moves the split past the numbers.
        let trailing = labelled.replace("5,6", "5,6 (note: checked)");
        let err = parse_corners(&trailing, &CalibrationFormat::default()).unwrap_err();
        assert!(matches!(err, MapperError::InvalidCalibration(_)));

        // Full-width only, as the calibration files are written.
        let strict = CalibrationFormat::default().with_separators(['：']);
        let err = parse_corners("经纬度坐标: 1,2\n", &strict).unwrap_err();
        assert!(matches!(err, MapperError::InvalidCalibration(_)));
    }

    #[test]
    fn test_custom_marker_phrase() {
        let text = "\
corner: 0,0
geo coordinate = 1,2
geo coordinate = 3,4
geo coordinate = 5,6
geo coordinate = 7,8
";
        let format = CalibrationFormat::default()
            .with_marker_phrase("geo coordinate")
            .with_separators(['=']);
        let corners = parse_corners(text, &format).unwrap();
        assert_eq!(corners.left_bottom, GeoPoint::new(1.0, 2.0));
        assert_eq!(corners.right_bottom, GeoPoint::new(7.0, 8.0));
    }
}
