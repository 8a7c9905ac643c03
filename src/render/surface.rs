//! Minimal raster capability set used by the mapper.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

/// Resampling used when resizing a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleQuality {
    /// Area averaging when shrinking; falls back to bilinear when enlarging.
    #[default]
    Area,
    Bilinear,
    Lanczos3,
}

/// Operations the mapper needs from an image buffer.
pub trait RasterSurface: Sized {
    type Color: Copy;

    /// A new surface of the given size filled with `color`.
    fn filled(width: u32, height: u32, color: Self::Color) -> Self;

    fn dimensions(&self) -> (u32, u32);

    fn copy(&self) -> Self;

    fn draw_filled_circle(&mut self, center: (i32, i32), radius: u32, color: Self::Color);

    fn resize(&self, width: u32, height: u32, quality: ResampleQuality) -> Self;

    fn fill_rect(&mut self, origin: (i32, i32), size: (u32, u32), color: Self::Color);

    /// Paste `source` with its top-left corner at `offset`, clipping to bounds.
    fn blit(&mut self, source: &Self, offset: (i64, i64));
}

impl RasterSurface for RgbImage {
    type Color = Rgb<u8>;

    fn filled(width: u32, height: u32, color: Self::Color) -> Self {
        let mut surface = RgbImage::new(width, height);
        surface.fill_rect((0, 0), (width, height), color);
        surface
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn copy(&self) -> Self {
        self.clone()
    }

    fn draw_filled_circle(&mut self, center: (i32, i32), radius: u32, color: Self::Color) {
        // Past the farthest pixel a larger radius covers nothing new.
        let reach = u64::from(center.0.unsigned_abs())
            + u64::from(center.1.unsigned_abs())
            + u64::from(self.width())
            + u64::from(self.height());
        let radius = u64::from(radius).min(reach);
        let radius = i32::try_from(radius).unwrap_or(i32::MAX);
        draw_filled_circle_mut(self, center, radius, color);
    }

    fn resize(&self, width: u32, height: u32, quality: ResampleQuality) -> Self {
        let shrinking = width <= self.width() && height <= self.height();
        match quality {
            ResampleQuality::Area if shrinking => imageops::thumbnail(self, width, height),
            ResampleQuality::Area | ResampleQuality::Bilinear => {
                imageops::resize(self, width, height, FilterType::Triangle)
            }
            ResampleQuality::Lanczos3 => imageops::resize(self, width, height, FilterType::Lanczos3),
        }
    }

    fn fill_rect(&mut self, origin: (i32, i32), size: (u32, u32), color: Self::Color) {
        if size.0 == 0 || size.1 == 0 {
            return;
        }
        draw_filled_rect_mut(self, Rect::at(origin.0, origin.1).of_size(size.0, size.1), color);
    }

    fn blit(&mut self, source: &Self, offset: (i64, i64)) {
        imageops::replace(self, source, offset.0, offset.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

    #[test]
    fn test_filled_surface() {
        let surface = RgbImage::filled(7, 3, GRAY);
        assert_eq!(RasterSurface::dimensions(&surface), (7, 3));
        assert!(surface.pixels().all(|p| *p == GRAY));
    }

    #[test]
    fn test_filled_circle_covers_center_and_radius() {
        let mut surface = RgbImage::filled(21, 21, GRAY);
        surface.draw_filled_circle((10, 10), 5, RED);
        assert_eq!(*surface.get_pixel(10, 10), RED);
        assert_eq!(*surface.get_pixel(15, 10), RED);
        assert_eq!(*surface.get_pixel(10, 5), RED);
        assert_eq!(*surface.get_pixel(0, 0), GRAY);
        assert_eq!(*surface.get_pixel(17, 10), GRAY);
    }

    #[test]
    fn test_circle_near_edge_is_clipped() {
        let mut surface = RgbImage::filled(10, 10, GRAY);
        surface.draw_filled_circle((0, 0), 3, RED);
        assert_eq!(*surface.get_pixel(0, 0), RED);
        assert_eq!(*surface.get_pixel(9, 9), GRAY);
    }

    #[test]
    fn test_huge_radius_fills_surface() {
        let mut surface = RgbImage::filled(4, 4, GRAY);
        surface.draw_filled_circle((1, 1), u32::MAX, RED);
        assert!(surface.pixels().all(|p| *p == RED));

        let mut surface = RgbImage::filled(6, 3, GRAY);
        surface.draw_filled_circle((5, 2), 2_000_000_000, RED);
        assert!(surface.pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_copy_is_independent() {
        let original = RgbImage::filled(4, 4, GRAY);
        let mut copy = original.copy();
        copy.fill_rect((0, 0), (2, 2), RED);
        assert_eq!(*original.get_pixel(0, 0), GRAY);
        assert_eq!(*copy.get_pixel(0, 0), RED);
        assert_eq!(*copy.get_pixel(3, 3), GRAY);
    }

    #[test]
    fn test_resize_dimensions() {
        let surface = RgbImage::filled(40, 20, RED);
        for quality in [
            ResampleQuality::Area,
            ResampleQuality::Bilinear,
            ResampleQuality::Lanczos3,
        ] {
            let smaller = surface.resize(10, 5, quality);
            assert_eq!(RasterSurface::dimensions(&smaller), (10, 5));
            let larger = surface.resize(80, 40, quality);
            assert_eq!(RasterSurface::dimensions(&larger), (80, 40));
        }
    }

    #[test]
    fn test_area_resize_keeps_uniform_color() {
        let surface = RgbImage::filled(40, 20, RED);
        let smaller = surface.resize(13, 7, ResampleQuality::Area);
        assert!(smaller
            .pixels()
            .all(|p| p[0] >= 254 && p[1] <= 1 && p[2] <= 1));
    }

    #[test]
    fn test_blit_with_offset_and_clipping() {
        let mut canvas = RgbImage::filled(6, 6, GRAY);
        let patch = RgbImage::filled(4, 4, RED);
        canvas.blit(&patch, (4, 1));
        assert_eq!(*canvas.get_pixel(3, 1), GRAY);
        assert_eq!(*canvas.get_pixel(4, 1), RED);
        assert_eq!(*canvas.get_pixel(5, 4), RED);
        assert_eq!(*canvas.get_pixel(5, 5), GRAY);
        assert_eq!(*canvas.get_pixel(4, 0), GRAY);
    }
}
