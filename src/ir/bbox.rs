//! Bounding box types in corner (XYXY) form, plus center/size conversions.

use super::coord::Coord;
use super::{Normalized, Pixel};
use crate::error::Voc2YoloError;

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// The `TSpace` parameter should be either [`Pixel`](super::Pixel) or
/// [`Normalized`](super::Normalized).
///
/// Corners are not required to be ordered or to lie inside the image. A box
/// read from a sloppy annotation file is carried through as-is and produces
/// equally sloppy output.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYXY<TSpace> {
    pub min: Coord<TSpace>,
    pub max: Coord<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    #[inline]
    pub fn new(min: Coord<TSpace>, max: Coord<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a new bounding box from explicit corner coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Coord::new(xmin, ymin),
            max: Coord::new(xmax, ymax),
        }
    }

    /// Creates a box from its center point and size.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::from_xyxy(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (xmax < xmin).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (ymax < ymin).
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center point of the box.
    #[inline]
    pub fn center(&self) -> Coord<TSpace> {
        self.min.midpoint(&self.max)
    }

    /// Converts to (center_x, center_y, width, height).
    #[inline]
    pub fn to_cxcywh(&self) -> (f64, f64, f64, f64) {
        let center = self.center();
        (center.x, center.y, self.width(), self.height())
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl BBoxXYXY<Pixel> {
    /// Builds a pixel box from integer corners as they appear in VOC XML.
    #[inline]
    pub fn from_pixel_corners(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self::from_xyxy(xmin as f64, ymin as f64, xmax as f64, ymax as f64)
    }

    /// Converts to normalized (center_x, center_y, width, height).
    ///
    /// Each pixel quantity is divided by the matching image dimension:
    /// `cx = (xmin + xmax) / 2 / image_width`, `w = (xmax - xmin) / image_width`,
    /// and likewise for the y axis.
    ///
    /// # Errors
    ///
    /// Returns [`Voc2YoloError::ZeroImageDimension`] if either image dimension
    /// is zero instead of producing infinite or NaN coordinates.
    pub fn to_normalized_cxcywh(
        &self,
        image_width: u32,
        image_height: u32,
    ) -> Result<(f64, f64, f64, f64), Voc2YoloError> {
        if image_width == 0 || image_height == 0 {
            return Err(Voc2YoloError::ZeroImageDimension {
                width: image_width,
                height: image_height,
            });
        }

        let image_width = f64::from(image_width);
        let image_height = f64::from(image_height);
        let (cx, cy, w, h) = self.to_cxcywh();

        Ok((
            cx / image_width,
            cy / image_height,
            w / image_width,
            h / image_height,
        ))
    }
}

impl BBoxXYXY<Normalized> {
    /// Scales normalized coordinates back to pixel space.
    pub fn to_pixel(&self, image_width: u32, image_height: u32) -> BBoxXYXY<Pixel> {
        let image_width = f64::from(image_width);
        let image_height = f64::from(image_height);
        BBoxXYXY::from_xyxy(
            self.min.x * image_width,
            self.min.y * image_height,
            self.max.x * image_width,
            self.max.y * image_height,
        )
    }
}
