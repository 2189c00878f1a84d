//! Records passed between the VOC reader, the converter and the YOLO writer.

use super::bbox::BBoxXYXY;
use super::ids::ClassId;
use super::space::{Normalized, Pixel};
use crate::error::Voc2YoloError;

/// Contents of one VOC annotation file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageAnnotation {
    /// Value of `<filename>`, if present. Informational only.
    pub filename: Option<String>,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// Labeled boxes, in document order.
    pub objects: Vec<ObjectAnnotation>,
}

impl ImageAnnotation {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            filename: None,
            width,
            height,
            objects: Vec::new(),
        }
    }

    /// Appends an object, builder style.
    pub fn with_object(mut self, object: ObjectAnnotation) -> Self {
        self.objects.push(object);
        self
    }
}

/// Corners of a VOC `<bndbox>`.
///
/// A box that could not be read is kept as [`VocBox::Malformed`] so that an
/// unmapped object with a broken box can still be skipped. It only becomes an
/// error once the object is mapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VocBox {
    Corners {
        x_min: i64,
        y_min: i64,
        x_max: i64,
        y_max: i64,
    },
    Malformed(String),
}

/// One labeled box from a VOC `<object>` element.
///
/// An empty or missing `<name>` is kept as an empty class name, which no
/// mapping contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectAnnotation {
    pub class_name: String,
    pub bndbox: VocBox,
}

impl ObjectAnnotation {
    pub fn new(
        class_name: impl Into<String>,
        x_min: i64,
        y_min: i64,
        x_max: i64,
        y_max: i64,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            bndbox: VocBox::Corners {
                x_min,
                y_min,
                x_max,
                y_max,
            },
        }
    }

    /// An object whose `<bndbox>` could not be read.
    pub fn with_malformed_box(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            bndbox: VocBox::Malformed(message.into()),
        }
    }

    /// The box in pixel space.
    ///
    /// # Errors
    ///
    /// Returns [`Voc2YoloError::MalformedBox`] if the `<bndbox>` was unreadable.
    pub fn bbox(&self) -> Result<BBoxXYXY<Pixel>, Voc2YoloError> {
        match &self.bndbox {
            VocBox::Corners {
                x_min,
                y_min,
                x_max,
                y_max,
            } => Ok(BBoxXYXY::from_pixel_corners(*x_min, *y_min, *x_max, *y_max)),
            VocBox::Malformed(message) => Err(Voc2YoloError::MalformedBox {
                class_name: self.class_name.clone(),
                message: message.clone(),
            }),
        }
    }
}

/// One YOLO label row: class id plus a normalized center/size box.
///
/// Values are not clamped; an out-of-image source box yields values
/// outside `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedDetection {
    pub class_id: ClassId,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedDetection {
    /// The detection as a normalized corner box.
    pub fn bbox(&self) -> BBoxXYXY<Normalized> {
        BBoxXYXY::from_cxcywh(self.x_center, self.y_center, self.width, self.height)
    }

    /// Reconstructs the pixel box for an image of the given size.
    pub fn to_pixel_bbox(&self, image_width: u32, image_height: u32) -> BBoxXYXY<Pixel> {
        self.bbox().to_pixel(image_width, image_height)
    }
}
