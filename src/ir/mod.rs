//! In-memory records and format I/O for voc2yolo.
//!
//! The converter works on three records: an [`ImageAnnotation`] read from a
//! VOC XML file, a [`ClassMapping`] supplied by the caller, and the
//! [`NormalizedDetection`] rows that end up in a YOLO label file.
//!
//! Pixel and normalized boxes are kept apart at the type level through the
//! [`Pixel`] and [`Normalized`] markers on [`BBoxXYXY`].
//!
//! # Example
//!
//! ```
//! use voc2yolo::ir::{ClassMapping, ImageAnnotation, ObjectAnnotation};
//!
//! let image = ImageAnnotation::new(200, 100)
//!     .with_object(ObjectAnnotation::new("car", 50, 20, 150, 80));
//! let mapping = ClassMapping::from_pairs([("car", 0), ("human", 1)]).unwrap();
//!
//! assert_eq!(image.objects.len(), 1);
//! assert!(mapping.get("car").is_some());
//! ```

mod bbox;
pub mod class_map;
mod coord;
mod ids;
pub mod io_voc_xml;
pub mod io_yolo;
mod model;
mod space;

pub use bbox::BBoxXYXY;
pub use class_map::{ClassMapFormat, ClassMapping};
pub use coord::Coord;
pub use ids::ClassId;
pub use model::{ImageAnnotation, NormalizedDetection, ObjectAnnotation, VocBox};
pub use space::{Normalized, Pixel};
