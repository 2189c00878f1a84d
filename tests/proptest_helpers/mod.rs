#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use voc2yolo::ir::{ClassMapping, ImageAnnotation, ObjectAnnotation};

/// Labels used by generated images; the last one is never mapped.
pub const LABELS: [&str; 4] = ["car", "human", "dog", "bicycle"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn mapping() -> ClassMapping {
    ClassMapping::from_pairs([("car", 0), ("human", 1), ("dog", 2)]).expect("build mapping")
}

/// Rounding slack for a value printed with six decimals.
pub const EPS_PRINTED: f64 = 5e-7 + 1e-12;

/// Pixel reconstruction slack after six-decimal rounding.
pub fn eps_pixels(image_w: u32, image_h: u32) -> f64 {
    image_w.max(image_h) as f64 * 1e-6
}

pub fn arb_label() -> impl Strategy<Value = String> {
    prop::sample::select(LABELS.to_vec()).prop_map(|label| label.to_string())
}

/// An object whose box lies inside a `width` x `height` image.
pub fn arb_object_within(width: u32, height: u32) -> impl Strategy<Value = ObjectAnnotation> {
    let w = i64::from(width);
    let h = i64::from(height);
    (arb_label(), 0..=w, 0..=w, 0..=h, 0..=h).prop_map(|(label, x1, x2, y1, y2)| {
        ObjectAnnotation::new(label, x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    })
}

/// An image with positive dimensions and up to `max_objects` in-bounds objects.
pub fn arb_image(max_objects: usize) -> impl Strategy<Value = ImageAnnotation> {
    (1u32..=4096, 1u32..=4096).prop_flat_map(move |(width, height)| {
        prop::collection::vec(arb_object_within(width, height), 0..=max_objects).prop_map(
            move |objects| ImageAnnotation {
                filename: None,
                width,
                height,
                objects,
            },
        )
    })
}
