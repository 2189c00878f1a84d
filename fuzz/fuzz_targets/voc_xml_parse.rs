//! Fuzz target for VOC XML parsing and conversion.
//!
//! Feeds arbitrary bytes to the VOC XML parser and converts whatever parses,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voc2yolo::conversion::convert_image;
use voc2yolo::ir::io_voc_xml::from_voc_xml_slice;
use voc2yolo::ir::ClassMapping;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(image) = from_voc_xml_slice(data) else {
        return;
    };

    let mapping = ClassMapping::from_pairs([("car", 0), ("human", 1)]).unwrap();
    let _ = convert_image(&image, &mapping);
});
