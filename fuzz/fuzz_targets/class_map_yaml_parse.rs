//! Fuzz target for YAML class map parsing.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use voc2yolo::ir::class_map::{class_map_from_classes_txt_str, class_map_from_yaml_str};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = class_map_from_yaml_str(text, Path::new("<fuzz>"));
    let _ = class_map_from_classes_txt_str(text, Path::new("<fuzz>"));
});
