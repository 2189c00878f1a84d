#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// (name, xmin, ymin, xmax, ymax)
pub type VocObject<'a> = (&'a str, i64, i64, i64, i64);

pub fn voc_xml(filename: &str, width: u32, height: u32, objects: &[VocObject<'_>]) -> String {
    let mut xml = String::new();
    writeln!(xml, "<?xml version=\"1.0\" encoding=\"utf-8\"?>").unwrap();
    writeln!(xml, "<annotation>").unwrap();
    writeln!(xml, "  <folder>JPEGImages</folder>").unwrap();
    writeln!(xml, "  <filename>{filename}</filename>").unwrap();
    writeln!(xml, "  <size>").unwrap();
    writeln!(xml, "    <width>{width}</width>").unwrap();
    writeln!(xml, "    <height>{height}</height>").unwrap();
    writeln!(xml, "    <depth>3</depth>").unwrap();
    writeln!(xml, "  </size>").unwrap();
    for (name, xmin, ymin, xmax, ymax) in objects {
        writeln!(xml, "  <object>").unwrap();
        writeln!(xml, "    <name>{name}</name>").unwrap();
        writeln!(xml, "    <difficult>0</difficult>").unwrap();
        writeln!(xml, "    <bndbox>").unwrap();
        writeln!(xml, "      <xmin>{xmin}</xmin>").unwrap();
        writeln!(xml, "      <ymin>{ymin}</ymin>").unwrap();
        writeln!(xml, "      <xmax>{xmax}</xmax>").unwrap();
        writeln!(xml, "      <ymax>{ymax}</ymax>").unwrap();
        writeln!(xml, "    </bndbox>").unwrap();
        writeln!(xml, "  </object>").unwrap();
    }
    writeln!(xml, "</annotation>").unwrap();
    xml
}

pub fn write_voc(dir: &Path, file_name: &str, xml: &str) {
    fs::create_dir_all(dir).expect("create xml dir");
    fs::write(dir.join(file_name), xml).expect("write xml file");
}

/// Writes the small mixed dataset used by several tests into `dir`:
///
/// - `street.xml`: a car, a bicycle (unmapped) and a human
/// - `empty.xml`: only a bicycle
/// - `broken.xml`: zero width
pub fn create_sample_voc_dir(dir: &Path) {
    write_voc(
        dir,
        "street.xml",
        &voc_xml(
            "street.jpg",
            200,
            100,
            &[
                ("car", 50, 20, 150, 80),
                ("bicycle", 0, 0, 10, 10),
                ("human", 0, 0, 200, 100),
            ],
        ),
    );
    write_voc(
        dir,
        "empty.xml",
        &voc_xml("empty.jpg", 64, 64, &[("bicycle", 1, 1, 2, 2)]),
    );
    write_voc(
        dir,
        "broken.xml",
        &voc_xml("broken.jpg", 0, 100, &[("car", 0, 0, 0, 10)]),
    );
}

pub const STREET_LABELS: &str =
    "0 0.500000 0.500000 0.500000 0.600000\n1 0.500000 0.500000 1.000000 1.000000\n";
