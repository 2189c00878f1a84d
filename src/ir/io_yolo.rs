//! YOLO label writer.
//!
//! One label file per image, one line per detection:
//!
//! ```text
//! <class_id> <x_center> <y_center> <width> <height>
//! ```
//!
//! The class id is a bare integer and the four box values are printed with
//! exactly six digits after the decimal point. Every line ends in `\n`.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::class_map::ClassMapping;
use super::model::NormalizedDetection;
use crate::error::Voc2YoloError;

pub const LABEL_EXTENSION: &str = "txt";

/// Format one detection as a label line, without the trailing newline.
pub fn format_detection_line(detection: &NormalizedDetection) -> String {
    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        detection.class_id,
        detection.x_center,
        detection.y_center,
        detection.width,
        detection.height
    )
}

/// Render a whole label file in memory.
pub fn to_yolo_label_string(detections: &[NormalizedDetection]) -> String {
    let mut out = String::with_capacity(detections.len() * 48);
    for detection in detections {
        writeln!(out, "{}", format_detection_line(detection)).expect("write to string");
    }
    out
}

/// Write a label file, replacing any existing file. An empty slice produces
/// an empty file.
pub fn write_label_file(
    path: &Path,
    detections: &[NormalizedDetection],
) -> Result<(), Voc2YoloError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Voc2YoloError::Io)?;
    }

    let mut label_file = fs::File::create(path).map_err(Voc2YoloError::Io)?;
    for detection in detections {
        writeln!(label_file, "{}", format_detection_line(detection)).map_err(Voc2YoloError::Io)?;
    }

    Ok(())
}

/// Label path for a source annotation: same stem, `.txt` extension, inside
/// `output_dir`.
pub fn label_path_for(output_dir: &Path, source_path: &Path) -> Result<PathBuf, Voc2YoloError> {
    let file_name = source_path
        .file_name()
        .ok_or_else(|| Voc2YoloError::YoloWrite {
            path: source_path.to_path_buf(),
            message: "source path has no file name".to_string(),
        })?;

    Ok(output_dir.join(Path::new(file_name).with_extension(LABEL_EXTENSION)))
}

/// Prepare the output directory, creating it if needed.
pub fn ensure_output_dir(output_dir: &Path) -> Result<(), Voc2YoloError> {
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(Voc2YoloError::YoloWrite {
            path: output_dir.to_path_buf(),
            message: "output path exists and is not a directory".to_string(),
        });
    }
    fs::create_dir_all(output_dir).map_err(Voc2YoloError::Io)
}

/// Write an Ultralytics-style `data.yaml` listing the class names by id.
///
/// Returns the path of the written file.
pub fn write_data_yaml(
    output_dir: &Path,
    mapping: &ClassMapping,
) -> Result<PathBuf, Voc2YoloError> {
    let mut yaml = String::from("names:\n");
    for (id, name) in mapping.names_by_id() {
        writeln!(yaml, "  {}: {}", id, yaml_single_quoted(name)).expect("write to string");
    }

    let path = output_dir.join("data.yaml");
    fs::write(&path, yaml).map_err(Voc2YoloError::Io)?;
    Ok(path)
}

fn yaml_single_quoted(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}
