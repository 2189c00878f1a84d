//! VOC to YOLO conversion.
//!
//! [`convert_image`] is the core transform: a pure function from one parsed
//! VOC annotation and a class mapping to the YOLO rows for that image.
//! [`convert_dir`] drives it over a directory of XML files and writes one
//! label file per input, collecting a [`ConversionReport`] along the way.
//!
//! # Policies
//!
//! - Objects whose label is not in the mapping are skipped. That is not an
//!   error; the report counts them.
//! - A zero image width or height is a fault for that image
//!   ([`Voc2YoloError::ZeroImageDimension`]). In a batch run the image is
//!   skipped, no label file is written for it, and the run ends with
//!   [`Voc2YoloError::ConversionFailed`]. With
//!   [`ConvertOptions::fail_fast`] the first fault aborts the batch instead.
//! - Malformed XML is handled the same way as a zero dimension. So is an
//!   unreadable `<bndbox>` on a mapped object; on an unmapped object it is
//!   skipped like any other unmapped object.
//! - Two inputs whose names differ only in the extension's case map to one
//!   label file. The later one is not converted and is reported as failed.

pub mod report;

pub use report::{
    ConversionCounts, ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity,
};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Voc2YoloError;
use crate::ir::io_voc_xml::{discover_xml_files, from_voc_xml_str, read_voc_file};
use crate::ir::io_yolo::{
    ensure_output_dir, label_path_for, to_yolo_label_string, write_data_yaml, write_label_file,
};
use crate::ir::{ClassMapping, ImageAnnotation, NormalizedDetection};

/// Options for [`convert_dir`].
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Abort on the first file that cannot be converted.
    pub fail_fast: bool,
    /// Also write `data.yaml` with the class names into the output directory.
    pub write_data_yaml: bool,
}

/// Convert one image's objects into normalized YOLO detections.
///
/// Output order follows `image.objects`, with unmapped objects left out.
///
/// # Errors
///
/// Returns [`Voc2YoloError::ZeroImageDimension`] if a mapped object has to be
/// normalized against a zero width or height, and
/// [`Voc2YoloError::MalformedBox`] if a mapped object's box was unreadable.
/// Unmapped objects are never looked at beyond their name, so images whose
/// objects are all unmapped never fault.
pub fn convert_image(
    image: &ImageAnnotation,
    mapping: &ClassMapping,
) -> Result<Vec<NormalizedDetection>, Voc2YoloError> {
    let mut detections = Vec::with_capacity(image.objects.len());

    for object in &image.objects {
        let Some(class_id) = mapping.get(&object.class_name) else {
            continue;
        };

        let (x_center, y_center, width, height) = object
            .bbox()?
            .to_normalized_cxcywh(image.width, image.height)?;

        detections.push(NormalizedDetection {
            class_id,
            x_center,
            y_center,
            width,
            height,
        });
    }

    Ok(detections)
}

/// [`convert_image`], also tallying objects into `report`.
///
/// Counters are only touched when the conversion succeeds.
pub fn convert_image_with_report(
    image: &ImageAnnotation,
    mapping: &ClassMapping,
    report: &mut ConversionReport,
) -> Result<Vec<NormalizedDetection>, Voc2YoloError> {
    let detections = convert_image(image, mapping)?;

    report.counts.objects += image.objects.len();
    report.counts.detections += detections.len();
    for object in &image.objects {
        if mapping.get(&object.class_name).is_none() {
            report.record_unmapped(&object.class_name);
        } else if object.bbox().is_ok_and(|bbox| !bbox.is_ordered()) {
            report.counts.inverted_boxes += 1;
        }
    }

    Ok(detections)
}

/// Convert an in-memory VOC XML document straight to label file text.
pub fn voc_xml_to_yolo_string(xml: &str, mapping: &ClassMapping) -> Result<String, Voc2YoloError> {
    let image = from_voc_xml_str(xml)?;
    let detections = convert_image(&image, mapping)?;
    Ok(to_yolo_label_string(&detections))
}

/// Convert every VOC XML file found at `input` into `output_dir`.
///
/// See [`discover_xml_files`] for what `input` may be. The output directory
/// is created if missing; existing label files with the same names are
/// overwritten.
pub fn convert_dir(
    input: &Path,
    output_dir: &Path,
    mapping: &ClassMapping,
    options: &ConvertOptions,
) -> Result<ConversionReport, Voc2YoloError> {
    let files = discover_xml_files(input)?;
    ensure_output_dir(output_dir)?;

    log::info!(
        "converting {} VOC XML file(s) from {} with {} mapped class(es)",
        files.len(),
        input.display(),
        mapping.len()
    );

    let mut report = ConversionReport::new(
        input.display().to_string(),
        output_dir.display().to_string(),
    );
    report.counts.files = files.len();

    let mut empty_label_files = 0usize;
    let mut claimed: BTreeMap<PathBuf, &Path> = BTreeMap::new();

    for xml_path in &files {
        let label_path = label_path_for(output_dir, xml_path)?;
        if let Some(first) = claimed.get(&label_path) {
            let message = format!(
                "label file {} was already written for {}",
                label_path.display(),
                first.display()
            );
            if options.fail_fast {
                return Err(Voc2YoloError::YoloWrite {
                    path: label_path,
                    message,
                });
            }

            log::warn!("skipping {}: {}", xml_path.display(), message);
            report.counts.failed_files += 1;
            report.add(
                ConversionIssue::warning(ConversionIssueCode::LabelNameCollision, message)
                    .with_file(xml_path.display().to_string()),
            );
            continue;
        }

        let outcome = convert_file(xml_path, &label_path, mapping, &mut report);
        claimed.insert(label_path, xml_path.as_path());

        match outcome {
            Ok(0) => {
                report.counts.converted_files += 1;
                empty_label_files += 1;
            }
            Ok(_) => report.counts.converted_files += 1,
            Err(err) if options.fail_fast => return Err(err),
            Err(err) => {
                let Some(code) = per_file_issue_code(&err) else {
                    return Err(err);
                };

                log::warn!("skipping {}: {}", xml_path.display(), err);
                report.counts.failed_files += 1;
                report.add(
                    ConversionIssue::warning(code, err.to_string())
                        .with_file(xml_path.display().to_string()),
                );
            }
        }
    }

    if report.counts.skipped_unmapped > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::UnmappedClassesSkipped,
            format!(
                "{} object(s) with {} unmapped class label(s) were skipped",
                report.counts.skipped_unmapped,
                report.unmapped_classes.len()
            ),
        ));
    }

    if report.counts.inverted_boxes > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::InvertedBoxes,
            format!(
                "{} written box(es) have min > max and a negative width or height",
                report.counts.inverted_boxes
            ),
        ));
    }

    if empty_label_files > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::EmptyLabelFiles,
            format!("{empty_label_files} label file(s) were written empty (no mapped objects)"),
        ));
    }

    if options.write_data_yaml {
        let path = write_data_yaml(output_dir, mapping)?;
        log::info!("wrote class names to {}", path.display());
    }

    log::info!(
        "wrote {} label file(s) to {}",
        report.counts.converted_files,
        output_dir.display()
    );

    if report.is_complete() {
        Ok(report)
    } else {
        Err(Voc2YoloError::ConversionFailed {
            failed: report.counts.failed_files,
            report,
        })
    }
}

/// Issue code for errors that only invalidate the current file. Anything else
/// (I/O on the output side, for instance) stops the batch.
fn per_file_issue_code(err: &Voc2YoloError) -> Option<ConversionIssueCode> {
    match err {
        Voc2YoloError::ZeroImageDimension { .. } => Some(ConversionIssueCode::ZeroImageDimension),
        Voc2YoloError::VocXmlParse { .. } | Voc2YoloError::MalformedBox { .. } => {
            Some(ConversionIssueCode::MalformedVocXml)
        }
        _ => None,
    }
}

/// Returns the number of label lines written.
fn convert_file(
    xml_path: &Path,
    label_path: &Path,
    mapping: &ClassMapping,
    report: &mut ConversionReport,
) -> Result<usize, Voc2YoloError> {
    let image = read_voc_file(xml_path)?;
    let detections = convert_image_with_report(&image, mapping, report)?;

    write_label_file(label_path, &detections)?;

    log::debug!(
        "{} -> {} ({} line(s))",
        xml_path.display(),
        label_path.display(),
        detections.len()
    );

    Ok(detections.len())
}
