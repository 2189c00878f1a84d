//! Pascal VOC XML reader.
//!
//! Each XML file describes one image: a `<size>` element with integer
//! `<width>`/`<height>` and zero or more `<object>` elements, each holding a
//! `<name>` and a `<bndbox>` with integer `<xmin>`, `<ymin>`, `<xmax>`,
//! `<ymax>`. Only what the converter needs is extracted; pose, truncation and
//! similar flags are ignored.
//!
//! Object-level problems do not fail the parse. An empty `<name>` becomes an
//! empty class name and an unreadable `<bndbox>` is kept as
//! [`VocBox::Malformed`]; both only matter if the object turns out to be
//! mapped.

use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::Node;
use walkdir::WalkDir;

use super::model::{ImageAnnotation, ObjectAnnotation, VocBox};
use crate::error::Voc2YoloError;

pub const VOC_XML_EXTENSION: &str = "xml";

/// Read and parse a single VOC XML file.
///
/// A file that is not valid UTF-8 is reported as [`Voc2YoloError::VocXmlParse`].
pub fn read_voc_file(path: &Path) -> Result<ImageAnnotation, Voc2YoloError> {
    let bytes = fs::read(path).map_err(Voc2YoloError::Io)?;
    parse_voc_xml_slice(&bytes, path)
}

/// Parse VOC XML from a UTF-8 string.
pub fn from_voc_xml_str(xml: &str) -> Result<ImageAnnotation, Voc2YoloError> {
    parse_voc_xml_str(xml, Path::new("<memory>"))
}

/// Parse VOC XML from bytes.
///
/// The input must be valid UTF-8.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<ImageAnnotation, Voc2YoloError> {
    parse_voc_xml_slice(bytes, Path::new("<memory>"))
}

/// Find the VOC XML files to convert.
///
/// `input` may be a single `.xml` file, a directory of `.xml` files, or a VOC
/// dataset root containing `Annotations/`. Directories are scanned flat and
/// the result is sorted by file name.
pub fn discover_xml_files(input: &Path) -> Result<Vec<PathBuf>, Voc2YoloError> {
    if input.is_file() {
        if !has_xml_extension(input) {
            return Err(Voc2YoloError::VocLayoutInvalid {
                path: input.to_path_buf(),
                message: "input file does not have an .xml extension".to_string(),
            });
        }
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        return Err(Voc2YoloError::VocLayoutInvalid {
            path: input.to_path_buf(),
            message: "input must be an .xml file or a directory".to_string(),
        });
    }

    let annotations_dir = input.join("Annotations");
    let dir = if annotations_dir.is_dir() {
        annotations_dir
    } else {
        input.to_path_buf()
    };

    collect_xml_files(&dir)
}

fn collect_xml_files(dir: &Path) -> Result<Vec<PathBuf>, Voc2YoloError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(Voc2YoloError::Io)? {
        let entry = entry.map_err(Voc2YoloError::Io)?;
        let path = entry.path();
        if path.is_file() && has_xml_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by_cached_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| rel_string(dir, path))
    });

    let mut nested_xml = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).min_depth(2) {
        let entry = entry.map_err(|source| Voc2YoloError::VocLayoutInvalid {
            path: dir.to_path_buf(),
            message: format!("failed while traversing annotations directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_xml_extension(entry.path()) {
            nested_xml.push(entry.path().to_path_buf());
        }
    }

    if !nested_xml.is_empty() {
        nested_xml.sort_by_cached_key(|path| rel_string(dir, path));
        log::warn!(
            "scanning {} flat (non-recursive); skipping {} nested .xml file(s), e.g. {}",
            dir.display(),
            nested_xml.len(),
            rel_string(dir, &nested_xml[0])
        );
    }

    Ok(files)
}

fn parse_voc_xml_slice(bytes: &[u8], path: &Path) -> Result<ImageAnnotation, Voc2YoloError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| Voc2YoloError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    parse_voc_xml_str(xml, path)
}

fn parse_voc_xml_str(xml: &str, path: &Path) -> Result<ImageAnnotation, Voc2YoloError> {
    let document =
        roxmltree::Document::parse(xml).map_err(|source| Voc2YoloError::VocXmlParse {
            path: path.to_path_buf(),
            message: source.to_string(),
        })?;

    let annotation = document.root_element();
    if annotation.tag_name().name() != "annotation" {
        return Err(Voc2YoloError::VocXmlParse {
            path: path.to_path_buf(),
            message: "missing <annotation> root element".to_string(),
        });
    }

    let filename = optional_child_text(annotation, "filename");

    let size = required_child_element(annotation, "size", path, "<annotation>")?;
    let width = parse_required_u32(size, "width", path, "<size>")?;
    let height = parse_required_u32(size, "height", path, "<size>")?;

    let mut objects = Vec::new();
    for object in annotation
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = optional_child_text(object, "name").unwrap_or_default();
        let bndbox = match parse_bndbox(object, path) {
            Ok(bndbox) => bndbox,
            Err(Voc2YoloError::VocXmlParse { message, .. }) => VocBox::Malformed(message),
            Err(other) => return Err(other),
        };

        objects.push(ObjectAnnotation {
            class_name: name,
            bndbox,
        });
    }

    Ok(ImageAnnotation {
        filename,
        width,
        height,
        objects,
    })
}

fn parse_bndbox(object: Node<'_, '_>, path: &Path) -> Result<VocBox, Voc2YoloError> {
    let bndbox = required_child_element(object, "bndbox", path, "<object>")?;

    Ok(VocBox::Corners {
        x_min: parse_required_i64(bndbox, "xmin", path, "<bndbox>")?,
        y_min: parse_required_i64(bndbox, "ymin", path, "<bndbox>")?,
        x_max: parse_required_i64(bndbox, "xmax", path, "<bndbox>")?,
        y_max: parse_required_i64(bndbox, "ymax", path, "<bndbox>")?,
    })
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<Node<'a, 'input>, Voc2YoloError> {
    child_element(node, tag).ok_or_else(|| Voc2YoloError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<String, Voc2YoloError> {
    optional_child_text(node, tag).ok_or_else(|| Voc2YoloError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("missing <{tag}> in {context}"),
    })
}

fn parse_required_u32(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<u32, Voc2YoloError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<u32>().map_err(|_| Voc2YoloError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected u32"),
    })
}

fn parse_required_i64(
    node: Node<'_, '_>,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<i64, Voc2YoloError> {
    let raw = required_child_text(node, tag, path, context)?;
    raw.parse::<i64>().map_err(|_| Voc2YoloError::VocXmlParse {
        path: path.to_path_buf(),
        message: format!("invalid <{tag}> value '{raw}' in {context}; expected integer"),
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn optional_child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

pub(crate) fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(VOC_XML_EXTENSION))
        .unwrap_or(false)
}

fn rel_string(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
