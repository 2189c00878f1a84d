//! Class-name to class-id lookup table.
//!
//! A [`ClassMapping`] is supplied once, before conversion starts, and is only
//! read afterwards. It can be built in code, from `name=id` pairs given on the
//! command line, from a YAML document, or from a `classes.txt` file.
//!
//! Accepted YAML shapes:
//!
//! ```yaml
//! # Ultralytics data.yaml, sequence form (index = id)
//! names: [car, human]
//! ```
//!
//! ```yaml
//! # Ultralytics data.yaml, mapping form
//! names:
//!   0: car
//!   1: human
//! ```
//!
//! ```yaml
//! # flat name -> id mapping
//! car: 0
//! human: 1
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::ids::ClassId;
use crate::error::Voc2YoloError;

/// Lookup table from class label to [`ClassId`].
///
/// Names are unique. Several names may share one id, which merges those
/// labels into a single training class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassMapping {
    by_name: BTreeMap<String, ClassId>,
}

impl ClassMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from `(name, id)` pairs, rejecting repeated names.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, Voc2YoloError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut mapping = Self::new();
        for (name, id) in pairs {
            mapping.insert(name, ClassId::new(id))?;
        }
        Ok(mapping)
    }

    /// Adds one entry.
    ///
    /// # Errors
    ///
    /// Returns [`Voc2YoloError::ClassMapInvalid`] if `name` is already mapped.
    pub fn insert(&mut self, name: impl Into<String>, id: ClassId) -> Result<(), Voc2YoloError> {
        let name = name.into();
        if let Some(existing) = self.by_name.get(&name) {
            return Err(Voc2YoloError::ClassMapInvalid {
                path: PathBuf::from("<inline>"),
                message: format!("class '{name}' is mapped twice (ids {existing} and {id})"),
            });
        }
        self.by_name.insert(name, id);
        Ok(())
    }

    /// Looks up a class label. `None` means the label is unmapped.
    #[inline]
    pub fn get(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterates entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ClassId)> {
        self.by_name.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// One display name per id, ascending by id.
    ///
    /// When several names share an id, the lexicographically first one wins.
    pub fn names_by_id(&self) -> BTreeMap<ClassId, &str> {
        let mut names = BTreeMap::new();
        for (name, id) in self.iter() {
            names.entry(id).or_insert(name);
        }
        names
    }

    /// Parses `name=id` pairs as given on the command line.
    pub fn from_cli_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, Voc2YoloError> {
        let mut mapping = Self::new();
        for raw in pairs {
            let (name, id) = parse_class_pair(raw.as_ref())?;
            mapping.insert(name, id)?;
        }
        Ok(mapping)
    }
}

/// File format of a class-map file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassMapFormat {
    /// Pick by extension: `.yaml`/`.yml` is YAML, anything else is `classes.txt`.
    Auto,
    Yaml,
    ClassesTxt,
}

impl FromStr for ClassMapFormat {
    type Err = Voc2YoloError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "yaml" | "yml" | "data-yaml" => Ok(Self::Yaml),
            "txt" | "classes-txt" => Ok(Self::ClassesTxt),
            other => Err(Voc2YoloError::UnsupportedFormat(format!(
                "'{other}' (supported: auto, yaml, txt)"
            ))),
        }
    }
}

/// Reads a class map from `path`.
pub fn read_class_map(path: &Path, format: ClassMapFormat) -> Result<ClassMapping, Voc2YoloError> {
    let data = fs::read_to_string(path).map_err(Voc2YoloError::Io)?;

    let format = match format {
        ClassMapFormat::Auto if has_yaml_extension(path) => ClassMapFormat::Yaml,
        ClassMapFormat::Auto => ClassMapFormat::ClassesTxt,
        explicit => explicit,
    };

    match format {
        ClassMapFormat::Yaml => class_map_from_yaml_str(&data, path),
        _ => class_map_from_classes_txt_str(&data, path),
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassMapYaml {
    DataYaml { names: DataYamlNames },
    Flat(BTreeMap<String, u32>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<u32, String>),
}

/// Parses a YAML class map. `path` is only used for error messages.
pub fn class_map_from_yaml_str(yaml: &str, path: &Path) -> Result<ClassMapping, Voc2YoloError> {
    let parsed: ClassMapYaml =
        serde_yaml::from_str(yaml).map_err(|source| Voc2YoloError::ClassMapParse {
            path: path.to_path_buf(),
            source,
        })?;

    let pairs: Vec<(String, u32)> = match parsed {
        ClassMapYaml::DataYaml {
            names: DataYamlNames::Sequence(names),
        } => names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                u32::try_from(index)
                    .map(|id| (name, id))
                    .map_err(|_| Voc2YoloError::ClassMapInvalid {
                        path: path.to_path_buf(),
                        message: format!("class index {index} does not fit in u32"),
                    })
            })
            .collect::<Result<_, _>>()?,
        ClassMapYaml::DataYaml {
            names: DataYamlNames::Mapping(names),
        } => names.into_iter().map(|(id, name)| (name, id)).collect(),
        ClassMapYaml::Flat(mapping) => mapping.into_iter().collect(),
    };

    build_checked(pairs, path)
}

/// Parses a `classes.txt` file: one name per line, id = zero-based line number.
pub fn class_map_from_classes_txt_str(
    text: &str,
    path: &Path,
) -> Result<ClassMapping, Voc2YoloError> {
    let mut pairs = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(Voc2YoloError::ClassMapInvalid {
                path: path.to_path_buf(),
                message: format!("line {} is empty", line_idx + 1),
            });
        }
        let id = u32::try_from(line_idx).map_err(|_| Voc2YoloError::ClassMapInvalid {
            path: path.to_path_buf(),
            message: format!("line {} exceeds the u32 class id range", line_idx + 1),
        })?;
        pairs.push((trimmed.to_string(), id));
    }

    build_checked(pairs, path)
}

fn build_checked(pairs: Vec<(String, u32)>, path: &Path) -> Result<ClassMapping, Voc2YoloError> {
    let mut mapping = ClassMapping::new();
    for (name, id) in pairs {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Voc2YoloError::ClassMapInvalid {
                path: path.to_path_buf(),
                message: format!("class id {id} has an empty name"),
            });
        }
        mapping
            .insert(name, ClassId::new(id))
            .map_err(|err| match err {
                Voc2YoloError::ClassMapInvalid { message, .. } => Voc2YoloError::ClassMapInvalid {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            })?;
    }
    Ok(mapping)
}

fn parse_class_pair(raw: &str) -> Result<(String, ClassId), Voc2YoloError> {
    let invalid = |message: String| Voc2YoloError::ClassMapInvalid {
        path: PathBuf::from("<inline>"),
        message,
    };

    let (name, id) = raw
        .rsplit_once('=')
        .ok_or_else(|| invalid(format!("expected NAME=ID, got '{raw}'")))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(format!("missing class name in '{raw}'")));
    }

    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid(format!("invalid class id in '{raw}'; expected u32")))?;

    Ok((name.to_string(), ClassId::new(id)))
}

fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}
