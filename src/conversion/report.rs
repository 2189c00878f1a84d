//! Conversion report types.
//!
//! Tracks file and object counts, labels that had no class id, and the files
//! that could not be converted, so a batch run can be summarized for humans
//! (`Display`) or tooling (`Serialize`).

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Summary of one batch conversion.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Input path as given.
    pub input: String,
    /// Output directory as given.
    pub output: String,
    pub counts: ConversionCounts,
    /// Unmapped class labels and how many objects carried each.
    pub unmapped_classes: BTreeMap<String, usize>,
    /// Issues discovered during conversion.
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    /// Record one object whose label has no class id.
    pub fn record_unmapped(&mut self, class_name: &str) {
        self.counts.skipped_unmapped += 1;
        *self
            .unmapped_classes
            .entry(class_name.to_string())
            .or_default() += 1;
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }

    /// Returns true if every discovered file produced a label file.
    pub fn is_complete(&self) -> bool {
        self.counts.failed_files == 0
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Converted {} -> {}", self.input, self.output)?;
        writeln!(
            f,
            "  {} file(s): {} converted, {} failed",
            self.counts.files, self.counts.converted_files, self.counts.failed_files
        )?;
        writeln!(
            f,
            "  {} object(s): {} written, {} skipped (unmapped class)",
            self.counts.objects, self.counts.detections, self.counts.skipped_unmapped
        )?;

        if !self.unmapped_classes.is_empty() {
            let listed: Vec<String> = self
                .unmapped_classes
                .iter()
                .map(|(name, count)| {
                    let name = if name.is_empty() { "<unnamed>" } else { name };
                    format!("{name} ({count})")
                })
                .collect();
            writeln!(f, "  unmapped classes: {}", listed.join(", "))?;
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Warning)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Info)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        Ok(())
    }
}

/// File and object counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionCounts {
    /// XML files discovered.
    pub files: usize,
    /// Label files written.
    pub converted_files: usize,
    /// Files that did not get a label file.
    pub failed_files: usize,
    /// Objects seen in successfully parsed files.
    pub objects: usize,
    /// Label lines written.
    pub detections: usize,
    /// Objects dropped because their class is not in the mapping.
    pub skipped_unmapped: usize,
    /// Written boxes whose min corner lies past the max corner.
    pub inverted_boxes: usize,
}

/// A single issue discovered during conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    pub message: String,
    /// File the issue refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ConversionIssue {
    pub fn warning(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            message: message.into(),
            file: None,
        }
    }

    pub fn info(code: ConversionIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            message: message.into(),
            file: None,
        }
    }

    /// Attach the file the issue refers to.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl fmt::Display for ConversionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}: {}", file, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Severity level for conversion issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    /// A file was not converted.
    Warning,
    /// A policy note; nothing was lost beyond what the policy defines.
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON report and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// Image width or height is zero; boxes cannot be normalized.
    ZeroImageDimension,
    /// XML was malformed or missing required elements.
    MalformedVocXml,
    /// Some objects were skipped because their class is unmapped.
    UnmappedClassesSkipped,
    /// Files with no mapped objects still get an empty label file.
    EmptyLabelFiles,
    /// Two inputs map to the same label file name; the later one was skipped.
    LabelNameCollision,
    /// Some written boxes have min > max and therefore a negative size.
    InvertedBoxes,
}
