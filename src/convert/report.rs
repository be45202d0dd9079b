//! Conversion report types for tracking dropped records and expansions.
//!
//! Unsupported records never fail a conversion; the report is where a caller
//! can see which ones were dropped.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::model::ShapeKind;

/// A report generated alongside a batch conversion.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    /// Label for where the records came from (a path, or `<records>`).
    pub source: String,
    /// Record and shape counts.
    pub counts: ConversionCounts,
    /// Shapes produced, per kind.
    pub shapes_by_kind: BTreeMap<&'static str, usize>,
    /// Issues discovered during conversion.
    pub issues: Vec<ConversionIssue>,
}

impl ConversionReport {
    /// Create a new empty report.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    /// Record that one shape of `kind` was produced.
    pub fn count_shape(&mut self, kind: ShapeKind) {
        self.counts.shapes += 1;
        *self.shapes_by_kind.entry(kind.name()).or_default() += 1;
    }

    /// Count of warning-level issues (records dropped).
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    /// Count of info-level issues (notes).
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }

    /// Returns true if any record was dropped.
    pub fn is_lossy(&self) -> bool {
        self.warning_count() > 0
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} record(s) -> {} shape(s)",
            self.source, self.counts.records, self.counts.shapes
        )?;
        for (kind, count) in &self.shapes_by_kind {
            writeln!(f, "  {}: {}", kind, count)?;
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
                writeln!(f, "  - {}", issue.message)?;
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
                writeln!(f, "  - {}", issue.message)?;
            }
        }

        Ok(())
    }
}

/// Counts of converted elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionCounts {
    pub records: usize,
    pub shapes: usize,
}

/// A single issue discovered during conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    /// Name of the record the issue is about.
    pub record: String,
    pub message: String,
}

impl ConversionIssue {
    /// Create a warning-level issue (a record was dropped).
    pub fn warning(
        code: ConversionIssueCode,
        record: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            record: record.into(),
            message: message.into(),
        }
    }

    /// Create an info-level issue (a note, nothing lost).
    pub fn info(
        code: ConversionIssueCode,
        record: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            record: record.into(),
            message: message.into(),
        }
    }
}

/// Severity level for conversion issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    Warning,
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON report and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// The record's kind tag has no shape builder.
    UnsupportedKind,
    /// The record has no string `type` field.
    MissingKind,
    /// A point record expanded into several Point shapes.
    PointExpansion,
}
