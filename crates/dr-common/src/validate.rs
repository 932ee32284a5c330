//! Semantic validation of report documents.
//!
//! Validation is advisory: it never mutates the document, and export does not
//! require a clean result. Issues are collected rather than returned on the
//! first failure so a caller can show everything at once.

use crate::error::Error;
use crate::model::{ChartSpec, ReportDocument, TableSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Stable identifiers for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    EmptyTitle,
    DuplicateSectionId,
    DuplicateElementId,
    DuplicateColumnKey,
    ZeroPageSize,
    MismatchedSeriesLength,
    NoDerivableSeries,
}

impl IssueCode {
    /// Severity attached to this code.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCode::EmptyTitle
            | IssueCode::DuplicateSectionId
            | IssueCode::DuplicateElementId
            | IssueCode::DuplicateColumnKey => Severity::Error,
            IssueCode::ZeroPageSize
            | IssueCode::MismatchedSeriesLength
            | IssueCode::NoDerivableSeries => Severity::Warning,
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub severity: Severity,
    /// Dotted path to the offending element, e.g. `sections[0].charts[1]`.
    pub path: String,
    pub message: String,
}

/// All findings for a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn push(&mut self, code: IssueCode, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            code,
            severity: code.severity(),
            path: path.into(),
            message: message.into(),
        });
    }

    /// True when there are no error-severity issues.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    /// Whether any issue carries the given code.
    pub fn has(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Convert into an error when validation failed.
    pub fn into_result(self) -> crate::Result<Self> {
        match self.error_count() {
            0 => Ok(self),
            count => Err(Error::Validation { count }),
        }
    }
}

/// Validate a report document.
pub fn validate(doc: &ReportDocument) -> ValidationResult {
    let mut result = ValidationResult::default();

    if doc.title.trim().is_empty() {
        result.push(IssueCode::EmptyTitle, "title", "report title is empty");
    }

    let mut section_ids = HashSet::new();
    // Chart and table ids share the export's element-id namespace.
    let mut element_ids = HashSet::new();

    for (si, section) in doc.sections.iter().enumerate() {
        let section_path = format!("sections[{}]", si);
        if !section_ids.insert(section.id.as_str()) {
            result.push(
                IssueCode::DuplicateSectionId,
                &section_path,
                format!("section id '{}' is used more than once", section.id),
            );
        }

        for (ci, chart) in section.charts().iter().enumerate() {
            let path = format!("{}.charts[{}]", section_path, ci);
            if !element_ids.insert(chart.id.clone()) {
                result.push(
                    IssueCode::DuplicateElementId,
                    &path,
                    format!("chart id '{}' is used more than once", chart.id),
                );
            }
            if chart.show_data_table && !element_ids.insert(format!("{}-table", chart.id)) {
                result.push(
                    IssueCode::DuplicateElementId,
                    &path,
                    format!("derived table id '{}-table' collides", chart.id),
                );
            }
            validate_chart(chart, &path, &mut result);
        }

        for (ti, table) in section.tables().iter().enumerate() {
            let path = format!("{}.tables[{}]", section_path, ti);
            if !element_ids.insert(table.id.clone()) {
                result.push(
                    IssueCode::DuplicateElementId,
                    &path,
                    format!("table id '{}' is used more than once", table.id),
                );
            }
            validate_table(table, &path, &mut result);
        }
    }

    result
}

fn validate_chart(chart: &ChartSpec, path: &str, result: &mut ValidationResult) {
    let mut derivable = false;
    for (i, series) in chart.data.iter().enumerate() {
        if let Some(xy) = series.as_xy() {
            if xy.is_parallel() {
                derivable = true;
            } else {
                result.push(
                    IssueCode::MismatchedSeriesLength,
                    format!("{}.data[{}]", path, i),
                    format!("x has {} values but y has {}", xy.x.len(), xy.y.len()),
                );
            }
        }
    }
    if chart.show_data_table && !derivable {
        result.push(
            IssueCode::NoDerivableSeries,
            path,
            "showDataTable is set but no series has parallel x/y arrays",
        );
    }
}

fn validate_table(table: &TableSpec, path: &str, result: &mut ValidationResult) {
    let mut keys = HashSet::new();
    for (i, column) in table.columns.iter().enumerate() {
        if !keys.insert(column.key.as_str()) {
            result.push(
                IssueCode::DuplicateColumnKey,
                format!("{}.columns[{}]", path, i),
                format!("column key '{}' is used more than once", column.key),
            );
        }
    }
    if table.page_size == Some(0) {
        result.push(
            IssueCode::ZeroPageSize,
            path,
            "pageSize 0 falls back to the default page size",
        );
    }
}
