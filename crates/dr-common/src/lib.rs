//! dynreport common types, formatting, and validation.
//!
//! This crate provides the report data model shared by every other crate:
//! - Report document, section, chart, series, and table types
//! - Cell value formatting per column type
//! - Non-fatal document validation
//! - Common error types

pub mod error;
pub mod format;
pub mod model;
pub mod validate;

pub use error::{Error, ErrorCategory, Result};
pub use format::format_cell;
pub use model::{
    export_filename, ChartKind, ChartOptions, ChartSpec, ColumnType, GeoSeries, LabeledSeries,
    ReportDocument, Row, Section, Series, SeriesKind, TableColumn, TableSpec, Theme, XySeries,
    DEFAULT_CHART_HEIGHT, DEFAULT_PAGE_SIZE,
};
pub use validate::{validate, IssueCode, Severity, ValidationIssue, ValidationResult};

/// Schema version embedded in generated artifacts.
pub const SCHEMA_VERSION: &str = "1.0.0";
