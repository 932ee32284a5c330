//! Locating documents and tables for CLI commands.

use crate::exit_codes::ExitCode;
use crate::templates;
use dr_common::{ReportDocument, TableSpec};
use std::path::Path;
use thiserror::Error;

/// Errors resolving a command's input.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unknown template '{0}' (see `dynreport templates`)")]
    UnknownTemplate(String),

    #[error("no table or chart-derived table with id '{0}'")]
    UnknownTable(String),

    #[error(transparent)]
    Document(#[from] dr_common::Error),
}

impl From<&SourceError> for ExitCode {
    fn from(err: &SourceError) -> Self {
        match err {
            SourceError::UnknownTemplate(_) | SourceError::UnknownTable(_) => ExitCode::ArgsError,
            SourceError::Document(inner) => ExitCode::from(inner),
        }
    }
}

/// Load a document from a JSON file or a built-in template.
pub fn load_document(input: Option<&Path>, template: Option<&str>) -> Result<ReportDocument, SourceError> {
    match (input, template) {
        (Some(path), _) => Ok(ReportDocument::load(path)?),
        (None, Some(id)) => {
            templates::template(id).ok_or_else(|| SourceError::UnknownTemplate(id.to_string()))
        }
        (None, None) => Err(SourceError::Document(dr_common::Error::InvalidDocument(
            "no input document given".to_string(),
        ))),
    }
}

/// Find a table by id, falling back to tables derived from charts
/// (`{chart_id}-table`).
pub fn find_table(document: &ReportDocument, table_id: &str) -> Result<TableSpec, SourceError> {
    if let Some(table) = document.tables().find(|t| t.id == table_id) {
        return Ok(table.clone());
    }
    document
        .charts()
        .filter(|c| c.show_data_table)
        .filter_map(dr_chart::derive_data_table)
        .find(|t| t.id == table_id)
        .ok_or_else(|| SourceError::UnknownTable(table_id.to_string()))
}
