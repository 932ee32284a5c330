//! Table specifications.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rows per page when a table does not specify a usable page size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A table row: column key to raw cell value.
pub type Row = Map<String, Value>;

/// How a column's values are formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    Percentage,
}

/// A table column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub key: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub sortable: bool,
    /// CSS width hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

impl TableColumn {
    /// Create a non-sortable text column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type: ColumnType::Text,
            sortable: false,
            width: None,
        }
    }

    /// Set the column type.
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Mark the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// A table within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    pub id: String,
    pub title: String,
    /// Rows in insertion order.
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub show_pagination: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl TableSpec {
    /// Create an empty table.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            data: Vec::new(),
            columns: Vec::new(),
            show_pagination: false,
            page_size: None,
        }
    }

    /// Append a column.
    pub fn with_column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Append a row.
    pub fn with_row(mut self, row: Row) -> Self {
        self.data.push(row);
        self
    }

    /// Enable pagination with the given page size.
    pub fn with_pagination(mut self, page_size: usize) -> Self {
        self.show_pagination = true;
        self.page_size = Some(page_size);
        self
    }

    /// Page size, falling back to [`DEFAULT_PAGE_SIZE`] when unset or zero.
    pub fn effective_page_size(&self) -> usize {
        match self.page_size {
            Some(0) | None => DEFAULT_PAGE_SIZE,
            Some(n) => n,
        }
    }

    /// Look up a column by key.
    pub fn column(&self, key: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|c| c.key == key)
    }
}
