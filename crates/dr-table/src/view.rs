//! Sort and pagination state over a fixed row set.

use crate::compare::compare_values;
use dr_common::format::format_cell;
use dr_common::{Row, TableColumn, TableSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Snapshot of a view's state, for display or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub table_id: String,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub row_count: usize,
    pub paginated: bool,
}

/// Live view of a table: working row copy plus sort and page state.
#[derive(Debug, Clone)]
pub struct TableView {
    table_id: String,
    columns: Vec<TableColumn>,
    rows: Vec<Row>,
    paginated: bool,
    page_size: usize,
    sort_column: Option<String>,
    sort_direction: SortDirection,
    current_page: usize,
}

impl TableView {
    /// Create a view seeded from the table's rows in insertion order.
    pub fn new(spec: &TableSpec) -> Self {
        Self {
            table_id: spec.id.clone(),
            columns: spec.columns.clone(),
            rows: spec.data.clone(),
            paginated: spec.show_pagination,
            page_size: spec.effective_page_size(),
            sort_column: None,
            sort_direction: SortDirection::Asc,
            current_page: 1,
        }
    }

    /// Sort by a column.
    ///
    /// Ignored unless the column exists and is sortable. Sorting the current
    /// sort column again flips the direction; a new column starts ascending.
    /// Always returns to page 1.
    pub fn sort(&mut self, column_key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key == column_key && c.sortable);
        if !sortable {
            debug!(table = %self.table_id, column = column_key, "sort ignored: column not sortable");
            return;
        }

        if self.sort_column.as_deref() == Some(column_key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = Some(column_key.to_string());
            self.sort_direction = SortDirection::Asc;
        }

        let direction = self.sort_direction;
        // `sort_by` is stable; reversing the comparison keeps ties in place.
        self.rows.sort_by(|a, b| {
            let ord = compare_values(a.get(column_key), b.get(column_key));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        self.current_page = 1;

        debug!(
            table = %self.table_id,
            column = column_key,
            direction = %direction,
            "table sorted"
        );
    }

    /// Rows visible on the current page (all rows when pagination is off).
    pub fn current_page_rows(&self) -> &[Row] {
        if !self.paginated {
            return &self.rows;
        }
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.rows.len());
        let end = start.saturating_add(self.page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Current page rendered to display text, one `Vec` per row in column order.
    pub fn formatted_page(&self) -> Vec<Vec<String>> {
        self.current_page_rows()
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| format_cell(row.get(&col.key), col.column_type))
                    .collect()
            })
            .collect()
    }

    /// Number of pages, never less than 1.
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// Move back one page; no-op on page 1.
    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Move forward one page; no-op on the last page.
    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    /// Id of the table this view renders.
    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Column definitions in display order.
    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// All working rows in current sort order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn sort_column(&self) -> Option<&str> {
        self.sort_column.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// 1-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TableState {
        TableState {
            table_id: self.table_id.clone(),
            sort_column: self.sort_column.clone(),
            sort_direction: self.sort_direction,
            current_page: self.current_page,
            total_pages: self.total_pages(),
            page_size: self.page_size,
            row_count: self.rows.len(),
            paginated: self.paginated,
        }
    }
}
