//! Table view engine for dynreport.
//!
//! A [`TableView`] owns the live sort and pagination state of one table.
//! It works on a copy of the table's rows, so the document's own row order
//! is never changed by sorting.

pub mod compare;
pub mod view;

pub use compare::compare_values;
pub use view::{SortDirection, TableState, TableView};
