//! dynreport command-line driver.
//!
//! Loads report documents from JSON or built-in templates, validates them,
//! inspects tables through the live table view, and exports standalone HTML.

pub mod config;
pub mod document;
pub mod exit_codes;
pub mod logging;
pub mod templates;
