//! Static HTML export for dynreport.
//!
//! Turns a [`dr_common::ReportDocument`] into one self-contained HTML file:
//! markup for the header, sections and tables, an inline stylesheet, and a
//! single inline script that mounts every chart through the plotting engine
//! and rebuilds chart-derived data tables in the browser.
//!
//! # Modes
//!
//! - **CDN mode** (default): the plotting engine is referenced from a pinned
//!   CDN URL, optionally with an SRI hash.
//! - **Embed mode**: the engine source is fetched through an [`AssetSource`]
//!   and inlined, so the file works fully offline.

pub mod assets;
pub mod config;
pub mod error;
pub mod exporter;
pub mod script;
pub mod styles;

pub use assets::{AssetSource, UnavailableAssetSource};
#[cfg(feature = "embed")]
pub use assets::HttpAssetSource;
pub use config::{CdnConfig, CdnLibrary, ExportConfig, ExportLimits};
pub use error::{ExportError, Result};
pub use exporter::{html_escape, ReportExporter};
