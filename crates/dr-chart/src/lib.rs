//! Chart adapter for dynreport.
//!
//! Maps chart specifications to the payload consumed by an external
//! plotting engine, derives a flat (series, x, y) table from chart data,
//! and scopes the lifetime of mounted plots.
//!
//! The plotting engine itself is an external collaborator, reached only
//! through the [`PlotEngine`] trait.

pub mod adapter;
pub mod error;
pub mod render;

pub use adapter::{
    derive_data_table, image_options, to_plot_payload, ImageFormat, ImageOptions, PlotPayload,
    DEFAULT_SERIES_NAME, FONT_FAMILY, REMOVED_MODEBAR_BUTTONS,
};
pub use error::{PlotError, Result};
pub use render::{ChartRenderScope, PlotEngine};
