//! Error types for plot rendering.

use thiserror::Error;

/// Result type for plotting operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors surfaced by a plotting engine.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The engine failed to mount a plot.
    #[error("failed to render chart '{chart_id}': {reason}")]
    RenderFailed { chart_id: String, reason: String },

    /// The engine failed to export an image.
    #[error("failed to download image for chart '{chart_id}': {reason}")]
    DownloadFailed { chart_id: String, reason: String },
}
