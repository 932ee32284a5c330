//! Scoped ownership of mounted plots.
//!
//! A [`ChartRenderScope`] acquires a render handle from the engine the first
//! time the chart is rendered and releases it when the scope is detached or
//! dropped. Releasing is idempotent: a scope that never rendered releases
//! nothing.

use crate::adapter::{image_options, to_plot_payload, ImageOptions, PlotPayload};
use crate::error::Result;
use dr_common::ChartSpec;
use tracing::debug;

/// An external plotting engine.
///
/// Rendering may be scheduled asynchronously by the engine; callers treat
/// `new_plot` as fire-and-forget and only keep the handle for later release.
pub trait PlotEngine {
    /// Handle to a mounted plot.
    type Handle;

    /// Mount a plot into the target element.
    fn new_plot(&mut self, target_id: &str, payload: &PlotPayload) -> Result<Self::Handle>;

    /// Release a mounted plot.
    fn purge(&mut self, handle: Self::Handle);

    /// Export a mounted plot as an image.
    fn download_image(&mut self, handle: &Self::Handle, options: &ImageOptions) -> Result<()>;
}

/// One chart bound to an engine, with the plot's lifetime tied to the scope.
pub struct ChartRenderScope<E: PlotEngine> {
    engine: E,
    chart: ChartSpec,
    handle: Option<E::Handle>,
}

impl<E: PlotEngine> ChartRenderScope<E> {
    /// Bind a chart to an engine without rendering.
    pub fn new(engine: E, chart: ChartSpec) -> Self {
        Self {
            engine,
            chart,
            handle: None,
        }
    }

    /// Render the chart, replacing any plot this scope already mounted.
    pub fn render(&mut self) -> Result<()> {
        self.release();
        let payload = to_plot_payload(&self.chart);
        let handle = self.engine.new_plot(&self.chart.id, &payload)?;
        debug!(chart = %self.chart.id, series = payload.data.len(), "plot mounted");
        self.handle = Some(handle);
        Ok(())
    }

    /// Swap the chart configuration, re-rendering if a plot is mounted.
    pub fn set_chart(&mut self, chart: ChartSpec) -> Result<()> {
        self.chart = chart;
        if self.handle.is_some() {
            self.render()?;
        }
        Ok(())
    }

    /// Download the mounted plot as an image.
    ///
    /// Returns `Ok(false)` without calling the engine when nothing is mounted.
    pub fn download_image(&mut self) -> Result<bool> {
        let Some(handle) = self.handle.as_ref() else {
            return Ok(false);
        };
        let options = image_options(&self.chart);
        self.engine.download_image(handle, &options)?;
        Ok(true)
    }

    /// Release the mounted plot, if any.
    pub fn detach(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.purge(handle);
            debug!(chart = %self.chart.id, "plot purged");
        }
    }

    /// Whether a plot is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: PlotEngine> Drop for ChartRenderScope<E> {
    fn drop(&mut self) {
        self.release();
    }
}
