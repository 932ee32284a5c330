//! Chart → plotting-engine payload and chart → derived table.

use dr_common::{ChartSpec, ColumnType, Row, TableColumn, TableSpec};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Base font family forced onto every plot layout.
pub const FONT_FAMILY: &str = "Inter, sans-serif";

/// Mode-bar tools removed from every plot.
pub const REMOVED_MODEBAR_BUTTONS: [&str; 3] = ["pan2d", "lasso2d", "select2d"];

/// Series label used in derived tables when a series has no name.
pub const DEFAULT_SERIES_NAME: &str = "Series";

/// Page size of derived data tables.
const DERIVED_PAGE_SIZE: usize = 10;

/// Everything the plotting engine needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPayload {
    /// Series traces, verbatim.
    pub data: Vec<Value>,
    pub layout: Value,
    pub config: Value,
}

/// Image export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Svg,
    Webp,
}

/// Options for the engine's image download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub filename: String,
}

/// Image download options for a chart: 800x600 PNG named after the chart id.
pub fn image_options(chart: &ChartSpec) -> ImageOptions {
    ImageOptions {
        format: ImageFormat::Png,
        width: 800,
        height: 600,
        filename: chart.id.clone(),
    }
}

fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    match value {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

/// Build the plotting engine payload for a chart.
///
/// Series data is passed through untouched. The chart's layout and config
/// are copied and then overlaid with fixed presentation defaults, which
/// take precedence over anything the chart sets.
pub fn to_plot_payload(chart: &ChartSpec) -> PlotPayload {
    let mut layout = object_or_empty(chart.layout());
    layout.insert("responsive".to_string(), Value::Bool(true));
    layout.insert("autosize".to_string(), Value::Bool(true));
    let mut font = object_or_empty(layout.get("font"));
    font.insert("family".to_string(), Value::String(FONT_FAMILY.to_string()));
    layout.insert("font".to_string(), Value::Object(font));

    let mut config = object_or_empty(chart.engine_config());
    config.insert("displayModeBar".to_string(), Value::Bool(true));
    config.insert(
        "modeBarButtonsToRemove".to_string(),
        json!(REMOVED_MODEBAR_BUTTONS),
    );
    config.insert("displaylogo".to_string(), Value::Bool(false));
    config.insert("responsive".to_string(), Value::Bool(true));

    PlotPayload {
        data: chart.series_values(),
        layout: Value::Object(layout),
        config: Value::Object(config),
    }
}

/// Derive a flat (series, x, y) table from a chart's XY series.
///
/// Only XY series whose `x` and `y` have equal length contribute rows.
/// Returns `None` when no series qualifies.
pub fn derive_data_table(chart: &ChartSpec) -> Option<TableSpec> {
    let mut rows: Vec<Row> = Vec::new();
    let mut contributed = false;

    for series in &chart.data {
        let Some(xy) = series.as_xy() else {
            continue;
        };
        if !xy.is_parallel() {
            warn!(
                chart = %chart.id,
                x_len = xy.x.len(),
                y_len = xy.y.len(),
                "skipping series with mismatched x/y lengths"
            );
            continue;
        }
        contributed = true;
        let name = series
            .name()
            .unwrap_or_else(|| DEFAULT_SERIES_NAME.to_string());
        for (x, y) in xy.x.iter().zip(&xy.y) {
            let mut row = Row::new();
            row.insert("series".to_string(), Value::String(name.clone()));
            row.insert("x".to_string(), x.clone());
            row.insert("y".to_string(), y.clone());
            rows.push(row);
        }
    }

    if !contributed {
        debug!(chart = %chart.id, "no XY series to derive a data table from");
        return None;
    }

    Some(TableSpec {
        id: format!("{}-table", chart.id),
        title: format!("{} - Data", chart.title),
        data: rows,
        columns: vec![
            TableColumn::new("series", "Series"),
            TableColumn::new("x", "X"),
            TableColumn::new("y", "Y").with_type(ColumnType::Number),
        ],
        show_pagination: true,
        page_size: Some(DERIVED_PAGE_SIZE),
    })
}
