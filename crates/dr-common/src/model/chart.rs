//! Chart specifications.

use super::series::Series;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder height in pixels when a chart does not specify one.
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

/// Declared chart type.
///
/// Informational only: the plotting engine renders each series according to
/// the series' own `type` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
    Scatter,
    Area,
    Choropleth,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Area => "area",
            ChartKind::Choropleth => "choropleth",
        };
        f.write_str(name)
    }
}

/// Opaque layout/config passthrough for the plotting engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChartOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
}

/// A chart within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    /// Unique within the document; also the placeholder element id on export.
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    /// Ordered data traces.
    #[serde(default)]
    #[schemars(with = "Vec<Map<String, Value>>")]
    pub data: Vec<Series>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ChartOptions>,
    /// Also produce a derived data table for this chart.
    #[serde(default)]
    pub show_data_table: bool,
    #[serde(default)]
    pub download_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl ChartSpec {
    /// Create an empty chart.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            data: Vec::new(),
            options: None,
            show_data_table: false,
            download_enabled: false,
            height: None,
            width: None,
        }
    }

    /// Append a series.
    pub fn with_series(mut self, series: Series) -> Self {
        self.data.push(series);
        self
    }

    /// Set the layout passthrough.
    pub fn with_layout(mut self, layout: Value) -> Self {
        self.options.get_or_insert_with(ChartOptions::default).layout = Some(layout);
        self
    }

    /// Enable or disable the derived data table.
    pub fn with_data_table(mut self, enabled: bool) -> Self {
        self.show_data_table = enabled;
        self
    }

    /// Set the placeholder height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Enable image download for this chart.
    pub fn with_download(mut self, enabled: bool) -> Self {
        self.download_enabled = enabled;
        self
    }

    /// Height in pixels, defaulting to [`DEFAULT_CHART_HEIGHT`].
    pub fn effective_height(&self) -> u32 {
        self.height.unwrap_or(DEFAULT_CHART_HEIGHT)
    }

    /// The configured layout, if any.
    pub fn layout(&self) -> Option<&Value> {
        self.options.as_ref().and_then(|o| o.layout.as_ref())
    }

    /// The configured engine config, if any.
    pub fn engine_config(&self) -> Option<&Value> {
        self.options.as_ref().and_then(|o| o.config.as_ref())
    }

    /// Series data as the plotting engine's trace list.
    pub fn series_values(&self) -> Vec<Value> {
        self.data.iter().map(Series::to_value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_defaults_from_json() {
        let chart: ChartSpec = serde_json::from_value(json!({
            "id": "enrollment-by-level",
            "title": "Enrollment by Education Level",
            "type": "pie",
            "data": [{"labels": ["Primary"], "values": [45], "type": "pie"}]
        }))
        .unwrap();
        assert_eq!(chart.kind, ChartKind::Pie);
        assert!(!chart.show_data_table);
        assert_eq!(chart.effective_height(), DEFAULT_CHART_HEIGHT);
        assert!(chart.layout().is_none());
    }

    #[test]
    fn test_chart_camel_case_fields() {
        let chart = ChartSpec::new("c1", "Chart", ChartKind::Line)
            .with_data_table(true)
            .with_height(450)
            .with_layout(json!({"title": "T"}));
        let value = serde_json::to_value(&chart).unwrap();
        assert_eq!(value["showDataTable"], json!(true));
        assert_eq!(value["height"], json!(450));
        assert_eq!(value["options"]["layout"]["title"], json!("T"));
        assert_eq!(value["type"], json!("line"));
    }
}
