//! Chart series with explicit capability tagging.
//!
//! A series is classified once, when it is read, by the arrays it carries.
//! Every key that is not part of the classification is kept verbatim in
//! `hints` and written back out unchanged.

use crate::format::display_text;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Series capability tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Xy,
    Labeled,
    Geo,
    Other,
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Xy => write!(f, "xy"),
            SeriesKind::Labeled => write!(f, "labeled"),
            SeriesKind::Geo => write!(f, "geo"),
            SeriesKind::Other => write!(f, "other"),
        }
    }
}

/// Series with parallel `x` / `y` arrays (line, bar, scatter, area).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XySeries {
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    /// Remaining rendering hints (`name`, `type`, `mode`, `line`, ...).
    pub hints: Map<String, Value>,
}

impl XySeries {
    /// Whether `x` and `y` have the same length.
    pub fn is_parallel(&self) -> bool {
        self.x.len() == self.y.len()
    }
}

/// Series with `labels` / `values` arrays (pie, donut).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabeledSeries {
    pub labels: Vec<Value>,
    pub values: Vec<Value>,
    pub hints: Map<String, Value>,
}

/// Series keyed by geographic `locations` with optional `z` values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoSeries {
    pub locations: Vec<Value>,
    pub z: Option<Vec<Value>>,
    pub hints: Map<String, Value>,
}

/// One data trace within a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub enum Series {
    Xy(XySeries),
    Labeled(LabeledSeries),
    Geo(GeoSeries),
    Other(Map<String, Value>),
}

impl Series {
    /// Create an XY series with a display name.
    pub fn xy(name: impl Into<String>, x: Vec<Value>, y: Vec<Value>) -> Self {
        let mut hints = Map::new();
        hints.insert("name".to_string(), Value::String(name.into()));
        Series::Xy(XySeries { x, y, hints })
    }

    /// Create a labeled (categorical) series.
    pub fn labeled(labels: Vec<Value>, values: Vec<Value>) -> Self {
        Series::Labeled(LabeledSeries {
            labels,
            values,
            hints: Map::new(),
        })
    }

    /// Add or replace a rendering hint.
    pub fn with_hint(mut self, key: impl Into<String>, value: Value) -> Self {
        self.hints_mut().insert(key.into(), value);
        self
    }

    /// Capability tag of this series.
    pub fn kind(&self) -> SeriesKind {
        match self {
            Series::Xy(_) => SeriesKind::Xy,
            Series::Labeled(_) => SeriesKind::Labeled,
            Series::Geo(_) => SeriesKind::Geo,
            Series::Other(_) => SeriesKind::Other,
        }
    }

    /// The series display name.
    ///
    /// Follows JavaScript truthiness: a missing, `null`, `false`, `0` or empty
    /// `name` gives `None`; any other value is stringified (`2019` gives
    /// `"2019"`).
    pub fn name(&self) -> Option<String> {
        match self.hints().get("name")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(display_text(other)),
        }
    }

    /// Rendering hints not used for classification.
    pub fn hints(&self) -> &Map<String, Value> {
        match self {
            Series::Xy(s) => &s.hints,
            Series::Labeled(s) => &s.hints,
            Series::Geo(s) => &s.hints,
            Series::Other(map) => map,
        }
    }

    fn hints_mut(&mut self) -> &mut Map<String, Value> {
        match self {
            Series::Xy(s) => &mut s.hints,
            Series::Labeled(s) => &mut s.hints,
            Series::Geo(s) => &mut s.hints,
            Series::Other(map) => map,
        }
    }

    /// The XY payload, if this is an XY series.
    pub fn as_xy(&self) -> Option<&XySeries> {
        match self {
            Series::Xy(s) => Some(s),
            _ => None,
        }
    }

    /// The `y` array of any series that carries one, XY or not.
    pub fn y_values_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Series::Xy(s) => Some(&mut s.y),
            other => other.hints_mut().get_mut("y").and_then(Value::as_array_mut),
        }
    }

    /// Serialize back to the plotting engine's trace object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.clone().into())
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match map.remove(key) {
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

fn is_array(map: &Map<String, Value>, key: &str) -> bool {
    matches!(map.get(key), Some(Value::Array(_)))
}

impl From<Map<String, Value>> for Series {
    fn from(mut map: Map<String, Value>) -> Self {
        if is_array(&map, "x") && is_array(&map, "y") {
            let x = take_array(&mut map, "x").unwrap_or_default();
            let y = take_array(&mut map, "y").unwrap_or_default();
            return Series::Xy(XySeries { x, y, hints: map });
        }
        if is_array(&map, "labels") && is_array(&map, "values") {
            let labels = take_array(&mut map, "labels").unwrap_or_default();
            let values = take_array(&mut map, "values").unwrap_or_default();
            return Series::Labeled(LabeledSeries {
                labels,
                values,
                hints: map,
            });
        }
        if is_array(&map, "locations") {
            let locations = take_array(&mut map, "locations").unwrap_or_default();
            let z = take_array(&mut map, "z");
            return Series::Geo(GeoSeries {
                locations,
                z,
                hints: map,
            });
        }
        Series::Other(map)
    }
}

impl From<Series> for Map<String, Value> {
    fn from(series: Series) -> Self {
        let mut out = Map::new();
        match series {
            Series::Xy(s) => {
                out.insert("x".to_string(), Value::Array(s.x));
                out.insert("y".to_string(), Value::Array(s.y));
                out.extend(s.hints);
            }
            Series::Labeled(s) => {
                out.insert("labels".to_string(), Value::Array(s.labels));
                out.insert("values".to_string(), Value::Array(s.values));
                out.extend(s.hints);
            }
            Series::Geo(s) => {
                out.insert("locations".to_string(), Value::Array(s.locations));
                if let Some(z) = s.z {
                    out.insert("z".to_string(), Value::Array(z));
                }
                out.extend(s.hints);
            }
            Series::Other(map) => out = map,
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Series {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_classifies_xy() {
        let series = parse(json!({
            "x": [2015, 2016],
            "y": [47.0, 46.2],
            "name": "Meghalaya",
            "type": "scatter",
            "line": {"color": "#e74c3c", "width": 3}
        }));
        assert_eq!(series.kind(), SeriesKind::Xy);
        assert_eq!(series.name().as_deref(), Some("Meghalaya"));
        let xy = series.as_xy().unwrap();
        assert_eq!(xy.x.len(), 2);
        assert!(xy.is_parallel());
        assert_eq!(series.hints()["line"]["width"], json!(3));
    }

    #[test]
    fn test_classifies_labeled_geo_other() {
        let pie = parse(json!({"labels": ["a", "b"], "values": [1, 2], "type": "pie"}));
        assert_eq!(pie.kind(), SeriesKind::Labeled);

        let geo = parse(json!({"locations": ["IN-ML"], "z": [47.0], "type": "choropleth"}));
        assert_eq!(geo.kind(), SeriesKind::Geo);

        // x without y is not an XY series
        let other = parse(json!({"x": [1, 2, 3], "type": "histogram"}));
        assert_eq!(other.kind(), SeriesKind::Other);
        assert_eq!(other.as_xy(), None);
    }

    #[test]
    fn test_non_array_x_is_not_xy() {
        let series = parse(json!({"x": "col_a", "y": [1, 2]}));
        assert_eq!(series.kind(), SeriesKind::Other);
        assert_eq!(series.to_value()["x"], json!("col_a"));
    }

    #[test]
    fn test_unknown_keys_survive_serialization() {
        let input = json!({
            "x": ["Q1", "Q2"],
            "y": [8.2, 9.1],
            "mode": "lines+markers",
            "marker": {"size": 8},
            "customdata": [[1], [2]]
        });
        let series = parse(input.clone());
        assert_eq!(series.to_value(), input);
    }

    #[test]
    fn test_name_follows_truthiness() {
        let named = |name: Value| parse(json!({"x": [1], "y": [2], "name": name})).name();
        assert_eq!(named(json!(2019)).as_deref(), Some("2019"));
        assert_eq!(named(json!(true)).as_deref(), Some("true"));
        assert_eq!(named(json!(0)), None);
        assert_eq!(named(json!("")), None);
        assert_eq!(named(Value::Null), None);
        assert_eq!(parse(json!({"x": [1], "y": [2]})).name(), None);
    }

    #[test]
    fn test_y_values_mut_covers_non_xy_series() {
        let mut xy = parse(json!({"x": [1], "y": [2]}));
        assert_eq!(xy.y_values_mut().map(|y| y.len()), Some(1));

        let mut y_only = parse(json!({"y": [5, 6, 7], "type": "box"}));
        assert_eq!(y_only.kind(), SeriesKind::Other);
        y_only.y_values_mut().unwrap()[0] = json!(1);
        assert_eq!(y_only.to_value()["y"], json!([1, 6, 7]));

        let mut pie = parse(json!({"labels": ["a"], "values": [1]}));
        assert!(pie.y_values_mut().is_none());
    }

    #[test]
    fn test_builder_helpers() {
        let series = Series::xy("Assam", vec![json!(1)], vec![json!(2)])
            .with_hint("type", json!("bar"));
        assert_eq!(series.name().as_deref(), Some("Assam"));
        assert_eq!(series.to_value()["type"], json!("bar"));
        assert_eq!(SeriesKind::Labeled.to_string(), "labeled");
    }
}
