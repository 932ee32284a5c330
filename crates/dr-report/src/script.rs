//! Inline script synthesis for exported reports.

use crate::error::Result;
use dr_chart::DEFAULT_SERIES_NAME;
use dr_common::ChartSpec;
use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize a value for embedding inside a `<script>` element.
///
/// `<` only occurs inside JSON strings, so writing it as `\u003c` keeps the
/// text valid JSON and valid JavaScript while making `</script>` and `<!--`
/// impossible.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

/// Browser-side counterpart of `dr_chart::derive_data_table`.
///
/// Builds the table with DOM calls so no markup strings live in the script.
const RENDER_DATA_TABLE: &str = r#"
function renderDataTable(targetId, data, formatCells) {
    var target = document.getElementById(targetId);
    if (!target) return;
    var rows = [];
    var qualified = false;
    (data || []).forEach(function (series) {
        if (!series || !Array.isArray(series.x) || !Array.isArray(series.y)) return;
        if (series.x.length !== series.y.length) return;
        qualified = true;
        var name = series.name || DEFAULT_SERIES_NAME;
        for (var i = 0; i < series.x.length; i++) {
            rows.push([name, series.x[i], series.y[i]]);
        }
    });
    if (!qualified) {
        var empty = document.createElement('p');
        empty.className = 'empty-table';
        empty.textContent = 'No data available';
        target.appendChild(empty);
        return;
    }
    var table = document.createElement('table');
    table.className = 'chart-data-table';
    var head = table.createTHead().insertRow();
    head.className = 'table-header';
    ['Series', 'X', 'Y'].forEach(function (label) {
        var th = document.createElement('th');
        th.textContent = label;
        head.appendChild(th);
    });
    var body = table.createTBody();
    rows.forEach(function (row) {
        var tr = body.insertRow();
        row.forEach(function (value, col) {
            tr.insertCell().textContent = cellText(value, formatCells && col === 2);
        });
    });
    target.appendChild(table);
}

function cellText(value, asNumber) {
    if (value === null || value === undefined) return '';
    if (asNumber && typeof value === 'number') {
        return value.toLocaleString('en-US', { maximumFractionDigits: 3 });
    }
    return String(value);
}
"#;

/// Build the single inline script for a set of charts in document order.
pub fn inline_script<'a, I>(charts: I, format_cells: bool) -> Result<String>
where
    I: IntoIterator<Item = &'a ChartSpec>,
{
    let mut calls = String::new();
    let mut needs_table_routine = false;

    for chart in charts {
        let id = script_json(&chart.id)?;
        let data = script_json(&chart.series_values())?;
        let layout = match chart.layout() {
            Some(layout) => script_json(layout)?,
            None => script_json(&Value::Object(Map::new()))?,
        };
        calls.push_str(&format!(
            "if (typeof Plotly !== 'undefined') {{ Plotly.newPlot({id}, {data}, {layout}); }}\n"
        ));
        if chart.show_data_table {
            needs_table_routine = true;
            let table_id = script_json(&format!("{}-table", chart.id))?;
            calls.push_str(&format!(
                "renderDataTable({table_id}, {data}, {format_cells});\n"
            ));
        }
    }

    let mut script = String::new();
    if needs_table_routine {
        script.push_str(&format!(
            "var DEFAULT_SERIES_NAME = {};\n",
            script_json(DEFAULT_SERIES_NAME)?
        ));
        script.push_str(RENDER_DATA_TABLE);
    }
    script.push_str(&calls);
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dr_common::{ChartKind, Series};
    use serde_json::json;

    #[test]
    fn test_script_json_neutralizes_closing_tags() {
        let out = script_json(&json!({"name": "</script><script>alert(1)</script>"})).unwrap();
        assert!(!out.contains("</"));
        let back: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(back["name"], json!("</script><script>alert(1)</script>"));
    }

    #[test]
    fn test_one_plot_call_per_chart_in_order() {
        let a = ChartSpec::new("alpha", "A", ChartKind::Line)
            .with_series(Series::xy("S", vec![json!(1)], vec![json!(2)]))
            .with_layout(json!({"title": "Alpha"}));
        let b = ChartSpec::new("beta", "B", ChartKind::Bar);
        let script = inline_script([&a, &b], true).unwrap();

        let alpha = script.find(r#"Plotly.newPlot("alpha""#).unwrap();
        let beta = script.find(r#"Plotly.newPlot("beta", [], {})"#).unwrap();
        assert!(alpha < beta);
        assert!(script.contains(r#"{"title":"Alpha"}"#));
        assert!(!script.contains("renderDataTable"));
    }

    #[test]
    fn test_data_table_routine_only_when_requested() {
        let chart = ChartSpec::new("trend", "Trend", ChartKind::Line)
            .with_series(Series::xy("S", vec![json!(1)], vec![json!(2)]))
            .with_data_table(true);
        let script = inline_script([&chart], false).unwrap();
        assert!(script.contains("function renderDataTable"));
        assert!(script.contains(r#"renderDataTable("trend-table", "#));
        assert!(script.contains(", false);"));
        assert!(!script.contains("<tr"));
    }
}
