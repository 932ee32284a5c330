//! Built-in demo reports and random data generation.

use dr_common::{
    ChartKind, ChartSpec, ColumnType, ReportDocument, Row, Section, Series, TableColumn, TableSpec,
    Theme,
};
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Value};

/// A built-in template listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
}

/// All built-in templates.
pub const TEMPLATES: [TemplateInfo; 3] = [
    TemplateInfo {
        id: "stunting",
        name: "Stunting Trends Report",
    },
    TemplateInfo {
        id: "sales",
        name: "Sales Performance Report",
    },
    TemplateInfo {
        id: "education",
        name: "Education Statistics Report",
    },
];

/// Build a template by id.
pub fn template(id: &str) -> Option<ReportDocument> {
    match id {
        "stunting" => Some(stunting_report()),
        "sales" => Some(sales_report()),
        "education" => Some(education_report()),
        _ => None,
    }
}

/// Replace every `y` value of every series carrying a `y` array with a
/// random integer in `[10, 60)`. Array lengths are kept.
pub fn randomize_y<R: Rng>(document: &mut ReportDocument, rng: &mut R) {
    for section in &mut document.sections {
        for chart in section.charts.iter_mut().flatten() {
            for series in &mut chart.data {
                if let Some(ys) = series.y_values_mut() {
                    for y in ys {
                        *y = json!(rng.random_range(10..60));
                    }
                }
            }
        }
    }
}

fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

fn numbers(values: &[f64]) -> Vec<Value> {
    values.iter().map(|v| json!(v)).collect()
}

fn state_series(name: &str, y: &[f64], color: &str) -> Series {
    Series::xy(name, (2015..=2019).map(|year| json!(year)).collect(), numbers(y))
        .with_hint("type", json!("scatter"))
        .with_hint("mode", json!("lines+markers"))
        .with_hint("line", json!({"color": color, "width": 3}))
        .with_hint("marker", json!({"size": 8}))
}

fn stunting_report() -> ReportDocument {
    let chart = ChartSpec::new(
        "stunting-trends-line",
        "Stunting Trends by State (2015-2019)",
        ChartKind::Line,
    )
    .with_series(state_series("Meghalaya", &[47.0, 46.2, 45.1, 44.3, 43.8], "#e74c3c"))
    .with_series(state_series("Assam", &[36.4, 35.1, 33.8, 32.5, 31.2], "#3498db"))
    .with_series(state_series("Sikkim", &[43.1, 39.7, 35.2, 30.8, 25.6], "#2ecc71"))
    .with_series(state_series("Manipur", &[28.9, 27.8, 26.2, 24.8, 23.1], "#f39c12"))
    .with_layout(json!({
        "title": {"text": "Child Stunting Rates by State", "font": {"size": 18, "family": "Inter"}},
        "xaxis": {"title": "Year", "gridcolor": "#f0f0f0"},
        "yaxis": {"title": "Stunting Rate (%)", "gridcolor": "#f0f0f0"},
        "hovermode": "x unified",
        "plot_bgcolor": "#fafafa",
        "paper_bgcolor": "white"
    }))
    .with_data_table(true)
    .with_download(true)
    .with_height(450);

    let mut summary = TableSpec::new("stunting-summary", "Stunting Statistics Summary (2019)")
        .with_column(TableColumn::new("state", "State").sortable())
        .with_column(
            TableColumn::new("rate", "Stunting Rate (%)")
                .with_type(ColumnType::Number)
                .sortable(),
        )
        .with_column(
            TableColumn::new("change", "Change from 2015")
                .with_type(ColumnType::Number)
                .sortable(),
        )
        .with_column(TableColumn::new("status", "Risk Status").sortable());
    for (state, rate, change, status) in [
        ("Meghalaya", 43.8, -3.2, "High Risk"),
        ("Assam", 31.2, -5.2, "Moderate Risk"),
        ("Sikkim", 25.6, -17.5, "Improved"),
        ("Manipur", 23.1, -5.8, "Low Risk"),
    ] {
        summary = summary.with_row(row(json!({
            "state": state, "rate": rate, "change": change, "status": status
        })));
    }
    summary.show_pagination = true;

    ReportDocument::new(
        "Stunting Trends in Northeast India: Mixed Progress and Emerging Concerns (2015-2019)",
    )
    .with_subtitle("Health and Nutrition Analysis Report")
    .with_author("Health Analytics Desk")
    .with_published_date("2025-05-23")
    .with_description(
        "With stunting rates nearing 47%, Meghalaya has the highest burden of child stunting \
         in the Northeast. This report explores trends in child stunting across Northeastern states.",
    )
    .with_download(true)
    .with_theme(Theme::Light)
    .with_section(
        Section::new("overview", "Report Overview", 1)
            .with_content(
                "<p>Child stunting remains a critical public health concern. Survey rounds from \
                 2015 and 2019 show that progress across Northeastern states is far from uniform.</p>\
                 <p>Sikkim recorded the largest gains, dropping from 43.1% in 2015 to 25.6% in 2019.</p>",
            )
            .with_chart(chart)
            .with_table(summary),
    )
}

fn sales_report() -> ReportDocument {
    let chart = ChartSpec::new("quarterly-sales", "Quarterly Sales Performance", ChartKind::Line)
        .with_series(
            Series::xy(
                "Revenue (Millions $)",
                vec![json!("Q1 2024"), json!("Q2 2024"), json!("Q3 2024"), json!("Q4 2024")],
                numbers(&[8.2, 9.1, 10.5, 12.5]),
            )
            .with_hint("type", json!("scatter"))
            .with_hint("mode", json!("lines+markers")),
        )
        .with_layout(json!({
            "title": "Quarterly Revenue Growth",
            "xaxis": {"title": "Quarter"},
            "yaxis": {"title": "Revenue (Million $)"}
        }))
        .with_data_table(true)
        .with_download(true)
        .with_height(400);

    let mut regions = TableSpec::new("regional-sales", "Regional Sales Breakdown")
        .with_column(TableColumn::new("region", "Region").sortable())
        .with_column(
            TableColumn::new("revenue", "Revenue ($)")
                .with_type(ColumnType::Number)
                .sortable(),
        )
        .with_column(
            TableColumn::new("growth", "YoY Growth")
                .with_type(ColumnType::Percentage)
                .sortable(),
        )
        .with_column(TableColumn::new("closed", "Quarter Closed").with_type(ColumnType::Date));
    for (region, revenue, growth) in [
        ("North America", 4_850_000, 18.4),
        ("Europe", 3_210_000, 12.7),
        ("Asia Pacific", 2_940_000, 24.1),
        ("Latin America", 1_500_000, 9.3),
    ] {
        regions = regions.with_row(row(json!({
            "region": region, "revenue": revenue, "growth": growth, "closed": "2024-12-31"
        })));
    }
    regions.show_pagination = true;

    ReportDocument::new("Q4 2024 Sales Performance Report")
        .with_subtitle("Regional Sales Analysis and Trends")
        .with_author("Sales Analytics Team")
        .with_published_date("2025-01-15")
        .with_description(
            "Comprehensive analysis of Q4 2024 sales performance across all regions with \
             year-over-year comparisons.",
        )
        .with_download(true)
        .with_section(
            Section::new("sales-overview", "Sales Overview", 1)
                .with_content("<p>Q4 2024 demonstrated exceptional growth across multiple regions.</p>")
                .with_chart(chart)
                .with_table(regions),
        )
}

fn education_report() -> ReportDocument {
    let chart = ChartSpec::new(
        "enrollment-by-level",
        "Enrollment by Education Level",
        ChartKind::Pie,
    )
    .with_series(
        Series::labeled(
            vec![
                json!("Primary"),
                json!("Secondary"),
                json!("Higher Secondary"),
                json!("University"),
            ],
            vec![json!(45), json!(30), json!(15), json!(10)],
        )
        .with_hint("type", json!("pie")),
    )
    .with_layout(json!({"title": "Student Distribution by Education Level"}))
    .with_data_table(true)
    .with_download(true)
    .with_height(400);

    ReportDocument::new("Education Statistics Report 2024")
        .with_subtitle("Student Performance and Enrollment Analysis")
        .with_author("Education Department")
        .with_published_date("2024-11-30")
        .with_description("Comprehensive analysis of student performance and enrollment rates.")
        .with_download(true)
        .with_section(
            Section::new("enrollment-trends", "Enrollment Trends", 1)
                .with_content(
                    "<p>Student enrollment has shown steady growth across all educational levels.</p>",
                )
                .with_chart(chart),
        )
}
