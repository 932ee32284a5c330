//! Static HTML exporter.

use crate::assets::{self, AssetSource};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::script::inline_script;
use crate::styles::stylesheet;

use dr_common::{format_cell, ChartSpec, ColumnType, ReportDocument, Section, TableSpec};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Renders report documents into single-file HTML.
pub struct ReportExporter {
    config: ExportConfig,
    assets: Box<dyn AssetSource>,
}

impl ReportExporter {
    /// Create an exporter with configuration.
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            assets: assets::default_source(),
        }
    }

    /// Create an exporter with default configuration.
    pub fn default_config() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Replace the source used to fetch assets in embed mode.
    pub fn with_asset_source(mut self, source: impl AssetSource + 'static) -> Self {
        self.assets = Box::new(source);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render a document to a self-contained HTML string.
    pub fn export(&self, document: &ReportDocument) -> Result<String> {
        self.config.validate()?;
        let html = self.generate_html(document)?;

        let output = if self.config.minify {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        } else {
            html
        };

        info!(
            bytes = output.len(),
            title = %document.title,
            sections = document.sections.len(),
            "Report exported"
        );

        Ok(output)
    }

    /// Export into `dir` under the document's conventional file name.
    pub fn export_to_dir(&self, document: &ReportDocument, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(document.export_filename());
        self.export_to_file(document, &path)?;
        Ok(path)
    }

    /// Export to an explicit path.
    pub fn export_to_file(&self, document: &ReportDocument, path: &Path) -> Result<()> {
        let html = self.export(document)?;
        fs::write(path, html).map_err(|source| dr_common::Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Report written");
        Ok(())
    }

    fn generate_html(&self, document: &ReportDocument) -> Result<String> {
        let theme = self.config.theme.unwrap_or(document.theme);
        let sections = document.sorted_sections();

        let mut body = String::new();
        render_header(&mut body, document);
        for section in &sections {
            self.render_section(&mut body, section);
        }

        let charts: Vec<&ChartSpec> = sections.iter().flat_map(|s| s.charts()).collect();
        debug!(
            sections = sections.len(),
            charts = charts.len(),
            "Building inline script"
        );
        let script = inline_script(charts, self.config.format_cells)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="dynreport {version}">
    <title>{title}</title>
    {engine}
    <style>{styles}</style>
</head>
<body>
    <div class="report-container">
{body}    </div>
    <script>
{script}    </script>
</body>
</html>
"#,
            theme_class = theme.css_class(),
            version = env!("CARGO_PKG_VERSION"),
            title = html_escape(&document.title),
            engine = self.engine_tag()?,
            styles = stylesheet(theme),
            body = body,
            script = script,
        ))
    }

    fn engine_tag(&self) -> Result<String> {
        let cdn = &self.config.cdn;
        let url = cdn.plotly_url();

        if self.config.embed_assets {
            let source = self.assets.fetch(&url)?;
            let limit = self.config.limits.embed_size_limit_mb;
            let size_mb = source.len() as f64 / (1024.0 * 1024.0);
            if size_mb > limit as f64 {
                return Err(ExportError::AssetSizeLimitExceeded {
                    size_mb,
                    limit_mb: limit,
                });
            }
            debug!(url = %url, bytes = source.len(), "Embedding plotting engine");
            // An embedded bundle must not terminate its own script element.
            let source = source.replace("</script", "<\\/script");
            return Ok(format!("<script>{source}</script>"));
        }

        Ok(match &cdn.plotly.sri {
            Some(sri) => format!(
                r#"<script src="{}" integrity="{}" crossorigin="anonymous"></script>"#,
                html_escape(&url),
                html_escape(sri)
            ),
            None => format!(r#"<script src="{}"></script>"#, html_escape(&url)),
        })
    }

    fn render_section(&self, out: &mut String, section: &Section) {
        let _ = write!(
            out,
            r#"        <section class="report-section" id="{id}">
            <h3>{title}</h3>
            <div class="section-content">{content}</div>
"#,
            id = html_escape(&section.id),
            title = html_escape(&section.title),
            content = section.content,
        );
        for chart in section.charts() {
            render_chart(out, chart);
        }
        for table in section.tables() {
            self.render_table(out, table);
        }
        out.push_str("        </section>\n");
    }

    fn render_table(&self, out: &mut String, table: &TableSpec) {
        let headers: String = table
            .columns
            .iter()
            .map(|col| format!("<th>{}</th>", html_escape(&col.label)))
            .collect();

        let mut rows = String::new();
        for row in &table.data {
            rows.push_str("<tr>");
            for col in &table.columns {
                let column_type = if self.config.format_cells {
                    col.column_type
                } else {
                    ColumnType::Text
                };
                let text = format_cell(row.get(&col.key), column_type);
                let _ = write!(rows, "<td>{}</td>", html_escape(&text));
            }
            rows.push_str("</tr>\n");
        }

        let _ = write!(
            out,
            r#"            <div class="table-container" id="{id}">
                <h4>{title}</h4>
                <table class="data-table">
                    <thead><tr class="table-header">{headers}</tr></thead>
                    <tbody>
{rows}</tbody>
                </table>
            </div>
"#,
            id = html_escape(&table.id),
            title = html_escape(&table.title),
        );
    }
}

fn render_header(out: &mut String, document: &ReportDocument) {
    out.push_str("        <header class=\"report-header\">\n");
    let _ = writeln!(out, "            <h1>{}</h1>", html_escape(&document.title));
    if let Some(subtitle) = non_empty(&document.subtitle) {
        let _ = writeln!(out, "            <h2>{}</h2>", html_escape(subtitle));
    }

    let mut meta = Vec::new();
    if let Some(author) = non_empty(&document.author) {
        meta.push(format!("<span>By: {}</span>", html_escape(author)));
    }
    if let Some(date) = non_empty(&document.published_date) {
        meta.push(format!("<span>Published: {}</span>", html_escape(date)));
    }
    if document.download_enabled {
        meta.push(
            r#"<button class="download-btn no-print" onclick="window.print()">Download</button>"#
                .to_string(),
        );
    }
    if !meta.is_empty() {
        let _ = writeln!(
            out,
            r#"            <div class="report-meta">{}</div>"#,
            meta.join("")
        );
    }

    if let Some(description) = non_empty(&document.description) {
        let _ = writeln!(
            out,
            r#"            <p class="report-description">{}</p>"#,
            html_escape(description)
        );
    }
    out.push_str("        </header>\n");
}

fn render_chart(out: &mut String, chart: &ChartSpec) {
    let mut style = format!("height: {}px;", chart.effective_height());
    if let Some(width) = chart.width {
        let _ = write!(style, " width: {width}px;");
    }
    let id = html_escape(&chart.id);
    let _ = writeln!(
        out,
        r#"            <div class="chart-container">
                <h4>{title}</h4>
                <div id="{id}" class="chart-plot" style="{style}"></div>"#,
        title = html_escape(&chart.title),
    );
    if chart.show_data_table {
        let _ = writeln!(
            out,
            r#"                <div id="{id}-table" class="chart-data-table"></div>"#
        );
    }
    out.push_str("            </div>\n");
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Simple HTML escaping for metadata and cell text.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dr_common::{ChartKind, Series, TableColumn, Theme};
    use serde_json::json;

    #[test]
    fn test_exporter_default() {
        let exporter = ReportExporter::default_config();
        assert!(!exporter.config().embed_assets);
        assert!(exporter.config().format_cells);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
    }

    #[test]
    fn test_optional_metadata_absent() {
        let html = ReportExporter::default_config()
            .export(&ReportDocument::new("Bare"))
            .unwrap();
        assert!(html.contains("<h1>Bare</h1>"));
        assert!(!html.contains("<h2>"));
        assert!(!html.contains("report-meta\""));
        assert!(!html.contains("By:"));
        assert!(!html.contains("window.print()"));
        assert!(!html.contains("report-description\""));
    }

    #[test]
    fn test_header_metadata_present() {
        let doc = ReportDocument::new("Full")
            .with_subtitle("Sub")
            .with_author("Data Team")
            .with_published_date("2024-12-31")
            .with_description("About this report")
            .with_download(true);
        let html = ReportExporter::default_config().export(&doc).unwrap();
        assert!(html.contains("<h2>Sub</h2>"));
        assert!(html.contains("<span>By: Data Team</span>"));
        assert!(html.contains("<span>Published: 2024-12-31</span>"));
        assert!(html.contains(r#"onclick="window.print()""#));
        assert!(html.contains("<p class=\"report-description\">About this report</p>"));
    }

    #[test]
    fn test_chart_placeholder_sizes() {
        let mut chart = ChartSpec::new("c1", "C1", ChartKind::Bar)
            .with_series(Series::xy("S", vec![json!(1)], vec![json!(1)]));
        chart.width = Some(640);
        let doc = ReportDocument::new("T").with_section(
            Section::new("s", "S", 1)
                .with_chart(chart)
                .with_chart(ChartSpec::new("c2", "C2", ChartKind::Line).with_height(250)),
        );
        let html = ReportExporter::default_config().export(&doc).unwrap();
        assert!(html.contains(r#"<div id="c1" class="chart-plot" style="height: 400px; width: 640px;"></div>"#));
        assert!(html.contains(r#"<div id="c2" class="chart-plot" style="height: 250px;"></div>"#));
        assert!(!html.contains("c1-table"));
    }

    #[test]
    fn test_table_cells_formatted_by_column_type() {
        let table = TableSpec::new("t", "T")
            .with_column(TableColumn::new("n", "N").with_type(ColumnType::Number))
            .with_column(TableColumn::new("p", "P").with_type(ColumnType::Percentage))
            .with_column(TableColumn::new("missing", "Missing"))
            .with_row(match json!({"n": 1234567.5, "p": 12.345}) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            });
        let doc = ReportDocument::new("T").with_section(Section::new("s", "S", 1).with_table(table));

        let html = ReportExporter::default_config().export(&doc).unwrap();
        assert!(html.contains("<tr><td>1,234,567.5</td><td>12.3%</td><td></td></tr>"));

        let raw = ReportExporter::new(ExportConfig::new().with_format_cells(false))
            .export(&doc)
            .unwrap();
        assert!(raw.contains("<tr><td>1234567.5</td><td>12.345</td><td></td></tr>"));
    }

    #[test]
    fn test_theme_override() {
        let doc = ReportDocument::new("T").with_theme(Theme::Dark);
        let html = ReportExporter::default_config().export(&doc).unwrap();
        assert!(html.contains(r#"<html lang="en" class="dark">"#));

        let forced = ReportExporter::new(ExportConfig::new().with_theme(Theme::Light))
            .export(&doc)
            .unwrap();
        assert!(forced.contains(r#"<html lang="en" class="light">"#));
    }

    #[test]
    fn test_minified_output_keeps_content() {
        let doc = ReportDocument::new("Minified Report");
        let html = ReportExporter::new(ExportConfig::new().with_minify(true))
            .export(&doc)
            .unwrap();
        assert!(html.contains("Minified Report"));
        assert!(!html.contains("\n    <div"));
    }
}
