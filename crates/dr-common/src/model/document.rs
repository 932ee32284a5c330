//! Report documents and sections.

use super::chart::ChartSpec;
use super::table::TableSpec;
use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Report color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Get the CSS class for this theme.
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("unknown theme: {}", s)),
        }
    }
}

/// A titled, ordered unit of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique within the document; used as the export anchor.
    pub id: String,
    pub title: String,
    /// Rich-text HTML body, rendered verbatim.
    #[serde(default)]
    pub content: String,
    /// Sort key; ties keep their original position.
    #[serde(default)]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<Vec<ChartSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<TableSpec>>,
}

impl Section {
    /// Create an empty section.
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            order,
            charts: None,
            tables: None,
        }
    }

    /// Set the HTML body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Append a chart.
    pub fn with_chart(mut self, chart: ChartSpec) -> Self {
        self.charts.get_or_insert_with(Vec::new).push(chart);
        self
    }

    /// Append a table.
    pub fn with_table(mut self, table: TableSpec) -> Self {
        self.tables.get_or_insert_with(Vec::new).push(table);
        self
    }

    /// Charts in configured order.
    pub fn charts(&self) -> &[ChartSpec] {
        self.charts.as_deref().unwrap_or_default()
    }

    /// Tables in configured order.
    pub fn tables(&self) -> &[TableSpec] {
        self.tables.as_deref().unwrap_or_default()
    }

    /// Find a chart by id.
    pub fn find_chart(&self, chart_id: &str) -> Option<&ChartSpec> {
        self.charts().iter().find(|c| c.id == chart_id)
    }

    /// Find a table by id.
    pub fn find_table(&self, table_id: &str) -> Option<&TableSpec> {
        self.tables().iter().find(|t| t.id == table_id)
    }

    /// Replace the chart with the same id in place.
    ///
    /// Returns `false` (and leaves the section untouched) when no chart has
    /// that id.
    pub fn replace_chart(&mut self, chart_id: &str, chart: ChartSpec) -> bool {
        let Some(charts) = self.charts.as_mut() else {
            return false;
        };
        match charts.iter().position(|c| c.id == chart_id) {
            Some(index) => {
                charts[index] = chart;
                true
            }
            None => false,
        }
    }
}

/// The top-level report description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Free-form publication date text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub download_enabled: bool,
    #[serde(default)]
    pub theme: Theme,
}

impl ReportDocument {
    /// Create an empty document with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            author: None,
            published_date: None,
            description: None,
            sections: Vec::new(),
            download_enabled: false,
            theme: Theme::default(),
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the publication date text.
    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Enable the download control.
    pub fn with_download(mut self, enabled: bool) -> Self {
        self.download_enabled = enabled;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Append a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Sections ordered by `order`, ties kept in original position.
    pub fn sorted_sections(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    /// Reorder `sections` in place using the same rule as [`Self::sorted_sections`].
    pub fn normalize(&mut self) {
        self.sections.sort_by_key(|s| s.order);
    }

    /// Find a section by id.
    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Find a section by id for in-place mutation.
    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// All charts in document order (section array order, then chart order).
    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.sections.iter().flat_map(|s| s.charts().iter())
    }

    /// All tables in document order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.sections.iter().flat_map(|s| s.tables().iter())
    }

    /// Download filename for the static export of this document.
    pub fn export_filename(&self) -> String {
        export_filename(&self.title)
    }

    /// Load a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Write the document to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// JSON Schema describing the document format.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(ReportDocument)).unwrap_or_default()
    }
}

/// Derive the export filename from a report title.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`.
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.html", stem)
}
