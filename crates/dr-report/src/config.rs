//! Export configuration types.

use crate::error::ExportError;
use dr_common::Theme;
use serde::{Deserialize, Serialize};

/// CDN library configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdnLibrary {
    /// npm package name.
    pub package: String,
    /// Pinned version number.
    pub version: String,
    /// Subresource integrity hash, emitted only when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sri: Option<String>,
    /// Path within the npm package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CdnLibrary {
    /// Create a new CDN library configuration.
    pub fn new(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            sri: None,
            path: None,
        }
    }

    /// Set the path within the npm package.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the integrity hash.
    pub fn with_sri(mut self, sri: impl Into<String>) -> Self {
        self.sri = Some(sri.into());
        self
    }

    /// Get the full CDN URL for this library.
    pub fn url(&self, base_url: &str) -> String {
        let path = self.path.as_deref().unwrap_or("dist/index.min.js");
        format!(
            "{}/{}@{}/{}",
            base_url.trim_end_matches('/'),
            self.package,
            self.version,
            path
        )
    }
}

/// CDN configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdnConfig {
    /// Base URL for CDN resources.
    #[serde(default = "default_cdn_base")]
    pub base_url: String,
    /// The plotting engine bundle.
    #[serde(default = "default_plotly")]
    pub plotly: CdnLibrary,
}

fn default_cdn_base() -> String {
    "https://cdn.jsdelivr.net/npm".to_string()
}

fn default_plotly() -> CdnLibrary {
    CdnLibrary::new("plotly.js-dist-min", "2.35.2").with_path("plotly.min.js")
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base_url: default_cdn_base(),
            plotly: default_plotly(),
        }
    }
}

impl CdnConfig {
    /// URL of the plotting engine script.
    pub fn plotly_url(&self) -> String {
        self.plotly.url(&self.base_url)
    }
}

/// Resource limits for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLimits {
    /// Maximum size for embedded assets (MB).
    #[serde(default = "default_embed_size_limit")]
    pub embed_size_limit_mb: u64,
}

fn default_embed_size_limit() -> u64 {
    10
}

impl Default for ExportLimits {
    fn default() -> Self {
        Self {
            embed_size_limit_mb: default_embed_size_limit(),
        }
    }
}

/// Complete export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Apply per-column value formatting to exported cells.
    #[serde(default = "default_true")]
    pub format_cells: bool,
    /// Minify the generated HTML.
    #[serde(default)]
    pub minify: bool,
    /// Inline the plotting engine for fully offline viewing.
    #[serde(default)]
    pub embed_assets: bool,
    /// Force a theme regardless of the document's own setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// CDN configuration.
    #[serde(default)]
    pub cdn: CdnConfig,
    /// Resource limits.
    #[serde(default)]
    pub limits: ExportLimits,
}

fn default_schema_version() -> String {
    dr_common::SCHEMA_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            format_cells: true,
            minify: false,
            embed_assets: false,
            theme: None,
            cdn: CdnConfig::default(),
            limits: ExportLimits::default(),
        }
    }
}

impl ExportConfig {
    /// Create a new export configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable cell formatting.
    pub fn with_format_cells(mut self, enabled: bool) -> Self {
        self.format_cells = enabled;
        self
    }

    /// Enable or disable minification.
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Enable asset embedding.
    pub fn with_embed_assets(mut self, embed: bool) -> Self {
        self.embed_assets = embed;
        self
    }

    /// Force a theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Check the configuration for values that cannot produce a valid export.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.cdn.base_url.trim().is_empty() {
            return Err(ExportError::InvalidConfig("cdn.base_url is empty".to_string()));
        }
        if self.cdn.plotly.version.trim().is_empty() {
            return Err(ExportError::InvalidConfig(
                "cdn.plotly.version is empty".to_string(),
            ));
        }
        if self.embed_assets && self.limits.embed_size_limit_mb == 0 {
            return Err(ExportError::InvalidConfig(
                "limits.embed_size_limit_mb must be positive when embedding assets".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.schema_version, "1.0.0");
        assert!(config.format_cells);
        assert!(!config.minify);
        assert!(!config.embed_assets);
        assert_eq!(config.theme, None);
        assert_eq!(config.limits.embed_size_limit_mb, 10);
    }

    #[test]
    fn test_config_builder() {
        let config = ExportConfig::new()
            .with_format_cells(false)
            .with_minify(true)
            .with_theme(Theme::Dark);
        assert!(!config.format_cells);
        assert!(config.minify);
        assert_eq!(config.theme, Some(Theme::Dark));
    }

    #[test]
    fn test_plotly_url() {
        let cdn = CdnConfig::default();
        assert_eq!(
            cdn.plotly_url(),
            "https://cdn.jsdelivr.net/npm/plotly.js-dist-min@2.35.2/plotly.min.js"
        );
        let lib = CdnLibrary::new("plotly.js", "1.0.0");
        assert_eq!(
            lib.url("https://example.test/npm/"),
            "https://example.test/npm/plotly.js@1.0.0/dist/index.min.js"
        );
    }

    #[test]
    fn test_validate() {
        assert!(ExportConfig::default().validate().is_ok());

        let mut config = ExportConfig::new().with_embed_assets(true);
        config.limits.embed_size_limit_mb = 0;
        assert!(matches!(config.validate(), Err(ExportError::InvalidConfig(_))));

        let mut config = ExportConfig::default();
        config.cdn.base_url = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ExportConfig::from_json(r#"{"minify": true, "theme": "dark"}"#).unwrap();
        assert!(config.minify);
        assert!(config.format_cells);
        assert_eq!(config.theme, Some(Theme::Dark));
        assert_eq!(config.cdn, CdnConfig::default());

        let back = ExportConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
