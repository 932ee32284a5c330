//! Fetching external assets for offline (embedded) exports.

use crate::error::{ExportError, Result};

/// Source of asset text for embed mode.
pub trait AssetSource: Send + Sync {
    /// Fetch the asset at `url` as text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Asset source used when no HTTP client is compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableAssetSource;

impl AssetSource for UnavailableAssetSource {
    fn fetch(&self, url: &str) -> Result<String> {
        Err(ExportError::AssetFetchError {
            url: url.to_string(),
            reason: "asset embedding requires the `embed` feature".to_string(),
        })
    }
}

/// Asset source backed by a blocking HTTP client.
#[cfg(feature = "embed")]
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    agent: ureq::Agent,
}

#[cfg(feature = "embed")]
impl Default for HttpAssetSource {
    fn default() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout(std::time::Duration::from_secs(30))
                .build(),
        }
    }
}

#[cfg(feature = "embed")]
impl AssetSource for HttpAssetSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let fetch_err = |reason: String| ExportError::AssetFetchError {
            url: url.to_string(),
            reason,
        };
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| fetch_err(e.to_string()))?;
        response.into_string().map_err(|e| fetch_err(e.to_string()))
    }
}

/// The best available asset source for this build.
pub fn default_source() -> Box<dyn AssetSource> {
    #[cfg(feature = "embed")]
    {
        Box::new(HttpAssetSource::default())
    }
    #[cfg(not(feature = "embed"))]
    {
        Box::new(UnavailableAssetSource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_source_reports_url() {
        let err = UnavailableAssetSource
            .fetch("https://cdn.example/plotly.min.js")
            .unwrap_err();
        assert!(err.to_string().contains("https://cdn.example/plotly.min.js"));
    }
}
