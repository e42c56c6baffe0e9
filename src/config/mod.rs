use std::time::Duration;

/// Default host of the remote analysis service.
pub const DEFAULT_ENDPOINT: &str = "https://areminer.xyz";

/// Where the two analysis operations are sent. One base endpoint for
/// both; override with the `REQMINER_ENDPOINT` environment variable.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("REQMINER_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
