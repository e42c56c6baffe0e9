use crate::config::AnalysisConfig;
use crate::domain::analysis::{EdaReport, ExtractionReport};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No file available. Please upload a file first.")]
    MissingFile,
    #[error("Analysis request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Analysis service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Could not decode analysis response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Thin client for the remote analysis service. Both operations post
/// the uploaded CSV as one `csv_file` multipart field and get JSON
/// back. Single attempt each; failures go straight to the caller.
#[derive(Clone)]
pub struct AnalysisClient {
    config: AnalysisConfig,
    client: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// `POST <base>/eda`
    pub async fn eda(&self, csv_bytes: Vec<u8>) -> Result<(EdaReport, String), AnalysisError> {
        let body = self.post_csv("eda", csv_bytes).await?;
        let report = serde_json::from_str(&body)?;
        Ok((report, body))
    }

    /// `POST <base>/extract_requirements`
    pub async fn extract_requirements(
        &self,
        csv_bytes: Vec<u8>,
    ) -> Result<(ExtractionReport, String), AnalysisError> {
        let body = self.post_csv("extract_requirements", csv_bytes).await?;
        let report = serde_json::from_str(&body)?;
        Ok((report, body))
    }

    async fn post_csv(&self, path: &str, csv_bytes: Vec<u8>) -> Result<String, AnalysisError> {
        let part = Part::bytes(csv_bytes)
            .file_name("upload.csv")
            .mime_str("text/csv")?;
        let form = Form::new().part("csv_file", part);

        let response = self
            .client
            .post(self.config.endpoint(path))
            .multipart(form)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status { status, body });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_http_error() {
        // Nothing listens on a discard port; the request fails fast
        // instead of being retried.
        let client = AnalysisClient::new(AnalysisConfig::with_base_url("http://127.0.0.1:9"));
        let result = client.eda(b"app,review\n".to_vec()).await;
        assert!(matches!(result, Err(AnalysisError::Http(_))));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let err = AnalysisError::MissingFile;
        assert_eq!(err.to_string(), "No file available. Please upload a file first.");
    }
}
