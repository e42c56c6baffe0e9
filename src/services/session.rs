use crate::domain::analysis::{EdaReport, ExtractionReport};
use crate::repository::session_repository::{
    KEY_CURRENT_FILE, KEY_EDA_DATA, KEY_REQUIREMENTS_DATA,
};
use crate::repository::Repository;
use crate::services::{AnalysisClient, AnalysisError};
use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

const DATA_URL_PREFIX: &str = "data:text/csv;base64,";

/// Typed facade over the session store plus the analysis client: file
/// intake, cached reports, and the two remote dispatch operations.
#[derive(Clone)]
pub struct SessionService {
    repository: Repository,
    client: AnalysisClient,
}

impl SessionService {
    pub fn new(repository: Repository, client: AnalysisClient) -> Self {
        Self { repository, client }
    }

    /// Accepts a CSV upload. Anything not named `*.csv` is rejected
    /// before any state changes; on accept, previously cached analysis
    /// results are cleared and the content is persisted as a data URL.
    pub async fn store_csv(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        if !file_name.to_lowercase().ends_with(".csv") {
            return Err(anyhow!("Please upload a CSV file"));
        }

        self.repository.session.remove(KEY_EDA_DATA).await?;
        self.repository.session.remove(KEY_REQUIREMENTS_DATA).await?;

        let data_url = format!("{}{}", DATA_URL_PREFIX, BASE64.encode(bytes));
        self.repository
            .session
            .set(KEY_CURRENT_FILE, &data_url)
            .await?;

        Ok(())
    }

    /// The uploaded CSV decoded back to bytes, or None when no file
    /// has been stored.
    pub async fn current_csv(&self) -> Result<Option<Vec<u8>>> {
        let Some(data_url) = self.repository.session.get(KEY_CURRENT_FILE).await? else {
            return Ok(None);
        };
        let encoded = data_url
            .strip_prefix(DATA_URL_PREFIX)
            .ok_or_else(|| anyhow!("Stored file is not a CSV data URL"))?;
        Ok(Some(BASE64.decode(encoded)?))
    }

    pub async fn has_file(&self) -> Result<bool> {
        self.repository.session.contains(KEY_CURRENT_FILE).await
    }

    /// Requests exploratory data analysis for the stored file. The
    /// parsed report is persisted only on success; on any failure the
    /// previously cached report is left untouched.
    pub async fn run_eda(&self) -> Result<EdaReport, AnalysisError> {
        let csv = self
            .current_csv()
            .await?
            .ok_or(AnalysisError::MissingFile)?;
        let (report, body) = self.client.eda(csv).await?;
        self.repository
            .session
            .set(KEY_EDA_DATA, &body)
            .await
            .map_err(AnalysisError::Store)?;
        Ok(report)
    }

    /// Requests requirement extraction for the stored file. Same
    /// persistence contract as `run_eda`.
    pub async fn run_extraction(&self) -> Result<ExtractionReport, AnalysisError> {
        let csv = self
            .current_csv()
            .await?
            .ok_or(AnalysisError::MissingFile)?;
        let (report, body) = self.client.extract_requirements(csv).await?;
        self.repository
            .session
            .set(KEY_REQUIREMENTS_DATA, &body)
            .await
            .map_err(AnalysisError::Store)?;
        Ok(report)
    }

    /// Cached EDA report, if a valid one is persisted. A corrupted
    /// blob is removed from the store instead of failing on every
    /// subsequent load.
    pub async fn cached_eda(&self) -> Result<Option<EdaReport>> {
        self.cached_report(KEY_EDA_DATA).await
    }

    pub async fn cached_extraction(&self) -> Result<Option<ExtractionReport>> {
        self.cached_report(KEY_REQUIREMENTS_DATA).await
    }

    async fn cached_report<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>> {
        let Some(body) = self.repository.session.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&body) {
            Ok(report) => Ok(Some(report)),
            Err(e) => {
                tracing::warn!("Discarding corrupted cached data under {}: {}", key, e);
                self.repository.session.remove(key).await?;
                Err(anyhow!("Error loading saved data"))
            }
        }
    }

    pub async fn clear_eda(&self) -> Result<()> {
        self.repository.session.remove(KEY_EDA_DATA).await
    }

    pub async fn clear_extraction(&self) -> Result<()> {
        self.repository.session.remove(KEY_REQUIREMENTS_DATA).await
    }

    pub async fn has_eda(&self) -> Result<bool> {
        self.repository.session.contains(KEY_EDA_DATA).await
    }

    pub async fn has_extraction(&self) -> Result<bool> {
        self.repository.session.contains(KEY_REQUIREMENTS_DATA).await
    }

    /// The "upload a different file" reset: drops the file and both
    /// cached reports together.
    pub async fn clear_all(&self) -> Result<()> {
        self.repository.session.clear().await
    }
}
