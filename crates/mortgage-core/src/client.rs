//! HTTP client for the document-intelligence service.

use std::path::Path;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::{AcquisitionError, MortgageError, Result};
use crate::models::config::{Credentials, ServiceConfig};
use crate::models::record::MortgageRecord;
use crate::models::response::DocumentResponse;
use crate::statement::normalize;

/// Submits documents to the service and decodes its responses.
#[derive(Clone)]
pub struct DocumentServiceClient {
    client: reqwest::Client,
    base_url: String,
    categories: Vec<String>,
    credentials: Credentials,
}

impl DocumentServiceClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &ServiceConfig, credentials: Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AcquisitionError::from)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            categories: config.categories.clone(),
            credentials,
        })
    }

    /// Create a client from the configured endpoint and credentials in the environment.
    pub fn from_env(config: &ServiceConfig) -> Result<Self> {
        Self::new(config, Credentials::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a local file and return the decoded service response.
    pub async fn acquire(&self, path: &Path) -> Result<DocumentResponse> {
        if !path.is_file() {
            return Err(AcquisitionError::NotFound(path.to_path_buf()).into());
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!("Submitting {} ({} bytes)", path.display(), bytes.len());

        let body = json!({
            "file_name": file_name,
            "file_data": STANDARD.encode(&bytes),
            "categories": self.categories,
        });

        self.submit(&body).await
    }

    /// Ask the service to fetch and process a remote document.
    pub async fn acquire_from_url(&self, url: &str) -> Result<DocumentResponse> {
        info!("Submitting document URL {}", url);

        let body = json!({
            "file_url": url,
            "categories": self.categories,
        });

        self.submit(&body).await
    }

    /// Upload a local file and normalize the response.
    pub async fn process_file(&self, path: &Path) -> Result<MortgageRecord> {
        Ok(normalize(self.acquire(path).await?))
    }

    /// Process a remote document and normalize the response.
    pub async fn process_url(&self, url: &str) -> Result<MortgageRecord> {
        Ok(normalize(self.acquire_from_url(url).await?))
    }

    async fn submit(&self, body: &Value) -> Result<DocumentResponse> {
        let response = self
            .client
            .post(&self.base_url)
            .header("CLIENT-ID", &self.credentials.client_id)
            .header("AUTHORIZATION", self.credentials.authorization())
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(AcquisitionError::from)?;

        let status = response.status();
        let text = response.text().await.map_err(AcquisitionError::from)?;

        if !status.is_success() {
            return Err(AcquisitionError::Service {
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        debug!("Service responded {} with {} bytes", status, text.len());

        DocumentResponse::from_json(&text)
            .map_err(|e| MortgageError::from(AcquisitionError::InvalidResponse(e.to_string())))
    }
}
