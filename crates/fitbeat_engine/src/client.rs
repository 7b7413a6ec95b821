use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ApiError, ApiFailure, StatusResponse};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Deployment-specific prefix, e.g. `https://host/Prod`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000/Prod".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    description: &'a str,
    /// Asks the service to drop any prior server-side session memory before
    /// starting the new job.
    clear_memory: bool,
}

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    job_id: String,
}

/// Seam over the remote recommendation service.
#[async_trait::async_trait]
pub trait RecommenderApi: Send + Sync {
    /// `POST /recommend` — submits a description, yields an opaque job token.
    async fn create_job(&self, description: &str) -> Result<String, ApiError>;
    /// `GET /status/{job_id}` — reports job progress, with the playlist once
    /// completed.
    async fn fetch_status(&self, job_id: &str) -> Result<StatusResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRecommender {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestRecommender {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base_url = validate_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl RecommenderApi for ReqwestRecommender {
    async fn create_job(&self, description: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint("recommend"))
            .json(&RecommendRequest {
                description,
                clear_memory: true,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body: RecommendResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(body.job_id)
    }

    async fn fetch_status(&self, job_id: &str) -> Result<StatusResponse, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("status/{job_id}")))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json().await.map_err(map_reqwest_error)
    }
}

/// Validates the configured prefix and normalizes away a trailing slash so
/// `endpoint` can join with plain formatting.
fn validate_base_url(raw: &str) -> Result<String, ApiError> {
    let parsed =
        Url::parse(raw).map_err(|err| ApiError::new(ApiFailure::InvalidBaseUrl, err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::new(
            ApiFailure::InvalidBaseUrl,
            format!("unsupported scheme {}", parsed.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(ApiFailure::Decode, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
