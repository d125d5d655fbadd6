use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ContactSubmission,
    protocol::{ContactReceipt, Resource, Testimonial},
};
use tracing::debug;
use url::Url;

use crate::error::ApiClientError;

const TESTIMONIALS_PATH: &str = "testimonials";
const RESOURCES_PATH: &str = "resources";
const CONTACT_PATH: &str = "contact";

/// The three backend calls the site makes. One attempt each; no retries, no
/// caching.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, ApiClientError>;
    async fn fetch_resources(&self) -> Result<Vec<Resource>, ApiClientError>;
    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactReceipt, ApiClientError>;
}

/// Stand-in used when no backend URL is configured. Every call fails as a
/// transport error.
pub struct MissingContentApi;

#[async_trait]
impl ContentApi for MissingContentApi {
    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, ApiClientError> {
        Err(missing_backend())
    }

    async fn fetch_resources(&self) -> Result<Vec<Resource>, ApiClientError> {
        Err(missing_backend())
    }

    async fn submit_contact(
        &self,
        _submission: &ContactSubmission,
    ) -> Result<ContactReceipt, ApiClientError> {
        Err(missing_backend())
    }
}

fn missing_backend() -> ApiClientError {
    ApiClientError::Transport("backend url is not configured".to_string())
}

pub struct HttpContentApi {
    http: Client,
    base_url: String,
}

impl HttpContentApi {
    /// `base_url` is used as given; a malformed value only surfaces as a
    /// transport error on the first call.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        let raw = format!("{}/api/{path}", self.base_url.trim_end_matches('/'));
        Url::parse(&raw)
            .map_err(|err| ApiClientError::Transport(format!("invalid backend url {raw}: {err}")))
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiClientError> {
        let url = self.endpoint(path)?;
        debug!(%url, "fetching collection");
        let response = self.http.get(url).send().await?;
        let response = reject_non_success(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|err| ApiClientError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, ApiClientError> {
        self.get_collection(TESTIMONIALS_PATH).await
    }

    async fn fetch_resources(&self) -> Result<Vec<Resource>, ApiClientError> {
        self.get_collection(RESOURCES_PATH).await
    }

    async fn submit_contact(
        &self,
        submission: &ContactSubmission,
    ) -> Result<ContactReceipt, ApiClientError> {
        let url = self.endpoint(CONTACT_PATH)?;
        debug!(%url, "posting contact submission");
        let response = self.http.post(url).json(submission).send().await?;
        let response = reject_non_success(response).await?;

        // Any success status is an acknowledgment; the echoed body is optional.
        let receipt = match response.text().await {
            Ok(body) => serde_json::from_str::<ContactReceipt>(&body).unwrap_or_default(),
            Err(err) => {
                debug!("contact acknowledgment body unreadable: {err}");
                ContactReceipt::default()
            }
        };
        Ok(receipt)
    }
}

async fn reject_non_success(response: Response) -> Result<Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiClientError::rejected(status.as_u16(), &body))
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
