//! Status API collaborator.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::error::FetchError;

/// Something that can return the raw homework-status snapshot.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch statuses changed since `from_date` (Unix seconds).
    ///
    /// Every failure, whatever its origin, is a [`FetchError`].
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError>;
}

/// HTTP client for the homework status API.
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http_client: reqwest::Client,
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str) -> reqwest::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("hw-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(PracticumClient {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
            http_client,
        })
    }

    /// Build the GET request for a given lower bound.
    pub fn build_request(&self, from_date: i64) -> reqwest::Result<reqwest::Request> {
        self.http_client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .build()
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        let request = self
            .build_request(from_date)
            .map_err(FetchError::transport)?;

        debug!(from_date, endpoint = %self.endpoint, "requesting homework statuses");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::transport)?;
        serde_json::from_slice(&body).map_err(FetchError::decode)
    }
}
