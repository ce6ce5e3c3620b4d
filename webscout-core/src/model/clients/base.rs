//! Base HTTP client with shared logic

use crate::model::types::ModelError;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    pub api_key: String,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(
        id: String,
        endpoint: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ModelError::Setup {
                provider: id.clone(),
                source,
            })?;
        Ok(Self {
            id,
            endpoint,
            api_key,
            http,
        })
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON with bearer auth
    pub async fn post_with_bearer<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        self.http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?
            .error_for_status()
            .map_err(|e| ModelError::network(&self.id, e))?
            .json()
            .await
            .map_err(|e| {
                if e.is_decode() {
                    ModelError::invalid_response(&self.id, e.to_string())
                } else {
                    ModelError::network(&self.id, e)
                }
            })
    }
}
