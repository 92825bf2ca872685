//! Shared HTTP plumbing: base URL, bearer token, error mapping.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the SPJT REST API.
///
/// Cheap to clone; clones share the connection pool and the bearer token, so a
/// login performed through one clone authenticates all of them.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::from)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request_id = Uuid::now_v7();
        tracing::debug!(%method, %url, %request_id, "api request");

        let mut req = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> ClientResult<T> {
        let resp = self.send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Send and discard whatever body comes back.
    pub(crate) async fn send_empty(&self, req: RequestBuilder) -> ClientResult<()> {
        self.send(req).await.map(|_| ())
    }

    /// Send and return the raw body.
    pub(crate) async fn send_bytes(&self, req: RequestBuilder) -> ClientResult<Vec<u8>> {
        let resp = self.send(req).await?;
        let bytes = resp.bytes().await.map_err(ClientError::from)?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, req: RequestBuilder) -> ClientResult<Response> {
        let resp = req.send().await.map_err(ClientError::from)?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(status = status.as_u16(), "api rejected session token");
            return Err(ClientError::Unauthorized);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        tracing::warn!(status = status.as_u16(), %message, "api error");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a human-readable message out of an error body (`{"message": ...}` or
/// `{"error": ...}`), falling back to the raw text.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        Err(_) => Some(body.to_string()),
    }
}
