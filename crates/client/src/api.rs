//! The shared HTTP client every read and mutation goes through.
//!
//! Wraps a single [`reqwest::Client`] configured with the base URL, the
//! request timeout and the retry policy. Idempotent requests (GET, PUT,
//! DELETE) are retried on transient failures; POSTs are sent once.

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::retry::{next_delay, RetryConfig};

/// HTTP client for one box API deployment. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HntrApi {
    client: reqwest::Client,
    base_url: Url,
    retry: RetryConfig,
}

/// Request payload.
enum Body<'a> {
    None,
    Json(serde_json::Value),
    Raw(&'a str),
}

/// JSON error body returned by the API: `{"error": "..."}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HntrApi {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Self::with_client(
            client,
            &config.api_url,
            RetryConfig::with_retries(config.retries),
        )
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: &str,
        retry: RetryConfig,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(api_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{api_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(api_url.to_string()));
        }
        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    /// Base URL as configured, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for an endpoint.
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(endpoint.segments());
        if !endpoint.query_pairs().is_empty() {
            url.query_pairs_mut()
                .extend_pairs(endpoint.query_pairs().iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    // ---- typed helpers ----

    /// `GET` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, endpoint, Body::None).await?;
        Self::parse_response(endpoint, response).await
    }

    /// Bodiless `POST` and decode the JSON answer.
    pub async fn post<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let response = self.execute(Method::POST, endpoint, Body::None).await?;
        Self::parse_response(endpoint, response).await
    }

    /// Send a JSON body and decode the JSON answer.
    pub async fn send<B, T>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|source| ApiError::Decode {
            path: endpoint.to_string(),
            source,
        })?;
        let response = self.execute(method, endpoint, Body::Json(body)).await?;
        Self::parse_response(endpoint, response).await
    }

    /// Send a JSON body (or none) and discard the answer.
    pub async fn send_unit<B>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(b) => Body::Json(serde_json::to_value(b).map_err(|source| ApiError::Decode {
                path: endpoint.to_string(),
                source,
            })?),
            None => Body::None,
        };
        self.execute(method, endpoint, body).await?;
        Ok(())
    }

    /// `POST` a raw text body and decode the JSON answer.
    pub async fn post_raw<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        body: &str,
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::POST, endpoint, Body::Raw(body)).await?;
        Self::parse_response(endpoint, response).await
    }

    // ---- private helpers ----

    /// Send a request, retrying idempotent methods on transient failures.
    async fn execute(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Body<'_>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(endpoint)?;
        let retries = if method == Method::POST {
            0
        } else {
            self.retry.retries
        };
        let mut delay = self.retry.initial_delay;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            tracing::debug!(%method, path = %endpoint, attempt, "Sending request");

            let mut request = self.client.request(method.clone(), url.clone());
            request = match &body {
                Body::None => request,
                Body::Json(value) => request.json(value),
                Body::Raw(text) => request.body(text.to_string()),
            };

            let result = match request.send().await {
                Ok(response) => Self::ensure_success(endpoint, response).await,
                Err(e) => Err(ApiError::from(e)),
            };

            match result {
                Err(e) if e.is_transient() && attempt <= retries => {
                    tracing::warn!(
                        %method,
                        path = %endpoint,
                        attempt,
                        error = %e,
                        delay_ms = delay.as_millis() as u64,
                        "Transient failure, retrying",
                    );
                    tokio::time::sleep(delay).await;
                    delay = next_delay(delay, &self.retry);
                }
                other => return other,
            }
        }
    }

    /// Map non-2xx answers to [`ApiError::NotFound`] or [`ApiError::Status`].
    async fn ensure_success(
        endpoint: &Endpoint,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                path: endpoint.to_string(),
            });
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty());
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
            body,
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        endpoint: &Endpoint,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            path: endpoint.to_string(),
            source,
        })
    }
}
