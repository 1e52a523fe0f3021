//! HTTP client for the marketplace backend REST API.
//!
//! Handles base URL resolution, bearer authentication, custom headers and
//! error normalization. Each call performs exactly one request; there is no
//! retry or caching at this layer.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use fa_core::config::{ApiConfig, AppConfig};
use fa_core::error::{FaError, FaResult};

use crate::credentials::CredentialProvider;
use crate::response::error_message_from_body;

/// HTTP client for communicating with the backend.
///
/// Wraps reqwest::Client with bearer authentication, header injection and
/// error normalization.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Base URL for the API (e.g. "https://api.example.co.ke/api").
    base_url: Url,
    /// Per-request timeout.
    timeout: Duration,
    /// Custom headers from config.
    custom_headers: Vec<(String, String)>,
    /// Supplies the bearer token for each request.
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a new ApiClient from API configuration.
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialProvider>) -> FaResult<Self> {
        let sanitized = AppConfig::sanitize_base_url(&config.base_url);
        if sanitized.is_empty() {
            return Err(FaError::MissingConfig("api.base_url".into()));
        }
        let base_url = Url::parse(&sanitized)
            .map_err(|e| FaError::Config(format!("invalid base URL '{sanitized}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FaError::Config(format!("base URL '{sanitized}' cannot hold paths")));
        }

        let timeout = Duration::from_millis(config.timeout_ms);
        let mut builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(15))
            .pool_idle_timeout(Duration::from_secs(90));

        if config.accept_invalid_certs {
            warn!("accepting invalid TLS certificates for {sanitized}");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| FaError::Http(format!("failed to build HTTP client: {e}")))?;

        let mut custom_headers: Vec<(String, String)> = config
            .custom_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        custom_headers.sort();

        Ok(Self {
            inner,
            base_url,
            timeout,
            custom_headers,
            credentials,
        })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build the full URL for the given path segments.
    ///
    /// Segments are appended to the base path and percent-encoded, so IDs
    /// never alter the route.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Build a request with auth and custom headers applied.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self.inner.request(method, url).timeout(self.timeout);
        if let Some(token) = self.credentials.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        for (key, value) in &self.custom_headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }

    /// Send a request once and normalize failures.
    async fn execute(&self, method: Method, url: Url, builder: RequestBuilder) -> FaResult<Response> {
        debug!("{} {}", method, url.path());
        let response = builder.send().await.map_err(Self::classify_error)?;
        Self::check_status(response).await
    }

    // --- Public HTTP methods ---

    /// GET with optional query parameters, parsed as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> FaResult<T> {
        let url = self.url(segments);
        let builder = self.request(Method::GET, url.clone()).query(query);
        let resp = self.execute(Method::GET, url, builder).await?;
        Self::parse_json(resp).await
    }

    /// POST a JSON body, parsed as `T`.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> FaResult<T> {
        let url = self.url(segments);
        let builder = self.request(Method::POST, url.clone()).json(body);
        let resp = self.execute(Method::POST, url, builder).await?;
        Self::parse_json(resp).await
    }

    /// PATCH a JSON body, parsed as `T`.
    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> FaResult<T> {
        let url = self.url(segments);
        let builder = self.request(Method::PATCH, url.clone()).json(body);
        let resp = self.execute(Method::PATCH, url, builder).await?;
        Self::parse_json(resp).await
    }

    /// DELETE, discarding any response body.
    pub async fn delete(&self, segments: &[&str]) -> FaResult<()> {
        let url = self.url(segments);
        let builder = self.request(Method::DELETE, url.clone());
        self.execute(Method::DELETE, url, builder).await?;
        Ok(())
    }

    // --- Response helpers ---

    /// Deserialize a successful response body.
    async fn parse_json<T: DeserializeOwned>(response: Response) -> FaResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| FaError::Serialization(format!("failed to parse response: {e}")))
    }

    /// Convert non-2xx responses into `FaError::Api` with the backend message.
    async fn check_status(response: Response) -> FaResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body);
        warn!("request failed with status {}: {}", status.as_u16(), message);
        Err(FaError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Classify a reqwest error into a FaError variant.
    fn classify_error(e: reqwest::Error) -> FaError {
        if e.is_timeout() {
            FaError::Timeout(e.to_string())
        } else if e.is_connect() {
            FaError::Http(format!("connection failed: {e}"))
        } else {
            FaError::Http(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::NoCredentials;

    fn test_client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, Arc::new(NoCredentials)).unwrap()
    }

    #[test]
    fn test_url_appends_segments() {
        let client = test_client("https://api.example.com/api/");
        assert_eq!(
            client.url(&["builder-skills", "sk-1", "approve"]).as_str(),
            "https://api.example.com/api/builder-skills/sk-1/approve"
        );
    }

    #[test]
    fn test_url_encodes_ids() {
        let client = test_client("http://localhost:5000/api");
        assert_eq!(
            client.url(&["builder-skills", "a/b c"]).as_str(),
            "http://localhost:5000/api/builder-skills/a%2Fb%20c"
        );
    }

    #[test]
    fn test_base_url_sanitized() {
        let client = test_client("api.example.com/v2/");
        assert_eq!(client.base_url(), "https://api.example.com/v2");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let config = ApiConfig {
            base_url: "  ".into(),
            ..ApiConfig::default()
        };
        let err = ApiClient::new(&config, Arc::new(NoCredentials)).err().unwrap();
        assert!(matches!(err, FaError::MissingConfig(_)));
    }

    #[test]
    fn test_custom_headers_kept() {
        let mut config = ApiConfig::default();
        config
            .custom_headers
            .insert("X-Client".into(), "fundi-admin".into());
        let client = ApiClient::new(&config, Arc::new(NoCredentials)).unwrap();
        assert_eq!(
            client.custom_headers,
            vec![("X-Client".to_string(), "fundi-admin".to_string())]
        );
    }
}
