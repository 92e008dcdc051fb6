//! SIP control-plane API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::error::{Result, SipError};

const USER_AGENT: &str = concat!("sipctl/", env!("CARGO_PKG_VERSION"));

/// Default timeout for ordinary control-plane requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Low-level SIP control-plane client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `List`, `Create`, `Update`, and `Delete` traits
/// on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use sipctl::SipClient;
///
/// # fn example() -> sipctl::Result<()> {
/// // Create from environment variables
/// let client = SipClient::from_env()?;
///
/// // Or configure manually
/// let client = SipClient::new("your-api-key", "https://sip.example.com/api")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SipClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for SipClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SipClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SipClient {
    /// Create a client from environment variables.
    ///
    /// Uses `SIPCTL_API_KEY` for authentication and `SIPCTL_API_URL` for the
    /// base URL. A self-hosted control plane has no canonical address, so
    /// both are required.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("SIPCTL_API_KEY").map_err(|_| {
            SipError::ConfigMissing("SIPCTL_API_KEY environment variable not set".to_string())
        })?;
        let base_url = env::var("SIPCTL_API_URL").map_err(|_| {
            SipError::ConfigMissing("SIPCTL_API_URL environment variable not set".to_string())
        })?;

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - control-plane API key
    /// * `base_url` - base URL of the control plane (e.g., `https://sip.example.com/api`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(SipError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(SipError::Http)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await
            .map_err(SipError::Http)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(SipError::Http)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body and an explicit deadline.
    ///
    /// Dialing a participant blocks on the far end picking up, which can take
    /// far longer than the client's default timeout allows.
    #[tracing::instrument(skip(self, body))]
    pub async fn post_with_deadline<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        deadline: Duration,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .timeout(deadline)
            .json(body)
            .send()
            .await
            .map_err(SipError::Http)?;

        Self::check_response(response).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(SipError::Http)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(SipError::Http)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        Err(Self::extract_error(response, status).await)
    }

    /// Extract a structured error from a failed response.
    ///
    /// Failed dials carry a SIP response code alongside the message; those
    /// are surfaced as [`SipError::SipStatus`] so callers can report the
    /// telephony-level outcome.
    async fn extract_error(response: Response, status: reqwest::StatusCode) -> SipError {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => {
                return SipError::Api {
                    message: format!("HTTP {status}"),
                    status_code: Some(status.as_u16()),
                }
            }
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(code) = json
                .get("sip_status_code")
                .and_then(|c| c.as_u64())
                .and_then(|c| u16::try_from(c).ok())
            {
                let sip_status = json
                    .get("sip_status")
                    .and_then(|s| s.as_str())
                    .unwrap_or_default()
                    .to_string();
                return SipError::SipStatus {
                    code,
                    status: sip_status,
                };
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return SipError::Api {
                    message: msg.to_string(),
                    status_code: Some(status.as_u16()),
                };
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return SipError::Api {
                    message: err.to_string(),
                    status_code: Some(status.as_u16()),
                };
            }
        }

        SipError::Api {
            message: body,
            status_code: Some(status.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = SipClient::new("test-token", "https://sip.example.com/api").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("SipClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = SipClient::new("token", "https://sip.example.com/api").unwrap();
        let client2 = SipClient::new("token", "https://sip.example.com/api/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }
}
