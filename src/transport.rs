//! HTTP transport abstraction.
//!
//! The gateway treats the transport as a black-box request/response
//! exchanger bound to a base host: it hands over a path, headers, and a
//! body, and gets back a status code, headers, and body. Status
//! classification happens in the gateway, exactly once per response, so
//! transports perform no success checks of their own.

use std::{future::Future, sync::LazyLock, time::Duration};

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::HttpConfig,
    error::{Error, Result},
};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// Response from a transport exchange.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// Response headers.
    pub headers: Vec<(String, String)>,
}

impl TransportResponse {
    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTPS request/response exchanger bound to a base host.
///
/// The gateway issues every call through this trait; tests substitute a
/// scripted implementation to exercise the protocol without a network.
pub trait Transport: Send + Sync {
    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level failures; non-2xx statuses
    /// are returned as ordinary responses.
    fn get<'a>(
        &'a self,
        path: &'a str,
        headers: &'a [(&'a str, String)],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a POST request with a body.
    ///
    /// # Errors
    ///
    /// Returns error only for transport-level failures; non-2xx statuses
    /// are returned as ordinary responses.
    fn post<'a>(
        &'a self,
        path: &'a str,
        headers: &'a [(&'a str, String)],
        body: Vec<u8>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;
}

/// HTTPS transport using reqwest.
///
/// Bound to its base URL at construction; there is no lazy or global host
/// state. Connection pooling, keep-alive, and TLS are reqwest's concern.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport bound to a base URL, using the shared default
    /// client for connection pooling efficiency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL does not parse.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, DEFAULT_HTTP_CLIENT.clone())
    }

    /// Creates a transport with a per-instance client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid base URL or configuration
    /// bounds, [`Error::Http`] if client construction fails.
    pub fn with_config(base_url: &str, config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(Error::Http)?;
        Self::build(base_url, client)
    }

    fn build(base_url: &str, client: Client) -> Result<Self> {
        let url =
            Url::parse(base_url).map_err(|e| Error::Config(format!("invalid base URL: {e}")))?;
        if url.host_str().is_none() {
            return Err(Error::Config(format!("base URL missing host: {base_url}")));
        }
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Returns the base URL this transport is bound to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, headers, body))]
    async fn execute(
        &self,
        method: &str,
        path: &str,
        headers: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse> {
        let full_url = format!("{}{path}", self.base_url);

        let mut request = match method {
            "GET" => self.client.get(&full_url),
            "POST" => self.client.post(&full_url),
            other => return Err(Error::Config(format!("unsupported HTTP method: {other}"))),
        };

        for (key, value) in headers {
            request = request.header(*key, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();
        let body = response.bytes().await.map_err(Error::Http)?.to_vec();

        debug!(status, body_len = body.len(), "exchange complete");

        Ok(TransportResponse { status, body, headers })
    }
}

impl Transport for HttpTransport {
    async fn get<'a>(
        &'a self,
        path: &'a str,
        headers: &'a [(&'a str, String)],
    ) -> Result<TransportResponse> {
        self.execute("GET", path, headers, None).await
    }

    async fn post<'a>(
        &'a self,
        path: &'a str,
        headers: &'a [(&'a str, String)],
        body: Vec<u8>,
    ) -> Result<TransportResponse> {
        self.execute("POST", path, headers, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_new() {
        let transport = HttpTransport::new("https://checkout.testdrive.klarna.com").unwrap();
        assert_eq!(transport.base_url(), "https://checkout.testdrive.klarna.com");
    }

    #[test]
    fn test_http_transport_trims_trailing_slash() {
        let transport = HttpTransport::new("https://checkout.klarna.com/").unwrap();
        assert_eq!(transport.base_url(), "https://checkout.klarna.com");
    }

    #[test]
    fn test_http_transport_rejects_invalid_base_url() {
        let result = HttpTransport::new("not-a-url");
        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn test_http_transport_with_config() {
        let config = HttpConfig {
            pool_max_idle_per_host: 5,
            timeout_secs: 20,
            connect_timeout_secs: 5,
        };
        let transport = HttpTransport::with_config("https://checkout.klarna.com", &config);
        assert!(transport.is_ok());
    }

    #[test]
    fn test_http_transport_with_config_validates_bounds() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        let result = HttpTransport::with_config("https://checkout.klarna.com", &config);
        assert!(matches!(result.unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn test_transport_response_header_lookup_is_case_insensitive() {
        let response = TransportResponse {
            status: 201,
            body: vec![],
            headers: vec![(
                "location".to_owned(),
                "https://checkout.klarna.com/checkout/orders/abc123".to_owned(),
            )],
        };

        assert_eq!(
            response.header("Location"),
            Some("https://checkout.klarna.com/checkout/orders/abc123")
        );
        assert_eq!(response.header("LOCATION"), response.header("location"));
        assert!(response.header("Content-Type").is_none());
    }

    #[test]
    fn test_transport_response_empty_body() {
        let response = TransportResponse { status: 201, body: vec![], headers: vec![] };
        assert_eq!(response.status, 201);
        assert!(response.body.is_empty());
    }
}
