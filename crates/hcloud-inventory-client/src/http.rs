//! HTTP client for the Hetzner Cloud API

use std::time::Duration;

use async_trait::async_trait;
use hcloud_inventory::{InventoryError, ServerLister, ServerRecord};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, Result};
use crate::types::{ErrorBody, Server, ServersPage};

/// Public Hetzner Cloud API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.hetzner.cloud/v1";

/// Servers requested per page (the API maximum)
const PER_PAGE: u32 = 50;

/// Connection settings for [`HcloudClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL
    pub endpoint: String,
    /// Timeout for each HTTP request
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Hetzner Cloud API
#[derive(Debug, Clone)]
pub struct HcloudClient {
    client: Client,
    base_url: Url,
}

impl HcloudClient {
    /// Create a client for the public API endpoint
    ///
    /// # Errors
    /// Returns an error if the token cannot be used as a header value.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_options(token, &ClientOptions::default())
    }

    /// Create a client with custom endpoint and timeout
    ///
    /// The token is sent exactly as given; a token with a trailing newline is
    /// rejected rather than trimmed.
    ///
    /// # Errors
    /// Returns an error if the endpoint URL or the token is invalid.
    pub fn with_options(token: &str, options: &ClientOptions) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ClientError::InvalidToken(invalid_token_reason(token).to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("ansible-hcloud-inventory/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout)
            .build()?;

        Self::with_client(&options.endpoint, client)
    }

    /// Create a client from a preconfigured `reqwest::Client`
    ///
    /// The client is expected to carry the `Authorization` header already.
    ///
    /// # Errors
    /// Returns an error if the endpoint URL is invalid.
    pub fn with_client(endpoint: &str, client: Client) -> Result<Self> {
        // `Url::join` replaces the last path segment unless it ends in '/'
        let base_url = if endpoint.ends_with('/') {
            Url::parse(endpoint)?
        } else {
            Url::parse(&format!("{endpoint}/"))?
        };
        Ok(Self { client, base_url })
    }

    /// Build a full URL from a path relative to the endpoint
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Perform a GET request and deserialize the response
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| format!("{}: {}", e.error.code, e.error.message))
                .unwrap_or(body);
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// Fetch one page of servers
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    pub async fn servers_page(&self, page: u32) -> Result<ServersPage> {
        let mut url = self.url("servers")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &PER_PAGE.to_string());
        self.get(url).await
    }

    /// Fetch all servers, following pagination
    ///
    /// # Errors
    /// Returns an error if any page cannot be fetched.
    #[instrument(skip(self), fields(endpoint = %self.base_url))]
    pub async fn all_servers(&self) -> Result<Vec<Server>> {
        let mut servers = Vec::new();
        let mut page = 1;

        loop {
            let body = self.servers_page(page).await?;
            debug!(page, count = body.servers.len(), "fetched servers page");

            let next = body.next_page();
            servers.extend(body.servers);

            match next {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(servers)
    }
}

/// Why a token cannot be sent as a header value
fn invalid_token_reason(token: &str) -> &'static str {
    if token.contains(['\n', '\r']) {
        "token contains a line break; a token command must print it without a \
         trailing newline (e.g. `printf` instead of `echo`)"
    } else {
        "token contains characters not allowed in an HTTP header"
    }
}

#[async_trait]
impl ServerLister for HcloudClient {
    async fn list_servers(&self) -> std::result::Result<Vec<ServerRecord>, InventoryError> {
        let servers = self
            .all_servers()
            .await
            .map_err(|e| InventoryError::ListFailed {
                source_type: self.lister_type(),
                message: e.to_string(),
            })?;
        Ok(servers.into_iter().map(ServerRecord::from).collect())
    }

    fn lister_type(&self) -> &'static str {
        "hcloud"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(HcloudClient::new("token").is_ok());
    }

    #[test]
    fn test_invalid_endpoint() {
        let options = ClientOptions {
            endpoint: "not a url".to_string(),
            ..ClientOptions::default()
        };
        assert!(matches!(
            HcloudClient::with_options("token", &options),
            Err(ClientError::Url(_))
        ));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let err = HcloudClient::new("token\n").unwrap_err();
        assert!(matches!(err, ClientError::InvalidToken(_)));
        assert!(err.to_string().contains("trailing newline"), "{err}");
    }

    #[test]
    fn test_token_with_control_character_is_rejected() {
        let err = HcloudClient::new("tok\u{7f}en").unwrap_err();
        assert!(matches!(err, ClientError::InvalidToken(_)));
        assert!(!err.to_string().contains("newline"), "{err}");
    }

    #[test]
    fn test_url_building() {
        let client = HcloudClient::new("token").unwrap();
        let url = client.url("servers").unwrap();
        assert_eq!(url.as_str(), "https://api.hetzner.cloud/v1/servers");
    }

    #[test]
    fn test_url_building_with_trailing_slash() {
        let client =
            HcloudClient::with_client("http://localhost:4000/v1/", Client::new()).unwrap();
        let url = client.url("servers").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/v1/servers");
    }
}
