//! Universign API client.
//!
//! The main entry point for submitting transactions to the signature service.

use crate::auth::BasicAuthConfig;
use crate::error::Result;
use crate::requester::RequesterClient;
use crate::transport::{HttpTransport, Transport};
use crate::xmlrpc::Value;
use std::sync::Arc;
use std::time::Duration;

pub(crate) const DEFAULT_URL: &str = "https://ws.universign.eu/sign/rpc/";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Universign API client.
///
/// # Example
///
/// ```rust,no_run
/// use universign::{BasicAuthConfig, Client};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new(BasicAuthConfig::with_credentials("user@example.com", "secret")?)?;
///
///     let info = client.requester().get_transaction_info("38c5be21-cf9c-4bc2").await?;
///     println!("{:?}", info.get("status"));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    pub(crate) transport: Arc<dyn Transport>,
}

/// Configuration options for the client.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Endpoint URL (default: https://ws.universign.eu/sign/rpc/).
    pub url: Option<String>,
    /// Only allow HTTPS endpoints (default: true).
    pub https: Option<bool>,
    /// Basic authentication credentials.
    pub basic_auth: Option<BasicAuthConfig>,
    /// Request timeout (default: 30 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl Client {
    /// Create a client for the production endpoint.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use universign::{BasicAuthConfig, Client};
    ///
    /// let auth = BasicAuthConfig::with_credentials("user@example.com", "secret").unwrap();
    /// let client = Client::new(auth).unwrap();
    /// ```
    pub fn new(basic_auth: BasicAuthConfig) -> Result<Self> {
        Self::with_config(ClientConfig {
            basic_auth: Some(basic_auth),
            ..Default::default()
        })
    }

    /// Create a client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use universign::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config(ClientConfig {
    ///     url: Some("https://sign.test.universign.eu/sign/rpc/".to_string()),
    ///     timeout: Some(Duration::from_secs(60)),
    ///     ..Default::default()
    /// }).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Create a client on top of any transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Call a remote method with positional parameters.
    ///
    /// The result is returned as decoded; errors are not retried.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.transport.call(method, params).await
    }

    /// Get the requester client for transaction operations.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use universign::{BasicAuthConfig, Client};
    ///
    /// let auth = BasicAuthConfig::with_credentials("user@example.com", "secret").unwrap();
    /// let requester = Client::new(auth).unwrap().requester();
    /// ```
    pub fn requester(&self) -> RequesterClient {
        RequesterClient::new(self.clone())
    }
}
