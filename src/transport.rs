//! Remote procedure call transport.
//!
//! [`Transport`] is the single remote interaction point: a method name and
//! positional parameters go out, one decoded value comes back. Errors are
//! passed through as they come; nothing is retried.

use crate::auth::BasicAuthConfig;
use crate::client::{ClientConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_URL};
use crate::error::{Result, UniversignError};
use crate::xmlrpc::{self, Value};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode, header};
use std::time::Duration;

/// Performs one remote call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Call `method` with `params` and return the decoded result.
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}

/// XML-RPC over HTTP(S), with optional Basic authentication.
#[derive(Clone)]
pub struct HttpTransport {
    http: HttpClient,
    url: String,
    basic_auth: Option<BasicAuthConfig>,
}

impl HttpTransport {
    /// Build the transport from a client configuration.
    ///
    /// With `https` enabled (the default) the HTTP client refuses plain
    /// `http://` URLs.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("universign-rust/{}", env!("CARGO_PKG_VERSION")));

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .https_only(config.https.unwrap_or(true))
            .build()?;

        Ok(Self {
            http,
            url: config.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            basic_auth: config.basic_auth,
        })
    }

    /// Get the endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        tracing::debug!(method, url = %self.url, params = params.len(), "sending XML-RPC call");

        let mut request = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, "text/xml")
            .body(xmlrpc::encode_call(method, &params)?);
        if let Some(auth) = &self.basic_auth {
            request = request.basic_auth(auth.user(), Some(auth.pass()));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(method, status = status.as_u16(), "received XML-RPC response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(UniversignError::Unauthorized);
        }
        if !status.is_success() {
            // The status is the error; a body that cannot be read is only logged
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(
                        method,
                        status = status.as_u16(),
                        error = %err,
                        "failed to read error body"
                    );
                    String::new()
                }
            };
            tracing::warn!(method, status = status.as_u16(), %body, "XML-RPC call failed");
            return Err(UniversignError::Status {
                status_code: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        xmlrpc::decode_response(&body).inspect_err(|err| {
            if let UniversignError::Fault { code, message } = err {
                tracing::debug!(method, code, %message, "XML-RPC fault");
            }
        })
    }
}
