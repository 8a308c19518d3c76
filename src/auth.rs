//! HTTP Basic credentials for the signature endpoint.

use crate::error::{Result, UniversignError};
use crate::validation::{Schema, Validate};
use serde::Deserialize;
use std::fmt;

/// Options for [`BasicAuthConfig::new`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicAuthConfigOptions {
    pub user: Option<String>,
    pub pass: Option<String>,
}

/// Basic authentication credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BasicAuthConfigOptions")]
pub struct BasicAuthConfig {
    user: String,
    pass: String,
}

impl BasicAuthConfig {
    /// Validate the options and build the credentials.
    pub fn new(options: BasicAuthConfigOptions) -> Result<Self> {
        Self::validate(options)
    }

    /// Shorthand for [`BasicAuthConfig::new`] with both fields set.
    ///
    /// ```rust
    /// use universign::BasicAuthConfig;
    ///
    /// let auth = BasicAuthConfig::with_credentials("bar", "foo").unwrap();
    /// assert_eq!(auth.user(), "bar");
    /// assert_eq!(auth.pass(), "foo");
    /// ```
    pub fn with_credentials(user: impl Into<String>, pass: impl Into<String>) -> Result<Self> {
        Self::new(BasicAuthConfigOptions {
            user: Some(user.into()),
            pass: Some(pass.into()),
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn pass(&self) -> &str {
        &self.pass
    }
}

impl Validate for BasicAuthConfig {
    const ENTITY: &'static str = "BasicAuthConfig";
    type Options = BasicAuthConfigOptions;

    fn validate(options: BasicAuthConfigOptions) -> Result<Self> {
        let schema = Schema::new(Self::ENTITY);
        Ok(Self {
            user: schema.required("user", options.user)?,
            pass: schema.required("pass", options.pass)?,
        })
    }
}

impl TryFrom<BasicAuthConfigOptions> for BasicAuthConfig {
    type Error = UniversignError;

    fn try_from(options: BasicAuthConfigOptions) -> Result<Self> {
        Self::validate(options)
    }
}

impl fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}
