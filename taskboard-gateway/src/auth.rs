//! Credential providers.
//!
//! The gateway never reads session state itself. It asks the injected
//! [`CredentialProvider`] for a bearer token before every request; `None`
//! means the request goes out without an Authorization header.

use crate::error::{GatewayError, Result};
use async_trait::async_trait;

/// Environment variable read by [`EnvToken::default`]
pub const TOKEN_ENV_VAR: &str = "TASKBOARD_TOKEN";

/// Supplies the bearer token for API requests
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn token(&self) -> Result<Option<String>>;
}

/// No credentials; requests are sent anonymously
#[derive(Debug, Default, Clone, Copy)]
pub struct Anonymous;

#[async_trait]
impl CredentialProvider for Anonymous {
    async fn token(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// A fixed token, e.g. one handed over by a sign-in flow
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self) -> Result<Option<String>> {
        Ok(Some(self.0.clone()).filter(|t| !t.is_empty()))
    }
}

/// Reads the token from an environment variable on every request
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Fail instead of sending anonymous requests when the variable is unset
    pub fn required(self) -> RequiredToken<Self> {
        RequiredToken(self)
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

#[async_trait]
impl CredentialProvider for EnvToken {
    async fn token(&self) -> Result<Option<String>> {
        Ok(std::env::var(&self.var)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}

/// Wraps a provider so that a missing token is an error
#[derive(Debug, Clone)]
pub struct RequiredToken<P>(P);

#[async_trait]
impl<P: CredentialProvider> CredentialProvider for RequiredToken<P> {
    async fn token(&self) -> Result<Option<String>> {
        match self.0.token().await? {
            Some(token) => Ok(Some(token)),
            None => Err(GatewayError::Credentials("no token available".into())),
        }
    }
}
