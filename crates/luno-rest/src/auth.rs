//! API key credentials
//!
//! Luno authenticates private endpoints with HTTP Basic auth over TLS: the
//! API key id is the username and the key secret the password.
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretString};

use crate::error::{RestError, RestResult};

/// Environment variable holding the API key id
pub const KEY_ID_ENV: &str = "LUNO_API_KEY_ID";

/// Environment variable holding the API key secret
pub const KEY_SECRET_ENV: &str = "LUNO_API_KEY_SECRET";

/// API key id and secret pair
pub struct Credentials {
    key_id: String,
    key_secret: SecretString,
}

impl Credentials {
    /// Create credentials from a key id and secret
    ///
    /// Both parts must be non-empty. The id may not contain `:` since it is
    /// sent as the Basic auth username.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> RestResult<Self> {
        let key_id = key_id.into();
        let key_secret = key_secret.into();

        if key_id.is_empty() {
            return Err(RestError::InvalidCredentials("empty API key id".to_string()));
        }
        if key_id.contains(':') {
            return Err(RestError::InvalidCredentials(
                "API key id must not contain ':'".to_string(),
            ));
        }
        if key_secret.is_empty() {
            return Err(RestError::InvalidCredentials(
                "empty API key secret".to_string(),
            ));
        }

        Ok(Self {
            key_id,
            key_secret: SecretString::from(key_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `LUNO_API_KEY_ID` and `LUNO_API_KEY_SECRET` from the environment.
    pub fn from_env() -> RestResult<Self> {
        let key_id = std::env::var(KEY_ID_ENV)
            .map_err(|_| RestError::EnvVarNotSet(KEY_ID_ENV.to_string()))?;
        let key_secret = std::env::var(KEY_SECRET_ENV)
            .map_err(|_| RestError::EnvVarNotSet(KEY_SECRET_ENV.to_string()))?;

        Self::new(key_id, key_secret)
    }

    /// Get the API key id
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Get the API key secret
    pub fn expose_secret(&self) -> &str {
        self.key_secret.expose_secret()
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            key_id: self.key_id.clone(),
            key_secret: SecretString::from(self.key_secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .finish()
    }
}
