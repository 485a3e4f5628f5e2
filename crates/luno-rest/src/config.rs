//! Client configuration

use std::fmt;
use std::path::Path;

use luno_types::Pair;

use crate::auth::Credentials;
use crate::error::{ConfigError, RestResult};

/// Production API host
pub const DEFAULT_HOSTNAME: &str = "api.luno.com";

/// HTTPS port
pub const DEFAULT_PORT: u16 = 443;

/// Pair used by market and order endpoints when none is given
pub const DEFAULT_PAIR: &str = Pair::XBTZAR;

/// Client signature sent as `User-Agent`
pub const DEFAULT_USER_AGENT: &str = concat!("luno-rest/", env!("CARGO_PKG_VERSION"));

/// URL scheme for the API host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// TLS (the only scheme Luno serves)
    #[default]
    Https,
    /// Plain HTTP, for local gateways and test servers
    Http,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Https => write!(f, "https"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Client configuration
///
/// Fixed once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host name
    pub hostname: String,
    /// API port
    pub port: u16,
    /// URL scheme
    pub scheme: Scheme,
    /// PEM trust anchor replacing the system roots
    pub ca_pem: Option<Vec<u8>>,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Default trading pair
    pub pair: String,
    /// User agent
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_PORT,
            scheme: Scheme::default(),
            ca_pem: None,
            credentials: None,
            pair: DEFAULT_PAIR.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API host
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Set the API port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the URL scheme
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Trust only the given PEM certificate for TLS
    pub fn with_ca_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_pem = Some(pem.into());
        self
    }

    /// Trust only the PEM certificate stored at `path`
    pub fn with_ca_file(self, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let pem = std::fs::read(path)?;
        Ok(self.with_ca_pem(pem))
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the default trading pair
    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = pair.into();
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check the configuration before building a client
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigError::EmptyHostname);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        self.pair.parse::<Pair>()?;
        Ok(())
    }

    /// Scheme, host and port every request path is appended to
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.hostname, self.port)
    }

    /// Load credentials from the environment into this configuration
    pub fn with_env_credentials(self) -> RestResult<Self> {
        Ok(self.with_credentials(Credentials::from_env()?))
    }
}
