//! Trading pair codes (XBTZAR format)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Luno trading pair code
///
/// Luno writes pairs as the base and counter asset codes run together with
/// no separator, e.g. `XBTZAR` (Bitcoin priced in Rand).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pair(String);

impl Pair {
    /// Bitcoin / South African Rand, the exchange's default market
    pub const XBTZAR: &'static str = "XBTZAR";
    /// Ethereum / South African Rand
    pub const ETHZAR: &'static str = "ETHZAR";
    /// Bitcoin / Euro
    pub const XBTEUR: &'static str = "XBTEUR";
    /// Bitcoin / Nigerian Naira
    pub const XBTNGN: &'static str = "XBTNGN";
    /// Ethereum / Bitcoin
    pub const ETHXBT: &'static str = "ETHXBT";

    /// Create a pair without validation
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the pair as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into base and counter codes for the common three-letter case
    pub fn split(&self) -> Option<(&str, &str)> {
        if self.0.len() == 6 {
            Some(self.0.split_at(3))
        } else {
            None
        }
    }
}

impl Default for Pair {
    fn default() -> Self {
        Self::new(Self::XBTZAR)
    }
}

impl FromStr for Pair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PairParseError::Empty);
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(PairParseError::InvalidCharacters(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Pair {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Pair {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Pair {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Error parsing a pair code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairParseError {
    #[error("Pair code is empty")]
    Empty,

    #[error("Pair code must be uppercase letters and digits: {0}")]
    InvalidCharacters(String),
}
