//! Shared types for the Luno REST client
//!
//! This crate holds the pieces of the client that do not touch the network.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`CallWindow`] - Rolling one-minute window of call timestamps
//! - [`Params`], [`ParamValue`] - Ordered form parameter bags
//! - [`LunoErrorCode`], [`ErrorCategory`] - Luno API error vocabulary
//! - [`Pair`] - Trading pair codes (e.g. "XBTZAR")

pub mod error_codes;
pub mod pair;
pub mod params;
pub mod rate_window;

// Re-export commonly used types
pub use error_codes::*;
pub use pair::*;
pub use params::*;
pub use rate_window::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
