//! REST API client for the Luno cryptocurrency exchange
//!
//! This crate provides an async client for Luno's REST API, covering market
//! data, orders, balances and funding.
//!
//! # Features
//!
//! - **Market Data**: Tickers, order book, recent trades
//! - **Trading**: Limit and market orders, order and trade history, fees
//! - **Account**: Balances and transactions
//! - **Funding**: Receive addresses and withdrawals
//!
//! # Authentication
//!
//! Private endpoints take an API key id and secret, sent as HTTP Basic auth
//! over TLS.
//!
//! # Example
//!
//! ```no_run
//! use luno_rest::{Credentials, LunoClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints
//!     let client = LunoClient::new()?;
//!     let ticker = client.get_ticker(None).await?;
//!     println!("XBT/ZAR: {}", ticker);
//!
//!     // Private endpoints
//!     let creds = Credentials::from_env()?;
//!     let auth_client = LunoClient::with_credentials(creds)?;
//!     let balance = auth_client.get_balance(None).await?;
//!     println!("Balances: {}", balance);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! The client never throttles. It counts the calls it sent in the trailing
//! 60 seconds and exposes the count through
//! [`LunoClient::api_call_rate`] so callers can pace themselves. When Luno
//! rejects a call for exceeding its limit, the error carries that count and
//! the rejected call is not counted.

pub mod auth;
pub mod callback;
pub mod client;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod rate_tracker;

// Re-export main types
pub use auth::Credentials;
pub use callback::spawn_with_callback;
pub use client::LunoClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClientConfig, Scheme};
pub use dispatch::{Dispatcher, Method};
pub use error::{ApiError, ConfigError, RestError, RestResult};
pub use rate_tracker::RateTracker;

// Re-export shared types
pub use luno_types::{ErrorCategory, LunoErrorCode, Pair, ParamValue, Params};
