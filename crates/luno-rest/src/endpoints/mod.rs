//! API endpoint groups
//!
//! Each group assembles parameters for a fixed set of Luno endpoints and
//! hands them to the [`Dispatcher`](crate::dispatch::Dispatcher). Payloads
//! come back as the JSON Luno sent, untouched.

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;
