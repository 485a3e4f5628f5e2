//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use luno_types::Params;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::{Dispatcher, Method};
use crate::error::RestResult;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    dispatcher: &'a Dispatcher,
    pair: &'a str,
}

impl<'a> MarketEndpoints<'a> {
    /// Bind the endpoints to a dispatcher, defaulting to `pair`
    pub fn new(dispatcher: &'a Dispatcher, pair: &'a str) -> Self {
        Self { dispatcher, pair }
    }

    fn with_pair(&self, options: Option<Params>) -> Params {
        Params::new().with("pair", self.pair).merge(options)
    }

    /// Get the ticker for a pair
    ///
    /// # Arguments
    /// * `options` - Extra query fields; `pair` overrides the default pair
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/ticker", self.with_pair(options))
            .await
    }

    /// Get tickers for every active pair
    #[instrument(skip(self))]
    pub async fn get_all_tickers(&self) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/tickers", Params::new())
            .await
    }

    /// Get the top of the order book
    #[instrument(skip(self))]
    pub async fn get_order_book(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/orderbook", self.with_pair(options))
            .await
    }

    /// Get recent trades
    ///
    /// # Arguments
    /// * `options` - e.g. `since` (Unix ms) to page through history
    #[instrument(skip(self))]
    pub async fn get_trades(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/trades", self.with_pair(options))
            .await
    }
}
