//! Trading endpoints for order management
//!
//! These endpoints require credentials.

use luno_types::{ParamValue, Params};
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::{Dispatcher, Method};
use crate::error::RestResult;

/// Limit order side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSide {
    /// Buy
    Bid,
    /// Sell
    Ask,
}

impl LimitSide {
    /// Wire name sent as `type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bid => "BID",
            Self::Ask => "ASK",
        }
    }
}

/// Market order side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketSide {
    /// Spend counter currency
    Buy,
    /// Sell base currency
    Sell,
}

impl MarketSide {
    /// Wire name sent as `type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Field carrying the order volume for this side
    pub fn volume_field(&self) -> &'static str {
        match self {
            Self::Buy => "counter_volume",
            Self::Sell => "base_volume",
        }
    }
}

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
    pair: &'a str,
}

impl<'a> TradingEndpoints<'a> {
    /// Bind the endpoints to a dispatcher, defaulting to `pair`
    pub fn new(dispatcher: &'a Dispatcher, pair: &'a str) -> Self {
        Self { dispatcher, pair }
    }

    fn with_pair(&self, options: Option<Params>) -> Params {
        Params::new().with("pair", self.pair).merge(options)
    }

    /// List orders
    ///
    /// # Arguments
    /// * `options` - e.g. `state` ("PENDING" or "COMPLETE") or `pair`
    #[instrument(skip(self))]
    pub async fn get_order_list(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/listorders", self.with_pair(options))
            .await
    }

    /// List orders through the v2 exchange API
    #[instrument(skip(self))]
    pub async fn get_order_list_v2(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(
                Method::Get,
                "/api/exchange/2/listorders",
                self.with_pair(options),
            )
            .await
    }

    /// List the caller's trades
    #[instrument(skip(self))]
    pub async fn get_trade_list(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/listtrades", self.with_pair(options))
            .await
    }

    /// Get fee information and trading volume for a pair
    #[instrument(skip(self))]
    pub async fn get_fee_info(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/fee_info", self.with_pair(options))
            .await
    }

    /// Place a limit order
    #[instrument(skip(self, volume, price))]
    pub async fn post_limit_order(
        &self,
        side: LimitSide,
        volume: impl Into<ParamValue>,
        price: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("type", side.as_str())
            .with("volume", volume)
            .with("price", price)
            .with("pair", self.pair)
            .merge(options);

        self.dispatcher
            .dispatch(Method::Post, "/api/1/postorder", params)
            .await
    }

    /// Place a limit buy order
    pub async fn post_buy_order(
        &self,
        volume: impl Into<ParamValue>,
        price: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        self.post_limit_order(LimitSide::Bid, volume, price, options)
            .await
    }

    /// Place a limit sell order
    pub async fn post_sell_order(
        &self,
        volume: impl Into<ParamValue>,
        price: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        self.post_limit_order(LimitSide::Ask, volume, price, options)
            .await
    }

    /// Place a market order
    ///
    /// A buy spends `volume` of the counter currency, a sell disposes of
    /// `volume` of the base currency.
    #[instrument(skip(self, volume))]
    pub async fn post_market_order(
        &self,
        side: MarketSide,
        volume: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("type", side.as_str())
            .with(side.volume_field(), volume)
            .with("pair", self.pair)
            .merge(options);

        self.dispatcher
            .dispatch(Method::Post, "/api/1/marketorder", params)
            .await
    }

    /// Place a market buy order spending `counter_volume`
    pub async fn post_market_buy_order(
        &self,
        counter_volume: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        self.post_market_order(MarketSide::Buy, counter_volume, options)
            .await
    }

    /// Place a market sell order for `base_volume`
    pub async fn post_market_sell_order(
        &self,
        base_volume: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        self.post_market_order(MarketSide::Sell, base_volume, options)
            .await
    }

    /// Request that an order be stopped
    #[instrument(skip(self))]
    pub async fn stop_order(&self, order_id: &str) -> RestResult<Value> {
        self.dispatcher
            .dispatch(
                Method::Post,
                "/api/1/stoporder",
                Params::new().with("order_id", order_id),
            )
            .await
    }

    /// Get an order by id
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: &str) -> RestResult<Value> {
        let path = format!("/api/1/orders/{}", id);
        self.dispatcher
            .dispatch(Method::Get, &path, Params::new())
            .await
    }

    /// Get an order by id through the v2 exchange API
    #[instrument(skip(self))]
    pub async fn get_order_v2(&self, id: &str) -> RestResult<Value> {
        let path = format!("/api/exchange/2/orders/{}", id);
        self.dispatcher
            .dispatch(Method::Get, &path, Params::new())
            .await
    }

    /// Get an order through the v3 exchange API
    ///
    /// # Arguments
    /// * `options` - `id` or `client_order_id` identifying the order
    #[instrument(skip(self))]
    pub async fn get_order_v3(&self, options: Option<Params>) -> RestResult<Value> {
        self.dispatcher
            .dispatch(
                Method::Get,
                "/api/exchange/3/order",
                Params::new().merge(options),
            )
            .await
    }
}
