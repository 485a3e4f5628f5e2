//! Main REST client implementation

use std::fmt;
use std::sync::Arc;

use luno_types::{ParamValue, Params};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::info;

use crate::auth::Credentials;
use crate::callback::spawn_with_callback;
use crate::config::ClientConfig;
use crate::dispatch::{Dispatcher, Method};
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::RestResult;
use crate::rate_tracker::RateTracker;

/// Luno REST API client
///
/// Cheap to clone; clones share one connection pool and one rate window.
///
/// # Example
///
/// ```no_run
/// use luno_rest::{Credentials, LunoClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = LunoClient::new()?;
///     let ticker = client.get_ticker(None).await?;
///     println!("XBT/ZAR: {}", ticker);
///
///     let auth_client = LunoClient::with_credentials(Credentials::from_env()?)?;
///     let balance = auth_client.get_balance(Some("XBT")).await?;
///     println!("Balance: {}", balance);
///     println!("Calls in the last minute: {}", auth_client.api_call_rate());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LunoClient {
    dispatcher: Dispatcher,
    config: Arc<ClientConfig>,
}

impl LunoClient {
    /// Create a client for the production host without credentials
    ///
    /// Private endpoints are still callable; Luno rejects them with an
    /// `ErrUnauthorised` API error.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client for the production host with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        Self::with_tracker(config, RateTracker::new())
    }

    /// Create a client counting calls in the given tracker
    pub fn with_tracker(config: ClientConfig, tracker: RateTracker) -> RestResult<Self> {
        config.validate()?;
        let dispatcher = Dispatcher::new(&config, tracker)?;

        info!(
            base_url = dispatcher.base_url(),
            pair = %config.pair,
            authenticated = config.credentials.is_some(),
            "Created Luno REST client"
        );

        Ok(Self {
            dispatcher,
            config: Arc::new(config),
        })
    }

    /// Calls sent in the trailing 60 seconds
    ///
    /// Calls Luno rejected for exceeding its rate limit are not counted.
    pub fn api_call_rate(&self) -> usize {
        self.dispatcher.tracker().count()
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Default trading pair
    pub fn pair(&self) -> &str {
        &self.config.pair
    }

    /// Check if the client sends credentials
    pub fn has_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    /// Send a request to any path
    pub async fn dispatch(&self, method: Method, path: &str, params: Params) -> RestResult<Value> {
        self.dispatcher.dispatch(method, path, params).await
    }

    /// Send a request in the background and report the result to `callback`
    ///
    /// The callback runs exactly once. Aborting the returned handle before
    /// the response arrives delivers [`RestError::Cancelled`](crate::error::RestError::Cancelled).
    pub fn request_with_callback<F>(
        &self,
        method: Method,
        path: impl Into<String>,
        params: Params,
        callback: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(RestResult<Value>) + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let path = path.into();

        spawn_with_callback(
            async move { dispatcher.dispatch(method, &path, params).await },
            callback,
        )
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.dispatcher, &self.config.pair)
    }

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(&self.dispatcher, &self.config.pair)
    }

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(&self.dispatcher)
    }

    /// Get funding endpoints
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(&self.dispatcher)
    }

    // ========================================================================
    // Shortcuts
    // ========================================================================

    /// Get the ticker for the default pair, or `pair` in `options`
    pub async fn get_ticker(&self, options: Option<Params>) -> RestResult<Value> {
        self.market().get_ticker(options).await
    }

    /// Get account balances, optionally for one asset
    pub async fn get_balance(&self, asset: Option<&str>) -> RestResult<Value> {
        self.account().get_balance(asset).await
    }

    /// Place a limit buy order on the default pair
    pub async fn post_buy_order(
        &self,
        volume: impl Into<ParamValue>,
        price: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        self.trading().post_buy_order(volume, price, options).await
    }

    /// Place a limit sell order on the default pair
    pub async fn post_sell_order(
        &self,
        volume: impl Into<ParamValue>,
        price: impl Into<ParamValue>,
        options: Option<Params>,
    ) -> RestResult<Value> {
        self.trading().post_sell_order(volume, price, options).await
    }

    /// Stop an order
    pub async fn stop_order(&self, order_id: &str) -> RestResult<Value> {
        self.trading().stop_order(order_id).await
    }
}

impl fmt::Debug for LunoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LunoClient")
            .field("base_url", &self.dispatcher.base_url())
            .field("pair", &self.config.pair)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}
