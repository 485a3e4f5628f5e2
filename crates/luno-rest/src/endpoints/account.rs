//! Private account endpoints
//!
//! These endpoints require credentials; without them Luno answers with an
//! `ErrUnauthorised` API error.

use luno_types::Params;
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::{Dispatcher, Method};
use crate::error::RestResult;

/// Transactions returned per page when no `limit` is given
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 10;

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AccountEndpoints<'a> {
    /// Bind the endpoints to a dispatcher
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get account balances
    ///
    /// # Arguments
    /// * `asset` - Only return balances for this asset (e.g. "XBT")
    #[instrument(skip(self))]
    pub async fn get_balance(&self, asset: Option<&str>) -> RestResult<Value> {
        let params = match asset {
            Some(asset) => Params::new().with("asset", asset),
            None => Params::new(),
        };

        self.dispatcher
            .dispatch(Method::Get, "/api/1/balance", params)
            .await
    }

    /// Get transactions for an asset's account
    ///
    /// Starts at offset 0 with a page of [`DEFAULT_TRANSACTION_LIMIT`];
    /// `options` may override either.
    #[instrument(skip(self))]
    pub async fn get_transactions(
        &self,
        asset: &str,
        options: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("asset", asset)
            .with("offset", 0u32)
            .with("limit", DEFAULT_TRANSACTION_LIMIT)
            .merge(options);

        self.dispatcher
            .dispatch(Method::Get, "/api/1/transactions", params)
            .await
    }
}
