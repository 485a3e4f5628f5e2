//! Funding endpoints for deposits and withdrawals
//!
//! These endpoints require credentials.

use luno_types::{ParamValue, Params};
use serde_json::Value;
use tracing::instrument;

use crate::dispatch::{Dispatcher, Method};
use crate::error::RestResult;

/// Funding endpoints for deposits and withdrawals
pub struct FundingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> FundingEndpoints<'a> {
    /// Bind the endpoints to a dispatcher
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get the receive address for an asset
    ///
    /// # Arguments
    /// * `asset` - Asset code (e.g. "XBT")
    /// * `options` - e.g. `address` to look up a specific address
    #[instrument(skip(self))]
    pub async fn get_funding_address(
        &self,
        asset: &str,
        options: Option<Params>,
    ) -> RestResult<Value> {
        let params = Params::new().with("asset", asset).merge(options);

        self.dispatcher
            .dispatch(Method::Get, "/api/1/funding_address", params)
            .await
    }

    /// Create a new receive address for an asset
    #[instrument(skip(self))]
    pub async fn create_funding_address(&self, asset: &str) -> RestResult<Value> {
        self.dispatcher
            .dispatch(
                Method::Post,
                "/api/1/funding_address",
                Params::new().with("asset", asset),
            )
            .await
    }

    /// List withdrawal requests
    #[instrument(skip(self))]
    pub async fn get_withdrawals(&self) -> RestResult<Value> {
        self.dispatcher
            .dispatch(Method::Get, "/api/1/withdrawals/", Params::new())
            .await
    }

    /// Get one withdrawal request
    #[instrument(skip(self))]
    pub async fn get_withdrawal(&self, id: &str) -> RestResult<Value> {
        let path = format!("/api/1/withdrawals/{}", id);
        self.dispatcher
            .dispatch(Method::Get, &path, Params::new())
            .await
    }

    /// Request a withdrawal
    ///
    /// # Arguments
    /// * `withdrawal_type` - Withdrawal type, e.g. "ZAR_EFT"
    /// * `amount` - Amount to withdraw
    #[instrument(skip(self, amount))]
    pub async fn request_withdrawal(
        &self,
        withdrawal_type: &str,
        amount: impl Into<ParamValue>,
    ) -> RestResult<Value> {
        let params = Params::new()
            .with("type", withdrawal_type)
            .with("amount", amount);

        self.dispatcher
            .dispatch(Method::Post, "/api/1/withdrawals/", params)
            .await
    }

    /// Cancel a pending withdrawal request
    #[instrument(skip(self))]
    pub async fn cancel_withdrawal(&self, id: &str) -> RestResult<Value> {
        let path = format!("/api/1/withdrawals/{}", id);
        self.dispatcher
            .dispatch(Method::Delete, &path, Params::new())
            .await
    }
}
