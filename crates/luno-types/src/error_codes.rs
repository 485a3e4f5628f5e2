//! Luno API error code vocabulary
//!
//! Luno reports failures as a JSON body carrying an `error_code` (for example
//! `ErrTooManyRequests`) and a human-readable `error`. This module names the
//! codes callers commonly branch on and groups them into categories.

use std::fmt;

/// Markers that identify a rate-limit rejection inside an error code
///
/// Matching is by substring. Luno has reported both the bare HTTP status and
/// the `ErrTooManyRequests` code here; a change to that vocabulary upstream
/// would silently stop rate-limit detection.
pub const RATE_LIMIT_MARKERS: [&str; 2] = ["429", "ErrTooManyRequests"];

/// Whether an `error_code` string signals a rate-limit rejection
pub fn is_rate_limit_code(code: &str) -> bool {
    RATE_LIMIT_MARKERS.iter().any(|marker| code.contains(marker))
}

/// Broad grouping of Luno error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Too many calls in the rolling window
    RateLimit,
    /// Missing, invalid or under-privileged API key
    Auth,
    /// Order placement or lookup problems
    Order,
    /// Deposits, withdrawals and balances
    Funding,
    /// Malformed or out-of-range arguments
    Validation,
    /// Exchange-side failure
    Server,
    /// Code not recognised by this crate
    Unknown,
}

/// Known Luno error codes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LunoErrorCode {
    /// ErrTooManyRequests
    TooManyRequests,
    /// ErrUnauthorised
    Unauthorised,
    /// ErrApiKeyRevoked
    ApiKeyRevoked,
    /// ErrInsufficientPerms
    InsufficientPermissions,
    /// ErrIPNotAllowed
    IpNotAllowed,
    /// ErrInsufficientBalance
    InsufficientBalance,
    /// ErrInsufficientFunds
    InsufficientFunds,
    /// ErrOrderNotFound
    OrderNotFound,
    /// ErrOrderCanceled
    OrderCanceled,
    /// ErrAmountTooSmall
    AmountTooSmall,
    /// ErrAmountTooBig
    AmountTooBig,
    /// ErrPriceTooSmall / ErrPriceTooBig / ErrPriceInvalid
    InvalidPrice,
    /// ErrVolumeTooSmall / ErrVolumeTooBig
    InvalidVolume,
    /// ErrMarketUnavailable
    MarketUnavailable,
    /// ErrPostOnlyMode
    PostOnlyMode,
    /// ErrInvalidPair / ErrUnknownPair
    InvalidPair,
    /// ErrInvalidCurrency / ErrUnknownAsset
    InvalidAsset,
    /// ErrInvalidArguments / ErrInvalidParameters
    InvalidArguments,
    /// ErrWithdrawalNotFound
    WithdrawalNotFound,
    /// ErrWithdrawalLimit
    WithdrawalLimit,
    /// ErrNotFound
    NotFound,
    /// ErrInternal / ErrServiceUnavailable
    Internal,
    /// Any other code, kept verbatim
    Other(String),
}

impl LunoErrorCode {
    /// Map an `error_code` string onto a known code
    pub fn parse(code: &str) -> Self {
        if is_rate_limit_code(code) {
            return Self::TooManyRequests;
        }

        match code {
            "ErrUnauthorised" | "ErrUnauthorized" | "401" => Self::Unauthorised,
            "ErrApiKeyRevoked" => Self::ApiKeyRevoked,
            "ErrInsufficientPerms" | "ErrPermissionDenied" | "403" => {
                Self::InsufficientPermissions
            }
            "ErrIPNotAllowed" => Self::IpNotAllowed,
            "ErrInsufficientBalance" => Self::InsufficientBalance,
            "ErrInsufficientFunds" => Self::InsufficientFunds,
            "ErrOrderNotFound" => Self::OrderNotFound,
            "ErrOrderCanceled" | "ErrOrderCancelled" => Self::OrderCanceled,
            "ErrAmountTooSmall" => Self::AmountTooSmall,
            "ErrAmountTooBig" => Self::AmountTooBig,
            "ErrPriceTooSmall" | "ErrPriceTooBig" | "ErrPriceInvalid" => Self::InvalidPrice,
            "ErrVolumeTooSmall" | "ErrVolumeTooBig" => Self::InvalidVolume,
            "ErrMarketUnavailable" => Self::MarketUnavailable,
            "ErrPostOnlyMode" => Self::PostOnlyMode,
            "ErrInvalidPair" | "ErrUnknownPair" => Self::InvalidPair,
            "ErrInvalidCurrency" | "ErrUnknownAsset" => Self::InvalidAsset,
            "ErrInvalidArguments" | "ErrInvalidParameters" | "ErrInvalidValues" => {
                Self::InvalidArguments
            }
            "ErrWithdrawalNotFound" => Self::WithdrawalNotFound,
            "ErrWithdrawalLimit" => Self::WithdrawalLimit,
            "ErrNotFound" | "404" => Self::NotFound,
            "ErrInternal" | "ErrServiceUnavailable" | "500" | "503" => Self::Internal,
            other => Self::Other(other.to_string()),
        }
    }

    /// Category of this code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TooManyRequests => ErrorCategory::RateLimit,
            Self::Unauthorised
            | Self::ApiKeyRevoked
            | Self::InsufficientPermissions
            | Self::IpNotAllowed => ErrorCategory::Auth,
            Self::OrderNotFound
            | Self::OrderCanceled
            | Self::MarketUnavailable
            | Self::PostOnlyMode => ErrorCategory::Order,
            Self::InsufficientBalance
            | Self::InsufficientFunds
            | Self::WithdrawalNotFound
            | Self::WithdrawalLimit => ErrorCategory::Funding,
            Self::AmountTooSmall
            | Self::AmountTooBig
            | Self::InvalidPrice
            | Self::InvalidVolume
            | Self::InvalidPair
            | Self::InvalidAsset
            | Self::InvalidArguments
            | Self::NotFound => ErrorCategory::Validation,
            Self::Internal => ErrorCategory::Server,
            Self::Other(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether this code is a rate-limit rejection
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::TooManyRequests)
    }

    /// Whether this code points at the API key rather than the request
    pub fn is_auth_error(&self) -> bool {
        self.category() == ErrorCategory::Auth
    }

    /// Whether resending the same request later can succeed
    ///
    /// Only informational: the client never retries on its own.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::TooManyRequests | Self::Internal | Self::MarketUnavailable
        )
    }

    /// Short description for logs
    pub fn description(&self) -> &str {
        match self {
            Self::TooManyRequests => "Too many requests in the rolling window",
            Self::Unauthorised => "API key missing or invalid",
            Self::ApiKeyRevoked => "API key has been revoked",
            Self::InsufficientPermissions => "API key lacks the required permission",
            Self::IpNotAllowed => "Request IP is not whitelisted for this key",
            Self::InsufficientBalance => "Insufficient balance",
            Self::InsufficientFunds => "Insufficient funds",
            Self::OrderNotFound => "Order not found",
            Self::OrderCanceled => "Order already cancelled",
            Self::AmountTooSmall => "Amount below the minimum",
            Self::AmountTooBig => "Amount above the maximum",
            Self::InvalidPrice => "Price out of range",
            Self::InvalidVolume => "Volume out of range",
            Self::MarketUnavailable => "Market is not currently trading",
            Self::PostOnlyMode => "Market only accepts post-only orders",
            Self::InvalidPair => "Unknown trading pair",
            Self::InvalidAsset => "Unknown asset",
            Self::InvalidArguments => "Invalid arguments",
            Self::WithdrawalNotFound => "Withdrawal not found",
            Self::WithdrawalLimit => "Withdrawal limit reached",
            Self::NotFound => "Resource not found",
            Self::Internal => "Exchange internal error",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for LunoErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::TooManyRequests => "ErrTooManyRequests",
            Self::Unauthorised => "ErrUnauthorised",
            Self::ApiKeyRevoked => "ErrApiKeyRevoked",
            Self::InsufficientPermissions => "ErrInsufficientPerms",
            Self::IpNotAllowed => "ErrIPNotAllowed",
            Self::InsufficientBalance => "ErrInsufficientBalance",
            Self::InsufficientFunds => "ErrInsufficientFunds",
            Self::OrderNotFound => "ErrOrderNotFound",
            Self::OrderCanceled => "ErrOrderCanceled",
            Self::AmountTooSmall => "ErrAmountTooSmall",
            Self::AmountTooBig => "ErrAmountTooBig",
            Self::InvalidPrice => "ErrPriceInvalid",
            Self::InvalidVolume => "ErrVolumeInvalid",
            Self::MarketUnavailable => "ErrMarketUnavailable",
            Self::PostOnlyMode => "ErrPostOnlyMode",
            Self::InvalidPair => "ErrInvalidPair",
            Self::InvalidAsset => "ErrInvalidCurrency",
            Self::InvalidArguments => "ErrInvalidArguments",
            Self::WithdrawalNotFound => "ErrWithdrawalNotFound",
            Self::WithdrawalLimit => "ErrWithdrawalLimit",
            Self::NotFound => "ErrNotFound",
            Self::Internal => "ErrInternal",
            Self::Other(code) => code,
        };
        write!(f, "{}", code)
    }
}
