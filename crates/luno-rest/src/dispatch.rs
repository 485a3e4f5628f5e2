//! Request dispatch and response classification
//!
//! [`Dispatcher`] sends exactly one HTTP request per call and turns the
//! outcome into exactly one [`RestResult`]. Every request is counted in the
//! client's [`RateTracker`] just before it is sent; a request Luno rejects for
//! exceeding its rate limit is taken back out, so it does not count twice
//! against the caller's visible rate.
//!
//! Nothing here retries. Every failure reaches the caller as a single error
//! value and the dispatcher stays usable afterwards.

use std::fmt;

use luno_types::{is_rate_limit_code, Params};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_CHARSET, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Certificate, Client};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{ApiError, RestError, RestResult};
use crate::rate_tracker::RateTracker;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP methods used by the Luno API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Whether parameters travel in the query string rather than the body
    pub fn uses_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }

    fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

/// How a complete response was interpreted
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// 200 with a JSON body and no `error` field
    Success(Value),
    /// Luno rejected the request in a well-formed body
    Rejected {
        code: Option<String>,
        message: String,
    },
    /// Non-200 whose `error_code` marks a rate-limit rejection
    RateLimited { code: String, message: String },
    /// Body was not the JSON shape expected for the status
    Malformed,
}

/// Interpret a complete response
///
/// Non-200 responses must carry an `error_code` to count as an API error;
/// anything else is malformed. A 200 response is an error only when its
/// `error` field is truthy.
pub fn classify(status: u16, body: &str) -> Classification {
    let Ok(payload) = serde_json::from_str::<Value>(body) else {
        return Classification::Malformed;
    };

    if status != 200 {
        let Some(code) = payload.get("error_code").and_then(Value::as_str) else {
            return Classification::Malformed;
        };
        let message = error_message(payload.get("error"));

        return if is_rate_limit_code(code) {
            Classification::RateLimited {
                code: code.to_string(),
                message,
            }
        } else {
            Classification::Rejected {
                code: Some(code.to_string()),
                message,
            }
        };
    }

    match payload.get("error") {
        Some(error) if is_truthy(error) => Classification::Rejected {
            code: payload
                .get("error_code")
                .and_then(Value::as_str)
                .map(str::to_string),
            message: error_message(Some(error)),
        },
        _ => Classification::Success(payload),
    }
}

fn error_message(error: Option<&Value>) -> String {
    match error {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Sends authenticated requests and classifies their responses
#[derive(Clone)]
pub struct Dispatcher {
    http: Client,
    base_url: String,
    credentials: Option<Credentials>,
    tracker: RateTracker,
}

impl Dispatcher {
    /// Build a dispatcher for `config`, counting calls in `tracker`
    pub fn new(config: &ClientConfig, tracker: RateTracker) -> RestResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str());

        if let Some(pem) = &config.ca_pem {
            let certificate = Certificate::from_pem(pem).map_err(RestError::InvalidCertificate)?;
            builder = builder
                .tls_built_in_root_certs(false)
                .add_root_certificate(certificate);
        }

        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            credentials: config.credentials.clone(),
            tracker,
        })
    }

    /// Rate tracker this dispatcher counts calls in
    pub fn tracker(&self) -> &RateTracker {
        &self.tracker
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and classify the result
    ///
    /// GET and DELETE carry `params` as a query string; POST and PUT as a
    /// form body. Empty parameters add neither a `?` nor a body.
    #[instrument(skip(self, params), fields(method = %method, path = %path))]
    pub async fn dispatch(&self, method: Method, path: &str, params: Params) -> RestResult<Value> {
        let encoded = params
            .encode()
            .map_err(|e| RestError::InvalidParameter(e.to_string()))?;

        let mut target = path.to_string();
        if method.uses_query() && !encoded.is_empty() {
            target.push('?');
            target.push_str(&encoded);
        }

        let url = format!("{}{}", self.base_url, target);
        let mut request = self.http.request(method.as_reqwest(), &url);

        if !method.uses_query() && !encoded.is_empty() {
            request = request
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .header(CONTENT_LENGTH, encoded.len())
                .body(encoded);
        }

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(credentials.key_id(), Some(credentials.expose_secret()));
        }

        let stamp = self.tracker.record();
        debug!(target: "luno_rest::req", "{} {}", method, target);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(target: "luno_rest::res", status, "{}", body);

        match classify(status, &body) {
            Classification::Success(payload) => Ok(payload),
            Classification::Rejected { code, message } => Err(RestError::Api(ApiError {
                status,
                code,
                message,
                call_rate: None,
            })),
            Classification::RateLimited { code, message } => {
                self.tracker.retract(stamp);
                let call_rate = self.tracker.count();
                warn!(%code, call_rate, "Rate limited by Luno");

                Err(RestError::Api(ApiError {
                    status,
                    code: Some(code),
                    message,
                    call_rate: Some(call_rate),
                }))
            }
            Classification::Malformed => Err(RestError::Malformed { status, body }),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_returns_payload_verbatim() {
        let body = r#"{"timestamp":1366224386716,"bid":"924.00","ask":"1050.00"}"#;
        assert_eq!(
            classify(200, body),
            Classification::Success(json!({
                "timestamp": 1366224386716u64,
                "bid": "924.00",
                "ask": "1050.00"
            }))
        );
    }

    #[test]
    fn test_unparsable_200_is_malformed() {
        assert_eq!(classify(200, "invalid"), Classification::Malformed);
        assert_eq!(classify(200, ""), Classification::Malformed);
    }

    #[test]
    fn test_200_with_error_field_is_rejected() {
        let body = r#"{"error":"order would exceed limits"}"#;
        assert_eq!(
            classify(200, body),
            Classification::Rejected {
                code: None,
                message: "order would exceed limits".to_string(),
            }
        );

        let flagged = classify(200, r#"{"error":true}"#);
        assert!(matches!(flagged, Classification::Rejected { .. }));
    }

    #[test]
    fn test_200_with_falsy_error_is_success() {
        assert!(matches!(
            classify(200, r#"{"error":"","success":true}"#),
            Classification::Success(_)
        ));
        assert!(matches!(
            classify(200, r#"{"error":null}"#),
            Classification::Success(_)
        ));
    }

    #[test]
    fn test_rate_limit_codes() {
        let body = r#"{"error_code":"ErrTooManyRequests","error":"Too many requests"}"#;
        assert_eq!(
            classify(429, body),
            Classification::RateLimited {
                code: "ErrTooManyRequests".to_string(),
                message: "Too many requests".to_string(),
            }
        );

        let numeric = classify(429, r#"{"error_code":"429","error":"slow down"}"#);
        assert!(matches!(numeric, Classification::RateLimited { .. }));
    }

    #[test]
    fn test_non_200_with_code_is_rejected() {
        let body = r#"{"error_code":"ErrUnauthorised","error":"Unauthorised"}"#;
        assert_eq!(
            classify(401, body),
            Classification::Rejected {
                code: Some("ErrUnauthorised".to_string()),
                message: "Unauthorised".to_string(),
            }
        );
    }

    #[test]
    fn test_non_200_without_code_is_malformed() {
        assert_eq!(classify(401, "null"), Classification::Malformed);
        assert_eq!(classify(500, r#"{"error":"boom"}"#), Classification::Malformed);
        assert_eq!(classify(502, "<html>Bad Gateway</html>"), Classification::Malformed);
    }

    #[test]
    fn test_method_placement() {
        assert!(Method::Get.uses_query());
        assert!(Method::Delete.uses_query());
        assert!(!Method::Post.uses_query());
        assert!(!Method::Put.uses_query());
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
