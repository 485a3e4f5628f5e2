//! Common test utilities and fixtures for integration tests
//!
//! A minimal HTTP/1.1 server on a loopback port stands in for Luno. Each
//! connection serves one request, answers with the handler's status and body,
//! then closes. Every request it receives is recorded for inspection.
//!
//! The server can also speak TLS with a leaf certificate for `127.0.0.1`
//! issued by the test CA in `tests/fixtures/ca.pem`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use luno_rest::{ClientConfig, Credentials, LunoClient, Scheme};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_native_tls::native_tls::{self, Identity};
use tokio_native_tls::TlsAcceptor;

/// Test CA that issued the TLS server certificate
pub const TEST_CA_PEM: &[u8] = include_bytes!("../fixtures/ca.pem");

const SERVER_CERT_PEM: &[u8] = include_bytes!("../fixtures/server.pem");
const SERVER_KEY_PEM: &[u8] = include_bytes!("../fixtures/server.key");

/// Sample ticker response
pub const TICKER_RESPONSE: &str = r#"{
    "pair": "XBTZAR",
    "timestamp": 1366224386716,
    "bid": "924.00",
    "ask": "1050.00",
    "last_trade": "950.00",
    "rolling_24_hour_volume": "12.52",
    "status": "ACTIVE"
}"#;

/// Sample balance response
pub const BALANCE_RESPONSE: &str = r#"{
    "balance": [
        {"account_id": "12345", "asset": "XBT", "balance": "0.50", "reserved": "0.00", "unconfirmed": "0.00"}
    ]
}"#;

/// Sample order placement response
pub const ORDER_RESPONSE: &str = r#"{"order_id":"X"}"#;

/// Rate-limit rejection
pub const RATE_LIMITED_RESPONSE: &str =
    r#"{"error_code":"ErrTooManyRequests","error":"Too many requests"}"#;

/// Authentication rejection
pub const UNAUTHORISED_RESPONSE: &str =
    r#"{"error_code":"ErrUnauthorised","error":"Unauthorised"}"#;

/// Basic auth header for `keyId:keySecret`
pub const BASIC_AUTH_HEADER: &str = "Basic a2V5SWQ6a2V5U2VjcmV0";

/// A request as received by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string
    pub target: String,
    /// Header names are lower-cased
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }
}

type Handler = Arc<dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync>;

/// Loopback server impersonating the Luno API
pub struct MockLuno {
    addr: SocketAddr,
    scheme: Scheme,
    requests: mpsc::UnboundedReceiver<RecordedRequest>,
    task: JoinHandle<()>,
}

impl MockLuno {
    /// Serve every request with `handler`
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        Self::launch(Arc::new(handler), None).await
    }

    /// Serve every request with `handler` over TLS
    pub async fn start_tls<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let identity = Identity::from_pkcs8(SERVER_CERT_PEM, SERVER_KEY_PEM).unwrap();
        let acceptor = native_tls::TlsAcceptor::new(identity).unwrap();
        Self::launch(Arc::new(handler), Some(TlsAcceptor::from(acceptor))).await
    }

    async fn launch(handler: Handler, tls: Option<TlsAcceptor>) -> Self {
        let scheme = if tls.is_some() {
            Scheme::Https
        } else {
            Scheme::Http
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, requests) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let handler = handler.clone();
                let tx = tx.clone();
                let tls = tls.clone();
                tokio::spawn(async move {
                    match tls {
                        Some(acceptor) => {
                            // Handshake fails when the client rejects the certificate
                            if let Ok(stream) = acceptor.accept(stream).await {
                                serve(stream, handler, tx).await;
                            }
                        }
                        None => serve(stream, handler, tx).await,
                    }
                });
            }
        });

        Self {
            addr,
            scheme,
            requests,
            task,
        }
    }

    /// Answer every request with the same status and body
    pub async fn reply(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone())).await
    }

    /// Configuration pointing a client at this server
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_scheme(self.scheme)
            .with_hostname("127.0.0.1")
            .with_port(self.addr.port())
    }

    /// Client without credentials
    pub fn client(&self) -> LunoClient {
        LunoClient::with_config(self.config()).unwrap()
    }

    /// Client sending `keyId:keySecret`
    pub fn auth_client(&self) -> LunoClient {
        let creds = Credentials::new("keyId", "keySecret").unwrap();
        LunoClient::with_config(self.config().with_credentials(creds)).unwrap()
    }

    /// Next request the server received
    pub async fn next_request(&mut self) -> RecordedRequest {
        self.requests.recv().await.unwrap()
    }
}

impl Drop for MockLuno {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Configuration for a loopback port nothing listens on
pub async fn closed_port_config() -> ClientConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    ClientConfig::new()
        .with_scheme(Scheme::Http)
        .with_hostname("127.0.0.1")
        .with_port(port)
}

/// Configuration for a server that accepts connections but never answers
pub async fn stalled_config() -> (ClientConfig, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let task = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let config = ClientConfig::new()
        .with_scheme(Scheme::Http)
        .with_hostname("127.0.0.1")
        .with_port(port);

    (config, task)
}

async fn serve<S>(
    mut stream: S,
    handler: Handler,
    tx: mpsc::UnboundedSender<RecordedRequest>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let Some(request) = read_request(&mut stream).await else {
        return;
    };

    let (status, body) = handler(&request);
    let _ = tx.send(request);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

async fn read_request<S>(stream: &mut S) -> Option<RecordedRequest>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_lowercase(), value.trim().to_string()))
        .collect();

    let length = headers
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    }
}
