//! Integration tests for the OpenVerse dispatch client.
//!
//! Each test spins up an in-process mock backend on an ephemeral port and
//! points a [`DispatchClient`] at it, so the full pipeline (method
//! validation, route resolution, URL construction, the HTTP call, and
//! response normalization) is exercised without any external service.

use std::net::SocketAddr;
use std::sync::{Arc, Once};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use openverse_dispatch::{DispatchClient, PortRegistry};
use openverse_routes::ServiceId;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method string.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// `content-type` header, if any.
    pub content_type: Option<String>,
    /// All request headers.
    pub headers: http::HeaderMap,
    /// Raw request body bytes.
    pub body: Bytes,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    #[must_use]
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("recorded body should be JSON")
    }

    /// The recorded body as a UTF-8 string.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A canned backend reply.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Artificial delay before replying.
    pub delay: Option<Duration>,
}

impl CannedResponse {
    /// A JSON reply with the given status.
    #[must_use]
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            body: value.to_string(),
            delay: None,
        }
    }

    /// A raw (possibly non-JSON) reply with the given status.
    #[must_use]
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    /// Delay the reply.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = dyn Fn(&RecordedRequest) -> CannedResponse + Send + Sync;

/// An in-process HTTP backend serving canned responses.
pub struct MockBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl std::fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockBackend")
            .field("addr", &self.addr)
            .field("requests", &self.requests.lock().len())
            .finish()
    }
}

impl MockBackend {
    /// Spawn a backend on an ephemeral port.
    pub async fn spawn(
        responder: impl Fn(&RecordedRequest) -> CannedResponse + Send + Sync + 'static,
    ) -> Self {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let responder: Arc<Responder> = Arc::new(responder);
        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let recorded = recorded.clone();
                let responder = responder.clone();
                tokio::spawn(async move {
                    let service = hyper::service::service_fn(move |req: Request<Incoming>| {
                        let recorded = recorded.clone();
                        let responder = responder.clone();
                        async move {
                            let reply = handle(&recorded, &*responder, req).await;
                            Ok::<_, std::convert::Infallible>(reply)
                        }
                    });
                    let _ = hyper::server::conn::http1::Builder::new()
                        .serve_connection(io, service)
                        .await;
                });
            }
        });

        Self { addr, requests }
    }

    /// The port the backend listens on.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// All requests the backend has seen so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("backend received no request")
    }
}

async fn handle(
    recorded: &Mutex<Vec<RecordedRequest>>,
    responder: &Responder,
    req: Request<Incoming>,
) -> Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();
    let bytes = body
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();

    let request = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_owned(),
        query: parts.uri.query().map(ToOwned::to_owned),
        content_type: parts
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
        headers: parts.headers.clone(),
        body: bytes,
    };
    recorded.lock().push(request.clone());

    let canned = responder(&request);
    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    Response::builder()
        .status(canned.status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(canned.body)))
        .expect("valid canned response")
}

/// A dispatch client pointed at the mock backend, with every service
/// registered on the backend's port.
#[must_use]
pub fn backend_client(backend: &MockBackend) -> DispatchClient {
    let registry = ServiceId::ALL
        .into_iter()
        .fold(PortRegistry::new(), |registry, service| {
            registry.with_port(service, backend.port())
        });
    DispatchClient::from_parts("127.0.0.1", registry, Duration::from_secs(2))
}

mod test_dispatch;
