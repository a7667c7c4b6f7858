//! In-process HTTP server used by the probe, dispatch and report tests.

use std::convert::Infallible;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// What the test server answers to every request. The request method is
/// always echoed back in an `X-Method` header.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    delay: Duration,
}

impl CannedResponse {
    pub fn ok() -> Self {
        Self::status(200)
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn respond(&self, req: Request<Incoming>) -> Response<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut builder = Response::builder()
            .status(self.status)
            .header("x-method", req.method().as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(String::from("canned")).unwrap()
    }
}

async fn bind() -> Option<TcpListener> {
    match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => Some(listener),
        // Some sandboxed environments disallow binding; callers skip the test.
        Err(e) if e.kind() == ErrorKind::PermissionDenied => None,
        Err(e) => panic!("Failed to bind test listener: {e}"),
    }
}

/// Starts a server answering every request with `canned`.
pub async fn serve(canned: CannedResponse) -> Option<SocketAddr> {
    let listener = bind().await?;
    let addr = listener.local_addr().unwrap();
    let canned = Arc::new(canned);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let canned = Arc::clone(&canned);
            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let canned = Arc::clone(&canned);
                    async move { Ok::<_, Infallible>(canned.respond(req).await) }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    Some(addr)
}

/// A local port with nothing listening on it.
pub async fn closed_port() -> Option<u16> {
    let listener = bind().await?;
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Some(port)
}

/// Client that never goes through a proxy picked up from the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
