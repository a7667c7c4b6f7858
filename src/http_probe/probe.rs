use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use url::Url;

use super::endpoint::Endpoint;
use super::headers::select_headers;
use super::report;
use super::result::{ERROR_SENTINEL, ProbeResult};

/// Request method used for every probe in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Head,
    Get,
}

impl std::str::FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HEAD" => Ok(Self::Head),
            "GET" => Ok(Self::Get),
            _ => Err(()),
        }
    }
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "HEAD",
            Self::Get => "GET",
        }
    }

    fn to_method(self) -> Method {
        match self {
            Self::Head => Method::HEAD,
            Self::Get => Method::GET,
        }
    }
}

/// Immutable per-batch settings handed to every probe worker.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub method: HttpMethod,
    pub header_names: Arc<[String]>,
    /// Report the error text instead of [`ERROR_SENTINEL`] on failure.
    pub verbose: bool,
    pub timeout: Duration,
}

impl ProbeSettings {
    fn failure_summary(&self, err: &(dyn Error + 'static)) -> String {
        if self.verbose {
            report(err)
        } else {
            ERROR_SENTINEL.to_string()
        }
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_str(), reason),
        None => status.as_str().to_string(),
    }
}

/// Performs exactly one request against `endpoint` and reduces the outcome
/// into a [`ProbeResult`]. Never fails: errors become the status summary.
pub async fn probe_endpoint(
    client: &Client,
    endpoint: &Endpoint,
    settings: &ProbeSettings,
) -> ProbeResult {
    let url = endpoint.url.clone();

    let parsed = match Url::parse(&url) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("[{}] {url} is not a valid URL: {e}", endpoint.id);
            let summary = settings.failure_summary(&e);
            return ProbeResult::failure(endpoint.id, url, summary, Duration::ZERO);
        }
    };
    let host = parsed.host_str().unwrap_or_default().to_string();

    let request = client
        .request(settings.method.to_method(), parsed)
        .timeout(settings.timeout);

    let start = Instant::now();
    let response = request.send().await;
    let elapsed = start.elapsed();

    match response {
        Ok(response) => {
            let status = response.status();
            let header_values = select_headers(response.headers(), &settings.header_names[..]);
            // the body is never read, dropping the response releases it
            drop(response);

            log::debug!(
                "[{}] {} {url} ({host}) -> {status} in {elapsed:?}",
                endpoint.id,
                settings.method.as_str()
            );
            ProbeResult::success(
                endpoint.id,
                url,
                status.as_u16(),
                status_line(status),
                header_values,
                elapsed,
            )
        }
        Err(e) => {
            log::debug!(
                "[{}] {} {url} ({host}) failed after {elapsed:?}: {e}",
                endpoint.id,
                settings.method.as_str()
            );
            let summary = settings.failure_summary(&e);
            ProbeResult::failure(endpoint.id, url, summary, elapsed)
        }
    }
}
