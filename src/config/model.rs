use serde::Deserialize;

use crate::http_probe::probe::HttpMethod;
use crate::report::OutputOrder;

/// Optional YAML profile with batch defaults.
/// Every key can be overridden from the command line or environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeProfile {
    /// Request method for the whole batch (`HEAD` or `GET`).
    pub method: Option<HttpMethod>,

    /// Header names to extract from every response, in display order.
    pub headers: Option<Vec<String>>,

    /// Show raw error text instead of the generic failure status.
    pub verbose: Option<bool>,

    /// Per-request timeout in seconds.
    pub timeout_seconds: Option<u64>,

    /// Maximum number of requests in flight. Unbounded when absent.
    pub concurrency: Option<usize>,

    /// `arrival` (default) or `input`.
    pub order: Option<OutputOrder>,

    pub user_agent: Option<String>,

    /// Name servers to resolve through instead of the system resolver.
    pub dns_hosts: Option<Vec<String>>,

    /// URLs probed when none are given on the command line.
    pub targets: Vec<String>,
}

pub(crate) fn default_headers() -> Vec<String> {
    vec!["Server".to_string()]
}

pub(crate) fn default_timeout_seconds() -> u64 {
    10
}

pub(crate) fn default_user_agent() -> String {
    format!("httpid/{}", env!("CARGO_PKG_VERSION"))
}
