use std::time::Duration;

/// Status summary of a failed probe when raw error text is not requested.
/// The `000` code can never appear in a real HTTP status line.
pub const ERROR_SENTINEL: &str = "000 ERR";

/// Outcome of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Id of the endpoint this result belongs to.
    pub id: usize,
    pub url: String,
    /// Status line such as `200 OK`, or the error classification.
    pub status_summary: String,
    /// Values of the requested headers that were present, in request order.
    pub header_values: Vec<String>,
    pub elapsed: Duration,
    /// HTTP status code; `None` when no response was received.
    pub status_code: Option<u16>,
}

impl ProbeResult {
    pub fn success(
        id: usize,
        url: String,
        status_code: u16,
        status_summary: String,
        header_values: Vec<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            id,
            url,
            status_summary,
            header_values,
            elapsed,
            status_code: Some(status_code),
        }
    }

    pub fn failure(id: usize, url: String, status_summary: String, elapsed: Duration) -> Self {
        Self {
            id,
            url,
            status_summary,
            header_values: Vec::new(),
            elapsed,
            status_code: None,
        }
    }

    /// Whether a response was received at all, whatever its status code.
    pub fn is_success(&self) -> bool {
        self.status_code.is_some()
    }
}
