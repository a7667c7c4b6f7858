use std::io::Write;

use super::ResultSink;
use crate::http_probe::result::ProbeResult;

/// Formats one console line:
/// `[<seq>] <url> : <status> : [<header values>] time=<elapsed>`.
pub fn format_line(seq: usize, url: &str, result: &ProbeResult) -> String {
    format!(
        "[{seq}] {url} : {} : [{}] time={:?}",
        result.status_summary,
        result.header_values.join(" "),
        result.elapsed
    )
}

/// Prints every result on its own line as it is emitted.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn emit(&mut self, seq: usize, _total: usize, url: &str, result: &ProbeResult) {
        if let Err(e) = writeln!(self.out, "{}", format_line(seq, url, result)) {
            log::warn!("Failed to print result for {url}: {e}");
        }
    }

    fn finish(&mut self, _total: usize) {
        if let Err(e) = self.out.flush() {
            log::warn!("Failed to flush results: {e}");
        }
    }
}
