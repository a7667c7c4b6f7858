use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use super::ResultSink;
use crate::error::{HttpidError, Result};
use crate::http_probe::result::ProbeResult;

/// Separator between several header values inside the third CSV field.
pub const HEADER_VALUE_SEPARATOR: &str = ";";

/// Builds the CSV record for one result:
/// url, status summary, joined header values, elapsed seconds.
pub fn record(url: &str, result: &ProbeResult) -> [String; 4] {
    [
        url.to_string(),
        result.status_summary.clone(),
        result.header_values.join(HEADER_VALUE_SEPARATOR),
        format!("{:.6}", result.elapsed.as_secs_f64()),
    ]
}

/// Encodes one record as a complete CSV line.
fn encode(fields: &[String; 4]) -> csv::Result<Vec<u8>> {
    let mut line = Writer::from_writer(Vec::new());
    line.write_record(fields)?;
    line.into_inner().map_err(|e| csv::Error::from(e.into_error()))
}

/// Appends one CSV record per result and keeps a progress line updated.
///
/// Every record is encoded on its own before it reaches `out`, so a failed
/// write drops that record alone. Collection carries on with the next result.
pub struct CsvSink<W: Write, P: Write> {
    out: W,
    progress: P,
    write_errors: usize,
}

impl<P: Write> CsvSink<File, P> {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path, progress: P) -> Result<Self> {
        let out = File::create(path).map_err(|source| HttpidError::OutputFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(out, progress))
    }
}

impl<W: Write, P: Write> CsvSink<W, P> {
    pub fn new(out: W, progress: P) -> Self {
        Self {
            out,
            progress,
            write_errors: 0,
        }
    }

    pub fn write_errors(&self) -> usize {
        self.write_errors
    }

    fn write_record(&mut self, url: &str, result: &ProbeResult) -> Result<()> {
        let to_error = |source| HttpidError::WriteRecord {
            url: url.to_string(),
            source,
        };
        let line = encode(&record(url, result)).map_err(to_error)?;
        self.out
            .write_all(&line)
            .and_then(|()| self.out.flush())
            .map_err(|e| to_error(csv::Error::from(e)))
    }
}

impl<W: Write, P: Write> ResultSink for CsvSink<W, P> {
    fn emit(&mut self, seq: usize, total: usize, url: &str, result: &ProbeResult) {
        if let Err(e) = self.write_record(url, result) {
            self.write_errors += 1;
            log::warn!("{e}");
        }

        if let Err(e) = write!(self.progress, "query {} of {} done\r", seq + 1, total)
            .and_then(|()| self.progress.flush())
        {
            log::warn!("Failed to update progress: {e}");
        }
    }

    fn finish(&mut self, _total: usize) {
        if let Err(e) = writeln!(self.progress) {
            log::warn!("Failed to update progress: {e}");
        }
        if self.write_errors > 0 {
            log::warn!("{} records could not be written", self.write_errors);
        }
    }
}
