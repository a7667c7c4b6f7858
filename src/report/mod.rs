use std::collections::BTreeMap;

use serde::Deserialize;
use tokio::sync::mpsc;

use crate::http_probe::prelude::*;

pub mod console;
pub mod csv_file;

pub use console::ConsoleSink;
pub use csv_file::CsvSink;

/// Order in which collected results are handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputOrder {
    /// As soon as each probe finishes.
    #[default]
    Arrival,
    /// Input order; results are held back until their predecessors arrive.
    Input,
}

/// Destination for rendered results.
pub trait ResultSink {
    /// `seq` counts emitted results from 0, `url` is the input URL that
    /// belongs to `result.id`.
    fn emit(&mut self, seq: usize, total: usize, url: &str, result: &ProbeResult);

    fn finish(&mut self, _total: usize) {}
}

/// Counts for one collected batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub received: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn missing(&self) -> usize {
        self.total - self.received
    }

    pub fn is_complete(&self) -> bool {
        self.received == self.total
    }
}

/// Reads one result per endpoint from `rx` and hands them to `sink`.
///
/// Results are correlated to `endpoints` through their id, never through
/// their position in the stream. Ids that are out of range or seen twice are
/// dropped. Collection stops early if the channel closes first.
pub async fn collect(
    mut rx: mpsc::Receiver<ProbeResult>,
    endpoints: &[Endpoint],
    order: OutputOrder,
    sink: &mut dyn ResultSink,
) -> BatchSummary {
    let total = endpoints.len();
    let mut summary = BatchSummary {
        total,
        ..Default::default()
    };
    let mut seen = vec![false; total];
    let mut pending: BTreeMap<usize, ProbeResult> = BTreeMap::new();
    let mut next_id = 0;
    let mut seq = 0;

    while summary.received < total {
        let Some(result) = rx.recv().await else {
            break;
        };

        match seen.get_mut(result.id) {
            Some(seen) if !*seen => *seen = true,
            Some(_) => {
                log::warn!("Ignoring duplicate result for id {}", result.id);
                continue;
            }
            None => {
                log::warn!("Ignoring result with unknown id {}", result.id);
                continue;
            }
        }

        summary.received += 1;
        if result.is_success() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }

        match order {
            OutputOrder::Arrival => {
                sink.emit(seq, total, &endpoints[result.id].url, &result);
                seq += 1;
            }
            OutputOrder::Input => {
                pending.insert(result.id, result);
                while let Some(result) = pending.remove(&next_id) {
                    sink.emit(seq, total, &endpoints[result.id].url, &result);
                    seq += 1;
                    next_id += 1;
                }
            }
        }
    }

    if !summary.is_complete() {
        log::error!(
            "Result channel closed with {} of {} results missing",
            summary.missing(),
            total
        );
        // release what was held back behind the gap
        for (_, result) in std::mem::take(&mut pending) {
            sink.emit(seq, total, &endpoints[result.id].url, &result);
            seq += 1;
        }
    }

    sink.finish(total);

    log::info!(
        "Collected {} of {} results: {} responded, {} failed",
        summary.received,
        total,
        summary.succeeded,
        summary.failed
    );
    summary
}
