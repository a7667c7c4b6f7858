use std::sync::Arc;

use reqwest::Client;
use tokio::sync::{Semaphore, mpsc};

use super::endpoint::Endpoint;
use super::probe::{ProbeSettings, probe_endpoint};
use super::result::ProbeResult;

/// Fans a batch of endpoints out to one probe task each.
pub struct Dispatcher {
    client: Client,
    settings: ProbeSettings,
    concurrency: Option<usize>,
}

impl Dispatcher {
    /// `concurrency` caps the number of requests in flight; `None` starts
    /// every probe at once.
    pub fn new(client: Client, settings: ProbeSettings, concurrency: Option<usize>) -> Self {
        Self {
            client,
            settings,
            concurrency,
        }
    }

    /// Spawns one task per endpoint and returns the channel their results
    /// arrive on, in completion order.
    ///
    /// The channel can hold the whole batch, so workers never wait on a slow
    /// reader. It closes once every worker has sent its result.
    pub fn dispatch(&self, endpoints: &[Endpoint]) -> mpsc::Receiver<ProbeResult> {
        let (tx, rx) = mpsc::channel(endpoints.len().max(1));
        let semaphore = self
            .concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        log::info!(
            "Dispatching {} probes ({}, concurrency: {})",
            endpoints.len(),
            self.settings.method.as_str(),
            self.concurrency
                .map(|limit| limit.to_string())
                .unwrap_or_else(|| "unbounded".to_string())
        );

        for endpoint in endpoints {
            let client = self.client.clone();
            let settings = self.settings.clone();
            let endpoint = endpoint.clone();
            let semaphore = semaphore.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                // the semaphore is never closed, so acquiring cannot fail
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let result = probe_endpoint(&client, &endpoint, &settings).await;
                if tx.send(result).await.is_err() {
                    log::warn!("Result for {} dropped, collector is gone", endpoint.url);
                }
            });
        }

        rx
    }
}
