use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

pub mod config;
pub mod error;
pub mod http_probe;
pub mod report;
#[cfg(test)]
mod test_support;

use config::app_config::{AppConfig, build_client, load_config};
use config::cli::Cli;
use error::{HttpidError, Result};
use http_probe::prelude::*;
use report::{BatchSummary, ConsoleSink, CsvSink, ResultSink, collect};

fn build_runtime(worker_threads: Option<usize>) -> Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(threads) = worker_threads {
        builder.worker_threads(threads);
    }
    builder.enable_all().build().map_err(HttpidError::Runtime)
}

/// Probes every configured URL once and renders the results.
async fn run(config: AppConfig) -> Result<BatchSummary> {
    // everything that can abort the batch happens before the first request
    let endpoints = Endpoint::batch(&config.urls)?;
    let client = build_client(&config)?;
    let mut sink: Box<dyn ResultSink> = match &config.output {
        Some(path) => Box::new(CsvSink::create(path, io::stdout())?),
        None => Box::new(ConsoleSink::new(io::stdout())),
    };

    let dispatcher = Dispatcher::new(client, config.probe_settings(), config.concurrency);
    let results = dispatcher.dispatch(&endpoints);

    Ok(collect(results, &endpoints, config.order, sink.as_mut()).await)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let outcome = load_config(cli).and_then(|config| {
        let runtime = build_runtime(config.worker_threads)?;
        runtime.block_on(run(config))
    });

    match outcome {
        Ok(summary) if summary.is_complete() => ExitCode::SUCCESS,
        Ok(summary) => {
            eprintln!(
                "httpid: {} of {} results missing",
                summary.missing(),
                summary.total
            );
            ExitCode::FAILURE
        }
        Err(HttpidError::NoUrls) => {
            eprintln!("httpid: no URLs supplied\n");
            if let Err(e) = Cli::command().print_help() {
                log::warn!("Failed to print help: {e}");
            }
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("httpid: {e}");
            ExitCode::FAILURE
        }
    }
}
