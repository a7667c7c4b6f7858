use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use super::cli::Cli;
use super::model::{ProbeProfile, default_headers, default_timeout_seconds, default_user_agent};
use crate::error::{HttpidError, Result};
use crate::http_probe::dns::CustomResolver;
use crate::http_probe::headers::parse_header_names;
use crate::http_probe::probe::{HttpMethod, ProbeSettings};
use crate::report::OutputOrder;

/// Fully resolved, immutable configuration of one batch run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Raw URLs in input order, not yet normalized.
    pub urls: Vec<String>,
    pub method: HttpMethod,
    pub header_names: Vec<String>,
    pub verbose: bool,
    pub timeout: Duration,
    pub concurrency: Option<usize>,
    pub order: OutputOrder,
    pub output: Option<PathBuf>,
    pub worker_threads: Option<usize>,
    pub user_agent: String,
    pub dns_hosts: Vec<String>,
}

impl AppConfig {
    /// Snapshot handed to every probe worker.
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            method: self.method,
            header_names: Arc::from(self.header_names.clone()),
            verbose: self.verbose,
            timeout: self.timeout,
        }
    }
}

/// Load the application configuration.
///
/// Command line flags (and their environment variables) win over the YAML
/// profile named by `--config`/`CONFIG_FILE`, which wins over the defaults.
/// URLs come from `--file`, else the positional arguments, else the
/// profile's `targets`.
pub fn load_config(cli: Cli) -> Result<AppConfig> {
    let profile = match &cli.config {
        Some(path) => load_profile(path)?,
        None => ProbeProfile::default(),
    };

    let urls = match &cli.input_file {
        Some(path) => read_url_file(path)?,
        None if !cli.urls.is_empty() => cli.urls,
        None => profile.targets,
    };
    if urls.is_empty() {
        return Err(HttpidError::NoUrls);
    }

    let method = if cli.get {
        HttpMethod::Get
    } else {
        profile.method.unwrap_or_default()
    };

    let header_names = match &cli.headers {
        Some(names) => parse_header_names(names),
        None => profile.headers.unwrap_or_else(default_headers),
    };

    let timeout_seconds = non_zero(
        "timeout",
        cli.timeout
            .or(profile.timeout_seconds)
            .unwrap_or_else(default_timeout_seconds),
    )?;
    let concurrency = cli
        .concurrency
        .or(profile.concurrency)
        .map(|limit| non_zero("concurrency", limit))
        .transpose()?;
    let worker_threads = cli
        .cores
        .map(|cores| non_zero("cores", cores))
        .transpose()?;

    let order = if cli.ordered {
        OutputOrder::Input
    } else {
        profile.order.unwrap_or_default()
    };

    let dns_hosts = if cli.dns_hosts.is_empty() {
        profile.dns_hosts.unwrap_or_default()
    } else {
        cli.dns_hosts
    };
    let dns_hosts: Vec<String> = dns_hosts
        .iter()
        .map(|host| host.trim().to_string())
        .filter(|host| !host.is_empty())
        .collect();

    let config = AppConfig {
        urls,
        method,
        header_names,
        verbose: cli.verbose || profile.verbose.unwrap_or(false),
        timeout: Duration::from_secs(timeout_seconds),
        concurrency,
        order,
        output: cli.output,
        worker_threads,
        user_agent: profile.user_agent.unwrap_or_else(default_user_agent),
        dns_hosts,
    };

    log::info!(
        "Probing {} URLs with {} (headers: {:?}, timeout: {:?})",
        config.urls.len(),
        config.method.as_str(),
        config.header_names,
        config.timeout
    );
    if !config.dns_hosts.is_empty() {
        log::info!("Using DNS hosts: {:?}", config.dns_hosts);
    }

    Ok(config)
}

fn non_zero<T: PartialEq + Default>(option: &'static str, value: T) -> Result<T> {
    if value == T::default() {
        return Err(HttpidError::InvalidOption {
            option,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(value)
}

fn load_profile(path: &Path) -> Result<ProbeProfile> {
    let contents = std::fs::read_to_string(path).map_err(|source| HttpidError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| HttpidError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a newline-delimited URL list, skipping blank lines and `#` comments.
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| HttpidError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_url_lines(&contents))
}

fn parse_url_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Build the HTTP client shared by all probes of the batch.
pub fn build_client(config: &AppConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str());

    if !config.dns_hosts.is_empty() {
        builder = builder.dns_resolver(Arc::new(CustomResolver::new(&config.dns_hosts)?));
    }

    Ok(builder.build()?)
}
