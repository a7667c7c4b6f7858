use std::path::PathBuf;

use clap::Parser;

/// httpid - probe HTTP(S) endpoints concurrently and show their status,
/// selected response headers and response time.
#[derive(Parser, Debug, Default)]
#[command(name = "httpid", version, about, long_about = None)]
pub struct Cli {
    /// URLs to probe; `http://` is prepended when the scheme is missing
    pub urls: Vec<String>,

    /// Read URLs from file, one per line
    #[arg(short = 'f', long = "file")]
    pub input_file: Option<PathBuf>,

    /// Which header(s) to show, space separated [default: Server]
    #[arg(short = 'H', long = "headers")]
    pub headers: Option<String>,

    /// Number of worker threads to use [default: number of CPUs]
    #[arg(short = 'n', long = "cores", env = "HTTPID_CORES")]
    pub cores: Option<usize>,

    /// Show error text instead of a generic failure status
    #[arg(short, long)]
    pub verbose: bool,

    /// Use GET instead of HEAD
    #[arg(long)]
    pub get: bool,

    /// Write results to a CSV file instead of the console
    #[arg(short = 'w', long = "write-csv")]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(short = 't', long, env = "HTTPID_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of requests in flight [default: unbounded]
    #[arg(short = 'c', long, env = "HTTPID_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Print results in input order instead of as they complete
    #[arg(long)]
    pub ordered: bool,

    /// Path to a YAML profile with defaults
    #[arg(long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Comma separated DNS server IPs to resolve through
    #[arg(long = "dns", env = "DNS_HOSTS", value_delimiter = ',')]
    pub dns_hosts: Vec<String>,
}
