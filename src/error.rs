use std::io;
use std::net::AddrParseError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a batch before (or while) it is set up, plus the
/// per-record write failure reported in file mode.
///
/// Network failures of individual endpoints are never represented here; they
/// end up in the `status_summary` of that endpoint's result.
#[derive(Debug, Error)]
pub enum HttpidError {
    #[error("no URLs supplied")]
    NoUrls,

    #[error("could not read URL file {}: {source}", .path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid URL {url:?}: expected at least 4 characters")]
    InvalidUrl { url: String },

    #[error("could not read config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid DNS host {host:?}: {source}")]
    DnsHost {
        host: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid value for {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("could not create output file {}: {source}", .path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("failed to write record for {url}: {source}")]
    WriteRecord {
        url: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, HttpidError>;
