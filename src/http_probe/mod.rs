pub mod dispatcher;
pub mod dns;
pub mod endpoint;
pub mod headers;
pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::dispatcher::Dispatcher;
    pub use super::endpoint::{Endpoint, normalize_url};
    pub use super::probe::{HttpMethod, ProbeSettings, probe_endpoint};
    pub use super::result::{ERROR_SENTINEL, ProbeResult};
}

use std::fmt::Write;

/// Renders an error and its whole `source()` chain on a single line.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let cause = src.to_string();
        // reqwest and hyper often repeat the inner message in the outer one
        if !s.ends_with(&cause) {
            let _ = write!(s, ": {}", cause);
        }
        err = src;
    }
    s
}
