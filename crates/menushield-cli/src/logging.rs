//! Tracing subscriber setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Install the global subscriber
///
/// `RUST_LOG` overrides the default `info` level. Logs go to stderr so
/// command output on stdout stays machine-readable.
pub(crate) fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr);
        Registry::default().with(filter).with(layer).init();
    } else {
        let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
        Registry::default().with(filter).with(layer).init();
    }
}
