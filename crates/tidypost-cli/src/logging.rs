//! Logging setup.
//!
//! Logs go to stderr so the report on stdout stays clean. `RUST_LOG`
//! overrides the level chosen from the command line.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("tidypost=debug")
    } else {
        EnvFilter::new("tidypost=warn")
    };

    let layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .ok();
}
