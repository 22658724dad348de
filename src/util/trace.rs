//! Routes `tracing` spans and `log` records to stderr, filtered by
//! `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=inkroute=debug inkroute --image route.png ...
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}
