//! Diagnostic tracing for the CLI.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`; run summaries are
//! product output and always go to stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset, which still surfaces skipped
/// single-member groups.
///
/// # Example
/// ```bash
/// RUST_LOG=buddyweek_core=debug buddyweek assign -i klassen.csv -o out
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
