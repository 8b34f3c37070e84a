//! Logger setup based on `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, `crate_name` is logged at
/// `default_level` and everything else at `warn`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(crate_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(crate_name, default_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Build the fallback filter directive, e.g. `warn,surveypro=debug`.
fn default_directive(crate_name: &str, default_level: &str) -> String {
    let target = crate_name.replace('-', "_");
    format!("warn,{target}={default_level},surveypro_client={default_level}")
}
