//! Tracing subscriber initialisation for binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `default_level`.
///
/// Library crates only emit events; this is called once by the binary.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
pub fn init_tracing(default_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_level(true))
        .try_init()?;

    Ok(())
}
