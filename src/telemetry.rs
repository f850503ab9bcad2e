//! Tracing subscriber setup for the server binary.

use tracing_subscriber::EnvFilter;

/// Installs a global formatting subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`.
///
/// # Errors
///
/// Returns an error when `default_filter` does not parse or a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> eyre::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| eyre::eyre!(err))?;
    Ok(())
}
