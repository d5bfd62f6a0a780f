//! Structured logging setup for the `welcome` binary.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::Error;

/// Installs the global subscriber: an [`EnvFilter`] built from `filter`
/// (`RUST_LOG` syntax) over the human-readable `fmt` layer.
pub fn init(filter: &str) -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter)?)
        .with(fmt::layer())
        .try_init()?;
    Ok(())
}
