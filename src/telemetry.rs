//! Process-wide tracing setup.

use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Installs a formatting subscriber filtered by `directive`.
///
/// `RUST_LOG` takes precedence over `directive` when set.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already
/// installed; the existing subscriber stays in place.
pub fn init_tracing(directive: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}
