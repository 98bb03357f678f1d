//! Logging initialisation

use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// `RUST_LOG` controls the filter; the default keeps fakturo at info
/// and everything else at warn so reqwest internals stay quiet.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,fakturo=info,fakturo_core=info,fakturo_infra=info")
    });

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
