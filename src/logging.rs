// 📝 Logging - global tracing subscriber setup

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global fmt subscriber once.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. A subscriber
/// installed elsewhere is left in place.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        if fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .is_err()
        {
            tracing::debug!("global subscriber already installed, keeping it");
        }
    });
}
