//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the Pricewatch tracing/logging system.
///
/// Reads `PRICEWATCH_LOG` for per-crate log levels.
/// Format: `PRICEWATCH_LOG=pricewatch_analysis=debug,pricewatch_report=warn`
///
/// Falls back to `pricewatch=info` if `PRICEWATCH_LOG` is not set or is invalid.
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("pricewatch=info"));

        // `try_init` so an embedding application's subscriber wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}
