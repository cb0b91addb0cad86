//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "VALENCE_LOG";

/// Filter used when `VALENCE_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "valence=info";

/// Initialize the Valence tracing/logging system.
///
/// Reads `VALENCE_LOG` for per-stage log levels, for example
/// `VALENCE_LOG=valence_analysis::health=debug,valence_analysis::patterns=warn`.
/// Falls back to `valence=info`.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host application.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
