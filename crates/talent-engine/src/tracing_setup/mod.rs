//! Tracing initialisation and span helpers.

pub mod spans;

use std::sync::Once;

use talent_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "TALENT_LOG";

/// Initialise human-readable logging.
///
/// Reads `TALENT_LOG` for per-crate levels, e.g.
/// `TALENT_LOG=talent_engine=debug,talent_storage=warn`. Falls back to
/// `talent=info`. Idempotent.
pub fn init_tracing() {
    init_with(false, "info");
}

/// Same as [`init_tracing`] but emits JSON lines.
pub fn init_tracing_json() {
    init_with(true, "info");
}

/// Initialise from config. `TALENT_LOG` still wins when set.
pub fn init_from_config(config: &ObservabilityConfig) {
    init_with(config.json_logs, &config.log_level);
}

fn init_with(json: bool, level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(format!("talent={level}")));

        // A subscriber installed by the host process takes precedence.
        let _ = if json {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        };
    });
}
