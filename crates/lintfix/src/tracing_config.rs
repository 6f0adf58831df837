//! Logging for the `lintfix` binary.
//!
//! ```bash
//! # Why did a diagnostic get no fix?
//! LINTFIX_LOG=debug lintfix check --report report.json
//!
//! # Anchor resolution and applied fixes too
//! LINTFIX_LOG="lintfix=trace" lintfix check --report report.json --fix
//! ```
//!
//! Nothing is installed unless `LINTFIX_LOG` (or `RUST_LOG`) is set.
use tracing_subscriber::EnvFilter;

const LOG_VAR: &str = "LINTFIX_LOG";

/// `LINTFIX_LOG` when set, `RUST_LOG` otherwise.
fn build_filter() -> EnvFilter {
    match std::env::var(LOG_VAR) {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Install a stderr subscriber, leaving stdout to the reports.
pub fn init_tracing() {
    if std::env::var(LOG_VAR).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
