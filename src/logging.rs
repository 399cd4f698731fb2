//! Diagnostic logging setup.
//!
//! Library code emits `tracing` events; the binary installs a stderr
//! subscriber whose level follows `-q` / `-v` unless `RUST_LOG` is set.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level.
///
/// quiet → errors only, 0 → warnings, 1 → pipeline stages, 2+ → per-segment detail.
pub fn default_directive(quiet: bool, verbosity: u8) -> &'static str {
    if quiet {
        return "mouthtrack=error";
    }
    match verbosity {
        0 => "mouthtrack=warn",
        1 => "mouthtrack=info",
        _ => "mouthtrack=debug",
    }
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init(quiet: bool, verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbosity)));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("Log subscriber already installed");
    }
}
