//! Log subscriber setup.
//!
//! Library crates emit `tracing` events; this installs a stderr formatter for
//! them. `SRCSET_LOG` takes an `EnvFilter` directive and overrides the level
//! implied by `--quiet` / `--verbose`.

use tracing_subscriber::EnvFilter;

use crate::GlobalArgs;

/// Environment variable holding a filter directive, e.g. `srcset_graph=trace`.
pub const LOG_ENV: &str = "SRCSET_LOG";

/// Installs the global subscriber.
pub fn init(global: &GlobalArgs) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(global)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}
