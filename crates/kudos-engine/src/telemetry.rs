//! Process-wide tracing setup.

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive environment variable.
pub const LOG_ENV: &str = "KUDOS_LOG";
/// `json` or `compact` (default).
pub const LOG_FORMAT_ENV: &str = "KUDOS_LOG_FORMAT";

/// Install the global subscriber.
///
/// `KUDOS_LOG` takes an `EnvFilter` directive. Without it, `DEBUG` being
/// set selects `kudos=debug,info`, otherwise `kudos=info,warn`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(default_directive(env::var_os("DEBUG").is_some()))
    });

    let format = env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false))
            .try_init(),
        _ => registry.with(fmt::layer().compact()).try_init(),
    };
    installed.context("install tracing subscriber")
}

const fn default_directive(debug: bool) -> &'static str {
    if debug {
        "kudos=debug,info"
    } else {
        "kudos=info,warn"
    }
}
