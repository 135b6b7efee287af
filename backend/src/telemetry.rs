//! Tracing subscriber installation.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` selects the filter, defaulting to `info`. With `json` set each
/// event is written as one JSON object per line. A second call leaves the
/// first subscriber in place and logs a warning.
pub fn init(json: bool) {
    let result = if json {
        fmt().with_env_filter(env_filter()).json().try_init()
    } else {
        fmt().with_env_filter(env_filter()).try_init()
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn repeated_initialisation_is_harmless() {
        init(false);
        init(true);
        tracing::info!("subscriber installed");
    }
}
