use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the level chosen from `debug`. Logs go
/// to stderr; stdout is reserved for the rendered summary.
pub fn init_tracing(debug: bool, json_output: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = if json_output {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init()
    } else {
        fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
    };

    result.map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
