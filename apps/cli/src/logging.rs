//! Logging initialization for the CLI
//!
//! Diagnostics go to stderr so that stdout only carries results. `RUST_LOG`
//! overrides the level chosen on the command line.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map the number of `-v` flags to a default filter level
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level_for(verbosity);
        EnvFilter::new(format!("polyroot={level},polyroot_equation={level}"))
    })
}

pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::debug!(verbosity, "Logging initialized");
    Ok(())
}
