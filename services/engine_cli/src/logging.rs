//! Tracing subscriber setup

use anyhow::{anyhow, Result};
use launch_config::LoggingSettings;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(settings: &LoggingSettings, force_json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|err| anyhow!("Invalid log filter {:?}: {}", settings.level, err))?;

    let json = force_json || settings.json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(io::stderr)))
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {}", err))
}
