//! Engine Configuration Module
//!
//! Loads [`EngineConfig`] from TOML files with environment-specific
//! overrides. Every section falls back to built-in defaults, so an empty or
//! missing base file is a valid configuration.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Swap fee split policy
    pub fees: FeeSettings,

    /// Claim authorization policy
    pub claims: ClaimSettings,

    /// Log output settings for binaries
    pub logging: LoggingSettings,
}

/// How swap fees are divided between named buckets
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FeeSettings {
    /// Share of each fee routed to the referral pool, in bps
    pub referral_share_bps: u16,
}

/// Claim authorization settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClaimSettings {
    /// Seconds an authorization stays valid after issue
    pub authorization_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `launch_amm=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            referral_share_bps: defaults::fees::REFERRAL_SHARE_BPS,
        }
    }
}

impl Default for ClaimSettings {
    fn default() -> Self {
        Self {
            authorization_ttl_secs: defaults::claims::AUTHORIZATION_TTL_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from files with environment overrides
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(defaults::paths::BASE_CONFIG));

        if !base.exists() {
            warn!("Base config not found, using defaults: {:?}", base);
        }

        let mut builder = Config::builder().add_source(File::from(base).required(false));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = base
                .parent()
                .map(|dir| dir.join("environments"))
                .unwrap_or_else(|| PathBuf::from(defaults::paths::ENVIRONMENTS_DIR))
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (LAUNCH_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(defaults::paths::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: EngineConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(?config, "Engine configuration loaded");
        Ok(config)
    }

    /// Reject values the engines cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.fees.referral_share_bps > 10_000 {
            bail!(
                "fees.referral_share_bps must be at most 10000, got {}",
                self.fees.referral_share_bps
            );
        }
        let ttl = self.claims.authorization_ttl_secs;
        if ttl == 0 || ttl > defaults::claims::MAX_AUTHORIZATION_TTL_SECS {
            bail!(
                "claims.authorization_ttl_secs must be in 1..={}, got {}",
                defaults::claims::MAX_AUTHORIZATION_TTL_SECS,
                ttl
            );
        }
        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration")
    }
}

/// Convenience function to load configuration from the default location
pub fn load_config(environment: Option<&str>) -> Result<EngineConfig> {
    EngineConfig::load(None, environment)
}
