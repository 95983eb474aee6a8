//! # Launch Engine Configuration
//!
//! Centralized defaults and configuration loading for the engine crates and
//! the `launch-engine` binary.
//!
//! ## Sources (lowest to highest precedence)
//!
//! - **Built-in defaults**: see [`defaults`]
//! - **Base file**: `config/engine.toml` (optional)
//! - **Environment file**: `config/environments/<env>.toml` (optional)
//! - **Environment variables**: `LAUNCH_<SECTION>__<KEY>`, e.g.
//!   `LAUNCH_CLAIMS__AUTHORIZATION_TTL_SECS=120`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use launch_config::load_config;
//!
//! let config = load_config(Some("staging")).unwrap();
//! assert!(config.claims.authorization_ttl_secs > 0);
//! ```

pub mod defaults;
pub mod engine_config;

pub use engine_config::{
    load_config, ClaimSettings, EngineConfig, FeeSettings, LoggingSettings,
};
