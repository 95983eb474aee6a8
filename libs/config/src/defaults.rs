//! Default values shared by the engine crates

/// Fee split defaults
pub mod fees {
    /// Referral-pool share of every swap fee (50%); treasury takes the rest
    /// plus any rounding remainder
    pub const REFERRAL_SHARE_BPS: u16 = 5_000;
}

/// Claim authorization defaults
pub mod claims {
    /// Lifetime of a claim authorization (5 minutes)
    pub const AUTHORIZATION_TTL_SECS: u64 = 300;

    /// Upper bound accepted from configuration (1 hour)
    pub const MAX_AUTHORIZATION_TTL_SECS: u64 = 3_600;
}

/// Logging defaults
pub mod logging {
    /// Default `EnvFilter` directive
    pub const LEVEL: &str = "info";
}

/// Default configuration file locations
pub mod paths {
    pub const BASE_CONFIG: &str = "config/engine.toml";
    pub const ENVIRONMENTS_DIR: &str = "config/environments";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "LAUNCH";
}
