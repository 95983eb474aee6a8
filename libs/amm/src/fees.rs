//! Swap fee calculation and bucket splitting

use launch_types::{amount, math, EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Fee buckets for one swap. Always sums to the swap's total fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Platform treasury; receives any rounding remainder
    #[serde(with = "amount")]
    pub treasury: u128,
    /// Referral reward pool
    #[serde(with = "amount")]
    pub referral_pool: u128,
}

impl FeeSplit {
    pub fn total(&self) -> u128 {
        self.treasury + self.referral_pool
    }
}

/// Fixed ratio used to divide every swap fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplitPolicy {
    /// Referral-pool share in bps; the treasury gets the rest
    pub referral_share_bps: u16,
}

impl Default for FeeSplitPolicy {
    /// Even split
    fn default() -> Self {
        Self {
            referral_share_bps: 5_000,
        }
    }
}

impl FeeSplitPolicy {
    pub fn new(referral_share_bps: u16) -> EngineResult<Self> {
        if u128::from(referral_share_bps) > math::BPS_DENOMINATOR {
            return Err(EngineError::invalid(format!(
                "referral share {} bps exceeds 10000",
                referral_share_bps
            )));
        }
        Ok(Self { referral_share_bps })
    }

    /// Divide `total_fee`; the floor goes to the referral pool and the
    /// treasury takes everything else, so no unit is ever dropped
    pub fn split(&self, total_fee: u128) -> EngineResult<FeeSplit> {
        let referral_pool = math::bps_of(total_fee, self.referral_share_bps)?;
        let treasury = math::safe_sub(total_fee, referral_pool, "fee split")?;
        Ok(FeeSplit {
            treasury,
            referral_pool,
        })
    }
}

/// floor(amount * fee_bps / 10000)
pub fn calculate_fee(amount: u128, fee_bps: u16) -> EngineResult<u128> {
    if u128::from(fee_bps) > math::BPS_DENOMINATOR {
        return Err(EngineError::invalid(format!("fee {} bps exceeds 10000", fee_bps)));
    }
    math::bps_of(amount, fee_bps)
}
