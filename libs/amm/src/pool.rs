//! Bonding-curve pool records and swap outputs

use crate::fees::FeeSplit;
use crate::graduation::GraduationStatus;
use launch_types::{amount, EngineError, EngineResult, PoolId};
use serde::{Deserialize, Serialize};

/// Pool lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolStatus {
    /// Accepting swaps
    Live,
    /// Threshold reached, liquidity migration pending
    Graduating,
    /// Liquidity moved to an external venue
    Migrated,
}

impl std::fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PoolStatus::Live => "LIVE",
            PoolStatus::Graduating => "GRADUATING",
            PoolStatus::Migrated => "MIGRATED",
        };
        f.write_str(label)
    }
}

/// Swap direction from the trader's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapDirection {
    /// Base asset in, launch token out
    Buy,
    /// Launch token in, base asset out
    Sell,
}

/// Bonding-curve pool state as stored by the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    /// Virtual base-asset reserve used for pricing (smallest unit)
    #[serde(with = "amount")]
    pub virtual_base_reserve: u128,
    /// Virtual token reserve used for pricing (smallest unit)
    #[serde(with = "amount")]
    pub virtual_token_reserve: u128,
    /// Base asset actually raised, net of fees
    #[serde(with = "amount")]
    pub actual_base_raised: u128,
    /// Swap fee in basis points (0..=10000)
    pub fee_bps: u16,
    /// Raise needed before the pool graduates
    #[serde(with = "amount")]
    pub graduation_threshold: u128,
    pub status: PoolStatus,
}

impl Pool {
    /// Create a live pool with nothing raised yet
    pub fn new(
        id: PoolId,
        virtual_base_reserve: u128,
        virtual_token_reserve: u128,
        fee_bps: u16,
        graduation_threshold: u128,
    ) -> Self {
        Self {
            id,
            virtual_base_reserve,
            virtual_token_reserve,
            actual_base_raised: 0,
            fee_bps,
            graduation_threshold,
            status: PoolStatus::Live,
        }
    }

    /// (reserve paid in, reserve paid out) for a direction
    pub fn reserves_for(&self, direction: SwapDirection) -> (u128, u128) {
        match direction {
            SwapDirection::Buy => (self.virtual_base_reserve, self.virtual_token_reserve),
            SwapDirection::Sell => (self.virtual_token_reserve, self.virtual_base_reserve),
        }
    }

    pub fn is_live(&self) -> bool {
        self.status == PoolStatus::Live
    }

    /// Check the record is internally consistent before pricing against it
    pub fn validate(&self) -> EngineResult<()> {
        if u128::from(self.fee_bps) > launch_types::BPS_DENOMINATOR {
            return Err(EngineError::invalid(format!(
                "{}: fee_bps {} exceeds 10000",
                self.id, self.fee_bps
            )));
        }
        if self.is_live() && (self.virtual_base_reserve == 0 || self.virtual_token_reserve == 0) {
            return Err(EngineError::invalid(format!(
                "{}: virtual reserves must be positive while live",
                self.id
            )));
        }
        Ok(())
    }

    /// Apply a quote produced against this exact state
    pub(crate) fn apply(&mut self, quote: &SwapQuote) {
        self.virtual_base_reserve = quote.new_base_reserve;
        self.virtual_token_reserve = quote.new_token_reserve;
        self.actual_base_raised = quote.actual_base_raised_after;
    }
}

/// Result of pricing one swap; all fields are integers in smallest units.
///
/// For a BUY the input, fee and fee buckets are denominated in the base
/// asset; for a SELL they are denominated in the launch token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    #[serde(with = "amount")]
    pub input_amount: u128,
    /// Input that reaches the curve after the fee is deducted
    #[serde(with = "amount")]
    pub input_after_fee: u128,
    #[serde(with = "amount")]
    pub output_amount: u128,
    #[serde(with = "amount")]
    pub total_fee: u128,
    pub fee_split: FeeSplit,
    #[serde(with = "amount")]
    pub new_base_reserve: u128,
    #[serde(with = "amount")]
    pub new_token_reserve: u128,
    #[serde(with = "amount")]
    pub actual_base_raised_after: u128,
    /// Graduation progress evaluated on `actual_base_raised_after`
    pub graduation: GraduationStatus,
}
