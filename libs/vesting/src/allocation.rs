//! Per-beneficiary entitlement rows

use launch_types::{amount, Address, EngineError, EngineResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingAllocation {
    pub beneficiary: Address,
    #[serde(with = "amount")]
    pub entitlement: u128,
    /// Amount already paid out; only ever grows
    #[serde(with = "amount")]
    pub claimed: u128,
}

impl VestingAllocation {
    pub fn new(beneficiary: Address, entitlement: u128) -> Self {
        Self {
            beneficiary,
            entitlement,
            claimed: 0,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.claimed > self.entitlement {
            return Err(EngineError::invalid(format!(
                "{} claimed {} of an entitlement of {}",
                self.beneficiary, self.claimed, self.entitlement
            )));
        }
        Ok(())
    }

    pub fn remaining(&self) -> u128 {
        self.entitlement.saturating_sub(self.claimed)
    }

    /// Record a settled claim. Used by callers that mirror on-chain state;
    /// the engines themselves never write `claimed`.
    pub fn record_claim(&mut self, amount: u128) -> EngineResult<()> {
        let claimed = self
            .claimed
            .checked_add(amount)
            .filter(|total| *total <= self.entitlement)
            .ok_or_else(|| {
                EngineError::invalid(format!(
                    "claim of {} exceeds the {} remaining for {}",
                    amount,
                    self.remaining(),
                    self.beneficiary
                ))
            })?;
        self.claimed = claimed;
        Ok(())
    }
}
