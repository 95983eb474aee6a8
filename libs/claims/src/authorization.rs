//! Claim authorization records

use launch_types::{amount, Address};
use serde::{Deserialize, Serialize};

/// Permission to claim `amount` from `vault`, valid until `expires_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAuthorization {
    pub id: u64,
    pub vault: Address,
    pub beneficiary: Address,
    #[serde(with = "amount")]
    pub amount: u128,
    /// Per-allocation sequence number, starting at 1
    pub nonce: u64,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl ClaimAuthorization {
    /// Expired from `expires_at` onwards
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn key(&self) -> AllocationKey {
        AllocationKey {
            vault: self.vault,
            beneficiary: self.beneficiary,
        }
    }
}

/// One beneficiary's allocation in one vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AllocationKey {
    pub vault: Address,
    pub beneficiary: Address,
}
