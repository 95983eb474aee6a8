//! Claim Coordinator
//!
//! Turns newly unlocked tokens into claim authorizations. Checks run in a
//! fixed order: schedule active, proof valid against the published root,
//! then a positive claimable amount. The coordinator reads `claimed` but
//! never writes it; the claim itself settles on-chain.

use crate::authorization::ClaimAuthorization;
use crate::registry::AuthorizationRegistry;
use launch_merkle::{verify, LeafBinding};
use launch_types::{EngineError, EngineResult, Hash32};
use launch_vesting::{claimable_now, VestingAllocation, VestingSchedule};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default authorization lifetime in seconds
pub const DEFAULT_AUTHORIZATION_TTL_SECS: u64 = 300;

/// Everything needed to decide one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub binding: LeafBinding,
    /// Root the vault contract was initialized with
    pub root: Hash32,
    pub schedule: VestingSchedule,
    pub allocation: VestingAllocation,
    pub proof: Vec<Hash32>,
    pub now: i64,
}

pub struct ClaimCoordinator {
    ttl_secs: i64,
    registry: AuthorizationRegistry,
}

impl Default for ClaimCoordinator {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_AUTHORIZATION_TTL_SECS as i64,
            registry: AuthorizationRegistry::new(),
        }
    }
}

impl ClaimCoordinator {
    pub fn new(ttl_secs: u64) -> EngineResult<Self> {
        let ttl_secs = i64::try_from(ttl_secs)
            .ok()
            .filter(|ttl| *ttl > 0)
            .ok_or_else(|| {
                EngineError::invalid(format!("authorization ttl {} is out of range", ttl_secs))
            })?;
        Ok(Self {
            ttl_secs,
            registry: AuthorizationRegistry::new(),
        })
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs.unsigned_abs()
    }

    pub fn registry(&self) -> &AuthorizationRegistry {
        &self.registry
    }

    /// Authorize a claim of everything claimable at `request.now`.
    ///
    /// A proof that fails to verify is always `ProofInvalid`, even when the
    /// schedule is paused or the allocation has nothing claimable.
    pub fn authorize(&self, request: &ClaimRequest) -> EngineResult<ClaimAuthorization> {
        let beneficiary = request.allocation.beneficiary;
        request.schedule.validate()?;
        request.allocation.validate()?;

        if !verify(
            &request.proof,
            &request.root,
            &request.binding,
            &beneficiary,
            request.allocation.entitlement,
        ) {
            warn!(
                vault = %request.binding.vault,
                %beneficiary,
                entitlement = request.allocation.entitlement,
                "Claim refused: proof does not verify against root {}",
                request.root
            );
            return Err(EngineError::ProofInvalid);
        }

        if request.schedule.is_paused() {
            debug!(%beneficiary, "Claim refused: schedule paused");
            return Err(EngineError::ScheduleNotActive);
        }

        let claimable = claimable_now(&request.schedule, &request.allocation, request.now)?;
        if claimable == 0 {
            debug!(%beneficiary, "Claim refused: nothing unlocked beyond claimed");
            return Err(EngineError::NothingToClaim);
        }

        let expires_at = request
            .now
            .checked_add(self.ttl_secs)
            .ok_or(EngineError::ArithmeticOverflow {
                context: "authorization expiry",
            })?;
        let authorization = self.registry.issue(
            request.binding.vault,
            beneficiary,
            claimable,
            request.now,
            expires_at,
        );

        info!(
            id = authorization.id,
            vault = %authorization.vault,
            %beneficiary,
            amount = authorization.amount,
            expires_at,
            "Claim authorized"
        );

        Ok(authorization)
    }

    /// Redeem a previously issued authorization
    pub fn consume(&self, id: u64, now: i64) -> EngineResult<ClaimAuthorization> {
        self.registry.consume(id, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_merkle::{build, MerkleAllocation};
    use launch_types::Address;
    use launch_vesting::{IntervalType, ScheduleStatus};

    const ALICE: Address = Address::new([0xa1; 20]);
    const BOB: Address = Address::new([0xb2; 20]);

    fn binding() -> LeafBinding {
        LeafBinding::new(Address::new([0x0f; 20]), 1, Hash32::new([0x33; 32]))
    }

    fn schedule() -> VestingSchedule {
        VestingSchedule {
            tge_bps: 2_500,
            tge_timestamp: 1_000,
            cliff_seconds: 600,
            vesting_seconds: 1_800,
            interval: IntervalType::Continuous,
            status: ScheduleStatus::Active,
        }
    }

    fn request(claimed: u128, now: i64) -> ClaimRequest {
        let set = build(
            &binding(),
            &[
                MerkleAllocation::new(ALICE, 600_000),
                MerkleAllocation::new(BOB, 400_000),
            ],
        )
        .unwrap();
        ClaimRequest {
            binding: binding(),
            root: set.root,
            schedule: schedule(),
            allocation: VestingAllocation {
                beneficiary: ALICE,
                entitlement: 600_000,
                claimed,
            },
            proof: set.proof_for(&ALICE).unwrap().to_vec(),
            now,
        }
    }

    #[test]
    fn test_authorizes_claimable_delta() {
        let coordinator = ClaimCoordinator::default();
        let auth = coordinator.authorize(&request(150_000, 2_500)).unwrap();
        // 600_000 * 62.5% unlocked, minus 150_000 claimed
        assert_eq!(auth.amount, 225_000);
        assert_eq!(auth.issued_at, 2_500);
        assert_eq!(auth.expires_at, 2_800);
        assert_eq!(auth.vault, binding().vault);
    }

    #[test]
    fn test_tampered_amount_is_proof_invalid() {
        let coordinator = ClaimCoordinator::default();
        let mut req = request(0, 2_500);
        req.allocation.entitlement = 600_001;
        assert_eq!(coordinator.authorize(&req), Err(EngineError::ProofInvalid));
    }

    #[test]
    fn test_bad_proof_wins_over_nothing_to_claim() {
        let coordinator = ClaimCoordinator::default();

        let before_tge = request(0, 0);
        assert_eq!(
            coordinator.authorize(&before_tge),
            Err(EngineError::NothingToClaim)
        );

        let mut tampered = request(0, 0);
        tampered.root = Hash32::new([0xee; 32]);
        assert_eq!(
            coordinator.authorize(&tampered),
            Err(EngineError::ProofInvalid)
        );
    }

    #[test]
    fn test_paused_schedule_refused_after_proof_check() {
        let coordinator = ClaimCoordinator::default();
        let mut req = request(0, 5_000);
        req.schedule.status = ScheduleStatus::Paused { paused_at: 2_500 };
        assert_eq!(
            coordinator.authorize(&req),
            Err(EngineError::ScheduleNotActive)
        );
        assert!(coordinator.registry().is_empty());
    }

    #[test]
    fn test_forged_claim_on_paused_schedule_is_proof_invalid() {
        let coordinator = ClaimCoordinator::default();
        let mut req = request(0, 5_000);
        req.schedule.status = ScheduleStatus::Paused { paused_at: 2_500 };
        req.allocation.entitlement = 6_000_000;
        req.proof = vec![Hash32::new([0x44; 32])];

        let err = coordinator.authorize(&req).unwrap_err();
        assert_eq!(err, EngineError::ProofInvalid);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_fully_claimed_is_nothing_to_claim() {
        let coordinator = ClaimCoordinator::default();
        assert_eq!(
            coordinator.authorize(&request(600_000, 10_000)),
            Err(EngineError::NothingToClaim)
        );
        assert!(coordinator.registry().is_empty());
    }

    #[test]
    fn test_reauthorizing_supersedes_and_consume_is_once() {
        let coordinator = ClaimCoordinator::new(60).unwrap();
        let first = coordinator.authorize(&request(0, 2_000)).unwrap();
        let second = coordinator.authorize(&request(0, 2_010)).unwrap();
        assert!(second.amount > first.amount);
        assert_eq!(second.nonce, first.nonce + 1);

        assert!(matches!(
            coordinator.consume(first.id, 2_020),
            Err(EngineError::AuthorizationSuperseded { .. })
        ));
        assert_eq!(coordinator.consume(second.id, 2_020).unwrap(), second);
        assert!(coordinator.consume(second.id, 2_021).is_err());
    }

    #[test]
    fn test_ttl_validation() {
        assert!(ClaimCoordinator::new(0).is_err());
        assert!(ClaimCoordinator::new(u64::MAX).is_err());
        assert_eq!(ClaimCoordinator::new(30).unwrap().ttl_secs(), 30);
    }
}
