//! End-to-end scenarios
//!
//! Each scenario drives several engine crates the way the surrounding
//! services do: finalize allocations into a tree, query vesting as the
//! clock advances, authorize and redeem claims, and trade a pool through
//! graduation.

use crate::fixtures::{self, ALICE, BOB, CAROL, DAY, TGE};
use crate::framework::{CheckLog, TestScenario};
use anyhow::{Context, Result};
use launch_amm::{PoolBook, PoolStatus, SwapDirection};
use launch_claims::{ClaimCoordinator, ClaimRequest};
use launch_merkle::MerkleAllocationSet;
use launch_types::{EngineError, PoolId};
use launch_vesting::{VestingAllocation, VestingPhase, VestingSchedule};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Allocations → tree → vesting over time → authorizations → redemption
pub struct VestingClaimLifecycle {
    pub schedule: VestingSchedule,
}

impl Default for VestingClaimLifecycle {
    fn default() -> Self {
        Self {
            schedule: fixtures::team_schedule(),
        }
    }
}

impl VestingClaimLifecycle {
    fn request(
        &self,
        set: &MerkleAllocationSet,
        allocation: &VestingAllocation,
        now: i64,
    ) -> Result<ClaimRequest> {
        let proof = set
            .proof_for(&allocation.beneficiary)
            .with_context(|| format!("no proof for {}", allocation.beneficiary))?;
        Ok(ClaimRequest {
            binding: set.binding,
            root: set.root,
            schedule: self.schedule.clone(),
            allocation: allocation.clone(),
            proof: proof.to_vec(),
            now,
        })
    }
}

impl TestScenario for VestingClaimLifecycle {
    fn name(&self) -> &str {
        "vesting_claim_lifecycle"
    }

    fn run(&self, checks: &mut CheckLog) -> Result<()> {
        let set = launch_merkle::build(&fixtures::binding(), &fixtures::allocations())?;
        checks.ensure(!set.padded, "three allocations need no padding")?;
        checks.ensure_eq(
            set.total_entitlement()?,
            1_000_000_000_000_000_000_000,
            "vault funding equals the allocation total",
        )?;

        let coordinator = ClaimCoordinator::default();
        let entitlement = set.entitlement_of(&ALICE).context("alice missing")?;
        let mut alice = VestingAllocation::new(ALICE, entitlement);

        // Before TGE the proof is valid but nothing has unlocked
        let early = coordinator.authorize(&self.request(&set, &alice, TGE - DAY)?);
        checks.ensure_eq(early, Err(EngineError::NothingToClaim), "nothing claimable before TGE")?;

        // TGE share
        let at_tge = coordinator.authorize(&self.request(&set, &alice, TGE)?)?;
        checks.ensure_eq(at_tge.amount, entitlement / 10, "TGE releases 10%")?;
        let redeemed = coordinator.consume(at_tge.id, TGE + 60)?;
        alice.record_claim(redeemed.amount)?;
        checks.ensure(
            coordinator.consume(at_tge.id, TGE + 61).is_err(),
            "authorization cannot be redeemed twice",
        )?;

        // Cliff: nothing new
        let in_cliff = TGE + 15 * DAY;
        let status = launch_vesting::vesting_status(&self.schedule, &alice, in_cliff)?;
        checks.ensure_eq(status.phase, VestingPhase::Cliff, "phase during cliff")?;
        checks.ensure_eq(status.claimable, 0, "claimable during cliff after TGE claim")?;

        // Two thirds into the linear release, on a monthly step boundary: 10% + 60%
        let midway = TGE + 30 * DAY + 60 * DAY;
        let auth = coordinator.authorize(&self.request(&set, &alice, midway)?)?;
        checks.ensure_eq(
            alice.claimed + auth.amount,
            entitlement / 100 * 70,
            "two-thirds unlock is 70% of the entitlement",
        )?;

        // An unredeemed authorization expires after the TTL
        let expired = coordinator.consume(auth.id, midway + coordinator.ttl_secs() as i64);
        checks.ensure(
            matches!(expired, Err(EngineError::AuthorizationExpired { .. })),
            "authorization expires after the TTL",
        )?;
        checks.ensure_eq(
            coordinator.registry().prune_expired(midway + DAY),
            2,
            "pruning drops both expired records",
        )?;

        // A forged amount never passes the proof check
        let mut forged = self.request(&set, &alice, midway)?;
        forged.allocation.entitlement += 1;
        checks.ensure_eq(
            coordinator.authorize(&forged),
            Err(EngineError::ProofInvalid),
            "forged entitlement is rejected",
        )?;

        // After vesting ends the remainder is claimable in one go
        let done = TGE + 121 * DAY;
        let last = coordinator.authorize(&self.request(&set, &alice, done)?)?;
        coordinator.consume(last.id, done)?;
        alice.record_claim(last.amount)?;
        checks.ensure_eq(alice.claimed, entitlement, "everything claimed after vesting ends")?;
        checks.ensure_eq(
            coordinator.authorize(&self.request(&set, &alice, done + DAY)?),
            Err(EngineError::NothingToClaim),
            "nothing left after final claim",
        )?;

        // Other beneficiaries prove independently
        for who in [BOB, CAROL] {
            let amount = set.entitlement_of(&who).context("allocation missing")?;
            let row = VestingAllocation::new(who, amount);
            let auth = coordinator.authorize(&self.request(&set, &row, done)?)?;
            checks.ensure_eq(auth.amount, amount, "fully vested beneficiary claims all")?;
        }

        info!(root = %set.root, "Vesting lifecycle complete");
        Ok(())
    }
}

/// Concurrent buyers push a pool over its graduation threshold
pub struct PoolGraduation {
    pub buyers: usize,
    pub buys_per_buyer: usize,
    pub buy_amount: u128,
    pub graduation_threshold: u128,
}

impl Default for PoolGraduation {
    fn default() -> Self {
        Self {
            buyers: 8,
            buys_per_buyer: 40,
            buy_amount: 100_000_000_000_000_000,
            graduation_threshold: 20_000_000_000_000_000_000,
        }
    }
}

impl TestScenario for PoolGraduation {
    fn name(&self) -> &str {
        "pool_graduation"
    }

    fn run(&self, checks: &mut CheckLog) -> Result<()> {
        let pool_id = PoolId::new(7);
        let book = Arc::new(PoolBook::default());
        book.insert(fixtures::launch_pool(7, self.graduation_threshold))?;

        let initial = book.snapshot(pool_id).context("pool missing")?;
        let k_initial = launch_types::math::widen(initial.virtual_base_reserve)
            * launch_types::math::widen(initial.virtual_token_reserve);

        let handles: Vec<_> = (0..self.buyers)
            .map(|_| {
                let book = Arc::clone(&book);
                let (buys, amount) = (self.buys_per_buyer, self.buy_amount);
                thread::spawn(move || {
                    (0..buys)
                        .filter(|_| {
                            book.execute_swap(pool_id, SwapDirection::Buy, amount, 0)
                                .is_ok_and(|receipt| receipt.graduated_now)
                        })
                        .count()
                })
            })
            .collect();

        let mut graduations = 0;
        for handle in handles {
            graduations += handle
                .join()
                .map_err(|_| anyhow::anyhow!("buyer thread panicked"))?;
        }

        let pool = book.snapshot(pool_id).context("pool missing")?;
        checks.ensure_eq(graduations, 1, "exactly one swap graduates the pool")?;
        checks.ensure_eq(pool.status, PoolStatus::Graduating, "pool stops at GRADUATING")?;
        checks.ensure(
            pool.actual_base_raised >= self.graduation_threshold,
            "raise reached the threshold",
        )?;

        let k_final = launch_types::math::widen(pool.virtual_base_reserve)
            * launch_types::math::widen(pool.virtual_token_reserve);
        checks.ensure(k_final <= k_initial, "reserve product never grows")?;

        let stats = book.stats();
        checks.ensure_eq(
            stats.swaps_executed + stats.swaps_rejected,
            (self.buyers * self.buys_per_buyer) as u64,
            "every swap is either executed or rejected",
        )?;

        checks.ensure(
            matches!(
                book.quote(pool_id, SwapDirection::Buy, self.buy_amount),
                Err(EngineError::PoolNotLive { .. })
            ),
            "graduated pool refuses quotes",
        )?;

        book.set_status(pool_id, PoolStatus::Migrated)?;
        checks.ensure(
            book.set_status(pool_id, PoolStatus::Live).is_err(),
            "migrated pool stays migrated",
        )?;

        Ok(())
    }
}

pub fn all_scenarios() -> Vec<Box<dyn TestScenario>> {
    vec![
        Box::new(VestingClaimLifecycle::default()),
        Box::new(VestingClaimLifecycle {
            schedule: fixtures::monthly_schedule(),
        }),
        Box::new(PoolGraduation::default()),
    ]
}
