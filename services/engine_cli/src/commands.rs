//! Subcommand implementations
//!
//! Each command takes a parsed input document and returns a serializable
//! output. Engine errors are wrapped with the command name; their messages
//! already carry the offending values.

use anyhow::{Context, Result};
use launch_amm::{BondingCurveMath, FeeSplitPolicy, Pool, SwapDirection, SwapQuote};
use launch_claims::{ClaimAuthorization, ClaimCoordinator, ClaimRequest};
use launch_config::EngineConfig;
use launch_merkle::{LeafBinding, MerkleAllocation, MerkleAllocationSet};
use launch_types::{amount, Address, Hash32};
use launch_vesting::{UnlockMilestone, VestingAllocation, VestingSchedule, VestingStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct QuoteInput {
    pub pool: Pool,
    pub direction: SwapDirection,
    #[serde(with = "amount")]
    pub amount: u128,
}

#[derive(Debug, Serialize)]
pub struct QuoteOutput {
    pub quote: SwapQuote,
    /// Base units per token scaled by 1e18, before and after the swap
    #[serde(with = "amount")]
    pub spot_price_before: u128,
    #[serde(with = "amount")]
    pub spot_price_after: u128,
    #[serde(with = "amount")]
    pub price_impact_bps: u128,
}

#[derive(Debug, Deserialize)]
pub struct VestingInput {
    pub schedule: VestingSchedule,
    pub allocation: VestingAllocation,
    pub now: i64,
}

#[derive(Debug, Serialize)]
pub struct VestingOutput {
    pub status: VestingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<UnlockMilestone>>,
}

#[derive(Debug, Deserialize)]
pub struct MerkleBuildInput {
    pub binding: LeafBinding,
    pub allocations: Vec<MerkleAllocation>,
}

#[derive(Debug, Deserialize)]
pub struct MerkleVerifyInput {
    pub binding: LeafBinding,
    pub root: Hash32,
    pub beneficiary: Address,
    #[serde(with = "amount")]
    pub amount: u128,
    pub proof: Vec<Hash32>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MerkleVerifyOutput {
    pub valid: bool,
}

pub fn quote(input: QuoteInput, exact_output: bool, config: &EngineConfig) -> Result<QuoteOutput> {
    let policy = FeeSplitPolicy::new(config.fees.referral_share_bps)?;
    let pool = &input.pool;
    pool.validate().context("quote: invalid pool row")?;

    let quote = if exact_output {
        BondingCurveMath::quote_exact_output(pool, input.direction, input.amount, &policy)
    } else {
        BondingCurveMath::quote(pool, input.direction, input.amount, &policy)
    }
    .context("quote")?;

    Ok(QuoteOutput {
        spot_price_before: BondingCurveMath::spot_price_scaled(
            pool.virtual_base_reserve,
            pool.virtual_token_reserve,
        )?,
        spot_price_after: BondingCurveMath::spot_price_scaled(
            quote.new_base_reserve,
            quote.new_token_reserve,
        )?,
        price_impact_bps: BondingCurveMath::calculate_price_impact_bps(pool, &quote)?,
        quote,
    })
}

pub fn vesting(input: VestingInput, with_timeline: bool) -> Result<VestingOutput> {
    input.schedule.validate().context("vesting: invalid schedule")?;
    let status = launch_vesting::vesting_status(&input.schedule, &input.allocation, input.now)
        .context("vesting")?;
    let timeline = if with_timeline {
        Some(launch_vesting::unlock_timeline(
            &input.schedule,
            input.allocation.entitlement,
        )?)
    } else {
        None
    };
    Ok(VestingOutput { status, timeline })
}

pub fn merkle_build(input: MerkleBuildInput) -> Result<MerkleAllocationSet> {
    let set = launch_merkle::build(&input.binding, &input.allocations).context("merkle-build")?;
    info!(root = %set.root, snapshot = %set.snapshot_hash, "Allocation tree ready");
    Ok(set)
}

pub fn merkle_verify(input: MerkleVerifyInput) -> MerkleVerifyOutput {
    MerkleVerifyOutput {
        valid: launch_merkle::verify(
            &input.proof,
            &input.root,
            &input.binding,
            &input.beneficiary,
            input.amount,
        ),
    }
}

pub fn claim(request: ClaimRequest, config: &EngineConfig) -> Result<ClaimAuthorization> {
    let coordinator = ClaimCoordinator::new(config.claims.authorization_ttl_secs)?;
    coordinator.authorize(&request).context("claim")
}
