//! Entitlement computation
//!
//! `unlocked_amount` and `unlocked_fraction_bps` evaluate the curve at an
//! effective time the caller already resolved. `claimable_now` and
//! `vesting_status` take the wall clock and apply the pause rule themselves.

use crate::allocation::VestingAllocation;
use crate::schedule::VestingSchedule;
use launch_types::math::{bps_of, mul_div, mul_div_up, safe_sub};
use launch_types::{amount, EngineError, EngineResult, BPS_DENOMINATOR, ONE_DAY_SECONDS};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VestingPhase {
    PreTge,
    /// TGE share released, linear release not started
    Cliff,
    Linear,
    FullyVested,
}

/// The next moment the unlocked amount grows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextUnlock {
    /// Tokens that become claimable at `timestamp`
    #[serde(with = "amount")]
    pub amount: u128,
    pub timestamp: i64,
    /// Whole days from the query time, rounded up
    pub days_until: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingStatus {
    #[serde(with = "amount")]
    pub entitlement: u128,
    #[serde(with = "amount")]
    pub unlocked: u128,
    #[serde(with = "amount")]
    pub claimed: u128,
    #[serde(with = "amount")]
    pub claimable: u128,
    #[serde(with = "amount")]
    pub locked: u128,
    pub unlocked_bps: u16,
    pub phase: VestingPhase,
    pub paused: bool,
    /// Clock the figures were computed at
    pub effective_time: i64,
    pub next_unlock: Option<NextUnlock>,
}

/// Tokens unlocked out of `entitlement` at `effective_time`
pub fn unlocked_amount(
    schedule: &VestingSchedule,
    entitlement: u128,
    effective_time: i64,
) -> EngineResult<u128> {
    if effective_time < schedule.tge_timestamp {
        return Ok(0);
    }

    let tge_amount = bps_of(entitlement, schedule.tge_bps)?;
    let cliff_end = schedule.cliff_end()?;
    if effective_time < cliff_end {
        return Ok(tge_amount);
    }
    if schedule.vesting_seconds == 0 || effective_time >= schedule.vesting_end()? {
        return Ok(entitlement);
    }

    let linear_total = safe_sub(entitlement, tge_amount, "linear vesting share")?;
    let elapsed = vested_elapsed(schedule, effective_time.abs_diff(cliff_end))?;
    let released = mul_div(
        linear_total,
        u128::from(elapsed),
        u128::from(schedule.vesting_seconds),
        "linear vesting release",
    )?;

    Ok(tge_amount + released)
}

/// Unlocked share at `effective_time` in basis points, floored
pub fn unlocked_fraction_bps(schedule: &VestingSchedule, effective_time: i64) -> EngineResult<u16> {
    let bps = unlocked_amount(schedule, BPS_DENOMINATOR, effective_time)?;
    u16::try_from(bps).map_err(|_| EngineError::ArithmeticOverflow {
        context: "unlocked fraction",
    })
}

/// Unlocked minus already claimed, never negative
pub fn claimable_now(
    schedule: &VestingSchedule,
    allocation: &VestingAllocation,
    now: i64,
) -> EngineResult<u128> {
    let unlocked = unlocked_amount(
        schedule,
        allocation.entitlement,
        schedule.effective_time(now),
    )?;
    Ok(unlocked.saturating_sub(allocation.claimed))
}

pub fn vesting_status(
    schedule: &VestingSchedule,
    allocation: &VestingAllocation,
    now: i64,
) -> EngineResult<VestingStatus> {
    allocation.validate()?;

    let effective_time = schedule.effective_time(now);
    let entitlement = allocation.entitlement;
    let unlocked = unlocked_amount(schedule, entitlement, effective_time)?;
    let next_unlock = if schedule.is_paused() {
        None
    } else {
        next_unlock(schedule, entitlement, unlocked, now)?
    };

    let status = VestingStatus {
        entitlement,
        unlocked,
        claimed: allocation.claimed,
        claimable: unlocked.saturating_sub(allocation.claimed),
        locked: entitlement - unlocked,
        unlocked_bps: unlocked_fraction_bps(schedule, effective_time)?,
        phase: phase_at(schedule, effective_time)?,
        paused: schedule.is_paused(),
        effective_time,
        next_unlock,
    };

    debug!(
        beneficiary = %allocation.beneficiary,
        unlocked = status.unlocked,
        claimable = status.claimable,
        phase = ?status.phase,
        "Computed vesting status"
    );

    Ok(status)
}

pub fn phase_at(schedule: &VestingSchedule, effective_time: i64) -> EngineResult<VestingPhase> {
    let phase = if effective_time < schedule.tge_timestamp {
        VestingPhase::PreTge
    } else if effective_time < schedule.cliff_end()? {
        VestingPhase::Cliff
    } else if effective_time < schedule.vesting_end()? {
        VestingPhase::Linear
    } else {
        VestingPhase::FullyVested
    };
    Ok(phase)
}

/// Round post-cliff elapsed time down to the last completed step
fn vested_elapsed(schedule: &VestingSchedule, elapsed: u64) -> EngineResult<u64> {
    match schedule.step_seconds() {
        None => Ok(elapsed),
        Some(step) => {
            let partial = elapsed
                .checked_rem(step)
                .ok_or_else(|| EngineError::invalid("discrete step_seconds must be positive"))?;
            Ok(elapsed - partial)
        }
    }
}

/// Where the unlocked amount next increases, for an active schedule.
///
/// Before TGE with a non-zero TGE share that is the TGE itself. Otherwise a
/// continuous schedule reports the end of vesting with everything still
/// locked, and a discrete schedule reports the first step boundary that
/// actually releases tokens.
fn next_unlock(
    schedule: &VestingSchedule,
    entitlement: u128,
    unlocked: u128,
    now: i64,
) -> EngineResult<Option<NextUnlock>> {
    if unlocked >= entitlement {
        return Ok(None);
    }

    let tge_amount = bps_of(entitlement, schedule.tge_bps)?;
    if now < schedule.tge_timestamp && tge_amount > 0 {
        // With no cliff and no vesting the TGE releases everything
        let amount = unlocked_amount(schedule, entitlement, schedule.tge_timestamp)? - unlocked;
        return Ok(Some(unlock_at(schedule.tge_timestamp, amount, now)));
    }

    let cliff_end = schedule.cliff_end()?;
    let vesting_end = schedule.vesting_end()?;
    let target = match schedule.step_seconds() {
        Some(step) if schedule.vesting_seconds > 0 => {
            let since_cliff = if now > cliff_end {
                now.abs_diff(cliff_end)
            } else {
                0
            };
            let completed = vested_elapsed(schedule, since_cliff)?;
            let linear_total = safe_sub(entitlement, tge_amount, "linear vesting share")?;
            let vesting_seconds = u128::from(schedule.vesting_seconds);
            let released = mul_div(
                linear_total,
                u128::from(completed),
                vesting_seconds,
                "linear vesting release",
            )?;

            // Earliest elapsed time releasing one more unit, rounded up to a step
            let needed = mul_div_up(released + 1, vesting_seconds, linear_total, "next unlock")?;
            let step = u128::from(step);
            let boundary = needed.div_ceil(step).saturating_mul(step);
            if boundary >= vesting_seconds {
                vesting_end
            } else {
                // boundary < vesting_seconds, which fits in u64
                cliff_end + boundary as i64
            }
        }
        _ => vesting_end,
    };

    let amount = unlocked_amount(schedule, entitlement, target)? - unlocked;
    Ok(Some(unlock_at(target, amount, now)))
}

fn unlock_at(timestamp: i64, amount: u128, now: i64) -> NextUnlock {
    let secs = if timestamp > now {
        timestamp.abs_diff(now)
    } else {
        0
    };
    NextUnlock {
        amount,
        timestamp,
        days_until: secs.div_ceil(ONE_DAY_SECONDS.unsigned_abs()),
    }
}
