//! Vesting schedule records

use launch_types::{EngineError, EngineResult, BPS_DENOMINATOR};
use serde::{Deserialize, Serialize};

/// How the post-cliff release advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalType {
    /// Every second releases its share
    Continuous,
    /// Releases happen only at multiples of `step_seconds` after the cliff
    Discrete { step_seconds: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Active,
    /// Unlocks are frozen at `paused_at`
    Paused { paused_at: i64 },
}

/// Release rules shared by every allocation in a vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Share of the entitlement released at TGE (0..=10000)
    pub tge_bps: u16,
    /// Unix seconds of the token generation event
    pub tge_timestamp: i64,
    /// Seconds after TGE before linear release starts
    pub cliff_seconds: u64,
    /// Length of the linear release after the cliff
    pub vesting_seconds: u64,
    pub interval: IntervalType,
    pub status: ScheduleStatus,
}

impl VestingSchedule {
    pub fn validate(&self) -> EngineResult<()> {
        if u128::from(self.tge_bps) > BPS_DENOMINATOR {
            return Err(EngineError::invalid(format!(
                "tge_bps {} exceeds {}",
                self.tge_bps, BPS_DENOMINATOR
            )));
        }
        if self.tge_timestamp < 0 {
            return Err(EngineError::invalid("tge_timestamp must not be negative"));
        }
        if let IntervalType::Discrete { step_seconds } = self.interval {
            if step_seconds == 0 {
                return Err(EngineError::invalid("discrete step_seconds must be positive"));
            }
        }
        // Surfaces timestamp overflow at load time instead of at query time
        self.vesting_end()?;
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.status, ScheduleStatus::Paused { .. })
    }

    /// Clock the schedule is evaluated at: `now`, or the pause instant if earlier
    pub fn effective_time(&self, now: i64) -> i64 {
        match self.status {
            ScheduleStatus::Active => now,
            ScheduleStatus::Paused { paused_at } => now.min(paused_at),
        }
    }

    /// First second of the post-cliff release
    pub fn cliff_end(&self) -> EngineResult<i64> {
        offset(self.tge_timestamp, self.cliff_seconds, "cliff end timestamp")
    }

    /// First second at which the whole entitlement is unlocked
    pub fn vesting_end(&self) -> EngineResult<i64> {
        offset(self.cliff_end()?, self.vesting_seconds, "vesting end timestamp")
    }

    pub fn step_seconds(&self) -> Option<u64> {
        match self.interval {
            IntervalType::Continuous => None,
            IntervalType::Discrete { step_seconds } => Some(step_seconds),
        }
    }
}

fn offset(base: i64, seconds: u64, context: &'static str) -> EngineResult<i64> {
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| base.checked_add(secs))
        .ok_or(EngineError::ArithmeticOverflow { context })
}
