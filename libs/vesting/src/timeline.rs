//! Unlock timeline for schedule previews

use crate::engine::unlocked_amount;
use crate::schedule::VestingSchedule;
use launch_types::{amount, EngineResult};
use serde::{Deserialize, Serialize};

/// Discrete steps listed before the timeline jumps to the vesting end
pub const MAX_TIMELINE_STEPS: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneKind {
    Tge,
    CliffEnd,
    Step { index: u64 },
    VestingEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockMilestone {
    pub timestamp: i64,
    pub kind: MilestoneKind,
    /// Total unlocked once this milestone is reached
    #[serde(with = "amount")]
    pub cumulative: u128,
}

/// Milestones in time order, ignoring pause status
pub fn unlock_timeline(
    schedule: &VestingSchedule,
    entitlement: u128,
) -> EngineResult<Vec<UnlockMilestone>> {
    schedule.validate()?;

    let cliff_end = schedule.cliff_end()?;
    let vesting_end = schedule.vesting_end()?;
    let milestone = |timestamp: i64, kind: MilestoneKind| -> EngineResult<UnlockMilestone> {
        Ok(UnlockMilestone {
            timestamp,
            kind,
            cumulative: unlocked_amount(schedule, entitlement, timestamp)?,
        })
    };

    let mut timeline = vec![milestone(schedule.tge_timestamp, MilestoneKind::Tge)?];
    if cliff_end > schedule.tge_timestamp {
        timeline.push(milestone(cliff_end, MilestoneKind::CliffEnd)?);
    }

    if let Some(step) = schedule.step_seconds() {
        let mut index = 1;
        while index <= MAX_TIMELINE_STEPS {
            let Some(offset) = step
                .checked_mul(index)
                .filter(|offset| *offset < schedule.vesting_seconds)
            else {
                break;
            };
            // offset < vesting_seconds, so the timestamp is before vesting_end
            timeline.push(milestone(cliff_end + offset as i64, MilestoneKind::Step { index })?);
            index += 1;
        }
    }

    if vesting_end > cliff_end {
        timeline.push(milestone(vesting_end, MilestoneKind::VestingEnd)?);
    }

    Ok(timeline)
}
