//! # Launch Vesting Engine
//!
//! ## Purpose
//!
//! Computes how much of a beneficiary's entitlement has unlocked at a given
//! moment: a TGE share released at the token generation event, nothing more
//! during the cliff, then a linear (or stepwise) release until the end of the
//! vesting period.
//!
//! ## Integration Points
//!
//! - **Input Sources**: schedule rows and allocation rows from persistence
//! - **Output Destinations**: claim coordinator, dashboard status views
//! - **Clock**: every operation takes the current time as a parameter
//!
//! ## Pause Semantics
//!
//! A paused schedule is evaluated at `min(now, paused_at)` in every phase, so
//! a query made any time after the pause returns exactly what it returned at
//! the pause instant.
//!
//! ```rust
//! use launch_vesting::{unlocked_amount, IntervalType, ScheduleStatus, VestingSchedule};
//!
//! let schedule = VestingSchedule {
//!     tge_bps: 2_500,
//!     tge_timestamp: 1_000,
//!     cliff_seconds: 600,
//!     vesting_seconds: 1_800,
//!     interval: IntervalType::Continuous,
//!     status: ScheduleStatus::Active,
//! };
//! assert_eq!(unlocked_amount(&schedule, 1_000_000, 2_500).unwrap(), 625_000);
//! ```

pub mod allocation;
pub mod engine;
pub mod schedule;
pub mod timeline;

pub use allocation::VestingAllocation;
pub use engine::{
    claimable_now, phase_at, unlocked_amount, unlocked_fraction_bps, vesting_status, NextUnlock,
    VestingPhase, VestingStatus,
};
pub use schedule::{IntervalType, ScheduleStatus, VestingSchedule};
pub use timeline::{unlock_timeline, MilestoneKind, UnlockMilestone, MAX_TIMELINE_STEPS};
