//! End-to-End Test Framework for the launch engine
//!
//! Scenarios span allocation finalization, vesting queries, claim
//! authorization and pool trading through graduation.

pub mod fixtures;
pub mod framework;
pub mod scenarios;

pub use framework::{Check, CheckLog, TestFramework, TestResult, TestScenario};
pub use scenarios::{all_scenarios, PoolGraduation, VestingClaimLifecycle};
