//! Graduation detection
//!
//! A pool graduates once the base asset it has actually raised reaches its
//! threshold. This module only reports progress; moving the pool to
//! `GRADUATING` is the caller's state transition.

use launch_types::{amount, math, EngineResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduationStatus {
    pub graduated: bool,
    /// floor(raised * 100 / threshold), capped at 100
    pub progress_pct: u8,
    /// Base asset still needed; zero once graduated
    #[serde(with = "amount")]
    pub remaining: u128,
}

/// Compare the amount raised against the graduation threshold.
///
/// A zero threshold counts as already graduated.
pub fn check_graduation(actual_raised: u128, threshold: u128) -> EngineResult<GraduationStatus> {
    if threshold == 0 {
        return Ok(GraduationStatus {
            graduated: true,
            progress_pct: 100,
            remaining: 0,
        });
    }

    let graduated = actual_raised >= threshold;
    let progress_pct = if graduated {
        100
    } else {
        // actual < threshold so the ratio is below 100
        math::mul_div(actual_raised, 100, threshold, "graduation progress")? as u8
    };

    Ok(GraduationStatus {
        graduated,
        progress_pct,
        remaining: threshold.saturating_sub(actual_raised),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_floors() {
        let status = check_graduation(999, 1_000).unwrap();
        assert!(!status.graduated);
        assert_eq!(status.progress_pct, 99);
        assert_eq!(status.remaining, 1);
    }

    #[test]
    fn test_reaching_threshold_graduates() {
        let status = check_graduation(1_000, 1_000).unwrap();
        assert!(status.graduated);
        assert_eq!(status.progress_pct, 100);
        assert_eq!(status.remaining, 0);

        let overshoot = check_graduation(5_000, 1_000).unwrap();
        assert!(overshoot.graduated);
        assert_eq!(overshoot.progress_pct, 100);
    }

    #[test]
    fn test_zero_threshold_is_graduated() {
        let status = check_graduation(0, 0).unwrap();
        assert!(status.graduated);
        assert_eq!(status.progress_pct, 100);
    }

    #[test]
    fn test_nothing_raised() {
        let status = check_graduation(0, 85_000_000_000).unwrap();
        assert_eq!(status.progress_pct, 0);
        assert_eq!(status.remaining, 85_000_000_000);
    }
}
