//! Shared vault, schedule and pool fixtures

use launch_amm::Pool;
use launch_merkle::{LeafBinding, MerkleAllocation};
use launch_types::{Address, Hash32, PoolId};
use launch_vesting::{IntervalType, ScheduleStatus, VestingSchedule};

pub const VAULT: Address = Address::new([0x5a; 20]);
pub const ALICE: Address = Address::new([0xa1; 20]);
pub const BOB: Address = Address::new([0xb2; 20]);
pub const CAROL: Address = Address::new([0xc3; 20]);

pub const CHAIN_ID: u64 = 137;
pub const TGE: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;

pub fn binding() -> LeafBinding {
    LeafBinding::new(VAULT, CHAIN_ID, Hash32::new([0x99; 32]))
}

/// 10% at TGE, 30-day cliff, 90 days of linear release
pub fn team_schedule() -> VestingSchedule {
    VestingSchedule {
        tge_bps: 1_000,
        tge_timestamp: TGE,
        cliff_seconds: 30 * DAY as u64,
        vesting_seconds: 90 * DAY as u64,
        interval: IntervalType::Continuous,
        status: ScheduleStatus::Active,
    }
}

/// Same shape released in monthly steps
pub fn monthly_schedule() -> VestingSchedule {
    VestingSchedule {
        interval: IntervalType::Discrete {
            step_seconds: 30 * DAY as u64,
        },
        ..team_schedule()
    }
}

pub fn allocations() -> Vec<MerkleAllocation> {
    vec![
        MerkleAllocation::new(ALICE, 600_000_000_000_000_000_000),
        MerkleAllocation::new(BOB, 300_000_000_000_000_000_000),
        MerkleAllocation::new(CAROL, 100_000_000_000_000_000_000),
    ]
}

/// 30 base / 1.073B token virtual reserves in 18-decimal units, 1% fee
pub fn launch_pool(id: u64, graduation_threshold: u128) -> Pool {
    Pool::new(
        PoolId::new(id),
        30_000_000_000_000_000_000,
        1_073_000_000_000_000_000_000_000_000,
        100,
        graduation_threshold,
    )
}
