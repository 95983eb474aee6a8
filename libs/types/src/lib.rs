//! # Launch Engine Shared Types
//!
//! Identifiers, integer arithmetic and the error taxonomy shared by every
//! engine crate (pricing, vesting, merkle and claims).
//!
//! ## Design Philosophy
//!
//! - **No Floating Point**: every amount is an integer in the asset's smallest unit
//! - **Wide Intermediates**: products of two amounts are computed in 256 bits
//! - **Typed Bytes**: 20-byte addresses and 32-byte hashes cannot be confused
//! - **One Error Type**: all engines fail with [`EngineError`]
//!
//! ## Quick Start
//!
//! ```rust
//! use launch_types::{math, Address};
//!
//! let beneficiary: Address = "0x000000000000000000000000000000000000dEaD".parse().unwrap();
//! assert_eq!(beneficiary, Address::DEAD);
//!
//! // floor(10_000 * 150 / 10_000)
//! assert_eq!(math::bps_of(10_000, 150).unwrap(), 150);
//! ```

pub mod amount;
pub mod errors;
pub mod identifiers;
pub mod math;

pub use errors::{EngineError, ErrorKind};
pub use identifiers::{Address, Hash32, PoolId};
pub use math::{BPS_DENOMINATOR, ONE_DAY_SECONDS};

/// Result alias used across the engine crates
pub type EngineResult<T> = std::result::Result<T, EngineError>;
