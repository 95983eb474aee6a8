//! # Launch AMM Library - Bonding-Curve Pricing Engine
//!
//! ## Purpose
//!
//! Exact integer pricing for bonding-curve launch pools. Quotes buys and sells
//! against virtual reserves with the constant-product formula, splits swap fees
//! into named buckets without losing remainder units, and reports graduation
//! progress. Results must match the launch contract to the last unit.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool rows from persistence, swap requests from handlers
//! - **Output Destinations**: Quote displays, transaction builders, migration jobs
//! - **Precision**: Native smallest-unit integers, 256-bit intermediates
//! - **Concurrency**: [`PoolBook`] serializes swaps per pool id
//!
//! ## Architecture Role
//!
//! - [`bonding_curve`]: pure quote math over explicit pool state
//! - [`fees`]: fee calculation and the treasury/referral split
//! - [`graduation`]: threshold progress
//! - [`pool_book`]: single-writer owner of live reserves
//! - [`price_cache`]: injected get/set-with-expiry cache for display prices

pub mod bonding_curve;
pub mod fees;
pub mod graduation;
pub mod pool;
pub mod pool_book;
pub mod pool_traits;
pub mod price_cache;

pub use bonding_curve::{BondingCurveMath, CurveStep, PRICE_SCALE};
pub use fees::{calculate_fee, FeeSplit, FeeSplitPolicy};
pub use graduation::{check_graduation, GraduationStatus};
pub use pool::{Pool, PoolStatus, SwapDirection, SwapQuote};
pub use pool_book::{BookStats, PoolBook, SwapReceipt};
pub use pool_traits::CurvePool;
pub use price_cache::{PriceCache, TtlPriceCache};
