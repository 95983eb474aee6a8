//! Checked integer arithmetic for on-chain-equivalent calculations
//!
//! Amounts are `u128` in the asset's smallest unit. Products of two amounts
//! (reserve invariants, entitlement × elapsed time) can exceed 128 bits, so
//! every multiply-then-divide goes through a 256-bit intermediate and is
//! narrowed back with an explicit overflow check. Rounding is always floor
//! unless the function name says `_up`, matching the contract's Solidity math.

use crate::errors::EngineError;
use ethabi::ethereum_types::U256;

/// Basis-point denominator (100% = 10_000 bps)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Seconds in one day
pub const ONE_DAY_SECONDS: i64 = 60 * 60 * 24;

/// Widen a `u128` for 256-bit intermediates
#[inline]
pub fn widen(x: u128) -> U256 {
    U256::from(x)
}

/// Narrow a 256-bit intermediate back to `u128`
pub fn narrow(x: U256, context: &'static str) -> Result<u128, EngineError> {
    if x > U256::from(u128::MAX) {
        return Err(EngineError::ArithmeticOverflow { context });
    }
    Ok(x.low_u128())
}

/// floor(x * y / z)
pub fn mul_div(x: u128, y: u128, z: u128, context: &'static str) -> Result<u128, EngineError> {
    if z == 0 {
        return Err(EngineError::ArithmeticOverflow { context });
    }
    // u128 * u128 always fits in 256 bits
    let product = widen(x) * widen(y);
    narrow(product / widen(z), context)
}

/// ceil(x * y / z)
pub fn mul_div_up(x: u128, y: u128, z: u128, context: &'static str) -> Result<u128, EngineError> {
    if z == 0 {
        return Err(EngineError::ArithmeticOverflow { context });
    }
    let product = widen(x) * widen(y);
    let divisor = widen(z);
    let (quotient, remainder) = product.div_mod(divisor);
    let rounded = if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::one()
    };
    narrow(rounded, context)
}

/// floor(amount * bps / 10_000)
pub fn bps_of(amount: u128, bps: u16) -> Result<u128, EngineError> {
    mul_div(amount, u128::from(bps), BPS_DENOMINATOR, "basis point share")
}

/// x + y
pub fn safe_add(x: u128, y: u128, context: &'static str) -> Result<u128, EngineError> {
    x.checked_add(y)
        .ok_or(EngineError::ArithmeticOverflow { context })
}

/// x - y
pub fn safe_sub(x: u128, y: u128, context: &'static str) -> Result<u128, EngineError> {
    x.checked_sub(y)
        .ok_or(EngineError::ArithmeticOverflow { context })
}

/// Big-endian 32-byte word, the ABI encoding of a `uint256`
pub fn u256_word(x: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    x.to_big_endian(&mut word);
    word
}

/// `uint256` word for a `u128` amount (upper 16 bytes zero)
pub fn u128_word(x: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&x.to_be_bytes());
    word
}

/// `uint256` word for a `u64` (chain ids, timestamps)
pub fn u64_word(x: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&x.to_be_bytes());
    word
}
