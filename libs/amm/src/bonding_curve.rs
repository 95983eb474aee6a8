//! Constant-product bonding-curve math with exact integer calculations
//!
//! Mirrors the launch contract bit for bit: the fee is taken from the input
//! first, the remaining input moves the curve, and the paid-out reserve is
//! recomputed as `floor(k / new_reserve_in)`. Intermediates are 256-bit so
//! the reserve product `k` never overflows.

use crate::fees::{calculate_fee, FeeSplitPolicy};
use crate::graduation::check_graduation;
use crate::pool::{Pool, SwapDirection, SwapQuote};
use ethabi::ethereum_types::U256;
use launch_types::math::{self, narrow, widen, BPS_DENOMINATOR};
use launch_types::{EngineError, EngineResult};
use tracing::debug;

/// Scale of [`BondingCurveMath::spot_price_scaled`] (1e18)
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Reserve movement produced by one exchange against the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveStep {
    pub amount_out: u128,
    pub new_reserve_in: u128,
    pub new_reserve_out: u128,
}

/// Bonding-curve math functions with zero precision loss
pub struct BondingCurveMath;

impl BondingCurveMath {
    /// Exchange an already fee-reduced input against `x * y = k`
    ///
    /// # Arguments
    /// * `amount_in_after_fee` - Input reaching the curve (smallest unit)
    /// * `reserve_in` - Reserve on the side being paid in
    /// * `reserve_out` - Reserve on the side being paid out
    pub fn calculate_output_amount(
        amount_in_after_fee: u128,
        reserve_in: u128,
        reserve_out: u128,
    ) -> EngineResult<CurveStep> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(EngineError::invalid("reserves must be positive"));
        }

        let k = widen(reserve_in) * widen(reserve_out);
        let new_reserve_in = math::safe_add(reserve_in, amount_in_after_fee, "reserve in")?;
        let new_reserve_out = narrow(k / widen(new_reserve_in), "reserve out")?;
        let amount_out = reserve_out - new_reserve_out;

        Ok(CurveStep {
            amount_out,
            new_reserve_in,
            new_reserve_out,
        })
    }

    /// Gross input (fee included) needed to receive at least `amount_out`.
    ///
    /// Rounds up at both steps so the forward quote of the returned input
    /// never pays out less than requested.
    pub fn calculate_input_amount(
        amount_out: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_bps: u16,
    ) -> EngineResult<u128> {
        if amount_out == 0 {
            return Err(EngineError::invalid("output amount must be positive"));
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(EngineError::invalid("reserves must be positive"));
        }
        if amount_out >= reserve_out {
            return Err(EngineError::InsufficientReserves {
                requested: amount_out,
                available: reserve_out.saturating_sub(1),
            });
        }
        if u128::from(fee_bps) >= BPS_DENOMINATOR {
            return Err(EngineError::invalid(
                "exact-output quotes need a fee below 100%",
            ));
        }

        let new_reserve_out = reserve_out - amount_out;
        // ceil(k / new_reserve_out)
        let k = widen(reserve_in) * widen(reserve_out);
        let (quotient, remainder) = k.div_mod(widen(new_reserve_out));
        let new_reserve_in = if remainder.is_zero() {
            quotient
        } else {
            quotient + U256::one()
        };
        let after_fee = narrow(new_reserve_in - widen(reserve_in), "input after fee")?;

        math::mul_div_up(
            after_fee,
            BPS_DENOMINATOR,
            BPS_DENOMINATOR - u128::from(fee_bps),
            "gross input",
        )
    }

    /// Price a swap of `input_amount` against `pool`
    pub fn quote(
        pool: &Pool,
        direction: SwapDirection,
        input_amount: u128,
        policy: &FeeSplitPolicy,
    ) -> EngineResult<SwapQuote> {
        if input_amount == 0 {
            return Err(EngineError::invalid("input amount must be positive"));
        }
        pool.validate()?;
        if !pool.is_live() {
            return Err(EngineError::PoolNotLive {
                status: pool.status.to_string(),
            });
        }

        let total_fee = calculate_fee(input_amount, pool.fee_bps)?;
        let input_after_fee = input_amount - total_fee;
        let (reserve_in, reserve_out) = pool.reserves_for(direction);

        let step = Self::calculate_output_amount(input_after_fee, reserve_in, reserve_out)?;

        if step.amount_out >= reserve_out {
            return Err(EngineError::InsufficientReserves {
                requested: step.amount_out,
                available: reserve_out.saturating_sub(1),
            });
        }
        if step.amount_out == 0 {
            return Err(EngineError::invalid(format!(
                "input {} is too small to move the curve",
                input_amount
            )));
        }

        let (new_base_reserve, new_token_reserve, actual_base_raised_after) = match direction {
            SwapDirection::Buy => (
                step.new_reserve_in,
                step.new_reserve_out,
                math::safe_add(pool.actual_base_raised, input_after_fee, "actual raised")?,
            ),
            SwapDirection::Sell => {
                // Virtual base liquidity cannot be paid out, only what was raised
                if step.amount_out > pool.actual_base_raised {
                    return Err(EngineError::InsufficientReserves {
                        requested: step.amount_out,
                        available: pool.actual_base_raised,
                    });
                }
                (
                    step.new_reserve_out,
                    step.new_reserve_in,
                    pool.actual_base_raised - step.amount_out,
                )
            }
        };

        let fee_split = policy.split(total_fee)?;
        let graduation = check_graduation(actual_base_raised_after, pool.graduation_threshold)?;

        debug!(
            pool = %pool.id,
            ?direction,
            input_amount,
            output_amount = step.amount_out,
            total_fee,
            "Quoted swap"
        );

        Ok(SwapQuote {
            direction,
            input_amount,
            input_after_fee,
            output_amount: step.amount_out,
            total_fee,
            fee_split,
            new_base_reserve,
            new_token_reserve,
            actual_base_raised_after,
            graduation,
        })
    }

    /// Price the cheapest swap that pays out at least `desired_output`
    pub fn quote_exact_output(
        pool: &Pool,
        direction: SwapDirection,
        desired_output: u128,
        policy: &FeeSplitPolicy,
    ) -> EngineResult<SwapQuote> {
        pool.validate()?;
        if !pool.is_live() {
            return Err(EngineError::PoolNotLive {
                status: pool.status.to_string(),
            });
        }
        let (reserve_in, reserve_out) = pool.reserves_for(direction);
        let input = Self::calculate_input_amount(desired_output, reserve_in, reserve_out, pool.fee_bps)?;
        Self::quote(pool, direction, input, policy)
    }

    /// Base asset per whole token, scaled by [`PRICE_SCALE`]
    pub fn spot_price_scaled(base_reserve: u128, token_reserve: u128) -> EngineResult<u128> {
        if token_reserve == 0 {
            return Err(EngineError::invalid("token reserve must be positive"));
        }
        math::mul_div(base_reserve, PRICE_SCALE, token_reserve, "spot price")
    }

    /// How far the quoted swap moves the spot price, in bps of the price before
    pub fn calculate_price_impact_bps(pool: &Pool, quote: &SwapQuote) -> EngineResult<u128> {
        if pool.virtual_token_reserve == 0 || quote.new_token_reserve == 0 {
            return Err(EngineError::invalid("token reserve must be positive"));
        }
        // Prices stay in 256 bits: base * 1e18 can exceed u128 for 18-decimal assets
        let scale = widen(PRICE_SCALE);
        let before = widen(pool.virtual_base_reserve) * scale / widen(pool.virtual_token_reserve);
        let after = widen(quote.new_base_reserve) * scale / widen(quote.new_token_reserve);
        if before.is_zero() {
            return Err(EngineError::invalid("spot price rounds to zero"));
        }
        let delta = if after > before { after - before } else { before - after };
        narrow(delta * widen(BPS_DENOMINATOR) / before, "price impact")
    }
}
