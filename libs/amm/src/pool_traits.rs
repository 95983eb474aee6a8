//! Pool trait definitions for a unified pricing interface

use crate::{BondingCurveMath, FeeSplitPolicy, Pool, SwapDirection, SwapQuote};
use launch_types::EngineResult;

/// Unified pool interface used by [`crate::PoolBook`] and callers that hold
/// pool rows directly
pub trait CurvePool {
    /// Quote a swap of a given input
    fn get_amount_out(
        &self,
        direction: SwapDirection,
        amount_in: u128,
        policy: &FeeSplitPolicy,
    ) -> EngineResult<SwapQuote>;

    /// Quote the cheapest swap that pays out at least `amount_out`
    fn get_amount_in(
        &self,
        direction: SwapDirection,
        amount_out: u128,
        policy: &FeeSplitPolicy,
    ) -> EngineResult<SwapQuote>;

    /// (virtual base reserve, virtual token reserve)
    fn get_reserves(&self) -> (u128, u128);

    fn get_fee_bps(&self) -> u16;
}

impl CurvePool for Pool {
    fn get_amount_out(
        &self,
        direction: SwapDirection,
        amount_in: u128,
        policy: &FeeSplitPolicy,
    ) -> EngineResult<SwapQuote> {
        BondingCurveMath::quote(self, direction, amount_in, policy)
    }

    fn get_amount_in(
        &self,
        direction: SwapDirection,
        amount_out: u128,
        policy: &FeeSplitPolicy,
    ) -> EngineResult<SwapQuote> {
        BondingCurveMath::quote_exact_output(self, direction, amount_out, policy)
    }

    fn get_reserves(&self) -> (u128, u128) {
        (self.virtual_base_reserve, self.virtual_token_reserve)
    }

    fn get_fee_bps(&self) -> u16 {
        self.fee_bps
    }
}
