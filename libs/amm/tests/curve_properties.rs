//! Bonding Curve Property Tests
//!
//! Properties that must hold for every quote regardless of pool size, fee
//! rate or trade size.

use launch_amm::{BondingCurveMath, FeeSplitPolicy, Pool, SwapDirection};
use launch_types::{EngineError, PoolId};
use proptest::prelude::*;

fn pool_strategy() -> impl Strategy<Value = Pool> {
    (
        1_000u128..1_000_000_000_000,
        1_000u128..1_000_000_000_000_000,
        0u16..=1_000,
    )
        .prop_map(|(base, token, fee_bps)| Pool::new(PoolId::new(1), base, token, fee_bps, u128::MAX))
}

proptest! {
    #[test]
    fn prop_reserve_product_never_increases(
        pool in pool_strategy(),
        input in 1u128..10_000_000_000,
        sell in any::<bool>(),
    ) {
        let direction = if sell { SwapDirection::Sell } else { SwapDirection::Buy };
        let mut pool = pool;
        // Give sells something to pay out
        pool.actual_base_raised = pool.virtual_base_reserve;

        match BondingCurveMath::quote(&pool, direction, input, &FeeSplitPolicy::default()) {
            Ok(quote) => {
                let k_before = pool.virtual_base_reserve * pool.virtual_token_reserve;
                let k_after = quote.new_base_reserve * quote.new_token_reserve;
                prop_assert!(k_after <= k_before, "k grew from {} to {}", k_before, k_after);
                prop_assert!(quote.output_amount > 0);
            }
            Err(EngineError::InvalidInput { .. }) | Err(EngineError::InsufficientReserves { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_fee_buckets_sum_to_total(
        pool in pool_strategy(),
        input in 1u128..10_000_000_000,
        referral_share_bps in 0u16..=10_000,
    ) {
        let policy = FeeSplitPolicy::new(referral_share_bps).unwrap();
        if let Ok(quote) = BondingCurveMath::quote(&pool, SwapDirection::Buy, input, &policy) {
            prop_assert_eq!(quote.fee_split.treasury + quote.fee_split.referral_pool, quote.total_fee);
            prop_assert_eq!(quote.input_after_fee + quote.total_fee, quote.input_amount);
        }
    }

    #[test]
    fn prop_buy_then_sell_returns_no_more_than_paid(
        pool in pool_strategy(),
        input in 1u128..10_000_000_000,
    ) {
        let policy = FeeSplitPolicy::default();
        let mut pool = pool;
        let buy = match BondingCurveMath::quote(&pool, SwapDirection::Buy, input, &policy) {
            Ok(quote) => quote,
            Err(_) => return Ok(()),
        };
        pool.virtual_base_reserve = buy.new_base_reserve;
        pool.virtual_token_reserve = buy.new_token_reserve;
        pool.actual_base_raised = buy.actual_base_raised_after;

        if let Ok(sell) = BondingCurveMath::quote(&pool, SwapDirection::Sell, buy.output_amount, &policy) {
            prop_assert!(sell.output_amount <= input, "sold back for {} after paying {}", sell.output_amount, input);
        }
    }

    #[test]
    fn prop_exact_output_meets_target(
        pool in pool_strategy(),
        divisor in 2u128..1_000,
    ) {
        let desired = pool.virtual_token_reserve / divisor;
        prop_assume!(desired > 0);
        let policy = FeeSplitPolicy::default();
        if let Ok(quote) = BondingCurveMath::quote_exact_output(&pool, SwapDirection::Buy, desired, &policy) {
            prop_assert!(quote.output_amount >= desired);
        }
    }
}
