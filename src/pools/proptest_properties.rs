//! Property-based tests using `proptest` for curve and pool invariants.
//!
//! 1. **Solver convergence**: `D` exists and sits between `2·min(x, y)`
//!    and `x + y` for imbalances up to 1:10⁶ in either direction.
//! 2. **Invariant monotonicity**: growing either balance never lowers `D`.
//! 3. **Swap reversibility**: round-trip A→B→A returns ≤ original.
//! 4. **Invariant preservation**: `D` does not fall across a swap.
//! 5. **Liquidity conservation**: remove then re-add restores the
//!    reserves and mints back the burned shares up to rounding dust.
//! 6. **Fee bounds**: the dynamic fee stays within `[min_fee, max_fee]`.
//! 7. **Ramp monotonicity**: `A` moves one way between the endpoints.

use primitive_types::U256;
use proptest::prelude::*;

use super::{AmplificationRamp, DynamicFeeModel, StableSwapPool, MIN_RAMP_TIME};
use crate::config::{FeeParameters, StableSwapConfig};
use crate::domain::{Amount, Decimals, Liquidity, Token, TokenAddress, TokenPair};
use crate::error::AmmError;
use crate::math::{calculate_invariant, A_PRECISION, MAX_A};
use crate::traits::FromConfig;

const E18: u128 = 1_000_000_000_000_000_000;
const BP: u128 = 100_000_000_000_000;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok_a() -> Token {
    let Ok(d) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    Token::new(TokenAddress::from_bytes([1u8; 32]), d)
}

fn tok_b() -> Token {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    Token::new(TokenAddress::from_bytes([2u8; 32]), d)
}

/// Pool over an 18-decimal and a 6-decimal token seeded with the same
/// nominal value on both sides.
fn seeded_pool(amp: u128, nominal: u128, base_fee: u128) -> (StableSwapPool, Liquidity) {
    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("valid pair");
    };
    let Ok(fees) = FeeParameters::new(base_fee, 0, 100 * BP, 0) else {
        panic!("valid fees");
    };
    let Ok(cfg) = StableSwapConfig::new(pair, amp, fees, 0) else {
        panic!("valid config");
    };
    let Ok(mut pool) = StableSwapPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok(out) = pool.add_liquidity(
        [Amount::new(nominal * E18), Amount::new(nominal * 1_000_000)],
        Liquidity::ZERO,
        Liquidity::ZERO,
        0,
    ) else {
        panic!("seed deposit");
    };
    (pool, out.lp_minted())
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn amplification_strategy() -> impl Strategy<Value = u128> {
    A_PRECISION..=500_000u128
}

/// Nominal reserve per side, in whole tokens.
fn nominal_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=100_000_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Solver convergence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_converges_within_bounds(
        small in 1_000_000_000_000u128..=1_000_000_000_000_000_000_000_000u128,
        ratio in 1u128..=1_000_000u128,
        small_first in any::<bool>(),
        amp in 1u128..=MAX_A,
    ) {
        let large = small * ratio;
        let (x, y) = if small_first { (small, large) } else { (large, small) };
        let balances = [U256::from(x), U256::from(y)];
        let Ok(d) = calculate_invariant(&balances, amp) else {
            return Err(TestCaseError::fail("solver must converge"));
        };
        let sum = U256::from(x) + U256::from(y);
        let lower = U256::from(x.min(y)) * U256::from(2u8);
        prop_assert!(d <= sum + U256::one(), "D={} above sum={}", d, sum);
        prop_assert!(d + U256::one() >= lower, "D={} below 2·min={}", d, lower);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Invariant monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_grows_with_either_balance(
        small in 1_000_000_000_000u128..=1_000_000_000_000_000_000_000_000u128,
        ratio in 1u128..=100_000u128,
        small_first in any::<bool>(),
        bump_pct in 1u128..=100u128,
        amp in A_PRECISION..=MAX_A,
    ) {
        let large = small * ratio;
        let (x, y) = if small_first { (small, large) } else { (large, small) };
        let Ok(base) = calculate_invariant(&[U256::from(x), U256::from(y)], amp) else {
            return Err(TestCaseError::fail("base invariant"));
        };
        let grown_x = [U256::from(x + x / 100 * bump_pct + 1), U256::from(y)];
        let grown_y = [U256::from(x), U256::from(y + y / 100 * bump_pct + 1)];
        for grown in [grown_x, grown_y] {
            let Ok(d) = calculate_invariant(&grown, amp) else {
                return Err(TestCaseError::fail("grown invariant"));
            };
            // Both solves stop within one unit of their roots.
            prop_assert!(d + U256::from(2u8) >= base, "D fell from {} to {}", base, d);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_round_trip_loses_value(
        amp in amplification_strategy(),
        nominal in nominal_strategy(),
        fraction in 1u128..=500u128,
    ) {
        let (mut pool, _) = seeded_pool(amp, nominal, 4 * BP);
        let swap_in = nominal * E18 / 1_000 * fraction;

        let ab = match pool.swap(&tok_a(), Amount::new(swap_in), Amount::ZERO, 1) {
            Ok(outcome) => outcome,
            Err(AmmError::InsufficientLiquidity | AmmError::OutputExceedsBalance) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(format!("first leg failed: {e}"))),
        };
        let ba = match pool.swap(&tok_b(), ab.amount_out(), Amount::ZERO, 2) {
            Ok(outcome) => outcome,
            Err(AmmError::InsufficientLiquidity | AmmError::OutputExceedsBalance) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(format!("second leg failed: {e}"))),
        };

        prop_assert!(
            ba.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            ba.amount_out().get(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4: Invariant preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_does_not_shrink_invariant(
        amp in amplification_strategy(),
        nominal in nominal_strategy(),
        fraction in 1u128..=900u128,
        sell_b in any::<bool>(),
    ) {
        let (mut pool, _) = seeded_pool(amp, nominal, 0);
        let Ok(before) = pool.invariant(1) else {
            return Err(TestCaseError::fail("invariant before"));
        };
        let (token, amount) = if sell_b {
            (tok_b(), nominal * 1_000_000 / 1_000 * fraction)
        } else {
            (tok_a(), nominal * E18 / 1_000 * fraction)
        };
        if pool.swap(&token, Amount::new(amount), Amount::ZERO, 1).is_err() {
            return Ok(());
        }
        let Ok(after) = pool.invariant(1) else {
            return Err(TestCaseError::fail("invariant after"));
        };
        // Solver tolerance is one unit per iteration exit; allow a few.
        prop_assert!(
            after + U256::from(4u8) >= before,
            "D fell across swap: before={} after={}",
            before, after
        );
    }
}

// ---------------------------------------------------------------------------
// Property 5: Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_remove_then_add_restores_position(
        amp in amplification_strategy(),
        nominal in nominal_strategy(),
        percent in 1u128..=99u128,
    ) {
        let (mut pool, supply) = seeded_pool(amp, nominal, 0);
        let original = pool.balances();
        let burn = Liquidity::new(supply.get() / 100 * percent);
        let Ok(removed) = pool.remove_liquidity(burn, [Amount::ZERO; 2], supply, 1) else {
            return Err(TestCaseError::fail("withdrawal"));
        };
        let Some(remaining) = supply.checked_sub(&burn) else {
            return Err(TestCaseError::fail("burn exceeds supply"));
        };
        let Ok(added) = pool.add_liquidity(removed.amounts(), Liquidity::ZERO, remaining, 2) else {
            return Err(TestCaseError::fail("re-deposit"));
        };

        for (now, before) in pool.balances().iter().zip(original) {
            prop_assert!(now.get().abs_diff(before.get()) <= 1, "reserve {} != {}", now, before);
        }

        let (minted, burned) = (added.lp_minted().get(), burn.get());
        // One share of slack for the solver's exit tolerance on D.
        prop_assert!(minted <= burned + 1, "re-deposit minted {} > burned {}", minted, burned);
        // Withdrawals floor each asset to raw units: one unit of the
        // 6-decimal token is 1e12 invariant units, and the seed mints
        // one share per invariant unit.
        let dust = 1_000_000_000_000 + 8;
        prop_assert!(minted + dust >= burned, "re-deposit minted {} << burned {}", minted, burned);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Fee bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_dynamic_fee_within_bounds(
        min_fee in 0u128..=10 * BP,
        spread in 0u128..=50 * BP,
        over_min in 0u128..=50 * BP,
        multiplier in 0u128..=1_000 * E18,
        volatility in any::<u128>(),
    ) {
        let base_fee = min_fee + over_min.min(spread);
        let max_fee = min_fee + spread;
        let Ok(params) = FeeParameters::new(base_fee, min_fee, max_fee, multiplier) else {
            return Ok(());
        };
        let model = DynamicFeeModel::new(params, 0).with_volatility(U256::from(volatility));
        let fee = model.calculate_dynamic_fee();
        prop_assert!(fee >= min_fee && fee <= max_fee, "fee {} outside [{}, {}]", fee, min_fee, max_fee);
        prop_assert!(fee >= base_fee.min(max_fee));
    }
}

// ---------------------------------------------------------------------------
// Property 7: Ramp monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_ramp_moves_monotonically(
        start in A_PRECISION..=100_000u128,
        factor_pct in 10u128..=1_000u128,
        duration in (MIN_RAMP_TIME + 1)..=(30 * MIN_RAMP_TIME),
        t1 in 0u64..=(40 * MIN_RAMP_TIME),
        dt in 0u64..=(10 * MIN_RAMP_TIME),
    ) {
        let target = (start * factor_pct / 100).clamp(A_PRECISION, MAX_A);
        let Ok(mut ramp) = AmplificationRamp::new(start, 0) else {
            return Err(TestCaseError::fail("valid start"));
        };
        if ramp.start_ramp(target, duration, 0).is_err() {
            return Ok(());
        }
        let t2 = t1 + dt;
        let (a1, a2) = (ramp.current_a(t1), ramp.current_a(t2));
        let (lo, hi) = (start.min(target), start.max(target));

        prop_assert!(a1 >= lo && a1 <= hi);
        prop_assert!(a2 >= lo && a2 <= hi);
        if target >= start {
            prop_assert!(a2 >= a1);
        } else {
            prop_assert!(a2 <= a1);
        }
        if t2 >= duration {
            prop_assert_eq!(a2, target);
        }
    }
}
