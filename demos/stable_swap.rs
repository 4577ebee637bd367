//! StableSwap walkthrough: seed a USDC/DAI pool, trade through it, ramp
//! the amplification and watch the dynamic fee react to imbalance.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example stable_swap
//! ```

use stableswap_engine::config::{FeeParameters, StableSwapConfig};
use stableswap_engine::domain::{
    AccountId, Amount, BasisPoints, Decimals, Liquidity, Token, TokenAddress, TokenPair,
};
use stableswap_engine::ledger::{InMemoryCustody, InMemoryLpLedger};
use stableswap_engine::pools::{GuardedPool, StableSwapPool, MIN_RAMP_TIME};
use stableswap_engine::traits::FromConfig;
use tracing_subscriber::EnvFilter;

const E18: u128 = 1_000_000_000_000_000_000;
const E6: u128 = 1_000_000;
const BP: u128 = 100_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,stableswap_engine=debug".into()),
        )
        .init();

    // ── 1. Tokens and configuration ─────────────────────────────────────
    let usdc = Token::new(TokenAddress::from_bytes([1u8; 32]), Decimals::new(6)?);
    let dai = Token::new(TokenAddress::from_bytes([2u8; 32]), Decimals::new(18)?);
    let pair = TokenPair::new(usdc, dai)?;

    //    A = 200, 4 bp base fee within [1 bp, 1%], surcharge 1x volatility
    let fees = FeeParameters::new(4 * BP, BP, 100 * BP, E18)?;
    let config = StableSwapConfig::new(pair, 20_000, fees, 0)?;

    let admin = AccountId::from_bytes([0xad; 32]);
    let provider = AccountId::from_bytes([0x11; 32]);
    let trader = AccountId::from_bytes([0x22; 32]);
    let treasury = AccountId::from_bytes([0x33; 32]);

    let mut custody = InMemoryCustody::new();
    for who in [provider, trader] {
        custody.credit(&who, &usdc, Amount::new(50_000_000 * E6));
        custody.credit(&who, &dai, Amount::new(50_000_000 * E18));
    }

    let pool = GuardedPool::new(
        StableSwapPool::from_config(&config)?,
        custody,
        InMemoryLpLedger::new(),
        admin,
    );

    // ── 2. Seed liquidity ───────────────────────────────────────────────
    let seeded = pool.add_liquidity(
        &provider,
        [Amount::new(10_000_000 * E6), Amount::new(10_000_000 * E18)],
        Liquidity::ZERO,
        0,
    )?;
    tracing::info!(lp_minted = %seeded.lp_minted(), "pool seeded");
    tracing::info!(state = %pool.pool_state(0)?, "initial state");

    pool.set_protocol_fee(&admin, treasury, BasisPoints::new(2_000))?;

    // ── 3. Trades of growing size ───────────────────────────────────────
    let mut now = 1;
    for size in [1_000u128, 100_000, 1_000_000, 4_000_000] {
        let quote = pool.simulate_swap(&usdc, Amount::new(size * E6), now)?;
        let out = pool.swap(&trader, &usdc, Amount::new(size * E6), quote.amount_out(), now)?;
        tracing::info!(
            usdc_in = size,
            dai_out = %out.amount_out(),
            fee_rate = out.fee_rate(),
            "trade settled"
        );
        now += 60;
    }

    let detail = pool.fee_detail()?;
    tracing::info!(
        volatility = %detail.volatility,
        current_fee = detail.current_fee,
        "fee model after imbalance"
    );
    tracing::info!(
        treasury_usdc = %pool.with_custody(|c| c.balance_of(&treasury, &usdc))?,
        "protocol fees collected"
    );

    // ── 4. Ramp A from 200 to 1000 over a week ──────────────────────────
    let end = now + 7 * MIN_RAMP_TIME;
    pool.start_ramp(&admin, 100_000, end, now)?;
    for t in [now, now + 3 * MIN_RAMP_TIME, end] {
        let status = pool.ramp_status(t)?;
        let price = pool.spot_price(&usdc, t)?;
        tracing::info!(t, a = status.current_a, state = ?status.state, %price, "ramp progress");
    }

    // ── 5. Exit ─────────────────────────────────────────────────────────
    let shares = pool.lp_balance(&provider)?;
    let exit = pool.remove_liquidity(&provider, shares, [Amount::ZERO; 2], end)?;
    tracing::info!(
        usdc = %exit.amounts()[0],
        dai = %exit.amounts()[1],
        "provider withdrew"
    );
    tracing::info!(state = %pool.pool_state(end)?, "final state");

    Ok(())
}
