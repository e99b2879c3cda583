use derivatives_engine::core::types::{ExposureSide, IndexerKind, OptionKind, Position};
use derivatives_engine::futures::di::DiFuturesEngine;
use derivatives_engine::futures::margin::{FuturesMarginEngine, MarginConfig};
use derivatives_engine::options::pricing::{black_scholes_price, greeks};
use derivatives_engine::options::strategy::{
    GridConfig, MarketInputs, StrategyComposer, StrategyKind,
};
use derivatives_engine::swap::engine::SwapLegEngine;
use derivatives_engine::swap::params::{SwapExposure, SwapHedge};
use proptest::prelude::*;

fn arb_indexer() -> impl Strategy<Value = IndexerKind> {
    prop::sample::select(vec![
        IndexerKind::PreFixed,
        IndexerKind::PostFixed,
        IndexerKind::ExchangeRate,
    ])
}

fn arb_side() -> impl Strategy<Value = ExposureSide> {
    prop::sample::select(vec![ExposureSide::Asset, ExposureSide::Liability])
}

/// A swap where every FX fixing is supplied.
fn arb_swap() -> impl Strategy<Value = (SwapExposure, SwapHedge)> {
    (
        arb_side(),
        1_000.0..100_000_000.0f64,
        arb_indexer(),
        0.0..0.30f64,
        1u32..40,
        (arb_indexer(), arb_indexer(), 0.0..0.30f64, 0.0..0.30f64),
        (3.0..7.0f64, 3.0..7.0f64),
    )
        .prop_map(
            |(side, notional, indexer, rate, quarters, legs, (fx_start, fx_maturity))| {
                let exposure = SwapExposure {
                    side,
                    notional,
                    indexer,
                    rate,
                    quarters,
                    fx_start: Some(fx_start),
                };
                let (asset, liability, asset_rate, liability_rate) = legs;
                let hedge = SwapHedge::new(asset, liability, asset_rate, liability_rate)
                    .with_fx_maturity(fx_maturity);
                (exposure, hedge)
            },
        )
}

proptest! {
    // ===================================================================
    // Put-call parity: C - P = S - K e^{-rT}.
    // ===================================================================
    #[test]
    fn put_call_parity_holds(
        spot in 1.0..500.0f64,
        strike in 1.0..500.0f64,
        time in 0.01..5.0f64,
        rate in 0.0..0.25f64,
        vol in 0.05..1.0f64,
    ) {
        let call = black_scholes_price(spot, strike, time, rate, vol, OptionKind::Call);
        let put = black_scholes_price(spot, strike, time, rate, vol, OptionKind::Put);
        let parity = spot - strike * (-rate * time).exp();
        prop_assert!(
            (call - put - parity).abs() < 1e-8 * spot.max(strike),
            "C - P = {} but S - Ke^-rT = {}",
            call - put,
            parity
        );
    }

    // ===================================================================
    // Short Greeks are the exact negation of long Greeks.
    // ===================================================================
    #[test]
    fn short_greeks_negate_long(
        spot in 1.0..500.0f64,
        strike in 1.0..500.0f64,
        time in 0.01..5.0f64,
        vol in 0.05..1.0f64,
    ) {
        let long = greeks(spot, strike, time, 0.1, vol, OptionKind::Put, Position::Buy);
        let short = greeks(spot, strike, time, 0.1, vol, OptionKind::Put, Position::Sell);
        prop_assert_eq!(long.delta, -short.delta);
        prop_assert_eq!(long.gamma, -short.gamma);
        prop_assert_eq!(long.theta_daily, -short.theta_daily);
        prop_assert_eq!(long.vega_per_1pct, -short.vega_per_1pct);
    }

    // ===================================================================
    // Long straddle break-evens sit symmetrically around the strike.
    // ===================================================================
    #[test]
    fn straddle_breakevens_symmetric(
        spot in 10.0..200.0f64,
        strike_ratio in 0.8..1.2f64,
        vol in 0.1..0.8f64,
    ) {
        let market = MarketInputs::new(spot, 0.5, 0.1, vol).unwrap();
        let strike = spot * strike_ratio;
        let profile = StrategyComposer::compose(
            StrategyKind::LongStraddle { strike },
            &market,
            &GridConfig::default(),
        ).unwrap();
        let total = profile.summary.net_premium;
        prop_assert_eq!(profile.summary.breakevens[0], strike - total);
        prop_assert_eq!(profile.summary.breakevens[1], strike + total);
    }

    // ===================================================================
    // Margin account: never negative, and every call resets to the
    // initial margin.
    // ===================================================================
    #[test]
    fn margin_calls_reset_to_initial(
        initial in 1.0..10.0f64,
        final_price in 1.0..10.0f64,
        days in 2usize..120,
        seed in any::<u64>(),
        is_asset in any::<bool>(),
    ) {
        let config = MarginConfig::default();
        let prices = FuturesMarginEngine::simulate_daily_prices(initial, final_price, days, seed);
        let account = FuturesMarginEngine::margin_account(&prices, 1_000_000.0, is_asset, &config);
        prop_assert_eq!(account.len(), days);
        let last = account.len() - 1;
        for state in &account {
            prop_assert!(state.balance >= 0.0);
            if state.margin_call && state.day != last {
                prop_assert_eq!(state.balance, state.initial_margin);
            }
        }
    }

    // ===================================================================
    // The daily price path depends only on its inputs and seed.
    // ===================================================================
    #[test]
    fn price_path_is_deterministic(
        initial in 1.0..10.0f64,
        final_price in 1.0..10.0f64,
        days in 0usize..200,
        seed in any::<u64>(),
    ) {
        let a = FuturesMarginEngine::simulate_daily_prices(initial, final_price, days, seed);
        let b = FuturesMarginEngine::simulate_daily_prices(initial, final_price, days, seed);
        prop_assert_eq!(a, b);
    }

    // ===================================================================
    // DI round trip: a zero realized rate leaves the PU unchanged.
    // ===================================================================
    #[test]
    fn di_round_trip(rate in 0.0..0.30f64, days in 1u32..2520) {
        let pu = DiFuturesEngine::pu_at_inception(rate, days);
        prop_assert_eq!(DiFuturesEngine::pu_at_maturity(pu, 0.0), pu);
        prop_assert!(pu <= 100_000.0);
    }

    // ===================================================================
    // Swap valuation is idempotent and the series ends at the totals.
    // ===================================================================
    #[test]
    fn swap_series_ends_at_totals((exposure, hedge) in arb_swap()) {
        let total = SwapLegEngine::total_result(&exposure, &hedge).unwrap();
        let again = SwapLegEngine::total_result(&exposure, &hedge).unwrap();
        prop_assert_eq!(total, again);

        let series = SwapLegEngine::time_series(&exposure, &hedge).unwrap();
        prop_assert_eq!(series.len(), exposure.quarters as usize + 1);
        let last = series[series.len() - 1];
        prop_assert_eq!(last.exposure_value, total.exposure_result);
        let tolerance = 1e-9 * exposure.notional;
        prop_assert!((last.net_value - total.total_result).abs() < tolerance);
    }
}
