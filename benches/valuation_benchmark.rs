use criterion::{black_box, criterion_group, criterion_main, Criterion};
use derivatives_engine::core::types::{ExposureSide, IndexerKind, OptionKind, Position};
use derivatives_engine::futures::margin::{FuturesMarginEngine, MarginConfig};
use derivatives_engine::options::pricing::{black_scholes_price, greeks};
use derivatives_engine::options::strategy::{
    GridConfig, MarketInputs, StrategyComposer, StrategyKind,
};
use derivatives_engine::swap::engine::SwapLegEngine;
use derivatives_engine::swap::params::{SwapExposure, SwapHedge};

fn bench_black_scholes(c: &mut Criterion) {
    c.bench_function("black_scholes_price_and_greeks", |b| {
        b.iter(|| {
            let price = black_scholes_price(
                black_box(100.0),
                black_box(105.0),
                0.5,
                0.1075,
                0.25,
                OptionKind::Call,
            );
            let g = greeks(100.0, 105.0, 0.5, 0.1075, 0.25, OptionKind::Call, Position::Buy);
            price + g.delta
        })
    });
}

fn bench_iron_condor(c: &mut Criterion) {
    let market = MarketInputs::new(100.0, 0.25, 0.1075, 0.30).unwrap();
    let kind = StrategyKind::IronCondor {
        long_put_strike: 85.0,
        short_put_strike: 95.0,
        short_call_strike: 105.0,
        long_call_strike: 115.0,
    };
    let grid = GridConfig::default();

    c.bench_function("iron_condor_100_points", |b| {
        b.iter(|| StrategyComposer::compose(black_box(kind), &market, &grid))
    });
}

fn bench_margin_account(c: &mut Criterion) {
    let config = MarginConfig::default();
    let prices = FuturesMarginEngine::simulate_daily_prices(5.0, 5.4, 252, 42);

    c.bench_function("margin_account_252_days", |b| {
        b.iter(|| FuturesMarginEngine::margin_account(black_box(&prices), 1_000_000.0, true, &config))
    });
}

fn bench_swap_series(c: &mut Criterion) {
    let exposure = SwapExposure::new(
        ExposureSide::Liability,
        10_000_000.0,
        IndexerKind::ExchangeRate,
        0.06,
        40,
        Some(5.0),
    )
    .unwrap();
    let hedge = SwapHedge::new(IndexerKind::ExchangeRate, IndexerKind::PostFixed, 0.0, 0.9)
        .with_asset_cupom(0.06)
        .with_fx_maturity(6.2);

    c.bench_function("swap_time_series_40_quarters", |b| {
        b.iter(|| SwapLegEngine::time_series(black_box(&exposure), &hedge))
    });
}

criterion_group!(
    benches,
    bench_black_scholes,
    bench_iron_condor,
    bench_margin_account,
    bench_swap_series
);
criterion_main!(benches);
