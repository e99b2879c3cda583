//! Option strategies example.
//!
//! Prices a handful of strategies on the same underlying and prints their
//! closed-form risk profile next to a few points of the profit curve.

use derivatives_engine::options::strategy::{
    GridConfig, MarketInputs, StrategyComposer, StrategyKind,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  derivatives-engine: Option Strategies Example ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let market = MarketInputs::new(32.0, 0.25, 0.1075, 0.35)?;
    let grid = GridConfig::default();

    let strategies = [
        StrategyKind::BullCallSpread {
            lower_strike: 30.0,
            upper_strike: 34.0,
        },
        StrategyKind::BearPutSpread {
            lower_strike: 28.0,
            upper_strike: 32.0,
        },
        StrategyKind::LongStraddle { strike: 32.0 },
        StrategyKind::IronCondor {
            long_put_strike: 26.0,
            short_put_strike: 29.0,
            short_call_strike: 35.0,
            long_call_strike: 38.0,
        },
    ];

    for kind in strategies {
        let profile = StrategyComposer::compose(kind, &market, &grid)?;
        println!("{}", profile);
        for spot in [24.0, 28.0, 32.0, 36.0, 40.0] {
            println!("    at {:>6.2}: {:>8.4}", spot, profile.profit_at(spot));
        }
        println!();
    }
    Ok(())
}
