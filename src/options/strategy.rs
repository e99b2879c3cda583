use crate::core::error::{ensure_non_negative, ensure_positive, ValuationError};
use crate::core::types::{OptionKind, OptionStyle, Position};
use crate::options::contract::OptionContract;
use serde::{Deserialize, Serialize};

/// Market state shared by every leg of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInputs {
    pub spot: f64,
    pub time_to_maturity: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
}

impl MarketInputs {
    pub fn new(
        spot: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<Self, ValuationError> {
        let market = Self {
            spot,
            time_to_maturity,
            risk_free_rate,
            volatility,
        };
        market.validate()?;
        Ok(market)
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("time_to_maturity", self.time_to_maturity)?;
        ensure_non_negative("risk_free_rate", self.risk_free_rate)?;
        ensure_positive("volatility", self.volatility)
    }

    fn option(&self, kind: OptionKind, position: Position, strike: f64) -> OptionContract {
        OptionContract {
            style: OptionStyle::European,
            kind,
            position,
            spot: self.spot,
            strike,
            time_to_maturity: self.time_to_maturity,
            risk_free_rate: self.risk_free_rate,
            volatility: self.volatility,
        }
    }
}

/// Supported strategies with their independently configurable strikes.
///
/// Multi-strike strategies require strictly increasing strikes in the
/// order the fields are declared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy")]
pub enum StrategyKind {
    LongCall { strike: f64 },
    LongPut { strike: f64 },
    /// Long stock plus a short call.
    CoveredCall { strike: f64 },
    /// Long stock plus a long put.
    ProtectivePut { strike: f64 },
    BullCallSpread { lower_strike: f64, upper_strike: f64 },
    BearPutSpread { lower_strike: f64, upper_strike: f64 },
    LongStraddle { strike: f64 },
    LongStrangle { put_strike: f64, call_strike: f64 },
    IronCondor {
        long_put_strike: f64,
        short_put_strike: f64,
        short_call_strike: f64,
        long_call_strike: f64,
    },
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::LongCall { .. } => "Long Call",
            StrategyKind::LongPut { .. } => "Long Put",
            StrategyKind::CoveredCall { .. } => "Covered Call",
            StrategyKind::ProtectivePut { .. } => "Protective Put",
            StrategyKind::BullCallSpread { .. } => "Bull Call Spread",
            StrategyKind::BearPutSpread { .. } => "Bear Put Spread",
            StrategyKind::LongStraddle { .. } => "Long Straddle",
            StrategyKind::LongStrangle { .. } => "Long Strangle",
            StrategyKind::IronCondor { .. } => "Iron Condor",
        }
    }

    /// Strikes in ascending order.
    pub fn strikes(&self) -> Vec<f64> {
        match *self {
            StrategyKind::LongCall { strike }
            | StrategyKind::LongPut { strike }
            | StrategyKind::CoveredCall { strike }
            | StrategyKind::ProtectivePut { strike }
            | StrategyKind::LongStraddle { strike } => vec![strike],
            StrategyKind::BullCallSpread {
                lower_strike,
                upper_strike,
            }
            | StrategyKind::BearPutSpread {
                lower_strike,
                upper_strike,
            } => vec![lower_strike, upper_strike],
            StrategyKind::LongStrangle {
                put_strike,
                call_strike,
            } => vec![put_strike, call_strike],
            StrategyKind::IronCondor {
                long_put_strike,
                short_put_strike,
                short_call_strike,
                long_call_strike,
            } => vec![
                long_put_strike,
                short_put_strike,
                short_call_strike,
                long_call_strike,
            ],
        }
    }

    fn holds_stock(&self) -> bool {
        matches!(
            self,
            StrategyKind::CoveredCall { .. } | StrategyKind::ProtectivePut { .. }
        )
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        let strikes = self.strikes();
        for &strike in &strikes {
            ensure_positive("strike", strike)?;
        }
        if strikes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ValuationError::InvalidStrikeOrder {
                strategy: self.name(),
                strikes,
            });
        }
        Ok(())
    }
}

/// Price grid used to draw the composite profit curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub points: usize,
    /// Grid starts at this fraction of the lowest strike (or spot).
    pub lower_factor: f64,
    /// Grid ends at this multiple of the highest strike (or spot).
    pub upper_factor: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            points: 100,
            lower_factor: 0.7,
            upper_factor: 1.3,
        }
    }
}

/// Closed-form bound on a strategy's loss or gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    Limited(f64),
    Unlimited,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Limited(value) => write!(f, "{:.2}", value),
            Bound::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// An option leg with the premium it was priced at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyLeg {
    pub contract: OptionContract,
    pub premium: f64,
}

impl StrategyLeg {
    fn price(contract: OptionContract) -> Self {
        Self {
            premium: contract.premium(),
            contract,
        }
    }

    pub fn profit_at(&self, spot_at_expiry: f64) -> f64 {
        self.contract.profit_at(spot_at_expiry, self.premium)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    /// Premium paid minus premium received. Negative for net credits.
    pub net_premium: f64,
    pub max_risk: Bound,
    pub max_reward: Bound,
    pub breakevens: Vec<f64>,
}

/// A priced strategy and its profit curve at expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyProfile {
    pub kind: StrategyKind,
    pub legs: Vec<StrategyLeg>,
    /// Purchase price of the underlying held alongside the options.
    pub stock_entry: Option<f64>,
    pub prices: Vec<f64>,
    pub profits: Vec<f64>,
    pub summary: StrategySummary,
}

impl StrategyProfile {
    /// Sum of every leg's profit, plus the stock P&L when stock is held.
    pub fn profit_at(&self, spot_at_expiry: f64) -> f64 {
        let options: f64 = self.legs.iter().map(|leg| leg.profit_at(spot_at_expiry)).sum();
        let stock = self
            .stock_entry
            .map_or(0.0, |entry| spot_at_expiry - entry);
        options + stock
    }
}

impl std::fmt::Display for StrategyProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== {} ===", self.kind.name())?;
        if let Some(entry) = self.stock_entry {
            writeln!(f, "  Stock bought at {:.2}", entry)?;
        }
        for leg in &self.legs {
            writeln!(
                f,
                "  {} {} K={:.2} premium={:.4}",
                leg.contract.position, leg.contract.kind, leg.contract.strike, leg.premium
            )?;
        }
        writeln!(f, "Net Premium: {:.4}", self.summary.net_premium)?;
        writeln!(f, "Max Risk:    {}", self.summary.max_risk)?;
        writeln!(f, "Max Reward:  {}", self.summary.max_reward)?;
        let breakevens: Vec<String> = self
            .summary
            .breakevens
            .iter()
            .map(|b| format!("{:.2}", b))
            .collect();
        writeln!(f, "Breakeven:   {}", breakevens.join(", "))
    }
}

/// Builds option strategies and evaluates them over a price grid.
pub struct StrategyComposer;

impl StrategyComposer {
    pub fn compose(
        kind: StrategyKind,
        market: &MarketInputs,
        grid: &GridConfig,
    ) -> Result<StrategyProfile, ValuationError> {
        market.validate()?;
        kind.validate()?;

        let legs: Vec<StrategyLeg> = Self::contracts(&kind, market)
            .into_iter()
            .map(StrategyLeg::price)
            .collect();
        let net_premium: f64 = legs
            .iter()
            .map(|leg| leg.premium * leg.contract.position.sign())
            .sum();
        let summary = Self::summarize(&kind, market.spot, net_premium);
        log::debug!(
            "{}: {} legs, net premium {:.4}",
            kind.name(),
            legs.len(),
            net_premium
        );

        let strikes = kind.strikes();
        let low = strikes.iter().copied().fold(market.spot, f64::min);
        let high = strikes.iter().copied().fold(market.spot, f64::max);
        let prices = linspace(low * grid.lower_factor, high * grid.upper_factor, grid.points);

        let mut profile = StrategyProfile {
            kind,
            legs,
            stock_entry: kind.holds_stock().then_some(market.spot),
            prices,
            profits: Vec::new(),
            summary,
        };
        profile.profits = profile.prices.iter().map(|&s| profile.profit_at(s)).collect();
        Ok(profile)
    }

    fn contracts(kind: &StrategyKind, market: &MarketInputs) -> Vec<OptionContract> {
        use OptionKind::{Call, Put};
        use Position::{Buy, Sell};

        match *kind {
            StrategyKind::LongCall { strike } => vec![market.option(Call, Buy, strike)],
            StrategyKind::LongPut { strike } => vec![market.option(Put, Buy, strike)],
            StrategyKind::CoveredCall { strike } => vec![market.option(Call, Sell, strike)],
            StrategyKind::ProtectivePut { strike } => vec![market.option(Put, Buy, strike)],
            StrategyKind::BullCallSpread {
                lower_strike,
                upper_strike,
            } => {
                let long = market.option(Call, Buy, lower_strike);
                vec![long, long.leg(Call, Sell, upper_strike)]
            }
            StrategyKind::BearPutSpread {
                lower_strike,
                upper_strike,
            } => {
                let long = market.option(Put, Buy, upper_strike);
                vec![long, long.leg(Put, Sell, lower_strike)]
            }
            StrategyKind::LongStraddle { strike } => vec![
                market.option(Call, Buy, strike),
                market.option(Put, Buy, strike),
            ],
            StrategyKind::LongStrangle {
                put_strike,
                call_strike,
            } => vec![
                market.option(Put, Buy, put_strike),
                market.option(Call, Buy, call_strike),
            ],
            StrategyKind::IronCondor {
                long_put_strike,
                short_put_strike,
                short_call_strike,
                long_call_strike,
            } => vec![
                market.option(Put, Buy, long_put_strike),
                market.option(Put, Sell, short_put_strike),
                market.option(Call, Sell, short_call_strike),
                market.option(Call, Buy, long_call_strike),
            ],
        }
    }

    fn summarize(kind: &StrategyKind, spot: f64, net_premium: f64) -> StrategySummary {
        let (max_risk, max_reward, breakevens) = match *kind {
            StrategyKind::LongCall { strike } => (
                Bound::Limited(net_premium),
                Bound::Unlimited,
                vec![strike + net_premium],
            ),
            StrategyKind::LongPut { strike } => (
                Bound::Limited(net_premium),
                Bound::Limited(strike - net_premium),
                vec![strike - net_premium],
            ),
            StrategyKind::CoveredCall { strike } => {
                // net_premium is the (negative) call premium received.
                let received = -net_premium;
                (
                    Bound::Limited(spot - received),
                    Bound::Limited(strike - spot + received),
                    vec![spot - received],
                )
            }
            StrategyKind::ProtectivePut { strike } => (
                Bound::Limited(spot - strike + net_premium),
                Bound::Unlimited,
                vec![spot + net_premium],
            ),
            StrategyKind::BullCallSpread {
                lower_strike,
                upper_strike,
            } => (
                Bound::Limited(net_premium),
                Bound::Limited(upper_strike - lower_strike - net_premium),
                vec![lower_strike + net_premium],
            ),
            StrategyKind::BearPutSpread {
                lower_strike,
                upper_strike,
            } => (
                Bound::Limited(net_premium),
                Bound::Limited(upper_strike - lower_strike - net_premium),
                vec![upper_strike - net_premium],
            ),
            StrategyKind::LongStraddle { strike } => (
                Bound::Limited(net_premium),
                Bound::Unlimited,
                vec![strike - net_premium, strike + net_premium],
            ),
            StrategyKind::LongStrangle {
                put_strike,
                call_strike,
            } => (
                Bound::Limited(net_premium),
                Bound::Unlimited,
                vec![put_strike - net_premium, call_strike + net_premium],
            ),
            StrategyKind::IronCondor {
                long_put_strike,
                short_put_strike,
                short_call_strike,
                long_call_strike,
            } => {
                let credit = -net_premium;
                let widest = (short_put_strike - long_put_strike)
                    .max(long_call_strike - short_call_strike);
                (
                    Bound::Limited(widest - credit),
                    Bound::Limited(credit),
                    vec![short_put_strike - credit, short_call_strike + credit],
                )
            }
        };
        StrategySummary {
            net_premium,
            max_risk,
            max_reward,
            breakevens,
        }
    }
}

/// `points` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn market() -> MarketInputs {
        MarketInputs::new(100.0, 0.5, 0.1075, 0.25).unwrap()
    }

    fn compose(kind: StrategyKind) -> StrategyProfile {
        StrategyComposer::compose(kind, &market(), &GridConfig::default()).unwrap()
    }

    #[test]
    fn test_linspace() {
        let grid = linspace(70.0, 130.0, 100);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 70.0);
        assert_abs_diff_eq!(grid[99], 130.0, epsilon = 1e-9);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_grid_spans_strikes() {
        let profile = compose(StrategyKind::BullCallSpread {
            lower_strike: 95.0,
            upper_strike: 110.0,
        });
        assert_eq!(profile.prices.len(), 100);
        assert_eq!(profile.profits.len(), 100);
        assert_abs_diff_eq!(profile.prices[0], 95.0 * 0.7, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.prices[99], 110.0 * 1.3, epsilon = 1e-9);
    }

    #[test]
    fn test_long_straddle_breakevens_symmetric() {
        let profile = compose(StrategyKind::LongStraddle { strike: 100.0 });
        let total = profile.legs[0].premium + profile.legs[1].premium;
        assert_abs_diff_eq!(profile.summary.net_premium, total, epsilon = 1e-12);
        assert_eq!(profile.summary.breakevens, vec![100.0 - total, 100.0 + total]);
        assert_eq!(profile.summary.max_reward, Bound::Unlimited);
        assert_abs_diff_eq!(profile.profit_at(100.0), -total, epsilon = 1e-12);
    }

    #[test]
    fn test_bull_call_spread_closed_form_matches_curve() {
        let profile = compose(StrategyKind::BullCallSpread {
            lower_strike: 95.0,
            upper_strike: 105.0,
        });
        let net = profile.legs[0].premium - profile.legs[1].premium;
        assert!(net > 0.0);
        assert_eq!(profile.summary.breakevens, vec![95.0 + net]);
        assert_eq!(profile.summary.max_reward, Bound::Limited(10.0 - net));
        assert_eq!(profile.summary.max_risk, Bound::Limited(net));

        assert_abs_diff_eq!(profile.profit_at(95.0 + net), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.profit_at(120.0), 10.0 - net, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.profit_at(80.0), -net, epsilon = 1e-9);
        let best = profile.profits.iter().copied().fold(f64::MIN, f64::max);
        assert_abs_diff_eq!(best, 10.0 - net, epsilon = 1e-9);
    }

    #[test]
    fn test_bear_put_spread() {
        let profile = compose(StrategyKind::BearPutSpread {
            lower_strike: 90.0,
            upper_strike: 100.0,
        });
        let net = profile.summary.net_premium;
        assert_eq!(profile.summary.breakevens, vec![100.0 - net]);
        assert_abs_diff_eq!(profile.profit_at(80.0), 10.0 - net, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.profit_at(110.0), -net, epsilon = 1e-9);
    }

    #[test]
    fn test_iron_condor_credit_and_wings() {
        let profile = compose(StrategyKind::IronCondor {
            long_put_strike: 85.0,
            short_put_strike: 95.0,
            short_call_strike: 105.0,
            long_call_strike: 115.0,
        });
        assert_eq!(profile.legs.len(), 4);
        let credit = -profile.summary.net_premium;
        assert!(credit > 0.0);

        assert_abs_diff_eq!(profile.profit_at(100.0), credit, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.profit_at(60.0), credit - 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(profile.profit_at(140.0), credit - 10.0, epsilon = 1e-9);
        assert_eq!(profile.summary.max_risk, Bound::Limited(10.0 - credit));
        for be in &profile.summary.breakevens {
            assert_abs_diff_eq!(profile.profit_at(*be), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_covered_call_includes_stock() {
        let profile = compose(StrategyKind::CoveredCall { strike: 110.0 });
        assert_eq!(profile.stock_entry, Some(100.0));
        let received = profile.legs[0].premium;
        assert_abs_diff_eq!(profile.profit_at(130.0), 10.0 + received, epsilon = 1e-9);
        assert_eq!(profile.summary.breakevens, vec![100.0 - received]);
        assert_abs_diff_eq!(profile.profit_at(100.0 - received), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_protective_put_floor() {
        let profile = compose(StrategyKind::ProtectivePut { strike: 95.0 });
        let paid = profile.summary.net_premium;
        assert_eq!(profile.summary.max_risk, Bound::Limited(100.0 - 95.0 + paid));
        assert_abs_diff_eq!(profile.profit_at(50.0), -(5.0 + paid), epsilon = 1e-9);
    }

    #[test]
    fn test_long_put_and_call() {
        let put = compose(StrategyKind::LongPut { strike: 100.0 });
        let p = put.summary.net_premium;
        assert_eq!(put.summary.max_reward, Bound::Limited(100.0 - p));
        let call = compose(StrategyKind::LongCall { strike: 100.0 });
        let c = call.summary.net_premium;
        assert_eq!(call.summary.breakevens, vec![100.0 + c]);
        assert!(call.stock_entry.is_none());
    }

    #[test]
    fn test_strangle_requires_ordered_strikes() {
        let err = StrategyComposer::compose(
            StrategyKind::LongStrangle {
                put_strike: 110.0,
                call_strike: 90.0,
            },
            &market(),
            &GridConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValuationError::InvalidStrikeOrder {
                strategy: "Long Strangle",
                ..
            }
        ));
    }

    #[test]
    fn test_strategy_from_json() {
        let kind: StrategyKind =
            serde_json::from_str(r#"{"strategy": "LongStraddle", "strike": 50.0}"#).unwrap();
        assert_eq!(kind, StrategyKind::LongStraddle { strike: 50.0 });
    }
}
