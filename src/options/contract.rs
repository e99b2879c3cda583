use crate::core::error::{ensure_non_negative, ensure_positive, ValuationError};
use crate::core::types::{OptionKind, OptionStyle, Position};
use crate::options::pricing::{self, Greeks};
use serde::{Deserialize, Serialize};

/// A single option leg.
///
/// `style` is carried for display only; valuation always uses the European
/// Black-Scholes formula.
///
/// # Examples
///
/// ```
/// use derivatives_engine::core::types::{OptionKind, OptionStyle, Position};
/// use derivatives_engine::options::contract::OptionContract;
///
/// let call = OptionContract::new(
///     OptionStyle::European,
///     OptionKind::Call,
///     Position::Buy,
///     100.0,
///     100.0,
///     1.0,
///     0.05,
///     0.20,
/// )
/// .unwrap();
/// assert!((call.premium() - 10.4506).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    #[serde(default)]
    pub style: OptionStyle,
    pub kind: OptionKind,
    pub position: Position,
    pub spot: f64,
    pub strike: f64,
    /// Years to expiry.
    pub time_to_maturity: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
}

impl OptionContract {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        style: OptionStyle,
        kind: OptionKind,
        position: Position,
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Result<Self, ValuationError> {
        let contract = Self {
            style,
            kind,
            position,
            spot,
            strike,
            time_to_maturity,
            risk_free_rate,
            volatility,
        };
        contract.validate()?;
        Ok(contract)
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("time_to_maturity", self.time_to_maturity)?;
        ensure_non_negative("risk_free_rate", self.risk_free_rate)?;
        ensure_positive("volatility", self.volatility)
    }

    /// Black-Scholes premium (always positive, regardless of position).
    pub fn premium(&self) -> f64 {
        pricing::black_scholes_price(
            self.spot,
            self.strike,
            self.time_to_maturity,
            self.risk_free_rate,
            self.volatility,
            self.kind,
        )
    }

    pub fn greeks(&self) -> Greeks {
        pricing::greeks(
            self.spot,
            self.strike,
            self.time_to_maturity,
            self.risk_free_rate,
            self.volatility,
            self.kind,
            self.position,
        )
    }

    /// Value if exercised at the current spot, from the holder's side.
    pub fn intrinsic_value(&self) -> f64 {
        pricing::payoff(self.spot, self.strike, self.kind, Position::Buy)
    }

    /// Part of `premium` not explained by intrinsic value.
    pub fn time_value(&self, premium: f64) -> f64 {
        premium - self.intrinsic_value()
    }

    pub fn payoff_at(&self, spot_at_expiry: f64) -> f64 {
        pricing::payoff(spot_at_expiry, self.strike, self.kind, self.position)
    }

    pub fn profit_at(&self, spot_at_expiry: f64, premium: f64) -> f64 {
        pricing::profit(spot_at_expiry, self.strike, premium, self.kind, self.position)
    }

    pub fn break_even(&self, premium: f64) -> f64 {
        pricing::break_even(self.strike, premium, self.kind, self.position)
    }

    /// Same leg with a different position and strike, for strategy building.
    pub(crate) fn leg(&self, kind: OptionKind, position: Position, strike: f64) -> Self {
        Self {
            kind,
            position,
            strike,
            ..*self
        }
    }
}
