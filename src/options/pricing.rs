//! Black-Scholes pricing for a single European option leg.
//!
//! All functions are pure. Inputs are assumed to satisfy the
//! [`OptionContract`](crate::options::contract::OptionContract) invariants:
//! positive spot, strike, time and volatility.

use crate::core::types::{OptionKind, Position};
use crate::core::DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Option sensitivities, expressed per position.
///
/// Theta is per calendar day and vega per one percentage point of
/// volatility. All four are negated for short positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta_daily: f64,
    pub vega_per_1pct: f64,
}

#[inline]
fn norm_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

#[inline]
fn norm_pdf(x: f64) -> f64 {
    Normal::standard().pdf(x)
}

#[inline]
fn d1_d2(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> (f64, f64) {
    let sig_sqrt_t = vol * time.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// European Black-Scholes premium.
///
/// # Examples
///
/// ```
/// use derivatives_engine::core::types::OptionKind;
/// use derivatives_engine::options::pricing::black_scholes_price;
///
/// let call = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Call);
/// let put = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.2, OptionKind::Put);
/// let parity = 100.0 - 100.0 * (-0.05_f64).exp();
/// assert!((call - put - parity).abs() < 1e-10);
/// ```
pub fn black_scholes_price(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    kind: OptionKind,
) -> f64 {
    let (d1, d2) = d1_d2(spot, strike, time, rate, vol);
    let df = (-rate * time).exp();
    log::trace!("black-scholes {kind}: d1={d1:.6} d2={d2:.6}");
    match kind {
        OptionKind::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionKind::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

/// Value at expiry. Negated for short positions.
pub fn payoff(spot_at_expiry: f64, strike: f64, kind: OptionKind, position: Position) -> f64 {
    let intrinsic = match kind {
        OptionKind::Call => (spot_at_expiry - strike).max(0.0),
        OptionKind::Put => (strike - spot_at_expiry).max(0.0),
    };
    intrinsic * position.sign()
}

/// Payoff net of the premium paid (long) or received (short).
pub fn profit(
    spot_at_expiry: f64,
    strike: f64,
    premium: f64,
    kind: OptionKind,
    position: Position,
) -> f64 {
    let payoff = payoff(spot_at_expiry, strike, kind, position);
    match position {
        Position::Buy => payoff - premium,
        Position::Sell => premium + payoff,
    }
}

/// Spot at expiry where a single leg breaks even.
///
/// The formula depends only on the option kind; short legs break even at
/// the same price as long ones.
pub fn break_even(strike: f64, premium: f64, kind: OptionKind, _position: Position) -> f64 {
    match kind {
        OptionKind::Call => strike + premium,
        OptionKind::Put => strike - premium,
    }
}

/// Delta, gamma, daily theta and vega per 1% volatility.
pub fn greeks(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    kind: OptionKind,
    position: Position,
) -> Greeks {
    let (d1, d2) = d1_d2(spot, strike, time, rate, vol);
    let sqrt_t = time.sqrt();
    let pdf_d1 = norm_pdf(d1);
    let discounted_strike = rate * strike * (-rate * time).exp();

    let decay = -spot * pdf_d1 * vol / (2.0 * sqrt_t);
    let (delta, theta) = match kind {
        OptionKind::Call => (
            norm_cdf(d1),
            decay - discounted_strike * norm_cdf(d2),
        ),
        OptionKind::Put => (
            norm_cdf(d1) - 1.0,
            decay + discounted_strike * norm_cdf(-d2),
        ),
    };

    let sign = position.sign();
    Greeks {
        delta: delta * sign,
        gamma: pdf_d1 / (spot * vol * sqrt_t) * sign,
        theta_daily: theta / DAYS_PER_YEAR * sign,
        vega_per_1pct: spot * sqrt_t * pdf_d1 * 0.01 * sign,
    }
}
