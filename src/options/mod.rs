//! Option valuation.
//!
//! - **contract** — a single validated option leg
//! - **pricing** — Black-Scholes price, Greeks, payoff, profit and break-even
//! - **strategy** — multi-leg strategies evaluated over a price grid

pub mod contract;
pub mod pricing;
pub mod strategy;
