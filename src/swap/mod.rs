//! Swap exposure and hedge valuation.
//!
//! - **params** — exposure and hedge parameter records
//! - **engine** — exposure, hedge and total results plus the quarterly series
//! - **report** — text rendering of the three totals

pub mod engine;
pub mod params;
pub mod report;
