//! # derivatives-engine
//!
//! Valuation and hedge simulation engine for Brazilian derivatives.
//!
//! Every engine is a pure function of plain parameter records and returns
//! plain result records, so the same core can back a web page, a CLI or a
//! notebook. The only randomness is the seeded daily futures price path.
//!
//! ## Architecture
//!
//! - **core** — Shared enums, the error type and currency rounding
//! - **rates** — Period-return factors for pre-fixed, post-fixed and FX indexers
//! - **swap** — Exposure, hedge and quarterly time series of a hedging swap
//! - **options** — Black-Scholes pricing, Greeks and multi-leg strategies
//! - **futures** — Futures margin simulation and DI futures
//! - **forwards** — Non-deliverable FX forwards

pub mod core;
pub mod forwards;
pub mod futures;
pub mod options;
pub mod rates;
pub mod swap;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::error::ValuationError;
    pub use crate::core::types::{
        ContractType, ExposureSide, IndexerKind, OptionKind, OptionStyle, Position,
    };
    pub use crate::forwards::ndf::NdfContract;
    pub use crate::futures::di::{DiFuturesContract, DiFuturesEngine};
    pub use crate::futures::margin::{FuturesContract, FuturesMarginEngine, MarginConfig};
    pub use crate::options::contract::OptionContract;
    pub use crate::options::strategy::{GridConfig, MarketInputs, StrategyComposer, StrategyKind};
    pub use crate::swap::engine::{SwapLegEngine, SwapResult, TimeSeriesPoint};
    pub use crate::swap::params::{SwapExposure, SwapHedge};
    pub use crate::swap::report::SwapReport;
}
