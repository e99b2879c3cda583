//! Exchange-traded futures.
//!
//! - **margin** — cost-of-carry pricing, seeded daily price paths and the
//!   margin account simulator
//! - **di** — Brazilian interbank-rate (DI1) futures valued by unit price

pub mod di;
pub mod margin;
