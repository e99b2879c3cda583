//! Foundational types shared by every engine: enums, errors and
//! currency helpers.

pub mod error;
pub mod money;
pub mod types;

/// Business days in a year under the Brazilian 252-day convention.
pub const BUSINESS_DAYS_PER_YEAR: f64 = 252.0;

/// Quarters per year used by period compounding.
pub const QUARTERS_PER_YEAR: f64 = 4.0;

/// Calendar days used to express theta per day.
pub const DAYS_PER_YEAR: f64 = 365.0;
