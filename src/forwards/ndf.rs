use crate::core::error::{ensure_positive, ValuationError};
use crate::core::types::Position;
use crate::core::BUSINESS_DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};

/// Non-deliverable forward on an FX rate.
///
/// Only the difference between the contracted and the maturity rate
/// changes hands, applied to the foreign-currency notional.
///
/// # Examples
///
/// ```
/// use derivatives_engine::core::types::Position;
/// use derivatives_engine::forwards::ndf::NdfContract;
///
/// let ndf = NdfContract::new(Position::Buy, 10_000_000.0, 5.20, 5.50).unwrap();
/// assert!((ndf.result() - 3_000_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NdfContract {
    pub position: Position,
    pub notional: f64,
    pub contract_rate: f64,
    pub maturity_rate: f64,
}

impl NdfContract {
    pub fn new(
        position: Position,
        notional: f64,
        contract_rate: f64,
        maturity_rate: f64,
    ) -> Result<Self, ValuationError> {
        let contract = Self {
            position,
            notional,
            contract_rate,
            maturity_rate,
        };
        contract.validate()?;
        Ok(contract)
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        ensure_positive("notional", self.notional)?;
        ensure_positive("contract_rate", self.contract_rate)?;
        ensure_positive("maturity_rate", self.maturity_rate)
    }

    /// Settlement amount in domestic currency. Buyers gain when the FX rate
    /// ends above the contracted rate.
    pub fn result(&self) -> f64 {
        (self.maturity_rate - self.contract_rate) * self.notional * self.position.sign()
    }
}

impl std::fmt::Display for NdfContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== NDF ({}) ===", self.position)?;
        writeln!(f, "Notional:      {:.2}", self.notional)?;
        writeln!(f, "Contract Rate: {:.4}", self.contract_rate)?;
        writeln!(f, "Maturity Rate: {:.4}", self.maturity_rate)?;
        writeln!(f, "Result:        {:.2}", self.result())
    }
}

/// Forward FX rate by covered interest parity on a 252-day basis.
///
/// `spot * (1 + domestic)^(days/252) / (1 + foreign)^(days/252)`
pub fn forward_rate(spot: f64, domestic_rate: f64, foreign_rate: f64, business_days: u32) -> f64 {
    let years = f64::from(business_days) / BUSINESS_DAYS_PER_YEAR;
    spot * (1.0 + domestic_rate).powf(years) / (1.0 + foreign_rate).powf(years)
}
