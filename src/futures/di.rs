use crate::core::error::{ensure_growth_rate, ensure_positive, ValuationError};
use crate::core::money::percent;
use crate::core::types::Position;
use crate::core::BUSINESS_DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};

/// Face value of a DI1 contract at maturity.
pub const DI_FACE_VALUE: f64 = 100_000.0;

/// A DI futures position sized from a notional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiFuturesContract {
    pub notional: f64,
    /// Annualized rate locked in at inception (252-day basis).
    pub contract_rate: f64,
    pub business_days_to_maturity: u32,
    /// CDI actually accumulated over the contract's life.
    pub realized_period_rate: f64,
}

impl DiFuturesContract {
    pub fn new(
        notional: f64,
        contract_rate: f64,
        business_days_to_maturity: u32,
        realized_period_rate: f64,
    ) -> Result<Self, ValuationError> {
        let contract = Self {
            notional,
            contract_rate,
            business_days_to_maturity,
            realized_period_rate,
        };
        contract.validate()?;
        Ok(contract)
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        ensure_positive("notional", self.notional)?;
        ensure_growth_rate("contract_rate", self.contract_rate)?;
        ensure_growth_rate("realized_period_rate", self.realized_period_rate)?;
        if self.business_days_to_maturity < 1 {
            return Err(ValuationError::InvalidBusinessDays(
                self.business_days_to_maturity,
            ));
        }
        Ok(())
    }
}

/// Unit-price valuation of a DI trade, from inception to maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiValuation {
    pub operation: Position,
    pub pu_inception: f64,
    pub number_of_contracts: f64,
    pub pu_maturity: f64,
    pub result: f64,
    /// Realized period rate expressed on the 252-day annual basis.
    pub realized_annual_rate: f64,
}

impl std::fmt::Display for DiValuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== DI Futures ({}) ===", self.operation)?;
        writeln!(f, "PU at Inception:      {:.2}", self.pu_inception)?;
        writeln!(f, "Contracts:            {}", self.number_of_contracts)?;
        writeln!(f, "PU at Maturity:       {:.2}", self.pu_maturity)?;
        writeln!(f, "Realized Annual Rate: {}%", percent(self.realized_annual_rate, 4))?;
        writeln!(f, "Result:               {:.2}", self.result)
    }
}

/// DI1 futures: PU discounting, sizing and settlement.
pub struct DiFuturesEngine;

impl DiFuturesEngine {
    /// `100000 / (1 + rate)^(days / 252)`
    pub fn pu_at_inception(contract_rate: f64, business_days: u32) -> f64 {
        DI_FACE_VALUE
            / (1.0 + contract_rate).powf(f64::from(business_days) / BUSINESS_DAYS_PER_YEAR)
    }

    /// Whole contracts that fit in the notional.
    pub fn number_of_contracts(notional: f64, pu: f64) -> f64 {
        (notional / pu).floor()
    }

    /// PU grown by the realized period rate.
    pub fn pu_at_maturity(pu: f64, realized_rate: f64) -> f64 {
        pu * (1.0 + realized_rate)
    }

    /// Settlement against the face value. Buyers gain when the PU ends
    /// above 100,000.
    pub fn result(operation: Position, pu_maturity: f64, number_of_contracts: f64) -> f64 {
        match operation {
            Position::Buy => (pu_maturity - DI_FACE_VALUE) * number_of_contracts,
            Position::Sell => (DI_FACE_VALUE - pu_maturity) * number_of_contracts,
        }
    }

    /// `(1 + period_rate)^(252 / days) - 1`
    pub fn annualized_effective_rate(period_rate: f64, business_days: u32) -> f64 {
        (1.0 + period_rate).powf(BUSINESS_DAYS_PER_YEAR / f64::from(business_days)) - 1.0
    }

    pub fn valuate(contract: &DiFuturesContract, operation: Position) -> DiValuation {
        let pu = Self::pu_at_inception(contract.contract_rate, contract.business_days_to_maturity);
        let contracts = Self::number_of_contracts(contract.notional, pu);
        let pu_maturity = Self::pu_at_maturity(pu, contract.realized_period_rate);
        log::debug!("DI {operation}: PU {pu:.2} -> {pu_maturity:.2}, {contracts} contracts");
        DiValuation {
            operation,
            pu_inception: pu,
            number_of_contracts: contracts,
            pu_maturity,
            result: Self::result(operation, pu_maturity, contracts),
            realized_annual_rate: Self::annualized_effective_rate(
                contract.realized_period_rate,
                contract.business_days_to_maturity,
            ),
        }
    }
}
