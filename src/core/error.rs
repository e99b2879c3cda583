use thiserror::Error;

/// Errors raised while building parameter records or valuing a trade.
///
/// Every engine function is total over validated input, so the only
/// runtime failure is a missing FX fixing on an exchange-rate leg.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    #[error("missing {field} FX rate for exchange-rate indexed {leg} leg")]
    MissingFxRate {
        leg: &'static str,
        field: &'static str,
    },
    #[error("{field} must be strictly positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be above -100%, got {value}")]
    TotalLoss { field: &'static str, value: f64 },
    #[error("number of quarters must be at least 1, got {0}")]
    InvalidQuarters(u32),
    #[error("number of business days must be at least 1, got {0}")]
    InvalidBusinessDays(u32),
    #[error("strikes for {strategy} must be strictly increasing, got {strikes:?}")]
    InvalidStrikeOrder {
        strategy: &'static str,
        strikes: Vec<f64>,
    },
    #[error("unknown {kind} label '{label}'")]
    UnknownLabel { kind: &'static str, label: String },
}

impl ValuationError {
    pub(crate) fn unknown_label(kind: &'static str, label: &str) -> Self {
        ValuationError::UnknownLabel {
            kind,
            label: label.to_string(),
        }
    }
}

/// Reject zero, negative and NaN values.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValuationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValuationError::NonPositive { field, value })
    }
}

/// Reject negative and NaN values.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ValuationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValuationError::Negative { field, value })
    }
}

/// Reject rates at or below -100%, where `1 + rate` stops being a growth factor.
pub(crate) fn ensure_growth_rate(field: &'static str, value: f64) -> Result<(), ValuationError> {
    if value > -1.0 {
        Ok(())
    } else {
        Err(ValuationError::TotalLoss { field, value })
    }
}
