use crate::core::error::ValuationError;
use crate::core::QUARTERS_PER_YEAR;

/// Realized return of an annualized fixed rate over `quarters` quarters.
///
/// `(1 + rate)^(quarters / 4) - 1`. Fractional quarters are accepted for
/// interior points of a time series.
///
/// # Examples
///
/// ```
/// use derivatives_engine::rates::adjustment::pre_fixed;
///
/// assert!((pre_fixed(0.12, 4.0) - 0.12).abs() < 1e-12);
/// ```
pub fn pre_fixed(rate: f64, quarters: f64) -> f64 {
    (1.0 + rate).powf(quarters / QUARTERS_PER_YEAR) - 1.0
}

/// Realized return of a post-fixed leg after `quarters` of `total_quarters`.
///
/// The rate is already the effective rate for the whole contract, so at
/// maturity it is returned unchanged. Interior points are interpolated
/// linearly, not compounded.
pub fn post_fixed(rate: f64, quarters: f64, total_quarters: f64) -> f64 {
    if quarters >= total_quarters {
        rate
    } else {
        rate * (quarters / total_quarters)
    }
}

/// Realized return of an FX-indexed leg: FX variation composed with the
/// rate (or cupom cambial) compounded over `quarters`.
///
/// Fails with [`ValuationError::MissingFxRate`] when either fixing is absent.
pub fn exchange_rate(
    leg: &'static str,
    fx_start: Option<f64>,
    fx_end: Option<f64>,
    rate: f64,
    quarters: f64,
) -> Result<f64, ValuationError> {
    let fx_start = fx_start.ok_or(ValuationError::MissingFxRate {
        leg,
        field: "start",
    })?;
    let fx_end = fx_end.ok_or(ValuationError::MissingFxRate {
        leg,
        field: "maturity",
    })?;
    Ok(compose_fx(fx_variation(fx_start, fx_end), pre_fixed(rate, quarters)))
}

/// Relative change of the FX rate between two fixings.
pub fn fx_variation(fx_start: f64, fx_end: f64) -> f64 {
    fx_end / fx_start - 1.0
}

/// `(1 + fx_variation) * (1 + rate_adjustment) - 1`.
pub fn compose_fx(fx_variation: f64, rate_adjustment: f64) -> f64 {
    (1.0 + fx_variation) * (1.0 + rate_adjustment) - 1.0
}

/// FX rate at `quarter` on the straight line between inception and maturity.
pub fn interpolated_fx(fx_start: f64, fx_maturity: f64, quarter: f64, total_quarters: f64) -> f64 {
    fx_start + (fx_maturity - fx_start) * (quarter / total_quarters)
}
