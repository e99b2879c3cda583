use rust_decimal::Decimal;

/// Round a currency amount to cents for reporting.
///
/// Engines compute in `f64`; reports present amounts as [`Decimal`] so that
/// displayed totals do not carry binary floating-point noise. Non-finite
/// values map to zero.
///
/// # Examples
///
/// ```
/// use derivatives_engine::core::money::to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(to_cents(1_234.5678), dec!(1234.57));
/// ```
pub fn to_cents(amount: f64) -> Decimal {
    Decimal::from_f64_retain(amount)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2)
}

/// Render a rate as a percentage with the given number of decimals.
pub fn percent(rate: f64, decimals: u32) -> Decimal {
    Decimal::from_f64_retain(rate * 100.0)
        .unwrap_or(Decimal::ZERO)
        .round_dp(decimals)
}
