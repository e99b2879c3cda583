use crate::core::error::ValuationError;
use crate::core::types::IndexerKind;
use crate::rates::adjustment;
use crate::swap::params::{SwapExposure, SwapHedge};
use serde::{Deserialize, Serialize};

/// Final results of an exposure hedged by a swap, in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapResult {
    pub exposure_result: f64,
    pub hedge_result: f64,
    pub total_result: f64,
}

/// Exposure and hedge legs marked at the end of one quarter.
///
/// The liability value is stored negated (a payment obligation), so
/// `net_value = exposure_value + asset_value + liability_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub quarter: u32,
    pub exposure_value: f64,
    pub asset_value: f64,
    pub liability_value: f64,
    pub net_value: f64,
}

impl TimeSeriesPoint {
    fn inception() -> Self {
        Self {
            quarter: 0,
            exposure_value: 0.0,
            asset_value: 0.0,
            liability_value: 0.0,
            net_value: 0.0,
        }
    }
}

/// FX fixings and horizon shared by every leg of one valuation.
struct Horizon {
    quarters: f64,
    total_quarters: f64,
    fx_start: Option<f64>,
    fx_maturity: Option<f64>,
}

impl Horizon {
    fn at(exposure: &SwapExposure, hedge: &SwapHedge, quarter: u32) -> Self {
        Self {
            quarters: f64::from(quarter),
            total_quarters: f64::from(exposure.quarters),
            fx_start: exposure.fx_start,
            fx_maturity: hedge.fx_maturity,
        }
    }

    /// FX rate observed at this horizon: the maturity fixing at the end,
    /// the straight-line value in between.
    fn fx_end(&self) -> Option<f64> {
        if self.quarters >= self.total_quarters {
            return self.fx_maturity;
        }
        match (self.fx_start, self.fx_maturity) {
            (Some(start), Some(maturity)) => Some(adjustment::interpolated_fx(
                start,
                maturity,
                self.quarters,
                self.total_quarters,
            )),
            _ => self.fx_maturity,
        }
    }

    fn adjustment(
        &self,
        leg: &'static str,
        indexer: IndexerKind,
        rate: f64,
    ) -> Result<f64, ValuationError> {
        match indexer {
            IndexerKind::PreFixed => Ok(adjustment::pre_fixed(rate, self.quarters)),
            IndexerKind::PostFixed => Ok(adjustment::post_fixed(
                rate,
                self.quarters,
                self.total_quarters,
            )),
            IndexerKind::ExchangeRate => adjustment::exchange_rate(
                leg,
                self.fx_start,
                self.fx_end(),
                rate,
                self.quarters,
            ),
        }
    }
}

/// Leg values at one horizon, before the liability sign flip.
struct LegValues {
    exposure: f64,
    asset: f64,
    liability: f64,
}

/// Values a hedged exposure leg by leg.
///
/// Each leg is dispatched on its own indexer. Hedge legs are applied to the
/// exposure's notional, and FX-indexed hedge legs compound their own cupom
/// rather than the exposure's rate.
pub struct SwapLegEngine;

impl SwapLegEngine {
    /// Fail early on invalid records and on any FX-indexed leg that lacks
    /// a fixing.
    pub fn check_fx(exposure: &SwapExposure, hedge: &SwapHedge) -> Result<(), ValuationError> {
        exposure.validate()?;
        hedge.validate()?;
        let legs = [
            ("exposure", exposure.indexer),
            ("asset", hedge.asset_indexer),
            ("liability", hedge.liability_indexer),
        ];
        for (leg, indexer) in legs {
            if !indexer.uses_fx() {
                continue;
            }
            if exposure.fx_start.is_none() {
                return Err(ValuationError::MissingFxRate { leg, field: "start" });
            }
            if hedge.fx_maturity.is_none() {
                return Err(ValuationError::MissingFxRate {
                    leg,
                    field: "maturity",
                });
            }
        }
        Ok(())
    }

    /// Result of the unhedged exposure at maturity. Negated for liabilities.
    pub fn exposure_result(
        exposure: &SwapExposure,
        hedge: &SwapHedge,
    ) -> Result<f64, ValuationError> {
        Self::check_fx(exposure, hedge)?;
        let legs = Self::legs_at(exposure, hedge, exposure.quarters)?;
        Ok(legs.exposure)
    }

    /// Asset leg minus liability leg at maturity.
    pub fn hedge_result(exposure: &SwapExposure, hedge: &SwapHedge) -> Result<f64, ValuationError> {
        Self::check_fx(exposure, hedge)?;
        let legs = Self::legs_at(exposure, hedge, exposure.quarters)?;
        Ok(legs.asset - legs.liability)
    }

    /// Exposure, hedge and combined results at maturity.
    pub fn total_result(
        exposure: &SwapExposure,
        hedge: &SwapHedge,
    ) -> Result<SwapResult, ValuationError> {
        Self::check_fx(exposure, hedge)?;
        let legs = Self::legs_at(exposure, hedge, exposure.quarters)?;
        let hedge_result = legs.asset - legs.liability;
        log::debug!(
            "swap {} {}: exposure={:.2} asset={:.2} liability={:.2}",
            exposure.side,
            exposure.indexer,
            legs.exposure,
            legs.asset,
            legs.liability
        );
        Ok(SwapResult {
            exposure_result: legs.exposure,
            hedge_result,
            total_result: legs.exposure + hedge_result,
        })
    }

    /// One point per quarter from inception (all zeros) to maturity.
    ///
    /// Pre-fixed and FX legs compound over the elapsed quarters, post-fixed
    /// legs accrue linearly, and FX legs use the straight-line FX rate.
    pub fn time_series(
        exposure: &SwapExposure,
        hedge: &SwapHedge,
    ) -> Result<Vec<TimeSeriesPoint>, ValuationError> {
        Self::check_fx(exposure, hedge)?;
        let mut series = Vec::with_capacity(exposure.quarters as usize + 1);
        series.push(TimeSeriesPoint::inception());

        for quarter in 1..=exposure.quarters {
            let legs = Self::legs_at(exposure, hedge, quarter)?;
            let liability_value = -legs.liability;
            series.push(TimeSeriesPoint {
                quarter,
                exposure_value: legs.exposure,
                asset_value: legs.asset,
                liability_value,
                net_value: legs.exposure + legs.asset + liability_value,
            });
        }
        Ok(series)
    }

    fn legs_at(
        exposure: &SwapExposure,
        hedge: &SwapHedge,
        quarter: u32,
    ) -> Result<LegValues, ValuationError> {
        let horizon = Horizon::at(exposure, hedge, quarter);
        let notional = exposure.notional;

        let exposure_adj = horizon.adjustment("exposure", exposure.indexer, exposure.rate)?;
        let asset_adj = horizon.adjustment("asset", hedge.asset_indexer, hedge.asset_leg_rate())?;
        let liability_adj =
            horizon.adjustment("liability", hedge.liability_indexer, hedge.liability_leg_rate())?;

        Ok(LegValues {
            exposure: exposure_adj * notional * exposure.side.sign(),
            asset: asset_adj * notional,
            liability: liability_adj * notional,
        })
    }
}
