use crate::core::error::ValuationError;
use crate::core::money::to_cents;
use crate::core::types::{ExposureSide, IndexerKind};
use crate::swap::engine::{SwapLegEngine, SwapResult};
use crate::swap::params::{SwapExposure, SwapHedge};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Summary of a hedged exposure, amounts rounded to cents.
///
/// Labels are plain English; hosts localize the rendering themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReport {
    pub side: ExposureSide,
    pub exposure_indexer: IndexerKind,
    pub asset_indexer: IndexerKind,
    pub liability_indexer: IndexerKind,
    pub notional: Decimal,
    pub quarters: u32,
    pub exposure_result: Decimal,
    pub hedge_result: Decimal,
    pub total_result: Decimal,
}

impl SwapReport {
    /// Value the swap and build its report.
    pub fn generate(exposure: &SwapExposure, hedge: &SwapHedge) -> Result<Self, ValuationError> {
        let result = SwapLegEngine::total_result(exposure, hedge)?;
        Ok(Self::from_result(exposure, hedge, &result))
    }

    pub fn from_result(exposure: &SwapExposure, hedge: &SwapHedge, result: &SwapResult) -> Self {
        Self {
            side: exposure.side,
            exposure_indexer: exposure.indexer,
            asset_indexer: hedge.asset_indexer,
            liability_indexer: hedge.liability_indexer,
            notional: to_cents(exposure.notional),
            quarters: exposure.quarters,
            exposure_result: to_cents(result.exposure_result),
            hedge_result: to_cents(result.hedge_result),
            total_result: to_cents(result.total_result),
        }
    }
}

impl std::fmt::Display for SwapReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Swap Hedge Report ===")?;
        writeln!(
            f,
            "Exposure:        {} {} on {} over {} quarters",
            self.side, self.exposure_indexer, self.notional, self.quarters
        )?;
        writeln!(
            f,
            "Swap:            receive {} / pay {}",
            self.asset_indexer, self.liability_indexer
        )?;
        writeln!(f, "Exposure Result: {}", self.exposure_result)?;
        writeln!(f, "Hedge Result:    {}", self.hedge_result)?;
        writeln!(f, "Total Result:    {}", self.total_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_totals() {
        let exposure = SwapExposure::new(
            ExposureSide::Asset,
            1_000_000.0,
            IndexerKind::PreFixed,
            0.12,
            4,
            None,
        )
        .unwrap();
        let hedge = SwapHedge::new(IndexerKind::PostFixed, IndexerKind::PreFixed, 0.10, 0.12);
        let report = SwapReport::generate(&exposure, &hedge).unwrap();

        assert_eq!(report.exposure_result, dec!(120000.00));
        assert_eq!(report.hedge_result, dec!(-20000.00));
        assert_eq!(report.total_result, dec!(100000.00));

        let text = report.to_string();
        assert!(text.contains("Total Result:    100000"));
        assert!(text.contains("receive PostFixed / pay PreFixed"));
    }
}
