use crate::core::error::{ensure_positive, ValuationError};
use crate::core::types::{ExposureSide, IndexerKind};
use serde::{Deserialize, Serialize};

/// The position being hedged.
///
/// # Examples
///
/// ```
/// use derivatives_engine::core::types::{ExposureSide, IndexerKind};
/// use derivatives_engine::swap::params::SwapExposure;
///
/// let exposure = SwapExposure::new(
///     ExposureSide::Liability,
///     1_000_000.0,
///     IndexerKind::ExchangeRate,
///     0.05,
///     4,
///     Some(5.0),
/// )
/// .unwrap();
/// assert_eq!(exposure.quarters, 4);
///
/// // FX-indexed exposures need the inception FX rate.
/// assert!(SwapExposure::new(
///     ExposureSide::Asset,
///     1_000_000.0,
///     IndexerKind::ExchangeRate,
///     0.05,
///     4,
///     None,
/// )
/// .is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapExposure {
    pub side: ExposureSide,
    pub notional: f64,
    pub indexer: IndexerKind,
    /// Annualized rate for pre-fixed and FX legs, effective period rate
    /// for post-fixed legs.
    pub rate: f64,
    pub quarters: u32,
    /// FX rate at inception. Required for exchange-rate exposures.
    #[serde(default)]
    pub fx_start: Option<f64>,
}

impl SwapExposure {
    pub fn new(
        side: ExposureSide,
        notional: f64,
        indexer: IndexerKind,
        rate: f64,
        quarters: u32,
        fx_start: Option<f64>,
    ) -> Result<Self, ValuationError> {
        let exposure = Self {
            side,
            notional,
            indexer,
            rate,
            quarters,
            fx_start,
        };
        exposure.validate()?;
        Ok(exposure)
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        ensure_positive("notional", self.notional)?;
        if self.quarters < 1 {
            return Err(ValuationError::InvalidQuarters(self.quarters));
        }
        if self.indexer.uses_fx() {
            let fx = self.fx_start.ok_or(ValuationError::MissingFxRate {
                leg: "exposure",
                field: "start",
            })?;
            ensure_positive("fx_start", fx)?;
        }
        Ok(())
    }
}

/// The swap contracted to hedge a [`SwapExposure`].
///
/// The asset leg is received and the liability leg is paid; both are
/// applied to the exposure's notional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapHedge {
    pub asset_indexer: IndexerKind,
    pub liability_indexer: IndexerKind,
    pub asset_rate: f64,
    pub liability_rate: f64,
    /// Cupom cambial of an FX-indexed asset leg.
    #[serde(default)]
    pub asset_cupom: Option<f64>,
    /// Cupom cambial of an FX-indexed liability leg.
    #[serde(default)]
    pub liability_cupom: Option<f64>,
    /// FX rate at maturity. Required when any leg is FX-indexed.
    #[serde(default)]
    pub fx_maturity: Option<f64>,
}

impl SwapHedge {
    pub fn new(
        asset_indexer: IndexerKind,
        liability_indexer: IndexerKind,
        asset_rate: f64,
        liability_rate: f64,
    ) -> Self {
        Self {
            asset_indexer,
            liability_indexer,
            asset_rate,
            liability_rate,
            asset_cupom: None,
            liability_cupom: None,
            fx_maturity: None,
        }
    }

    pub fn with_asset_cupom(mut self, cupom: f64) -> Self {
        self.asset_cupom = Some(cupom);
        self
    }

    pub fn with_liability_cupom(mut self, cupom: f64) -> Self {
        self.liability_cupom = Some(cupom);
        self
    }

    pub fn with_fx_maturity(mut self, fx: f64) -> Self {
        self.fx_maturity = Some(fx);
        self
    }

    pub fn uses_fx(&self) -> bool {
        self.asset_indexer.uses_fx() || self.liability_indexer.uses_fx()
    }

    /// Rate applied to the asset leg: the cupom when FX-indexed and given.
    pub fn asset_leg_rate(&self) -> f64 {
        match self.asset_indexer {
            IndexerKind::ExchangeRate => self.asset_cupom.unwrap_or(self.asset_rate),
            _ => self.asset_rate,
        }
    }

    /// Rate applied to the liability leg: the cupom when FX-indexed and given.
    pub fn liability_leg_rate(&self) -> f64 {
        match self.liability_indexer {
            IndexerKind::ExchangeRate => self.liability_cupom.unwrap_or(self.liability_rate),
            _ => self.liability_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        if let Some(fx) = self.fx_maturity {
            ensure_positive("fx_maturity", fx)?;
        }
        Ok(())
    }
}
