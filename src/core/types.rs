use crate::core::error::ValuationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the return of a swap leg is determined.
///
/// UI labels (`"Pré"`, `"Pós"`, `"Cambial"`) are mapped to this enum at the
/// edge via [`FromStr`] or the serde aliases; the engines only ever see
/// the tagged variant.
///
/// # Examples
///
/// ```
/// use derivatives_engine::core::types::IndexerKind;
///
/// let kind: IndexerKind = "Pré".parse().unwrap();
/// assert_eq!(kind, IndexerKind::PreFixed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexerKind {
    /// Fixed annualized rate, compounded per quarter.
    #[serde(alias = "Pré", alias = "Pre")]
    PreFixed,
    /// Rate already expressed as the effective rate for the whole period.
    #[serde(alias = "Pós", alias = "Pos", alias = "CDI")]
    PostFixed,
    /// FX variation composed with a cupom cambial.
    #[serde(alias = "Cambial", alias = "FX")]
    ExchangeRate,
}

impl IndexerKind {
    pub fn uses_fx(self) -> bool {
        matches!(self, IndexerKind::ExchangeRate)
    }
}

impl fmt::Display for IndexerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IndexerKind::PreFixed => "PreFixed",
            IndexerKind::PostFixed => "PostFixed",
            IndexerKind::ExchangeRate => "ExchangeRate",
        };
        f.write_str(label)
    }
}

impl FromStr for IndexerKind {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PreFixed" | "Pré" | "Pre" | "Prefixado" => Ok(IndexerKind::PreFixed),
            "PostFixed" | "Pós" | "Pos" | "Pós-fixado" | "CDI" => Ok(IndexerKind::PostFixed),
            "ExchangeRate" | "Cambial" | "FX" | "Câmbio" => Ok(IndexerKind::ExchangeRate),
            other => Err(ValuationError::unknown_label("indexer", other)),
        }
    }
}

/// Which side of the balance sheet an exposure sits on.
///
/// Asset results are reported as-is; liability results are negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureSide {
    #[serde(alias = "Ativo")]
    Asset,
    #[serde(alias = "Passivo")]
    Liability,
}

impl ExposureSide {
    /// `+1.0` for assets, `-1.0` for liabilities.
    pub fn sign(self) -> f64 {
        match self {
            ExposureSide::Asset => 1.0,
            ExposureSide::Liability => -1.0,
        }
    }
}

impl fmt::Display for ExposureSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExposureSide::Asset => f.write_str("Asset"),
            ExposureSide::Liability => f.write_str("Liability"),
        }
    }
}

impl FromStr for ExposureSide {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Asset" | "Ativo" => Ok(ExposureSide::Asset),
            "Liability" | "Passivo" => Ok(ExposureSide::Liability),
            other => Err(ValuationError::unknown_label("exposure side", other)),
        }
    }
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    #[serde(alias = "Opção de Compra")]
    Call,
    #[serde(alias = "Opção de Venda")]
    Put,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => f.write_str("Call"),
            OptionKind::Put => f.write_str("Put"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Call" | "call" | "Opção de Compra" => Ok(OptionKind::Call),
            "Put" | "put" | "Opção de Venda" => Ok(OptionKind::Put),
            other => Err(ValuationError::unknown_label("option kind", other)),
        }
    }
}

/// Exercise style. Informational only: pricing is always European
/// Black-Scholes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OptionStyle {
    #[default]
    #[serde(alias = "Europeia")]
    European,
    #[serde(alias = "Americana")]
    American,
}

impl fmt::Display for OptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionStyle::European => f.write_str("European"),
            OptionStyle::American => f.write_str("American"),
        }
    }
}

impl FromStr for OptionStyle {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "European" | "Europeia" => Ok(OptionStyle::European),
            "American" | "Americana" => Ok(OptionStyle::American),
            other => Err(ValuationError::unknown_label("option style", other)),
        }
    }
}

/// Long (buy) or short (sell) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(alias = "Compra", alias = "Comprado")]
    Buy,
    #[serde(alias = "Venda", alias = "Vendido")]
    Sell,
}

impl Position {
    /// `+1.0` for buy, `-1.0` for sell.
    pub fn sign(self) -> f64 {
        match self {
            Position::Buy => 1.0,
            Position::Sell => -1.0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Buy => f.write_str("Buy"),
            Position::Sell => f.write_str("Sell"),
        }
    }
}

impl FromStr for Position {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Buy" | "Compra" | "Comprado" => Ok(Position::Buy),
            "Sell" | "Venda" | "Vendido" => Ok(Position::Sell),
            other => Err(ValuationError::unknown_label("position", other)),
        }
    }
}

/// Purpose of a futures trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    Hedge,
    #[serde(alias = "Especulação", alias = "Especulacao")]
    Speculation,
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractType::Hedge => f.write_str("Hedge"),
            ContractType::Speculation => f.write_str("Speculation"),
        }
    }
}

impl FromStr for ContractType {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Hedge" => Ok(ContractType::Hedge),
            "Speculation" | "Especulação" | "Especulacao" => Ok(ContractType::Speculation),
            other => Err(ValuationError::unknown_label("contract type", other)),
        }
    }
}
