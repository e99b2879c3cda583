use crate::core::error::{ensure_non_negative, ensure_positive, ValuationError};
use crate::core::types::{ContractType, Position};
use crate::core::BUSINESS_DAYS_PER_YEAR;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Margin and contract-size parameters of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Initial margin as a fraction of notional.
    pub initial_margin_rate: f64,
    /// Maintenance margin as a fraction of the initial margin.
    pub maintenance_ratio: f64,
    /// Currency value of one price point per contract.
    pub contract_multiplier: f64,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            initial_margin_rate: 0.10,
            maintenance_ratio: 0.50,
            contract_multiplier: 1_000.0,
        }
    }
}

/// A futures position on an underlying quoted at `spot`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuturesContract {
    pub notional: f64,
    pub spot: f64,
    pub risk_free_rate: f64,
    pub settlement_price: f64,
    /// Business days until settlement.
    pub business_days: u32,
    /// Long (`true`) or short (`false`) the underlying.
    pub is_asset: bool,
    pub contract_type: ContractType,
}

impl FuturesContract {
    pub fn new(
        notional: f64,
        spot: f64,
        risk_free_rate: f64,
        settlement_price: f64,
        business_days: u32,
        is_asset: bool,
        contract_type: ContractType,
    ) -> Result<Self, ValuationError> {
        let contract = Self {
            notional,
            spot,
            risk_free_rate,
            settlement_price,
            business_days,
            is_asset,
            contract_type,
        };
        contract.validate()?;
        Ok(contract)
    }

    pub fn validate(&self) -> Result<(), ValuationError> {
        ensure_positive("notional", self.notional)?;
        ensure_positive("spot", self.spot)?;
        ensure_non_negative("risk_free_rate", self.risk_free_rate)?;
        ensure_positive("settlement_price", self.settlement_price)?;
        if self.business_days < 1 {
            return Err(ValuationError::InvalidBusinessDays(self.business_days));
        }
        Ok(())
    }

    pub fn theoretical_price(&self) -> f64 {
        theoretical_price(
            self.spot,
            self.risk_free_rate,
            self.business_days,
            BUSINESS_DAYS_PER_YEAR,
        )
    }

    /// Contracts needed to cover the notional at `price`. Not rounded.
    pub fn number_of_contracts(&self, price: f64, config: &MarginConfig) -> f64 {
        self.notional / (price * config.contract_multiplier)
    }

    fn direction(&self) -> f64 {
        if self.is_asset {
            1.0
        } else {
            -1.0
        }
    }
}

/// Cost-of-carry futures price with continuous compounding.
///
/// `spot * exp(rate * days / day_basis)`
pub fn theoretical_price(spot: f64, rate: f64, days: u32, day_basis: f64) -> f64 {
    spot * (rate * f64::from(days) / day_basis).exp()
}

/// One day of the margin account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginAccountState {
    pub day: usize,
    pub price: f64,
    pub daily_pnl: f64,
    pub balance: f64,
    pub initial_margin: f64,
    pub maintenance_margin: f64,
    /// Balance fell below maintenance and was reset to the initial margin.
    pub margin_call: bool,
}

/// Settlement outcome of a futures trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuturesResult {
    pub operation: Position,
    pub pnl: f64,
    /// P&L of the hedged position, present for hedge trades only.
    pub hedge_result: Option<f64>,
    pub net_result: f64,
}

/// Everything a host needs to chart one futures trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuturesSimulation {
    pub theoretical_price: f64,
    pub number_of_contracts: f64,
    pub prices: Vec<f64>,
    pub account: Vec<MarginAccountState>,
    pub result: FuturesResult,
}

impl std::fmt::Display for FuturesSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let calls = self.account.iter().filter(|s| s.margin_call).count();
        writeln!(f, "=== Futures Simulation ===")?;
        writeln!(f, "Theoretical Price:   {:.4}", self.theoretical_price)?;
        writeln!(f, "Contracts:           {:.4}", self.number_of_contracts)?;
        writeln!(f, "Simulated Days:      {}", self.prices.len())?;
        writeln!(f, "Margin Calls:        {}", calls)?;
        if let Some(last) = self.account.last() {
            writeln!(f, "Final Balance:       {:.2}", last.balance)?;
        }
        writeln!(f, "P&L:                 {:.2}", self.result.pnl)?;
        if let Some(hedge) = self.result.hedge_result {
            writeln!(f, "Hedged Position:     {:.2}", hedge)?;
        }
        writeln!(f, "Net Result:          {:.2}", self.result.net_result)
    }
}

/// Futures pricing, synthetic price paths and daily margin settlement.
pub struct FuturesMarginEngine;

impl FuturesMarginEngine {
    /// Synthetic daily price path from `initial` to `final_price`.
    ///
    /// Interior days are drawn uniformly between the two endpoints from a
    /// generator seeded with `seed`, so the same seed always yields the same
    /// path. A one-day path holds only the final price.
    pub fn simulate_daily_prices(
        initial: f64,
        final_price: f64,
        days: usize,
        seed: u64,
    ) -> Vec<f64> {
        match days {
            0 => return Vec::new(),
            1 => return vec![final_price],
            _ => {}
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let low = initial.min(final_price);
        let high = initial.max(final_price);

        let mut prices = Vec::with_capacity(days);
        prices.push(initial);
        for _ in 1..days - 1 {
            prices.push(rng.gen_range(low..=high));
        }
        prices.push(final_price);
        prices
    }

    /// Daily mark-to-market of a margin account over `prices`.
    ///
    /// Whenever the balance drops below the maintenance margin it is reset
    /// to the initial margin. The last day's balance is then replaced by
    /// `max(0, initial_margin + total_pnl)`, computed from the first and
    /// last prices alone; it can disagree with the day-by-day path.
    ///
    /// Contracts are sized from the first price of the path.
    pub fn margin_account(
        prices: &[f64],
        notional: f64,
        is_asset: bool,
        config: &MarginConfig,
    ) -> Vec<MarginAccountState> {
        let Some(&first) = prices.first() else {
            return Vec::new();
        };
        let contracts = notional / (first * config.contract_multiplier);
        Self::margin_account_for_contracts(prices, notional, contracts, is_asset, config)
    }

    /// [`margin_account`](Self::margin_account) with an explicit contract
    /// count, for paths whose first price is not the trade price.
    pub fn margin_account_for_contracts(
        prices: &[f64],
        notional: f64,
        contracts: f64,
        is_asset: bool,
        config: &MarginConfig,
    ) -> Vec<MarginAccountState> {
        let Some(&first) = prices.first() else {
            return Vec::new();
        };
        let initial_margin = config.initial_margin_rate * notional;
        let maintenance_margin = config.maintenance_ratio * initial_margin;
        let direction = if is_asset { 1.0 } else { -1.0 };
        let point_value = config.contract_multiplier * contracts * direction;

        let mut balance = initial_margin;
        let mut account = Vec::with_capacity(prices.len());
        for (day, &price) in prices.iter().enumerate() {
            let daily_pnl = if day == 0 {
                0.0
            } else {
                (price - prices[day - 1]) * point_value
            };
            balance += daily_pnl;
            let margin_call = balance < maintenance_margin;
            if margin_call {
                log::debug!(
                    "margin call on day {}: balance {:.2} below {:.2}",
                    day,
                    balance,
                    maintenance_margin
                );
                balance = initial_margin;
            }
            account.push(MarginAccountState {
                day,
                price,
                daily_pnl,
                balance,
                initial_margin,
                maintenance_margin,
                margin_call,
            });
        }

        if let (Some(last), Some(&last_price)) = (account.last_mut(), prices.last()) {
            let total_pnl = (last_price - first) * point_value;
            last.balance = (initial_margin + total_pnl).max(0.0);
        }
        account
    }

    /// Settlement P&L against the theoretical price.
    ///
    /// Hedge trades offset the P&L with an equal and opposite result on the
    /// hedged position, so their net result is zero.
    pub fn futures_result(
        operation: Position,
        theoretical_price: f64,
        settlement_price: f64,
        number_of_contracts: f64,
        is_asset: bool,
        contract_type: ContractType,
        config: &MarginConfig,
    ) -> FuturesResult {
        let direction = if is_asset { 1.0 } else { -1.0 };
        let pnl = (settlement_price - theoretical_price)
            * config.contract_multiplier
            * number_of_contracts
            * direction;
        match contract_type {
            ContractType::Hedge => {
                let hedge_result = -pnl;
                FuturesResult {
                    operation,
                    pnl,
                    hedge_result: Some(hedge_result),
                    net_result: pnl + hedge_result,
                }
            }
            ContractType::Speculation => FuturesResult {
                operation,
                pnl,
                hedge_result: None,
                net_result: pnl,
            },
        }
    }

    /// Price the contract, walk a seeded path from the theoretical price to
    /// the settlement price and settle the margin account along it.
    ///
    /// The account is always sized from the theoretical price, including a
    /// one-day path that holds only the settlement price.
    pub fn simulate(
        contract: &FuturesContract,
        days: usize,
        seed: u64,
        config: &MarginConfig,
    ) -> FuturesSimulation {
        let theoretical = contract.theoretical_price();
        let contracts = contract.number_of_contracts(theoretical, config);
        let prices =
            Self::simulate_daily_prices(theoretical, contract.settlement_price, days, seed);
        let account = Self::margin_account_for_contracts(
            &prices,
            contract.notional,
            contracts,
            contract.is_asset,
            config,
        );
        let operation = if contract.direction() > 0.0 {
            Position::Buy
        } else {
            Position::Sell
        };
        let result = Self::futures_result(
            operation,
            theoretical,
            contract.settlement_price,
            contracts,
            contract.is_asset,
            contract.contract_type,
            config,
        );
        FuturesSimulation {
            theoretical_price: theoretical,
            number_of_contracts: contracts,
            prices,
            account,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_theoretical_price() {
        assert_abs_diff_eq!(
            theoretical_price(5.0, 0.1075, 252, 252.0),
            5.0 * 0.1075_f64.exp(),
            epsilon = 1e-12
        );
        assert_eq!(theoretical_price(5.0, 0.1, 0, 252.0), 5.0);
    }

    #[test]
    fn test_price_path_endpoints_and_bounds() {
        let path = FuturesMarginEngine::simulate_daily_prices(5.0, 5.3, 30, 42);
        assert_eq!(path.len(), 30);
        assert_eq!(path[0], 5.0);
        assert_eq!(path[29], 5.3);
        assert!(path.iter().all(|p| (5.0..=5.3).contains(p)));
    }

    #[test]
    fn test_price_path_is_reproducible() {
        let a = FuturesMarginEngine::simulate_daily_prices(100.0, 90.0, 20, 7);
        let b = FuturesMarginEngine::simulate_daily_prices(100.0, 90.0, 20, 7);
        let c = FuturesMarginEngine::simulate_daily_prices(100.0, 90.0, 20, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_short_paths() {
        assert!(FuturesMarginEngine::simulate_daily_prices(1.0, 2.0, 0, 1).is_empty());
        assert_eq!(FuturesMarginEngine::simulate_daily_prices(1.0, 2.0, 1, 1), vec![2.0]);
        assert_eq!(
            FuturesMarginEngine::simulate_daily_prices(1.0, 2.0, 2, 1),
            vec![1.0, 2.0]
        );
    }

    #[test]
    fn test_margin_account_without_calls() {
        let config = MarginConfig::default();
        // 1,000,000 notional at price 100 -> 10 contracts, 10,000 per point.
        let account = FuturesMarginEngine::margin_account(
            &[100.0, 101.0, 100.5],
            1_000_000.0,
            true,
            &config,
        );
        assert_eq!(account.len(), 3);
        assert_eq!(account[0].balance, 100_000.0);
        assert_eq!(account[0].maintenance_margin, 50_000.0);
        assert_abs_diff_eq!(account[1].daily_pnl, 10_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(account[1].balance, 110_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(account[2].balance, 105_000.0, epsilon = 1e-6);
        assert!(account.iter().all(|s| !s.margin_call));
    }

    #[test]
    fn test_margin_call_resets_balance() {
        let config = MarginConfig::default();
        // Short position: a 6-point rally costs 60,000 and breaches maintenance.
        let account = FuturesMarginEngine::margin_account(
            &[100.0, 106.0, 105.0, 104.0],
            1_000_000.0,
            false,
            &config,
        );
        assert!(account[1].margin_call);
        assert_eq!(account[1].balance, 100_000.0);
        assert_abs_diff_eq!(account[2].balance, 110_000.0, epsilon = 1e-6);
        // Final day is recomputed end to end: 100,000 - 4 * 10,000.
        assert_abs_diff_eq!(account[3].balance, 60_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_final_balance_floors_at_zero() {
        let config = MarginConfig::default();
        let account =
            FuturesMarginEngine::margin_account(&[100.0, 80.0], 1_000_000.0, true, &config);
        assert!(account[1].margin_call);
        assert_eq!(account[1].balance, 0.0);
    }

    #[test]
    fn test_futures_result_hedge_nets_to_zero() {
        let config = MarginConfig::default();
        let hedge = FuturesMarginEngine::futures_result(
            Position::Buy,
            5.10,
            5.30,
            10.0,
            true,
            ContractType::Hedge,
            &config,
        );
        assert_abs_diff_eq!(hedge.pnl, 2_000.0, epsilon = 1e-6);
        assert_eq!(hedge.hedge_result, Some(-hedge.pnl));
        assert_eq!(hedge.net_result, 0.0);

        let speculation = FuturesMarginEngine::futures_result(
            Position::Sell,
            5.10,
            5.30,
            10.0,
            false,
            ContractType::Speculation,
            &config,
        );
        assert_abs_diff_eq!(speculation.net_result, -2_000.0, epsilon = 1e-6);
        assert!(speculation.hedge_result.is_none());
    }

    #[test]
    fn test_simulate_ties_the_pieces_together() {
        let contract =
            FuturesContract::new(1_000_000.0, 5.0, 0.1075, 5.4, 63, true, ContractType::Speculation)
                .unwrap();
        let config = MarginConfig::default();
        let sim = FuturesMarginEngine::simulate(&contract, 21, 42, &config);

        assert_eq!(sim.prices.len(), 21);
        assert_eq!(sim.account.len(), 21);
        assert_eq!(sim.prices[0], contract.theoretical_price());
        assert_eq!(sim.result.operation, Position::Buy);
        assert!(sim.result.pnl > 0.0);
        assert!(sim.to_string().contains("Margin Calls:"));
    }

    #[test]
    fn test_explicit_contract_count_scales_daily_pnl() {
        let config = MarginConfig::default();
        let prices = [100.0, 101.0];
        let sized = FuturesMarginEngine::margin_account(&prices, 1_000_000.0, true, &config);
        let doubled = FuturesMarginEngine::margin_account_for_contracts(
            &prices,
            1_000_000.0,
            20.0,
            true,
            &config,
        );
        assert_abs_diff_eq!(sized[1].daily_pnl, 10_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(doubled[1].daily_pnl, 20_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(doubled[1].balance, 120_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_simulate_sizes_account_from_theoretical_price() {
        let contract =
            FuturesContract::new(1_000_000.0, 5.0, 0.0, 6.0, 21, true, ContractType::Speculation)
                .unwrap();
        let config = MarginConfig::default();

        for days in [1, 2, 10] {
            let sim = FuturesMarginEngine::simulate(&contract, days, 42, &config);
            assert_abs_diff_eq!(sim.number_of_contracts, 200.0, epsilon = 1e-9);
            let expected = FuturesMarginEngine::margin_account_for_contracts(
                &sim.prices,
                contract.notional,
                sim.number_of_contracts,
                true,
                &config,
            );
            assert_eq!(sim.account, expected);
        }

        // One-day path: only the settlement price, with no P&L on the account.
        let sim = FuturesMarginEngine::simulate(&contract, 1, 42, &config);
        assert_eq!(sim.prices, vec![6.0]);
        assert_eq!(sim.account[0].balance, sim.account[0].initial_margin);
        assert_abs_diff_eq!(sim.result.pnl, 200_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_contract_validation() {
        assert!(FuturesContract::new(0.0, 5.0, 0.1, 5.0, 10, true, ContractType::Hedge).is_err());
        assert_eq!(
            FuturesContract::new(1.0, 5.0, 0.1, 5.0, 0, true, ContractType::Hedge).unwrap_err(),
            ValuationError::InvalidBusinessDays(0)
        );
    }
}
