//! derivatives-engine CLI
//!
//! Value swaps, options, futures and forwards from JSON parameter files.
//!
//! # Usage
//!
//! ```bash
//! # Swap exposure hedged by a swap, with the quarterly series
//! derivatives-engine swap --input swap.json
//!
//! # Option strategy profit curve as JSON
//! derivatives-engine strategy --input iron_condor.json --format json
//!
//! # Futures margin account over 30 days, reproducible with a seed
//! derivatives-engine futures --input futures.json --days 30 --seed 42
//! ```

use derivatives_engine::core::error::ValuationError;
use derivatives_engine::core::types::Position;
use derivatives_engine::forwards::ndf::NdfContract;
use derivatives_engine::futures::di::{DiFuturesContract, DiFuturesEngine};
use derivatives_engine::futures::margin::{FuturesContract, FuturesMarginEngine, MarginConfig};
use derivatives_engine::options::contract::OptionContract;
use derivatives_engine::options::pricing::Greeks;
use derivatives_engine::options::strategy::{
    GridConfig, MarketInputs, StrategyComposer, StrategyKind,
};
use derivatives_engine::swap::engine::{SwapLegEngine, TimeSeriesPoint};
use derivatives_engine::swap::params::{SwapExposure, SwapHedge};
use derivatives_engine::swap::report::SwapReport;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"derivatives-engine — valuation and hedge simulation for Brazilian derivatives

USAGE:
    derivatives-engine <COMMAND> [OPTIONS]

COMMANDS:
    swap        Value an exposure and its hedging swap
    option      Price a single option leg with Greeks
    strategy    Compose a multi-leg option strategy
    futures     Simulate a futures margin account
    di          Value a DI futures position
    ndf         Settle a non-deliverable forward
    help        Show this message

OPTIONS:
    --input <FILE>      Path to JSON parameter file (required)
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (futures):
    --days <N>          Simulated trading days (default: 21)
    --seed <N>          Seed of the daily price path (default: 42)

EXAMPLES:
    derivatives-engine swap --input swap.json
    derivatives-engine option --input call.json --format json
    derivatives-engine futures --input dollar.json --days 30 --seed 7"#
    );
}

/// Options shared by every command.
struct CommonArgs {
    input_path: String,
    json: bool,
    days: usize,
    seed: u64,
}

fn parse_args(args: &[String]) -> CommonArgs {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut days = 21usize;
    let mut seed = 42u64;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--days" => {
                i += 1;
                days = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--days requires a number");
                        process::exit(1);
                    });
            }
            "--seed" => {
                i += 1;
                seed = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--seed requires a number");
                        process::exit(1);
                    });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    if format != "text" && format != "json" {
        eprintln!("Unknown format '{}': expected 'text' or 'json'", format);
        process::exit(1);
    }
    CommonArgs {
        input_path,
        json: format == "json",
        days,
        seed,
    }
}

fn load_input<T: DeserializeOwned>(path: &str) -> T {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });
    log::debug!("loaded {} bytes from {}", content.len(), path);
    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        process::exit(1);
    })
}

fn check(result: Result<(), ValuationError>) {
    if let Err(e) = result {
        eprintln!("Invalid parameters: {}", e);
        process::exit(1);
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

#[derive(Deserialize)]
struct SwapInput {
    exposure: SwapExposure,
    hedge: SwapHedge,
}

#[derive(Serialize)]
struct SwapOutput {
    report: SwapReport,
    time_series: Vec<TimeSeriesPoint>,
}

fn cmd_swap(args: &[String]) {
    let args = parse_args(args);
    let input: SwapInput = load_input(&args.input_path);
    check(input.exposure.validate());
    check(input.hedge.validate());

    let valued = SwapReport::generate(&input.exposure, &input.hedge).and_then(|report| {
        SwapLegEngine::time_series(&input.exposure, &input.hedge)
            .map(|time_series| SwapOutput {
                report,
                time_series,
            })
    });
    let output = valued.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if args.json {
        print_json(&output);
    } else {
        print!("{}", output.report);
        println!("\n{:>7} {:>16} {:>16} {:>16} {:>16}", "Quarter", "Exposure", "Asset", "Liability", "Net");
        for point in &output.time_series {
            println!(
                "{:>7} {:>16.2} {:>16.2} {:>16.2} {:>16.2}",
                point.quarter,
                point.exposure_value,
                point.asset_value,
                point.liability_value,
                point.net_value
            );
        }
    }
}

#[derive(Serialize)]
struct OptionOutput {
    premium: f64,
    intrinsic_value: f64,
    time_value: f64,
    break_even: f64,
    greeks: Greeks,
}

fn cmd_option(args: &[String]) {
    let args = parse_args(args);
    let contract: OptionContract = load_input(&args.input_path);
    check(contract.validate());

    let premium = contract.premium();
    let output = OptionOutput {
        premium,
        intrinsic_value: contract.intrinsic_value(),
        time_value: contract.time_value(premium),
        break_even: contract.break_even(premium),
        greeks: contract.greeks(),
    };

    if args.json {
        print_json(&output);
    } else {
        println!(
            "=== {} {} {} ===",
            contract.position, contract.kind, contract.style
        );
        println!("Premium:         {:.4}", output.premium);
        println!("Intrinsic Value: {:.4}", output.intrinsic_value);
        println!("Time Value:      {:.4}", output.time_value);
        println!("Break-even:      {:.4}", output.break_even);
        println!("Delta:           {:.4}", output.greeks.delta);
        println!("Gamma:           {:.4}", output.greeks.gamma);
        println!("Theta (daily):   {:.4}", output.greeks.theta_daily);
        println!("Vega (1%):       {:.4}", output.greeks.vega_per_1pct);
    }
}

#[derive(Deserialize)]
struct StrategyInput {
    market: MarketInputs,
    kind: StrategyKind,
    #[serde(default)]
    grid: Option<GridConfig>,
}

fn cmd_strategy(args: &[String]) {
    let args = parse_args(args);
    let input: StrategyInput = load_input(&args.input_path);
    let grid = input.grid.unwrap_or_default();

    let profile = StrategyComposer::compose(input.kind, &input.market, &grid).unwrap_or_else(|e| {
        eprintln!("Invalid parameters: {}", e);
        process::exit(1);
    });

    if args.json {
        print_json(&profile);
    } else {
        print!("{}", profile);
    }
}

#[derive(Deserialize)]
struct FuturesInput {
    contract: FuturesContract,
    #[serde(default)]
    margin: Option<MarginConfig>,
}

fn cmd_futures(args: &[String]) {
    let args = parse_args(args);
    let input: FuturesInput = load_input(&args.input_path);
    check(input.contract.validate());
    let config = input.margin.unwrap_or_default();

    let simulation = FuturesMarginEngine::simulate(&input.contract, args.days, args.seed, &config);

    if args.json {
        print_json(&simulation);
    } else {
        println!("Contract Type:       {}", input.contract.contract_type);
        print!("{}", simulation);
        println!("\n{:>4} {:>12} {:>14} {:>14}  Call", "Day", "Price", "Daily P&L", "Balance");
        for state in &simulation.account {
            println!(
                "{:>4} {:>12.4} {:>14.2} {:>14.2}  {}",
                state.day,
                state.price,
                state.daily_pnl,
                state.balance,
                if state.margin_call { "yes" } else { "" }
            );
        }
    }
}

#[derive(Deserialize)]
struct DiInput {
    contract: DiFuturesContract,
    operation: Position,
}

fn cmd_di(args: &[String]) {
    let args = parse_args(args);
    let input: DiInput = load_input(&args.input_path);
    check(input.contract.validate());

    let valuation = DiFuturesEngine::valuate(&input.contract, input.operation);
    if args.json {
        print_json(&valuation);
    } else {
        print!("{}", valuation);
    }
}

#[derive(Serialize)]
struct NdfOutput {
    contract: NdfContract,
    result: f64,
}

fn cmd_ndf(args: &[String]) {
    let args = parse_args(args);
    let contract: NdfContract = load_input(&args.input_path);
    check(contract.validate());

    if args.json {
        print_json(&NdfOutput {
            contract,
            result: contract.result(),
        });
    } else {
        print!("{}", contract);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];
    log::debug!("running command '{}'", command);

    match command {
        "swap" => cmd_swap(rest),
        "option" => cmd_option(rest),
        "strategy" => cmd_strategy(rest),
        "futures" => cmd_futures(rest),
        "di" => cmd_di(rest),
        "ndf" => cmd_ndf(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
