//! loan-calculator CLI
//!
//! Print amortization schedules from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Both methods for the default demo loan
//! loan-calculator
//!
//! # One method, custom loan, JSON output
//! loan-calculator --principal 250000 --rate 0.05 --months 360 \
//!     --commission 0.004 --method equal-payment --format json
//! ```
//!
//! Set `RUST_LOG=debug` (or `trace` for every period) to see engine logging.

use loan_calculator::amortization::engine::{AmortizationEngine, RepaymentMethod};
use loan_calculator::amortization::terms::LoanTerms;
use loan_calculator::core::schedule::Schedule;
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::process;
use std::str::FromStr;
use thiserror::Error;

fn print_usage() {
    eprintln!(
        r#"loan-calculator: exact decimal amortization schedules

USAGE:
    loan-calculator [OPTIONS]
    loan-calculator help

OPTIONS:
    --principal <AMOUNT>    Amount borrowed (default: 10000)
    --rate <RATE>           Annual interest rate as a fraction (default: 0.0414)
    --months <N>            Number of monthly installments (default: 12)
    --commission <RATE>     Annual platform commission rate (default: 0.012)
    --method <METHOD>       equal-payment, equal-principal or both (default: both)
    --format <FORMAT>       Output format: text (default) or json

EXAMPLES:
    loan-calculator
    loan-calculator --principal 250000 --rate 0.05 --months 360 --method equal-payment
    loan-calculator --rate 0 --months 6 --format json"#
    );
}

/// JSON output schema for one computed schedule.
#[derive(serde::Serialize)]
struct ScheduleOutput<'a> {
    method: RepaymentMethod,
    terms: &'a LoanTerms,
    schedule: &'a Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format '{0}', expected text or json")]
struct UnknownFormat(String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

struct Options {
    terms: LoanTerms,
    methods: Vec<RepaymentMethod>,
    format: OutputFormat,
}

fn parse_decimal(flag: &str, value: Option<&String>) -> Decimal {
    let raw = value.unwrap_or_else(|| {
        eprintln!("{} requires a decimal value", flag);
        process::exit(1);
    });
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Invalid value '{}' for {}: {}", raw, flag, e);
        process::exit(1);
    })
}

fn parse_options(args: &[String]) -> Options {
    let mut terms = LoanTerms::new(dec!(10000), dec!(0.0414), 12, dec!(0.012));
    let mut methods = RepaymentMethod::ALL.to_vec();
    let mut format = OutputFormat::Text;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--principal" => {
                i += 1;
                terms.principal = parse_decimal("--principal", args.get(i));
            }
            "--rate" => {
                i += 1;
                terms.annual_rate = parse_decimal("--rate", args.get(i));
            }
            "--commission" => {
                i += 1;
                terms.annual_commission = parse_decimal("--commission", args.get(i));
            }
            "--months" => {
                i += 1;
                terms.months = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--months requires a whole number");
                        process::exit(1);
                    });
            }
            "--method" => {
                i += 1;
                let value = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--method requires equal-payment, equal-principal or both");
                    process::exit(1);
                });
                methods = if value == "both" {
                    RepaymentMethod::ALL.to_vec()
                } else {
                    vec![value.parse().unwrap_or_else(|e| {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    })]
                };
            }
            "--format" => {
                i += 1;
                let value = args.get(i).unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
                format = value.parse().unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    Options {
        terms,
        methods,
        format,
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if let Some("help" | "--help" | "-h") = args.get(1).map(String::as_str) {
        print_usage();
        return;
    }

    let options = parse_options(args.get(1..).unwrap_or(&[]));
    info!(
        "computing {} schedule(s) for principal {} over {} months",
        options.methods.len(),
        options.terms.principal,
        options.terms.months
    );

    let mut outputs = Vec::new();
    for method in &options.methods {
        let schedule = AmortizationEngine::compute(*method, &options.terms).unwrap_or_else(|e| {
            eprintln!("Error computing {} schedule: {}", method, e);
            process::exit(1);
        });
        outputs.push((*method, schedule));
    }

    if options.format == OutputFormat::Json {
        let rendered: Vec<ScheduleOutput<'_>> = outputs
            .iter()
            .map(|(method, schedule)| ScheduleOutput {
                method: *method,
                terms: &options.terms,
                schedule,
            })
            .collect();
        let json = serde_json::to_string_pretty(&rendered).unwrap_or_else(|e| {
            eprintln!("Error serializing schedules: {}", e);
            process::exit(1);
        });
        println!("{}", json);
    } else {
        for (method, schedule) in &outputs {
            println!("=== {} schedule ===", method);
            println!("{}", schedule);
        }
    }
}
