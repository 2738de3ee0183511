mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::appreciation::AppreciationArgs;
use commands::brokerage::BrokerageArgs;
use commands::loan::EmiArgs;
use commands::stamp_duty::StampDutyArgs;

/// Real-estate financial calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "rcalc",
    version,
    about = "Real-estate financial calculations with decimal precision",
    long_about = "A CLI for the realty-calc suite: EMI amortization, \
                  compound plot appreciation, stamp duty schedules, and \
                  brokerage fees. All arithmetic runs on 128-bit decimals."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the equated monthly installment for a loan
    Emi(EmiArgs),
    /// Project compound appreciation of a property over a holding period
    Appreciation(AppreciationArgs),
    /// Calculate stamp duty from the state rate schedule
    StampDuty(StampDutyArgs),
    /// Calculate a flat-rate brokerage fee
    Brokerage(BrokerageArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Appreciation(args) => commands::appreciation::run_appreciation(args),
        Commands::StampDuty(args) => commands::stamp_duty::run_stamp_duty(args),
        Commands::Brokerage(args) => commands::brokerage::run_brokerage(args),
        Commands::Version => {
            println!("rcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
