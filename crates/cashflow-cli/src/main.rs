mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::time_value::{ConvertRateArgs, IrrArgs, NpvArgs};

/// Cash-flow return analytics with decimal precision
#[derive(Parser)]
#[command(
    name = "cfr",
    version,
    about = "Cash-flow IRR and present-value analytics",
    long_about = "A CLI for analyzing evenly-spaced cash-flow schedules with decimal \
                  precision. Solves the internal rate of return via Newton-Raphson, \
                  computes present value at a quoted discount rate, and converts \
                  between effective annual and monthly rates."
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
    /// Full schedule analysis: IRR, annualized IRR, and PV at the quoted rate
    Analyze(AnalyzeArgs),
    /// Solve the internal rate of return of a raw cash-flow series
    Irr(IrrArgs),
    /// Net present value of a cash-flow series at a fixed rate
    Npv(NpvArgs),
    /// Convert between effective annual and monthly rates
    ConvertRate(ConvertRateArgs),
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
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Irr(args) => commands::time_value::run_irr(args),
        Commands::Npv(args) => commands::time_value::run_npv(args),
        Commands::ConvertRate(args) => commands::time_value::run_convert_rate(args),
        Commands::Version => {
            println!("cfr {}", env!("CARGO_PKG_VERSION"));
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
