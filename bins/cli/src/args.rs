//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use exconv_shared::RoundingMode;
use rust_decimal::Decimal;

fn parse_exchange_rate(s: &str) -> Result<(String, Decimal), String> {
    let rate = s.split_once(':').and_then(|(currency, raw_rate)| {
        let rate = Decimal::from_str_exact(raw_rate).ok()?;
        (!currency.is_empty()).then(|| (currency.to_string(), rate))
    });

    rate.ok_or(format!(
        "Could not decode exchange rate {s}: Format is {{CURRENCY}}:{{RATE}}, eg. USD:1.0921"
    ))
}

/// Convert amounts between currencies.
#[derive(Debug, Parser)]
#[command(name = "exconv", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an amount from one currency to another.
    Convert(ConvertArgs),
    /// Print the current rate table.
    Rates(RatesArgs),
}

/// Where rates come from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Use a fixed rate instead of the remote feed (repeatable).
    #[arg(short = 'r', long = "rate", value_parser = parse_exchange_rate)]
    pub rates: Vec<(String, Decimal)>,

    /// Base currency of the `--rate` entries. Defaults to the feed's base.
    #[arg(short = 'b', long)]
    pub base: Option<String>,

    /// Fetch rates before doing anything else.
    #[arg(long)]
    pub eager: bool,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Amount to convert.
    #[arg(allow_negative_numbers = true)]
    pub amount: Decimal,

    /// Currency to convert from.
    pub from: String,

    /// Currency to convert to.
    pub to: String,

    /// Pre-rounding mode: none, up, or down.
    #[arg(short = 'R', long)]
    pub round: Option<RoundingMode>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the full conversion as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RatesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}
