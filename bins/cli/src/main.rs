//! exconv command-line converter
//!
//! Converts amounts using the ECB daily reference rates, or fixed rates given
//! on the command line.

mod args;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use args::{Cli, Command, ConvertArgs, RatesArgs, SourceArgs};
use exconv_core::{CurrencyConverter, EcbRateSource, RateSource, RateTable, StaticRateSource};
use exconv_shared::{AppConfig, AppError, AppResult, LogConfig};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => return report(&AppError::from(err)),
    };

    init_tracing(&config.log);

    let result = match cli.command {
        Command::Convert(args) => convert(args, &config),
        Command::Rates(args) => rates(args, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn init_tracing(log: &LogConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report(err: &AppError) -> ExitCode {
    eprintln!("exconv: {err}");
    ExitCode::from(err.exit_code())
}

/// Builds the rate source: fixed `--rate` entries if any, else the remote feed.
fn rate_source(args: &SourceArgs, config: &AppConfig) -> AppResult<Box<dyn RateSource>> {
    if args.rates.is_empty() {
        info!(url = %config.feed.url, "using remote rate feed");
        return Ok(Box::new(EcbRateSource::from_config(&config.feed)));
    }

    let base = args
        .base
        .clone()
        .unwrap_or_else(|| config.feed.base_currency.clone());
    debug!(%base, count = args.rates.len(), "using fixed rates");
    Ok(Box::new(StaticRateSource::with_base(
        base,
        args.rates.iter().cloned(),
    )?))
}

fn build_converter(
    args: &SourceArgs,
    config: &AppConfig,
) -> AppResult<CurrencyConverter<Box<dyn RateSource>>> {
    let converter = CurrencyConverter::with_source(rate_source(args, config)?);
    if args.eager || config.converter.eager_init {
        converter.init()?;
    }
    Ok(converter)
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}

fn convert(args: ConvertArgs, config: &AppConfig) -> AppResult<()> {
    let mut converter = build_converter(&args.source, config)?;
    converter.set_rounding(args.round.unwrap_or(config.converter.rounding));

    let conversion = converter.convert_detailed(args.amount, &args.from, &args.to)?;

    if args.json {
        println!("{}", to_json(&conversion)?);
    } else {
        println!("{} {}", conversion.result, conversion.to);
    }
    Ok(())
}

fn rates(args: RatesArgs, config: &AppConfig) -> AppResult<()> {
    let converter = build_converter(&args.source, config)?;
    let table = converter.rates_src().get_rates()?;

    if args.json {
        println!("{}", to_json(&table)?);
    } else {
        print!("{}", format_table(&table));
    }
    Ok(())
}

/// One `BASE/TARGET rate` line per pair, sorted, preceded by the date if known.
fn format_table(table: &RateTable) -> String {
    let mut lines = Vec::with_capacity(table.len() + 1);
    if let Some(date) = table.as_of() {
        lines.push(format!("as of {date}"));
    }

    let mut bases: Vec<_> = table.bases().collect();
    bases.sort_unstable();
    for base in bases {
        let Some(targets) = table.base(base) else {
            continue;
        };
        let mut targets: Vec<_> = targets.iter().collect();
        targets.sort_unstable_by(|a, b| a.0.cmp(b.0));
        for (target, rate) in targets {
            lines.push(format!("{base}/{target} {rate}"));
        }
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}
