//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::markdown_report::MarkdownReportAdapter;
use crate::domain::analysis::run_analysis;
use crate::domain::config_validation::{validate_analysis_config, validate_strategy_config};
use crate::domain::economic::{EconomicIndicators, IndicatorSeries};
use crate::domain::error::AnalyzerError;
use crate::domain::evaluation::evaluate_companies;
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::{
    StrategyConfig, DEFAULT_LONG_WINDOW, DEFAULT_POSITION_SIZE_PCT, DEFAULT_SHORT_WINDOW,
    DEFAULT_STOP_LOSS_PCT,
};
use crate::domain::universe::parse_codes;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{ReportContext, ReportPort};

#[derive(Parser, Debug)]
#[command(name = "marketlens", about = "Offline equity market analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full analysis and write the report
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List instruments available in the data directory
    ListInstruments {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range for one instrument
    Info {
        #[arg(long)]
        code: String,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze { config, output } => run_analyze(&config, output.as_ref()),
        Command::ListInstruments { config } => run_list_instruments(&config),
        Command::Info { code, config } => run_info(&code, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, AnalyzerError> {
    FileConfigAdapter::from_file(path).map_err(|e| AnalyzerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_strategy_config(config: &dyn ConfigPort) -> StrategyConfig {
    StrategyConfig {
        name: config
            .get_string("strategy", "name")
            .unwrap_or_else(|| "Golden Cross".to_string()),
        short_window: config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64)
            as usize,
        long_window: config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64) as usize,
        stop_loss_pct: config.get_double("strategy", "stop_loss_pct", DEFAULT_STOP_LOSS_PCT),
        position_size_pct: config.get_double(
            "strategy",
            "position_size_pct",
            DEFAULT_POSITION_SIZE_PCT,
        ),
    }
}

fn config_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, AnalyzerError> {
    let value = config
        .get_string("data", key)
        .ok_or_else(|| AnalyzerError::ConfigMissing {
            section: "data".into(),
            key: key.into(),
        })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| AnalyzerError::ConfigInvalid {
        section: "data".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

fn build_data_adapter(config: &dyn ConfigPort) -> Result<CsvAdapter, AnalyzerError> {
    let path = config
        .get_string("data", "path")
        .ok_or_else(|| AnalyzerError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(path)))
}

fn run_analyze(config_path: &PathBuf, output_override: Option<&PathBuf>) -> Result<(), AnalyzerError> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;
    validate_analysis_config(&adapter)?;
    validate_strategy_config(&adapter)?;

    let strategy = build_strategy_config(&adapter);
    let start_date = config_date(&adapter, "start_date")?;
    let end_date = config_date(&adapter, "end_date")?;

    let codes_value = adapter.get_string("data", "codes").unwrap_or_default();
    let codes = parse_codes(&codes_value).map_err(|e| AnalyzerError::ConfigInvalid {
        section: "data".into(),
        key: "codes".into(),
        reason: e.to_string(),
    })?;

    let data_port = build_data_adapter(&adapter)?;

    eprintln!(
        "Fetching prices for {} instruments ({} to {})...",
        codes.len(),
        start_date,
        end_date
    );
    let mut universe = Vec::with_capacity(codes.len());
    for code in &codes {
        let points = data_port.fetch_prices(code, start_date, end_date)?;
        universe.push(PriceSeries::new(code.clone(), points)?);
    }

    eprintln!("Running analysis...");
    let result = run_analysis(&universe, &strategy)?;
    eprintln!(
        "Decomposed {} observations into {} components ({} to reach 95% variance, elbow at {})",
        result.observations,
        result.decomposition.components.len(),
        result.decomposition.threshold_count,
        result.decomposition.elbow_index
    );
    eprintln!(
        "Crossovers: {} bullish, {} bearish",
        result.bullish_count(),
        result.bearish_count()
    );

    let policy_name = adapter
        .get_string("data", "policy_rate_series")
        .unwrap_or_else(|| "FEDFUNDS".to_string());
    let cpi_name = adapter
        .get_string("data", "cpi_series")
        .unwrap_or_else(|| "CPIAUCSL".to_string());
    let economic = EconomicIndicators {
        policy_rate: IndicatorSeries {
            name: policy_name.clone(),
            observations: data_port.fetch_indicator(&policy_name, start_date, end_date)?,
        },
        cpi: IndicatorSeries {
            name: cpi_name.clone(),
            observations: data_port.fetch_indicator(&cpi_name, start_date, end_date)?,
        },
    };

    let fundamentals = data_port.fetch_fundamentals()?;
    let evaluations = evaluate_companies(&fundamentals);

    let output = output_override
        .map(|p| p.display().to_string())
        .or_else(|| adapter.get_string("report", "output"))
        .unwrap_or_else(|| "report.md".to_string());

    let ctx = ReportContext {
        result: &result,
        strategy: &strategy,
        economic: &economic,
        evaluations: &evaluations,
    };
    MarkdownReportAdapter::new().write(&ctx, &output)?;
    eprintln!("Report written to {}", output);

    Ok(())
}

fn run_list_instruments(config_path: &PathBuf) -> Result<(), AnalyzerError> {
    let adapter = load_config(config_path)?;
    let data_port = build_data_adapter(&adapter)?;

    for code in data_port.list_instruments()? {
        println!("{code}");
    }
    Ok(())
}

fn run_info(code: &str, config_path: &PathBuf) -> Result<(), AnalyzerError> {
    let adapter = load_config(config_path)?;
    let data_port = build_data_adapter(&adapter)?;

    match data_port.get_data_range(code)? {
        Some((first, last, count)) => {
            println!("{code}: {count} observations from {first} to {last}");
        }
        None => println!("{code}: no data"),
    }
    Ok(())
}
