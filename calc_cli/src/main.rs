//! # Cifra CLI Application
//!
//! Terminal front end for `calc_core`: evaluate single requests, manage
//! worksheets, and run the everyday converters.
//!
//! Results go to stdout (human-readable, or JSON with `--json`); logs go to
//! stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn, Level};

use calc_core::calculations::finance::{AmortizationResult, DepreciationResult};
use calc_core::file_io::{load_worksheet_with_lock_check, with_worksheet_extension};
use calc_core::worksheet::ItemOutcome;
use calc_core::{
    evaluate, load_settings, load_worksheet, save_worksheet, CalcSettings, CalculationOutcome, CalculationRequest,
    FileLock, Worksheet,
};

#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(about = "Cifra - everyday calculations with step-by-step explanations")]
struct Args {
    /// Settings file (JSON) overriding the defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one calculation request given as JSON
    Eval {
        /// e.g. '{"type": "Increase", "value": 100, "percentage": 20}'
        request: String,
    },
    /// Create an empty worksheet
    New {
        path: PathBuf,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "Untitled")]
        title: String,
    },
    /// Append a calculation request to a worksheet
    Add {
        path: PathBuf,
        request: String,
        #[arg(long, default_value = "")]
        label: String,
    },
    /// Evaluate every item in a worksheet
    Run { path: PathBuf },
    /// Convert between Arabic and Roman numerals
    Roman { value: String },
    /// Word, sentence and reading-time statistics for a text file
    Text { path: PathBuf },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let configured = match &args.config {
        Some(path) => {
            Some(load_settings(path).with_context(|| format!("loading settings from {}", path.display()))?)
        }
        None => None,
    };
    let settings = configured.clone().unwrap_or_default();

    match &args.command {
        Command::Eval { request } => {
            let request = parse_request(request)?;
            Ok(report(&request, &settings, args.json))
        }
        Command::New { path, author, title } => {
            let path = with_worksheet_extension(path);
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            let mut sheet = Worksheet::new(author.as_str(), title.as_str());
            sheet.settings = settings;
            save_worksheet(&sheet, &path)?;
            println!("Created {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Add { path, request, label } => {
            let request = parse_request(request)?;
            add_item(&with_worksheet_extension(path), label, request)
        }
        Command::Run { path } => run_worksheet(&with_worksheet_extension(path), configured, args.json),
        Command::Roman { value } => {
            let value = value.trim();
            let request = match value.parse::<u32>() {
                Ok(arabic) => CalculationRequest::ArabicToRoman { arabic },
                Err(_) => CalculationRequest::RomanToArabic { roman: value.to_string() },
            };
            Ok(report(&request, &settings, args.json))
        }
        Command::Text { path } => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let request = CalculationRequest::TextStats { text, words_per_minute: None };
            Ok(report(&request, &settings, args.json))
        }
    }
}

fn parse_request(json: &str) -> Result<CalculationRequest> {
    serde_json::from_str(json).context("invalid calculation request")
}

fn add_item(path: &Path, label: &str, request: CalculationRequest) -> Result<ExitCode> {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "calc_cli".to_string());
    let _lock = FileLock::acquire(path, user)?;

    let mut sheet = load_worksheet(path)?;
    let label = if label.is_empty() { request.calc_type() } else { label };
    let id = sheet.add_item(label, request);
    save_worksheet(&sheet, path)?;

    debug!(%id, "item added");
    println!("Added {} to {} ({} items)", id, path.display(), sheet.item_count());
    Ok(ExitCode::SUCCESS)
}

/// `settings` from `--config`, when given, replace the worksheet's own.
fn run_worksheet(path: &Path, settings: Option<CalcSettings>, json: bool) -> Result<ExitCode> {
    let (mut sheet, lock) = load_worksheet_with_lock_check(path)?;
    if let Some(lock) = lock {
        warn!(user = %lock.user_id, machine = %lock.machine, "worksheet is being edited elsewhere");
    }
    if let Some(settings) = settings {
        sheet.settings = settings;
    }

    let outcomes = sheet.evaluate_all();
    let failed = outcomes.iter().filter(|o| o.outcome.is_err()).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("{} by {}", sheet.meta.title, display_or(&sheet.meta.author, "unknown"));
        println!("Modified {}", sheet.meta.modified.format("%Y-%m-%d %H:%M UTC"));
        for (index, (item, outcome)) in sheet.items.iter().zip(&outcomes).enumerate() {
            print_item(index + 1, &item.request, outcome);
        }
        println!();
        println!("{} items, {} failed", outcomes.len(), failed);
    }

    Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_item(number: usize, request: &CalculationRequest, item: &ItemOutcome) {
    println!();
    println!(
        "{}. {} [{}] {}",
        number,
        display_or(&item.label, "(no label)"),
        request.heading(),
        status_icon(item.outcome.is_ok())
    );
    match &item.outcome {
        Ok(outcome) => print_outcome(outcome),
        Err(e) => println!("   {}", e),
    }
}

/// Evaluate and print a single request, mapping the result to an exit code.
fn report(request: &CalculationRequest, settings: &CalcSettings, json: bool) -> ExitCode {
    match (evaluate(request, settings), json) {
        (Ok(outcome), true) => print_json(&outcome),
        (Ok(outcome), false) => {
            println!("{}", request.heading());
            print_outcome(&outcome);
        }
        (Err(e), true) => {
            print_json(&e);
            return ExitCode::FAILURE;
        }
        (Err(e), false) => {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: could not serialize output: {}", e),
    }
}

fn print_outcome(outcome: &CalculationOutcome) {
    if let Some(formula) = outcome.formula() {
        println!("   Formula: {}", formula);
    }
    for (index, step) in outcome.steps().iter().enumerate() {
        println!("   {:>2}. {}", index + 1, step);
    }
    match outcome {
        CalculationOutcome::Amortization(r) => print_amortization(r),
        CalculationOutcome::Depreciation(r) => print_depreciation(r),
        CalculationOutcome::TextStats(s) => {
            println!("   Characters:          {}", s.characters);
            println!("   Characters (no ws):  {}", s.characters_no_spaces);
        }
        _ => {}
    }
    println!("   => {}", outcome.summary());
}

fn print_amortization(r: &AmortizationResult) {
    println!("   {:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Principal", "Interest", "Balance");
    for row in &r.schedule {
        println!(
            "   {:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.month, row.payment, row.principal, row.interest, row.balance
        );
    }
    if r.schedule.len() < r.months as usize {
        println!("   ... {} more months", r.months as usize - r.schedule.len());
    }
}

fn print_depreciation(r: &DepreciationResult) {
    println!("   {:>4} {:>14} {:>14} {:>14}", "Year", "Depreciation", "Accumulated", "Book value");
    for row in &r.schedule {
        println!(
            "   {:>4} {:>14.2} {:>14.2} {:>14.2}",
            row.year, row.depreciation, row.accumulated, row.book_value
        );
    }
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn status_icon(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}
