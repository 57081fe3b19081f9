//! CLI entry point for apicheck.
//!
//! Usage: `apicheck <config_file> <schema_file> [--quiet] [--format text|json]`.
//! Exits 0 when the configuration is valid, 1 when it is invalid or cannot be
//! loaded.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use apicheck::report::{ReportFormat, ValidationReport};
use apicheck::validator::ConfigValidator;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_SHA"),
    "\nbuilt: ",
    env!("BUILD_DATE")
);

#[derive(Parser)]
#[command(name = "apicheck")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Validate API test configurations", long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    apicheck test_config.json schema.json\n    apicheck test_config.json schema.json --quiet"
)]
struct Cli {
    /// Configuration file to validate (JSON, or YAML with a .yaml/.yml extension)
    config_file: PathBuf,
    /// JSON schema the configuration must satisfy
    schema_file: PathBuf,
    /// Suppress progress output; the report is still printed
    #[arg(short, long)]
    quiet: bool,
    /// Report format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1 like validation failures; --help/--version exit 0.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let code = match run(cli) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red(), e);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<bool> {
    let format: ReportFormat = cli.format.parse()?;
    let verbose = !cli.quiet && format == ReportFormat::Text;

    let mut validator = ConfigValidator::new(&cli.schema_file).with_verbose(verbose);
    validator
        .load_schema()
        .context("Error loading schema")?;

    let result = validator
        .validate_file(&cli.config_file)
        .context("Error loading configuration")?;

    let report = ValidationReport::new(&result);
    println!("{}", report.render(format)?);

    Ok(result.outcome.is_valid())
}
