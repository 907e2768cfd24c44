use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{info, Level};

use crate::data::validate::{validate_tree, ValidationReport};

pub const PASS_MESSAGE: &str = "Validation passed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Check catalog records and their image assets under <BASE_DIR>/data.
#[derive(Debug, Parser)]
#[command(name = "catalog-validator", version)]
pub struct Args {
    /// Directory containing data/ and the referenced assets
    #[arg(default_value = ".")]
    pub base_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Raise stderr log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse `args` (program name first), run the scan, and return the process exit code.
pub fn run_with_args(args: &[String]) -> i32 {
    let parsed = match Args::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };
    init_logging(parsed.verbose);
    run(&parsed)
}

pub fn run(args: &Args) -> i32 {
    info!("validating {}", args.base_dir.display());
    let report = match validate_tree(&args.base_dir) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("validation aborted: {err}");
            return 2;
        }
    };

    match args.format {
        OutputFormat::Text => print!("{}", render_text_output(&report)),
        OutputFormat::Json => match render_json_output(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize validation report: {err}");
                return 2;
            }
        },
    }

    if report.passed() {
        0
    } else {
        1
    }
}

fn render_text_output(report: &ValidationReport) -> String {
    if report.passed() {
        format!("{PASS_MESSAGE}\n")
    } else {
        report.render_text()
    }
}

fn render_json_output(report: &ValidationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "passed": report.passed(),
        "issues": report.issues,
    }))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
