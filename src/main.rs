use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use zipscan::sink::{JsonFileSink, ReportSink};
use zipscan::triage::config::ScanConfig;
use zipscan::{logging, ScanError, Scanner};

#[derive(Parser)]
#[command(name = "zipscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Static risk triage of an uploaded ZIP archive", long_about = None)]
struct Cli {
    /// ZIP archive to inspect
    archive: PathBuf,

    /// Where to write the JSON report
    output: PathBuf,

    /// JSON file overriding scan configuration defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.json_logs {
        logging::init_tracing_json();
    } else {
        logging::init_tracing();
    }

    match run(&cli) {
        Ok(()) => {
            println!("Report written to {}", cli.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            let code = err
                .downcast_ref::<ScanError>()
                .map(ScanError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ScanConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScanConfig::default(),
    };
    let scanner = Scanner::new(config)?;
    let report = scanner.scan_zip(&cli.archive)?;
    JsonFileSink::new(&cli.output)
        .write(&report)
        .with_context(|| format!("writing report to {}", cli.output.display()))?;
    Ok(())
}
