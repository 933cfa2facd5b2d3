use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use hydro_verify::{logging, pipeline, HttpProber, PatternConfig};

#[derive(Parser)]
#[command(name = "hydro-verify")]
#[command(
    about = "Re-check a reported hit: read {\"url\": ...} on stdin, GET it, print {\"verify\": bool}",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Pattern searched for in the response body (overrides HYDRO_VERIFY_REGEX;
    /// default: "(?i)success")
    #[arg(long, value_name = "PATTERN")]
    regex: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Messages already embed their cause
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = PatternConfig::resolve(cli.regex)?;

    let result = pipeline::run(
        io::stdin().lock(),
        io::stdout().lock(),
        &config,
        &HttpProber::new(),
    );

    if let Err(e) = &result {
        tracing::debug!(kind = %e.kind(), "verification aborted");
    }
    result?;
    Ok(())
}
