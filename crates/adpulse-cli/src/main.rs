use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod pipeline;

#[derive(Debug, Parser)]
#[command(name = "adpulse")]
#[command(about = "Explain ad performance changes and draft copy for weak creatives")]
struct Cli {
    /// What to analyze, e.g. "Analyze ROAS drop". Carried into the report verbatim.
    query: String,

    /// Pipeline configuration file
    #[arg(long, env = "ADPULSE_CONFIG", default_value = adpulse_core::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            return ExitCode::from(parse_exit_code(&err));
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = adpulse_core::load_config(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    pipeline::run_pipeline(&config, &cli.query)?;

    println!(
        "Report generated. Check {} for insights.json, evaluations.json, creatives.json, report.md and {} for run_log.json",
        config.output.reports_dir.display(),
        config.output.logs_dir.display()
    );
    Ok(())
}

/// Help and version go to stdout and succeed; usage errors exit 1.
fn parse_exit_code(err: &clap::Error) -> u8 {
    u8::from(err.use_stderr())
}

/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests;
