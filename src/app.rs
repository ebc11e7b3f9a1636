//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment settings
//! - runs the paced fetch -> aggregate -> rank pipeline
//! - prints the ranking
//! - writes the optional CSV export

use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::data::{ApiConfig, HttpTransport};
use crate::domain::OperatorDirectory;
use crate::error::AppError;

pub mod pipeline;

use pipeline::{Pipeline, ThreadPacer};

/// Entry point for the `supen` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = api_config_from_args(&cli, ApiConfig::from_env()?)?;
    let directory = directory_from_args(&cli)?;
    let endpoints = config.endpoints();
    let transport = HttpTransport::new(&config)?;

    tracing::info!(
        base_url = endpoints.base_url(),
        operators = directory.len(),
        "starting ranking run"
    );

    let run = Pipeline::new(&transport, &endpoints, &directory, ThreadPacer, config.call_delay)
        .rank_by(cli.rank_by, cli.rank_order())
        .run()?;

    println!("{}", crate::report::format_run_summary(&run, Utc::now()));
    println!("{}", crate::report::format_ranking(&run.ranking));

    if let Some(path) = &cli.out {
        crate::io::export::write_ranking_csv(path, &run.ranking)?;
        println!("Results saved to {}", path.display());
    }

    Ok(())
}

/// CLI flags take precedence over environment settings.
pub fn api_config_from_args(cli: &Cli, mut config: ApiConfig) -> Result<ApiConfig, AppError> {
    if let Some(secs) = cli.delay_secs {
        config.call_delay = Duration::from_secs(secs);
    }
    if let Some(url) = &cli.base_url {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::config("--base-url is set but empty."));
        }
        config.base_url = url.to_string();
    }
    Ok(config)
}

fn directory_from_args(cli: &Cli) -> Result<OperatorDirectory, AppError> {
    match &cli.operators {
        Some(path) => crate::data::load_directory(path),
        None => crate::data::default_directory(),
    }
}

/// Log to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let default = if verbose { "supen_rank=debug" } else { "supen_rank=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed (tests, embedding); keep it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_env_config() {
        let cli = Cli::parse_from(["supen", "--delay-secs", "2", "--base-url", " http://mirror/API "]);
        let config = api_config_from_args(&cli, ApiConfig::default()).unwrap();
        assert_eq!(config.call_delay, Duration::from_secs(2));
        assert_eq!(config.base_url, "http://mirror/API");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn no_flags_keep_env_config() {
        let cli = Cli::parse_from(["supen"]);
        let config = api_config_from_args(&cli, ApiConfig::default()).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn blank_base_url_flag_is_config_error() {
        for raw in ["", "   "] {
            let cli = Cli::parse_from(["supen", "--base-url", raw]);
            let err = api_config_from_args(&cli, ApiConfig::default()).unwrap_err();
            assert_eq!(err.exit_code(), 2);
        }
    }
}
