use crate::render::render_outcome;
use bnb_audit::config::AppConfig;
use bnb_audit::error::AppError;
use bnb_audit::pipeline;
use bnb_audit::sources::InMemoryGateway;
use bnb_audit::telemetry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "bnb-audit",
    about = "Reconcile Seattle short-term-rental licenses with the business licenses that hold them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch both registries and write the combined CSV report (default command)
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Override the configured report path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Override the per-dataset row cap
    #[arg(long, value_parser = parse_limit)]
    pub(crate) limit: Option<usize>,
    /// Saved rental license export (JSON array) to reconcile instead of the live registry
    #[arg(long, requires = "business_fixture")]
    pub(crate) rental_fixture: Option<PathBuf>,
    /// Saved business license export (JSON array) to reconcile instead of the live registry
    #[arg(long, requires = "rental_fixture")]
    pub(crate) business_fixture: Option<PathBuf>,
    /// Print the run summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Report(ReportArgs::default()));

    match command {
        Command::Report(args) => run_report(args).await,
    }
}

fn parse_limit(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("limit must be greater than zero".to_string()),
        Ok(limit) => Ok(limit),
        Err(err) => Err(format!("failed to parse '{raw}' as a row limit ({err})")),
    }
}

async fn run_report(mut args: ReportArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(output) = args.output.take() {
        config.report.output_path = output;
    }
    if let Some(limit) = args.limit.take() {
        config.datasets.result_limit = limit;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, ?config.datasets, "starting license reconciliation");

    let outcome = match (args.rental_fixture.take(), args.business_fixture.take()) {
        (Some(rentals), Some(businesses)) => {
            let gateway = InMemoryGateway::new()
                .with_fixture_file(config.datasets.rental_endpoint.clone(), rentals)?
                .with_fixture_file(config.datasets.business_endpoint.clone(), businesses)?;
            pipeline::run_with(&gateway, &config).await?
        }
        _ => pipeline::run(&config).await?,
    };

    render_outcome(&outcome, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_is_the_default_command() {
        let cli = Cli::try_parse_from(["bnb-audit"]).expect("parses without arguments");
        assert!(cli.command.is_none());
    }

    #[test]
    fn fixtures_must_be_given_together() {
        let result = Cli::try_parse_from([
            "bnb-audit",
            "report",
            "--rental-fixture",
            "rentals.json",
        ]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "bnb-audit",
            "report",
            "--rental-fixture",
            "rentals.json",
            "--business-fixture",
            "businesses.json",
            "--limit",
            "10",
        ])
        .expect("paired fixtures parse");
        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.limit, Some(10));
                assert!(args.business_fixture.is_some());
            }
            None => panic!("expected report command"),
        }
    }

    #[test]
    fn limit_must_be_positive() {
        assert!(parse_limit("0").is_err());
        assert!(parse_limit("many").is_err());
        assert_eq!(parse_limit(" 250 "), Ok(250));
    }
}
