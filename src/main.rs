use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pagerduty_lite::{
    cli::Cli,
    clients::events::EventsClient,
    config::Config,
    error::exit_code_for,
    models::status::DeliveryStatus,
    utils::{init_tracing, submit_event},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    init_tracing(cli.showlog, config.log_format);

    match run(&cli, &config).await {
        Ok(delivery) => ExitCode::from(delivery.exit_code()),
        Err(e) => {
            error!(error = %format!("{e:#}"), "PagerDuty event was not delivered");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn run(cli: &Cli, config: &Config) -> Result<DeliveryStatus> {
    let input = cli.event_input()?;

    if let Some(proxy_server) = &cli.proxy_server {
        info!(
            proxy_server = %proxy_server,
            "Proxy server requested, connections use HTTP_PROXY/HTTPS_PROXY from the environment"
        );
    }

    let client = EventsClient::new(config).context("Failed to create events API client")?;

    let delivery = submit_event(&input, &client, config, cli.output_options())
        .await
        .with_context(|| format!("Failed to submit {} event '{}'", input.action, input.dedup_key))?;

    Ok(delivery)
}
