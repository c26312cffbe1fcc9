use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    clients::events::EventsClient,
    config::{Config, LogFormat},
    error::EventError,
    models::{
        event::{EventInput, EventRequest},
        status::DeliveryStatus,
    },
};

/// What to do with the response body once it arrives.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub echo_json: bool,
    pub save_response: bool,
}

/// Logs go to stderr so stdout only ever carries the echoed response.
/// `RUST_LOG` takes precedence over `show_log`.
pub fn init_tracing(show_log: bool, log_format: LogFormat) {
    let default_directive = if show_log { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

pub async fn submit_event(
    input: &EventInput,
    client: &EventsClient,
    config: &Config,
    output: OutputOptions,
) -> Result<DeliveryStatus, EventError> {
    submit_event_with_writer(input, client, config, output, &mut io::stdout()).await
}

/// Same as [`submit_event`], echoing the response body to `out` instead of stdout.
///
/// Custom details that do not serialize are not sent; the run counts as rejected.
pub async fn submit_event_with_writer(
    input: &EventInput,
    client: &EventsClient,
    config: &Config,
    output: OutputOptions,
    out: &mut impl Write,
) -> Result<DeliveryStatus, EventError> {
    let request = EventRequest::build(input)?;

    let body = match request.to_json() {
        Ok(body) => body,
        Err(EventError::MalformedDetails(e)) => {
            warn!(
                dedup_key = %input.dedup_key,
                error = %e,
                "Custom details are not valid JSON, event not sent"
            );
            return Ok(DeliveryStatus::Rejected);
        }
        Err(e) => return Err(e),
    };

    let response = client.post(body).await?;

    if output.echo_json {
        writeln!(out, "{}", response.body).map_err(EventError::Echo)?;
    }

    if output.save_response {
        save_response(&config.response_path(&input.dedup_key), &response.body)?;
    }

    info!(
        dedup_key = %input.dedup_key,
        delivery = %response.delivery,
        "Event submission finished"
    );

    Ok(response.delivery)
}

/// Writes the body verbatim, replacing any earlier file for the same key.
pub fn save_response(path: &Path, body: &str) -> Result<(), EventError> {
    info!(path = %path.display(), "Write response");

    fs::write(path, body).map_err(|source| EventError::ResponseWrite {
        path: path.to_path_buf(),
        source,
    })
}
