//! Command-line flags for `pagerduty_lite`.
//!
//! Flag names keep the underscore spelling used by the full PagerDuty utility so existing
//! scripts keep working.
//!
//! ```bash
//! pagerduty_lite --routing_key R0UT1NG --keyname db01-disk --event trigger \
//!     --severity critical --source db01 --msg "Disk full on /var" \
//!     --details "95% used" --jsondetailsfile disk.json --showlog
//!
//! pagerduty_lite --routing_key R0UT1NG --keyname db01-disk --event r
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::{
    error::EventError,
    models::{
        details::DetailSource,
        event::{Action, EventInput},
    },
    utils::OutputOptions,
};

/// PagerDuty Util Lite: send trigger, acknowledge and resolve events to the PagerDuty Events API v2.
///
/// If a proxy is needed, HTTP_PROXY or HTTPS_PROXY are drawn from the environment.
#[derive(Debug, Parser)]
#[command(name = "pagerduty_lite")]
#[command(version)]
pub struct Cli {
    /// The primary routing key for the PD event rule or service (or set `PD_ROUTING_KEY`)
    #[arg(long = "routing_key", value_name = "ROUTING_KEY", env = "PD_ROUTING_KEY", hide_env_values = true)]
    pub routing_key: String,

    /// Unique user defined key
    #[arg(long, value_name = "KEYNAME")]
    pub keyname: String,

    /// Must be one of { trigger | acknowledge | resolve } or t, a, r
    #[arg(long, value_name = "EVENT", default_value = "trigger")]
    pub event: String,

    /// {info | critical | warning | error}
    #[arg(long, value_name = "SEVERITY", default_value = "")]
    pub severity: String,

    /// Primary message alert title
    #[arg(long, value_name = "MSG", default_value = "")]
    pub msg: String,

    /// Source of the alert, advise use of hostname
    #[arg(long, value_name = "SOURCE", default_value = "")]
    pub source: String,

    /// Simple logging details for the alert
    #[arg(long, value_name = "DETAILS")]
    pub details: Option<String>,

    /// Inline JSON object with key/value pairs holding extra alerting info
    #[arg(long, value_name = "JSON", conflicts_with = "jsondetailsfile")]
    pub jdetails: Option<String>,

    /// JSON formatted text file with sets of key/value pairs holding extra alerting info
    #[arg(long, value_name = "FILE")]
    pub jsondetailsfile: Option<PathBuf>,

    /// Proxy server to report in the log; the proxy itself comes from HTTP_PROXY/HTTPS_PROXY
    #[arg(long = "proxy_server", value_name = "PROXY_SERVER")]
    pub proxy_server: Option<String>,

    /// Return result to STDOUT in JSON format
    #[arg(long)]
    pub jsonresult: bool,

    /// Display the output of the operations
    #[arg(long)]
    pub showlog: bool,

    /// Save the JSON result to a file named <keyname>.json
    #[arg(long)]
    pub savejsonresponse: bool,
}

impl Cli {
    pub fn event_input(&self) -> Result<EventInput, EventError> {
        let action =
            Action::parse(&self.event).ok_or_else(|| EventError::UnknownAction(self.event.clone()))?;

        let mut input = EventInput::new(self.routing_key.clone(), self.keyname.clone(), action)
            .with_summary(self.msg.clone())
            .with_source(self.source.clone())
            .with_severity(self.severity.clone());

        if let Some(details) = self.details.as_ref().filter(|d| !d.is_empty()) {
            input = input.with_details(details.clone());
        }

        if let Some(path) = self
            .jsondetailsfile
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
        {
            input = input.with_detail_source(DetailSource::File(path.clone()));
        } else if let Some(json) = self.jdetails.as_ref().filter(|j| !j.is_empty()) {
            input = input.with_detail_source(DetailSource::Inline(json.clone()));
        }

        Ok(input)
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            echo_json: self.jsonresult,
            save_response: self.savejsonresponse,
        }
    }
}
