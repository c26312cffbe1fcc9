use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use tracing::info;

use crate::{
    error::EventError,
    models::details::{CustomDetails, DetailSource, merge_details},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Trigger,
    Acknowledge,
    Resolve,
}

impl Action {
    /// Case-insensitive match on the full word or its first letter.
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "trigger" | "t" => Some(Action::Trigger),
            "acknowledge" | "a" => Some(Action::Acknowledge),
            "resolve" | "r" => Some(Action::Resolve),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Action::Trigger => "trigger",
            Action::Acknowledge => "acknowledge",
            Action::Resolve => "resolve",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything collected from the command line that shapes the request body.
#[derive(Debug, Clone)]
pub struct EventInput {
    pub routing_key: String,
    pub dedup_key: String,
    pub action: Action,
    pub summary: String,
    pub source: String,
    pub severity: String,
    pub details: Option<String>,
    pub detail_source: Option<DetailSource>,
}

impl EventInput {
    pub fn new(routing_key: String, dedup_key: String, action: Action) -> Self {
        Self {
            routing_key,
            dedup_key,
            action,
            summary: String::new(),
            source: String::new(),
            severity: String::new(),
            details: None,
            detail_source: None,
        }
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_source(mut self, source: String) -> Self {
        self.source = source;
        self
    }

    pub fn with_severity(mut self, severity: String) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_detail_source(mut self, detail_source: DetailSource) -> Self {
        self.detail_source = Some(detail_source);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerPayload {
    pub summary: String,
    pub source: String,
    pub severity: String,
    pub custom_details: CustomDetails,
}

/// Request body for the Events API v2 enqueue endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EventRequest {
    pub routing_key: String,
    pub event_action: Action,
    pub dedup_key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<TriggerPayload>,
}

impl EventRequest {
    /// Builds the body for `input.action`. Only trigger events read the detail source.
    pub fn build(input: &EventInput) -> Result<Self, EventError> {
        info!(
            routing_key = %input.routing_key,
            dedup_key = %input.dedup_key,
            action = %input.action,
            "Building event request"
        );

        let payload = match input.action {
            Action::Trigger => {
                info!(
                    severity = %input.severity,
                    source = %input.source,
                    summary = %input.summary,
                    "Trigger payload"
                );

                let json_source = input
                    .detail_source
                    .as_ref()
                    .map(DetailSource::load)
                    .transpose()?;

                Some(TriggerPayload {
                    summary: input.summary.clone(),
                    source: input.source.clone(),
                    severity: input.severity.clone(),
                    custom_details: merge_details(
                        input.details.as_deref(),
                        json_source.as_deref(),
                    ),
                })
            }
            Action::Acknowledge | Action::Resolve => None,
        };

        Ok(Self {
            routing_key: input.routing_key.clone(),
            event_action: input.action,
            dedup_key: input.dedup_key.clone(),
            payload,
        })
    }

    pub fn to_json(&self) -> Result<Vec<u8>, EventError> {
        serde_json::to_vec(self).map_err(EventError::MalformedDetails)
    }
}
