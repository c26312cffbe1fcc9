use std::time::Duration;

use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::EventError,
    models::{
        event::EventRequest,
        response::EventResponse,
        status::DeliveryStatus,
    },
};

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
const ACCEPT_EVENTS_V2: &str = "application/vnd.pagerduty+json;version=2";

pub struct EventsClient {
    http_client: Client,
    events_url: String,
}

impl EventsClient {
    pub fn new(config: &Config) -> Result<Self, EventError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let http_client = builder.build()?;

        debug!(events_url = %config.events_url, "Events API client initialized");

        Ok(Self {
            http_client,
            events_url: config.events_url.clone(),
        })
    }

    pub async fn send_event(&self, request: &EventRequest) -> Result<EventResponse, EventError> {
        self.post(request.to_json()?).await
    }

    /// Sends one POST and reads the whole body. There is no retry.
    pub async fn post(&self, body: Vec<u8>) -> Result<EventResponse, EventError> {
        info!(request = %String::from_utf8_lossy(&body), "JSON request");
        info!(url = %self.events_url, "Submitting request to PagerDuty");

        let response = self
            .http_client
            .post(&self.events_url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(ACCEPT, ACCEPT_EVENTS_V2)
            .body(body)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let body = response.text().await?;
        let response = EventResponse::new(status_code, body);

        info!(status_code, result = %response.body, "Result");

        match response.delivery {
            DeliveryStatus::Accepted => {
                if let Some(dedup_key) = response.reply().and_then(|reply| reply.dedup_key) {
                    info!(dedup_key = %dedup_key, "Event accepted");
                }
            }
            DeliveryStatus::Rejected => {
                let reply = response.reply().unwrap_or_default();
                warn!(
                    status_code,
                    message = reply.message.as_deref().unwrap_or_default(),
                    errors = ?reply.errors,
                    "Event rejected by PagerDuty"
                );
            }
        }

        Ok(response)
    }
}
