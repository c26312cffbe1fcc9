use serde::Deserialize;

use crate::models::status::DeliveryStatus;

#[derive(Debug, Clone)]
pub struct EventResponse {
    pub status_code: u16,
    pub body: String,
    pub delivery: DeliveryStatus,
}

impl EventResponse {
    pub fn new(status_code: u16, body: String) -> Self {
        let delivery = DeliveryStatus::classify(&body);

        Self {
            status_code,
            body,
            delivery,
        }
    }

    /// Best-effort parse of the body, used for logging only.
    pub fn reply(&self) -> Option<ApiReply> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Fields the events API usually returns. All optional since the body is not trusted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiReply {
    pub status: Option<String>,
    pub message: Option<String>,
    pub dedup_key: Option<String>,

    #[serde(default)]
    pub errors: Vec<String>,
}
