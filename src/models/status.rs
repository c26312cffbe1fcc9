use std::fmt::{Display, Formatter, Result};

use crate::error::EXIT_REJECTED;

/// Text the events API includes in the body of an accepted event.
pub const SUCCESS_MARKER: &str = "\"status\":\"success\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Accepted,
    Rejected,
}

impl DeliveryStatus {
    /// Classifies a raw response body by substring, without parsing it.
    pub fn classify(body: &str) -> Self {
        if body.contains(SUCCESS_MARKER) {
            DeliveryStatus::Accepted
        } else {
            DeliveryStatus::Rejected
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            DeliveryStatus::Accepted => 0,
            DeliveryStatus::Rejected => EXIT_REJECTED,
        }
    }
}

impl Display for DeliveryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DeliveryStatus::Accepted => write!(f, "accepted"),
            DeliveryStatus::Rejected => write!(f, "rejected"),
        }
    }
}
