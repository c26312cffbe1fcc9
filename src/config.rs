use std::path::PathBuf;

use dotenvy::dotenv;
use serde::Deserialize;

use crate::error::EventError;

pub const DEFAULT_EVENTS_URL: &str = "https://events.pagerduty.com/v2/enqueue";

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from `PD_`-prefixed environment variables.
#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_events_url")]
    pub events_url: String,

    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,

    #[serde(default)]
    pub response_dir: Option<PathBuf>,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_events_url() -> String {
    DEFAULT_EVENTS_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_url: default_events_url(),
            request_timeout_seconds: None,
            response_dir: None,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, EventError> {
        dotenv().ok();

        envy::prefixed("PD_")
            .from_env::<Self>()
            .map_err(|e| EventError::Config(e.to_string()))
    }

    /// `<dedup_key>.json` inside the response directory, or the working directory.
    pub fn response_path(&self, dedup_key: &str) -> PathBuf {
        let file_name = format!("{dedup_key}.json");

        match &self.response_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_pagerduty() {
        let config = Config::default();
        assert_eq!(config.events_url, DEFAULT_EVENTS_URL);
        assert_eq!(config.request_timeout_seconds, None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_response_path() {
        let config = Config::default();
        assert_eq!(config.response_path("db-01"), PathBuf::from("db-01.json"));

        let config = Config {
            response_dir: Some(PathBuf::from("/var/tmp/pd")),
            ..Config::default()
        };
        assert_eq!(
            config.response_path("db-01"),
            PathBuf::from("/var/tmp/pd/db-01.json")
        );
    }
}
