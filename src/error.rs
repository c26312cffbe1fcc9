use std::{io, path::PathBuf};

use thiserror::Error;

/// Exit code for a run the events API rejected.
pub const EXIT_REJECTED: u8 = 1;
/// Exit code for invalid command-line input.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for failures that stop the run before a verdict is known.
pub const EXIT_FATAL: u8 = 3;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("unrecognized event action '{0}', expected one of trigger, acknowledge, resolve (t, a, r)")]
    UnknownAction(String),

    #[error("failed to read JSON details file {}: {source}", path.display())]
    DetailsFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("custom details are not valid JSON: {0}")]
    MalformedDetails(#[source] serde_json::Error),

    #[error("request to the events API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to write response file {}: {source}", path.display())]
    ResponseWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to echo response: {0}")]
    Echo(#[source] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EventError {
    /// Usage errors are the caller's to fix. Details that cannot be sent count as a
    /// rejected event. Everything else aborts the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            EventError::UnknownAction(_) => EXIT_USAGE,
            EventError::MalformedDetails(_) => EXIT_REJECTED,
            _ => EXIT_FATAL,
        }
    }
}

/// Maps an error from the binary, possibly wrapped in context, to a process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<EventError>()
        .map(EventError::exit_code)
        .unwrap_or(EXIT_FATAL)
}

#[cfg(test)]
mod tests {
    use anyhow::{Context, anyhow};

    use super::*;

    #[test]
    fn test_context_keeps_usage_exit_code() {
        let err = Err::<(), _>(EventError::UnknownAction("escalate".to_string()))
            .with_context(|| "Failed to submit event 'db01-disk'")
            .unwrap_err();

        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_fatal_errors_map_to_fatal_exit_code() {
        let err = Err::<(), _>(EventError::Config("bad PD_LOG_FORMAT".to_string()))
            .context("Failed to load configuration")
            .unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_FATAL);

        assert_eq!(exit_code_for(&anyhow!("unrelated failure")), EXIT_FATAL);
    }

    #[test]
    fn test_malformed_details_map_to_rejected() {
        let source = serde_json::from_str::<serde_json::Value>("{,}").unwrap_err();
        let err = anyhow::Error::new(EventError::MalformedDetails(source));

        assert_eq!(exit_code_for(&err), EXIT_REJECTED);
    }
}
