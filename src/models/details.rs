use std::{fs, path::PathBuf};

use serde::{Serialize, Serializer, ser::Error as _};
use serde_json::value::RawValue;
use tracing::{info, warn};

use crate::error::EventError;

/// Key under which free-text details are injected into the custom details object.
pub const DETAILS_FIELD: &str = "extra details";

/// Where the JSON detail blob for a trigger event comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSource {
    Inline(String),
    File(PathBuf),
}

impl DetailSource {
    /// Returns the raw JSON text. Files are read whole, without trimming.
    pub fn load(&self) -> Result<String, EventError> {
        match self {
            DetailSource::Inline(json) => {
                info!(jdetails = %json, "Using inline JSON details");
                Ok(json.clone())
            }
            DetailSource::File(path) => {
                info!(path = %path.display(), "Reading custom JSON file");
                fs::read_to_string(path).map_err(|source| EventError::DetailsFile {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// Raw JSON text sent as `custom_details`.
///
/// The text is kept exactly as built. It is only checked for well-formedness when the event
/// is serialized, and a malformed value fails serialization instead of being repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDetails(String);

impl CustomDetails {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CustomDetails {
    fn default() -> Self {
        Self("{}".to_string())
    }
}

impl Serialize for CustomDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.0.clone()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// Combines free-text details with a JSON detail source.
///
/// Empty strings count as absent. When both are present and the source starts with `{`,
/// the free text is spliced in as the first field of the object. The free text is not
/// escaped. A source that does not start with `{` is used verbatim and the free text is
/// dropped.
pub fn merge_details(details: Option<&str>, json_source: Option<&str>) -> CustomDetails {
    let details = details.filter(|d| !d.is_empty());
    let json_source = json_source.filter(|j| !j.is_empty());

    match (details, json_source) {
        (Some(details), Some(json)) => match json.strip_prefix('{') {
            Some(rest) => {
                info!(details, "Merging alert details into JSON details");
                CustomDetails::new(format!("{{\"{DETAILS_FIELD}\":\"{details}\",{rest}"))
            }
            None => {
                warn!(
                    details,
                    "Unable to append details into JSON details, which must start with '{{'; \
                     sending JSON details unchanged"
                );
                CustomDetails::new(json)
            }
        },
        (Some(details), None) => {
            info!(details, "Alert details");
            CustomDetails::new(format!("{{\"{DETAILS_FIELD}\":\"{details}\"}}"))
        }
        (None, Some(json)) => CustomDetails::new(json),
        (None, None) => CustomDetails::default(),
    }
}
