//! Client configuration.
//!
//! Every field has a default matching the colorization server, so a
//! page without a config block works unchanged. Pages may override any
//! subset of fields with a JSON object (see [`ClientConfig::from_json`]).

use serde::{Deserialize, Serialize};

/// How to treat a submit while an earlier one is still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Send every submission; only the latest response is displayed.
    #[default]
    AllowConcurrent,
    /// Refuse to submit until the pending response has arrived.
    RejectWhileInFlight,
}

/// Configuration for the upload form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL the multipart form is posted to.
    pub endpoint: String,

    /// Multipart field name carrying the image.
    pub field_name: String,

    /// Suggested file name for the download button.
    pub download_file_name: String,

    /// Extensions offered by the file picker (without the leading dot).
    pub accepted_extensions: Vec<String>,

    /// Whether overlapping submissions are allowed.
    pub submit_policy: SubmitPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "/upload".into(),
            field_name: "gray_image_file".into(),
            download_file_name: "colorized_image.png".into(),
            accepted_extensions: ["png", "jpg", "jpeg", "bmp", "webp", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            submit_policy: SubmitPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Parse a JSON override. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `json` is not a valid object
    /// of the expected shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Value for the file input's `accept` attribute, e.g. `.png,.jpg`.
    #[must_use]
    pub fn accept_attribute(&self) -> String {
        accept_attribute(&self.accepted_extensions)
    }
}

/// Join extensions into an `accept` attribute value, e.g. `.png,.jpg`.
///
/// Entries may be given with or without the leading dot.
#[must_use]
pub fn accept_attribute(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join(",")
}
