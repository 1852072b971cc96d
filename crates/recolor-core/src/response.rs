//! Decoding of the colorization server's JSON reply.
//!
//! The server always answers with a JSON object carrying some of
//! `message`, `error` and `file` (base64 PNG). Errors are signalled
//! through the `error` field, not the HTTP status.

use serde::Deserialize;

use crate::types::{PngImage, ProcessingResult, WorkflowError};

/// Raw reply body. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerResponse {
    /// Success text, e.g. `"Image photo.png received and processed!"`.
    #[serde(default)]
    pub message: Option<String>,
    /// Error text. Takes precedence over every other field.
    #[serde(default)]
    pub error: Option<String>,
    /// Base64-encoded PNG of the colorized image.
    #[serde(default)]
    pub file: Option<String>,
}

impl ServerResponse {
    /// Interpret the reply.
    ///
    /// A non-empty `error` wins; otherwise a `file` makes a success
    /// with an image, a bare `message` a success without one. A reply
    /// with none of them, or with an undecodable `file`, is a failure.
    #[must_use]
    pub fn into_result(self) -> ProcessingResult {
        let non_empty = |field: Option<String>| field.filter(|s| !s.trim().is_empty());

        if let Some(error) = non_empty(self.error) {
            return ProcessingResult::Failure { message: error };
        }
        let message = non_empty(self.message);
        match non_empty(self.file) {
            Some(encoded) => match PngImage::from_base64(&encoded) {
                Ok(image) => ProcessingResult::Success {
                    message,
                    image: Some(image),
                },
                Err(e) => ProcessingResult::Failure {
                    message: format!("malformed image payload: {e}"),
                },
            },
            None if message.is_some() => ProcessingResult::Success {
                message,
                image: None,
            },
            None => ProcessingResult::Failure {
                message: "server response contained no result".into(),
            },
        }
    }
}

/// Parse a reply body and interpret it.
///
/// # Errors
///
/// Returns [`WorkflowError::MalformedResponse`] if `body` is not a JSON
/// object of the expected shape (e.g. an HTML error page from a proxy).
pub fn decode_response_body(body: &str) -> Result<ProcessingResult, WorkflowError> {
    serde_json::from_str::<ServerResponse>(body)
        .map(ServerResponse::into_result)
        .map_err(|e| WorkflowError::MalformedResponse(e.to_string()))
}
