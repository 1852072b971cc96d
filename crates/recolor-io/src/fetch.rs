//! Multipart upload to the colorization endpoint.
//!
//! Posts the selected file as `multipart/form-data` with `fetch` and
//! reads the reply body as text. The HTTP status is not interpreted:
//! the server reports failures through the JSON `error` field and
//! answers 400 for bad input, so every body goes through
//! [`recolor_core::decode_response_body`].

use recolor_core::{ClientConfig, ProcessingResult, SelectedFile, WorkflowError};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::blob::{self, BlobError};

/// Errors raised while sending the request or reading the reply.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A browser API call returned an error or the fetch was rejected.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        Self::JsError(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<BlobError> for FetchError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::JsError(msg) => Self::JsError(msg),
        }
    }
}

impl From<FetchError> for WorkflowError {
    fn from(err: FetchError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Upload `file` to the configured endpoint and decode the reply.
///
/// # Errors
///
/// Returns [`WorkflowError::Transport`] if the request could not be
/// sent or the body could not be read.
/// Returns [`WorkflowError::MalformedResponse`] if the body is not the
/// expected JSON object.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn post_image(
    config: &ClientConfig,
    file: &SelectedFile,
) -> Result<ProcessingResult, WorkflowError> {
    let started = web_time::Instant::now();
    let (status, body) = send(config, file).await?;
    web_sys::console::log_1(
        &format!(
            "POST {} -> {status} in {} ms",
            config.endpoint,
            started.elapsed().as_millis()
        )
        .into(),
    );
    recolor_core::decode_response_body(&body)
}

/// Send the multipart request, returning the HTTP status and body text.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
async fn send(config: &ClientConfig, file: &SelectedFile) -> Result<(u16, String), FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::JsError("no global window".into()))?;

    let blob = blob::bytes_to_blob(&file.bytes, &file.mime_type)?;
    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename(&config.field_name, &blob, &file.name)?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from(form));

    let response: web_sys::Response =
        JsFuture::from(window.fetch_with_str_and_init(&config.endpoint, &init))
            .await?
            .dyn_into()?;

    let status = response.status();
    let text = JsFuture::from(response.text()?).await?;
    let body = text
        .as_string()
        .ok_or_else(|| FetchError::JsError("response body is not text".into()))?;
    Ok((status, body))
}
