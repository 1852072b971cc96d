//! Blob creation and object URLs.
//!
//! The original image is shown through an object URL rather than a
//! data URL so the (possibly large) upload is not base64-encoded a
//! second time. The same `Blob` constructor backs the multipart body
//! and downloads.

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur while creating a Blob or its URL.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for BlobError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Wrap `bytes` in a `Blob` with the given MIME type.
///
/// # Errors
///
/// Returns [`BlobError::JsError`] if the `Blob` constructor fails.
pub fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, BlobError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    Ok(web_sys::Blob::new_with_u8_array_sequence_and_options(
        &parts, &opts,
    )?)
}

/// Create an object URL for `bytes`, usable as an `<img src>`.
///
/// The returned URL must be revoked via [`revoke_blob_url`] when no
/// longer displayed.
///
/// # Errors
///
/// Returns [`BlobError::JsError`] if Blob or URL creation fails.
pub fn bytes_to_blob_url(bytes: &[u8], mime_type: &str) -> Result<String, BlobError> {
    let blob = bytes_to_blob(bytes, mime_type)?;
    Ok(web_sys::Url::create_object_url_with_blob(&blob)?)
}

/// Revoke a URL previously created by [`bytes_to_blob_url`].
///
/// Best-effort: failures are silently ignored since the URL may have
/// already been revoked.
pub fn revoke_blob_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
