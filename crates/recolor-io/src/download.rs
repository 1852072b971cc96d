//! Saving the result slot to disk.
//!
//! The browser only offers downloads through a link, so the PNG is
//! wrapped in an object URL and handed to a detached `<a download>`
//! that is clicked once and thrown away. Browser-only.

use recolor_core::DownloadRequest;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlAnchorElement};

use crate::blob::{self, BlobError};

/// Errors that can occur while saving the result.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<BlobError> for DownloadError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::JsError(msg) => Self::JsError(msg),
        }
    }
}

/// Object URL that is revoked when dropped, whichever way the save ends.
struct ObjectUrl(String);

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        blob::revoke_blob_url(&self.0);
    }
}

fn current_document() -> Result<Document, DownloadError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| DownloadError::JsError("no document".into()))
}

/// A link that saves `url` as `file_name` when clicked.
fn save_link(
    document: &Document,
    url: &str,
    file_name: &str,
) -> Result<HtmlAnchorElement, DownloadError> {
    let link = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| DownloadError::JsError("created element is not an anchor".into()))?;
    link.set_href(url);
    link.set_download(file_name);
    Ok(link)
}

/// Ask the browser to save the result described by `request`.
///
/// The link is attached to `<body>` only for the duration of the
/// click; Firefox ignores clicks on detached links.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if there is no document, the
/// Blob or object URL cannot be created, or the link cannot be attached.
pub fn download_result(request: &DownloadRequest) -> Result<(), DownloadError> {
    let document = current_document()?;
    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;

    let url = ObjectUrl(blob::bytes_to_blob_url(&request.bytes, request.mime_type)?);
    let link = save_link(&document, &url.0, &request.file_name)?;

    body.append_child(&link)?;
    link.click();
    if let Err(e) = body.remove_child(&link) {
        web_sys::console::warn_1(&format!("could not detach download link: {e:?}").into());
    }
    Ok(())
}
