//! Async glue between the browser and [`UploadWorkflow`].
//!
//! Each user action is one linear async function: mutate the workflow,
//! await the browser, hand the result back with the generation the
//! workflow issued. The workflow lives in a Dioxus signal; no borrow
//! of it is held across an `.await`.

use dioxus::prelude::*;
use recolor_core::{
    DecodeTicket, PngImage, PreviewOutcome, SelectedFile, UploadWorkflow, WorkflowError,
    placeholder_for, read_dimensions,
};

use crate::{blob, download, fetch, notify};

/// Handle a change in the file picker.
///
/// Updates the label immediately, then decodes the image and shows it
/// next to a placeholder of the same size.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Signal is !Send
pub async fn select_file(mut workflow: Signal<UploadWorkflow>, file: Option<SelectedFile>) {
    let source = file
        .as_ref()
        .map(|f| (f.bytes.clone(), f.mime_type.clone()));
    let selection = workflow.write().select_file(file);
    let (Some(selection), Some((bytes, mime_type))) = (selection, source) else {
        return;
    };
    if let Some(previous) = selection.released_original {
        blob::revoke_blob_url(&previous);
    }
    let ticket = selection.ticket;

    // Yield to the browser event loop so the new label paints before
    // the decode blocks the thread.
    gloo_timers::future::TimeoutFuture::new(0).await;

    match prepare_preview(&bytes, &mime_type) {
        Ok((original_url, placeholder)) => {
            apply_preview(workflow, ticket, original_url, placeholder);
        }
        Err(e) => {
            let notice = workflow.read().preview_failed(ticket, &e);
            if let Some(notice) = notice {
                notify::show_notice(&notice);
            }
        }
    }
}

/// Decode the header, render the placeholder, and create the original's URL.
fn prepare_preview(bytes: &[u8], mime_type: &str) -> Result<(String, PngImage), WorkflowError> {
    let dimensions = read_dimensions(bytes)?;
    let placeholder =
        placeholder_for(dimensions).map_err(|e| WorkflowError::ImageDecode(e.to_string()))?;
    let original_url = blob::bytes_to_blob_url(bytes, mime_type)
        .map_err(|e| WorkflowError::ImageDecode(e.to_string()))?;
    Ok((original_url, placeholder))
}

fn apply_preview(
    mut workflow: Signal<UploadWorkflow>,
    ticket: DecodeTicket,
    original_url: String,
    placeholder: PngImage,
) {
    let outcome = workflow
        .write()
        .preview_ready(ticket, original_url, placeholder);
    match outcome {
        PreviewOutcome::Applied {
            replaced_original: Some(old),
        } => blob::revoke_blob_url(&old),
        PreviewOutcome::Applied { .. } => {}
        PreviewOutcome::Discarded { original_url } => {
            web_sys::console::log_1(
                &format!("discarding preview for superseded selection {}", ticket.generation())
                    .into(),
            );
            blob::revoke_blob_url(&original_url);
        }
    }
}

/// Handle a form submission: upload the selected file and show the reply.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Signal is !Send
pub async fn submit(mut workflow: Signal<UploadWorkflow>) {
    let started = workflow.write().begin_submission();
    let submission = match started {
        Ok(submission) => submission,
        Err(WorkflowError::NoFileSelected) => {
            web_sys::console::warn_1(&"submit ignored: no file selected".into());
            return;
        }
        Err(e) => {
            notify::alert(&format!("{e}"));
            return;
        }
    };

    let config = workflow.read().config().clone();
    let outcome = fetch::post_image(&config, &submission.file).await;

    let notice = workflow
        .write()
        .finish_submission(submission.generation, outcome);
    match notice {
        Some(notice) => notify::show_notice(&notice),
        None => web_sys::console::log_1(
            &format!(
                "discarding reply for superseded submission {}",
                submission.generation
            )
            .into(),
        ),
    }
}

/// Download the current result slot.
pub fn download(workflow: Signal<UploadWorkflow>) {
    let request = workflow.read().download();
    let Some(request) = request else {
        web_sys::console::warn_1(&"download ignored: nothing to download".into());
        return;
    };
    if let Err(e) = download::download_result(&request) {
        notify::alert(&format!("Download failed: {e}"));
    }
}
