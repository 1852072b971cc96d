//! The upload workflow state machine.
//!
//! [`UploadWorkflow`] owns everything the page shows: the file label,
//! the selected file, and the [`DisplayState`] of the comparison panel.
//! Browser code feeds it events (a selection, a decoded preview, a
//! server reply) and renders whatever state results.
//!
//! Both asynchronous steps are fenced by generation counters. Each
//! selection bumps the selection generation and each submission bumps
//! the submission generation; a completion carrying an older
//! generation is discarded instead of overwriting fresher state.
//!
//! ```text
//! Idle -> FileChosen -> Submitting -> Displayed(Success | Error)
//!   ^         ^                              |
//!   +---------+------ new selection ---------+
//! ```

use crate::config::{ClientConfig, SubmitPolicy};
use crate::types::{
    DisplayState, PngImage, ProcessingResult, ResultSlot, SelectedFile, WorkflowError, format_size,
};

/// Label shown when no file is selected.
pub const NO_FILE_LABEL: &str = "No file selected";

/// Alert shown after the server returned a result.
pub const SUCCESS_ALERT: &str = "Image processed successfully!";

/// Alert shown when the request could not be completed.
pub const TRANSPORT_ALERT: &str = "An error occurred while sending the image!";

/// How the last submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the image.
    Success,
    /// The server or the network reported an error.
    Error,
}

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected.
    Idle,
    /// A file is selected but has not been submitted.
    FileChosen,
    /// A request is in flight.
    Submitting,
    /// The latest request has completed.
    Displayed(Outcome),
}

/// Proof that a selection is current, handed to the decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket {
    generation: u64,
}

impl DecodeTicket {
    /// Selection generation this ticket was issued for.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// A real file selection, returned by [`UploadWorkflow::select_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Ticket for decoding the new file's preview.
    pub ticket: DecodeTicket,
    /// Original-image URL of the previous file, taken off the panel so
    /// it may be revoked.
    pub released_original: Option<String>,
}

/// Result of handing a decoded preview to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The preview is now displayed.
    Applied {
        /// Original-image URL that was displaced and may be revoked.
        replaced_original: Option<String>,
    },
    /// A newer selection exists; nothing changed.
    Discarded {
        /// The URL that was offered, returned so it can be revoked.
        original_url: String,
    },
}

/// A request the browser layer should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Submission generation; pass it back to
    /// [`UploadWorkflow::finish_submission`].
    pub generation: u64,
    /// The file to upload.
    pub file: SelectedFile,
}

/// Something to tell the user after a step completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The step succeeded.
    Success {
        /// Text for the user-facing alert.
        alert: String,
        /// Message the server attached, for the console.
        server_message: Option<String>,
    },
    /// The step failed.
    Error {
        /// Text for the user-facing alert.
        alert: String,
        /// Underlying cause, for the console.
        cause: String,
    },
}

impl Notice {
    /// Text for the user-facing alert.
    #[must_use]
    pub fn alert(&self) -> &str {
        match self {
            Self::Success { alert, .. } | Self::Error { alert, .. } => alert,
        }
    }

    /// Returns `true` for [`Notice::Error`].
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// A download the browser layer should trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// PNG bytes of the result slot.
    pub bytes: Vec<u8>,
    /// Suggested file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
}

/// State of the upload form.
#[derive(Debug, Clone)]
pub struct UploadWorkflow {
    config: ClientConfig,
    phase: Phase,
    label: String,
    selected: Option<SelectedFile>,
    display: DisplayState,
    selection_generation: u64,
    submission_generation: u64,
    /// Generation of the newest submission still awaiting its reply.
    pending: Option<u64>,
}

impl Default for UploadWorkflow {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl UploadWorkflow {
    /// Create an idle workflow.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            label: NO_FILE_LABEL.into(),
            selected: None,
            display: DisplayState::default(),
            selection_generation: 0,
            submission_generation: 0,
            pending: None,
        }
    }

    /// Configuration this workflow was created with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Text for the file label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The comparison panel state.
    #[must_use]
    pub const fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The selected file, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Returns `true` while the newest submission awaits its reply.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a change in the file picker.
    ///
    /// Any change supersedes in-flight decodes and submissions. A
    /// cleared or zero-byte selection only resets the label; the
    /// display is left as it was. A real file empties the panel, which
    /// stays hidden until its own preview is ready, and returns a
    /// ticket for decoding that preview.
    pub fn select_file(&mut self, file: Option<SelectedFile>) -> Option<Selection> {
        self.selection_generation += 1;
        self.submission_generation += 1;
        self.pending = None;

        let Some(file) = file.filter(|f| !f.is_empty()) else {
            self.selected = None;
            self.phase = Phase::Idle;
            NO_FILE_LABEL.clone_into(&mut self.label);
            return None;
        };

        self.label = format!(
            "Selected file: {} ({})",
            file.name,
            format_size(file.len() as u64)
        );
        self.selected = Some(file);
        self.phase = Phase::FileChosen;
        self.display.result = None;
        self.display.panel_visible = false;
        self.display.download_visible = false;

        Some(Selection {
            ticket: DecodeTicket {
                generation: self.selection_generation,
            },
            released_original: self.display.original_url.take(),
        })
    }

    /// Show the original image next to its placeholder.
    ///
    /// A colorized result that already arrived for this selection is
    /// kept; the placeholder only fills an empty slot.
    pub fn preview_ready(
        &mut self,
        ticket: DecodeTicket,
        original_url: String,
        placeholder: PngImage,
    ) -> PreviewOutcome {
        if ticket.generation != self.selection_generation {
            return PreviewOutcome::Discarded { original_url };
        }

        let replaced_original = self.display.original_url.replace(original_url);
        if self.display.result.is_none() {
            self.display.result = Some(ResultSlot::Placeholder(placeholder));
        }
        self.display.panel_visible = true;
        self.display.download_visible = true;

        PreviewOutcome::Applied { replaced_original }
    }

    /// Report that the selected file could not be decoded.
    ///
    /// The file stays selected; the server gets the final say on
    /// whether it is an image.
    pub fn preview_failed(&self, ticket: DecodeTicket, error: &WorkflowError) -> Option<Notice> {
        (ticket.generation == self.selection_generation).then(|| Notice::Error {
            alert: format!("Could not preview the selected image: {error}"),
            cause: error.to_string(),
        })
    }

    /// Start a submission of the selected file.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NoFileSelected`] if nothing is selected.
    /// Returns [`WorkflowError::SubmissionInFlight`] if a reply is
    /// pending and the policy is [`SubmitPolicy::RejectWhileInFlight`].
    pub fn begin_submission(&mut self) -> Result<Submission, WorkflowError> {
        let Some(file) = self.selected.clone() else {
            return Err(WorkflowError::NoFileSelected);
        };
        if self.pending.is_some() && self.config.submit_policy == SubmitPolicy::RejectWhileInFlight
        {
            return Err(WorkflowError::SubmissionInFlight);
        }

        self.submission_generation += 1;
        self.pending = Some(self.submission_generation);
        self.phase = Phase::Submitting;

        Ok(Submission {
            generation: self.submission_generation,
            file,
        })
    }

    /// Apply the reply to a submission.
    ///
    /// Returns `None` (and changes nothing) if `generation` is not the
    /// newest submission. Errors never touch the display, so the
    /// placeholder stays visible.
    pub fn finish_submission(
        &mut self,
        generation: u64,
        outcome: Result<ProcessingResult, WorkflowError>,
    ) -> Option<Notice> {
        if generation != self.submission_generation {
            return None;
        }
        self.pending = None;

        let notice = match outcome {
            Ok(ProcessingResult::Success { message, image }) => {
                if let Some(image) = image {
                    self.display.result = Some(ResultSlot::Colorized(image));
                    self.display.panel_visible = true;
                    self.display.download_visible = true;
                }
                self.phase = Phase::Displayed(Outcome::Success);
                Notice::Success {
                    alert: SUCCESS_ALERT.into(),
                    server_message: message,
                }
            }
            Ok(ProcessingResult::Failure { message }) | Err(WorkflowError::Server(message)) => {
                self.phase = Phase::Displayed(Outcome::Error);
                Notice::Error {
                    alert: format!("Error: {message}"),
                    cause: message,
                }
            }
            Err(error) => {
                self.phase = Phase::Displayed(Outcome::Error);
                Notice::Error {
                    alert: TRANSPORT_ALERT.into(),
                    cause: error.to_string(),
                }
            }
        };
        Some(notice)
    }

    /// The download for the current result slot.
    ///
    /// Returns `None` while the download control is hidden.
    #[must_use]
    pub fn download(&self) -> Option<DownloadRequest> {
        if !self.display.download_visible {
            return None;
        }
        self.display.result.as_ref().map(|slot| DownloadRequest {
            bytes: slot.image().bytes().to_vec(),
            file_name: self.config.download_file_name.clone(),
            mime_type: "image/png",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, vec![1, 2, 3], None)
    }

    fn png(tag: u8) -> PngImage {
        PngImage::new(vec![0x89, tag])
    }

    fn colorized(tag: u8) -> ProcessingResult {
        ProcessingResult::Success {
            message: Some("ok".into()),
            image: Some(png(tag)),
        }
    }

    #[test]
    fn starts_idle() {
        let wf = UploadWorkflow::default();
        assert_eq!(wf.phase(), Phase::Idle);
        assert_eq!(wf.label(), NO_FILE_LABEL);
        assert_eq!(wf.display(), &DisplayState::default());
        assert!(wf.download().is_none());
    }

    #[test]
    fn selecting_a_file_updates_label_and_issues_ticket() {
        let mut wf = UploadWorkflow::default();
        let selection = wf.select_file(Some(file("cat.png"))).unwrap();
        assert_eq!(selection.released_original, None);
        assert_eq!(wf.phase(), Phase::FileChosen);
        assert_eq!(wf.label(), "Selected file: cat.png (3 B)");
    }

    #[test]
    fn preview_reveals_panel_with_placeholder() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("cat.png"))).unwrap().ticket;
        let outcome = wf.preview_ready(ticket, "blob:1".into(), png(0));
        assert_eq!(
            outcome,
            PreviewOutcome::Applied {
                replaced_original: None
            }
        );
        let display = wf.display();
        assert_eq!(display.original_url.as_deref(), Some("blob:1"));
        assert_eq!(display.result, Some(ResultSlot::Placeholder(png(0))));
        assert!(display.panel_visible);
        assert!(display.download_visible);
    }

    #[test]
    fn stale_preview_is_discarded() {
        let mut wf = UploadWorkflow::default();
        let old = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        let new = wf.select_file(Some(file("b.png"))).unwrap().ticket;
        assert_eq!(
            wf.preview_ready(old, "blob:a".into(), png(1)),
            PreviewOutcome::Discarded {
                original_url: "blob:a".into()
            }
        );
        assert_eq!(wf.display().original_url, None);

        wf.preview_ready(new, "blob:b".into(), png(2));
        assert_eq!(wf.display().original_url.as_deref(), Some("blob:b"));
    }

    #[test]
    fn new_selection_releases_previous_original() {
        let mut wf = UploadWorkflow::default();
        let t1 = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(t1, "blob:a".into(), png(1));

        let selection = wf.select_file(Some(file("b.png"))).unwrap();
        assert_eq!(selection.released_original.as_deref(), Some("blob:a"));
        assert_eq!(wf.display().original_url, None);
        assert!(!wf.display().panel_visible);

        assert_eq!(
            wf.preview_ready(selection.ticket, "blob:b".into(), png(2)),
            PreviewOutcome::Applied {
                replaced_original: None
            }
        );
        assert!(wf.display().panel_visible);
    }

    #[test]
    fn repeated_preview_for_same_selection_returns_replaced_url() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a1".into(), png(1));
        assert_eq!(
            wf.preview_ready(ticket, "blob:a2".into(), png(1)),
            PreviewOutcome::Applied {
                replaced_original: Some("blob:a1".into())
            }
        );
    }

    #[test]
    fn failed_preview_never_pairs_result_with_previous_original() {
        let mut wf = UploadWorkflow::default();
        let t1 = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(t1, "blob:a".into(), png(1));

        let t2 = wf.select_file(Some(file("b.png"))).unwrap().ticket;
        // While b decodes, nothing of a is on the panel.
        assert_eq!(wf.display().original_url, None);
        assert_eq!(wf.display().result, None);
        assert!(!wf.display().panel_visible);

        let err = WorkflowError::ImageDecode("bad header".into());
        assert!(wf.preview_failed(t2, &err).is_some());
        let sub = wf.begin_submission().unwrap();
        wf.finish_submission(sub.generation, Ok(colorized(4)));

        assert_eq!(wf.display().original_url, None);
        assert_eq!(wf.display().result, Some(ResultSlot::Colorized(png(4))));
    }

    #[test]
    fn clearing_selection_keeps_display() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let before = wf.display().clone();

        assert!(wf.select_file(None).is_none());
        assert_eq!(wf.label(), NO_FILE_LABEL);
        assert_eq!(wf.phase(), Phase::Idle);
        assert_eq!(wf.display(), &before);
        assert!(wf.selected().is_none());
    }

    #[test]
    fn zero_byte_file_is_treated_as_no_selection() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let before = wf.display().clone();

        let empty = SelectedFile::new("empty.png", Vec::new(), None);
        assert!(wf.select_file(Some(empty)).is_none());
        assert_eq!(wf.label(), NO_FILE_LABEL);
        assert_eq!(wf.display(), &before);
    }

    #[test]
    fn new_selection_clears_previous_result() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let sub = wf.begin_submission().unwrap();
        wf.finish_submission(sub.generation, Ok(colorized(9)));
        assert!(wf.display().result.as_ref().unwrap().is_colorized());

        wf.select_file(Some(file("b.png")));
        assert_eq!(wf.display().result, None);
        assert!(!wf.display().download_visible);
        assert!(wf.download().is_none());
    }

    #[test]
    fn submit_without_file_is_rejected() {
        let mut wf = UploadWorkflow::default();
        assert_eq!(wf.begin_submission(), Err(WorkflowError::NoFileSelected));
        assert_eq!(wf.phase(), Phase::Idle);
    }

    #[test]
    fn submission_carries_selected_file() {
        let mut wf = UploadWorkflow::default();
        wf.select_file(Some(file("a.png")));
        let sub = wf.begin_submission().unwrap();
        assert_eq!(sub.file.name, "a.png");
        assert_eq!(wf.phase(), Phase::Submitting);
        assert!(wf.is_submitting());
    }

    #[test]
    fn success_replaces_result_and_keeps_original() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let sub = wf.begin_submission().unwrap();

        let notice = wf.finish_submission(sub.generation, Ok(colorized(7))).unwrap();
        assert_eq!(
            notice,
            Notice::Success {
                alert: SUCCESS_ALERT.into(),
                server_message: Some("ok".into())
            }
        );
        assert_eq!(wf.phase(), Phase::Displayed(Outcome::Success));
        assert_eq!(wf.display().original_url.as_deref(), Some("blob:a"));
        assert_eq!(wf.display().result, Some(ResultSlot::Colorized(png(7))));
        assert!(!wf.is_submitting());
    }

    #[test]
    fn success_without_image_leaves_display() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let before = wf.display().clone();
        let sub = wf.begin_submission().unwrap();

        let outcome = ProcessingResult::Success {
            message: Some("queued".into()),
            image: None,
        };
        let notice = wf.finish_submission(sub.generation, Ok(outcome)).unwrap();
        assert!(!notice.is_error());
        assert_eq!(wf.display(), &before);
    }

    #[test]
    fn server_failure_leaves_display() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let before = wf.display().clone();
        let sub = wf.begin_submission().unwrap();

        let failure = ProcessingResult::Failure {
            message: "bad format".into(),
        };
        let notice = wf.finish_submission(sub.generation, Ok(failure)).unwrap();
        assert!(notice.is_error());
        assert!(notice.alert().contains("bad format"));
        assert_eq!(wf.display(), &before);
        assert_eq!(wf.phase(), Phase::Displayed(Outcome::Error));
    }

    #[test]
    fn transport_error_keeps_placeholder() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let sub = wf.begin_submission().unwrap();

        let notice = wf
            .finish_submission(
                sub.generation,
                Err(WorkflowError::Transport("connection refused".into())),
            )
            .unwrap();
        assert_eq!(notice.alert(), TRANSPORT_ALERT);
        let Notice::Error { cause, .. } = notice else {
            unreachable!()
        };
        assert!(cause.contains("connection refused"));
        assert_eq!(wf.display().result, Some(ResultSlot::Placeholder(png(1))));
    }

    #[test]
    fn earlier_submission_reply_is_discarded() {
        let mut wf = UploadWorkflow::default();
        wf.select_file(Some(file("a.png")));
        let first = wf.begin_submission().unwrap();
        let second = wf.begin_submission().unwrap();
        assert!(second.generation > first.generation);

        assert!(wf.finish_submission(first.generation, Ok(colorized(1))).is_none());
        assert_eq!(wf.display().result, None);
        assert!(wf.is_submitting());

        assert!(wf.finish_submission(second.generation, Ok(colorized(2))).is_some());
        assert_eq!(wf.display().result, Some(ResultSlot::Colorized(png(2))));
    }

    #[test]
    fn reply_after_new_selection_is_discarded() {
        let mut wf = UploadWorkflow::default();
        wf.select_file(Some(file("a.png")));
        let sub = wf.begin_submission().unwrap();
        wf.select_file(Some(file("b.png")));

        assert!(wf.finish_submission(sub.generation, Ok(colorized(1))).is_none());
        assert_eq!(wf.display().result, None);
        assert_eq!(wf.phase(), Phase::FileChosen);
    }

    #[test]
    fn reject_policy_blocks_overlapping_submissions() {
        let config = ClientConfig {
            submit_policy: SubmitPolicy::RejectWhileInFlight,
            ..ClientConfig::default()
        };
        let mut wf = UploadWorkflow::new(config);
        wf.select_file(Some(file("a.png")));
        let sub = wf.begin_submission().unwrap();
        assert_eq!(wf.begin_submission(), Err(WorkflowError::SubmissionInFlight));

        wf.finish_submission(sub.generation, Ok(colorized(1)));
        assert!(wf.begin_submission().is_ok());
    }

    #[test]
    fn late_preview_does_not_hide_colorized_result() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        let sub = wf.begin_submission().unwrap();
        wf.finish_submission(sub.generation, Ok(colorized(5)));

        wf.preview_ready(ticket, "blob:a".into(), png(0));
        assert_eq!(wf.display().result, Some(ResultSlot::Colorized(png(5))));
        assert!(wf.display().panel_visible);
    }

    #[test]
    fn preview_failure_is_reported_for_current_selection_only() {
        let mut wf = UploadWorkflow::default();
        let old = wf.select_file(Some(file("a.png"))).unwrap().ticket;
        let new = wf.select_file(Some(file("b.png"))).unwrap().ticket;
        let err = WorkflowError::ImageDecode("bad header".into());

        assert!(wf.preview_failed(old, &err).is_none());
        let notice = wf.preview_failed(new, &err).unwrap();
        assert!(notice.is_error());
        assert!(wf.selected().is_some());
    }

    #[test]
    fn download_uses_configured_name() {
        let mut wf = UploadWorkflow::default();
        let ticket = wf.select_file(Some(file("photo.jpeg"))).unwrap().ticket;
        wf.preview_ready(ticket, "blob:a".into(), png(1));
        let sub = wf.begin_submission().unwrap();
        wf.finish_submission(sub.generation, Ok(colorized(3)));

        let download = wf.download().unwrap();
        assert_eq!(download.file_name, "colorized_image.png");
        assert_eq!(download.mime_type, "image/png");
        assert_eq!(download.bytes, png(3).bytes());
    }
}
