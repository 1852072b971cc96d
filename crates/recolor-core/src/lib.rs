//! recolor-core: Upload workflow for the recolor front end (sans-IO).
//!
//! Models the lifecycle of one colorization request:
//! file selection -> local placeholder preview -> submission ->
//! result display -> optional download.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. All browser interaction
//! (file picker, `fetch`, Blob URLs, alerts) lives in `recolor-io`.

pub mod config;
pub mod placeholder;
pub mod response;
pub mod types;
pub mod workflow;

pub use config::{ClientConfig, SubmitPolicy};
pub use placeholder::{MAX_PIXELS, PlaceholderError, create_white_image, placeholder_for};
pub use response::{ServerResponse, decode_response_body};
pub use types::{
    Dimensions, DisplayState, PngImage, ProcessingResult, ResultSlot, SelectedFile, WorkflowError,
    format_size, read_dimensions,
};
pub use workflow::{
    DecodeTicket, DownloadRequest, Notice, Outcome, Phase, PreviewOutcome, Selection, Submission,
    UploadWorkflow,
};
