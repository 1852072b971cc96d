//! recolor-io: Browser I/O and Dioxus component library.
//!
//! Handles file selection, Blob URLs, the multipart upload to the
//! colorization endpoint, downloads, user alerts, and provides the UI
//! components for the recolor web application.

pub mod blob;
pub mod components;
pub mod download;
pub mod fetch;
pub mod notify;
pub mod page_config;
pub mod session;

pub use components::{ComparisonPanel, DownloadButton, UploadForm};
pub use page_config::read_page_config;
