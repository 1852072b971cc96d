//! Dioxus UI components for recolor.
//!
//! Provides the upload form with file picker and drop zone, the
//! original/result comparison panel, and the download button.

mod comparison;
mod download;
mod upload;

pub use comparison::ComparisonPanel;
pub use download::DownloadButton;
pub use upload::UploadForm;
