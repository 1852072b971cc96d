//! Shared types for the recolor upload workflow.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// MIME type sent when neither the picker nor the extension names one.
const FALLBACK_MIME: &str = "application/octet-stream";

/// An image the user picked in the file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the picker (no directory component).
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
}

impl SelectedFile {
    /// Create a selected file, falling back to an extension-based MIME
    /// type when the picker did not report one.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, mime_type: Option<String>) -> Self {
        let name = name.into();
        let mime_type = mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| mime_from_extension(&name).to_owned());
        Self {
            name,
            bytes,
            mime_type,
        }
    }

    /// Size of the file in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file has no content.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Guess an image MIME type from a file name's extension.
fn mime_from_extension(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return FALLBACK_MIME;
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => FALLBACK_MIME,
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Read the pixel dimensions of an encoded image.
///
/// Only the header is parsed; the format is guessed from the content,
/// not the file name.
///
/// # Errors
///
/// Returns [`WorkflowError::ImageDecode`] if the bytes are empty, the
/// format is not recognized, or the header is malformed.
pub fn read_dimensions(bytes: &[u8]) -> Result<Dimensions, WorkflowError> {
    if bytes.is_empty() {
        return Err(WorkflowError::ImageDecode("file is empty".into()));
    }
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| WorkflowError::ImageDecode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| WorkflowError::ImageDecode(e.to_string()))?;
    Ok(Dimensions { width, height })
}

/// Encoded PNG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage(Vec<u8>);

impl PngImage {
    /// Wrap already-encoded PNG bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode a standard-alphabet base64 payload.
    ///
    /// # Errors
    ///
    /// Returns the base64 decode error if the payload is malformed.
    pub fn from_base64(encoded: &str) -> Result<Self, base64::DecodeError> {
        STANDARD.decode(encoded.trim()).map(Self)
    }

    /// The encoded PNG bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Render as a `data:image/png;base64,...` URL for an `<img src>`.
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.0))
    }
}

/// Outcome of one submission, decoded from the server's JSON reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// The server processed the image.
    Success {
        /// Human-readable status from the server, if any.
        message: Option<String>,
        /// The colorized image, if the server sent one.
        image: Option<PngImage>,
    },
    /// The server rejected the image or failed to process it.
    Failure {
        /// Error text reported by the server.
        message: String,
    },
}

/// What currently occupies the result half of the comparison panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSlot {
    /// Locally synthesized stand-in shown while waiting for the server.
    Placeholder(PngImage),
    /// The server's colorized image.
    Colorized(PngImage),
}

impl ResultSlot {
    /// The image held in the slot, whichever kind it is.
    #[must_use]
    pub const fn image(&self) -> &PngImage {
        match self {
            Self::Placeholder(image) | Self::Colorized(image) => image,
        }
    }

    /// Returns `true` if the slot holds the server's result.
    #[must_use]
    pub const fn is_colorized(&self) -> bool {
        matches!(self, Self::Colorized(_))
    }
}

/// Everything the page shows about the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// Object URL of the original image.
    pub original_url: Option<String>,
    /// Placeholder or colorized result.
    pub result: Option<ResultSlot>,
    /// Whether the original/result comparison panel is shown.
    pub panel_visible: bool,
    /// Whether the download button is shown.
    pub download_visible: bool,
}

impl DisplayState {
    /// Data URL of the result slot, if populated.
    #[must_use]
    pub fn result_url(&self) -> Option<String> {
        self.result.as_ref().map(|slot| slot.image().data_url())
    }
}

/// Errors raised while driving the upload workflow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// Submit was requested with no file chosen.
    #[error("no file selected")]
    NoFileSelected,

    /// A submission is pending and the policy forbids another one.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The request could not be sent or the reply could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The reply body was not the expected JSON object.
    #[error("malformed server response: {0}")]
    MalformedResponse(String),

    /// The server reported an error.
    #[error("server error: {0}")]
    Server(String),

    /// The selected file's image header could not be read.
    #[error("failed to decode image: {0}")]
    ImageDecode(String),
}

/// Format a byte count with binary units, e.g. `1.50 KB`.
#[must_use]
pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if size < 1024 {
        return format!("{size} B");
    }
    #[expect(clippy::cast_precision_loss)]
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
