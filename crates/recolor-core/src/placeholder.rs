//! Placeholder image shown in the result slot while the server works.
//!
//! A white canvas the size of the original with a black ellipsis in
//! the middle. Rendered with `tiny-skia` so the dots are anti-aliased,
//! then encoded to PNG with the `image` crate.

use image::ImageEncoder;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::types::{Dimensions, PngImage};

/// Dot radius as a fraction of the image width.
const DOT_RADIUS_RATIO: f32 = 0.0275;

/// Distance between neighbouring dot centers as a fraction of the width.
const DOT_SPACING_RATIO: f32 = 0.14;

/// Largest canvas, in pixels, the placeholder will allocate.
///
/// A 40 MP RGBA pixmap is 160 MB, on top of which the RGB copy for the
/// encoder needs another 120 MB.
pub const MAX_PIXELS: u64 = 40_000_000;

/// Errors that can occur while rendering the placeholder.
#[derive(Debug, thiserror::Error)]
pub enum PlaceholderError {
    /// Width or height is zero, or the canvas would be too large.
    #[error("invalid placeholder dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}

impl From<image::ImageError> for PlaceholderError {
    fn from(err: image::ImageError) -> Self {
        Self::PngEncode(err.to_string())
    }
}

/// Render a `width` x `height` white PNG with a centered ellipsis.
///
/// Deterministic: identical inputs produce byte-identical output.
///
/// # Errors
///
/// Returns [`PlaceholderError::InvalidDimensions`] if either side is
/// zero, or the canvas exceeds [`MAX_PIXELS`].
/// Returns [`PlaceholderError::PngEncode`] if PNG encoding fails.
#[allow(clippy::cast_precision_loss)]
pub fn create_white_image(width: u32, height: u32) -> Result<PngImage, PlaceholderError> {
    let invalid = || PlaceholderError::InvalidDimensions { width, height };
    if width == 0 || height == 0 || u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(invalid());
    }
    let mut pixmap = Pixmap::new(width, height).ok_or_else(invalid)?;
    pixmap.fill(Color::WHITE);

    let w = width as f32;
    let radius = w * DOT_RADIUS_RATIO;
    let spacing = w * DOT_SPACING_RATIO;
    let (cx, cy) = (w / 2.0, height as f32 / 2.0);

    let mut paint = Paint::default();
    paint.set_color_rgba8(0, 0, 0, 255);
    paint.anti_alias = true;

    for offset in [-spacing, 0.0, spacing] {
        // Degenerate radius (sub-pixel images) yields no path; skip the dot.
        if let Some(dot) = PathBuilder::from_circle(cx + offset, cy, radius) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    encode_opaque_png(&pixmap)
}

/// Convenience wrapper taking decoded [`Dimensions`].
///
/// # Errors
///
/// Same as [`create_white_image`].
pub fn placeholder_for(dimensions: Dimensions) -> Result<PngImage, PlaceholderError> {
    create_white_image(dimensions.width, dimensions.height)
}

/// Encode a fully opaque pixmap as an RGB PNG.
///
/// The pixmap is premultiplied, which equals straight alpha when every
/// pixel is opaque, so the alpha channel can simply be dropped.
fn encode_opaque_png(pixmap: &Pixmap) -> Result<PngImage, PlaceholderError> {
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(
        &rgb,
        pixmap.width(),
        pixmap.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(PngImage::new(png_bytes))
}
