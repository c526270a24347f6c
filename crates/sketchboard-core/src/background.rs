//! Background image state.
//!
//! Decoding is a collaborator concern: callers hand over raw bytes plus
//! the natural pixel dimensions they obtained from their decoder. The
//! board only keeps the encoded bytes (base64) and the rigid transform.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unrecognized image format")]
    UnknownFormat,
    #[error("invalid base64 image data: {0}")]
    InvalidData(#[from] base64::DecodeError),
}

/// Supported raster formats, detected from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF8") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::Webp)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }
}

/// The board's background image and its rigid transform.
///
/// `position` is the *un-scaled* top-left corner in world space. Scale
/// and rotation composite about the image's own center, so moving the
/// center requires re-deriving position from natural dimensions,
/// independent of the live scale factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundImage {
    /// Base64 of the original encoded bytes.
    pub data: String,
    pub format: ImageFormat,
    pub natural_width: f64,
    pub natural_height: f64,
    pub position: Point,
    pub scale: f64,
    pub rotation: f64,
}

impl BackgroundImage {
    /// Wrap raw encoded bytes. Natural dimensions come from the caller's
    /// decoder; an unrecognized container is rejected.
    pub fn from_bytes(
        bytes: &[u8],
        natural_width: f64,
        natural_height: f64,
    ) -> Result<Self, ImageError> {
        let format = ImageFormat::detect(bytes).ok_or(ImageError::UnknownFormat)?;
        Ok(Self {
            data: STANDARD.encode(bytes),
            format,
            natural_width,
            natural_height,
            position: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
        })
    }

    /// The original encoded bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, ImageError> {
        Ok(STANDARD.decode(&self.data)?)
    }

    /// Data URL suitable for embedding in a vector document.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data)
    }

    /// The compositing center in world space.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.natural_width / 2.0,
            self.position.y + self.natural_height / 2.0,
        )
    }

    /// Re-derive the top-left position so the center lands on `center`.
    /// Uses natural dimensions only; the live scale factor must not
    /// leak into the stored position.
    pub fn set_center(&mut self, center: Point) {
        self.position = Point::new(
            center.x - self.natural_width / 2.0,
            center.y - self.natural_height / 2.0,
        );
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::detect(PNG_MAGIC), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::detect(b"not an image"), None);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(BackgroundImage::from_bytes(b"garbage", 10.0, 10.0).is_err());
    }

    #[test]
    fn test_bytes_roundtrip() {
        let bg = BackgroundImage::from_bytes(PNG_MAGIC, 640.0, 480.0).unwrap();
        assert_eq!(bg.bytes().unwrap(), PNG_MAGIC);
        assert!(bg.data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_center_rederivation_ignores_scale() {
        let mut bg = BackgroundImage::from_bytes(PNG_MAGIC, 640.0, 480.0).unwrap();
        bg.scale = 3.0;
        bg.set_center(Point::new(100.0, 100.0));
        assert_eq!(bg.position, Point::new(100.0 - 320.0, 100.0 - 240.0));
        let c = bg.center();
        assert!((c.x - 100.0).abs() < 1e-12);
        assert!((c.y - 100.0).abs() < 1e-12);
    }
}
