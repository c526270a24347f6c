//! PNG encoding of a rendered frame.
//!
//! Rasterization itself belongs to the host renderer; this module only
//! compresses an RGBA8 pixel buffer into a portable still image.

use crate::ExportError;

/// Encode a tightly packed RGBA8 buffer as PNG.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ExportError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(ExportError::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_small_frame() {
        let pixels = vec![255u8; 4 * 4 * 4];
        let png = encode_png(4, 4, &pixels).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let pixels = vec![0u8; 10];
        assert!(matches!(
            encode_png(4, 4, &pixels),
            Err(ExportError::BufferSize { .. })
        ));
    }
}
