//! Export surfaces for Sketchboard documents: standalone SVG, PNG
//! frame encoding, and deterministic date-based file naming.

pub mod raster;
pub mod svg;

use chrono::{Local, NaiveDate};
use thiserror::Error;

pub use raster::encode_png;
pub use svg::{render_svg, SvgOptions};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("formatting failed: {0}")]
    Fmt(#[from] std::fmt::Error),
    #[error(transparent)]
    Board(#[from] sketchboard_core::BoardError),
}

/// Deterministic export name for today's date, e.g.
/// `sketchboard-2026-08-28.svg`.
pub fn export_file_name(extension: &str) -> String {
    file_name_for_date(Local::now().date_naive(), extension)
}

pub fn file_name_for_date(date: NaiveDate, extension: &str) -> String {
    format!("sketchboard-{}.{extension}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_format() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        assert_eq!(file_name_for_date(date, "svg"), "sketchboard-2026-08-28.svg");
        assert_eq!(file_name_for_date(date, "png"), "sketchboard-2026-08-28.png");
    }
}
