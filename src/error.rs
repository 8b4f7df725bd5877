//! Crate error type.
//!
//! Only construction can fail: bad dimensions, unreadable files, undecodable
//! image or font data. Drawing never errors; out-of-range coordinates are
//! silently clipped so per-frame animation code needs no bounds checks.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to parse font: {0}")]
    FontParse(String),
}
