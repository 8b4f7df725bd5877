//! TrueType text rasterization into standalone canvases.
//!
//! Complements the embedded bitmap font: where [`crate::BitmapFont`] stamps
//! fixed 8x8 cells directly onto a target, this module renders a whole string
//! into a fresh canvas at an arbitrary pixel size, with proper metrics and
//! kerning. The result is a regular canvas, so it composites with the same
//! blit family as everything else.

use fontdue::{Font as FontInner, FontSettings};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{Error, Result};

/// A loaded TrueType/OpenType font at a fixed pixel size.
#[derive(Debug)]
pub struct Font {
    font: FontInner,
    size: f32,
}

impl Font {
    /// Parse a font from raw file bytes. `size` is the line height in pixels.
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self> {
        let font = FontInner::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::FontParse(e.to_string()))?;
        Ok(Self { font, size })
    }

    /// Load and parse a font file from disk.
    pub fn from_file(path: &str, size: f32) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, size)
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Canvas {
    /// Rasterize a line of text into a new canvas sized to fit it.
    ///
    /// Pixels are white with the glyph coverage as alpha, so the result tints
    /// cleanly through [`Canvas::blit_tint`]. The canvas height is the font's
    /// pixel size; the width is the advance width of the string, widened if
    /// the last glyph's bitmap overhangs its advance.
    pub fn from_text(font: &Font, text: &str) -> Result<Canvas> {
        let px = font.size;
        let line = font.font.horizontal_line_metrics(px);
        let ascent = line.map_or(px * 0.8, |m| m.ascent);

        // Measure pass. Pen positions are accumulated in float and rounded
        // per glyph so placement matches the raster pass exactly.
        let mut pen = 0.0f32;
        let mut width = 0i32;
        let mut prev: Option<char> = None;
        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|p| font.font.horizontal_kern(p, ch, px)) {
                pen += kern;
            }
            let (metrics, _) = font.font.rasterize(ch, px);
            let right = (pen + metrics.xmin as f32).round() as i32 + metrics.width as i32;
            pen += metrics.advance_width;
            width = width.max(right).max(pen.round() as i32);
            prev = Some(ch);
        }

        let height = px.round() as i32;
        let mut canvas = Canvas::new(width.max(1), height.max(1))?;

        // Raster pass.
        let mut pen = 0.0f32;
        let mut prev: Option<char> = None;
        for ch in text.chars() {
            if let Some(kern) = prev.and_then(|p| font.font.horizontal_kern(p, ch, px)) {
                pen += kern;
            }
            let (metrics, coverage) = font.font.rasterize(ch, px);
            let gx = (pen + metrics.xmin as f32).round() as i32;
            let gy = (ascent - metrics.height as f32 - metrics.ymin as f32).round() as i32;
            for row in 0..metrics.height as i32 {
                for col in 0..metrics.width as i32 {
                    let a = coverage[(row * metrics.width as i32 + col) as usize];
                    if a > 0 {
                        canvas.blend_pixel(gx + col, gy + row, Color::rgba(255, 255, 255, a));
                    }
                }
            }
            pen += metrics.advance_width;
            prev = Some(ch);
        }

        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = Font::from_bytes(&[0x00, 0x01, 0x02, 0x03], 16.0).unwrap_err();
        assert!(matches!(err, Error::FontParse(_)));
    }

    #[test]
    fn missing_file_surfaces_io_error() {
        let err = Font::from_file("/nonexistent/font.ttf", 16.0).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
