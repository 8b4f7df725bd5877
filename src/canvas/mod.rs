//! The pixel buffer and its compositing primitive.
//!
//! A [`Canvas`] owns a dense row-major buffer of [`Color`] values plus an
//! independent clip rectangle. Every drawing operation routes through
//! [`Canvas::blend_pixel`] or the blit engine, both of which clamp against
//! clip ∩ bounds and otherwise do nothing — drawing never errors.
//!
//! The blend arithmetic is bit-exact with the classic fantasy-console
//! formula: alpha is "expanded" by one before squaring into a 16-bit weight,
//! which compensates for 8-bit truncation bias (a fully opaque blend is an
//! exact overwrite, a zero-alpha blend is an exact no-op).

mod blit;
mod draw;
mod font;

pub use font::{BitmapFont, GLYPH_SIZE};

use std::path::Path;

use crate::color::Color;
use crate::error::{Error, Result};

/// Axis-aligned clip region.
///
/// A negative `width` or `height` means "no clipping on that axis" (the
/// effective size falls back to the full canvas dimension). The rectangle may
/// extend outside the canvas; drawing clamps against both independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Default for ClipRect {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: -1,
            height: -1,
        }
    }
}

/// Expand an 8-bit channel by one if nonzero.
///
/// `expand(255) == 256`, so a squared full-alpha weight is exactly 2^16 and
/// the `>> 16` blend becomes a plain overwrite.
#[inline]
pub(crate) fn expand(c: u8) -> i32 {
    c as i32 + (c > 0) as i32
}

/// One blend step: `dst += (src - dst) * weight >> 16`, wrapping per 8-bit
/// truncation. `weight` is 16-bit fixed point (0..=65536).
#[inline]
pub(crate) fn blend_channel(dst: u8, src: i32, weight: i32) -> u8 {
    dst.wrapping_add((((src - dst as i32) * weight) >> 16) as u8)
}

/// A software rendering surface.
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    clip: ClipRect,
}

impl Canvas {
    /// Create a transparent canvas. Dimensions must be positive and are fixed
    /// for the lifetime of the canvas.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; (width * height) as usize],
            clip: ClipRect::default(),
        })
    }

    /// Decode an image file (PNG and friends) into a canvas.
    ///
    /// Decoded data arrives as RGBA bytes and is normalized into the internal
    /// ARGB8888 layout here, so the presentation path never has to care.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let decoded = image::open(path)?.to_rgba8();
        let (w, h) = decoded.dimensions();
        if w == 0 || h == 0 {
            return Err(Error::InvalidDimensions {
                width: w as i32,
                height: h as i32,
            });
        }
        let pixels = decoded
            .pixels()
            .map(|p| Color::rgba(p.0[0], p.0[1], p.0[2], p.0[3]))
            .collect();
        Ok(Self {
            width: w as i32,
            height: h as i32,
            pixels,
            clip: ClipRect::default(),
        })
    }

    /// Build a canvas from an existing pixel vector. `pixels.len()` must be
    /// `width * height`; callers inside the crate uphold this.
    pub(crate) fn from_pixels(width: i32, height: i32, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
            clip: ClipRect::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Set the clip rectangle. Negative width/height disables clipping on
    /// that axis; the rectangle may exceed the canvas bounds.
    pub fn set_clip(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.clip = ClipRect {
            x,
            y,
            width,
            height,
        };
    }

    /// Remove any clip rectangle.
    pub fn clear_clip(&mut self) {
        self.clip = ClipRect::default();
    }

    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// The clip rectangle resolved against the canvas: defaults applied and
    /// intersected with the bounds. Returned as (x0, y0, x1, y1) half-open.
    #[inline]
    pub(crate) fn effective_clip(&self) -> (i32, i32, i32, i32) {
        let cw = if self.clip.width >= 0 {
            self.clip.width
        } else {
            self.width
        };
        let ch = if self.clip.height >= 0 {
            self.clip.height
        } else {
            self.height
        };
        let x0 = self.clip.x.max(0);
        let y0 = self.clip.y.max(0);
        let x1 = (self.clip.x + cw).min(self.width).max(x0);
        let y1 = (self.clip.y + ch).min(self.height).max(y0);
        (x0, y0, x1, y1)
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    pub(crate) fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Read a pixel as packed `0xAARRGGBB`. Out-of-bounds reads return
    /// transparent black rather than erroring, so callers can probe near
    /// edges without bounds checks.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if self.in_bounds(x, y) {
            self.pixels[self.index(x, y)].packed()
        } else {
            0
        }
    }

    /// Read a pixel as a [`Color`]; out of bounds yields the transparent
    /// sentinel.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if self.in_bounds(x, y) {
            self.pixels[self.index(x, y)]
        } else {
            Color::TRANSPARENT
        }
    }

    /// Composite one pixel (clip-aware). Alias for [`Canvas::blend_pixel`].
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        self.blend_pixel(x, y, color);
    }

    /// The compositing primitive: blend `color` into the pixel at (x, y),
    /// weighted by the color's expanded-and-squared alpha. Writes only inside
    /// clip ∩ bounds.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        let (cx0, cy0, cx1, cy1) = self.effective_clip();
        if x < cx0 || y < cy0 || x >= cx1 || y >= cy1 {
            return;
        }
        let xa = expand(color.a);
        let w = xa * xa;
        let i = self.index(x, y);
        let dst = &mut self.pixels[i];
        dst.r = blend_channel(dst.r, color.r as i32, w);
        dst.g = blend_channel(dst.g, color.g as i32, w);
        dst.b = blend_channel(dst.b, color.b as i32, w);
        dst.a = blend_channel(dst.a, color.a as i32, w);
    }

    /// Overwrite every pixel with `color`. No blending, no clip interaction.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Flat rectangle fill: overwrite pixels in row-major order after
    /// clamping to the canvas bounds. Intentionally bypasses both blending
    /// and the clip rectangle — this is the opaque fill/clear path.
    pub fn fill(&mut self, mut x: i32, mut y: i32, mut width: i32, mut height: i32, color: Color) {
        if x < 0 {
            width += x;
            x = 0;
        }
        if y < 0 {
            height += y;
            y = 0;
        }
        if x + width > self.width {
            width = self.width - x;
        }
        if y + height > self.height {
            height = self.height - y;
        }
        if width <= 0 || height <= 0 {
            return;
        }

        let stride = self.width as usize;
        let mut row = self.index(x, y);
        for _ in 0..height {
            self.pixels[row..row + width as usize].fill(color);
            row += stride;
        }
    }

    /// Raw ARGB8888 little-endian bytes for presentation-layer upload.
    pub fn as_bytes(&self) -> &[u8] {
        // Safety: Color is #[repr(C)] with four u8 fields, so the pixel vec
        // is exactly width * height * 4 initialized bytes.
        unsafe {
            std::slice::from_raw_parts(self.pixels.as_ptr().cast::<u8>(), self.pixels.len() * 4)
        }
    }

    pub(crate) fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}

impl Clone for Canvas {
    /// Deep copy: the new canvas owns an independent buffer and starts
    /// unclipped.
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
            clip: ClipRect::default(),
        }
    }
}
