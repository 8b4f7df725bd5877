//! RGBA color value type.

/// An 8-bit-per-channel RGBA color.
///
/// Field order is `b, g, r, a` so a row of colors is byte-for-byte an
/// ARGB8888 little-endian scanline, the layout streamed straight into the
/// presentation texture. Construct through [`Color::rgba`] and friends; the
/// field order is an internal detail of the buffer layout.
///
/// Channel arithmetic in the compositing code wraps per 8-bit truncation.
/// That is intentional and load-bearing for bit-exact blending.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the sentinel returned by out-of-bounds reads.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Opaque color (alpha 255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Unpack a `0xAARRGGBB` integer.
    pub const fn from_packed(packed: u32) -> Self {
        Self::rgba(
            (packed >> 16) as u8,
            (packed >> 8) as u8,
            packed as u8,
            (packed >> 24) as u8,
        )
    }

    /// Pack as `0xAARRGGBB`.
    pub const fn packed(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}
