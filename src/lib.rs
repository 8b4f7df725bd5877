//! Fantasy-console style software rendering surface.
//!
//! The heart of the crate is [`Canvas`]: a CPU-side pixel buffer with
//! alpha-composited drawing primitives (pixels, lines, rectangles, circles,
//! text) and clip-aware blits between canvases. Everything is fixed-function
//! integer-coordinate rasterization; there is no GPU, no anti-aliasing and
//! no sub-pixel precision.
//!
//! A thin SDL2 [`display`] adapter streams a finished canvas to a window once
//! per frame. The adapter knows nothing about how pixels got there; any other
//! presentation layer that accepts ARGB8888 bytes works just as well.

pub mod canvas;
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod text;
pub mod util;

pub use canvas::{BitmapFont, Canvas, ClipRect, GLYPH_SIZE};
pub use color::Color;
pub use config::AppConfig;
pub use display::{Display, InputEvent, MouseButtonKind, RenderTarget};
pub use error::{Error, Result};
pub use text::Font;
pub use util::FpsCounter;
