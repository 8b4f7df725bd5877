//! The blit engine: copy, alpha-faded and tint-blended rectangle transfers
//! between canvases.
//!
//! All three variants share one clipping step that simultaneously clips the
//! copy rectangle against the destination clip rect, destination bounds and
//! source bounds, advancing the destination and source origins in lockstep
//! so sampling stays aligned. An empty result is a no-op.

use super::{blend_channel, expand, Canvas};
use crate::color::Color;

/// A fully clipped copy rectangle.
#[derive(Debug, Clone, Copy)]
struct BlitRect {
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    width: i32,
    height: i32,
}

impl Canvas {
    fn clip_blit(
        &self,
        src: &Canvas,
        mut dx: i32,
        mut dy: i32,
        mut sx: i32,
        mut sy: i32,
        mut width: i32,
        mut height: i32,
    ) -> Option<BlitRect> {
        // effective_clip is already intersected with the destination bounds,
        // so clamping against it covers dx/dy >= 0 as well.
        let (cx0, cy0, cx1, cy1) = self.effective_clip();

        if dx < cx0 {
            let d = cx0 - dx;
            width -= d;
            sx += d;
            dx = cx0;
        }
        if dy < cy0 {
            let d = cy0 - dy;
            height -= d;
            sy += d;
            dy = cy0;
        }
        if sx < 0 {
            let d = -sx;
            width -= d;
            dx += d;
            sx = 0;
        }
        if sy < 0 {
            let d = -sy;
            height -= d;
            dy += d;
            sy = 0;
        }
        if dx + width > cx1 {
            width = cx1 - dx;
        }
        if dy + height > cy1 {
            height = cy1 - dy;
        }
        if sx + width > src.width() {
            width = src.width() - sx;
        }
        if sy + height > src.height() {
            height = src.height() - sy;
        }

        if width <= 0 || height <= 0 {
            None
        } else {
            Some(BlitRect {
                dx,
                dy,
                sx,
                sy,
                width,
                height,
            })
        }
    }

    /// Raw copy of a source region, no blending. The fast path for opaque
    /// stamps and sources without meaningful alpha.
    pub fn blit(&mut self, src: &Canvas, dx: i32, dy: i32, sx: i32, sy: i32, w: i32, h: i32) {
        let Some(r) = self.clip_blit(src, dx, dy, sx, sy, w, h) else {
            return;
        };

        let st = src.width() as usize;
        let dt = self.width() as usize;
        let mut si = src.index(r.sx, r.sy);
        let mut di = self.index(r.dx, r.dy);
        let w = r.width as usize;

        for _ in 0..r.height {
            self.pixels_mut()[di..di + w].copy_from_slice(&src.pixels()[si..si + w]);
            si += st;
            di += dt;
        }
    }

    /// Blit the source faded by a single scalar alpha (clamped to 0..=1).
    /// Equivalent to a tint blit with a white tint carrying that alpha.
    pub fn blit_alpha(
        &mut self,
        src: &Canvas,
        dx: i32,
        dy: i32,
        sx: i32,
        sy: i32,
        w: i32,
        h: i32,
        alpha: f32,
    ) {
        let alpha = alpha.clamp(0.0, 1.0);
        let tint = Color::rgba(255, 255, 255, (255.0 * alpha) as u8);
        self.blit_tint(src, dx, dy, sx, sy, w, h, tint);
    }

    /// The general blit: each source channel is scaled by the tint's expanded
    /// channel, then composited with weight `expand(tint.a) * expand(src.a)`.
    /// One pass recolors and fades a sprite simultaneously; the plain and
    /// alpha blits are special cases of this.
    pub fn blit_tint(
        &mut self,
        src: &Canvas,
        dx: i32,
        dy: i32,
        sx: i32,
        sy: i32,
        w: i32,
        h: i32,
        tint: Color,
    ) {
        let Some(r) = self.clip_blit(src, dx, dy, sx, sy, w, h) else {
            return;
        };

        let xr = expand(tint.r);
        let xg = expand(tint.g);
        let xb = expand(tint.b);
        let xa = expand(tint.a);

        let st = src.width() as usize;
        let dt = self.width() as usize;
        let mut si = src.index(r.sx, r.sy);
        let mut di = self.index(r.dx, r.dy);
        let w = r.width as usize;

        for _ in 0..r.height {
            for x in 0..w {
                let s = src.pixels()[si + x];
                let sr = (xr * s.r as i32) >> 8;
                let sg = (xg * s.g as i32) >> 8;
                let sb = (xb * s.b as i32) >> 8;
                let a = xa * expand(s.a);

                let d = &mut self.pixels_mut()[di + x];
                d.r = blend_channel(d.r, sr, a);
                d.g = blend_channel(d.g, sg, a);
                d.b = blend_channel(d.b, sb, a);
                d.a = blend_channel(d.a, s.a as i32, a);
            }
            si += st;
            di += dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: i32, h: i32) -> Canvas {
        Canvas::new(w, h).unwrap()
    }

    /// Source with a distinct opaque color per pixel.
    fn gradient_source(w: i32, h: i32) -> Canvas {
        let mut c = canvas(w, h);
        for y in 0..h {
            for x in 0..w {
                c.fill(x, y, 1, 1, Color::rgb((x * 16) as u8, (y * 16) as u8, 7));
            }
        }
        c
    }

    #[test]
    fn blit_copies_aligned_region() {
        let src = gradient_source(4, 4);
        let mut dst = canvas(10, 10);
        dst.blit(&src, 3, 2, 1, 1, 2, 2);
        assert_eq!(dst.get(3, 2), src.get(1, 1));
        assert_eq!(dst.get(4, 3), src.get(2, 2));
        assert_eq!(dst.get(2, 2), 0);
        assert_eq!(dst.get(5, 2), 0);
    }

    #[test]
    fn blit_partial_overlap_copies_exact_subrect() {
        let src = gradient_source(4, 4);
        let mut dst = canvas(6, 6);
        // Destination origin hangs off the top-left corner.
        dst.blit(&src, -2, -2, 0, 0, 4, 4);
        // Only the bottom-right 2x2 of the source lands, at (0,0).
        assert_eq!(dst.get(0, 0), src.get(2, 2));
        assert_eq!(dst.get(1, 1), src.get(3, 3));
        assert_eq!(dst.get(2, 0), 0);
        assert_eq!(dst.get(0, 2), 0);
    }

    #[test]
    fn blit_fully_outside_is_noop() {
        let src = gradient_source(4, 4);
        let mut dst = canvas(6, 6);
        dst.blit(&src, 10, 10, 0, 0, 4, 4);
        dst.blit(&src, -10, -10, 0, 0, 4, 4);
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(dst.get(x, y), 0);
            }
        }
    }

    #[test]
    fn blit_clips_against_source_bounds() {
        let src = gradient_source(4, 4);
        let mut dst = canvas(10, 10);
        // Requested region extends past the source on both axes.
        dst.blit(&src, 0, 0, 2, 2, 8, 8);
        assert_eq!(dst.get(0, 0), src.get(2, 2));
        assert_eq!(dst.get(1, 1), src.get(3, 3));
        assert_eq!(dst.get(2, 0), 0);
        assert_eq!(dst.get(0, 2), 0);
    }

    #[test]
    fn blit_negative_source_origin_advances_in_lockstep() {
        let src = gradient_source(4, 4);
        let mut dst = canvas(10, 10);
        dst.blit(&src, 2, 2, -1, -1, 3, 3);
        // sx/sy clamp to 0, dx/dy advance to (3,3); 2x2 copied.
        assert_eq!(dst.get(2, 2), 0);
        assert_eq!(dst.get(3, 3), src.get(0, 0));
        assert_eq!(dst.get(4, 4), src.get(1, 1));
    }

    #[test]
    fn blit_respects_destination_clip() {
        let src = gradient_source(4, 4);
        let mut dst = canvas(10, 10);
        dst.set_clip(4, 4, 2, 2);
        dst.blit(&src, 3, 3, 0, 0, 4, 4);
        assert_eq!(dst.get(3, 3), 0);
        assert_eq!(dst.get(4, 4), src.get(1, 1));
        assert_eq!(dst.get(5, 5), src.get(2, 2));
        assert_eq!(dst.get(6, 6), 0);
    }

    #[test]
    fn tint_white_opaque_equals_plain_copy_for_opaque_source() {
        let src = gradient_source(4, 4);
        let mut plain = canvas(8, 8);
        let mut tinted = canvas(8, 8);
        plain.blit(&src, 1, 1, 0, 0, 4, 4);
        tinted.blit_tint(&src, 1, 1, 0, 0, 4, 4, Color::WHITE);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(plain.get(x, y), tinted.get(x, y), "({x},{y})");
            }
        }
    }

    #[test]
    fn tint_scales_source_channels() {
        let mut src = canvas(1, 1);
        src.fill(0, 0, 1, 1, Color::rgb(200, 100, 50));
        let mut dst = canvas(1, 1);
        // Half-intensity red tint, opaque alpha.
        dst.blit_tint(&src, 0, 0, 0, 0, 1, 1, Color::rgba(128, 255, 0, 255));
        let got = dst.pixel(0, 0);
        assert_eq!(got.r, ((129u32 * 200) >> 8) as u8); // 100
        assert_eq!(got.g, 100); // expand(255) * 100 >> 8
        assert_eq!(got.b, 0);
        assert_eq!(got.a, 255);
    }

    #[test]
    fn tint_combines_both_alphas() {
        let mut src = canvas(1, 1);
        src.fill(0, 0, 1, 1, Color::rgba(255, 255, 255, 128));
        let mut dst = canvas(1, 1);
        dst.blit_tint(&src, 0, 0, 0, 0, 1, 1, Color::rgba(255, 255, 255, 128));
        let got = dst.pixel(0, 0);
        // weight = expand(128)^2 = 16641; rgb = 255 * (129 << 0) >> 8 = 255
        // dst.r = 0 + 255 * 16641 >> 16 = 64
        assert_eq!(got.r, 64);
        // dst.a blends toward the source alpha: 128 * 16641 >> 16 = 32
        assert_eq!(got.a, 32);
    }

    #[test]
    fn blit_alpha_zero_is_noop() {
        let src = gradient_source(4, 4);
        let mut dst = canvas(8, 8);
        dst.blit_alpha(&src, 0, 0, 0, 0, 4, 4, 0.0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(dst.get(x, y), 0);
            }
        }
    }

    #[test]
    fn blit_alpha_one_matches_white_tint() {
        let src = gradient_source(4, 4);
        let mut a = canvas(8, 8);
        let mut b = canvas(8, 8);
        a.blit_alpha(&src, 0, 0, 0, 0, 4, 4, 5.0); // clamped to 1.0
        b.blit_tint(&src, 0, 0, 0, 0, 4, 4, Color::WHITE);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(a.get(x, y), b.get(x, y));
            }
        }
    }

    #[test]
    fn tint_skips_transparent_source_pixels_bitwise() {
        // expand(0) == 0 makes the weight zero; destination must be
        // bit-for-bit unchanged under transparent source texels.
        let src = canvas(2, 2); // fully transparent
        let mut dst = gradient_source(2, 2);
        let before: Vec<u32> = (0..2)
            .flat_map(|y| (0..2).map(move |x| (x, y)))
            .map(|(x, y)| dst.get(x, y))
            .collect();
        dst.blit_tint(&src, 0, 0, 0, 0, 2, 2, Color::WHITE);
        let after: Vec<u32> = (0..2)
            .flat_map(|y| (0..2).map(move |x| (x, y)))
            .map(|(x, y)| dst.get(x, y))
            .collect();
        assert_eq!(before, after);
    }
}
