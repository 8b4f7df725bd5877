//! Rasterization primitives: lines, rectangles, circles.
//!
//! Every primitive composites through [`Canvas::blend_pixel`] (or the
//! per-row blend in `fill_rect`), so everything here honors the clip
//! rectangle and partial alpha. Coordinates are plain integers; there is no
//! anti-aliasing.

use super::{blend_channel, expand, Canvas};
use crate::color::Color;

impl Canvas {
    /// Bresenham line from (x0, y0) to (x1, y1), both endpoints inclusive.
    /// A degenerate single-point line composites exactly one pixel.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.blend_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Rectangle outline with corners (x, y) to (x+width-1, y+height-1).
    /// Degenerate widths/heights collapse to a single line covering exactly
    /// `height` (or `width`) pixels. Each corner is composited once, so
    /// translucent outlines don't double-blend.
    pub fn rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }

        if width == 1 {
            self.line(x, y, x, y + height - 1, color);
        } else if height == 1 {
            self.line(x, y, x + width - 1, y, color);
        } else {
            let x1 = x + width - 1;
            let y1 = y + height - 1;

            self.line(x, y, x1, y, color);
            self.line(x, y1, x1, y1, color);
            if height > 2 {
                self.line(x, y + 1, x, y1 - 1, color);
                self.line(x1, y + 1, x1, y1 - 1, color);
            }
        }
    }

    /// Filled rectangle interior: the region inset by one pixel per side.
    /// Callers combine `rect` + `fill_rect` for a bordered rectangle. Blends
    /// per pixel (respects partial alpha), clipped against clip ∩ bounds.
    pub fn fill_rect(
        &mut self,
        mut x: i32,
        mut y: i32,
        mut width: i32,
        mut height: i32,
        color: Color,
    ) {
        x += 1;
        y += 1;
        width -= 2;
        height -= 2;

        let (cx0, cy0, cx1, cy1) = self.effective_clip();
        if x < cx0 {
            width += x - cx0;
            x = cx0;
        }
        if y < cy0 {
            height += y - cy0;
            y = cy0;
        }
        if x + width > cx1 {
            width = cx1 - x;
        }
        if y + height > cy1 {
            height = cy1 - y;
        }
        if width <= 0 || height <= 0 {
            return;
        }

        let xa = expand(color.a);
        let w = xa * xa;
        let stride = self.width() as usize;
        let mut row = self.index(x, y);

        for _ in 0..height {
            for px in &mut self.pixels_mut()[row..row + width as usize] {
                px.r = blend_channel(px.r, color.r as i32, w);
                px.g = blend_channel(px.g, color.g as i32, w);
                px.b = blend_channel(px.b, color.b as i32, w);
                px.a = blend_channel(px.a, color.a as i32, w);
            }
            row += stride;
        }
    }

    /// Circle outline via the integer midpoint algorithm: cardinal points
    /// first, then one octant mirrored eight ways, skipping the duplicate
    /// plots where the octant boundary `x == y` would land twice.
    pub fn circle(&mut self, x0: i32, y0: i32, radius: i32, color: Color) {
        let mut e = 1 - radius;
        let mut dx = 0;
        let mut dy = -2 * radius;
        let mut x = 0;
        let mut y = radius;

        self.blend_pixel(x0, y0 + radius, color);
        self.blend_pixel(x0, y0 - radius, color);
        self.blend_pixel(x0 + radius, y0, color);
        self.blend_pixel(x0 - radius, y0, color);

        while x < y - 1 {
            x += 1;

            if e >= 0 {
                y -= 1;
                dy += 2;
                e += dy;
            }

            dx += 2;
            e += dx + 1;

            self.blend_pixel(x0 + x, y0 + y, color);
            self.blend_pixel(x0 - x, y0 + y, color);
            self.blend_pixel(x0 + x, y0 - y, color);
            self.blend_pixel(x0 - x, y0 - y, color);

            if x != y {
                self.blend_pixel(x0 + y, y0 + x, color);
                self.blend_pixel(x0 - y, y0 + x, color);
                self.blend_pixel(x0 + y, y0 - x, color);
                self.blend_pixel(x0 - y, y0 - x, color);
            }
        }
    }

    /// Filled circle: the same midpoint walk as [`Canvas::circle`], drawing
    /// mirrored horizontal spans through the line primitive. Spans run the
    /// full `x0-x ..= x0+x` so the disc is symmetric across both
    /// centerlines. Radius <= 0 is a no-op.
    pub fn fill_circle(&mut self, x0: i32, y0: i32, radius: i32, color: Color) {
        if radius <= 0 {
            return;
        }

        let mut e = 1 - radius;
        let mut dx = 0;
        let mut dy = -2 * radius;
        let mut x = 0;
        let mut y = radius;

        // Full-width span at center-y, drawn unconditionally.
        self.line(x0 - radius, y0, x0 + radius, y0, color);

        while x < y - 1 {
            x += 1;

            if e >= 0 {
                y -= 1;
                dy += 2;
                e += dy;
                self.line(x0 - x, y0 + y, x0 + x, y0 + y, color);
                self.line(x0 - x, y0 - y, x0 + x, y0 - y, color);
            }

            dx += 2;
            e += dx + 1;

            if x != y {
                self.line(x0 - y, y0 + x, x0 + y, y0 + x, color);
                self.line(x0 - y, y0 - x, x0 + y, y0 - x, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn canvas(w: i32, h: i32) -> Canvas {
        Canvas::new(w, h).unwrap()
    }

    fn lit(c: &Canvas) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..c.height() {
            for x in 0..c.width() {
                if c.get(x, y) != 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn line_includes_both_endpoints() {
        let mut c = canvas(8, 3);
        c.line(0, 0, 5, 0, Color::WHITE);
        assert_eq!(lit(&c), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn line_is_symmetric_in_endpoint_order() {
        let mut a = canvas(16, 16);
        let mut b = canvas(16, 16);
        a.line(1, 2, 13, 9, Color::WHITE);
        b.line(13, 9, 1, 2, Color::WHITE);
        assert_eq!(lit(&a), lit(&b));
    }

    #[test]
    fn degenerate_line_composites_one_pixel() {
        let mut c = canvas(4, 4);
        c.line(2, 2, 2, 2, Color::WHITE);
        assert_eq!(lit(&c), vec![(2, 2)]);
    }

    #[test]
    fn diagonal_line_hits_every_step() {
        let mut c = canvas(6, 6);
        c.line(0, 0, 4, 4, Color::WHITE);
        assert_eq!(lit(&c), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn rect_zero_size_is_noop() {
        let mut c = canvas(4, 4);
        c.rect(1, 1, 0, 3, Color::WHITE);
        c.rect(1, 1, 3, -1, Color::WHITE);
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn rect_width_one_covers_exactly_height_pixels() {
        let mut c = canvas(4, 8);
        c.rect(1, 2, 1, 3, Color::WHITE);
        assert_eq!(lit(&c), vec![(1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn rect_outline_corners_blend_once() {
        // A 50%-alpha outline must not double-composite corner pixels.
        let mut c = canvas(6, 6);
        let translucent = Color::rgba(255, 255, 255, 128);
        c.rect(1, 1, 4, 4, translucent);
        let corner = c.pixel(1, 1);
        let edge = c.pixel(2, 1);
        assert_eq!(corner, edge);
    }

    #[test]
    fn rect_outline_is_hollow() {
        let mut c = canvas(8, 8);
        c.rect(1, 1, 5, 5, Color::WHITE);
        assert_ne!(c.get(1, 1), 0);
        assert_ne!(c.get(5, 5), 0);
        assert_ne!(c.get(3, 1), 0);
        assert_ne!(c.get(1, 3), 0);
        assert_eq!(c.get(3, 3), 0);
    }

    #[test]
    fn filled_then_outlined_rect_scenario() {
        // 10x10 blank, fill-rect then outline at (2,2,5,5): bordered box.
        let mut c = canvas(10, 10);
        c.fill_rect(2, 2, 5, 5, RED);
        c.rect(2, 2, 5, 5, BLUE);
        assert_eq!(c.pixel(2, 2), BLUE, "outline corner");
        assert_eq!(c.pixel(4, 4), RED, "interior");
        assert_eq!(c.get(0, 0), 0x00000000, "untouched");
    }

    #[test]
    fn fill_rect_fills_interior_only() {
        let mut c = canvas(8, 8);
        c.fill_rect(1, 1, 5, 5, Color::WHITE);
        // Outline band (x==1, x==5, y==1, y==5) untouched.
        for i in 1..6 {
            assert_eq!(c.get(i, 1), 0);
            assert_eq!(c.get(i, 5), 0);
            assert_eq!(c.get(1, i), 0);
            assert_eq!(c.get(5, i), 0);
        }
        for y in 2..5 {
            for x in 2..5 {
                assert_ne!(c.get(x, y), 0);
            }
        }
    }

    #[test]
    fn fill_rect_two_pixel_rect_is_noop() {
        // Inset by one per side leaves nothing to fill.
        let mut c = canvas(4, 4);
        c.fill_rect(0, 0, 2, 2, Color::WHITE);
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn fill_rect_blends_with_alpha() {
        let mut c = canvas(6, 6);
        c.fill(0, 0, 6, 6, Color::rgb(0, 0, 0));
        c.fill_rect(0, 0, 6, 6, Color::rgba(255, 255, 255, 128));
        let inner = c.pixel(2, 2);
        assert_eq!(inner.r, 64); // (255-0) * 129^2 >> 16
    }

    #[test]
    fn clip_containment_property() {
        // Identical draws against a full clip and a tight sub-rect clip:
        // equal inside the sub-rect, untouched outside it.
        let draws = |c: &mut Canvas| {
            c.line(-3, 2, 25, 13, RED);
            c.rect(1, 1, 12, 9, BLUE);
            c.fill_rect(4, 3, 9, 8, Color::rgba(0, 255, 0, 180));
            c.circle(8, 8, 6, Color::WHITE);
            c.fill_circle(12, 5, 4, Color::rgba(255, 0, 255, 90));
        };

        let mut full = canvas(20, 16);
        draws(&mut full);

        let (sx, sy, sw, sh) = (5, 4, 7, 6);
        let mut tight = canvas(20, 16);
        tight.set_clip(sx, sy, sw, sh);
        draws(&mut tight);

        for y in 0..16 {
            for x in 0..20 {
                let inside = x >= sx && x < sx + sw && y >= sy && y < sy + sh;
                if inside {
                    assert_eq!(tight.get(x, y), full.get(x, y), "inside ({x},{y})");
                } else {
                    assert_eq!(tight.get(x, y), 0, "outside ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn fill_circle_radius_zero_is_noop() {
        let mut c = canvas(5, 5);
        c.fill_circle(2, 2, 0, Color::WHITE);
        c.fill_circle(2, 2, -3, Color::WHITE);
        assert!(lit(&c).is_empty());
    }

    #[test]
    fn fill_circle_is_symmetric_across_centerlines() {
        let mut c = canvas(21, 21);
        c.fill_circle(10, 10, 5, Color::WHITE);
        for y in 0..21 {
            for x in 0..21 {
                let v = c.get(x, y) != 0;
                assert_eq!(v, c.get(20 - x, y) != 0, "h mirror ({x},{y})");
                assert_eq!(v, c.get(x, 20 - y) != 0, "v mirror ({x},{y})");
            }
        }
        assert_ne!(c.get(10, 10), 0);
    }

    #[test]
    fn fill_circle_blends_each_pixel_once() {
        // Overlapping spans would double-blend under partial alpha.
        let mut c = canvas(21, 21);
        c.fill_circle(10, 10, 5, Color::rgba(255, 255, 255, 128));
        let expected = {
            let mut probe = canvas(1, 1);
            probe.blend_pixel(0, 0, Color::rgba(255, 255, 255, 128));
            probe.pixel(0, 0)
        };
        for y in 0..21 {
            for x in 0..21 {
                let p = c.pixel(x, y);
                assert!(
                    p == Color::TRANSPARENT || p == expected,
                    "pixel ({x},{y}) blended more than once: {p:?}"
                );
            }
        }
    }

    #[test]
    fn circle_outline_is_symmetric() {
        let mut c = canvas(21, 21);
        c.circle(10, 10, 7, Color::WHITE);
        for y in 0..21 {
            for x in 0..21 {
                let v = c.get(x, y) != 0;
                assert_eq!(v, c.get(20 - x, y) != 0);
                assert_eq!(v, c.get(x, 20 - y) != 0);
            }
        }
        // Cardinal points present.
        assert_ne!(c.get(10, 3), 0);
        assert_ne!(c.get(10, 17), 0);
        assert_ne!(c.get(3, 10), 0);
        assert_ne!(c.get(17, 10), 0);
    }

    #[test]
    fn circle_outline_blends_each_pixel_once() {
        let mut c = canvas(31, 31);
        c.circle(15, 15, 9, Color::rgba(255, 255, 255, 100));
        let expected = {
            let mut probe = canvas(1, 1);
            probe.blend_pixel(0, 0, Color::rgba(255, 255, 255, 100));
            probe.pixel(0, 0)
        };
        for y in 0..31 {
            for x in 0..31 {
                let p = c.pixel(x, y);
                assert!(
                    p == Color::TRANSPARENT || p == expected,
                    "octant mirror double-plotted ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn primitives_clip_silently_off_canvas() {
        let mut c = canvas(4, 4);
        c.line(-10, -10, -5, -5, Color::WHITE);
        c.rect(100, 100, 5, 5, Color::WHITE);
        c.fill_rect(-20, -20, 10, 10, Color::WHITE);
        c.circle(-50, -50, 10, Color::WHITE);
        c.fill_circle(50, 50, 10, Color::WHITE);
        assert!(lit(&c).is_empty());
    }
}
