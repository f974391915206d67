//! Triangle rasterization (fill or outline)

use super::framebuffer::PixelBuffer;
use super::line::draw_line;
use super::math::Vec2i;
use super::types::{BoundsCheck, Pixel};

/// Twice the signed area of (a, b, p); positive when p is left of a→b in
/// y-down pixel space
#[inline]
fn edge(a: Vec2i, b: Vec2i, p: Vec2i) -> i64 {
    (b.x as i64 - a.x as i64) * (p.y as i64 - a.y as i64)
        - (b.y as i64 - a.y as i64) * (p.x as i64 - a.x as i64)
}

/// Twice the signed area of the triangle in pixel space
pub fn signed_area2(p0: Vec2i, p1: Vec2i, p2: Vec2i) -> i64 {
    edge(p0, p1, p2)
}

/// Draw a triangle from three screen-space points.
///
/// With `fill` the covered pixels are those whose integer position lies
/// inside or on the edges, for either winding. Zero-area triangles fill
/// nothing, and neither do triangles with a vertex outside the guard band.
/// Without `fill` the three edges are drawn with Bresenham.
pub fn draw_triangle(
    fb: &mut PixelBuffer,
    p0: Vec2i,
    p1: Vec2i,
    p2: Vec2i,
    color: Pixel,
    fill: bool,
    bounds: BoundsCheck,
) {
    if !fill {
        draw_line(fb, p0.x, p0.y, p1.x, p1.y, color, bounds);
        draw_line(fb, p1.x, p1.y, p2.x, p2.y, color, bounds);
        draw_line(fb, p2.x, p2.y, p0.x, p0.y, color, bounds);
        return;
    }

    // Keeps the edge function products well inside i64
    if !(p0.within_guard_band() && p1.within_guard_band() && p2.within_guard_band()) {
        return;
    }

    let area = signed_area2(p0, p1, p2);
    if area == 0 {
        return;
    }

    // Orient so every edge function is non-negative inside
    let (a, b, c) = if area > 0 { (p0, p1, p2) } else { (p0, p2, p1) };

    let mut min_x = a.x.min(b.x).min(c.x);
    let mut max_x = a.x.max(b.x).max(c.x);
    let mut min_y = a.y.min(b.y).min(c.y);
    let mut max_y = a.y.max(b.y).max(c.y);

    if bounds.is_checked() {
        min_x = min_x.max(0);
        min_y = min_y.max(0);
        max_x = max_x.min(fb.width() as i32 - 1);
        max_y = max_y.min(fb.height() as i32 - 1);
    }

    for y in min_y..=max_y {
        // Walk the scanline; coverage within a convex shape is one contiguous run
        let mut started = false;
        for x in min_x..=max_x {
            let p = Vec2i::new(x, y);
            let inside = edge(a, b, p) >= 0 && edge(b, c, p) >= 0 && edge(c, a, p) >= 0;
            if inside {
                started = true;
                fb.set_pixel_unchecked(x as usize, y as usize, color);
            } else if started {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Pixel = Pixel::BLACK;

    fn count_lit(fb: &PixelBuffer) -> usize {
        let mut n = 0;
        for y in 0..fb.height() as i32 {
            for x in 0..fb.width() as i32 {
                if fb.get_pixel(x, y) != Some(BG) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Exact point-in-closed-triangle test in f64
    fn inside_f(p: (f64, f64), t: [(f64, f64); 3]) -> f64 {
        let e = |a: (f64, f64), b: (f64, f64)| (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
        let (e0, e1, e2) = (e(t[0], t[1]), e(t[1], t[2]), e(t[2], t[0]));
        // Smallest edge value for the inside orientation, normalized to pixels
        let len = |a: (f64, f64), b: (f64, f64)| ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        let d = [e0 / len(t[0], t[1]), e1 / len(t[1], t[2]), e2 / len(t[2], t[0])];
        if e0 + e1 + e2 >= 0.0 {
            d.iter().cloned().fold(f64::MAX, f64::min)
        } else {
            d.iter().map(|v| -v).fold(f64::MAX, f64::min)
        }
    }

    #[test]
    fn test_fill_scenario_exact_coverage() {
        let mut fb = PixelBuffer::new(16, 16, BG).unwrap();
        let (a, b, c) = (Vec2i::new(0, 0), Vec2i::new(10, 0), Vec2i::new(5, 10));
        draw_triangle(&mut fb, a, b, c, Pixel::GREEN, true, BoundsCheck::Unchecked);

        let tri = [(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)];
        for y in 0..16 {
            for x in 0..16 {
                let d = inside_f((x as f64, y as f64), tri);
                let lit = fb.get_pixel(x, y) == Some(Pixel::GREEN);
                if d > 1.0 {
                    assert!(lit, "interior pixel ({}, {}) not covered", x, y);
                }
                if d < -1.0 {
                    assert!(!lit, "pixel ({}, {}) outside was covered", x, y);
                }
            }
        }
        assert!(fb.get_pixel(5, 5) == Some(Pixel::GREEN));
        assert!(fb.get_pixel(0, 0) == Some(Pixel::GREEN));
        assert!(fb.get_pixel(5, 10) == Some(Pixel::GREEN));
        assert!(fb.get_pixel(0, 10) == Some(BG));
    }

    #[test]
    fn test_fill_independent_of_winding() {
        let pts = [Vec2i::new(2, 1), Vec2i::new(13, 4), Vec2i::new(6, 12)];
        let mut cw = PixelBuffer::new(16, 16, BG).unwrap();
        let mut ccw = PixelBuffer::new(16, 16, BG).unwrap();
        draw_triangle(&mut cw, pts[0], pts[1], pts[2], Pixel::GREEN, true, BoundsCheck::Unchecked);
        draw_triangle(&mut ccw, pts[0], pts[2], pts[1], Pixel::GREEN, true, BoundsCheck::Unchecked);
        assert_eq!(cw.as_bytes(), ccw.as_bytes());
        assert!(count_lit(&cw) > 30);
    }

    #[test]
    fn test_degenerate_fill_draws_nothing() {
        let mut fb = PixelBuffer::new(16, 16, BG).unwrap();
        let p = Vec2i::new(3, 3);
        draw_triangle(&mut fb, p, p, p, Pixel::GREEN, true, BoundsCheck::Unchecked);
        draw_triangle(&mut fb, Vec2i::new(0, 0), Vec2i::new(5, 5), Vec2i::new(10, 10), Pixel::GREEN, true, BoundsCheck::Unchecked);
        assert_eq!(count_lit(&fb), 0);
    }

    #[test]
    fn test_degenerate_outline_is_a_line() {
        let mut fb = PixelBuffer::new(16, 16, BG).unwrap();
        draw_triangle(&mut fb, Vec2i::new(0, 0), Vec2i::new(5, 5), Vec2i::new(10, 10), Pixel::GREEN, false, BoundsCheck::Unchecked);
        assert_eq!(count_lit(&fb), 11);
    }

    #[test]
    fn test_outline_touches_only_edges() {
        let mut fb = PixelBuffer::new(16, 16, BG).unwrap();
        draw_triangle(&mut fb, Vec2i::new(0, 0), Vec2i::new(10, 0), Vec2i::new(5, 10), Pixel::GREEN, false, BoundsCheck::Unchecked);
        assert_eq!(fb.get_pixel(5, 5), Some(BG));
        assert_eq!(fb.get_pixel(5, 0), Some(Pixel::GREEN));
        assert_eq!(fb.get_pixel(5, 10), Some(Pixel::GREEN));
    }

    #[test]
    fn test_checked_fill_partially_off_screen() {
        let mut fb = PixelBuffer::new(8, 8, BG).unwrap();
        draw_triangle(&mut fb, Vec2i::new(-20, -20), Vec2i::new(30, -20), Vec2i::new(4, 40), Pixel::GREEN, true, BoundsCheck::CheckAllPoints);
        assert_eq!(fb.get_pixel(0, 0), Some(Pixel::GREEN));
        assert_eq!(fb.get_pixel(7, 7), Some(Pixel::GREEN));
    }

    #[test]
    fn test_checked_fill_entirely_off_screen() {
        let mut fb = PixelBuffer::new(8, 8, BG).unwrap();
        draw_triangle(&mut fb, Vec2i::new(100, 100), Vec2i::new(120, 100), Vec2i::new(110, 130), Pixel::GREEN, true, BoundsCheck::CheckAllPoints);
        draw_triangle(&mut fb, Vec2i::new(100, 100), Vec2i::new(120, 100), Vec2i::new(110, 130), Pixel::GREEN, false, BoundsCheck::CheckAllPoints);
        assert_eq!(count_lit(&fb), 0);
    }

    #[test]
    fn test_checked_saturated_vertices_do_not_overflow() {
        let mut fb = PixelBuffer::new(8, 8, BG).unwrap();
        let (a, b, c) = (Vec2i::new(i32::MIN, i32::MIN), Vec2i::new(i32::MAX, i32::MAX), Vec2i::new(i32::MAX, i32::MIN));
        draw_triangle(&mut fb, a, b, c, Pixel::GREEN, true, BoundsCheck::CheckAllPoints);
        draw_triangle(&mut fb, a, b, c, Pixel::GREEN, false, BoundsCheck::CheckAllPoints);
        assert_eq!(count_lit(&fb), 0);

        // Just inside the band still fills the visible part
        let g = crate::rasterizer::GUARD_BAND;
        draw_triangle(&mut fb, Vec2i::new(-g, -g), Vec2i::new(g, -g), Vec2i::new(0, g), Pixel::GREEN, true, BoundsCheck::CheckAllPoints);
        assert_eq!(count_lit(&fb), 64);
    }
}
