//! Line rasterization
//!
//! Both algorithms include both endpoints, so a zero-length line is a single
//! pixel. Secondary-axis positions round to nearest.
//!
//! Deltas are computed in i64, so any pair of i32 endpoints is safe to step.
//! In checked mode a line with an endpoint outside the screen guard band is dropped
//! rather than walked for billions of off-screen steps.

use serde::{Serialize, Deserialize};
use super::framebuffer::PixelBuffer;
use super::math::Vec2i;
use super::types::{BoundsCheck, Pixel};

#[inline]
fn plot(fb: &mut PixelBuffer, x: i64, y: i64, color: Pixel, bounds: BoundsCheck) {
    // Every stepped position lies between the two i32 endpoints
    match bounds {
        BoundsCheck::CheckAllPoints => fb.set_pixel(x as i32, y as i32, color),
        BoundsCheck::Unchecked => fb.set_pixel_unchecked(x as usize, y as usize, color),
    }
}

fn outside_guard_band(x0: i32, y0: i32, x1: i32, y1: i32, bounds: BoundsCheck) -> bool {
    bounds.is_checked()
        && !(Vec2i::new(x0, y0).within_guard_band() && Vec2i::new(x1, y1).within_guard_band())
}

/// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm.
///
/// Integer arithmetic only. The major axis advances every step; the minor
/// axis advances when the error term goes positive.
pub fn draw_line(
    fb: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Pixel,
    bounds: BoundsCheck,
) {
    if outside_guard_band(x0, y0, x1, y1, bounds) {
        return;
    }

    let dx = (x1 as i64 - x0 as i64).abs();
    let dy = (y1 as i64 - y0 as i64).abs();
    let sx = if x1 >= x0 { 1 } else { -1 };
    let sy = if y1 >= y0 { 1 } else { -1 };

    let mut x = x0 as i64;
    let mut y = y0 as i64;

    if dx >= dy {
        let mut err = 2 * dy - dx;
        for _ in 0..=dx {
            plot(fb, x, y, color, bounds);
            if err > 0 {
                y += sy;
                err -= 2 * dx;
            }
            err += 2 * dy;
            x += sx;
        }
    } else {
        let mut err = 2 * dx - dy;
        for _ in 0..=dy {
            plot(fb, x, y, color, bounds);
            if err > 0 {
                x += sx;
                err -= 2 * dy;
            }
            err += 2 * dx;
            y += sy;
        }
    }
}

/// Draw a line by stepping the major axis and deriving the minor one from
/// the slope in floating point.
pub fn draw_line_slow(
    fb: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Pixel,
    bounds: BoundsCheck,
) {
    if outside_guard_band(x0, y0, x1, y1, bounds) {
        return;
    }

    let (x0, y0) = (x0 as i64, y0 as i64);
    let delta_x = x1 as i64 - x0;
    let delta_y = y1 as i64 - y0;

    if delta_x == 0 && delta_y == 0 {
        plot(fb, x0, y0, color, bounds);
        return;
    }

    if delta_x.abs() >= delta_y.abs() {
        let k = delta_y as f64 / delta_x as f64;
        let step = delta_x.signum();
        for n in 0..=delta_x.abs() {
            let i = n * step;
            let y = y0 + (i as f64 * k).round() as i64;
            plot(fb, x0 + i, y, color, bounds);
        }
    } else {
        let k = delta_x as f64 / delta_y as f64;
        let step = delta_y.signum();
        for n in 0..=delta_y.abs() {
            let i = n * step;
            let x = x0 + (i as f64 * k).round() as i64;
            plot(fb, x, y0 + i, color, bounds);
        }
    }
}

/// Which line algorithm to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineAlgorithm {
    Bresenham,
    #[default]
    Slow,
}

impl LineAlgorithm {
    pub fn draw(
        self,
        fb: &mut PixelBuffer,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Pixel,
        bounds: BoundsCheck,
    ) {
        match self {
            LineAlgorithm::Bresenham => draw_line(fb, x0, y0, x1, y1, color, bounds),
            LineAlgorithm::Slow => draw_line_slow(fb, x0, y0, x1, y1, color, bounds),
        }
    }

    pub fn toggled(self) -> LineAlgorithm {
        match self {
            LineAlgorithm::Bresenham => LineAlgorithm::Slow,
            LineAlgorithm::Slow => LineAlgorithm::Bresenham,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LineAlgorithm::Bresenham => "Bresenham",
            LineAlgorithm::Slow => "Slope",
        }
    }
}
