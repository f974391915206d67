//! Core types for the rasterizer

use serde::{Serialize, Deserialize};

/// A framebuffer pixel.
///
/// Laid out blue, green, red, reserved so a buffer of these can be handed
/// straight to a BGRA blit.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { b: 0, g: 0, r: 0, a: 0 };
    pub const WHITE: Pixel = Pixel { b: 255, g: 255, r: 255, a: 0 };
    pub const RED: Pixel = Pixel { b: 0, g: 0, r: 255, a: 0 };
    pub const GREEN: Pixel = Pixel { b: 0, g: 255, r: 0, a: 0 };
    pub const BLUE: Pixel = Pixel { b: 255, g: 0, r: 0, a: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r, a: 0 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Build from RGB floats in [0,1] scaled by `brightness`, rounded to nearest
    pub fn from_rgb_f32(rgb: [f32; 3], brightness: f32) -> Self {
        let channel = |c: f32| (c * brightness * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
    }

    /// Memory order: [b, g, r, a]
    pub fn to_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self { b: bytes[0], g: bytes[1], r: bytes[2], a: bytes[3] }
    }
}

/// Per-point bounds checking for the line and triangle rasterizers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsCheck {
    /// Caller guarantees every point lies inside the buffer
    #[default]
    Unchecked,
    /// Points outside the buffer are dropped
    CheckAllPoints,
}

impl BoundsCheck {
    pub fn from_flag(checked: bool) -> Self {
        if checked {
            BoundsCheck::CheckAllPoints
        } else {
            BoundsCheck::Unchecked
        }
    }

    pub fn is_checked(self) -> bool {
        self == BoundsCheck::CheckAllPoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_byte_order_is_bgra() {
        let p = Pixel::with_alpha(10, 20, 30, 40);
        assert_eq!(p.to_bytes(), [30, 20, 10, 40]);
        assert_eq!(Pixel::from_bytes(p.to_bytes()), p);
        assert_eq!(std::mem::size_of::<Pixel>(), 4);
    }

    #[test]
    fn test_from_rgb_f32_rounds_and_clamps() {
        let p = Pixel::from_rgb_f32([0.0, 1.0, 0.5], 1.0);
        assert_eq!((p.r, p.g, p.b), (0, 255, 128));

        let dim = Pixel::from_rgb_f32([0.0, 1.0, 0.0], 0.5);
        assert_eq!(dim.g, 128);

        let over = Pixel::from_rgb_f32([2.0, -1.0, 0.0], 1.0);
        assert_eq!((over.r, over.g), (255, 0));
    }
}
