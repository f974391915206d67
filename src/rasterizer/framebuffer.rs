//! Pixel buffer the whole pipeline draws into

use std::path::Path;
use super::types::Pixel;

const BYTES_PER_PIXEL: usize = 4;

/// Error type for buffer creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// width*height overflowed or the allocation was refused
    Allocation { width: usize, height: usize },
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::Allocation { width, height } => {
                write!(f, "Cannot allocate {}x{} pixel buffer", width, height)
            }
        }
    }
}

impl std::error::Error for RasterError {}

/// Framebuffer for software rendering.
///
/// Row-major, origin top-left, 4 bytes per pixel in BGRA order.
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, fill: Pixel) -> Result<Self, RasterError> {
        let err = RasterError::Allocation { width, height };
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| err.clone())?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| err)?;
        pixels.resize(len, 0);

        let mut fb = Self { pixels, width, height };
        fb.clear(fill);
        log::debug!("Pixel buffer initialized ({}x{}, {} bytes)", width, height, len);
        Ok(fb)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size_in_bytes(&self) -> usize {
        self.pixels.len()
    }

    /// Raw BGRA bytes for a blit
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Pixel) {
        let bytes = color.to_bytes();
        for chunk in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&bytes);
        }
    }

    /// Bounds-checked write; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Pixel) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.set_pixel_unchecked(x as usize, y as usize, color);
        }
    }

    /// Hot-path write with no per-axis check.
    ///
    /// An `x` past the end of a row lands in the next row; an index past the
    /// end of the buffer panics.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: usize, y: usize, color: Pixel) {
        let idx = (y * self.width + x) * BYTES_PER_PIXEL;
        self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        let idx = (y as usize * self.width + x as usize) * BYTES_PER_PIXEL;
        let mut bytes = [0u8; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&self.pixels[idx..idx + BYTES_PER_PIXEL]);
        Some(Pixel::from_bytes(bytes))
    }

    /// Copy out as RGBA with opaque alpha (macroquad textures, PNG export)
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len());
        for px in self.pixels.chunks_exact(BYTES_PER_PIXEL) {
            out.extend_from_slice(&[px[2], px[1], px[0], 255]);
        }
        out
    }

    /// Save the current contents as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgba_bytes(),
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
        )?;
        log::info!("Saved {}x{} screenshot to {}", self.width, self.height, path.display());
        Ok(())
    }
}
