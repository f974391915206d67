//! softrast: a minimal CPU software rasterizer
//!
//! Turns 3D vertex/index geometry into pixels in an in-memory framebuffer:
//! line drawing, perspective/orthogonal projection, triangle fill with
//! backface culling and flat shading. No GPU involved; a host only needs to
//! blit [`rasterizer::PixelBuffer`] to the screen.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod config;
pub mod app;
