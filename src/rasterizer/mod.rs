//! CPU software rasterizer
//!
//! Features:
//! - Bresenham and slope-based line drawing
//! - Perspective and orthogonal projection, NDC to screen mapping
//! - Filled or outlined triangles with optional bounds checking
//! - Backface culling and flat shading, painter's order (no depth buffer)

mod math;
mod types;
mod framebuffer;
mod projection;
mod line;
mod triangle;
mod mesh;

pub use math::*;
pub use types::*;
pub use framebuffer::*;
pub use projection::*;
pub use line::*;
pub use triangle::*;
pub use mesh::*;

/// Default window/buffer size of the demos
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
