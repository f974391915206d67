//! Projection math: camera space → NDC → pixels
//!
//! Camera looks down -Z, right-handed. NDC is the [-1,1]^3 cube with +Y up;
//! screen space has its origin top-left with Y growing downward.

use serde::{Serialize, Deserialize};
use super::math::{Vec2, Vec2i, Vec3};

/// Perspective projection into NDC.
///
/// The divide is by `-point.z`, so geometry has to sit in front of the camera
/// (negative Z). A point at `z == 0` yields non-finite components rather than
/// a panic; callers reject those.
pub fn project_perspective(point: Vec3, fov_degrees: f32, near: f32, far: f32, aspect_ratio: f32) -> Vec3 {
    let tan_half_fov = (fov_degrees.to_radians() / 2.0).tan();

    let x = point.x / (aspect_ratio * tan_half_fov);
    let y = point.y / tan_half_fov;
    let z = point.z * (far + near) / (near - far) + (2.0 * far * near) / (near - far);

    let w = -point.z;
    Vec3::new(x / w, y / w, z / w)
}

/// Orthogonal projection into NDC.
///
/// Left/right are widened by the aspect ratio so a square stays square on a
/// non-square target. `z = -near` maps to -1 and `z = -far` to 1.
pub fn project_orthogonal(
    point: Vec3,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
) -> Vec3 {
    let left = left * aspect_ratio;
    let right = right * aspect_ratio;

    Vec3 {
        x: 2.0 * (point.x - left) / (right - left) - 1.0,
        y: 2.0 * (point.y - bottom) / (top - bottom) - 1.0,
        z: 2.0 * (-point.z - near) / (far - near) - 1.0,
    }
}

/// Map NDC to a pixel position, rounding to nearest.
///
/// `x = 1` lands on column `width`, one past the last column; bounds checking
/// belongs to the rasterizer. Non-finite input saturates (`as` casts).
pub fn ndc_to_screen(ndc: Vec2, width: usize, height: usize) -> Vec2i {
    let x = (ndc.x + 1.0) / 2.0 * width as f32;
    let y = (1.0 - ndc.y) / 2.0 * height as f32;
    Vec2i::new(x.round() as i32, y.round() as i32)
}

/// Inverse of [`ndc_to_screen`]
pub fn screen_to_ndc(p: Vec2i, width: usize, height: usize) -> Vec2 {
    Vec2 {
        x: p.x as f32 / width as f32 * 2.0 - 1.0,
        y: 1.0 - p.y as f32 / height as f32 * 2.0,
    }
}

pub fn rotate_around_x(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3 {
        x: p.x,
        y: p.y * c - p.z * s,
        z: p.y * s + p.z * c,
    }
}

pub fn rotate_around_y(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3 {
        x: p.x * c + p.z * s,
        y: p.y,
        z: -p.x * s + p.z * c,
    }
}

pub fn rotate_around_z(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3 {
        x: p.x * c - p.y * s,
        y: p.x * s + p.y * c,
        z: p.z,
    }
}

/// Which projection the mesh drawer applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    Perspective {
        fov_degrees: f32,
        near: f32,
        far: f32,
    },
    Orthogonal {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// 90° FOV, near 0.1, far 100
    pub const DEFAULT_PERSPECTIVE: Projection = Projection::Perspective {
        fov_degrees: 90.0,
        near: 0.1,
        far: 100.0,
    };

    /// [-2,2] box, near 0.1, far 100
    pub const DEFAULT_ORTHOGONAL: Projection = Projection::Orthogonal {
        left: -2.0,
        right: 2.0,
        bottom: -2.0,
        top: 2.0,
        near: 0.1,
        far: 100.0,
    };

    pub fn project(&self, point: Vec3, aspect_ratio: f32) -> Vec3 {
        match *self {
            Projection::Perspective { fov_degrees, near, far } => {
                project_perspective(point, fov_degrees, near, far, aspect_ratio)
            }
            Projection::Orthogonal { left, right, bottom, top, near, far } => {
                project_orthogonal(point, left, right, bottom, top, near, far, aspect_ratio)
            }
        }
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self, Projection::Perspective { .. })
    }

    /// The other projection kind, with default parameters
    pub fn toggled(&self) -> Projection {
        if self.is_perspective() {
            Projection::DEFAULT_ORTHOGONAL
        } else {
            Projection::DEFAULT_PERSPECTIVE
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Projection::Perspective { .. } => "Perspective",
            Projection::Orthogonal { .. } => "Orthogonal",
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::DEFAULT_PERSPECTIVE
    }
}
