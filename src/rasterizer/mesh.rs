//! Mesh drawing: transform, project, cull, shade, rasterize

use super::framebuffer::PixelBuffer;
use super::math::{Vec2i, Vec3};
use super::projection::{ndc_to_screen, rotate_around_x, rotate_around_y, rotate_around_z, Projection};
use super::triangle::draw_triangle;
use super::types::{BoundsCheck, Pixel};

/// Indexed triangle list. Every three indices form one triangle; a trailing
/// incomplete triple is ignored.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<usize>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, indices: Vec<usize>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 2x2x2 cube centred on the origin, outward faces wound front-facing
    pub fn unit_cube() -> Self {
        let vertices = vec![
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
        ];

        let indices = vec![
            0, 1, 2, 2, 3, 0, // front
            1, 5, 6, 6, 2, 1, // right
            5, 4, 7, 7, 6, 5, // back
            4, 0, 3, 3, 7, 4, // left
            4, 5, 1, 1, 0, 4, // top
            3, 2, 6, 6, 7, 3, // bottom
        ];

        Self { vertices, indices }
    }
}

/// Placement of a mesh in camera space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshTransform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub orientation: Vec3,
}

impl MeshTransform {
    pub fn new(position: Vec3, orientation: Vec3) -> Self {
        Self { position, orientation }
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        let p = rotate_around_x(p, self.orientation.x);
        let p = rotate_around_y(p, self.orientation.y);
        let p = rotate_around_z(p, self.orientation.z);
        p + self.position
    }
}

/// Mesh drawer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshSettings {
    pub projection: Projection,
    /// Base color, RGB in [0,1]
    pub color: [f32; 3],
    pub backface_cull: bool,
    /// Fill faces (with flat shading) instead of outlining them
    pub fill: bool,
    pub bounds: BoundsCheck,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            projection: Projection::DEFAULT_PERSPECTIVE,
            color: [0.0, 1.0, 0.0],
            backface_cull: false,
            fill: false,
            bounds: BoundsCheck::CheckAllPoints,
        }
    }
}

/// What happened to the triangles of one draw call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    pub culled: usize,
    /// Bad indices, vertices behind the near plane, non-finite projections,
    /// screen positions outside the guard band
    pub skipped: usize,
}

/// Projected triangle, alive for one face
struct ProjectedFace {
    screen: [Vec2i; 3],
    camera: [Vec3; 3],
}

fn project_face(
    mesh: &Mesh,
    tri: &[usize],
    transform: &MeshTransform,
    projection: &Projection,
    width: usize,
    height: usize,
) -> Option<ProjectedFace> {
    let aspect_ratio = width as f32 / height as f32;
    let mut screen = [Vec2i::default(); 3];
    let mut camera = [Vec3::ZERO; 3];

    for (j, &index) in tri.iter().enumerate() {
        let p = transform.apply(*mesh.vertices.get(index)?);

        if let Projection::Perspective { near, .. } = *projection {
            if p.z > -near {
                return None;
            }
        }

        let ndc = projection.project(p, aspect_ratio);
        if !ndc.is_finite() {
            return None;
        }

        let s = ndc_to_screen(ndc.xy(), width, height);
        if !s.within_guard_band() {
            return None;
        }

        screen[j] = s;
        camera[j] = p;
    }

    Some(ProjectedFace { screen, camera })
}

/// Whether the screen-space winding faces the viewer.
///
/// The cross product is negated because screen Y points down.
pub fn is_front_facing(s0: Vec2i, s1: Vec2i, s2: Vec2i) -> bool {
    let normal = -(s2 - s0).to_vec3().normalize().cross((s1 - s0).to_vec3().normalize()).normalize();
    normal.dot(Vec3::VIEW) > 0.0
}

/// Flat-shading brightness with the light at the viewer
pub fn face_brightness(p0: Vec3, p1: Vec3, p2: Vec3) -> f32 {
    let normal = (p2 - p0).normalize().cross((p1 - p0).normalize()).normalize();
    normal.dot(Vec3::VIEW).max(0.0)
}

/// Render a mesh to the framebuffer, one triangle at a time in index order
pub fn draw_mesh(
    fb: &mut PixelBuffer,
    mesh: &Mesh,
    transform: &MeshTransform,
    settings: &MeshSettings,
) -> DrawStats {
    let mut stats = DrawStats::default();
    if fb.width() == 0 || fb.height() == 0 {
        return stats;
    }

    for tri in mesh.indices.chunks_exact(3) {
        let face = match project_face(mesh, tri, transform, &settings.projection, fb.width(), fb.height()) {
            Some(face) => face,
            None => {
                stats.skipped += 1;
                continue;
            }
        };

        let [s0, s1, s2] = face.screen;
        if settings.backface_cull && !is_front_facing(s0, s1, s2) {
            stats.culled += 1;
            continue;
        }

        let brightness = if settings.fill {
            let [p0, p1, p2] = face.camera;
            face_brightness(p0, p1, p2)
        } else {
            1.0
        };

        let color = Pixel::from_rgb_f32(settings.color, brightness);
        draw_triangle(fb, s0, s1, s2, color, settings.fill, settings.bounds);
        stats.drawn += 1;
    }

    stats
}
