//! Render context and demo scenes
//!
//! All per-frame state lives in [`RenderContext`]; the host loop owns it and
//! feeds it elapsed time.

use serde::{Serialize, Deserialize};
use crate::config::RenderConfig;
use crate::rasterizer::{
    draw_line, draw_mesh, ndc_to_screen, BoundsCheck, DrawStats, Mesh, MeshTransform,
    PixelBuffer, Projection, RasterError, Vec3,
};

/// The available demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scene {
    LineSweep = 0,
    PointProjection = 1,
    #[default]
    SpinningMesh = 2,
}

impl Scene {
    pub const ALL: [Scene; 3] = [
        Scene::LineSweep,
        Scene::PointProjection,
        Scene::SpinningMesh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Scene::LineSweep => "Line Sweep",
            Scene::PointProjection => "Point Projection",
            Scene::SpinningMesh => "Spinning Mesh",
        }
    }

    pub fn from_index(i: usize) -> Option<Scene> {
        Scene::ALL.get(i).copied()
    }

    pub fn next(self) -> Scene {
        Scene::ALL[(self as usize + 1) % Scene::ALL.len()]
    }
}

/// A line whose endpoints slide along the top and bottom edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSweep {
    pub x0: f32,
    pub x1: f32,
    /// Pixels per millisecond, sign is direction
    pub speed_x0: f32,
    pub speed_x1: f32,
}

impl LineSweep {
    pub fn new(width: usize, speed: f32) -> Self {
        Self {
            x0: 0.0,
            x1: width as f32,
            speed_x0: speed,
            speed_x1: -speed,
        }
    }

    /// Move both endpoints, bouncing off [0, width]
    pub fn advance(&mut self, delta_ms: f32, width: usize) {
        let max = width as f32;
        Self::step(&mut self.x0, &mut self.speed_x0, delta_ms, max);
        Self::step(&mut self.x1, &mut self.speed_x1, delta_ms, max);
    }

    fn step(x: &mut f32, speed: &mut f32, delta_ms: f32, max: f32) {
        *x += *speed * delta_ms;
        if *x > max {
            *x = max;
            *speed = -*speed;
        }
        if *x < 0.0 {
            *x = 0.0;
            *speed = -*speed;
        }
    }
}

/// Owns the frame target and all animation state
pub struct RenderContext {
    pub fb: PixelBuffer,
    pub config: RenderConfig,
    pub scene: Scene,
    pub mesh: Mesh,
    /// Accumulated rotation in radians
    pub rotation: f32,
    pub line: LineSweep,
    /// Stats of the last mesh draw
    pub last_stats: DrawStats,
}

impl RenderContext {
    pub fn new(config: RenderConfig) -> Result<Self, RasterError> {
        let fb = PixelBuffer::new(config.width, config.height, config.clear_pixel())?;
        log::info!(
            "Frame-buffer initialized (resolution: {}x{}, size: {} bytes)",
            fb.width(),
            fb.height(),
            fb.size_in_bytes()
        );
        let line = LineSweep::new(config.width, config.line_speed);
        Ok(Self {
            fb,
            scene: config.scene,
            config,
            mesh: Mesh::unit_cube(),
            rotation: 0.0,
            line,
            last_stats: DrawStats::default(),
        })
    }

    pub fn set_scene(&mut self, scene: Scene) {
        if scene != self.scene {
            log::info!("Scene: {}", scene.label());
            self.scene = scene;
        }
    }

    /// Advance animation by the elapsed frame time
    pub fn advance(&mut self, delta_ms: f32) {
        self.rotation += self.config.rotation_speed * delta_ms;
        self.line.advance(delta_ms, self.fb.width());
    }

    /// Clear and draw the current scene
    pub fn render(&mut self) {
        self.fb.clear(self.config.clear_pixel());
        match self.scene {
            Scene::LineSweep => self.render_line_sweep(),
            Scene::PointProjection => self.render_point_projection(),
            Scene::SpinningMesh => self.render_spinning_mesh(),
        }
    }

    fn render_line_sweep(&mut self) {
        let bottom = self.fb.height() as i32;
        self.config.line_algorithm.draw(
            &mut self.fb,
            self.line.x0.round() as i32,
            0,
            self.line.x1.round() as i32,
            bottom,
            self.config.base_pixel(),
            BoundsCheck::CheckAllPoints,
        );
    }

    /// Project the cube's vertices one by one and connect them with lines.
    /// Only the first two edges of each triangle, so quad diagonals stay hidden.
    fn render_point_projection(&mut self) {
        let (width, height) = (self.fb.width(), self.fb.height());
        let aspect_ratio = width as f32 / height as f32;
        let color = self.config.base_pixel();
        let projection = self.config.projection;

        for tri in self.mesh.indices.chunks_exact(3) {
            for j in 0..2 {
                let (Some(&a), Some(&b)) = (
                    self.mesh.vertices.get(tri[j]),
                    self.mesh.vertices.get(tri[(j + 1) % 3]),
                ) else {
                    continue;
                };

                let (a, b) = (a + self.config.position, b + self.config.position);
                if let Projection::Perspective { near, .. } = projection {
                    if a.z > -near || b.z > -near {
                        continue;
                    }
                }

                let pa = projection.project(a, aspect_ratio);
                let pb = projection.project(b, aspect_ratio);
                if !pa.is_finite() || !pb.is_finite() {
                    continue;
                }

                let sa = ndc_to_screen(pa.xy(), width, height);
                let sb = ndc_to_screen(pb.xy(), width, height);
                if !sa.within_guard_band() || !sb.within_guard_band() {
                    continue;
                }
                draw_line(&mut self.fb, sa.x, sa.y, sb.x, sb.y, color, BoundsCheck::CheckAllPoints);
            }
        }
    }

    fn render_spinning_mesh(&mut self) {
        let transform = MeshTransform::new(
            self.config.position,
            Vec3::new(self.rotation, self.rotation, 0.0),
        );
        self.last_stats = draw_mesh(&mut self.fb, &self.mesh, &transform, &self.config.mesh_settings());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{LineAlgorithm, Pixel};

    fn small_config(scene: Scene) -> RenderConfig {
        RenderConfig {
            width: 160,
            height: 120,
            scene,
            ..RenderConfig::default()
        }
    }

    fn lit_count(fb: &PixelBuffer) -> usize {
        fb.as_bytes().chunks_exact(4).filter(|px| px.iter().any(|&b| b != 0)).count()
    }

    #[test]
    fn test_scene_cycle() {
        assert_eq!(Scene::LineSweep.next(), Scene::PointProjection);
        assert_eq!(Scene::SpinningMesh.next(), Scene::LineSweep);
        assert_eq!(Scene::from_index(1), Some(Scene::PointProjection));
        assert_eq!(Scene::from_index(3), None);
    }

    #[test]
    fn test_line_sweep_bounces() {
        let mut line = LineSweep::new(100, 1.0);
        line.advance(30.0, 100);
        assert_eq!((line.x0, line.x1), (30.0, 70.0));

        line.advance(200.0, 100);
        assert_eq!((line.x0, line.x1), (100.0, 0.0));
        assert!(line.speed_x0 < 0.0 && line.speed_x1 > 0.0);

        line.advance(10.0, 100);
        assert_eq!((line.x0, line.x1), (90.0, 10.0));
    }

    #[test]
    fn test_every_scene_draws_something() {
        for scene in Scene::ALL {
            let mut ctx = RenderContext::new(small_config(scene)).unwrap();
            ctx.advance(16.0);
            ctx.render();
            assert!(lit_count(&ctx.fb) > 0, "{} drew nothing", scene.label());
        }
    }

    #[test]
    fn test_line_sweep_reaches_bottom_edge_safely() {
        // The line ends one row past the buffer; checked drawing drops that point
        let mut ctx = RenderContext::new(small_config(Scene::LineSweep)).unwrap();
        ctx.render();
        assert_eq!(ctx.fb.get_pixel(0, 0), Some(Pixel::GREEN));
        assert_eq!(ctx.fb.get_pixel(159, 119), Some(Pixel::GREEN));
    }

    #[test]
    fn test_line_sweep_with_either_algorithm() {
        for algo in [LineAlgorithm::Slow, LineAlgorithm::Bresenham] {
            let config = RenderConfig { line_algorithm: algo, ..small_config(Scene::LineSweep) };
            let mut ctx = RenderContext::new(config).unwrap();
            ctx.render();
            // One pixel per column; the end point past the corner is dropped
            assert_eq!(lit_count(&ctx.fb), 160, "{:?}", algo);
            assert_eq!(ctx.fb.get_pixel(0, 0), Some(Pixel::GREEN));
            assert_eq!(ctx.fb.get_pixel(159, 119), Some(Pixel::GREEN));
        }
    }

    #[test]
    fn test_point_projection_skips_points_at_the_camera() {
        // Front face of the cube sits just in front of z = 0
        for z in [-1.0005, -1.0, -0.5] {
            let config = RenderConfig {
                position: Vec3::new(0.0, 0.0, z),
                ..small_config(Scene::PointProjection)
            };
            let mut ctx = RenderContext::new(config).unwrap();
            ctx.render();
            assert!(lit_count(&ctx.fb) > 0, "z = {}", z);
        }
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut ctx = RenderContext::new(small_config(Scene::SpinningMesh)).unwrap();
        ctx.render();
        let first = lit_count(&ctx.fb);
        ctx.render();
        assert_eq!(lit_count(&ctx.fb), first);
    }

    #[test]
    fn test_spinning_mesh_rotation_accumulates() {
        let mut ctx = RenderContext::new(small_config(Scene::SpinningMesh)).unwrap();
        ctx.advance(1000.0);
        assert!((ctx.rotation - 0.5).abs() < 0.0001);
        ctx.render();
        assert_eq!(ctx.last_stats.skipped, 0);
        assert_eq!(ctx.last_stats.drawn + ctx.last_stats.culled, 12);
    }

    #[test]
    fn test_allocation_failure_surfaces() {
        let config = RenderConfig { width: usize::MAX, height: 4, ..RenderConfig::default() };
        assert!(RenderContext::new(config).is_err());
    }
}
