//! Render configuration loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable settings files.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::app::Scene;
use crate::rasterizer::{
    BoundsCheck, LineAlgorithm, MeshSettings, Pixel, Projection, Vec3, HEIGHT, WIDTH,
};

/// Largest buffer side the host can upload as a texture
pub const MAX_PRESENT_SIZE: usize = u16::MAX as usize;

/// Everything the host loop feeds into the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// RGB in [0,1]
    pub clear_color: [f32; 3],
    /// RGB in [0,1]
    pub base_color: [f32; 3],
    pub projection: Projection,
    pub backface_cull: bool,
    pub fill: bool,
    pub bounds_check: bool,
    /// Mesh position in camera space
    pub position: Vec3,
    /// Radians per millisecond
    pub rotation_speed: f32,
    /// Pixels per millisecond for the line sweep endpoints
    pub line_speed: f32,
    pub line_algorithm: LineAlgorithm,
    pub scene: Scene,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            clear_color: [0.0, 0.0, 0.0],
            base_color: [0.0, 1.0, 0.0],
            projection: Projection::DEFAULT_PERSPECTIVE,
            backface_cull: true,
            fill: true,
            bounds_check: true,
            position: Vec3::new(0.0, 0.0, -4.0),
            rotation_speed: 0.0005,
            line_speed: 0.2,
            line_algorithm: LineAlgorithm::Slow,
            scene: Scene::SpinningMesh,
        }
    }
}

impl RenderConfig {
    pub fn mesh_settings(&self) -> MeshSettings {
        MeshSettings {
            projection: self.projection,
            color: self.base_color,
            backface_cull: self.backface_cull,
            fill: self.fill,
            bounds: BoundsCheck::from_flag(self.bounds_check),
        }
    }

    pub fn clear_pixel(&self) -> Pixel {
        Pixel::from_rgb_f32(self.clear_color, 1.0)
    }

    pub fn base_pixel(&self) -> Pixel {
        Pixel::from_rgb_f32(self.base_color, 1.0)
    }

    /// Reject buffer sizes the host cannot show: empty, or wider/taller than
    /// a texture side
    pub fn check_presentable(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 || width > MAX_PRESENT_SIZE || height > MAX_PRESENT_SIZE {
            return Err(ConfigError::InvalidSize { width, height });
        }
        Ok(())
    }
}

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    InvalidSize { width: usize, height: usize },
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::InvalidSize { width, height } => {
                write!(f, "Cannot present a {}x{} buffer", width, height)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<RenderConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

/// Load a config, falling back to defaults when the file is missing or broken
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> RenderConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => config,
        Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("No config at {}, using defaults", path.display());
            RenderConfig::default()
        }
        Err(e) => {
            log::error!("Failed to load {}: {}, using defaults", path.display(), e);
            RenderConfig::default()
        }
    }
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &RenderConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path.as_ref(), contents)?;
    log::info!("Saved config to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = load_config_from_str("(fill: false, scene: LineSweep)").unwrap();
        assert!(!config.fill);
        assert_eq!(config.scene, Scene::LineSweep);
        assert_eq!(config.width, WIDTH);
        assert!(config.backface_cull);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = load_config_from_str(include_str!("../softrast.ron")).unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_orthogonal_projection_parses() {
        let config = load_config_from_str(
            "(projection: Orthogonal(left: -3.0, right: 3.0, bottom: -3.0, top: 3.0, near: 0.1, far: 50.0))",
        )
        .unwrap();
        assert!(matches!(config.projection, Projection::Orthogonal { right, .. } if right == 3.0));
    }

    #[test]
    fn test_bad_config_is_parse_error() {
        let err = load_config_from_str("(fill: maybe)").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("softrast.ron");

        let config = RenderConfig {
            width: 320,
            height: 240,
            base_color: [1.0, 0.5, 0.0],
            projection: Projection::DEFAULT_ORTHOGONAL,
            scene: Scene::PointProjection,
            ..RenderConfig::default()
        };
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_or_default(dir.path().join("nope.ron"));
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_presentable_sizes() {
        assert!(RenderConfig::default().check_presentable().is_ok());
        assert!(RenderConfig { width: 1, height: 1, ..RenderConfig::default() }.check_presentable().is_ok());

        for (width, height) in [(0, 600), (800, 0), (0, 0), (MAX_PRESENT_SIZE + 1, 600)] {
            let config = RenderConfig { width, height, ..RenderConfig::default() };
            let err = config.check_presentable().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSize { width: w, height: h } if w == width && h == height));
        }
    }

    #[test]
    fn test_line_algorithm_parses() {
        let config = load_config_from_str("(scene: LineSweep, line_algorithm: Bresenham)").unwrap();
        assert_eq!(config.line_algorithm, LineAlgorithm::Bresenham);
    }

    #[test]
    fn test_mesh_settings_from_config() {
        let config = RenderConfig { bounds_check: false, ..RenderConfig::default() };
        let settings = config.mesh_settings();
        assert_eq!(settings.bounds, BoundsCheck::Unchecked);
        assert_eq!(settings.color, [0.0, 1.0, 0.0]);
        assert_eq!(config.base_pixel(), Pixel::GREEN);
    }
}
