//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`RIEMANN_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use riemann_core::shapes::SphereDivisions;
use riemann_core::{Color, SampleDomain, SceneLayers, SceneSettings};
use riemann_math::Vec3;

/// Main application configuration
///
/// Every section and every field has a default, so partial files and
/// single environment overrides are enough.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Sampling domain
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Scene geometry and colors
    #[serde(default)]
    pub scene: SceneConfig,
    /// Expression slots
    #[serde(default)]
    pub functions: FunctionsConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`RIEMANN_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // RIEMANN_SAMPLING__STEP=0.05 -> sampling.step = 0.05
        figment = figment.merge(Env::prefixed("RIEMANN_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Scene settings combining the sampling and scene sections
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            domain: self.sampling.domain(),
            sphere_color: Color::from_hex(self.scene.sphere_color),
            axis_color: Color::from_hex(self.scene.axis_color),
            sphere_divisions: SphereDivisions {
                longitudes: self.scene.sphere_longitudes,
                latitudes: self.scene.sphere_latitudes,
            },
            curve_z: self.scene.curve_z,
            ray_plane_z: self.scene.ray_plane_z,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Riemann Sphere".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position [x, y, z]
    pub eye: [f32; 3],
    /// Point the camera orbits [x, y, z]
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Closest dolly distance
    pub min_distance: f32,
    /// Farthest dolly distance
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [-8.0, 2.0, 8.0],
            target: [0.0, 0.0, 0.0],
            fov: 70.0,
            near: 1.0,
            far: 1000.0,
            min_distance: 1.5,
            max_distance: 200.0,
        }
    }
}

impl CameraConfig {
    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.eye)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Drag rotation multiplier (1.0 = one turn per viewport height)
    pub rotate_speed: f32,
    /// Pan multiplier
    pub pan_speed: f32,
    /// Wheel zoom multiplier
    pub zoom_speed: f32,
    /// Arrow-key rotation in radians per second
    pub key_rotate_speed: f32,
    /// Damping half-life in seconds (lower = more responsive)
    pub damping_half_life: f32,
    /// Enable damping by default
    pub damping_enabled: bool,
    /// Two clicks closer than this clear all slots
    pub double_click_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            key_rotate_speed: 1.5,
            damping_half_life: 0.05,
            damping_enabled: false,
            double_click_ms: 400,
        }
    }
}

/// Sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Functions are sampled over [-range, range]
    pub range: f64,
    /// Distance between samples
    pub step: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        let domain = SampleDomain::default();
        Self {
            range: domain.range,
            step: domain.step,
        }
    }
}

impl SamplingConfig {
    pub fn domain(&self) -> SampleDomain {
        SampleDomain::new(self.range, self.step)
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Wireframe sphere color (0xRRGGBB)
    pub sphere_color: u32,
    /// Axis color (0xRRGGBB)
    pub axis_color: u32,
    pub sphere_longitudes: u32,
    pub sphere_latitudes: u32,
    /// Height of the plane curves
    pub curve_z: f32,
    /// Height where projection rays leave the plane
    pub ray_plane_z: f32,
    /// Show curve images on the sphere at startup
    pub show_traces: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let settings = SceneSettings::default();
        Self {
            sphere_color: settings.sphere_color.to_hex(),
            axis_color: settings.axis_color.to_hex(),
            sphere_longitudes: settings.sphere_divisions.longitudes,
            sphere_latitudes: settings.sphere_divisions.latitudes,
            curve_z: settings.curve_z,
            ray_plane_z: settings.ray_plane_z,
            show_traces: false,
        }
    }
}

impl SceneConfig {
    /// Layers visible at startup
    pub fn layers(&self) -> SceneLayers {
        let mut layers = SceneLayers::default();
        layers.set(SceneLayers::TRACES, self.show_traces);
        layers
    }
}

/// Expression slot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionsConfig {
    /// Number of editable expression slots
    pub slots: usize,
    /// Starting text per slot; missing entries start empty
    pub initial: Vec<String>,
    /// Color per slot (0xRRGGBB); reused cyclically
    pub colors: Vec<u32>,
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        Self {
            slots: 3,
            initial: vec!["1 / x".to_string()],
            colors: vec![0xff0000, 0xff8800, 0xff0088],
        }
    }
}

impl FunctionsConfig {
    /// Slot count, at least one
    pub fn slot_count(&self) -> usize {
        self.slots.max(1)
    }

    /// Starting text of slot `index`
    pub fn initial_text(&self, index: usize) -> &str {
        self.initial.get(index).map(String::as_str).unwrap_or("")
    }

    /// Color of slot `index`
    pub fn color(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::WHITE;
        }
        Color::from_hex(self.colors[index % self.colors.len()])
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color (0xRRGGBB)
    pub background_color: u32,
    /// MSAA samples (1 disables antialiasing, 4 or more uses 4)
    pub msaa_samples: u32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: 0x888888,
            msaa_samples: 4,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); RUST_LOG wins when set
    pub log_level: String,
    /// Show segment count in the window title
    pub show_stats: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_stats: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
