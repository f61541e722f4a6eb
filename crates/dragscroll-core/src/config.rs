use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub drag: DragScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory for the interactive log file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Drag-to-scroll behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragScrollConfig {
    /// Multiplier applied to pointer displacement before it reaches the scroll offset
    #[serde(default = "default_scroll_factor")]
    pub scroll_factor: f64,
    /// Never move horizontally
    #[serde(default)]
    pub lock_x: bool,
    /// Never move vertically
    #[serde(default)]
    pub lock_y: bool,
    /// Sample velocity while dragging and coast after release
    #[serde(default)]
    pub inertia: bool,
    /// Speed lost per second of coasting. Set nice and high.
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Velocity adjustment for touch input
    #[serde(default = "default_touch_speed")]
    pub touch_speed: f64,
    /// Velocity adjustment for mouse input
    #[serde(default = "default_mouse_speed")]
    pub mouse_speed: f64,
    /// Upper bound on sampled speed per axis (unbounded when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
}

impl Default for DragScrollConfig {
    fn default() -> Self {
        Self {
            scroll_factor: default_scroll_factor(),
            lock_x: false,
            lock_y: false,
            inertia: false,
            friction: default_friction(),
            touch_speed: default_touch_speed(),
            mouse_speed: default_mouse_speed(),
            max_speed: None,
        }
    }
}

impl DragScrollConfig {
    /// The subset the inertia engine cares about
    pub fn inertia_config(&self) -> InertiaConfig {
        InertiaConfig {
            lock_x: self.lock_x,
            lock_y: self.lock_y,
            friction: self.friction,
        }
    }

    /// Reject values that would break the decay or sampling math
    pub fn validate(&self) -> crate::Result<()> {
        if !self.scroll_factor.is_finite() {
            return Err(crate::Error::Config(format!(
                "scroll_factor must be finite, got {}",
                self.scroll_factor
            )));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(crate::Error::Config(format!(
                "friction must be a non-negative number, got {}",
                self.friction
            )));
        }
        for (name, value) in [
            ("touch_speed", self.touch_speed),
            ("mouse_speed", self.mouse_speed),
        ] {
            if !value.is_finite() {
                return Err(crate::Error::Config(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if let Some(max) = self.max_speed {
            if !max.is_finite() {
                return Err(crate::Error::Config(format!(
                    "max_speed must be finite, got {}",
                    max
                )));
            }
        }
        Ok(())
    }
}

/// Settings for a standalone inertia engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaConfig {
    #[serde(default)]
    pub lock_x: bool,
    #[serde(default)]
    pub lock_y: bool,
    /// Velocity decay over a second
    #[serde(default = "default_inertia_friction")]
    pub friction: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            lock_x: false,
            lock_y: false,
            friction: default_inertia_friction(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Poll interval while nothing is moving, in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while coasting
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Demo canvas width in cells
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u16,
    /// Demo canvas height in cells
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            frame_rate: default_frame_rate(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
        }
    }
}

impl UiConfig {
    /// Interval between coast frames
    pub fn frame_interval_ms(&self) -> u64 {
        if self.frame_rate == 0 {
            16 // ~60fps fallback
        } else {
            (1000 / self.frame_rate as u64).max(1)
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dragscroll")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_scroll_factor() -> f64 {
    1.0
}

fn default_friction() -> f64 {
    1000.0
}

fn default_inertia_friction() -> f64 {
    0.95
}

fn default_touch_speed() -> f64 {
    0.1
}

fn default_mouse_speed() -> f64 {
    0.05
}

fn default_tick_rate() -> u64 {
    100
}

fn default_frame_rate() -> u32 {
    60
}

fn default_canvas_width() -> u16 {
    200
}

fn default_canvas_height() -> u16 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it is missing
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.drag.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/dragscroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dragscroll")
            .join("config.toml")
    }

    /// Get the interactive log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("dragscroll.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drag_config() {
        let config = DragScrollConfig::default();
        assert_eq!(config.scroll_factor, 1.0);
        assert!(!config.lock_x);
        assert!(!config.lock_y);
        assert!(!config.inertia);
        assert_eq!(config.friction, 1000.0);
        assert_eq!(config.touch_speed, 0.1);
        assert_eq!(config.mouse_speed, 0.05);
        assert_eq!(config.max_speed, None);
    }

    #[test]
    fn test_inertia_config_defaults_to_soft_friction() {
        assert_eq!(InertiaConfig::default().friction, 0.95);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [drag]
            inertia = true
            mouse_speed = 1.0
            "#,
        )
        .unwrap();

        assert!(config.drag.inertia);
        assert_eq!(config.drag.mouse_speed, 1.0);
        assert_eq!(config.drag.friction, 1000.0);
        assert_eq!(config.ui.frame_rate, 60);
    }

    #[test]
    fn test_negative_friction_rejected() {
        let err = AppConfig::from_toml("[drag]\nfriction = -3.0\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_drag_settings() {
        let mut config = AppConfig::default();
        config.drag.lock_y = true;
        config.drag.max_speed = Some(400.0);

        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.drag, config.drag);
    }

    #[test]
    fn test_frame_interval() {
        let mut ui = UiConfig::default();
        assert_eq!(ui.frame_interval_ms(), 16);
        ui.frame_rate = 0;
        assert_eq!(ui.frame_interval_ms(), 16);
        ui.frame_rate = 120;
        assert_eq!(ui.frame_interval_ms(), 8);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("dragscroll-missing-config-for-test.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.drag, DragScrollConfig::default());
    }
}
