use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KinegramError, KinegramResult};
use crate::types::Easing;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    pub fps: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "kinegram".to_string(),
            fps: 30,
        }
    }
}

/// Visible frame in scene units. The origin is the frame centre.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrameConfig {
    pub width: f64,
    pub height: f64,
    pub background: String, // hex color
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 8.0 * 16.0 / 9.0,
            height: 8.0,
            background: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Gap used by relative placement when none is given.
    pub default_buff: f64,
    /// Margin kept from the frame border by `to_edge`.
    pub edge_buff: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_buff: 0.25,
            edge_buff: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    pub default_run_time: f64,
    pub default_easing: Easing,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            default_run_time: 1.0,
            default_easing: Easing::Smooth,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub text_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub font_size: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            text_color: "#FFFFFF".to_string(),
            stroke_color: "#FFFFFF".to_string(),
            stroke_width: 4.0,
            font_size: 48.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RandomConfig {
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Contents of `kinegram.toml`. Every section is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct KinegramConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub frame: FrameConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub random: RandomConfig,
}

impl KinegramConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn load_from_file(path: &Path) -> KinegramResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KinegramError::config(e.to_string(), path))?;
        Self::from_toml_str(&contents).map_err(|e| KinegramError::config(e.to_string(), path))
    }

    pub fn save_to_file(&self, path: &Path) -> KinegramResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| KinegramError::config(e.to_string(), path))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = KinegramConfig::from_toml_str("").unwrap();
        assert_eq!(config.project.fps, 30);
        assert_eq!(config.layout.default_buff, 0.25);
        assert_eq!(config.timing.default_easing, Easing::Smooth);
        assert_eq!(config.random.seed, 42);
    }

    #[test]
    fn test_partial_sections_override() {
        let config = KinegramConfig::from_toml_str(
            r##"
[timing]
default_run_time = 2.0
default_easing = "linear"

[random]
seed = 7
"##,
        )
        .unwrap();
        assert_eq!(config.timing.default_run_time, 2.0);
        assert_eq!(config.timing.default_easing, Easing::Linear);
        assert_eq!(config.random.seed, 7);
        assert_eq!(config.frame.height, 8.0);
    }

    #[test]
    fn test_unknown_easing_is_rejected() {
        let result = KinegramConfig::from_toml_str("[timing]\ndefault_run_time = 1.0\ndefault_easing = \"bouncy\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("kinegram-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("kinegram.toml");

        let mut config = KinegramConfig::default();
        config.project.name = "demo".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = KinegramConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.project.name, "demo");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = KinegramConfig::load_from_file(Path::new("/nonexistent/kinegram.toml"))
            .unwrap_err();
        assert!(matches!(err, KinegramError::Config { .. }));
    }
}
