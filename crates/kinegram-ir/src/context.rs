use kinegram_core::error::{ensure_non_negative, ensure_positive};
use kinegram_core::{Color, Easing, KinegramConfig, KinegramError, KinegramResult, Size2D};

/// Default colors and stroke metrics applied by the shape factory.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub font_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_color: Color::WHITE,
            stroke_color: Color::WHITE,
            stroke_width: 4.0,
            font_size: 48.0,
        }
    }
}

/// Everything the factory, composer and sequencer need to know about the
/// scene being built. Passed explicitly; there is no global scene state.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneContext {
    /// Visible frame in scene units, centred on the origin.
    pub frame: Size2D,
    pub background: Color,
    pub fps: u32,
    pub default_buff: f64,
    pub edge_buff: f64,
    pub default_run_time: f64,
    pub default_easing: Easing,
    pub theme: Theme,
    pub seed: u64,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self {
            frame: Size2D::new(8.0 * 16.0 / 9.0, 8.0),
            background: Color::BLACK,
            fps: 30,
            default_buff: 0.25,
            edge_buff: 0.5,
            default_run_time: 1.0,
            default_easing: Easing::Smooth,
            theme: Theme::default(),
            seed: 42,
        }
    }
}

impl SceneContext {
    /// Build a context from a loaded `kinegram.toml`.
    pub fn from_config(config: &KinegramConfig) -> KinegramResult<Self> {
        let parse_color = |field: &str, hex: &str| {
            Color::from_hex(hex).map_err(|e| KinegramError::validation(field, e.to_string()))
        };

        if config.project.fps == 0 {
            return Err(KinegramError::validation("project.fps", "must be positive"));
        }

        Ok(Self {
            frame: Size2D::new(
                ensure_positive("frame.width", config.frame.width)?,
                ensure_positive("frame.height", config.frame.height)?,
            ),
            background: parse_color("frame.background", &config.frame.background)?,
            fps: config.project.fps,
            default_buff: ensure_non_negative("layout.default_buff", config.layout.default_buff)?,
            edge_buff: ensure_non_negative("layout.edge_buff", config.layout.edge_buff)?,
            default_run_time: ensure_positive(
                "timing.default_run_time",
                config.timing.default_run_time,
            )?,
            default_easing: config.timing.default_easing,
            theme: Theme {
                text_color: parse_color("theme.text_color", &config.theme.text_color)?,
                stroke_color: parse_color("theme.stroke_color", &config.theme.stroke_color)?,
                stroke_width: ensure_non_negative("theme.stroke_width", config.theme.stroke_width)?,
                font_size: ensure_positive("theme.font_size", config.theme.font_size)?,
            },
            seed: config.random.seed,
        })
    }

    /// Same context with a different random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_context() {
        let ctx = SceneContext::from_config(&KinegramConfig::default()).unwrap();
        assert_eq!(ctx, SceneContext::default());
    }

    #[test]
    fn test_bad_background_is_validation_error() {
        let mut config = KinegramConfig::default();
        config.frame.background = "black".to_string();
        let err = SceneContext::from_config(&config).unwrap_err();
        assert!(matches!(err, KinegramError::Validation { ref field, .. } if field == "frame.background"));
    }

    #[test]
    fn test_zero_run_time_rejected() {
        let mut config = KinegramConfig::default();
        config.timing.default_run_time = 0.0;
        assert!(SceneContext::from_config(&config).is_err());
    }

    #[test]
    fn test_with_seed() {
        let ctx = SceneContext::default().with_seed(7);
        assert_eq!(ctx.seed, 7);
    }
}
