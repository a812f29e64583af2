use serde::{Deserialize, Serialize};

/// The kind of drawable a layout element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Line,
    Polygon,
    Text,
    /// A layout node holding other elements.
    Group,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Rectangle => write!(f, "rectangle"),
            ElementKind::Circle => write!(f, "circle"),
            ElementKind::Line => write!(f, "line"),
            ElementKind::Polygon => write!(f, "polygon"),
            ElementKind::Text => write!(f, "text"),
            ElementKind::Group => write!(f, "group"),
        }
    }
}

/// Text weight hint passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Easing function for animation interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Smootherstep, `10t³ − 15t⁴ + 6t⁵`. The renderer's default rate function.
    #[default]
    Smooth,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    /// Rises to 1 at the midpoint and returns to 0.
    ThereAndBack,
}

impl Easing {
    /// Apply the easing function to a normalized time value t in [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smooth => t * t * t * (t * (6.0 * t - 15.0) + 10.0),
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let t1 = t - 1.0;
                t1 * t1 * t1 + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t1 = 2.0 * t - 2.0;
                    0.5 * t1 * t1 * t1 + 1.0
                }
            }
            Easing::ThereAndBack => {
                let folded = if t < 0.5 { 2.0 * t } else { 2.0 - 2.0 * t };
                Easing::Smooth.apply(folded)
            }
        }
    }

    /// Parse a snake_case easing name as used in `kinegram.toml`.
    pub fn from_name(name: &str) -> Option<Easing> {
        let easing = match name {
            "linear" => Easing::Linear,
            "smooth" => Easing::Smooth,
            "ease_in" => Easing::EaseIn,
            "ease_out" => Easing::EaseOut,
            "ease_in_out" => Easing::EaseInOut,
            "cubic_in" => Easing::CubicIn,
            "cubic_out" => Easing::CubicOut,
            "cubic_in_out" => Easing::CubicInOut,
            "there_and_back" => Easing::ThereAndBack,
            _ => return None,
        };
        Some(easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_linear() {
        assert!((Easing::Linear.apply(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < f64::EPSILON);
        assert!((Easing::Linear.apply(1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_easing_boundaries() {
        for easing in [
            Easing::Linear,
            Easing::Smooth,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicIn,
            Easing::CubicOut,
            Easing::CubicInOut,
        ] {
            assert!(
                (easing.apply(0.0)).abs() < 0.001,
                "{:?} at t=0 should be ~0",
                easing
            );
            assert!(
                (easing.apply(1.0) - 1.0).abs() < 0.001,
                "{:?} at t=1 should be ~1",
                easing
            );
        }
    }

    #[test]
    fn test_smooth_is_symmetric() {
        assert!((Easing::Smooth.apply(0.5) - 0.5).abs() < 1e-12);
        let a = Easing::Smooth.apply(0.2);
        let b = Easing::Smooth.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_there_and_back() {
        assert!(Easing::ThereAndBack.apply(0.0).abs() < 1e-12);
        assert!((Easing::ThereAndBack.apply(0.5) - 1.0).abs() < 1e-12);
        assert!(Easing::ThereAndBack.apply(1.0).abs() < 1e-12);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_easing_from_name() {
        assert_eq!(Easing::from_name("smooth"), Some(Easing::Smooth));
        assert_eq!(Easing::from_name("cubic_in_out"), Some(Easing::CubicInOut));
        assert_eq!(Easing::from_name("bouncy"), None);
        assert_eq!(Easing::default(), Easing::Smooth);
    }

    #[test]
    fn test_element_kind_display() {
        assert_eq!(format!("{}", ElementKind::Rectangle), "rectangle");
        assert_eq!(format!("{}", ElementKind::Group), "group");
    }
}
