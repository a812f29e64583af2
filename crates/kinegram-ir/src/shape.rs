use serde::{Deserialize, Serialize};

use crate::context::{SceneContext, Theme};
use kinegram_core::error::{ensure_non_negative, ensure_positive, ensure_unit};
use kinegram_core::{
    Bounds, Color, ElementKind, FontWeight, KinegramError, KinegramResult, Point2D, Size2D,
};

/// Text height per line, in scene units, for a font size of 1.
const TEXT_UNITS_PER_POINT: f64 = 1.0 / 96.0;
/// Average glyph advance relative to line height.
const TEXT_CHAR_ASPECT: f64 = 0.55;
const TEXT_LINE_SPACING: f64 = 1.2;

pub const DEFAULT_DOT_RADIUS: f64 = 0.08;
const DEFAULT_TIP_LENGTH: f64 = 0.35;
const MAX_TIP_TO_LENGTH_RATIO: f64 = 0.25;
const SURROUND_BUFF: f64 = 0.1;

/// Unique identifier for a shape or group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a child id, e.g. `grid` + `3` -> `grid.3`.
    pub fn child(&self, suffix: impl std::fmt::Display) -> ElementId {
        ElementId(format!("{}.{}", self.0, suffix))
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        ElementId(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        ElementId(s)
    }
}

impl From<&ElementId> for ElementId {
    fn from(id: &ElementId) -> Self {
        id.clone()
    }
}

/// Geometry of a primitive, relative to its centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle {
        width: f64,
        height: f64,
        corner_radius: f64,
    },
    Circle {
        radius: f64,
    },
    /// A straight segment; `tip` is the arrow-head length when present.
    Line {
        start: Point2D,
        end: Point2D,
        tip: Option<f64>,
    },
    Polygon {
        vertices: Vec<Point2D>,
    },
    Text {
        content: String,
        font_size: f64,
        weight: FontWeight,
    },
}

impl ShapeKind {
    /// Extent of the geometry. Text extent is an estimate from the glyph count.
    pub fn size(&self) -> Size2D {
        match self {
            ShapeKind::Rectangle { width, height, .. } => Size2D::new(*width, *height),
            ShapeKind::Circle { radius } => Size2D::new(radius * 2.0, radius * 2.0),
            ShapeKind::Line { start, end, .. } => {
                Size2D::new((end.x - start.x).abs(), (end.y - start.y).abs())
            }
            ShapeKind::Polygon { vertices } => Bounds::from_points(vertices.iter().copied())
                .map(|b| b.size())
                .unwrap_or_default(),
            ShapeKind::Text {
                content, font_size, ..
            } => text_extent(content, *font_size),
        }
    }

    /// Check the geometry is finite and non-degenerate.
    pub fn validate(&self) -> KinegramResult<()> {
        match self {
            ShapeKind::Rectangle {
                width,
                height,
                corner_radius,
            } => {
                let width = ensure_non_negative("width", *width)?;
                let height = ensure_non_negative("height", *height)?;
                let corner_radius = ensure_non_negative("corner_radius", *corner_radius)?;
                if corner_radius > width.min(height) / 2.0 {
                    return Err(KinegramError::validation(
                        "corner_radius",
                        format!(
                            "{} exceeds half the shorter side of a {}x{} rectangle",
                            corner_radius, width, height
                        ),
                    ));
                }
            }
            ShapeKind::Circle { radius } => {
                ensure_non_negative("radius", *radius)?;
            }
            ShapeKind::Line { start, end, tip } => {
                let start = ensure_point("start", *start)?;
                let end = ensure_point("end", *end)?;
                if start.distance(&end) == 0.0 {
                    return Err(KinegramError::validation(
                        "line",
                        format!("zero-length segment at ({}, {})", start.x, start.y),
                    ));
                }
                if let Some(tip) = tip {
                    ensure_non_negative("tip", *tip)?;
                }
            }
            ShapeKind::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(KinegramError::validation(
                        "vertices",
                        format!("a polygon needs at least 3 vertices, got {}", vertices.len()),
                    ));
                }
                for v in vertices {
                    ensure_point("vertices", *v)?;
                }
            }
            ShapeKind::Text { font_size, .. } => {
                ensure_positive("font_size", *font_size)?;
            }
        }
        Ok(())
    }

    pub fn element_kind(&self) -> ElementKind {
        match self {
            ShapeKind::Rectangle { .. } => ElementKind::Rectangle,
            ShapeKind::Circle { .. } => ElementKind::Circle,
            ShapeKind::Line { .. } => ElementKind::Line,
            ShapeKind::Polygon { .. } => ElementKind::Polygon,
            ShapeKind::Text { .. } => ElementKind::Text,
        }
    }

    fn scaled(&self, factor: f64) -> ShapeKind {
        match self {
            ShapeKind::Rectangle {
                width,
                height,
                corner_radius,
            } => ShapeKind::Rectangle {
                width: width * factor,
                height: height * factor,
                corner_radius: corner_radius * factor,
            },
            ShapeKind::Circle { radius } => ShapeKind::Circle {
                radius: radius * factor,
            },
            ShapeKind::Line { start, end, tip } => ShapeKind::Line {
                start: *start * factor,
                end: *end * factor,
                tip: tip.map(|t| t * factor),
            },
            ShapeKind::Polygon { vertices } => ShapeKind::Polygon {
                vertices: vertices.iter().map(|v| *v * factor).collect(),
            },
            ShapeKind::Text {
                content,
                font_size,
                weight,
            } => ShapeKind::Text {
                content: content.clone(),
                font_size: font_size * factor,
                weight: *weight,
            },
        }
    }
}

fn text_extent(content: &str, font_size: f64) -> Size2D {
    let line_height = font_size * TEXT_UNITS_PER_POINT;
    let lines: Vec<&str> = content.split('\n').collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = longest as f64 * TEXT_CHAR_ASPECT * line_height;
    let height = line_height * (1.0 + TEXT_LINE_SPACING * (lines.len() - 1) as f64);
    Size2D::new(width, height)
}

/// An immutable drawable primitive: geometry, style and absolute centre.
///
/// Every transformation returns a new descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    id: ElementId,
    kind: ShapeKind,
    size: Size2D,
    fill_color: Color,
    fill_opacity: f64,
    stroke_color: Color,
    stroke_width: f64,
    stroke_opacity: f64,
    position: Point2D,
}

impl ShapeDescriptor {
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn size(&self) -> Size2D {
        self.size
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn fill_opacity(&self) -> f64 {
        self.fill_opacity
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn stroke_opacity(&self) -> f64 {
        self.stroke_opacity
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.position, self.size)
    }

    /// Check every field a renderer relies on. Descriptors read back from
    /// JSON have not been through the factory, so plan checks call this too.
    pub fn validate(&self) -> KinegramResult<()> {
        if self.id.0.is_empty() {
            return Err(KinegramError::validation("id", "element id must not be empty"));
        }
        self.kind.validate()?;
        ensure_point("position", self.position)?;
        ensure_unit("fill_opacity", self.fill_opacity)?;
        ensure_unit("stroke_opacity", self.stroke_opacity)?;
        ensure_non_negative("stroke_width", self.stroke_width)?;
        let expected = self.kind.size();
        if !same_extent(self.size.width, expected.width)
            || !same_extent(self.size.height, expected.height)
        {
            return Err(KinegramError::validation(
                "size",
                format!(
                    "'{}' records {}x{} but its {} geometry spans {}x{}",
                    self.id,
                    self.size.width,
                    self.size.height,
                    self.kind.element_kind(),
                    expected.width,
                    expected.height
                ),
            ));
        }
        Ok(())
    }

    /// Absolute endpoints of a line or arrow.
    pub fn endpoints(&self) -> Option<(Point2D, Point2D)> {
        match &self.kind {
            ShapeKind::Line { start, end, .. } => {
                Some((self.position + *start, self.position + *end))
            }
            _ => None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_position(mut self, position: Point2D) -> Self {
        self.position = position;
        self
    }

    pub fn shifted(mut self, offset: Point2D) -> Self {
        self.position = self.position + offset;
        self
    }

    /// Scale the geometry about the shape's own centre. Stroke width is kept.
    pub fn scaled(mut self, factor: f64) -> KinegramResult<Self> {
        let factor = ensure_positive("scale", factor)?;
        self.kind = self.kind.scaled(factor);
        self.size = self.kind.size();
        Ok(self)
    }

    pub fn with_fill(mut self, color: Color, opacity: f64) -> KinegramResult<Self> {
        self.fill_opacity = ensure_unit("fill_opacity", opacity)?;
        self.fill_color = color;
        Ok(self)
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> KinegramResult<Self> {
        self.stroke_width = ensure_non_negative("stroke_width", width)?;
        self.stroke_color = color;
        Ok(self)
    }

    /// Set fill and stroke opacity together.
    pub fn with_opacity(mut self, opacity: f64) -> KinegramResult<Self> {
        let opacity = ensure_unit("opacity", opacity)?;
        self.fill_opacity = opacity;
        self.stroke_opacity = opacity;
        Ok(self)
    }

    /// Set fill and stroke color together, keeping opacities.
    pub fn with_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self.stroke_color = color;
        self
    }
}

/// Optional style overrides. Unset fields fall back to the theme defaults
/// for the kind of shape being built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill_color: Option<Color>,
    pub fill_opacity: Option<f64>,
    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set fill color and opacity.
    pub fn fill(mut self, color: Color, opacity: f64) -> Self {
        self.fill_color = Some(color);
        self.fill_opacity = Some(opacity);
        self
    }

    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    /// Builder: set stroke color and width.
    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = Some(width);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn stroke_opacity(mut self, opacity: f64) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }

    /// Builder: set both fill and stroke color.
    pub fn color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self.stroke_color = Some(color);
        self
    }
}

/// Resolved style values before validation.
struct StyleDefaults {
    fill_color: Color,
    fill_opacity: f64,
    stroke_color: Color,
    stroke_width: f64,
}

impl StyleDefaults {
    /// Outlined, unfilled; fill color follows the stroke color.
    fn outline(theme: &Theme, color: Color) -> Self {
        Self {
            fill_color: color,
            fill_opacity: 0.0,
            stroke_color: color,
            stroke_width: theme.stroke_width,
        }
    }

    /// Solid fill, no stroke.
    fn solid(color: Color) -> Self {
        Self {
            fill_color: color,
            fill_opacity: 1.0,
            stroke_color: color,
            stroke_width: 0.0,
        }
    }
}

/// Builds validated shape descriptors with theme defaults.
pub struct ShapeFactory<'a> {
    ctx: &'a SceneContext,
}

impl<'a> ShapeFactory<'a> {
    pub fn new(ctx: &'a SceneContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &SceneContext {
        self.ctx
    }

    pub fn rectangle(
        &self,
        id: impl Into<ElementId>,
        width: f64,
        height: f64,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        self.rounded_rectangle(id, width, height, 0.0, style)
    }

    pub fn square(
        &self,
        id: impl Into<ElementId>,
        side: f64,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        self.rounded_rectangle(id, side, side, 0.0, style)
    }

    pub fn rounded_rectangle(
        &self,
        id: impl Into<ElementId>,
        width: f64,
        height: f64,
        corner_radius: f64,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let defaults = StyleDefaults::outline(&self.ctx.theme, self.ctx.theme.stroke_color);
        self.finish(
            id.into(),
            ShapeKind::Rectangle {
                width,
                height,
                corner_radius,
            },
            Point2D::zero(),
            defaults,
            style,
        )
    }

    pub fn circle(
        &self,
        id: impl Into<ElementId>,
        radius: f64,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let defaults = StyleDefaults::outline(&self.ctx.theme, self.ctx.theme.stroke_color);
        self.finish(
            id.into(),
            ShapeKind::Circle { radius },
            Point2D::zero(),
            defaults,
            style,
        )
    }

    /// A small filled circle at `at`.
    pub fn dot(
        &self,
        id: impl Into<ElementId>,
        at: Point2D,
        radius: Option<f64>,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let radius = ensure_non_negative("radius", radius.unwrap_or(DEFAULT_DOT_RADIUS))?;
        let at = ensure_point("position", at)?;
        let defaults = StyleDefaults::solid(self.ctx.theme.stroke_color);
        self.finish(id.into(), ShapeKind::Circle { radius }, at, defaults, style)
    }

    pub fn line(
        &self,
        id: impl Into<ElementId>,
        start: Point2D,
        end: Point2D,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        self.segment(id.into(), start, end, None, style)
    }

    /// An arrow from `start` to `end`, pulled in by `buff` at both ends.
    pub fn arrow(
        &self,
        id: impl Into<ElementId>,
        start: Point2D,
        end: Point2D,
        buff: f64,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let buff = ensure_non_negative("buff", buff)?;
        let start = ensure_point("start", start)?;
        let end = ensure_point("end", end)?;
        let length = start.distance(&end);
        if length - 2.0 * buff <= 0.0 {
            return Err(KinegramError::validation(
                "arrow",
                format!(
                    "length {} leaves nothing after a buff of {} at each end",
                    length, buff
                ),
            ));
        }
        let unit = (end - start) * (1.0 / length);
        let start = start + unit * buff;
        let end = end - unit * buff;
        let tip = DEFAULT_TIP_LENGTH.min(MAX_TIP_TO_LENGTH_RATIO * (length - 2.0 * buff));
        self.segment(id.into(), start, end, Some(tip), style)
    }

    fn segment(
        &self,
        id: ElementId,
        start: Point2D,
        end: Point2D,
        tip: Option<f64>,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let start = ensure_point("start", start)?;
        let end = ensure_point("end", end)?;
        let center = start.midpoint(&end);
        let defaults = StyleDefaults::outline(&self.ctx.theme, self.ctx.theme.stroke_color);
        self.finish(
            id,
            ShapeKind::Line {
                start: start - center,
                end: end - center,
                tip,
            },
            center,
            defaults,
            style,
        )
    }

    /// A closed polygon through absolute `vertices`.
    pub fn polygon(
        &self,
        id: impl Into<ElementId>,
        vertices: &[Point2D],
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        for v in vertices {
            ensure_point("vertices", *v)?;
        }
        let center = Bounds::from_points(vertices.iter().copied())
            .map(|b| b.center())
            .unwrap_or_default();
        let defaults = StyleDefaults::outline(&self.ctx.theme, self.ctx.theme.stroke_color);
        self.finish(
            id.into(),
            ShapeKind::Polygon {
                vertices: vertices.iter().map(|v| *v - center).collect(),
            },
            center,
            defaults,
            style,
        )
    }

    /// A text label. `font_size` falls back to the theme size.
    pub fn text(
        &self,
        id: impl Into<ElementId>,
        content: impl Into<String>,
        font_size: Option<f64>,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        self.styled_text(id, content, font_size, FontWeight::Normal, style)
    }

    pub fn styled_text(
        &self,
        id: impl Into<ElementId>,
        content: impl Into<String>,
        font_size: Option<f64>,
        weight: FontWeight,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let font_size = ensure_positive("font_size", font_size.unwrap_or(self.ctx.theme.font_size))?;
        let defaults = StyleDefaults::solid(self.ctx.theme.text_color);
        self.finish(
            id.into(),
            ShapeKind::Text {
                content: content.into(),
                font_size,
                weight,
            },
            Point2D::zero(),
            defaults,
            style,
        )
    }

    /// A rectangle enclosing `bounds` with `buff` clearance. Outlined in yellow
    /// unless styled otherwise.
    pub fn surrounding_rectangle(
        &self,
        id: impl Into<ElementId>,
        bounds: &Bounds,
        buff: Option<f64>,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let buff = ensure_non_negative("buff", buff.unwrap_or(SURROUND_BUFF))?;
        let outer = bounds.expand(buff);
        let rect = self.rectangle(
            id,
            outer.width(),
            outer.height(),
            Style {
                stroke_color: style.stroke_color.or(Some(Color::YELLOW)),
                fill_color: style.fill_color.or(Some(Color::YELLOW)),
                ..style
            },
        )?;
        Ok(rect.with_position(outer.center()))
    }

    fn finish(
        &self,
        id: ElementId,
        kind: ShapeKind,
        position: Point2D,
        defaults: StyleDefaults,
        style: Style,
    ) -> KinegramResult<ShapeDescriptor> {
        let descriptor = ShapeDescriptor {
            id,
            size: kind.size(),
            kind,
            fill_color: style.fill_color.unwrap_or(defaults.fill_color),
            fill_opacity: style.fill_opacity.unwrap_or(defaults.fill_opacity),
            stroke_color: style.stroke_color.unwrap_or(defaults.stroke_color),
            stroke_width: style.stroke_width.unwrap_or(defaults.stroke_width),
            stroke_opacity: style.stroke_opacity.unwrap_or(1.0),
            position,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

/// Extents agree up to float noise from a JSON round trip.
fn same_extent(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn ensure_point(field: &str, p: Point2D) -> KinegramResult<Point2D> {
    if !p.is_finite() {
        return Err(KinegramError::validation(
            field,
            format!("non-finite coordinate ({}, {})", p.x, p.y),
        ));
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory_ctx() -> SceneContext {
        SceneContext::default()
    }

    #[test]
    fn test_rectangle_defaults() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let r = f.rectangle("box", 2.0, 1.0, Style::new()).unwrap();
        assert_eq!(r.id().as_str(), "box");
        assert_eq!(r.size(), Size2D::new(2.0, 1.0));
        assert_eq!(r.position(), Point2D::zero());
        assert_eq!(r.fill_opacity(), 0.0);
        assert_eq!(r.stroke_width(), 4.0);
        assert_eq!(r.stroke_color(), Color::WHITE);
    }

    #[test]
    fn test_style_overrides() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let c = f
            .circle("c", 1.0, Style::new().fill(Color::YELLOW, 0.8).stroke_width(2.0))
            .unwrap();
        assert_eq!(c.fill_color(), Color::YELLOW);
        assert_eq!(c.fill_opacity(), 0.8);
        assert_eq!(c.stroke_width(), 2.0);
        assert_eq!(c.size(), Size2D::new(2.0, 2.0));
    }

    #[test]
    fn test_validation_failures() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        assert!(f.rectangle("r", -1.0, 1.0, Style::new()).is_err());
        assert!(f.rectangle("r", f64::INFINITY, 1.0, Style::new()).is_err());
        assert!(f.circle("c", 1.0, Style::new().fill_opacity(1.5)).is_err());
        assert!(f.circle("c", 1.0, Style::new().stroke_width(-1.0)).is_err());
        assert!(f.text("t", "hi", Some(0.0), Style::new()).is_err());
        assert!(f.rounded_rectangle("r", 2.0, 1.0, 0.6, Style::new()).is_err());
        assert!(f.rounded_rectangle("r", 2.0, 1.0, 0.5, Style::new()).is_ok());
        assert!(f
            .polygon("p", &[Point2D::zero(), Point2D::new(1.0, 0.0)], Style::new())
            .is_err());
        assert!(f
            .line("l", Point2D::new(1.0, 1.0), Point2D::new(1.0, 1.0), Style::new())
            .is_err());
        assert!(f.rectangle("", 1.0, 1.0, Style::new()).is_err());
    }

    #[test]
    fn test_validation_error_kind() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let err = f.circle("c", -0.5, Style::new()).unwrap_err();
        assert!(matches!(err, KinegramError::Validation { ref field, .. } if field == "radius"));
    }

    #[test]
    fn test_text_extent() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let t = f.text("t", "abcd", Some(48.0), Style::new()).unwrap();
        assert!((t.size().height - 0.5).abs() < 1e-12);
        assert!((t.size().width - 4.0 * 0.55 * 0.5).abs() < 1e-12);
        assert_eq!(t.fill_opacity(), 1.0);
        assert_eq!(t.stroke_width(), 0.0);

        let two = f.text("t2", "ab\nabcdef", Some(96.0), Style::new()).unwrap();
        assert!((two.size().height - 2.2).abs() < 1e-12);
        assert!((two.size().width - 6.0 * 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_line_is_centred_on_midpoint() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let l = f
            .line("l", Point2D::new(-1.0, 0.0), Point2D::new(3.0, 2.0), Style::new())
            .unwrap();
        assert_eq!(l.position(), Point2D::new(1.0, 1.0));
        assert_eq!(l.size(), Size2D::new(4.0, 2.0));
        let (s, e) = l.endpoints().unwrap();
        assert_eq!(s, Point2D::new(-1.0, 0.0));
        assert_eq!(e, Point2D::new(3.0, 2.0));
    }

    #[test]
    fn test_arrow_buff_and_tip() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let a = f
            .arrow("a", Point2D::zero(), Point2D::new(4.0, 0.0), 0.25, Style::new())
            .unwrap();
        let (s, e) = a.endpoints().unwrap();
        assert!((s.x - 0.25).abs() < 1e-12);
        assert!((e.x - 3.75).abs() < 1e-12);
        match a.kind() {
            ShapeKind::Line { tip, .. } => assert_eq!(*tip, Some(0.35)),
            other => panic!("unexpected kind {:?}", other),
        }
        assert!(f
            .arrow("a", Point2D::zero(), Point2D::new(0.4, 0.0), 0.25, Style::new())
            .is_err());
    }

    #[test]
    fn test_polygon_is_recentred() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let p = f
            .polygon(
                "tri",
                &[Point2D::new(0.0, 0.0), Point2D::new(2.0, 0.0), Point2D::new(1.0, 2.0)],
                Style::new(),
            )
            .unwrap();
        assert_eq!(p.position(), Point2D::new(1.0, 1.0));
        assert_eq!(p.size(), Size2D::new(2.0, 2.0));
    }

    #[test]
    fn test_surrounding_rectangle() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let inner = Bounds::from_center(Point2D::new(1.0, 1.0), Size2D::new(2.0, 1.0));
        let r = f
            .surrounding_rectangle("hl", &inner, Some(0.1), Style::new())
            .unwrap();
        assert_eq!(r.position(), Point2D::new(1.0, 1.0));
        assert!((r.size().width - 2.2).abs() < 1e-12);
        assert_eq!(r.stroke_color(), Color::YELLOW);
    }

    #[test]
    fn test_transformations_return_new_descriptors() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let original = f.square("s", 1.0, Style::new()).unwrap();
        let moved = original.clone().shifted(Point2D::new(1.0, 0.0));
        let scaled = original.clone().scaled(2.0).unwrap();
        let faded = original.clone().with_opacity(0.5).unwrap();

        assert_eq!(original.position(), Point2D::zero());
        assert_eq!(moved.position(), Point2D::new(1.0, 0.0));
        assert_eq!(scaled.size(), Size2D::new(2.0, 2.0));
        assert_eq!(faded.stroke_opacity(), 0.5);
        assert!(original.clone().scaled(0.0).is_err());
        assert!(original.with_fill(Color::RED, -0.1).is_err());
    }

    #[test]
    fn test_validate_catches_edited_descriptors() {
        let ctx = factory_ctx();
        let f = ShapeFactory::new(&ctx);
        let circle = f.circle("c", 0.5, Style::new()).unwrap();
        assert!(circle.validate().is_ok());

        let json = serde_json::to_string(&circle).unwrap();
        let reload = |from: &str, to: &str| -> ShapeDescriptor {
            assert!(json.contains(from), "{} not in {}", from, json);
            serde_json::from_str(&json.replace(from, to)).unwrap()
        };
        let err = reload("\"fill_opacity\":0.0", "\"fill_opacity\":5.0")
            .validate()
            .unwrap_err();
        assert!(matches!(err, KinegramError::Validation { ref field, .. } if field == "fill_opacity"));
        let err = reload("\"radius\":0.5", "\"radius\":-3.0").validate().unwrap_err();
        assert!(matches!(err, KinegramError::Validation { ref field, .. } if field == "radius"));
        let err = reload("\"radius\":0.5", "\"radius\":0.75").validate().unwrap_err();
        assert!(matches!(err, KinegramError::Validation { ref field, .. } if field == "size"));
        let err = reload("\"stroke_width\":4.0", "\"stroke_width\":-1.0")
            .validate()
            .unwrap_err();
        assert!(matches!(err, KinegramError::Validation { ref field, .. } if field == "stroke_width"));
    }

    #[test]
    fn test_validate_polygon_vertex_count() {
        let kind = ShapeKind::Polygon {
            vertices: vec![Point2D::zero(), Point2D::new(1.0, 0.0)],
        };
        assert!(kind.validate().is_err());
        let kind = ShapeKind::Polygon {
            vertices: vec![Point2D::zero(), Point2D::new(1.0, 0.0), Point2D::new(f64::NAN, 1.0)],
        };
        assert!(kind.validate().is_err());
    }

    #[test]
    fn test_element_id_child() {
        let id = ElementId::new("grid");
        assert_eq!(id.child(3).as_str(), "grid.3");
        assert_eq!(format!("{}", id), "grid");
    }
}
