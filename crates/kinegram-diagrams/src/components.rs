//! Reusable diagram parts built from the shape factory and layout composer.
//!
//! Every component is a [`LayoutNode`] centred on the origin unless it says
//! otherwise. Child ids are derived from the component id (`grid` → `grid.0`,
//! `grid.1`, ...) so scenes can animate individual parts.

use crate::palette::{ACCENT_BLUE, ACCENT_GOLD, ACCENT_PURPLE, GLOW_BLUE, GLOW_PURPLE, SOFT_WHITE};
use crate::weights::WeightSampler;
use kinegram_core::{
    Bounds, Color, Direction, FontWeight, KinegramError, KinegramResult, Point2D, Size2D,
};
use kinegram_ir::{
    ElementId, LayoutChild, LayoutComposer, LayoutDirective, LayoutNode, SceneContext,
    ShapeDescriptor, ShapeFactory, Style,
};

/// Depth offset of the fake-3D faces on a token cube.
const CUBE_DEPTH: Point2D = Point2D::new(0.12, 0.08);
const EMBEDDING_SEGMENTS: usize = 12;
const BRACKET_WIDTH: f64 = 0.12;
const BRACKET_THICKNESS: f64 = 0.03;
const BRACKET_GAP: f64 = 0.05;

/// Bounds of the element `id` inside `node`.
pub fn bounds_of(node: &LayoutNode, id: &str) -> KinegramResult<Bounds> {
    node.find(id)
        .map(|e| e.bounds())
        .ok_or_else(|| KinegramError::reference(id, format!("inside '{}'", node.id())))
}

/// Ids of the direct children of `node`, in order.
pub fn child_ids(node: &LayoutNode) -> Vec<ElementId> {
    node.children().iter().map(|c| c.id().clone()).collect()
}

/// A `rows x cols` grid of tinted squares, row-major.
pub fn cell_grid(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    rows: usize,
    cols: usize,
    cell: f64,
    color: Color,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let cells = (0..rows * cols)
        .map(|i| {
            shapes
                .square(id.child(i), cell, Style::new().stroke(color, 2.0).fill(color, 0.3))
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    LayoutComposer::new(ctx).arrange(id, cells, LayoutDirective::grid(cols, 0.0))
}

/// A square heat map with one nested row node per matrix row.
///
/// Rows are `<id>.row<i>` and cells `<id>.row<i>.<j>`. `shade` maps a weight
/// to the cell style.
pub fn weight_matrix<F>(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    weights: &[Vec<f64>],
    cell: f64,
    spacing: f64,
    shade: F,
) -> KinegramResult<LayoutNode>
where
    F: Fn(f64) -> Style,
{
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let composer = LayoutComposer::new(ctx);
    let mut rows: Vec<LayoutChild> = Vec::with_capacity(weights.len());
    for (i, row) in weights.iter().enumerate() {
        let row_id = id.child(format!("row{}", i));
        let cells = row
            .iter()
            .enumerate()
            .map(|(j, w)| {
                shapes
                    .square(row_id.child(j), cell, shade(*w))
                    .map(LayoutChild::from)
            })
            .collect::<KinegramResult<Vec<_>>>()?;
        rows.push(
            composer
                .arrange(row_id, cells, LayoutDirective::row(spacing))?
                .into(),
        );
    }
    composer.arrange(id, rows, LayoutDirective::column(spacing))
}

/// A column of cells shaded by value, top to bottom. Values are clamped to
/// `[0, 1]` and used as fill opacity.
///
/// With `labelled`, each cell is a group `<id>.<i>` holding the square
/// `<id>.<i>.box` and its value `<id>.<i>.value`; otherwise `<id>.<i>` is the
/// square itself.
pub fn vector_cells(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    values: &[f64],
    cell: f64,
    color: Color,
    labelled: bool,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    if values.is_empty() {
        return Err(KinegramError::validation(
            "values",
            format!("vector '{}' needs at least one value", id),
        ));
    }
    let shapes = ShapeFactory::new(ctx);
    let mut cells: Vec<LayoutChild> = Vec::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        let v = v.clamp(0.0, 1.0);
        let style = Style::new().stroke(Color::WHITE, 1.0).fill(color, v);
        if labelled {
            let cell_id = id.child(i);
            let square = shapes.square(cell_id.child("box"), cell, style)?;
            let value = shapes.text(
                cell_id.child("value"),
                format!("{:.1}", v),
                Some(20.0),
                Style::new(),
            )?;
            cells.push(LayoutNode::group(cell_id, vec![square.into(), value.into()])?.into());
        } else {
            cells.push(shapes.square(id.child(i), cell, style)?.into());
        }
    }
    LayoutComposer::new(ctx).arrange(id, cells, LayoutDirective::column(0.0))
}

/// A solid square bracket of the given height, drawn as an outline polygon
/// centred on the origin. `Direction::Left` opens to the right, like `[`.
pub fn bracket(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    height: f64,
    side: Direction,
    color: Color,
) -> KinegramResult<ShapeDescriptor> {
    let (w, t, h) = (BRACKET_WIDTH, BRACKET_THICKNESS, height / 2.0);
    // Outline of `[`; mirrored for any side but the left.
    let open = [
        (w, h),
        (0.0, h),
        (0.0, -h),
        (w, -h),
        (w, -h + t),
        (t, -h + t),
        (t, h - t),
        (w, h - t),
    ];
    let flip = if side == Direction::Left { 1.0 } else { -1.0 };
    let vertices: Vec<Point2D> = open
        .iter()
        .map(|(x, y)| Point2D::new(flip * (x - w / 2.0), *y))
        .collect();
    ShapeFactory::new(ctx).polygon(id, &vertices, Style::new().fill(color, 1.0).stroke_width(0.0))
}

/// A column of value cells between square brackets.
///
/// Parts are `<id>.cells` (see [`vector_cells`]), `<id>.open` and `<id>.close`.
pub fn bracketed_vector(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    values: &[f64],
    cell: f64,
    color: Color,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let cells = vector_cells(ctx, id.child("cells"), values, cell, color, false)?;
    let span = cells.bounds();
    let composer = LayoutComposer::new(ctx);
    let open = composer.shape_next_to(
        bracket(ctx, id.child("open"), span.height(), Direction::Left, SOFT_WHITE)?,
        &span,
        Direction::Left,
        Some(BRACKET_GAP),
    );
    let close = composer.shape_next_to(
        bracket(ctx, id.child("close"), span.height(), Direction::Right, SOFT_WHITE)?,
        &span,
        Direction::Right,
        Some(BRACKET_GAP),
    );
    LayoutNode::group(id, vec![cells.into(), open.into(), close.into()])
}

/// Words of `text` in a row, tinted along a gradient from `from` to `to`.
///
/// Words are `<id>.<i>`, spaced by the width of one space at `font_size`.
pub fn gradient_words(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    text: &str,
    font_size: f64,
    weight: FontWeight,
    from: Color,
    to: Color,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let words: Vec<&str> = text.split_whitespace().collect();
    let tints = Color::gradient(&from, &to, words.len());
    let children = words
        .iter()
        .zip(tints)
        .enumerate()
        .map(|(i, (word, tint))| {
            shapes
                .styled_text(id.child(i), *word, Some(font_size), weight, Style::new().color(tint))
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let space = shapes
        .text(id.child("space"), "x", Some(font_size), Style::new())?
        .size()
        .width;
    LayoutComposer::new(ctx).arrange(id, children, LayoutDirective::row(space))
}

/// A rounded box tinted with `color`, with `caption` centred inside.
///
/// Parts are `<id>.box` and `<id>.label`; the caption is renamed to fit.
pub fn caption_box(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    size: Size2D,
    color: Color,
    caption: ShapeDescriptor,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let body = ShapeFactory::new(ctx).rounded_rectangle(
        id.child("box"),
        size.width,
        size.height,
        0.15,
        Style::new().fill(color, 0.2).stroke(color, 2.0),
    )?;
    let label = caption.with_id(id.child("label")).with_position(Point2D::zero());
    LayoutNode::group(id, vec![body.into(), label.into()])
}

/// A labelled token with a fake-3D side and top face. `index` picks the tint
/// along the blue-to-purple ramp.
pub fn token_cube(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    label: &str,
    index: usize,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let tint = ACCENT_BLUE.lerp(&ACCENT_PURPLE, index as f32 / 5.0);

    let face = shapes.rounded_rectangle(
        id.child("face"),
        1.0,
        0.7,
        0.1,
        Style::new().fill(tint, 0.8).stroke(SOFT_WHITE, 1.5),
    )?;
    let b = face.bounds();
    let (ul, ur) = (Point2D::new(b.min_x, b.max_y), Point2D::new(b.max_x, b.max_y));
    let dr = Point2D::new(b.max_x, b.min_y);
    let side = shapes.polygon(
        id.child("side"),
        &[ur, ur + CUBE_DEPTH, dr + CUBE_DEPTH, dr],
        Style::new().fill(tint, 0.5).stroke_width(0.0),
    )?;
    let top = shapes.polygon(
        id.child("top"),
        &[ul, ur, ur + CUBE_DEPTH, ul + CUBE_DEPTH],
        Style::new().fill(tint, 0.3).stroke_width(0.0),
    )?;
    let text = shapes.styled_text(
        id.child("label"),
        label,
        Some(22.0),
        FontWeight::Bold,
        Style::new().color(SOFT_WHITE),
    )?;
    LayoutNode::group(id, vec![side.into(), top.into(), face.into(), text.into()])
}

/// A vertical strip of segments shaded from blue to purple, with a
/// per-token opacity ripple.
pub fn embedding_bar(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    index: usize,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let segments = (0..EMBEDDING_SEGMENTS)
        .map(|i| {
            let t = i as f64 / EMBEDDING_SEGMENTS as f64;
            let opacity = 0.4 + 0.4 * (i as f64 * 0.5 + index as f64).sin();
            shapes
                .rectangle(
                    id.child(i),
                    0.15,
                    0.12,
                    Style::new()
                        .fill(ACCENT_BLUE.lerp(&ACCENT_PURPLE, t as f32), opacity)
                        .stroke_width(0.0),
                )
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    LayoutComposer::new(ctx).arrange(id, segments, LayoutDirective::column(0.02))
}

/// The positional-encoding curve `0.3 sin 2x + 0.15 sin 4x` over
/// `[-half_width, half_width]`, drawn as a polyline of `segments` pieces.
pub fn positional_wave(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    half_width: f64,
    segments: usize,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    if segments == 0 || half_width <= 0.0 {
        return Err(KinegramError::validation(
            "positional_wave",
            format!("needs a positive span and segment count, got {} / {}", half_width, segments),
        ));
    }
    let shapes = ShapeFactory::new(ctx);
    let step = 2.0 * half_width / segments as f64;
    let curve = |x: f64| Point2D::new(x, 0.3 * (2.0 * x).sin() + 0.15 * (4.0 * x).sin());
    let pieces = (0..segments)
        .map(|i| {
            let x0 = -half_width + i as f64 * step;
            shapes
                .line(
                    id.child(i),
                    curve(x0),
                    curve(x0 + step),
                    Style::new().stroke(ACCENT_GOLD, 2.0),
                )
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    LayoutNode::group(id, pieces)
}

/// A tinted disc with three inner strokes, numbered from 1 when `index` is set.
pub fn attention_head(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    color: Color,
    index: Option<usize>,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let mut parts: Vec<LayoutChild> = vec![shapes
        .circle(id.child("disc"), 0.4, Style::new().fill(color, 0.6).stroke(color, 2.0))?
        .into()];
    for i in 0..3 {
        let y = (i as f64 - 1.0) * 0.15;
        parts.push(
            shapes
                .line(
                    id.child(format!("stroke{}", i)),
                    Point2D::new(-0.2, y),
                    Point2D::new(0.2, y),
                    Style::new().stroke(SOFT_WHITE, 1.5).stroke_opacity(0.5),
                )?
                .into(),
        );
    }
    if let Some(index) = index {
        parts.push(
            shapes
                .styled_text(
                    id.child("number"),
                    (index + 1).to_string(),
                    Some(14.0),
                    FontWeight::Bold,
                    Style::new().color(SOFT_WHITE),
                )?
                .into(),
        );
    }
    LayoutNode::group(id, parts)
}

/// One block of an encoder or decoder stack. Deeper blocks are filled more.
pub fn layer_block(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    color: Color,
    depth: usize,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let fill = (0.3 + 0.1 * depth as f64).min(1.0);
    let body = shapes.rounded_rectangle(
        id.child("body"),
        2.0,
        0.6,
        0.1,
        Style::new().fill(color, fill).stroke(color, 1.5),
    )?;
    let rule = |name: &str, y: f64| {
        shapes.line(
            id.child(name),
            Point2D::new(-0.7, y),
            Point2D::new(0.7, y),
            Style::new().stroke(SOFT_WHITE, 1.0).stroke_opacity(0.3),
        )
    };
    let upper = rule("upper", 0.1)?;
    let lower = rule("lower", -0.1)?;
    LayoutNode::group(id, vec![body.into(), upper.into(), lower.into()])
}

/// `layers` blocks stacked bottom-up.
pub fn transformer_stack(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    color: Color,
    layers: usize,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let blocks = (0..layers)
        .map(|i| layer_block(ctx, id.child(i), color, i).map(LayoutChild::from))
        .collect::<KinegramResult<Vec<_>>>()?;
    LayoutComposer::new(ctx).arrange(id, blocks, LayoutDirective::column(0.2).reversed())
}

/// `count` dots in a column, `pitch` apart centre to centre.
pub fn dot_column(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    count: usize,
    radius: f64,
    pitch: f64,
    color: Color,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let dots = (0..count)
        .map(|i| {
            shapes
                .dot(id.child(i), Point2D::zero(), Some(radius), Style::new().color(color))
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let gap = pitch - 2.0 * radius;
    if gap < 0.0 {
        return Err(KinegramError::Layout(format!(
            "dots of radius {} overlap at a pitch of {}",
            radius, pitch
        )));
    }
    LayoutComposer::new(ctx).arrange(id, dots, LayoutDirective::column(gap))
}

/// Every-to-every lines between two point sets, `from`-major.
pub fn dense_connections(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    from: &[Point2D],
    to: &[Point2D],
    style: Style,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let mut lines: Vec<LayoutChild> = Vec::with_capacity(from.len() * to.len());
    for a in from {
        for b in to {
            let line = shapes.line(id.child(lines.len()), *a, *b, style.clone())?;
            lines.push(line.into());
        }
    }
    LayoutNode::group(id, lines)
}

/// Faint dots scattered over the frame, tinted between the two glow colors.
pub fn particle_field(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    count: usize,
    sampler: &mut WeightSampler,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let (hw, hh) = (ctx.frame.width / 2.0, ctx.frame.height / 2.0);
    let mut dots: Vec<LayoutChild> = Vec::with_capacity(count);
    for i in 0..count {
        let at = Point2D::new(sampler.uniform(-hw, hw), sampler.uniform(-hh, hh));
        let radius = sampler.uniform(0.02, 0.08);
        let opacity = sampler.uniform(0.1, 0.4);
        let tint = GLOW_BLUE.lerp(&GLOW_PURPLE, sampler.unit() as f32);
        dots.push(
            shapes
                .dot(id.child(i), at, Some(radius), Style::new().fill(tint, opacity))?
                .into(),
        );
    }
    LayoutNode::group(id, dots)
}

/// A 7x5 lattice of faint nodes with a random sparse set of edges.
///
/// Edges are `<id>.edges.<k>` and nodes `<id>.nodes.<k>`; edges paint first.
pub fn network_background(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    sampler: &mut WeightSampler,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    let shapes = ShapeFactory::new(ctx);
    let points: Vec<Point2D> = (-3..=3)
        .flat_map(|i| (-2..=2).map(move |j| Point2D::new(i as f64 * 2.0, j as f64 * 1.5)))
        .collect();

    let edges_id = id.child("edges");
    let mut edges: Vec<LayoutChild> = Vec::new();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            if sampler.chance(0.15) {
                let edge = shapes.line(
                    edges_id.child(edges.len()),
                    *a,
                    *b,
                    Style::new().stroke(GLOW_PURPLE, 0.5).stroke_opacity(0.2),
                )?;
                edges.push(edge.into());
            }
        }
    }

    let nodes_id = id.child("nodes");
    let nodes = points
        .iter()
        .enumerate()
        .map(|(k, p)| {
            shapes
                .dot(nodes_id.child(k), *p, Some(0.08), Style::new().fill(GLOW_BLUE, 0.3))
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;

    LayoutNode::group(
        id,
        vec![
            LayoutNode::group(edges_id, edges)?.into(),
            LayoutNode::group(nodes_id, nodes)?.into(),
        ],
    )
}

/// Small dots strewn along random source-to-sink paths.
pub fn flow_particles(
    ctx: &SceneContext,
    id: impl Into<ElementId>,
    count: usize,
    sources: &[Point2D],
    sinks: &[Point2D],
    sampler: &mut WeightSampler,
) -> KinegramResult<LayoutNode> {
    let id = id.into();
    if sources.is_empty() || sinks.is_empty() {
        return Ok(LayoutNode::empty(id, Point2D::zero()));
    }
    let shapes = ShapeFactory::new(ctx);
    let mut dots: Vec<LayoutChild> = Vec::with_capacity(count);
    for i in 0..count {
        let start = sources[sampler.index(sources.len())];
        let end = sinks[sampler.index(sinks.len())];
        let at = start.lerp(&end, sampler.unit());
        dots.push(
            shapes
                .dot(id.child(i), at, Some(0.04), Style::new().fill(ACCENT_GOLD, 0.6))?
                .into(),
        );
    }
    LayoutNode::group(id, dots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_grid_is_row_major_and_centred() {
        let ctx = SceneContext::default();
        let grid = cell_grid(&ctx, "input", 5, 5, 0.4, Color::BLUE_D).unwrap();
        assert_eq!(grid.len(), 25);
        assert!((grid.size().width - 2.0).abs() < 1e-9);
        assert!(grid.center().x.abs() < 1e-9 && grid.center().y.abs() < 1e-9);
        let first = bounds_of(&grid, "input.0").unwrap().center();
        let second = bounds_of(&grid, "input.1").unwrap().center();
        let below = bounds_of(&grid, "input.5").unwrap().center();
        assert!((second.x - first.x - 0.4).abs() < 1e-9);
        assert!((first.y - below.y - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_weight_matrix_rows_and_shading() {
        let ctx = SceneContext::default();
        let weights = vec![vec![0.25, 0.75], vec![1.0, 0.0]];
        let m = weight_matrix(&ctx, "m", &weights, 0.5, 0.05, |w| {
            Style::new().fill(Color::BLUE, w)
        })
        .unwrap();
        assert_eq!(child_ids(&m), vec![ElementId::new("m.row0"), ElementId::new("m.row1")]);
        let cell = m.find("m.row0.1").unwrap();
        assert!(matches!(cell, kinegram_ir::ElementRef::Shape(s) if s.fill_opacity() == 0.75));
        assert!((m.size().width - 1.05).abs() < 1e-9);
        let top = bounds_of(&m, "m.row0").unwrap();
        let bottom = bounds_of(&m, "m.row1").unwrap();
        assert!((top.min_y - bottom.max_y - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_token_cube_parts() {
        let ctx = SceneContext::default();
        let cube = token_cube(&ctx, "tok", "cat", 1).unwrap();
        let ids: Vec<&str> = cube.shapes().iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["tok.side", "tok.top", "tok.face", "tok.label"]);
        // Depth pushes the box up and to the right of the face.
        assert!((cube.bounds().max_x - 0.62).abs() < 1e-9);
        assert!((cube.bounds().max_y - 0.43).abs() < 1e-9);
    }

    #[test]
    fn test_embedding_bar_height() {
        let ctx = SceneContext::default();
        let bar = embedding_bar(&ctx, "e", 2).unwrap();
        assert_eq!(bar.len(), EMBEDDING_SEGMENTS);
        assert!((bar.size().height - (12.0 * 0.12 + 11.0 * 0.02)).abs() < 1e-9);
        for s in bar.shapes() {
            assert!((0.0..=0.8).contains(&s.fill_opacity()));
        }
    }

    #[test]
    fn test_transformer_stack_grows_upwards() {
        let ctx = SceneContext::default();
        let stack = transformer_stack(&ctx, "enc", Color::BLUE, 4).unwrap();
        let y0 = bounds_of(&stack, "enc.0").unwrap().center().y;
        let y3 = bounds_of(&stack, "enc.3").unwrap().center().y;
        assert!(y3 > y0);
        assert!((stack.size().height - (4.0 * 0.6 + 3.0 * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_dot_column_pitch() {
        let ctx = SceneContext::default();
        let dots = dot_column(&ctx, "d", 4, 0.08, 0.25, Color::ORANGE).unwrap();
        let a = bounds_of(&dots, "d.0").unwrap().center();
        let b = bounds_of(&dots, "d.1").unwrap().center();
        assert!((a.y - b.y - 0.25).abs() < 1e-9);
        assert!(dot_column(&ctx, "d", 4, 0.2, 0.25, Color::ORANGE).is_err());
    }

    #[test]
    fn test_dense_connections_count() {
        let ctx = SceneContext::default();
        let from = [Point2D::new(0.0, 0.0), Point2D::new(0.0, 1.0)];
        let to = [Point2D::new(2.0, 0.0), Point2D::new(2.0, 1.0), Point2D::new(2.0, 2.0)];
        let mesh = dense_connections(&ctx, "mesh", &from, &to, Style::new()).unwrap();
        assert_eq!(mesh.len(), 6);
        assert!(mesh.contains("mesh.5"));
    }

    #[test]
    fn test_random_components_are_seeded() {
        let ctx = SceneContext::default();
        let a = particle_field(&ctx, "p", 20, &mut WeightSampler::new(3)).unwrap();
        let b = particle_field(&ctx, "p", 20, &mut WeightSampler::new(3)).unwrap();
        assert_eq!(a, b);
        for s in a.shapes() {
            assert!(s.bounds().center().x.abs() <= ctx.frame.width / 2.0);
        }

        let net = network_background(&ctx, "net", &mut WeightSampler::new(3)).unwrap();
        assert!(net.contains("net.edges"));
        assert!(net.contains("net.nodes.34"));
        assert!(!net.contains("net.nodes.35"));
    }

    #[test]
    fn test_flow_particles_lie_on_paths() {
        let ctx = SceneContext::default();
        let sources = [Point2D::new(-1.0, 0.0)];
        let sinks = [Point2D::new(1.0, 0.0)];
        let flow =
            flow_particles(&ctx, "f", 5, &sources, &sinks, &mut WeightSampler::new(9)).unwrap();
        for s in flow.shapes() {
            assert!(s.position().y.abs() < 1e-12);
            assert!(s.position().x >= -1.0 && s.position().x <= 1.0);
        }
        let none = flow_particles(&ctx, "f", 5, &[], &sinks, &mut WeightSampler::new(9)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_positional_wave() {
        let ctx = SceneContext::default();
        let wave = positional_wave(&ctx, "w", 5.0, 40).unwrap();
        assert_eq!(wave.len(), 40);
        assert!((wave.size().width - 10.0).abs() < 1e-9);
        assert!(positional_wave(&ctx, "w", 5.0, 0).is_err());
    }

    #[test]
    fn test_attention_head_and_block() {
        let ctx = SceneContext::default();
        let head = attention_head(&ctx, "h", Color::RED, Some(0)).unwrap();
        assert_eq!(head.shapes().len(), 5);
        match head.find("h.number") {
            Some(kinegram_ir::ElementRef::Shape(s)) => match s.kind() {
                kinegram_ir::ShapeKind::Text { content, .. } => assert_eq!(content, "1"),
                other => panic!("unexpected kind {:?}", other),
            },
            other => panic!("unexpected element {:?}", other.map(|e| e.id().clone())),
        }
        let plain = attention_head(&ctx, "p", Color::RED, None).unwrap();
        assert_eq!(plain.shapes().len(), 4);
        assert!(!plain.contains("p.number"));
        let block = layer_block(&ctx, "b", Color::BLUE, 3).unwrap();
        assert!((block.size().width - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_vector_cells_shading_and_labels() {
        let ctx = SceneContext::default();
        let plain = vector_cells(&ctx, "q", &[0.8, 1.7, -0.2], 0.4, Color::RED, false).unwrap();
        let ids: Vec<&str> = plain.children().iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["q.0", "q.1", "q.2"]);
        let opacities: Vec<f64> = plain.shapes().iter().map(|s| s.fill_opacity()).collect();
        assert_eq!(opacities, vec![0.8, 1.0, 0.0]);
        assert!((plain.size().height - 1.2).abs() < 1e-9);

        let labelled = vector_cells(&ctx, "k", &[0.6, 0.4], 0.4, Color::GREEN, true).unwrap();
        match labelled.find("k.1.value") {
            Some(kinegram_ir::ElementRef::Shape(s)) => match s.kind() {
                kinegram_ir::ShapeKind::Text { content, .. } => assert_eq!(content, "0.4"),
                other => panic!("unexpected kind {:?}", other),
            },
            other => panic!("unexpected element {:?}", other.map(|e| e.id().clone())),
        }
        let cell = bounds_of(&labelled, "k.1.box").unwrap();
        let value = bounds_of(&labelled, "k.1.value").unwrap();
        assert!(cell.center().distance(&value.center()) < 1e-9);
        assert!(vector_cells(&ctx, "e", &[], 0.4, Color::RED, false).is_err());
    }

    #[test]
    fn test_bracketed_vector_brackets_span_the_cells() {
        let ctx = SceneContext::default();
        let v = bracketed_vector(&ctx, "v", &[0.5; 6], 0.3, Color::BLUE).unwrap();
        let cells = bounds_of(&v, "v.cells").unwrap();
        let open = bounds_of(&v, "v.open").unwrap();
        let close = bounds_of(&v, "v.close").unwrap();
        assert!((cells.height() - 1.8).abs() < 1e-9);
        for b in [open, close] {
            assert!((b.height() - cells.height()).abs() < 1e-9);
            assert!((b.center().y - cells.center().y).abs() < 1e-9);
        }
        assert!((cells.min_x - open.max_x - 0.05).abs() < 1e-9);
        assert!((close.min_x - cells.max_x - 0.05).abs() < 1e-9);
        assert!(v.center().x.abs() < 1e-9);
    }

    #[test]
    fn test_bracket_faces_inwards() {
        let ctx = SceneContext::default();
        let open = bracket(&ctx, "o", 1.0, Direction::Left, Color::WHITE).unwrap();
        let close = bracket(&ctx, "c", 1.0, Direction::Right, Color::WHITE).unwrap();
        let spine_x = |s: &ShapeDescriptor| match s.kind() {
            kinegram_ir::ShapeKind::Polygon { vertices } => vertices[1].x,
            other => panic!("unexpected kind {:?}", other),
        };
        // The spine of `[` is on its left, the spine of `]` on its right.
        assert!(spine_x(&open) < 0.0);
        assert!(spine_x(&close) > 0.0);
        assert!(open.validate().is_ok());
    }

    #[test]
    fn test_gradient_words_run_between_colors() {
        let ctx = SceneContext::default();
        let row = gradient_words(
            &ctx,
            "t",
            "Attention Is All You Need",
            40.0,
            FontWeight::Bold,
            Color::BLACK,
            Color::WHITE,
        )
        .unwrap();
        assert_eq!(row.len(), 5);
        let fills: Vec<Color> = row.shapes().iter().map(|s| s.fill_color()).collect();
        assert_eq!(fills[0], Color::BLACK);
        assert_eq!(fills[4], Color::WHITE);
        let a = bounds_of(&row, "t.0").unwrap();
        let b = bounds_of(&row, "t.1").unwrap();
        assert!(b.min_x > a.max_x);
    }

    #[test]
    fn test_caption_box_centres_its_caption() {
        let ctx = SceneContext::default();
        let caption = ShapeFactory::new(&ctx)
            .text("anything", "Feed\nForward", Some(16.0), Style::new())
            .unwrap()
            .shifted(Point2D::new(5.0, 5.0));
        let node = caption_box(&ctx, "ffn", Size2D::new(2.5, 1.0), Color::BLUE, caption).unwrap();
        assert!(node.contains("ffn.label"));
        assert!(!node.contains("anything"));
        assert_eq!(bounds_of(&node, "ffn.label").unwrap().center(), Point2D::zero());
        assert!((node.size().width - 2.5).abs() < 1e-9);
    }
}
