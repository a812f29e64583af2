use kinegram_core::{Color, Direction, KinegramResult, Point2D};
use kinegram_ir::{
    AnimationKind, LayoutChild, LayoutComposer, LayoutNode, Play, Scene, SceneBuilder, SceneContext,
    ShapeDescriptor, ShapeFactory, Style, Track, TransformChange,
};

use crate::components::{bounds_of, cell_grid, child_ids, dense_connections, dot_column};

pub const NAME: &str = "cnn-explainer";

/// Distance the filter moves per stride, two input cells.
const STRIDE: f64 = 0.8;
/// Arrows between stages start and end this far from the stage edges.
const ARROW_GAP: f64 = 0.2;

/// A stage body with its caption underneath, centred on `at`.
fn captioned(
    ctx: &SceneContext,
    id: &str,
    body: LayoutNode,
    caption: &str,
    size: f64,
    at: Point2D,
) -> KinegramResult<LayoutNode> {
    let label = LayoutComposer::new(ctx).shape_next_to(
        ShapeFactory::new(ctx).text(format!("{}_label", id), caption, Some(size), Style::new())?,
        &body.bounds(),
        Direction::Down,
        Some(0.2),
    );
    Ok(LayoutNode::group(id, vec![body.into(), label.into()])?.moved_to(at))
}

/// An arrow between two stages with a caption above it.
fn stage_arrow(
    ctx: &SceneContext,
    id: &str,
    from: Point2D,
    to: Point2D,
    buff: f64,
    caption: Option<&str>,
) -> KinegramResult<(ShapeDescriptor, Option<ShapeDescriptor>)> {
    let shapes = ShapeFactory::new(ctx);
    let arrow = shapes.arrow(id, from, to, buff, Style::new().stroke_width(3.0))?;
    let text = match caption {
        Some(caption) => Some(LayoutComposer::new(ctx).shape_next_to(
            shapes.text(format!("{}_text", id), caption, Some(18.0), Style::new())?,
            &arrow.bounds(),
            Direction::Up,
            Some(0.1),
        )),
        None => None,
    };
    Ok((arrow, text))
}

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    let shapes = builder.shapes();
    let composer = builder.composer();
    let right = |x: f64| Point2D::new(x, 0.0);

    let title = composer.shape_to_edge(
        shapes.text("title", "How a CNN Works", Some(42.0), Style::new())?,
        Direction::Up,
        Some(0.3),
    );

    let input = captioned(
        ctx,
        "input",
        cell_grid(ctx, "input_grid", 5, 5, 0.4, Color::BLUE_D)?,
        "Input Image",
        24.0,
        right(-5.0),
    )?;
    let input_grid = bounds_of(&input, "input_grid")?;

    let filter_grid = cell_grid(ctx, "filter_grid", 3, 3, 0.4, Color::YELLOW)?
        .moved_to(input_grid.center() + Point2D::new(-0.4, 0.4));
    let filter_label = composer.shape_next_to(
        shapes.text("filter_label", "Filter", Some(20.0), Style::new())?,
        &filter_grid.bounds(),
        Direction::Up,
        Some(0.1),
    );
    let filter = LayoutNode::group("filter", vec![filter_grid.into(), filter_label.into()])?;

    let feature = captioned(
        ctx,
        "feature",
        cell_grid(ctx, "feature_grid", 3, 3, 0.4, Color::GREEN)?,
        "Feature Map",
        24.0,
        right(-1.5),
    )?;
    let feature_grid = bounds_of(&feature, "feature_grid")?;
    let (conv_arrow, conv_text) = stage_arrow(
        ctx,
        "conv_arrow",
        input_grid.edge(Direction::Right) + right(ARROW_GAP),
        feature_grid.edge(Direction::Left) - right(ARROW_GAP),
        0.1,
        Some("Convolution"),
    )?;

    let pooled = captioned(
        ctx,
        "pooled",
        cell_grid(ctx, "pooled_grid", 2, 2, 0.5, Color::ORANGE)?,
        "Pooled",
        24.0,
        right(1.5),
    )?;
    let pooled_grid = bounds_of(&pooled, "pooled_grid")?;
    let (pool_arrow, pool_text) = stage_arrow(
        ctx,
        "pool_arrow",
        feature_grid.edge(Direction::Right) + right(ARROW_GAP),
        pooled_grid.edge(Direction::Left) - right(ARROW_GAP),
        0.1,
        Some("Max Pool"),
    )?;

    let flatten = dot_column(ctx, "flatten", 4, 0.08, 0.25, Color::ORANGE)?.moved_to(right(3.5));
    let flatten_label = composer.shape_next_to(
        shapes.text("flatten_label", "Flatten", Some(18.0), Style::new())?,
        &flatten.bounds(),
        Direction::Down,
        Some(0.2),
    );
    let (flatten_arrow, _) = stage_arrow(
        ctx,
        "flatten_arrow",
        pooled_grid.edge(Direction::Right) + right(ARROW_GAP),
        flatten.bounds().edge(Direction::Left) - right(ARROW_GAP),
        0.1,
        None,
    )?;

    let fc = dot_column(ctx, "fc", 3, 0.1, 0.35, Color::RED)?.moved_to(right(5.0));
    let fc_label = composer.shape_next_to(
        shapes.text("fc_label", "Output", Some(20.0), Style::new())?,
        &fc.bounds(),
        Direction::Down,
        Some(0.2),
    );
    let centres = |node: &LayoutNode| -> Vec<Point2D> {
        node.shapes().iter().map(|s| s.position()).collect()
    };
    let connections = dense_connections(
        ctx,
        "connections",
        &centres(&flatten),
        &centres(&fc),
        Style::new().stroke(Color::WHITE, 1.0).stroke_opacity(0.4),
    )?;
    let (dense_arrow, dense_text) = stage_arrow(
        ctx,
        "dense_arrow",
        flatten.bounds().edge(Direction::Right) + right(0.15),
        fc.bounds().edge(Direction::Left) - right(0.15),
        0.05,
        Some("Dense"),
    )?;

    let mut outputs: Vec<LayoutChild> = Vec::new();
    for (i, (name, color)) in [("Cat", Color::GREEN), ("Dog", Color::WHITE), ("Bird", Color::WHITE)]
        .into_iter()
        .enumerate()
    {
        let dot = bounds_of(&fc, &format!("fc.{}", i))?;
        outputs.push(
            composer
                .shape_next_to(
                    shapes.text(format!("outputs.{}", i), name, Some(16.0), Style::new().color(color))?,
                    &dot,
                    Direction::Right,
                    Some(0.15),
                )
                .into(),
        );
    }
    let outputs = LayoutNode::group("outputs", outputs)?;
    let winner = bounds_of(&fc, "fc.0")?.union(&bounds_of(&outputs, "outputs.0")?);
    let highlight =
        shapes.surrounding_rectangle("highlight", &winner, Some(0.1), Style::new().color(Color::GREEN))?;

    let summary = composer.shape_to_edge(
        shapes.text(
            "summary",
            "CNN: Extract features → Reduce dimensions → Classify",
            Some(22.0),
            Style::new().color(Color::YELLOW),
        )?,
        Direction::Down,
        Some(0.4),
    );

    let conv_from = input_grid.edge(Direction::Right) + right(ARROW_GAP);
    let pool_from = feature_grid.edge(Direction::Right) + right(ARROW_GAP);
    let flatten_from = pooled_grid.edge(Direction::Right) + right(ARROW_GAP);
    let dense_from = flatten.bounds().edge(Direction::Right) + right(0.15);

    builder.add(title).add(input).add(filter).add(conv_arrow);
    for text in [conv_text, pool_text, dense_text].into_iter().flatten() {
        builder.add(text);
    }
    let output_ids = child_ids(&outputs);
    builder
        .add(feature)
        .add(pool_arrow)
        .add(pooled)
        .add(flatten_arrow)
        .add(flatten)
        .add(flatten_label)
        .add(connections)
        .add(dense_arrow)
        .add(fc)
        .add(fc_label)
        .add(outputs)
        .add(highlight)
        .add(summary);

    let slide = |by: Point2D| {
        Track::single(
            AnimationKind::transform(TransformChange::new().shift(by)),
            "filter",
        )
    };
    let grow = |id: &str, from: Point2D| Track::single(AnimationKind::grow_from(from), id);

    builder.build_with(|seq| {
        seq.play(Play::new(Track::single(AnimationKind::Write, "title")).run_time(0.5))?;
        seq.play(Play::new(Track::single(AnimationKind::fade_in(), "input")).run_time(0.5))?;
        seq.play(Play::new(Track::single(AnimationKind::fade_in(), "filter")).run_time(0.4))?;
        seq.play(Play::new(slide(Point2D::new(STRIDE, 0.0))).run_time(0.3))?;
        seq.play(Play::new(slide(Point2D::new(STRIDE, 0.0))).run_time(0.3))?;
        seq.play(Play::new(slide(Point2D::new(-2.0 * STRIDE, -STRIDE))).run_time(0.3))?;
        seq.play(
            Play::new(Track::single(AnimationKind::fade_out(), "filter"))
                .with(grow("conv_arrow", conv_from))
                .with(Track::single(AnimationKind::fade_in(), "conv_arrow_text"))
                .run_time(0.4),
        )?;
        seq.play(Play::new(Track::single(AnimationKind::fade_in(), "feature")).run_time(0.4))?;
        seq.play(
            Play::new(grow("pool_arrow", pool_from))
                .with(Track::single(AnimationKind::fade_in(), "pool_arrow_text"))
                .run_time(0.4),
        )?;
        seq.play(Play::new(Track::single(AnimationKind::fade_in(), "pooled")).run_time(0.4))?;
        seq.play(Play::new(grow("flatten_arrow", flatten_from)).run_time(0.3))?;
        seq.play(
            Play::new(Track::new(AnimationKind::fade_in(), ["flatten", "flatten_label"]))
                .run_time(0.4),
        )?;
        seq.play(
            Play::new(grow("dense_arrow", dense_from))
                .with(Track::single(AnimationKind::fade_in(), "dense_arrow_text"))
                .run_time(0.3),
        )?;
        seq.play(
            Play::new(Track::new(AnimationKind::fade_in(), ["fc", "fc_label"]))
                .with(Track::single(AnimationKind::Create, "connections"))
                .run_time(0.6),
        )?;
        seq.play(
            Play::new(Track::new(AnimationKind::fade_in(), output_ids).staggered(0.2)).run_time(0.8),
        )?;
        seq.play(Play::new(Track::single(AnimationKind::Create, "highlight")).run_time(0.6))?;
        seq.wait(0.5)?;
        seq.play(Play::new(Track::single(AnimationKind::Write, "summary")).run_time(1.5))?;
        seq.wait(4.0)?;
        Ok(())
    })
}
