use kinegram_core::{Color, Direction, KinegramResult, Point2D};
use kinegram_ir::{
    Alignment, AnimationKind, LayoutChild, LayoutDirective, LayoutNode, Play, Scene,
    SceneBuilder, SceneContext, Style, Track,
};

use crate::components::{bounds_of, bracketed_vector, child_ids};
use crate::weights::WeightSampler;

pub const NAME: &str = "query-key-value";

const EMBEDDING_DIM: usize = 8;
const PROJECTED_DIM: usize = 6;

/// Projection name, weight label, vector color and what the vector asks.
const PROJECTIONS: [(&str, &str, Color, &str); 3] = [
    ("query", "Wq", Color::RED, "Query: What am I looking for?"),
    ("key", "Wk", Color::GREEN, "Key: What do I contain?"),
    ("value", "Wv", Color::BLUE, "Value: What information do I provide?"),
];

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    let shapes = builder.shapes();
    let composer = builder.composer();
    let mut sampler = WeightSampler::new(ctx.seed);
    let mut draw = |n: usize| (0..n).map(|_| sampler.unit()).collect::<Vec<_>>();

    let title = composer.shape_to_edge(
        shapes.text("title", "Query, Key, Value", Some(48.0), Style::new())?,
        Direction::Up,
        None,
    );
    let word = shapes
        .text("word", "cat", Some(36.0), Style::new())?
        .with_position(Point2D::new(-3.0, 1.0));
    let embedding = bracketed_vector(ctx, "embedding", &draw(EMBEDDING_DIM), 0.3, Color::GREY)?
        .next_to(&word.bounds(), Direction::Down, 0.5);
    let embedding_label = composer.shape_next_to(
        shapes.text("embedding_label", "Embedding", Some(24.0), Style::new())?,
        &embedding.bounds(),
        Direction::Down,
        Some(0.1),
    );

    let vectors = PROJECTIONS
        .iter()
        .map(|(id, _, color, _)| {
            bracketed_vector(ctx, *id, &draw(PROJECTED_DIM), 0.3, *color).map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let vectors = composer.arrange(
        "vectors",
        vectors,
        LayoutDirective::row(1.5).at(Point2D::new(2.0, 0.0)),
    )?;

    let fork = embedding.bounds().edge(Direction::Right);
    let mut labels = Vec::with_capacity(PROJECTIONS.len());
    let mut arrows = Vec::with_capacity(PROJECTIONS.len());
    let mut weights = Vec::with_capacity(PROJECTIONS.len());
    for (i, (id, weight, color, _)) in PROJECTIONS.iter().enumerate() {
        let name = format!("{}{}", &id[..1].to_uppercase(), &id[1..]);
        let target = bounds_of(&vectors, id)?;
        labels.push(LayoutChild::from(composer.shape_next_to(
            shapes.text(format!("{}_label", id), name, Some(24.0), Style::new().color(*color))?,
            &target,
            Direction::Down,
            Some(0.1),
        )));
        let arrow = shapes.arrow(
            format!("projections.{}", i),
            fork,
            target.edge(Direction::Left),
            0.2,
            Style::new().color(*color),
        )?;
        weights.push(LayoutChild::from(composer.shape_next_to(
            shapes.text(format!("weights.{}", i), *weight, Some(28.0), Style::new().color(*color))?,
            &arrow.bounds(),
            Direction::Up,
            Some(0.05),
        )));
        arrows.push(LayoutChild::from(arrow));
    }
    let labels = LayoutNode::group("vector_labels", labels)?;
    let arrows = LayoutNode::group("projections", arrows)?;
    let weights = LayoutNode::group("weights", weights)?;

    let lines = PROJECTIONS
        .iter()
        .enumerate()
        .map(|(i, (_, _, color, line))| {
            shapes
                .text(format!("explanation.{}", i), *line, Some(24.0), Style::new().color(*color))
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let explanation = composer.to_edge(
        composer.arrange(
            "explanation",
            lines,
            LayoutDirective::column(0.2).with_alignment(Alignment::Start),
        )?,
        Direction::Down,
        Some(0.5),
    );

    let vector_ids = child_ids(&vectors);
    let label_ids = child_ids(&labels);
    let arrow_ids = child_ids(&arrows);
    let weight_ids = child_ids(&weights);
    let line_ids = child_ids(&explanation);
    builder
        .add(title)
        .add(word)
        .add(embedding)
        .add(embedding_label)
        .add(vectors)
        .add(labels)
        .add(arrows)
        .add(weights)
        .add(explanation);

    builder.build_with(|seq| {
        seq.play(Track::single(AnimationKind::Write, "title"))?;
        seq.wait(1.0)?;
        seq.play(Track::new(
            AnimationKind::fade_in(),
            ["word", "embedding", "embedding_label"],
        ))?;
        seq.wait(1.0)?;
        seq.play(
            Play::new(Track::new(AnimationKind::grow_from(fork), arrow_ids).staggered(0.2))
                .with(Track::new(AnimationKind::fade_in(), weight_ids).staggered(0.2)),
        )?;
        seq.play(
            Play::new(
                Track::new(AnimationKind::fade_in_from(Direction::Right, 0.3), vector_ids)
                    .staggered(0.2),
            )
            .with(Track::new(AnimationKind::fade_in(), label_ids).staggered(0.2)),
        )?;
        seq.wait(1.0)?;
        seq.play(
            Track::new(AnimationKind::fade_in_from(Direction::Up, 0.2), line_ids).staggered(0.3),
        )?;
        seq.wait(2.0)?;
        Ok(())
    })
}
