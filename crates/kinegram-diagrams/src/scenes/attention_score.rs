use kinegram_core::{Color, Direction, KinegramResult, Point2D};
use kinegram_ir::{
    AnimationKind, LayoutChild, LayoutDirective, Scene, SceneBuilder, SceneContext, Style, Track,
};

use crate::components::vector_cells;

pub const NAME: &str = "attention-score";

const QUERY: [f64; 4] = [0.8, 0.3, 0.5, 0.1];
const KEY: [f64; 4] = [0.6, 0.4, 0.7, 0.2];

/// Each product written out, e.g. `0.8×0.6 + 0.3×0.4`.
fn expand_dot(a: &[f64], b: &[f64]) -> String {
    a.iter()
        .zip(b)
        .map(|(x, y)| format!("{:.1}×{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    let shapes = builder.shapes();
    let composer = builder.composer();

    let query_word = shapes
        .text("query_word", "cat", Some(36.0), Style::new().color(Color::RED))?
        .with_position(Point2D::new(-3.0, 2.0));
    let key_word = shapes
        .text("key_word", "sat", Some(36.0), Style::new().color(Color::GREEN))?
        .with_position(Point2D::new(3.0, 2.0));
    let query = vector_cells(ctx, "query", &QUERY, 0.4, Color::RED, true)?.next_to(
        &query_word.bounds(),
        Direction::Down,
        0.5,
    );
    let key = vector_cells(ctx, "key", &KEY, 0.4, Color::GREEN, true)?.next_to(
        &key_word.bounds(),
        Direction::Down,
        0.5,
    );
    let query_label = composer.shape_next_to(
        shapes.text("query_label", "Query", Some(24.0), Style::new())?,
        &query.bounds(),
        Direction::Down,
        Some(0.1),
    );
    let key_label = composer.shape_next_to(
        shapes.text("key_label", "Key", Some(24.0), Style::new())?,
        &key.bounds(),
        Direction::Down,
        Some(0.1),
    );

    let terms: Vec<LayoutChild> = vec![
        shapes.text("dot.lhs", "Q · K = ", Some(36.0), Style::new())?.into(),
        shapes
            .text("dot.terms", expand_dot(&QUERY, &KEY), Some(24.0), Style::new())?
            .into(),
        shapes
            .text("dot.result", format!("= {:.2}", dot(&QUERY, &KEY)), Some(36.0), Style::new())?
            .into(),
    ];
    let product = composer.arrange(
        "dot",
        terms,
        LayoutDirective::row(0.25).at(Point2D::new(0.0, -1.0)),
    )?;
    let softmax_note = composer.shape_next_to(
        shapes.text(
            "softmax_note",
            "→ Apply softmax across all keys to get attention weights",
            Some(24.0),
            Style::new(),
        )?,
        &product.bounds(),
        Direction::Down,
        Some(0.5),
    );

    builder
        .add(query_word)
        .add(key_word)
        .add(query)
        .add(key)
        .add(query_label)
        .add(key_label)
        .add(product)
        .add(softmax_note);

    builder.build_with(|seq| {
        seq.play(Track::new(
            AnimationKind::fade_in(),
            ["query_word", "key_word", "query", "key", "query_label", "key_label"],
        ))?;
        seq.wait(1.0)?;
        seq.play(Track::single(AnimationKind::Write, "dot.lhs"))?;
        seq.play(Track::single(AnimationKind::Write, "dot.terms"))?;
        seq.wait(1.0)?;
        seq.play(Track::single(AnimationKind::Write, "dot.result"))?;
        seq.wait(1.0)?;
        seq.play(Track::single(
            AnimationKind::fade_in_from(Direction::Down, 0.2),
            "softmax_note",
        ))?;
        seq.wait(2.0)?;
        Ok(())
    })
}
