use kinegram_core::{Color, Direction, KinegramResult, Point2D};
use kinegram_ir::{
    AnimationKind, LayoutChild, LayoutDirective, LayoutNode, Play, Scene, SceneBuilder,
    SceneContext, Style, Track,
};

use crate::components::{bounds_of, child_ids, weight_matrix};
use crate::weights::WeightSampler;

pub const NAME: &str = "attention-basics";

const SENTENCE: &str = "The cat sat on the mat";
/// Index of the query word.
const QUERY: usize = 1;
/// Hand-picked attention of the query word over the sentence.
const QUERY_WEIGHTS: [f64; 6] = [0.1, 0.0, 0.6, 0.05, 0.05, 0.2];
/// Arrows are drawn only for weights at least this large.
const MIN_ARROW_WEIGHT: f64 = 0.05;

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    let shapes = builder.shapes();
    let composer = builder.composer();
    let words: Vec<&str> = SENTENCE.split_whitespace().collect();

    let word_shapes = words
        .iter()
        .enumerate()
        .map(|(i, w)| {
            shapes
                .text(format!("words.{}", i), *w, Some(48.0), Style::new())
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let sentence = composer.arrange(
        "words",
        word_shapes,
        LayoutDirective::row(0.5).at(Point2D::new(0.0, 2.0)),
    )?;
    let word_bounds = sentence
        .children()
        .iter()
        .map(LayoutChild::bounds)
        .collect::<Vec<_>>();

    let rects = word_bounds
        .iter()
        .enumerate()
        .map(|(i, b)| {
            shapes
                .surrounding_rectangle(
                    format!("word_rects.{}", i),
                    b,
                    Some(0.1),
                    Style::new().stroke(Color::GREY, 2.0).fill(Color::GREY, 0.2),
                )
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let rects = LayoutNode::group("word_rects", rects)?;

    let query_bounds = word_bounds[QUERY].expand(0.1);
    let mut arrows = Vec::new();
    for (i, weight) in QUERY_WEIGHTS.iter().enumerate() {
        if i == QUERY || *weight < MIN_ARROW_WEIGHT {
            continue;
        }
        let arrow = shapes.arrow(
            format!("attention_arrows.{}", i),
            word_bounds[QUERY].edge(Direction::Down),
            word_bounds[i].edge(Direction::Down),
            0.1,
            Style::new()
                .color(Color::BLUE_D.lerp(&Color::BLUE, *weight as f32))
                .stroke_width(weight * 8.0),
        )?;
        arrows.push(LayoutChild::from(arrow));
    }
    let arrows = LayoutNode::group("attention_arrows", arrows)?;
    let query_rect = shapes.surrounding_rectangle(
        "query_rect",
        &word_bounds[QUERY],
        Some(0.1),
        Style::new().stroke(Color::YELLOW, 3.0).fill(Color::GREY, 0.2),
    )?;
    let query_label = composer.shape_next_to(
        shapes.text("query_label", "Query", Some(24.0), Style::new().color(Color::YELLOW))?,
        &query_bounds,
        Direction::Up,
        Some(0.1),
    );

    let weights = WeightSampler::new(ctx.seed).row_normalized(words.len());
    let matrix = weight_matrix(ctx, "matrix", &weights, 0.5, 0.0, |w| {
        Style::new().stroke(Color::WHITE, 0.5).fill(Color::BLUE, w)
    })?
    .moved_to(Point2D::new(0.0, -1.0));
    let row_ids = child_ids(&matrix);

    let mut row_labels = Vec::with_capacity(words.len());
    let mut col_labels = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        let row = bounds_of(&matrix, &format!("matrix.row{}", i))?;
        row_labels.push(LayoutChild::from(composer.shape_next_to(
            shapes.text(format!("row_labels.{}", i), *word, Some(20.0), Style::new())?,
            &row,
            Direction::Left,
            Some(0.2),
        )));
        let cell = bounds_of(&matrix, &format!("matrix.row0.{}", i))?;
        col_labels.push(LayoutChild::from(composer.shape_next_to(
            shapes.text(format!("col_labels.{}", i), *word, Some(20.0), Style::new())?,
            &cell,
            Direction::Up,
            Some(0.2),
        )));
    }
    let row_labels = LayoutNode::group("row_labels", row_labels)?;
    let col_labels = LayoutNode::group("col_labels", col_labels)?;
    let row_label_ids = child_ids(&row_labels);
    let col_label_ids = child_ids(&col_labels);

    let matrix_title = composer.shape_next_to(
        shapes.text("matrix_title", "Attention Matrix", Some(36.0), Style::new())?,
        &matrix.bounds(),
        Direction::Up,
        Some(1.0),
    );
    let row_highlight = shapes.surrounding_rectangle(
        "row_highlight",
        &bounds_of(&matrix, &format!("matrix.row{}", QUERY))?,
        Some(0.05),
        Style::new().stroke(Color::YELLOW, 3.0),
    )?;
    let explanation = composer.shape_next_to(
        shapes.text(
            "explanation",
            format!("\"{}\" attends to all other words", words[QUERY]),
            Some(28.0),
            Style::new(),
        )?,
        &matrix.bounds(),
        Direction::Down,
        Some(0.5),
    );

    let word_ids = child_ids(&sentence);
    let rect_ids = child_ids(&rects);
    let arrow_ids = child_ids(&arrows);
    builder
        .add(sentence)
        .add(rects)
        .add(arrows)
        .add(query_rect)
        .add(query_label)
        .add(matrix)
        .add(row_labels)
        .add(col_labels)
        .add(matrix_title)
        .add(row_highlight)
        .add(explanation);

    builder.build_with(|seq| {
        seq.play(
            Track::new(AnimationKind::fade_in_from(Direction::Up, 0.5), word_ids).staggered(0.1),
        )?;
        seq.wait(1.0)?;
        seq.play(Track::new(AnimationKind::fade_in(), rect_ids).staggered(0.1))?;
        seq.wait(1.0)?;
        seq.play(
            Play::new(Track::single(AnimationKind::Create, "query_rect")).with(Track::single(
                AnimationKind::fade_in_from(Direction::Up, 0.2),
                "query_label",
            )),
        )?;
        seq.wait(1.0)?;
        seq.play(Track::new(AnimationKind::Create, arrow_ids).staggered(0.2))?;
        seq.wait(1.0)?;
        seq.play(Track::new(
            AnimationKind::fade_out(),
            ["attention_arrows", "query_rect", "query_label"],
        ))?;
        seq.play(
            Play::new(Track::single(AnimationKind::fade_in(), "matrix_title"))
                .with(Track::new(AnimationKind::fade_in(), row_ids).staggered(0.02))
                .with(Track::new(AnimationKind::fade_in(), row_label_ids).staggered(0.05))
                .with(Track::new(AnimationKind::fade_in(), col_label_ids).staggered(0.05)),
        )?;
        seq.wait(1.0)?;
        seq.play(
            Play::new(Track::single(AnimationKind::Create, "row_highlight")).with(Track::single(
                AnimationKind::fade_in_from(Direction::Down, 0.2),
                "explanation",
            )),
        )?;
        seq.wait(2.0)?;
        Ok(())
    })
}
