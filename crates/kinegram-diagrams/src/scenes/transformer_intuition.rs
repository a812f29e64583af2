//! A narrated walk from "words in, words out" to the full transformer block,
//! told through one example sentence instead of formulas.
//!
//! Each segment owns a top-level group named after it (`hook`, `idea`,
//! `example`, `qkv`, `heads`, `full`) and clears its own elements before the
//! next one starts.

use kinegram_core::{Bounds, Color, Direction, FontWeight, KinegramResult, Point2D, Size2D};
use kinegram_ir::{
    AnimationKind, AnimationSequencer, LayoutChild, LayoutComposer, LayoutDirective, LayoutNode,
    Play, Scene, SceneBuilder, SceneContext, ShapeFactory, Style, Track, TransformChange,
};

use crate::components::{attention_head, bounds_of, bracket, caption_box, gradient_words};
use crate::palette::{
    AMBER, AQUA, DUSK, EMERALD, GLOW_PURPLE, LAVENDER, MIDNIGHT, MIST, ROSE, SKY,
};

pub const NAME: &str = "transformer-intuition";

const WORDS: [&str; 6] = ["The", "cat", "sat", "on", "the", "mat"];
/// The word every example is told from.
const FOCUS: usize = 2;
/// How much "sat" attends to each word; "cat" and "mat" stand out.
const ATTENTION: [f64; 6] = [0.05, 0.5, 0.1, 0.1, 0.05, 0.2];
/// Bar height per unit of attention.
const BAR_SCALE: f64 = 3.0;
/// Letter, tint, question and horizontal offset of each projection card.
const CARDS: [(&str, Color, &str, f64); 3] = [
    ("Q", ROSE, "What am I\nlooking for?", -3.5),
    ("K", AQUA, "What do I\ncontain?", 0.0),
    ("V", GLOW_PURPLE, "What info\ndo I share?", 3.5),
];
/// How far the cards rise before the attention steps are listed.
const CARD_LIFT: Point2D = Point2D::new(0.0, 1.5);
const HEADS: [(Color, &str); 8] = [
    (ROSE, "grammar"),
    (AMBER, "meaning"),
    (AQUA, "position"),
    (SKY, "entities"),
    (GLOW_PURPLE, "syntax"),
    (LAVENDER, "coreference"),
    (ROSE, "sentiment"),
    (EMERALD, "logic"),
];
/// The single head grows into this member of the row.
const FIRST_HEAD: usize = 3;

/// Points the script grows arrows from.
struct Cast {
    qkv_fork: Point2D,
    connect_from: Point2D,
    input_from: Point2D,
    output_from: Point2D,
}

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    builder.background(MIDNIGHT);

    let (qkv, qkv_fork) = qkv_group(ctx)?;
    let (full, connect_from, input_from, output_from) = full_group(ctx)?;
    let cast = Cast {
        qkv_fork,
        connect_from,
        input_from,
        output_from,
    };
    builder
        .add(hook_group(ctx)?)
        .add(idea_group(ctx)?)
        .add(example_group(ctx)?)
        .add(qkv)
        .add(heads_group(ctx)?)
        .add(full);

    builder.build_with(|seq| {
        hook_segment(seq)?;
        idea_segment(seq)?;
        example_segment(seq)?;
        qkv_segment(seq, &cast)?;
        heads_segment(seq)?;
        full_segment(seq, &cast)
    })
}

fn word_row(
    ctx: &SceneContext,
    id: &str,
    font_size: f64,
    directive: LayoutDirective,
) -> KinegramResult<LayoutNode> {
    let shapes = ShapeFactory::new(ctx);
    let words = WORDS
        .iter()
        .enumerate()
        .map(|(i, w)| {
            shapes
                .text(format!("{}.{}", id, i), *w, Some(font_size), Style::new().color(MIST))
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    LayoutComposer::new(ctx).arrange(id, words, directive)
}

fn word_bounds(words: &LayoutNode) -> Vec<Bounds> {
    words.children().iter().map(LayoutChild::bounds).collect()
}

fn hook_group(ctx: &SceneContext) -> KinegramResult<LayoutNode> {
    let shapes = ShapeFactory::new(ctx);
    let composer = LayoutComposer::new(ctx);
    let user = shapes.text(
        "hook.user",
        "What is the meaning of life?",
        Some(32.0),
        Style::new().color(MIST),
    )?;
    let dots = composer.shape_next_to(
        shapes.text("hook.dots", "...", Some(48.0), Style::new().color(SKY))?,
        &user.bounds(),
        Direction::Down,
        Some(0.5),
    );
    let response = composer.shape_next_to(
        shapes.text(
            "hook.response",
            "The meaning of life is a profound question...",
            Some(28.0),
            Style::new().color(AQUA),
        )?,
        &dots.bounds(),
        Direction::Down,
        Some(0.5),
    );
    let secret = shapes.text("hook.secret", "The secret?", Some(40.0), Style::new().color(AMBER))?;
    let title = gradient_words(
        ctx,
        "hook.title",
        "The Transformer",
        56.0,
        FontWeight::Bold,
        SKY,
        GLOW_PURPLE,
    )?;
    LayoutNode::group(
        "hook",
        vec![user.into(), dots.into(), response.into(), secret.into(), title.into()],
    )
}

fn idea_group(ctx: &SceneContext) -> KinegramResult<LayoutNode> {
    let shapes = ShapeFactory::new(ctx);
    let composer = LayoutComposer::new(ctx);
    let title = composer.shape_to_edge(
        shapes.text("idea.title", "The Core Idea", Some(36.0), Style::new().color(SKY))?,
        Direction::Up,
        Some(0.5),
    );
    let words = word_row(ctx, "idea.words", 36.0, LayoutDirective::row(0.6))?;
    let wb = word_bounds(&words);

    let old_label = composer.shape_next_to(
        shapes.text("idea.old_label", "Old way: sequential", Some(20.0), Style::new().color(DUSK))?,
        &words.bounds(),
        Direction::Down,
        Some(1.0),
    );
    let arrows = wb
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            shapes
                .arrow(
                    format!("idea.seq_arrows.{}", i),
                    pair[0].edge(Direction::Right),
                    pair[1].edge(Direction::Left),
                    0.1,
                    Style::new().color(DUSK).stroke_width(2.0),
                )
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let seq_arrows = LayoutNode::group("idea.seq_arrows", arrows)?;

    let highlight = shapes.surrounding_rectangle(
        "idea.highlight",
        &wb[FOCUS],
        Some(0.1),
        Style::new().stroke(AMBER, 3.0),
    )?;
    let mut lines: Vec<LayoutChild> = Vec::with_capacity(WORDS.len() - 1);
    for (i, b) in wb.iter().enumerate() {
        if i == FOCUS {
            continue;
        }
        lines.push(
            shapes
                .line(
                    format!("idea.connections.{}", i),
                    wb[FOCUS].center(),
                    b.center(),
                    Style::new().stroke(SKY, 2.0).stroke_opacity(0.6),
                )?
                .into(),
        );
    }
    let connections = LayoutNode::group("idea.connections", lines)?;
    let new_label = composer.shape_next_to(
        shapes.text(
            "idea.new_label",
            "Transformer: every word sees every word",
            Some(24.0),
            Style::new().color(AMBER),
        )?,
        &words.bounds(),
        Direction::Down,
        Some(1.5),
    );
    let attention = composer.shape_next_to(
        shapes.styled_text(
            "idea.attention",
            "ATTENTION",
            Some(48.0),
            FontWeight::Bold,
            Style::new().color(GLOW_PURPLE),
        )?,
        &new_label.bounds(),
        Direction::Down,
        Some(0.5),
    );

    LayoutNode::group(
        "idea",
        vec![
            title.into(),
            words.into(),
            old_label.into(),
            seq_arrows.into(),
            highlight.into(),
            connections.into(),
            new_label.into(),
            attention.into(),
        ],
    )
}

fn example_group(ctx: &SceneContext) -> KinegramResult<LayoutNode> {
    let shapes = ShapeFactory::new(ctx);
    let composer = LayoutComposer::new(ctx);
    let words = word_row(
        ctx,
        "example.words",
        40.0,
        LayoutDirective::row(0.5).at(Point2D::new(0.0, 1.5)),
    )?;
    let wb = word_bounds(&words);
    let highlight = shapes.surrounding_rectangle(
        "example.highlight",
        &wb[FOCUS],
        Some(0.1),
        Style::new().stroke(AMBER, 3.0),
    )?;
    let question = composer.shape_next_to(
        shapes.text(
            "example.question",
            "Processing 'sat' — which words matter?",
            Some(24.0),
            Style::new().color(MIST),
        )?,
        &words.bounds(),
        Direction::Up,
        Some(0.5),
    );

    // Bars stand on one baseline; the tallest tops out just under the words.
    let tallest = ATTENTION.iter().copied().fold(0.0, f64::max) * BAR_SCALE;
    let baseline = words.bounds().min_y - 0.3 - tallest;
    let mut bars: Vec<LayoutChild> = Vec::with_capacity(WORDS.len());
    let mut labels: Vec<LayoutChild> = Vec::with_capacity(WORDS.len());
    for (i, (b, weight)) in wb.iter().zip(ATTENTION).enumerate() {
        let height = weight * BAR_SCALE;
        let bar = shapes
            .rectangle(
                format!("example.bars.{}", i),
                0.4,
                height,
                Style::new().fill(SKY, 0.7 + weight * 0.3).stroke_width(0.0),
            )?
            .with_position(Point2D::new(b.center().x, baseline + height / 2.0));
        labels.push(
            composer
                .shape_next_to(
                    shapes.text(
                        format!("example.labels.{}", i),
                        format!("{:.0}%", weight * 100.0),
                        Some(16.0),
                        Style::new().color(MIST),
                    )?,
                    &bar.bounds(),
                    Direction::Down,
                    Some(0.1),
                )
                .into(),
        );
        bars.push(bar.into());
    }
    let bars = LayoutNode::group("example.bars", bars)?;
    let labels = LayoutNode::group("example.labels", labels)?;

    let glow = |id: &str, word: usize, color: Color| {
        shapes.surrounding_rectangle(id, &wb[word], Some(0.1), Style::new().stroke(color, 3.0))
    };
    let cat_glow = glow("example.cat_glow", 1, SKY)?;
    let mat_glow = glow("example.mat_glow", 5, AQUA)?;
    let cat_note = composer
        .shape_next_to(
            shapes.text("example.cat_note", "'cat' — who's sitting", Some(20.0), Style::new().color(SKY))?,
            &bars.bounds(),
            Direction::Down,
            Some(0.8),
        )
        .shifted(Point2D::new(-2.0, 0.0));
    let mat_note = composer.shape_next_to(
        shapes.text("example.mat_note", "'mat' — where", Some(20.0), Style::new().color(AQUA))?,
        &cat_note.bounds(),
        Direction::Right,
        Some(1.5),
    );

    LayoutNode::group(
        "example",
        vec![
            words.into(),
            highlight.into(),
            question.into(),
            bars.into(),
            labels.into(),
            cat_glow.into(),
            mat_glow.into(),
            cat_note.into(),
            mat_note.into(),
        ],
    )
}

fn qkv_group(ctx: &SceneContext) -> KinegramResult<(LayoutNode, Point2D)> {
    let shapes = ShapeFactory::new(ctx);
    let composer = LayoutComposer::new(ctx);
    let word = shapes
        .text("qkv.word", "sat", Some(48.0), Style::new().color(AMBER))?
        .with_position(Point2D::new(0.0, 2.0));

    let mut cards: Vec<LayoutChild> = Vec::with_capacity(CARDS.len());
    for (letter, color, question, x) in CARDS {
        let id = format!("qkv.boxes.{}", letter.to_lowercase());
        let caption = shapes.styled_text(
            format!("{}.letter", id),
            letter,
            Some(36.0),
            FontWeight::Bold,
            Style::new().color(color),
        )?;
        let card = caption_box(ctx, format!("{}.card", id), Size2D::new(1.8, 1.2), color, caption)?;
        let desc = composer.shape_next_to(
            shapes.text(format!("{}.desc", id), question, Some(14.0), Style::new().color(MIST))?,
            &card.bounds(),
            Direction::Down,
            Some(0.2),
        );
        cards.push(
            LayoutNode::group(id, vec![card.into(), desc.into()])?
                .translated(Point2D::new(x, -0.5))
                .into(),
        );
    }
    let boxes = LayoutNode::group("qkv.boxes", cards)?;

    let fork = word.bounds().edge(Direction::Down);
    let card_bounds = ["q", "k", "v"]
        .iter()
        .map(|l| bounds_of(&boxes, &format!("qkv.boxes.{}.card", l)))
        .collect::<KinegramResult<Vec<_>>>()?;
    let arrows = card_bounds
        .iter()
        .enumerate()
        .map(|(i, card)| {
            shapes
                .arrow(
                    format!("qkv.arrows.{}", i),
                    fork,
                    card.edge(Direction::Up),
                    0.2,
                    Style::new().color(MIST).stroke_width(2.0),
                )
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let arrows = LayoutNode::group("qkv.arrows", arrows)?;

    // Everything below is laid out against the cards after they have risen.
    let lifted = boxes.bounds().translate(CARD_LIFT);
    let process_title = composer.shape_to_edge(
        shapes.text("qkv.process_title", "The Attention Process", Some(28.0), Style::new().color(MIST))?,
        Direction::Up,
        Some(0.4),
    );
    let step1 = composer.shape_next_to(
        shapes.text(
            "qkv.step1",
            "1. Compare Query with all Keys",
            Some(22.0),
            Style::new().color(ROSE),
        )?,
        &lifted,
        Direction::Down,
        Some(0.8),
    );
    let compare = shapes.arrow(
        "qkv.compare",
        card_bounds[0].translate(CARD_LIFT).edge(Direction::Right),
        card_bounds[1].translate(CARD_LIFT).edge(Direction::Left),
        0.1,
        Style::new().color(AMBER),
    )?;
    let step2 = composer.shape_next_to(
        shapes.text(
            "qkv.step2",
            "2. Convert to probabilities (softmax)",
            Some(22.0),
            Style::new().color(AQUA),
        )?,
        &step1.bounds(),
        Direction::Down,
        Some(0.3),
    );
    let step3 = composer.shape_next_to(
        shapes.text(
            "qkv.step3",
            "3. Weighted sum of Values",
            Some(22.0),
            Style::new().color(GLOW_PURPLE),
        )?,
        &step2.bounds(),
        Direction::Down,
        Some(0.3),
    );

    let group = LayoutNode::group(
        "qkv",
        vec![
            word.into(),
            boxes.into(),
            arrows.into(),
            process_title.into(),
            step1.into(),
            compare.into(),
            step2.into(),
            step3.into(),
        ],
    )?;
    Ok((group, fork))
}

fn heads_group(ctx: &SceneContext) -> KinegramResult<LayoutNode> {
    let shapes = ShapeFactory::new(ctx);
    let composer = LayoutComposer::new(ctx);
    let centre = Point2D::new(0.0, 0.5);
    let title = composer.shape_to_edge(
        shapes.text(
            "heads.title",
            "Multi-Head Attention",
            Some(36.0),
            Style::new().color(GLOW_PURPLE),
        )?,
        Direction::Up,
        Some(0.5),
    );
    let single = attention_head(ctx, "heads.single", SKY, None)?.moved_to(centre);
    let single_label = composer.shape_next_to(
        shapes.text("heads.single_label", "One perspective", Some(20.0), Style::new().color(DUSK))?,
        &single.bounds(),
        Direction::Down,
        Some(0.3),
    );

    let row = HEADS
        .iter()
        .enumerate()
        .map(|(i, (color, _))| {
            attention_head(ctx, format!("heads.row.{}", i), *color, None).map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let row = composer.arrange("heads.row", row, LayoutDirective::row(0.3).at(centre))?;
    let mut labels: Vec<LayoutChild> = Vec::with_capacity(HEADS.len());
    for (i, (head, (color, name))) in row.children().iter().zip(HEADS).enumerate() {
        labels.push(
            composer
                .shape_next_to(
                    shapes.text(format!("heads.labels.{}", i), name, Some(12.0), Style::new().color(color))?,
                    &head.bounds(),
                    Direction::Down,
                    Some(0.15),
                )
                .into(),
        );
    }
    let labels = LayoutNode::group("heads.labels", labels)?;

    let merge_text = composer.shape_next_to(
        shapes.text(
            "heads.merge_text",
            "Combined → richer understanding",
            Some(24.0),
            Style::new().color(AMBER),
        )?,
        &labels.bounds(),
        Direction::Down,
        Some(0.8),
    );
    let merge_point = merge_text.bounds().edge(Direction::Up) + Point2D::new(0.0, 0.3);
    let lines = row
        .children()
        .iter()
        .enumerate()
        .map(|(i, head)| {
            shapes
                .line(
                    format!("heads.merge_lines.{}", i),
                    head.bounds().edge(Direction::Down),
                    merge_point,
                    Style::new().stroke(AMBER, 1.5).stroke_opacity(0.5),
                )
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let merge_lines = LayoutNode::group("heads.merge_lines", lines)?;

    LayoutNode::group(
        "heads",
        vec![
            title.into(),
            single.into(),
            single_label.into(),
            row.into(),
            labels.into(),
            merge_lines.into(),
            merge_text.into(),
        ],
    )
}

/// The full block plus the start points of its three arrows.
fn full_group(ctx: &SceneContext) -> KinegramResult<(LayoutNode, Point2D, Point2D, Point2D)> {
    let shapes = ShapeFactory::new(ctx);
    let composer = LayoutComposer::new(ctx);
    let title = composer.shape_to_edge(
        shapes.text("full.title", "The Full Transformer", Some(36.0), Style::new().color(SKY))?,
        Direction::Up,
        Some(0.4),
    );
    let block = |id: &str, text: &str, color: Color| -> KinegramResult<LayoutNode> {
        let caption = shapes.text(format!("{}.text", id), text, Some(16.0), Style::new().color(MIST))?;
        caption_box(ctx, id, Size2D::new(2.5, 1.0), color, caption)
    };
    let attention =
        block("full.attention", "Multi-Head\nAttention", GLOW_PURPLE)?.translated(Point2D::new(0.0, -0.5));
    let ffn = block("full.ffn", "Feed\nForward", AQUA)?.next_to(&attention.bounds(), Direction::Up, 0.3);
    let arrow_style = Style::new().color(MIST).stroke_width(2.0);
    let connect_from = attention.bounds().edge(Direction::Up);
    let connect = shapes.arrow(
        "full.connect",
        connect_from,
        ffn.bounds().edge(Direction::Down),
        0.1,
        arrow_style.clone(),
    )?;

    let span = attention.bounds().union(&ffn.bounds());
    let brace = composer.shape_next_to(
        bracket(ctx, "full.brace", span.height(), Direction::Right, DUSK)?,
        &span,
        Direction::Right,
        None,
    );
    let stack_label = composer.shape_next_to(
        shapes.text("full.stack_label", "× N layers", Some(20.0), Style::new().color(DUSK))?,
        &brace.bounds(),
        Direction::Right,
        Some(0.2),
    );
    let input_label = composer.shape_next_to(
        shapes.text("full.input_label", "Input tokens", Some(18.0), Style::new().color(MIST))?,
        &attention.bounds(),
        Direction::Down,
        Some(0.5),
    );
    let output_label = composer.shape_next_to(
        shapes.text("full.output_label", "Output", Some(18.0), Style::new().color(MIST))?,
        &ffn.bounds(),
        Direction::Up,
        Some(0.5),
    );
    let input_from = input_label.bounds().edge(Direction::Up);
    let input_arrow = shapes.arrow(
        "full.input_arrow",
        input_from,
        attention.bounds().edge(Direction::Down),
        0.1,
        arrow_style.clone(),
    )?;
    let output_from = ffn.bounds().edge(Direction::Up);
    let output_arrow = shapes.arrow(
        "full.output_arrow",
        output_from,
        output_label.bounds().edge(Direction::Down),
        0.1,
        arrow_style,
    )?;
    let stack = LayoutNode::group(
        "full.stack",
        vec![
            attention.into(),
            ffn.into(),
            connect.into(),
            brace.into(),
            stack_label.into(),
            input_label.into(),
            output_label.into(),
            input_arrow.into(),
            output_arrow.into(),
        ],
    )?;
    let final_text = composer.to_edge(
        gradient_words(
            ctx,
            "full.final_text",
            "Attention Is All You Need",
            40.0,
            FontWeight::Bold,
            SKY,
            GLOW_PURPLE,
        )?,
        Direction::Down,
        Some(1.0),
    );

    let group = LayoutNode::group("full", vec![title.into(), stack.into(), final_text.into()])?;
    Ok((group, connect_from, input_from, output_from))
}

fn transform(change: TransformChange, target: &str) -> Track {
    Track::single(AnimationKind::transform(change), target)
}

fn hook_segment(seq: &mut AnimationSequencer<'_>) -> KinegramResult<()> {
    seq.play(Play::new(Track::single(AnimationKind::Write, "hook.user")).run_time(2.0))?;
    seq.wait(0.5)?;
    seq.play(Play::new(Track::single(AnimationKind::fade_in(), "hook.dots")).run_time(0.3))?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_out(), "hook.dots"))
            .with(Track::single(AnimationKind::Write, "hook.response"))
            .run_time(1.5),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::new(AnimationKind::fade_out(), ["hook.user", "hook.response"]))
            .run_time(0.5),
    )?;
    seq.play(Play::new(Track::single(AnimationKind::Write, "hook.secret")).run_time(0.8))?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::replace("hook.title"), "hook.secret")).run_time(1.0),
    )?;
    seq.wait(1.5)?;
    seq.play(Play::new(Track::single(AnimationKind::fade_out(), "hook.title")).run_time(0.5))?;
    Ok(())
}

fn idea_segment(seq: &mut AnimationSequencer<'_>) -> KinegramResult<()> {
    let words = (0..WORDS.len()).map(|i| format!("idea.words.{}", i));
    let arrows = (0..WORDS.len() - 1).map(|i| format!("idea.seq_arrows.{}", i));
    let connections = (0..WORDS.len())
        .filter(|i| *i != FOCUS)
        .map(|i| format!("idea.connections.{}", i));

    seq.play(Play::new(Track::single(AnimationKind::fade_in(), "idea.title")).run_time(0.5))?;
    seq.play(
        Play::new(
            Track::new(AnimationKind::fade_in_from(Direction::Up, 0.2), words).staggered(0.15),
        )
        .run_time(1.5),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_in(), "idea.old_label"))
            .with(
                Track::new(AnimationKind::grow_from_edge(Direction::Left), arrows).staggered(0.1),
            )
            .run_time(1.0),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            ["idea.seq_arrows", "idea.old_label"],
        ))
        .run_time(0.5),
    )?;
    seq.play(
        Play::new(Track::single(AnimationKind::Create, "idea.highlight"))
            .with(transform(
                TransformChange::new().color(AMBER),
                &format!("idea.words.{}", FOCUS),
            ))
            .run_time(0.5),
    )?;
    seq.play(
        Play::new(Track::new(AnimationKind::Create, connections).staggered(0.1))
            .with(Track::single(AnimationKind::fade_in(), "idea.new_label"))
            .run_time(1.5),
    )?;
    seq.wait(1.5)?;
    seq.play(Play::new(Track::single(AnimationKind::Write, "idea.attention")).run_time(1.0))?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            [
                "idea.title",
                "idea.words",
                "idea.highlight",
                "idea.connections",
                "idea.new_label",
                "idea.attention",
            ],
        ))
        .run_time(0.6),
    )?;
    Ok(())
}

fn example_segment(seq: &mut AnimationSequencer<'_>) -> KinegramResult<()> {
    let bars = (0..WORDS.len()).map(|i| format!("example.bars.{}", i));
    let labels = (0..WORDS.len()).map(|i| format!("example.labels.{}", i));

    seq.play(Play::new(Track::single(AnimationKind::fade_in(), "example.words")).run_time(0.8))?;
    seq.play(
        Play::new(Track::single(AnimationKind::Create, "example.highlight"))
            .with(transform(
                TransformChange::new().color(AMBER),
                &format!("example.words.{}", FOCUS),
            ))
            .with(Track::single(AnimationKind::fade_in(), "example.question"))
            .run_time(1.0),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::new(AnimationKind::grow_from_edge(Direction::Down), bars).staggered(0.1))
            .run_time(1.5),
    )?;
    seq.play(
        Play::new(Track::new(AnimationKind::fade_in(), labels).staggered(0.05)).run_time(0.5),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::Create,
            ["example.cat_glow", "example.mat_glow"],
        ))
        .with(transform(TransformChange::new().color(SKY), "example.words.1"))
        .with(transform(TransformChange::new().color(AQUA), "example.words.5"))
        .run_time(0.8),
    )?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::Write,
            ["example.cat_note", "example.mat_note"],
        ))
        .run_time(1.0),
    )?;
    seq.wait(2.0)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            [
                "example.words",
                "example.highlight",
                "example.question",
                "example.bars",
                "example.labels",
                "example.cat_glow",
                "example.mat_glow",
                "example.cat_note",
                "example.mat_note",
            ],
        ))
        .run_time(0.6),
    )?;
    Ok(())
}

fn qkv_segment(seq: &mut AnimationSequencer<'_>, cast: &Cast) -> KinegramResult<()> {
    let arrows = (0..CARDS.len()).map(|i| format!("qkv.arrows.{}", i));

    seq.play(Play::new(Track::single(AnimationKind::fade_in(), "qkv.word")).run_time(0.5))?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(Track::new(AnimationKind::grow_from(cast.qkv_fork), arrows).staggered(0.2))
            .run_time(1.0),
    )?;
    seq.play(
        Play::new(
            Track::new(
                AnimationKind::fade_in_from(Direction::Down, 0.2),
                ["qkv.boxes.q", "qkv.boxes.k", "qkv.boxes.v"],
            )
            .staggered(0.3),
        )
        .run_time(1.5),
    )?;
    seq.wait(2.0)?;
    seq.play(
        Play::new(Track::new(AnimationKind::fade_out(), ["qkv.word", "qkv.arrows"]))
            .with(transform(TransformChange::new().shift(CARD_LIFT), "qkv.boxes"))
            .run_time(0.6),
    )?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_in(), "qkv.process_title")).run_time(0.5),
    )?;
    seq.play(
        Play::new(Track::single(AnimationKind::Write, "qkv.step1"))
            .with(Track::single(AnimationKind::Create, "qkv.compare"))
            .run_time(1.0),
    )?;
    seq.wait(1.0)?;
    seq.play(Play::new(Track::single(AnimationKind::Write, "qkv.step2")).run_time(0.8))?;
    seq.wait(1.0)?;
    seq.play(Play::new(Track::single(AnimationKind::Write, "qkv.step3")).run_time(0.8))?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            [
                "qkv.boxes",
                "qkv.process_title",
                "qkv.step1",
                "qkv.step2",
                "qkv.step3",
                "qkv.compare",
            ],
        ))
        .run_time(0.6),
    )?;
    Ok(())
}

fn heads_segment(seq: &mut AnimationSequencer<'_>) -> KinegramResult<()> {
    let others = (0..HEADS.len())
        .filter(|i| *i != FIRST_HEAD)
        .map(|i| format!("heads.row.{}", i));
    let labels = (0..HEADS.len()).map(|i| format!("heads.labels.{}", i));
    let lines = (0..HEADS.len()).map(|i| format!("heads.merge_lines.{}", i));

    seq.play(Play::new(Track::single(AnimationKind::fade_in(), "heads.title")).run_time(0.5))?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_in(),
            ["heads.single", "heads.single_label"],
        ))
        .run_time(0.8),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_out(), "heads.single_label")).run_time(0.3),
    )?;
    seq.play(
        Play::new(Track::single(
            AnimationKind::replace(format!("heads.row.{}", FIRST_HEAD)),
            "heads.single",
        ))
        .run_time(0.5),
    )?;
    seq.play(
        Play::new(
            Track::new(
                AnimationKind::FadeIn {
                    shift: Point2D::zero(),
                    scale: 0.8,
                },
                others,
            )
            .staggered(0.1),
        )
        .run_time(1.5),
    )?;
    seq.play(
        Play::new(Track::new(AnimationKind::fade_in(), labels).staggered(0.05)).run_time(0.8),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::new(AnimationKind::Create, lines).staggered(0.05)).run_time(1.0),
    )?;
    seq.play(Play::new(Track::single(AnimationKind::Write, "heads.merge_text")).run_time(0.8))?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            [
                "heads.title",
                "heads.row",
                "heads.labels",
                "heads.merge_lines",
                "heads.merge_text",
            ],
        ))
        .run_time(0.6),
    )?;
    Ok(())
}

fn full_segment(seq: &mut AnimationSequencer<'_>, cast: &Cast) -> KinegramResult<()> {
    let rise = AnimationKind::fade_in_from(Direction::Up, 0.2);
    seq.play(Play::new(Track::single(AnimationKind::fade_in(), "full.title")).run_time(0.5))?;
    seq.play(Play::new(Track::single(rise.clone(), "full.attention")).run_time(0.8))?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::grow_from(cast.connect_from), "full.connect"))
            .with(Track::single(rise, "full.ffn"))
            .run_time(0.8),
    )?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::grow(), "full.brace"))
            .with(Track::single(AnimationKind::fade_in(), "full.stack_label"))
            .run_time(0.6),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_in(),
            ["full.input_label", "full.output_label"],
        ))
        .with(Track::single(AnimationKind::grow_from(cast.input_from), "full.input_arrow"))
        .with(Track::single(AnimationKind::grow_from(cast.output_from), "full.output_arrow"))
        .run_time(0.8),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(transform(
            TransformChange::new().scale(0.7).shift(Point2D::new(0.0, 0.5)),
            "full.stack",
        ))
        .run_time(0.8),
    )?;
    seq.play(Play::new(Track::single(AnimationKind::Write, "full.final_text")).run_time(1.5))?;
    seq.wait(2.0)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            ["full.title", "full.stack", "full.final_text"],
        ))
        .run_time(1.5),
    )?;
    Ok(())
}
