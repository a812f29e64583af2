//! A two-minute tour of the transformer: tokens become embeddings, attend to
//! each other through a seeded attention matrix, split across heads and
//! finally take their place in the encoder-decoder stack.
//!
//! Every segment's elements live in the tree from the start. Segments hand
//! the stage over by fading their own elements out.

use kinegram_core::{Direction, Easing, FontWeight, KinegramResult, Point2D};
use kinegram_ir::{
    AnimationKind, AnimationSequencer, ElementId, LayoutChild, LayoutDirective, LayoutNode, Play,
    Scene, SceneBuilder, SceneContext, ShapeDescriptor, Style, Track, TransformChange,
};

use crate::components::{
    attention_head, bounds_of, child_ids, embedding_bar, flow_particles, network_background,
    particle_field, positional_wave, token_cube, transformer_stack, weight_matrix,
};
use crate::palette::{
    ACCENT_BLUE, ACCENT_CORAL, ACCENT_GOLD, ACCENT_PURPLE, ACCENT_TEAL, DEEP_BLUE, GLOW_BLUE,
    HEAD_COLORS, NIGHT, SOFT_WHITE,
};
use crate::weights::WeightSampler;

pub const NAME: &str = "transformer-architecture";

const TOKENS: [&str; 5] = ["The", "cat", "sat", "on", "mat"];
/// Heads that get a caption, with what they pick up on.
const FOCUS: [(usize, &str); 4] = [(0, "syntax"), (2, "semantics"), (4, "position"), (6, "context")];
const STACK_DEPTH: usize = 4;
const STACK_OFFSET: f64 = 2.5;
/// Row of the attention matrix belonging to "cat".
const HIGHLIGHT_ROW: usize = 1;

/// Ids the script needs after the tree has been handed to the builder.
struct Cast {
    tokens: Vec<ElementId>,
    token_arrows: Vec<ElementId>,
    embeddings: Vec<ElementId>,
    embedding_shift: Point2D,
    cells: Vec<ElementId>,
    heads: Vec<ElementId>,
    focus: Vec<ElementId>,
    merge_lines: Vec<ElementId>,
    output_from: Point2D,
    encoder_blocks: Vec<ElementId>,
    decoder_blocks: Vec<ElementId>,
    cross_arrows: Vec<ElementId>,
    flow: Vec<ElementId>,
}

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    builder.background(NIGHT);
    let shapes = builder.shapes();
    let composer = builder.composer();
    let mut sampler = WeightSampler::new(ctx.seed);
    let half_width = ctx.frame.width / 2.0;

    // Intro
    let particles = particle_field(ctx, "particles", 50, &mut sampler)?;
    let network = network_background(ctx, "network", &mut sampler)?;
    let title = shapes.styled_text(
        "title",
        "TRANSFORMER",
        Some(72.0),
        FontWeight::Bold,
        Style::new().color(GLOW_BLUE),
    )?;
    let glow = shapes
        .rectangle(
            "title_glow",
            title.bounds().width() + 1.0,
            title.bounds().height() + 0.5,
            Style::new().fill(GLOW_BLUE, 0.1).stroke_width(0.0),
        )?
        .with_position(title.position());
    let subtitle = composer.shape_next_to(
        shapes.text(
            "subtitle",
            "The Architecture That Changed Everything",
            Some(24.0),
            Style::new().color(SOFT_WHITE).fill_opacity(0.7),
        )?,
        &title.bounds(),
        Direction::Down,
        Some(0.4),
    );
    let intro = LayoutNode::group("intro", vec![glow.into(), title.into(), subtitle.into()])?;

    // Tokens and embeddings
    let cubes = TOKENS
        .iter()
        .enumerate()
        .map(|(i, t)| token_cube(ctx, format!("tokens.{}", i), t, i).map(LayoutChild::from))
        .collect::<KinegramResult<Vec<_>>>()?;
    let tokens = composer.arrange(
        "tokens",
        cubes,
        LayoutDirective::row(0.6).at(Point2D::new(0.0, 2.0)),
    )?;
    let embed_label = shapes
        .styled_text(
            "embed_label",
            "EMBEDDING",
            Some(20.0),
            FontWeight::Bold,
            Style::new().color(ACCENT_BLUE),
        )?
        .with_position(Point2D::new(0.0, 0.5));
    let mut bars: Vec<LayoutChild> = Vec::with_capacity(TOKENS.len());
    let mut arrows: Vec<LayoutChild> = Vec::with_capacity(TOKENS.len());
    for (i, cube) in tokens.children().iter().enumerate() {
        let cube = cube.bounds();
        let bar = embedding_bar(ctx, format!("embeddings.{}", i), i)?.next_to(&cube, Direction::Down, 0.8);
        arrows.push(
            shapes
                .arrow(
                    format!("token_arrows.{}", i),
                    cube.edge(Direction::Down),
                    bar.bounds().edge(Direction::Up),
                    0.15,
                    Style::new().stroke(ACCENT_BLUE, 2.0).stroke_opacity(0.6),
                )?
                .into(),
        );
        bars.push(bar.into());
    }
    let embeddings = LayoutNode::group("embeddings", bars)?;
    let token_arrows = LayoutNode::group("token_arrows", arrows)?;
    let wave = positional_wave(ctx, "position_wave", 5.0, 50)?.translated(Point2D::new(0.0, -1.5));
    let position_label = composer.shape_next_to(
        shapes.text("position_label", "+ POSITION", Some(18.0), Style::new().color(ACCENT_GOLD))?,
        &wave.bounds(),
        Direction::Left,
        Some(0.3),
    );

    // The embeddings rise and shrink, then slide to the left margin.
    let resting = embeddings.bounds();
    let raised_centre = resting.center() + Point2D::new(0.0, 2.5);
    let parked_x = -half_width + 1.0 + resting.width() * 0.8 / 2.0;
    let embedding_shift = Point2D::new(parked_x - raised_centre.x, -0.5);

    // Self-attention
    let attention_title = composer.shape_to_edge(
        shapes.styled_text(
            "attention_title",
            "SELF-ATTENTION",
            Some(28.0),
            FontWeight::Bold,
            Style::new().color(ACCENT_GOLD),
        )?,
        Direction::Up,
        Some(0.5),
    );
    let weights = sampler.dirichlet(TOKENS.len());
    let matrix = weight_matrix(ctx, "attention_matrix", &weights, 0.45, 0.045, |w| {
        Style::new()
            .fill(DEEP_BLUE.lerp(&ACCENT_GOLD, w as f32), 0.3 + 0.7 * w)
            .stroke(SOFT_WHITE, 0.5)
            .stroke_opacity(0.3)
    })?
    .moved_to(Point2D::new(1.5, 0.0));
    let qkv = [
        ("q_label", "Q", ACCENT_CORAL, Direction::Left, 0.8),
        ("k_label", "K", ACCENT_TEAL, Direction::Up, 0.3),
        ("v_label", "V", ACCENT_PURPLE, Direction::Right, 0.8),
    ]
    .into_iter()
    .map(|(id, letter, color, side, buff)| -> KinegramResult<ShapeDescriptor> {
        Ok(composer.shape_next_to(
            shapes.styled_text(id, letter, Some(36.0), FontWeight::Bold, Style::new().color(color))?,
            &matrix.bounds(),
            side,
            Some(buff),
        ))
    })
    .collect::<KinegramResult<Vec<_>>>()?;
    let mut glows: Vec<LayoutChild> = Vec::with_capacity(TOKENS.len());
    for j in 0..TOKENS.len() {
        let cell = bounds_of(&matrix, &format!("attention_matrix.row{}.{}", HIGHLIGHT_ROW, j))?;
        glows.push(
            shapes
                .square(
                    format!("row_highlight.{}", j),
                    cell.width(),
                    Style::new().fill(ACCENT_GOLD, 0.4).stroke(ACCENT_GOLD, 2.0),
                )?
                .with_position(cell.center())
                .into(),
        );
    }
    let row_highlight = LayoutNode::group("row_highlight", glows)?;
    let formula = composer.shape_to_edge(
        shapes.text(
            "formula",
            "softmax(QKᵀ / √d) · V",
            Some(32.0),
            Style::new().color(SOFT_WHITE),
        )?,
        Direction::Down,
        Some(0.6),
    );
    let formula_bg = shapes
        .rectangle(
            "formula_bg",
            formula.bounds().width() + 0.6,
            formula.bounds().height() + 0.3,
            Style::new().fill(DEEP_BLUE, 0.8).stroke_width(0.0),
        )?
        .with_position(formula.position());

    // Multi-head attention
    let heads_title = composer.shape_to_edge(
        shapes.styled_text(
            "heads_title",
            "MULTI-HEAD ATTENTION",
            Some(28.0),
            FontWeight::Bold,
            Style::new().color(ACCENT_PURPLE),
        )?,
        Direction::Up,
        Some(0.5),
    );
    let stacked = HEAD_COLORS
        .iter()
        .enumerate()
        .map(|(i, color)| {
            attention_head(ctx, format!("heads.{}", i), *color, Some(i)).map(|h| {
                LayoutChild::from(h.translated(Point2D::new(i as f64 * 0.15, i as f64 * 0.08)))
            })
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let heads = LayoutNode::group("heads", stacked)?.moved_to(Point2D::zero());
    let mut captions: Vec<LayoutChild> = Vec::with_capacity(FOCUS.len());
    for (k, (head, caption)) in FOCUS.iter().enumerate() {
        let label = composer
            .shape_next_to(
                shapes.text(
                    format!("focus.{}", k),
                    *caption,
                    Some(14.0),
                    Style::new().color(HEAD_COLORS[*head]),
                )?,
                &bounds_of(&heads, &format!("heads.{}", head))?,
                Direction::Down,
                Some(0.1),
            )
            .shifted(Point2D::new(-(k as f64 - 1.5) * 0.3, 0.0));
        captions.push(label.into());
    }
    let focus = LayoutNode::group("focus", captions)?;
    let concat_box = shapes
        .rounded_rectangle(
            "concat_box",
            3.0,
            0.8,
            0.15,
            Style::new().fill(DEEP_BLUE, 0.8).stroke(SOFT_WHITE, 1.0),
        )?
        .shifted(Point2D::new(0.0, -2.0));
    let concat_label = shapes
        .styled_text(
            "concat_label",
            "CONCAT + LINEAR",
            Some(16.0),
            FontWeight::Bold,
            Style::new().color(SOFT_WHITE),
        )?
        .with_position(concat_box.position());
    let concat_top = concat_box.bounds().edge(Direction::Up);
    let mut lines: Vec<LayoutChild> = Vec::with_capacity(HEAD_COLORS.len());
    for (i, head) in heads.children().iter().enumerate() {
        lines.push(
            shapes
                .line(
                    format!("merge_lines.{}", i),
                    head.bounds().edge(Direction::Down),
                    concat_top,
                    Style::new().stroke(ACCENT_PURPLE, 1.5).stroke_opacity(0.5),
                )?
                .into(),
        );
    }
    let merge_lines = LayoutNode::group("merge_lines", lines)?;
    let output_from = concat_box.bounds().edge(Direction::Down);
    let output_arrow = shapes.arrow(
        "output_arrow",
        output_from,
        output_from + Point2D::new(0.0, -0.8),
        0.1,
        Style::new().stroke(ACCENT_TEAL, 3.0),
    )?;
    let output_label = composer.shape_next_to(
        shapes.text("output_label", "OUTPUT", Some(16.0), Style::new().color(ACCENT_TEAL))?,
        &output_arrow.bounds(),
        Direction::Down,
        Some(0.1),
    );

    // Architecture
    let architecture_title = composer.shape_to_edge(
        shapes.styled_text(
            "architecture_title",
            "THE COMPLETE ARCHITECTURE",
            Some(24.0),
            FontWeight::Bold,
            Style::new().color(GLOW_BLUE),
        )?,
        Direction::Up,
        Some(0.4),
    );
    let encoder = transformer_stack(ctx, "encoder", ACCENT_BLUE, STACK_DEPTH)?
        .translated(Point2D::new(-STACK_OFFSET, 0.0));
    let decoder = transformer_stack(ctx, "decoder", ACCENT_TEAL, STACK_DEPTH)?
        .translated(Point2D::new(STACK_OFFSET, 0.0));
    let caption = |id: &str, text: &str, size: f64, style: Style, of: &LayoutNode, side: Direction| {
        shapes
            .text(id, text, Some(size), style)
            .map(|t| composer.shape_next_to(t, &of.bounds(), side, Some(0.3)))
    };
    let encoder_label = caption(
        "encoder_label",
        "ENCODER",
        20.0,
        Style::new().color(ACCENT_BLUE),
        &encoder,
        Direction::Up,
    )?;
    let decoder_label = caption(
        "decoder_label",
        "DECODER",
        20.0,
        Style::new().color(ACCENT_TEAL),
        &decoder,
        Direction::Up,
    )?;
    let faint = Style::new().color(SOFT_WHITE).fill_opacity(0.7);
    let encoder_input = caption("encoder_input", "Input", 16.0, faint.clone(), &encoder, Direction::Down)?;
    let decoder_output = caption("decoder_output", "Output", 16.0, faint, &decoder, Direction::Down)?;

    let block_edges = |stack: &LayoutNode, side: Direction| -> Vec<Point2D> {
        stack.children().iter().map(|b| b.bounds().edge(side)).collect()
    };
    let sources = block_edges(&encoder, Direction::Right);
    let sinks = block_edges(&decoder, Direction::Left);
    let cross = sources
        .iter()
        .zip(&sinks)
        .enumerate()
        .map(|(i, (from, to))| {
            shapes
                .arrow(
                    format!("cross_arrows.{}", i),
                    *from,
                    *to,
                    0.2,
                    Style::new().stroke(ACCENT_GOLD, 2.0).stroke_opacity(0.6),
                )
                .map(LayoutChild::from)
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let cross_arrows = LayoutNode::group("cross_arrows", cross)?;
    let flow = flow_particles(ctx, "flow", 15, &sources, &sinks, &mut sampler)?;

    let cast = Cast {
        tokens: child_ids(&tokens),
        token_arrows: child_ids(&token_arrows),
        embeddings: child_ids(&embeddings),
        embedding_shift,
        cells: matrix
            .children()
            .iter()
            .flat_map(|row| match row {
                LayoutChild::Node(row) => child_ids(row),
                LayoutChild::Shape(cell) => vec![cell.id().clone()],
            })
            .collect(),
        heads: child_ids(&heads),
        focus: child_ids(&focus),
        merge_lines: child_ids(&merge_lines),
        output_from,
        encoder_blocks: child_ids(&encoder),
        decoder_blocks: child_ids(&decoder),
        cross_arrows: child_ids(&cross_arrows),
        flow: child_ids(&flow),
    };

    let architecture = LayoutNode::group(
        "architecture",
        vec![
            encoder.into(),
            decoder.into(),
            encoder_label.into(),
            decoder_label.into(),
            encoder_input.into(),
            decoder_output.into(),
            cross_arrows.into(),
            flow.into(),
            architecture_title.into(),
        ],
    )?;
    let final_text = shapes.styled_text(
        "final_text",
        "ATTENTION IS ALL YOU NEED",
        Some(36.0),
        FontWeight::Bold,
        Style::new().color(GLOW_BLUE),
    )?;
    let fb = final_text.bounds();
    let underline = shapes.line(
        "underline",
        Point2D::new(fb.min_x, fb.center().y - 0.3),
        Point2D::new(fb.max_x, fb.center().y - 0.3),
        Style::new().stroke(ACCENT_GOLD, 2.0),
    )?;

    builder
        .add(particles)
        .add(network)
        .add(intro)
        .add(tokens)
        .add(embed_label)
        .add(token_arrows)
        .add(embeddings)
        .add(wave)
        .add(position_label)
        .add(attention_title)
        .add(matrix)
        .add(row_highlight)
        .add(formula_bg)
        .add(formula);
    for label in qkv {
        builder.add(label);
    }
    builder
        .add(heads_title)
        .add(heads)
        .add(focus)
        .add(merge_lines)
        .add(concat_box)
        .add(concat_label)
        .add(output_arrow)
        .add(output_label)
        .add(architecture)
        .add(final_text)
        .add(underline);

    builder.build_with(|seq| {
        intro_segment(seq)?;
        token_segment(seq, &cast)?;
        attention_segment(seq, &cast)?;
        heads_segment(seq, &cast)?;
        architecture_segment(seq, &cast)?;
        outro_segment(seq)
    })
}

fn transform(change: TransformChange, target: &str) -> Track {
    Track::single(AnimationKind::transform(change), target)
}

fn intro_segment(seq: &mut AnimationSequencer<'_>) -> KinegramResult<()> {
    seq.play(
        Play::new(
            transform(TransformChange::new().shift(Point2D::new(0.0, 0.3)), "particles")
                .with_easing(Easing::Linear),
        )
        .run_time(2.0),
    )?;
    seq.play(
        Play::new(Track::single(
            AnimationKind::FadeIn {
                shift: Point2D::zero(),
                scale: 1.5,
            },
            "title_glow",
        ))
        .with(Track::single(AnimationKind::Write, "title"))
        .run_time(2.5),
    )?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_in_from(Direction::Up, 0.2), "subtitle"))
            .run_time(1.2),
    )?;
    seq.wait(2.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_in(), "network"))
            .with(transform(TransformChange::new().opacity(0.3), "particles"))
            .run_time(1.5),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_out(), "intro"))
            .with(transform(TransformChange::new().opacity(0.05), "network"))
            .run_time(1.2),
    )?;
    Ok(())
}

fn token_segment(seq: &mut AnimationSequencer<'_>, cast: &Cast) -> KinegramResult<()> {
    seq.play(
        Play::new(
            Track::new(
                AnimationKind::FadeIn {
                    shift: Point2D::new(0.0, -0.3),
                    scale: 0.8,
                },
                cast.tokens.clone(),
            )
            .staggered(0.2),
        )
        .run_time(2.5),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_in(), "embed_label"))
            .with(Track::new(AnimationKind::grow(), cast.token_arrows.clone()).staggered(0.15))
            .run_time(1.8),
    )?;
    seq.play(
        Play::new(Track::new(AnimationKind::grow(), cast.embeddings.clone()).staggered(0.15))
            .run_time(2.0),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::single(AnimationKind::Create, "position_wave"))
            .with(Track::single(AnimationKind::fade_in(), "position_label"))
            .run_time(1.5),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(transform(TransformChange::new().color(ACCENT_TEAL), "embeddings"))
            .with(transform(TransformChange::new().opacity(0.0), "position_wave"))
            .with(Track::single(AnimationKind::fade_out(), "position_label"))
            .run_time(1.2),
    )?;
    seq.wait(0.8)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            ["tokens", "token_arrows", "embed_label"],
        ))
        .with(transform(
            TransformChange::new().shift(Point2D::new(0.0, 2.5)).scale(0.8),
            "embeddings",
        ))
        .run_time(1.2),
    )?;
    Ok(())
}

fn attention_segment(seq: &mut AnimationSequencer<'_>, cast: &Cast) -> KinegramResult<()> {
    seq.play(
        Play::new(Track::single(AnimationKind::Write, "attention_title"))
            .with(transform(TransformChange::new().shift(cast.embedding_shift), "embeddings"))
            .run_time(1.2),
    )?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(
            Track::new(
                AnimationKind::FadeIn {
                    shift: Point2D::zero(),
                    scale: 0.5,
                },
                cast.cells.clone(),
            )
            .staggered(0.03),
        )
        .run_time(2.5),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_in_from(Direction::Right, 0.2), "q_label"))
            .with(Track::single(AnimationKind::fade_in_from(Direction::Down, 0.2), "k_label"))
            .with(Track::single(AnimationKind::fade_in_from(Direction::Left, 0.2), "v_label"))
            .run_time(1.0),
    )?;
    seq.wait(1.0)?;
    seq.play(Play::new(Track::single(AnimationKind::fade_in(), "row_highlight")).run_time(0.8))?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::single(AnimationKind::fade_in(), "formula_bg"))
            .with(Track::single(AnimationKind::Write, "formula"))
            .run_time(1.5),
    )?;
    seq.wait(2.5)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            [
                "attention_title",
                "attention_matrix",
                "q_label",
                "k_label",
                "v_label",
                "row_highlight",
                "formula",
                "formula_bg",
                "embeddings",
            ],
        ))
        .run_time(1.0),
    )?;
    Ok(())
}

fn heads_segment(seq: &mut AnimationSequencer<'_>, cast: &Cast) -> KinegramResult<()> {
    seq.play(Play::new(Track::single(AnimationKind::Write, "heads_title")).run_time(1.2))?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(
            Track::new(
                AnimationKind::FadeIn {
                    shift: Point2D::new(-0.3, -0.1),
                    scale: 0.9,
                },
                cast.heads.clone(),
            )
            .staggered(0.15),
        )
        .run_time(2.5),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(
            Track::new(AnimationKind::fade_in_from(Direction::Up, 0.1), cast.focus.clone())
                .staggered(0.2),
        )
        .run_time(1.5),
    )?;
    seq.wait(1.5)?;
    seq.play(Play::new(Track::single(AnimationKind::fade_out(), "focus")).run_time(0.5))?;
    seq.play(
        Play::new(Track::new(AnimationKind::Create, cast.merge_lines.clone()).staggered(0.08))
            .with(Track::new(AnimationKind::fade_in(), ["concat_box", "concat_label"]))
            .run_time(1.8),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::single(AnimationKind::grow_from(cast.output_from), "output_arrow"))
            .with(Track::single(AnimationKind::fade_in(), "output_label"))
            .run_time(1.0),
    )?;
    seq.wait(1.5)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            [
                "heads_title",
                "heads",
                "merge_lines",
                "concat_box",
                "concat_label",
                "output_arrow",
                "output_label",
            ],
        ))
        .run_time(1.0),
    )?;
    Ok(())
}

fn architecture_segment(seq: &mut AnimationSequencer<'_>, cast: &Cast) -> KinegramResult<()> {
    let rise = AnimationKind::FadeIn {
        shift: Point2D::new(0.0, 0.2),
        scale: 0.9,
    };
    seq.play(Play::new(Track::single(AnimationKind::Write, "architecture_title")).run_time(1.2))?;
    seq.wait(0.5)?;
    seq.play(
        Play::new(Track::new(rise.clone(), cast.encoder_blocks.clone()).staggered(0.2))
            .with(Track::new(AnimationKind::fade_in(), ["encoder_label", "encoder_input"]))
            .run_time(2.0),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::new(rise, cast.decoder_blocks.clone()).staggered(0.2))
            .with(Track::new(AnimationKind::fade_in(), ["decoder_label", "decoder_output"]))
            .run_time(2.0),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::new(AnimationKind::grow(), cast.cross_arrows.clone()).staggered(0.25))
            .run_time(1.8),
    )?;
    seq.wait(1.0)?;
    seq.play(
        Play::new(Track::new(AnimationKind::Create, cast.flow.clone()).staggered(0.08)).run_time(2.5),
    )?;
    seq.wait(1.5)?;
    for (stacks, arrows) in [(0.9, 0.8), (1.0, 0.6)] {
        seq.play(
            Play::new(Track::new(
                AnimationKind::transform(TransformChange::new().opacity(stacks)),
                ["encoder", "decoder"],
            ))
            .with(transform(TransformChange::new().opacity(arrows), "cross_arrows"))
            .run_time(0.6),
        )?;
    }
    seq.wait(1.5)?;
    Ok(())
}

fn outro_segment(seq: &mut AnimationSequencer<'_>) -> KinegramResult<()> {
    seq.play(
        Play::new(transform(
            TransformChange::new().scale(0.6).opacity(0.3),
            "architecture",
        ))
        .run_time(1.5),
    )?;
    seq.play(Play::new(Track::single(AnimationKind::Write, "final_text")).run_time(2.0))?;
    seq.play(Play::new(Track::single(AnimationKind::Create, "underline")).run_time(0.8))?;
    seq.wait(3.0)?;
    seq.play(
        Play::new(Track::new(
            AnimationKind::fade_out(),
            ["final_text", "underline", "architecture", "particles", "network"],
        ))
        .run_time(2.0),
    )?;
    Ok(())
}
