use kinegram_core::{Color, Direction, KinegramResult, Point2D};
use kinegram_ir::{
    AnimationKind, LayoutChild, LayoutNode, Scene, SceneBuilder, SceneContext, Style, Track,
    TransformChange,
};

use crate::components::child_ids;

pub const NAME: &str = "simple-transformer";

const BOX_OFFSET: f64 = 3.5;
const PULSE: f64 = 1.3;

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    let shapes = builder.shapes();
    let composer = builder.composer();

    let title = composer.shape_to_edge(
        shapes.text(
            "title",
            "Transformer Architecture Demo",
            Some(48.0),
            Style::new().color(Color::BLUE),
        )?,
        Direction::Up,
        None,
    );

    let encoder = shapes
        .rectangle("encoder", 3.0, 4.0, Style::new().fill(Color::BLUE, 0.3))?
        .shifted(Point2D::new(-BOX_OFFSET, 0.0));
    let decoder = shapes
        .rectangle("decoder", 3.0, 4.0, Style::new().fill(Color::GREEN, 0.3))?
        .shifted(Point2D::new(BOX_OFFSET, 0.0));
    let encoder_label = composer.shape_next_to(
        shapes.text("encoder_label", "Encoder", Some(32.0), Style::new())?,
        &encoder.bounds(),
        Direction::Down,
        None,
    );
    let decoder_label = composer.shape_next_to(
        shapes.text("decoder_label", "Decoder", Some(32.0), Style::new())?,
        &decoder.bounds(),
        Direction::Down,
        None,
    );

    let arrow_start = encoder.bounds().edge(Direction::Right);
    let arrow = shapes.arrow(
        "arrow",
        arrow_start,
        decoder.bounds().edge(Direction::Left),
        0.3,
        Style::new().color(Color::YELLOW),
    )?;

    let circles = (0..4)
        .map(|i| {
            shapes
                .circle(
                    format!("attention.{}", i),
                    0.3,
                    Style::new().fill(Color::RED, 0.5),
                )
                .map(|c| LayoutChild::from(c.shifted(Point2D::new(-BOX_OFFSET, 1.5 - i as f64))))
        })
        .collect::<KinegramResult<Vec<_>>>()?;
    let attention = LayoutNode::group("attention", circles)?;
    let circle_ids = child_ids(&attention);

    builder
        .add(title)
        .add(encoder)
        .add(decoder)
        .add(encoder_label)
        .add(decoder_label)
        .add(arrow)
        .add(attention);

    builder.build_with(|seq| {
        seq.play(Track::single(AnimationKind::Write, "title"))?;
        seq.wait(0.5)?;
        seq.play(Track::new(AnimationKind::Create, ["encoder", "decoder"]))?;
        seq.wait(0.3)?;
        seq.play(Track::new(
            AnimationKind::Write,
            ["encoder_label", "decoder_label"],
        ))?;
        seq.wait(0.5)?;
        seq.play(Track::single(AnimationKind::grow_from(arrow_start), "arrow"))?;
        seq.wait(0.5)?;
        seq.play(
            Track::new(
                AnimationKind::FadeIn {
                    shift: Point2D::zero(),
                    scale: 0.5,
                },
                circle_ids.clone(),
            )
            .staggered(0.2),
        )?;
        seq.wait(1.0)?;
        seq.play(
            Track::new(
                AnimationKind::transform(TransformChange::new().scale(PULSE).color(Color::YELLOW)),
                circle_ids.clone(),
            )
            .staggered(0.1),
        )?;
        seq.play(
            Track::new(
                AnimationKind::transform(TransformChange::new().scale(1.0 / PULSE).color(Color::RED)),
                circle_ids,
            )
            .staggered(0.1),
        )?;
        seq.wait(1.0)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let scene = build(&SceneContext::default()).unwrap();
        let encoder = scene.root.find("encoder").unwrap().bounds();
        let label = scene.root.find("encoder_label").unwrap().bounds();
        assert!((encoder.center().x + 3.5).abs() < 1e-9);
        assert!((encoder.min_y - label.max_y - 0.25).abs() < 1e-9);
        let top = scene.root.find("attention.0").unwrap().bounds().center();
        assert!((top.y - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pulse_is_staggered() {
        let scene = build(&SceneContext::default()).unwrap();
        let pulse: Vec<f64> = scene
            .timeline
            .events()
            .iter()
            .filter(|e| e.group == 5)
            .map(|e| e.start())
            .collect();
        assert_eq!(pulse.len(), 4);
        assert!(pulse.windows(2).all(|w| w[0] < w[1]));
        assert!(pulse.iter().all(|s| *s > 0.0));
    }
}
