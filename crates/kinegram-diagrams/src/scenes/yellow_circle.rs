use kinegram_core::{Color, Direction, KinegramResult};
use kinegram_ir::{AnimationKind, Scene, SceneBuilder, SceneContext, Style, Track, TransformChange};

pub const NAME: &str = "yellow-circle";

const PULSE: f64 = 1.5;

pub fn build(ctx: &SceneContext) -> KinegramResult<Scene> {
    let mut builder = SceneBuilder::new(ctx, NAME);
    let shapes = builder.shapes();
    let composer = builder.composer();

    let circle = shapes.circle(
        "circle",
        1.0,
        Style::new()
            .fill(Color::YELLOW, 1.0)
            .stroke(Color::YELLOW, 4.0),
    )?;
    let title = composer.shape_to_edge(
        shapes.text("title", "Yellow Circle Test", Some(48.0), Style::new())?,
        Direction::Up,
        None,
    );
    builder.add(circle).add(title);

    builder.build_with(|seq| {
        seq.play(Track::single(AnimationKind::Write, "title"))?;
        seq.wait(0.5)?;
        seq.play(Track::single(AnimationKind::Create, "circle"))?;
        seq.wait(1.0)?;
        seq.play(Track::single(
            AnimationKind::transform(TransformChange::new().scale(PULSE)),
            "circle",
        ))?;
        seq.wait(0.5)?;
        seq.play(Track::single(
            AnimationKind::transform(TransformChange::new().scale(1.0 / PULSE)),
            "circle",
        ))?;
        seq.wait(1.0)?;
        Ok(())
    })
}
