use crate::animation::AnimationSequencer;
use crate::context::SceneContext;
use crate::layout::{LayoutChild, LayoutComposer, LayoutNode};
use crate::scene::{Scene, SceneId};
use crate::shape::ShapeFactory;
use crate::validate::validate_scene;
use kinegram_core::{Color, KinegramError, KinegramResult};

/// Collects the top-level elements of a scene, then sequences and validates it.
///
/// ```ignore
/// let mut b = SceneBuilder::new(&ctx, "intro");
/// b.add(b.shapes().circle("dot", 1.0, Style::new())?);
/// let scene = b.build_with(|seq| {
///     seq.play(Track::single(AnimationKind::Create, "dot"))?;
///     Ok(())
/// })?;
/// ```
pub struct SceneBuilder<'a> {
    ctx: &'a SceneContext,
    id: SceneId,
    background: Color,
    children: Vec<LayoutChild>,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(ctx: &'a SceneContext, id: impl Into<String>) -> Self {
        Self {
            ctx,
            id: SceneId::new(id),
            background: ctx.background,
            children: Vec::new(),
        }
    }

    pub fn context(&self) -> &'a SceneContext {
        self.ctx
    }

    pub fn shapes(&self) -> ShapeFactory<'a> {
        ShapeFactory::new(self.ctx)
    }

    pub fn composer(&self) -> LayoutComposer<'a> {
        LayoutComposer::new(self.ctx)
    }

    pub fn background(&mut self, color: Color) -> &mut Self {
        self.background = color;
        self
    }

    /// Add a top-level element. First added is painted first (back).
    pub fn add(&mut self, child: impl Into<LayoutChild>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// Build a static scene with an empty timeline.
    pub fn build(self) -> KinegramResult<Scene> {
        self.build_with(|_| Ok(()))
    }

    /// Group the collected elements under a root named after the scene, run
    /// `script` against a sequencer over that tree, and validate the result.
    pub fn build_with<F>(self, script: F) -> KinegramResult<Scene>
    where
        F: FnOnce(&mut AnimationSequencer<'_>) -> KinegramResult<()>,
    {
        let root = LayoutNode::group(self.id.0.as_str(), self.children)?;
        let timeline = {
            let mut sequencer = AnimationSequencer::new(self.ctx, &root);
            script(&mut sequencer)?;
            sequencer.finish()
        };
        let scene = Scene::new(self.id, self.background, root, timeline);

        if let Err(errors) = validate_scene(&scene) {
            for error in &errors {
                tracing::warn!(scene = %scene.id, "{}", error);
            }
            return Err(errors
                .into_iter()
                .next()
                .unwrap_or_else(|| KinegramError::InvalidArgument("empty validation report".into())));
        }

        tracing::info!(
            scene = %scene.id,
            shapes = scene.root.shapes().len(),
            events = scene.timeline.len(),
            duration = %scene.duration(),
            "built scene"
        );
        Ok(scene)
    }
}
