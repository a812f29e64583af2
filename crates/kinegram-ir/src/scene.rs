use serde::{Deserialize, Serialize};

use crate::animation::{AnimationEvent, Timeline};
use crate::context::SceneContext;
use crate::layout::LayoutNode;
use crate::shape::{ElementId, ShapeDescriptor};
use kinegram_core::hash::{hash_json, ContentHash};
use kinegram_core::{Color, Duration, KinegramResult, Size2D};

/// Unique identifier for a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub String);

impl SceneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A built scene: the layout tree and the timeline animating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub background: Color,
    pub root: LayoutNode,
    pub timeline: Timeline,
}

impl Scene {
    pub fn new(id: SceneId, background: Color, root: LayoutNode, timeline: Timeline) -> Self {
        Self {
            id,
            background,
            root,
            timeline,
        }
    }

    pub fn duration(&self) -> Duration {
        self.timeline.total_duration()
    }

    /// Number of frames in this scene at the given fps.
    pub fn frame_count(&self, fps: f64) -> u64 {
        self.duration().frame_count(fps)
    }

    /// Flatten the scene into the renderer hand-off.
    pub fn render_plan(&self, ctx: &SceneContext) -> RenderPlan {
        let groups = self
            .root
            .nodes()
            .into_iter()
            .map(|node| GroupEntry {
                id: node.id().clone(),
                members: node.shapes().iter().map(|s| s.id().clone()).collect(),
            })
            .collect();
        RenderPlan {
            scene: self.id.clone(),
            frame: ctx.frame,
            fps: ctx.fps,
            background: self.background,
            duration: self.duration(),
            shapes: self.root.shapes().into_iter().cloned().collect(),
            groups,
            events: self.timeline.events().to_vec(),
        }
    }
}

/// A group id and the ids of every shape beneath it, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub id: ElementId,
    pub members: Vec<ElementId>,
}

/// The serialisable hand-off to an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub scene: SceneId,
    pub frame: Size2D,
    pub fps: u32,
    pub background: Color,
    pub duration: Duration,
    /// Shapes in paint order, back to front.
    pub shapes: Vec<ShapeDescriptor>,
    pub groups: Vec<GroupEntry>,
    pub events: Vec<AnimationEvent>,
}

impl RenderPlan {
    /// Reproducibility fingerprint of the plan's compact JSON.
    pub fn content_hash(&self) -> KinegramResult<ContentHash> {
        hash_json(self)
    }

    pub fn to_json(&self, pretty: bool) -> KinegramResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> KinegramResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn shape(&self, id: &str) -> Option<&ShapeDescriptor> {
        self.shapes.iter().find(|s| s.id().as_str() == id)
    }

    pub fn group(&self, id: &str) -> Option<&GroupEntry> {
        self.groups.iter().find(|g| g.id.as_str() == id)
    }

    pub fn frame_count(&self) -> u64 {
        self.duration.frame_count(self.fps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationKind, AnimationSequencer, Track};
    use crate::layout::{LayoutComposer, LayoutDirective};
    use crate::shape::{ShapeFactory, Style};

    fn scene(ctx: &SceneContext) -> Scene {
        let f = ShapeFactory::new(ctx);
        let composer = LayoutComposer::new(ctx);
        let row = composer
            .arrange(
                "row",
                vec![
                    f.square("a", 1.0, Style::new()).unwrap().into(),
                    f.square("b", 1.0, Style::new()).unwrap().into(),
                ],
                LayoutDirective::row(0.5),
            )
            .unwrap();
        let title = f.text("title", "Hello", None, Style::new()).unwrap();
        let root = LayoutNode::group("root", vec![title.into(), row.into()]).unwrap();
        let mut seq = AnimationSequencer::new(ctx, &root);
        seq.play(Track::single(AnimationKind::Write, "title")).unwrap();
        seq.play(Track::single(AnimationKind::fade_in(), "row")).unwrap();
        let timeline = seq.finish();
        Scene::new(SceneId::new("demo"), ctx.background, root, timeline)
    }

    #[test]
    fn test_render_plan_flattens_tree() {
        let ctx = SceneContext::default();
        let plan = scene(&ctx).render_plan(&ctx);
        let ids: Vec<&str> = plan.shapes.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["title", "a", "b"]);
        let row = plan.group("row").unwrap();
        assert_eq!(row.members, vec![ElementId::new("a"), ElementId::new("b")]);
        assert_eq!(plan.group("root").unwrap().members.len(), 3);
        assert_eq!(plan.events.len(), 2);
        assert_eq!(plan.frame_count(), 60);
    }

    #[test]
    fn test_plan_json_parses_back() {
        let ctx = SceneContext::default();
        let plan = scene(&ctx).render_plan(&ctx);
        let back = RenderPlan::from_json(&plan.to_json(true).unwrap()).unwrap();
        assert_eq!(back.scene, plan.scene);
        assert_eq!(back.shapes.len(), plan.shapes.len());
        assert_eq!(back.events[1].kind, AnimationKind::fade_in());
    }

    #[test]
    fn test_plan_hash_is_reproducible() {
        let ctx = SceneContext::default();
        let a = scene(&ctx).render_plan(&ctx).content_hash().unwrap();
        let b = scene(&ctx).render_plan(&ctx).content_hash().unwrap();
        assert_eq!(a, b);

        let other = SceneContext {
            fps: 60,
            ..SceneContext::default()
        };
        let c = scene(&other).render_plan(&other).content_hash().unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_scene_frame_count() {
        let ctx = SceneContext::default();
        let s = scene(&ctx);
        assert_eq!(s.frame_count(30.0), 60);
        assert!((s.duration().as_seconds() - 2.0).abs() < 1e-12);
    }
}
