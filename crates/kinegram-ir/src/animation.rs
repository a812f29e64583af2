use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::context::SceneContext;
use crate::layout::LayoutNode;
use crate::shape::ElementId;
use kinegram_core::error::{ensure_non_negative, ensure_positive, ensure_unit};
use kinegram_core::{
    Color, Direction, Duration, Easing, KinegramError, KinegramResult, Point2D, TimeWindow,
};

/// Property changes applied by a transform animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformChange {
    pub shift: Point2D,
    pub scale: f64,
    pub color: Option<Color>,
    pub opacity: Option<f64>,
}

impl Default for TransformChange {
    fn default() -> Self {
        Self {
            shift: Point2D::zero(),
            scale: 1.0,
            color: None,
            opacity: None,
        }
    }
}

impl TransformChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift(mut self, by: Point2D) -> Self {
        self.shift = by;
        self
    }

    pub fn scale(mut self, factor: f64) -> Self {
        self.scale = factor;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    fn validate(&self) -> KinegramResult<()> {
        ensure_positive("transform.scale", self.scale)?;
        if !self.shift.is_finite() {
            return Err(KinegramError::validation("transform.shift", "must be finite"));
        }
        if let Some(o) = self.opacity {
            ensure_unit("transform.opacity", o)?;
        }
        Ok(())
    }
}

/// What an animation does to its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationKind {
    /// Fade in, optionally sliding by `shift` and growing from `scale`.
    FadeIn { shift: Point2D, scale: f64 },
    FadeOut { shift: Point2D },
    /// Draw the outline progressively.
    Create,
    /// Write text stroke by stroke.
    Write,
    /// Grow from `origin`, or from the target centre when unset.
    Grow { origin: Option<Point2D> },
    /// Grow out of one side of the target's bounds, e.g. a bar rising from its base.
    GrowFromEdge { edge: Direction },
    Transform { change: TransformChange },
    /// Morph the target into another element already in the tree.
    Replace { with: ElementId },
}

impl AnimationKind {
    pub fn fade_in() -> Self {
        AnimationKind::FadeIn {
            shift: Point2D::zero(),
            scale: 1.0,
        }
    }

    /// Fade in while sliding in the given direction.
    pub fn fade_in_from(direction: Direction, distance: f64) -> Self {
        AnimationKind::FadeIn {
            shift: direction.vector() * distance,
            scale: 1.0,
        }
    }

    pub fn fade_out() -> Self {
        AnimationKind::FadeOut {
            shift: Point2D::zero(),
        }
    }

    pub fn grow() -> Self {
        AnimationKind::Grow { origin: None }
    }

    pub fn grow_from(origin: Point2D) -> Self {
        AnimationKind::Grow {
            origin: Some(origin),
        }
    }

    pub fn grow_from_edge(edge: Direction) -> Self {
        AnimationKind::GrowFromEdge { edge }
    }

    pub fn transform(change: TransformChange) -> Self {
        AnimationKind::Transform { change }
    }

    pub fn replace(with: impl Into<ElementId>) -> Self {
        AnimationKind::Replace { with: with.into() }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnimationKind::FadeIn { .. } => "fade_in",
            AnimationKind::FadeOut { .. } => "fade_out",
            AnimationKind::Create => "create",
            AnimationKind::Write => "write",
            AnimationKind::Grow { .. } => "grow",
            AnimationKind::GrowFromEdge { .. } => "grow_from_edge",
            AnimationKind::Transform { .. } => "transform",
            AnimationKind::Replace { .. } => "replace",
        }
    }

    fn validate(&self) -> KinegramResult<()> {
        match self {
            AnimationKind::FadeIn { shift, scale } => {
                ensure_positive("fade_in.scale", *scale)?;
                if !shift.is_finite() {
                    return Err(KinegramError::validation("fade_in.shift", "must be finite"));
                }
            }
            AnimationKind::FadeOut { shift } if !shift.is_finite() => {
                return Err(KinegramError::validation("fade_out.shift", "must be finite"));
            }
            AnimationKind::Transform { change } => change.validate()?,
            _ => {}
        }
        Ok(())
    }
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One timed animation of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationEvent {
    pub target: ElementId,
    pub kind: AnimationKind,
    #[serde(flatten)]
    pub window: TimeWindow,
    pub stagger_ratio: f64,
    pub easing: Easing,
    /// Index of the play step this event belongs to.
    pub group: usize,
}

impl AnimationEvent {
    pub fn start(&self) -> f64 {
        self.window.start()
    }

    pub fn end(&self) -> f64 {
        self.window.end()
    }

    pub fn duration(&self) -> Duration {
        self.window.duration()
    }

    /// Eased progress at scene time `t`, or `None` outside the event window.
    pub fn progress_at(&self, t: f64) -> Option<f64> {
        self.window.fraction_at(t).map(|raw| self.easing.apply(raw))
    }
}

/// Ordered events plus the total running time, waits included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timeline {
    events: Vec<AnimationEvent>,
    total_duration: Duration,
}

impl Timeline {
    pub fn new(events: Vec<AnimationEvent>, total_duration: Duration) -> Self {
        Self {
            events,
            total_duration,
        }
    }

    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }

    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of play steps that produced events.
    pub fn step_count(&self) -> usize {
        self.events.last().map(|e| e.group + 1).unwrap_or(0)
    }

    /// Events running at scene time `t`.
    pub fn active_at(&self, t: f64) -> Vec<&AnimationEvent> {
        self.events
            .iter()
            .filter(|e| e.progress_at(t).is_some())
            .collect()
    }

    pub fn into_events(self) -> Vec<AnimationEvent> {
        self.events
    }
}

/// One animation kind applied to one or more targets, optionally staggered.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    kind: AnimationKind,
    targets: Vec<ElementId>,
    duration: Option<f64>,
    lag_ratio: f64,
    easing: Option<Easing>,
}

impl Track {
    pub fn new<I, T>(kind: AnimationKind, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ElementId>,
    {
        Self {
            kind,
            targets: targets.into_iter().map(Into::into).collect(),
            duration: None,
            lag_ratio: 0.0,
            easing: None,
        }
    }

    pub fn single(kind: AnimationKind, target: impl Into<ElementId>) -> Self {
        Self::new(kind, [target.into()])
    }

    /// Delay successive targets by `lag_ratio` of the per-element duration.
    pub fn staggered(mut self, lag_ratio: f64) -> Self {
        self.lag_ratio = lag_ratio;
        self
    }

    /// Per-element duration in seconds.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }
}

/// A set of tracks that start together.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    tracks: Vec<Track>,
    run_time: Option<f64>,
}

impl Play {
    pub fn new(track: Track) -> Self {
        Self {
            tracks: vec![track],
            run_time: None,
        }
    }

    pub fn all(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            run_time: None,
        }
    }

    /// Builder: add another parallel track.
    pub fn with(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Time allotted to each track, stagger included.
    pub fn run_time(mut self, seconds: f64) -> Self {
        self.run_time = Some(seconds);
        self
    }
}

impl From<Track> for Play {
    fn from(track: Track) -> Self {
        Play::new(track)
    }
}

/// A step of a scene script.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Play(Play),
    Wait(f64),
}

/// Turns play steps over a layout tree into a timeline.
///
/// Every step is checked against the tree when it is added, so a bad
/// reference fails at the step that introduced it.
pub struct AnimationSequencer<'a> {
    ctx: &'a SceneContext,
    tree: &'a LayoutNode,
    events: Vec<AnimationEvent>,
    cursor: f64,
    step: usize,
}

impl<'a> AnimationSequencer<'a> {
    pub fn new(ctx: &'a SceneContext, tree: &'a LayoutNode) -> Self {
        Self {
            ctx,
            tree,
            events: Vec::new(),
            cursor: 0.0,
            step: 0,
        }
    }

    pub fn tree(&self) -> &LayoutNode {
        self.tree
    }

    /// Current end of the timeline, in seconds.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn play(&mut self, play: impl Into<Play>) -> KinegramResult<&mut Self> {
        let play = play.into();
        let group = self.step;
        if play.tracks.is_empty() {
            return Err(KinegramError::validation(
                "play",
                format!("play step {} has no tracks", group),
            ));
        }
        let run_time = play
            .run_time
            .map(|t| ensure_positive("run_time", t))
            .transpose()?;

        let start = self.cursor;
        let mut step_events = Vec::new();
        for track in &play.tracks {
            step_events.extend(self.expand_track(track, start, run_time, group)?);
        }
        // Stable: ties keep declaration order.
        step_events.sort_by(|a, b| a.start().total_cmp(&b.start()));

        let end = step_events.iter().map(AnimationEvent::end).fold(start, f64::max);
        tracing::debug!(
            step = group,
            events = step_events.len(),
            start,
            end,
            "sequenced play step"
        );
        self.events.extend(step_events);
        self.cursor = end;
        self.step += 1;
        Ok(self)
    }

    pub fn wait(&mut self, seconds: f64) -> KinegramResult<&mut Self> {
        let seconds = ensure_non_negative("wait", seconds)?;
        self.cursor += seconds;
        Ok(self)
    }

    pub fn step(&mut self, step: Step) -> KinegramResult<&mut Self> {
        match step {
            Step::Play(play) => self.play(play),
            Step::Wait(seconds) => self.wait(seconds),
        }
    }

    pub fn finish(self) -> Timeline {
        Timeline::new(self.events, Duration::from_seconds(self.cursor))
    }

    fn expand_track(
        &self,
        track: &Track,
        start: f64,
        run_time: Option<f64>,
        group: usize,
    ) -> KinegramResult<Vec<AnimationEvent>> {
        let context = format!("play step {}", group);
        if track.targets.is_empty() {
            return Err(KinegramError::validation(
                "targets",
                format!("{} has a {} track with no targets", context, track.kind),
            ));
        }
        let lag = ensure_non_negative("lag_ratio", track.lag_ratio)?;
        let duration = track
            .duration
            .map(|d| ensure_positive("duration", d))
            .transpose()?;
        track.kind.validate()?;

        let mut seen = HashSet::new();
        for target in &track.targets {
            if !seen.insert(target) {
                return Err(KinegramError::Timing(format!(
                    "'{}' is animated twice by the same {} track in {}",
                    target, track.kind, context
                )));
            }
            if !self.tree.contains(target.as_str()) {
                return Err(KinegramError::reference(target.as_str(), context.as_str()));
            }
        }
        if let AnimationKind::Replace { with } = &track.kind {
            if !self.tree.contains(with.as_str()) {
                return Err(KinegramError::reference(
                    with.as_str(),
                    format!("replacement target in {}", context),
                ));
            }
        }

        let per = per_element_duration(
            track.targets.len(),
            lag,
            duration,
            run_time,
            self.ctx.default_run_time,
        );
        let easing = track.easing.unwrap_or(self.ctx.default_easing);
        Ok(track
            .targets
            .iter()
            .enumerate()
            .map(|(i, target)| AnimationEvent {
                target: target.clone(),
                kind: track.kind.clone(),
                window: TimeWindow::new(start + i as f64 * lag * per, Duration::from_seconds(per)),
                stagger_ratio: lag,
                easing,
                group,
            })
            .collect())
    }
}

/// Per-element duration such that the staggered span
/// `per * (1 + (n - 1) * lag)` fits the allotted time.
pub fn per_element_duration(
    count: usize,
    lag_ratio: f64,
    duration: Option<f64>,
    run_time: Option<f64>,
    default_run_time: f64,
) -> f64 {
    let factor = 1.0 + count.saturating_sub(1) as f64 * lag_ratio;
    match (duration, run_time) {
        (Some(d), Some(t)) => d.min(t / factor),
        (Some(d), None) => d,
        (None, Some(t)) => t / factor,
        (None, None) => default_run_time / factor,
    }
}

/// Build a timeline from a list of steps in one go.
pub fn sequence(ctx: &SceneContext, tree: &LayoutNode, steps: Vec<Step>) -> KinegramResult<Timeline> {
    let mut sequencer = AnimationSequencer::new(ctx, tree);
    for step in steps {
        sequencer.step(step)?;
    }
    Ok(sequencer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutComposer, LayoutDirective};
    use crate::shape::{ShapeFactory, Style};

    fn tree(ctx: &SceneContext, n: usize) -> LayoutNode {
        let f = ShapeFactory::new(ctx);
        let children = (0..n)
            .map(|i| f.circle(format!("c{}", i), 0.3, Style::new()).unwrap().into())
            .collect();
        LayoutComposer::new(ctx)
            .arrange("root", children, LayoutDirective::row(0.5))
            .unwrap()
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("c{}", i)).collect()
    }

    #[test]
    fn test_stagger_example() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 4);
        let mut seq = AnimationSequencer::new(&ctx, &root);
        seq.play(
            Track::new(AnimationKind::fade_in(), ids(4))
                .with_duration(1.0)
                .staggered(0.2),
        )
        .unwrap();
        let timeline = seq.finish();
        let offsets: Vec<f64> = timeline.events().iter().map(|e| e.start()).collect();
        let expected = [0.0, 0.2, 0.4, 0.6];
        for (got, want) in offsets.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{} != {}", got, want);
        }
        assert!((timeline.total_duration().as_seconds() - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_run_time_bounds_stagger_span() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 5);
        let mut seq = AnimationSequencer::new(&ctx, &root);
        seq.play(
            Play::new(Track::new(AnimationKind::Create, ids(5)).staggered(0.25)).run_time(2.0),
        )
        .unwrap();
        let timeline = seq.finish();
        // factor = 1 + 4 * 0.25 = 2, so each element gets 1s.
        assert!((timeline.events()[0].duration().as_seconds() - 1.0).abs() < 1e-12);
        assert!((timeline.total_duration().as_seconds() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_per_element_duration_rules() {
        assert_eq!(per_element_duration(4, 0.2, Some(1.0), None, 1.0), 1.0);
        assert_eq!(per_element_duration(3, 0.5, Some(1.0), Some(1.0), 1.0), 0.5);
        assert_eq!(per_element_duration(3, 0.5, Some(0.2), Some(1.0), 1.0), 0.2);
        assert_eq!(per_element_duration(1, 0.5, None, None, 1.5), 1.5);
        assert_eq!(per_element_duration(0, 0.5, None, None, 1.0), 1.0);
    }

    #[test]
    fn test_steps_and_waits_advance_cursor() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 2);
        let timeline = sequence(
            &ctx,
            &root,
            vec![
                Step::Play(Track::single(AnimationKind::Create, "c0").into()),
                Step::Wait(0.5),
                Step::Play(
                    Play::new(Track::single(AnimationKind::fade_out(), "c0"))
                        .with(Track::single(AnimationKind::grow(), "c1").with_duration(2.0)),
                ),
            ],
        )
        .unwrap();
        let starts: Vec<f64> = timeline.events().iter().map(|e| e.start()).collect();
        assert_eq!(starts, vec![0.0, 1.5, 1.5]);
        assert_eq!(timeline.events()[2].group, 1);
        assert_eq!(timeline.step_count(), 2);
        assert!((timeline.total_duration().as_seconds() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_target_is_reference_error() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 2);
        let mut seq = AnimationSequencer::new(&ctx, &root);
        let err = seq
            .play(Track::single(AnimationKind::Write, "ghost"))
            .err()
            .unwrap();
        assert!(matches!(err, KinegramError::Reference { ref target, .. } if target == "ghost"));

        let err = seq
            .play(Track::single(AnimationKind::replace("ghost"), "c0"))
            .err()
            .unwrap();
        assert!(matches!(err, KinegramError::Reference { .. }));
    }

    #[test]
    fn test_invalid_timing_parameters() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 2);
        let mut seq = AnimationSequencer::new(&ctx, &root);
        assert!(seq
            .play(Track::single(AnimationKind::Create, "c0").with_duration(0.0))
            .is_err());
        assert!(seq
            .play(Track::new(AnimationKind::Create, ids(2)).staggered(-0.1))
            .is_err());
        assert!(seq
            .play(Track::new(AnimationKind::Create, Vec::<String>::new()))
            .is_err());
        assert!(seq.play(Play::all(Vec::new())).is_err());
        assert!(seq.wait(-1.0).is_err());
        assert!(seq.wait(f64::NAN).is_err());
        let dup = seq
            .play(Track::new(AnimationKind::Create, ["c0", "c0"]))
            .err()
            .unwrap();
        assert!(matches!(dup, KinegramError::Timing(_)));
        // Failed steps leave the timeline untouched.
        assert!(seq.finish().is_empty());
    }

    #[test]
    fn test_progress_and_active_at() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 2);
        let mut seq = AnimationSequencer::new(&ctx, &root);
        seq.play(
            Track::new(AnimationKind::fade_in(), ids(2))
                .with_duration(1.0)
                .staggered(1.0)
                .with_easing(Easing::Linear),
        )
        .unwrap();
        let timeline = seq.finish();
        let first = &timeline.events()[0];
        assert_eq!(first.progress_at(0.5), Some(0.5));
        assert_eq!(first.progress_at(1.5), None);
        assert_eq!(timeline.active_at(0.5).len(), 1);
        assert_eq!(timeline.active_at(1.5)[0].target.as_str(), "c1");
        assert!(timeline.active_at(5.0).is_empty());
    }

    #[test]
    fn test_non_finite_time_is_never_active() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 1);
        let mut seq = AnimationSequencer::new(&ctx, &root);
        seq.play(Track::single(AnimationKind::Create, "c0")).unwrap();
        let timeline = seq.finish();
        assert_eq!(timeline.events()[0].progress_at(f64::NAN), None);
        assert!(timeline.active_at(f64::NAN).is_empty());
        assert!(timeline.active_at(f64::INFINITY).is_empty());
    }

    #[test]
    fn test_default_easing_from_context() {
        let ctx = SceneContext::default();
        let root = tree(&ctx, 1);
        let mut seq = AnimationSequencer::new(&ctx, &root);
        seq.play(Track::single(AnimationKind::Create, "c0")).unwrap();
        assert_eq!(seq.finish().events()[0].easing, Easing::Smooth);
    }

    #[test]
    fn test_grow_from_edge_is_tagged() {
        let kind = AnimationKind::grow_from_edge(Direction::Down);
        assert_eq!(kind.name(), "grow_from_edge");
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "grow_from_edge");
        assert_eq!(json["edge"], "Down");
        let back: AnimationKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, kind);
    }
}
