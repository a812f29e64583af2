use std::collections::{HashMap, HashSet};

use crate::animation::{AnimationEvent, AnimationKind};
use crate::scene::{RenderPlan, Scene};
use kinegram_core::KinegramError;

/// Slack for comparing accumulated float offsets.
const TIME_EPSILON: f64 = 1e-9;

/// Validate a built scene: unique ids, resolvable targets and a consistent timeline.
pub fn validate_scene(scene: &Scene) -> Result<(), Vec<KinegramError>> {
    let mut errors = Vec::new();

    let mut known = HashSet::new();
    for id in scene.root.ids() {
        if !known.insert(id.as_str()) {
            errors.push(KinegramError::validation(
                "id",
                format!("duplicate element id '{}' in scene '{}'", id, scene.id),
            ));
        }
    }

    check_events(
        scene.timeline.events(),
        &known,
        scene.timeline.total_duration().as_seconds(),
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a render plan, typically one read back from disk.
pub fn validate_plan(plan: &RenderPlan) -> Result<(), Vec<KinegramError>> {
    let mut errors = Vec::new();

    if plan.frame.width <= 0.0 || plan.frame.height <= 0.0 {
        errors.push(KinegramError::validation(
            "frame",
            "frame size must be positive",
        ));
    }
    if plan.fps == 0 {
        errors.push(KinegramError::validation("fps", "must be positive"));
    }

    let mut known = HashSet::new();
    for shape in &plan.shapes {
        if !known.insert(shape.id().as_str()) {
            errors.push(KinegramError::validation(
                "id",
                format!("duplicate shape id '{}'", shape.id()),
            ));
        }
        if let Err(e) = shape.validate() {
            errors.push(e);
        }
    }
    for group in &plan.groups {
        if !known.insert(group.id.as_str()) {
            errors.push(KinegramError::validation(
                "id",
                format!("group id '{}' collides with another element", group.id),
            ));
        }
    }
    for group in &plan.groups {
        for member in &group.members {
            if plan.shape(member.as_str()).is_none() {
                errors.push(KinegramError::reference(
                    member.as_str(),
                    format!("member of group '{}'", group.id),
                ));
            }
        }
    }

    check_events(
        &plan.events,
        &known,
        plan.duration.as_seconds(),
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_events(
    events: &[AnimationEvent],
    known: &HashSet<&str>,
    total: f64,
    errors: &mut Vec<KinegramError>,
) {
    let mut previous_start = 0.0;
    for (i, event) in events.iter().enumerate() {
        let context = format!("event {} (play step {})", i, event.group);
        if !known.contains(event.target.as_str()) {
            errors.push(KinegramError::reference(event.target.as_str(), context.as_str()));
        }
        if let AnimationKind::Replace { with } = &event.kind {
            if !known.contains(with.as_str()) {
                errors.push(KinegramError::reference(
                    with.as_str(),
                    format!("replacement target in {}", context),
                ));
            }
        }
        if event.duration().as_seconds() <= 0.0 {
            errors.push(KinegramError::validation(
                "duration",
                format!("{} on '{}' has no duration", context, event.target),
            ));
        }
        if !event.stagger_ratio.is_finite() || event.stagger_ratio < 0.0 {
            errors.push(KinegramError::validation(
                "stagger_ratio",
                format!("{} has stagger ratio {}", context, event.stagger_ratio),
            ));
        }
        if event.start() + TIME_EPSILON < previous_start {
            errors.push(KinegramError::Timing(format!(
                "{} starts at {:.3}s, before the previous event at {:.3}s",
                context,
                event.start(),
                previous_start
            )));
        }
        if event.end() > total + TIME_EPSILON {
            errors.push(KinegramError::Timing(format!(
                "{} ends at {:.3}s, after the timeline end at {:.3}s",
                context,
                event.end(),
                total
            )));
        }
        previous_start = event.start();
    }

    let mut windows: HashMap<&str, Vec<&AnimationEvent>> = HashMap::new();
    for event in events {
        windows.entry(event.target.as_str()).or_default().push(event);
    }
    let mut targets: Vec<_> = windows.into_iter().collect();
    targets.sort_by(|a, b| a.0.cmp(b.0));
    for (target, list) in targets {
        for (i, a) in list.iter().enumerate() {
            for b in &list[i + 1..] {
                if a.group != b.group && a.window.overlaps(&b.window, TIME_EPSILON) {
                    errors.push(KinegramError::Timing(format!(
                        "'{}' is animated by play steps {} and {} at the same time",
                        target, a.group, b.group
                    )));
                }
            }
        }
    }
}
