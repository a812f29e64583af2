//! # kinegram-ir
//!
//! The Kinegram Intermediate Representation: immutable shape descriptors,
//! layout trees and animation timelines, lowered to a render plan that an
//! external engine can draw.
//!
//! Everything here is pure and deterministic. The same inputs and
//! [`SceneContext`] always yield the same positions, events and plan hash.

pub mod animation;
pub mod builder;
pub mod context;
pub mod layout;
pub mod scene;
pub mod shape;
pub mod validate;

pub use animation::{
    sequence, AnimationEvent, AnimationKind, AnimationSequencer, Play, Step, Timeline, Track,
    TransformChange,
};
pub use builder::SceneBuilder;
pub use context::{SceneContext, Theme};
pub use layout::{
    Alignment, Arrangement, ElementRef, LayoutChild, LayoutComposer, LayoutDirective, LayoutNode,
};
pub use scene::{GroupEntry, RenderPlan, Scene, SceneId};
pub use shape::{ElementId, ShapeDescriptor, ShapeFactory, ShapeKind, Style};
pub use validate::{validate_plan, validate_scene};
