//! # kinegram-diagrams
//!
//! Procedural diagram components built on the Kinegram IR (cell grids,
//! weight matrices, token cubes, attention heads, layer stacks and the
//! like) and the catalog of ready-made scenes that compose them.
//!
//! Anything random is drawn from a [`WeightSampler`] seeded from the scene
//! context, so a scene name plus a seed fully determines its render plan.

pub mod components;
pub mod palette;
pub mod scenes;
pub mod weights;

pub use scenes::{SceneCatalog, SceneFn, SceneInfo};
pub use weights::WeightSampler;
