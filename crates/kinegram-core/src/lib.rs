//! # kinegram-core
//!
//! Core types and primitives for the Kinegram diagram generator.
//! This crate contains foundational types shared across all Kinegram crates:
//! colors, geometry, durations, easing functions, configuration and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod hash;
pub mod math;
pub mod time;
pub mod types;

pub use config::*;

pub use color::{Color, ColorError};
pub use error::{KinegramError, KinegramResult};
pub use hash::ContentHash;
pub use math::{Bounds, Direction, Point2D, Size2D};
pub use time::{Duration, TimeWindow};
pub use types::{Easing, ElementKind, FontWeight};
