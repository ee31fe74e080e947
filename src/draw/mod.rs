//! Stroke model: shapes, styling, containers, and damage tracking.
//!
//! This module defines the data the renderer composites:
//! - [`Color`]: RGBA color with a small preset palette
//! - [`Shape`]: one stroke, with its per-kind rendering strategy
//! - [`factory`]: persisted-tag to shape/style mapping
//! - [`Frame`]: ordered stroke container for a page
//! - [`DirtyTracker`]: dirty rectangles feeding partial refresh
//! - [`PenProfile`]: serde-loadable pen presets

pub mod color;
pub mod dirty;
pub mod factory;
pub mod frame;
pub mod profile;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use frame::Frame;
pub use profile::PenProfile;
pub use shape::{CharcoalTexture, Shape, StrokeKind, TouchSample};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GRAY, RED, SADDLE_BROWN, WHITE};
