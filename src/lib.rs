//! Stroke compositing core for stylus drawing surfaces.
//!
//! This crate sits between a list of pen strokes and the pixels of a
//! hardware-backed display surface. It composites strokes into an off-screen
//! buffer, then presents that buffer under one of two refresh policies: a
//! full-surface redraw ([`render::NormalRenderer`]) or a cheaper
//! region-limited redraw ([`render::PartialRefreshRenderer`]). Outline
//! expansion and the physical refresh hardware stay behind the
//! [`pen::PenBackend`] and [`surface::DisplaySurface`] traits.

pub mod draw;
pub mod error;
pub mod pen;
pub mod render;
pub mod surface;
pub mod util;

pub use error::RenderError;
