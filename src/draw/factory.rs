//! Stateless mapping from persisted shape-kind tags to shapes and pen styles.
//!
//! Documents persisted on older builds may carry kind tags this build does
//! not recognize; every function here is total and degrades unknown input to
//! the pencil behavior instead of failing. That leniency is a compatibility
//! guarantee, not an accident.

use log::debug;

use super::shape::{CharcoalTexture, Shape, StrokeKind};
use crate::pen::CharcoalPenType;

/// Persisted tag for pencil strokes.
pub const SHAPE_PENCIL_SCRIBBLE: u32 = 0;
/// Persisted tag for brush strokes.
pub const SHAPE_BRUSH_SCRIBBLE: u32 = 1;
/// Persisted tag for marker strokes.
pub const SHAPE_MARKER_SCRIBBLE: u32 = 2;
/// Persisted tag for neo-brush strokes.
pub const SHAPE_NEO_BRUSH_SCRIBBLE: u32 = 3;
/// Persisted tag for charcoal strokes.
pub const SHAPE_CHARCOAL_SCRIBBLE: u32 = 4;

/// Style identifier consumed by the external pen/touch module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeStyle {
    Pencil,
    Fountain,
    Marker,
    NeoBrush,
    Charcoal,
    CharcoalV2,
}

impl StrokeKind {
    /// Resolves a persisted tag; unknown tags fall back to pencil.
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            SHAPE_PENCIL_SCRIBBLE => StrokeKind::Pencil,
            SHAPE_BRUSH_SCRIBBLE => StrokeKind::Brush,
            SHAPE_MARKER_SCRIBBLE => StrokeKind::Marker,
            SHAPE_NEO_BRUSH_SCRIBBLE => StrokeKind::NeoBrush,
            SHAPE_CHARCOAL_SCRIBBLE => StrokeKind::Charcoal,
            _ => StrokeKind::Pencil,
        }
    }

    /// The persisted tag for this kind.
    pub fn tag(self) -> u32 {
        match self {
            StrokeKind::Pencil => SHAPE_PENCIL_SCRIBBLE,
            StrokeKind::Brush => SHAPE_BRUSH_SCRIBBLE,
            StrokeKind::Marker => SHAPE_MARKER_SCRIBBLE,
            StrokeKind::NeoBrush => SHAPE_NEO_BRUSH_SCRIBBLE,
            StrokeKind::Charcoal => SHAPE_CHARCOAL_SCRIBBLE,
        }
    }
}

/// Creates a fresh, empty shape for a persisted kind tag. Never fails;
/// unrecognized tags produce a pencil shape.
pub fn create_shape(tag: u32) -> Shape {
    Shape::new(StrokeKind::from_tag(tag))
}

/// Maps a stroke kind (and, for charcoal, its texture sub-variant) to the
/// style identifier the external pen module expects.
pub fn stroke_style(kind: StrokeKind, texture: CharcoalTexture) -> StrokeStyle {
    match kind {
        StrokeKind::Brush => StrokeStyle::Fountain,
        StrokeKind::NeoBrush => StrokeStyle::NeoBrush,
        StrokeKind::Pencil => StrokeStyle::Pencil,
        StrokeKind::Marker => StrokeStyle::Marker,
        StrokeKind::Charcoal => match texture {
            CharcoalTexture::V2 => StrokeStyle::CharcoalV2,
            CharcoalTexture::V1 => StrokeStyle::Charcoal,
        },
    }
}

/// Whether special marker compositing rules apply to this kind.
pub fn is_marker_kind(kind: StrokeKind) -> bool {
    kind == StrokeKind::Marker
}

/// Resolves the charcoal texture sub-variant to a pen-type identifier.
pub fn charcoal_pen_type(texture: CharcoalTexture) -> CharcoalPenType {
    debug!("charcoal_pen_type for {texture:?}");
    match texture {
        CharcoalTexture::V2 => CharcoalPenType::V2,
        CharcoalTexture::V1 => CharcoalPenType::V1,
    }
}
