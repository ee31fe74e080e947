//! Frame container for the strokes of one page.

use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Ordered collection of strokes for a drawing session.
///
/// Strokes are kept in draw order: the first stroke is the bottom layer and
/// later strokes composite over earlier ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    shapes: Vec<Shape>,
}

impl Frame {
    /// Creates a new empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// All strokes in draw order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Adds a stroke on top of the existing ones.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Attempts to add a stroke, enforcing a maximum count when `max` > 0.
    ///
    /// Returns `true` if the stroke was added.
    pub fn try_add_shape(&mut self, shape: Shape, max: usize) -> bool {
        if max == 0 || self.shapes.len() < max {
            self.shapes.push(shape);
            true
        } else {
            false
        }
    }

    /// Removes and returns the most recently added stroke, if any.
    pub fn undo(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    /// Removes all strokes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::shape::{StrokeKind, TouchSample};

    fn sample_stroke() -> Shape {
        let mut shape = Shape::new(StrokeKind::Pencil);
        shape.push_sample(TouchSample::new(1.0, 1.0, 500.0, 0));
        shape
    }

    #[test]
    fn try_add_shape_respects_limit() {
        let mut frame = Frame::new();
        assert!(frame.try_add_shape(sample_stroke(), 1));
        assert!(!frame.try_add_shape(sample_stroke(), 1));
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn undo_removes_most_recent() {
        let mut frame = Frame::new();
        frame.add_shape(sample_stroke());
        let mut second = sample_stroke();
        second.width = 9.0;
        frame.add_shape(second);

        let undone = frame.undo().expect("stroke to undo");
        assert_eq!(undone.width, 9.0);
        assert_eq!(frame.len(), 1);
    }
}
