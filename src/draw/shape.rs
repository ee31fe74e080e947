//! Stroke shapes and their per-kind rendering strategies.
//!
//! A [`Shape`] is one pen stroke: a sequence of raw stylus samples plus the
//! styling captured when the stroke started. Rendering dispatches on the
//! stroke kind; every kind shares the same sample format and the same
//! style-application pre-step, but delegates point expansion and the draw
//! primitive differently (see [`crate::pen::PenBackend`]).

use log::debug;
use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::error::RenderError;
use crate::pen::{CHARCOAL_NORMAL_WIDTH_THRESHOLD, CharcoalRenderArgs, PenBackend};
use crate::render::{RenderContext, utils};
use crate::util::Rect;

/// Pen-style category of a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeKind {
    /// Plain polyline, no pressure expansion. Fallback for unknown kinds.
    Pencil,
    /// Pressure-sensitive fountain outline, filled.
    Brush,
    /// Constant-width flat ribbon; supports erase compositing.
    Marker,
    /// Brush-like expansion with a different pressure curve.
    NeoBrush,
    /// Textured stroke with a width-dependent draw path.
    Charcoal,
}

/// Charcoal texture sub-variant, selecting the delegated pen type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharcoalTexture {
    #[default]
    V1,
    V2,
}

/// One raw stylus input sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    pub x: f64,
    pub y: f64,
    /// Raw digitizer pressure, normalized against the device maximum by the
    /// pen backend.
    pub pressure: f64,
    pub timestamp_ms: u64,
}

impl TouchSample {
    pub fn new(x: f64, y: f64, pressure: f64, timestamp_ms: u64) -> Self {
        Self {
            x,
            y,
            pressure,
            timestamp_ms,
        }
    }
}

/// A single completed or in-progress stroke.
///
/// Samples are append-only during capture and are not mutated by rendering.
/// Rendering an empty stroke is a no-op.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shape {
    kind: StrokeKind,
    samples: Vec<TouchSample>,
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
    /// Texture sub-variant; only meaningful for charcoal strokes.
    pub texture: CharcoalTexture,
    /// Eraser mode: composite by clearing instead of drawing.
    pub transparent: bool,
}

impl Shape {
    /// Creates an empty stroke of the given kind with default styling.
    pub fn new(kind: StrokeKind) -> Self {
        Self {
            kind,
            samples: Vec::new(),
            width: 3.0,
            color: Color::default(),
            texture: CharcoalTexture::default(),
            transparent: false,
        }
    }

    pub fn kind(&self) -> StrokeKind {
        self.kind
    }

    pub fn samples(&self) -> &[TouchSample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Appends one stylus sample. Only valid during stroke capture.
    pub fn push_sample(&mut self, sample: TouchSample) {
        self.samples.push(sample);
    }

    /// Appends a batch of stylus samples.
    pub fn extend_samples(&mut self, samples: impl IntoIterator<Item = TouchSample>) {
        self.samples.extend(samples);
    }

    /// Returns the stroke-width-padded bounding box, or `None` for a stroke
    /// with no samples. Suitable for dirty region tracking.
    pub fn bounding_box(&self) -> Option<Rect> {
        let first = self.samples.first()?;
        let mut min_x = first.x;
        let mut max_x = first.x;
        let mut min_y = first.y;
        let mut max_y = first.y;

        for sample in &self.samples[1..] {
            min_x = min_x.min(sample.x);
            max_x = max_x.max(sample.x);
            min_y = min_y.min(sample.y);
            max_y = max_y.max(sample.y);
        }

        let padding = (self.width / 2.0).ceil().max(1.0);
        Rect::from_min_max(
            (min_x - padding).floor() as i32,
            (min_y - padding).floor() as i32,
            (max_x + padding).ceil() as i32 + 1,
            (max_y + padding).ceil() as i32 + 1,
        )
    }

    /// Shared pre-step: configures the context's paint from this stroke's
    /// color, width, and eraser flag.
    fn apply_stroke_style(&self, ctx: &mut RenderContext) {
        let paint = ctx.paint_mut();
        paint.color = self.color;
        paint.width = self.width;
        paint.erase = self.transparent;
    }

    /// Renders this stroke into the context's pixel buffer.
    ///
    /// Failure propagates only from the delegated expansion/draw step; the
    /// caller treats it as fatal to this call and recoverable.
    pub fn render(
        &self,
        ctx: &mut RenderContext,
        pen: &dyn PenBackend,
    ) -> Result<(), RenderError> {
        if self.samples.is_empty() {
            return Ok(());
        }
        self.apply_stroke_style(ctx);

        // Balance canvas state around each stroke so operator/clip changes
        // made by one kind never leak into the next.
        ctx.canvas().save()?;
        let result = self.render_inner(ctx, pen);
        let _ = ctx.canvas().restore();
        result
    }

    fn render_inner(
        &self,
        ctx: &mut RenderContext,
        pen: &dyn PenBackend,
    ) -> Result<(), RenderError> {
        match self.kind {
            StrokeKind::Pencil => self.render_pencil(ctx),
            StrokeKind::Brush => self.render_brush(ctx, pen),
            StrokeKind::Marker => self.render_marker(ctx, pen),
            StrokeKind::NeoBrush => self.render_neo_brush(ctx, pen),
            StrokeKind::Charcoal => self.render_charcoal(ctx, pen),
        }
    }

    /// Direct point-to-path polyline, no pressure expansion.
    fn render_pencil(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        let canvas = ctx.canvas();
        ctx.paint().apply(canvas);
        canvas.set_line_cap(cairo::LineCap::Round);
        canvas.set_line_join(cairo::LineJoin::Round);

        let first = self.samples[0];
        canvas.move_to(first.x, first.y);
        if self.samples.len() == 1 {
            // A tap has no path extent; a round cap needs a tiny segment.
            canvas.line_to(first.x + 0.1, first.y);
        }
        for sample in &self.samples[1..] {
            canvas.line_to(sample.x, sample.y);
        }
        canvas.stroke()?;
        Ok(())
    }

    /// Fountain expansion at fixed 1.0 scale, filled by point size.
    fn render_brush(
        &self,
        ctx: &mut RenderContext,
        pen: &dyn PenBackend,
    ) -> Result<(), RenderError> {
        let points = pen.expand_fountain(&self.samples, 1.0, self.width, pen.max_pressure());
        debug!("brush stroke expanded to {} points", points.len());
        pen.draw_stroke_by_point_size(ctx.canvas(), ctx.paint(), &points, self.transparent)
    }

    /// Constant-width ribbon; the eraser flag switches the compositing mode.
    fn render_marker(
        &self,
        ctx: &mut RenderContext,
        pen: &dyn PenBackend,
    ) -> Result<(), RenderError> {
        let points = pen.expand_marker(&self.samples, self.width, pen.max_pressure());
        debug!("marker stroke expanded to {} points", points.len());
        pen.draw_marker_stroke(
            ctx.canvas(),
            ctx.paint(),
            &points,
            self.width,
            self.transparent,
        )
    }

    /// Brush-family expansion with a different curve, same draw primitive.
    fn render_neo_brush(
        &self,
        ctx: &mut RenderContext,
        pen: &dyn PenBackend,
    ) -> Result<(), RenderError> {
        let points = pen.expand_brush(&self.samples, self.width, pen.max_pressure());
        debug!("neo-brush stroke expanded to {} points", points.len());
        pen.draw_stroke_by_point_size(ctx.canvas(), ctx.paint(), &points, self.transparent)
    }

    /// Two-tier charcoal policy: widths at or below the threshold take the
    /// normal path; wider strokes take the big-stroke path, which needs the
    /// anchor translation as a render matrix for the delegated tiling.
    fn render_charcoal(
        &self,
        ctx: &mut RenderContext,
        pen: &dyn PenBackend,
    ) -> Result<(), RenderError> {
        let pen_type = super::factory::charcoal_pen_type(self.texture);
        debug!(
            "charcoal stroke: {} samples, width {}",
            self.samples.len(),
            self.width
        );

        let mut args = CharcoalRenderArgs {
            pen_type,
            paint: ctx.paint().clone(),
            samples: &self.samples,
            erase: self.transparent,
            screen_matrix: utils::point_matrix(ctx),
            render_matrix: None,
        };
        if self.width <= CHARCOAL_NORMAL_WIDTH_THRESHOLD {
            pen.draw_charcoal_normal(ctx.canvas(), &args)
        } else {
            args.render_matrix = Some(utils::point_matrix(ctx));
            pen.draw_charcoal_big(ctx.canvas(), &args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke_with(points: &[(f64, f64)], width: f64) -> Shape {
        let mut shape = Shape::new(StrokeKind::Pencil);
        shape.width = width;
        for (i, &(x, y)) in points.iter().enumerate() {
            shape.push_sample(TouchSample::new(x, y, 1024.0, i as u64 * 8));
        }
        shape
    }

    #[test]
    fn bounding_box_expands_with_width() {
        let shape = stroke_with(&[(10.0, 20.0), (30.0, 40.0)], 6.0);
        let rect = shape.bounding_box().expect("stroke should have bounds");
        assert_eq!(rect.x, 7);
        assert_eq!(rect.y, 17);
        assert!(rect.width >= 26);
        assert!(rect.height >= 26);
    }

    #[test]
    fn empty_stroke_has_no_bounds() {
        let shape = Shape::new(StrokeKind::Brush);
        assert!(shape.bounding_box().is_none());
        assert!(shape.is_empty());
    }

    #[test]
    fn single_sample_still_yields_valid_rect() {
        let shape = stroke_with(&[(5.0, 5.0)], 1.0);
        let rect = shape.bounding_box().expect("tap should have bounds");
        assert!(rect.is_valid());
    }
}
