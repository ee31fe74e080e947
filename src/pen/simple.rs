//! Built-in Cairo pen backend.
//!
//! A deliberately plain implementation of [`PenBackend`]: pressure maps
//! linearly (or by square root for the neo-brush curve) to stamp size, and
//! stamps are round. Production devices substitute their own backend; this
//! one exists so the crate composites end to end without external hardware.

use super::{CharcoalRenderArgs, PenBackend, SizedPoint};
use crate::draw::shape::TouchSample;
use crate::error::RenderError;
use crate::render::context::StrokePaint;

/// Typical EMR digitizer maximum pressure.
const DEFAULT_MAX_PRESSURE: f64 = 4096.0;

/// Floor for the pressure-to-size mapping so light touches still leave ink.
const MIN_SIZE_FRACTION: f64 = 0.25;

/// Reference pen backend drawing with plain Cairo primitives.
#[derive(Debug, Default)]
pub struct SimplePen;

impl SimplePen {
    pub fn new() -> Self {
        Self
    }

    fn normalized(pressure: f64, max_pressure: f64) -> f64 {
        if max_pressure <= 0.0 {
            return 1.0;
        }
        (pressure / max_pressure).clamp(0.0, 1.0)
    }

    /// Expands samples into stamps, inserting midpoints where consecutive
    /// samples are further apart than half a stamp, so fast strokes stay
    /// contiguous.
    fn expand_with<F>(samples: &[TouchSample], size_of: F) -> Vec<SizedPoint>
    where
        F: Fn(&TouchSample) -> f64,
    {
        let mut points = Vec::with_capacity(samples.len());
        for pair in samples.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let size_a = size_of(a);
            points.push(SizedPoint {
                x: a.x,
                y: a.y,
                size: size_a,
            });

            let dist = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
            let step = (size_a * 0.5).max(0.5);
            let extra = (dist / step).floor() as usize;
            for i in 1..=extra {
                let t = i as f64 / (extra + 1) as f64;
                points.push(SizedPoint {
                    x: a.x + (b.x - a.x) * t,
                    y: a.y + (b.y - a.y) * t,
                    size: size_a + (size_of(b) - size_a) * t,
                });
            }
        }
        if let Some(last) = samples.last() {
            points.push(SizedPoint {
                x: last.x,
                y: last.y,
                size: size_of(last),
            });
        }
        points
    }

    fn set_ink(canvas: &cairo::Context, paint: &StrokePaint, erase: bool) {
        if erase {
            canvas.set_operator(cairo::Operator::Clear);
        } else {
            canvas.set_operator(cairo::Operator::Over);
            canvas.set_source_rgba(paint.color.r, paint.color.g, paint.color.b, paint.color.a);
        }
    }
}

impl PenBackend for SimplePen {
    fn max_pressure(&self) -> f64 {
        DEFAULT_MAX_PRESSURE
    }

    fn expand_fountain(
        &self,
        samples: &[TouchSample],
        scale: f64,
        width: f64,
        max_pressure: f64,
    ) -> Vec<SizedPoint> {
        Self::expand_with(samples, |s| {
            let p = Self::normalized(s.pressure, max_pressure);
            width * scale * (MIN_SIZE_FRACTION + (1.0 - MIN_SIZE_FRACTION) * p)
        })
    }

    fn expand_brush(
        &self,
        samples: &[TouchSample],
        width: f64,
        max_pressure: f64,
    ) -> Vec<SizedPoint> {
        // Square-root curve: fatter response at light pressure than fountain.
        Self::expand_with(samples, |s| {
            let p = Self::normalized(s.pressure, max_pressure).sqrt();
            width * (MIN_SIZE_FRACTION + (1.0 - MIN_SIZE_FRACTION) * p)
        })
    }

    fn expand_marker(
        &self,
        samples: &[TouchSample],
        width: f64,
        _max_pressure: f64,
    ) -> Vec<SizedPoint> {
        // Flat ribbon: pressure does not modulate the width.
        Self::expand_with(samples, |_| width)
    }

    fn draw_stroke_by_point_size(
        &self,
        canvas: &cairo::Context,
        paint: &StrokePaint,
        points: &[SizedPoint],
        erase: bool,
    ) -> Result<(), RenderError> {
        if points.is_empty() {
            return Ok(());
        }
        Self::set_ink(canvas, paint, erase);
        for point in points {
            canvas.arc(
                point.x,
                point.y,
                (point.size / 2.0).max(0.25),
                0.0,
                std::f64::consts::TAU,
            );
            canvas.fill()?;
        }
        Ok(())
    }

    fn draw_marker_stroke(
        &self,
        canvas: &cairo::Context,
        paint: &StrokePaint,
        points: &[SizedPoint],
        width: f64,
        erase: bool,
    ) -> Result<(), RenderError> {
        if points.is_empty() {
            return Ok(());
        }
        Self::set_ink(canvas, paint, erase);
        canvas.set_line_width(width.max(1.0));
        canvas.set_line_cap(cairo::LineCap::Round);
        canvas.set_line_join(cairo::LineJoin::Round);
        canvas.move_to(points[0].x, points[0].y);
        if points.len() == 1 {
            canvas.line_to(points[0].x + 0.1, points[0].y);
        }
        for point in &points[1..] {
            canvas.line_to(point.x, point.y);
        }
        canvas.stroke()?;
        Ok(())
    }

    fn draw_charcoal_normal(
        &self,
        canvas: &cairo::Context,
        args: &CharcoalRenderArgs<'_>,
    ) -> Result<(), RenderError> {
        if args.samples.is_empty() {
            return Ok(());
        }
        canvas.transform(args.screen_matrix);
        Self::set_ink(canvas, &args.paint, args.erase);
        canvas.set_line_width(args.paint.width.max(1.0));
        canvas.set_line_cap(cairo::LineCap::Round);
        canvas.set_line_join(cairo::LineJoin::Round);
        canvas.move_to(args.samples[0].x, args.samples[0].y);
        for sample in &args.samples[1..] {
            canvas.line_to(sample.x, sample.y);
        }
        canvas.stroke()?;

        // Second, lighter pass suggests the charcoal grain.
        if !args.erase {
            canvas.set_source_rgba(
                args.paint.color.r,
                args.paint.color.g,
                args.paint.color.b,
                args.paint.color.a * 0.35,
            );
            canvas.set_line_width((args.paint.width * 0.5).max(0.5));
            canvas.move_to(args.samples[0].x + 0.6, args.samples[0].y - 0.6);
            for sample in &args.samples[1..] {
                canvas.line_to(sample.x + 0.6, sample.y - 0.6);
            }
            canvas.stroke()?;
        }
        Ok(())
    }

    fn draw_charcoal_big(
        &self,
        canvas: &cairo::Context,
        args: &CharcoalRenderArgs<'_>,
    ) -> Result<(), RenderError> {
        if args.samples.is_empty() {
            return Ok(());
        }
        canvas.transform(args.screen_matrix);
        if let Some(matrix) = args.render_matrix {
            canvas.transform(matrix);
        }
        Self::set_ink(canvas, &args.paint, args.erase);
        // Wide strokes stamp instead of stroking; stroking at these widths
        // produces visible polygonal joints.
        let points = Self::expand_with(args.samples, |_| args.paint.width);
        for point in &points {
            canvas.arc(
                point.x,
                point.y,
                (point.size / 2.0).max(0.5),
                0.0,
                std::f64::consts::TAU,
            );
            canvas.fill()?;
        }
        Ok(())
    }
}
