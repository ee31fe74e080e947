//! Interface to the external pen-rendering module.
//!
//! The compositing core does not own the outline-expansion mathematics; it
//! only decides which expansion variant and draw primitive each stroke kind
//! invokes, and in what order relative to style application. [`PenBackend`]
//! is that boundary. [`SimplePen`] is a self-contained Cairo implementation
//! suitable for headless composition and tests.

pub mod simple;

pub use simple::SimplePen;

use crate::draw::shape::TouchSample;
use crate::error::RenderError;
use crate::render::context::StrokePaint;

/// Charcoal strokes at or below this width take the normal draw path; wider
/// strokes take the big-stroke path with an explicit render matrix. The
/// comparison is inclusive: a stroke exactly at the threshold is normal.
pub const CHARCOAL_NORMAL_WIDTH_THRESHOLD: f64 = 20.0;

/// Pen-type identifier for the charcoal renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharcoalPenType {
    V1,
    V2,
}

/// One expanded outline point with its draw size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizedPoint {
    pub x: f64,
    pub y: f64,
    /// Stamp diameter at this point, in pixels.
    pub size: f64,
}

/// Argument bundle for the charcoal draw paths.
#[derive(Clone, Debug)]
pub struct CharcoalRenderArgs<'a> {
    pub pen_type: CharcoalPenType,
    pub paint: StrokePaint,
    pub samples: &'a [TouchSample],
    pub erase: bool,
    /// Anchor translation applied when compositing to the screen.
    pub screen_matrix: cairo::Matrix,
    /// Additional transform supplied only on the big-stroke path, where the
    /// delegated renderer tiles the stroke itself.
    pub render_matrix: Option<cairo::Matrix>,
}

/// The consumed interface of the external pen-rendering module.
///
/// One expansion variant exists per stroke kind; draw primitives composite
/// the expanded points onto a Cairo canvas, honoring the erase flag.
pub trait PenBackend {
    /// Device maximum digitizer pressure used to normalize samples.
    fn max_pressure(&self) -> f64;

    /// Fountain-pen expansion (brush strokes), with an explicit scale factor.
    fn expand_fountain(
        &self,
        samples: &[TouchSample],
        scale: f64,
        width: f64,
        max_pressure: f64,
    ) -> Vec<SizedPoint>;

    /// Brush expansion with the neo-brush pressure curve.
    fn expand_brush(&self, samples: &[TouchSample], width: f64, max_pressure: f64)
    -> Vec<SizedPoint>;

    /// Flat-ribbon expansion for marker strokes.
    fn expand_marker(
        &self,
        samples: &[TouchSample],
        width: f64,
        max_pressure: f64,
    ) -> Vec<SizedPoint>;

    /// Fills each expanded point at its own size (brush/neo-brush primitive).
    fn draw_stroke_by_point_size(
        &self,
        canvas: &cairo::Context,
        paint: &StrokePaint,
        points: &[SizedPoint],
        erase: bool,
    ) -> Result<(), RenderError>;

    /// Draws a constant-width marker ribbon through the expanded points.
    fn draw_marker_stroke(
        &self,
        canvas: &cairo::Context,
        paint: &StrokePaint,
        points: &[SizedPoint],
        width: f64,
        erase: bool,
    ) -> Result<(), RenderError>;

    /// Charcoal draw path for widths at or below the threshold.
    fn draw_charcoal_normal(
        &self,
        canvas: &cairo::Context,
        args: &CharcoalRenderArgs<'_>,
    ) -> Result<(), RenderError>;

    /// Charcoal draw path for widths above the threshold; `args.render_matrix`
    /// carries the anchor translation the tiling strategy needs.
    fn draw_charcoal_big(
        &self,
        canvas: &cairo::Context,
        args: &CharcoalRenderArgs<'_>,
    ) -> Result<(), RenderError>;
}
