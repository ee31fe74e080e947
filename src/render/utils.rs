//! Shared rendering helpers: surface validation, background fill, anchor
//! transform.

use super::context::RenderContext;
use crate::surface::DisplaySurface;
use crate::util::Rect;

/// Validates surface liveness and returns its pixel bounds, or `None` when
/// the surface is invalid or its bounds cannot be computed.
pub fn check_surface(surface: &dyn DisplaySurface) -> Option<Rect> {
    if !surface.is_valid() {
        return None;
    }
    surface.bounds()
}

/// Fills the given rectangle with the opaque white clean slate.
pub fn render_background(canvas: &cairo::Context, rect: Rect) -> Result<(), cairo::Error> {
    canvas.set_operator(cairo::Operator::Over);
    canvas.set_source_rgb(1.0, 1.0, 1.0);
    canvas.rectangle(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    canvas.fill()
}

/// Builds the translation-only transform from the context's anchor point,
/// used by the charcoal big-stroke path.
pub fn point_matrix(ctx: &RenderContext) -> cairo::Matrix {
    let anchor = ctx.anchor();
    cairo::Matrix::new(1.0, 0.0, 0.0, 1.0, anchor.x as f64, anchor.y as f64)
}
