//! Renderer abstraction: full and partial refresh over one shared flow.
//!
//! Both strategies follow acquire → clear → draw → release, with release
//! guaranteed on every exit path by [`crate::surface::SurfaceLock`]. They
//! diverge only in clip handling: the normal renderer always acquires the
//! full bounds and repaints everything; the partial renderer acquires the
//! clip rectangle only.

pub mod context;
pub mod normal;
pub mod partial;
pub mod utils;

pub use context::{BitmapBuffer, RenderContext, StrokePaint};
pub use normal::NormalRenderer;
pub use partial::PartialRefreshRenderer;

use crate::draw::shape::Shape;
use crate::error::RenderError;
use crate::pen::PenBackend;
use crate::surface::DisplaySurface;

/// Orchestrates surface acquisition, background clearing, shape iteration,
/// and release/presentation under one refresh policy.
///
/// Lifecycle: a renderer is activated before a sequence of render calls and
/// deactivated afterwards; what the hooks register with (e.g. a hardware
/// refresh controller) is the embedding's concern.
pub trait Renderer {
    /// Called when this renderer becomes the active strategy.
    fn on_active(&mut self, _surface: &dyn DisplaySurface) {}

    /// Called when this renderer stops being the active strategy.
    fn on_deactivate(&mut self, _surface: &dyn DisplaySurface) {}

    /// Composites the shape list, in order, into the context's buffer only.
    /// No surface interaction happens here. The first stroke failure
    /// propagates; the caller decides whether to retry or present what drew.
    fn render_to_bitmap(
        &self,
        shapes: &[Shape],
        ctx: &mut RenderContext,
        pen: &dyn PenBackend,
    ) -> Result<(), RenderError> {
        for shape in shapes {
            shape.render(ctx, pen)?;
        }
        Ok(())
    }

    /// Presents the context's buffer on the surface under this renderer's
    /// refresh policy. Infallible by design: an invalid surface is a silent
    /// no-op and draw failures are logged and suppressed, so the surface is
    /// never left unreleased.
    fn render_to_screen(&self, surface: &dyn DisplaySurface, ctx: &RenderContext);

    /// Presents a bare off-screen buffer, without a render context (the
    /// bitmap overload of [`render_to_screen`](Self::render_to_screen)).
    /// A bare buffer carries no clip rectangle, so clip-scoped strategies
    /// cannot honor this call and treat it as a logged no-op.
    fn render_bitmap_to_screen(&self, surface: &dyn DisplaySurface, buffer: &BitmapBuffer);
}
