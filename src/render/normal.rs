//! Full-surface refresh renderer.

use log::warn;

use super::Renderer;
use super::context::{BitmapBuffer, RenderContext};
use super::utils;
use crate::surface::{DisplaySurface, SurfaceLock};
use crate::util::Rect;

/// Hook invoked after drawing but before the surface is released, used for
/// device-specific state reset on full refreshes.
pub type BeforeReleaseHook = Box<dyn Fn(&dyn DisplaySurface)>;

/// Renderer that redraws the entire surface on every present.
///
/// Surface invalidity is a silent no-op; draw failures are logged and
/// suppressed, and release still happens. Only the full refresh funnels
/// through the pre-release hook; partial refresh intentionally does not.
#[derive(Default)]
pub struct NormalRenderer {
    before_release: Option<BeforeReleaseHook>,
}

impl NormalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the pre-release hook.
    pub fn with_before_release(hook: impl Fn(&dyn DisplaySurface) + 'static) -> Self {
        Self {
            before_release: Some(Box::new(hook)),
        }
    }

    fn present(&self, surface: &dyn DisplaySurface, buffer: &BitmapBuffer) {
        let Some(bounds) = utils::check_surface(surface) else {
            return;
        };
        // Full refresh always acquires the complete bounds, ignoring any
        // clip carried by the context.
        let Some(lock) = SurfaceLock::acquire(surface, None) else {
            return;
        };
        if let Err(err) = compose(lock.canvas(), bounds, buffer) {
            warn!("full refresh draw failed: {err}");
        }
        if let Some(hook) = &self.before_release {
            hook(surface);
        }
        // Dropping the lock releases and presents.
    }
}

fn compose(
    canvas: &cairo::Context,
    bounds: Rect,
    buffer: &BitmapBuffer,
) -> Result<(), cairo::Error> {
    utils::render_background(canvas, bounds)?;
    canvas.set_source_surface(buffer.surface(), 0.0, 0.0)?;
    canvas.paint()?;
    // Detach the buffer from the canvas so the caller regains exclusive
    // access to it once the lock drops.
    canvas.set_source_rgb(0.0, 0.0, 0.0);
    Ok(())
}

impl Renderer for NormalRenderer {
    fn render_to_screen(&self, surface: &dyn DisplaySurface, ctx: &RenderContext) {
        self.present(surface, ctx.buffer());
    }

    fn render_bitmap_to_screen(&self, surface: &dyn DisplaySurface, buffer: &BitmapBuffer) {
        self.present(surface, buffer);
    }
}
