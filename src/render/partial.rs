//! Region-limited refresh renderer.

use log::warn;

use super::Renderer;
use super::context::{BitmapBuffer, RenderContext};
use super::utils;
use crate::surface::{DisplaySurface, SurfaceLock};

/// Renderer that refreshes only the context's clip rectangle.
///
/// Acquisition is scoped to the clip, never the full bounds; that scoping is
/// the whole point of this renderer, since the underlying hardware only
/// refreshes what the acquisition marked dirty. Release is direct and does
/// not run the full-refresh pre-release hook: partial updates must not
/// trigger full-refresh post-processing.
#[derive(Debug, Default)]
pub struct PartialRefreshRenderer;

impl PartialRefreshRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PartialRefreshRenderer {
    fn render_to_screen(&self, surface: &dyn DisplaySurface, ctx: &RenderContext) {
        let Some(clip) = ctx.clip() else {
            warn!("partial refresh requested without a clip rectangle");
            return;
        };
        let Some(bounds) = utils::check_surface(surface) else {
            return;
        };
        let Some(lock) = SurfaceLock::acquire(surface, Some(clip)) else {
            return;
        };
        let result = (|| -> Result<(), cairo::Error> {
            let canvas = lock.canvas();
            canvas.rectangle(
                clip.x as f64,
                clip.y as f64,
                clip.width as f64,
                clip.height as f64,
            );
            canvas.clip();
            // Background fill targets the full view rect; the canvas clip
            // limits the actual writes to the refreshed region.
            utils::render_background(canvas, bounds)?;
            canvas.set_source_surface(ctx.buffer().surface(), 0.0, 0.0)?;
            canvas.paint()?;
            canvas.set_source_rgb(0.0, 0.0, 0.0);
            Ok(())
        })();
        if let Err(err) = result {
            warn!("partial refresh draw failed: {err}");
        }
        // Dropping the lock releases immediately; no pre-release hook here.
    }

    fn render_bitmap_to_screen(&self, _surface: &dyn DisplaySurface, _buffer: &BitmapBuffer) {
        // A bare buffer carries no clip rectangle, and partial refresh never
        // falls back to acquiring the full bounds.
        warn!("partial refresh cannot present a buffer without a clip rectangle");
    }
}
