//! Error taxonomy for the compositing pipeline.
//!
//! Bitmap composition is fallible and propagates; screen presentation is
//! infallible at the API level, so renderers log these errors instead of
//! returning them.

use thiserror::Error;

/// Errors surfaced while compositing strokes into a bitmap.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A Cairo drawing operation failed.
    #[error("drawing failed: {0}")]
    Draw(#[from] cairo::Error),

    /// The off-screen pixel buffer could not be allocated.
    #[error("allocating {width}x{height} buffer failed: {source}")]
    BufferAlloc {
        width: i32,
        height: i32,
        #[source]
        source: cairo::Error,
    },

    /// The pen backend failed a delegated expansion or draw step.
    #[error("pen backend: {0}")]
    Pen(String),
}
