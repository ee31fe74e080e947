//! Display surface abstraction and scoped acquisition.
//!
//! The display controller is an external collaborator; [`DisplaySurface`] is
//! its consumed interface. Acquisition is synchronous and may fail (a surface
//! routinely becomes invalid during view teardown). [`SurfaceLock`] is the
//! scoped-acquisition guard that makes the central resource-safety invariant
//! structural: release happens exactly once, on every exit path.

pub mod memory;

pub use memory::MemorySurface;

use crate::util::Rect;

/// An exclusively held drawable region of a surface.
///
/// The canvas draws into the surface; the region records what the underlying
/// hardware will refresh on present.
pub struct AcquiredCanvas {
    pub canvas: cairo::Context,
    pub region: Rect,
}

/// Consumed interface of the surface/display controller.
pub trait DisplaySurface {
    /// Whether the surface is currently live and drawable.
    fn is_valid(&self) -> bool;

    /// Full pixel bounds of the surface, or `None` when they cannot be
    /// computed (e.g. not yet configured).
    fn bounds(&self) -> Option<Rect>;

    /// Acquires an exclusive drawable handle scoped to `region`, or to the
    /// full bounds when `region` is `None`. Returns `None` when the surface
    /// is invalid, already held, or the region has no on-surface area.
    fn acquire(&self, region: Option<Rect>) -> Option<AcquiredCanvas>;

    /// Releases the handle and presents the drawn region. Called exactly once
    /// per successful [`acquire`](Self::acquire).
    fn release_and_present(&self, acquired: AcquiredCanvas);
}

/// RAII guard over one acquire→draw→release cycle.
///
/// Dropping the lock releases and presents, whether the draw step succeeded
/// or not.
pub struct SurfaceLock<'a> {
    surface: &'a dyn DisplaySurface,
    acquired: Option<AcquiredCanvas>,
}

impl<'a> SurfaceLock<'a> {
    /// Attempts to acquire the surface for the given region.
    pub fn acquire(surface: &'a dyn DisplaySurface, region: Option<Rect>) -> Option<Self> {
        let acquired = surface.acquire(region)?;
        Some(Self {
            surface,
            acquired: Some(acquired),
        })
    }

    /// Canvas drawing into the acquired region.
    pub fn canvas(&self) -> &cairo::Context {
        // The option is only emptied in drop.
        &self.acquired.as_ref().unwrap().canvas
    }

    /// The region this acquisition is scoped to.
    pub fn region(&self) -> Rect {
        self.acquired.as_ref().unwrap().region
    }
}

impl Drop for SurfaceLock<'_> {
    fn drop(&mut self) {
        if let Some(acquired) = self.acquired.take() {
            self.surface.release_and_present(acquired);
        }
    }
}
