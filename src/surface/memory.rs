//! In-memory display surface.
//!
//! Backs the surface interface with a plain image surface so the pipeline
//! composites headlessly: embedding shells without a panel, and tests. The
//! presented-region log doubles as the damage report a hardware controller
//! would receive.

use std::cell::{Cell, RefCell};

use log::warn;

use super::{AcquiredCanvas, DisplaySurface};
use crate::error::RenderError;
use crate::util::Rect;

/// Software surface with validity toggling, exclusive-acquisition
/// enforcement, and a log of presented regions.
pub struct MemorySurface {
    pixels: RefCell<cairo::ImageSurface>,
    width: i32,
    height: i32,
    valid: Cell<bool>,
    locked: Cell<bool>,
    acquires: Cell<u32>,
    releases: Cell<u32>,
    presented: RefCell<Vec<Rect>>,
}

impl MemorySurface {
    /// Creates a surface of the given size, cleared to white.
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        let pixels = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).map_err(
            |source| RenderError::BufferAlloc {
                width,
                height,
                source,
            },
        )?;
        {
            let canvas = cairo::Context::new(&pixels)?;
            canvas.set_source_rgb(1.0, 1.0, 1.0);
            canvas.paint()?;
        }
        Ok(Self {
            pixels: RefCell::new(pixels),
            width,
            height,
            valid: Cell::new(true),
            locked: Cell::new(false),
            acquires: Cell::new(0),
            releases: Cell::new(0),
            presented: RefCell::new(Vec::new()),
        })
    }

    /// Marks the surface valid or invalid, mimicking view lifecycle churn.
    pub fn set_valid(&self, valid: bool) {
        self.valid.set(valid);
    }

    /// Number of successful acquisitions so far.
    pub fn acquire_count(&self) -> u32 {
        self.acquires.get()
    }

    /// Number of release/present calls so far.
    pub fn release_count(&self) -> u32 {
        self.releases.get()
    }

    /// Regions presented so far, in order.
    pub fn presented_regions(&self) -> Vec<Rect> {
        self.presented.borrow().clone()
    }

    /// Reads back one pixel as (r, g, b, a). `None` outside the bounds or
    /// while the surface is held.
    pub fn pixel(&self, x: i32, y: i32) -> Option<(u8, u8, u8, u8)> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let mut pixels = self.pixels.borrow_mut();
        pixels.flush();
        let stride = pixels.stride() as usize;
        let data = pixels.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let value = u32::from_ne_bytes(data[offset..offset + 4].try_into().ok()?);
        Some((
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
            (value >> 24) as u8,
        ))
    }
}

impl DisplaySurface for MemorySurface {
    fn is_valid(&self) -> bool {
        self.valid.get()
    }

    fn bounds(&self) -> Option<Rect> {
        Rect::new(0, 0, self.width, self.height)
    }

    fn acquire(&self, region: Option<Rect>) -> Option<AcquiredCanvas> {
        if !self.valid.get() {
            return None;
        }
        if self.locked.get() {
            warn!("refusing to acquire an already-held surface");
            return None;
        }
        let bounds = self.bounds()?;
        let region = match region {
            Some(rect) => rect.intersect(bounds)?,
            None => bounds,
        };
        let canvas = cairo::Context::new(&*self.pixels.borrow()).ok()?;
        self.locked.set(true);
        self.acquires.set(self.acquires.get() + 1);
        Some(AcquiredCanvas { canvas, region })
    }

    fn release_and_present(&self, acquired: AcquiredCanvas) {
        self.locked.set(false);
        self.releases.set(self.releases.get() + 1);
        self.presented.borrow_mut().push(acquired.region);
    }
}
