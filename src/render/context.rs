//! Off-screen pixel buffer and the per-call render context.

use crate::draw::color::Color;
use crate::error::RenderError;
use crate::util::{Point, Rect};

/// Drawing-style object applied to the canvas before each stroke.
#[derive(Clone, Debug, Default)]
pub struct StrokePaint {
    pub color: Color,
    pub width: f64,
    /// Eraser mode: composite by clearing instead of painting.
    pub erase: bool,
}

impl StrokePaint {
    /// Applies this style to a Cairo canvas: source color, operator, and
    /// line width.
    pub fn apply(&self, canvas: &cairo::Context) {
        if self.erase {
            canvas.set_operator(cairo::Operator::Clear);
        } else {
            canvas.set_operator(cairo::Operator::Over);
            canvas.set_source_rgba(self.color.r, self.color.g, self.color.b, self.color.a);
        }
        canvas.set_line_width(self.width.max(0.5));
    }
}

/// Owned off-screen ARGB32 buffer the shape list composites into.
pub struct BitmapBuffer {
    surface: cairo::ImageSurface,
    width: i32,
    height: i32,
}

impl BitmapBuffer {
    /// Allocates a buffer and clears it to opaque white.
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).map_err(
            |source| RenderError::BufferAlloc {
                width,
                height,
                source,
            },
        )?;
        let buffer = Self {
            surface,
            width,
            height,
        };
        buffer.clear()?;
        Ok(buffer)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The underlying image surface, for compositing onto a screen canvas.
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// A fresh drawing context over the buffer.
    ///
    /// Contexts are transient: pixel readback requires every context over
    /// this buffer to have been dropped.
    pub fn canvas(&self) -> Result<cairo::Context, RenderError> {
        Ok(cairo::Context::new(&self.surface)?)
    }

    /// Resets the whole buffer to opaque white.
    pub fn clear(&self) -> Result<(), RenderError> {
        let canvas = self.canvas()?;
        canvas.set_operator(cairo::Operator::Source);
        canvas.set_source_rgb(1.0, 1.0, 1.0);
        canvas.paint()?;
        Ok(())
    }

    /// Reads back one pixel as (r, g, b, a); `None` outside bounds or while
    /// a context over the buffer is alive.
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<(u8, u8, u8, u8)> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
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

/// Bundle describing one render request.
///
/// Constructed per call and not retained: the buffer and paint live for the
/// duration of the render, the clip rectangle is present only for partial
/// refresh, and the anchor offsets compositing for the big-stroke paths.
pub struct RenderContext {
    buffer: BitmapBuffer,
    canvas: cairo::Context,
    paint: StrokePaint,
    clip: Option<Rect>,
    anchor: Point,
}

impl RenderContext {
    /// Creates a context over a fresh white buffer of the given size.
    pub fn new(width: i32, height: i32) -> Result<Self, RenderError> {
        Self::from_buffer(BitmapBuffer::new(width, height)?)
    }

    /// Creates a context over an existing buffer.
    pub fn from_buffer(buffer: BitmapBuffer) -> Result<Self, RenderError> {
        let canvas = buffer.canvas()?;
        Ok(Self {
            buffer,
            canvas,
            paint: StrokePaint::default(),
            clip: None,
            anchor: Point::default(),
        })
    }

    /// Sets the partial-refresh clip rectangle.
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Sets the compositing anchor point.
    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn buffer(&self) -> &BitmapBuffer {
        &self.buffer
    }

    /// Canvas drawing into the off-screen buffer.
    pub fn canvas(&self) -> &cairo::Context {
        &self.canvas
    }

    pub fn paint(&self) -> &StrokePaint {
        &self.paint
    }

    pub fn paint_mut(&mut self) -> &mut StrokePaint {
        &mut self.paint
    }

    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Releases the drawing context and hands back the buffer, enabling
    /// pixel readback.
    pub fn into_buffer(self) -> BitmapBuffer {
        drop(self.canvas);
        self.buffer
    }
}
