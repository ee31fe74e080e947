//! End-to-end tests for the compositing pipeline: shape dispatch, refresh
//! policies, and the release-on-all-paths surface invariant.

use std::cell::{Cell, RefCell};

use inkslate::draw::factory;
use inkslate::draw::{CharcoalTexture, DirtyTracker, Shape, StrokeKind, TouchSample, color};
use inkslate::pen::{
    CHARCOAL_NORMAL_WIDTH_THRESHOLD, CharcoalRenderArgs, PenBackend, SimplePen, SizedPoint,
};
use inkslate::render::{
    NormalRenderer, PartialRefreshRenderer, RenderContext, Renderer, StrokePaint,
};
use inkslate::surface::{AcquiredCanvas, DisplaySurface, MemorySurface};
use inkslate::util::{Point, Rect};
use inkslate::RenderError;

fn line_stroke(kind: StrokeKind, points: &[(f64, f64)], width: f64) -> Shape {
    let mut shape = Shape::new(kind);
    shape.width = width;
    for (i, &(x, y)) in points.iter().enumerate() {
        shape.push_sample(TouchSample::new(x, y, 2048.0, i as u64 * 8));
    }
    shape
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Records which pen entry points fire without drawing anything.
#[derive(Default)]
struct RecordingPen {
    events: RefCell<Vec<String>>,
    fail_draws: bool,
}

impl RecordingPen {
    fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn record(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    fn draw_result(&self) -> Result<(), RenderError> {
        if self.fail_draws {
            Err(RenderError::Pen("injected draw failure".into()))
        } else {
            Ok(())
        }
    }
}

impl PenBackend for RecordingPen {
    fn max_pressure(&self) -> f64 {
        4096.0
    }

    fn expand_fountain(
        &self,
        samples: &[TouchSample],
        scale: f64,
        _width: f64,
        _max_pressure: f64,
    ) -> Vec<SizedPoint> {
        self.record(format!("expand_fountain scale={scale}"));
        samples
            .iter()
            .map(|s| SizedPoint {
                x: s.x,
                y: s.y,
                size: 1.0,
            })
            .collect()
    }

    fn expand_brush(
        &self,
        samples: &[TouchSample],
        _width: f64,
        _max_pressure: f64,
    ) -> Vec<SizedPoint> {
        self.record("expand_brush");
        samples
            .iter()
            .map(|s| SizedPoint {
                x: s.x,
                y: s.y,
                size: 1.0,
            })
            .collect()
    }

    fn expand_marker(
        &self,
        samples: &[TouchSample],
        width: f64,
        _max_pressure: f64,
    ) -> Vec<SizedPoint> {
        self.record("expand_marker");
        samples
            .iter()
            .map(|s| SizedPoint {
                x: s.x,
                y: s.y,
                size: width,
            })
            .collect()
    }

    fn draw_stroke_by_point_size(
        &self,
        _canvas: &cairo::Context,
        _paint: &StrokePaint,
        points: &[SizedPoint],
        erase: bool,
    ) -> Result<(), RenderError> {
        self.record(format!("draw_point_size n={} erase={erase}", points.len()));
        self.draw_result()
    }

    fn draw_marker_stroke(
        &self,
        _canvas: &cairo::Context,
        _paint: &StrokePaint,
        _points: &[SizedPoint],
        width: f64,
        erase: bool,
    ) -> Result<(), RenderError> {
        self.record(format!("draw_marker width={width} erase={erase}"));
        self.draw_result()
    }

    fn draw_charcoal_normal(
        &self,
        _canvas: &cairo::Context,
        args: &CharcoalRenderArgs<'_>,
    ) -> Result<(), RenderError> {
        assert!(args.render_matrix.is_none());
        self.record(format!("charcoal_normal pen_type={:?}", args.pen_type));
        self.draw_result()
    }

    fn draw_charcoal_big(
        &self,
        _canvas: &cairo::Context,
        args: &CharcoalRenderArgs<'_>,
    ) -> Result<(), RenderError> {
        let matrix = args.render_matrix.expect("big stroke carries render matrix");
        self.record(format!(
            "charcoal_big pen_type={:?} anchor=({}, {})",
            args.pen_type,
            matrix.x0(),
            matrix.y0()
        ));
        self.draw_result()
    }
}

/// Surface whose acquired canvas fails every draw: the image surface is
/// finished right after the context is created, so drawing reports
/// `SurfaceFinished` while acquire/release accounting still works.
struct BrokenCanvasSurface {
    acquires: Cell<u32>,
    releases: Cell<u32>,
}

impl BrokenCanvasSurface {
    fn new() -> Self {
        Self {
            acquires: Cell::new(0),
            releases: Cell::new(0),
        }
    }
}

impl DisplaySurface for BrokenCanvasSurface {
    fn is_valid(&self) -> bool {
        true
    }

    fn bounds(&self) -> Option<Rect> {
        Rect::new(0, 0, 16, 16)
    }

    fn acquire(&self, region: Option<Rect>) -> Option<AcquiredCanvas> {
        let region = region.or_else(|| self.bounds())?;
        let pixels = cairo::ImageSurface::create(cairo::Format::ARgb32, 16, 16).ok()?;
        let canvas = cairo::Context::new(&pixels).ok()?;
        pixels.finish();
        self.acquires.set(self.acquires.get() + 1);
        Some(AcquiredCanvas { canvas, region })
    }

    fn release_and_present(&self, _acquired: AcquiredCanvas) {
        self.releases.set(self.releases.get() + 1);
    }
}

// ---------------------------------------------------------------------------
// Shape dispatch
// ---------------------------------------------------------------------------

#[test]
fn unknown_kind_renders_exactly_like_pencil() {
    let pen = SimplePen::new();
    let points = [(1.0, 4.0), (6.0, 4.0), (6.0, 1.0)];

    let mut fallback = factory::create_shape(777);
    let mut pencil = factory::create_shape(factory::SHAPE_PENCIL_SCRIBBLE);
    for (i, &(x, y)) in points.iter().enumerate() {
        fallback.push_sample(TouchSample::new(x, y, 2048.0, i as u64));
        pencil.push_sample(TouchSample::new(x, y, 2048.0, i as u64));
    }

    let mut ctx_a = RenderContext::new(8, 8).unwrap();
    let mut ctx_b = RenderContext::new(8, 8).unwrap();
    fallback.render(&mut ctx_a, &pen).unwrap();
    pencil.render(&mut ctx_b, &pen).unwrap();

    let mut buf_a = ctx_a.into_buffer();
    let mut buf_b = ctx_b.into_buffer();
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(buf_a.pixel(x, y), buf_b.pixel(x, y), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn each_kind_invokes_its_expansion_and_primitive() {
    let pen = RecordingPen::default();
    let mut ctx = RenderContext::new(32, 32).unwrap();
    let renderer = NormalRenderer::new();

    let shapes = vec![
        line_stroke(StrokeKind::Brush, &[(2.0, 2.0), (8.0, 2.0)], 6.0),
        line_stroke(StrokeKind::Marker, &[(2.0, 6.0), (8.0, 6.0)], 10.0),
        line_stroke(StrokeKind::NeoBrush, &[(2.0, 10.0), (8.0, 10.0)], 6.0),
    ];
    renderer.render_to_bitmap(&shapes, &mut ctx, &pen).unwrap();

    let events = pen.events();
    assert_eq!(
        events,
        vec![
            "expand_fountain scale=1".to_string(),
            "draw_point_size n=2 erase=false".to_string(),
            "expand_marker".to_string(),
            "draw_marker width=10 erase=false".to_string(),
            "expand_brush".to_string(),
            "draw_point_size n=2 erase=false".to_string(),
        ]
    );
}

#[test]
fn charcoal_threshold_is_inclusive() {
    let renderer = NormalRenderer::new();

    // Exactly at the threshold: normal path.
    let pen = RecordingPen::default();
    let mut ctx = RenderContext::new(16, 16).unwrap();
    let at = line_stroke(
        StrokeKind::Charcoal,
        &[(1.0, 1.0), (5.0, 5.0)],
        CHARCOAL_NORMAL_WIDTH_THRESHOLD,
    );
    renderer.render_to_bitmap(&[at], &mut ctx, &pen).unwrap();
    assert_eq!(pen.events(), vec!["charcoal_normal pen_type=V1".to_string()]);

    // Just above: big-stroke path, with the anchor as render matrix.
    let pen = RecordingPen::default();
    let mut ctx = RenderContext::new(16, 16)
        .unwrap()
        .with_anchor(Point::new(3, 4));
    let above = line_stroke(
        StrokeKind::Charcoal,
        &[(1.0, 1.0), (5.0, 5.0)],
        CHARCOAL_NORMAL_WIDTH_THRESHOLD + 0.5,
    );
    renderer.render_to_bitmap(&[above], &mut ctx, &pen).unwrap();
    assert_eq!(
        pen.events(),
        vec!["charcoal_big pen_type=V1 anchor=(3, 4)".to_string()]
    );
}

#[test]
fn charcoal_texture_selects_pen_type() {
    let pen = RecordingPen::default();
    let renderer = NormalRenderer::new();
    let mut ctx = RenderContext::new(16, 16).unwrap();

    let mut v2 = line_stroke(StrokeKind::Charcoal, &[(1.0, 1.0), (4.0, 4.0)], 10.0);
    v2.texture = CharcoalTexture::V2;
    renderer.render_to_bitmap(&[v2], &mut ctx, &pen).unwrap();
    assert_eq!(pen.events(), vec!["charcoal_normal pen_type=V2".to_string()]);
}

#[test]
fn empty_stroke_is_a_no_op_for_every_kind() {
    let pen = RecordingPen::default();
    let renderer = NormalRenderer::new();
    let mut ctx = RenderContext::new(8, 8).unwrap();

    let shapes: Vec<_> = [
        StrokeKind::Pencil,
        StrokeKind::Brush,
        StrokeKind::Marker,
        StrokeKind::NeoBrush,
        StrokeKind::Charcoal,
    ]
    .into_iter()
    .map(Shape::new)
    .collect();
    renderer.render_to_bitmap(&shapes, &mut ctx, &pen).unwrap();
    assert!(pen.events().is_empty());

    let mut buffer = ctx.into_buffer();
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(buffer.pixel(x, y), Some((255, 255, 255, 255)));
        }
    }
}

#[test]
fn bitmap_failure_propagates_from_delegated_step() {
    let pen = RecordingPen {
        fail_draws: true,
        ..Default::default()
    };
    let renderer = NormalRenderer::new();
    let mut ctx = RenderContext::new(8, 8).unwrap();
    let shapes = vec![line_stroke(StrokeKind::Brush, &[(1.0, 1.0), (4.0, 4.0)], 4.0)];

    let err = renderer
        .render_to_bitmap(&shapes, &mut ctx, &pen)
        .unwrap_err();
    assert!(matches!(err, RenderError::Pen(_)));
}

// ---------------------------------------------------------------------------
// Compositing order and pixels
// ---------------------------------------------------------------------------

#[test]
fn later_shapes_win_where_strokes_overlap() {
    let pen = SimplePen::new();
    let renderer = NormalRenderer::new();

    let mut red = line_stroke(StrokeKind::Pencil, &[(0.0, 8.0), (16.0, 8.0)], 4.0);
    red.color = color::RED;
    let mut blue = line_stroke(StrokeKind::Pencil, &[(8.0, 0.0), (8.0, 16.0)], 4.0);
    blue.color = color::BLUE;

    let mut ctx = RenderContext::new(16, 16).unwrap();
    renderer
        .render_to_bitmap(&[red.clone(), blue.clone()], &mut ctx, &pen)
        .unwrap();
    let (r, _, b, _) = ctx.into_buffer().pixel(8, 8).unwrap();
    assert!(b > 200 && r < 60, "expected blue on top, got r={r} b={b}");

    let mut ctx = RenderContext::new(16, 16).unwrap();
    renderer
        .render_to_bitmap(&[blue, red], &mut ctx, &pen)
        .unwrap();
    let (r, _, b, _) = ctx.into_buffer().pixel(8, 8).unwrap();
    assert!(r > 200 && b < 60, "expected red on top, got r={r} b={b}");
}

#[test]
fn pencil_ink_lands_only_along_the_sample_path() {
    let pen = SimplePen::new();
    let renderer = NormalRenderer::new();
    let stroke = line_stroke(
        StrokeKind::Pencil,
        &[(0.0, 1.0), (2.0, 1.0), (3.0, 1.0)],
        2.0,
    );

    let mut ctx = RenderContext::new(4, 4).unwrap();
    renderer.render_to_bitmap(&[stroke], &mut ctx, &pen).unwrap();
    let mut buffer = ctx.into_buffer();

    let (r, g, b, _) = buffer.pixel(1, 1).unwrap();
    assert!(
        r < 250 || g < 250 || b < 250,
        "path pixel should carry ink, got ({r}, {g}, {b})"
    );
    assert_eq!(buffer.pixel(1, 3), Some((255, 255, 255, 255)));
    assert_eq!(buffer.pixel(3, 3), Some((255, 255, 255, 255)));
}

#[test]
fn transparent_marker_erases_previous_ink() {
    let pen = SimplePen::new();
    let renderer = NormalRenderer::new();

    let mut ink = line_stroke(StrokeKind::Marker, &[(2.0, 8.0), (14.0, 8.0)], 6.0);
    ink.color = color::BLACK;
    let mut eraser = line_stroke(StrokeKind::Marker, &[(6.0, 8.0), (10.0, 8.0)], 6.0);
    eraser.transparent = true;

    let mut ctx = RenderContext::new(16, 16).unwrap();
    renderer
        .render_to_bitmap(&[ink, eraser], &mut ctx, &pen)
        .unwrap();
    let mut buffer = ctx.into_buffer();

    let (_, _, _, erased_alpha) = buffer.pixel(8, 8).unwrap();
    assert_eq!(erased_alpha, 0, "erased pixel should be fully transparent");
    let (r, _, _, alpha) = buffer.pixel(3, 8).unwrap();
    assert!(alpha == 255 && r < 60, "untouched ink should remain");
}

// ---------------------------------------------------------------------------
// Refresh policies and the surface invariant
// ---------------------------------------------------------------------------

#[test]
fn invalid_surface_is_a_silent_no_op() {
    let ctx = RenderContext::new(16, 16)
        .unwrap()
        .with_clip(Rect::new(0, 0, 8, 8).unwrap());
    let surface = MemorySurface::new(16, 16).unwrap();
    surface.set_valid(false);

    NormalRenderer::new().render_to_screen(&surface, &ctx);
    PartialRefreshRenderer::new().render_to_screen(&surface, &ctx);

    assert_eq!(surface.acquire_count(), 0);
    assert_eq!(surface.release_count(), 0);
    assert!(surface.presented_regions().is_empty());
}

#[test]
fn normal_refresh_acquires_full_bounds_ignoring_clip() {
    let ctx = RenderContext::new(32, 32)
        .unwrap()
        .with_clip(Rect::new(4, 4, 8, 8).unwrap());
    let surface = MemorySurface::new(32, 32).unwrap();

    NormalRenderer::new().render_to_screen(&surface, &ctx);

    assert_eq!(
        surface.presented_regions(),
        vec![Rect::new(0, 0, 32, 32).unwrap()]
    );
}

#[test]
fn partial_refresh_acquires_the_clip_region_only() {
    let clip = Rect::new(4, 4, 8, 8).unwrap();
    let ctx = RenderContext::new(32, 32).unwrap().with_clip(clip);
    let surface = MemorySurface::new(32, 32).unwrap();

    PartialRefreshRenderer::new().render_to_screen(&surface, &ctx);

    assert_eq!(surface.acquire_count(), 1);
    assert_eq!(surface.presented_regions(), vec![clip]);
}

#[test]
fn dirty_tracker_damage_drives_the_partial_clip() {
    let pen = SimplePen::new();
    let renderer = PartialRefreshRenderer::new();
    let surface = MemorySurface::new(64, 64).unwrap();
    let bounds = surface.bounds().unwrap();

    let stroke = line_stroke(StrokeKind::Pencil, &[(10.0, 10.0), (24.0, 18.0)], 4.0);
    let damage = stroke.bounding_box().unwrap();

    let mut tracker = DirtyTracker::new();
    tracker.mark_shape(&stroke);
    let clip = tracker.take_union(bounds).expect("stroke damage");
    assert!(clip.contains_rect(damage.intersect(bounds).unwrap()));

    let mut ctx = RenderContext::new(64, 64).unwrap().with_clip(clip);
    renderer.render_to_bitmap(&[stroke], &mut ctx, &pen).unwrap();
    renderer.render_to_screen(&surface, &ctx);

    assert_eq!(surface.presented_regions(), vec![clip]);
    assert!(tracker.is_clean());
}

#[test]
fn partial_refresh_without_clip_does_nothing() {
    let ctx = RenderContext::new(16, 16).unwrap();
    let surface = MemorySurface::new(16, 16).unwrap();

    PartialRefreshRenderer::new().render_to_screen(&surface, &ctx);
    assert_eq!(surface.acquire_count(), 0);
}

#[test]
fn draw_failure_still_releases_exactly_once() {
    let ctx = RenderContext::new(16, 16)
        .unwrap()
        .with_clip(Rect::new(2, 2, 4, 4).unwrap());

    let surface = BrokenCanvasSurface::new();
    NormalRenderer::new().render_to_screen(&surface, &ctx);
    assert_eq!(surface.acquires.get(), 1);
    assert_eq!(surface.releases.get(), 1);

    let surface = BrokenCanvasSurface::new();
    PartialRefreshRenderer::new().render_to_screen(&surface, &ctx);
    assert_eq!(surface.acquires.get(), 1);
    assert_eq!(surface.releases.get(), 1);
}

#[test]
fn acquisitions_stay_balanced_across_many_renders() {
    let pen = SimplePen::new();
    let renderer = NormalRenderer::new();
    let partial = PartialRefreshRenderer::new();
    let surface = MemorySurface::new(64, 64).unwrap();

    let mut ctx = RenderContext::new(64, 64)
        .unwrap()
        .with_clip(Rect::new(0, 0, 16, 16).unwrap());
    let shapes = vec![line_stroke(StrokeKind::Pencil, &[(1.0, 1.0), (30.0, 30.0)], 3.0)];
    renderer.render_to_bitmap(&shapes, &mut ctx, &pen).unwrap();

    for _ in 0..5 {
        renderer.render_to_screen(&surface, &ctx);
        partial.render_to_screen(&surface, &ctx);
    }
    assert_eq!(surface.acquire_count(), 10);
    assert_eq!(surface.release_count(), 10);
}

#[test]
fn before_release_hook_runs_for_full_refresh_only() {
    let hook_runs = std::rc::Rc::new(Cell::new(0u32));
    let counter = hook_runs.clone();
    let renderer = NormalRenderer::with_before_release(move |_| {
        counter.set(counter.get() + 1);
    });

    let ctx = RenderContext::new(16, 16)
        .unwrap()
        .with_clip(Rect::new(0, 0, 8, 8).unwrap());
    let surface = MemorySurface::new(16, 16).unwrap();

    renderer.render_to_screen(&surface, &ctx);
    assert_eq!(hook_runs.get(), 1);

    PartialRefreshRenderer::new().render_to_screen(&surface, &ctx);
    assert_eq!(hook_runs.get(), 1);
}

#[test]
fn screen_render_copies_buffer_pixels_to_the_surface() {
    let pen = SimplePen::new();
    let renderer = NormalRenderer::new();
    let surface = MemorySurface::new(16, 16).unwrap();

    let mut stroke = line_stroke(StrokeKind::Pencil, &[(0.0, 8.0), (16.0, 8.0)], 4.0);
    stroke.color = color::BLACK;
    let mut ctx = RenderContext::new(16, 16).unwrap();
    renderer.render_to_bitmap(&[stroke], &mut ctx, &pen).unwrap();

    renderer.render_to_screen(&surface, &ctx);

    let (r, g, b, _) = surface.pixel(8, 8).unwrap();
    assert!(r < 60 && g < 60 && b < 60, "ink should reach the surface");
    assert_eq!(surface.pixel(8, 1), Some((255, 255, 255, 255)));
}

#[test]
fn bitmap_overload_presents_like_the_context_variant() {
    let surface = MemorySurface::new(8, 8).unwrap();
    let renderer = NormalRenderer::new();
    let ctx = RenderContext::new(8, 8).unwrap();

    renderer.render_bitmap_to_screen(&surface, ctx.buffer());
    assert_eq!(
        surface.presented_regions(),
        vec![Rect::new(0, 0, 8, 8).unwrap()]
    );
}

#[test]
fn partial_refresh_refuses_the_bitmap_overload() {
    let surface = MemorySurface::new(8, 8).unwrap();
    let ctx = RenderContext::new(8, 8).unwrap();

    PartialRefreshRenderer::new().render_bitmap_to_screen(&surface, ctx.buffer());
    assert_eq!(surface.acquire_count(), 0);
    assert!(surface.presented_regions().is_empty());
}
