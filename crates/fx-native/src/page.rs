use fnv::FnvHashMap;
use fx_core::{Bounds, GeometrySource, Rect, Surface, TargetId, Viewport};
use glam::Vec2;

/// Virtual page: element boxes in document coordinates plus a scroll
/// position. Bounds are reported in client coordinates like a browser would.
pub struct PreviewPage {
    viewport: Viewport,
    document_height: f32,
    layout: FnvHashMap<TargetId, Rect>,
}

impl PreviewPage {
    pub fn new(width: f32, height: f32, document_height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            document_height,
            layout: FnvHashMap::default(),
        }
    }

    pub fn place(&mut self, target: TargetId, rect: Rect) {
        self.layout.insert(target, rect);
    }

    pub fn scroll_to(&mut self, y: f32) {
        let max = (self.document_height - self.viewport.height).max(0.0);
        self.viewport.scroll_y = y.clamp(0.0, max);
    }

    #[inline]
    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y
    }

    #[inline]
    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    pub fn bounds_2d(&self) -> Bounds {
        Bounds::new(self.viewport.width, self.viewport.height)
    }
}

impl GeometrySource for PreviewPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounds(&self, target: TargetId) -> Option<Rect> {
        self.layout.get(&target).map(|r| Rect {
            top: r.top - self.viewport.scroll_y,
            ..*r
        })
    }
}

/// Surface that only counts draw calls.
#[derive(Default, Debug)]
pub struct CountingSurface {
    pub frames: u64,
    pub circles: u64,
    pub lines: u64,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _bounds: Bounds) {
        self.frames += 1;
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _rgb: [u8; 3], _alpha: f32) {
        self.circles += 1;
    }

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _rgb: [u8; 3], _alpha: f32, _width: f32) {
        self.lines += 1;
    }
}
