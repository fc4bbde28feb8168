//! `Surface` calls → kurbo display list.
//!
//! [`SceneSurface`] turns the drawing calls made by shapes, builders and the
//! resize controller into kurbo geometry tagged with peniko colors. A GPU or
//! canvas host replays the list once per frame; tests inspect it directly.

use bez_core::{Color, Surface};
use kurbo::{BezPath, Ellipse, Line, Point, Rect, Shape};

/// Geometry of one display-list entry.
#[derive(Debug, Clone)]
pub enum PaintShape {
    Path(BezPath),
    Line(Line),
    Ellipse(Ellipse),
    Rect(Rect),
}

impl PaintShape {
    pub fn bounding_box(&self) -> Rect {
        match self {
            PaintShape::Path(p) => p.bounding_box(),
            PaintShape::Line(l) => l.bounding_box(),
            PaintShape::Ellipse(e) => e.bounding_box(),
            PaintShape::Rect(r) => *r,
        }
    }
}

/// A shape with the fill and stroke that were current when it was drawn.
#[derive(Debug, Clone)]
pub struct PaintItem {
    pub shape: PaintShape,
    pub fill: Option<peniko::Color>,
    pub stroke: Option<peniko::Color>,
}

/// Records drawing calls as kurbo shapes.
#[derive(Debug, Default)]
pub struct SceneSurface {
    items: Vec<PaintItem>,
    fill: Option<peniko::Color>,
    stroke: Option<peniko::Color>,
    path: Option<BezPath>,
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PaintItem] {
        &self.items
    }

    /// Drop all items; call at the start of each frame.
    pub fn clear(&mut self) {
        self.items.clear();
        self.path = None;
    }

    /// Union of the bounding boxes of every recorded path.
    pub fn path_bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .filter(|item| matches!(item.shape, PaintShape::Path(_)))
            .map(|item| item.shape.bounding_box())
            .reduce(|a, b| a.union(b))
    }

    fn push(&mut self, shape: PaintShape) {
        self.items.push(PaintItem {
            shape,
            fill: self.fill,
            stroke: self.stroke,
        });
    }
}

fn to_peniko(c: Color) -> peniko::Color {
    peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

impl Surface for SceneSurface {
    fn begin_path(&mut self) {
        self.path = Some(BezPath::new());
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if let Some(path) = &mut self.path {
            path.move_to(Point::new(x, y));
        }
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        if let Some(path) = &mut self.path {
            path.curve_to(Point::new(c1x, c1y), Point::new(c2x, c2y), Point::new(x, y));
        }
    }

    fn end_path(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        // a lone move_to has nothing to paint
        if path.elements().len() > 1 {
            log::trace!("PAINT path with {} elements", path.elements().len());
            self.push(PaintShape::Path(path));
        }
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let stroke = self.stroke;
        self.items.push(PaintItem {
            shape: PaintShape::Line(Line::new((x1, y1), (x2, y2))),
            fill: None,
            stroke,
        });
    }

    fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64) {
        self.push(PaintShape::Ellipse(Ellipse::new((cx, cy), (w / 2.0, h / 2.0), 0.0)));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(PaintShape::Rect(Rect::new(x, y, x + w, y + h)));
    }

    fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill.map(to_peniko);
    }

    fn set_stroke(&mut self, stroke: Option<Color>) {
        self.stroke = stroke.map(to_peniko);
    }
}
