//! Drawing boundary between the editing core and the rendering host.
//!
//! Shapes, builders and the resize controller describe what to paint through
//! [`Surface`]; the host decides how. [`RecordingSurface`] keeps the calls as
//! a list of [`DrawCmd`] values, which is what tests and headless hosts use.

use crate::model::Color;

/// Drawing primitives supplied by the host.
///
/// `ellipse` takes a center and full width/height; `rect` takes its
/// top-left corner and size. `None` disables fill or stroke.
pub trait Surface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
    fn end_path(&mut self);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill(&mut self, fill: Option<Color>);
    fn set_stroke(&mut self, stroke: Option<Color>);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    BeginPath,
    MoveTo(f64, f64),
    CubicTo(f64, f64, f64, f64, f64, f64),
    EndPath,
    Line(f64, f64, f64, f64),
    Ellipse(f64, f64, f64, f64),
    Rect(f64, f64, f64, f64),
    Fill(Option<Color>),
    Stroke(Option<Color>),
}

/// A surface that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of recorded commands matching `pred`.
    pub fn count(&self, pred: impl Fn(&DrawCmd) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.commands.push(DrawCmd::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCmd::MoveTo(x, y));
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        self.commands.push(DrawCmd::CubicTo(c1x, c1y, c2x, c2y, x, y));
    }

    fn end_path(&mut self) {
        self.commands.push(DrawCmd::EndPath);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCmd::Line(x1, y1, x2, y2));
    }

    fn ellipse(&mut self, cx: f64, cy: f64, w: f64, h: f64) {
        self.commands.push(DrawCmd::Ellipse(cx, cy, w, h));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCmd::Rect(x, y, w, h));
    }

    fn set_fill(&mut self, fill: Option<Color>) {
        self.commands.push(DrawCmd::Fill(fill));
    }

    fn set_stroke(&mut self, stroke: Option<Color>) {
        self.commands.push(DrawCmd::Stroke(stroke));
    }
}
