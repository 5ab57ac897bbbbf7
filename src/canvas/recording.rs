//! Canvas implementation that records its draw-call sequence.

use glam::DAffine2;

use super::{Canvas, Rgba};

/// One recorded canvas call, with raw user-space arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize { width: u32, height: u32 },
    Clear(Rgba),
    SetTransform(DAffine2),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64 },
    Stroke { width: f64, color: Rgba },
    FillText { text: String, x: f64, y: f64, color: Rgba },
}

/// A [`Canvas`] that performs no drawing and instead appends every call to
/// an inspectable log. Used to assert draw-call sequences in renderer tests.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    /// Creates a recorder reporting the given surface size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// All calls recorded so far, in issue order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// True when no call has been recorded.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Colors of every `Stroke` call, in issue order.
    pub fn stroke_colors(&self) -> Vec<Rgba> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Stroke { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.calls.push(DrawCall::Resize { width, height });
    }

    fn clear(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn set_transform(&mut self, transform: DAffine2) {
        self.calls.push(DrawCall::SetTransform(transform));
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::LineTo { x, y });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.calls.push(DrawCall::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self, width: f64, color: Rgba) {
        self.calls.push(DrawCall::Stroke { width, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgba) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}
