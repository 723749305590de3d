//! Drawing surface abstraction.
//!
//! The engine only needs a handful of 2D primitives. The browser backs them
//! with a `<canvas>` 2D context (see `web::CanvasSurface`); tests use
//! [`RecordingSurface`], which keeps every call for inspection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An sRGB color with alpha, formatted as a CSS `rgba()` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// 2D drawing target.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Resize the backing store. Implementations must discard prior content,
    /// as a canvas does when its dimensions are assigned.
    fn set_size(&mut self, width: f64, height: f64);

    fn clear_region(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, width: f64);
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: f64, height: f64 },
    Clear { x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64, fill: Rgba },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, width: f64 },
}

/// In-memory surface that records every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded calls.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear_region(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { x, y, width, height });
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba) {
        self.commands.push(DrawCommand::Circle { x, y, radius, fill });
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            width,
        });
    }
}
