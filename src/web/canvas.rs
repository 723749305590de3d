//! `<canvas>` 2D context as a drawing [`Surface`].

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::background::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas element. Returns `None` if it has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, context })
    }

    /// Look up a canvas by element id.
    pub fn from_element_id(document: &Document, id: &str) -> Option<Self> {
        let canvas = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Self::new(canvas)
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        f64::from(self.canvas.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.canvas.height())
    }

    /// Assigning canvas dimensions also wipes its pixels.
    fn set_size(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear_region(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba) {
        self.context.begin_path();
        // Only fails for a negative radius
        if self.context.arc(x, y, radius, 0.0, TAU).is_err() {
            return;
        }
        self.context.set_fill_style_str(&fill.to_string());
        self.context.fill();
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, width: f64) {
        self.context.begin_path();
        self.context.move_to(x1, y1);
        self.context.line_to(x2, y2);
        self.context.set_stroke_style_str(&stroke.to_string());
        self.context.set_line_width(width);
        self.context.stroke();
    }
}
