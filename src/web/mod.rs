//! Browser bindings: canvas drawing and the `requestAnimationFrame` loop.

mod animation;
mod canvas;

pub use animation::{start_background, RafScheduler};
pub use canvas::CanvasSurface;
