//! Animated background simulation.
//!
//! A set of drifting nodes bounces around the viewport. Nodes that are close
//! to each other are joined by lines that fade out with distance. The engine
//! is generic over its drawing [`Surface`] and its frame [`Scheduler`], so it
//! runs unchanged in the browser and in native tests.

mod engine;
mod node;
mod scheduler;
mod surface;

pub use engine::{edge_alpha, BackgroundEngine, FrameOutcome, LoopState};
pub use node::Node;
pub use scheduler::{ManualScheduler, Scheduler};
pub use surface::{DrawCommand, RecordingSurface, Rgba, Surface, Viewport};
