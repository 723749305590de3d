//! BackgroundEngine - the animated "neural network" backdrop.
//!
//! The engine owns the node set and the timing state. The drawing surface
//! and the scheduler are borrowed for the duration of each call, so the
//! same engine runs against a `<canvas>` in the browser and against
//! [`RecordingSurface`](super::RecordingSurface) in tests.
//!
//! The loop has a single state, [`LoopState::Running`], and a single
//! transition: every [`BackgroundEngine::step`] ends by requesting the next
//! frame, whether or not it did any work.

use log::debug;
use rand::Rng;
use rand::rngs::SmallRng;

use super::node::{self, Node};
use super::scheduler::Scheduler;
use super::surface::{Surface, Viewport};
use crate::config::BackgroundConfig;
use crate::timing::{Debouncer, FrameGate};

/// Animation loop state. There is no terminal state; the loop runs until
/// the page goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
}

/// What a single [`BackgroundEngine::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame budget had not elapsed; nothing was updated or drawn.
    Skipped,
    /// A full update and render pass ran.
    Rendered { nodes: usize, edges: usize },
}

/// Stroke alpha for an edge of length `distance`, or `None` if the two
/// nodes are too far apart to be connected.
///
/// The alpha falls off linearly from `max_alpha` at distance zero to zero
/// at `threshold`.
#[inline]
pub fn edge_alpha(distance: f64, threshold: f64, max_alpha: f64) -> Option<f64> {
    (distance < threshold).then(|| max_alpha * (1.0 - distance / threshold))
}

/// The background simulation.
///
/// Holds the current node set, the node count for the current viewport,
/// the frame-rate gate and the pending (debounced) resize. `R` is the
/// random source used to place nodes; tests pass a seeded one.
pub struct BackgroundEngine<R = SmallRng> {
    config: BackgroundConfig,
    state: LoopState,
    node_count: usize,
    nodes: Vec<Node>,
    gate: FrameGate,
    pending_resize: Debouncer<Viewport>,
    rng: R,
}

impl<R: Rng> BackgroundEngine<R> {
    /// Create an engine for the given viewport.
    ///
    /// The surface is sized to the viewport and the initial node set is
    /// generated inside it.
    pub fn new<S: Surface>(
        config: &BackgroundConfig,
        viewport: Viewport,
        surface: &mut S,
        rng: R,
    ) -> Self {
        let mut engine = Self {
            config: config.clone(),
            state: LoopState::Running,
            node_count: 0,
            nodes: Vec::new(),
            gate: FrameGate::new(config.frame_budget_ms()),
            pending_resize: Debouncer::new(config.resize_debounce_ms),
            rng,
        };
        engine.apply_resize(viewport, surface);
        engine
    }

    /// Enter the animation loop by arming the first frame.
    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        scheduler.request_next_frame();
    }

    /// Record a raw resize notification.
    ///
    /// Bursts are debounced: only the last event takes effect, once the
    /// quiet period has passed, at the start of the next step.
    pub fn on_resize(&mut self, viewport: Viewport, now: f64) {
        self.pending_resize.schedule(viewport, now);
    }

    /// Run one scheduler tick.
    pub fn step<S: Surface>(
        &mut self,
        now: f64,
        surface: &mut S,
        scheduler: &mut impl Scheduler,
    ) -> FrameOutcome {
        // A due resize lands before any update or render work, so a step
        // never sees the old node set on the new surface.
        if let Some(viewport) = self.pending_resize.maybe_invoke(now) {
            self.apply_resize(viewport, surface);
        }

        let outcome = if self.gate.try_accept(now) {
            self.render_frame(surface)
        } else {
            FrameOutcome::Skipped
        };

        match self.state {
            LoopState::Running => scheduler.request_next_frame(),
        }
        outcome
    }

    fn render_frame<S: Surface>(&mut self, surface: &mut S) -> FrameOutcome {
        let width = surface.width();
        let height = surface.height();

        surface.clear_region(0.0, 0.0, width, height);

        for node in &mut self.nodes {
            node.advance(width, height);
        }

        for node in &self.nodes {
            surface.draw_circle(node.x, node.y, node.radius, self.config.node_color);
        }

        let edges = self.render_edges(surface);

        FrameOutcome::Rendered {
            nodes: self.nodes.len(),
            edges,
        }
    }

    /// Draw a line for every close-enough unordered pair. O(n²) in the
    /// node count, which the viewport breakpoints keep small.
    fn render_edges<S: Surface>(&self, surface: &mut S) -> usize {
        let threshold = self.config.connection_distance;
        let mut drawn = 0;

        for (i, a) in self.nodes.iter().enumerate() {
            for b in &self.nodes[i + 1..] {
                let distance = a.distance_to(b);
                let Some(alpha) = edge_alpha(distance, threshold, self.config.max_edge_alpha) else {
                    continue;
                };
                surface.draw_line(
                    a.x,
                    a.y,
                    b.x,
                    b.y,
                    self.config.edge_color.with_alpha(alpha),
                    self.config.line_width,
                );
                drawn += 1;
            }
        }

        drawn
    }

    /// Replace node count, surface size and node set in one go.
    fn apply_resize<S: Surface>(&mut self, viewport: Viewport, surface: &mut S) {
        self.node_count = self.config.node_count_for_width(viewport.width);
        surface.set_size(viewport.width, viewport.height);

        // The surface may round (a canvas stores integer pixels)
        let width = surface.width();
        let height = surface.height();
        self.nodes = node::generate(&mut self.rng, self.node_count, width, height, &self.config);

        debug!(
            "background sized to {}x{} with {} nodes",
            width, height, self.node_count
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of nodes for the current viewport width.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Nodes as of the last update.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Timestamp of the last rendered frame (0 before the first one).
    pub fn last_frame_timestamp(&self) -> f64 {
        self.gate.last_accepted()
    }

    /// Minimum interval between two rendered frames.
    pub fn frame_budget_ms(&self) -> f64 {
        self.gate.budget_ms()
    }

    /// Whether a resize is waiting out its quiet period.
    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::{DrawCommand, ManualScheduler, RecordingSurface};
    use rand::SeedableRng;

    fn engine_at(width: f64, height: f64) -> (BackgroundEngine, RecordingSurface) {
        let mut surface = RecordingSurface::new(0.0, 0.0);
        let engine = BackgroundEngine::new(
            &BackgroundConfig::default(),
            Viewport::new(width, height),
            &mut surface,
            SmallRng::seed_from_u64(42),
        );
        (engine, surface)
    }

    #[test]
    fn test_edge_alpha() {
        let alpha = edge_alpha(75.0, 150.0, 0.2).unwrap();
        assert!((alpha - 0.1).abs() < 1e-12);

        assert!((edge_alpha(0.0, 150.0, 0.2).unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(edge_alpha(150.0, 150.0, 0.2), None);
        assert_eq!(edge_alpha(200.0, 150.0, 0.2), None);
    }

    #[test]
    fn test_construction_sizes_surface() {
        let (engine, surface) = engine_at(1000.0, 800.0);

        assert_eq!(engine.state(), LoopState::Running);
        assert_eq!(engine.node_count(), 50);
        assert_eq!(engine.nodes().len(), 50);
        assert_eq!((surface.width(), surface.height()), (1000.0, 800.0));
        for node in engine.nodes() {
            assert!((0.0..=1000.0).contains(&node.x));
            assert!((0.0..=800.0).contains(&node.y));
        }
    }

    #[test]
    fn test_start_arms_first_frame() {
        let (mut engine, _surface) = engine_at(1000.0, 800.0);
        let mut scheduler = ManualScheduler::new();

        engine.start(&mut scheduler);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_frame_gate() {
        let (mut engine, mut surface) = engine_at(1000.0, 800.0);
        let mut scheduler = ManualScheduler::new();

        assert!(matches!(
            engine.step(100.0, &mut surface, &mut scheduler),
            FrameOutcome::Rendered { .. }
        ));
        assert_eq!(engine.last_frame_timestamp(), 100.0);

        let before = engine.nodes().to_vec();
        surface.take_commands();

        let outcome = engine.step(110.0, &mut surface, &mut scheduler);
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert_eq!(engine.last_frame_timestamp(), 100.0);
        assert_eq!(engine.nodes(), &before[..]);
        assert!(surface.commands().is_empty());

        assert!(matches!(
            engine.step(133.34, &mut surface, &mut scheduler),
            FrameOutcome::Rendered { .. }
        ));
        assert_eq!(engine.last_frame_timestamp(), 133.34);

        // Re-armed on every call, skipped or not
        assert_eq!(scheduler.total_requests(), 3);
    }

    #[test]
    fn test_render_order_and_counts() {
        let (mut engine, mut surface) = engine_at(1000.0, 800.0);
        let mut scheduler = ManualScheduler::new();
        surface.take_commands();

        let outcome = engine.step(100.0, &mut surface, &mut scheduler);
        let commands = surface.commands();

        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                x: 0.0,
                y: 0.0,
                width: 1000.0,
                height: 800.0,
            }
        );
        assert_eq!(surface.circle_count(), 50);

        // Circles come before lines and sit at the post-update positions
        for (command, node) in commands[1..51].iter().zip(engine.nodes()) {
            match command {
                DrawCommand::Circle { x, y, radius, fill } => {
                    assert_eq!((*x, *y, *radius), (node.x, node.y, node.radius));
                    assert_eq!(*fill, BackgroundConfig::default().node_color);
                }
                other => panic!("expected circle, got {other:?}"),
            }
        }

        let expected_edges = {
            let nodes = engine.nodes();
            let mut count = 0;
            for i in 0..nodes.len() {
                for j in i + 1..nodes.len() {
                    if nodes[i].distance_to(&nodes[j]) < 150.0 {
                        count += 1;
                    }
                }
            }
            count
        };
        assert_eq!(surface.line_count(), expected_edges);
        assert_eq!(
            outcome,
            FrameOutcome::Rendered {
                nodes: 50,
                edges: expected_edges,
            }
        );
    }

    #[test]
    fn test_edge_stroke_alpha_matches_distance() {
        let (mut engine, mut surface) = engine_at(1000.0, 800.0);
        let mut scheduler = ManualScheduler::new();
        surface.take_commands();

        engine.step(100.0, &mut surface, &mut scheduler);

        for command in surface.commands() {
            if let DrawCommand::Line { x1, y1, x2, y2, stroke, width } = command {
                let d = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
                assert!(d < 150.0);
                assert!((stroke.a - 0.2 * (1.0 - d / 150.0)).abs() < 1e-9);
                assert_eq!(*width, 0.5);
            }
        }
    }

    #[test]
    fn test_bounds_hold_across_steps() {
        let (mut engine, mut surface) = engine_at(500.0, 300.0);
        let mut scheduler = ManualScheduler::new();

        let mut now = 0.0;
        for _ in 0..2_000 {
            now += 34.0;
            engine.step(now, &mut surface, &mut scheduler);
            surface.take_commands();
            for node in engine.nodes() {
                assert!((0.0..=500.0).contains(&node.x));
                assert!((0.0..=300.0).contains(&node.y));
            }
        }
    }

    #[test]
    fn test_resize_is_debounced() {
        let (mut engine, mut surface) = engine_at(1000.0, 800.0);
        let mut scheduler = ManualScheduler::new();

        engine.on_resize(Viewport::new(700.0, 600.0), 100.0);
        engine.on_resize(Viewport::new(1600.0, 900.0), 200.0);

        engine.step(300.0, &mut surface, &mut scheduler);
        assert_eq!(engine.node_count(), 50);
        assert_eq!(surface.width(), 1000.0);

        // Only the last event of the burst lands
        engine.step(450.0, &mut surface, &mut scheduler);
        assert_eq!(engine.node_count(), 80);
        assert_eq!(engine.nodes().len(), 80);
        assert_eq!((surface.width(), surface.height()), (1600.0, 900.0));
        assert!(!engine.has_pending_resize());
    }

    #[test]
    fn test_resize_applies_even_on_skipped_frame() {
        let (mut engine, mut surface) = engine_at(1000.0, 800.0);
        let mut scheduler = ManualScheduler::new();

        engine.step(1000.0, &mut surface, &mut scheduler);
        engine.on_resize(Viewport::new(400.0, 300.0), 760.0);

        let outcome = engine.step(1010.0, &mut surface, &mut scheduler);
        assert_eq!(outcome, FrameOutcome::Skipped);
        assert_eq!(engine.node_count(), 30);
        assert_eq!(engine.nodes().len(), 30);
        assert_eq!(surface.width(), 400.0);
    }

    #[test]
    fn test_resize_never_mixes_state() {
        let (mut engine, mut surface) = engine_at(1300.0, 900.0);
        let config = BackgroundConfig::default();
        let mut scheduler = ManualScheduler::new();

        let viewports = [
            Viewport::new(500.0, 700.0),
            Viewport::new(900.0, 700.0),
            Viewport::new(1500.0, 1000.0),
        ];

        let mut now = 0.0;
        for round in 0..30 {
            let viewport = viewports[round % viewports.len()];
            engine.on_resize(viewport, now);

            for _ in 0..12 {
                now += 34.0;
                engine.step(now, &mut surface, &mut scheduler);
                surface.take_commands();

                // Node set and surface always agree
                assert_eq!(engine.nodes().len(), engine.node_count());
                assert_eq!(
                    engine.node_count(),
                    config.node_count_for_width(surface.width())
                );
                for node in engine.nodes() {
                    assert!(node.x <= surface.width() && node.y <= surface.height());
                }
            }
        }
    }

    #[test]
    fn test_end_to_end_resize_replaces_nodes() {
        let (mut engine, mut surface) = engine_at(1000.0, 800.0);
        let mut scheduler = ManualScheduler::new();
        engine.start(&mut scheduler);

        assert_eq!(engine.node_count(), 50);
        engine.step(100.0, &mut surface, &mut scheduler);
        assert_eq!(engine.nodes().len(), 50);
        let old_nodes = engine.nodes().to_vec();

        engine.on_resize(Viewport::new(400.0, 300.0), 120.0);
        engine.step(370.0, &mut surface, &mut scheduler);

        assert_eq!(engine.node_count(), 30);
        assert_eq!(engine.nodes().len(), 30);
        assert_eq!((surface.width(), surface.height()), (400.0, 300.0));
        for node in engine.nodes() {
            assert!(!old_nodes.contains(node));
            assert!(node.x <= 400.0 && node.y <= 300.0);
        }
    }
}
