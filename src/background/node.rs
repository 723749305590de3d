//! Node type for the background simulation.
//!
//! A node is a drifting point drawn as a small circle. Nodes are plain
//! values: the engine regenerates the whole set on resize, so nothing refers
//! to an individual node across frames.

use rand::Rng;

use crate::config::BackgroundConfig;

/// A single drifting node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Position in surface pixels
    pub x: f64,
    pub y: f64,
    /// Velocity in pixels per rendered frame
    pub vx: f64,
    pub vy: f64,
    /// Circle radius
    pub radius: f64,
}

impl Node {
    /// Create a node at `(x, y)` moving by `(vx, vy)` each tick.
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
        Self { x, y, vx, vy, radius }
    }

    /// Create a node uniformly distributed inside `width` × `height`.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &BackgroundConfig,
    ) -> Self {
        let speed = config.max_speed;
        Self {
            x: sample(rng, 0.0, width),
            y: sample(rng, 0.0, height),
            vx: rng.gen_range(-speed..speed),
            vy: rng.gen_range(-speed..speed),
            radius: rng.gen_range(config.min_radius..config.max_radius),
        }
    }

    /// Advance one tick, bouncing elastically off the surface edges.
    ///
    /// A node that crosses a wall is mirrored back inside and its velocity
    /// component is negated, so the position stays within
    /// `[0, width] × [0, height]` after every call.
    #[inline]
    pub fn advance(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
            self.x = reflect(self.x, width);
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
            self.y = reflect(self.y, height);
        }
    }

    #[inline]
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Generate `count` fresh nodes for a surface of the given size.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    width: f64,
    height: f64,
    config: &BackgroundConfig,
) -> Vec<Node> {
    (0..count)
        .map(|_| Node::random(rng, width, height, config))
        .collect()
}

/// `gen_range` panics on an empty range; a zero-sized surface pins to 0.
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low { rng.gen_range(low..high) } else { low }
}

/// Mirror `p` back across whichever wall of `[0, max]` it crossed.
///
/// Only a surface narrower than a single step can overshoot the far wall
/// after mirroring; that case is pinned to the range.
#[inline]
fn reflect(p: f64, max: f64) -> f64 {
    let mirrored = if p < 0.0 { -p } else { 2.0 * max - p };
    mirrored.clamp(0.0, max.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_reflect_off_right_edge() {
        let width = 500.0;
        let mut node = Node::new(width - 0.1, 10.0, 0.3, 0.0, 2.0);

        node.advance(width, 400.0);

        assert!(node.vx < 0.0);
        assert!(node.x <= width);
        assert!((node.x - (width - 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_reflect_off_top_edge() {
        let mut node = Node::new(10.0, 0.1, 0.0, -0.25, 2.0);

        node.advance(500.0, 400.0);

        assert!(node.vy > 0.0);
        assert!(node.y >= 0.0);
    }

    #[test]
    fn test_no_reflection_inside() {
        let mut node = Node::new(100.0, 100.0, 0.2, -0.1, 1.5);
        node.advance(500.0, 400.0);

        assert_eq!(node.vx, 0.2);
        assert_eq!(node.vy, -0.1);
        assert!((node.x - 100.2).abs() < 1e-9);
        assert!((node.y - 99.9).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_hold_over_many_steps() {
        let config = BackgroundConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let (width, height) = (120.0, 80.0);
        let mut nodes = generate(&mut rng, 40, width, height, &config);

        for _ in 0..5_000 {
            for node in &mut nodes {
                node.advance(width, height);
                assert!((0.0..=width).contains(&node.x), "x out of bounds: {}", node.x);
                assert!((0.0..=height).contains(&node.y), "y out of bounds: {}", node.y);
            }
        }
    }

    #[test]
    fn test_random_node_ranges() {
        let config = BackgroundConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);

        for node in generate(&mut rng, 500, 1000.0, 800.0, &config) {
            assert!((0.0..1000.0).contains(&node.x));
            assert!((0.0..800.0).contains(&node.y));
            assert!((-0.25..0.25).contains(&node.vx));
            assert!((-0.25..0.25).contains(&node.vy));
            assert!((1.0..3.0).contains(&node.radius));
        }
    }

    #[test]
    fn test_zero_sized_surface() {
        let config = BackgroundConfig::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut nodes = generate(&mut rng, 5, 0.0, 0.0, &config);

        for node in &mut nodes {
            node.advance(0.0, 0.0);
            assert_eq!((node.x, node.y), (0.0, 0.0));
        }
    }

    #[test]
    fn test_distance() {
        let a = Node::new(0.0, 0.0, 0.0, 0.0, 1.0);
        let b = Node::new(3.0, 4.0, 0.0, 0.0, 1.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
