//! Clock-driven gates: frame-rate limiting, debouncing and throttling.
//!
//! None of these types read a clock themselves. Callers pass a monotonic
//! timestamp in milliseconds (`performance.now()` or the
//! `requestAnimationFrame` argument in the browser, plain numbers in tests),
//! so every gate can be exercised without real wall-clock delays.

/// Minimum interval between two accepted frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameGate {
    budget_ms: f64,
    last_accepted: f64,
}

impl FrameGate {
    /// Create a gate with an explicit budget in milliseconds.
    pub fn new(budget_ms: f64) -> Self {
        Self {
            budget_ms,
            last_accepted: 0.0,
        }
    }

    /// Returns true and records `now` if at least one budget has elapsed
    /// since the last accepted frame. A rejected call leaves the gate untouched.
    pub fn try_accept(&mut self, now: f64) -> bool {
        if now - self.last_accepted < self.budget_ms {
            return false;
        }
        self.last_accepted = now;
        true
    }

    #[inline]
    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    #[inline]
    pub fn last_accepted(&self) -> f64 {
        self.last_accepted
    }
}

/// Trailing-edge debouncer.
///
/// Every [`Debouncer::schedule`] replaces the pending value and restarts the
/// quiet period. [`Debouncer::maybe_invoke`] hands the value out once the
/// quiet period has passed; it is idempotent and may be polled every frame.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_ms: f64,
    pending: Option<(T, f64)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    /// Record a raw event at `now`, superseding any pending one.
    pub fn schedule(&mut self, value: T, now: f64) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if the quiet period has elapsed.
    pub fn maybe_invoke(&mut self, now: f64) -> Option<T> {
        let due = matches!(self.pending, Some((_, at)) if now - at >= self.quiet_ms);
        if !due {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Throttle with both a leading and a trailing edge.
///
/// [`Throttle::call`] passes a value straight through when the interval has
/// elapsed. Otherwise it is parked, replacing any value parked earlier, and
/// [`Throttle::maybe_invoke`] delivers it once the interval has passed. The
/// last call of a burst is therefore never lost.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval_ms: f64,
    last_invoked: Option<f64>,
    trailing: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_invoked: None,
            trailing: None,
        }
    }

    /// Offer `value` at `now`. Returns it if the caller may run now.
    pub fn call(&mut self, value: T, now: f64) -> Option<T> {
        if self.ready(now) {
            self.last_invoked = Some(now);
            self.trailing = None;
            Some(value)
        } else {
            self.trailing = Some(value);
            None
        }
    }

    /// Take the parked value once the interval has elapsed.
    pub fn maybe_invoke(&mut self, now: f64) -> Option<T> {
        if self.trailing.is_none() || !self.ready(now) {
            return None;
        }
        self.last_invoked = Some(now);
        self.trailing.take()
    }

    pub fn is_pending(&self) -> bool {
        self.trailing.is_some()
    }

    fn ready(&self, now: f64) -> bool {
        match self.last_invoked {
            Some(last) => now - last >= self.interval_ms,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_gate_skips_inside_budget() {
        let mut gate = FrameGate::new(1000.0 / 30.0);

        assert!(gate.try_accept(100.0));
        assert!(!gate.try_accept(110.0));
        // Rejected calls must not move the reference point
        assert_eq!(gate.last_accepted(), 100.0);

        assert!(gate.try_accept(133.34));
        assert_eq!(gate.last_accepted(), 133.34);
    }

    #[test]
    fn test_debouncer_keeps_only_last_event() {
        let mut debouncer = Debouncer::new(250.0);

        debouncer.schedule(1, 0.0);
        debouncer.schedule(2, 100.0);
        debouncer.schedule(3, 200.0);

        assert_eq!(debouncer.maybe_invoke(300.0), None);
        assert_eq!(debouncer.maybe_invoke(449.0), None);
        assert_eq!(debouncer.maybe_invoke(450.0), Some(3));

        // Idempotent once fired
        assert_eq!(debouncer.maybe_invoke(1000.0), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_throttle_leading_edge() {
        let mut throttle = Throttle::new(100.0);

        assert_eq!(throttle.call(1, 0.0), Some(1));
        assert_eq!(throttle.call(2, 50.0), None);
        assert_eq!(throttle.call(3, 99.0), None);
        assert_eq!(throttle.call(4, 100.0), Some(4));
        // A pass-through supersedes whatever was parked
        assert!(!throttle.is_pending());
        assert_eq!(throttle.call(5, 150.0), None);
    }

    #[test]
    fn test_throttle_trailing_edge_delivers_last_call() {
        let mut throttle = Throttle::new(100.0);

        assert_eq!(throttle.call("a", 0.0), Some("a"));
        assert_eq!(throttle.call("b", 30.0), None);
        assert_eq!(throttle.call("c", 60.0), None);

        assert_eq!(throttle.maybe_invoke(80.0), None);
        assert_eq!(throttle.maybe_invoke(100.0), Some("c"));

        // Delivered once, and the trailing call restarts the interval
        assert_eq!(throttle.maybe_invoke(500.0), None);
        assert_eq!(throttle.call("d", 150.0), None);
        assert_eq!(throttle.maybe_invoke(199.0), None);
        assert_eq!(throttle.maybe_invoke(200.0), Some("d"));
    }
}
