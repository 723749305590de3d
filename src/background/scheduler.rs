//! Frame scheduling.
//!
//! The engine re-arms itself at the end of every step by calling
//! [`Scheduler::request_next_frame`]. In the browser that is
//! `requestAnimationFrame`; tests substitute [`ManualScheduler`] and drive
//! the steps themselves.

pub trait Scheduler {
    /// Ask for one more frame callback.
    fn request_next_frame(&mut self);
}

/// Scheduler that only counts requests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: usize,
    total: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one outstanding request. Returns false if none was made.
    pub fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Requests made over the scheduler's lifetime.
    pub fn total_requests(&self) -> usize {
        self.total
    }
}

impl Scheduler for ManualScheduler {
    fn request_next_frame(&mut self) {
        self.pending += 1;
        self.total += 1;
    }
}
