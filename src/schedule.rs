//! Render debouncing and superseding.
//!
//! Full renders are expensive, so a burst of edits is coalesced behind a
//! quiet period by [`RenderScheduler`]. Renders are never cancelled; each
//! one takes a [`RenderTicket`] from a [`RenderGeneration`], and output
//! whose ticket is no longer current is simply dropped by the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Quiet period between the last edit and the full render.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(50);

// ============================================================================
// RenderScheduler
// ============================================================================

/// Trailing-edge debouncer for full renders.
///
/// Time is passed in by the caller, so the scheduler works the same under
/// any event loop and in tests.
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}

impl RenderScheduler {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Records an edit at `now`, pushing any pending render back.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// When the pending render becomes due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` once per burst, when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending render.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

// ============================================================================
// RenderGeneration
// ============================================================================

/// Identifies one started render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RenderTicket(u64);

impl RenderTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Monotonic counter of started renders.
#[derive(Debug, Default)]
pub struct RenderGeneration {
    latest: AtomicU64,
}

impl RenderGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a render, superseding every earlier ticket.
    pub fn begin(&self) -> RenderTicket {
        RenderTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// The most recently issued ticket.
    pub fn latest(&self) -> RenderTicket {
        RenderTicket(self.latest.load(Ordering::Acquire))
    }

    /// Whether output for `ticket` is still wanted.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.latest() == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_edits_coalesce_into_one_render() {
        let start = Instant::now();
        let mut scheduler = RenderScheduler::default();

        for ms in [0, 10, 20, 30] {
            scheduler.notify(start + Duration::from_millis(ms));
            assert!(!scheduler.poll(start + Duration::from_millis(ms + 5)));
        }
        assert_eq!(scheduler.deadline(), Some(start + Duration::from_millis(80)));
        assert!(!scheduler.poll(start + Duration::from_millis(79)));
        assert!(scheduler.poll(start + Duration::from_millis(80)));
        assert!(!scheduler.poll(start + Duration::from_millis(200)));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn cancel_drops_pending_render() {
        let now = Instant::now();
        let mut scheduler = RenderScheduler::new(Duration::from_millis(10));
        scheduler.notify(now);
        scheduler.cancel();
        assert!(!scheduler.poll(now + Duration::from_secs(1)));
    }

    #[test]
    fn newer_render_supersedes_older() {
        let generation = RenderGeneration::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(second > first);
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(generation.latest().generation(), 2);
    }
}
