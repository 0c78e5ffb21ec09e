//! Free-time tracking for one day.
//!
//! The tracker starts from the whole day (`00:00`-`23:59`), removes the
//! sleep window, then carves out every other fixed commitment. Each placed
//! task is carved out the same way, so the free set stays disjoint from
//! everything already on the schedule.

use serde::Serialize;

use crate::commitments::CommitmentRegistry;
use crate::interval::TimeInterval;

/// The free intervals of a day, in the order carving produced them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AvailabilityTracker {
    free: Vec<TimeInterval>,
}

impl AvailabilityTracker {
    /// Wrap an explicit free set.
    pub fn from_free(free: Vec<TimeInterval>) -> Self {
        Self { free }
    }

    /// The free set of a day with `registry`'s commitments blocked out.
    ///
    /// For a sleep window that stays inside the day this yields
    /// `[00:00, sleep_start]` (unless sleep starts at `00:00`) and
    /// `[sleep_end, 23:59]` (unless sleep ends at `23:59`). A sleep window
    /// that wraps midnight leaves the single interval `[sleep_end, sleep_start]`.
    pub fn for_day(registry: &CommitmentRegistry) -> Self {
        let mut tracker = Self::from_free(vec![TimeInterval::full_day()]);
        tracker.carve_out(&registry.sleep_window());
        for commitment in registry.non_sleep() {
            tracker.carve_out(&commitment.interval);
        }
        tracker
    }

    /// Remove `busy` from every free interval it overlaps.
    pub fn carve_out(&mut self, busy: &TimeInterval) {
        self.free = self
            .free
            .iter()
            .flat_map(|free| free.subtract(busy))
            .collect();
    }

    pub fn free_intervals(&self) -> &[TimeInterval] {
        &self.free
    }

    pub fn total_free_minutes(&self) -> u32 {
        self.free.iter().map(TimeInterval::duration_minutes).sum()
    }

    /// Length of the longest free interval, or 0 when the day is full.
    pub fn longest_free_minutes(&self) -> u32 {
        self.free
            .iter()
            .map(TimeInterval::duration_minutes)
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}
