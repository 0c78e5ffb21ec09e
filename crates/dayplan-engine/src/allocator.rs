//! Greedy, priority-driven placement of task requests.
//!
//! # Algorithm
//!
//! 1. Order requests by priority, most urgent first. Equal priorities keep
//!    their input order.
//! 2. Once the number of placed tasks reaches the daily cap, every further
//!    request is deferred without a placement attempt.
//! 3. A request with a configured preferred window is placed at the earliest
//!    start among the intersections of free intervals with that window that
//!    are long enough for it.
//! 4. Otherwise (or when no intersection is long enough) it goes to the free
//!    interval whose length is closest to its duration, at that interval's
//!    start. Ties keep the earlier interval.
//! 5. Each placement is carved out of the availability before the next
//!    request is considered. Requests that fit nowhere are deferred.
//!
//! Decisions are never revisited; this is deliberately not an optimal
//! packing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::AvailabilityTracker;
use crate::commitments::CommitmentRegistry;
use crate::interval::{TimeInterval, TimeOfDay};
use crate::task::{ScheduledTask, TaskRequest, TimeWindow};

/// Where a slot was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSource {
    /// Inside the request's preferred window.
    PreferredWindow,
    /// Best-fit search over all free intervals.
    BestFit,
}

/// A start time chosen for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: TimeOfDay,
    pub source: SlotSource,
}

/// Raw allocator output, before fixed commitments are merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    /// Placed requests, in placement order.
    pub scheduled: Vec<ScheduledTask>,
    /// Requests that were capped out or fit nowhere, in processing order.
    pub remaining: Vec<TaskRequest>,
}

/// A day's schedule: placed tasks and fixed commitments, ordered by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub scheduled_tasks: Vec<ScheduledTask>,
    pub remaining_tasks: Vec<TaskRequest>,
    /// Length of `scheduled_tasks`, fixed commitments included.
    pub total_scheduled: usize,
    pub total_remaining: usize,
}

impl ScheduleResult {
    /// Build a result from entries as given; totals are derived.
    pub fn new(scheduled_tasks: Vec<ScheduledTask>, remaining_tasks: Vec<TaskRequest>) -> Self {
        Self {
            total_scheduled: scheduled_tasks.len(),
            total_remaining: remaining_tasks.len(),
            scheduled_tasks,
            remaining_tasks,
        }
    }

    /// Merge an allocation with the registry's commitments and order by start time.
    ///
    /// The sort is stable, so entries starting at the same minute keep
    /// allocation-then-registry order.
    pub fn assemble(allocation: Allocation, registry: &CommitmentRegistry) -> Self {
        let Allocation {
            mut scheduled,
            remaining,
        } = allocation;
        scheduled.extend(registry.to_scheduled());
        scheduled.sort_by_key(|task| task.start_time);
        Self::new(scheduled, remaining)
    }

    /// Entries placed by the allocator (not fixed commitments).
    pub fn placed_tasks(&self) -> impl Iterator<Item = &ScheduledTask> + '_ {
        self.scheduled_tasks.iter().filter(|task| !task.is_fixed)
    }
}

/// Places requests into free time, one at a time, most urgent first.
#[derive(Debug, Clone, Copy)]
pub struct GreedyAllocator<'a> {
    windows: &'a BTreeMap<TimeWindow, TimeInterval>,
    max_tasks: usize,
}

impl<'a> GreedyAllocator<'a> {
    pub fn new(windows: &'a BTreeMap<TimeWindow, TimeInterval>, max_tasks: usize) -> Self {
        Self { windows, max_tasks }
    }

    /// Place `tasks` into `tracker`'s free time, carving out each placement.
    pub fn allocate(&self, tasks: &[TaskRequest], tracker: &mut AvailabilityTracker) -> Allocation {
        let mut ordered: Vec<&TaskRequest> = tasks.iter().collect();
        ordered.sort_by_key(|task| task.priority);

        let mut allocation = Allocation::default();
        for task in ordered {
            if allocation.scheduled.len() >= self.max_tasks {
                debug!(task = %task.name, cap = self.max_tasks, "daily cap reached, deferring");
                allocation.remaining.push(task.clone());
                continue;
            }

            match self.find_slot(task, tracker.free_intervals()) {
                Some(slot) => {
                    let placed = ScheduledTask::placed(task, slot.start);
                    debug!(
                        task = %placed.name,
                        start = %placed.start_time,
                        end = %placed.end_time,
                        source = ?slot.source,
                        "task placed"
                    );
                    tracker.carve_out(&placed.interval());
                    allocation.scheduled.push(placed);
                }
                None => {
                    debug!(
                        task = %task.name,
                        duration = task.duration_minutes,
                        "no free interval long enough, deferring"
                    );
                    allocation.remaining.push(task.clone());
                }
            }
        }

        allocation
    }

    /// Choose a start time for `task` among `free` intervals.
    ///
    /// A preferred window missing from configuration counts as no preference.
    pub fn find_slot(&self, task: &TaskRequest, free: &[TimeInterval]) -> Option<Slot> {
        let window = task
            .preferred_window
            .and_then(|w| self.windows.get(&w));

        if let Some(window) = window {
            if let Some(start) = earliest_in_window(free, window, task.duration_minutes) {
                return Some(Slot {
                    start,
                    source: SlotSource::PreferredWindow,
                });
            }
        }

        best_fit(free, task.duration_minutes).map(|start| Slot {
            start,
            source: SlotSource::BestFit,
        })
    }
}

/// Earliest start among intersections of `free` with `window` that hold `duration`.
fn earliest_in_window(
    free: &[TimeInterval],
    window: &TimeInterval,
    duration: u32,
) -> Option<TimeOfDay> {
    let mut earliest: Option<TimeOfDay> = None;
    let candidates = free
        .iter()
        .filter(|slot| slot.overlaps_with(window))
        .flat_map(|slot| slot.intersections(window))
        .filter(|overlap| overlap.duration_minutes() >= duration);

    for overlap in candidates {
        if earliest.map_or(true, |best| overlap.start < best) {
            earliest = Some(overlap.start);
        }
    }
    earliest
}

/// Start of the free interval whose length is closest to `duration`.
fn best_fit(free: &[TimeInterval], duration: u32) -> Option<TimeOfDay> {
    let mut best: Option<(u32, TimeOfDay)> = None;
    for slot in free {
        let length = slot.duration_minutes();
        if length < duration {
            continue;
        }
        let leftover = length - duration;
        if best.map_or(true, |(least, _)| leftover < least) {
            best = Some((leftover, slot.start));
        }
    }
    best.map(|(_, start)| start)
}
