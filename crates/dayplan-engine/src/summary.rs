//! Roll-up statistics for a finished schedule.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::allocator::ScheduleResult;
use crate::task::TimeWindow;
use crate::validator::ValidationResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSummary {
    pub total_scheduled: usize,
    pub total_remaining: usize,
    /// Minutes of placed (non-fixed) work.
    pub total_duration_minutes: u32,
    /// Placed tasks per part of the day, keyed by [`TimeWindow::bucket_for`] of their start.
    pub time_distribution: BTreeMap<TimeWindow, usize>,
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

impl ScheduleSummary {
    pub fn new(schedule: &ScheduleResult, validation: &ValidationResult) -> Self {
        let mut time_distribution = BTreeMap::new();
        let mut total_duration_minutes = 0;
        for task in schedule.placed_tasks() {
            total_duration_minutes += task.duration_minutes;
            *time_distribution
                .entry(TimeWindow::bucket_for(task.start_time))
                .or_insert(0) += 1;
        }

        Self {
            total_scheduled: schedule.total_scheduled,
            total_remaining: schedule.total_remaining,
            total_duration_minutes,
            time_distribution,
            is_valid: validation.is_valid,
            warnings: validation.warnings.clone(),
        }
    }
}
