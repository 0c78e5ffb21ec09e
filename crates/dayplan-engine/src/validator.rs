//! Post-hoc schedule checks.
//!
//! The validator never fails; every finding is reported as data. Errors
//! invalidate a schedule, warnings don't.
//!
//! Checks, in order:
//! 1. Every pair of entries is tested for overlap; each overlapping pair is
//!    one error naming both entries.
//! 2. Entries carrying the sleep name: none is a warning, more than one an error.
//! 3. More non-fixed entries than the daily cap is a warning.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::allocator::ScheduleResult;
use crate::config::PlanConfig;

/// Outcome of validating a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` exactly when `errors` is empty.
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleValidator {
    sleep_name: String,
    max_tasks: usize,
}

impl ScheduleValidator {
    pub fn new(sleep_name: impl Into<String>, max_tasks: usize) -> Self {
        Self {
            sleep_name: sleep_name.into(),
            max_tasks,
        }
    }

    pub fn from_config(config: &PlanConfig) -> Self {
        Self::new(config.sleep_name.clone(), config.max_tasks_per_day)
    }

    pub fn validate(&self, schedule: &ScheduleResult) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let tasks = &schedule.scheduled_tasks;

        for (i, first) in tasks.iter().enumerate() {
            for second in &tasks[i + 1..] {
                if first.interval().overlaps_with(&second.interval()) {
                    errors.push(format!(
                        "tasks overlap: {} ({}) and {} ({})",
                        first.name,
                        first.interval(),
                        second.name,
                        second.interval()
                    ));
                }
            }
        }

        let sleep_entries = tasks.iter().filter(|t| t.name == self.sleep_name).count();
        match sleep_entries {
            0 => warnings.push("no sleep scheduled".to_string()),
            1 => {}
            n => errors.push(format!(
                "duplicate sleep: {} entries named '{}'",
                n, self.sleep_name
            )),
        }

        let placed = schedule.placed_tasks().count();
        if placed > self.max_tasks {
            warnings.push(format!(
                "task count exceeds limit: {} > {}",
                placed, self.max_tasks
            ));
        }

        if !errors.is_empty() {
            warn!(errors = errors.len(), "schedule failed validation");
        }

        ValidationResult::new(errors, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::{TimeInterval, TimeOfDay};
    use crate::task::ScheduledTask;

    fn entry(name: &str, start: &str, end: &str, is_fixed: bool) -> ScheduledTask {
        let start_time = TimeOfDay::parse(start).unwrap();
        let end_time = TimeOfDay::parse(end).unwrap();
        ScheduledTask {
            name: name.to_string(),
            duration_minutes: TimeInterval::new(start_time, end_time).duration_minutes(),
            preferred_window: None,
            priority: if is_fixed { 0 } else { 2 },
            start_time,
            end_time,
            is_fixed,
        }
    }

    fn validator() -> ScheduleValidator {
        ScheduleValidator::new("睡眠", 8)
    }

    #[test]
    fn test_clean_schedule_is_valid() {
        let schedule = ScheduleResult::new(
            vec![
                entry("早餐", "07:00", "08:00", true),
                entry("写周报", "09:00", "11:00", false),
                entry("睡眠", "22:00", "06:00", true),
            ],
            vec![],
        );
        let result = validator().validate(&schedule);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_identical_slots_produce_one_overlap_error() {
        let schedule = ScheduleResult::new(
            vec![
                entry("开会", "09:00", "10:00", false),
                entry("写作", "09:00", "10:00", false),
            ],
            vec![],
        );
        let result = validator().validate(&schedule);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("开会"));
        assert!(result.errors[0].contains("写作"));
        assert_eq!(result.warnings, vec!["no sleep scheduled".to_string()]);
    }

    #[test]
    fn test_each_overlapping_pair_is_reported() {
        let schedule = ScheduleResult::new(
            vec![
                entry("a", "09:00", "11:00", false),
                entry("b", "10:00", "12:00", false),
                entry("c", "10:30", "10:45", false),
                entry("睡眠", "22:00", "06:00", true),
            ],
            vec![],
        );
        let result = validator().validate(&schedule);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_task_inside_sleep_is_an_overlap() {
        let schedule = ScheduleResult::new(
            vec![
                entry("夜读", "23:00", "23:30", false),
                entry("睡眠", "22:00", "06:00", true),
            ],
            vec![],
        );
        assert!(!validator().validate(&schedule).is_valid);
    }

    #[test]
    fn test_duplicate_sleep_is_an_error() {
        let schedule = ScheduleResult::new(
            vec![
                entry("睡眠", "00:00", "01:00", true),
                entry("睡眠", "22:00", "23:00", true),
            ],
            vec![],
        );
        let result = validator().validate(&schedule);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("duplicate sleep"));
    }

    #[test]
    fn test_exceeding_cap_is_only_a_warning() {
        let mut tasks: Vec<ScheduledTask> = (0..3)
            .map(|i| {
                let start = format!("{:02}:00", 8 + i);
                let end = format!("{:02}:00", 9 + i);
                entry(&format!("任务{i}"), &start, &end, false)
            })
            .collect();
        tasks.push(entry("睡眠", "22:00", "06:00", true));

        let result = ScheduleValidator::new("睡眠", 2).validate(&ScheduleResult::new(tasks, vec![]));
        assert!(result.is_valid);
        assert_eq!(result.warnings, vec!["task count exceeds limit: 3 > 2".to_string()]);
    }
}
