//! The scheduling entry point.
//!
//! [`ScheduleEngine`] owns a validated [`PlanConfig`] and everything derived
//! from it once (commitment registry, the day's initial free set, the
//! validator). Each call works on its own copy of the free set, so an engine
//! can be reused for any number of calls and shared between threads.
//!
//! ```
//! use dayplan_engine::{PlanConfig, ScheduleEngine, TaskRequest, TimeWindow};
//!
//! let engine = ScheduleEngine::new(PlanConfig::default()).unwrap();
//! let tasks = vec![TaskRequest::new("写周报", 120, Some(TimeWindow::Morning), 1)];
//! let plan = engine.plan(&tasks).unwrap();
//!
//! let report = plan.schedule.placed_tasks().next().unwrap();
//! assert_eq!(report.start_time.to_string(), "09:00");
//! assert_eq!(report.end_time.to_string(), "11:00");
//! assert!(plan.validation.is_valid);
//! ```

use serde::Serialize;
use tracing::info;

use crate::allocator::{GreedyAllocator, ScheduleResult};
use crate::availability::AvailabilityTracker;
use crate::commitments::CommitmentRegistry;
use crate::config::PlanConfig;
use crate::error::Result;
use crate::interval::TimeInterval;
use crate::summary::ScheduleSummary;
use crate::task::TaskRequest;
use crate::validator::{ScheduleValidator, ValidationResult};

/// Schedule, validation and summary of one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub schedule: ScheduleResult,
    pub validation: ValidationResult,
    pub summary: ScheduleSummary,
}

#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    config: PlanConfig,
    registry: CommitmentRegistry,
    availability: AvailabilityTracker,
    validator: ScheduleValidator,
}

impl ScheduleEngine {
    /// Build an engine from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlanError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: PlanConfig) -> Result<Self> {
        config.validate()?;
        let registry = CommitmentRegistry::from_config(&config);
        let availability = AvailabilityTracker::for_day(&registry);
        let validator = ScheduleValidator::from_config(&config);
        Ok(Self {
            config,
            registry,
            availability,
            validator,
        })
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommitmentRegistry {
        &self.registry
    }

    /// The day's free intervals before any task is placed.
    pub fn available_slots(&self) -> &[TimeInterval] {
        self.availability.free_intervals()
    }

    /// Place `tasks` and merge in the fixed commitments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PlanError::InvalidTask`] if any request fails
    /// [`TaskRequest::validate`]; nothing is scheduled in that case.
    pub fn schedule(&self, tasks: &[TaskRequest]) -> Result<ScheduleResult> {
        for task in tasks {
            task.validate()?;
        }

        let mut availability = self.availability.clone();
        let allocator =
            GreedyAllocator::new(&self.config.preferred_windows, self.config.max_tasks_per_day);
        let allocation = allocator.allocate(tasks, &mut availability);
        let result = ScheduleResult::assemble(allocation, &self.registry);

        info!(
            requested = tasks.len(),
            scheduled = result.total_scheduled,
            remaining = result.total_remaining,
            free_minutes_left = availability.total_free_minutes(),
            "schedule built"
        );

        Ok(result)
    }

    /// Check a schedule, whether built by this engine or by hand.
    pub fn validate(&self, schedule: &ScheduleResult) -> ValidationResult {
        self.validator.validate(schedule)
    }

    /// Schedule, validate and summarize in one call.
    ///
    /// # Errors
    ///
    /// Same as [`ScheduleEngine::schedule`].
    pub fn plan(&self, tasks: &[TaskRequest]) -> Result<DayPlan> {
        let schedule = self.schedule(tasks)?;
        let validation = self.validate(&schedule);
        let summary = ScheduleSummary::new(&schedule, &validation);
        Ok(DayPlan {
            schedule,
            validation,
            summary,
        })
    }
}
