//! # dayplan-engine
//!
//! Deterministic single-day timetable allocation.
//!
//! The engine takes task requests (duration, preferred part of the day,
//! priority) and places them on a conflict-free timetable around fixed
//! daily commitments such as sleep and meals, within a cap on tasks per
//! day. Placement is greedy and priority-driven; a validator checks the
//! finished schedule.
//!
//! ## Modules
//!
//! - [`interval`] — Time of day and wrap-aware intervals (overlap, containment, carve-out)
//! - [`task`] — Task requests, named preferred windows, placed tasks
//! - [`config`] — Explicit engine configuration, JSON loadable
//! - [`commitments`] — Fixed daily commitments
//! - [`availability`] — Free-time tracking by interval carve-out
//! - [`allocator`] — Greedy priority-driven placement
//! - [`validator`] — Overlap, sleep and task-count checks
//! - [`summary`] — Roll-up statistics of a schedule
//! - [`engine`] — The scheduling entry point
//! - [`error`] — Error types

pub mod allocator;
pub mod availability;
pub mod commitments;
pub mod config;
pub mod engine;
pub mod error;
pub mod interval;
pub mod summary;
pub mod task;
pub mod validator;

pub use allocator::{Allocation, GreedyAllocator, ScheduleResult, Slot, SlotSource};
pub use availability::AvailabilityTracker;
pub use commitments::{CommitmentRegistry, FixedCommitment};
pub use config::{CommitmentSpec, PlanConfig};
pub use engine::{DayPlan, ScheduleEngine};
pub use error::PlanError;
pub use interval::{TimeInterval, TimeOfDay, MINUTES_PER_DAY};
pub use summary::ScheduleSummary;
pub use task::{ScheduledTask, TaskRequest, TimeWindow};
pub use validator::{ScheduleValidator, ValidationResult};
