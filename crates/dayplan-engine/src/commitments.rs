//! Fixed daily commitments (sleep, meals).
//!
//! The registry is built once from [`PlanConfig`] and is read-only after
//! that. It feeds the availability tracker and contributes the same entries,
//! verbatim, to every schedule.

use serde::Serialize;

use crate::config::PlanConfig;
use crate::interval::TimeInterval;
use crate::task::{ScheduledTask, FIXED_PRIORITY};

/// A named interval that is never moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixedCommitment {
    pub name: String,
    pub interval: TimeInterval,
}

impl FixedCommitment {
    pub fn new(name: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            name: name.into(),
            interval,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.interval.duration_minutes()
    }

    /// The schedule entry for this commitment: fixed, priority 0.
    pub fn to_scheduled(&self) -> ScheduledTask {
        ScheduledTask {
            name: self.name.clone(),
            duration_minutes: self.duration_minutes(),
            preferred_window: None,
            priority: FIXED_PRIORITY,
            start_time: self.interval.start,
            end_time: self.interval.end,
            is_fixed: true,
        }
    }
}

/// The ordered set of fixed commitments plus the sleep window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitmentRegistry {
    commitments: Vec<FixedCommitment>,
    sleep_name: String,
    sleep_window: TimeInterval,
}

impl CommitmentRegistry {
    pub fn from_config(config: &PlanConfig) -> Self {
        let commitments = config
            .fixed_commitments
            .iter()
            .map(|spec| FixedCommitment::new(spec.name.clone(), spec.interval()))
            .collect();

        Self {
            commitments,
            sleep_name: config.sleep_name.clone(),
            sleep_window: config.sleep_window(),
        }
    }

    /// All commitments in configuration order, sleep included.
    pub fn commitments(&self) -> &[FixedCommitment] {
        &self.commitments
    }

    pub fn sleep_name(&self) -> &str {
        &self.sleep_name
    }

    /// The sleep window. Always present, even when no commitment carries the sleep name.
    pub fn sleep_window(&self) -> TimeInterval {
        self.sleep_window
    }

    pub fn is_sleep(&self, name: &str) -> bool {
        name == self.sleep_name
    }

    /// Commitments other than sleep (the meals, in the stock configuration).
    pub fn non_sleep(&self) -> impl Iterator<Item = &FixedCommitment> + '_ {
        self.commitments.iter().filter(|c| !self.is_sleep(&c.name))
    }

    /// Schedule entries for every commitment.
    pub fn to_scheduled(&self) -> Vec<ScheduledTask> {
        self.commitments
            .iter()
            .map(FixedCommitment::to_scheduled)
            .collect()
    }
}
