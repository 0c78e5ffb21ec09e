//! Task requests, named preferred windows, and placed tasks.
//!
//! A [`TaskRequest`] is produced by a parsing collaborator and never mutated
//! by the engine. Placement creates a fresh [`ScheduledTask`] that copies the
//! request's fields and adds timing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PlanError;
use crate::interval::{TimeInterval, TimeOfDay};

/// Most urgent priority a request may carry.
pub const HIGHEST_PRIORITY: u8 = 1;

/// Least urgent priority a request may carry.
pub const LOWEST_PRIORITY: u8 = 4;

/// Priority given to fixed commitments in a schedule.
pub const FIXED_PRIORITY: u8 = 0;

// ── TimeWindow ──────────────────────────────────────────────────────────────

/// A named part of the day a task would like to be scheduled in.
///
/// Which clock times each window covers comes from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// 早晨
    #[serde(alias = "早晨")]
    EarlyMorning,
    /// 上午
    #[serde(alias = "上午")]
    Morning,
    /// 下午
    #[serde(alias = "下午")]
    Afternoon,
    /// 傍晚
    #[serde(alias = "傍晚")]
    Dusk,
    /// 晚上
    #[serde(alias = "晚上")]
    Evening,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::EarlyMorning,
        TimeWindow::Morning,
        TimeWindow::Afternoon,
        TimeWindow::Dusk,
        TimeWindow::Evening,
    ];

    /// The label used in task descriptions.
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::EarlyMorning => "早晨",
            TimeWindow::Morning => "上午",
            TimeWindow::Afternoon => "下午",
            TimeWindow::Dusk => "傍晚",
            TimeWindow::Evening => "晚上",
        }
    }

    fn key(self) -> &'static str {
        match self {
            TimeWindow::EarlyMorning => "early_morning",
            TimeWindow::Morning => "morning",
            TimeWindow::Afternoon => "afternoon",
            TimeWindow::Dusk => "dusk",
            TimeWindow::Evening => "evening",
        }
    }

    /// Look up a window by its label or snake_case key.
    ///
    /// Unknown labels yield `None`, which the engine treats as "no preference".
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|w| w.label() == label || w.key().eq_ignore_ascii_case(label))
    }

    /// The part of the day a start time falls in, for schedule summaries.
    ///
    /// 06-12 is early morning, 12-18 afternoon, 18-22 dusk, anything else evening.
    pub fn bucket_for(time: TimeOfDay) -> Self {
        match time.hour() {
            6..=11 => TimeWindow::EarlyMorning,
            12..=17 => TimeWindow::Afternoon,
            18..=21 => TimeWindow::Dusk,
            _ => TimeWindow::Evening,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deserialize a preferred window leniently: unknown labels become `None`.
fn lenient_window<'de, D>(deserializer: D) -> Result<Option<TimeWindow>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(TimeWindow::from_label))
}

// ── TaskRequest ─────────────────────────────────────────────────────────────

/// A task to place on the day's timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub name: String,
    pub duration_minutes: u32,
    #[serde(default, deserialize_with = "lenient_window")]
    pub preferred_window: Option<TimeWindow>,
    /// 1 is most urgent, 4 least.
    pub priority: u8,
}

impl TaskRequest {
    pub fn new(
        name: impl Into<String>,
        duration_minutes: u32,
        preferred_window: Option<TimeWindow>,
        priority: u8,
    ) -> Self {
        Self {
            name: name.into(),
            duration_minutes,
            preferred_window,
            priority,
        }
    }

    /// Check the request's preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidTask`] for an empty name, a zero duration,
    /// or a priority outside `1..=4`.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::InvalidTask("task name is empty".to_string()));
        }
        if self.duration_minutes == 0 {
            return Err(PlanError::InvalidTask(format!(
                "'{}': duration must be positive",
                self.name
            )));
        }
        if !(HIGHEST_PRIORITY..=LOWEST_PRIORITY).contains(&self.priority) {
            return Err(PlanError::InvalidTask(format!(
                "'{}': priority {} outside {}..={}",
                self.name, self.priority, HIGHEST_PRIORITY, LOWEST_PRIORITY
            )));
        }
        Ok(())
    }
}

// ── ScheduledTask ───────────────────────────────────────────────────────────

/// An entry of a day's schedule: a placed request or a fixed commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub name: String,
    pub duration_minutes: u32,
    #[serde(default, deserialize_with = "lenient_window")]
    pub preferred_window: Option<TimeWindow>,
    pub priority: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub is_fixed: bool,
}

impl ScheduledTask {
    /// Copy `request` and place it at `start`.
    pub fn placed(request: &TaskRequest, start: TimeOfDay) -> Self {
        Self {
            name: request.name.clone(),
            duration_minutes: request.duration_minutes,
            preferred_window: request.preferred_window,
            priority: request.priority,
            start_time: start,
            end_time: start.add_minutes(request.duration_minutes),
            is_fixed: false,
        }
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start_time, self.end_time)
    }
}
