//! Engine configuration.
//!
//! [`PlanConfig`] is an explicit, immutable value handed to the engine at
//! construction. It carries the sleep window, the clock times of each named
//! [`TimeWindow`], the fixed daily commitments, and the per-day cap on
//! scheduled tasks. [`PlanConfig::default`] gives the stock day: sleep
//! 22:00-06:00, three meals, and a cap of eight tasks.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::interval::{hm, TimeInterval, TimeOfDay};
use crate::task::TimeWindow;

/// A fixed daily commitment as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentSpec {
    pub name: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Must agree with the duration derived from `start`/`end`.
    pub duration_minutes: u32,
}

impl CommitmentSpec {
    pub fn new(name: impl Into<String>, start: TimeOfDay, end: TimeOfDay) -> Self {
        let duration_minutes = TimeInterval::new(start, end).duration_minutes();
        Self {
            name: name.into(),
            start,
            end,
            duration_minutes,
        }
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::new(self.start, self.end)
    }
}

/// Static configuration of a scheduling engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Name of the commitment that represents sleep.
    pub sleep_name: String,
    pub sleep_start: TimeOfDay,
    pub sleep_end: TimeOfDay,
    /// Clock times of each named window. Windows missing here are treated
    /// as "no preference".
    pub preferred_windows: BTreeMap<TimeWindow, TimeInterval>,
    /// Immovable daily anchors, in the order they are registered.
    pub fixed_commitments: Vec<CommitmentSpec>,
    pub max_tasks_per_day: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        let preferred_windows = BTreeMap::from([
            (TimeWindow::EarlyMorning, TimeInterval::new(hm(6, 0), hm(12, 0))),
            (TimeWindow::Morning, TimeInterval::new(hm(9, 0), hm(12, 0))),
            (TimeWindow::Afternoon, TimeInterval::new(hm(12, 0), hm(18, 0))),
            (TimeWindow::Dusk, TimeInterval::new(hm(18, 0), hm(21, 0))),
            (TimeWindow::Evening, TimeInterval::new(hm(21, 0), hm(22, 0))),
        ]);

        Self {
            sleep_name: "睡眠".to_string(),
            sleep_start: hm(22, 0),
            sleep_end: hm(6, 0),
            preferred_windows,
            fixed_commitments: vec![
                CommitmentSpec::new("睡眠", hm(22, 0), hm(6, 0)),
                CommitmentSpec::new("早餐", hm(7, 0), hm(8, 0)),
                CommitmentSpec::new("午餐", hm(12, 0), hm(13, 0)),
                CommitmentSpec::new("晚餐", hm(18, 0), hm(19, 0)),
            ],
            max_tasks_per_day: 8,
        }
    }
}

impl PlanConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// Fields left out of the document take their [`Default`] values.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidConfig`] if the JSON is malformed or the
    /// configuration fails [`PlanConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let config: PlanConfig = serde_json::from_str(json)
            .map_err(|e| PlanError::InvalidConfig(format!("malformed JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, PlanError> {
        serde_json::to_string_pretty(self).map_err(|e| PlanError::InvalidConfig(e.to_string()))
    }

    /// Check internal consistency.
    ///
    /// Overlapping commitments are allowed here; the schedule validator
    /// reports them.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidConfig`] when the cap is zero, the sleep
    /// window is empty, a commitment is empty, named twice, declares a
    /// duration that disagrees with its times, or is the sleep commitment
    /// with times other than `sleep_start`/`sleep_end`.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.max_tasks_per_day == 0 {
            return Err(PlanError::InvalidConfig(
                "max_tasks_per_day must be positive".to_string(),
            ));
        }
        if self.sleep_start == self.sleep_end {
            return Err(PlanError::InvalidConfig(format!(
                "sleep window {} is empty",
                self.sleep_window()
            )));
        }

        let mut seen = HashSet::new();
        for spec in &self.fixed_commitments {
            if !seen.insert(spec.name.as_str()) {
                return Err(PlanError::InvalidConfig(format!(
                    "commitment '{}' declared twice",
                    spec.name
                )));
            }

            let derived = spec.interval().duration_minutes();
            if derived == 0 {
                return Err(PlanError::InvalidConfig(format!(
                    "commitment '{}' has zero length",
                    spec.name
                )));
            }
            if derived != spec.duration_minutes {
                return Err(PlanError::InvalidConfig(format!(
                    "commitment '{}' declares {} minutes but {} spans {}",
                    spec.name,
                    spec.duration_minutes,
                    spec.interval(),
                    derived
                )));
            }

            if spec.name == self.sleep_name && spec.interval() != self.sleep_window() {
                return Err(PlanError::InvalidConfig(format!(
                    "sleep commitment {} disagrees with sleep window {}",
                    spec.interval(),
                    self.sleep_window()
                )));
            }
        }

        Ok(())
    }

    pub fn sleep_window(&self) -> TimeInterval {
        TimeInterval::new(self.sleep_start, self.sleep_end)
    }

    /// Clock times of a named window, if configured.
    pub fn window(&self, window: TimeWindow) -> Option<TimeInterval> {
        self.preferred_windows.get(&window).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sleep_window().duration_minutes(), 480);
        assert_eq!(config.fixed_commitments.len(), 4);
        assert_eq!(config.max_tasks_per_day, 8);
        assert_eq!(
            config.window(TimeWindow::Morning).unwrap().to_string(),
            "09:00-12:00"
        );
    }

    #[test]
    fn test_from_json_fills_missing_fields_with_defaults() {
        let config = PlanConfig::from_json(r#"{"max_tasks_per_day": 3}"#).unwrap();
        assert_eq!(config.max_tasks_per_day, 3);
        assert_eq!(config.sleep_name, "睡眠");
        assert_eq!(config.preferred_windows.len(), 5);
    }

    #[test]
    fn test_from_json_reads_windows_by_label() {
        let json = r#"{
            "preferred_windows": {
                "上午": {"start": "08:30", "end": "11:30"}
            }
        }"#;
        let config = PlanConfig::from_json(json).unwrap();
        assert_eq!(config.preferred_windows.len(), 1);
        assert_eq!(
            config.window(TimeWindow::Morning).unwrap().to_string(),
            "08:30-11:30"
        );
        assert_eq!(config.window(TimeWindow::Dusk), None);
    }

    #[test]
    fn test_json_round_trip_preserves_config() {
        let config = PlanConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(PlanConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(
            PlanConfig::from_json("{not json"),
            Err(PlanError::InvalidConfig(_))
        ));
        assert!(PlanConfig::from_json(r#"{"sleep_start": "26:00"}"#).is_err());
    }

    #[test]
    fn test_duration_mismatch_rejected() {
        let mut config = PlanConfig::default();
        config.fixed_commitments[1].duration_minutes = 45;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("早餐"));
    }

    #[test]
    fn test_sleep_commitment_must_match_sleep_window() {
        let mut config = PlanConfig::default();
        config.sleep_start = hm(23, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_commitment_name_rejected() {
        let mut config = PlanConfig::default();
        config
            .fixed_commitments
            .push(CommitmentSpec::new("午餐", hm(14, 0), hm(15, 0)));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = PlanConfig {
            max_tasks_per_day: 0,
            ..PlanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlapping_commitments_are_not_a_config_error() {
        let mut config = PlanConfig::default();
        config
            .fixed_commitments
            .push(CommitmentSpec::new("加餐", hm(12, 30), hm(13, 30)));
        assert!(config.validate().is_ok());
    }
}
