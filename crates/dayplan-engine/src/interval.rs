//! Time-of-day values and intervals that may span midnight.
//!
//! A [`TimeOfDay`] is a minute within a single day (`00:00` to `23:59`).
//! A [`TimeInterval`] is a `start`/`end` pair; when `end < start` the
//! interval runs past midnight and its end belongs to the following day.
//!
//! # Wraparound
//!
//! Every comparison between two intervals lays the first one out on a
//! 48-hour line as `[start, end + 24h if wrapping)` and checks it against the
//! second one shifted by -24h, 0 and +24h. Two intervals that both wrap
//! midnight therefore compare correctly, and non-wrapping intervals behave
//! exactly like plain `[start, end)` ranges.
//!
//! # Operations
//!
//! - [`TimeInterval::duration_minutes`] — elapsed minutes, wrap-aware
//! - [`TimeInterval::overlaps_with`] — strict overlap (touching endpoints don't count)
//! - [`TimeInterval::contains`] — inclusive membership test for a time of day
//! - [`TimeInterval::intersections`] — the common parts of two intervals
//! - [`TimeInterval::subtract`] — carve a busy interval out of a free one

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 1440;

const DAY: i32 = MINUTES_PER_DAY as i32;

/// Offsets applied to the second interval when comparing on the 48-hour line.
const SHIFTS: [i32; 3] = [-DAY, 0, DAY];

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A minute of the day, rendered and parsed as zero-padded `HH:MM`.
///
/// Ordering is chronological within the day, which is also the order the
/// `HH:MM` strings sort in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// `23:59`. The free-time horizon of a day ends here rather than at `24:00`.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY as u16 - 1);

    /// Build from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self((hour * 60 + minute) as u16))
    }

    /// Build from minutes since midnight, wrapping values of a day or more.
    pub fn from_minutes(minutes: u32) -> Self {
        Self((minutes % MINUTES_PER_DAY) as u16)
    }

    /// Parse a `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidTime`] if the string is not a valid 24-hour time.
    pub fn parse(s: &str) -> Result<Self, PlanError> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|e| PlanError::InvalidTime(format!("'{}': {}", s, e)))?;
        Ok(Self((time.hour() * 60 + time.minute()) as u16))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// The time `minutes` later, wrapping past midnight.
    pub fn add_minutes(self, minutes: u32) -> Self {
        Self::from_minutes(self.minutes() + minutes % MINUTES_PER_DAY)
    }

    /// Map a position on the 48-hour line back into the day.
    fn from_linear(minutes: i32) -> Self {
        Self(minutes.rem_euclid(DAY) as u16)
    }
}

/// Literal time for built-in defaults. Callers pass in-range values only.
pub(crate) const fn hm(hour: u16, minute: u16) -> TimeOfDay {
    TimeOfDay(hour * 60 + minute)
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

// ── TimeInterval ────────────────────────────────────────────────────────────

/// A time-of-day range. Wraps past midnight when `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeInterval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Parse an interval from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidTime`] if either endpoint cannot be parsed.
    pub fn parse(start: &str, end: &str) -> Result<Self, PlanError> {
        Ok(Self::new(TimeOfDay::parse(start)?, TimeOfDay::parse(end)?))
    }

    /// `00:00`-`23:59`, the schedulable horizon of one day.
    pub fn full_day() -> Self {
        Self::new(TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY)
    }

    /// Whether the interval runs past midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Elapsed minutes from start to end; the end counts as next day when wrapping.
    pub fn duration_minutes(&self) -> u32 {
        let (start, end) = self.span();
        (end - start) as u32
    }

    /// Whether the two intervals share any time. Touching endpoints don't count.
    pub fn overlaps_with(&self, other: &TimeInterval) -> bool {
        let (a0, a1) = self.span();
        let (b0, b1) = other.span();
        SHIFTS.iter().any(|k| a0 < b1 + k && b0 + k < a1)
    }

    /// Whether `time` lies within `[start, end]`, both ends inclusive.
    ///
    /// For a wrapping interval a time earlier than `start` is read as next-day.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        let (start, end) = self.span();
        let t = time.minutes() as i32;
        (start..=end).contains(&t) || (start..=end).contains(&(t + DAY))
    }

    /// The non-empty common parts of `self` and `other`, in `self`'s time order.
    ///
    /// Two non-wrapping intervals have at most one intersection. A wrapping
    /// interval can meet another interval on both sides of midnight.
    pub fn intersections(&self, other: &TimeInterval) -> Vec<TimeInterval> {
        let (a0, a1) = self.span();
        let (b0, b1) = other.span();
        SHIFTS
            .iter()
            .filter_map(|k| {
                let lo = a0.max(b0 + k);
                let hi = a1.min(b1 + k);
                (lo < hi).then(|| Self::from_linear(lo, hi))
            })
            .collect()
    }

    /// Carve `busy` out of this interval.
    ///
    /// If the two don't overlap the result is `self` unchanged. Otherwise the
    /// result holds the part before `busy` (if `self` starts earlier) and the
    /// part after it (if `self` ends later): zero, one or two intervals.
    pub fn subtract(&self, busy: &TimeInterval) -> Vec<TimeInterval> {
        if !self.overlaps_with(busy) {
            return vec![*self];
        }

        let (b0, b1) = busy.span();
        let mut pieces = vec![self.span()];
        for k in SHIFTS {
            let (s, e) = (b0 + k, b1 + k);
            pieces = pieces
                .into_iter()
                .flat_map(|(p0, p1)| {
                    if p0 < e && s < p1 {
                        let mut rest = Vec::with_capacity(2);
                        if p0 < s {
                            rest.push((p0, s));
                        }
                        if e < p1 {
                            rest.push((e, p1));
                        }
                        rest
                    } else {
                        vec![(p0, p1)]
                    }
                })
                .collect();
        }

        pieces
            .into_iter()
            .map(|(lo, hi)| Self::from_linear(lo, hi))
            .collect()
    }

    /// Start and end on the 48-hour line.
    fn span(&self) -> (i32, i32) {
        let start = self.start.minutes() as i32;
        let mut end = self.end.minutes() as i32;
        if end < start {
            end += DAY;
        }
        (start, end)
    }

    fn from_linear(lo: i32, hi: i32) -> Self {
        Self::new(TimeOfDay::from_linear(lo), TimeOfDay::from_linear(hi))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
