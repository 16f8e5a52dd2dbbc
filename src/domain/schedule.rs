//! Schedule units and models
//!
//! Timing values only mean something against the studio calendar (working
//! hours per day, working days per week, ...), so conversions to seconds
//! take the workflow configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::WorkflowConfig;

/// Unit for schedule timings and dependency gaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeUnit {
    #[serde(rename = "min")]
    Minute,

    #[default]
    #[serde(rename = "h")]
    Hour,

    #[serde(rename = "d")]
    Day,

    #[serde(rename = "w")]
    Week,

    #[serde(rename = "m")]
    Month,

    #[serde(rename = "y")]
    Year,
}

impl TimeUnit {
    /// Returns the short unit label
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "h",
            TimeUnit::Day => "d",
            TimeUnit::Week => "w",
            TimeUnit::Month => "m",
            TimeUnit::Year => "y",
        }
    }

    /// Working-time seconds in one unit under the studio calendar
    pub fn working_seconds(&self, config: &WorkflowConfig) -> f64 {
        match self {
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3600.0,
            TimeUnit::Day => f64::from(config.daily_working_hours) * 3600.0,
            TimeUnit::Week => f64::from(config.weekly_working_hours) * 3600.0,
            TimeUnit::Month => 4.0 * f64::from(config.weekly_working_hours) * 3600.0,
            TimeUnit::Year => {
                f64::from(config.yearly_working_days)
                    * f64::from(config.daily_working_hours)
                    * 3600.0
            }
        }
    }

    /// Calendar (wall-clock) seconds in one unit
    pub fn calendar_seconds(&self) -> f64 {
        match self {
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3600.0,
            TimeUnit::Day => 86_400.0,
            TimeUnit::Week => 7.0 * 86_400.0,
            TimeUnit::Month => 30.0 * 86_400.0,
            TimeUnit::Year => 365.0 * 86_400.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a timing value maps onto the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleModel {
    /// Timing is the effort required, in working time
    #[default]
    Effort,

    /// Timing is the span occupied on the schedule, in working time
    Length,

    /// Timing is a wall-clock span, independent of the calendar
    Duration,
}

impl ScheduleModel {
    /// Returns the model label
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleModel::Effort => "effort",
            ScheduleModel::Length => "length",
            ScheduleModel::Duration => "duration",
        }
    }

    /// Seconds represented by `timing` of `unit` under this model
    pub fn to_seconds(&self, timing: f64, unit: TimeUnit, config: &WorkflowConfig) -> f64 {
        match self {
            ScheduleModel::Effort | ScheduleModel::Length => {
                timing * unit.working_seconds(config)
            }
            ScheduleModel::Duration => timing * unit.calendar_seconds(),
        }
    }
}

impl fmt::Display for ScheduleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_seconds_follow_the_studio_calendar() {
        let config = WorkflowConfig::default();

        assert_eq!(TimeUnit::Minute.working_seconds(&config), 60.0);
        assert_eq!(TimeUnit::Hour.working_seconds(&config), 3600.0);
        // 9 working hours per day by default
        assert_eq!(TimeUnit::Day.working_seconds(&config), 9.0 * 3600.0);
        // 45 working hours per week by default
        assert_eq!(TimeUnit::Week.working_seconds(&config), 45.0 * 3600.0);
        assert_eq!(TimeUnit::Month.working_seconds(&config), 4.0 * 45.0 * 3600.0);
        assert_eq!(
            TimeUnit::Year.working_seconds(&config),
            261.0 * 9.0 * 3600.0
        );
    }

    #[test]
    fn calendar_seconds_ignore_the_studio_calendar() {
        assert_eq!(TimeUnit::Day.calendar_seconds(), 86_400.0);
        assert_eq!(TimeUnit::Week.calendar_seconds(), 7.0 * 86_400.0);
    }

    #[test]
    fn effort_and_length_use_working_time() {
        let config = WorkflowConfig::default();

        assert_eq!(
            ScheduleModel::Effort.to_seconds(2.0, TimeUnit::Day, &config),
            2.0 * 9.0 * 3600.0
        );
        assert_eq!(
            ScheduleModel::Length.to_seconds(1.0, TimeUnit::Week, &config),
            45.0 * 3600.0
        );
    }

    #[test]
    fn duration_uses_calendar_time() {
        let config = WorkflowConfig::default();

        assert_eq!(
            ScheduleModel::Duration.to_seconds(2.0, TimeUnit::Day, &config),
            2.0 * 86_400.0
        );
    }

    #[test]
    fn unit_serde_uses_short_labels() {
        let json = serde_json::to_string(&TimeUnit::Minute).unwrap();
        assert_eq!(json, "\"min\"");

        let parsed: TimeUnit = serde_json::from_str("\"w\"").unwrap();
        assert_eq!(parsed, TimeUnit::Week);
    }

    #[test]
    fn model_serde_roundtrip() {
        let json = serde_json::to_string(&ScheduleModel::Length).unwrap();
        let parsed: ScheduleModel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ScheduleModel::Length);
    }
}
