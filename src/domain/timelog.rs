//! Time log records
//!
//! A time log is an immutable record of effort spent by one resource on
//! one leaf task. Logs are created through the workflow and never edited
//! afterwards; schedule accounting sums over them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::UserId;

#[derive(Debug, Error, PartialEq)]
pub enum TimeLogError {
    #[error("A time log must end after it starts")]
    EndNotAfterStart,
}

/// Effort logged by a resource over a time interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLog {
    /// The resource the effort belongs to
    pub resource: UserId,

    /// Interval start
    pub start: DateTime<Utc>,

    /// Interval end, strictly after `start`
    pub end: DateTime<Utc>,
}

impl TimeLog {
    /// Creates a time log; the interval must have positive length
    pub fn new(
        resource: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, TimeLogError> {
        if end <= start {
            return Err(TimeLogError::EndNotAfterStart);
        }

        Ok(Self {
            resource,
            start,
            end,
        })
    }

    /// Logged duration in seconds
    pub fn seconds(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64
    }
}
