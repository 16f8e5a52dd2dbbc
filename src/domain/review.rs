//! Review records
//!
//! A review is one reviewer's verdict on one task. Reviews created
//! together by a single review request share a `review_number`, forming a
//! round; a round closes when every review in it is finalized or a
//! revision request replaces its open reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::schedule::{ScheduleModel, TimeUnit};
use super::status::ReviewStatus;
use crate::config::WorkflowConfig;

/// One reviewer's verdict within a numbered review round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// The responsible user this review belongs to
    pub reviewer: UserId,

    /// The round this review belongs to; rounds count from 1
    pub review_number: u32,

    /// Verdict state
    #[serde(default)]
    pub status: ReviewStatus,

    /// Reviewer notes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Schedule extension carried when this review requests a revision
    #[serde(default)]
    pub schedule_timing: f64,

    /// Unit of the schedule extension
    #[serde(default)]
    pub schedule_unit: TimeUnit,

    /// When the review was created
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates an open review awaiting the reviewer's verdict
    pub fn new(reviewer: UserId, review_number: u32) -> Self {
        Self {
            reviewer,
            review_number,
            status: ReviewStatus::New,
            description: String::new(),
            schedule_timing: 0.0,
            schedule_unit: TimeUnit::Hour,
            created_at: Utc::now(),
        }
    }

    /// Creates a review that requests a revision, carrying the schedule
    /// extension granted for the extra work
    pub fn revision(
        reviewer: UserId,
        review_number: u32,
        description: impl Into<String>,
        schedule_timing: f64,
        schedule_unit: TimeUnit,
    ) -> Self {
        Self {
            reviewer,
            review_number,
            status: ReviewStatus::RequestedRevision,
            description: description.into(),
            schedule_timing,
            schedule_unit,
            created_at: Utc::now(),
        }
    }

    /// Returns true if this review requests a revision
    pub fn carries_revision(&self) -> bool {
        self.status == ReviewStatus::RequestedRevision
    }

    /// Extension in seconds; revision effort counts as working time
    pub fn schedule_seconds(&self, config: &WorkflowConfig) -> f64 {
        ScheduleModel::Effort.to_seconds(self.schedule_timing, self.schedule_unit, config)
    }
}
