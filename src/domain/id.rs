//! Opaque identifiers for tasks and users
//!
//! ID Format:
//! - Task IDs: `t-{7-char-hash}` (e.g., `t-9d3e5f2`)
//! - User IDs: `u-{7-char-hash}` (e.g., `u-4b8a0c1`)
//!
//! Hash is derived from name + creation timestamp, ensuring uniqueness.
//! Same name at different times produces different IDs (by design).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID format: expected 't-{{7-char-hash}}', got '{0}'")]
    InvalidTaskId(String),

    #[error("Invalid user ID format: expected 'u-{{7-char-hash}}', got '{0}'")]
    InvalidUserId(String),
}

/// Generates a 7-character hash from name and timestamp
fn generate_hash(name: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", name, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Validates and extracts the hash portion of a prefixed ID string
fn parse_hash<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let hash = s.trim().strip_prefix(prefix)?;
    if hash.len() == 7 && hash.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hash)
    } else {
        None
    }
}

/// Task ID in the format `t-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId {
    hash: String,
}

impl TaskId {
    /// Creates a new task ID from name and timestamp
    pub fn new(name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(name, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t-{}", self.hash)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_hash(s, "t-") {
            Some(hash) => Ok(Self {
                hash: hash.to_string(),
            }),
            None => Err(IdError::InvalidTaskId(s.to_string())),
        }
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}

/// User ID in the format `u-{7-char-hash}`
///
/// Users double as bookable resources and as reviewers; the workflow
/// addresses both roles through the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId {
    hash: String,
}

impl UserId {
    /// Creates a new user ID from login name and timestamp
    pub fn new(login: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(login, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u-{}", self.hash)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_hash(s, "u-") {
            Some(hash) => Ok(Self {
                hash: hash.to_string(),
            }),
            None => Err(IdError::InvalidUserId(s.to_string())),
        }
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.to_string()
    }
}
