//! Workflow configuration
//!
//! Studio calendar constants and workflow defaults, injected into the
//! engine rather than read from ambient globals. Configuration is stored
//! in `shotflow.toml` (project) and `~/.config/shotflow/config.toml`
//! (global); every field has a default so partial files are fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DependencyTarget, ScheduleModel, TimeUnit};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Studio calendar and workflow defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Default unit for task schedule estimates
    pub default_schedule_unit: TimeUnit,

    /// Default priority for new tasks
    pub default_priority: u32,

    /// Default endpoint gating new dependency edges
    pub default_dependency_target: DependencyTarget,

    /// Default gap between a dependency and its dependent
    pub default_gap_timing: f64,

    /// Unit of the default gap
    pub default_gap_unit: TimeUnit,

    /// Calendar model of the default gap
    pub default_gap_model: ScheduleModel,

    /// Working hours in a studio day
    pub daily_working_hours: u32,

    /// Working days in a studio week
    pub weekly_working_days: u32,

    /// Working hours in a studio week
    pub weekly_working_hours: u32,

    /// Working days in a studio year
    pub yearly_working_days: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_schedule_unit: TimeUnit::Hour,
            default_priority: 500,
            default_dependency_target: DependencyTarget::OnEnd,
            default_gap_timing: 0.0,
            default_gap_unit: TimeUnit::Hour,
            default_gap_model: ScheduleModel::Length,
            daily_working_hours: 9,
            weekly_working_days: 5,
            weekly_working_hours: 45,
            yearly_working_days: 261,
        }
    }
}

impl WorkflowConfig {
    /// Checks the calendar constants for values the conversions cannot
    /// work with
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.daily_working_hours == 0 || self.daily_working_hours > 24 {
            return Err(ConfigError::Invalid(format!(
                "daily_working_hours must be between 1 and 24, got {}",
                self.daily_working_hours
            )));
        }
        if self.weekly_working_days == 0 || self.weekly_working_days > 7 {
            return Err(ConfigError::Invalid(format!(
                "weekly_working_days must be between 1 and 7, got {}",
                self.weekly_working_days
            )));
        }
        if self.weekly_working_hours == 0 || self.weekly_working_hours > 168 {
            return Err(ConfigError::Invalid(format!(
                "weekly_working_hours must be between 1 and 168, got {}",
                self.weekly_working_hours
            )));
        }
        if self.yearly_working_days == 0 || self.yearly_working_days > 366 {
            return Err(ConfigError::Invalid(format!(
                "yearly_working_days must be between 1 and 366, got {}",
                self.yearly_working_days
            )));
        }
        if self.default_gap_timing < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_gap_timing must not be negative, got {}",
                self.default_gap_timing
            )));
        }
        Ok(())
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "shotflow", "shotflow").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Loads configuration from the default locations.
    ///
    /// A project-level `shotflow.toml` in the current directory takes
    /// precedence over the global file; with neither present the studio
    /// defaults apply.
    pub fn load() -> Result<Self> {
        let project = Path::new("shotflow.toml");
        if project.is_file() {
            return Self::from_file(project);
        }

        if let Some(dir) = Self::global_config_dir() {
            let global = dir.join("config.toml");
            if global.is_file() {
                return Self::from_file(&global);
            }
        }

        Ok(Self::default())
    }

    /// Writes the configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
