//! The two raw configuration strings and how the gate reads them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::parse_configuration;
use crate::rule::RuleSet;
use crate::text::trim_opt;

/// Setting name of the interval list.
pub const INTERVALS_SETTING: &str = "block_access.intervals";
/// Setting name of the exclusion-role group list.
pub const EXCLUDE_ROLES_SETTING: &str = "block_access.exclude_roles";

/// One immutable snapshot of `block_access.intervals` and
/// `block_access.exclude_roles`.
///
/// Both strings are always read from the same snapshot, so a reload can never
/// pair intervals from one configuration with role groups from another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessSettings {
    /// e.g. `mon,tue,wed,thu,fri - 08:00-18:00 ; sat - 08:00-12:00`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervals: Option<String>,
    /// e.g. `postgres, euler ; postgres, bob`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_roles: Option<String>,
}

impl AccessSettings {
    pub fn new(intervals: impl Into<String>, exclude_roles: impl Into<String>) -> Self {
        Self {
            intervals: Some(intervals.into()),
            exclude_roles: Some(exclude_roles.into()),
        }
    }

    /// Enforcement is active only once at least one interval is configured.
    pub fn is_enabled(&self) -> bool {
        trim_opt(self.intervals.as_deref()).is_some()
    }

    /// Parses the snapshot into rules.
    pub fn parse(&self) -> Result<RuleSet> {
        parse_configuration(self.intervals.as_deref(), self.exclude_roles.as_deref())
    }
}

/// Hands out the current settings snapshot.
///
/// Implementations must return a complete snapshot; readers never see a
/// partially replaced one.
pub trait SettingsSource: Send + Sync {
    fn snapshot(&self) -> Arc<AccessSettings>;
}

/// A source that never changes.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(Arc<AccessSettings>);

impl StaticSettings {
    pub fn new(settings: AccessSettings) -> Self {
        Self(Arc::new(settings))
    }
}

impl SettingsSource for StaticSettings {
    fn snapshot(&self) -> Arc<AccessSettings> {
        Arc::clone(&self.0)
    }
}
