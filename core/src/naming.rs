//! Display names for workspaces created during reconciliation.
//!
//! Names are cosmetic; nothing in the decision procedure reads them.

use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone};

use waypoint_config::{DEFAULT_PROMOTED_TIME_FORMAT, WorkspaceNamingSettings};

/// Exclusive upper bound of the random suffix on fresh workspace names.
pub const FRESH_SUFFIX_BOUND: u32 = 100_000;

#[derive(Debug, Clone, Default)]
pub struct WorkspaceNamer {
    settings: WorkspaceNamingSettings,
}

impl WorkspaceNamer {
    #[must_use]
    pub fn new(settings: WorkspaceNamingSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &WorkspaceNamingSettings {
        &self.settings
    }

    /// Name for a workspace promoted from anonymous work at `at`.
    #[must_use]
    pub fn promoted_name<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        // A malformed user format string fails at render time; use the default instead.
        let mut time = String::new();
        if write!(time, "{}", at.format(&self.settings.promoted_time_format)).is_err() {
            time = at.format(DEFAULT_PROMOTED_TIME_FORMAT).to_string();
        }
        format!("{} {time}", self.settings.promoted_prefix)
    }

    #[must_use]
    pub fn promoted_name_now(&self) -> String {
        self.promoted_name(&Local::now())
    }

    /// Name for a fresh empty workspace with the given suffix.
    #[must_use]
    pub fn fresh_name(&self, suffix: u32) -> String {
        format!("{}{}", self.settings.fresh_prefix, suffix % FRESH_SUFFIX_BOUND)
    }

    #[must_use]
    pub fn fresh_name_random(&self) -> String {
        self.fresh_name(rand::random::<u32>())
    }
}
