//! Configuration loading for Waypoint.
//!
//! The file lives at `~/.waypoint/config.toml` unless `WAYPOINT_CONFIG` points
//! elsewhere. Every section is optional; resolved settings fill in defaults so
//! downstream crates never see a partially specified value.

use serde::Deserialize;
use std::{env, fmt, path::Path, path::PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "WAYPOINT_CONFIG";

pub const DEFAULT_PROMOTED_NAME_PREFIX: &str = "Design from";
pub const DEFAULT_PROMOTED_TIME_FORMAT: &str = "%-I:%M:%S %p";
pub const DEFAULT_FRESH_NAME_PREFIX: &str = "New Design #";
pub const DEFAULT_ROUTE_PREFIX: &str = "/";

#[derive(Debug, Default, Deserialize)]
pub struct WaypointConfig {
    pub workspace: Option<WorkspaceConfig>,
    pub navigation: Option<NavigationConfig>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config at {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config at {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Naming of workspaces created during reconciliation.
#[derive(Debug, Default, Deserialize)]
pub struct WorkspaceConfig {
    /// Prefix for workspaces promoted from anonymous work. Default: "Design from".
    pub promoted_name_prefix: Option<String>,
    /// chrono format string for the local time appended to promoted names.
    pub promoted_time_format: Option<String>,
    /// Prefix for fresh empty workspaces. Default: "New Design #".
    pub fresh_name_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationConfig {
    /// Path prefix joined with the workspace id. Default: "/".
    pub route_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceNamingSettings {
    pub promoted_prefix: String,
    pub promoted_time_format: String,
    pub fresh_prefix: String,
}

impl Default for WorkspaceNamingSettings {
    fn default() -> Self {
        Self {
            promoted_prefix: DEFAULT_PROMOTED_NAME_PREFIX.to_string(),
            promoted_time_format: DEFAULT_PROMOTED_TIME_FORMAT.to_string(),
            fresh_prefix: DEFAULT_FRESH_NAME_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSettings {
    pub route_prefix: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

impl WaypointConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn naming(&self) -> WorkspaceNamingSettings {
        let defaults = WorkspaceNamingSettings::default();
        let Some(section) = self.workspace.as_ref() else {
            return defaults;
        };
        WorkspaceNamingSettings {
            promoted_prefix: non_blank(section.promoted_name_prefix.as_ref())
                .unwrap_or(defaults.promoted_prefix),
            promoted_time_format: non_blank(section.promoted_time_format.as_ref())
                .unwrap_or(defaults.promoted_time_format),
            // Trailing whitespace is meaningful for a prefix glued to a number.
            fresh_prefix: section
                .fresh_name_prefix
                .clone()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.fresh_prefix),
        }
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationSettings {
        self.navigation
            .as_ref()
            .and_then(|section| non_blank(section.route_prefix.as_ref()))
            .map(|route_prefix| NavigationSettings { route_prefix })
            .unwrap_or_default()
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = env::var(CONFIG_PATH_ENV)
        && !explicit.trim().is_empty()
    {
        return Some(PathBuf::from(explicit));
    }
    dirs::home_dir().map(|home| home.join(".waypoint").join("config.toml"))
}
