use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// NextScope
// ---------------------------------------------------------------------------

/// Which releases compete for `next`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextScope {
    #[default]
    Project,
    Tenant,
}

impl fmt::Display for NextScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextScope::Project => f.write_str("project"),
            NextScope::Tenant => f.write_str("tenant"),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub next_scope: NextScope,
    /// Not-ready members and features turn urgent below this many days.
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
    #[serde(default)]
    pub include_archived: bool,
    /// Offset from UTC used when deriving "today" from the wall clock.
    #[serde(default)]
    pub timezone_offset_hours: i32,
}

fn default_version() -> u32 {
    1
}

fn default_due_soon_days() -> i64 {
    3
}

fn default_upcoming_limit() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            next_scope: NextScope::default(),
            due_soon_days: default_due_soon_days(),
            upcoming_limit: default_upcoming_limit(),
            include_archived: false,
            timezone_offset_hours: 0,
        }
    }
}

impl Config {
    /// Load `.shipboard/config.yaml`, or defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != 1 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("unsupported config version {}", self.version),
            });
        }

        if self.due_soon_days < 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("due_soon_days must not be negative (got {})", self.due_soon_days),
            });
        } else if self.due_soon_days > 60 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "due_soon_days={} marks nearly everything urgent",
                    self.due_soon_days
                ),
            });
        }

        if self.upcoming_limit == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "upcoming_limit is 0; the dashboard will list no upcoming releases"
                    .to_string(),
            });
        }

        if !(-12..=14).contains(&self.timezone_offset_hours) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "timezone_offset_hours={} is outside -12..=14",
                    self.timezone_offset_hours
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
