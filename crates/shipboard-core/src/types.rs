use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ReleaseState
// ---------------------------------------------------------------------------

/// Display state of a release. Never stored; recomputed on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseState {
    PastDue,
    Pending,
    Next,
    Ready,
    Complete,
    Cancelled,
    Deployed,
}

impl ReleaseState {
    pub fn all() -> &'static [ReleaseState] {
        &[
            ReleaseState::PastDue,
            ReleaseState::Pending,
            ReleaseState::Next,
            ReleaseState::Ready,
            ReleaseState::Complete,
            ReleaseState::Cancelled,
            ReleaseState::Deployed,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseState::PastDue => "past_due",
            ReleaseState::Pending => "pending",
            ReleaseState::Next => "next",
            ReleaseState::Ready => "ready",
            ReleaseState::Complete => "complete",
            ReleaseState::Cancelled => "cancelled",
            ReleaseState::Deployed => "deployed",
        }
    }

    /// Parse a state string coming from untyped or legacy data.
    ///
    /// Returns `None` for anything outside the closed set; callers at the
    /// rendering boundary fall back to [`ReleaseState::Pending`].
    pub fn from_stored(s: &str) -> Option<ReleaseState> {
        let s = s.trim();
        ReleaseState::all()
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
    }

    /// Terminal states are set by hand and never derived from dates.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReleaseState::Complete | ReleaseState::Cancelled | ReleaseState::Deployed
        )
    }
}

impl fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReleaseState {
    type Err = crate::error::ShipboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReleaseState::from_stored(s)
            .ok_or_else(|| crate::error::ShipboardError::InvalidInput(format!("unknown state '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// ExplicitStatus
// ---------------------------------------------------------------------------

/// A manually set terminal status that bypasses date-based derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplicitStatus {
    Cancelled,
    Complete,
    Deployed,
}

impl ExplicitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExplicitStatus::Cancelled => "cancelled",
            ExplicitStatus::Complete => "complete",
            ExplicitStatus::Deployed => "deployed",
        }
    }

    /// Interpret the stored `state` column. Derived values that older rows
    /// persisted (`pending`, `ready`, `past_due`) are not overrides.
    pub fn from_stored(s: &str) -> Option<ExplicitStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cancelled" => Some(ExplicitStatus::Cancelled),
            "complete" => Some(ExplicitStatus::Complete),
            "deployed" => Some(ExplicitStatus::Deployed),
            _ => None,
        }
    }

    pub fn state(self) -> ReleaseState {
        match self {
            ExplicitStatus::Cancelled => ReleaseState::Cancelled,
            ExplicitStatus::Complete => ReleaseState::Complete,
            ExplicitStatus::Deployed => ReleaseState::Deployed,
        }
    }
}

impl fmt::Display for ExplicitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExplicitStatus {
    type Err = crate::error::ShipboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExplicitStatus::from_stored(s)
            .ok_or_else(|| crate::error::ShipboardError::InvalidStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// StateIcon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateIcon {
    WarningTriangle,
    CheckCircle,
    Clock,
    Calendar,
}

impl StateIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            StateIcon::WarningTriangle => "warning-triangle",
            StateIcon::CheckCircle => "check-circle",
            StateIcon::Clock => "clock",
            StateIcon::Calendar => "calendar",
        }
    }
}

impl fmt::Display for StateIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BadgeVariant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl BadgeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Outline => "outline",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MemberRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    #[default]
    User,
    ReleaseManager,
    Admin,
    Superuser,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberRole::User => "user",
            MemberRole::ReleaseManager => "release_manager",
            MemberRole::Admin => "admin",
            MemberRole::Superuser => "superuser",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn state_roundtrip() {
        for state in ReleaseState::all() {
            assert_eq!(ReleaseState::from_str(state.as_str()).unwrap(), *state);
        }
    }

    #[test]
    fn state_from_stored_rejects_unknown() {
        assert_eq!(ReleaseState::from_stored("archived"), None);
        assert_eq!(ReleaseState::from_stored(""), None);
        assert_eq!(ReleaseState::from_stored(" PAST_DUE "), Some(ReleaseState::PastDue));
    }

    #[test]
    fn explicit_status_ignores_derived_values() {
        assert_eq!(ExplicitStatus::from_stored("pending"), None);
        assert_eq!(ExplicitStatus::from_stored("ready"), None);
        assert_eq!(ExplicitStatus::from_stored("past_due"), None);
        assert_eq!(
            ExplicitStatus::from_stored("Deployed"),
            Some(ExplicitStatus::Deployed)
        );
    }

    #[test]
    fn explicit_status_maps_to_terminal_state() {
        for status in [
            ExplicitStatus::Cancelled,
            ExplicitStatus::Complete,
            ExplicitStatus::Deployed,
        ] {
            assert!(status.state().is_terminal());
            assert_eq!(status.state().as_str(), status.as_str());
        }
    }

    #[test]
    fn icon_serializes_kebab_case() {
        let json = serde_json::to_string(&StateIcon::WarningTriangle).unwrap();
        assert_eq!(json, "\"warning-triangle\"");
    }
}
