use crate::release::{Feature, Release};
use crate::roster::Member;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ActivityKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    MemberReady,
    FeatureReady,
    ReleaseStateChange,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::MemberReady => "member_ready",
            ActivityKind::FeatureReady => "feature_ready",
            ActivityKind::ReleaseStateChange => "release_state_change",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// One entry of the append-only activity log. Names are copied in at write
/// time so the log still reads after a release or feature is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Sequence number, 1-based, in append order.
    pub seq: u64,
    pub kind: ActivityKind,
    pub release_id: String,
    pub release_name: String,
    pub project_id: String,
    /// The member who acted: the readied member, or the feature's DRI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    /// Readiness value written, for the ready kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ready: Option<bool>,
    /// New override for state changes; `clear` when removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_state: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    fn base(kind: ActivityKind, release: &Release, at: DateTime<Utc>) -> Self {
        Self {
            seq: 0,
            kind,
            release_id: release.id.clone(),
            release_name: release.name.clone(),
            project_id: release.project_id.clone(),
            member_id: None,
            feature_id: None,
            feature_name: None,
            is_ready: None,
            new_state: None,
            created_at: at,
        }
    }

    pub fn member_ready(release: &Release, member_id: &str, ready: bool, at: DateTime<Utc>) -> Self {
        Self {
            member_id: Some(member_id.to_string()),
            is_ready: Some(ready),
            ..Self::base(ActivityKind::MemberReady, release, at)
        }
    }

    pub fn feature_ready(release: &Release, feature: &Feature, at: DateTime<Utc>) -> Self {
        Self {
            member_id: feature.dri_member_id.clone(),
            feature_id: Some(feature.id.clone()),
            feature_name: Some(feature.name.clone()),
            is_ready: Some(feature.is_ready),
            ..Self::base(ActivityKind::FeatureReady, release, at)
        }
    }

    pub fn state_change(release: &Release, at: DateTime<Utc>) -> Self {
        let new_state = release
            .explicit_status()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "clear".to_string());
        Self {
            new_state: Some(new_state),
            ..Self::base(ActivityKind::ReleaseStateChange, release, at)
        }
    }

    /// One-line summary for activity feeds.
    pub fn describe(&self, members: &[Member]) -> String {
        let who = self
            .member_id
            .as_deref()
            .map(|id| {
                members
                    .iter()
                    .find(|m| m.id == id)
                    .map(|m| m.display_name().to_string())
                    .unwrap_or_else(|| id.to_string())
            });
        let marked = if self.is_ready == Some(false) {
            "not ready"
        } else {
            "ready"
        };
        match self.kind {
            ActivityKind::MemberReady => format!(
                "{} marked {marked} for \"{}\"",
                who.as_deref().unwrap_or("A member"),
                self.release_name
            ),
            ActivityKind::FeatureReady => format!(
                "{} marked feature \"{}\" {marked}",
                who.as_deref().unwrap_or("A DRI"),
                self.feature_name.as_deref().unwrap_or("")
            ),
            ActivityKind::ReleaseStateChange => format!(
                "Release \"{}\" state changed to \"{}\"",
                self.release_name,
                self.new_state.as_deref().unwrap_or("")
            ),
        }
    }
}

/// The newest `limit` entries, newest first, optionally for one project.
pub fn recent<'a>(log: &'a [Activity], project_id: Option<&str>, limit: usize) -> Vec<&'a Activity> {
    log.iter()
        .rev()
        .filter(|a| project_id.map_or(true, |id| a.project_id == id))
        .take(limit)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
