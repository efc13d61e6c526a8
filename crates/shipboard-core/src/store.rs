use crate::activity::{self, Activity};
use crate::error::{Result, ShipboardError};
use crate::io;
use crate::paths;
use crate::release::Release;
use crate::roster::{Member, Project, Target, Team, Tenant};
use crate::types::ExplicitStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ReleaseStore
// ---------------------------------------------------------------------------

/// The record service releases live in. Each call is a single
/// request/response against the backing data; nothing is cached here.
pub trait ReleaseStore: Send + Sync {
    fn projects(&self) -> Result<Vec<Project>>;
    fn members(&self) -> Result<Vec<Member>>;
    fn targets(&self) -> Result<Vec<Target>>;
    /// Teams, optionally limited to one project.
    fn teams(&self, project_id: Option<&str>) -> Result<Vec<Team>>;
    /// Releases ordered by target date, optionally limited to one project.
    fn releases(&self, project_id: Option<&str>) -> Result<Vec<Release>>;
    fn release(&self, id: &str) -> Result<Release>;
    /// Newest activity first, optionally limited to one project.
    fn recent_activity(&self, project_id: Option<&str>, limit: usize) -> Result<Vec<Activity>>;
    /// Mutators append one activity entry per successful change.
    fn set_status(&mut self, release_id: &str, status: Option<ExplicitStatus>) -> Result<Release>;
    fn set_member_ready(&mut self, release_id: &str, member_id: &str, ready: bool)
        -> Result<Release>;
    fn set_feature_ready(&mut self, release_id: &str, feature_id: &str, ready: bool)
        -> Result<Release>;
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub releases: Vec<Release>,
    /// Append-only.
    #[serde(default)]
    pub activity: Vec<Activity>,
}

impl Snapshot {
    pub fn project(&self, id: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ShipboardError::ProjectNotFound(id.to_string()))
    }

    pub fn tenant_of(&self, project_id: &str) -> Result<&Tenant> {
        let project = self.project(project_id)?;
        self.tenants
            .iter()
            .find(|t| t.id == project.tenant_id)
            .ok_or_else(|| ShipboardError::TenantNotFound(project.tenant_id.clone()))
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    fn release_mut(&mut self, id: &str) -> Result<&mut Release> {
        self.releases
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ShipboardError::ReleaseNotFound(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SnapshotStore
// ---------------------------------------------------------------------------

/// A [`ReleaseStore`] over `.shipboard/snapshot.yaml`. Every mutation is
/// written back atomically before returning.
pub struct SnapshotStore {
    path: PathBuf,
    snapshot: Snapshot,
}

impl SnapshotStore {
    pub fn open(root: &Path) -> Result<Self> {
        let path = paths::snapshot_path(root);
        if !path.exists() {
            return Err(ShipboardError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let snapshot: Snapshot = serde_yaml::from_str(&data)?;
        tracing::debug!(
            path = %path.display(),
            releases = snapshot.releases.len(),
            "loaded snapshot"
        );
        Ok(Self { path, snapshot })
    }

    /// Write an empty snapshot if none exists. Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        let data = serde_yaml::to_string(&Snapshot::default())?;
        io::write_if_missing(&paths::snapshot_path(root), data.as_bytes())
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    fn save(&self) -> Result<()> {
        let data = serde_yaml::to_string(&self.snapshot)?;
        io::atomic_write(&self.path, data.as_bytes())
    }

    /// Apply `f` to one release, log the activity it returns and persist.
    fn update_release<F>(&mut self, release_id: &str, f: F) -> Result<Release>
    where
        F: FnOnce(&mut Release, &[Team], DateTime<Utc>) -> Result<Activity>,
    {
        let teams = self.snapshot.teams.clone();
        let release = self.snapshot.release_mut(release_id)?;
        let mut entry = f(release, &teams, Utc::now())?;
        let updated = release.clone();

        entry.seq = self.snapshot.activity.last().map_or(1, |a| a.seq + 1);
        tracing::debug!(release = %release_id, kind = %entry.kind, seq = entry.seq, "activity");
        self.snapshot.activity.push(entry);
        self.save()?;
        Ok(updated)
    }
}

impl ReleaseStore for SnapshotStore {
    fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.snapshot.projects.clone())
    }

    fn members(&self) -> Result<Vec<Member>> {
        Ok(self.snapshot.members.clone())
    }

    fn targets(&self) -> Result<Vec<Target>> {
        Ok(self.snapshot.targets.clone())
    }

    fn teams(&self, project_id: Option<&str>) -> Result<Vec<Team>> {
        if let Some(id) = project_id {
            self.snapshot.project(id)?;
        }
        Ok(self
            .snapshot
            .teams
            .iter()
            .filter(|t| project_id.map_or(true, |id| t.project_id == id))
            .cloned()
            .collect())
    }

    fn releases(&self, project_id: Option<&str>) -> Result<Vec<Release>> {
        if let Some(id) = project_id {
            self.snapshot.project(id)?;
        }
        let mut releases: Vec<Release> = self
            .snapshot
            .releases
            .iter()
            .filter(|r| project_id.map_or(true, |id| r.project_id == id))
            .cloned()
            .collect();
        // Undated and unparseable rows sort last; stable for equal dates.
        releases.sort_by_key(|r| match r.parsed_target_date() {
            Ok(Some(date)) => (0, Some(date)),
            _ => (1, None),
        });
        Ok(releases)
    }

    fn release(&self, id: &str) -> Result<Release> {
        self.snapshot
            .releases
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ShipboardError::ReleaseNotFound(id.to_string()))
    }

    fn recent_activity(&self, project_id: Option<&str>, limit: usize) -> Result<Vec<Activity>> {
        Ok(activity::recent(&self.snapshot.activity, project_id, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    fn set_status(&mut self, release_id: &str, status: Option<ExplicitStatus>) -> Result<Release> {
        self.update_release(release_id, |release, _, at| {
            release.set_status(status);
            Ok(Activity::state_change(release, at))
        })
    }

    fn set_member_ready(
        &mut self,
        release_id: &str,
        member_id: &str,
        ready: bool,
    ) -> Result<Release> {
        self.update_release(release_id, |release, teams, at| {
            let on_release = crate::readiness::release_members(release, teams).contains(&member_id);
            if !on_release {
                return Err(ShipboardError::MemberNotFound {
                    release: release.id.clone(),
                    member: member_id.to_string(),
                });
            }
            release.set_member_ready(member_id, ready);
            Ok(Activity::member_ready(release, member_id, ready, at))
        })
    }

    fn set_feature_ready(
        &mut self,
        release_id: &str,
        feature_id: &str,
        ready: bool,
    ) -> Result<Release> {
        self.update_release(release_id, |release, _, at| {
            release.set_feature_ready(feature_id, ready)?;
            let feature = release
                .feature(feature_id)
                .ok_or_else(|| ShipboardError::FeatureNotFound {
                    release: release.id.clone(),
                    feature: feature_id.to_string(),
                })?;
            Ok(Activity::feature_ready(release, feature, at))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
