use crate::release::Release;
use crate::roster::Team;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Members assigned to a release through its teams, deduplicated, in team
/// order. Teams listed on the release but absent from `teams` contribute
/// nothing.
pub fn release_members<'a>(release: &Release, teams: &'a [Team]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut members = Vec::new();
    for team_id in &release.team_ids {
        let Some(team) = teams.iter().find(|t| &t.id == team_id) else {
            tracing::debug!(release = %release.id, team = %team_id, "release references unknown team");
            continue;
        };
        for member_id in &team.member_ids {
            if seen.insert(member_id.as_str()) {
                members.push(member_id.as_str());
            }
        }
    }
    members
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    pub team_count: usize,
    pub feature_count: usize,
    pub ready_features: usize,
    pub total_members: usize,
    pub ready_members: usize,
}

impl Readiness {
    pub fn compute(release: &Release, teams: &[Team]) -> Self {
        let members = release_members(release, teams);
        Self {
            team_count: release.team_ids.len(),
            feature_count: release.features.len(),
            ready_features: release.features.iter().filter(|f| f.is_ready).count(),
            total_members: members.len(),
            ready_members: members
                .iter()
                .filter(|m| release.is_member_ready(m))
                .count(),
        }
    }

    /// True when there is something to be ready and all of it is.
    /// An empty release is not ready.
    pub fn readiness_signal(&self) -> bool {
        let has_work = self.feature_count > 0 || self.total_members > 0;
        has_work
            && self.ready_features == self.feature_count
            && self.ready_members == self.total_members
    }

    /// Ready items over all items, 0.0 for an empty release.
    pub fn fraction(&self) -> f64 {
        let total = self.feature_count + self.total_members;
        if total == 0 {
            return 0.0;
        }
        (self.ready_features + self.ready_members) as f64 / total as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Feature;
    use chrono::NaiveDate;

    fn team(id: &str, members: &[&str]) -> Team {
        Team {
            id: id.to_string(),
            project_id: "p1".to_string(),
            name: id.to_uppercase(),
            description: None,
            member_ids: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn feature(id: &str, ready: bool) -> Feature {
        Feature {
            id: id.to_string(),
            name: id.to_string(),
            jira_ticket: None,
            description: None,
            dri_member_id: None,
            is_platform: false,
            is_config: false,
            is_ready: ready,
            comments: None,
        }
    }

    fn release(team_ids: &[&str]) -> Release {
        let mut r = Release::new("r1", "p1", "R1", NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        r.team_ids = team_ids.iter().map(|t| t.to_string()).collect();
        r
    }

    #[test]
    fn members_are_deduplicated_across_teams() {
        let teams = vec![team("a", &["m1", "m2"]), team("b", &["m2", "m3"])];
        let r = release(&["a", "b"]);
        assert_eq!(release_members(&r, &teams), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn unknown_teams_are_ignored() {
        let teams = vec![team("a", &["m1"])];
        let r = release(&["a", "ghost"]);
        let readiness = Readiness::compute(&r, &teams);
        assert_eq!(readiness.team_count, 2);
        assert_eq!(readiness.total_members, 1);
    }

    #[test]
    fn all_ready_signals_ready() {
        let teams = vec![team("a", &["m1", "m2"])];
        let mut r = release(&["a"]);
        r.features = vec![feature("f1", true)];
        r.set_member_ready("m1", true);
        assert!(!Readiness::compute(&r, &teams).readiness_signal());

        r.set_member_ready("m2", true);
        let readiness = Readiness::compute(&r, &teams);
        assert!(readiness.readiness_signal());
        assert_eq!(readiness.fraction(), 1.0);
    }

    #[test]
    fn readiness_for_non_members_does_not_count() {
        let teams = vec![team("a", &["m1"])];
        let mut r = release(&["a"]);
        r.set_member_ready("outsider", true);
        let readiness = Readiness::compute(&r, &teams);
        assert_eq!(readiness.ready_members, 0);
        assert!(!readiness.readiness_signal());
    }

    #[test]
    fn empty_release_is_not_ready() {
        let readiness = Readiness::compute(&release(&[]), &[]);
        assert_eq!(readiness, Readiness::default());
        assert!(!readiness.readiness_signal());
        assert_eq!(readiness.fraction(), 0.0);
    }

    #[test]
    fn feature_only_release() {
        let mut r = release(&[]);
        r.features = vec![feature("f1", true), feature("f2", false)];
        let readiness = Readiness::compute(&r, &[]);
        assert_eq!(readiness.ready_features, 1);
        assert!(!readiness.readiness_signal());
        assert_eq!(readiness.fraction(), 0.5);
    }
}
