use crate::activity::Activity;
use crate::evaluate::ReleaseView;
use crate::readiness::release_members;
use crate::release::Release;
use crate::roster::{Member, Team};
use crate::schedule::{days_until, Urgency};
use crate::types::{ExplicitStatus, ReleaseState};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// DashboardSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingRelease {
    pub id: String,
    pub name: String,
    pub target_date: NaiveDate,
    pub days_until: i64,
    pub state: ReleaseState,
}

/// How many activity entries the dashboard shows.
pub const RECENT_ACTIVITY_LIMIT: usize = 7;

#[derive(Debug, Clone, Serialize)]
pub struct RecentActivity {
    #[serde(flatten)]
    pub entry: Activity,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_releases: usize,
    pub active_teams: usize,
    pub ready_releases: usize,
    pub past_due_releases: usize,
    pub unclassifiable_releases: usize,
    pub upcoming: Vec<UpcomingRelease>,
    pub recent_activity: Vec<RecentActivity>,
}

impl DashboardSummary {
    /// Counts cover non-archived releases only. `upcoming` lists the first
    /// `upcoming_limit` releases that are still open and not overdue,
    /// soonest first.
    pub fn build(views: &[ReleaseView], teams: &[Team], upcoming_limit: usize) -> Self {
        let live: Vec<&ReleaseView> = views.iter().filter(|v| !v.is_archived).collect();
        let count = |state: ReleaseState| live.iter().filter(|v| v.state() == Some(state)).count();

        let mut upcoming: Vec<UpcomingRelease> = live
            .iter()
            .filter_map(|v| {
                let state = v.state()?;
                if state.is_terminal() || state == ReleaseState::PastDue {
                    return None;
                }
                Some(UpcomingRelease {
                    id: v.id.clone(),
                    name: v.name.clone(),
                    target_date: v.target_date?,
                    days_until: v.days_until?,
                    state,
                })
            })
            .collect();
        upcoming.sort_by_key(|u| u.target_date);
        upcoming.truncate(upcoming_limit);

        Self {
            total_releases: live.len(),
            active_teams: teams.len(),
            ready_releases: count(ReleaseState::Ready),
            past_due_releases: count(ReleaseState::PastDue),
            unclassifiable_releases: live.iter().filter(|v| v.state().is_none()).count(),
            upcoming,
            recent_activity: Vec::new(),
        }
    }

    /// Attach activity entries (newest first) with their rendered text.
    pub fn with_activity(mut self, entries: Vec<Activity>, members: &[Member]) -> Self {
        self.recent_activity = entries
            .into_iter()
            .map(|entry| RecentActivity {
                description: entry.describe(members),
                entry,
            })
            .collect();
        self
    }
}

// ---------------------------------------------------------------------------
// Nag list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NagKind {
    /// A team member who has not marked the release ready.
    TeamMember,
    /// The DRI of a feature that is not ready.
    Dri,
}

#[derive(Debug, Clone, Serialize)]
pub struct NagItem {
    pub kind: NagKind,
    pub release_id: String,
    pub release_name: String,
    pub project_id: String,
    pub member_id: String,
    pub member_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    pub target_date: NaiveDate,
    pub days_remaining: i64,
    pub urgency: Urgency,
}

/// Who still owes action on the releases currently classified `next`.
///
/// `views` must come from an evaluation of `releases`; releases without a
/// matching `next` view are ignored. Members unknown to `members` are listed
/// by id.
pub fn nag_list(
    releases: &[Release],
    views: &[ReleaseView],
    teams: &[Team],
    members: &[Member],
    due_soon_days: i64,
) -> Vec<NagItem> {
    let next: HashMap<&str, &ReleaseView> = views
        .iter()
        .filter(|v| v.state() == Some(ReleaseState::Next))
        .map(|v| (v.id.as_str(), v))
        .collect();
    let name_of = |id: &str| -> String {
        members
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.display_name().to_string())
            .unwrap_or_else(|| id.to_string())
    };

    let mut items = Vec::new();
    for release in releases {
        let Some(view) = next.get(release.id.as_str()) else {
            continue;
        };
        let (Some(target_date), Some(days_remaining)) = (view.target_date, view.days_until) else {
            continue;
        };
        let urgency = Urgency::from_days(days_remaining, due_soon_days);
        let item = |kind, member_id: &str, feature_name: Option<String>| NagItem {
            kind,
            release_id: release.id.clone(),
            release_name: release.name.clone(),
            project_id: release.project_id.clone(),
            member_id: member_id.to_string(),
            member_name: name_of(member_id),
            feature_name,
            target_date,
            days_remaining,
            urgency,
        };

        for member_id in release_members(release, teams) {
            if !release.is_member_ready(member_id) {
                items.push(item(NagKind::TeamMember, member_id, None));
            }
        }
        for feature in release.features.iter().filter(|f| !f.is_ready) {
            if let Some(dri) = feature.dri_member_id.as_deref() {
                items.push(item(NagKind::Dri, dri, Some(feature.name.clone())));
            }
        }
    }

    items.sort_by(|a, b| {
        a.target_date
            .cmp(&b.target_date)
            .then_with(|| a.member_name.cmp(&b.member_name))
    });
    items
}

// ---------------------------------------------------------------------------
// Member milestones
// ---------------------------------------------------------------------------

pub const MILESTONE_LIMIT: usize = 10;

/// Something one member still has to do before a release ships.
#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub kind: NagKind,
    pub release_id: String,
    pub release_name: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    pub target_date: NaiveDate,
    pub days_remaining: i64,
}

/// A member's outstanding items on upcoming releases, soonest first.
///
/// Only live releases count: not archived, not deployed or cancelled, and
/// dated today or later. A not-ready feature the member is DRI for is one
/// item; membership of a release team is another unless the member is
/// already listed as DRI on that release.
pub fn member_milestones(
    releases: &[Release],
    teams: &[Team],
    member_id: &str,
    today: NaiveDate,
    limit: usize,
) -> Vec<Milestone> {
    let mut items = Vec::new();
    for release in releases {
        if release.is_archived
            || matches!(
                release.explicit_status(),
                Some(ExplicitStatus::Deployed | ExplicitStatus::Cancelled)
            )
        {
            continue;
        }
        let target_date = match release.parsed_target_date() {
            Ok(Some(date)) if date >= today => date,
            _ => continue,
        };
        let item = |kind, feature_id: Option<String>, feature_name: Option<String>| Milestone {
            kind,
            release_id: release.id.clone(),
            release_name: release.name.clone(),
            project_id: release.project_id.clone(),
            feature_id,
            feature_name,
            target_date,
            days_remaining: days_until(target_date, today),
        };

        let owned: Vec<Milestone> = release
            .features
            .iter()
            .filter(|f| !f.is_ready && f.dri_member_id.as_deref() == Some(member_id))
            .map(|f| item(NagKind::Dri, Some(f.id.clone()), Some(f.name.clone())))
            .collect();

        let on_team = teams
            .iter()
            .filter(|t| release.team_ids.contains(&t.id))
            .any(|t| t.has_member(member_id));
        if on_team && owned.is_empty() && !release.is_member_ready(member_id) {
            items.push(item(NagKind::TeamMember, None, None));
        }
        items.extend(owned);
    }

    items.sort_by_key(|m| m.target_date);
    items.truncate(limit);
    items
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
