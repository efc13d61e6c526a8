//! One classification pass over a group of releases.
//!
//! Cross-record facts (readiness, the soonest-upcoming set) are computed once
//! per group and then every release is classified independently.

use crate::classifier::Classifier;
use crate::config::NextScope;
use crate::presentation::{style_for, StateStyle};
use crate::readiness::Readiness;
use crate::release::Release;
use crate::roster::{Project, Team};
use crate::schedule::{days_until, DateLabel};
use crate::types::ReleaseState;
use crate::upcoming::soonest_upcoming;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

// ---------------------------------------------------------------------------
// ReleaseView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Classified {
        state: ReleaseState,
        rule: &'static str,
        style: &'static StateStyle,
    },
    /// The release could not be classified; callers render a placeholder.
    Unclassifiable { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseView {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub target_date: Option<NaiveDate>,
    pub days_until: Option<i64>,
    pub date_label: Option<DateLabel>,
    pub is_archived: bool,
    pub is_soonest_upcoming: bool,
    pub readiness: Readiness,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ReleaseView {
    pub fn state(&self) -> Option<ReleaseState> {
        match &self.outcome {
            Outcome::Classified { state, .. } => Some(*state),
            Outcome::Unclassifiable { .. } => None,
        }
    }

    pub fn style(&self) -> Option<&'static StateStyle> {
        match &self.outcome {
            Outcome::Classified { style, .. } => Some(*style),
            Outcome::Unclassifiable { .. } => None,
        }
    }

    pub fn pale_background(&self) -> Option<&'static str> {
        self.style().map(|s| s.pale_background_for(self.is_archived))
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Classify every release in one group. The returned views are in the same
/// order as `releases`. Archived releases are classified but never compete
/// for `next`.
pub fn evaluate_group(releases: &[Release], teams: &[Team], today: NaiveDate) -> Vec<ReleaseView> {
    let classifier = Classifier::default();
    let soonest = soonest_upcoming(releases.iter().filter(|r| !r.is_archived), today);

    releases
        .iter()
        .map(|release| {
            let readiness = Readiness::compute(release, teams);
            let is_soonest = soonest.contains(&release.id);
            let target_date = release.parsed_target_date().ok().flatten();

            let outcome = release
                .classify_input(readiness.readiness_signal(), Some(is_soonest))
                .and_then(|input| classifier.evaluate(&input, today));
            let outcome = match outcome {
                Ok(verdict) => Outcome::Classified {
                    state: verdict.state,
                    rule: verdict.rule,
                    style: style_for(verdict.state),
                },
                Err(e) => {
                    tracing::warn!(release = %release.id, error = %e, "release is unclassifiable");
                    Outcome::Unclassifiable {
                        error: e.to_string(),
                    }
                }
            };

            ReleaseView {
                id: release.id.clone(),
                project_id: release.project_id.clone(),
                name: release.name.clone(),
                target_date,
                days_until: target_date.map(|d| days_until(d, today)),
                date_label: target_date.map(|d| DateLabel::for_date(d, today)),
                is_archived: release.is_archived,
                is_soonest_upcoming: is_soonest,
                readiness,
                outcome,
            }
        })
        .collect()
}

/// Classify releases spanning several projects, competing for `next` within
/// the group `scope` selects. Releases whose project is unknown form a group
/// of their own keyed by project id. Output order follows `releases`.
pub fn evaluate_scoped(
    releases: &[Release],
    teams: &[Team],
    projects: &[Project],
    scope: NextScope,
    today: NaiveDate,
) -> Vec<ReleaseView> {
    let tenant_of: HashMap<&str, &str> = projects
        .iter()
        .map(|p| (p.id.as_str(), p.tenant_id.as_str()))
        .collect();

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, release) in releases.iter().enumerate() {
        let key = match scope {
            NextScope::Project => format!("project:{}", release.project_id),
            NextScope::Tenant => match tenant_of.get(release.project_id.as_str()) {
                Some(tenant) => format!("tenant:{tenant}"),
                None => format!("project:{}", release.project_id),
            },
        };
        groups.entry(key).or_default().push(idx);
    }

    let mut slots: Vec<Option<ReleaseView>> = vec![None; releases.len()];
    for indices in groups.values() {
        let group: Vec<Release> = indices.iter().map(|&i| releases[i].clone()).collect();
        for (view, &idx) in evaluate_group(&group, teams, today).into_iter().zip(indices) {
            slots[idx] = Some(view);
        }
    }
    slots.into_iter().flatten().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
