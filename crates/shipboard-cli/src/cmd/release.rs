use super::Board;
use crate::output::{format_date, format_days, print_fields, print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use shipboard_core::evaluate::{Outcome, ReleaseView};
use shipboard_core::readiness::release_members;
use shipboard_core::store::{ReleaseStore, SnapshotStore};
use shipboard_core::types::ExplicitStatus;
use std::path::Path;

#[derive(Subcommand)]
pub enum ReleaseSubcommand {
    /// Show a release with its state, readiness and people
    Show { id: String },

    /// Set or clear the manual status override
    Status {
        id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Mark a team member or a feature as ready
    Ready {
        id: String,
        /// Member to mark
        #[arg(long, conflicts_with = "feature", required_unless_present = "feature")]
        member: Option<String>,
        /// Feature to mark
        #[arg(long)]
        feature: Option<String>,
        /// Mark as not ready instead
        #[arg(long)]
        not: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Cancelled,
    Complete,
    Deployed,
    /// Remove the override and let the date decide
    Clear,
}

impl StatusArg {
    fn explicit(self) -> Option<ExplicitStatus> {
        match self {
            StatusArg::Cancelled => Some(ExplicitStatus::Cancelled),
            StatusArg::Complete => Some(ExplicitStatus::Complete),
            StatusArg::Deployed => Some(ExplicitStatus::Deployed),
            StatusArg::Clear => None,
        }
    }
}

pub fn run(
    root: &Path,
    subcmd: ReleaseSubcommand,
    today: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ReleaseSubcommand::Show { id } => show(root, &id, today, json),
        ReleaseSubcommand::Status { id, status } => {
            let mut store = SnapshotStore::open(root).context("failed to open snapshot")?;
            store
                .set_status(&id, status.explicit())
                .with_context(|| format!("failed to update release {id}"))?;
            report(root, &id, today, json)
        }
        ReleaseSubcommand::Ready {
            id,
            member,
            feature,
            not,
        } => {
            let mut store = SnapshotStore::open(root).context("failed to open snapshot")?;
            let ready = !not;
            if let Some(member) = member {
                store
                    .set_member_ready(&id, &member, ready)
                    .with_context(|| format!("failed to update release {id}"))?;
            } else if let Some(feature) = feature {
                store
                    .set_feature_ready(&id, &feature, ready)
                    .with_context(|| format!("failed to update release {id}"))?;
            }
            report(root, &id, today, json)
        }
    }
}

/// Reload after a write so the printed state reflects it.
fn report(root: &Path, id: &str, today: Option<NaiveDate>, json: bool) -> anyhow::Result<()> {
    let board = Board::load(root, None, true, today)?;
    let view = find_view(&board, id)?;
    if json {
        return print_json(view);
    }
    println!("{}: {}", view.id, state_text(view));
    Ok(())
}

fn find_view<'a>(board: &'a Board, id: &str) -> anyhow::Result<&'a ReleaseView> {
    board
        .view(id)
        .with_context(|| format!("release not found: {id}"))
}

fn state_text(view: &ReleaseView) -> String {
    match &view.outcome {
        Outcome::Classified { style, .. } => style.label.to_string(),
        Outcome::Unclassifiable { error } => format!("unclassifiable ({error})"),
    }
}

fn show(root: &Path, id: &str, today: Option<NaiveDate>, json: bool) -> anyhow::Result<()> {
    let board = Board::load(root, None, true, today)?;
    let release = board
        .store
        .release(id)
        .with_context(|| format!("failed to load release {id}"))?;
    let view = find_view(&board, id)?;
    let members = board.store.members().context("failed to list members")?;
    let release_member_ids = release_members(&release, &board.teams);

    if json {
        return print_json(&serde_json::json!({
            "release": release,
            "view": view,
        }));
    }

    let snapshot = board.store.snapshot();
    let project = match snapshot.tenant_of(&release.project_id) {
        Ok(tenant) => format!(
            "{} / {}",
            tenant.name,
            snapshot.project(&release.project_id)?.name
        ),
        Err(_) => release.project_id.clone(),
    };
    let date_label = view
        .date_label
        .map(|l| l.to_string())
        .unwrap_or_else(|| "Target Date".to_string());
    let mut fields = vec![
        ("Release", format!("{} ({})", release.name, release.id)),
        ("Project", project),
        (date_label.as_str(), format_date(view.target_date)),
        ("Due", format_days(view.days_until)),
        ("State", state_text(view)),
    ];
    if let Some(style) = view.style() {
        fields.push(("Badge", style.badge_variant.to_string()));
        fields.push(("Background", view.pale_background().unwrap_or_default().to_string()));
    }
    if release.is_archived {
        fields.push(("Archived", "yes".to_string()));
    }
    fields.push((
        "Features ready",
        format!("{}/{}", view.readiness.ready_features, view.readiness.feature_count),
    ));
    fields.push((
        "Members ready",
        format!("{}/{}", view.readiness.ready_members, view.readiness.total_members),
    ));
    fields.push((
        "Readiness",
        format!("{:.0}%", view.readiness.fraction() * 100.0),
    ));
    if !release.team_ids.is_empty() {
        let teams: Vec<String> = release
            .team_ids
            .iter()
            .map(|id| match board.teams.iter().find(|t| &t.id == id) {
                Some(t) => format!("{} ({})", t.name, t.member_count()),
                None => format!("{id} (unknown)"),
            })
            .collect();
        fields.push(("Teams", teams.join(", ")));
    }
    if !release.targets.is_empty() {
        let targets = board.store.targets().context("failed to list targets")?;
        let names: Vec<String> = release
            .targets
            .iter()
            .map(|id| {
                targets
                    .iter()
                    .find(|t| &t.id == id)
                    .map(|t| t.short_name.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect();
        fields.push(("Targets", names.join(", ")));
    }
    print_fields(&fields);

    if let Some(summary) = &release.release_summary {
        println!("\nSummary:\n  {summary}");
    }
    if let Some(notes) = &release.release_notes {
        println!("\nNotes:\n  {notes}");
    }

    if !release.features.is_empty() {
        println!("\nFeatures:");
        let rows: Vec<Vec<String>> = release
            .features
            .iter()
            .map(|f| {
                let dri = f
                    .dri_member_id
                    .as_deref()
                    .map(|m| member_name(&members, m))
                    .unwrap_or_else(|| "-".to_string());
                vec![
                    f.id.clone(),
                    f.name.clone(),
                    dri,
                    if f.is_ready { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        print_table(&["ID", "NAME", "DRI", "READY"], &rows);
    }

    if !release_member_ids.is_empty() {
        println!("\nMembers:");
        let rows: Vec<Vec<String>> = release_member_ids
            .iter()
            .map(|m| {
                vec![
                    m.to_string(),
                    member_name(&members, m),
                    if release.is_member_ready(m) { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        print_table(&["ID", "NAME", "READY"], &rows);
    }
    Ok(())
}

fn member_name(members: &[shipboard_core::roster::Member], id: &str) -> String {
    members
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| id.to_string())
}
