use super::Board;
use crate::output::{format_date, format_days, print_fields, print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use shipboard_core::dashboard::{DashboardSummary, RECENT_ACTIVITY_LIMIT};
use shipboard_core::presentation::style_for;
use shipboard_core::store::ReleaseStore;
use std::path::Path;

pub fn run(
    root: &Path,
    project: Option<&str>,
    today: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let board = Board::load(root, project, false, today)?;
    let activity = board
        .store
        .recent_activity(board.project.as_deref(), RECENT_ACTIVITY_LIMIT)
        .context("failed to read activity")?;
    let members = board.store.members().context("failed to list members")?;
    let summary = DashboardSummary::build(
        &board.views,
        &board.project_teams(),
        board.config.upcoming_limit,
    )
    .with_activity(activity, &members);

    if json {
        return print_json(&summary);
    }

    println!("As of {}", board.today);
    print_fields(&[
        ("Total releases", summary.total_releases.to_string()),
        ("Active teams", summary.active_teams.to_string()),
        ("Ready", summary.ready_releases.to_string()),
        ("Past due", summary.past_due_releases.to_string()),
    ]);
    if summary.unclassifiable_releases > 0 {
        println!(
            "({} release(s) could not be classified)",
            summary.unclassifiable_releases
        );
    }

    println!("\nUpcoming:");
    if summary.upcoming.is_empty() {
        println!("  No upcoming releases.");
    } else {
        print_upcoming(&summary);
    }

    println!("\nRecent activity:");
    if summary.recent_activity.is_empty() {
        println!("  No recent activity.");
    }
    for a in &summary.recent_activity {
        println!(
            "  {}  {}",
            a.entry.created_at.format("%Y-%m-%d"),
            a.description
        );
    }
    Ok(())
}

fn print_upcoming(summary: &DashboardSummary) {
    let rows: Vec<Vec<String>> = summary
        .upcoming
        .iter()
        .map(|u| {
            vec![
                u.name.clone(),
                format_date(Some(u.target_date)),
                format_days(Some(u.days_until)),
                style_for(u.state).label.to_string(),
            ]
        })
        .collect();
    print_table(&["NAME", "TARGET", "DUE", "STATE"], &rows);
}
