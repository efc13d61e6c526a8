use super::Board;
use crate::output::{format_date, format_days, print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use shipboard_core::dashboard::{nag_list, NagKind};
use shipboard_core::schedule::Urgency;
use shipboard_core::store::ReleaseStore;
use std::path::Path;

pub fn run(
    root: &Path,
    project: Option<&str>,
    today: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let board = Board::load(root, project, false, today)?;
    let members = board.store.members().context("failed to list members")?;
    let items = nag_list(
        &board.releases,
        &board.views,
        &board.teams,
        &members,
        board.config.due_soon_days,
    );

    if json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("No pending actions. Everyone is caught up!");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|i| {
            let action = match i.kind {
                NagKind::TeamMember => "mark ready".to_string(),
                NagKind::Dri => format!(
                    "mark feature ready: {}",
                    i.feature_name.as_deref().unwrap_or("?")
                ),
            };
            let due = match i.urgency {
                Urgency::Urgent => format!("{} !", format_days(Some(i.days_remaining))),
                Urgency::Normal => format_days(Some(i.days_remaining)),
            };
            vec![
                i.member_name.clone(),
                i.release_name.clone(),
                format_date(Some(i.target_date)),
                due,
                action,
            ]
        })
        .collect();
    print_table(&["WHO", "RELEASE", "TARGET", "DUE", "ACTION"], &rows);
    Ok(())
}
