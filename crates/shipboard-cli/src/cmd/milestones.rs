use super::Board;
use crate::output::{format_date, format_days, print_json, print_table};
use chrono::NaiveDate;
use shipboard_core::dashboard::{member_milestones, NagKind, MILESTONE_LIMIT};
use std::path::Path;

pub fn run(
    root: &Path,
    member: &str,
    project: Option<&str>,
    today: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let board = Board::load(root, project, false, today)?;
    let Some(who) = board.store.snapshot().member(member) else {
        anyhow::bail!("member not found: {member}");
    };
    let items = member_milestones(
        &board.releases,
        &board.teams,
        &who.id,
        board.today,
        MILESTONE_LIMIT,
    );

    if json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("Nothing outstanding for {}.", who.display_name());
        return Ok(());
    }

    println!("Upcoming for {}:", who.display_name());
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|m| {
            let action = match m.kind {
                NagKind::TeamMember => "signal ready".to_string(),
                NagKind::Dri => format!(
                    "finish feature: {}",
                    m.feature_name.as_deref().unwrap_or("?")
                ),
            };
            vec![
                m.release_name.clone(),
                format_date(Some(m.target_date)),
                format_days(Some(m.days_remaining)),
                action,
            ]
        })
        .collect();
    print_table(&["RELEASE", "TARGET", "DUE", "ACTION"], &rows);
    Ok(())
}
