use super::Board;
use crate::output::{format_date, format_days, print_json, print_table};
use chrono::NaiveDate;
use shipboard_core::evaluate::Outcome;
use std::path::Path;

pub fn run(
    root: &Path,
    project: Option<&str>,
    archived: bool,
    today: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let board = Board::load(root, project, archived, today)?;

    if json {
        return print_json(&serde_json::json!({
            "today": board.today,
            "releases": board.views,
        }));
    }

    if board.views.is_empty() {
        println!("No releases.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = board
        .views
        .iter()
        .map(|v| {
            let state = match &v.outcome {
                Outcome::Classified { style, .. } => style.label.to_string(),
                Outcome::Unclassifiable { .. } => "?".to_string(),
            };
            let name = if v.is_archived {
                format!("{} (archived)", v.name)
            } else {
                v.name.clone()
            };
            vec![
                v.id.clone(),
                name,
                format_date(v.target_date),
                format_days(v.days_until),
                state,
                format!(
                    "{}/{}",
                    v.readiness.ready_features, v.readiness.feature_count
                ),
                format!(
                    "{}/{}",
                    v.readiness.ready_members, v.readiness.total_members
                ),
            ]
        })
        .collect();
    print_table(
        &["ID", "NAME", "TARGET", "DUE", "STATE", "FEATURES", "MEMBERS"],
        &rows,
    );

    for v in &board.views {
        if let Outcome::Unclassifiable { error } = &v.outcome {
            eprintln!("warning: {}: {error}", v.id);
        }
    }
    Ok(())
}
