use crate::output::{print_json, print_table};
use shipboard_core::presentation::all_styles;

pub fn run(json: bool) -> anyhow::Result<()> {
    let styles = all_styles();
    if json {
        return print_json(&styles);
    }

    let rows: Vec<Vec<String>> = styles
        .iter()
        .map(|s| {
            vec![
                s.state.to_string(),
                s.label.to_string(),
                s.icon.to_string(),
                s.full_color(),
                s.pale_background.to_string(),
                s.badge_variant.to_string(),
            ]
        })
        .collect();
    print_table(
        &["STATE", "LABEL", "ICON", "COLORS", "PALE", "BADGE"],
        &rows,
    );
    Ok(())
}
