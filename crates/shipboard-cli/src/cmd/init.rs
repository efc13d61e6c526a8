use crate::output::print_json;
use anyhow::Context;
use shipboard_core::{config::Config, paths, store::SnapshotStore};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config_path = paths::config_path(root);
    let config_created = !config_path.exists();
    if config_created {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
    }

    let snapshot_created = SnapshotStore::init(root).context("failed to write snapshot.yaml")?;

    if json {
        return print_json(&serde_json::json!({
            "root": root.display().to_string(),
            "config_created": config_created,
            "snapshot_created": snapshot_created,
        }));
    }

    println!(
        "Initializing shipboard in: {}",
        paths::shipboard_dir(root).display()
    );
    let status = |created: bool| if created { "created:" } else { "exists: " };
    println!("  {} {}", status(config_created), paths::CONFIG_FILE);
    println!("  {} {}", status(snapshot_created), paths::SNAPSHOT_FILE);
    Ok(())
}
