#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const TODAY: &str = "2025-01-15";

const SNAPSHOT: &str = r#"
tenants:
  - id: acme
    name: Acme
projects:
  - id: web
    tenant_id: acme
    name: Web
  - id: mobile
    tenant_id: acme
    name: Mobile
members:
  - id: m1
    email: alice@example.com
    full_name: Alice Archer
    nickname: Alice
  - id: m2
    email: bob@example.com
    full_name: Bob
teams:
  - id: t-web
    project_id: web
    name: Web Team
    member_ids: [m1, m2]
releases:
  - id: r-late
    project_id: web
    name: Late
    target_date: "2025-01-10"
  - id: r-next
    project_id: web
    name: Next Up
    target_date: "2025-01-20"
    team_ids: [t-web]
    member_readiness:
      - member_id: m1
        is_ready: true
    features:
      - id: f-api
        name: API
        dri_member_id: m1
  - id: r-later
    project_id: web
    name: Later
    target_date: "2025-02-10"
  - id: r-ready
    project_id: web
    name: Ready One
    target_date: "2025-03-01"
    features:
      - id: f-done
        name: Done
        is_ready: true
  - id: r-cancel
    project_id: web
    name: Cancelled One
    target_date: "2025-01-05"
    state: cancelled
  - id: r-old
    project_id: web
    name: Old
    target_date: "2024-12-01"
    state: complete
    is_archived: true
  - id: r-undated
    project_id: web
    name: Undated
  - id: r-mobile
    project_id: mobile
    name: Mobile Launch
    target_date: "2025-04-01"
"#;

fn shipboard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shipboard").unwrap();
    cmd.current_dir(dir.path())
        .env("SHIPBOARD_ROOT", dir.path())
        .args(["--today", TODAY]);
    cmd
}

fn seeded() -> TempDir {
    let dir = TempDir::new().unwrap();
    shipboard(&dir).arg("init").assert().success();
    std::fs::write(dir.path().join(".shipboard/snapshot.yaml"), SNAPSHOT).unwrap();
    dir
}

fn json(dir: &TempDir, args: &[&str]) -> Value {
    let out = shipboard(dir).arg("--json").args(args).output().unwrap();
    assert!(
        out.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap()
}

fn state_of(dir: &TempDir, id: &str) -> String {
    let listing = json(dir, &["releases", "--archived"]);
    let view = listing["releases"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["id"] == id)
        .unwrap_or_else(|| panic!("{id} missing from listing"))
        .clone();
    view["state"].as_str().unwrap_or("unclassifiable").to_string()
}

// ---------------------------------------------------------------------------
// shipboard init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config_and_snapshot() {
    let dir = TempDir::new().unwrap();
    shipboard(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created:"));

    assert!(dir.path().join(".shipboard/config.yaml").exists());
    assert!(dir.path().join(".shipboard/snapshot.yaml").exists());
}

#[test]
fn init_is_idempotent_and_keeps_data() {
    let dir = seeded();
    shipboard(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:"));

    let data = std::fs::read_to_string(dir.path().join(".shipboard/snapshot.yaml")).unwrap();
    assert!(data.contains("r-next"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    shipboard(&dir)
        .arg("releases")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// shipboard releases
// ---------------------------------------------------------------------------

#[test]
fn releases_are_classified() {
    let dir = seeded();
    assert_eq!(state_of(&dir, "r-late"), "past_due");
    assert_eq!(state_of(&dir, "r-next"), "next");
    assert_eq!(state_of(&dir, "r-later"), "pending");
    assert_eq!(state_of(&dir, "r-ready"), "ready");
    assert_eq!(state_of(&dir, "r-cancel"), "cancelled");
    assert_eq!(state_of(&dir, "r-old"), "complete");
    assert_eq!(state_of(&dir, "r-undated"), "unclassifiable");
}

#[test]
fn next_competes_within_each_project() {
    let dir = seeded();
    assert_eq!(state_of(&dir, "r-mobile"), "next");
}

#[test]
fn tenant_scope_competes_across_projects() {
    let dir = seeded();
    std::fs::write(
        dir.path().join(".shipboard/config.yaml"),
        "version: 1\nnext_scope: tenant\n",
    )
    .unwrap();
    assert_eq!(state_of(&dir, "r-next"), "next");
    assert_eq!(state_of(&dir, "r-mobile"), "pending");
}

#[test]
fn archived_hidden_unless_requested() {
    let dir = seeded();
    shipboard(&dir)
        .arg("releases")
        .assert()
        .success()
        .stdout(predicate::str::contains("r-next"))
        .stdout(predicate::str::contains("r-old").not());

    shipboard(&dir)
        .args(["releases", "--archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old (archived)"));
}

#[test]
fn releases_filter_by_project() {
    let dir = seeded();
    let listing = json(&dir, &["releases", "--project", "mobile"]);
    let ids: Vec<&str> = listing["releases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["r-mobile"]);
}

#[test]
fn unknown_project_is_an_error() {
    let dir = seeded();
    shipboard(&dir)
        .args(["releases", "--project", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project not found: nope"));
}

#[test]
fn unclassifiable_release_warns_on_stderr() {
    let dir = seeded();
    shipboard(&dir)
        .arg("releases")
        .assert()
        .success()
        .stderr(predicate::str::contains("r-undated"));
}

// ---------------------------------------------------------------------------
// shipboard release
// ---------------------------------------------------------------------------

#[test]
fn release_show_text() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "show", "r-next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next Up"))
        .stdout(predicate::str::contains("Target Date"))
        .stdout(predicate::str::contains("5 days"))
        .stdout(predicate::str::contains("Web Team (2)"))
        .stdout(predicate::str::contains("Alice"));
}

#[test]
fn release_show_past_date_reads_as_release_date() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "show", "r-late"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release Date"))
        .stdout(predicate::str::contains("5 days late"))
        .stdout(predicate::str::contains("Past Due"));
}

#[test]
fn release_show_unknown_fails() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "show", "r-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("release not found: r-missing"));
}

#[test]
fn status_override_persists_and_clears() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "status", "r-late", "complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r-late: Complete"));
    assert_eq!(state_of(&dir, "r-late"), "complete");

    shipboard(&dir)
        .args(["release", "status", "r-late", "clear"])
        .assert()
        .success();
    assert_eq!(state_of(&dir, "r-late"), "past_due");
}

#[test]
fn deployed_override_is_reported_verbatim() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "status", "r-later", "deployed"])
        .assert()
        .success();
    assert_eq!(state_of(&dir, "r-later"), "deployed");
}

#[test]
fn override_flags_take_precedence_over_dates() {
    let dir = TempDir::new().unwrap();
    shipboard(&dir).arg("init").assert().success();
    std::fs::write(
        dir.path().join(".shipboard/snapshot.yaml"),
        r#"
projects:
  - id: web
    tenant_id: acme
    name: Web
releases:
  - id: shipped
    project_id: web
    name: Shipped
    target_date: "2025-01-10"
    is_deployed: true
  - id: dropped
    project_id: web
    name: Dropped
    target_date: "2025-01-20"
    is_cancelled: true
  - id: r2
    project_id: web
    name: Second
    target_date: "2025-02-01"
"#,
    )
    .unwrap();

    assert_eq!(state_of(&dir, "shipped"), "deployed");
    assert_eq!(state_of(&dir, "dropped"), "cancelled");
    assert_eq!(state_of(&dir, "r2"), "next");
}

#[test]
fn deployed_status_is_stored_as_flag() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "status", "r-later", "deployed"])
        .assert()
        .success();
    let data = std::fs::read_to_string(dir.path().join(".shipboard/snapshot.yaml")).unwrap();
    assert!(data.contains("is_deployed: true"));

    shipboard(&dir)
        .args(["release", "status", "r-later", "clear"])
        .assert()
        .success();
    assert_eq!(state_of(&dir, "r-later"), "pending");
}

#[test]
fn status_rejects_derived_values() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "status", "r-late", "ready"])
        .assert()
        .failure();
}

#[test]
fn marking_everything_ready_promotes_release() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "ready", "r-next", "--member", "m2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r-next: Next"));

    shipboard(&dir)
        .args(["release", "ready", "r-next", "--feature", "f-api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r-next: Ready"));

    shipboard(&dir)
        .args(["release", "ready", "r-next", "--feature", "f-api", "--not"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r-next: Next"));
}

#[test]
fn ready_rejects_member_outside_release_teams() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "ready", "r-next", "--member", "m9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not on any team"));
}

#[test]
fn ready_rejects_unknown_feature() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "ready", "r-next", "--feature", "f-nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("feature 'f-nope' not found"));
}

// ---------------------------------------------------------------------------
// shipboard dashboard / nag
// ---------------------------------------------------------------------------

#[test]
fn dashboard_counts() {
    let dir = seeded();
    let summary = json(&dir, &["dashboard", "--project", "web"]);
    assert_eq!(summary["total_releases"], 6);
    assert_eq!(summary["active_teams"], 1);
    assert_eq!(summary["ready_releases"], 1);
    assert_eq!(summary["past_due_releases"], 1);
    assert_eq!(summary["unclassifiable_releases"], 1);

    let upcoming: Vec<&str> = summary["upcoming"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(upcoming, vec!["r-next", "r-later", "r-ready"]);
}

#[test]
fn dashboard_respects_upcoming_limit() {
    let dir = seeded();
    std::fs::write(
        dir.path().join(".shipboard/config.yaml"),
        "version: 1\nupcoming_limit: 1\n",
    )
    .unwrap();
    let summary = json(&dir, &["dashboard", "--project", "web"]);
    assert_eq!(summary["upcoming"].as_array().unwrap().len(), 1);
}

#[test]
fn nag_lists_outstanding_people_on_next_release() {
    let dir = seeded();
    let items = json(&dir, &["nag", "--project", "web"]);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["member_name"], "Alice");
    assert_eq!(items[0]["kind"], "dri");
    assert_eq!(items[0]["feature_name"], "API");
    assert_eq!(items[1]["member_name"], "Bob");
    assert_eq!(items[1]["kind"], "team_member");
    assert_eq!(items[1]["days_remaining"], 5);
}

#[test]
fn dashboard_shows_recent_activity() {
    let dir = seeded();
    shipboard(&dir)
        .args(["release", "ready", "r-next", "--member", "m2"])
        .assert()
        .success();
    shipboard(&dir)
        .args(["release", "status", "r-mobile", "cancelled"])
        .assert()
        .success();

    let web = json(&dir, &["dashboard", "--project", "web"]);
    let activity = web["recent_activity"].as_array().unwrap();
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0]["kind"], "member_ready");
    assert_eq!(activity[0]["description"], "Bob marked ready for \"Next Up\"");

    let all = json(&dir, &["dashboard"]);
    assert_eq!(all["recent_activity"][0]["kind"], "release_state_change");

    shipboard(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recent activity:"))
        .stdout(predicate::str::contains("Bob marked ready"));
}

#[test]
fn milestones_for_member() {
    let dir = seeded();
    let dri = json(&dir, &["milestones", "--member", "m1"]);
    let dri = dri.as_array().unwrap();
    assert_eq!(dri.len(), 1);
    assert_eq!(dri[0]["release_id"], "r-next");
    assert_eq!(dri[0]["kind"], "dri");
    assert_eq!(dri[0]["feature_name"], "API");

    let member = json(&dir, &["milestones", "--member", "m2"]);
    assert_eq!(member[0]["kind"], "team_member");
    assert_eq!(member[0]["days_remaining"], 5);

    shipboard(&dir)
        .args(["release", "ready", "r-next", "--member", "m2"])
        .assert()
        .success();
    shipboard(&dir)
        .args(["milestones", "--member", "m2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing outstanding for Bob"));
}

#[test]
fn milestones_unknown_member_fails() {
    let dir = seeded();
    shipboard(&dir)
        .args(["milestones", "--member", "m9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("member not found: m9"));
}

#[test]
fn nag_empty_when_caught_up() {
    let dir = seeded();
    shipboard(&dir)
        .args(["nag", "--project", "mobile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("caught up"));
}

// ---------------------------------------------------------------------------
// shipboard config / states
// ---------------------------------------------------------------------------

#[test]
fn config_validate_default_is_clean() {
    let dir = seeded();
    shipboard(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_fails_on_errors() {
    let dir = seeded();
    std::fs::write(
        dir.path().join(".shipboard/config.yaml"),
        "version: 1\ndue_soon_days: -2\n",
    )
    .unwrap();
    shipboard(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("due_soon_days must not be negative"));
}

#[test]
fn invalid_config_blocks_evaluation() {
    let dir = seeded();
    std::fs::write(
        dir.path().join(".shipboard/config.yaml"),
        "version: 1\ntimezone_offset_hours: 1000\n",
    )
    .unwrap();
    shipboard(&dir)
        .arg("releases")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"))
        .stderr(predicate::str::contains("timezone_offset_hours"));
}

#[test]
fn rust_log_controls_verbosity() {
    let dir = seeded();
    shipboard(&dir)
        .env("RUST_LOG", "debug")
        .arg("releases")
        .assert()
        .success()
        .stderr(predicate::str::contains("classified"));

    shipboard(&dir)
        .env_remove("RUST_LOG")
        .args(["releases", "--project", "mobile"])
        .assert()
        .success()
        .stderr(predicate::str::contains("classified").not());
}

#[test]
fn states_text_shows_full_colors() {
    let dir = TempDir::new().unwrap();
    shipboard(&dir)
        .arg("states")
        .assert()
        .success()
        .stdout(predicate::str::contains("bg-red-500 text-white"));
}

#[test]
fn states_table_lists_every_state() {
    let dir = TempDir::new().unwrap();
    let styles = json(&dir, &["states"]);
    let styles = styles.as_array().unwrap();
    assert_eq!(styles.len(), 7);
    assert_eq!(styles[0]["state"], "past_due");
    assert_eq!(styles[0]["icon"], "warning-triangle");
    assert_eq!(styles[0]["badge_variant"], "destructive");
    assert_eq!(styles[5]["state"], "cancelled");
    assert_eq!(styles[5]["pale_background"], "bg-gray-50");
}
