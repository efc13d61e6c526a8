pub mod config;
pub mod dashboard;
pub mod init;
pub mod milestones;
pub mod nag;
pub mod release;
pub mod releases;
pub mod states;

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use shipboard_core::config::{Config, WarnLevel};
use shipboard_core::evaluate::{evaluate_scoped, ReleaseView};
use shipboard_core::release::Release;
use shipboard_core::roster::Team;
use shipboard_core::store::{ReleaseStore, SnapshotStore};
use std::path::Path;

/// The evaluation date: `--today` when given, otherwise the wall clock
/// shifted by the configured UTC offset.
pub fn resolve_today(explicit: Option<NaiveDate>, config: &Config) -> NaiveDate {
    explicit.unwrap_or_else(|| {
        (Utc::now() + Duration::hours(i64::from(config.timezone_offset_hours))).date_naive()
    })
}

/// Refuse to evaluate with a config that has errors; warnings are logged.
fn check_config(config: &Config) -> anyhow::Result<()> {
    let warnings = config.validate();
    for w in warnings.iter().filter(|w| w.level == WarnLevel::Warning) {
        tracing::warn!("config: {}", w.message);
    }
    if let Some(err) = warnings.iter().find(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("invalid config: {} (see 'shipboard config validate')", err.message);
    }
    Ok(())
}

/// Everything one classification pass produced, kept together so commands
/// can reach the stored records behind each view.
pub struct Board {
    pub config: Config,
    pub store: SnapshotStore,
    pub today: NaiveDate,
    pub project: Option<String>,
    pub releases: Vec<Release>,
    /// Every team in the store; releases may draw on teams of any project.
    pub teams: Vec<Team>,
    pub views: Vec<ReleaseView>,
}

impl Board {
    pub fn load(
        root: &Path,
        project: Option<&str>,
        include_archived: bool,
        today: Option<NaiveDate>,
    ) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load config")?;
        check_config(&config)?;
        let store = SnapshotStore::open(root).context("failed to open snapshot")?;
        let today = resolve_today(today, &config);

        // Competition for `next` may span projects, so evaluate the whole
        // store and filter afterwards.
        let all = store.releases(None).context("failed to list releases")?;
        let teams = store.teams(None).context("failed to list teams")?;
        let projects = store.projects().context("failed to list projects")?;
        if let Some(id) = project {
            if !projects.iter().any(|p| p.id == id) {
                anyhow::bail!("project not found: {id}");
            }
        }
        let views = evaluate_scoped(&all, &teams, &projects, config.next_scope, today);

        let show_archived = include_archived || config.include_archived;
        let keep = |r: &Release| {
            project.map_or(true, |id| r.project_id == id) && (show_archived || !r.is_archived)
        };
        let (releases, views): (Vec<Release>, Vec<ReleaseView>) = all
            .into_iter()
            .zip(views)
            .filter(|(r, _)| keep(r))
            .unzip();
        tracing::debug!(%today, releases = releases.len(), "board evaluated");
        Ok(Self {
            config,
            store,
            today,
            project: project.map(String::from),
            releases,
            teams,
            views,
        })
    }

    /// Teams belonging to the selected project, or all of them.
    pub fn project_teams(&self) -> Vec<Team> {
        self.teams
            .iter()
            .filter(|t| self.project.as_deref().map_or(true, |id| t.project_id == id))
            .cloned()
            .collect()
    }

    pub fn view(&self, release_id: &str) -> Option<&ReleaseView> {
        self.views.iter().find(|v| v.id == release_id)
    }
}
