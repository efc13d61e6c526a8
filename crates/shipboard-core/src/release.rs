use crate::classifier::ClassifyInput;
use crate::error::{Result, ShipboardError};
use crate::schedule::parse_target_date;
use crate::types::ExplicitStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_ticket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Directly responsible individual.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dri_member_id: Option<String>,
    #[serde(default)]
    pub is_platform: bool,
    #[serde(default)]
    pub is_config: bool,
    #[serde(default)]
    pub is_ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

// ---------------------------------------------------------------------------
// MemberReadiness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberReadiness {
    pub member_id: String,
    pub is_ready: bool,
}

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

/// A release as the data service stores it. Fields stay close to the stored
/// shape: `target_date` and `state` are raw text and are only interpreted
/// when the release is classified. Deployed and cancelled are also carried
/// as flags, which take precedence over the `state` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    /// Stored `state` column. Only terminal values act as overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default)]
    pub platform_update: bool,
    #[serde(default)]
    pub config_update: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_deployed: bool,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default)]
    pub member_readiness: Vec<MemberReadiness>,
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_summary: Option<String>,
}

impl Release {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        name: impl Into<String>,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            target_date: Some(target_date.format("%Y-%m-%d").to_string()),
            state: None,
            platform_update: false,
            config_update: false,
            is_archived: false,
            is_deployed: false,
            is_cancelled: false,
            targets: Vec::new(),
            team_ids: Vec::new(),
            member_readiness: Vec::new(),
            features: Vec::new(),
            release_notes: None,
            release_summary: None,
        }
    }

    /// Cancelled flag, then deployed flag, then the `state` column.
    pub fn explicit_status(&self) -> Option<ExplicitStatus> {
        if self.is_cancelled {
            return Some(ExplicitStatus::Cancelled);
        }
        if self.is_deployed {
            return Some(ExplicitStatus::Deployed);
        }
        self.state.as_deref().and_then(ExplicitStatus::from_stored)
    }

    /// `Ok(None)` when no date is stored, `Err(InvalidInput)` when it does not parse.
    pub fn parsed_target_date(&self) -> Result<Option<NaiveDate>> {
        self.target_date
            .as_deref()
            .map(parse_target_date)
            .transpose()
    }

    /// Assemble the classifier input. Readiness and the soonest-upcoming
    /// flag come from cross-record passes the caller has already run.
    pub fn classify_input(
        &self,
        readiness_signal: bool,
        is_soonest_upcoming: Option<bool>,
    ) -> Result<ClassifyInput> {
        Ok(ClassifyInput {
            target_date: self.parsed_target_date()?,
            explicit_status: self.explicit_status(),
            readiness_signal,
            is_soonest_upcoming,
        })
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    /// Set or clear the manual override. Flags and the `state` column are
    /// kept in step so no stale override survives.
    pub fn set_status(&mut self, status: Option<ExplicitStatus>) {
        self.is_cancelled = status == Some(ExplicitStatus::Cancelled);
        self.is_deployed = status == Some(ExplicitStatus::Deployed);
        self.state = match status {
            Some(ExplicitStatus::Deployed) | None => None,
            Some(s) => Some(s.as_str().to_string()),
        };
    }

    pub fn is_member_ready(&self, member_id: &str) -> bool {
        self.member_readiness
            .iter()
            .any(|m| m.member_id == member_id && m.is_ready)
    }

    /// Upsert a member's readiness for this release.
    pub fn set_member_ready(&mut self, member_id: &str, is_ready: bool) {
        match self
            .member_readiness
            .iter_mut()
            .find(|m| m.member_id == member_id)
        {
            Some(entry) => entry.is_ready = is_ready,
            None => self.member_readiness.push(MemberReadiness {
                member_id: member_id.to_string(),
                is_ready,
            }),
        }
    }

    pub fn feature(&self, feature_id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == feature_id)
    }

    pub fn set_feature_ready(&mut self, feature_id: &str, is_ready: bool) -> Result<()> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.id == feature_id)
            .ok_or_else(|| ShipboardError::FeatureNotFound {
                release: self.id.clone(),
                feature: feature_id.to_string(),
            })?;
        feature.is_ready = is_ready;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
