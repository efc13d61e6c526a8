use crate::error::{Result, ShipboardError};
use crate::rules::default_rules;
use crate::types::{ExplicitStatus, ReleaseState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ClassifyInput
// ---------------------------------------------------------------------------

/// The stored facts of one release that classification reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyInput {
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_status: Option<ExplicitStatus>,
    #[serde(default)]
    pub readiness_signal: bool,
    /// Whether this release holds the soonest undecided target date in its
    /// group. Computed across records by [`crate::upcoming::soonest_upcoming`];
    /// `None` means no group context was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_soonest_upcoming: Option<bool>,
}

impl ClassifyInput {
    pub fn new(target_date: NaiveDate) -> Self {
        Self {
            target_date: Some(target_date),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: ExplicitStatus) -> Self {
        self.explicit_status = Some(status);
        self
    }

    pub fn with_readiness(mut self, ready: bool) -> Self {
        self.readiness_signal = ready;
        self
    }

    pub fn with_soonest_upcoming(mut self, soonest: bool) -> Self {
        self.is_soonest_upcoming = Some(soonest);
        self
    }
}

// ---------------------------------------------------------------------------
// EvalContext
// ---------------------------------------------------------------------------

pub struct EvalContext<'a> {
    pub input: &'a ClassifyInput,
    pub target_date: NaiveDate,
    pub today: NaiveDate,
}

// ---------------------------------------------------------------------------
// Verdict (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub state: ReleaseState,
    /// Id of the rule that decided, or `"fallback"`.
    pub rule: &'static str,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A fn-pointer rule. Rules are tried in order; the first whose condition
/// holds decides the state.
pub struct Rule {
    pub id: &'static str,
    pub condition: fn(&EvalContext) -> bool,
    pub state: fn(&EvalContext) -> ReleaseState,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, input: &ClassifyInput, today: NaiveDate) -> Result<Verdict> {
        let target_date = input.target_date.ok_or_else(|| {
            ShipboardError::InvalidInput("release has no target date".to_string())
        })?;

        let ctx = EvalContext {
            input,
            target_date,
            today,
        };

        for rule in &self.rules {
            if (rule.condition)(&ctx) {
                let verdict = Verdict {
                    state: (rule.state)(&ctx),
                    rule: rule.id,
                };
                tracing::debug!(rule = rule.id, state = %verdict.state, %target_date, "classified");
                return Ok(verdict);
            }
        }

        // Fallback: pending, but only once the soonest-upcoming question
        // has actually been answered for this release.
        if input.is_soonest_upcoming.is_none() {
            return Err(ShipboardError::InvalidInput(
                "soonest-upcoming context is required to tell next from pending".to_string(),
            ));
        }
        Ok(Verdict {
            state: ReleaseState::Pending,
            rule: "fallback",
        })
    }

    pub fn classify(&self, input: &ClassifyInput, today: NaiveDate) -> Result<ReleaseState> {
        self.evaluate(input, today).map(|v| v.state)
    }
}

/// Classify with the default rule set.
pub fn classify(input: &ClassifyInput, today: NaiveDate) -> Result<ReleaseState> {
    Classifier::default().classify(input, today)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
