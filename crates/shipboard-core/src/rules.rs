use crate::classifier::{EvalContext, Rule};
use crate::types::ReleaseState;

// ---------------------------------------------------------------------------
// Condition helpers
// ---------------------------------------------------------------------------

fn has_explicit_status(ctx: &EvalContext) -> bool {
    ctx.input.explicit_status.is_some()
}

fn explicit_state(ctx: &EvalContext) -> ReleaseState {
    ctx.input
        .explicit_status
        .map(|s| s.state())
        .unwrap_or(ReleaseState::Pending)
}

// Date-only comparison: the target day itself is still on time.
fn is_overdue(ctx: &EvalContext) -> bool {
    ctx.target_date < ctx.today
}

fn is_ready(ctx: &EvalContext) -> bool {
    ctx.input.readiness_signal
}

fn is_soonest_upcoming(ctx: &EvalContext) -> bool {
    ctx.input.is_soonest_upcoming == Some(true)
}

fn past_due(_: &EvalContext) -> ReleaseState {
    ReleaseState::PastDue
}

fn ready(_: &EvalContext) -> ReleaseState {
    ReleaseState::Ready
}

fn next(_: &EvalContext) -> ReleaseState {
    ReleaseState::Next
}

// ---------------------------------------------------------------------------
// Default rule table
// ---------------------------------------------------------------------------

/// Precedence order, highest first. The classifier's fallback covers
/// `pending`.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "explicit_status",
            condition: has_explicit_status,
            state: explicit_state,
        },
        Rule {
            id: "past_due",
            condition: is_overdue,
            state: past_due,
        },
        Rule {
            id: "ready",
            condition: is_ready,
            state: ready,
        },
        Rule {
            id: "next",
            condition: is_soonest_upcoming,
            state: next,
        },
    ]
}
