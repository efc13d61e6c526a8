use crate::types::{BadgeVariant, ReleaseState, StateIcon};
use serde::Serialize;

/// Pale background used for archived releases whatever their state.
pub const ARCHIVED_PALE_BACKGROUND: &str = "bg-gray-200";

// ---------------------------------------------------------------------------
// StateStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateStyle {
    pub state: ReleaseState,
    pub label: &'static str,
    pub icon: StateIcon,
    /// Saturated background for full-color surfaces such as calendar chips.
    pub color: &'static str,
    /// Foreground that reads on `color`.
    pub text: &'static str,
    /// Pale background for card headers.
    pub pale_background: &'static str,
    pub icon_color: &'static str,
    pub badge_class: &'static str,
    pub badge_variant: BadgeVariant,
}

impl StateStyle {
    /// Background and foreground together, as calendar items use them.
    pub fn full_color(&self) -> String {
        format!("{} {}", self.color, self.text)
    }

    pub fn pale_background_for(&self, is_archived: bool) -> &'static str {
        if is_archived {
            ARCHIVED_PALE_BACKGROUND
        } else {
            self.pale_background
        }
    }
}

// Indexed in `ReleaseState::all()` order.
static STYLES: [StateStyle; 7] = [
    StateStyle {
        state: ReleaseState::PastDue,
        label: "Past Due",
        icon: StateIcon::WarningTriangle,
        color: "bg-red-500",
        text: "text-white",
        pale_background: "bg-red-50",
        icon_color: "text-red-500",
        badge_class: "bg-red-500 text-white",
        badge_variant: BadgeVariant::Destructive,
    },
    StateStyle {
        state: ReleaseState::Pending,
        label: "Pending",
        icon: StateIcon::Clock,
        color: "bg-yellow-300",
        text: "text-black",
        pale_background: "bg-amber-50",
        icon_color: "text-amber-500",
        badge_class: "bg-amber-400 text-black",
        badge_variant: BadgeVariant::Default,
    },
    StateStyle {
        state: ReleaseState::Next,
        label: "Next",
        icon: StateIcon::CheckCircle,
        color: "bg-green-500",
        text: "text-white",
        pale_background: "bg-green-50",
        icon_color: "text-green-500",
        badge_class: "bg-green-600 text-white",
        badge_variant: BadgeVariant::Default,
    },
    StateStyle {
        state: ReleaseState::Ready,
        label: "Ready",
        icon: StateIcon::CheckCircle,
        color: "bg-emerald-600",
        text: "text-white",
        pale_background: "bg-green-50",
        icon_color: "text-emerald-600",
        badge_class: "bg-emerald-600 text-white",
        badge_variant: BadgeVariant::Default,
    },
    StateStyle {
        state: ReleaseState::Complete,
        label: "Complete",
        icon: StateIcon::CheckCircle,
        color: "bg-blue-600",
        text: "text-white",
        pale_background: "bg-blue-50",
        icon_color: "text-blue-600",
        badge_class: "bg-blue-600 text-white",
        badge_variant: BadgeVariant::Default,
    },
    StateStyle {
        state: ReleaseState::Cancelled,
        label: "Cancelled",
        icon: StateIcon::Calendar,
        color: "bg-gray-500",
        text: "text-white",
        pale_background: "bg-gray-50",
        icon_color: "text-gray-500",
        badge_class: "bg-gray-500 text-white",
        badge_variant: BadgeVariant::Destructive,
    },
    StateStyle {
        state: ReleaseState::Deployed,
        label: "Deployed",
        icon: StateIcon::CheckCircle,
        color: "bg-blue-500",
        text: "text-white",
        pale_background: "bg-blue-50",
        icon_color: "text-blue-500",
        badge_class: "bg-blue-500 text-white",
        badge_variant: BadgeVariant::Default,
    },
];

pub fn style_for(state: ReleaseState) -> &'static StateStyle {
    let idx = match state {
        ReleaseState::PastDue => 0,
        ReleaseState::Pending => 1,
        ReleaseState::Next => 2,
        ReleaseState::Ready => 3,
        ReleaseState::Complete => 4,
        ReleaseState::Cancelled => 5,
        ReleaseState::Deployed => 6,
    };
    &STYLES[idx]
}

/// Look up a style for an untyped state string. Unknown or legacy values get
/// the `pending` entry so rendering never fails.
pub fn style_for_stored(raw: &str) -> &'static StateStyle {
    match ReleaseState::from_stored(raw) {
        Some(state) => style_for(state),
        None => {
            tracing::debug!(raw, "unrecognized release state, using pending style");
            style_for(ReleaseState::Pending)
        }
    }
}

/// Every entry, in `ReleaseState::all()` order.
pub fn all_styles() -> &'static [StateStyle] {
    &STYLES
}

/// `past_due` -> `Past Due`.
pub fn display_label(state_name: &str) -> String {
    state_name
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
