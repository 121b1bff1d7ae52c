//! Heuristic bot detection for the public booking form.
//!
//! The form reports how long it was open and how many clicks/focuses it saw.
//! These numbers come from the client, so they only catch naive scripts: a bot
//! that waits and clicks passes, and a human who pastes everything quickly may
//! not.

use serde::Deserialize;

pub const MIN_FILL_TIME_MS: u64 = 3_000;
pub const MIN_INTERACTIONS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionMetadata {
    pub time_spent_ms: u64,
    pub interaction_count: u32,
}

// `_antiSpam` block as sent by the booking form
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AntiSpamPayload {
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub user_activity: UserActivity,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
pub struct UserActivity {
    #[serde(default)]
    pub clicks: u32,
    #[serde(default)]
    pub focuses: u32,
}

impl From<&AntiSpamPayload> for SubmissionMetadata {
    fn from(payload: &AntiSpamPayload) -> Self {
        Self {
            time_spent_ms: payload.time_spent,
            interaction_count: payload
                .user_activity
                .clicks
                .saturating_add(payload.user_activity.focuses),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Human,
    TooFast,
    TooFewInteractions,
}

impl Verdict {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Verdict::Human)
    }
}

pub fn evaluate_heuristics(metadata: &SubmissionMetadata) -> Verdict {
    if metadata.time_spent_ms < MIN_FILL_TIME_MS {
        return Verdict::TooFast;
    }
    if metadata.interaction_count < MIN_INTERACTIONS {
        return Verdict::TooFewInteractions;
    }
    Verdict::Human
}
