//! Canonical match outcome: the normalized form every raw score payload
//! resolves into. Downstream logic only ever looks at this, never at raw JSON.

use crate::models::match_record::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Games won per side in a single set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub games_a: u32,
    pub games_b: u32,
}

impl SetScore {
    pub fn new(games_a: u32, games_b: u32) -> Self {
        Self { games_a, games_b }
    }
}

/// How the match ended.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    /// Played out and decided on the scoreline.
    #[default]
    Normal,
    /// Awarded without play (no-show).
    Walkover,
    Retirement,
    Injury,
    /// A scheduled non-match; credits configured points to the present side.
    ByeNeutral,
}

impl ResultType {
    /// True for results awarded rather than played out.
    pub fn is_awarded(self) -> bool {
        matches!(self, ResultType::Walkover | ResultType::Retirement | ResultType::Injury)
    }
}

/// Normalized outcome of one match.
///
/// Invariants: `winner` is `None` whenever `is_disputed` is true or the match
/// is not `Done`, regardless of the raw payload. For awarded results the
/// winner comes from the payload's explicit winner marker, never inferred
/// from an empty set list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalOutcome {
    pub sets: Vec<SetScore>,
    /// Sets won (a, b). An equal set counts for neither side.
    pub sets_won: (u32, u32),
    pub games_won: (u32, u32),
    pub winner: Option<Side>,
    pub result_type: ResultType,
    pub is_disputed: bool,
    /// True for a decided draw (timed games with draws allowed, or a neutral
    /// bye) — counts toward standings without a winner.
    pub is_draw: bool,
    /// Timed-games marker: the match ended on the buzzer.
    pub ended_by_buzzer: bool,
    pub ended_at: Option<DateTime<Utc>>,
}

impl CanonicalOutcome {
    /// True when one side decisively won.
    pub fn is_decisive(&self) -> bool {
        self.winner.is_some()
    }

    /// True when this outcome contributes to standings: a decisive winner or
    /// an explicit draw. Disputed, in-progress and malformed matches never do.
    pub fn counts_for_standings(&self) -> bool {
        !self.is_disputed && (self.winner.is_some() || self.is_draw)
    }

    /// Games won by the given side.
    pub fn games_for(&self, side: Side) -> u32 {
        match side {
            Side::A => self.games_won.0,
            Side::B => self.games_won.1,
        }
    }

    /// Sets won by the given side.
    pub fn sets_for(&self, side: Side) -> u32 {
        match side {
            Side::A => self.sets_won.0,
            Side::B => self.sets_won.1,
        }
    }
}
