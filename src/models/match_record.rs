//! Match records as persisted by the scheduling layer: the engine's read-only input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match an entity occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The opposing side.
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Lifecycle status of a match row, as stored upstream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Cancelled,
}

/// Phase of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundType {
    #[default]
    Groups,
    Knockout,
}

/// Presentation-grade match status: the stored status with an open dispute
/// reported ahead of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPhase {
    Pending,
    InProgress,
    Done,
    Cancelled,
    Disputed,
}

/// A persisted match row. Created by scheduling and mutated by score entry
/// (both out of scope here); this engine only ever reads it.
///
/// `E` is the opaque entity id occupying each side: a pairing id, or a player
/// id in player-ranked formats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord<E> {
    pub id: MatchId,
    pub side_a: Option<E>,
    pub side_b: Option<E>,
    pub status: MatchStatus,
    pub round_type: RoundType,
    /// Free text entered by organizers (e.g. "A Quartos de Final", "Ronda 2").
    pub round_label: Option<String>,
    /// Free text group name; matches without one fall into group "A".
    pub group_label: Option<String>,
    /// Untyped score payload; no schema is guaranteed.
    pub raw_score: Option<Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<E> MatchRecord<E> {
    pub fn new(side_a: Option<E>, side_b: Option<E>, round_type: RoundType) -> Self {
        Self {
            id: Uuid::new_v4(),
            side_a,
            side_b,
            status: MatchStatus::Pending,
            round_type,
            round_label: None,
            group_label: None,
            raw_score: None,
            updated_at: None,
        }
    }

    /// The entity on the given side, if one is assigned.
    pub fn side(&self, side: Side) -> Option<&E> {
        match side {
            Side::A => self.side_a.as_ref(),
            Side::B => self.side_b.as_ref(),
        }
    }
}
