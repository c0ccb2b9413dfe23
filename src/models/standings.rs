//! Standings rows and the assembled tournament read model.

use crate::models::bracket::BracketView;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Opaque identifier of a ranked entity: a pairing id, or a player id in
/// player-ranked formats. `Display` feeds the deterministic coin-toss hash.
pub trait EntityId: Copy + Eq + Hash + Ord + fmt::Display {}

impl<T: Copy + Eq + Hash + Ord + fmt::Display> EntityId for T {}

/// One entity's line in a group table. `rank` is assigned 1..N after sorting;
/// two rows never share a rank.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow<E> {
    pub entity_id: E,
    pub rank: u32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub sets_for: u32,
    pub sets_against: u32,
    pub games_for: u32,
    pub games_against: u32,
    pub points: i32,
}

impl<E> StandingsRow<E> {
    pub(crate) fn new(entity_id: E) -> Self {
        Self {
            entity_id,
            rank: 0,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            sets_for: 0,
            sets_against: 0,
            games_for: 0,
            games_against: 0,
            points: 0,
        }
    }

    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_for) - i64::from(self.sets_against)
    }

    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_for) - i64::from(self.games_against)
    }
}

/// A group's ranked table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStandings<E> {
    pub group_label: String,
    pub rows: Vec<StandingsRow<E>>,
}

/// The full derived view of one tournament snapshot: group tables, knockout
/// bracket structure, and the champion once a qualifying final is decided.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentOverview<E> {
    pub groups: Vec<GroupStandings<E>>,
    pub brackets: Vec<BracketView>,
    pub champion: Option<E>,
}
