//! Bracket structure derived from free-text round labels.

use crate::models::match_record::MatchId;
use serde::{Deserialize, Serialize};

/// Which knockout draw a match belongs to. Labels starting with `"A "` or
/// `"B "` (case-sensitive, single space) mark a dual-bracket knockout; the
/// "B" draw is the consolation/secondary one.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketPrefix {
    #[default]
    Single,
    A,
    B,
}

impl BracketPrefix {
    /// The literal label prefix: `""`, `"A "` or `"B "`.
    pub fn as_str(self) -> &'static str {
        match self {
            BracketPrefix::Single => "",
            BracketPrefix::A => "A ",
            BracketPrefix::B => "B ",
        }
    }
}

/// Where a knockout match sits: its bracket, its prefix-stripped round name,
/// and the derived round position (1 = earliest round, increasing toward the
/// final).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRef {
    pub prefix: BracketPrefix,
    pub round_name: String,
    pub round_index: u32,
}

/// One round of a reconstructed bracket: its name, position, and member
/// matches in input order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub name: String,
    pub index: u32,
    pub match_ids: Vec<MatchId>,
}

/// A reconstructed knockout draw: all rounds of one bracket prefix, earliest
/// round first.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub prefix: BracketPrefix,
    pub rounds: Vec<BracketRound>,
}
