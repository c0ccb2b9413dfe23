//! Data structures for the tournament engine: match records, outcomes,
//! rule sets, standings, brackets.

mod bracket;
mod match_record;
mod outcome;
mod rule_set;
mod standings;

pub use bracket::{BracketPrefix, BracketRef, BracketRound, BracketView};
pub use match_record::{MatchId, MatchPhase, MatchRecord, MatchStatus, RoundType, Side};
pub use outcome::{CanonicalOutcome, ResultType, SetScore};
pub use rule_set::{
    normalize_score_rules, OutcomeKind, PointsTable, RuleSet, ScoreMode, ScoreRules,
    TieBreakRule, TournamentFormat,
};
pub use standings::{EntityId, GroupStandings, StandingsRow, TournamentOverview};
