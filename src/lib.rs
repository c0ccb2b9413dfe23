//! Padel tournament engine: standings, score resolution, and knockout
//! bracket reconstruction over already-persisted match records.
//!
//! Pure and deterministic: the same `(matches, rule_set, seed)` always
//! produces the same result, so live leaderboards and advancement decisions
//! can be recomputed at will. Malformed or contradictory data never raises —
//! it degrades to outcomes without winners, empty qualifier lists, and a
//! `None` champion.

pub mod logic;
pub mod models;

pub use logic::{
    bracket_prefix, build_bracket_views, build_overview, compute_group,
    compute_group_for_players, compute_standings_by_group,
    compute_standings_by_group_for_players, effective_status, order_rounds, resolve,
    resolve_bracket_refs, resolve_champion, resolve_group_qualifiers, resolve_with_rules,
    round_number, strip_bracket_prefix,
};
pub use models::{
    normalize_score_rules, BracketPrefix, BracketRef, BracketRound, BracketView,
    CanonicalOutcome, EntityId, GroupStandings, MatchId, MatchPhase, MatchRecord, MatchStatus,
    OutcomeKind, PointsTable, ResultType, RoundType, RuleSet, ScoreMode, ScoreRules, SetScore,
    Side, StandingsRow, TieBreakRule, TournamentFormat, TournamentOverview,
};
