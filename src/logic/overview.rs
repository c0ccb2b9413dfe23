//! Tournament overview: the whole derived read model from one snapshot.
//!
//! Callers fetch an event's matches in one consistent query and hand them
//! here; the result is plain data ready to serialize for a live view.

use crate::logic::advancement::resolve_champion;
use crate::logic::bracket::build_bracket_views;
use crate::logic::standings::compute_standings_by_group;
use crate::models::{
    EntityId, GroupStandings, MatchRecord, RoundType, RuleSet, TournamentOverview,
};

/// Build the full read model for one tournament snapshot: group tables from
/// the group-stage matches, bracket structure and champion from the knockout
/// matches.
///
/// Pure and deterministic; concurrent callers computing the same snapshot
/// with the same seed agree on every ordering.
pub fn build_overview<E: EntityId>(
    matches: &[MatchRecord<E>],
    rule_set: &RuleSet,
    seed: &str,
) -> TournamentOverview<E> {
    let group_matches: Vec<MatchRecord<E>> = matches
        .iter()
        .filter(|m| m.round_type == RoundType::Groups)
        .cloned()
        .collect();
    let knockout_matches: Vec<MatchRecord<E>> = matches
        .iter()
        .filter(|m| m.round_type == RoundType::Knockout)
        .cloned()
        .collect();

    let groups = compute_standings_by_group(&group_matches, rule_set, seed)
        .into_iter()
        .map(|(group_label, rows)| GroupStandings { group_label, rows })
        .collect();

    TournamentOverview {
        groups,
        brackets: build_bracket_views(&knockout_matches),
        champion: resolve_champion(&knockout_matches),
    }
}
