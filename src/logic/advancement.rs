//! Advancement resolution: group qualifiers and the knockout champion.
//!
//! Everything here is best-effort for live views: missing or contradictory
//! data degrades to `None`/empty, never an error.

use crate::logic::bracket::{bracket_prefix, strip_bracket_prefix};
use crate::logic::score;
use crate::models::{BracketPrefix, EntityId, MatchRecord, MatchStatus, Side, StandingsRow};

/// Resolve the overall champion from a knockout phase's matches.
///
/// The champion comes from the finished, undisputed match whose stripped
/// round name is `FINAL` and which is not in the consolation "B" bracket —
/// the B draw never produces the overall champion, even when its final is
/// decided first. If several matches qualify (a data anomaly), the most
/// recently updated one wins. `None` until such a final has a resolvable
/// winner.
pub fn resolve_champion<E: EntityId>(knockout_matches: &[MatchRecord<E>]) -> Option<E> {
    let mut candidates: Vec<&MatchRecord<E>> = knockout_matches
        .iter()
        .filter(|m| {
            m.status == MatchStatus::Done
                && !score::dispute_open(m.raw_score.as_ref())
                && bracket_prefix(m.round_label.as_deref()) != BracketPrefix::B
                && m.round_label
                    .as_deref()
                    .map(strip_bracket_prefix)
                    .is_some_and(|name| name.trim().eq_ignore_ascii_case("FINAL"))
        })
        .collect();
    if candidates.len() > 1 {
        log::warn!(
            "{} matches qualify as the deciding final; using the most recently updated",
            candidates.len()
        );
    }
    candidates.sort_by_key(|m| std::cmp::Reverse(m.updated_at));
    let decider = candidates.first()?;

    let outcome = score::resolve(decider.raw_score.as_ref(), decider.status);
    match outcome.winner? {
        Side::A => decider.side_a,
        Side::B => decider.side_b,
    }
}

/// The top `qualify_count` entities of a ranked group table. Returns the
/// whole group when it is smaller than the quota.
pub fn resolve_group_qualifiers<E: EntityId>(
    standings: &[StandingsRow<E>],
    qualify_count: usize,
) -> Vec<E> {
    let mut ranked: Vec<&StandingsRow<E>> = standings.iter().collect();
    ranked.sort_by_key(|row| row.rank);
    ranked
        .into_iter()
        .take(qualify_count)
        .map(|row| row.entity_id)
        .collect()
}
