//! Group standings: accumulate resolved outcomes per entity and rank by the
//! tie-break chain.
//!
//! The same aggregation ranks pairings or individual players; the player
//! variants map each side's pairing id onto its player ids first and feed the
//! identical core.

use crate::logic::score;
use crate::models::{
    CanonicalOutcome, EntityId, MatchRecord, MatchStatus, OutcomeKind, ResultType, RuleSet,
    Side, StandingsRow, TieBreakRule,
};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Matches with no group label fall into this group.
const DEFAULT_GROUP: &str = "A";

/// Compute one group's ranked table.
///
/// Every entity referenced by any match gets a row, so a group with no
/// decisive match still ranks (stably, via the coin toss) rather than
/// arbitrarily. Matches without a countable outcome are skipped.
///
/// Deterministic: the same `(matches, rule_set, seed)` always yields the
/// same rows in the same order.
pub fn compute_group<E: EntityId>(
    matches: &[MatchRecord<E>],
    rule_set: &RuleSet,
    seed: &str,
) -> Vec<StandingsRow<E>> {
    let refs: Vec<&MatchRecord<E>> = matches.iter().collect();
    compute_for_sides(&refs, &|side| side.into_iter().collect(), rule_set, seed)
}

/// Player-ranked variant (americano/mexicano): each side's pairing id is
/// mapped onto its player ids and every player is credited individually.
/// Pairings missing from the lookup contribute no players.
pub fn compute_group_for_players<E: EntityId>(
    matches: &[MatchRecord<E>],
    pairing_players: &HashMap<E, Vec<E>>,
    rule_set: &RuleSet,
    seed: &str,
) -> Vec<StandingsRow<E>> {
    let refs: Vec<&MatchRecord<E>> = matches.iter().collect();
    compute_for_sides(
        &refs,
        &|side| {
            side.and_then(|pairing| pairing_players.get(&pairing).cloned())
                .unwrap_or_default()
        },
        rule_set,
        seed,
    )
}

/// Partition a phase's matches by group label and compute each group.
///
/// Each group gets a seed of its own, `"{seed}:{label}"` (or
/// `"draw:{label}"` when no seed was provided), so different groups draw
/// independent coin-toss orders.
pub fn compute_standings_by_group<E: EntityId>(
    matches: &[MatchRecord<E>],
    rule_set: &RuleSet,
    seed: &str,
) -> BTreeMap<String, Vec<StandingsRow<E>>> {
    by_group(matches)
        .into_iter()
        .map(|(label, group_matches)| {
            let group_seed = group_seed(seed, &label);
            let rows = compute_for_sides(
                &group_matches,
                &|side| side.into_iter().collect(),
                rule_set,
                &group_seed,
            );
            (label, rows)
        })
        .collect()
}

/// Player-ranked variant of [`compute_standings_by_group`].
pub fn compute_standings_by_group_for_players<E: EntityId>(
    matches: &[MatchRecord<E>],
    pairing_players: &HashMap<E, Vec<E>>,
    rule_set: &RuleSet,
    seed: &str,
) -> BTreeMap<String, Vec<StandingsRow<E>>> {
    by_group(matches)
        .into_iter()
        .map(|(label, group_matches)| {
            let group_seed = group_seed(seed, &label);
            let rows = compute_for_sides(
                &group_matches,
                &|side| {
                    side.and_then(|pairing| pairing_players.get(&pairing).cloned())
                        .unwrap_or_default()
                },
                rule_set,
                &group_seed,
            );
            (label, rows)
        })
        .collect()
}

fn by_group<E: EntityId>(matches: &[MatchRecord<E>]) -> BTreeMap<String, Vec<&MatchRecord<E>>> {
    let mut groups: BTreeMap<String, Vec<&MatchRecord<E>>> = BTreeMap::new();
    for m in matches {
        let label = m
            .group_label
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_GROUP)
            .to_owned();
        groups.entry(label).or_default().push(m);
    }
    groups
}

fn group_seed(seed: &str, label: &str) -> String {
    if seed.is_empty() {
        format!("draw:{label}")
    } else {
        format!("{seed}:{label}")
    }
}

/// The shared aggregation core. `resolve_side` maps a stored side id to the
/// entities credited for it (the id itself, or its players).
fn compute_for_sides<E: EntityId>(
    matches: &[&MatchRecord<E>],
    resolve_side: &dyn Fn(Option<E>) -> Vec<E>,
    rule_set: &RuleSet,
    seed: &str,
) -> Vec<StandingsRow<E>> {
    let mut rows: HashMap<E, StandingsRow<E>> = HashMap::new();
    // Net direct wins of the smaller entity id over the larger, per pair.
    let mut head_to_head: HashMap<(E, E), i32> = HashMap::new();

    for m in matches {
        let side_a = resolve_side(m.side_a);
        let side_b = resolve_side(m.side_b);
        for &entity in side_a.iter().chain(side_b.iter()) {
            rows.entry(entity).or_insert_with(|| StandingsRow::new(entity));
        }
        if m.status != MatchStatus::Done {
            continue;
        }
        let outcome = score::resolve(m.raw_score.as_ref(), m.status);
        if !outcome.counts_for_standings() {
            continue;
        }
        apply_outcome(
            &mut rows,
            &mut head_to_head,
            &side_a,
            &side_b,
            &outcome,
            rule_set,
        );
    }

    let rules = rule_set.tie_break_rules();
    debug_assert!(rules.last() == Some(&TieBreakRule::CoinToss));

    let mut table: Vec<StandingsRow<E>> = rows.into_values().collect();
    table.sort_by(|a, b| compare_rows(a, b, rules, &head_to_head, seed));
    for (idx, row) in table.iter_mut().enumerate() {
        row.rank = idx as u32 + 1;
    }
    table
}

fn apply_outcome<E: EntityId>(
    rows: &mut HashMap<E, StandingsRow<E>>,
    head_to_head: &mut HashMap<(E, E), i32>,
    side_a: &[E],
    side_b: &[E],
    outcome: &CanonicalOutcome,
    rule_set: &RuleSet,
) {
    let table = &rule_set.points_table;

    if outcome.result_type == ResultType::ByeNeutral {
        // Only the present side is credited for a bye.
        let present = if !side_a.is_empty() { side_a } else { side_b };
        for &entity in present {
            let row = rows.entry(entity).or_insert_with(|| StandingsRow::new(entity));
            row.points += table.points_for(OutcomeKind::ByeNeutral);
            row.drawn += 1;
            row.played += 1;
        }
        return;
    }

    let (sets_a, sets_b) = outcome.sets_won;
    let (games_a, games_b) = outcome.games_won;
    for &entity in side_a {
        let row = rows.entry(entity).or_insert_with(|| StandingsRow::new(entity));
        row.played += 1;
        row.sets_for += sets_a;
        row.sets_against += sets_b;
        row.games_for += games_a;
        row.games_against += games_b;
    }
    for &entity in side_b {
        let row = rows.entry(entity).or_insert_with(|| StandingsRow::new(entity));
        row.played += 1;
        row.sets_for += sets_b;
        row.sets_against += sets_a;
        row.games_for += games_b;
        row.games_against += games_a;
    }

    let Some(winner) = outcome.winner else {
        // Counted without a winner means an explicit draw.
        for &entity in side_a.iter().chain(side_b.iter()) {
            let row = rows.entry(entity).or_insert_with(|| StandingsRow::new(entity));
            row.points += table.points_for(OutcomeKind::Draw);
            row.drawn += 1;
        }
        return;
    };

    let (win_kind, loss_kind) = if outcome.result_type.is_awarded() {
        (OutcomeKind::WalkoverWin, OutcomeKind::WalkoverLoss)
    } else {
        (OutcomeKind::Win, OutcomeKind::Loss)
    };
    let (winners, losers) = match winner {
        Side::A => (side_a, side_b),
        Side::B => (side_b, side_a),
    };
    for &entity in winners {
        let row = rows.entry(entity).or_insert_with(|| StandingsRow::new(entity));
        row.points += table.points_for(win_kind);
        row.won += 1;
    }
    for &entity in losers {
        let row = rows.entry(entity).or_insert_with(|| StandingsRow::new(entity));
        row.points += table.points_for(loss_kind);
        row.lost += 1;
    }

    for &a in side_a {
        for &b in side_b {
            if a == b {
                continue;
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            let lo_won = (winner == Side::A) == (lo == a);
            *head_to_head.entry((lo, hi)).or_insert(0) += if lo_won { 1 } else { -1 };
        }
    }
}

/// Apply the tie-break chain rule by rule; each rule either strictly orders
/// the two rows or falls through to the next.
fn compare_rows<E: EntityId>(
    a: &StandingsRow<E>,
    b: &StandingsRow<E>,
    rules: &[TieBreakRule],
    head_to_head: &HashMap<(E, E), i32>,
    seed: &str,
) -> Ordering {
    for rule in rules {
        let ord = match rule {
            TieBreakRule::Points => b.points.cmp(&a.points),
            TieBreakRule::Wins => b.won.cmp(&a.won),
            TieBreakRule::SetDifference => b.set_difference().cmp(&a.set_difference()),
            TieBreakRule::GameDifference => b.game_difference().cmp(&a.game_difference()),
            TieBreakRule::GamesFor => b.games_for.cmp(&a.games_for),
            TieBreakRule::HeadToHead => {
                head_to_head_order(a.entity_id, b.entity_id, head_to_head)
            }
            TieBreakRule::CoinToss => {
                draw_order_value(seed, a.entity_id).cmp(&draw_order_value(seed, b.entity_id))
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    // Only reachable on a coin-toss hash collision; keep the order total.
    b.sets_for
        .cmp(&a.sets_for)
        .then_with(|| b.games_for.cmp(&a.games_for))
        .then_with(|| a.entity_id.cmp(&b.entity_id))
}

/// Direct-meeting order: whoever leads the pair's net head-to-head score
/// ranks first; level or never met falls through.
fn head_to_head_order<E: EntityId>(a: E, b: E, head_to_head: &HashMap<(E, E), i32>) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let net = head_to_head.get(&(lo, hi)).copied().unwrap_or(0);
    if net == 0 {
        return Ordering::Equal;
    }
    if (net > 0) == (a == lo) {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Stable pseudo-random draw position: the first 48 bits of
/// `sha256("{seed}:{entity}")`. A pure hash rather than a PRNG, so the same
/// seed always reproduces the same order with no state carried across calls.
fn draw_order_value<E: EntityId>(seed: &str, entity: E) -> u64 {
    let digest = Sha256::digest(format!("{seed}:{entity}").as_bytes());
    digest[..6]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}
