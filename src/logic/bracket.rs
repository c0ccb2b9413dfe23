//! Bracket label parsing: round labels are free text entered by organizers
//! (or emitted by draw generation) with no fixed vocabulary.
//!
//! Round ordering is a heuristic: rounds with more matches came earlier, and
//! count ties fall back to a keyword priority table, then lexical order.
//! Byes can skew first-round counts, so unusual draws may misorder; an
//! explicit round-number column upstream would make this exact.

use crate::models::{BracketPrefix, BracketRef, BracketRound, BracketView, MatchId, MatchRecord};
use std::collections::HashMap;

/// Matches with no round label are grouped under this name.
const UNLABELED_ROUND: &str = "?";

/// Detect the bracket a label belongs to: `"A "`/`"B "` prefixes
/// (case-sensitive, single space) mark a dual-bracket draw.
pub fn bracket_prefix(label: Option<&str>) -> BracketPrefix {
    match label {
        Some(l) if l.starts_with("A ") => BracketPrefix::A,
        Some(l) if l.starts_with("B ") => BracketPrefix::B,
        _ => BracketPrefix::Single,
    }
}

/// The round name with any bracket prefix removed.
pub fn strip_bracket_prefix(label: &str) -> &str {
    label
        .strip_prefix("A ")
        .or_else(|| label.strip_prefix("B "))
        .unwrap_or(label)
}

/// First integer embedded in a label (`"Ronda 2"` → 2), if any.
pub fn round_number(label: &str) -> Option<u32> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Order the distinct (prefix-stripped) round names of a bracket, earliest
/// round first: more matches means an earlier round, count ties break by the
/// keyword priority table, unknown names sort lexically at the end.
///
/// Callers working with a dual bracket should pass one prefix's matches at a
/// time; mixed prefixes are merged by stripped name.
pub fn order_rounds<E>(matches: &[MatchRecord<E>]) -> Vec<String> {
    order_round_labels(matches.iter().map(|m| m.round_label.as_deref()))
}

fn order_round_labels<'a>(labels: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for label in labels {
        let name = label
            .map(strip_bracket_prefix)
            .unwrap_or(UNLABELED_ROUND)
            .to_owned();
        if !counts.contains_key(&name) {
            names.push(name.clone());
        }
        *counts.entry(name).or_insert(0) += 1;
    }
    names.sort_by(|a, b| {
        counts[b]
            .cmp(&counts[a])
            .then_with(|| round_priority(a).cmp(&round_priority(b)))
            .then_with(|| a.cmp(b))
    });
    names
}

/// Derive every knockout match's bracket position: matches are grouped by
/// prefix, each bracket's rounds ordered, and `round_index` assigned 1..N.
/// Matches without a label share the `"?"` round.
pub fn resolve_bracket_refs<E>(matches: &[MatchRecord<E>]) -> HashMap<MatchId, BracketRef> {
    let mut refs = HashMap::new();
    for view in build_bracket_views(matches) {
        for round in view.rounds {
            for match_id in round.match_ids {
                refs.insert(
                    match_id,
                    BracketRef {
                        prefix: view.prefix,
                        round_name: round.name.clone(),
                        round_index: round.index,
                    },
                );
            }
        }
    }
    refs
}

/// Reconstruct the bracket structure of a knockout phase: one view per
/// bracket prefix present (single draw first, then A, then B), each with its
/// rounds ordered earliest-first and member matches in input order.
pub fn build_bracket_views<E>(matches: &[MatchRecord<E>]) -> Vec<BracketView> {
    [BracketPrefix::Single, BracketPrefix::A, BracketPrefix::B]
        .into_iter()
        .filter_map(|prefix| {
            let bracket_matches: Vec<&MatchRecord<E>> = matches
                .iter()
                .filter(|m| bracket_prefix(m.round_label.as_deref()) == prefix)
                .collect();
            if bracket_matches.is_empty() {
                return None;
            }
            Some(BracketView {
                prefix,
                rounds: bracket_rounds(&bracket_matches, prefix),
            })
        })
        .collect()
}

fn bracket_rounds<E>(matches: &[&MatchRecord<E>], prefix: BracketPrefix) -> Vec<BracketRound> {
    debug_assert!(matches
        .iter()
        .all(|m| bracket_prefix(m.round_label.as_deref()) == prefix));
    order_round_labels(matches.iter().map(|m| m.round_label.as_deref()))
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let match_ids = matches
                .iter()
                .filter(|m| {
                    m.round_label
                        .as_deref()
                        .map(strip_bracket_prefix)
                        .unwrap_or(UNLABELED_ROUND)
                        == name
                })
                .map(|m| m.id)
                .collect();
            BracketRound {
                name,
                index: idx as u32 + 1,
                match_ids,
            }
        })
        .collect()
}

/// Position of a round name in the canonical progression. Lower comes
/// earlier. Sized rounds (`R16`, `R8`) order by size; grand-final labels from
/// double elimination sort after the final, the reset after the grand final;
/// loser rounds (`L1`, `L2`) order by their number; anything unrecognized
/// sorts last and falls back to lexical order.
fn round_priority(name: &str) -> (u8, i64) {
    let n = name.trim().to_ascii_uppercase();
    if let Some(size) = n.strip_prefix('R').and_then(|rest| rest.parse::<i64>().ok()) {
        return (0, -size);
    }
    if n.contains("OITAVOS") {
        return (1, 0);
    }
    if n.contains("QUARTOS") || n.contains("QUARTER") {
        return (2, 0);
    }
    if n.contains("MEIAS") || n.contains("SEMI") {
        return (3, 0);
    }
    if n == "GF2" || n == "GRAND_FINAL_RESET" || n == "GRAND FINAL 2" {
        return (6, 0);
    }
    if n == "GF" || n == "GRAND_FINAL" || n == "GRAND FINAL" {
        return (5, 0);
    }
    if n.contains("FINAL") {
        return (4, 0);
    }
    if let Some(idx) = n.strip_prefix('L').and_then(|rest| rest.parse::<i64>().ok()) {
        return (7, idx);
    }
    (8, 0)
}
