//! Integration tests for bracket label parsing and round ordering.

use padel_tournament_engine::{
    bracket_prefix, build_bracket_views, order_rounds, resolve_bracket_refs, round_number,
    strip_bracket_prefix, BracketPrefix, MatchRecord, RoundType,
};

fn knockout_match(label: &str) -> MatchRecord<i64> {
    let mut m = MatchRecord::new(Some(1), Some(2), RoundType::Knockout);
    m.round_label = Some(label.to_owned());
    m
}

fn knockout_matches(labels: &[&str]) -> Vec<MatchRecord<i64>> {
    labels.iter().map(|l| knockout_match(l)).collect()
}

#[test]
fn prefix_detection_is_case_sensitive_single_space() {
    assert_eq!(bracket_prefix(Some("A Final")), BracketPrefix::A);
    assert_eq!(bracket_prefix(Some("B Quartos de Final")), BracketPrefix::B);
    assert_eq!(bracket_prefix(Some("Final")), BracketPrefix::Single);
    assert_eq!(bracket_prefix(Some("a Final")), BracketPrefix::Single);
    assert_eq!(bracket_prefix(Some("AB Final")), BracketPrefix::Single);
    assert_eq!(bracket_prefix(None), BracketPrefix::Single);
}

#[test]
fn strip_removes_only_bracket_prefixes() {
    assert_eq!(strip_bracket_prefix("A Oitavos de Final"), "Oitavos de Final");
    assert_eq!(strip_bracket_prefix("B Final"), "Final");
    assert_eq!(strip_bracket_prefix("Ronda 2"), "Ronda 2");
}

#[test]
fn rounds_order_by_descending_match_count() {
    let matches = knockout_matches(&[
        "A Oitavos de Final",
        "A Oitavos de Final",
        "A Oitavos de Final",
        "A Oitavos de Final",
        "A Quartos de Final",
        "A Quartos de Final",
        "A Final",
    ]);
    assert_eq!(
        order_rounds(&matches),
        vec!["Oitavos de Final", "Quartos de Final", "Final"]
    );
}

#[test]
fn count_ties_break_by_keyword_priority() {
    // One match left in each round: counts tie, keywords decide.
    let matches = knockout_matches(&["Final", "Meias", "Quartos de Final", "Oitavos de Final"]);
    assert_eq!(
        order_rounds(&matches),
        vec!["Oitavos de Final", "Quartos de Final", "Meias", "Final"]
    );
}

#[test]
fn generated_vocabulary_orders_correctly() {
    let matches = knockout_matches(&["FINAL", "SEMIFINAL", "QUARTERFINAL", "R16", "R8"]);
    assert_eq!(
        order_rounds(&matches),
        vec!["R16", "R8", "QUARTERFINAL", "SEMIFINAL", "FINAL"]
    );
}

#[test]
fn grand_final_labels_order_after_the_final() {
    let matches = knockout_matches(&["GF2", "GF", "FINAL", "SEMIFINAL"]);
    assert_eq!(order_rounds(&matches), vec!["SEMIFINAL", "FINAL", "GF", "GF2"]);
}

#[test]
fn unknown_labels_fall_back_to_lexical_order() {
    let matches = knockout_matches(&["Zeta", "Alpha", "FINAL"]);
    assert_eq!(order_rounds(&matches), vec!["FINAL", "Alpha", "Zeta"]);
}

#[test]
fn loser_rounds_order_by_number() {
    let matches = knockout_matches(&["B L2", "B L1", "B L3"]);
    assert_eq!(order_rounds(&matches), vec!["L1", "L2", "L3"]);
}

#[test]
fn round_number_extracts_first_integer() {
    assert_eq!(round_number("Ronda 2"), Some(2));
    assert_eq!(round_number("Jornada 11"), Some(11));
    assert_eq!(round_number("Final"), None);
}

#[test]
fn bracket_refs_index_rounds_per_prefix() {
    let matches = knockout_matches(&[
        "A Meias",
        "A Meias",
        "A Final",
        "B Meias",
        "B Meias",
        "B Final",
    ]);
    let refs = resolve_bracket_refs(&matches);
    assert_eq!(refs.len(), 6);

    let a_final = refs.get(&matches[2].id).unwrap();
    assert_eq!(a_final.prefix, BracketPrefix::A);
    assert_eq!(a_final.round_name, "Final");
    assert_eq!(a_final.round_index, 2);

    let b_semi = refs.get(&matches[3].id).unwrap();
    assert_eq!(b_semi.prefix, BracketPrefix::B);
    assert_eq!(b_semi.round_name, "Meias");
    assert_eq!(b_semi.round_index, 1);
}

#[test]
fn bracket_views_split_dual_draws() {
    let matches = knockout_matches(&["A Meias", "A Meias", "A Final", "B Final"]);
    let views = build_bracket_views(&matches);
    assert_eq!(views.len(), 2);

    assert_eq!(views[0].prefix, BracketPrefix::A);
    let round_names: Vec<&str> = views[0].rounds.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(round_names, vec!["Meias", "Final"]);
    assert_eq!(views[0].rounds[0].match_ids.len(), 2);

    assert_eq!(views[1].prefix, BracketPrefix::B);
    assert_eq!(views[1].rounds.len(), 1);
    assert_eq!(views[1].rounds[0].index, 1);
}

#[test]
fn unlabeled_matches_share_a_placeholder_round() {
    let mut labeled = knockout_matches(&["Final"]);
    labeled.push(MatchRecord::new(Some(1), Some(2), RoundType::Knockout));
    labeled.push(MatchRecord::new(Some(3), Some(4), RoundType::Knockout));
    let rounds = order_rounds(&labeled);
    assert_eq!(rounds, vec!["?", "Final"]);
}
