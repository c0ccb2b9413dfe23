//! Integration tests for score resolution: raw payloads to canonical outcomes.

use padel_tournament_engine::{
    effective_status, normalize_score_rules, resolve, resolve_with_rules, MatchPhase,
    MatchStatus, ResultType, ScoreRules, SetScore, Side,
};
use serde_json::{json, Value};

fn sets_payload(scores: &[(u32, u32)]) -> Value {
    json!({
        "sets": scores
            .iter()
            .map(|(a, b)| json!({"teamA": a, "teamB": b}))
            .collect::<Vec<_>>()
    })
}

#[test]
fn normal_win_from_sets() {
    let outcome = resolve(Some(&sets_payload(&[(6, 2), (4, 6), (6, 3)])), MatchStatus::Done);
    assert_eq!(outcome.winner, Some(Side::A));
    assert_eq!(outcome.result_type, ResultType::Normal);
    assert_eq!(outcome.sets_won, (2, 1));
    assert_eq!(outcome.games_won, (16, 11));
    assert!(!outcome.is_disputed);
    assert!(!outcome.is_draw);
}

#[test]
fn malformed_set_entry_is_dropped_not_fatal() {
    let raw = json!({"sets": [{"teamA": "x", "teamB": 2}]});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.winner, None);
    assert!(outcome.sets.is_empty());
}

#[test]
fn set_entries_accept_both_key_shapes_and_numeric_strings() {
    let raw = json!({"sets": [{"teamA": 6, "teamB": 1}, {"a": "6", "b": 4}]});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.sets, vec![SetScore::new(6, 1), SetScore::new(6, 4)]);
    assert_eq!(outcome.winner, Some(Side::A));
}

#[test]
fn negative_and_non_finite_entries_are_dropped() {
    let raw = json!({"sets": [{"teamA": -1, "teamB": 6}, {"teamA": 6, "teamB": 3}]});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.sets, vec![SetScore::new(6, 3)]);
}

#[test]
fn empty_or_missing_payload_yields_no_outcome() {
    assert_eq!(resolve(None, MatchStatus::Done).winner, None);
    assert_eq!(resolve(Some(&json!({})), MatchStatus::Done).winner, None);
    assert_eq!(resolve(Some(&json!(null)), MatchStatus::Done).winner, None);
}

#[test]
fn level_sets_decide_nothing() {
    let outcome = resolve(Some(&sets_payload(&[(6, 2), (2, 6)])), MatchStatus::Done);
    assert_eq!(outcome.winner, None);
    assert!(!outcome.is_draw);
}

#[test]
fn open_dispute_suppresses_outcome_regardless_of_scoreline() {
    let mut raw = sets_payload(&[(6, 0), (6, 0)]);
    raw["disputeStatus"] = json!("OPEN");
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert!(outcome.is_disputed);
    assert_eq!(outcome.winner, None);
    // The scoreline stays visible for display.
    assert_eq!(outcome.sets.len(), 2);
}

#[test]
fn unfinished_match_never_produces_winner() {
    let raw = sets_payload(&[(6, 0), (6, 0)]);
    for status in [MatchStatus::Pending, MatchStatus::InProgress, MatchStatus::Cancelled] {
        let outcome = resolve(Some(&raw), status);
        assert_eq!(outcome.winner, None, "status {status:?}");
        assert!(!outcome.is_draw);
    }
}

#[test]
fn walkover_takes_winner_from_marker_with_empty_sets() {
    let raw = json!({"resultType": "WALKOVER", "winnerSide": "A"});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.winner, Some(Side::A));
    assert_eq!(outcome.result_type, ResultType::Walkover);
    assert!(outcome.sets.is_empty());
    assert_eq!(outcome.games_won, (0, 0));
}

#[test]
fn boolean_walkover_spelling_is_honored() {
    let raw = json!({"walkover": true, "winnerSide": "B"});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.result_type, ResultType::Walkover);
    assert_eq!(outcome.winner, Some(Side::B));
}

#[test]
fn awarded_result_without_winner_marker_has_no_winner() {
    let raw = json!({"resultType": "RETIREMENT"});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.result_type, ResultType::Retirement);
    assert_eq!(outcome.winner, None);
}

#[test]
fn retirement_keeps_partial_sets_but_winner_comes_from_marker() {
    let mut raw = sets_payload(&[(6, 2), (3, 1)]);
    raw["resultType"] = json!("RETIREMENT");
    raw["winnerSide"] = json!("A");
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.winner, Some(Side::A));
    assert_eq!(outcome.sets.len(), 2);
    assert_eq!(outcome.games_won, (9, 3));
}

#[test]
fn bye_neutral_is_a_decided_draw() {
    let raw = json!({"resultType": "BYE_NEUTRAL"});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.result_type, ResultType::ByeNeutral);
    assert_eq!(outcome.winner, None);
    assert!(outcome.is_draw);
    assert!(outcome.counts_for_standings());
}

#[test]
fn timed_games_resolve_by_total_games() {
    let raw = json!({"mode": "TIMED_GAMES", "gamesA": 9, "gamesB": 7});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.winner, Some(Side::A));
    assert_eq!(outcome.games_won, (9, 7));
    assert!(outcome.sets.is_empty());
}

#[test]
fn timed_games_level_score_is_a_draw_when_allowed() {
    let raw = json!({"mode": "TIMED_GAMES", "gamesA": 8, "gamesB": 8, "endedByBuzzer": true});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.winner, None);
    assert!(outcome.is_draw);
    assert!(outcome.ended_by_buzzer);
    assert!(outcome.counts_for_standings());
}

#[test]
fn timed_games_draw_disallowed_yields_no_outcome() {
    let raw = json!({"mode": "TIMED_GAMES", "gamesA": 8, "gamesB": 8, "allowDraw": false});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.winner, None);
    assert!(!outcome.is_draw);
    assert!(!outcome.counts_for_standings());
}

#[test]
fn nested_timed_games_counters_are_read() {
    let raw = json!({"mode": "TIMED_GAMES", "timedGames": {"gamesA": 5, "gamesB": 3}});
    let outcome = resolve(Some(&raw), MatchStatus::Done);
    assert_eq!(outcome.winner, Some(Side::A));
    assert_eq!(outcome.games_won, (5, 3));
}

#[test]
fn score_rules_reject_implausible_set_lines() {
    let rules = ScoreRules::default();
    // 6-5 cannot end a set: at 5-5 play continues to 7-5 or a tie-break.
    let outcome = resolve_with_rules(
        Some(&sets_payload(&[(6, 5), (6, 2)])),
        MatchStatus::Done,
        Some(&rules),
    );
    assert_eq!(outcome.winner, None);

    let outcome = resolve_with_rules(
        Some(&sets_payload(&[(7, 5), (6, 2)])),
        MatchStatus::Done,
        Some(&rules),
    );
    assert_eq!(outcome.winner, Some(Side::A));

    // 7-6 is only reachable through the configured tie-break.
    let outcome = resolve_with_rules(
        Some(&sets_payload(&[(7, 6), (6, 2)])),
        MatchStatus::Done,
        Some(&rules),
    );
    assert_eq!(outcome.winner, Some(Side::A));
}

#[test]
fn score_rules_reject_play_past_the_clinch() {
    let rules = ScoreRules::default();
    let outcome = resolve_with_rules(
        Some(&sets_payload(&[(6, 0), (6, 0), (6, 0)])),
        MatchStatus::Done,
        Some(&rules),
    );
    assert_eq!(outcome.winner, None);
}

#[test]
fn super_tie_break_allowed_as_decider() {
    let rules = ScoreRules::default();
    let outcome = resolve_with_rules(
        Some(&sets_payload(&[(6, 4), (4, 6), (10, 8)])),
        MatchStatus::Done,
        Some(&rules),
    );
    assert_eq!(outcome.winner, Some(Side::A));

    // The same scoreline out of decider position is implausible.
    let outcome = resolve_with_rules(
        Some(&sets_payload(&[(10, 8), (4, 6), (6, 4)])),
        MatchStatus::Done,
        Some(&rules),
    );
    assert_eq!(outcome.winner, None);
}

#[test]
fn normalize_score_rules_clamps_and_defaults() {
    let rules = normalize_score_rules(&json!({
        "setsToWin": "3",
        "gamesToWinSet": 99,
        "tieBreakAt": null
    }))
    .unwrap();
    assert_eq!(rules.sets_to_win, 3);
    assert_eq!(rules.max_sets, 5);
    assert_eq!(rules.games_to_win_set, 9);
    assert_eq!(rules.tie_break_at, None);
    assert_eq!(rules.tie_break_to, None);

    assert_eq!(normalize_score_rules(&json!("not an object")), None);
}

#[test]
fn effective_status_reports_open_disputes_first() {
    let raw = json!({"disputeStatus": "OPEN"});
    assert_eq!(effective_status(MatchStatus::Done, Some(&raw)), MatchPhase::Disputed);
    assert_eq!(effective_status(MatchStatus::Done, None), MatchPhase::Done);
    assert_eq!(
        effective_status(MatchStatus::InProgress, None),
        MatchPhase::InProgress
    );
}
