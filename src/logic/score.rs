//! Score resolution: normalize an untyped score payload into a canonical
//! outcome.
//!
//! Payloads come from score entry and dispute handling upstream and carry no
//! guaranteed schema: a `sets` array, a `resultType` marker, timed-games
//! counters, a dispute flag, or nothing at all. Everything is parsed once,
//! defensively, into [`RawScore`]; malformed pieces are dropped, never fatal.

use crate::models::{
    CanonicalOutcome, MatchPhase, MatchStatus, ResultType, ScoreMode, ScoreRules, SetScore, Side,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Typed view of the raw payload. All downstream logic works off this (or the
/// [`CanonicalOutcome`] built from it), never off raw JSON again.
#[derive(Debug, Default)]
struct RawScore {
    sets: Vec<SetScore>,
    result_type: ResultType,
    winner_side: Option<Side>,
    dispute_open: bool,
    mode: Option<ScoreMode>,
    games_a: Option<u32>,
    games_b: Option<u32>,
    allow_draw: Option<bool>,
    ended_by_buzzer: bool,
    ended_at: Option<DateTime<Utc>>,
}

impl RawScore {
    fn parse(raw: Option<&Value>) -> Self {
        let Some(obj) = raw.and_then(Value::as_object) else {
            return Self::default();
        };

        let result_type = match obj.get("resultType").and_then(Value::as_str) {
            Some("WALKOVER") => ResultType::Walkover,
            Some("RETIREMENT") => ResultType::Retirement,
            Some("INJURY") => ResultType::Injury,
            Some("BYE_NEUTRAL") => ResultType::ByeNeutral,
            // The boolean spelling of a walkover is honored too.
            _ if obj.get("walkover").and_then(Value::as_bool) == Some(true) => {
                ResultType::Walkover
            }
            _ => ResultType::Normal,
        };

        let winner_side = match obj.get("winnerSide").and_then(Value::as_str) {
            Some("A") => Some(Side::A),
            Some("B") => Some(Side::B),
            _ => None,
        };

        let sets = obj
            .get("sets")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(parse_set_entry).collect())
            .unwrap_or_default();

        let mode = obj
            .get("mode")
            .and_then(Value::as_str)
            .and_then(|m| match m.trim().to_ascii_uppercase().as_str() {
                "TIMED_GAMES" => Some(ScoreMode::TimedGames),
                "SETS" => Some(ScoreMode::Sets),
                _ => None,
            });

        let timed = obj.get("timedGames").and_then(Value::as_object);
        let games_a = parse_game_count(obj.get("gamesA"))
            .or_else(|| timed.and_then(|t| parse_game_count(t.get("gamesA"))));
        let games_b = parse_game_count(obj.get("gamesB"))
            .or_else(|| timed.and_then(|t| parse_game_count(t.get("gamesB"))));

        let ended_at = parse_timestamp(obj.get("endedAt"))
            .or_else(|| timed.and_then(|t| parse_timestamp(t.get("endedAt"))));

        Self {
            sets,
            result_type,
            winner_side,
            dispute_open: dispute_open(raw),
            mode,
            games_a,
            games_b,
            allow_draw: obj.get("allowDraw").and_then(Value::as_bool),
            ended_by_buzzer: obj.get("endedByBuzzer").and_then(Value::as_bool) == Some(true),
            ended_at,
        }
    }
}

/// Resolve a raw score payload into a canonical outcome, with no
/// plausibility rules applied to the set line.
pub fn resolve(raw_score: Option<&Value>, status: MatchStatus) -> CanonicalOutcome {
    resolve_with_rules(raw_score, status, None)
}

/// Resolve a raw score payload into a canonical outcome.
///
/// When `rules` are given, set lines that could not occur under them (a set
/// won 6-5, a third set after a straight-sets win, ...) yield no winner.
/// Never panics: malformed input degrades to an outcome without a winner.
pub fn resolve_with_rules(
    raw_score: Option<&Value>,
    status: MatchStatus,
    rules: Option<&ScoreRules>,
) -> CanonicalOutcome {
    let raw = RawScore::parse(raw_score);
    let (sets_won, games_won) = totals(&raw.sets);

    // An open dispute suppresses the outcome no matter what the scoreline
    // says; the parsed sets stay visible for display.
    if raw.dispute_open {
        return CanonicalOutcome {
            sets: raw.sets,
            sets_won,
            games_won,
            winner: None,
            result_type: raw.result_type,
            is_disputed: true,
            is_draw: false,
            ended_by_buzzer: raw.ended_by_buzzer,
            ended_at: raw.ended_at,
        };
    }

    // Unfinished matches never produce an outcome, complete scoreline or not.
    if status != MatchStatus::Done {
        return CanonicalOutcome {
            sets: raw.sets,
            sets_won,
            games_won,
            winner: None,
            result_type: raw.result_type,
            is_disputed: false,
            is_draw: false,
            ended_by_buzzer: raw.ended_by_buzzer,
            ended_at: raw.ended_at,
        };
    }

    match raw.result_type {
        // A neutral bye is a decided draw with no scoreline.
        ResultType::ByeNeutral => CanonicalOutcome {
            sets: Vec::new(),
            sets_won: (0, 0),
            games_won: (0, 0),
            winner: None,
            result_type: ResultType::ByeNeutral,
            is_disputed: false,
            is_draw: true,
            ended_by_buzzer: false,
            ended_at: raw.ended_at,
        },
        // Awarded results take their winner from the explicit marker, never
        // from the (possibly partial, possibly empty) set line.
        result_type @ (ResultType::Walkover | ResultType::Retirement | ResultType::Injury) => {
            CanonicalOutcome {
                sets: raw.sets,
                sets_won,
                games_won,
                winner: raw.winner_side,
                result_type,
                is_disputed: false,
                is_draw: false,
                ended_by_buzzer: raw.ended_by_buzzer,
                ended_at: raw.ended_at,
            }
        }
        ResultType::Normal => {
            let mode = raw.mode.or(rules.map(|r| r.score_mode));
            if mode == Some(ScoreMode::TimedGames) {
                if let Some(outcome) = timed_outcome(&raw, rules) {
                    return outcome;
                }
            }
            let winner = validated_set_winner(&raw.sets, rules);
            CanonicalOutcome {
                sets: raw.sets,
                sets_won,
                games_won,
                winner,
                result_type: ResultType::Normal,
                is_disputed: false,
                is_draw: false,
                ended_by_buzzer: raw.ended_by_buzzer,
                ended_at: raw.ended_at,
            }
        }
    }
}

/// The stored status with an open dispute reported ahead of it.
pub fn effective_status(status: MatchStatus, raw_score: Option<&Value>) -> MatchPhase {
    if dispute_open(raw_score) {
        return MatchPhase::Disputed;
    }
    match status {
        MatchStatus::Pending => MatchPhase::Pending,
        MatchStatus::InProgress => MatchPhase::InProgress,
        MatchStatus::Done => MatchPhase::Done,
        MatchStatus::Cancelled => MatchPhase::Cancelled,
    }
}

/// True when the payload carries an open dispute marker.
pub(crate) fn dispute_open(raw_score: Option<&Value>) -> bool {
    raw_score
        .and_then(|v| v.get("disputeStatus"))
        .and_then(Value::as_str)
        == Some("OPEN")
}

/// Timed-games outcome: total games per side, draw allowed by the payload or
/// the rules. `None` when the counters are absent or a disallowed draw.
fn timed_outcome(raw: &RawScore, rules: Option<&ScoreRules>) -> Option<CanonicalOutcome> {
    let games_a = raw.games_a?;
    let games_b = raw.games_b?;
    let allow_draw = raw
        .allow_draw
        .unwrap_or_else(|| rules.map_or(true, |r| r.allow_timed_draw));
    if !allow_draw && games_a == games_b {
        return None;
    }
    let winner = match games_a.cmp(&games_b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    };
    Some(CanonicalOutcome {
        sets: Vec::new(),
        sets_won: (0, 0),
        games_won: (games_a, games_b),
        winner,
        result_type: ResultType::Normal,
        is_disputed: false,
        is_draw: winner.is_none(),
        ended_by_buzzer: raw.ended_by_buzzer,
        ended_at: raw.ended_at,
    })
}

/// Winner of a set line: strictly more than half of the reported sets, with
/// plausibility checks when rules are given. `None` for an empty, level, or
/// implausible line.
fn validated_set_winner(sets: &[SetScore], rules: Option<&ScoreRules>) -> Option<Side> {
    if sets.is_empty() {
        return None;
    }
    if let Some(rules) = rules {
        if sets.len() as u32 > rules.max_sets {
            log::debug!("set line longer than max_sets, no winner");
            return None;
        }
    }

    let mut sets_a = 0u32;
    let mut sets_b = 0u32;
    for (idx, set) in sets.iter().enumerate() {
        // A level set decides nothing and invalidates the line.
        if set.games_a == set.games_b {
            return None;
        }
        if let Some(rules) = rules {
            let is_last = idx == sets.len() - 1;
            let can_use_super = rules.allow_super_tie_break
                && is_last
                && (!rules.super_tie_break_only_decider || sets_a == sets_b);
            let valid_super = can_use_super && is_valid_super_tie_break_set(set, rules);
            if !valid_super && !is_valid_regular_set(set, rules) {
                log::debug!(
                    "implausible set {}-{} under score rules, no winner",
                    set.games_a,
                    set.games_b
                );
                return None;
            }
        }
        if set.games_a > set.games_b {
            sets_a += 1;
        } else {
            sets_b += 1;
        }
        if let Some(rules) = rules {
            // Play recorded past the clinch is implausible.
            if (sets_a == rules.sets_to_win || sets_b == rules.sets_to_win)
                && idx < sets.len() - 1
            {
                return None;
            }
        }
    }

    if sets_a == sets_b {
        return None;
    }
    if let Some(rules) = rules {
        if sets_a != rules.sets_to_win && sets_b != rules.sets_to_win {
            return None;
        }
    }
    Some(if sets_a > sets_b { Side::A } else { Side::B })
}

fn is_valid_regular_set(set: &SetScore, rules: &ScoreRules) -> bool {
    let winner_games = set.games_a.max(set.games_b);
    let loser_games = set.games_a.min(set.games_b);
    let diff = winner_games - loser_games;
    if winner_games < rules.games_to_win_set {
        return false;
    }
    if winner_games == rules.games_to_win_set {
        return diff >= 2;
    }
    if winner_games == rules.games_to_win_set + 1 && diff >= 2 {
        return true;
    }
    if let (Some(at), Some(to)) = (rules.tie_break_at, rules.tie_break_to) {
        if winner_games == to && loser_games == at {
            return true;
        }
    }
    if rules.allow_extended_games || rules.tie_break_at.is_none() || rules.tie_break_to.is_none()
    {
        return diff >= 2 && winner_games >= rules.games_to_win_set;
    }
    false
}

fn is_valid_super_tie_break_set(set: &SetScore, rules: &ScoreRules) -> bool {
    let winner_games = set.games_a.max(set.games_b);
    let loser_games = set.games_a.min(set.games_b);
    winner_games >= rules.super_tie_break_to
        && winner_games - loser_games >= rules.super_tie_break_win_by
}

/// Sets and games totals per side. An equal set counts for neither side.
fn totals(sets: &[SetScore]) -> ((u32, u32), (u32, u32)) {
    let mut sets_won = (0, 0);
    let mut games_won = (0, 0);
    for set in sets {
        games_won.0 += set.games_a;
        games_won.1 += set.games_b;
        if set.games_a > set.games_b {
            sets_won.0 += 1;
        } else if set.games_b > set.games_a {
            sets_won.1 += 1;
        }
    }
    (sets_won, games_won)
}

/// One `sets` entry: `{teamA, teamB}` or `{a, b}`, numbers or numeric
/// strings. Anything else is dropped, not fatal.
fn parse_set_entry(entry: &Value) -> Option<SetScore> {
    let obj = entry.as_object()?;
    let a = obj.get("teamA").or_else(|| obj.get("a"));
    let b = obj.get("teamB").or_else(|| obj.get("b"));
    match (parse_game_count(a), parse_game_count(b)) {
        (Some(games_a), Some(games_b)) => Some(SetScore::new(games_a, games_b)),
        _ => {
            log::debug!("dropping unparsable set entry: {entry}");
            None
        }
    }
}

/// A non-negative finite game count; numeric strings accepted.
fn parse_game_count(raw: Option<&Value>) -> Option<u32> {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !parsed.is_finite() || parsed < 0.0 {
        return None;
    }
    Some(parsed.floor() as u32)
}

fn parse_timestamp(raw: Option<&Value>) -> Option<DateTime<Utc>> {
    let text = raw.and_then(Value::as_str)?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
