//! Per-computation configuration: points table, tie-break chain, score rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Kind of result an entity is credited points for.
///
/// `WalkoverWin`/`WalkoverLoss` cover every awarded (non-played-out) result:
/// walkover, retirement and injury all score through them.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Win,
    Draw,
    Loss,
    WalkoverWin,
    WalkoverLoss,
    ByeNeutral,
}

/// Points awarded per outcome kind.
///
/// Missing kinds fall back: `WalkoverWin` → `Win`, `WalkoverLoss` → `Loss`,
/// `ByeNeutral` → `Draw`; the base kinds default to 3/1/0.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsTable {
    entries: BTreeMap<OutcomeKind, i32>,
}

impl PointsTable {
    /// Points for the given outcome kind, applying the fallback chain.
    pub fn points_for(&self, kind: OutcomeKind) -> i32 {
        if let Some(&points) = self.entries.get(&kind) {
            return points;
        }
        match kind {
            OutcomeKind::Win => 3,
            OutcomeKind::Draw => 1,
            OutcomeKind::Loss => 0,
            OutcomeKind::WalkoverWin => self.points_for(OutcomeKind::Win),
            OutcomeKind::WalkoverLoss => self.points_for(OutcomeKind::Loss),
            OutcomeKind::ByeNeutral => self.points_for(OutcomeKind::Draw),
        }
    }

    /// Set the points for an outcome kind.
    pub fn set(&mut self, kind: OutcomeKind, points: i32) {
        self.entries.insert(kind, points);
    }
}

impl FromIterator<(OutcomeKind, i32)> for PointsTable {
    fn from_iter<I: IntoIterator<Item = (OutcomeKind, i32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One comparison rule in the tie-break chain.
///
/// `COIN_TOSS` also deserializes from the legacy `RANDOM` spelling, and the
/// differentials from their short `SET_DIFF`/`GAME_DIFF` forms.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieBreakRule {
    Points,
    Wins,
    #[serde(alias = "SET_DIFF")]
    SetDifference,
    #[serde(alias = "GAME_DIFF")]
    GameDifference,
    GamesFor,
    HeadToHead,
    #[serde(alias = "RANDOM")]
    CoinToss,
}

/// Competition format; selects a tie-break chain preset.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    Americano,
    Mexicano,
    NonStop,
    QuadroEliminatorio,
    QuadroAb,
    DuplaEliminacao,
}

/// Immutable configuration for one standings computation.
///
/// Construction normalizes the tie-break chain: duplicates are dropped,
/// `Points` leads the chain, and `CoinToss` closes it so that the chain
/// always produces a total order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub points_table: PointsTable,
    tie_break_rules: Vec<TieBreakRule>,
}

impl RuleSet {
    pub fn new(points_table: PointsTable, rules: Vec<TieBreakRule>) -> Self {
        Self {
            points_table,
            tie_break_rules: normalize_tie_break_rules(rules),
        }
    }

    /// The default chain: points, head-to-head, set and game differentials,
    /// games won, coin toss.
    pub fn default_rules() -> Vec<TieBreakRule> {
        vec![
            TieBreakRule::Points,
            TieBreakRule::HeadToHead,
            TieBreakRule::SetDifference,
            TieBreakRule::GameDifference,
            TieBreakRule::GamesFor,
            TieBreakRule::CoinToss,
        ]
    }

    /// Preset chain for a competition format. Non-stop ranks head-to-head
    /// before game counts; americano/mexicano rank game counts first since
    /// partners rotate and direct meetings mean little there.
    pub fn for_format(format: TournamentFormat) -> Self {
        let rules = match format {
            TournamentFormat::NonStop => vec![
                TieBreakRule::Points,
                TieBreakRule::HeadToHead,
                TieBreakRule::GameDifference,
                TieBreakRule::GamesFor,
                TieBreakRule::CoinToss,
            ],
            TournamentFormat::Americano | TournamentFormat::Mexicano => vec![
                TieBreakRule::Points,
                TieBreakRule::GameDifference,
                TieBreakRule::GamesFor,
                TieBreakRule::HeadToHead,
                TieBreakRule::CoinToss,
            ],
            _ => Self::default_rules(),
        };
        Self::new(PointsTable::default(), rules)
    }

    /// The normalized tie-break chain.
    pub fn tie_break_rules(&self) -> &[TieBreakRule] {
        &self.tie_break_rules
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(PointsTable::default(), Self::default_rules())
    }
}

fn normalize_tie_break_rules(rules: Vec<TieBreakRule>) -> Vec<TieBreakRule> {
    let mut normalized: Vec<TieBreakRule> = Vec::with_capacity(rules.len() + 2);
    for rule in rules {
        if !normalized.contains(&rule) {
            normalized.push(rule);
        }
    }
    if !normalized.contains(&TieBreakRule::Points) {
        normalized.insert(0, TieBreakRule::Points);
    }
    if normalized.last() != Some(&TieBreakRule::CoinToss) {
        normalized.retain(|r| *r != TieBreakRule::CoinToss);
        normalized.push(TieBreakRule::CoinToss);
    }
    debug_assert!(!normalized.is_empty());
    normalized
}

/// How a match is scored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreMode {
    #[default]
    Sets,
    TimedGames,
}

/// Optional set-plausibility rules for score resolution. When present, set
/// lines that could not occur under these rules are rejected rather than
/// counted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub score_mode: ScoreMode,
    pub sets_to_win: u32,
    pub max_sets: u32,
    pub games_to_win_set: u32,
    /// Games-all score at which a tie-break is played, if any.
    pub tie_break_at: Option<u32>,
    /// Winning games total of a tie-break set.
    pub tie_break_to: Option<u32>,
    pub allow_super_tie_break: bool,
    pub super_tie_break_to: u32,
    pub super_tie_break_win_by: u32,
    /// Super tie-break only allowed as the deciding set.
    pub super_tie_break_only_decider: bool,
    /// Accept sets that run past the tie-break score by two.
    pub allow_extended_games: bool,
    /// Timed games may end level.
    pub allow_timed_draw: bool,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            score_mode: ScoreMode::Sets,
            sets_to_win: 2,
            max_sets: 3,
            games_to_win_set: 6,
            tie_break_at: Some(6),
            tie_break_to: Some(7),
            allow_super_tie_break: true,
            super_tie_break_to: 10,
            super_tie_break_win_by: 2,
            super_tie_break_only_decider: true,
            allow_extended_games: false,
            allow_timed_draw: true,
        }
    }
}

/// Build `ScoreRules` from an untrusted JSON payload. Every field is clamped
/// into a sane range; anything unusable falls back to the default. Returns
/// `None` when the payload is not an object at all.
pub fn normalize_score_rules(raw: &Value) -> Option<ScoreRules> {
    let input = raw.as_object()?;
    let defaults = ScoreRules::default();

    let score_mode = match input.get("scoreMode").and_then(Value::as_str) {
        Some(mode) if mode.trim().eq_ignore_ascii_case("TIMED_GAMES") => ScoreMode::TimedGames,
        _ => ScoreMode::Sets,
    };

    let sets_to_win = clamp_int(input.get("setsToWin"), defaults.sets_to_win, 1, 5);
    let max_sets_fallback = defaults.max_sets.max(sets_to_win * 2 - 1);
    let max_sets = clamp_int(input.get("maxSets"), max_sets_fallback, sets_to_win, 9);
    let games_to_win_set =
        clamp_int(input.get("gamesToWinSet"), defaults.games_to_win_set, 1, 9);

    // An explicit JSON null disables the tie-break entirely; absence keeps it.
    let tie_break_at = match input.get("tieBreakAt") {
        Some(Value::Null) => None,
        raw => Some(clamp_int(
            raw,
            defaults.tie_break_at.unwrap_or(games_to_win_set),
            1,
            12,
        )),
    };
    let tie_break_to = tie_break_at.map(|at| clamp_int(input.get("tieBreakTo"), at + 1, at + 1, 15));

    Some(ScoreRules {
        score_mode,
        sets_to_win,
        max_sets,
        games_to_win_set,
        tie_break_at,
        tie_break_to,
        allow_super_tie_break: input
            .get("allowSuperTieBreak")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.allow_super_tie_break),
        super_tie_break_to: clamp_int(
            input.get("superTieBreakTo"),
            defaults.super_tie_break_to,
            5,
            20,
        ),
        super_tie_break_win_by: clamp_int(
            input.get("superTieBreakWinBy"),
            defaults.super_tie_break_win_by,
            1,
            5,
        ),
        super_tie_break_only_decider: input
            .get("superTieBreakOnlyDecider")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.super_tie_break_only_decider),
        allow_extended_games: input
            .get("allowExtendedGames")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.allow_extended_games),
        allow_timed_draw: input
            .get("allowTimedDraw")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.allow_timed_draw),
    })
}

/// Parse a numeric or numeric-string JSON value, floor it, and clamp into
/// `[min, max]`; fall back when it is absent or not a finite number.
fn clamp_int(raw: Option<&Value>, fallback: u32, min: u32, max: u32) -> u32 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(value) if value.is_finite() => {
            let value = value.floor();
            if value < f64::from(min) {
                min
            } else if value > f64::from(max) {
                max
            } else {
                value as u32
            }
        }
        _ => fallback,
    }
}
