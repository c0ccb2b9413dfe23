//! Engine logic: score resolution, standings, bracket parsing, advancement.

mod advancement;
mod bracket;
mod overview;
mod score;
mod standings;

pub use advancement::{resolve_champion, resolve_group_qualifiers};
pub use bracket::{
    bracket_prefix, build_bracket_views, order_rounds, resolve_bracket_refs, round_number,
    strip_bracket_prefix,
};
pub use overview::build_overview;
pub use score::{effective_status, resolve, resolve_with_rules};
pub use standings::{
    compute_group, compute_group_for_players, compute_standings_by_group,
    compute_standings_by_group_for_players,
};
