//! Urgency classification for colouring and sorting matches and players.
//!
//! Advisory only: transition legality is decided by the lifecycle functions.

use crate::models::{Match, MatchState, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display category of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Queued,
    Paused,
    Overrun,
    FinishingSoon,
    InProgress,
    /// Completed matches; shown muted.
    None,
}

impl MatchStatus {
    /// Higher is more urgent.
    pub fn urgency(&self) -> u8 {
        match self {
            MatchStatus::None => 0,
            MatchStatus::Queued => 1,
            MatchStatus::Paused => 2,
            MatchStatus::InProgress => 3,
            MatchStatus::FinishingSoon => 4,
            MatchStatus::Overrun => 5,
        }
    }
}

pub fn classify(state: &MatchState, now: DateTime<Utc>, finishing_soon_minutes: i64) -> MatchStatus {
    match state {
        MatchState::NotStarted { .. } => MatchStatus::Queued,
        MatchState::Paused { .. } => MatchStatus::Paused,
        MatchState::Completed { .. } => MatchStatus::None,
        MatchState::OnCourt { .. } => match state.time_left(now) {
            Some(t) if t.is_overrun() => MatchStatus::Overrun,
            Some(t) if t.is_ending_soon(finishing_soon_minutes) => MatchStatus::FinishingSoon,
            _ => MatchStatus::InProgress,
        },
    }
}

/// Most urgent status among the matches `player` is in; `None` if they are in none
/// (or only in completed ones).
pub fn classify_player(
    player: PlayerId,
    matches: &[Match],
    now: DateTime<Utc>,
    finishing_soon_minutes: i64,
) -> MatchStatus {
    matches
        .iter()
        .filter(|m| m.contains_player(player))
        .map(|m| classify(&m.state, now, finishing_soon_minutes))
        .max_by_key(MatchStatus::urgency)
        .unwrap_or(MatchStatus::None)
}
