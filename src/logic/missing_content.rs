//! Missing-content advisor: picks the one setup step to nudge the user toward.

use crate::models::{Court, Match, MatchState, Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Setup steps in the order a new session goes through them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissingContentStep {
    AddPlayers,
    EnablePlayers,
    SetupAMatch,
    AddCourts,
    EnableCourts,
    StartAMatch,
    CompleteAMatch,
}

impl MissingContentStep {
    pub const ALL: [MissingContentStep; 7] = [
        MissingContentStep::AddPlayers,
        MissingContentStep::EnablePlayers,
        MissingContentStep::SetupAMatch,
        MissingContentStep::AddCourts,
        MissingContentStep::EnableCourts,
        MissingContentStep::StartAMatch,
        MissingContentStep::CompleteAMatch,
    ];

    pub fn is_match_step(&self) -> bool {
        matches!(
            self,
            MissingContentStep::SetupAMatch
                | MissingContentStep::StartAMatch
                | MissingContentStep::CompleteAMatch
        )
    }
}

/// Steps whose content is absent from the snapshot.
pub fn missing_steps(players: &[Player], courts: &[Court], matches: &[Match]) -> BTreeSet<MissingContentStep> {
    use MissingContentStep::*;
    let any_state = |f: fn(&MatchState) -> bool| matches.iter().any(|m| f(&m.state));

    let checks = [
        (AddPlayers, players.is_empty()),
        (EnablePlayers, !players.iter().any(Player::is_enabled)),
        (SetupAMatch, !any_state(|s| matches!(s, MatchState::NotStarted { .. }))),
        (AddCourts, courts.is_empty()),
        (EnableCourts, !courts.iter().any(Court::is_enabled)),
        (
            StartAMatch,
            !any_state(|s| matches!(s, MatchState::OnCourt { .. } | MatchState::Paused { .. })),
        ),
        (CompleteAMatch, !any_state(|s| matches!(s, MatchState::Completed { .. }))),
    ];
    checks
        .into_iter()
        .filter_map(|(step, missing)| missing.then_some(step))
        .collect()
}

/// Choose the next step to suggest.
///
/// With several steps missing, the suggestion is anchored on match steps already done:
/// the first missing step after the furthest completed match step. Without such a step,
/// the earliest missing step.
pub fn resolve(missing: &BTreeSet<MissingContentStep>) -> Option<MissingContentStep> {
    if missing.len() <= 1 {
        return missing.first().copied();
    }
    let furthest_done = MissingContentStep::ALL
        .iter()
        .filter(|s| s.is_match_step() && !missing.contains(*s))
        .max();
    furthest_done
        .and_then(|done| missing.iter().find(|s| *s > done).copied())
        .or_else(|| missing.first().copied())
}
