//! Derived per-tick view of a session: what list screens and court boards display.

use crate::logic::allocation::{available_courts, next_available_court, NextAvailableCourt};
use crate::logic::missing_content::{missing_steps, resolve, MissingContentStep};
use crate::logic::status::{classify, classify_player, MatchStatus};
use crate::models::{CourtId, MatchId, MatchState, PlayerId, Session, TimeRemaining};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder shown for a player or court that was deleted while still referenced.
pub const UNKNOWN_NAME: &str = "(deleted)";

/// A match reference resolved for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NamedRef<Id> {
    pub id: Id,
    pub name: String,
    pub dangling: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchView {
    pub id: MatchId,
    pub players: Vec<NamedRef<PlayerId>>,
    /// Court held while on court, or last court once completed.
    pub court: Option<NamedRef<CourtId>>,
    pub state: MatchState,
    pub status: MatchStatus,
    pub time_left: Option<TimeRemaining>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub is_enabled: bool,
    pub status: MatchStatus,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SessionOverview {
    pub now: DateTime<Utc>,
    /// Sorted by match ordering: queue, paused, then running and history.
    pub matches: Vec<MatchView>,
    pub players: Vec<PlayerView>,
    pub available_courts: Vec<CourtId>,
    /// Only computed when no court is available.
    pub next_available_court: Option<NextAvailableCourt>,
    pub missing_step: Option<MissingContentStep>,
}

impl Session {
    fn named_player(&self, id: PlayerId) -> NamedRef<PlayerId> {
        let resolved = self.resolve_player(id);
        NamedRef {
            id,
            name: resolved
                .found()
                .map_or_else(|| UNKNOWN_NAME.to_string(), |p| p.name.clone()),
            dangling: resolved.is_dangling(),
        }
    }

    fn named_court(&self, id: CourtId) -> NamedRef<CourtId> {
        let resolved = self.resolve_court(id);
        NamedRef {
            id,
            name: resolved
                .found()
                .map_or_else(|| UNKNOWN_NAME.to_string(), |c| c.name.clone()),
            dangling: resolved.is_dangling(),
        }
    }

    /// Everything a host re-publishes on each tick. Same snapshot and `now` give the same result.
    pub fn overview(&self, now: DateTime<Utc>) -> SessionOverview {
        let threshold = self.settings.finishing_soon_minutes;

        let mut sorted: Vec<_> = self.matches.iter().collect();
        sorted.sort();
        let matches = sorted
            .into_iter()
            .map(|m| {
                let court = match m.state {
                    MatchState::OnCourt { court, .. } => Some(court),
                    MatchState::Completed { last_court, .. } => last_court,
                    _ => None,
                };
                MatchView {
                    id: m.id,
                    players: m.players.iter().map(|&p| self.named_player(p)).collect(),
                    court: court.map(|c| self.named_court(c)),
                    state: m.state,
                    status: classify(&m.state, now, threshold),
                    time_left: m.state.time_left(now),
                }
            })
            .collect();

        let players = self
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                name: p.name.clone(),
                is_enabled: p.is_enabled(),
                status: classify_player(p.id, &self.matches, now, threshold),
            })
            .collect();

        let available: Vec<CourtId> = available_courts(&self.courts, &self.matches, now)
            .into_iter()
            .map(|c| c.id)
            .collect();
        let next_available_court = if available.is_empty() {
            next_available_court(&self.matches, now)
        } else {
            None
        };

        SessionOverview {
            now,
            matches,
            players,
            available_courts: available,
            next_available_court,
            missing_step: resolve(&missing_steps(&self.players, &self.courts, &self.matches)),
        }
    }
}
