//! Match, its lifecycle state, and the errors raised by lifecycle transitions.

use crate::models::court::CourtId;
use crate::models::player::PlayerId;
use crate::models::time::{seconds_until, TimeRemaining};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match: NotStarted → OnCourt ⇄ Paused → Completed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchState {
    /// Queued; no court or duration yet.
    NotStarted { created_at: DateTime<Utc> },
    /// Running on a court. The end time is absolute, fixed at start/resume/add-time.
    OnCourt {
        scheduled_end: DateTime<Utc>,
        court: CourtId,
    },
    /// Off court with the remaining time frozen (negative if paused while overrunning).
    Paused {
        remaining_seconds: i64,
        paused_at: DateTime<Utc>,
    },
    /// Terminal.
    Completed {
        finished_at: DateTime<Utc>,
        last_court: Option<CourtId>,
    },
}

/// Variant of a [`MatchState`] without its payload (for errors and API responses).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    NotStarted,
    OnCourt,
    Paused,
    Completed,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateKind::NotStarted => "not started",
            StateKind::OnCourt => "on court",
            StateKind::Paused => "paused",
            StateKind::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl MatchState {
    pub fn kind(&self) -> StateKind {
        match self {
            MatchState::NotStarted { .. } => StateKind::NotStarted,
            MatchState::OnCourt { .. } => StateKind::OnCourt,
            MatchState::Paused { .. } => StateKind::Paused,
            MatchState::Completed { .. } => StateKind::Completed,
        }
    }

    /// Completed, or on court with the scheduled end reached.
    pub fn is_finished(&self, now: DateTime<Utc>) -> bool {
        match self {
            MatchState::Completed { .. } => true,
            MatchState::OnCourt { scheduled_end, .. } => now >= *scheduled_end,
            _ => false,
        }
    }

    /// Paused, or on court and not finished.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        match self {
            MatchState::Paused { .. } => true,
            MatchState::OnCourt { .. } => !self.is_finished(now),
            _ => false,
        }
    }

    /// `None` for queued and completed matches. Negative while overrunning.
    pub fn time_left(&self, now: DateTime<Utc>) -> Option<TimeRemaining> {
        match self {
            MatchState::OnCourt { scheduled_end, .. } => {
                Some(TimeRemaining::from_seconds(seconds_until(now, *scheduled_end)))
            }
            MatchState::Paused {
                remaining_seconds, ..
            } => Some(TimeRemaining::from_seconds(*remaining_seconds)),
            MatchState::NotStarted { .. } | MatchState::Completed { .. } => None,
        }
    }

    /// Court currently held (only while on court).
    pub fn court(&self) -> Option<CourtId> {
        match self {
            MatchState::OnCourt { court, .. } => Some(*court),
            _ => None,
        }
    }

    fn bucket(&self) -> u8 {
        match self {
            MatchState::NotStarted { .. } => 0,
            MatchState::Paused { .. } => 1,
            MatchState::OnCourt { .. } | MatchState::Completed { .. } => 2,
        }
    }
}

/// Queued first (oldest first), then paused (least time left first), then on-court and
/// completed together by end/finish time (soonest first).
impl Ord for MatchState {
    fn cmp(&self, other: &Self) -> Ordering {
        use MatchState::*;
        self.bucket().cmp(&other.bucket()).then_with(|| match (self, other) {
            (NotStarted { created_at: a }, NotStarted { created_at: b }) => a.cmp(b),
            (
                Paused {
                    remaining_seconds: r1,
                    paused_at: p1,
                },
                Paused {
                    remaining_seconds: r2,
                    paused_at: p2,
                },
            ) => r1.cmp(r2).then_with(|| p1.cmp(p2)),
            (
                OnCourt {
                    scheduled_end: a,
                    court: c1,
                },
                OnCourt {
                    scheduled_end: b,
                    court: c2,
                },
            ) => a.cmp(b).then_with(|| c1.cmp(c2)),
            (
                Completed {
                    finished_at: a,
                    last_court: c1,
                },
                Completed {
                    finished_at: b,
                    last_court: c2,
                },
            ) => a.cmp(b).then_with(|| c1.cmp(c2)),
            // Shared bucket: compare timestamps, on-court wins a tie.
            (OnCourt { scheduled_end, .. }, Completed { finished_at, .. }) => {
                scheduled_end.cmp(finished_at).then(Ordering::Less)
            }
            (Completed { finished_at, .. }, OnCourt { scheduled_end, .. }) => {
                finished_at.cmp(scheduled_end).then(Ordering::Greater)
            }
            _ => Ordering::Equal,
        })
    }
}

impl PartialOrd for MatchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A group of players queued for, playing, or done with a court slot.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// References, not snapshots: resolve through the session for display.
    pub players: Vec<PlayerId>,
    pub state: MatchState,
}

impl Match {
    /// A new queued match.
    pub fn new(players: Vec<PlayerId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            players,
            state: MatchState::NotStarted { created_at },
        }
    }

    pub fn contains_player(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    pub(crate) fn with_state(&self, state: MatchState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}

/// Ordered by state (see [`MatchState`]); ties fall back to id and players.
impl Ord for Match {
    fn cmp(&self, other: &Self) -> Ordering {
        self.state
            .cmp(&other.state)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.players.cmp(&other.players))
    }
}

impl PartialOrd for Match {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lifecycle action attempted on a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchAction {
    Start,
    Pause,
    Resume,
    ChangeCourt,
    AddTime,
    Complete,
}

impl fmt::Display for MatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchAction::Start => "start",
            MatchAction::Pause => "pause",
            MatchAction::Resume => "resume",
            MatchAction::ChangeCourt => "change court of",
            MatchAction::AddTime => "add time to",
            MatchAction::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// An id that could not be found in the session snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Reference {
    Player(PlayerId),
    Court(CourtId),
    Match(MatchId),
}

/// Errors returned by match lifecycle operations. All are recoverable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransitionError {
    /// The match's current state does not allow this action.
    InvalidTransition { action: MatchAction, from: StateKind },
    /// A match, court or player id is not in the snapshot.
    UnknownReference(Reference),
    /// The court is disabled or held by an unfinished match.
    CourtUnavailable(CourtId),
    /// A duration or time shift lands outside the representable time range.
    OutOfRange,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::InvalidTransition { action, from } => {
                write!(f, "Cannot {} a match that is {}", action, from)
            }
            TransitionError::UnknownReference(Reference::Player(_)) => write!(f, "Player not found"),
            TransitionError::UnknownReference(Reference::Court(_)) => write!(f, "Court not found"),
            TransitionError::UnknownReference(Reference::Match(_)) => write!(f, "Match not found"),
            TransitionError::CourtUnavailable(_) => write!(f, "Court is not available"),
            TransitionError::OutOfRange => write!(f, "Time value is out of range"),
        }
    }
}

impl std::error::Error for TransitionError {}
