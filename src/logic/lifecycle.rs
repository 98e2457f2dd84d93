//! Match lifecycle transitions. Each takes the current match and returns a new one; nothing is mutated.

use crate::models::{
    CourtId, Match, MatchAction, MatchState, SessionSettings, TransitionError,
};
use chrono::{DateTime, Duration, Utc};

/// `t` moved by `secs` seconds, or `OutOfRange` if that leaves chrono's representable range.
fn shifted(t: DateTime<Utc>, secs: i64) -> Result<DateTime<Utc>, TransitionError> {
    Duration::try_seconds(secs)
        .and_then(|d| t.checked_add_signed(d))
        .ok_or(TransitionError::OutOfRange)
}

fn invalid(action: MatchAction, m: &Match) -> TransitionError {
    TransitionError::InvalidTransition {
        action,
        from: m.state.kind(),
    }
}

/// Put a queued match on `court` for `duration_secs` from `now`.
pub fn start_match(
    m: &Match,
    court: CourtId,
    duration_secs: i64,
    now: DateTime<Utc>,
) -> Result<Match, TransitionError> {
    match m.state {
        MatchState::NotStarted { .. } => Ok(m.with_state(MatchState::OnCourt {
            scheduled_end: shifted(now, duration_secs)?,
            court,
        })),
        _ => Err(invalid(MatchAction::Start, m)),
    }
}

/// Take a running match off its court, freezing the time left.
///
/// An overrunning match freezes a negative remainder.
pub fn pause_match(m: &Match, now: DateTime<Utc>) -> Result<Match, TransitionError> {
    match m.state {
        MatchState::OnCourt { .. } => {
            let remaining_seconds = m
                .state
                .time_left(now)
                .map(|t| t.total_seconds())
                .unwrap_or_default();
            Ok(m.with_state(MatchState::Paused {
                remaining_seconds,
                paused_at: now,
            }))
        }
        _ => Err(invalid(MatchAction::Pause, m)),
    }
}

/// Put a paused match back on a court (not necessarily the one it left) for `resume_secs`.
/// Zero is accepted and yields a match that is already finished.
pub fn resume_match(
    m: &Match,
    court: CourtId,
    resume_secs: i64,
    now: DateTime<Utc>,
) -> Result<Match, TransitionError> {
    match m.state {
        MatchState::Paused { .. } => Ok(m.with_state(MatchState::OnCourt {
            scheduled_end: shifted(now, resume_secs)?,
            court,
        })),
        _ => Err(invalid(MatchAction::Resume, m)),
    }
}

/// Move a running match to another court. The end time does not change.
pub fn change_court(m: &Match, court: CourtId) -> Result<Match, TransitionError> {
    match m.state {
        MatchState::OnCourt { scheduled_end, .. } => Ok(m.with_state(MatchState::OnCourt {
            scheduled_end,
            court,
        })),
        _ => Err(invalid(MatchAction::ChangeCourt, m)),
    }
}

/// Extend (or with a negative delta, shorten) a running match, or correct the finish
/// time of a completed one.
pub fn add_time(m: &Match, delta_secs: i64) -> Result<Match, TransitionError> {
    match m.state {
        MatchState::OnCourt {
            scheduled_end,
            court,
        } => Ok(m.with_state(MatchState::OnCourt {
            scheduled_end: shifted(scheduled_end, delta_secs)?,
            court,
        })),
        MatchState::Completed {
            finished_at,
            last_court,
        } => Ok(m.with_state(MatchState::Completed {
            finished_at: shifted(finished_at, delta_secs)?,
            last_court,
        })),
        _ => Err(invalid(MatchAction::AddTime, m)),
    }
}

/// Finish a running or paused match. Paused matches hold no court, so none is recorded.
pub fn complete_match(m: &Match, now: DateTime<Utc>) -> Result<Match, TransitionError> {
    match m.state {
        MatchState::OnCourt { court, .. } => Ok(m.with_state(MatchState::Completed {
            finished_at: now,
            last_court: Some(court),
        })),
        MatchState::Paused { .. } => Ok(m.with_state(MatchState::Completed {
            finished_at: now,
            last_court: None,
        })),
        _ => Err(invalid(MatchAction::Complete, m)),
    }
}

/// Duration to offer when resuming: the frozen remainder if any is left, else the default.
/// `None` unless the match is paused.
pub fn default_resume_seconds(state: &MatchState, settings: &SessionSettings) -> Option<i64> {
    match state {
        MatchState::Paused {
            remaining_seconds, ..
        } if *remaining_seconds > 0 => Some(*remaining_seconds),
        MatchState::Paused { .. } => Some(settings.default_match_seconds),
        _ => None,
    }
}
