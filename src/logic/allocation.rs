//! Court availability: which courts can take a match right now, and which frees up next.

use crate::models::{Court, CourtId, Match, MatchState, TimeRemaining};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Court expected to free up first, when none is available right now.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct NextAvailableCourt {
    pub court: CourtId,
    pub time_left: TimeRemaining,
}

/// Usable and not held by an unfinished on-court match. A match past its scheduled
/// end no longer holds its court.
pub fn is_available(court: &Court, matches: &[Match], now: DateTime<Utc>) -> bool {
    court_is_free(court, matches, now)
}

/// [`is_available`] over any match iterator (e.g. all matches but the one being moved).
pub(crate) fn court_is_free<'a>(
    court: &Court,
    matches: impl IntoIterator<Item = &'a Match>,
    now: DateTime<Utc>,
) -> bool {
    court.can_be_used
        && !matches.into_iter().any(|m| match m.state {
            MatchState::OnCourt { court: held, .. } => held == court.id && !m.state.is_finished(now),
            _ => false,
        })
}

/// Courts that can take a match now, in the given order.
pub fn available_courts<'a>(courts: &'a [Court], matches: &[Match], now: DateTime<Utc>) -> Vec<&'a Court> {
    courts
        .iter()
        .filter(|c| is_available(c, matches, now))
        .collect()
}

/// The on-court match with the smallest non-negative time left.
pub fn next_available_court(matches: &[Match], now: DateTime<Utc>) -> Option<NextAvailableCourt> {
    matches
        .iter()
        .filter_map(|m| match m.state {
            MatchState::OnCourt { court, .. } => {
                let time_left = m.state.time_left(now)?;
                (!time_left.is_overrun()).then_some(NextAvailableCourt { court, time_left })
            }
            _ => None,
        })
        .min_by_key(|n| n.time_left)
}

/// The match playing on `court`: the unfinished one if any, else the latest-ending
/// overrunning one (an overrun match no longer holds the court, but still stands on it
/// until someone takes over).
pub fn match_on_court(court: CourtId, matches: &[Match], now: DateTime<Utc>) -> Option<&Match> {
    let on_court = matches.iter().filter(|m| m.state.court() == Some(court));
    on_court
        .clone()
        .find(|m| !m.state.is_finished(now))
        .or_else(|| on_court.max())
}
