//! Integration tests for match and player status classification.

use chrono::{DateTime, TimeZone, Utc};
use court_session_web::{classify, classify_player, Match, MatchState, MatchStatus};
use uuid::Uuid;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn on_court_until(ends: i64) -> MatchState {
    MatchState::OnCourt {
        scheduled_end: at(ends),
        court: Uuid::new_v4(),
    }
}

#[test]
fn classifies_each_state() {
    let now = at(0);
    assert_eq!(
        classify(&MatchState::NotStarted { created_at: now }, now, 2),
        MatchStatus::Queued
    );
    assert_eq!(
        classify(
            &MatchState::Paused {
                remaining_seconds: 10,
                paused_at: now
            },
            now,
            2
        ),
        MatchStatus::Paused
    );
    assert_eq!(
        classify(
            &MatchState::Completed {
                finished_at: now,
                last_court: None
            },
            now,
            2
        ),
        MatchStatus::None
    );
}

#[test]
fn on_court_splits_by_time_left() {
    let state = on_court_until(600);
    assert_eq!(classify(&state, at(0), 2), MatchStatus::InProgress);
    // 2:01 left
    assert_eq!(classify(&state, at(479), 2), MatchStatus::InProgress);
    // 2:00 left
    assert_eq!(classify(&state, at(480), 2), MatchStatus::FinishingSoon);
    // 0:00 left is not yet overrun
    assert_eq!(classify(&state, at(600), 2), MatchStatus::FinishingSoon);
    assert_eq!(classify(&state, at(601), 2), MatchStatus::Overrun);
}

#[test]
fn player_takes_most_urgent_match_status() {
    let player = Uuid::new_v4();
    let other = Uuid::new_v4();
    let now = at(0);
    let queued = Match::new(vec![player, other], now);
    let overrun = Match {
        state: on_court_until(-10),
        ..Match::new(vec![player], now)
    };
    let not_theirs = Match {
        state: on_court_until(60),
        ..Match::new(vec![other], now)
    };
    let matches = vec![queued, overrun, not_theirs];
    assert_eq!(classify_player(player, &matches, now, 2), MatchStatus::Overrun);
    assert_eq!(classify_player(other, &matches, now, 2), MatchStatus::FinishingSoon);
    assert_eq!(classify_player(Uuid::new_v4(), &matches, now, 2), MatchStatus::None);
}
