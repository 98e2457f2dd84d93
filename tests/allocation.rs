//! Integration tests for court availability and the next court to free up.

use chrono::{DateTime, TimeZone, Utc};
use court_session_web::{
    available_courts, is_available, match_on_court, next_available_court, Court, Match,
    MatchState, TimeRemaining,
};
use uuid::Uuid;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn match_in(state: MatchState) -> Match {
    Match {
        state,
        ..Match::new(vec![Uuid::new_v4(), Uuid::new_v4()], at(0))
    }
}

fn on_court(court: &Court, ends: i64) -> Match {
    match_in(MatchState::OnCourt {
        scheduled_end: at(ends),
        court: court.id,
    })
}

#[test]
fn free_usable_court_is_available() {
    let court = Court::new("Court 1");
    assert!(is_available(&court, &[], at(0)));
}

#[test]
fn disabled_court_is_never_available() {
    let court = Court::new("Court 1").with_usable(false);
    assert!(!is_available(&court, &[], at(0)));
}

#[test]
fn running_match_holds_its_court_until_scheduled_end() {
    let court = Court::new("Court 1");
    let matches = vec![on_court(&court, 100)];
    assert!(!is_available(&court, &matches, at(0)));
    // Ending soon still holds the court.
    assert!(!is_available(&court, &matches, at(99)));
    assert!(is_available(&court, &matches, at(100)));
    assert!(is_available(&court, &matches, at(500)));
}

#[test]
fn paused_and_completed_matches_do_not_hold_courts() {
    let court = Court::new("Court 1");
    let matches = vec![
        match_in(MatchState::Paused {
            remaining_seconds: 100,
            paused_at: at(0),
        }),
        match_in(MatchState::Completed {
            finished_at: at(0),
            last_court: Some(court.id),
        }),
    ];
    assert!(is_available(&court, &matches, at(1)));
}

#[test]
fn available_courts_filters_in_order() {
    let c1 = Court::new("Court 1");
    let c2 = Court::new("Court 2").with_usable(false);
    let c3 = Court::new("Court 3");
    let c4 = Court::new("Court 4");
    let courts = vec![c1.clone(), c2, c3.clone(), c4.clone()];
    let matches = vec![on_court(&c3, 600)];
    let ids: Vec<_> = available_courts(&courts, &matches, at(0))
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![c1.id, c4.id]);
}

#[test]
fn next_available_court_picks_smallest_non_negative_time_left() {
    let c1 = Court::new("Court 1");
    let c2 = Court::new("Court 2");
    let c3 = Court::new("Court 3");
    let matches = vec![on_court(&c1, 300), on_court(&c2, 120), on_court(&c3, 50)];
    // c3 has overrun at t=60 and is skipped.
    let next = next_available_court(&matches, at(60)).unwrap();
    assert_eq!(next.court, c2.id);
    assert_eq!(next.time_left, TimeRemaining::from_seconds(60));
}

#[test]
fn next_available_court_is_none_without_running_matches() {
    let matches = vec![match_in(MatchState::Paused {
        remaining_seconds: 10,
        paused_at: at(0),
    })];
    assert!(next_available_court(&matches, at(0)).is_none());
}

#[test]
fn match_on_court_includes_overrunning_match() {
    let court = Court::new("Court 1");
    let other = Court::new("Court 2");
    let m = on_court(&court, 10);
    let matches = vec![on_court(&other, 100), m.clone()];
    assert_eq!(match_on_court(court.id, &matches, at(20)), Some(&m));
    assert!(match_on_court(Uuid::new_v4(), &matches, at(20)).is_none());
}

#[test]
fn match_on_court_prefers_unfinished_match_over_stale_overrun() {
    let court = Court::new("Court 1");
    let stale = on_court(&court, 60);
    let current = on_court(&court, 720);
    let matches = vec![stale.clone(), current.clone()];
    assert_eq!(match_on_court(court.id, &matches, at(130)), Some(&current));
    // Both overrunning: the one that ended last is shown.
    assert_eq!(match_on_court(court.id, &matches, at(800)), Some(&current));
    assert_eq!(match_on_court(court.id, &[stale.clone()], at(800)), Some(&stale));
}

#[test]
fn allocating_only_from_available_courts_keeps_courts_exclusive() {
    let courts: Vec<Court> = (1..=2).map(|i| Court::new(format!("Court {i}"))).collect();
    let mut matches: Vec<Match> = Vec::new();
    for round in 0..5 {
        let now = at(round * 10);
        if let Some(court) = available_courts(&courts, &matches, now).first() {
            matches.push(on_court(court, round * 10 + 25));
        }
        for c in &courts {
            let holding = matches
                .iter()
                .filter(|m| m.state.court() == Some(c.id) && !m.state.is_finished(now))
                .count();
            assert!(holding <= 1);
        }
    }
}
