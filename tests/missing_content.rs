//! Integration tests for the missing-content advisor.

use chrono::{DateTime, TimeZone, Utc};
use court_session_web::{
    missing_steps, resolve, Court, Match, MatchState, MissingContentStep, Player,
};
use std::collections::BTreeSet;
use uuid::Uuid;
use MissingContentStep::*;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn set(steps: &[MissingContentStep]) -> BTreeSet<MissingContentStep> {
    steps.iter().copied().collect()
}

fn match_in(state: MatchState) -> Match {
    Match {
        state,
        ..Match::new(vec![Uuid::new_v4()], at(0))
    }
}

#[test]
fn match_steps_are_flagged() {
    let flagged: Vec<_> = MissingContentStep::ALL
        .iter()
        .filter(|s| s.is_match_step())
        .copied()
        .collect();
    assert_eq!(flagged, vec![SetupAMatch, StartAMatch, CompleteAMatch]);
}

#[test]
fn nothing_missing_resolves_to_none() {
    assert_eq!(resolve(&BTreeSet::new()), None);
}

#[test]
fn single_missing_step_is_returned() {
    assert_eq!(resolve(&set(&[CompleteAMatch])), Some(CompleteAMatch));
    assert_eq!(resolve(&set(&[EnableCourts])), Some(EnableCourts));
}

#[test]
fn anchors_on_furthest_completed_match_step() {
    // SetupAMatch done: first missing step after it.
    assert_eq!(
        resolve(&set(&[AddCourts, EnableCourts, StartAMatch, CompleteAMatch])),
        Some(AddCourts)
    );
    // StartAMatch done: AddPlayers is behind progress, CompleteAMatch is ahead.
    assert_eq!(resolve(&set(&[AddPlayers, CompleteAMatch])), Some(CompleteAMatch));
}

#[test]
fn falls_back_to_earliest_missing_step() {
    // No match step done.
    assert_eq!(
        resolve(&set(&[EnablePlayers, SetupAMatch, StartAMatch, CompleteAMatch])),
        Some(EnablePlayers)
    );
    // CompleteAMatch done, nothing missing after it.
    assert_eq!(resolve(&set(&[SetupAMatch, StartAMatch])), Some(SetupAMatch));
}

#[test]
fn empty_session_asks_for_players_first() {
    let missing = missing_steps(&[], &[], &[]);
    assert_eq!(missing, set(&MissingContentStep::ALL));
    assert_eq!(resolve(&missing), Some(AddPlayers));
}

#[test]
fn absent_players_need_enabling() {
    let players = vec![Player::new("Ann").with_presence(false), Player::new("Bo").with_archived(true)];
    let missing = missing_steps(&players, &[], &[]);
    assert!(!missing.contains(&AddPlayers));
    assert!(missing.contains(&EnablePlayers));
    assert_eq!(resolve(&missing), Some(EnablePlayers));
}

#[test]
fn queued_match_without_running_ones_suggests_starting() {
    let players = vec![Player::new("Ann"), Player::new("Bo")];
    let courts = vec![Court::new("Court 1")];
    let matches = vec![Match::new(players.iter().map(|p| p.id).collect(), at(0))];
    let missing = missing_steps(&players, &courts, &matches);
    assert_eq!(missing, set(&[StartAMatch, CompleteAMatch]));
    assert_eq!(resolve(&missing), Some(StartAMatch));
}

#[test]
fn running_match_suggests_completing() {
    let players = vec![Player::new("Ann")];
    let courts = vec![Court::new("Court 1")];
    let matches = vec![match_in(MatchState::OnCourt {
        scheduled_end: at(600),
        court: courts[0].id,
    })];
    let missing = missing_steps(&players, &courts, &matches);
    assert_eq!(missing, set(&[SetupAMatch, CompleteAMatch]));
    assert_eq!(resolve(&missing), Some(CompleteAMatch));
}

#[test]
fn paused_match_counts_as_started() {
    let matches = vec![match_in(MatchState::Paused {
        remaining_seconds: 10,
        paused_at: at(0),
    })];
    let missing = missing_steps(&[Player::new("Ann")], &[Court::new("Court 1")], &matches);
    assert!(!missing.contains(&StartAMatch));
}

#[test]
fn disabled_courts_need_enabling() {
    let courts = vec![Court::new("Court 1").with_usable(false)];
    let missing = missing_steps(&[Player::new("Ann")], &courts, &[]);
    assert!(!missing.contains(&AddCourts));
    assert!(missing.contains(&EnableCourts));
}
