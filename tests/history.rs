//! Integration tests for the player match index and "already played" detection.

use chrono::{DateTime, TimeZone, Utc};
use court_session_web::{build_player_match_index, previously_played, Match, MatchState, PlayerId};
use std::collections::HashSet;
use uuid::Uuid;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn players(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn completed(players: Vec<PlayerId>, finished: i64) -> Match {
    Match {
        state: MatchState::Completed {
            finished_at: at(finished),
            last_court: None,
        },
        ..Match::new(players, at(0))
    }
}

#[test]
fn index_groups_matches_by_player_in_match_order() {
    let p = players(3);
    let later = Match::new(vec![p[0], p[1]], at(20));
    let earlier = Match::new(vec![p[0], p[2]], at(10));
    let matches = vec![later.clone(), earlier.clone()];
    let index = build_player_match_index(&matches);

    assert_eq!(index.len(), 3);
    assert_eq!(index[&p[0]], vec![&earlier, &later]);
    assert_eq!(index[&p[1]], vec![&later]);
    assert_eq!(index[&p[2]], vec![&earlier]);
}

#[test]
fn previously_played_collects_partners_excluding_selection() {
    let p = players(5);
    let matches = vec![
        Match::new(vec![p[0], p[1], p[2]], at(0)),
        completed(vec![p[3], p[4]], 100),
    ];
    let index = build_player_match_index(&matches);
    let played = previously_played(&[p[0], p[1]], &index, at(0));
    assert_eq!(played, HashSet::from([p[2]]));
}

#[test]
fn matches_finished_before_cutoff_are_ignored() {
    let p = players(4);
    let matches = vec![completed(vec![p[0], p[1]], 50), completed(vec![p[0], p[2]], 150)];
    let index = build_player_match_index(&matches);

    let played = previously_played(&[p[0]], &index, at(100));
    assert_eq!(played, HashSet::from([p[2]]));

    let played = previously_played(&[p[0]], &index, at(0));
    assert_eq!(played, HashSet::from([p[1], p[2]]));

    // Finished exactly at the cutoff does not count.
    let played = previously_played(&[p[0]], &index, at(150));
    assert!(played.is_empty());
}

#[test]
fn running_and_paused_matches_always_count() {
    let p = players(3);
    let matches = vec![
        Match {
            state: MatchState::OnCourt {
                scheduled_end: at(10),
                court: Uuid::new_v4(),
            },
            ..Match::new(vec![p[0], p[1]], at(0))
        },
        Match {
            state: MatchState::Paused {
                remaining_seconds: 60,
                paused_at: at(0),
            },
            ..Match::new(vec![p[0], p[2]], at(0))
        },
    ];
    let index = build_player_match_index(&matches);
    let played = previously_played(&[p[0]], &index, at(1_000));
    assert_eq!(played, HashSet::from([p[1], p[2]]));
}

#[test]
fn unknown_selection_yields_empty_set() {
    let index = build_player_match_index(&[]);
    assert!(previously_played(&[Uuid::new_v4()], &index, at(0)).is_empty());
}
