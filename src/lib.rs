//! Court session organizer: library with models and scheduling logic.

pub mod logic;
pub mod models;

pub use logic::{
    add_time, available_courts, build_player_match_index, change_court, classify,
    classify_player, complete_match, default_resume_seconds, is_available, match_on_court,
    missing_steps, next_available_court, pause_match, previously_played, resolve, resume_match,
    start_match, MatchStatus, MatchView, MissingContentStep, NamedRef, NextAvailableCourt,
    PlayerView, SessionOverview, UNKNOWN_NAME,
};
pub use models::{
    seconds_until, Court, CourtId, Match, MatchAction, MatchId, MatchState, Player, PlayerId,
    Reference, Resolved, RosterError, Session, SessionId, SessionSettings, SettingsError, StateKind,
    TimeRemaining, TransitionError,
};
