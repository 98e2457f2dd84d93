//! Scheduling rules: lifecycle transitions, court allocation, status, history, setup advice.

mod allocation;
mod history;
mod lifecycle;
mod missing_content;
mod overview;
mod session_ops;
mod status;

pub use allocation::{available_courts, is_available, match_on_court, next_available_court, NextAvailableCourt};
pub use history::{build_player_match_index, previously_played};
pub use lifecycle::{
    add_time, change_court, complete_match, default_resume_seconds, pause_match, resume_match,
    start_match,
};
pub use missing_content::{missing_steps, resolve, MissingContentStep};
pub use overview::{MatchView, NamedRef, PlayerView, SessionOverview, UNKNOWN_NAME};
pub use status::{classify, classify_player, MatchStatus};
