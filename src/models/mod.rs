//! Data structures for a court session: players, courts, matches and their lifecycle state.

mod court;
mod game;
mod player;
mod session;
mod time;

pub use court::{Court, CourtId};
pub use game::{Match, MatchAction, MatchId, MatchState, Reference, StateKind, TransitionError};
pub use player::{Player, PlayerId};
pub use session::{Resolved, RosterError, Session, SessionId, SessionSettings, SettingsError};
pub use time::{seconds_until, TimeRemaining};
