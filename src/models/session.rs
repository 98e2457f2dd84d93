//! Session: the in-memory snapshot of players, courts and matches for one club night.

use crate::models::court::{Court, CourtId};
use crate::models::game::{Match, MatchId, Reference};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors from roster edits (players, courts, match creation and deletion).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RosterError {
    /// Name is empty after trimming.
    EmptyName,
    /// A player with this name already exists (case-insensitive).
    DuplicatePlayerName,
    /// A match needs at least one player.
    EmptyMatch,
    /// Id not found in this session.
    UnknownReference(Reference),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::EmptyName => write!(f, "Name cannot be empty"),
            RosterError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            RosterError::EmptyMatch => write!(f, "A match needs at least one player"),
            RosterError::UnknownReference(Reference::Player(_)) => write!(f, "Player not found"),
            RosterError::UnknownReference(Reference::Court(_)) => write!(f, "Court not found"),
            RosterError::UnknownReference(Reference::Match(_)) => write!(f, "Match not found"),
        }
    }
}

impl std::error::Error for RosterError {}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Per-session tunables.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Offered duration when starting a match (and when resuming one paused at or past its end).
    pub default_match_seconds: i64,
    /// Matches with this many minutes (or fewer) left are "finishing soon".
    pub finishing_soon_minutes: i64,
    /// How far back "already played tonight" looks.
    pub history_window_hours: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_match_seconds: 15 * 60,
            finishing_soon_minutes: 2,
            history_window_hours: 12,
        }
    }
}

impl SessionSettings {
    /// Matches completed before this instant do not count as "already played".
    /// A window reaching past the earliest representable time includes everything.
    pub fn history_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Duration::try_hours(self.history_window_hours)
            .and_then(|d| now.checked_sub_signed(d))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Reject negative values; a session cannot run with them.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("default_match_seconds", self.default_match_seconds),
            ("finishing_soon_minutes", self.finishing_soon_minutes),
            ("history_window_hours", self.history_window_hours),
        ];
        match fields.into_iter().find(|(_, v)| *v < 0) {
            Some((field, _)) => Err(SettingsError::Negative { field }),
            None => Ok(()),
        }
    }
}

/// Invalid session settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SettingsError {
    Negative { field: &'static str },
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Negative { field } => write!(f, "{} cannot be negative", field),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Result of looking up an id that a match refers to. Players and courts can be
/// deleted while still referenced by matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolved<'a, T, Id> {
    Found(&'a T),
    Dangling(Id),
}

impl<'a, T, Id> Resolved<'a, T, Id> {
    pub fn found(&self) -> Option<&'a T> {
        match self {
            Resolved::Found(t) => Some(*t),
            Resolved::Dangling(_) => None,
        }
    }

    pub fn is_dangling(&self) -> bool {
        matches!(self, Resolved::Dangling(_))
    }
}

/// Full session state. Entities are replaced, never edited in place.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub players: Vec<Player>,
    pub courts: Vec<Court>,
    /// Every match ever created this session, completed ones included (history).
    pub matches: Vec<Match>,
    pub settings: SessionSettings,
}

fn clean_name(name: &str) -> Result<&str, RosterError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosterError::EmptyName);
    }
    Ok(trimmed)
}

impl Session {
    /// Create an empty session.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            courts: Vec::new(),
            matches: Vec::new(),
            settings,
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_court(&self, id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn resolve_player(&self, id: PlayerId) -> Resolved<'_, Player, PlayerId> {
        self.get_player(id)
            .map_or(Resolved::Dangling(id), Resolved::Found)
    }

    pub fn resolve_court(&self, id: CourtId) -> Resolved<'_, Court, CourtId> {
        self.get_court(id).map_or(Resolved::Dangling(id), Resolved::Found)
    }

    /// Add a player. Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, RosterError> {
        let name = clean_name(name)?;
        if self.is_duplicate_player_name(name, None) {
            return Err(RosterError::DuplicatePlayerName);
        }
        let player = Player::new(name);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<(), RosterError> {
        let name = clean_name(name)?;
        if self.is_duplicate_player_name(name, Some(id)) {
            return Err(RosterError::DuplicatePlayerName);
        }
        self.replace_player(id, |p| p.with_name(name))
    }

    pub fn set_player_present(&mut self, id: PlayerId, is_present: bool) -> Result<(), RosterError> {
        self.replace_player(id, |p| p.with_presence(is_present))
    }

    pub fn set_player_archived(&mut self, id: PlayerId, is_archived: bool) -> Result<(), RosterError> {
        self.replace_player(id, |p| p.with_archived(is_archived))
    }

    /// Remove a player. Matches referring to them are left as they are.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), RosterError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(RosterError::UnknownReference(Reference::Player(id)))?;
        self.players.remove(idx);
        Ok(())
    }

    pub fn add_court(&mut self, name: &str) -> Result<CourtId, RosterError> {
        let court = Court::new(clean_name(name)?);
        let id = court.id;
        self.courts.push(court);
        Ok(id)
    }

    pub fn rename_court(&mut self, id: CourtId, name: &str) -> Result<(), RosterError> {
        let name = clean_name(name)?;
        self.replace_court(id, |c| c.with_name(name))
    }

    pub fn set_court_usable(&mut self, id: CourtId, can_be_used: bool) -> Result<(), RosterError> {
        self.replace_court(id, |c| c.with_usable(can_be_used))
    }

    /// Remove a court. A match still on it keeps the (now dangling) reference.
    pub fn remove_court(&mut self, id: CourtId) -> Result<(), RosterError> {
        let idx = self
            .courts
            .iter()
            .position(|c| c.id == id)
            .ok_or(RosterError::UnknownReference(Reference::Court(id)))?;
        self.courts.remove(idx);
        Ok(())
    }

    /// Queue a new match with the given players (duplicates collapsed, order kept).
    pub fn create_match(&mut self, players: &[PlayerId], now: DateTime<Utc>) -> Result<MatchId, RosterError> {
        let mut unique: Vec<PlayerId> = Vec::with_capacity(players.len());
        for &pid in players {
            if self.get_player(pid).is_none() {
                return Err(RosterError::UnknownReference(Reference::Player(pid)));
            }
            if !unique.contains(&pid) {
                unique.push(pid);
            }
        }
        if unique.is_empty() {
            return Err(RosterError::EmptyMatch);
        }
        let m = Match::new(unique, now);
        let id = m.id;
        log::debug!("Session {}: queued match {} with {} player(s)", self.id, id, m.players.len());
        self.matches.push(m);
        Ok(id)
    }

    /// Remove a match regardless of its state.
    pub fn delete_match(&mut self, id: MatchId) -> Result<(), RosterError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(RosterError::UnknownReference(Reference::Match(id)))?;
        self.matches.remove(idx);
        Ok(())
    }

    pub fn delete_all_matches(&mut self) {
        self.matches.clear();
    }

    fn is_duplicate_player_name(&self, name: &str, except: Option<PlayerId>) -> bool {
        self.players
            .iter()
            .filter(|p| Some(p.id) != except)
            .any(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn replace_player(&mut self, id: PlayerId, f: impl FnOnce(&Player) -> Player) -> Result<(), RosterError> {
        let slot = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RosterError::UnknownReference(Reference::Player(id)))?;
        *slot = f(slot);
        Ok(())
    }

    fn replace_court(&mut self, id: CourtId, f: impl FnOnce(&Court) -> Court) -> Result<(), RosterError> {
        let slot = self
            .courts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RosterError::UnknownReference(Reference::Court(id)))?;
        *slot = f(slot);
        Ok(())
    }
}
