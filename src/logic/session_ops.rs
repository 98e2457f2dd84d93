//! Lifecycle transitions applied to a session by id: resolve references, apply the
//! transition, check the court, then swap in the new match.

use crate::logic::allocation::court_is_free;
use crate::logic::lifecycle;
use crate::models::{Court, CourtId, Match, MatchId, Reference, Session, TransitionError};
use chrono::{DateTime, Utc};

impl Session {
    /// Position of the match in `self.matches`.
    fn match_index(&self, id: MatchId) -> Result<usize, TransitionError> {
        self.matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(TransitionError::UnknownReference(Reference::Match(id)))
    }

    fn court_or_err(&self, id: CourtId) -> Result<&Court, TransitionError> {
        self.get_court(id)
            .ok_or(TransitionError::UnknownReference(Reference::Court(id)))
    }

    /// Court must be usable and not held by an unfinished match other than `moving`.
    fn ensure_free(&self, court: &Court, moving: MatchId, now: DateTime<Utc>) -> Result<(), TransitionError> {
        let others = self.matches.iter().filter(|m| m.id != moving);
        if !court_is_free(court, others, now) {
            return Err(TransitionError::CourtUnavailable(court.id));
        }
        Ok(())
    }

    fn commit(&mut self, idx: usize, updated: Match) -> &Match {
        log::debug!(
            "Session {}: match {} is now {}",
            self.id,
            updated.id,
            updated.state.kind()
        );
        self.matches[idx] = updated;
        &self.matches[idx]
    }

    /// Start a queued match on an available court.
    pub fn start_match(
        &mut self,
        match_id: MatchId,
        court: CourtId,
        duration_secs: i64,
        now: DateTime<Utc>,
    ) -> Result<&Match, TransitionError> {
        let idx = self.match_index(match_id)?;
        let c = self.court_or_err(court)?;
        let updated = lifecycle::start_match(&self.matches[idx], court, duration_secs, now)?;
        self.ensure_free(c, match_id, now)?;
        Ok(self.commit(idx, updated))
    }

    pub fn pause_match(&mut self, match_id: MatchId, now: DateTime<Utc>) -> Result<&Match, TransitionError> {
        let idx = self.match_index(match_id)?;
        let updated = lifecycle::pause_match(&self.matches[idx], now)?;
        Ok(self.commit(idx, updated))
    }

    /// Resume a paused match on an available court. `resume_secs` of `None` uses
    /// [`lifecycle::default_resume_seconds`].
    pub fn resume_match(
        &mut self,
        match_id: MatchId,
        court: CourtId,
        resume_secs: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<&Match, TransitionError> {
        let idx = self.match_index(match_id)?;
        let c = self.court_or_err(court)?;
        let m = &self.matches[idx];
        let secs = resume_secs
            .or_else(|| lifecycle::default_resume_seconds(&m.state, &self.settings))
            .unwrap_or(self.settings.default_match_seconds);
        let updated = lifecycle::resume_match(m, court, secs, now)?;
        self.ensure_free(c, match_id, now)?;
        Ok(self.commit(idx, updated))
    }

    /// Move a running match to another available court (or keep it on its own).
    pub fn change_court(
        &mut self,
        match_id: MatchId,
        court: CourtId,
        now: DateTime<Utc>,
    ) -> Result<&Match, TransitionError> {
        let idx = self.match_index(match_id)?;
        let c = self.court_or_err(court)?;
        let updated = lifecycle::change_court(&self.matches[idx], court)?;
        self.ensure_free(c, match_id, now)?;
        Ok(self.commit(idx, updated))
    }

    pub fn add_time(&mut self, match_id: MatchId, delta_secs: i64) -> Result<&Match, TransitionError> {
        let idx = self.match_index(match_id)?;
        let updated = lifecycle::add_time(&self.matches[idx], delta_secs)?;
        Ok(self.commit(idx, updated))
    }

    pub fn complete_match(&mut self, match_id: MatchId, now: DateTime<Utc>) -> Result<&Match, TransitionError> {
        let idx = self.match_index(match_id)?;
        let updated = lifecycle::complete_match(&self.matches[idx], now)?;
        Ok(self.commit(idx, updated))
    }
}
