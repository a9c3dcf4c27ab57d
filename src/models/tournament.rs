//! Tournament, its format, and the engine's error taxonomy.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::fixture::{MatchId, TournamentMatch};
use crate::models::team::{standings_cmp, TeamId, TeamRegistration};

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Broad classes of rejection, for mapping to a presentation layer
/// (the web surface turns these into HTTP status codes).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    Conflict,
    InvalidInput,
}

/// Errors surfaced by tournament operations. All are local business-rule
/// failures; none are transient, so nothing here is worth retrying.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("match not found")]
    MatchNotFound(MatchId),
    #[error("team is not registered in this tournament")]
    TeamNotRegistered(TeamId),
    #[error("only the organizer may modify this tournament")]
    NotOrganizer,
    #[error("fixture already generated")]
    FixtureAlreadyGenerated,
    #[error("registration is still open")]
    RegistrationStillOpen,
    #[error("registration is closed")]
    RegistrationClosed,
    #[error("format cannot change once matches exist")]
    FormatLocked,
    #[error("match already has a result")]
    MatchAlreadyCompleted,
    #[error("match is cancelled")]
    MatchCancelled,
    #[error("match slots are not resolved yet")]
    MatchNotResolved,
    #[error("venue is not open on {weekday} at {hour}:00")]
    VenueUnavailable { weekday: Weekday, hour: u32 },
    #[error("no teams registered")]
    NoTeamsRegistered,
    #[error("need at least {required} teams for a group stage (got {got})")]
    NotEnoughTeamsForGroups { required: usize, got: usize },
    #[error("a team with this name is already registered")]
    DuplicateTeamName,
    #[error("team name must not be empty")]
    EmptyTeamName,
    #[error("scores must be non-negative")]
    NegativeScore,
}

impl TournamentError {
    /// Taxonomy kind of this rejection.
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            MatchNotFound(_) | TeamNotRegistered(_) => ErrorKind::NotFound,
            NotOrganizer => ErrorKind::PermissionDenied,
            FixtureAlreadyGenerated
            | RegistrationStillOpen
            | RegistrationClosed
            | FormatLocked
            | MatchAlreadyCompleted
            | MatchCancelled
            | MatchNotResolved
            | VenueUnavailable { .. } => ErrorKind::Conflict,
            NoTeamsRegistered
            | NotEnoughTeamsForGroups { .. }
            | DuplicateTeamName
            | EmptyTeamName
            | NegativeScore => ErrorKind::InvalidInput,
        }
    }
}

/// Competitive structure of a tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    RoundRobin,
    SingleElimination,
    GroupStageAndElimination,
}

/// A tournament: registered teams plus the fixture arena.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Username of the only principal allowed to mutate this tournament.
    pub organizer: String,
    pub format: TournamentFormat,
    /// First match day of the fixture.
    pub start_date: NaiveDate,
    pub registration_open: bool,
    /// Stamped when the final completes (knockout) or when every playable
    /// match has a result (round-robin).
    pub finished_at: Option<NaiveDateTime>,
    pub registrations: Vec<TeamRegistration>,
    /// The fixture arena; `TournamentMatch::next_match` indexes into this.
    pub matches: Vec<TournamentMatch>,
}

impl Tournament {
    /// Create a tournament with open registration and no matches.
    pub fn new(
        name: impl Into<String>,
        organizer: impl Into<String>,
        format: TournamentFormat,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            organizer: organizer.into(),
            format,
            start_date,
            registration_open: true,
            finished_at: None,
            registrations: Vec::new(),
            matches: Vec::new(),
        }
    }

    pub(crate) fn require_organizer(&self, principal: &str) -> Result<(), TournamentError> {
        if principal != self.organizer {
            return Err(TournamentError::NotOrganizer);
        }
        Ok(())
    }

    /// Register a team while registration is open. Names are unique
    /// (case-insensitive). Returns the new team's id.
    pub fn register_team(&mut self, name: impl Into<String>) -> Result<TeamId, TournamentError> {
        if !self.registration_open {
            return Err(TournamentError::RegistrationClosed);
        }
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        let is_duplicate = self
            .registrations
            .iter()
            .any(|r| r.team_name.eq_ignore_ascii_case(trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let registration = TeamRegistration::new(trimmed);
        let team_id = registration.team_id;
        self.registrations.push(registration);
        Ok(team_id)
    }

    /// Close registration so the fixture can be generated (organizer only).
    pub fn close_registration(&mut self, principal: &str) -> Result<(), TournamentError> {
        self.require_organizer(principal)?;
        self.registration_open = false;
        Ok(())
    }

    pub fn registration(&self, team: TeamId) -> Option<&TeamRegistration> {
        self.registrations.iter().find(|r| r.team_id == team)
    }

    pub fn registration_mut(&mut self, team: TeamId) -> Option<&mut TeamRegistration> {
        self.registrations.iter_mut().find(|r| r.team_id == team)
    }

    /// Registrations in standings order. The sort is stable, so teams tied
    /// on every criterion keep registration order.
    pub fn standings(&self) -> Vec<&TeamRegistration> {
        let mut ranked: Vec<_> = self.registrations.iter().collect();
        ranked.sort_by(|a, b| standings_cmp(a, b));
        ranked
    }

    /// Arena index of a match by id.
    pub fn match_index(&self, id: MatchId) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }

    /// Merge-patch partial edit (organizer only). Absent fields are left
    /// unchanged. The format is immutable once any match exists.
    pub fn apply_patch(
        &mut self,
        principal: &str,
        patch: TournamentPatch,
    ) -> Result<(), TournamentError> {
        self.require_organizer(principal)?;
        if let Some(format) = patch.format {
            if format != self.format && !self.matches.is_empty() {
                return Err(TournamentError::FormatLocked);
            }
            self.format = format;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(open) = patch.registration_open {
            self.registration_open = open;
        }
        Ok(())
    }
}

/// Optional-field partial update for a tournament (absent field = unchanged).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TournamentPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub registration_open: Option<bool>,
    pub format: Option<TournamentFormat>,
}
