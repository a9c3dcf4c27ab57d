//! Match nodes of the fixture graph: team slots, linkage, derived status.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::team::TeamId;
use crate::models::venue::VenueId;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Handle to the externally confirmed match record created through the
/// booking collaborator once both slots are resolved.
pub type ConfirmedMatchId = Uuid;

/// Phase of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    /// Round-robin play (a whole league, or one group of the hybrid format).
    GroupPlay,
    /// Elimination bracket play.
    Knockout,
}

/// Current state of a match.
///
/// Only completion (scores) and cancellation are stored; `Scheduled` vs.
/// `InProgress` is derived from the scheduled time against the caller's
/// clock, so there is no stored field to drift out of sync.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// One node of the fixture graph.
///
/// Elimination linkage is arena-style: `next_match` is an index into the
/// owning tournament's match vector, never a pointer. The graph is a forward
/// DAG toward the final.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentMatch {
    pub id: MatchId,
    /// 1-based round within the tournament (hybrid knockout rounds continue
    /// after the last group round).
    pub round_number: u32,
    /// Tournament-unique; with `round_number` gives the display order.
    pub match_number: u32,
    pub round_type: RoundType,
    /// None = unresolved slot (bye gap, or pending an ancestor's winner).
    pub home_team: Option<TeamId>,
    pub away_team: Option<TeamId>,
    pub venue: Option<VenueId>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub cancelled: bool,
    /// Index of the match the winner advances into (None for the final and
    /// for round-robin play).
    pub next_match: Option<usize>,
    /// Whether the winner fills the home slot of `next_match`.
    pub home_slot_in_next: bool,
    pub confirmed_match: Option<ConfirmedMatchId>,
}

impl TournamentMatch {
    pub fn new(round_number: u32, match_number: u32, round_type: RoundType) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_number,
            match_number,
            round_type,
            home_team: None,
            away_team: None,
            venue: None,
            scheduled_at: None,
            home_score: None,
            away_score: None,
            cancelled: false,
            next_match: None,
            home_slot_in_next: false,
            confirmed_match: None,
        }
    }

    /// Both team slots resolved (playable once its time arrives).
    pub fn is_resolved(&self) -> bool {
        self.home_team.is_some() && self.away_team.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// Derived status at the given instant.
    pub fn status(&self, now: NaiveDateTime) -> MatchStatus {
        if self.cancelled {
            return MatchStatus::Cancelled;
        }
        if self.is_completed() {
            return MatchStatus::Completed;
        }
        match self.scheduled_at {
            Some(at) if at <= now => MatchStatus::InProgress,
            _ => MatchStatus::Scheduled,
        }
    }

    /// Winning team of a completed match; None for a draw or an open match.
    pub fn winner(&self) -> Option<TeamId> {
        let (home, away) = (self.home_score?, self.away_score?);
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => self.home_team,
            std::cmp::Ordering::Less => self.away_team,
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Losing team of a completed match; None for a draw or an open match.
    pub fn loser(&self) -> Option<TeamId> {
        let (home, away) = (self.home_score?, self.away_score?);
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => self.away_team,
            std::cmp::Ordering::Less => self.home_team,
            std::cmp::Ordering::Equal => None,
        }
    }
}
