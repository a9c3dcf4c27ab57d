//! Team registration: the per-tournament accumulator behind the standings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in match slots and lookups).
pub type TeamId = Uuid;

/// Per-tournament accumulator for one registered team.
///
/// Created when the team registers; mutated only by result processing. A
/// match references a registration's team, it never owns it, so
/// registrations outlive every match that mentions them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRegistration {
    pub team_id: TeamId,
    pub team_name: String,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl TeamRegistration {
    /// Register a team with the given name. All counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            team_id: Uuid::new_v4(),
            team_name: name.into(),
            points: 0,
            goals_for: 0,
            goals_against: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Record a won match: 3 points, a win, and the goals on both sides.
    pub fn record_win(&mut self, scored: u32, conceded: u32) {
        self.points += 3;
        self.wins += 1;
        self.record_goals(scored, conceded);
    }

    /// Record a drawn match: 1 point and a draw.
    pub fn record_draw(&mut self, scored: u32, conceded: u32) {
        self.points += 1;
        self.draws += 1;
        self.record_goals(scored, conceded);
    }

    /// Record a lost match: no points, a loss.
    pub fn record_loss(&mut self, scored: u32, conceded: u32) {
        self.losses += 1;
        self.record_goals(scored, conceded);
    }

    fn record_goals(&mut self, scored: u32, conceded: u32) {
        self.goals_for += scored;
        self.goals_against += conceded;
    }
}

/// Standings order: points, then goal difference, then goals for, all
/// descending. Ties beyond goals-for keep registration order (callers use a
/// stable sort).
pub fn standings_cmp(a: &TeamRegistration, b: &TeamRegistration) -> std::cmp::Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference().cmp(&a.goal_difference()))
        .then(b.goals_for.cmp(&a.goals_for))
}
