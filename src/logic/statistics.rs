//! Read-only statistics rollup over a tournament's settled state.

use serde::Serialize;

use crate::models::{RoundType, TeamId, TeamRegistration, Tournament, TournamentFormat};

/// Snapshot of a tournament's aggregate numbers, computed on demand and
/// never cached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TournamentStatistics {
    pub total_teams: usize,
    pub total_matches: usize,
    pub completed_matches: usize,
    /// Goals scored across completed matches only.
    pub total_goals: u32,
    pub average_goals_per_match: f64,
    /// Populated only once the tournament is finished.
    pub champion: Option<TeamId>,
    pub runner_up: Option<TeamId>,
    /// Extremal queries; ties resolve to the first registration encountered.
    pub top_scoring_team: Option<TeamId>,
    pub best_defensive_team: Option<TeamId>,
}

/// Aggregate a tournament's registrations and matches.
pub fn tournament_statistics(tournament: &Tournament) -> TournamentStatistics {
    let completed: Vec<_> = tournament
        .matches
        .iter()
        .filter(|m| m.is_completed())
        .collect();
    let total_goals: u32 = completed
        .iter()
        .filter_map(|m| Some(m.home_score? + m.away_score?))
        .sum();
    let average_goals_per_match = if completed.is_empty() {
        0.0
    } else {
        f64::from(total_goals) / completed.len() as f64
    };

    let (champion, runner_up) = if tournament.finished_at.is_some() {
        podium(tournament)
    } else {
        (None, None)
    };

    TournamentStatistics {
        total_teams: tournament.registrations.len(),
        total_matches: tournament.matches.len(),
        completed_matches: completed.len(),
        total_goals,
        average_goals_per_match,
        champion,
        runner_up,
        top_scoring_team: extremal(tournament, |candidate, best| {
            candidate.goals_for > best.goals_for
        }),
        best_defensive_team: extremal(tournament, |candidate, best| {
            candidate.goals_against < best.goals_against
        }),
    }
}

/// Champion and runner-up of a finished tournament: the final's winner and
/// loser for knockout play, the top two of the standings for a round-robin.
fn podium(tournament: &Tournament) -> (Option<TeamId>, Option<TeamId>) {
    match tournament.format {
        TournamentFormat::RoundRobin => {
            let standings = tournament.standings();
            (
                standings.first().map(|r| r.team_id),
                standings.get(1).map(|r| r.team_id),
            )
        }
        TournamentFormat::SingleElimination | TournamentFormat::GroupStageAndElimination => {
            let last = tournament
                .matches
                .iter()
                .find(|m| m.round_type == RoundType::Knockout && m.next_match.is_none());
            match last {
                Some(last) => (last.winner(), last.loser()),
                None => (None, None),
            }
        }
    }
}

/// First registration that no earlier one beats under `better`
/// (`better(candidate, incumbent)`), so ties keep the earliest.
fn extremal<F>(tournament: &Tournament, better: F) -> Option<TeamId>
where
    F: Fn(&TeamRegistration, &TeamRegistration) -> bool,
{
    let mut best: Option<&TeamRegistration> = None;
    for registration in &tournament.registrations {
        best = match best {
            Some(incumbent) if !better(registration, incumbent) => Some(incumbent),
            _ => Some(registration),
        };
    }
    best.map(|r| r.team_id)
}
