//! Round-robin fixture generation (circle method).

use crate::models::{RoundType, TeamId, TournamentMatch};

/// Generate a full round-robin calendar: every team meets every other team
/// exactly once.
///
/// Circle method: one slot stays fixed, the remaining slots rotate one step
/// per round. An odd team count gets a synthetic bye opponent; pairings
/// against it are skipped, not materialized. `n` teams play `n-1` rounds
/// (`n` rounds when `n` is odd) of `n/2` matches each.
///
/// Matches carry a 1-based `round_number` and a contiguous `match_number`
/// starting at 1; venue and time are assigned later by the scheduler. Fewer
/// than two teams yield no matches.
pub fn generate_round_robin(teams: &[TeamId]) -> Vec<TournamentMatch> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut slots: Vec<Option<TeamId>> = teams.iter().copied().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None); // bye slot
    }
    let len = slots.len();
    let rounds = len - 1;
    let matches_per_round = teams.len() / 2;

    let mut matches = Vec::with_capacity(rounds * matches_per_round);
    for round in 0..rounds {
        let mut position = 0;
        for i in 0..len / 2 {
            let (Some(home), Some(away)) = (slots[i], slots[len - 1 - i]) else {
                continue; // pairing against the bye
            };
            let match_number = (round * matches_per_round + position + 1) as u32;
            let mut m = TournamentMatch::new(round as u32 + 1, match_number, RoundType::GroupPlay);
            m.home_team = Some(home);
            m.away_team = Some(away);
            matches.push(m);
            position += 1;
        }
        slots[1..].rotate_right(1);
    }
    matches
}
