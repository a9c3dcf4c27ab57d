//! Hybrid format: round-robin groups feeding a knockout phase.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{standings_cmp, TeamId, TeamRegistration, TournamentError, TournamentMatch};

use super::elimination::generate_single_elimination;
use super::round_robin::generate_round_robin;

const MIN_GROUP_SIZE: usize = 3;
const MAX_GROUP_SIZE: usize = 6;
const MIN_GROUPS: usize = 2;
/// Match numbers within group `g` are offset by `(g + 1) * GROUP_NUMBER_SPAN`
/// so numbers stay globally unique and identify their group.
const GROUP_NUMBER_SPAN: u32 = 1000;

/// Generate the group-stage matches plus the knockout bracket fed by each
/// group's top two teams.
///
/// Qualifiers are ranked with the standings comparator over the
/// registrations as they stand when the fixture is generated. With freshly
/// registered teams every accumulator is zero, so each group's first two
/// teams in shuffled order qualify; group results never re-seed the bracket.
/// Knockout round numbers continue after the last group round.
pub fn generate_group_stage<R: Rng + ?Sized>(
    registrations: &[TeamRegistration],
    rng: &mut R,
) -> Result<Vec<TournamentMatch>, TournamentError> {
    let n = registrations.len();
    if n < MIN_GROUP_SIZE * MIN_GROUPS {
        return Err(TournamentError::NotEnoughTeamsForGroups {
            required: MIN_GROUP_SIZE * MIN_GROUPS,
            got: n,
        });
    }

    let mut shuffled: Vec<&TeamRegistration> = registrations.iter().collect();
    shuffled.shuffle(rng);

    let groups = partition(&shuffled, optimal_group_count(n));

    let mut matches = Vec::new();
    let mut max_group_round = 0;
    let mut qualifiers: Vec<TeamId> = Vec::with_capacity(groups.len() * 2);
    for (group_index, group) in groups.iter().enumerate() {
        let team_ids: Vec<TeamId> = group.iter().map(|r| r.team_id).collect();
        let mut group_matches = generate_round_robin(&team_ids);
        for m in &mut group_matches {
            m.match_number += (group_index as u32 + 1) * GROUP_NUMBER_SPAN;
            max_group_round = max_group_round.max(m.round_number);
        }
        matches.extend(group_matches);

        let mut ranked = group.clone();
        ranked.sort_by(|a, b| standings_cmp(a, b));
        qualifiers.extend(ranked.iter().take(2).map(|r| r.team_id));
    }

    // Splice the bracket onto the group arena: indices and rounds shift.
    let group_match_count = matches.len();
    let mut knockout = generate_single_elimination(&qualifiers, rng);
    for m in &mut knockout {
        m.round_number += max_group_round;
        if let Some(next) = m.next_match.as_mut() {
            *next += group_match_count;
        }
    }
    matches.extend(knockout);
    Ok(matches)
}

/// Smallest power-of-two group count between `ceil(n / MAX_GROUP_SIZE)` and
/// `floor(n / MIN_GROUP_SIZE)`, never fewer than two groups; falls back to
/// the minimum feasible count when no power of two fits the range.
fn optimal_group_count(n: usize) -> usize {
    let lo = ((n + MAX_GROUP_SIZE - 1) / MAX_GROUP_SIZE).max(MIN_GROUPS);
    let hi = n / MIN_GROUP_SIZE;
    (lo..=hi).find(|count| count.is_power_of_two()).unwrap_or(lo)
}

/// Split into `count` groups; remainder teams go to the first groups, one
/// extra each.
fn partition<'a>(
    teams: &[&'a TeamRegistration],
    count: usize,
) -> Vec<Vec<&'a TeamRegistration>> {
    let base = teams.len() / count;
    let extra = teams.len() % count;
    let mut groups = Vec::with_capacity(count);
    let mut cursor = 0;
    for group_index in 0..count {
        let size = base + usize::from(group_index < extra);
        groups.push(teams[cursor..cursor + size].to_vec());
        cursor += size;
    }
    groups
}
