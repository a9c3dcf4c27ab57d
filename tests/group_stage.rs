//! Hybrid format: group partitioning, numbering offsets, knockout splice.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_fixtures::{generate_group_stage, RoundType, TeamRegistration, TournamentError};

fn registrations(n: usize) -> Vec<TeamRegistration> {
    (0..n)
        .map(|i| TeamRegistration::new(format!("Team {i}")))
        .collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

#[test]
fn five_teams_are_rejected() {
    let err = generate_group_stage(&registrations(5), &mut rng()).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::NotEnoughTeamsForGroups {
            required: 6,
            got: 5
        }
    ));
}

#[test]
fn twelve_teams_split_into_two_groups_plus_knockout() {
    let matches = generate_group_stage(&registrations(12), &mut rng()).unwrap();
    let group_matches: Vec<_> = matches
        .iter()
        .filter(|m| m.round_type == RoundType::GroupPlay)
        .collect();
    let knockout: Vec<_> = matches
        .iter()
        .filter(|m| m.round_type == RoundType::Knockout)
        .collect();
    // two groups of six, 15 round-robin matches each
    assert_eq!(group_matches.len(), 30);
    let groups: HashSet<u32> = group_matches.iter().map(|m| m.match_number / 1000).collect();
    assert_eq!(groups, HashSet::from([1, 2]));
    // four qualifiers: two semi-finals and a final
    assert_eq!(knockout.len(), 3);
}

#[test]
fn group_count_is_a_power_of_two() {
    let matches = generate_group_stage(&registrations(24), &mut rng()).unwrap();
    let groups: HashSet<u32> = matches
        .iter()
        .filter(|m| m.round_type == RoundType::GroupPlay)
        .map(|m| m.match_number / 1000)
        .collect();
    assert_eq!(groups.len(), 4);
}

#[test]
fn knockout_rounds_follow_group_rounds() {
    let matches = generate_group_stage(&registrations(12), &mut rng()).unwrap();
    let max_group_round = matches
        .iter()
        .filter(|m| m.round_type == RoundType::GroupPlay)
        .map(|m| m.round_number)
        .max()
        .unwrap();
    assert_eq!(max_group_round, 5); // groups of six
    for m in matches.iter().filter(|m| m.round_type == RoundType::Knockout) {
        assert!(m.round_number > max_group_round);
    }
}

#[test]
fn knockout_linkage_points_into_the_shared_arena() {
    let matches = generate_group_stage(&registrations(12), &mut rng()).unwrap();
    for (index, m) in matches.iter().enumerate() {
        if let Some(next) = m.next_match {
            assert!(next > index);
            assert_eq!(matches[next].round_type, RoundType::Knockout);
        }
    }
}

#[test]
fn remainder_teams_go_to_the_first_groups() {
    // seven teams: groups of four and three
    let matches = generate_group_stage(&registrations(7), &mut rng()).unwrap();
    let mut group_teams: HashMap<u32, HashSet<_>> = HashMap::new();
    for m in matches.iter().filter(|m| m.round_type == RoundType::GroupPlay) {
        let entry = group_teams.entry(m.match_number / 1000).or_default();
        entry.insert(m.home_team.unwrap());
        entry.insert(m.away_team.unwrap());
    }
    assert_eq!(group_teams[&1].len(), 4);
    assert_eq!(group_teams[&2].len(), 3);
}

#[test]
fn two_qualifiers_per_group_enter_the_knockout() {
    let matches = generate_group_stage(&registrations(12), &mut rng()).unwrap();
    let semis: Vec<_> = matches
        .iter()
        .filter(|m| m.round_type == RoundType::Knockout && m.next_match.is_some())
        .collect();
    assert_eq!(semis.len(), 2);
    for m in &semis {
        assert!(m.is_resolved());
    }

    let mut per_group: HashMap<u32, usize> = HashMap::new();
    for team in semis
        .iter()
        .flat_map(|m| [m.home_team.unwrap(), m.away_team.unwrap()])
    {
        let group_match = matches
            .iter()
            .find(|m| {
                m.round_type == RoundType::GroupPlay
                    && (m.home_team == Some(team) || m.away_team == Some(team))
            })
            .expect("qualifier never played in a group");
        *per_group.entry(group_match.match_number / 1000).or_default() += 1;
    }
    assert_eq!(per_group, HashMap::from([(1, 2), (2, 2)]));
}
