//! Single-elimination brackets: shape, byes, and advancement linkage.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_fixtures::{generate_single_elimination, TeamId};
use uuid::Uuid;

fn teams(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn five_teams_three_rounds_three_byes() {
    let matches = generate_single_elimination(&teams(5), &mut rng());
    assert_eq!(matches.len(), 7); // 4 + 2 + 1
    assert_eq!(matches.iter().map(|m| m.round_number).max(), Some(3));
    let byes = matches
        .iter()
        .filter(|m| m.round_number == 1 && m.home_team.is_some() && m.away_team.is_none())
        .count();
    assert_eq!(byes, 3);
    assert_eq!(matches.iter().filter(|m| m.next_match.is_none()).count(), 1);
}

#[test]
fn bye_occupants_are_advanced_at_generation() {
    let matches = generate_single_elimination(&teams(5), &mut rng());
    for bye in matches
        .iter()
        .filter(|m| m.round_number == 1 && m.away_team.is_none())
    {
        let next = &matches[bye.next_match.unwrap()];
        let slot = if bye.home_slot_in_next {
            next.home_team
        } else {
            next.away_team
        };
        assert_eq!(slot, bye.home_team);
        // the bye match itself never gets a result
        assert!(!bye.is_completed());
    }
}

#[test]
fn every_chain_reaches_the_final() {
    let matches = generate_single_elimination(&teams(8), &mut rng());
    assert_eq!(matches.len(), 7);
    let rounds = 3u32;
    for (index, m) in matches.iter().enumerate() {
        let mut steps = 0u32;
        let mut cursor = index;
        while let Some(next) = matches[cursor].next_match {
            cursor = next;
            steps += 1;
        }
        assert_eq!(steps, rounds - m.round_number);
        assert!(matches[cursor].next_match.is_none());
    }
}

#[test]
fn sibling_matches_fill_opposite_slots() {
    let matches = generate_single_elimination(&teams(8), &mut rng());
    let first_round: Vec<_> = matches.iter().filter(|m| m.round_number == 1).collect();
    assert_eq!(first_round.len(), 4);
    for pair in first_round.chunks(2) {
        assert_eq!(pair[0].next_match, pair[1].next_match);
        assert!(pair[0].home_slot_in_next);
        assert!(!pair[1].home_slot_in_next);
    }
}

#[test]
fn power_of_two_field_has_no_byes() {
    let matches = generate_single_elimination(&teams(8), &mut rng());
    assert!(matches
        .iter()
        .filter(|m| m.round_number == 1)
        .all(|m| m.is_resolved()));
}

#[test]
fn two_teams_play_a_single_final() {
    let matches = generate_single_elimination(&teams(2), &mut rng());
    assert_eq!(matches.len(), 1);
    assert!(matches[0].is_resolved());
    assert!(matches[0].next_match.is_none());
}

#[test]
fn every_team_is_seeded_exactly_once() {
    let team_ids = teams(5);
    let matches = generate_single_elimination(&team_ids, &mut rng());
    let mut seeded: Vec<TeamId> = matches
        .iter()
        .filter(|m| m.round_number == 1)
        .flat_map(|m| [m.home_team, m.away_team])
        .flatten()
        .collect();
    seeded.sort();
    let mut expected = team_ids;
    expected.sort();
    assert_eq!(seeded, expected);
}
