//! Single-elimination bracket generation: power-of-two rounds, byes, and
//! next-match linkage.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{RoundType, TeamId, TournamentMatch};

/// Generate a knockout bracket for the given teams.
///
/// Teams are seeded in shuffled order (any permutation is a valid bracket;
/// determinism comes only from the injected `rng`). The bracket is built as
/// a flat arena, round by round: round `r` of `ceil(log2 n)` holds
/// `2^(rounds-r)` matches, and `next_match` holds the arena index the winner
/// advances into, with the home/away slot alternating by position parity.
///
/// The first `byes` round-1 matches hold a single team; its advancement into
/// the next round is applied at generation time, without recording a
/// completed match. Exactly one match (the final) has no next match.
pub fn generate_single_elimination<R: Rng + ?Sized>(
    teams: &[TeamId],
    rng: &mut R,
) -> Vec<TournamentMatch> {
    if teams.len() < 2 {
        return Vec::new();
    }
    let mut seeded: Vec<TeamId> = teams.to_vec();
    seeded.shuffle(rng);

    let n = seeded.len();
    let num_rounds = (usize::BITS - (n - 1).leading_zeros()) as usize; // ceil(log2 n)
    let slots_in_round_1 = 1usize << num_rounds;
    let byes = slots_in_round_1 - n;

    // All nodes first; match numbers are sequential in build order.
    let mut matches = Vec::with_capacity(slots_in_round_1 - 1);
    let mut round_base = Vec::with_capacity(num_rounds);
    let mut number = 0u32;
    for round in 1..=num_rounds {
        round_base.push(matches.len());
        for _ in 0..slots_in_round_1 >> round {
            number += 1;
            matches.push(TournamentMatch::new(round as u32, number, RoundType::Knockout));
        }
    }

    // Wire the advancement linkage toward the final.
    for round in 1..num_rounds {
        let base = round_base[round - 1];
        for position in 0..slots_in_round_1 >> round {
            let m = &mut matches[base + position];
            m.next_match = Some(round_base[round] + position / 2);
            m.home_slot_in_next = position % 2 == 0;
        }
    }

    // Seed round 1: bye matches first (home slot only), then full pairings.
    let mut remaining = seeded.into_iter();
    for index in 0..slots_in_round_1 / 2 {
        matches[index].home_team = remaining.next();
        if index >= byes {
            matches[index].away_team = remaining.next();
        }
    }

    // Byes advance their sole occupant immediately.
    for index in 0..byes {
        let team = matches[index].home_team;
        let home_slot = matches[index].home_slot_in_next;
        if let Some(next) = matches[index].next_match {
            if home_slot {
                matches[next].home_team = team;
            } else {
                matches[next].away_team = team;
            }
        }
    }

    matches
}
