//! Standings ordering and the statistics rollup.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_fixtures::{
    generate_fixture, tournament_statistics, update_match_result, Tournament, TournamentFormat,
    Venue, VenueBook,
};

const ORGANIZER: &str = "alice";

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn league() -> Tournament {
    Tournament::new(
        "Stats Cup",
        ORGANIZER,
        TournamentFormat::RoundRobin,
        start_date(),
    )
}

#[test]
fn points_rank_first() {
    let mut t = league();
    let a = t.register_team("A").unwrap();
    let b = t.register_team("B").unwrap();
    t.registration_mut(b).unwrap().record_draw(1, 1);
    t.registration_mut(a).unwrap().record_win(2, 0);
    let standings = t.standings();
    assert_eq!(standings[0].team_id, a);
    assert_eq!(standings[1].team_id, b);
}

#[test]
fn goal_difference_breaks_point_ties() {
    let mut t = league();
    let b = t.register_team("B").unwrap();
    let a = t.register_team("A").unwrap();
    t.registration_mut(b).unwrap().record_win(1, 0); // 3 pts, gd +1
    t.registration_mut(a).unwrap().record_win(4, 0); // 3 pts, gd +4
    assert_eq!(t.standings()[0].team_id, a);
}

#[test]
fn goals_for_breaks_full_ties() {
    let mut t = league();
    let a = t.register_team("A").unwrap();
    let b = t.register_team("B").unwrap();
    t.registration_mut(a).unwrap().record_win(2, 1); // gd +1, gf 2
    t.registration_mut(b).unwrap().record_win(3, 2); // gd +1, gf 3
    assert_eq!(t.standings()[0].team_id, b);
}

#[test]
fn full_ties_keep_registration_order() {
    let mut t = league();
    let a = t.register_team("A").unwrap();
    let b = t.register_team("B").unwrap();
    t.registration_mut(a).unwrap().record_draw(1, 1);
    t.registration_mut(b).unwrap().record_draw(1, 1);
    assert_eq!(t.standings()[0].team_id, a);
    assert_eq!(t.standings()[1].team_id, b);
}

#[test]
fn goal_totals_count_completed_matches_only() {
    let mut t = league();
    for i in 0..4 {
        t.register_team(format!("Team {i}")).unwrap();
    }
    t.close_registration(ORGANIZER).unwrap();
    let mut book = VenueBook::new();
    book.add_venue(Venue::open_daily("Main pitch", 8, 22));
    let mut rng = StdRng::seed_from_u64(5);
    generate_fixture(&mut t, &mut book, ORGANIZER, &mut rng).unwrap();

    let now = start_date().and_hms_opt(9, 0, 0).unwrap();
    let ids: Vec<_> = t.matches.iter().map(|m| m.id).collect();
    update_match_result(&mut t, &mut book, ORGANIZER, ids[0], 3, 1, now).unwrap();
    update_match_result(&mut t, &mut book, ORGANIZER, ids[1], 0, 0, now).unwrap();

    let stats = tournament_statistics(&t);
    assert_eq!(stats.total_teams, 4);
    assert_eq!(stats.total_matches, 6);
    assert_eq!(stats.completed_matches, 2);
    assert_eq!(stats.total_goals, 4);
    assert!((stats.average_goals_per_match - 2.0).abs() < f64::EPSILON);
    // four matches still open: no champion yet
    assert_eq!(stats.champion, None);
    assert_eq!(stats.runner_up, None);
}

#[test]
fn round_robin_podium_comes_from_the_standings() {
    let mut t = league();
    for i in 0..2 {
        t.register_team(format!("Team {i}")).unwrap();
    }
    t.close_registration(ORGANIZER).unwrap();
    let mut book = VenueBook::new();
    book.add_venue(Venue::open_daily("Main pitch", 8, 22));
    let mut rng = StdRng::seed_from_u64(5);
    generate_fixture(&mut t, &mut book, ORGANIZER, &mut rng).unwrap();

    let now = start_date().and_hms_opt(9, 0, 0).unwrap();
    let m = t.matches[0].clone();
    update_match_result(&mut t, &mut book, ORGANIZER, m.id, 4, 2, now).unwrap();

    let stats = tournament_statistics(&t);
    assert_eq!(stats.champion, m.home_team);
    assert_eq!(stats.runner_up, m.away_team);
}

#[test]
fn extremal_queries_resolve_ties_to_the_first_registered() {
    let mut t = league();
    let a = t.register_team("A").unwrap();
    let _b = t.register_team("B").unwrap();
    // identical accumulators on both sides
    for team in t.registrations.iter().map(|r| r.team_id).collect::<Vec<_>>() {
        t.registration_mut(team).unwrap().record_draw(2, 2);
    }
    let stats = tournament_statistics(&t);
    assert_eq!(stats.top_scoring_team, Some(a));
    assert_eq!(stats.best_defensive_team, Some(a));
}

#[test]
fn top_scorer_and_best_defense() {
    let mut t = league();
    let a = t.register_team("A").unwrap();
    let b = t.register_team("B").unwrap();
    let c = t.register_team("C").unwrap();
    t.registration_mut(a).unwrap().record_win(5, 3);
    t.registration_mut(b).unwrap().record_loss(1, 2);
    t.registration_mut(c).unwrap().record_draw(0, 0);
    let stats = tournament_statistics(&t);
    assert_eq!(stats.top_scoring_team, Some(a));
    assert_eq!(stats.best_defensive_team, Some(c));
}
