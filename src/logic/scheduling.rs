//! Fixture scheduling service: generator selection, venue/time assignment,
//! result processing, and graph advancement.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;

use crate::models::{
    MatchId, MatchStatus, RoundType, TeamId, Tournament, TournamentError, TournamentFormat,
    TournamentMatch,
};

use super::booking::{BookingService, VenueDirectory};
use super::elimination::generate_single_elimination;
use super::group_stage::generate_group_stage;
use super::round_robin::generate_round_robin;

/// Kickoff hour of the first match on each match day.
pub const KICKOFF_HOUR: u32 = 10;
/// Hours between consecutive kickoffs on the same day.
pub const MATCH_INTERVAL_HOURS: u32 = 2;
/// Matches laid out per calendar day before rolling to the next.
pub const MATCHES_PER_DAY: usize = 4;

/// Generate the full fixture for a tournament: select the generator for its
/// format, stripe matches across the active venues, lay them out on the
/// calendar, verify venue availability, and confirm bookings for every fully
/// resolved match.
///
/// Atomic: every availability check runs before the first booking is
/// created, so a rejection leaves the tournament and the booking book
/// untouched.
pub fn generate_fixture<B, R>(
    tournament: &mut Tournament,
    book: &mut B,
    principal: &str,
    rng: &mut R,
) -> Result<(), TournamentError>
where
    B: VenueDirectory + BookingService,
    R: Rng + ?Sized,
{
    tournament.require_organizer(principal)?;
    if !tournament.matches.is_empty() {
        return Err(TournamentError::FixtureAlreadyGenerated);
    }
    if tournament.registration_open {
        return Err(TournamentError::RegistrationStillOpen);
    }
    if tournament.registrations.is_empty() {
        return Err(TournamentError::NoTeamsRegistered);
    }

    let team_ids: Vec<TeamId> = tournament.registrations.iter().map(|r| r.team_id).collect();
    let mut matches = match tournament.format {
        TournamentFormat::RoundRobin => generate_round_robin(&team_ids),
        TournamentFormat::SingleElimination => generate_single_elimination(&team_ids, rng),
        TournamentFormat::GroupStageAndElimination => {
            generate_group_stage(&tournament.registrations, rng)?
        }
    };

    assign_venues_and_times(&mut matches, book, tournament.start_date);
    check_venue_availability(&matches, book)?;
    confirm_resolved_matches(&mut matches, book, &tournament.organizer);

    log::info!(
        "generated {} matches for tournament {}",
        matches.len(),
        tournament.id
    );
    tournament.matches = matches;
    Ok(())
}

/// Record a result: mark the match completed, update both registrations, and
/// advance the winner through the graph. `now` is the caller's clock instant,
/// used to derive the match's current status.
pub fn update_match_result<B>(
    tournament: &mut Tournament,
    book: &mut B,
    principal: &str,
    match_id: MatchId,
    home_score: i64,
    away_score: i64,
    now: NaiveDateTime,
) -> Result<(), TournamentError>
where
    B: BookingService + ?Sized,
{
    tournament.require_organizer(principal)?;
    let index = tournament
        .match_index(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if home_score < 0 || away_score < 0 {
        return Err(TournamentError::NegativeScore);
    }

    let m = &tournament.matches[index];
    match m.status(now) {
        MatchStatus::Completed => return Err(TournamentError::MatchAlreadyCompleted),
        MatchStatus::Cancelled => return Err(TournamentError::MatchCancelled),
        MatchStatus::Scheduled | MatchStatus::InProgress => {}
    }
    let (Some(home), Some(away)) = (m.home_team, m.away_team) else {
        return Err(TournamentError::MatchNotResolved);
    };
    // Every check runs before the first mutation: a rejection below this
    // point would otherwise leave a half-recorded result.
    if tournament.registration(home).is_none() {
        return Err(TournamentError::TeamNotRegistered(home));
    }
    if tournament.registration(away).is_none() {
        return Err(TournamentError::TeamNotRegistered(away));
    }

    let (home_score, away_score) = (home_score as u32, away_score as u32);
    {
        let m = &mut tournament.matches[index];
        m.home_score = Some(home_score);
        m.away_score = Some(away_score);
    }
    let organizer = tournament.organizer.clone();
    confirm_match(&mut tournament.matches[index], book, &organizer);

    apply_result_to_standings(tournament, home, away, home_score, away_score);
    advance_after_result(tournament, index, book, now);
    Ok(())
}

/// Cancel a match that has not been completed (organizer only).
pub fn cancel_match(
    tournament: &mut Tournament,
    principal: &str,
    match_id: MatchId,
    now: NaiveDateTime,
) -> Result<(), TournamentError> {
    tournament.require_organizer(principal)?;
    let index = tournament
        .match_index(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    match tournament.matches[index].status(now) {
        MatchStatus::Completed => Err(TournamentError::MatchAlreadyCompleted),
        MatchStatus::Cancelled => Err(TournamentError::MatchCancelled),
        MatchStatus::Scheduled | MatchStatus::InProgress => {
            tournament.matches[index].cancelled = true;
            Ok(())
        }
    }
}

/// All matches in display order: by round, then match number.
pub fn fixture(tournament: &Tournament) -> Vec<&TournamentMatch> {
    let mut ordered: Vec<_> = tournament.matches.iter().collect();
    ordered.sort_by_key(|m| (m.round_number, m.match_number));
    ordered
}

/// Stripe matches across the active venues (modulo the venue count) and lay
/// them out on the calendar: MATCHES_PER_DAY matches per day from the start
/// date, kicking off at KICKOFF_HOUR with MATCH_INTERVAL_HOURS between them.
/// With no active venues, matches keep times but no venue.
fn assign_venues_and_times(
    matches: &mut [TournamentMatch],
    venues: &impl VenueDirectory,
    start_date: NaiveDate,
) {
    let venue_ids = venues.active_venues();
    for (index, m) in matches.iter_mut().enumerate() {
        if !venue_ids.is_empty() {
            m.venue = Some(venue_ids[index % venue_ids.len()]);
        }
        let date = start_date + Duration::days((index / MATCHES_PER_DAY) as i64);
        let hour = KICKOFF_HOUR + (index % MATCHES_PER_DAY) as u32 * MATCH_INTERVAL_HOURS;
        m.scheduled_at = date.and_hms_opt(hour, 0, 0);
    }
}

/// Every resolved, venue-assigned match must fall inside its venue's weekly
/// open hours for the scheduled day.
fn check_venue_availability(
    matches: &[TournamentMatch],
    venues: &impl VenueDirectory,
) -> Result<(), TournamentError> {
    for m in matches {
        if !m.is_resolved() {
            continue;
        }
        let (Some(venue), Some(at)) = (m.venue, m.scheduled_at) else {
            continue;
        };
        let (weekday, hour) = (at.weekday(), at.hour());
        match venues.weekly_open_hours(venue, weekday) {
            Some((open, close)) if open <= hour && hour < close => {}
            _ => return Err(TournamentError::VenueUnavailable { weekday, hour }),
        }
    }
    Ok(())
}

fn confirm_resolved_matches<B: BookingService + ?Sized>(
    matches: &mut [TournamentMatch],
    book: &mut B,
    organizer: &str,
) {
    for m in matches.iter_mut() {
        confirm_match(m, book, organizer);
    }
}

/// Create the booking plus confirmed-match record for a resolved,
/// venue-assigned match that does not have one yet.
fn confirm_match<B: BookingService + ?Sized>(
    m: &mut TournamentMatch,
    book: &mut B,
    organizer: &str,
) {
    if m.confirmed_match.is_some() {
        return;
    }
    let (Some(home), Some(away)) = (m.home_team, m.away_team) else {
        return;
    };
    let (Some(venue), Some(at)) = (m.venue, m.scheduled_at) else {
        return;
    };
    let booking = book.create_booking(organizer, venue, at.date(), at.hour());
    m.confirmed_match = Some(book.create_confirmed_match(booking, home, away));
}

/// Winner takes 3 points and a win, the loser a loss; a draw gives both
/// sides a point and a draw. Goals accumulate unconditionally.
fn apply_result_to_standings(
    tournament: &mut Tournament,
    home: TeamId,
    away: TeamId,
    home_score: u32,
    away_score: u32,
) {
    if let Some(registration) = tournament.registration_mut(home) {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => registration.record_win(home_score, away_score),
            std::cmp::Ordering::Less => registration.record_loss(home_score, away_score),
            std::cmp::Ordering::Equal => registration.record_draw(home_score, away_score),
        }
    }
    if let Some(registration) = tournament.registration_mut(away) {
        match away_score.cmp(&home_score) {
            std::cmp::Ordering::Greater => registration.record_win(away_score, home_score),
            std::cmp::Ordering::Less => registration.record_loss(away_score, home_score),
            std::cmp::Ordering::Equal => registration.record_draw(away_score, home_score),
        }
    }
}

/// Round-robin tournaments finish once every playable match has a result.
/// Knockout matches push their winner into the linked next match; the final
/// (no next match) finishes the tournament. A drawn knockout match advances
/// nobody.
fn advance_after_result<B: BookingService + ?Sized>(
    tournament: &mut Tournament,
    index: usize,
    book: &mut B,
    now: NaiveDateTime,
) {
    match tournament.format {
        TournamentFormat::RoundRobin => {
            let all_done = tournament
                .matches
                .iter()
                .all(|m| m.cancelled || m.is_completed());
            if all_done {
                tournament.finished_at = Some(now);
                log::info!("tournament {} finished", tournament.id);
            }
        }
        TournamentFormat::SingleElimination | TournamentFormat::GroupStageAndElimination => {
            let m = &tournament.matches[index];
            let (winner, next, home_slot, round_type) =
                (m.winner(), m.next_match, m.home_slot_in_next, m.round_type);
            match next {
                Some(next_index) => {
                    let Some(winner) = winner else {
                        return;
                    };
                    {
                        let next_match = &mut tournament.matches[next_index];
                        if home_slot {
                            next_match.home_team = Some(winner);
                        } else {
                            next_match.away_team = Some(winner);
                        }
                    }
                    // A freshly resolved next match gets its booking now,
                    // whether or not its result ever arrives.
                    let organizer = tournament.organizer.clone();
                    confirm_match(&mut tournament.matches[next_index], book, &organizer);
                }
                // Group-play matches of the hybrid format also have no next
                // match, but only the knockout final ends the tournament.
                None if round_type == RoundType::Knockout => {
                    tournament.finished_at = Some(now);
                    log::info!("tournament {} finished", tournament.id);
                }
                None => {}
            }
        }
    }
}
