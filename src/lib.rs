//! Tournament fixture engine: library with models, fixture generators, the
//! scheduling service, and statistics.

pub mod logic;
pub mod models;

pub use logic::{
    cancel_match, fixture, generate_fixture, generate_group_stage, generate_round_robin,
    generate_single_elimination, tournament_statistics, update_match_result, Booking, BookingId,
    BookingService, TournamentStatistics, VenueBook, VenueDirectory,
};
pub use models::{
    ConfirmedMatchId, ErrorKind, MatchId, MatchStatus, OpenHours, RoundType, TeamId,
    TeamRegistration, Tournament, TournamentError, TournamentFormat, TournamentId,
    TournamentMatch, TournamentPatch, Venue, VenueId,
};
