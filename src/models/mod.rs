//! Data structures: tournaments, team registrations, matches, venues.

mod fixture;
mod team;
mod tournament;
mod venue;

pub use fixture::{ConfirmedMatchId, MatchId, MatchStatus, RoundType, TournamentMatch};
pub use team::{standings_cmp, TeamId, TeamRegistration};
pub use tournament::{
    ErrorKind, Tournament, TournamentError, TournamentFormat, TournamentId, TournamentPatch,
};
pub use venue::{OpenHours, Venue, VenueId};
