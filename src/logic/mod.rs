//! Fixture generation, scheduling, and statistics logic.

mod booking;
mod elimination;
mod group_stage;
mod round_robin;
mod scheduling;
mod statistics;

pub use booking::{Booking, BookingId, BookingService, VenueBook, VenueDirectory};
pub use elimination::generate_single_elimination;
pub use group_stage::generate_group_stage;
pub use round_robin::generate_round_robin;
pub use scheduling::{
    cancel_match, fixture, generate_fixture, update_match_result, KICKOFF_HOUR, MATCHES_PER_DAY,
    MATCH_INTERVAL_HOURS,
};
pub use statistics::{tournament_statistics, TournamentStatistics};
