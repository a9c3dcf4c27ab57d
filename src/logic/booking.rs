//! Collaborator contracts for venue lookup and booking creation, plus the
//! in-memory implementation used by the web binary and the tests.

use chrono::{NaiveDate, Weekday};
use uuid::Uuid;

use crate::models::{ConfirmedMatchId, TeamId, Venue, VenueId};

/// Handle to a booking held by the booking collaborator.
pub type BookingId = Uuid;

/// Venue/time-slot lookup consumed by the scheduler.
pub trait VenueDirectory {
    /// Active venues in a stable order; matches are striped across this list.
    fn active_venues(&self) -> Vec<VenueId>;
    /// Open and close hour of a venue on the given weekday; None = closed.
    fn weekly_open_hours(&self, venue: VenueId, day: Weekday) -> Option<(u32, u32)>;
}

/// Booking-creation capability. Idempotency per (venue, date, hour) is
/// assumed of the implementation, not enforced here.
pub trait BookingService {
    fn create_booking(
        &mut self,
        organizer: &str,
        venue: VenueId,
        date: NaiveDate,
        hour: u32,
    ) -> BookingId;

    /// Materialize the externally visible confirmed-match record for a
    /// booking once both sides are known.
    fn create_confirmed_match(
        &mut self,
        booking: BookingId,
        home: TeamId,
        away: TeamId,
    ) -> ConfirmedMatchId;
}

/// A booking held by [`VenueBook`].
#[derive(Clone, Debug)]
pub struct Booking {
    pub id: BookingId,
    pub organizer: String,
    pub venue: VenueId,
    pub date: NaiveDate,
    pub hour: u32,
}

/// In-memory venue directory and booking book.
#[derive(Clone, Debug, Default)]
pub struct VenueBook {
    venues: Vec<Venue>,
    bookings: Vec<Booking>,
    confirmed: Vec<(ConfirmedMatchId, BookingId, TeamId, TeamId)>,
}

impl VenueBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_venue(&mut self, venue: Venue) -> VenueId {
        let id = venue.id;
        self.venues.push(venue);
        id
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }
}

impl VenueDirectory for VenueBook {
    fn active_venues(&self) -> Vec<VenueId> {
        self.venues
            .iter()
            .filter(|v| v.active)
            .map(|v| v.id)
            .collect()
    }

    fn weekly_open_hours(&self, venue: VenueId, day: Weekday) -> Option<(u32, u32)> {
        let venue = self.venues.iter().find(|v| v.id == venue)?;
        let hours = venue.weekly_hours[day.num_days_from_monday() as usize]?;
        Some((hours.open_hour, hours.close_hour))
    }
}

impl BookingService for VenueBook {
    fn create_booking(
        &mut self,
        organizer: &str,
        venue: VenueId,
        date: NaiveDate,
        hour: u32,
    ) -> BookingId {
        let id = Uuid::new_v4();
        self.bookings.push(Booking {
            id,
            organizer: organizer.to_string(),
            venue,
            date,
            hour,
        });
        id
    }

    fn create_confirmed_match(
        &mut self,
        booking: BookingId,
        home: TeamId,
        away: TeamId,
    ) -> ConfirmedMatchId {
        let id = Uuid::new_v4();
        self.confirmed.push((id, booking, home, away));
        id
    }
}
