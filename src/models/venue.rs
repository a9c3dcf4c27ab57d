//! Venues: identity and weekly open hours (the lookup the scheduler consumes).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a venue.
pub type VenueId = Uuid;

/// Open/close hour for one weekday. Half-open: a match at `close_hour` is
/// outside the window.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OpenHours {
    pub open_hour: u32,
    pub close_hour: u32,
}

impl OpenHours {
    pub fn covers(&self, hour: u32) -> bool {
        self.open_hour <= hour && hour < self.close_hour
    }
}

/// A bookable venue with per-weekday open hours.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub active: bool,
    /// Monday first; None = closed that day.
    pub weekly_hours: [Option<OpenHours>; 7],
}

impl Venue {
    /// A venue with the same open hours every day of the week.
    pub fn open_daily(name: impl Into<String>, open_hour: u32, close_hour: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            active: true,
            weekly_hours: [Some(OpenHours {
                open_hour,
                close_hour,
            }); 7],
        }
    }
}
