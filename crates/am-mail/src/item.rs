//! The `MailItem` carried by robots.

use std::fmt;

use am_core::{Floor, MailId, Tick};

/// One piece of mail.
///
/// Identity, weight and arrival tick are fixed at creation.  The destination
/// can be rewritten by whoever owns the item, and `distance` accumulates the
/// floors the item has travelled aboard a delivering robot.
///
/// Items are moved by value: the pool, a robot slot and the delivery sink
/// each own the item in turn, never at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailItem {
    id:          MailId,
    weight:      u32,
    arrival:     Tick,
    destination: Floor,
    distance:    u32,
}

impl MailItem {
    pub fn new(id: MailId, destination: Floor, weight: u32, arrival: Tick) -> Self {
        Self { id, weight, arrival, destination, distance: 0 }
    }

    #[inline]
    pub fn id(&self) -> MailId {
        self.id
    }

    /// Weight in grams.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Tick at which the item reached the mailroom.
    #[inline]
    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    #[inline]
    pub fn destination(&self) -> Floor {
        self.destination
    }

    pub fn set_destination(&mut self, floor: Floor) {
        self.destination = floor;
    }

    /// Floors travelled while aboard a delivering robot.
    #[inline]
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Add `floors` to the travel accumulator.
    #[inline]
    pub fn record_movement(&mut self, floors: u32) {
        self.distance += floors;
    }

    /// Forget any recorded travel, e.g. when the item goes back to the pool.
    pub fn reset_activity(&mut self) {
        self.distance = 0;
    }
}

impl fmt::Display for MailItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (dest {}, {}g, arrived {})",
            self.id, self.destination, self.weight, self.arrival
        )
    }
}
