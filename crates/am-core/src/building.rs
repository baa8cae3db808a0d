//! Building topology: a contiguous range of floors with one mailroom.

use crate::{AmError, AmResult};

/// A floor number.  Signed so basements can sit below a ground-level
/// mailroom.
pub type Floor = i32;

/// The floors robots can visit and where the mailroom is.
///
/// Robots move one floor per tick, so the building needs no geometry beyond
/// the floor range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    /// Lowest reachable floor (inclusive).
    pub lowest_floor: Floor,
    /// Highest reachable floor (inclusive).
    pub highest_floor: Floor,
    /// Floor robots load at and return to.
    pub mailroom_floor: Floor,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            lowest_floor:   0,
            highest_floor:  10,
            mailroom_floor: 0,
        }
    }
}

impl Building {
    /// `true` if `floor` lies inside the building.
    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        (self.lowest_floor..=self.highest_floor).contains(&floor)
    }

    /// Number of floors, mailroom included.
    #[inline]
    pub fn floor_count(&self) -> usize {
        (self.highest_floor - self.lowest_floor + 1).max(0) as usize
    }

    /// Every floor mail can be addressed to: the whole range minus the
    /// mailroom.
    pub fn delivery_floors(&self) -> Vec<Floor> {
        (self.lowest_floor..=self.highest_floor)
            .filter(|&f| f != self.mailroom_floor)
            .collect()
    }

    /// Check the floor range is non-empty and holds the mailroom.
    pub fn validate(&self) -> AmResult<()> {
        if self.lowest_floor > self.highest_floor {
            return Err(AmError::Config(format!(
                "lowest floor {} is above highest floor {}",
                self.lowest_floor, self.highest_floor
            )));
        }
        if !self.contains(self.mailroom_floor) {
            return Err(AmError::Config(format!(
                "mailroom floor {} is outside {}..={}",
                self.mailroom_floor, self.lowest_floor, self.highest_floor
            )));
        }
        Ok(())
    }
}
