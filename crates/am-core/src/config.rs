//! Top-level simulation configuration.

use crate::{AmError, AmResult, Building, Tick};

/// Heaviest item (grams) a robot will accept into either slot.
pub const MAX_ITEM_WEIGHT: u32 = 2_000;

/// Deliveries a robot may complete in one run before it must return to the
/// mailroom.  Matches the two-slot (hand + tube) capacity.
pub const MAX_DELIVERY_LEGS: u32 = 2;

/// Simulation configuration.
///
/// Typically built in code or loaded from JSON by the application crate and
/// handed to the simulation builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Floor range and mailroom location.
    pub building: Building,

    /// Number of robots, all starting at the mailroom.
    pub robots: usize,

    /// Per-item weight limit enforced by every robot slot.
    pub max_item_weight: u32,

    /// Delivery legs allowed per run.  Anything above this is a pool defect.
    pub max_delivery_legs: u32,

    /// Hard stop: the run ends at this tick even with mail outstanding.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            building:          Building::default(),
            robots:            3,
            max_item_weight:   MAX_ITEM_WEIGHT,
            max_delivery_legs: MAX_DELIVERY_LEGS,
            total_ticks:       10_000,
            seed:              30_006,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations the simulator cannot run.
    pub fn validate(&self) -> AmResult<()> {
        self.building.validate()?;
        if self.robots == 0 {
            return Err(AmError::Config("at least one robot is required".into()));
        }
        if u32::try_from(self.robots).is_err() {
            return Err(AmError::Config(format!("too many robots: {}", self.robots)));
        }
        if self.max_delivery_legs == 0 {
            return Err(AmError::Config("max_delivery_legs must be at least 1".into()));
        }
        if self.max_item_weight == 0 {
            return Err(AmError::Config("max_item_weight must be positive".into()));
        }
        Ok(())
    }
}
