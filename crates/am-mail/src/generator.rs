//! Seeded random mail generation.

use am_core::{Building, Floor, MailId, SimRng, Tick};
use tracing::debug;

use crate::{ArrivalQueue, MailError, MailItem, MailResult};

/// Parameters for [`MailGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MailGeneratorConfig {
    /// How many items to create.
    pub mail_count: usize,
    /// Arrivals are spread uniformly over `0..=last_arrival_tick`.
    pub last_arrival_tick: u64,
    /// Lightest possible item, grams.
    pub min_weight: u32,
    /// Heaviest possible item, grams.  Values above the robots' per-item
    /// limit produce mail that will be rejected.
    pub max_weight: u32,
}

impl Default for MailGeneratorConfig {
    fn default() -> Self {
        Self {
            mail_count:        80,
            last_arrival_tick: 100,
            min_weight:        200,
            max_weight:        2_000,
        }
    }
}

impl MailGeneratorConfig {
    pub fn validate(&self) -> MailResult<()> {
        if self.min_weight > self.max_weight {
            return Err(MailError::Config(format!(
                "min_weight {} exceeds max_weight {}",
                self.min_weight, self.max_weight
            )));
        }
        Ok(())
    }
}

/// Produces a reproducible batch of mail for a building.
///
/// Arrival ticks, weights and destinations each draw from their own child
/// stream of the seed, so widening the weight range leaves every item's
/// arrival and destination unchanged.
pub struct MailGenerator {
    config:       MailGeneratorConfig,
    floors:       Vec<Floor>,
    arrivals:     SimRng,
    weights:      SimRng,
    destinations: SimRng,
}

impl MailGenerator {
    /// Create a generator addressing mail to every non-mailroom floor of
    /// `building`.
    pub fn new(config: MailGeneratorConfig, building: &Building, seed: u64) -> MailResult<Self> {
        config.validate()?;
        let floors = building.delivery_floors();
        if floors.is_empty() && config.mail_count > 0 {
            return Err(MailError::Config(
                "building has no floors besides the mailroom".into(),
            ));
        }
        let mut root = SimRng::new(seed);
        Ok(Self {
            config,
            floors,
            arrivals:     root.child(0),
            weights:      root.child(1),
            destinations: root.child(2),
        })
    }

    /// Generate all items, ids `0..mail_count`, in id order.
    pub fn generate(&mut self) -> Vec<MailItem> {
        let items: Vec<MailItem> = (0..self.config.mail_count as u64)
            .filter_map(|id| {
                let arrival = Tick(self.arrivals.gen_range(0..=self.config.last_arrival_tick));
                let weight  = self.weights.gen_range(self.config.min_weight..=self.config.max_weight);
                let dest    = *self.destinations.choose(&self.floors)?;
                Some(MailItem::new(MailId(id), dest, weight, arrival))
            })
            .collect();
        debug!(count = items.len(), "generated mail");
        items
    }

    /// Generate all items straight into an [`ArrivalQueue`].
    pub fn generate_queue(&mut self) -> ArrivalQueue {
        ArrivalQueue::from_items(self.generate())
    }
}
