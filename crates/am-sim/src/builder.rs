//! Fluent builder for constructing a [`Sim`].

use am_core::{RobotId, SimClock, SimConfig};
use am_mail::{ArrivalQueue, MailGenerator, MailGeneratorConfig};
use am_pool::{MailPool, PoolOrder};
use am_robot::{Robot, RobotLimits};

use crate::{Recorder, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                    |
/// |---------------------|----------------------------|
/// | `.arrivals(q)`      | Empty queue (no mail)      |
/// | `.generated(cfg)`   | Replaces `.arrivals`       |
/// | `.pool_order(o)`    | `PoolOrder::Arrival`       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .arrivals(load_arrivals_csv(path)?)
///     .pool_order(PoolOrder::FurthestFirst)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    arrivals:   Option<ArrivalQueue>,
    pool_order: PoolOrder,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            arrivals:   None,
            pool_order: PoolOrder::default(),
        }
    }

    /// Supply the mail to deliver.
    pub fn arrivals(mut self, arrivals: ArrivalQueue) -> Self {
        self.arrivals = Some(arrivals);
        self
    }

    /// Generate the mail from `generator`, seeded with the config's seed.
    pub fn generated(mut self, generator: MailGeneratorConfig) -> SimResult<Self> {
        let mut mail = MailGenerator::new(generator, &self.config.building, self.config.seed)?;
        self.arrivals = Some(mail.generate_queue());
        Ok(self)
    }

    pub fn pool_order(mut self, order: PoolOrder) -> Self {
        self.pool_order = order;
        self
    }

    /// Validate inputs, create the robots at the mailroom, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let arrivals = self.arrivals.unwrap_or_default();
        if let Some(bad) = arrivals
            .iter()
            .find(|m| !self.config.building.contains(m.destination()))
        {
            return Err(SimError::InvalidDestination {
                mail:  bad.id(),
                floor: bad.destination(),
            });
        }

        let limits = RobotLimits::from_config(&self.config);
        let robots = (0..self.config.robots as u32)
            .map(|i| Robot::new(RobotId(i), limits))
            .collect();

        Ok(Sim {
            total_mail: arrivals.len(),
            clock:      SimClock::new(),
            pool:       MailPool::new(self.pool_order),
            recorder:   Recorder::new(),
            config:     self.config,
            robots,
            arrivals,
        })
    }
}
