//! Delivery accounting.

use std::collections::BTreeMap;

use am_core::{RobotId, Tick};
use am_mail::MailItem;
use am_robot::DeliverySink;

/// One completed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub robot: RobotId,
    pub tick:  Tick,
    pub item:  MailItem,
}

impl DeliveryRecord {
    /// Ticks between the item reaching the mailroom and being delivered.
    pub fn wait_ticks(&self) -> u64 {
        self.tick.since(self.item.arrival())
    }
}

/// Running delivery statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered:        u64,
    pub rejected:         u64,
    /// Sum of item travel distances, floors.
    pub total_distance:   u64,
    pub total_wait_ticks: u64,
    pub max_wait_ticks:   u64,
    pub per_robot:        BTreeMap<RobotId, u64>,
}

impl DeliveryStats {
    /// Average arrival-to-delivery time, `None` before the first delivery.
    pub fn mean_wait_ticks(&self) -> Option<f64> {
        (self.delivered > 0).then(|| self.total_wait_ticks as f64 / self.delivered as f64)
    }
}

/// Keeps [`DeliveryStats`] up to date.
#[derive(Debug, Default)]
pub struct Accountant {
    stats: DeliveryStats,
}

impl Accountant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_delivery(&mut self, item: &MailItem, tick: Tick) {
        let wait = tick.since(item.arrival());
        self.stats.delivered        += 1;
        self.stats.total_distance   += u64::from(item.distance());
        self.stats.total_wait_ticks += wait;
        self.stats.max_wait_ticks    = self.stats.max_wait_ticks.max(wait);
    }

    pub fn record_robot(&mut self, robot: RobotId) {
        *self.stats.per_robot.entry(robot).or_default() += 1;
    }

    pub fn record_rejection(&mut self, _item: &MailItem) {
        self.stats.rejected += 1;
    }

    pub fn stats(&self) -> &DeliveryStats {
        &self.stats
    }
}

/// The driver's [`DeliverySink`]: feeds the [`Accountant`] and buffers
/// deliveries until the driver hands them to the observer.
#[derive(Debug, Default)]
pub struct Recorder {
    now:        Tick,
    accountant: Accountant,
    buffered:   Vec<DeliveryRecord>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp subsequent deliveries with `tick`.
    pub fn set_tick(&mut self, tick: Tick) {
        self.now = tick;
    }

    pub fn accountant(&self) -> &Accountant {
        &self.accountant
    }

    pub fn accountant_mut(&mut self) -> &mut Accountant {
        &mut self.accountant
    }

    /// Take the deliveries buffered since the last drain.
    pub fn drain_deliveries(&mut self) -> Vec<DeliveryRecord> {
        std::mem::take(&mut self.buffered)
    }
}

impl DeliverySink for Recorder {
    fn record(&mut self, item: &MailItem) {
        self.accountant.record_delivery(item, self.now);
    }

    fn deliver(&mut self, robot: RobotId, item: MailItem) {
        self.accountant.record_robot(robot);
        self.buffered.push(DeliveryRecord { robot, tick: self.now, item });
    }
}
