//! Simulation observer trait for progress reporting and data collection.

use am_core::Tick;
use am_mail::MailItem;
use am_robot::RobotEvent;

use crate::{DeliveryRecord, DeliveryStats};

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:              Tick,
    /// Items that entered the pool this tick.
    pub arrived:           usize,
    /// Items delivered this tick.
    pub delivered:         usize,
    /// Items still waiting in the pool after loading.
    pub pending:           usize,
    pub waiting_robots:    usize,
    pub delivering_robots: usize,
    pub returning_robots:  usize,
}

/// Final state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimSummary {
    /// First tick that was not simulated.
    pub final_tick:  Tick,
    pub stats:       DeliveryStats,
    /// Items not yet arrived, still pooled, or still aboard a robot.
    pub undelivered: usize,
}

impl SimSummary {
    /// `true` when every item was either delivered or rejected.
    pub fn is_complete(&self) -> bool {
        self.undelivered == 0
    }
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_delivery(&mut self, record: &DeliveryRecord) {
///         println!("{} delivered {}", record.robot, record.item);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every state change, departure, delivery and stray item a
    /// robot reports.
    fn on_robot_event(&mut self, _event: &RobotEvent) {}

    /// Called once per delivered item.
    fn on_delivery(&mut self, _record: &DeliveryRecord) {}

    /// Called once per item the robots refused as overweight.
    fn on_rejected(&mut self, _tick: Tick, _item: &MailItem) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _summary: &SimSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
