//! Structured robot events.

use am_core::{Floor, MailId, RobotId, Tick};

use crate::RobotState;

/// Something observable a robot did during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotEvent {
    StateChanged {
        robot: RobotId,
        tick:  Tick,
        from:  RobotState,
        to:    RobotState,
    },

    /// A delivery leg started: fresh from the mailroom or after promoting
    /// the tube item.
    Departed {
        robot: RobotId,
        tick:  Tick,
        hand:  MailId,
        tube:  Option<MailId>,
    },

    Delivered {
        robot:    RobotId,
        tick:     Tick,
        mail:     MailId,
        floor:    Floor,
        distance: u32,
    },

    /// An item was still aboard when the robot got back to the mailroom and
    /// went back to the pool.  Only a pool that loads a robot
    /// outside the Waiting state can cause this.
    StrayItemReturned {
        robot: RobotId,
        tick:  Tick,
        mail:  MailId,
    },
}

/// Receives [`RobotEvent`]s as they happen.
///
/// The default implementation ignores everything.
pub trait RobotObserver {
    fn on_event(&mut self, _event: &RobotEvent) {}
}

/// A [`RobotObserver`] that does nothing.
pub struct NoopRobotObserver;

impl RobotObserver for NoopRobotObserver {}

/// Collects events, e.g. for the driver to forward after a tick.
impl RobotObserver for Vec<RobotEvent> {
    fn on_event(&mut self, event: &RobotEvent) {
        self.push(event.clone());
    }
}
