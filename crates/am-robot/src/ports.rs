//! The collaborators a robot calls into during a tick.

use am_core::{RobotId, Tick};
use am_mail::MailItem;

use crate::RobotObserver;

/// The pool side of the hand-off protocol, as seen from a robot.
///
/// The pool loads a robot through [`Robot::assign_hand_item`],
/// [`Robot::assign_tube_item`] and [`Robot::dispatch`]; the robot talks back
/// only through this trait.
///
/// [`Robot::assign_hand_item`]: crate::Robot::assign_hand_item
/// [`Robot::assign_tube_item`]: crate::Robot::assign_tube_item
/// [`Robot::dispatch`]: crate::Robot::dispatch
pub trait DispatchPool {
    /// `robot` is parked at the mailroom, empty and ready to be loaded.
    fn register_waiting(&mut self, robot: RobotId);

    /// Take back an item a robot could not deliver.
    fn return_item(&mut self, item: MailItem);
}

/// Where delivered mail goes.
pub trait DeliverySink {
    /// Accounting hook, called with the item immediately before
    /// [`deliver`][Self::deliver].
    fn record(&mut self, _item: &MailItem) {}

    /// Final hand-off.  Called exactly once per item, with its travel
    /// distance complete.
    fn deliver(&mut self, robot: RobotId, item: MailItem);
}

/// Everything a robot may touch during one [`Robot::tick`][crate::Robot::tick].
pub struct RobotContext<'a> {
    pub tick:     Tick,
    pub pool:     &'a mut dyn DispatchPool,
    pub sink:     &'a mut dyn DeliverySink,
    pub observer: &'a mut dyn RobotObserver,
}

impl<'a> RobotContext<'a> {
    pub fn new(
        tick:     Tick,
        pool:     &'a mut dyn DispatchPool,
        sink:     &'a mut dyn DeliverySink,
        observer: &'a mut dyn RobotObserver,
    ) -> Self {
        Self { tick, pool, sink, observer }
    }
}
