//! The `MailPool`.

use std::collections::VecDeque;

use am_core::RobotId;
use am_mail::MailItem;
use am_robot::{DispatchPool, Robot, RobotError};
use tracing::{debug, warn};

use crate::{PoolError, PoolResult};

/// Which pending item a robot gets first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PoolOrder {
    /// Oldest arrival first; items arriving together keep insertion order.
    #[default]
    Arrival,
    /// Highest destination floor first, ties broken by arrival.
    FurthestFirst,
}

/// Outcome of one [`MailPool::load_robots`] pass.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Robots dispatched during this pass.
    pub dispatched: Vec<RobotId>,
    /// Items the robots refused as overweight.  They leave the pool for
    /// good; the caller owns them now.
    pub rejected: Vec<MailItem>,
}

/// Holds undelivered mail and the queue of robots waiting for it.
///
/// The pool never holds a robot.  Robots announce themselves by id and the
/// pool is lent the robot list for each loading pass.
#[derive(Debug, Default)]
pub struct MailPool {
    order:    PoolOrder,
    pending:  Vec<MailItem>,
    waiting:  VecDeque<RobotId>,
}

impl MailPool {
    pub fn new(order: PoolOrder) -> Self {
        Self { order, ..Self::default() }
    }

    #[inline]
    pub fn order(&self) -> PoolOrder {
        self.order
    }

    /// Accept a newly arrived item.
    pub fn add_item(&mut self, item: MailItem) {
        self.pending.push(item);
    }

    /// Items waiting for a robot.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Robots registered and not yet loaded.
    #[inline]
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// `true` when no mail is waiting for a robot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Load every registered robot that can get mail, then dispatch it.
    ///
    /// Robots are served in registration order.  Each gets the next item in
    /// pool order in its hand and, if there is one, the following item in its
    /// tube.  Overweight items leave the pool through the report; every robot
    /// shares the same limit, so offering them again would never succeed.  A
    /// robot left with an empty hand stays registered for the next pass.
    ///
    /// # Errors
    /// `UnknownRobot` if a registered id has no entry in `robots`,
    /// `RobotNotIdle` if a registered robot is already carrying mail.
    pub fn load_robots(&mut self, robots: &mut [Robot]) -> PoolResult<LoadReport> {
        let mut report = LoadReport::default();
        if self.waiting.is_empty() || self.pending.is_empty() {
            return Ok(report);
        }
        self.sort_pending();

        let mut queue = VecDeque::from(std::mem::take(&mut self.pending));
        let served = self.serve_waiting(&mut queue, robots, &mut report);
        // Unassigned items go back even if serving stopped on an error.
        self.pending = queue.into();
        served.map(|()| report)
    }

    fn serve_waiting(
        &mut self,
        queue:  &mut VecDeque<MailItem>,
        robots: &mut [Robot],
        report: &mut LoadReport,
    ) -> PoolResult<()> {
        while let Some(&id) = self.waiting.front() {
            if queue.is_empty() {
                break;
            }
            let robot = robots
                .get_mut(id.index())
                .filter(|r| r.id() == id)
                .ok_or(PoolError::UnknownRobot(id))?;
            if !robot.is_idle() {
                return Err(PoolError::RobotNotIdle(id));
            }

            let hand_loaded = Self::fill(queue, report, |item| robot.assign_hand_item(item));
            if !hand_loaded {
                // Queue ran dry on rejections; robot keeps its place.
                break;
            }
            Self::fill(queue, report, |item| robot.assign_tube_item(item));

            robot.dispatch();
            self.waiting.pop_front();
            debug!(robot = %id, "dispatched");
            report.dispatched.push(id);
        }
        Ok(())
    }

    /// Offer items from the front of `queue` to one slot until one is taken.
    fn fill(
        queue:      &mut VecDeque<MailItem>,
        report:     &mut LoadReport,
        mut assign: impl FnMut(MailItem) -> Result<(), RobotError>,
    ) -> bool {
        while let Some(item) = queue.pop_front() {
            match assign(item) {
                Ok(()) => return true,
                Err(err) => {
                    warn!(error = %err, "item rejected by robot");
                    report.rejected.extend(err.into_item());
                }
            }
        }
        false
    }

    fn sort_pending(&mut self) {
        match self.order {
            // Stable, so items arriving together keep insertion order.
            PoolOrder::Arrival => self.pending.sort_by_key(MailItem::arrival),
            PoolOrder::FurthestFirst => self.pending.sort_by(|a, b| {
                b.destination()
                    .cmp(&a.destination())
                    .then(a.arrival().cmp(&b.arrival()))
            }),
        }
    }
}

impl DispatchPool for MailPool {
    fn register_waiting(&mut self, robot: RobotId) {
        if self.waiting.contains(&robot) {
            warn!(%robot, "robot registered twice; ignoring");
            return;
        }
        self.waiting.push_back(robot);
    }

    fn return_item(&mut self, item: MailItem) {
        debug!(mail = %item.id(), "item returned to pool");
        self.pending.push(item);
    }
}
