//! The `Robot` state machine.

use std::fmt;

use am_core::{Floor, MAX_DELIVERY_LEGS, MAX_ITEM_WEIGHT, RobotId, SimConfig};
use am_mail::MailItem;
use tracing::{debug, warn};

use crate::{RobotContext, RobotError, RobotEvent, RobotResult, RobotState};

// ── RobotLimits ───────────────────────────────────────────────────────────────

/// Building and capacity constants a robot works against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RobotLimits {
    /// Floor the robot loads at and returns to.
    pub mailroom_floor: Floor,
    /// Heaviest item either slot accepts, grams.
    pub max_item_weight: u32,
    /// Deliveries allowed between two visits to the mailroom.
    pub max_delivery_legs: u32,
}

impl Default for RobotLimits {
    fn default() -> Self {
        Self {
            mailroom_floor:    0,
            max_item_weight:   MAX_ITEM_WEIGHT,
            max_delivery_legs: MAX_DELIVERY_LEGS,
        }
    }
}

impl RobotLimits {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            mailroom_floor:    config.building.mailroom_floor,
            max_item_weight:   config.max_item_weight,
            max_delivery_legs: config.max_delivery_legs,
        }
    }
}

// ── Robot ─────────────────────────────────────────────────────────────────────

/// A mail delivery robot.
///
/// Carries at most two items: the *hand* item it is currently delivering and
/// a *tube* item it delivers next.  The tube is only ever occupied while the
/// hand is.
///
/// Each call to [`tick`][Self::tick] performs one step of the cycle:
///
/// | State      | Condition                 | Step                                    |
/// |------------|---------------------------|-----------------------------------------|
/// | Returning  | at mailroom               | hand back stray items, register → Waiting |
/// | Returning  | elsewhere                 | move one floor toward the mailroom      |
/// | Waiting    | loaded and dispatched     | start the run → Delivering, move        |
/// | Waiting    | otherwise                 | nothing                                 |
/// | Delivering | at destination            | deliver hand item; promote tube or → Returning |
/// | Delivering | elsewhere                 | move one floor, bill it to both items   |
///
/// A delivering step that reaches the destination floor delivers in the same
/// tick, so one tick can pass through several states and emit several
/// `StateChanged` events: a robot dispatched to the first floor above the
/// mailroom goes Waiting → Delivering → Returning in a single tick.
#[derive(Debug)]
pub struct Robot {
    id:                 RobotId,
    limits:             RobotLimits,
    state:              RobotState,
    current_floor:      Floor,
    destination_floor:  Floor,
    hand:               Option<MailItem>,
    tube:               Option<MailItem>,
    dispatch_requested: bool,
    legs:               u32,
}

impl Robot {
    /// A robot parked at the mailroom in the Returning state.  Its first tick
    /// registers it with the pool.
    pub fn new(id: RobotId, limits: RobotLimits) -> Self {
        Self {
            id,
            limits,
            state:              RobotState::Returning,
            current_floor:      limits.mailroom_floor,
            destination_floor:  limits.mailroom_floor,
            hand:               None,
            tube:               None,
            dispatch_requested: false,
            legs:               0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> RobotId {
        self.id
    }

    #[inline]
    pub fn limits(&self) -> &RobotLimits {
        &self.limits
    }

    #[inline]
    pub fn state(&self) -> RobotState {
        self.state
    }

    #[inline]
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    #[inline]
    pub fn destination_floor(&self) -> Floor {
        self.destination_floor
    }

    pub fn hand(&self) -> Option<&MailItem> {
        self.hand.as_ref()
    }

    pub fn tube(&self) -> Option<&MailItem> {
        self.tube.as_ref()
    }

    /// Deliveries completed in the current run.
    #[inline]
    pub fn legs(&self) -> u32 {
        self.legs
    }

    #[inline]
    pub fn dispatch_requested(&self) -> bool {
        self.dispatch_requested
    }

    /// `true` when both slots are empty.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.hand.is_none() && self.tube.is_none()
    }

    // ── Pool-facing operations ────────────────────────────────────────────

    /// Ask the robot to leave on its next tick.  Repeated calls before that
    /// tick have no further effect.
    pub fn dispatch(&mut self) {
        self.dispatch_requested = true;
    }

    /// Load `item` into the hand slot.
    ///
    /// # Errors
    /// `Overweight` if the item is over the per-item limit; the item comes
    /// back inside the error and the slot stays empty.
    ///
    /// # Panics
    /// If the hand slot is already occupied.
    pub fn assign_hand_item(&mut self, item: MailItem) -> RobotResult<()> {
        assert!(self.hand.is_none(), "{}: hand slot already occupied", self.id);
        let item = self.check_weight(item)?;
        self.hand = Some(item);
        Ok(())
    }

    /// Load `item` into the tube slot.
    ///
    /// # Errors
    /// `Overweight`, as for [`assign_hand_item`][Self::assign_hand_item].
    ///
    /// # Panics
    /// If the tube slot is occupied or the hand slot is empty.
    pub fn assign_tube_item(&mut self, item: MailItem) -> RobotResult<()> {
        assert!(self.tube.is_none(), "{}: tube slot already occupied", self.id);
        assert!(self.hand.is_some(), "{}: tube loaded before hand", self.id);
        let item = self.check_weight(item)?;
        self.tube = Some(item);
        Ok(())
    }

    fn check_weight(&self, item: MailItem) -> RobotResult<MailItem> {
        if item.weight() > self.limits.max_item_weight {
            return Err(RobotError::Overweight {
                robot: self.id,
                limit: self.limits.max_item_weight,
                item:  Box::new(item),
            });
        }
        Ok(item)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the robot by one time step.
    ///
    /// # Errors
    /// `ExcessiveDelivery` if this step completes more legs than the robot
    /// may carry in one run.  The run should be aborted.
    pub fn tick(&mut self, ctx: &mut RobotContext<'_>) -> RobotResult<()> {
        match self.state {
            RobotState::Returning => {
                if self.current_floor == self.limits.mailroom_floor {
                    self.hand_back_stray_items(ctx);
                    ctx.pool.register_waiting(self.id);
                    self.change_state(RobotState::Waiting, ctx);
                } else {
                    self.move_towards(self.limits.mailroom_floor);
                }
            }

            RobotState::Waiting => {
                if self.dispatch_requested && !self.is_idle() {
                    self.dispatch_requested = false;
                    self.legs = 0;
                    self.set_destination();
                    self.change_state(RobotState::Delivering, ctx);
                    self.delivery_step(ctx)?;
                }
            }

            RobotState::Delivering => self.delivery_step(ctx)?,
        }
        Ok(())
    }

    /// Move toward the destination if not there yet, then deliver if there.
    fn delivery_step(&mut self, ctx: &mut RobotContext<'_>) -> RobotResult<()> {
        if self.current_floor != self.destination_floor {
            self.move_towards(self.destination_floor);
        }
        if self.current_floor == self.destination_floor {
            self.complete_leg(ctx)?;
        }
        Ok(())
    }

    fn complete_leg(&mut self, ctx: &mut RobotContext<'_>) -> RobotResult<()> {
        let Some(item) = self.hand.take() else {
            // Delivering with nothing in hand: nothing left to do here.
            self.change_state(RobotState::Returning, ctx);
            return Ok(());
        };

        let mail     = item.id();
        let distance = item.distance();
        ctx.sink.record(&item);
        ctx.sink.deliver(self.id, item);
        ctx.observer.on_event(&RobotEvent::Delivered {
            robot: self.id,
            tick:  ctx.tick,
            mail,
            floor: self.current_floor,
            distance,
        });
        debug!(robot = %self.id, tick = %ctx.tick, %mail, floor = self.current_floor, distance, "delivered");

        self.legs += 1;

        // Promote before the leg check so the slots stay consistent on error.
        match self.tube.take() {
            Some(next) => {
                self.hand = Some(next);
                self.set_destination();
                self.change_state(RobotState::Delivering, ctx);
            }
            None => self.change_state(RobotState::Returning, ctx),
        }

        if self.legs > self.limits.max_delivery_legs {
            return Err(RobotError::ExcessiveDelivery {
                robot: self.id,
                legs:  self.legs,
                max:   self.limits.max_delivery_legs,
            });
        }
        Ok(())
    }

    /// Nothing should be aboard when a robot gets back to the mailroom.  If
    /// something is, the pool loaded this robot outside the Waiting state;
    /// send every item back so the robot registers empty, and make the fault
    /// visible.
    fn hand_back_stray_items(&mut self, ctx: &mut RobotContext<'_>) {
        let strays = [self.hand.take(), self.tube.take()];
        for mut stray in strays.into_iter().flatten() {
            warn!(robot = %self.id, tick = %ctx.tick, mail = %stray.id(), "item still aboard at mailroom; returning it to the pool");
            stray.reset_activity();
            ctx.observer.on_event(&RobotEvent::StrayItemReturned {
                robot: self.id,
                tick:  ctx.tick,
                mail:  stray.id(),
            });
            ctx.pool.return_item(stray);
        }
    }

    fn set_destination(&mut self) {
        if let Some(item) = &self.hand {
            self.destination_floor = item.destination();
        }
    }

    /// One floor toward `target`.  Travel is billed to carried items only
    /// while delivering.
    fn move_towards(&mut self, target: Floor) {
        if self.current_floor < target {
            self.current_floor += 1;
        } else if self.current_floor > target {
            self.current_floor -= 1;
        } else {
            return;
        }

        if self.state == RobotState::Delivering {
            if let Some(item) = self.hand.as_mut() {
                item.record_movement(1);
            }
            if let Some(item) = self.tube.as_mut() {
                item.record_movement(1);
            }
        }
    }

    fn change_state(&mut self, next: RobotState, ctx: &mut RobotContext<'_>) {
        debug_assert!(
            !(self.hand.is_none() && self.tube.is_some()),
            "{}: tube occupied with empty hand",
            self.id
        );

        if self.state != next {
            debug!(robot = %self, tick = %ctx.tick, from = %self.state, to = %next, "state change");
            ctx.observer.on_event(&RobotEvent::StateChanged {
                robot: self.id,
                tick:  ctx.tick,
                from:  self.state,
                to:    next,
            });
        }
        self.state = next;

        if next == RobotState::Delivering {
            if let Some(hand) = &self.hand {
                debug!(robot = %self, tick = %ctx.tick, item = %hand, "departing");
                ctx.observer.on_event(&RobotEvent::Departed {
                    robot: self.id,
                    tick:  ctx.tick,
                    hand:  hand.id(),
                    tube:  self.tube.as_ref().map(MailItem::id),
                });
            }
        }
    }
}

/// `R<n>(<tube count>)`, the form used in logs.
impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.id, usize::from(self.tube.is_some()))
    }
}
