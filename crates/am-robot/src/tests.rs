//! Unit tests for the robot state machine.

use am_core::{Floor, MailId, RobotId, Tick};
use am_mail::MailItem;

use crate::{
    DeliverySink, DispatchPool, Robot, RobotContext, RobotError, RobotEvent, RobotLimits,
    RobotResult, RobotState,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakePool {
    registered: Vec<RobotId>,
    returned:   Vec<MailItem>,
}

impl DispatchPool for FakePool {
    fn register_waiting(&mut self, robot: RobotId) {
        self.registered.push(robot);
    }

    fn return_item(&mut self, item: MailItem) {
        self.returned.push(item);
    }
}

/// Logs `record` and `deliver` calls in the order they happen.
#[derive(Default)]
struct FakeSink {
    calls:     Vec<(&'static str, MailId)>,
    delivered: Vec<(RobotId, MailItem)>,
}

impl DeliverySink for FakeSink {
    fn record(&mut self, item: &MailItem) {
        self.calls.push(("record", item.id()));
    }

    fn deliver(&mut self, robot: RobotId, item: MailItem) {
        self.calls.push(("deliver", item.id()));
        self.delivered.push((robot, item));
    }
}

#[derive(Default)]
struct Harness {
    now:    u64,
    pool:   FakePool,
    sink:   FakeSink,
    events: Vec<RobotEvent>,
}

impl Harness {
    fn tick(&mut self, robot: &mut Robot) -> RobotResult<()> {
        let mut ctx = RobotContext::new(
            Tick(self.now),
            &mut self.pool,
            &mut self.sink,
            &mut self.events,
        );
        let result = robot.tick(&mut ctx);
        self.now += 1;
        result
    }

    fn ticks(&mut self, robot: &mut Robot, n: usize) {
        for _ in 0..n {
            self.tick(robot).unwrap();
            assert_slot_invariant(robot);
        }
    }

    fn distance_of(&self, mail: u64) -> u32 {
        self.sink
            .delivered
            .iter()
            .find(|(_, m)| m.id() == MailId(mail))
            .map(|(_, m)| m.distance())
            .expect("item was not delivered")
    }
}

fn mail(id: u64, dest: Floor, weight: u32) -> MailItem {
    MailItem::new(MailId(id), dest, weight, Tick(0))
}

fn assert_slot_invariant(robot: &Robot) {
    assert!(
        !(robot.hand().is_none() && robot.tube().is_some()),
        "tube occupied with empty hand"
    );
}

/// A robot that has already reached Waiting at the mailroom.
fn waiting_robot(h: &mut Harness) -> Robot {
    let mut robot = Robot::new(RobotId(0), RobotLimits::default());
    h.ticks(&mut robot, 1);
    assert_eq!(robot.state(), RobotState::Waiting);
    robot
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn starts_returning_at_mailroom() {
        let robot = Robot::new(RobotId(3), RobotLimits::default());
        assert_eq!(robot.state(), RobotState::Returning);
        assert_eq!(robot.current_floor(), 0);
        assert!(robot.is_idle());
        assert!(!robot.dispatch_requested());
        assert_eq!(robot.to_string(), "R3(0)");
    }

    #[test]
    fn first_tick_registers_and_waits() {
        let mut h = Harness::default();
        let robot = waiting_robot(&mut h);
        assert_eq!(h.pool.registered, vec![robot.id()]);
        assert_eq!(
            h.events,
            vec![RobotEvent::StateChanged {
                robot: RobotId(0),
                tick:  Tick(0),
                from:  RobotState::Returning,
                to:    RobotState::Waiting,
            }]
        );
    }

    #[test]
    fn custom_mailroom_is_home() {
        let limits = RobotLimits { mailroom_floor: 4, ..RobotLimits::default() };
        let mut h = Harness::default();
        let mut robot = Robot::new(RobotId(0), limits);
        assert_eq!(robot.current_floor(), 4);
        h.ticks(&mut robot, 1);
        assert_eq!(robot.state(), RobotState::Waiting);
    }

    #[test]
    fn waits_without_dispatch() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 3, 500)).unwrap();
        h.ticks(&mut robot, 5);
        assert_eq!(robot.state(), RobotState::Waiting);
        assert_eq!(robot.current_floor(), 0);
        assert!(h.sink.delivered.is_empty());
    }

    #[test]
    fn dispatch_with_empty_slots_does_not_leave() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.dispatch();
        h.ticks(&mut robot, 3);
        assert_eq!(robot.state(), RobotState::Waiting);
        assert!(robot.dispatch_requested());
    }

    #[test]
    fn dispatch_is_idempotent() {
        let run = |dispatches: usize| {
            let mut h = Harness::default();
            let mut robot = waiting_robot(&mut h);
            robot.assign_hand_item(mail(1, 2, 500)).unwrap();
            for _ in 0..dispatches {
                robot.dispatch();
            }
            h.ticks(&mut robot, 6);
            (robot.state(), robot.current_floor(), h.events, h.sink.calls)
        };
        assert_eq!(run(1), run(2));
    }

    #[test]
    fn dispatch_flag_is_consumed_once() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 1, 500)).unwrap();
        robot.dispatch();
        robot.dispatch();
        h.ticks(&mut robot, 1);
        assert!(!robot.dispatch_requested());
    }
}

// ── Delivery ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod delivery {
    use super::*;

    #[test]
    fn single_item_run() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 3, 500)).unwrap();
        robot.dispatch();

        h.ticks(&mut robot, 3);

        assert_eq!(robot.current_floor(), 3);
        assert_eq!(robot.state(), RobotState::Returning);
        assert!(robot.is_idle());
        assert_eq!(h.sink.delivered.len(), 1);
        assert_eq!(h.distance_of(1), 3);
        assert_eq!(robot.legs(), 1);
    }

    #[test]
    fn first_floor_run_passes_through_delivering_in_one_tick() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 1, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 1);

        let changes: Vec<(RobotState, RobotState)> = h
            .events
            .iter()
            .filter_map(|e| match e {
                RobotEvent::StateChanged { tick: Tick(1), from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![
            (RobotState::Waiting, RobotState::Delivering),
            (RobotState::Delivering, RobotState::Returning),
        ]);
        assert_eq!(h.sink.delivered.len(), 1);
    }

    #[test]
    fn record_precedes_deliver() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(7, 1, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 1);
        assert_eq!(h.sink.calls, vec![("record", MailId(7)), ("deliver", MailId(7))]);
        assert_eq!(h.sink.delivered[0].0, RobotId(0));
    }

    #[test]
    fn hand_and_tube_run() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 2, 500)).unwrap();
        robot.assign_tube_item(mail(2, 5, 800)).unwrap();
        robot.dispatch();

        h.ticks(&mut robot, 2);
        assert_eq!(robot.current_floor(), 2);
        assert_eq!(h.distance_of(1), 2);
        assert_eq!(robot.state(), RobotState::Delivering);
        assert_eq!(robot.hand().map(MailItem::id), Some(MailId(2)));
        assert!(robot.tube().is_none());
        assert_eq!(robot.destination_floor(), 5);

        h.ticks(&mut robot, 3);
        assert_eq!(robot.current_floor(), 5);
        assert_eq!(robot.state(), RobotState::Returning);
        assert_eq!(h.distance_of(2), 5);
        assert_eq!(robot.legs(), 2);
    }

    #[test]
    fn tube_for_same_floor_delivers_next_tick() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 2, 500)).unwrap();
        robot.assign_tube_item(mail(2, 2, 500)).unwrap();
        robot.dispatch();

        h.ticks(&mut robot, 2);
        assert_eq!(h.sink.delivered.len(), 1);
        h.ticks(&mut robot, 1);
        assert_eq!(h.sink.delivered.len(), 2);
        assert_eq!(robot.current_floor(), 2);
        assert_eq!(h.distance_of(2), 2);
    }

    #[test]
    fn tube_below_hand_reverses_direction() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 4, 500)).unwrap();
        robot.assign_tube_item(mail(2, 1, 500)).unwrap();
        robot.dispatch();

        h.ticks(&mut robot, 7);
        assert_eq!(robot.current_floor(), 1);
        assert_eq!(h.distance_of(1), 4);
        assert_eq!(h.distance_of(2), 7);
    }

    #[test]
    fn basement_delivery() {
        let limits = RobotLimits { mailroom_floor: 0, ..RobotLimits::default() };
        let mut h = Harness::default();
        let mut robot = Robot::new(RobotId(0), limits);
        h.ticks(&mut robot, 1);
        robot.assign_hand_item(mail(1, -2, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 2);
        assert_eq!(robot.current_floor(), -2);
        assert_eq!(h.distance_of(1), 2);
    }

    #[test]
    fn mail_for_mailroom_is_delivered_on_departure() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 0, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 1);
        assert_eq!(h.distance_of(1), 0);
        assert_eq!(robot.state(), RobotState::Returning);
    }

    #[test]
    fn return_trip_is_not_billed() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 3, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 3);

        let registrations = h.pool.registered.len();
        h.ticks(&mut robot, 3);
        assert_eq!(robot.current_floor(), 0);
        assert_eq!(robot.state(), RobotState::Returning);
        assert_eq!(h.pool.registered.len(), registrations);
        assert_eq!(h.distance_of(1), 3);

        h.ticks(&mut robot, 1);
        assert_eq!(robot.state(), RobotState::Waiting);
        assert_eq!(h.pool.registered.len(), registrations + 1);
    }

    #[test]
    fn distance_to_target_shrinks_by_one_each_tick() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 6, 500)).unwrap();
        robot.dispatch();

        let mut gap = (robot.current_floor() - 6).abs();
        while robot.state() != RobotState::Returning {
            h.ticks(&mut robot, 1);
            let next = (robot.current_floor() - 6).abs();
            assert_eq!(next, gap - 1);
            gap = next;
        }
        assert_eq!(gap, 0);

        gap = robot.current_floor().abs();
        while robot.current_floor() != 0 {
            h.ticks(&mut robot, 1);
            let next = robot.current_floor().abs();
            assert_eq!(next, gap - 1);
            gap = next;
        }
    }

    #[test]
    fn legs_reset_on_new_run() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        for id in 0..3 {
            robot.assign_hand_item(mail(id * 2, 1, 500)).unwrap();
            robot.assign_tube_item(mail(id * 2 + 1, 2, 500)).unwrap();
            robot.dispatch();
            // 2 out, 2 back, 1 to register.
            h.ticks(&mut robot, 5);
            assert_eq!(robot.state(), RobotState::Waiting);
            assert_eq!(robot.legs(), 2);
        }
        assert_eq!(h.sink.delivered.len(), 6);
    }

    #[test]
    fn departure_and_delivery_events() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        h.events.clear();
        robot.assign_hand_item(mail(1, 1, 500)).unwrap();
        robot.assign_tube_item(mail(2, 2, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 2);

        assert_eq!(
            h.events,
            vec![
                RobotEvent::StateChanged {
                    robot: RobotId(0),
                    tick:  Tick(1),
                    from:  RobotState::Waiting,
                    to:    RobotState::Delivering,
                },
                RobotEvent::Departed {
                    robot: RobotId(0),
                    tick:  Tick(1),
                    hand:  MailId(1),
                    tube:  Some(MailId(2)),
                },
                RobotEvent::Delivered {
                    robot:    RobotId(0),
                    tick:     Tick(1),
                    mail:     MailId(1),
                    floor:    1,
                    distance: 1,
                },
                RobotEvent::Departed {
                    robot: RobotId(0),
                    tick:  Tick(1),
                    hand:  MailId(2),
                    tube:  None,
                },
                RobotEvent::Delivered {
                    robot:    RobotId(0),
                    tick:     Tick(2),
                    mail:     MailId(2),
                    floor:    2,
                    distance: 2,
                },
                RobotEvent::StateChanged {
                    robot: RobotId(0),
                    tick:  Tick(2),
                    from:  RobotState::Delivering,
                    to:    RobotState::Returning,
                },
            ]
        );
    }
}

// ── Errors and contract breaches ──────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn overweight_hand_rejected() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        let err = robot.assign_hand_item(mail(1, 3, 2_500)).unwrap_err();
        assert!(matches!(err, RobotError::Overweight { limit: 2_000, .. }));
        assert!(!err.is_fatal());
        assert!(robot.hand().is_none());
        assert!(robot.is_idle());
        assert_eq!(err.into_item().map(|m| m.id()), Some(MailId(1)));
    }

    #[test]
    fn overweight_tube_rejected() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 3, 2_000)).unwrap();
        let err = robot.assign_tube_item(mail(2, 4, 2_001)).unwrap_err();
        assert!(matches!(err, RobotError::Overweight { .. }));
        assert!(robot.tube().is_none());
        assert!(robot.hand().is_some());
    }

    #[test]
    fn third_leg_is_fatal() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 1, 500)).unwrap();
        robot.assign_tube_item(mail(2, 2, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 1);

        // A faulty pool tops up the tube mid-run.
        robot.assign_tube_item(mail(3, 3, 500)).unwrap();
        h.ticks(&mut robot, 1);
        assert_eq!(robot.legs(), 2);

        let err = h.tick(&mut robot).unwrap_err();
        assert!(matches!(err, RobotError::ExcessiveDelivery { legs: 3, max: 2, .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn excessive_delivery_leaves_slots_consistent() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 1, 500)).unwrap();
        robot.assign_tube_item(mail(2, 2, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 1);

        // The faulty pool keeps the tube topped up.
        robot.assign_tube_item(mail(3, 3, 500)).unwrap();
        h.ticks(&mut robot, 1);
        robot.assign_tube_item(mail(4, 4, 500)).unwrap();

        let err = h.tick(&mut robot).unwrap_err();
        assert!(matches!(err, RobotError::ExcessiveDelivery { legs: 3, .. }));
        assert_slot_invariant(&robot);
        assert_eq!(robot.hand().map(MailItem::id), Some(MailId(4)));
        assert!(robot.tube().is_none());
        assert_eq!(robot.state(), RobotState::Delivering);
        assert_eq!(h.sink.delivered.len(), 3);
    }

    #[test]
    fn stray_items_go_back_to_pool() {
        let mut h = Harness::default();
        let mut robot = waiting_robot(&mut h);
        robot.assign_hand_item(mail(1, 2, 500)).unwrap();
        robot.dispatch();
        h.ticks(&mut robot, 2);
        assert_eq!(robot.state(), RobotState::Returning);

        // A faulty pool loads a robot that is still on its way back.
        robot.assign_hand_item(mail(2, 4, 500)).unwrap();
        robot.assign_tube_item(mail(3, 5, 500)).unwrap();
        h.ticks(&mut robot, 2);
        assert_eq!(robot.current_floor(), 0);
        assert!(h.pool.returned.is_empty());

        h.ticks(&mut robot, 1);
        assert_eq!(robot.state(), RobotState::Waiting);
        assert!(robot.is_idle());
        let returned: Vec<MailId> = h.pool.returned.iter().map(MailItem::id).collect();
        assert_eq!(returned, vec![MailId(2), MailId(3)]);
        assert!(h.pool.returned.iter().all(|m| m.distance() == 0));
        for mail in [MailId(2), MailId(3)] {
            assert!(h.events.contains(&RobotEvent::StrayItemReturned {
                robot: RobotId(0),
                tick:  Tick(5),
                mail,
            }));
        }
        assert_eq!(h.pool.registered, vec![RobotId(0), RobotId(0)]);
    }

    #[test]
    #[should_panic(expected = "hand slot already occupied")]
    fn double_hand_assignment_panics() {
        let mut robot = Robot::new(RobotId(0), RobotLimits::default());
        robot.assign_hand_item(mail(1, 1, 100)).unwrap();
        let _ = robot.assign_hand_item(mail(2, 1, 100));
    }

    #[test]
    #[should_panic(expected = "tube loaded before hand")]
    fn tube_without_hand_panics() {
        let mut robot = Robot::new(RobotId(0), RobotLimits::default());
        let _ = robot.assign_tube_item(mail(1, 1, 100));
    }
}
