//! The `Sim` struct and its tick loop.

use am_core::{SimClock, SimConfig, Tick};
use am_mail::ArrivalQueue;
use am_pool::MailPool;
use am_robot::{Robot, RobotContext, RobotEvent, RobotState};
use tracing::{error, info};

use crate::{Recorder, SimObserver, SimResult, SimSummary, TickSummary};

/// The main simulation runner.
///
/// Holds the robots, the pool, the mail still to arrive and the recorder,
/// and drives them one tick at a time.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (building, robot count, limits, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick.
    pub clock: SimClock,

    /// All robots, indexed by `RobotId`.
    pub robots: Vec<Robot>,

    /// Undelivered mail and the queue of waiting robots.
    pub pool: MailPool,

    /// Mail that has not reached the mailroom yet.
    pub arrivals: ArrivalQueue,

    /// Delivery sink and statistics.
    pub recorder: Recorder,

    /// Items the run started with.
    pub(crate) total_mail: usize,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every item is delivered or rejected, or until
    /// `config.end_tick()`, whichever comes first.
    ///
    /// # Errors
    /// Stops at the first robot or pool fault.  Both mean the pool broke the
    /// loading protocol, so the run cannot be trusted past that point.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimSummary> {
        info!(
            robots = self.robots.len(),
            mail = self.total_mail,
            floors = self.config.building.floor_count(),
            "simulation start"
        );
        loop {
            let now = self.clock.now();
            if now >= self.config.end_tick() || self.is_settled() {
                break;
            }
            self.step(now, observer)?;
            self.clock.advance();
        }

        let summary = self.summary();
        observer.on_sim_end(&summary);
        info!(
            final_tick = %summary.final_tick,
            delivered = summary.stats.delivered,
            rejected = summary.stats.rejected,
            undelivered = summary.undelivered,
            "simulation end"
        );
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position, ignoring both the
    /// end tick and whether mail is outstanding.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.now();
            self.step(now, observer)?;
            self.clock.advance();
        }
        Ok(())
    }

    /// `true` once nothing is left to arrive, pooled, or aboard a robot.
    pub fn is_settled(&self) -> bool {
        self.arrivals.is_empty() && self.pool.is_empty() && self.robots.iter().all(Robot::is_idle)
    }

    /// Snapshot of the run so far.
    pub fn summary(&self) -> SimSummary {
        let aboard: usize = self
            .robots
            .iter()
            .map(|r| usize::from(r.hand().is_some()) + usize::from(r.tube().is_some()))
            .sum();
        SimSummary {
            final_tick:  self.clock.now(),
            stats:       self.recorder.accountant().stats().clone(),
            undelivered: self.arrivals.len() + self.pool.pending() + aboard,
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(now);

        // ── Phase 1: arrivals ─────────────────────────────────────────────
        let mut arrived = 0;
        if let Some(items) = self.arrivals.drain_tick(now) {
            arrived = items.len();
            for item in items {
                self.pool.add_item(item);
            }
        }

        // ── Phase 2: load waiting robots ──────────────────────────────────
        let report = self.pool.load_robots(&mut self.robots)?;
        for item in report.rejected {
            self.recorder.accountant_mut().record_rejection(&item);
            observer.on_rejected(now, &item);
        }

        // ── Phase 3: robots, ascending id ─────────────────────────────────
        //
        // Events are collected and forwarded after each robot so the
        // observer never sees a robot mid-tick.
        self.recorder.set_tick(now);
        let mut events: Vec<RobotEvent> = Vec::new();
        for robot in self.robots.iter_mut() {
            let mut ctx = RobotContext::new(now, &mut self.pool, &mut self.recorder, &mut events);
            if let Err(e) = robot.tick(&mut ctx) {
                error!(robot = %robot.id(), tick = %now, error = %e, "aborting run");
                return Err(e.into());
            }
            for event in events.drain(..) {
                observer.on_robot_event(&event);
            }
        }

        // ── Phase 4: report ───────────────────────────────────────────────
        let deliveries = self.recorder.drain_deliveries();
        for record in &deliveries {
            observer.on_delivery(record);
        }

        let count = |state: RobotState| self.robots.iter().filter(|r| r.state() == state).count();
        let summary = TickSummary {
            tick:              now,
            arrived,
            delivered:         deliveries.len(),
            pending:           self.pool.pending(),
            waiting_robots:    count(RobotState::Waiting),
            delivering_robots: count(RobotState::Delivering),
            returning_robots:  count(RobotState::Returning),
        };
        observer.on_tick_end(&summary);
        Ok(())
    }
}
