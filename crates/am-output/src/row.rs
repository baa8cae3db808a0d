//! Plain data row types written by output backends.

use am_sim::{DeliveryRecord, TickSummary};

/// One delivered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryRow {
    pub mail_id:           u64,
    pub robot_id:          u32,
    pub arrival_tick:      u64,
    pub delivered_tick:    u64,
    pub destination_floor: i32,
    pub weight:            u32,
    /// Floors travelled aboard a delivering robot.
    pub distance:          u32,
}

impl From<&DeliveryRecord> for DeliveryRow {
    fn from(record: &DeliveryRecord) -> Self {
        Self {
            mail_id:           record.item.id().0,
            robot_id:          record.robot.0,
            arrival_tick:      record.item.arrival().0,
            delivered_tick:    record.tick.0,
            destination_floor: record.item.destination(),
            weight:            record.item.weight(),
            distance:          record.item.distance(),
        }
    }
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub arrived:           u64,
    pub delivered:         u64,
    pub pending:           u64,
    pub waiting_robots:    u64,
    pub delivering_robots: u64,
    pub returning_robots:  u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:              s.tick.0,
            arrived:           s.arrived as u64,
            delivered:         s.delivered as u64,
            pending:           s.pending as u64,
            waiting_robots:    s.waiting_robots as u64,
            delivering_robots: s.delivering_robots as u64,
            returning_robots:  s.returning_robots as u64,
        }
    }
}
