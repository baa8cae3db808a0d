use am_core::RobotId;
use am_mail::MailItem;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RobotError {
    /// The item is over the per-item limit.  The rejected item travels back
    /// to the caller inside the error; the slot was left empty.
    #[error("{robot} rejected {item}: over the {limit}g per-item limit")]
    Overweight {
        robot: RobotId,
        limit: u32,
        item:  Box<MailItem>,
    },

    /// More legs completed in one run than the robot can carry.  Only a pool
    /// that loads a robot past its capacity can cause this, so the run should
    /// stop.
    #[error("{robot} completed {legs} deliveries in one run (max {max})")]
    ExcessiveDelivery {
        robot: RobotId,
        legs:  u32,
        max:   u32,
    },
}

impl RobotError {
    /// Recover the rejected item from an `Overweight` error.
    pub fn into_item(self) -> Option<MailItem> {
        match self {
            RobotError::Overweight { item, .. } => Some(*item),
            RobotError::ExcessiveDelivery { .. } => None,
        }
    }

    /// `true` for errors that must abort the simulation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RobotError::ExcessiveDelivery { .. })
    }
}

pub type RobotResult<T> = Result<T, RobotError>;
