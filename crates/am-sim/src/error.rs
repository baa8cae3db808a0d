use am_core::{AmError, Floor, MailId};
use am_mail::MailError;
use am_pool::PoolError;
use am_robot::RobotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] AmError),

    #[error("mail source error: {0}")]
    Mail(#[from] MailError),

    #[error("{mail} is addressed to floor {floor}, outside the building")]
    InvalidDestination {
        mail:  MailId,
        floor: Floor,
    },

    #[error("robot fault: {0}")]
    Robot(#[from] RobotError),

    #[error("mail pool fault: {0}")]
    Pool(#[from] PoolError),
}

pub type SimResult<T> = Result<T, SimError>;
