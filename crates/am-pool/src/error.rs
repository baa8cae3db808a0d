use am_core::RobotId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("robot {0} registered with the pool but is not in the robot list")]
    UnknownRobot(RobotId),

    #[error("robot {0} registered as waiting while still carrying mail")]
    RobotNotIdle(RobotId),
}

pub type PoolResult<T> = Result<T, PoolError>;
