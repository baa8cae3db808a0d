use std::fmt;

/// The three phases of a robot's delivery cycle.
///
/// There is no terminal state; a robot cycles for the whole run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RobotState {
    /// Heading back to the mailroom (the initial state).
    Returning,
    /// Parked at the mailroom, registered with the pool.
    Waiting,
    /// Carrying mail toward a destination floor.
    Delivering,
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RobotState::Returning  => "RETURNING",
            RobotState::Waiting    => "WAITING",
            RobotState::Delivering => "DELIVERING",
        };
        f.write_str(s)
    }
}
