//! `am-robot`: the delivery robot state machine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                           |
//! |------------|--------------------------------------------------------------------|
//! | [`state`]  | `RobotState`: Returning / Waiting / Delivering                    |
//! | [`robot`]  | `Robot`, `RobotLimits`: slots, movement, per-tick transitions     |
//! | [`ports`]  | `DispatchPool`, `DeliverySink`, `RobotContext`: what a robot calls |
//! | [`event`]  | `RobotEvent`, `RobotObserver`: transition and delivery hook       |
//! | [`error`]  | `RobotError`, `RobotResult<T>`                                     |
//!
//! # Life of a robot
//!
//! ```text
//!            arrive at mailroom,             dispatched with
//!            register with pool              at least a hand item
//! Returning ───────────────────▶ Waiting ───────────────────────▶ Delivering
//!     ▲                                                             │  │
//!     │           last item delivered                               │  │ hand delivered,
//!     └─────────────────────────────────────────────────────────────┘  │ tube promoted
//!                                                                      ▼
//!                                                                  Delivering
//! ```
//!
//! A robot never owns a pool or a recorder.  It identifies itself to the
//! pool by [`RobotId`][am_core::RobotId] and is handed the collaborators it
//! needs for one tick through a [`RobotContext`].

pub mod error;
pub mod event;
pub mod ports;
pub mod robot;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{RobotError, RobotResult};
pub use event::{NoopRobotObserver, RobotEvent, RobotObserver};
pub use ports::{DeliverySink, DispatchPool, RobotContext};
pub use robot::{Robot, RobotLimits};
pub use state::RobotState;
