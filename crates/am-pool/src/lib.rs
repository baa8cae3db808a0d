//! `am-pool`: the mail pool that loads waiting robots.
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`pool`]   | `MailPool`, `PoolOrder`, `LoadReport`                  |
//! | [`error`]  | `PoolError`, `PoolResult<T>`                           |
//!
//! Robots register themselves by id through
//! [`DispatchPool`][am_robot::DispatchPool]; between robot ticks the driver
//! calls [`MailPool::load_robots`] with the robot list, and the pool fills
//! each registered robot's hand and tube and dispatches it.

pub mod error;
pub mod pool;


pub use error::{PoolError, PoolResult};
pub use pool::{LoadReport, MailPool, PoolOrder};
