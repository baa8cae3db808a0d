//! `am-core`: foundational types for the automail simulator.
//!
//! Every other `am-*` crate depends on this one.  It has no `am-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`ids`]       | `RobotId`, `MailId`                                    |
//! | [`building`]  | `Floor`, `Building` (floor range + mailroom)           |
//! | [`time`]      | `Tick`, `SimClock`                                     |
//! | [`config`]    | `SimConfig` and the capacity constants                 |
//! | [`rng`]       | `SimRng`                                               |
//! | [`error`]     | `AmError`, `AmResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod building;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use building::{Building, Floor};
pub use config::{MAX_DELIVERY_LEGS, MAX_ITEM_WEIGHT, SimConfig};
pub use error::{AmError, AmResult};
pub use ids::{MailId, RobotId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
