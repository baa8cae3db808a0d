//! `am-sim`: tick driver for the automail simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks (or until all mail is resolved):
//!   ① Arrivals: mail arriving this tick enters the pool.
//!   ② Load    : the pool fills and dispatches registered robots;
//!                overweight mail is rejected.
//!   ③ Robots  : every robot ticks once, ascending RobotId.
//!   ④ Report  : robot events, deliveries and a tick summary go to the
//!                observer.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use am_core::SimConfig;
//! use am_mail::MailGeneratorConfig;
//! use am_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .generated(MailGeneratorConfig::default())?
//!     .build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod recorder;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, SimSummary, TickSummary};
pub use recorder::{Accountant, DeliveryRecord, DeliveryStats, Recorder};
pub use sim::Sim;
