//! `am-mail`: mail items and the sources that produce them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`item`]      | `MailItem`: identity, weight, destination, travel distance  |
//! | [`arrival`]   | `ArrivalQueue`: sparse tick → items map                     |
//! | [`generator`] | `MailGenerator`: seeded random mail for a building          |
//! | [`loader`]    | CSV loading of a fixed arrival list                          |
//! | [`error`]     | `MailError`, `MailResult<T>`                                 |

pub mod arrival;
pub mod error;
pub mod generator;
pub mod item;
pub mod loader;


pub use arrival::ArrivalQueue;
pub use error::{MailError, MailResult};
pub use generator::{MailGenerator, MailGeneratorConfig};
pub use item::MailItem;
pub use loader::{load_arrivals_csv, load_arrivals_reader};
