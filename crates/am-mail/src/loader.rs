//! CSV arrival loader.
//!
//! # CSV format
//!
//! One row per mail item:
//!
//! ```csv
//! mail_id,arrival_tick,destination_floor,weight
//! 0,0,3,500
//! 1,0,7,1200
//! 2,4,-1,300
//! ```
//!
//! Rows may appear in any order; items are queued by `arrival_tick`.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use am_core::{Floor, MailId, Tick};

use crate::{ArrivalQueue, MailError, MailItem, MailResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRecord {
    mail_id:           u64,
    arrival_tick:      u64,
    destination_floor: Floor,
    weight:            u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load mail arrivals from a CSV file.
pub fn load_arrivals_csv(path: &Path) -> MailResult<ArrivalQueue> {
    let file = std::fs::File::open(path)?;
    load_arrivals_reader(file)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
///
/// Duplicate `mail_id`s are rejected: an id must name exactly one item or
/// delivery accounting breaks.
pub fn load_arrivals_reader<R: Read>(reader: R) -> MailResult<ArrivalQueue> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut seen  = HashSet::new();
    let mut queue = ArrivalQueue::new();

    for result in csv_reader.deserialize::<ArrivalRecord>() {
        let row = result.map_err(|e| MailError::Parse(e.to_string()))?;
        if !seen.insert(row.mail_id) {
            return Err(MailError::Parse(format!("duplicate mail_id {}", row.mail_id)));
        }
        queue.push(MailItem::new(
            MailId(row.mail_id),
            row.destination_floor,
            row.weight,
            Tick(row.arrival_tick),
        ));
    }

    Ok(queue)
}
