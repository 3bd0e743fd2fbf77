//! # Order Identifiers
//!
//! Generates the opaque `ord_…` identifiers given to tables.
//!
//! ## Format
//! ```text
//! ord_ lx9k2m1a 002f q7zr
//! │    │        │    └── 4 random base36 chars (UUID v4 entropy)
//! │    │        └─────── 4-char base36 sequence, per generator
//! │    └──────────────── base36 milliseconds since the Unix epoch
//! └───────────────────── fixed prefix
//! ```
//!
//! A pure timestamp + random scheme can collide when two tables are created
//! in the same millisecond and draw the same suffix. The sequence component
//! rules that out for a single generator; the random tail keeps IDs from
//! independent ledgers (e.g. two test fixtures) apart.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ORDER_ID_PREFIX;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Width of the sequence and random segments.
const SEGMENT_WIDTH: u32 = 4;

/// 36^4: the sequence wraps after this many IDs.
const SEGMENT_SPACE: u128 = 36u128.pow(SEGMENT_WIDTH);

/// Order ID generator owned by a single ledger.
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    sequence: u128,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next identifier stamped with the current time.
    pub fn next_id(&mut self) -> String {
        self.next_id_at(Utc::now())
    }

    /// Returns the next identifier stamped with `now`.
    pub fn next_id_at(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(0) as u128;
        let seq = self.sequence % SEGMENT_SPACE;
        self.sequence = self.sequence.wrapping_add(1);
        let random = Uuid::new_v4().as_u128() % SEGMENT_SPACE;

        format!(
            "{}{}{}{}",
            ORDER_ID_PREFIX,
            to_base36(millis, 0),
            to_base36(seq, SEGMENT_WIDTH as usize),
            to_base36(random, SEGMENT_WIDTH as usize),
        )
    }
}

/// Encodes `n` in lowercase base36, left-padded with zeros to `width`.
fn to_base36(mut n: u128, width: usize) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    while digits.len() < width {
        digits.push(b'0');
    }
    digits.reverse();
    // Every byte comes from the BASE36 alphabet.
    digits.into_iter().map(char::from).collect()
}
