//! Insertion Order Module
//!
//! Remembers the order in which keys were first stored, for key enumeration.

use std::collections::{BTreeMap, HashMap};

// == Insertion Order ==
/// Tracks keys in insertion order.
///
/// Every newly inserted key takes the next sequence number:
/// - Lowest sequence = oldest insertion
/// - Highest sequence = newest insertion
///
/// Overwriting a key keeps its position; removing and re-inserting it moves
/// it to the back. Removal looks the sequence up by key, so it never scans.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    next_seq: u64,
    by_seq: BTreeMap<u64, String>,
    seq_of: HashMap<String, u64>,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Appends `key` at the back. A key that is already tracked keeps its
    /// position.
    pub fn push(&mut self, key: &str) {
        if self.seq_of.contains_key(key) {
            return;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_seq.insert(seq, key.to_string());
        self.seq_of.insert(key.to_string(), seq);
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        if let Some(seq) = self.seq_of.remove(key) {
            self.by_seq.remove(&seq);
        }
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.by_seq.clear();
        self.seq_of.clear();
    }

    // == Iter ==
    /// Keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.by_seq.values()
    }
}
