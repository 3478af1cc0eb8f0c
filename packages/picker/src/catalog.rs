use heapless::Vec;

use crate::types::{NetworkRecord, CATALOG_CAPACITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { index: usize },
    InsertedEvicting { index: usize },
    Rejected,
}

/// Strongest-first list of at most [`CATALOG_CAPACITY`] networks.
///
/// Entries are ordered strictly by descending signal strength; equal strengths
/// keep arrival order. Once full, a newcomer must be strictly stronger than
/// the weakest entry, which it then pushes out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<NetworkRecord, CATALOG_CAPACITY>,
}

impl Catalog {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn insert(&mut self, record: NetworkRecord) -> InsertOutcome {
        let full = self.entries.is_full();
        if full {
            if let Some(weakest) = self.entries.last() {
                if record.signal_strength <= weakest.signal_strength {
                    return InsertOutcome::Rejected;
                }
            }
        }

        let index = self
            .entries
            .iter()
            .position(|held| held.signal_strength < record.signal_strength)
            .unwrap_or(self.entries.len());

        if full {
            // The weakest slot is overwritten and rotated into place.
            let last = self.entries.len() - 1;
            self.entries[last] = record;
            self.entries[index..].rotate_right(1);
            return InsertOutcome::InsertedEvicting { index };
        }

        if self.entries.push(record).is_err() {
            return InsertOutcome::Rejected;
        }
        self.entries[index..].rotate_right(1);
        InsertOutcome::Inserted { index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub fn get(&self, index: usize) -> Option<&NetworkRecord> {
        self.entries.get(index)
    }

    pub fn weakest(&self) -> Option<&NetworkRecord> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkRecord> {
        self.entries.iter()
    }
}
