//! Unplaced-event entries and their store.
//!
//! Events the allocator could not place wait here for manual resolution.
//! Each entry is addressed by a stable id rather than by list position, so
//! a batch of place/dismiss operations never suffers index-shift bugs.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ReplicaError, ReplicaResult};
use crate::event::Event;

/// Why the allocator could not place an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnplacedReason {
    /// The target calendar's workable space is empty.
    NoTargetSpace,
    /// The event's own date is not a workable day in its source calendar
    /// (e.g. it was manually placed on a weekend).
    NotInSourceSpace,
    /// Every slot in the target workable space is already occupied.
    NoFreeSlot,
}

impl fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            UnplacedReason::NoTargetSpace => "target calendar has no available workable space",
            UnplacedReason::NotInSourceSpace => "event not in source workable space",
            UnplacedReason::NoFreeSlot => "no free slots available",
        };
        f.write_str(message)
    }
}

/// An event awaiting manual placement or dismissal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedEntry {
    /// Stable identifier, derived from the source event id so that results
    /// stay deterministic across runs.
    pub id: String,
    pub event: Event,
    pub original_date: NaiveDate,
    pub reason: UnplacedReason,
}

impl UnplacedEntry {
    pub fn new(event: Event, reason: UnplacedReason) -> Self {
        UnplacedEntry {
            id: format!("unplaced_{}", event.id),
            original_date: event.date,
            event,
            reason,
        }
    }
}

/// Pending unplaced entries. Entries leave the store when placed or
/// dismissed; there is no archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnplacedStore {
    entries: Vec<UnplacedEntry>,
}

impl UnplacedStore {
    pub fn new() -> Self {
        UnplacedStore::default()
    }

    /// Append entries to the pending list. Every entry is kept, but an id
    /// already present in the store gets a numeric suffix, so repeated runs
    /// over the same source calendar never produce two entries that
    /// `place`/`dismiss` could confuse.
    pub fn add(&mut self, entries: Vec<UnplacedEntry>) {
        for mut entry in entries {
            let base = entry.id.clone();
            let mut n = 2;
            while self.entries.iter().any(|e| e.id == entry.id) {
                entry.id = format!("{}_{}", base, n);
                n += 1;
            }
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[UnplacedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&UnplacedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Remove the entry and return a concrete event at `target_date`.
    ///
    /// The caller picked the date and is responsible for inserting the event
    /// into the active calendar and persisting it; the store does not
    /// re-validate the date. An unknown id leaves the list unchanged.
    pub fn place(&mut self, id: &str, target_date: NaiveDate) -> ReplicaResult<Event> {
        let entry = self.remove(id)?;
        let placed = entry.event.replicated_onto(entry.event.id.clone(), target_date);
        Ok(placed)
    }

    /// Remove the entry with no further effect. An unknown id leaves the
    /// list unchanged.
    pub fn dismiss(&mut self, id: &str) -> ReplicaResult<UnplacedEntry> {
        self.remove(id)
    }

    fn remove(&mut self, id: &str) -> ReplicaResult<UnplacedEntry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ReplicaError::UnknownEntry(id.to_string()))?;
        Ok(self.entries.remove(position))
    }
}
