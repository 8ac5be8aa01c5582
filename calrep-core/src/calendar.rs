//! Calendar records and their JSON persistence.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ReplicaError, ReplicaResult};
use crate::event::{Category, Event};

/// A semester calendar: a date range plus its events and categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Calendar {
    pub fn new(id: &str, name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Calendar {
            id: id.to_string(),
            name: name.to_string(),
            start_date,
            end_date,
            events: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Structural precondition check, raised before any computation runs
    /// against this calendar.
    pub fn validate(&self) -> ReplicaResult<()> {
        if self.start_date > self.end_date {
            return Err(ReplicaError::InvalidCalendar {
                name: self.name.clone(),
                reason: format!(
                    "startDate {} is after endDate {}",
                    self.start_date, self.end_date
                ),
            });
        }
        Ok(())
    }

    /// Load a calendar from a JSON file and validate it.
    pub fn load(path: &Path) -> ReplicaResult<Calendar> {
        let content = std::fs::read_to_string(path)?;
        let calendar: Calendar = serde_json::from_str(&content)
            .map_err(|e| ReplicaError::Serialization(e.to_string()))?;
        calendar.validate()?;
        Ok(calendar)
    }

    /// Write the calendar as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> ReplicaResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ReplicaError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn professor_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.is_professor_event())
    }

    /// Next sequential event id for this calendar, of the form
    /// `"<calendar-id>_E<n>"`. Scans existing ids for the highest counter so
    /// that loading an old calendar never reuses an id. `offset` reserves
    /// ids for a batch: `next_event_id(0)`, `next_event_id(1)`, ... are
    /// distinct even before any of them is inserted.
    pub fn next_event_id(&self, offset: usize) -> String {
        let prefix = format!("{}_E", self.id);
        let max = self
            .events
            .iter()
            .filter_map(|e| e.id.strip_prefix(&prefix)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("{}{}", prefix, max + 1 + offset as u64)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
