//! Calendar event types.
//!
//! Events are immutable value records: replication never moves a source
//! event, it constructs a new instance with a new id and a new date.
//! Serialized field names match the JSON the calendar application persists
//! (`categoryId`, `isSystemEvent`, `eventType`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single-day calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// System events belong to the institution (holidays, assessment dates)
    /// and are never replicated.
    #[serde(default)]
    pub is_system_event: bool,
    #[serde(default)]
    pub event_type: Option<EventType>,
    /// Set on events produced by a replication run.
    #[serde(default)]
    pub is_replicated: bool,
    /// The date the event carried in its source calendar, if replicated.
    #[serde(default)]
    pub original_date: Option<NaiveDate>,
}

impl Event {
    /// A professor event is any event the institution did not author.
    pub fn is_professor_event(&self) -> bool {
        !self.is_system_event
    }

    /// Build the replicated copy of this event, landing on `date`.
    pub fn replicated_onto(&self, id: String, date: NaiveDate) -> Event {
        Event {
            id,
            date,
            is_replicated: true,
            original_date: Some(self.date),
            ..self.clone()
        }
    }
}

/// Institutional event classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// Holiday; occupies its day even when authored as a plain event.
    #[serde(rename = "FESTIU")]
    Festiu,
    /// Generic institutional event (orientations, review periods).
    #[serde(rename = "IOC_GENERIC")]
    IocGeneric,
    /// First capstone assessment; marks the end of the replicable period.
    #[serde(rename = "PAF1")]
    Paf1,
    /// Second capstone assessment.
    #[serde(rename = "PAF2")]
    Paf2,
}

/// An event category (color grouping). Carried for format fidelity; the
/// replication engine does not consult it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub is_system: bool,
}
