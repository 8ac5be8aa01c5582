//! Semester configuration template.
//!
//! The institution publishes one template per semester: the semester range,
//! the system events (holidays, assessment dates) and the multi-day system
//! ranges. The replication engine consumes it read-only, and only for the
//! PAF1 lookup; the rest is carried so a template file round-trips.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::days_inclusive;
use crate::error::{ReplicaError, ReplicaResult};
use crate::event::{Category, Event, EventType};

/// Semester identification block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterInfo {
    pub code: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A multi-day institutional period (vacation weeks, review windows),
/// expanded into one system event per day when a calendar is seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRange {
    pub id_prefix: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub event_type: Option<EventType>,
}

impl SystemRange {
    /// One system event per day in the range, ids suffixed with the date.
    pub fn expand(&self) -> Vec<Event> {
        days_inclusive(self.start_date, self.end_date)
            .map(|date| Event {
                id: format!("{}_{}", self.id_prefix, date.format("%Y%m%d")),
                title: self.title.clone(),
                date,
                category_id: self.category_id.clone(),
                description: None,
                is_system_event: true,
                event_type: self.event_type,
                is_replicated: false,
                original_date: None,
            })
            .collect()
    }
}

/// The global semester-configuration template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterTemplate {
    pub semester: SemesterInfo,
    #[serde(default)]
    pub system_events: Vec<Event>,
    #[serde(default)]
    pub system_ranges: Vec<SystemRange>,
    #[serde(default)]
    pub default_categories: Vec<Category>,
}

impl SemesterTemplate {
    /// Load a template from a JSON file and validate it.
    pub fn load(path: &Path) -> ReplicaResult<SemesterTemplate> {
        let content = std::fs::read_to_string(path)?;
        let template: SemesterTemplate = serde_json::from_str(&content)
            .map_err(|e| ReplicaError::Serialization(e.to_string()))?;
        template.validate()?;
        Ok(template)
    }

    pub fn validate(&self) -> ReplicaResult<()> {
        if self.semester.start_date > self.semester.end_date {
            return Err(ReplicaError::Config(format!(
                "semester '{}' has startDate after endDate",
                self.semester.code
            )));
        }
        Ok(())
    }

    /// Date of the template's PAF1 system event, if it declares one.
    pub fn paf1_date(&self) -> Option<NaiveDate> {
        self.system_events
            .iter()
            .find(|e| e.event_type == Some(EventType::Paf1))
            .map(|e| e.date)
    }

    /// Built-in configuration for the 2024-25 second semester, used when no
    /// template file is supplied.
    pub fn fallback() -> SemesterTemplate {
        fn day(s: &str) -> NaiveDate {
            s.parse().expect("fallback template date")
        }

        fn system_event(id: &str, title: &str, date: &str, category: &str, kind: EventType) -> Event {
            Event {
                id: id.to_string(),
                title: title.to_string(),
                date: day(date),
                category_id: Some(category.to_string()),
                description: None,
                is_system_event: true,
                event_type: Some(kind),
                is_replicated: false,
                original_date: None,
            }
        }

        fn range(
            id_prefix: &str,
            title: &str,
            start: &str,
            end: &str,
            category: &str,
            kind: EventType,
        ) -> SystemRange {
            SystemRange {
                id_prefix: id_prefix.to_string(),
                title: title.to_string(),
                start_date: day(start),
                end_date: day(end),
                category_id: Some(category.to_string()),
                event_type: Some(kind),
            }
        }

        fn category(id: &str, name: &str, color: &str) -> Category {
            Category {
                id: id.to_string(),
                name: name.to_string(),
                color: color.to_string(),
                is_system: true,
            }
        }

        SemesterTemplate {
            semester: SemesterInfo {
                code: "24S2".to_string(),
                name: "Segon Semestre 2024-25".to_string(),
                start_date: day("2025-02-14"),
                end_date: day("2025-06-27"),
            },
            system_events: vec![
                system_event(
                    "SYS_FESTIU_20250303",
                    "Festiu centre",
                    "2025-03-03",
                    "SYSTEMCAT_1",
                    EventType::Festiu,
                ),
                system_event(
                    "SYS_FESTIU_20250501",
                    "Festa del Treball",
                    "2025-05-01",
                    "SYSTEMCAT_1",
                    EventType::Festiu,
                ),
                system_event(
                    "SYS_IOC_ORIENTACIONS_PAF",
                    "Orientacions PAF",
                    "2025-05-14",
                    "SYSTEMCAT_2",
                    EventType::IocGeneric,
                ),
                system_event(
                    "SYS_PAF1_20250524",
                    "PAF1",
                    "2025-05-24",
                    "SYSTEMCAT_3",
                    EventType::Paf1,
                ),
                system_event(
                    "SYS_PAF2_20250607",
                    "PAF2",
                    "2025-06-07",
                    "SYSTEMCAT_3",
                    EventType::Paf2,
                ),
            ],
            system_ranges: vec![
                range(
                    "SYS_SS_2025",
                    "Vacances Setmana Santa",
                    "2025-04-12",
                    "2025-04-21",
                    "SYSTEMCAT_1",
                    EventType::Festiu,
                ),
                range(
                    "SYS_REVP1_2025",
                    "Revisió PAF1",
                    "2025-05-30",
                    "2025-06-03",
                    "SYSTEMCAT_2",
                    EventType::IocGeneric,
                ),
                range(
                    "SYS_REVP2_2025",
                    "Revisió PAF2",
                    "2025-06-13",
                    "2025-06-17",
                    "SYSTEMCAT_2",
                    EventType::IocGeneric,
                ),
            ],
            default_categories: vec![
                category("SYSTEMCAT_1", "Festiu", "#f43f5e"),
                category("SYSTEMCAT_2", "IOC", "#3b82f6"),
                category("SYSTEMCAT_3", "PAF", "#8b5cf6"),
            ],
        }
    }
}
