//! Workable-space analysis.
//!
//! The workable space of a calendar is the ordered sequence of days eligible
//! to receive a replicated event: weekdays inside the evaluation window that
//! no system event or holiday occupies. Its ascending order is the positional
//! coordinate system of the proportional mapping, so ordering here is a
//! correctness invariant, not a convenience.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::calendar::Calendar;
use crate::dates::{days_inclusive, is_weekday};
use crate::event::EventType;
use crate::semester::SemesterTemplate;

/// Ordered ascending sequence of distinct replication-eligible days.
/// Derived per run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkableSpace {
    days: Vec<NaiveDate>,
}

impl WorkableSpace {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, index: usize) -> Option<NaiveDate> {
        self.days.get(index).copied()
    }

    /// Position of `date` in the space, if it is a workable day.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        // Days are ascending and distinct
        self.days.binary_search(&date).ok()
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }
}

/// End of the replicable period for a calendar.
///
/// Three-tier policy, in order: the calendar's own PAF1 event; the template's
/// PAF1 date if it falls within the calendar range; the calendar's end date.
pub fn resolve_evaluation_end(calendar: &Calendar, template: &SemesterTemplate) -> NaiveDate {
    if let Some(paf1) = calendar
        .events
        .iter()
        .find(|e| e.event_type == Some(EventType::Paf1))
    {
        return paf1.date;
    }

    if let Some(date) = template.paf1_date()
        && calendar.contains(date)
    {
        return date;
    }

    calendar.end_date
}

/// Compute the workable space of a calendar.
///
/// A day qualifies iff it lies in `[start_date, evaluation end]`, is a
/// weekday, and carries no holiday (`FESTIU`) or system event. An empty
/// window or a fully occupied one yields an empty space.
pub fn analyze_workable_space(calendar: &Calendar, template: &SemesterTemplate) -> WorkableSpace {
    let evaluation_end = resolve_evaluation_end(calendar, template);

    let occupied_by_system: HashSet<NaiveDate> = calendar
        .events
        .iter()
        .filter(|e| e.event_type == Some(EventType::Festiu) || e.is_system_event)
        .map(|e| e.date)
        .collect();

    let days = days_inclusive(calendar.start_date, evaluation_end)
        .filter(|d| is_weekday(*d) && !occupied_by_system.contains(d))
        .collect();

    WorkableSpace { days }
}
