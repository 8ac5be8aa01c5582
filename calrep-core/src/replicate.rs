//! Proportional event replication.
//!
//! Maps each professor event of a source calendar onto a workable day of a
//! target calendar with a different date range and holiday layout. Positions
//! are proportional: an event a third of the way into the source workable
//! space lands a third of the way into the target one. Collisions resolve
//! through a bounded radial search biased toward earlier dates, and events
//! with no home become [`UnplacedEntry`] values for manual resolution.
//!
//! The whole run is deterministic: identical inputs produce identical
//! results on every invocation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::dates::is_weekday;
use crate::error::{ReplicaError, ReplicaResult};
use crate::event::Event;
use crate::semester::SemesterTemplate;
use crate::unplaced::{UnplacedEntry, UnplacedReason};
use crate::workable::analyze_workable_space;

/// One successfully placed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    /// The newly created event (fresh id, new date, `is_replicated` set).
    pub event: Event,
    pub new_date: NaiveDate,
    pub original_date: NaiveDate,
    /// Advisory placement-quality score in `[70, 99]`. Nothing branches on it.
    pub confidence: u8,
    /// Human-readable placement note; may be empty.
    pub reason: String,
}

/// The complete output of one replication run. Never partial: the run either
/// produces this in full or fails without touching any calendar state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub placed: Vec<PlacementRecord>,
    pub unplaced: Vec<UnplacedEntry>,
}

impl AllocationResult {
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty() && self.unplaced.is_empty()
    }

    /// Merge the placed events into the target calendar's event list. The
    /// caller applies this only after a successful run.
    pub fn apply_to(&self, target: &mut Calendar) {
        target
            .events
            .extend(self.placed.iter().map(|r| r.event.clone()));
    }
}

/// Replicate the professor events of `source` onto `target`.
///
/// Never mutates either calendar; apply the returned placements with
/// [`AllocationResult::apply_to`] once the call succeeds. Per-event
/// placement failures are data in the result, not errors; see
/// [`ReplicaError`] for the fatal cases.
pub fn replicate(
    source: &Calendar,
    target: &Calendar,
    template: &SemesterTemplate,
) -> ReplicaResult<AllocationResult> {
    source.validate()?;
    target.validate()?;

    let mut professor_events: Vec<&Event> = source.professor_events().collect();
    // Stable sort: equal dates keep their input order
    professor_events.sort_by_key(|e| e.date);

    if professor_events.is_empty() {
        return Ok(AllocationResult::default());
    }

    let source_space = analyze_workable_space(source, template);
    let target_space = analyze_workable_space(target, template);

    if target_space.is_empty() {
        let unplaced = professor_events
            .into_iter()
            .map(|e| UnplacedEntry::new(e.clone(), UnplacedReason::NoTargetSpace))
            .collect();
        return Ok(AllocationResult {
            placed: Vec::new(),
            unplaced,
        });
    }

    if source_space.is_empty() {
        return Err(ReplicaError::Inconsistent(format!(
            "calendar '{}' has professor events but an empty workable space",
            source.name
        )));
    }

    let scale_factor = target_space.len() as f64 / source_space.len() as f64;
    let mut occupancy = Occupancy::new(target_space.len());

    let mut placed: Vec<PlacementRecord> = Vec::new();
    let mut unplaced: Vec<UnplacedEntry> = Vec::new();

    for event in professor_events {
        let Some(source_index) = source_space.index_of(event.date) else {
            unplaced.push(UnplacedEntry::new(
                event.clone(),
                UnplacedReason::NotInSourceSpace,
            ));
            continue;
        };

        let ideal_index = (source_index as f64 * scale_factor).round() as usize;

        let Some(final_index) = occupancy.nearest_free_slot(ideal_index) else {
            unplaced.push(UnplacedEntry::new(
                event.clone(),
                UnplacedReason::NoFreeSlot,
            ));
            continue;
        };

        occupancy.occupy(final_index);
        let new_date = target_space.days()[final_index];

        let new_event = event.replicated_onto(target.next_event_id(placed.len()), new_date);
        placed.push(PlacementRecord {
            event: new_event,
            new_date,
            original_date: event.date,
            confidence: confidence(ideal_index, final_index, scale_factor),
            reason: String::new(),
        });
    }

    // Hard postcondition: a non-weekday placement is an algorithm defect,
    // never an unplaced entry.
    if let Some(record) = placed.iter().find(|r| !is_weekday(r.new_date)) {
        return Err(ReplicaError::Invariant(format!(
            "replicated event '{}' landed on non-weekday {}",
            record.event.title, record.new_date
        )));
    }

    Ok(AllocationResult { placed, unplaced })
}

/// Advisory confidence score for one placement, in `[70, 99]`.
///
/// Base 95, minus 2 per slot of drift between the ideal and final index
/// (capped at 15), plus 3 when the scale factor is near 1.0.
pub fn confidence(ideal_index: usize, final_index: usize, scale_factor: f64) -> u8 {
    let mut confidence: i32 = 95;

    let drift = ideal_index.abs_diff(final_index) as i32;
    confidence -= (drift * 2).min(15);

    if (scale_factor - 1.0).abs() < 0.1 {
        confidence += 3;
    }

    confidence.clamp(70, 99) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Free,
    Occupied,
}

/// Binary occupancy over the target workable space, insertion-ordered
/// identically to it. Lives for one replication run.
#[derive(Debug)]
struct Occupancy {
    slots: Vec<Slot>,
}

impl Occupancy {
    fn new(len: usize) -> Self {
        Occupancy {
            slots: vec![Slot::Free; len],
        }
    }

    fn occupy(&mut self, index: usize) {
        self.slots[index] = Slot::Occupied;
    }

    /// Nearest free slot to `ideal_index`, or `None` when every slot is
    /// taken.
    ///
    /// The ideal index is clamped into bounds first. Ties at equal radius
    /// break toward the earlier slot, keeping replicated sequences
    /// chronologically compact. Terminates within `len` iterations.
    fn nearest_free_slot(&self, ideal_index: usize) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }

        let len = self.slots.len();
        let ideal = ideal_index.min(len - 1);

        if self.slots[ideal] == Slot::Free {
            return Some(ideal);
        }

        for radius in 1..=len {
            let backward = ideal.checked_sub(radius);
            let forward = ideal + radius;

            // Backward first: prefer earlier dates
            if let Some(back) = backward
                && self.slots[back] == Slot::Free
            {
                return Some(back);
            }

            if forward < len && self.slots[forward] == Slot::Free {
                return Some(forward);
            }

            if backward.is_none() && forward >= len {
                return None;
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use crate::semester::SemesterInfo;
    use crate::workable::WorkableSpace;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// Template with no system events, so it never interferes with windows.
    fn neutral_template() -> SemesterTemplate {
        SemesterTemplate {
            semester: SemesterInfo {
                code: "TEST".to_string(),
                name: "Test".to_string(),
                start_date: date("2025-01-01"),
                end_date: date("2026-12-31"),
            },
            system_events: vec![],
            system_ranges: vec![],
            default_categories: vec![],
        }
    }

    fn professor_event(id: &str, on: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Lliurament {id}"),
            date: on,
            category_id: Some("CAT_1".to_string()),
            description: None,
            is_system_event: false,
            event_type: None,
            is_replicated: false,
            original_date: None,
        }
    }

    fn festiu(id: &str, on: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: "Festiu".to_string(),
            date: on,
            category_id: None,
            description: None,
            is_system_event: true,
            event_type: Some(EventType::Festiu),
            is_replicated: false,
            original_date: None,
        }
    }

    /// Mon 2025-02-17 .. Fri 2025-07-04: exactly 100 weekdays.
    fn source_100() -> Calendar {
        Calendar::new("SRC", "Source", date("2025-02-17"), date("2025-07-04"))
    }

    /// Mon 2025-09-15 .. Fri 2025-11-21: exactly 50 weekdays.
    fn target_50() -> Calendar {
        Calendar::new("TGT", "Target", date("2025-09-15"), date("2025-11-21"))
    }

    fn space_of(calendar: &Calendar) -> WorkableSpace {
        analyze_workable_space(calendar, &neutral_template())
    }

    /// Add a professor event on the workable day at `index`.
    fn add_event_at_index(calendar: &mut Calendar, id: &str, index: usize) {
        let day = space_of(calendar).day(index).unwrap();
        calendar.events.push(professor_event(id, day));
    }

    #[test]
    fn halving_scale_maps_index_50_to_index_25_with_confidence_95() {
        let mut source = source_100();
        let target = target_50();
        assert_eq!(space_of(&source).len(), 100);
        assert_eq!(space_of(&target).len(), 50);

        add_event_at_index(&mut source, "SRC_E1", 50);

        let result = replicate(&source, &target, &neutral_template()).unwrap();

        assert_eq!(result.placed.len(), 1);
        assert!(result.unplaced.is_empty());
        let record = &result.placed[0];
        assert_eq!(record.new_date, space_of(&target).day(25).unwrap());
        // No drift, scale factor 0.5 earns no near-direct bonus
        assert_eq!(record.confidence, 95);
        assert_eq!(record.event.id, "TGT_E1");
        assert!(record.event.is_replicated);
        assert_eq!(record.event.original_date, Some(record.original_date));
    }

    #[test]
    fn colliding_ideal_indices_prefer_the_earlier_slot() {
        let mut source = source_100();
        let target = target_50();
        // round(19 * 0.5) == round(20 * 0.5) == 10
        add_event_at_index(&mut source, "SRC_E1", 19);
        add_event_at_index(&mut source, "SRC_E2", 20);

        let result = replicate(&source, &target, &neutral_template()).unwrap();

        assert_eq!(result.placed.len(), 2);
        let target_space = space_of(&target);
        // First-processed event claims the center slot
        assert_eq!(result.placed[0].new_date, target_space.day(10).unwrap());
        // Second resolves backward: index 9, not 11
        assert_eq!(result.placed[1].new_date, target_space.day(9).unwrap());
        assert_eq!(result.placed[1].confidence, 95 - 2);
    }

    #[test]
    fn empty_target_space_unplaces_everything() {
        let mut source = source_100();
        add_event_at_index(&mut source, "SRC_E1", 0);
        add_event_at_index(&mut source, "SRC_E2", 40);
        // Sat + Sun only
        let target = Calendar::new("TGT", "Target", date("2025-09-20"), date("2025-09-21"));

        let result = replicate(&source, &target, &neutral_template()).unwrap();

        assert!(result.placed.is_empty());
        assert_eq!(result.unplaced.len(), 2);
        assert!(
            result
                .unplaced
                .iter()
                .all(|e| e.reason == UnplacedReason::NoTargetSpace)
        );
        assert!(
            result.unplaced[0]
                .reason
                .to_string()
                .contains("no available workable space")
        );
    }

    #[test]
    fn event_outside_source_space_becomes_unplaced() {
        let mut source = source_100();
        add_event_at_index(&mut source, "SRC_E1", 10);
        // Manually placed on a Saturday
        source
            .events
            .push(professor_event("SRC_WEEKEND", date("2025-03-01")));

        let result = replicate(&source, &target_50(), &neutral_template()).unwrap();

        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].event.id, "SRC_WEEKEND");
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NotInSourceSpace);
    }

    #[test]
    fn overflow_beyond_target_capacity_reports_no_free_slot() {
        let mut source = source_100();
        for (i, index) in [10usize, 30, 50].iter().enumerate() {
            add_event_at_index(&mut source, &format!("SRC_E{i}"), *index);
        }
        // Mon + Tue only: two workable days for three events
        let target = Calendar::new("TGT", "Target", date("2025-09-15"), date("2025-09-16"));

        let result = replicate(&source, &target, &neutral_template()).unwrap();

        assert_eq!(result.placed.len(), 2);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].reason, UnplacedReason::NoFreeSlot);
        // Cardinality law: placed + unplaced == selected professor events
        assert_eq!(result.placed.len() + result.unplaced.len(), 3);
    }

    #[test]
    fn placements_are_weekdays_in_range_and_never_collide() {
        let mut source = source_100();
        for (i, index) in [0usize, 7, 19, 20, 21, 55, 99].iter().enumerate() {
            add_event_at_index(&mut source, &format!("SRC_E{i}"), *index);
        }
        let mut target = target_50();
        // Carve some holidays out of the target to force drift
        target.events.push(festiu("F1", date("2025-09-29")));
        target.events.push(festiu("F2", date("2025-10-20")));

        let result = replicate(&source, &target, &neutral_template()).unwrap();

        assert_eq!(result.placed.len() + result.unplaced.len(), 7);
        for record in &result.placed {
            assert!(is_weekday(record.new_date));
            assert!(target.contains(record.new_date));
        }
        let mut dates: Vec<NaiveDate> = result.placed.iter().map(|r| r.new_date).collect();
        dates.sort();
        dates.dedup();
        assert_eq!(dates.len(), result.placed.len());
    }

    #[test]
    fn identical_spaces_preserve_ordering_and_positions() {
        let mut source = source_100();
        let indices = [3usize, 10, 20, 75];
        for (i, index) in indices.iter().enumerate() {
            add_event_at_index(&mut source, &format!("SRC_E{i}"), *index);
        }
        // Same date range, so the spaces align and the scale factor is 1
        let target = Calendar::new("TGT", "Target", date("2025-02-17"), date("2025-07-04"));

        let result = replicate(&source, &target, &neutral_template()).unwrap();

        let target_space = space_of(&target);
        assert_eq!(result.placed.len(), indices.len());
        for (record, index) in result.placed.iter().zip(indices) {
            assert_eq!(record.new_date, target_space.day(index).unwrap());
            // Near-direct mapping earns the scale bonus
            assert_eq!(record.confidence, 98);
        }
        // No reordering when no collisions are forced
        assert!(result.placed.is_sorted_by_key(|r| r.new_date));
    }

    #[test]
    fn replication_is_deterministic() {
        let mut source = source_100();
        for (i, index) in [5usize, 19, 20, 48, 97].iter().enumerate() {
            add_event_at_index(&mut source, &format!("SRC_E{i}"), *index);
        }
        let target = target_50();

        let first = replicate(&source, &target, &neutral_template()).unwrap();
        let second = replicate(&source, &target, &neutral_template()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn equal_dates_keep_their_input_order() {
        let mut source = source_100();
        let shared_day = space_of(&source).day(30).unwrap();
        source.events.push(professor_event("SRC_FIRST", shared_day));
        source.events.push(professor_event("SRC_SECOND", shared_day));

        let result = replicate(&source, &target_50(), &neutral_template()).unwrap();

        // The sort is stable, so the first input event claims the center slot
        assert_eq!(result.placed.len(), 2);
        assert_eq!(result.placed[0].event.title, "Lliurament SRC_FIRST");
        assert_eq!(result.placed[1].event.title, "Lliurament SRC_SECOND");
        assert!(result.placed[1].new_date < result.placed[0].new_date);
    }

    #[test]
    fn no_professor_events_is_a_legal_no_op() {
        let mut source = source_100();
        source.events.push(festiu("F1", date("2025-03-03")));

        let result = replicate(&source, &target_50(), &neutral_template()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn invalid_calendar_fails_before_any_computation() {
        let source = Calendar::new("SRC", "Source", date("2025-07-04"), date("2025-02-17"));
        let err = replicate(&source, &target_50(), &neutral_template()).unwrap_err();
        assert!(matches!(err, ReplicaError::InvalidCalendar { .. }));
    }

    #[test]
    fn events_with_empty_source_space_are_a_data_inconsistency() {
        // Mon..Fri, every day a holiday, yet a professor event exists
        let mut source = Calendar::new("SRC", "Source", date("2025-03-03"), date("2025-03-07"));
        for day in ["2025-03-03", "2025-03-04", "2025-03-05", "2025-03-06", "2025-03-07"] {
            source.events.push(festiu(day, date(day)));
        }
        source
            .events
            .push(professor_event("SRC_E1", date("2025-03-05")));

        let err = replicate(&source, &target_50(), &neutral_template()).unwrap_err();
        assert!(matches!(err, ReplicaError::Inconsistent(_)));
    }

    #[test]
    fn placed_ids_are_sequential_within_the_target_namespace() {
        let mut source = source_100();
        for (i, index) in [2usize, 8, 33].iter().enumerate() {
            add_event_at_index(&mut source, &format!("SRC_E{i}"), *index);
        }
        let mut target = target_50();
        // Pre-existing counter in the target must not be reused
        target.events.push(festiu("TGT_E4", date("2025-09-15")));

        let result = replicate(&source, &target, &neutral_template()).unwrap();
        let ids: Vec<&str> = result.placed.iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ids, vec!["TGT_E5", "TGT_E6", "TGT_E7"]);
    }

    #[test]
    fn apply_to_merges_placed_events_into_the_target() {
        let mut source = source_100();
        add_event_at_index(&mut source, "SRC_E1", 12);
        let mut target = target_50();

        let result = replicate(&source, &target, &neutral_template()).unwrap();
        result.apply_to(&mut target);

        assert_eq!(target.events.len(), 1);
        assert_eq!(target.events[0], result.placed[0].event);
    }

    mod slot_search {
        use super::super::{Occupancy, Slot};

        fn occupancy(pattern: &str) -> Occupancy {
            Occupancy {
                slots: pattern
                    .chars()
                    .map(|c| if c == 'x' { Slot::Occupied } else { Slot::Free })
                    .collect(),
            }
        }

        #[test]
        fn free_ideal_slot_is_returned_immediately() {
            assert_eq!(occupancy(".....").nearest_free_slot(2), Some(2));
        }

        #[test]
        fn backward_slot_wins_ties_at_equal_radius() {
            assert_eq!(occupancy("..x..").nearest_free_slot(2), Some(1));
        }

        #[test]
        fn forward_slot_is_used_when_backward_is_taken() {
            assert_eq!(occupancy(".xx..").nearest_free_slot(2), Some(3));
        }

        #[test]
        fn out_of_bounds_ideal_clamps_to_the_last_slot() {
            assert_eq!(occupancy("....").nearest_free_slot(99), Some(3));
            assert_eq!(occupancy("...x").nearest_free_slot(99), Some(2));
        }

        #[test]
        fn fully_occupied_map_has_no_slot() {
            assert_eq!(occupancy("xxxx").nearest_free_slot(1), None);
        }

        #[test]
        fn empty_map_has_no_slot() {
            assert_eq!(occupancy("").nearest_free_slot(0), None);
        }

        #[test]
        fn single_distant_slot_is_still_found() {
            assert_eq!(occupancy(".xxxxxxxx").nearest_free_slot(8), Some(0));
        }
    }

    mod scoring {
        use super::super::confidence;

        #[test]
        fn no_drift_far_from_direct_scale_scores_base() {
            assert_eq!(confidence(25, 25, 0.5), 95);
        }

        #[test]
        fn near_direct_scale_earns_the_bonus() {
            assert_eq!(confidence(10, 10, 1.05), 98);
        }

        #[test]
        fn drift_penalty_is_capped_at_fifteen() {
            assert_eq!(confidence(0, 3, 0.5), 95 - 6);
            assert_eq!(confidence(0, 40, 0.5), 95 - 15);
        }

        #[test]
        fn score_stays_within_bounds() {
            let score = confidence(0, 100, 1.0);
            assert!((70..=99).contains(&score));
        }
    }
}
