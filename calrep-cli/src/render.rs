//! Terminal rendering for calrep-core types.
//!
//! Extension trait adding colored output via owo_colors, so the core stays
//! free of presentation concerns.

use calrep_core::{AllocationResult, Calendar, PlacementRecord, UnplacedEntry};
use owo_colors::OwoColorize;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Calendar {
    fn render(&self) -> String {
        format!("📅 {} ({} → {})", self.name, self.start_date, self.end_date)
    }
}

impl Render for PlacementRecord {
    fn render(&self) -> String {
        let movement = format!("{} → {}", self.original_date, self.new_date);
        format!(
            "{} {} {} {}",
            "+".green(),
            self.event.title.green(),
            movement.dimmed(),
            format!("({}%)", self.confidence).dimmed()
        )
    }
}

impl Render for UnplacedEntry {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}",
            "!".red(),
            self.event.title.red(),
            format!("({})", self.reason).dimmed(),
            format!("[{}]", self.id).dimmed()
        )
    }
}

impl Render for AllocationResult {
    fn render(&self) -> String {
        let placed = format!("{} placed", self.placed.len());
        let unplaced = format!("{} unplaced", self.unplaced.len());

        if self.unplaced.is_empty() {
            format!("{}, {}", placed.green(), unplaced)
        } else {
            format!("{}, {}", placed.green(), unplaced.red())
        }
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
