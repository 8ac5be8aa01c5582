//! Manual resolution of unplaced events.
//!
//! `replicate --unplaced FILE` persists the pending entries; `place` and
//! `dismiss` work through that file one entry at a time, mirroring the
//! resolution panel of the calendar application.

use std::path::Path;

use anyhow::{Context, Result};
use calrep_core::{Calendar, UnplacedStore};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::pluralize;

pub fn load_store(path: &Path) -> Result<UnplacedStore> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading unplaced store {}", path.display()))?;
    let store = serde_json::from_str(&content)
        .with_context(|| format!("parsing unplaced store {}", path.display()))?;
    Ok(store)
}

pub fn save_store(store: &UnplacedStore, path: &Path) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(store)?)?;
    Ok(())
}

/// Place a pending entry on a caller-chosen date and insert the resulting
/// event into the calendar.
pub fn place(
    store_path: &Path,
    id: &str,
    date: NaiveDate,
    calendar_path: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let mut store = load_store(store_path)?;
    let mut calendar = Calendar::load(calendar_path)?;

    if !calendar.contains(date) {
        anyhow::bail!(
            "{} is outside calendar '{}' ({} → {})",
            date,
            calendar,
            calendar.start_date,
            calendar.end_date
        );
    }

    let event = store.place(id, date)?;
    println!(
        "{} {} {}",
        "+".green(),
        event.title.green(),
        format!("→ {}", date).dimmed()
    );

    calendar.events.push(event);
    calendar.save(output.unwrap_or(calendar_path))?;
    save_store(&store, store_path)?;

    report_pending(&store);
    Ok(())
}

/// Drop a pending entry with no further effect.
pub fn dismiss(store_path: &Path, id: &str) -> Result<()> {
    let mut store = load_store(store_path)?;

    let entry = store.dismiss(id)?;
    save_store(&store, store_path)?;

    println!("{} {}", "-".red(), entry.event.title);
    report_pending(&store);
    Ok(())
}

fn report_pending(store: &UnplacedStore) {
    println!(
        "{}",
        format!(
            "{} pending {}",
            store.len(),
            pluralize("event", store.len())
        )
        .dimmed()
    );
}
