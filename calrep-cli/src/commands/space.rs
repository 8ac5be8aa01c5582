use std::path::Path;

use anyhow::Result;
use calrep_core::{Calendar, SemesterTemplate, analyze_workable_space, resolve_evaluation_end};
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub fn run(calendar_path: &Path, template: &SemesterTemplate) -> Result<()> {
    let calendar = Calendar::load(calendar_path)?;

    println!("{}", calendar.render());

    let evaluation_end = resolve_evaluation_end(&calendar, template);
    let space = analyze_workable_space(&calendar, template);

    println!(
        "   evaluation window: {} → {}",
        calendar.start_date, evaluation_end
    );

    let count = format!(
        "{} workable {}",
        space.len(),
        pluralize("day", space.len())
    );
    match (space.days().first(), space.days().last()) {
        (Some(first), Some(last)) => {
            println!("   {} ({} → {})", count.green(), first, last);
        }
        _ => {
            println!("   {}", "no workable days available".red());
        }
    }

    Ok(())
}
