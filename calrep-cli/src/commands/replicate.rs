use std::path::Path;

use anyhow::Result;
use calrep_core::{Calendar, SemesterTemplate, UnplacedStore, replicate};
use owo_colors::OwoColorize;

use crate::commands::unplaced::save_store;
use crate::render::Render;

pub fn run(
    source_path: &Path,
    target_path: &Path,
    template: &SemesterTemplate,
    output: Option<&Path>,
    unplaced: Option<&Path>,
) -> Result<()> {
    let source = Calendar::load(source_path)?;
    let mut target = Calendar::load(target_path)?;

    println!("{}", source.render());
    println!("{}", target.render());
    println!();

    let result = replicate(&source, &target, template)?;

    if result.is_empty() {
        println!("No professor events to replicate in '{}'", source);
        return Ok(());
    }

    for record in &result.placed {
        println!("   {}", record.render());
    }
    for entry in &result.unplaced {
        println!("   {}", entry.render());
    }

    println!();
    println!("{}", result.render());

    if let Some(path) = output {
        result.apply_to(&mut target);
        target.save(path)?;
        println!("Merged calendar written to {}", path.display());
    }

    if !result.unplaced.is_empty() {
        match unplaced {
            Some(path) => {
                let mut store = UnplacedStore::new();
                store.add(result.unplaced);
                save_store(&store, path)?;
                println!("Unplaced entries written to {}", path.display());
                println!(
                    "{}",
                    format!(
                        "Resolve them with `calrep place {0} <ID> <DATE> --calendar ...` \
                         or `calrep dismiss {0} <ID>`.",
                        path.display()
                    )
                    .dimmed()
                );
            }
            None => {
                println!(
                    "{}",
                    "Unplaced events need manual placement in the target calendar \
                     (rerun with --unplaced FILE to resolve them here)."
                        .dimmed()
                );
            }
        }
    }

    Ok(())
}
