//! Configuration validation

use std::path::Path;

use anyhow::{Context, Result};
use rig_anim::{ArchetypeRegistry, RigConfig};

pub fn execute(file: &Path) -> Result<()> {
    log::info!("Validating {}", file.display());

    let config = RigConfig::from_path(file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let registry = ArchetypeRegistry::from_config(&config)
        .with_context(|| format!("Validation failed for {}", file.display()))?;

    for archetype in registry.iter() {
        if archetype.library().idle().is_none() {
            println!(
                "warning: archetype '{}' has no 'idle' clip; finished clips will stop playback",
                archetype.name()
            );
        }
        println!(
            "ok: {} ({} bones, {} clips)",
            archetype.name(),
            archetype.skeleton().len(),
            archetype.library().len()
        );
    }
    println!("{} is valid", file.display());

    Ok(())
}
