//! Command implementations

pub mod info;
pub mod simulate;
pub mod skeleton;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use rig_anim::{ArchetypeRegistry, RigConfig};

/// Registry from a configuration file, or the bundled archetypes
pub fn load_registry(config: Option<&Path>) -> Result<ArchetypeRegistry> {
    match config {
        Some(path) => {
            let config = RigConfig::from_path(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            ArchetypeRegistry::from_config(&config)
                .with_context(|| format!("Invalid configuration in {}", path.display()))
        }
        None => ArchetypeRegistry::builtin().context("Bundled archetypes failed to load"),
    }
}
