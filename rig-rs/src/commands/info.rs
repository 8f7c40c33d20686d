//! Archetype listing

use std::path::Path;

use anyhow::{Context, Result};
use rig_anim::{Archetype, ArchetypeRegistry};

use super::load_registry;
use crate::utils::{add_table_row, create_table};

pub fn execute(config: Option<&Path>, archetype: Option<&str>) -> Result<()> {
    let registry = load_registry(config)?;

    let selected: Vec<&Archetype> = match archetype {
        Some(name) => vec![
            registry
                .get(name)
                .with_context(|| format!("Available archetypes: {}", archetype_names(&registry)))?,
        ],
        None => registry.iter().collect(),
    };

    println!("rig-anim {}", rig_anim::VERSION);
    println!("{} archetype(s)", selected.len());
    for archetype in selected {
        print_archetype(archetype);
    }

    Ok(())
}

fn print_archetype(archetype: &Archetype) {
    println!("\n=== {} ===", archetype.name());
    println!("Bones: {}", archetype.skeleton().len());
    println!("Root:  {}", archetype.skeleton().root().name());
    println!("Clips: {}", archetype.library().len());

    let mut table = create_table(&["Clip", "Duration", "Keyframes", "Bones", "Effect"]);
    for clip in archetype.library().clips() {
        add_table_row(
            &mut table,
            vec![
                clip.name().to_string(),
                format!("{:.2}s", clip.duration()),
                clip.keyframe_count().to_string(),
                clip.animated_bones().len().to_string(),
                format!("{:?}", archetype.effects().category(clip.name())),
            ],
        );
    }
    table.printstd();
}

/// Names of all archetypes, for error hints
pub fn archetype_names(registry: &ArchetypeRegistry) -> String {
    registry.names().collect::<Vec<_>>().join(", ")
}
