//! Validated archetypes and rig creation

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{ArchetypeDef, RigConfig};
use crate::effect::EffectTable;
use crate::error::{Result, RigError};
use crate::library::ClipLibrary;
use crate::presets::builtin_config;
use crate::rig::Rig;
use crate::skeleton::Skeleton;

/// A character preset ready to spawn rigs
///
/// The skeleton is a template cloned into every rig. The clip library and
/// effect table are shared read-only.
#[derive(Debug, Clone)]
pub struct Archetype {
    name: String,
    skeleton: Skeleton,
    library: Arc<ClipLibrary>,
    effects: Arc<EffectTable>,
}

impl Archetype {
    /// Validate a definition: topology, every clip, clip name uniqueness
    pub fn from_def(def: &ArchetypeDef) -> Result<Self> {
        let skeleton = Skeleton::build(&def.skeleton.topology())?;

        let mut effects = EffectTable::default();
        let mut clips = Vec::with_capacity(def.clips.len());
        for clip_def in &def.clips {
            let clip = clip_def.to_clip()?;
            for bone in clip.animated_bones() {
                if !skeleton.contains(bone) {
                    log::warn!(
                        "Archetype '{}': clip '{}' animates unknown bone '{}', it will be ignored",
                        def.name,
                        clip.name(),
                        bone
                    );
                }
            }
            if let Some(category) = clip_def.effect {
                effects.set(clip.name(), category);
            }
            clips.push(clip);
        }

        let library = ClipLibrary::new(def.name.clone(), clips)?;
        log::debug!(
            "Loaded archetype '{}': {} bones, {} clips",
            def.name,
            skeleton.len(),
            library.len()
        );

        Ok(Self {
            name: def.name.clone(),
            skeleton,
            library: Arc::new(library),
            effects: Arc::new(effects),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rest-pose skeleton template
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    /// Spawn an independent rig
    pub fn create_rig(&self) -> Rig {
        Rig::new(
            self.name.clone(),
            self.skeleton.clone(),
            Arc::clone(&self.library),
            Arc::clone(&self.effects),
        )
    }
}

/// All archetypes known to the application
#[derive(Debug, Clone, Default)]
pub struct ArchetypeRegistry {
    archetypes: BTreeMap<String, Archetype>,
}

impl ArchetypeRegistry {
    /// Validate every archetype of a configuration up front
    pub fn from_config(config: &RigConfig) -> Result<Self> {
        let mut archetypes = BTreeMap::new();
        for def in &config.archetypes {
            let archetype = Archetype::from_def(def)?;
            if archetypes.insert(def.name.clone(), archetype).is_some() {
                return Err(RigError::DuplicateArchetype(def.name.clone()));
            }
        }
        Ok(Self { archetypes })
    }

    /// Registry holding the bundled "aaron" and "mani" archetypes
    pub fn builtin() -> Result<Self> {
        Self::from_config(&builtin_config()?)
    }

    /// Add an archetype, rejecting duplicate names
    pub fn register(&mut self, archetype: Archetype) -> Result<()> {
        if self.archetypes.contains_key(archetype.name()) {
            return Err(RigError::DuplicateArchetype(archetype.name().to_string()));
        }
        self.archetypes
            .insert(archetype.name().to_string(), archetype);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Archetype> {
        self.archetypes
            .get(name)
            .ok_or_else(|| RigError::UnknownArchetype(name.to_string()))
    }

    /// Archetype names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.archetypes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.values()
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Spawn a rig of the named archetype
    pub fn create_rig(&self, archetype: &str) -> Result<Rig> {
        Ok(self.get(archetype)?.create_rig())
    }
}
