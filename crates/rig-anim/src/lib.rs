//! # Tick-driven skeletal animation
//!
//! Drives hierarchical bone rigs through named keyframe clips, interpolates
//! bone rotations each frame, applies looping and fallback policy, and derives
//! an effect intensity signal for glow and trail rendering.
//!
//! ## Features
//!
//! - **Skeleton**: arena of bones built from a topology table, validated once
//! - **Clips**: immutable keyframe tables with linear rotation interpolation
//! - **Playback**: `"idle"` loops, every other clip returns to `"idle"` when done
//! - **Effects**: sinusoidal intensity per clip category
//! - **Archetypes**: character presets loaded from JSON or YAML, with two bundled
//!
//! ## Quick Start
//!
//! ```no_run
//! use rig_anim::{ArchetypeRegistry, DEFAULT_TICK};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ArchetypeRegistry::builtin()?;
//! let mut rig = registry.create_rig("aaron")?;
//! rig.play("scythe_swing")?;
//!
//! for _ in 0..60 {
//!     rig.tick(DEFAULT_TICK);
//!     for (bone, world) in rig.world_transforms() {
//!         // hand `world` to the renderer for `bone`
//!         let _ = (bone, world);
//!     }
//!     let _glow = rig.effect_intensity();
//! }
//! # Ok(())
//! # }
//! ```

pub mod archetype;
pub mod bone;
pub mod clip;
pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod interpolation;
pub mod library;
pub mod presets;
pub mod rig;
pub mod skeleton;
pub mod types;

pub use archetype::{Archetype, ArchetypeRegistry};
pub use bone::{Bone, BoneDef, BoneId};
pub use clip::{AnimationClip, Keyframe};
pub use config::{ArchetypeDef, ClipDef, KeyframeDef, RigConfig, SkeletonDef, SkeletonPreset};
pub use controller::{PlaybackController, PlaybackState, TickOutcome};
pub use effect::{EffectCategory, EffectTable};
pub use error::{Result, RigError};
pub use interpolation::evaluate;
pub use library::{ClipLibrary, IDLE_CLIP};
pub use rig::{BoneSnapshot, Rig, RigSnapshot};
pub use skeleton::{Skeleton, Traversal};
pub use types::{DEFAULT_TICK, Lerp, Pose, Rotation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
