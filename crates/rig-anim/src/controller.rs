//! Playback state machine
//!
//! A controller is either idle or playing one clip. `tick` advances the
//! clip, applies the end-of-clip policy, samples the clip and writes the
//! resulting rotations to the skeleton:
//!
//! - the archetype's `"idle"` clip wraps back to time zero;
//! - every other clip is transient and hands over to `"idle"` when it ends.

use std::sync::Arc;

use crate::clip::AnimationClip;
use crate::effect::EffectTable;
use crate::error::Result;
use crate::interpolation::evaluate;
use crate::library::{ClipLibrary, IDLE_CLIP};
use crate::skeleton::Skeleton;
use crate::types::Pose;

/// Current playback state
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PlaybackState {
    /// No clip playing
    #[default]
    Idle,
    /// Playing `clip`, `elapsed` seconds in
    Playing {
        clip: Arc<AnimationClip>,
        elapsed: f32,
    },
}

impl PlaybackState {
    /// Check if a clip is playing
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }
}

/// What a tick did to the playback state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing playing, tick ignored
    Stopped,
    /// Clip advanced within its duration
    Advanced,
    /// Idle clip ran past its end and restarted
    Looped,
    /// Transient clip ran past its end; playback fell back to idle
    Completed { clip: String },
}

/// Drives one rig through the clips of its archetype
#[derive(Debug, Clone)]
pub struct PlaybackController {
    library: Arc<ClipLibrary>,
    effects: Arc<EffectTable>,
    state: PlaybackState,
    combo_count: u32,
}

impl PlaybackController {
    /// Create an idle controller over a clip library
    pub fn new(library: Arc<ClipLibrary>, effects: Arc<EffectTable>) -> Self {
        Self {
            library,
            effects,
            state: PlaybackState::Idle,
            combo_count: 0,
        }
    }

    /// Start a clip from time zero, preempting whatever is playing
    ///
    /// An unknown clip leaves the current playback untouched and is reported
    /// as [`RigError::ClipNotFound`](crate::RigError::ClipNotFound).
    pub fn play(&mut self, name: &str) -> Result<()> {
        match self.library.get(name) {
            Ok(clip) => {
                log::debug!(
                    "[{}] play '{}' ({:.2}s)",
                    self.library.archetype(),
                    name,
                    clip.duration()
                );
                self.state = PlaybackState::Playing {
                    clip: Arc::clone(clip),
                    elapsed: 0.0,
                };
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected play request: {err}");
                Err(err)
            }
        }
    }

    /// Stop playback; the skeleton keeps its last pose
    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// Advance playback by `dt` seconds and write the pose to `skeleton`
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32, skeleton: &mut Skeleton) -> TickOutcome {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid tick delta {dt}");
            0.0
        };

        let outcome = match &mut self.state {
            PlaybackState::Idle => return TickOutcome::Stopped,
            PlaybackState::Playing { clip, elapsed } => {
                *elapsed += dt;
                if *elapsed <= clip.duration() {
                    TickOutcome::Advanced
                } else if clip.name() == IDLE_CLIP {
                    *elapsed = 0.0;
                    TickOutcome::Looped
                } else {
                    TickOutcome::Completed {
                        clip: clip.name().to_string(),
                    }
                }
            }
        };

        if let TickOutcome::Completed { clip } = &outcome {
            self.fall_back_to_idle(clip);
        }

        if let Some(pose) = self.sample() {
            skeleton.apply_pose(&pose);
        }
        outcome
    }

    fn fall_back_to_idle(&mut self, finished: &str) {
        self.state = match self.library.idle() {
            Some(idle) => {
                log::debug!(
                    "[{}] '{}' finished, returning to '{IDLE_CLIP}'",
                    self.library.archetype(),
                    finished
                );
                PlaybackState::Playing {
                    clip: Arc::clone(idle),
                    elapsed: 0.0,
                }
            }
            None => {
                log::debug!(
                    "[{}] '{}' finished with no idle clip, stopping",
                    self.library.archetype(),
                    finished
                );
                PlaybackState::Idle
            }
        };
    }

    /// Pose of the current clip at the current time
    pub fn sample(&self) -> Option<Pose> {
        match &self.state {
            PlaybackState::Playing { clip, elapsed } => Some(evaluate(clip, *elapsed)),
            PlaybackState::Idle => None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_active()
    }

    /// Name of the playing clip
    pub fn current_clip(&self) -> Option<&str> {
        match &self.state {
            PlaybackState::Playing { clip, .. } => Some(clip.name()),
            PlaybackState::Idle => None,
        }
    }

    /// Seconds since the current clip started (0 when idle)
    pub fn elapsed(&self) -> f32 {
        match &self.state {
            PlaybackState::Playing { elapsed, .. } => *elapsed,
            PlaybackState::Idle => 0.0,
        }
    }

    /// Effect intensity in `[0, 1]` for the current clip and time
    pub fn effect_intensity(&self) -> f32 {
        match &self.state {
            PlaybackState::Playing { clip, elapsed } => {
                self.effects.intensity(clip.name(), *elapsed)
            }
            PlaybackState::Idle => 0.0,
        }
    }

    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    /// Combo counter owned by higher-level combat logic
    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn set_combo_count(&mut self, count: u32) {
        self.combo_count = count;
    }
}
