//! Effect intensity signal for glow and trail rendering
//!
//! Intensity is a rendering hint only. It never feeds back into bone
//! transforms.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How a clip drives the effect signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectCategory {
    /// Constant zero
    #[default]
    None,
    /// Pulse at 10 rad/s
    SlowPulse,
    /// Pulse at 8 rad/s
    FastPulse,
}

impl EffectCategory {
    /// Angular rate of the pulse (radians per second)
    pub fn rate(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::SlowPulse => 10.0,
            Self::FastPulse => 8.0,
        }
    }

    /// Intensity in `[0, 1]` after `elapsed` seconds of playback
    pub fn intensity(self, elapsed: f32) -> f32 {
        match self {
            Self::None => 0.0,
            Self::SlowPulse | Self::FastPulse => {
                (0.5 * (elapsed * self.rate()).sin() + 0.5).clamp(0.0, 1.0)
            }
        }
    }
}

/// Clip name to effect category lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectTable {
    categories: HashMap<String, EffectCategory>,
}

impl EffectTable {
    /// Table with no pulsing clips
    pub fn empty() -> Self {
        Self {
            categories: HashMap::new(),
        }
    }

    /// Assign a category to a clip name
    pub fn set(&mut self, clip: impl Into<String>, category: EffectCategory) {
        self.categories.insert(clip.into(), category);
    }

    /// Category for a clip; unlisted clips have no effect
    pub fn category(&self, clip: &str) -> EffectCategory {
        self.categories.get(clip).copied().unwrap_or_default()
    }

    /// Intensity for `clip` after `elapsed` seconds
    pub fn intensity(&self, clip: &str, elapsed: f32) -> f32 {
        self.category(clip).intensity(elapsed)
    }
}

impl Default for EffectTable {
    /// The weapon clips of the bundled archetypes
    fn default() -> Self {
        let mut table = Self::empty();
        table.set("scythe_swing", EffectCategory::SlowPulse);
        table.set("scythe_spin", EffectCategory::SlowPulse);
        table.set("blade_attack", EffectCategory::FastPulse);
        table.set("energy_burst", EffectCategory::FastPulse);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("scythe_swing", EffectCategory::SlowPulse)]
    #[test_case("scythe_spin", EffectCategory::SlowPulse)]
    #[test_case("blade_attack", EffectCategory::FastPulse)]
    #[test_case("energy_burst", EffectCategory::FastPulse)]
    #[test_case("idle", EffectCategory::None)]
    #[test_case("combo_attack", EffectCategory::None)]
    fn test_default_categories(clip: &str, expected: EffectCategory) {
        assert_eq!(EffectTable::default().category(clip), expected);
    }

    #[test]
    fn test_rates() {
        assert_eq!(EffectCategory::None.rate(), 0.0);
        assert_eq!(EffectCategory::SlowPulse.rate(), 10.0);
        assert_eq!(EffectCategory::FastPulse.rate(), 8.0);
    }

    #[test]
    fn test_pulse_formula() {
        let t = 0.3;
        let expected = 0.5 * (t * 10.0_f32).sin() + 0.5;
        assert!((EffectCategory::SlowPulse.intensity(t) - expected).abs() < 1e-6);
        assert!((EffectCategory::SlowPulse.intensity(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_intensity_always_in_unit_range() {
        let table = EffectTable::default();
        for clip in ["scythe_swing", "blade_attack", "idle"] {
            for step in 0..2000 {
                let elapsed = step as f32 * 0.0137;
                let value = table.intensity(clip, elapsed);
                assert!((0.0..=1.0).contains(&value), "{clip} at {elapsed}: {value}");
            }
        }
    }

    #[test]
    fn test_override_category() {
        let mut table = EffectTable::default();
        table.set("combo_attack", EffectCategory::FastPulse);
        assert_eq!(table.category("combo_attack"), EffectCategory::FastPulse);
    }

    #[test]
    fn test_category_deserializes_snake_case() {
        let category: EffectCategory = serde_json::from_str("\"slow_pulse\"").unwrap();
        assert_eq!(category, EffectCategory::SlowPulse);
    }
}
