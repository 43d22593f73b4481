use crate::constants::*;
use crate::settings::Settings;
use glam::Vec3;

/// Asset-loaded variant: a companion object that glides to a per-section
/// spot on every transition, dragging a particle trail behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanionConfig {
    pub asset_path: String,
    /// Resting position per section. May be shorter than the section list;
    /// sections without a target leave the companion where it is.
    pub targets: Vec<Vec3>,
    pub trail_len: usize,
    pub scale: f32,
    pub max_load_attempts: u32,
}

impl CompanionConfig {
    pub fn new(asset_path: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            targets: default_companion_targets(),
            trail_len: TRAIL_PARTICLE_COUNT,
            scale: COMPANION_SCALE,
            max_load_attempts: MAX_LOAD_ATTEMPTS,
        }
    }
}

/// Startup configuration. Values edited at runtime live in [`Settings`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub section_spacing: f32,
    /// Horizontal offset of each section mesh; its length is the section
    /// count.
    pub section_x: Vec<f32>,
    pub spin_rate: Vec3,
    pub section_tween_delta: Vec3,
    pub section_tween_duration: f32,
    pub companion_tween_duration: f32,
    pub settings: Settings,
    pub companion: Option<CompanionConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            section_spacing: OBJECTS_DISTANCE,
            section_x: SECTION_X.to_vec(),
            spin_rate: SPIN_RATE,
            section_tween_delta: SECTION_TWEEN_DELTA,
            section_tween_duration: SECTION_TWEEN_DURATION,
            companion_tween_duration: COMPANION_TWEEN_DURATION,
            settings: Settings::default(),
            companion: None,
        }
    }
}

impl SceneConfig {
    pub fn with_companion(asset_path: impl Into<String>) -> Self {
        Self {
            spin_rate: SPIN_RATE_COMPANION,
            companion: Some(CompanionConfig::new(asset_path)),
            ..Self::default()
        }
    }

    #[inline]
    pub fn section_count(&self) -> usize {
        self.section_x.len()
    }

    /// World position of section mesh `i`.
    #[inline]
    pub fn section_position(&self, i: usize) -> Vec3 {
        let x = self.section_x.get(i).copied().unwrap_or(0.0);
        Vec3::new(x, -self.section_spacing * i as f32, 0.0)
    }
}
