//! Application state and event entry points.
//!
//! A [`Stage`] owns everything the page mutates: scroll and pointer state,
//! the camera rig, the section tracker, running tweens and the scene with
//! its renderer. Front-ends hold one stage and forward platform events to it;
//! nothing lives in globals.

use crate::asset::{AssetAction, AssetEvent, AssetSlot, Resolved};
use crate::color::Rgb;
use crate::config::SceneConfig;
use crate::constants::*;
use crate::generate::{generate_field, generate_galaxy, FieldParams, ParamsError};
use crate::geometry::{octahedron, section_meshes, MeshData};
use crate::scene::{CloudSlot, PointMaterial, RenderBackend, Scene, Transform};
use crate::section::{SectionChange, SectionTracker};
use crate::settings::{SettingChange, SettingEffect, Settings, SettingsError};
use crate::state::{Camera, CameraRig, FrameClock, PointerState, ScrollState};
use crate::trail::Trail;
use crate::tween::{Ease, Tween, Tweens};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StageError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Params(#[from] ParamsError),
}

pub struct Stage<B: RenderBackend> {
    pub config: SceneConfig,
    pub settings: Settings,
    pub scroll: ScrollState,
    pub pointer: PointerState,
    pub rig: CameraRig,
    pub camera: Camera,
    pub tracker: SectionTracker,
    pub tweens: Tweens,
    pub scene: Scene<B>,
    pub(crate) trail: Option<Trail>,
    pub(crate) clock: FrameClock,
    asset: Option<AssetSlot>,
    viewport: (f32, f32),
    rng: StdRng,
}

impl<B: RenderBackend> Stage<B> {
    /// Build the scene: section meshes, particle field and galaxy. The
    /// companion (if configured) arrives later through
    /// [`Stage::on_asset_event`].
    pub fn new(backend: B, config: SceneConfig, width: f32, height: f32) -> Result<Self, ParamsError> {
        Self::with_rng(backend, config, width, height, StdRng::from_entropy())
    }

    pub fn with_rng(
        backend: B,
        config: SceneConfig,
        width: f32,
        height: f32,
        rng: StdRng,
    ) -> Result<Self, ParamsError> {
        let settings = config.settings.clone();
        let mut scene = Scene::new(backend, settings.material_color);
        let meshes = section_meshes();
        for i in 0..config.section_count() {
            scene.add_section_mesh(&meshes[i % meshes.len()], config.section_position(i));
        }
        let asset = config
            .companion
            .as_ref()
            .map(|c| AssetSlot::new(c.asset_path.clone(), c.max_load_attempts));

        let mut camera = Camera::default();
        camera.set_viewport(width, height);
        let mut stage = Self {
            tracker: SectionTracker::new(config.section_count()),
            config,
            settings,
            scroll: ScrollState::new(height),
            pointer: PointerState::default(),
            rig: CameraRig::default(),
            camera,
            tweens: Tweens::default(),
            scene,
            trail: None,
            clock: FrameClock::new(),
            asset,
            viewport: (width, height),
            rng,
        };
        stage.regenerate_field()?;
        stage.regenerate_galaxy()?;
        Ok(stage)
    }

    /// Path of the companion asset the front-end should fetch first.
    pub fn pending_asset(&self) -> Option<&str> {
        self.asset
            .as_ref()
            .filter(|a| !a.is_settled())
            .map(|a| a.path.as_str())
    }

    #[inline]
    pub fn asset_slot(&self) -> Option<&AssetSlot> {
        self.asset.as_ref()
    }

    #[inline]
    pub fn trail(&self) -> Option<&Trail> {
        self.trail.as_ref()
    }

    #[inline]
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    #[inline]
    pub fn current_section(&self) -> usize {
        self.tracker.current()
    }

    /// Scroll event. Starts the section animations on a transition.
    pub fn on_scroll(&mut self, offset: f32) -> Option<SectionChange> {
        self.scroll.set_offset(offset);
        let change = self
            .tracker
            .update(self.scroll.offset, self.scroll.viewport_height)?;
        self.tweens.start(Tween::rotate_by(
            change.to,
            self.config.section_tween_delta,
            self.config.section_tween_duration,
            Ease::Power2InOut,
        ));
        self.start_companion_tween(change.to);
        Some(change)
    }

    fn start_companion_tween(&mut self, section: usize) {
        let Some(companion) = &self.scene.companion else {
            return;
        };
        let Some(target) = self
            .config
            .companion
            .as_ref()
            .and_then(|c| c.targets.get(section).copied())
        else {
            log::debug!("[companion] no target for section {}", section);
            return;
        };
        self.tweens.start(Tween::move_to(
            companion.transform.position,
            target,
            self.config.companion_tween_duration,
            Ease::Power1Out,
        ));
    }

    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        let (w, h) = self.viewport;
        self.pointer = PointerState::from_client(client_x, client_y, w, h);
    }

    /// Viewport change in CSS pixels; the output is sized by the pixel ratio
    /// (capped at 2).
    pub fn on_resize(&mut self, width: f32, height: f32, pixel_ratio: f64) {
        let ratio = pixel_ratio.clamp(1.0, MAX_PIXEL_RATIO) as f32;
        self.on_resize_physical(
            width,
            height,
            (width * ratio).round() as u32,
            (height * ratio).round() as u32,
        );
    }

    /// Viewport change where the output size is dictated by the platform,
    /// as with a native window whose surface must match its physical size.
    pub fn on_resize_physical(
        &mut self,
        width: f32,
        height: f32,
        physical_width: u32,
        physical_height: u32,
    ) {
        if !(width > 0.0 && height > 0.0) || physical_width == 0 || physical_height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.scroll.viewport_height = height;
        self.camera.set_viewport(width, height);
        self.scene.resize(physical_width, physical_height);
    }

    /// Settings-editor commit.
    pub fn apply_setting(&mut self, change: SettingChange) -> Result<SettingEffect, StageError> {
        let effect = self.settings.apply(change)?;
        match effect {
            SettingEffect::RegenerateField => self.regenerate_field()?,
            SettingEffect::RegenerateGalaxy => self.regenerate_galaxy()?,
            SettingEffect::Recolor => self.recolor(self.settings.material_color),
        }
        Ok(effect)
    }

    pub fn regenerate_field(&mut self) -> Result<(), ParamsError> {
        let params = FieldParams::for_sections(
            self.settings.field_count,
            self.config.section_spacing,
            self.config.section_count(),
        );
        let buffer = generate_field(&params, &mut self.rng)?;
        let material = PointMaterial {
            size: FIELD_POINT_SIZE,
            color: self.settings.material_color,
            vertex_colors: false,
        };
        self.scene.replace_cloud(CloudSlot::Field, &buffer, material);
        Ok(())
    }

    pub fn regenerate_galaxy(&mut self) -> Result<(), ParamsError> {
        let params = self.settings.galaxy;
        let buffer = generate_galaxy(&params, &mut self.rng)?;
        let material = PointMaterial {
            size: params.size,
            color: Rgb::WHITE,
            vertex_colors: true,
        };
        self.scene.replace_cloud(CloudSlot::Galaxy, &buffer, material);
        Ok(())
    }

    fn recolor(&mut self, color: Rgb) {
        self.scene.material_color = color;
        for slot in [CloudSlot::Field, CloudSlot::Trail] {
            if let Some(m) = self.scene.cloud_material_mut(slot) {
                m.color = color;
            }
        }
    }

    /// Completion of a companion load attempt. Returns a retry request while
    /// the attempt budget lasts; once it is spent a placeholder is installed.
    pub fn on_asset_event(&mut self, event: AssetEvent) -> AssetAction {
        let Some(slot) = self.asset.as_mut() else {
            return AssetAction::None;
        };
        let (resolved, action) = slot.resolve(event);
        match resolved {
            Some(Resolved::Asset(mesh)) => self.install_companion(&mesh),
            Some(Resolved::Placeholder) => {
                self.install_companion(&octahedron(COMPANION_PLACEHOLDER_RADIUS))
            }
            None => {}
        }
        action
    }

    fn install_companion(&mut self, mesh: &MeshData) {
        let Some(cfg) = self.config.companion.as_ref() else {
            return;
        };
        let section = self.tracker.current();
        let position = cfg
            .targets
            .get(section)
            .or_else(|| cfg.targets.last())
            .copied()
            .unwrap_or_else(|| self.config.section_position(section));
        let trail_len = cfg.trail_len;
        let transform = Transform {
            position,
            rotation: Vec3::ZERO,
            scale: cfg.scale,
        };
        self.scene.set_companion(mesh, transform);

        let trail = Trail::new(trail_len, position);
        let material = PointMaterial {
            size: TRAIL_POINT_SIZE,
            color: self.settings.material_color,
            vertex_colors: false,
        };
        self.scene
            .replace_cloud(CloudSlot::Trail, &trail.to_point_buffer(), material);
        self.trail = Some(trail);
    }
}
