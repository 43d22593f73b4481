//! Per-frame update: clock, camera, animation, trail, render.

use crate::constants::LIGHT_DIRECTION;
use crate::scene::{CloudSlot, RenderBackend, SceneMesh};
use crate::stage::Stage;
use crate::state::ScrollState;
use crate::tween::{Change, TweenTarget};
use glam::Vec3;

/// Camera height for a scroll position: one section spacing per viewport
/// height, downwards.
#[inline]
pub fn camera_height(scroll: &ScrollState, section_spacing: f32) -> f32 {
    -scroll.progress() * section_spacing
}

/// Continuous idle rotation for every visible mesh.
pub fn spin_visible<M>(meshes: &mut [SceneMesh<M>], rate: Vec3, dt: f32) {
    for m in meshes.iter_mut().filter(|m| m.visible) {
        m.transform.rotation += rate * dt;
    }
}

impl<B: RenderBackend> Stage<B> {
    /// Advance one frame using the stage clock and render it.
    pub fn frame(&mut self) -> Result<(), B::Error> {
        let elapsed = self.clock.elapsed();
        self.frame_at(elapsed)
    }

    /// Advance to `elapsed` seconds since start and render.
    pub fn frame_at(&mut self, elapsed: f32) -> Result<(), B::Error> {
        let dt = self.clock.advance_to(elapsed);

        let target = self.pointer.parallax_target();
        self.camera.local.y = camera_height(&self.scroll, self.config.section_spacing);
        self.rig.ease_towards(target, dt);

        self.apply_tweens(dt);
        spin_visible(&mut self.scene.sections, self.config.spin_rate, dt);
        self.advance_trail();

        let view = self.camera.view_matrix(&self.rig);
        let projection = self.camera.projection_matrix();
        self.scene.render(view, projection, LIGHT_DIRECTION)
    }

    fn apply_tweens(&mut self, dt: f32) {
        for step in self.tweens.advance(dt) {
            match (step.target, step.change) {
                (TweenTarget::SectionRotation(i), Change::Add(delta)) => {
                    if let Some(m) = self.scene.sections.get_mut(i) {
                        m.transform.rotation += delta;
                    }
                }
                (TweenTarget::SectionRotation(i), Change::Set(value)) => {
                    if let Some(m) = self.scene.sections.get_mut(i) {
                        m.transform.rotation = value;
                    }
                }
                (TweenTarget::CompanionPosition, Change::Add(delta)) => {
                    if let Some(c) = self.scene.companion.as_mut() {
                        c.transform.position += delta;
                    }
                }
                (TweenTarget::CompanionPosition, Change::Set(value)) => {
                    if let Some(c) = self.scene.companion.as_mut() {
                        c.transform.position = value;
                    }
                }
            }
        }
    }

    fn advance_trail(&mut self) {
        let (Some(trail), Some(companion)) = (self.trail.as_mut(), self.scene.companion.as_ref())
        else {
            return;
        };
        trail.shift(companion.transform.position);
        let buffer = trail.to_point_buffer();
        self.scene.update_cloud(CloudSlot::Trail, &buffer);
    }
}
