//! View-side state shared with the front-ends: scroll, pointer, camera rig
//! and the frame clock.
//!
//! These types avoid platform-specific APIs; the front-ends translate DOM or
//! winit events into plain numbers before handing them over.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};
use instant::Instant;

/// Raw scroll offset plus the viewport height it is measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub offset: f32,
    pub viewport_height: f32,
}

impl ScrollState {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height,
        }
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
    }

    /// Scroll position in units of viewport heights.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.viewport_height > 0.0 {
            self.offset / self.viewport_height
        } else {
            0.0
        }
    }
}

/// Pointer position normalized to \[-0.5, 0.5\] on both axes, with +y down
/// as reported by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn from_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Self {
        let norm = |v: f32, extent: f32| {
            if extent > 0.0 && v.is_finite() {
                (v / extent - 0.5).clamp(-0.5, 0.5)
            } else {
                0.0
            }
        };
        Self {
            x: norm(client_x, width),
            y: norm(client_y, height),
        }
    }

    /// Rig target for the current pointer; screen-down maps to world-down.
    #[inline]
    pub fn parallax_target(&self) -> Vec2 {
        Vec2::new(self.x * PARALLAX_AMPLITUDE, -self.y * PARALLAX_AMPLITUDE)
    }
}

/// Parent transform of the camera. Its x/y trail the parallax target with
/// exponential smoothing; the camera inside it tracks scroll directly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraRig {
    pub position: Vec2,
}

impl CameraRig {
    pub fn ease_towards(&mut self, target: Vec2, dt: f32) {
        self.position += (target - self.position) * (dt * PARALLAX_EASE_RATE);
    }
}

/// Perspective camera living inside the [`CameraRig`].
#[derive(Clone, Debug)]
pub struct Camera {
    /// Position relative to the rig.
    pub local: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            local: Vec3::new(0.0, 0.0, CAMERA_Z),
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space eye position for the given rig.
    #[inline]
    pub fn eye(&self, rig: &CameraRig) -> Vec3 {
        self.local + rig.position.extend(0.0)
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World-to-view transform. The camera never rotates; it looks down -Z.
    pub fn view_matrix(&self, rig: &CameraRig) -> Mat4 {
        let eye = self.eye(rig);
        Mat4::look_at_rh(eye, eye + Vec3::NEG_Z, Vec3::Y)
    }
}

/// Elapsed/delta bookkeeping for the render loop.
#[derive(Clone, Debug)]
pub struct FrameClock {
    start: Instant,
    previous: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            previous: 0.0,
        }
    }

    /// Seconds since the clock started.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Record `elapsed` as the current frame time and return the delta to the
    /// previous frame. Time never runs backwards.
    pub fn advance_to(&mut self, elapsed: f32) -> f32 {
        let delta = (elapsed - self.previous).max(0.0);
        self.previous = self.previous.max(elapsed);
        delta
    }
}
